//! # CLI Command Implementations
//!
//! Every command starts from [`open_workspace`]: build the bands, load both
//! documents, report what was found. Only the shell writes anything back.

use crate::AppError;
use crate::config::Settings;
use crate::input::TerminalInput;
use crate::render;
use crate::shell::{self, Workspace};
use childcare_core::menu::validate_week;
use childcare_core::{LoadOutcome, Menu, Roster, load_menu, load_students};
use chrono::NaiveDate;
use serde_json::{Value, json};
use std::path::Path;

// =============================================================================
// WORKSPACE
// =============================================================================

/// Build the roster and menu from the saved documents.
///
/// Missing or malformed documents are reported and leave the corresponding
/// state empty. Only an unusable band configuration is an error.
pub fn open_workspace(settings: &Settings, today: NaiveDate) -> Result<Workspace, AppError> {
    let (registry, overlaps) = settings.band_registry()?;
    for overlap in &overlaps {
        tracing::warn!(
            first = %overlap.first,
            second = %overlap.second,
            "Configured age bands overlap; the first listed band wins"
        );
    }

    let files = settings.data_files();
    let mut roster = Roster::new(registry);
    let outcome = load_students(&files.students, &mut roster, today);
    report_load("students", &files.students, &outcome);

    let (menu, outcome) = load_menu(&files.menu);
    report_load("menu", &files.menu, &outcome);

    tracing::debug!(
        students = roster.len(),
        enrolled = roster.total_enrolled(),
        menu_days = menu.day_count(),
        %today,
        "Workspace ready"
    );
    Ok(Workspace {
        files,
        roster,
        menu,
        today,
    })
}

fn report_load(document: &str, path: &Path, outcome: &LoadOutcome) {
    match outcome {
        LoadOutcome::Loaded(summary) => {
            tracing::info!(
                document,
                path = %path.display(),
                restored = summary.restored,
                "Loaded saved data"
            );
            if summary.unplaceable > 0 {
                tracing::warn!(
                    document,
                    count = summary.unplaceable,
                    "Saved students no longer fit any classroom and were cleared"
                );
            }
            if summary.skipped > 0 {
                tracing::warn!(
                    document,
                    count = summary.skipped,
                    "Saved entries with duplicate ids were skipped"
                );
            }
        }
        LoadOutcome::Missing => {
            tracing::info!(document, path = %path.display(), "No saved data found, starting empty");
        }
        LoadOutcome::Malformed(reason) => {
            tracing::warn!(
                document,
                path = %path.display(),
                reason = %reason,
                "Saved data is unreadable, starting empty"
            );
        }
    }
}

fn print_json(value: &Value) -> Result<(), AppError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| AppError::Output(e.to_string()))?;
    println!("{}", text);
    Ok(())
}

// =============================================================================
// SHELL COMMAND
// =============================================================================

/// Run the interactive shell on the terminal.
pub fn cmd_shell(settings: &Settings, today: NaiveDate) -> Result<(), AppError> {
    let mut ws = open_workspace(settings, today)?;
    let mut input = TerminalInput::new()?;
    shell::run(&mut ws, &mut input);
    Ok(())
}

// =============================================================================
// REPORT COMMANDS
// =============================================================================

/// Students per classroom.
pub fn cmd_list(settings: &Settings, today: NaiveDate, json_mode: bool) -> Result<(), AppError> {
    let ws = open_workspace(settings, today)?;

    if json_mode {
        let classrooms: Vec<Value> = ws
            .roster
            .classrooms()
            .iter()
            .map(|room| {
                let students: Vec<Value> = room
                    .students
                    .iter()
                    .map(|student| {
                        let age = student.age_on(today);
                        json!({
                            "student_id": student.id.value(),
                            "name": student.full_name(),
                            "age_months": age.map(|a| a.total_months()),
                            "age": age.map(|a| a.to_string()),
                        })
                    })
                    .collect();
                json!({
                    "label": room.band.label(),
                    "min_months": room.band.min_age().total_months(),
                    "max_months": room.band.max_age().total_months(),
                    "students": students,
                })
            })
            .collect();
        return print_json(&json!({
            "today": today.to_string(),
            "classrooms": classrooms,
            "total": ws.roster.total_enrolled(),
        }));
    }

    println!("{}", render::classrooms(&ws.roster, today));
    Ok(())
}

/// Parent/guardian contact details.
pub fn cmd_guardians(settings: &Settings, today: NaiveDate, json_mode: bool) -> Result<(), AppError> {
    let ws = open_workspace(settings, today)?;

    if json_mode {
        let entries: Vec<Value> = ws
            .roster
            .guardian_listing()
            .map(|student| {
                json!({
                    "student_id": student.id.value(),
                    "student": student.full_name(),
                    "guardian": student.guardian,
                })
            })
            .collect();
        return print_json(&Value::Array(entries));
    }

    println!("{}", render::guardians(&ws.roster));
    Ok(())
}

/// The menu of one week.
pub fn cmd_menu(
    settings: &Settings,
    today: NaiveDate,
    json_mode: bool,
    week: u32,
) -> Result<(), AppError> {
    validate_week(week)?;
    let ws = open_workspace(settings, today)?;

    if json_mode {
        let days = ws.menu.week(week).cloned().unwrap_or_default();
        return print_json(&json!({ "week": week, "days": days }));
    }

    println!("{}", render::week_menu(&ws.menu, week));
    Ok(())
}

/// Students with allergies and the planned meals that mention them.
pub fn cmd_allergies(settings: &Settings, today: NaiveDate, json_mode: bool) -> Result<(), AppError> {
    let ws = open_workspace(settings, today)?;

    if json_mode {
        return print_json(&allergy_json(&ws.roster, &ws.menu));
    }

    println!("{}", render::allergies(&ws.roster, &ws.menu));
    Ok(())
}

fn allergy_json(roster: &Roster, menu: &Menu) -> Value {
    let classrooms: Vec<Value> = roster
        .allergy_listing()
        .iter()
        .map(|room| {
            let students: Vec<Value> = room
                .students
                .iter()
                .map(|student| {
                    json!({
                        "student_id": student.id.value(),
                        "name": student.full_name(),
                        "allergies": student.allergies,
                    })
                })
                .collect();
            json!({ "label": room.band.label(), "students": students })
        })
        .collect();

    let conflicts: Vec<Value> = menu
        .allergen_conflicts(roster)
        .into_iter()
        .map(|conflict| {
            json!({
                "week": conflict.week,
                "day": conflict.day,
                "meal": conflict.slot.name(),
                "dish": conflict.meal,
                "student_id": conflict.student.value(),
                "student": conflict.student_name,
                "allergy": conflict.allergy,
            })
        })
        .collect();

    json!({ "classrooms": classrooms, "conflicts": conflicts })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use childcare_core::{DayMenu, StudentDetails, Weekday, save_menu, save_students};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date")
    }

    #[test]
    fn open_workspace_on_empty_dir_starts_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = Settings::defaults(dir.path());

        let ws = open_workspace(&settings, today()).expect("open");
        assert!(ws.roster.is_empty());
        assert!(ws.menu.is_empty());
        assert_eq!(ws.files.students, dir.path().join("students.json"));
    }

    #[test]
    fn open_workspace_tolerates_malformed_documents() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("students.json"), b"{ not json").expect("write");
        std::fs::write(dir.path().join("kitchen.json"), b"[1, 2]").expect("write");

        let ws = open_workspace(&Settings::defaults(dir.path()), today()).expect("open");
        assert!(ws.roster.is_empty());
        assert!(ws.menu.is_empty());
    }

    #[test]
    fn allergy_json_reports_conflicts() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = Settings::defaults(dir.path());
        let files = settings.data_files();

        let mut roster = Roster::default();
        roster.enroll(
            StudentDetails::new("Kylian", "Mbappe", NaiveDate::from_ymd_opt(2025, 1, 1).expect("date"))
                .with_allergies(["Dairy"]),
            today(),
        ).expect("enroll");
        save_students(&files.students, &roster).expect("save students");
        let mut menu = Menu::new();
        menu.set_day(1, Weekday::Tuesday, DayMenu::new("Toast", "Pasta", "Dairy custard"))
            .expect("set");
        save_menu(&files.menu, &menu).expect("save menu");

        let ws = open_workspace(&settings, today()).expect("open");
        let value = allergy_json(&ws.roster, &ws.menu);

        assert_eq!(value["classrooms"][0]["students"][0]["name"], "Kylian Mbappe");
        assert_eq!(value["conflicts"][0]["day"], "Tuesday");
        assert_eq!(value["conflicts"][0]["meal"], "Afternoon Tea");
        assert_eq!(value["conflicts"][0]["allergy"], "Dairy");
    }

    #[test]
    fn menu_command_rejects_out_of_range_week() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = cmd_menu(&Settings::defaults(dir.path()), today(), true, 53);
        assert!(matches!(result, Err(AppError::Core(_))));
    }
}
