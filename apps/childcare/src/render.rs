//! # Terminal Rendering
//!
//! Reports are built as strings so the shell and the one-shot commands print
//! the same text. Colors come from `colored`, which honours `NO_COLOR`.

use childcare_core::{Menu, Roster, StudentRecord};
use chrono::NaiveDate;
use colored::Colorize;

// =============================================================================
// TABLE
// =============================================================================

/// A bordered text table with a styled header row.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Rows shorter than the header are padded with empty cells.
    pub fn add_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        row.resize(self.headers.len().max(row.len()), String::new());
        self.rows.push(row);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.chars().count();
                match widths.get_mut(i) {
                    Some(width) => *width = (*width).max(len),
                    None => widths.push(len),
                }
            }
        }
        widths
    }

    #[must_use]
    pub fn render(&self) -> String {
        let widths = self.widths();
        let border = {
            let mut line = String::from("+");
            for width in &widths {
                line.push_str(&"-".repeat(width + 2));
                line.push('+');
            }
            line.green().to_string()
        };
        let bar = "|".green().to_string();

        let format_row = |cells: &[String], header: bool| {
            let mut line = bar.clone();
            for (i, width) in widths.iter().enumerate() {
                let cell = cells.get(i).map(String::as_str).unwrap_or_default();
                let padded = format!(" {:<width$} ", cell, width = width);
                if header {
                    line.push_str(&padded.blue().bold().to_string());
                } else {
                    line.push_str(&padded);
                }
                line.push_str(&bar);
            }
            line
        };

        let mut out = String::new();
        out.push_str(&border);
        out.push('\n');
        out.push_str(&format_row(&self.headers, true));
        out.push('\n');
        out.push_str(&border);
        out.push('\n');
        for row in &self.rows {
            out.push_str(&format_row(row, false));
            out.push('\n');
        }
        out.push_str(&border);
        out
    }
}

// =============================================================================
// REPORTS
// =============================================================================

/// `Name (ID: n)`, or a marker for a cleared record.
#[must_use]
pub fn student_label(student: &StudentRecord) -> String {
    let name = student.full_name();
    if name.is_empty() {
        format!("(no details) (ID: {})", student.id)
    } else {
        format!("{} (ID: {})", name, student.id)
    }
}

/// One table per classroom, then the total head count.
#[must_use]
pub fn classrooms(roster: &Roster, today: NaiveDate) -> String {
    let mut out = String::new();
    for room in roster.classrooms() {
        if room.students.is_empty() {
            out.push_str(&format!("\n{}\n", format!("No students in {}.", room.band.label()).magenta()));
            continue;
        }
        let mut table = Table::new(["Student Name (Student ID)", "Age"]);
        for student in &room.students {
            let age = student
                .age_on(today)
                .map(|age| age.to_string())
                .unwrap_or_default();
            table.add_row([student_label(student), age]);
        }
        out.push_str(&format!("\n{}\n", format!("Students in {}:", room.band.label()).yellow()));
        out.push_str(&table.render());
        out.push('\n');
    }
    out.push_str(&format!(
        "\n{}",
        format!("Total number of students: {}", roster.total_enrolled()).yellow()
    ));
    out
}

/// Guardian contact details of every student that has them.
#[must_use]
pub fn guardians(roster: &Roster) -> String {
    let mut table = Table::new(["Student (ID)", "Parent/Guardian", "Contact Number", "Email"]);
    for student in roster.guardian_listing() {
        if let Some(guardian) = &student.guardian {
            table.add_row([
                student_label(student),
                guardian.full_name(),
                guardian.contact_number.clone().unwrap_or_default(),
                guardian.contact_email.clone().unwrap_or_default(),
            ]);
        }
    }
    if table.is_empty() {
        return "No parent/guardian details on file.".magenta().to_string();
    }
    format!("{}\n{}", "Parent/Guardian Details".yellow(), table.render())
}

/// The planned days of one week.
#[must_use]
pub fn week_menu(menu: &Menu, week: u32) -> String {
    let Some(days) = menu.week(week) else {
        return format!("No menu found for week {}.", week).magenta().to_string();
    };
    let mut table = Table::new(["Day", "Breakfast", "Lunch", "Afternoon Tea"]);
    for (day, meals) in days {
        table.add_row([
            day.name().to_string(),
            meals.breakfast.clone(),
            meals.lunch.clone(),
            meals.afternoon_tea.clone(),
        ]);
    }
    format!("{}\n{}", format!("Menu for Week {}", week).yellow(), table.render())
}

/// Students with allergies per classroom, then planned meals that mention
/// one of those allergies.
#[must_use]
pub fn allergies(roster: &Roster, menu: &Menu) -> String {
    let rooms = roster.allergy_listing();
    if rooms.is_empty() {
        return "No students with allergies.".magenta().to_string();
    }

    let mut out = String::new();
    for room in rooms {
        let mut table = Table::new(["Student Name (Student ID)", "Allergies"]);
        for student in &room.students {
            table.add_row([student_label(student), student.allergies.join(", ")]);
        }
        out.push_str(&format!("\n{}\n", format!("Students with allergies in {}:", room.band.label()).yellow()));
        out.push_str(&table.render());
        out.push('\n');
    }

    let conflicts = menu.allergen_conflicts(roster);
    if conflicts.is_empty() {
        out.push_str(&format!("\n{}", "No planned meals mention a student allergy.".green()));
        return out;
    }
    let mut table = Table::new(["Week", "Day", "Meal", "Dish", "Student (ID)", "Allergy"]);
    for conflict in &conflicts {
        table.add_row([
            conflict.week.to_string(),
            conflict.day.name().to_string(),
            conflict.slot.name().to_string(),
            conflict.meal.clone(),
            format!("{} (ID: {})", conflict.student_name, conflict.student),
            conflict.allergy.clone(),
        ]);
    }
    out.push_str(&format!("\n{}\n", "Planned meals containing student allergens:".red()));
    out.push_str(&table.render());
    out
}

// =============================================================================
// TESTS
// =============================================================================
