//! Kitchen menu flows.

use super::{Workspace, choose, report_abort, submenu_title};
use crate::input::{InputError, LineSource, parse_text, parse_week, parse_weekday, prompt_valid};
use crate::render;
use childcare_core::{DayMenu, Weekday, save_menu};
use colored::Colorize;

const KITCHEN_OPTIONS: [&str; 5] = [
    "Add/Update Menu for the Day",
    "Delete Menu for the Day",
    "List Menu for the Week",
    "List Students with Allergies",
    "Save changes and return to Main Menu",
];

pub(super) fn menu(ws: &mut Workspace, input: &mut dyn LineSource) {
    let title = submenu_title("Kitchen Management Menu");
    loop {
        let outcome = match choose(input, &title, &KITCHEN_OPTIONS) {
            1 => {
                println!("{}\n", "Adding/Updating Menu for the day".magenta().bold());
                set_day_menu(ws, input).map(|_| ())
            }
            2 => {
                println!("{}\n", "Deleting Menu for the day".magenta().bold());
                delete_day_menu(ws, input).map(|_| ())
            }
            3 => show_week(ws, input),
            4 => {
                println!("{}", render::allergies(&ws.roster, &ws.menu));
                Ok(())
            }
            _ => {
                save(ws);
                return;
            }
        };
        if let Err(e) = outcome {
            report_abort(&e);
        }
    }
}

/// Write the menu document, reporting the outcome.
pub fn save(ws: &Workspace) {
    match save_menu(&ws.files.menu, &ws.menu) {
        Ok(()) => {
            tracing::info!(
                path = %ws.files.menu.display(),
                days = ws.menu.day_count(),
                "Menu saved"
            );
            println!("\n{}", "Kitchen changes successfully saved".yellow());
        }
        Err(e) => {
            tracing::error!(path = %ws.files.menu.display(), error = %e, "Saving menu failed");
            println!("\n{}", format!("Could not save the kitchen menu: {}", e).red());
        }
    }
}

fn read_week_and_day(input: &mut dyn LineSource) -> Result<(u32, Weekday), InputError> {
    let week = prompt_valid(input, "Enter week number (1-52): ", parse_week)?;
    for day in Weekday::ALL {
        println!("{}. {}", day.number(), day);
    }
    let day = prompt_valid(input, "Enter day number (1-5): ", parse_weekday)?;
    Ok((week, day))
}

/// Prompt for a week, a day and its three meals, then store them.
///
/// Returns the meals that were replaced, if the day was already planned.
pub fn set_day_menu(
    ws: &mut Workspace,
    input: &mut dyn LineSource,
) -> Result<Option<DayMenu>, InputError> {
    let (week, day) = read_week_and_day(input)?;
    let meals = DayMenu::new(
        prompt_valid(input, "Enter breakfast: ", parse_text)?,
        prompt_valid(input, "Enter lunch: ", parse_text)?,
        prompt_valid(input, "Enter afternoon tea: ", parse_text)?,
    );

    match ws.menu.set_day(week, day, meals) {
        Ok(previous) => {
            let verb = if previous.is_some() { "updated" } else { "added" };
            tracing::info!(week, day = %day, "Menu {}", verb);
            println!(
                "\n{}",
                format!("Menu for {} of week {} {}.", day, week, verb).yellow()
            );
            Ok(previous)
        }
        Err(e) => {
            println!("{}", e.to_string().red());
            Ok(None)
        }
    }
}

/// Prompt for a week and a day and remove that day's meals.
///
/// `Ok(None)` when nothing was planned for that day.
pub fn delete_day_menu(
    ws: &mut Workspace,
    input: &mut dyn LineSource,
) -> Result<Option<DayMenu>, InputError> {
    let (week, day) = read_week_and_day(input)?;
    match ws.menu.remove_day(week, day) {
        Ok(removed) => {
            tracing::info!(week, day = %day, "Menu deleted");
            println!(
                "\n{}",
                format!("Menu for {} of week {} deleted.", day, week).yellow()
            );
            Ok(Some(removed))
        }
        Err(e) => {
            println!("{}", e.to_string().red());
            Ok(None)
        }
    }
}

fn show_week(ws: &Workspace, input: &mut dyn LineSource) -> Result<(), InputError> {
    let week = prompt_valid(input, "Enter week number (1-52): ", parse_week)?;
    println!("\n{}", render::week_menu(&ws.menu, week));
    Ok(())
}
