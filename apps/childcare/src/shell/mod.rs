//! # Interactive Shell
//!
//! Numbered menus driving the roster and the kitchen menu.
//!
//! ```text
//! Main ──┬── 1 Students ── Add / Delete / List / Guardians / Save & return
//!        ├── 2 Kitchen ─── Add-Update day / Delete day / List week /
//!        │                 Allergies / Save & return
//!        └── 3 Exit
//! ```
//!
//! An invalid choice re-prompts. An interrupted read at a menu acts as that
//! menu's last option, so Ctrl-C in a submenu saves and returns, and Ctrl-C
//! at the main menu exits.

pub mod kitchen;
pub mod students;

use crate::input::LineSource;
use childcare_core::{DataFiles, Menu, Roster};
use chrono::NaiveDate;
use colored::Colorize;

/// Everything the shell works on.
#[derive(Debug)]
pub struct Workspace {
    pub files: DataFiles,
    pub roster: Roster,
    pub menu: Menu,
    /// Reference day for every age computation.
    pub today: NaiveDate,
}

const MAIN_OPTIONS: [&str; 3] = ["Students", "Kitchen", "Exit"];

/// Run the main menu until the operator exits.
pub fn run(ws: &mut Workspace, input: &mut dyn LineSource) {
    loop {
        let title = format!(
            "{}\nWhat would you like to manage?",
            "Welcome to the Childcare Management Application"
                .green()
                .bold()
                .underline()
        );
        match choose(input, &title, &MAIN_OPTIONS) {
            1 => students::menu(ws, input),
            2 => kitchen::menu(ws, input),
            _ => {
                println!(
                    "\n{}",
                    "Thanks for using the Childcare Management Application."
                        .green()
                        .bold()
                );
                println!("{}\n", "See you again soon!".green().bold());
                tracing::debug!("Shell closed");
                return;
            }
        }
    }
}

/// Show a numbered menu and return the 1-based choice.
///
/// Never fails: an interrupted or broken read returns the last option.
pub(crate) fn choose(input: &mut dyn LineSource, title: &str, options: &[&str]) -> usize {
    let last = options.len();
    loop {
        println!("\n{}", title);
        for (i, option) in options.iter().enumerate() {
            println!("{}. {}", i + 1, option);
        }
        println!();

        let line = match input.read_line("Please enter your choice: ") {
            Ok(line) => line,
            Err(e) => {
                tracing::debug!(error = %e, "Menu read aborted");
                println!("\nInput interrupted. Returning to the previous menu.");
                return last;
            }
        };
        match line.trim().parse::<usize>() {
            Ok(choice) if (1..=last).contains(&choice) => return choice,
            _ => println!(
                "{}",
                format!("Invalid choice. Please enter a number between 1 and {}.", last).red()
            ),
        }
    }
}

/// Submenu header in the shell's style.
pub(crate) fn submenu_title(name: &str) -> String {
    format!(
        "{}\nWhat would you like to do?",
        name.white().bold().on_blue()
    )
}

/// Print the notice for a flow abandoned at a prompt.
pub(crate) fn report_abort(error: &crate::input::InputError) {
    tracing::debug!(error = %error, "Flow aborted");
    println!(
        "\n{}",
        "Input interrupted. Returning to the previous menu.".red()
    );
}
