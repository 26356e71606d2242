//! # Childcare CLI Module
//!
//! ## Available Commands
//!
//! - (none) / `shell` - Run the interactive shell
//! - `list` - Students per classroom and the total
//! - `guardians` - Parent/guardian contact details
//! - `menu` - Kitchen menu of one week
//! - `allergies` - Students with allergies and conflicting meals

mod commands;

use crate::AppError;
use crate::config::Settings;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Childcare manager
///
/// Keeps the centre's roster in age-banded classrooms, guardian and allergy
/// details, and the kitchen's weekly menu.
#[derive(Parser, Debug)]
#[command(name = "childcare")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Directory holding the student and menu documents
    #[arg(short = 'd', long, global = true, default_value = "data")]
    pub data_dir: PathBuf,

    /// TOML file with document names and age bands
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Reference day for ages (YYYY-MM-DD), defaults to the local date
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    /// Output in JSON format (one-shot reports only)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the interactive shell (default)
    Shell,

    /// List students per classroom
    List,

    /// Show parent/guardian details
    Guardians,

    /// Show the kitchen menu for a week
    Menu {
        /// Week number (1-52)
        #[arg(short, long)]
        week: u32,
    },

    /// List students with allergies and meals that mention them
    Allergies,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), AppError> {
    let settings = Settings::load(&cli.data_dir, cli.config.as_deref())?;
    let today = cli
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let json_mode = cli.json_mode;

    match cli.command {
        None | Some(Commands::Shell) => cmd_shell(&settings, today),
        Some(Commands::List) => cmd_list(&settings, today, json_mode),
        Some(Commands::Guardians) => cmd_guardians(&settings, today, json_mode),
        Some(Commands::Menu { week }) => cmd_menu(&settings, today, json_mode, week),
        Some(Commands::Allergies) => cmd_allergies(&settings, today, json_mode),
    }
}

// =============================================================================
// TESTS
// =============================================================================
