//! # Childcare - Roster & Kitchen Manager
//!
//! The operator-facing binary for a small childcare centre.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    apps/childcare (THE BINARY)                  │
//! │                                                                 │
//! │  ┌─────────────┐    ┌──────────────┐    ┌──────────────────┐   │
//! │  │   CLI       │    │    Shell     │    │     Config       │   │
//! │  │  (clap)     │    │ (rustyline)  │    │     (toml)       │   │
//! │  └──────┬──────┘    └──────┬───────┘    └────────┬─────────┘   │
//! │         │                  │                     │             │
//! │         └──────────────────┼─────────────────────┘             │
//! │                            ▼                                   │
//! │                   ┌────────────────┐                           │
//! │                   │ childcare-core │                           │
//! │                   │  (THE LOGIC)   │                           │
//! │                   └────────────────┘                           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Interactive shell
//! childcare --data-dir data
//!
//! # One-shot reports
//! childcare list
//! childcare menu --week 3 --json-mode
//! ```

use childcare::cli;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    // Logs go to stderr so they never interleave with prompts and reports.
    // CHILDCARE_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("CHILDCARE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let default_filter = if cli.verbose {
        "childcare=debug"
    } else {
        "childcare=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
   ___ _    _ _    _
  / __| |_ (_) |__| |__ __ _ _ _ ___
 | (__| ' \| | / _` / _/ _` | '_/ -_)
  \___|_||_|_|_\__,_\__\__,_|_| \___|

  Childcare Manager v{}

  Classrooms • Guardians • Kitchen
"#,
        env!("CARGO_PKG_VERSION")
    );
}
