//! Application-level error type.

use crate::config::ConfigError;
use crate::input::InputError;
use childcare_core::ChildcareError;
use thiserror::Error;

/// Anything that ends a command with a non-zero exit code.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Core(#[from] ChildcareError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Cannot render output: {0}")]
    Output(String),
}
