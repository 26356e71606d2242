//! # Childcare
//!
//! Operator-facing application around `childcare-core`: the interactive
//! shell, one-shot report commands, configuration and terminal rendering.
//!
//! Exposed as a library so integration tests can drive the shell flows with
//! a scripted line source.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod render;
pub mod shell;

pub use error::AppError;
