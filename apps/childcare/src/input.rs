//! # Input Validation
//!
//! Every prompt in the shell goes through a [`LineSource`] and one of the
//! `parse_*` functions below. A parse failure re-prompts; an interrupted read
//! (Ctrl-C / Ctrl-D, or an exhausted script) surfaces as
//! [`InputError::Interrupted`] and aborts the current flow.

use childcare_core::primitives::{MAX_MENU_WEEK, MAX_TEXT_LENGTH, MIN_MENU_WEEK};
use childcare_core::{StudentId, Weekday};
use chrono::NaiveDate;
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::collections::VecDeque;
use thiserror::Error;

/// Contact numbers are digits only, within this length range.
const PHONE_DIGITS_MIN: usize = 8;
const PHONE_DIGITS_MAX: usize = 15;

/// Birthday input format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The read was interrupted. Not a validation failure: abort the flow.
    #[error("Input interrupted")]
    Interrupted,

    #[error("Input cannot be empty.")]
    Empty,

    #[error("Input cannot be longer than {0} characters.")]
    TooLong(usize),

    #[error("Names may only contain letters, spaces, hyphens and apostrophes.")]
    InvalidName,

    #[error("Invalid date format. Please enter the date as YYYY-MM-DD.")]
    InvalidDate,

    #[error("Birthday cannot be in the future.")]
    FutureDate,

    #[error("Invalid input. Please enter a whole number.")]
    NotAnInteger,

    #[error("Please enter a number between {min} and {max}.")]
    OutOfRange { min: u32, max: u32 },

    #[error("Please answer 'yes' or 'no'.")]
    InvalidYesNo,

    #[error("Contact number must contain 8 to 15 digits.")]
    InvalidPhone,

    #[error("Please enter a valid email address (e.g. name@example.com).")]
    InvalidEmail,

    #[error("Terminal error: {0}")]
    Terminal(String),
}

// =============================================================================
// LINE SOURCES
// =============================================================================

/// Where the shell reads operator answers from.
pub trait LineSource {
    /// Show `prompt` and read one line (without the trailing newline).
    fn read_line(&mut self, prompt: &str) -> Result<String, InputError>;
}

/// Interactive terminal input with line editing and history.
pub struct TerminalInput {
    editor: DefaultEditor,
}

impl TerminalInput {
    pub fn new() -> Result<Self, InputError> {
        let editor = DefaultEditor::new().map_err(|e| InputError::Terminal(e.to_string()))?;
        Ok(Self { editor })
    }
}

impl LineSource for TerminalInput {
    fn read_line(&mut self, prompt: &str) -> Result<String, InputError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    // Best effort.
                    self.editor.add_history_entry(line.as_str()).ok();
                }
                Ok(line)
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Err(InputError::Interrupted),
            Err(e) => Err(InputError::Terminal(e.to_string())),
        }
    }
}

/// Pre-recorded answers. Reads past the end behave like Ctrl-D.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Every prompt shown so far, in order.
    #[must_use]
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Answers not consumed yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> Result<String, InputError> {
        self.prompts.push(prompt.to_string());
        self.lines.pop_front().ok_or(InputError::Interrupted)
    }
}

// =============================================================================
// PROMPT LOOP
// =============================================================================

/// Prompt until `parse` accepts the answer.
///
/// Validation errors are printed and the prompt repeats. Only an
/// interrupted or failed read leaves the loop with an error.
pub fn prompt_valid<T>(
    source: &mut dyn LineSource,
    prompt: &str,
    parse: impl Fn(&str) -> Result<T, InputError>,
) -> Result<T, InputError> {
    loop {
        let line = source.read_line(prompt)?;
        match parse(&line) {
            Ok(value) => return Ok(value),
            Err(e) => println!("{}", e.to_string().red()),
        }
    }
}

// =============================================================================
// PARSERS
// =============================================================================

/// Non-empty free text, trimmed.
pub fn parse_text(raw: &str) -> Result<String, InputError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(InputError::Empty);
    }
    if text.chars().count() > MAX_TEXT_LENGTH {
        return Err(InputError::TooLong(MAX_TEXT_LENGTH));
    }
    Ok(text.to_string())
}

/// A person's first or last name.
pub fn parse_name(raw: &str) -> Result<String, InputError> {
    let name = parse_text(raw)?;
    let valid = name
        .chars()
        .all(|c| c.is_alphabetic() || c == ' ' || c == '-' || c == '\'');
    if valid { Ok(name) } else { Err(InputError::InvalidName) }
}

/// A `YYYY-MM-DD` birthday no later than `today`.
pub fn parse_birth_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, InputError> {
    let date = NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| InputError::InvalidDate)?;
    if date > today {
        return Err(InputError::FutureDate);
    }
    Ok(date)
}

pub fn parse_yes_no(raw: &str) -> Result<bool, InputError> {
    match raw.trim().to_lowercase().as_str() {
        "yes" | "y" => Ok(true),
        "no" | "n" => Ok(false),
        _ => Err(InputError::InvalidYesNo),
    }
}

/// Digits only once spaces are removed.
pub fn parse_phone(raw: &str) -> Result<String, InputError> {
    let digits: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let valid = (PHONE_DIGITS_MIN..=PHONE_DIGITS_MAX).contains(&digits.len())
        && digits.chars().all(|c| c.is_ascii_digit());
    if valid { Ok(digits) } else { Err(InputError::InvalidPhone) }
}

/// `local@domain.tld`: one `@`, a dot in the domain, no empty parts.
pub fn parse_email(raw: &str) -> Result<String, InputError> {
    let email = parse_text(raw).map_err(|_| InputError::InvalidEmail)?;
    if email.chars().any(char::is_whitespace) {
        return Err(InputError::InvalidEmail);
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(InputError::InvalidEmail);
    };
    let domain_ok = !domain.contains('@')
        && domain.split('.').count() >= 2
        && domain.split('.').all(|part| !part.is_empty());
    if local.is_empty() || !domain_ok {
        return Err(InputError::InvalidEmail);
    }
    Ok(email)
}

pub fn parse_student_id(raw: &str) -> Result<StudentId, InputError> {
    raw.trim()
        .parse::<u64>()
        .map(StudentId)
        .map_err(|_| InputError::NotAnInteger)
}

/// An integer within `min..=max`.
pub fn parse_in_range(raw: &str, min: u32, max: u32) -> Result<u32, InputError> {
    let value = raw
        .trim()
        .parse::<u32>()
        .map_err(|_| InputError::NotAnInteger)?;
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(InputError::OutOfRange { min, max })
    }
}

pub fn parse_week(raw: &str) -> Result<u32, InputError> {
    parse_in_range(raw, MIN_MENU_WEEK, MAX_MENU_WEEK)
}

/// Day number 1 (Monday) to 5 (Friday).
pub fn parse_weekday(raw: &str) -> Result<Weekday, InputError> {
    let max = Weekday::ALL.len() as u32;
    let number = parse_in_range(raw, 1, max)?;
    Weekday::from_number(number).ok_or(InputError::OutOfRange { min: 1, max })
}

// =============================================================================
// TESTS
// =============================================================================
