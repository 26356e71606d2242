//! # Core Type Definitions
//!
//! This module contains the record types shared by every other module:
//! - Identifiers (`StudentId`)
//! - Age arithmetic (`Age`)
//! - Student and guardian records (`StudentRecord`, `StudentDetails`, `GuardianInfo`)
//! - Error types (`ChildcareError`)
//!
//! ## Arithmetic Guarantees
//!
//! Ages are whole months held in an `i32`. There is no floating-point anywhere:
//! "2 years and 7 months" is 31 months, never 2.58 years.

use crate::menu::Weekday;
use crate::primitives::MONTHS_PER_YEAR;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Unique identifier of a student record.
///
/// Minted once when a student is enrolled and never handed out again by the
/// same roster, even after the record is deleted or cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StudentId(pub u64);

impl StudentId {
    /// Get the raw id value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// AGE
// =============================================================================

/// Age as whole elapsed months.
///
/// Negative when the birth date lies after the reference day. No band has a
/// negative lower bound, so such ages are never placeable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Age(i32);

impl Age {
    /// Create an age from a total month count.
    #[must_use]
    pub const fn from_months(months: i32) -> Self {
        Self(months)
    }

    /// Create an age from whole years.
    #[must_use]
    pub const fn from_years(years: i32) -> Self {
        Self(years.saturating_mul(MONTHS_PER_YEAR))
    }

    /// Create an age from a years + months pair.
    #[must_use]
    pub const fn from_years_and_months(years: i32, months: i32) -> Self {
        Self(years.saturating_mul(MONTHS_PER_YEAR).saturating_add(months))
    }

    /// Whole months elapsed between `birth` and `today`.
    ///
    /// A month only counts once its day-of-month has been reached, so a child
    /// born on the 20th turns one month old on the 20th of the next month.
    #[must_use]
    pub fn between(birth: NaiveDate, today: NaiveDate) -> Self {
        if birth > today {
            return Self(Self::between(today, birth).0.saturating_neg());
        }

        let years = today.year() - birth.year();
        let months = today.month() as i32 - birth.month() as i32;
        let mut total = years.saturating_mul(MONTHS_PER_YEAR).saturating_add(months);
        if today.day() < birth.day() {
            total -= 1;
        }
        Self(total)
    }

    /// Total number of months.
    #[must_use]
    pub const fn total_months(self) -> i32 {
        self.0
    }

    /// Whole years component (sign dropped).
    #[must_use]
    pub const fn years(self) -> i32 {
        self.0.abs() / MONTHS_PER_YEAR
    }

    /// Remaining months after the whole years (sign dropped).
    #[must_use]
    pub const fn months(self) -> i32 {
        self.0.abs() % MONTHS_PER_YEAR
    }

    /// True when the birth date lies in the future.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{}{} years, {} months", sign, self.years(), self.months())
    }
}

// =============================================================================
// GUARDIAN
// =============================================================================

/// Contact details of a student's parent or guardian.
///
/// Every field is optional: documents written by older versions may omit any
/// of them. A guardian belongs to exactly one student.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GuardianInfo {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub contact_number: Option<String>,
    pub contact_email: Option<String>,
}

impl GuardianInfo {
    /// Create a guardian with every field present.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        contact_number: impl Into<String>,
        contact_email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            contact_number: Some(contact_number.into()),
            contact_email: Some(contact_email.into()),
        }
    }

    /// "First Last", skipping missing parts.
    #[must_use]
    pub fn full_name(&self) -> String {
        join_names(self.first_name.as_deref(), self.last_name.as_deref())
    }
}

// =============================================================================
// STUDENT
// =============================================================================

/// Personal details captured when a new student is enrolled.
///
/// This is a record without an id; the roster mints the id on enrollment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDetails {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub allergies: Vec<String>,
    pub guardian: Option<GuardianInfo>,
}

impl StudentDetails {
    /// Create details with no allergies and no guardian.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birth_date: NaiveDate,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            birth_date,
            allergies: Vec::new(),
            guardian: None,
        }
    }

    #[must_use]
    pub fn with_allergies<I, S>(mut self, allergies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allergies = allergies.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_guardian(mut self, guardian: GuardianInfo) -> Self {
        self.guardian = Some(guardian);
        self
    }
}

/// A student held by the roster.
///
/// Personal fields are optional because an unplaceable student is cleared
/// in place: the record keeps its id and its roster slot but carries no
/// identity afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    pub id: StudentId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub allergies: Vec<String>,
    pub guardian: Option<GuardianInfo>,
    /// Label of the band this record is a member of. Only the roster sets it.
    pub(crate) assigned_band: Option<String>,
}

impl StudentRecord {
    /// Build an unassigned record carrying an existing id.
    #[must_use]
    pub fn with_id(id: StudentId, details: StudentDetails) -> Self {
        Self {
            id,
            first_name: Some(details.first_name),
            last_name: Some(details.last_name),
            birth_date: Some(details.birth_date),
            allergies: details.allergies,
            guardian: details.guardian,
            assigned_band: None,
        }
    }

    /// Label of the band this student is assigned to, if any.
    #[must_use]
    pub fn assigned_band(&self) -> Option<&str> {
        self.assigned_band.as_deref()
    }

    /// Age on the given day, if the birth date is still known.
    #[must_use]
    pub fn age_on(&self, today: NaiveDate) -> Option<Age> {
        self.birth_date.map(|birth| Age::between(birth, today))
    }

    /// "First Last", skipping missing parts. Empty for a cleared record.
    #[must_use]
    pub fn full_name(&self) -> String {
        join_names(self.first_name.as_deref(), self.last_name.as_deref())
    }

    /// True once the record was cleared by a failed assignment.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.birth_date.is_none()
    }

    pub(crate) fn clear_personal_details(&mut self) {
        self.first_name = None;
        self.last_name = None;
        self.birth_date = None;
        self.allergies.clear();
        self.guardian = None;
        self.assigned_band = None;
    }
}

fn join_names(first: Option<&str>, last: Option<&str>) -> String {
    match (first, last) {
        (Some(f), Some(l)) => format!("{} {}", f, l),
        (Some(f), None) => f.to_string(),
        (None, Some(l)) => l.to_string(),
        (None, None) => String::new(),
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the childcare core.
///
/// An unplaceable student is NOT an error: it is the `Unplaceable` branch of
/// `AssignmentResult`.
#[derive(Debug, Error)]
pub enum ChildcareError {
    /// No student with this id is on the roster.
    #[error("Student with ID {0} not found")]
    StudentNotFound(StudentId),

    /// A record with this id is already on the roster.
    #[error("Duplicate student ID: {0}")]
    DuplicateStudentId(StudentId),

    /// No id is left to mint after this one.
    #[error("Student ID space exhausted at {0}")]
    IdSpaceExhausted(StudentId),

    /// No menu is planned for this day.
    #[error("No menu found for {day} in week {week}")]
    MenuDayNotFound { week: u32, day: Weekday },

    /// Week number outside the accepted range.
    #[error("Invalid week number: {0}")]
    InvalidWeek(u32),

    /// A band definition is unusable.
    #[error("Invalid age band: {0}")]
    InvalidBand(String),

    /// Two bands claim the same ages.
    #[error("Age bands overlap: '{first}' and '{second}'")]
    OverlappingBands { first: String, second: String },

    /// Two bands share a label.
    #[error("Duplicate age band label: {0}")]
    DuplicateBandLabel(String),

    /// The band membership index disagrees with the records.
    #[error("Roster index inconsistent: {0}")]
    InconsistentIndex(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================
