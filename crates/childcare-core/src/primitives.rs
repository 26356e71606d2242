//! # Primitives
//!
//! Compiled-in constants for the childcare core.
//!
//! These values are fixed at build time. Anything an operator may want to
//! change (data directory, band list) is configured in the app layer instead.

/// Months in a year. Ages and band bounds are stored in months.
pub const MONTHS_PER_YEAR: i32 = 12;

/// First id handed out by an empty roster.
pub const FIRST_STUDENT_ID: u64 = 1;

/// Reference classroom configuration: `(label, min_years, max_years)`.
///
/// Bands are half-open: a child belongs to a room while
/// `min_years <= age < max_years`.
pub const REFERENCE_BANDS: [(&str, i32, i32); 3] = [
    ("Babies Room (0-2 years)", 0, 2),
    ("Toddlers Room (2-3 years)", 2, 3),
    ("Kindergarten Room (3-5 years)", 3, 5),
];

// =============================================================================
// FILE LAYOUT
// =============================================================================

/// Directory holding both documents, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "data";

/// File name of the student document.
pub const STUDENTS_FILE_NAME: &str = "students.json";

/// File name of the kitchen menu document.
pub const MENU_FILE_NAME: &str = "kitchen.json";

/// Indentation used when writing documents.
pub const JSON_INDENT: &[u8] = b"    ";

// =============================================================================
// INPUT LIMITS
// =============================================================================

/// Lowest plannable menu week.
pub const MIN_MENU_WEEK: u32 = 1;

/// Highest plannable menu week.
pub const MAX_MENU_WEEK: u32 = 52;

/// Maximum length of a free-text field (names, allergies, meals).
pub const MAX_TEXT_LENGTH: usize = 256;
