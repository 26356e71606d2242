//! # Storage
//!
//! File-backed persistence for the roster and the menu.
//!
//! ## Load semantics
//!
//! Loading never fails. The caller gets a [`LoadOutcome`] describing what
//! happened and decides how to report it:
//! - `Missing`: first run, start empty
//! - `Malformed`: unreadable or unparsable, start empty (the data is lost
//!   unless the operator restores the file before the next save)
//! - `Loaded`: counts of restored, cleared and skipped entries
//!
//! Student documents are parsed in full before any record is restored, so a
//! malformed document never leaves a half-populated roster behind.
//!
//! ## Save semantics
//!
//! Documents are written to a sibling temp file and renamed over the target.
//! Last full save wins.

use crate::formats::{
    StudentDocument, menu_from_json, menu_to_json, students_from_json, students_to_json,
};
use crate::primitives::{DEFAULT_DATA_DIR, MENU_FILE_NAME, STUDENTS_FILE_NAME};
use crate::{AssignmentResult, ChildcareError, Menu, Roster};
use chrono::NaiveDate;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

// =============================================================================
// LOAD OUTCOME
// =============================================================================

/// Counts reported after a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadSummary {
    /// Entries placed back into the in-memory state.
    pub restored: usize,
    /// Restored students no current band accepts (now cleared placeholders).
    pub unplaceable: usize,
    /// Entries dropped because their id was already taken or unusable.
    pub skipped: usize,
}

/// What happened when a document was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(LoadSummary),
    Missing,
    Malformed(String),
}

// =============================================================================
// DATA FILES
// =============================================================================

/// Locations of the two documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFiles {
    pub students: PathBuf,
    pub menu: PathBuf,
}

impl DataFiles {
    #[must_use]
    pub fn new(students: impl Into<PathBuf>, menu: impl Into<PathBuf>) -> Self {
        Self {
            students: students.into(),
            menu: menu.into(),
        }
    }

    /// Default file names inside `dir`.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(STUDENTS_FILE_NAME), dir.join(MENU_FILE_NAME))
    }
}

impl Default for DataFiles {
    fn default() -> Self {
        Self::in_dir(DEFAULT_DATA_DIR)
    }
}

// =============================================================================
// STUDENTS
// =============================================================================

/// Read the student document into `roster`, placing every student silently.
///
/// Stored ids are kept exactly. Placement is recomputed against the roster's
/// current bands, so a student who has aged out is cleared here.
pub fn load_students(path: &Path, roster: &mut Roster, today: NaiveDate) -> LoadOutcome {
    let bytes = match read_document(path) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return LoadOutcome::Missing,
        Err(e) => return LoadOutcome::Malformed(e.to_string()),
    };
    let documents = match students_from_json(&bytes) {
        Ok(documents) => documents,
        Err(e) => return LoadOutcome::Malformed(e.to_string()),
    };

    let mut summary = LoadSummary::default();
    for document in documents {
        match roster.restore(document.into_record(), today) {
            Ok(AssignmentResult::Assigned { .. }) => summary.restored += 1,
            Ok(AssignmentResult::Unplaceable { .. }) => {
                summary.restored += 1;
                summary.unplaceable += 1;
            }
            Err(_) => summary.skipped += 1,
        }
    }
    LoadOutcome::Loaded(summary)
}

/// Write every persistable student. Returns how many were written.
pub fn save_students(path: &Path, roster: &Roster) -> Result<usize, ChildcareError> {
    let documents = StudentDocument::from_roster(roster);
    let bytes = students_to_json(&documents)?;
    write_document(path, &bytes)?;
    Ok(documents.len())
}

// =============================================================================
// MENU
// =============================================================================

/// Read the menu document. Missing or malformed yields an empty menu.
pub fn load_menu(path: &Path) -> (Menu, LoadOutcome) {
    let bytes = match read_document(path) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return (Menu::new(), LoadOutcome::Missing),
        Err(e) => return (Menu::new(), LoadOutcome::Malformed(e.to_string())),
    };
    match menu_from_json(&bytes) {
        Ok(menu) => {
            let summary = LoadSummary {
                restored: menu.day_count(),
                ..LoadSummary::default()
            };
            (menu, LoadOutcome::Loaded(summary))
        }
        Err(e) => (Menu::new(), LoadOutcome::Malformed(e.to_string())),
    }
}

/// Write the whole menu.
pub fn save_menu(path: &Path, menu: &Menu) -> Result<(), ChildcareError> {
    let bytes = menu_to_json(menu)?;
    write_document(path, &bytes)
}

// =============================================================================
// FILE HELPERS
// =============================================================================

/// `Ok(None)` when the file does not exist.
fn read_document(path: &Path) -> Result<Option<Vec<u8>>, ChildcareError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ChildcareError::IoError(format!(
            "Read {}: {}",
            path.display(),
            e
        ))),
    }
}

fn write_document(path: &Path, bytes: &[u8]) -> Result<(), ChildcareError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            ChildcareError::IoError(format!("Create {}: {}", parent.display(), e))
        })?;
    }

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    std::fs::write(&temp_path, bytes).map_err(|e| {
        ChildcareError::IoError(format!("Write {}: {}", temp_path.display(), e))
    })?;
    std::fs::rename(&temp_path, path).map_err(|e| {
        // The target is untouched; drop the partial copy.
        std::fs::remove_file(&temp_path).ok();
        ChildcareError::IoError(format!("Replace {}: {}", path.display(), e))
    })
}

// =============================================================================
// TESTS
// =============================================================================
