//! # Document Formats
//!
//! JSON shapes of the two persisted documents and the pure conversions
//! between them and the in-memory types.
//!
//! File I/O lives in [`crate::storage`]; everything here works on bytes.

mod menu;
mod students;

pub use menu::{menu_from_json, menu_to_json};
pub use students::{GuardianDocument, StudentDocument, students_from_json, students_to_json};

use crate::ChildcareError;
use crate::primitives::JSON_INDENT;
use serde::Serialize;

/// Pretty-print a value with the document indentation.
pub(crate) fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>, ChildcareError> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| ChildcareError::SerializationError(e.to_string()))?;
    out.push(b'\n');
    Ok(out)
}
