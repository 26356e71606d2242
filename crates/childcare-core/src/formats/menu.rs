//! Menu document: `{"<week>": {"<Day>": {"Breakfast", "Lunch", "Afternoon Tea"}}}`.

use super::to_pretty_json;
use crate::{ChildcareError, Menu};

/// Serialize the menu (4-space indented JSON object).
pub fn menu_to_json(menu: &Menu) -> Result<Vec<u8>, ChildcareError> {
    to_pretty_json(menu)
}

/// Parse a menu document.
///
/// Week keys must be integers and day keys Monday–Friday; a missing meal
/// reads back as an empty string.
pub fn menu_from_json(bytes: &[u8]) -> Result<Menu, ChildcareError> {
    serde_json::from_slice(bytes).map_err(|e| {
        ChildcareError::SerializationError(format!("Failed to parse menu document: {}", e))
    })
}
