//! Student document: a JSON array of enrolled students.
//!
//! ```json
//! [
//!     {
//!         "student_id": 1,
//!         "fname": "John",
//!         "lname": "Doe",
//!         "birthday": "2024-03-25",
//!         "allergies": ["Peanuts"],
//!         "guardian": {
//!             "fname": "Jane",
//!             "lname": "Doe",
//!             "contact_number": "0412345678",
//!             "contact_email": "jane.doe@example.com"
//!         }
//!     }
//! ]
//! ```
//!
//! Band placement is not stored; it is recomputed on load.

use super::to_pretty_json;
use crate::{ChildcareError, GuardianInfo, Roster, StudentId, StudentRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stored guardian. Missing fields read back as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GuardianDocument {
    #[serde(default)]
    pub fname: Option<String>,
    #[serde(default)]
    pub lname: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
}

/// Stored student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDocument {
    pub student_id: u64,
    pub fname: String,
    pub lname: String,
    pub birthday: NaiveDate,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guardian: Option<GuardianDocument>,
}

impl From<&GuardianInfo> for GuardianDocument {
    fn from(guardian: &GuardianInfo) -> Self {
        Self {
            fname: guardian.first_name.clone(),
            lname: guardian.last_name.clone(),
            contact_number: guardian.contact_number.clone(),
            contact_email: guardian.contact_email.clone(),
        }
    }
}

impl From<GuardianDocument> for GuardianInfo {
    fn from(doc: GuardianDocument) -> Self {
        Self {
            first_name: doc.fname,
            last_name: doc.lname,
            contact_number: doc.contact_number,
            contact_email: doc.contact_email,
        }
    }
}

impl StudentDocument {
    /// Project a record, or `None` if it must not be persisted.
    ///
    /// Only records placed in a band with both names present survive;
    /// cleared placeholders are pruned here.
    #[must_use]
    pub fn from_record(record: &StudentRecord) -> Option<Self> {
        record.assigned_band()?;
        let fname = non_empty(record.first_name.as_deref())?;
        let lname = non_empty(record.last_name.as_deref())?;
        let birthday = record.birth_date?;

        Some(Self {
            student_id: record.id.value(),
            fname: fname.to_string(),
            lname: lname.to_string(),
            birthday,
            allergies: record.allergies.clone(),
            guardian: record.guardian.as_ref().map(GuardianDocument::from),
        })
    }

    /// Every persistable record of the roster, in roster order.
    #[must_use]
    pub fn from_roster(roster: &Roster) -> Vec<Self> {
        roster.records().iter().filter_map(Self::from_record).collect()
    }

    /// Rebuild an unassigned record carrying the stored id.
    #[must_use]
    pub fn into_record(self) -> StudentRecord {
        let details = crate::StudentDetails {
            first_name: self.fname,
            last_name: self.lname,
            birth_date: self.birthday,
            allergies: self.allergies,
            guardian: self.guardian.map(GuardianInfo::from),
        };
        StudentRecord::with_id(StudentId(self.student_id), details)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Serialize student documents (4-space indented JSON array).
pub fn students_to_json(documents: &[StudentDocument]) -> Result<Vec<u8>, ChildcareError> {
    to_pretty_json(&documents)
}

/// Parse a student document. Any structural problem fails the whole parse.
pub fn students_from_json(bytes: &[u8]) -> Result<Vec<StudentDocument>, ChildcareError> {
    serde_json::from_slice(bytes).map_err(|e| {
        ChildcareError::SerializationError(format!("Failed to parse student document: {}", e))
    })
}
