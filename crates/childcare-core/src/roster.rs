//! # Roster
//!
//! The in-memory student list plus the per-band membership index.
//!
//! ## Invariants
//!
//! - Records keep insertion order; ids are unique
//! - A record is in exactly one band's member list iff `assigned_band` is set,
//!   and that list belongs to the band with the same label
//! - Ids are minted from a counter that only grows, so an id is never handed
//!   out twice by the same roster. The counter never wraps or saturates:
//!   `restore` rejects `u64::MAX` and `enroll` fails once the counter is
//!   exhausted
//!
//! ## Assignment
//!
//! `enroll` (interactive: mints an id) and `restore` (silent: keeps the
//! incoming id) both end in the same assignment step. When no band contains
//! the student's age, the record is cleared in place: names, birth date,
//! allergies and guardian are dropped, the id and roster slot stay.

use crate::bands::{AgeBand, BandRegistry};
use crate::primitives::FIRST_STUDENT_ID;
use crate::{Age, ChildcareError, StudentDetails, StudentId, StudentRecord};
use chrono::NaiveDate;

// =============================================================================
// ASSIGNMENT RESULT
// =============================================================================

/// Outcome of placing a student into a band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentResult {
    /// The student joined `band`.
    Assigned { band: String, age: Age },
    /// No band contains the student's age; the record has been cleared.
    /// `age` is `None` when the birth date was already unknown.
    Unplaceable { age: Option<Age> },
}

impl AssignmentResult {
    #[must_use]
    pub fn is_assigned(&self) -> bool {
        matches!(self, Self::Assigned { .. })
    }

    /// Band label on success.
    #[must_use]
    pub fn band(&self) -> Option<&str> {
        match self {
            Self::Assigned { band, .. } => Some(band),
            Self::Unplaceable { .. } => None,
        }
    }
}

/// One band with its current members, in assignment order.
#[derive(Debug, Clone)]
pub struct Classroom<'a> {
    pub band: &'a AgeBand,
    pub students: Vec<&'a StudentRecord>,
}

// =============================================================================
// ROSTER
// =============================================================================

/// All students of the centre and their classroom placement.
#[derive(Debug, Clone)]
pub struct Roster {
    registry: BandRegistry,
    records: Vec<StudentRecord>,
    /// Member ids per band, parallel to `registry.bands()`.
    members: Vec<Vec<StudentId>>,
    next_id: u64,
}

impl Roster {
    /// Create an empty roster classifying into `registry`.
    #[must_use]
    pub fn new(registry: BandRegistry) -> Self {
        let members = vec![Vec::new(); registry.len()];
        Self {
            registry,
            records: Vec::new(),
            members,
            next_id: FIRST_STUDENT_ID,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &BandRegistry {
        &self.registry
    }

    /// The id the next enrollment will receive.
    #[must_use]
    pub fn next_id(&self) -> StudentId {
        StudentId(self.next_id)
    }

    // -------------------------------------------------------------------------
    // MUTATION
    // -------------------------------------------------------------------------

    /// Add a new student with a freshly minted id and place them.
    ///
    /// The record stays on the roster even when unplaceable (as a cleared
    /// placeholder).
    pub fn enroll(
        &mut self,
        details: StudentDetails,
        today: NaiveDate,
    ) -> Result<(StudentId, AssignmentResult), ChildcareError> {
        let id = StudentId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(ChildcareError::IdSpaceExhausted(id))?;

        self.records.push(StudentRecord::with_id(id, details));
        let result = self.assign_at(self.records.len() - 1, today);
        Ok((id, result))
    }

    /// Re-hydrate a stored record, keeping its id exactly.
    ///
    /// Any band carried on the incoming record is ignored: placement is
    /// recomputed from the birth date against the current registry.
    pub fn restore(
        &mut self,
        mut record: StudentRecord,
        today: NaiveDate,
    ) -> Result<AssignmentResult, ChildcareError> {
        if self.position_of(record.id).is_some() {
            return Err(ChildcareError::DuplicateStudentId(record.id));
        }
        let following = record
            .id
            .0
            .checked_add(1)
            .ok_or(ChildcareError::IdSpaceExhausted(record.id))?;

        record.assigned_band = None;
        self.next_id = self.next_id.max(following);
        self.records.push(record);
        Ok(self.assign_at(self.records.len() - 1, today))
    }

    /// Remove a student from their band and from the roster.
    ///
    /// Cleared placeholders (never in a band) are removed as well.
    pub fn delete(&mut self, id: StudentId) -> Result<StudentRecord, ChildcareError> {
        let index = self
            .position_of(id)
            .ok_or(ChildcareError::StudentNotFound(id))?;

        self.leave_band(id);
        Ok(self.records.remove(index))
    }

    fn assign_at(&mut self, index: usize, today: NaiveDate) -> AssignmentResult {
        let id = self.records[index].id;
        self.leave_band(id);

        let record = &mut self.records[index];
        let Some(age) = record.age_on(today) else {
            record.clear_personal_details();
            return AssignmentResult::Unplaceable { age: None };
        };

        match self.registry.classify_index(age) {
            Some(band_index) => {
                let label = self.registry.bands()[band_index].label().to_string();
                record.assigned_band = Some(label.clone());
                self.members[band_index].push(id);
                AssignmentResult::Assigned { band: label, age }
            }
            None => {
                record.clear_personal_details();
                AssignmentResult::Unplaceable { age: Some(age) }
            }
        }
    }

    fn leave_band(&mut self, id: StudentId) {
        for ids in &mut self.members {
            if let Some(pos) = ids.iter().position(|member| *member == id) {
                ids.remove(pos);
                return;
            }
        }
    }

    fn position_of(&self, id: StudentId) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }

    // -------------------------------------------------------------------------
    // QUERIES
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn get(&self, id: StudentId) -> Option<&StudentRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Every record, placeholders included, in insertion order.
    #[must_use]
    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every band with its members, in registry order. Empty bands included.
    #[must_use]
    pub fn classrooms(&self) -> Vec<Classroom<'_>> {
        self.registry
            .bands()
            .iter()
            .zip(&self.members)
            .map(|(band, ids)| Classroom {
                band,
                students: ids.iter().filter_map(|id| self.get(*id)).collect(),
            })
            .collect()
    }

    /// Members of the band with this label.
    #[must_use]
    pub fn band_members(&self, label: &str) -> Vec<&StudentRecord> {
        self.registry
            .position(label)
            .map(|index| {
                self.members[index]
                    .iter()
                    .filter_map(|id| self.get(*id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of students placed in a band. Placeholders are not counted.
    #[must_use]
    pub fn total_enrolled(&self) -> usize {
        self.members.iter().map(Vec::len).sum()
    }

    /// Students with guardian details on file, in roster order.
    pub fn guardian_listing(&self) -> impl Iterator<Item = &StudentRecord> {
        self.records.iter().filter(|record| record.guardian.is_some())
    }

    /// Enrolled students with at least one allergy, grouped by band.
    /// Bands without such students are omitted.
    #[must_use]
    pub fn allergy_listing(&self) -> Vec<Classroom<'_>> {
        self.classrooms()
            .into_iter()
            .map(|mut room| {
                room.students.retain(|student| !student.allergies.is_empty());
                room
            })
            .filter(|room| !room.students.is_empty())
            .collect()
    }

    /// Verify the membership index against the records.
    pub fn check_consistency(&self) -> Result<(), ChildcareError> {
        let mut indexed = 0usize;
        for (band, ids) in self.registry.bands().iter().zip(&self.members) {
            for id in ids {
                let record = self.get(*id).ok_or_else(|| {
                    ChildcareError::InconsistentIndex(format!(
                        "{} lists missing student {}",
                        band.label(),
                        id
                    ))
                })?;
                if record.assigned_band() != Some(band.label()) {
                    return Err(ChildcareError::InconsistentIndex(format!(
                        "student {} is listed in {} but assigned to {:?}",
                        id,
                        band.label(),
                        record.assigned_band()
                    )));
                }
                indexed += 1;
            }
        }

        let assigned = self
            .records
            .iter()
            .filter(|record| record.assigned_band.is_some())
            .count();
        if assigned != indexed {
            return Err(ChildcareError::InconsistentIndex(format!(
                "{} records assigned but {} index entries",
                assigned, indexed
            )));
        }
        Ok(())
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new(BandRegistry::reference())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GuardianInfo;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn today() -> NaiveDate {
        date(2026, 10, 18)
    }

    #[test]
    fn ids_are_minted_in_order() {
        let mut roster = Roster::default();
        let (a, _) = roster.enroll(StudentDetails::new("Dani", "Olmo", date(2025, 1, 1)), today()).expect("enroll");
        let (b, _) = roster.enroll(StudentDetails::new("Harry", "Kane", date(2024, 1, 1)), today()).expect("enroll");

        assert_eq!(a, StudentId(1));
        assert_eq!(b, StudentId(2));
        assert_eq!(roster.next_id(), StudentId(3));
    }

    #[test]
    fn deleted_id_is_not_reused() {
        let mut roster = Roster::default();
        let (a, _) = roster.enroll(StudentDetails::new("Dani", "Olmo", date(2025, 1, 1)), today()).expect("enroll");
        roster.delete(a).expect("delete");

        let (b, _) = roster.enroll(StudentDetails::new("Harry", "Kane", date(2024, 1, 1)), today()).expect("enroll");
        assert_ne!(a, b);
    }

    #[test]
    fn enroll_places_in_matching_band() {
        let mut roster = Roster::default();
        let (id, result) = roster.enroll(
            StudentDetails::new("Lamine", "Yamal", date(2024, 3, 18)),
            today(),
        ).expect("enroll");

        assert_eq!(
            result,
            AssignmentResult::Assigned {
                band: "Toddlers Room (2-3 years)".to_string(),
                age: Age::from_years_and_months(2, 7),
            }
        );
        let record = roster.get(id).expect("record");
        assert_eq!(record.assigned_band(), Some("Toddlers Room (2-3 years)"));
        assert_eq!(roster.band_members("Toddlers Room (2-3 years)").len(), 1);
        roster.check_consistency().expect("consistent");
    }

    #[test]
    fn unplaceable_student_is_cleared_but_kept() {
        let mut roster = Roster::default();
        let details = StudentDetails::new("Xavi", "Simons", date(2020, 1, 1))
            .with_allergies(["Dairy"])
            .with_guardian(GuardianInfo::new("Ana", "Simons", "0400000000", "ana@example.com"));
        let (id, result) = roster.enroll(details, today()).expect("enroll");

        assert_eq!(
            result,
            AssignmentResult::Unplaceable {
                age: Some(Age::from_years_and_months(6, 9))
            }
        );
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.total_enrolled(), 0);
        let record = roster.get(id).expect("placeholder stays");
        assert!(record.is_placeholder());
        assert!(record.allergies.is_empty());
        assert!(record.guardian.is_none());
        roster.check_consistency().expect("consistent");
    }

    #[test]
    fn restore_keeps_id_and_advances_counter() {
        let mut roster = Roster::default();
        let record = StudentRecord::with_id(
            StudentId(41),
            StudentDetails::new("William", "Saliba", date(2025, 6, 15)),
        );

        let result = roster.restore(record, today()).expect("restore");
        assert!(result.is_assigned());
        assert!(roster.get(StudentId(41)).is_some());
        assert_eq!(roster.next_id(), StudentId(42));
    }

    #[test]
    fn restore_rejects_duplicate_id() {
        let mut roster = Roster::default();
        let make = || {
            StudentRecord::with_id(
                StudentId(3),
                StudentDetails::new("Dani", "Olmo", date(2025, 1, 1)),
            )
        };
        roster.restore(make(), today()).expect("first");

        assert!(matches!(
            roster.restore(make(), today()),
            Err(ChildcareError::DuplicateStudentId(StudentId(3)))
        ));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn restore_rejects_id_at_counter_limit() {
        let mut roster = Roster::default();
        let record = StudentRecord::with_id(
            StudentId(u64::MAX),
            StudentDetails::new("Dani", "Olmo", date(2025, 1, 1)),
        );

        assert!(matches!(
            roster.restore(record, today()),
            Err(ChildcareError::IdSpaceExhausted(StudentId(u64::MAX)))
        ));
        assert!(roster.is_empty());
        assert_eq!(roster.next_id(), StudentId(FIRST_STUDENT_ID));
    }

    #[test]
    fn enroll_never_mints_a_taken_id() {
        let mut roster = Roster::default();
        let last = StudentId(u64::MAX - 1);
        roster
            .restore(
                StudentRecord::with_id(last, StudentDetails::new("Dani", "Olmo", date(2025, 1, 1))),
                today(),
            )
            .expect("restore");

        let result = roster.enroll(StudentDetails::new("Harry", "Kane", date(2024, 1, 1)), today());
        assert!(matches!(result, Err(ChildcareError::IdSpaceExhausted(_))));
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.records().iter().filter(|r| r.id == last).count(), 1);
        roster.check_consistency().expect("consistent");
    }

    #[test]
    fn delete_placeholder_succeeds() {
        let mut roster = Roster::default();
        let (id, result) = roster.enroll(StudentDetails::new("Old", "Timer", date(2019, 1, 1)), today()).expect("enroll");
        assert!(!result.is_assigned());

        let removed = roster.delete(id).expect("delete placeholder");
        assert_eq!(removed.id, id);
        assert!(roster.is_empty());
    }

    #[test]
    fn delete_unknown_id_leaves_roster_unchanged() {
        let mut roster = Roster::default();
        roster.enroll(StudentDetails::new("Dani", "Olmo", date(2025, 1, 1)), today()).expect("enroll");

        let result = roster.delete(StudentId(99));
        assert!(matches!(result, Err(ChildcareError::StudentNotFound(StudentId(99)))));
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.total_enrolled(), 1);
    }

    #[test]
    fn classrooms_include_empty_bands() {
        let mut roster = Roster::default();
        roster.enroll(StudentDetails::new("Dani", "Olmo", date(2025, 1, 1)), today()).expect("enroll");

        let rooms = roster.classrooms();
        assert_eq!(rooms.len(), 3);
        assert_eq!(rooms[0].students.len(), 1);
        assert!(rooms[1].students.is_empty());
        assert!(rooms[2].students.is_empty());
    }

    #[test]
    fn allergy_listing_skips_rooms_without_allergies() {
        let mut roster = Roster::default();
        roster.enroll(
            StudentDetails::new("Dani", "Olmo", date(2025, 1, 1)).with_allergies(["Egg"]),
            today(),
        ).expect("enroll");
        roster.enroll(StudentDetails::new("Harry", "Kane", date(2023, 1, 1)), today()).expect("enroll");

        let rooms = roster.allergy_listing();
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].band.label(), "Babies Room (0-2 years)");
    }

    #[test]
    fn guardian_listing_only_includes_students_with_guardian() {
        let mut roster = Roster::default();
        roster.enroll(
            StudentDetails::new("Dani", "Olmo", date(2025, 1, 1))
                .with_guardian(GuardianInfo::new("Mia", "Olmo", "0411111111", "mia@example.com")),
            today(),
        ).expect("enroll");
        roster.enroll(StudentDetails::new("Harry", "Kane", date(2023, 1, 1)), today()).expect("enroll");

        let names: Vec<String> = roster.guardian_listing().map(|s| s.full_name()).collect();
        assert_eq!(names, vec!["Dani Olmo".to_string()]);
    }
}
