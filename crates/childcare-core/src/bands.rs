//! # Age Band Registry
//!
//! Ordered set of labelled, half-open age intervals.
//!
//! - A band contains an age when `min_age <= age < max_age`
//! - `classify` returns the FIRST band in registry order that contains the age
//! - The strict constructor rejects overlapping bands; the lenient one accepts
//!   them and reports the overlapping pairs so the caller can warn
//!
//! First-match order is kept even for overlapping registries, so a lenient
//! registry classifies exactly like a list scanned top to bottom.

use crate::primitives::REFERENCE_BANDS;
use crate::{Age, ChildcareError};
use std::collections::BTreeSet;

// =============================================================================
// AGE BAND
// =============================================================================

/// A labelled age interval, usually one classroom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgeBand {
    label: String,
    min_age: Age,
    max_age: Age,
}

impl AgeBand {
    /// Create a band, validating the label and bounds.
    pub fn new(label: impl Into<String>, min_age: Age, max_age: Age) -> Result<Self, ChildcareError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(ChildcareError::InvalidBand("label is empty".to_string()));
        }
        if min_age.is_negative() {
            return Err(ChildcareError::InvalidBand(format!(
                "'{}' starts below zero",
                label
            )));
        }
        if max_age <= min_age {
            return Err(ChildcareError::InvalidBand(format!(
                "'{}' upper bound ({}) must exceed lower bound ({})",
                label, max_age, min_age
            )));
        }
        Ok(Self {
            label,
            min_age,
            max_age,
        })
    }

    /// Create a band from whole-year bounds.
    pub fn from_years(
        label: impl Into<String>,
        min_years: i32,
        max_years: i32,
    ) -> Result<Self, ChildcareError> {
        Self::new(label, Age::from_years(min_years), Age::from_years(max_years))
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn min_age(&self) -> Age {
        self.min_age
    }

    #[must_use]
    pub fn max_age(&self) -> Age {
        self.max_age
    }

    /// Half-open membership test.
    #[must_use]
    pub fn contains(&self, age: Age) -> bool {
        self.min_age <= age && age < self.max_age
    }

    /// True when some age belongs to both bands.
    #[must_use]
    pub fn overlaps(&self, other: &AgeBand) -> bool {
        self.min_age < other.max_age && other.min_age < self.max_age
    }
}

/// A pair of bands that claim the same ages, in registry order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandOverlap {
    pub first: String,
    pub second: String,
}

// =============================================================================
// REGISTRY
// =============================================================================

/// The ordered list of bands students are classified into.
///
/// Built once at startup and owned by the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandRegistry {
    bands: Vec<AgeBand>,
}

impl BandRegistry {
    /// Build a registry, rejecting overlaps and duplicate labels.
    pub fn new(bands: Vec<AgeBand>) -> Result<Self, ChildcareError> {
        let (registry, overlaps) = Self::lenient(bands)?;
        match overlaps.into_iter().next() {
            Some(BandOverlap { first, second }) => {
                Err(ChildcareError::OverlappingBands { first, second })
            }
            None => Ok(registry),
        }
    }

    /// Build a registry that tolerates overlapping bands.
    ///
    /// Returns the registry together with every overlapping pair. Duplicate
    /// labels and an empty band list are still rejected: students refer to
    /// their band by label.
    pub fn lenient(bands: Vec<AgeBand>) -> Result<(Self, Vec<BandOverlap>), ChildcareError> {
        if bands.is_empty() {
            return Err(ChildcareError::InvalidBand(
                "at least one band is required".to_string(),
            ));
        }

        let mut labels = BTreeSet::new();
        for band in &bands {
            if !labels.insert(band.label.as_str()) {
                return Err(ChildcareError::DuplicateBandLabel(band.label.clone()));
            }
        }

        let registry = Self { bands };
        let overlaps = registry.overlaps();
        Ok((registry, overlaps))
    }

    /// The three-room reference configuration: [0,2), [2,3), [3,5) years.
    #[must_use]
    pub fn reference() -> Self {
        let bands = REFERENCE_BANDS
            .iter()
            .map(|&(label, min_years, max_years)| AgeBand {
                label: label.to_string(),
                min_age: Age::from_years(min_years),
                max_age: Age::from_years(max_years),
            })
            .collect();
        Self { bands }
    }

    /// First band (in registry order) whose interval contains `age`.
    #[must_use]
    pub fn classify(&self, age: Age) -> Option<&AgeBand> {
        self.bands.iter().find(|band| band.contains(age))
    }

    /// Position of the first band containing `age`.
    pub(crate) fn classify_index(&self, age: Age) -> Option<usize> {
        self.bands.iter().position(|band| band.contains(age))
    }

    /// Position of the band with this label.
    #[must_use]
    pub fn position(&self, label: &str) -> Option<usize> {
        self.bands.iter().position(|band| band.label == label)
    }

    /// Every overlapping pair, in registry order.
    #[must_use]
    pub fn overlaps(&self) -> Vec<BandOverlap> {
        let mut found = Vec::new();
        for (i, first) in self.bands.iter().enumerate() {
            for second in &self.bands[i + 1..] {
                if first.overlaps(second) {
                    found.push(BandOverlap {
                        first: first.label.clone(),
                        second: second.label.clone(),
                    });
                }
            }
        }
        found
    }

    #[must_use]
    pub fn bands(&self) -> &[AgeBand] {
        &self.bands
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }
}

impl Default for BandRegistry {
    fn default() -> Self {
        Self::reference()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_boundaries_are_half_open() {
        let registry = BandRegistry::reference();

        let at_two = registry.classify(Age::from_years(2)).expect("placeable");
        assert_eq!(at_two.label(), "Toddlers Room (2-3 years)");

        let just_under_two = registry
            .classify(Age::from_years_and_months(1, 11))
            .expect("placeable");
        assert_eq!(just_under_two.label(), "Babies Room (0-2 years)");

        assert!(registry.classify(Age::from_years(5)).is_none());
        assert!(registry.classify(Age::from_months(-1)).is_none());
    }

    #[test]
    fn newborn_is_a_baby() {
        let registry = BandRegistry::reference();
        let band = registry.classify(Age::from_months(0)).expect("placeable");
        assert_eq!(band.label(), "Babies Room (0-2 years)");
    }

    #[test]
    fn invalid_bounds_rejected() {
        assert!(matches!(
            AgeBand::from_years("Empty", 3, 3),
            Err(ChildcareError::InvalidBand(_))
        ));
        assert!(matches!(
            AgeBand::from_years("Negative", -1, 2),
            Err(ChildcareError::InvalidBand(_))
        ));
        assert!(matches!(
            AgeBand::from_years("  ", 0, 2),
            Err(ChildcareError::InvalidBand(_))
        ));
    }

    #[test]
    fn strict_registry_rejects_overlap() {
        let bands = vec![
            AgeBand::from_years("Little", 0, 3).expect("band"),
            AgeBand::from_years("Big", 2, 5).expect("band"),
        ];
        let result = BandRegistry::new(bands);
        assert!(matches!(
            result,
            Err(ChildcareError::OverlappingBands { ref first, ref second })
                if first == "Little" && second == "Big"
        ));
    }

    #[test]
    fn lenient_registry_keeps_first_match() {
        let bands = vec![
            AgeBand::from_years("Little", 0, 3).expect("band"),
            AgeBand::from_years("Big", 2, 5).expect("band"),
        ];
        let (registry, overlaps) = BandRegistry::lenient(bands).expect("lenient");

        assert_eq!(overlaps.len(), 1);
        let band = registry
            .classify(Age::from_years_and_months(2, 6))
            .expect("placeable");
        assert_eq!(band.label(), "Little");
    }

    #[test]
    fn duplicate_labels_rejected() {
        let bands = vec![
            AgeBand::from_years("Room", 0, 2).expect("band"),
            AgeBand::from_years("Room", 2, 4).expect("band"),
        ];
        assert!(matches!(
            BandRegistry::lenient(bands),
            Err(ChildcareError::DuplicateBandLabel(_))
        ));
    }

    #[test]
    fn empty_registry_rejected() {
        assert!(BandRegistry::new(Vec::new()).is_err());
    }

    #[test]
    fn adjacent_bands_do_not_overlap() {
        assert!(BandRegistry::reference().overlaps().is_empty());
    }
}
