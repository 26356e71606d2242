//! # Configuration
//!
//! Settings come from two places:
//! - CLI flags (`--data-dir`, `--config`), see [`crate::cli::Cli`]
//! - An optional TOML file naming the documents and listing the bands
//!
//! ```toml
//! students_file = "students.json"
//! menu_file = "kitchen.json"
//!
//! [[bands]]
//! label = "Babies Room (0-2 years)"
//! min_years = 0
//! max_years = 2
//! ```
//!
//! With no file (or no `[[bands]]`), the reference rooms are used.

use childcare_core::primitives::{MENU_FILE_NAME, STUDENTS_FILE_NAME};
use childcare_core::{Age, AgeBand, BandOverlap, BandRegistry, ChildcareError, DataFiles};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while building the settings. These are the only errors that
/// stop the application at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Invalid band configuration: {0}")]
    Bands(#[from] ChildcareError),
}

/// One `[[bands]]` entry. Bounds are `years * 12 + months`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BandConfig {
    pub label: String,
    pub min_years: i32,
    #[serde(default)]
    pub min_months: i32,
    pub max_years: i32,
    #[serde(default)]
    pub max_months: i32,
}

impl BandConfig {
    fn to_band(&self) -> Result<AgeBand, ChildcareError> {
        AgeBand::new(
            self.label.clone(),
            Age::from_years_and_months(self.min_years, self.min_months),
            Age::from_years_and_months(self.max_years, self.max_months),
        )
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    students_file: Option<String>,
    menu_file: Option<String>,
    #[serde(default)]
    bands: Vec<BandConfig>,
}

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub students_file: String,
    pub menu_file: String,
    /// Empty means "use the reference rooms".
    pub bands: Vec<BandConfig>,
}

impl Settings {
    /// Defaults for `data_dir`, optionally overridden by a TOML file.
    pub fn load(data_dir: &Path, config: Option<&Path>) -> Result<Self, ConfigError> {
        match config {
            None => Ok(Self::defaults(data_dir)),
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_toml(data_dir, &text, path)
            }
        }
    }

    #[must_use]
    pub fn defaults(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            students_file: STUDENTS_FILE_NAME.to_string(),
            menu_file: MENU_FILE_NAME.to_string(),
            bands: Vec::new(),
        }
    }

    /// Parse TOML text. `origin` is only used in error messages.
    pub fn from_toml(data_dir: &Path, text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;

        let defaults = Self::defaults(data_dir);
        Ok(Self {
            data_dir: defaults.data_dir,
            students_file: file.students_file.unwrap_or(defaults.students_file),
            menu_file: file.menu_file.unwrap_or(defaults.menu_file),
            bands: file.bands,
        })
    }

    #[must_use]
    pub fn data_files(&self) -> DataFiles {
        DataFiles::new(
            self.data_dir.join(&self.students_file),
            self.data_dir.join(&self.menu_file),
        )
    }

    /// Build the band registry. Overlapping bands are accepted and returned
    /// so the caller can warn; first match wins when classifying.
    pub fn band_registry(&self) -> Result<(BandRegistry, Vec<BandOverlap>), ConfigError> {
        if self.bands.is_empty() {
            return Ok((BandRegistry::reference(), Vec::new()));
        }
        let bands = self
            .bands
            .iter()
            .map(BandConfig::to_band)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(BandRegistry::lenient(bands)?)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_reference_rooms() {
        let settings = Settings::defaults(Path::new("data"));
        let (registry, overlaps) = settings.band_registry().expect("registry");

        assert_eq!(registry, BandRegistry::reference());
        assert!(overlaps.is_empty());
        assert_eq!(
            settings.data_files(),
            DataFiles::new("data/students.json", "data/kitchen.json")
        );
    }

    #[test]
    fn toml_overrides_files_and_bands() {
        let text = r#"
            students_file = "kids.json"

            [[bands]]
            label = "Nursery"
            min_years = 0
            max_years = 1
            max_months = 6

            [[bands]]
            label = "Preschool"
            min_years = 1
            min_months = 6
            max_years = 6
        "#;
        let settings = Settings::from_toml(Path::new("d"), text, Path::new("c.toml")).expect("parse");

        assert_eq!(settings.students_file, "kids.json");
        assert_eq!(settings.menu_file, "kitchen.json");
        let (registry, overlaps) = settings.band_registry().expect("registry");
        assert!(overlaps.is_empty());
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.bands()[0].max_age(), Age::from_months(18));
    }

    #[test]
    fn overlapping_bands_are_reported() {
        let text = r#"
            [[bands]]
            label = "A"
            min_years = 0
            max_years = 3

            [[bands]]
            label = "B"
            min_years = 2
            max_years = 5
        "#;
        let settings = Settings::from_toml(Path::new("d"), text, Path::new("c.toml")).expect("parse");
        let (_, overlaps) = settings.band_registry().expect("registry");
        assert_eq!(
            overlaps,
            vec![BandOverlap {
                first: "A".to_string(),
                second: "B".to_string()
            }]
        );
    }

    #[test]
    fn inverted_band_is_rejected() {
        let text = r#"
            [[bands]]
            label = "Backwards"
            min_years = 4
            max_years = 2
        "#;
        let settings = Settings::from_toml(Path::new("d"), text, Path::new("c.toml")).expect("parse");
        assert!(matches!(settings.band_registry(), Err(ConfigError::Bands(_))));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = Settings::from_toml(Path::new("d"), "colour = \"red\"", Path::new("c.toml"));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
