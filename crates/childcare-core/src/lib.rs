//! # childcare-core
//!
//! The roster engine of the childcare manager - THE LOGIC.
//!
//! Records children enrolled at a centre, places each into the classroom
//! whose age band contains the child's age, keeps guardian and allergy
//! details, and holds the kitchen's weekly menu.
//!
//! ## Layout
//!
//! - `types`: records, ages, errors
//! - `bands`: age band registry (half-open intervals, first match wins)
//! - `roster`: records + band membership index, assignment and deletion
//! - `menu`: week → day → meal slot plan, allergy cross-reference
//! - `formats`: JSON document shapes (pure, no I/O)
//! - `storage`: reading and writing the two documents
//!
//! ## Architectural Constraints
//!
//! - Single-threaded: nothing here is reentrant, callers serialize access
//! - No terminal I/O and no logging: outcomes are returned to the caller
//! - Integer arithmetic only

// =============================================================================
// MODULES
// =============================================================================

pub mod bands;
pub mod formats;
pub mod menu;
pub mod primitives;
pub mod roster;
pub mod storage;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types
// =============================================================================

pub use types::{Age, ChildcareError, GuardianInfo, StudentDetails, StudentId, StudentRecord};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use bands::{AgeBand, BandOverlap, BandRegistry};
pub use menu::{AllergenConflict, DayMenu, MealSlot, Menu, WeekMenu, Weekday};
pub use roster::{AssignmentResult, Classroom, Roster};

// =============================================================================
// RE-EXPORTS: Persistence
// =============================================================================

pub use formats::{StudentDocument, menu_from_json, menu_to_json, students_from_json, students_to_json};
pub use storage::{DataFiles, LoadOutcome, LoadSummary, load_menu, load_students, save_menu, save_students};
