//! # Kitchen Menu
//!
//! Weekly meal plan: week number → weekday → three fixed meal slots.
//!
//! The menu has no stored link to the roster. Allergy cross-referencing is a
//! read-only computation over both (`Menu::allergen_conflicts`).

use crate::primitives::{MAX_MENU_WEEK, MIN_MENU_WEEK};
use crate::{ChildcareError, Roster, StudentId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// WEEKDAY & MEAL SLOT
// =============================================================================

/// A day the kitchen cooks for. Ordered Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Day from its 1-based number (1 = Monday).
    #[must_use]
    pub fn from_number(number: u32) -> Option<Self> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    /// 1-based day number (1 = Monday).
    #[must_use]
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the three meals served each day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MealSlot {
    Breakfast,
    Lunch,
    AfternoonTea,
}

impl MealSlot {
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::AfternoonTea];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::AfternoonTea => "Afternoon Tea",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// DAY MENU
// =============================================================================

/// The three meals of one day.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DayMenu {
    #[serde(rename = "Breakfast", default)]
    pub breakfast: String,
    #[serde(rename = "Lunch", default)]
    pub lunch: String,
    #[serde(rename = "Afternoon Tea", default)]
    pub afternoon_tea: String,
}

impl DayMenu {
    #[must_use]
    pub fn new(
        breakfast: impl Into<String>,
        lunch: impl Into<String>,
        afternoon_tea: impl Into<String>,
    ) -> Self {
        Self {
            breakfast: breakfast.into(),
            lunch: lunch.into(),
            afternoon_tea: afternoon_tea.into(),
        }
    }

    #[must_use]
    pub fn meal(&self, slot: MealSlot) -> &str {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::AfternoonTea => &self.afternoon_tea,
        }
    }

    /// All meals in serving order.
    pub fn meals(&self) -> impl Iterator<Item = (MealSlot, &str)> {
        MealSlot::ALL.into_iter().map(move |slot| (slot, self.meal(slot)))
    }
}

// =============================================================================
// MENU
// =============================================================================

/// Days planned for one week.
pub type WeekMenu = BTreeMap<Weekday, DayMenu>;

/// The kitchen's meal plan.
///
/// Serializes as `{"<week>": {"<Day>": {"Breakfast": .., "Lunch": .., "Afternoon Tea": ..}}}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Menu {
    weeks: BTreeMap<u32, WeekMenu>,
}

/// A planned meal that mentions an enrolled student's allergy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllergenConflict {
    pub week: u32,
    pub day: Weekday,
    pub slot: MealSlot,
    pub meal: String,
    pub student: StudentId,
    pub student_name: String,
    pub allergy: String,
}

impl Menu {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the menu of one day.
    pub fn set_day(&mut self, week: u32, day: Weekday, menu: DayMenu) -> Result<Option<DayMenu>, ChildcareError> {
        validate_week(week)?;
        Ok(self.weeks.entry(week).or_default().insert(day, menu))
    }

    /// Remove the menu of one day. A week left empty is dropped.
    pub fn remove_day(&mut self, week: u32, day: Weekday) -> Result<DayMenu, ChildcareError> {
        let days = self
            .weeks
            .get_mut(&week)
            .ok_or(ChildcareError::MenuDayNotFound { week, day })?;
        let removed = days
            .remove(&day)
            .ok_or(ChildcareError::MenuDayNotFound { week, day })?;
        if days.is_empty() {
            self.weeks.remove(&week);
        }
        Ok(removed)
    }

    #[must_use]
    pub fn day(&self, week: u32, day: Weekday) -> Option<&DayMenu> {
        self.weeks.get(&week).and_then(|days| days.get(&day))
    }

    #[must_use]
    pub fn week(&self, week: u32) -> Option<&WeekMenu> {
        self.weeks.get(&week)
    }

    /// Planned weeks in ascending order.
    pub fn weeks(&self) -> impl Iterator<Item = (u32, &WeekMenu)> {
        self.weeks.iter().map(|(week, days)| (*week, days))
    }

    /// Number of planned days across all weeks.
    #[must_use]
    pub fn day_count(&self) -> usize {
        self.weeks.values().map(BTreeMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    /// Meals whose description mentions an allergy of an enrolled student.
    ///
    /// The allergy must appear in the meal text as a whole word, ignoring
    /// case. A plural `s`/`es` still matches; "<allergy>-free" does not. Only
    /// students currently placed in a band are checked.
    #[must_use]
    pub fn allergen_conflicts(&self, roster: &Roster) -> Vec<AllergenConflict> {
        let mut conflicts = Vec::new();
        let enrolled: Vec<_> = roster
            .records()
            .iter()
            .filter(|record| record.assigned_band().is_some())
            .collect();

        for (week, days) in &self.weeks {
            for (day, menu) in days {
                for (slot, meal) in menu.meals() {
                    let meal_lower = meal.to_lowercase();
                    for student in &enrolled {
                        for allergy in &student.allergies {
                            let needle = allergy.trim().to_lowercase();
                            if !needle.is_empty() && mentions_allergen(&meal_lower, &needle) {
                                conflicts.push(AllergenConflict {
                                    week: *week,
                                    day: *day,
                                    slot,
                                    meal: meal.to_string(),
                                    student: student.id,
                                    student_name: student.full_name(),
                                    allergy: allergy.clone(),
                                });
                            }
                        }
                    }
                }
            }
        }
        conflicts
    }
}

/// Whole-word occurrence of `needle` in `text`, both already lowercased.
fn mentions_allergen(text: &str, needle: &str) -> bool {
    text.match_indices(needle).any(|(start, _)| {
        if text[..start].chars().next_back().is_some_and(char::is_alphanumeric) {
            return false;
        }
        let rest = &text[start + needle.len()..];
        ["", "s", "es"]
            .iter()
            .filter_map(|suffix| rest.strip_prefix(suffix))
            .any(|tail| {
                !tail.chars().next().is_some_and(char::is_alphanumeric)
                    && !tail.starts_with("-free")
                    && !tail.starts_with(" free")
            })
    })
}

/// Check a week number against the plannable range.
pub fn validate_week(week: u32) -> Result<(), ChildcareError> {
    if (MIN_MENU_WEEK..=MAX_MENU_WEEK).contains(&week) {
        Ok(())
    } else {
        Err(ChildcareError::InvalidWeek(week))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StudentDetails;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn weekday_numbering() {
        assert_eq!(Weekday::from_number(1), Some(Weekday::Monday));
        assert_eq!(Weekday::from_number(5), Some(Weekday::Friday));
        assert_eq!(Weekday::from_number(0), None);
        assert_eq!(Weekday::from_number(6), None);
        assert_eq!(Weekday::Wednesday.number(), 3);
    }

    #[test]
    fn set_day_then_update() {
        let mut menu = Menu::new();
        let previous = menu
            .set_day(1, Weekday::Monday, DayMenu::new("Pancakes", "Sandwich", "Cookies"))
            .expect("set");
        assert!(previous.is_none());

        let previous = menu
            .set_day(1, Weekday::Monday, DayMenu::new("Oatmeal", "Sandwich", "Cookies"))
            .expect("update");
        assert_eq!(previous.map(|d| d.breakfast), Some("Pancakes".to_string()));
        assert_eq!(
            menu.day(1, Weekday::Monday).map(|d| d.breakfast.as_str()),
            Some("Oatmeal")
        );
    }

    #[test]
    fn week_out_of_range_rejected() {
        let mut menu = Menu::new();
        assert!(matches!(
            menu.set_day(0, Weekday::Monday, DayMenu::default()),
            Err(ChildcareError::InvalidWeek(0))
        ));
        assert!(menu.set_day(53, Weekday::Monday, DayMenu::default()).is_err());
        assert!(menu.is_empty());
    }

    #[test]
    fn removing_last_day_drops_week() {
        let mut menu = Menu::new();
        menu.set_day(2, Weekday::Friday, DayMenu::new("Toast", "Soup", "Fruit"))
            .expect("set");

        let removed = menu.remove_day(2, Weekday::Friday).expect("remove");
        assert_eq!(removed.lunch, "Soup");
        assert!(menu.week(2).is_none());
        assert!(matches!(
            menu.remove_day(2, Weekday::Friday),
            Err(ChildcareError::MenuDayNotFound { week: 2, day: Weekday::Friday })
        ));
    }

    #[test]
    fn serializes_with_string_week_keys_and_slot_names() {
        let mut menu = Menu::new();
        menu.set_day(1, Weekday::Monday, DayMenu::new("Pancakes", "Spaghetti", "Fruit Salad"))
            .expect("set");

        let json = serde_json::to_value(&menu).expect("serialize");
        assert_eq!(json["1"]["Monday"]["Afternoon Tea"], "Fruit Salad");
        assert_eq!(json["1"]["Monday"]["Breakfast"], "Pancakes");
    }

    #[test]
    fn conflicts_match_case_insensitively() {
        let today = date(2026, 10, 18);
        let mut roster = Roster::default();
        let (id, _) = roster.enroll(
            StudentDetails::new("Dani", "Olmo", date(2025, 1, 1)).with_allergies(["peanut"]),
            today,
        ).expect("enroll");
        roster.enroll(
            StudentDetails::new("Harry", "Kane", date(2015, 1, 1)).with_allergies(["Egg"]),
            today,
        ).expect("enroll");

        let mut menu = Menu::new();
        menu.set_day(3, Weekday::Tuesday, DayMenu::new("Scrambled Egg", "Peanut Noodles", "Apple"))
            .expect("set");

        let conflicts = menu.allergen_conflicts(&roster);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].student, id);
        assert_eq!(conflicts[0].slot, MealSlot::Lunch);
        assert_eq!(conflicts[0].week, 3);
    }

    #[test]
    fn allergen_must_be_a_whole_word() {
        assert!(mentions_allergen("peanut butter toast", "peanut"));
        assert!(mentions_allergen("boiled eggs", "egg"));
        assert!(mentions_allergen("fish, chips", "fish"));
        assert!(!mentions_allergen("eggplant bake", "egg"));
        assert!(!mentions_allergen("dairy-free muffin", "dairy"));
        assert!(!mentions_allergen("nut free slice", "nut"));
        assert!(!mentions_allergen("coconut rice", "nut"));
    }

    #[test]
    fn free_from_meal_is_not_a_conflict() {
        let today = date(2026, 10, 18);
        let mut roster = Roster::default();
        roster.enroll(
            StudentDetails::new("Dani", "Olmo", date(2025, 1, 1)).with_allergies(["Dairy"]),
            today,
        ).expect("enroll");

        let mut menu = Menu::new();
        menu.set_day(1, Weekday::Friday, DayMenu::new("Toast", "Pasta", "Dairy-free muffin"))
            .expect("set");
        assert!(menu.allergen_conflicts(&roster).is_empty());

        menu.set_day(1, Weekday::Friday, DayMenu::new("Toast", "Pasta", "Dairy custard"))
            .expect("set");
        assert_eq!(menu.allergen_conflicts(&roster).len(), 1);
    }
}
