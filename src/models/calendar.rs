//! Weekly slot grid and availability models.
//!
//! Defines the finite calendar the scheduler works on: an ordered list of
//! teaching days crossed with an ordered list of fixed periods.
//!
//! # Time Model
//! Periods are expressed in minutes since midnight. A [`TimeSlot`] refers to
//! a period by its index in the grid, so two grids with different period
//! lists are not interchangeable.
//!
//! # Precedence
//! A slot is available to a faculty member or room iff:
//! - It belongs to the grid, AND
//! - It is NOT listed in the entity's unavailable set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A teaching day.
///
/// Ordering follows the week (Monday first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Day {
    /// All teaching days, Monday to Friday.
    pub const WEEKDAYS: [Day; 5] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    /// Full English name.
    pub fn name(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fixed teaching interval [start, end) within a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// Display label (e.g., "9:00-10:00").
    pub label: String,
    /// Start (minutes since midnight, inclusive).
    pub start_min: u16,
    /// End (minutes since midnight, exclusive).
    pub end_min: u16,
}

impl Period {
    /// Creates a period from hour/minute bounds, deriving the label.
    pub fn new(start_min: u16, end_min: u16) -> Self {
        Self {
            label: format!(
                "{}:{:02}-{}:{:02}",
                start_min / 60,
                start_min % 60,
                end_min / 60,
                end_min % 60
            ),
            start_min,
            end_min,
        }
    }

    /// Creates a period from whole hours.
    pub fn hours(start_hour: u16, end_hour: u16) -> Self {
        Self::new(start_hour * 60, end_hour * 60)
    }

    /// Overrides the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Length of the period (minutes).
    #[inline]
    pub fn duration_min(&self) -> u16 {
        self.end_min.saturating_sub(self.start_min)
    }

    /// Whether two periods overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_min < other.end_min && other.start_min < self.end_min
    }
}

/// One cell of the slot grid: a day and a period index.
///
/// Derived ordering is day first, then period, which is the order the
/// scheduler tries slots in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Day of the week.
    pub day: Day,
    /// Index into [`SlotGrid::periods`].
    pub period: usize,
}

impl TimeSlot {
    /// Creates a new time slot.
    pub fn new(day: Day, period: usize) -> Self {
        Self { day, period }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.day, self.period)
    }
}

/// The finite (day x period) calendar grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotGrid {
    /// Teaching days, in the order they are tried.
    pub days: Vec<Day>,
    /// Periods within each day, in the order they are tried.
    pub periods: Vec<Period>,
}

impl SlotGrid {
    /// Creates a grid from explicit days and periods.
    pub fn new(days: Vec<Day>, periods: Vec<Period>) -> Self {
        Self { days, periods }
    }

    /// Monday to Friday with two morning hours, a late-morning hour and two
    /// afternoon hours after the lunch break.
    pub fn weekly_default() -> Self {
        Self::new(
            Day::WEEKDAYS.to_vec(),
            vec![
                Period::hours(9, 10),
                Period::hours(10, 11),
                Period::hours(11, 12),
                Period::hours(14, 15),
                Period::hours(15, 16),
            ],
        )
    }

    /// Number of slots in the grid.
    pub fn len(&self) -> usize {
        self.days.len() * self.periods.len()
    }

    /// Whether the grid has no slots.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a slot belongs to this grid.
    pub fn contains(&self, slot: &TimeSlot) -> bool {
        slot.period < self.periods.len() && self.days.contains(&slot.day)
    }

    /// All slots, day-major then period ascending.
    pub fn slots(&self) -> Vec<TimeSlot> {
        let mut days = self.days.clone();
        days.sort();
        days.dedup();
        days.into_iter()
            .flat_map(|day| (0..self.periods.len()).map(move |p| TimeSlot::new(day, p)))
            .collect()
    }

    /// The period a slot refers to.
    pub fn period(&self, slot: &TimeSlot) -> Option<&Period> {
        self.periods.get(slot.period)
    }

    /// Human-readable label, e.g. `"Monday 9:00-10:00"`.
    pub fn label(&self, slot: &TimeSlot) -> String {
        match self.period(slot) {
            Some(p) => format!("{} {}", slot.day, p.label),
            None => slot.to_string(),
        }
    }
}

impl Default for SlotGrid {
    fn default() -> Self {
        Self::weekly_default()
    }
}

/// Unavailability set for a faculty member or room.
///
/// Empty = available in every grid slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Availability {
    unavailable: BTreeSet<TimeSlot>,
}

impl Availability {
    /// Creates an availability with no blocked slots.
    pub fn always() -> Self {
        Self::default()
    }

    /// Creates an availability that blocks every slot of the grid.
    pub fn never(grid: &SlotGrid) -> Self {
        Self {
            unavailable: grid.slots().into_iter().collect(),
        }
    }

    /// Blocks a slot.
    pub fn block(&mut self, slot: TimeSlot) {
        self.unavailable.insert(slot);
    }

    /// Blocks a slot (builder form).
    pub fn with_blocked(mut self, slot: TimeSlot) -> Self {
        self.block(slot);
        self
    }

    /// Whether the slot is free.
    #[inline]
    pub fn is_available(&self, slot: &TimeSlot) -> bool {
        !self.unavailable.contains(slot)
    }

    /// Blocked slots in ascending order.
    pub fn blocked(&self) -> impl Iterator<Item = &TimeSlot> {
        self.unavailable.iter()
    }

    /// Grid slots not blocked, day-major then period ascending.
    pub fn free_slots(&self, grid: &SlotGrid) -> Vec<TimeSlot> {
        grid.slots()
            .into_iter()
            .filter(|s| self.is_available(s))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_label() {
        let p = Period::hours(9, 10);
        assert_eq!(p.label, "9:00-10:00");
        assert_eq!(p.duration_min(), 60);

        let q = Period::new(14 * 60 + 30, 15 * 60 + 45);
        assert_eq!(q.label, "14:30-15:45");
    }

    #[test]
    fn test_period_overlap() {
        let a = Period::hours(9, 10);
        let b = Period::new(9 * 60 + 30, 10 * 60 + 30);
        let c = Period::hours(10, 11); // touching, not overlapping
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_slot_ordering() {
        let mon_late = TimeSlot::new(Day::Monday, 4);
        let tue_early = TimeSlot::new(Day::Tuesday, 0);
        let mon_early = TimeSlot::new(Day::Monday, 0);
        let mut slots = vec![tue_early, mon_late, mon_early];
        slots.sort();
        assert_eq!(slots, vec![mon_early, mon_late, tue_early]);
    }

    #[test]
    fn test_default_grid() {
        let grid = SlotGrid::weekly_default();
        assert_eq!(grid.len(), 25);
        let slots = grid.slots();
        assert_eq!(slots[0], TimeSlot::new(Day::Monday, 0));
        assert_eq!(slots[24], TimeSlot::new(Day::Friday, 4));
        assert_eq!(grid.label(&slots[3]), "Monday 14:00-15:00");
    }

    #[test]
    fn test_grid_contains() {
        let grid = SlotGrid::new(vec![Day::Monday], vec![Period::hours(9, 10)]);
        assert!(grid.contains(&TimeSlot::new(Day::Monday, 0)));
        assert!(!grid.contains(&TimeSlot::new(Day::Monday, 1)));
        assert!(!grid.contains(&TimeSlot::new(Day::Friday, 0)));
    }

    #[test]
    fn test_grid_slots_sorted_when_days_unordered() {
        let grid = SlotGrid::new(
            vec![Day::Wednesday, Day::Monday],
            vec![Period::hours(9, 10)],
        );
        assert_eq!(
            grid.slots(),
            vec![
                TimeSlot::new(Day::Monday, 0),
                TimeSlot::new(Day::Wednesday, 0)
            ]
        );
    }

    #[test]
    fn test_availability() {
        let grid = SlotGrid::weekly_default();
        let blocked = TimeSlot::new(Day::Monday, 0);
        let av = Availability::always().with_blocked(blocked);

        assert!(!av.is_available(&blocked));
        assert!(av.is_available(&TimeSlot::new(Day::Monday, 1)));
        assert_eq!(av.free_slots(&grid).len(), 24);
        assert!(Availability::never(&grid).free_slots(&grid).is_empty());
    }
}
