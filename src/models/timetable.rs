//! Timetable (solution) model.
//!
//! A timetable maps every placed course to one (slot, room) pair and lists
//! the courses that could not be placed, each with a reason code. It also
//! carries soft-constraint warnings and feasibility diagnostics.
//!
//! Assignments are keyed by course ID in a `BTreeMap` so that iteration and
//! serialization order never depend on hashing.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use super::TimeSlot;

/// A complete scheduling result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timetable {
    /// Placed courses (course ID → assignment).
    pub assignments: BTreeMap<String, Assignment>,
    /// Courses that could not be placed, in input order.
    pub unplaced: Vec<UnplacedCourse>,
    /// Soft-constraint warnings and feasibility diagnostics.
    pub violations: Vec<Violation>,
    /// Search counters for the run that produced this timetable.
    pub stats: SearchStats,
}

/// A course-slot-room assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Placed course ID.
    pub course_id: String,
    /// Teaching faculty ID (denormalized for conflict queries).
    pub faculty_id: String,
    /// Booked room ID.
    pub room_id: String,
    /// Booked slot.
    pub slot: TimeSlot,
}

/// A course the scheduler could not place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnplacedCourse {
    /// Course ID.
    pub course_id: String,
    /// Reason code.
    pub reason: UnplaceableReason,
    /// Human-readable detail.
    pub message: String,
}

/// Why a course could not be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnplaceableReason {
    /// The course references a faculty member missing from the snapshot.
    NoFaculty,
    /// No room matches the course's type and capacity needs.
    NoCompatibleRoom,
    /// Every compatible (slot, room) pair is unavailable or taken.
    NoFreeSlot,
    /// The search budget ran out before the course was placed.
    BudgetExceeded,
}

impl UnplaceableReason {
    /// Stable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoFaculty => "NO_FACULTY",
            Self::NoCompatibleRoom => "NO_COMPATIBLE_ROOM",
            Self::NoFreeSlot => "NO_FREE_SLOT",
            Self::BudgetExceeded => "BUDGET_EXCEEDED",
        }
    }
}

impl fmt::Display for UnplaceableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A constraint warning or diagnostic attached to a timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity ID (course, faculty, or room).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
    /// Severity (0-100, higher = worse).
    pub severity: i32,
}

/// Classification of timetable violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// A faculty member has more courses than free slots.
    FacultyOverload,
    /// More courses need a room type than its rooms have free slots.
    RoomTypeShortage,
    /// A course sits in a room smaller than its enrollment (soft mode only).
    CapacityShortfall,
    /// Two assignments share a faculty member and slot.
    FacultyDoubleBooked,
    /// Two assignments share a room and slot.
    RoomDoubleBooked,
}

/// Search counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Search steps taken (placements and failure handling).
    pub iterations: u64,
    /// Single-course backtracks performed.
    pub backtracks: u64,
    /// Whether the iteration or time budget ran out.
    pub budget_exhausted: bool,
}

impl Assignment {
    /// Creates a new assignment.
    pub fn new(
        course_id: impl Into<String>,
        faculty_id: impl Into<String>,
        room_id: impl Into<String>,
        slot: TimeSlot,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            faculty_id: faculty_id.into(),
            room_id: room_id.into(),
            slot,
        }
    }
}

impl UnplacedCourse {
    /// Creates a new unplaced-course record.
    pub fn new(
        course_id: impl Into<String>,
        reason: UnplaceableReason,
        message: impl Into<String>,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            reason,
            message: message.into(),
        }
    }
}

impl Violation {
    /// Creates a faculty overload diagnostic.
    pub fn faculty_overload(faculty_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::FacultyOverload,
            entity_id: faculty_id.into(),
            message: message.into(),
            severity: 70,
        }
    }

    /// Creates a room type shortage diagnostic.
    pub fn room_type_shortage(room_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::RoomTypeShortage,
            entity_id: room_type.into(),
            message: message.into(),
            severity: 60,
        }
    }

    /// Creates a capacity shortfall warning.
    pub fn capacity_shortfall(course_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::CapacityShortfall,
            entity_id: course_id.into(),
            message: message.into(),
            severity: 40,
        }
    }

    fn double_booked(violation_type: ViolationType, entity_id: &str, message: String) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.to_string(),
            message,
            severity: 100,
        }
    }
}

impl Timetable {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an assignment, replacing any previous one for the same course.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments
            .insert(assignment.course_id.clone(), assignment);
    }

    /// Records an unplaceable course.
    pub fn add_unplaced(&mut self, unplaced: UnplacedCourse) {
        self.unplaced.push(unplaced);
    }

    /// Adds a violation.
    pub fn add_violation(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Whether every course was placed.
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Number of placed courses.
    pub fn placed_count(&self) -> usize {
        self.assignments.len()
    }

    /// Number of unplaceable courses.
    pub fn unplaced_count(&self) -> usize {
        self.unplaced.len()
    }

    /// Finds the assignment for a course.
    pub fn assignment_for_course(&self, course_id: &str) -> Option<&Assignment> {
        self.assignments.get(course_id)
    }

    /// Reason a course was not placed, if it wasn't.
    pub fn reason_for(&self, course_id: &str) -> Option<UnplaceableReason> {
        self.unplaced
            .iter()
            .find(|u| u.course_id == course_id)
            .map(|u| u.reason)
    }

    /// All assignments taught by a faculty member, in slot order.
    pub fn assignments_for_faculty(&self, faculty_id: &str) -> Vec<&Assignment> {
        let mut found: Vec<&Assignment> = self
            .assignments
            .values()
            .filter(|a| a.faculty_id == faculty_id)
            .collect();
        found.sort_by_key(|a| a.slot);
        found
    }

    /// All assignments booked in a room, in slot order.
    pub fn assignments_for_room(&self, room_id: &str) -> Vec<&Assignment> {
        let mut found: Vec<&Assignment> = self
            .assignments
            .values()
            .filter(|a| a.room_id == room_id)
            .collect();
        found.sort_by_key(|a| a.slot);
        found
    }

    /// All assignments in a slot.
    pub fn assignments_at(&self, slot: &TimeSlot) -> Vec<&Assignment> {
        self.assignments
            .values()
            .filter(|a| a.slot == *slot)
            .collect()
    }

    /// Unplaced course IDs with a given reason.
    pub fn unplaced_with(&self, reason: UnplaceableReason) -> Vec<&str> {
        self.unplaced
            .iter()
            .filter(|u| u.reason == reason)
            .map(|u| u.course_id.as_str())
            .collect()
    }

    /// Checks the hard invariants: no (faculty, slot) and no (room, slot)
    /// pair is used twice.
    ///
    /// Returns one violation per clashing pair. Empty for any timetable
    /// produced by the scheduler.
    pub fn find_conflicts(&self) -> Vec<Violation> {
        let mut conflicts = Vec::new();
        let mut by_faculty: HashMap<(&str, TimeSlot), &str> = HashMap::new();
        let mut by_room: HashMap<(&str, TimeSlot), &str> = HashMap::new();

        for a in self.assignments.values() {
            if let Some(other) = by_faculty.insert((a.faculty_id.as_str(), a.slot), &a.course_id) {
                conflicts.push(Violation::double_booked(
                    ViolationType::FacultyDoubleBooked,
                    &a.faculty_id,
                    format!(
                        "Faculty '{}' teaches '{}' and '{}' at {}",
                        a.faculty_id, other, a.course_id, a.slot
                    ),
                ));
            }
            if let Some(other) = by_room.insert((a.room_id.as_str(), a.slot), &a.course_id) {
                conflicts.push(Violation::double_booked(
                    ViolationType::RoomDoubleBooked,
                    &a.room_id,
                    format!(
                        "Room '{}' hosts '{}' and '{}' at {}",
                        a.room_id, other, a.course_id, a.slot
                    ),
                ));
            }
        }

        conflicts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Day;

    fn mon(period: usize) -> TimeSlot {
        TimeSlot::new(Day::Monday, period)
    }

    fn sample_timetable() -> Timetable {
        let mut t = Timetable::new();
        t.add_assignment(Assignment::new("C1", "F1", "R1", mon(0)));
        t.add_assignment(Assignment::new("C2", "F1", "R2", mon(1)));
        t.add_assignment(Assignment::new("C3", "F2", "R1", mon(1)));
        t.add_unplaced(UnplacedCourse::new(
            "C4",
            UnplaceableReason::NoFreeSlot,
            "all slots taken",
        ));
        t
    }

    #[test]
    fn test_counts() {
        let t = sample_timetable();
        assert_eq!(t.placed_count(), 3);
        assert_eq!(t.unplaced_count(), 1);
        assert!(!t.is_complete());
        assert!(Timetable::new().is_complete());
    }

    #[test]
    fn test_queries() {
        let t = sample_timetable();
        assert_eq!(t.assignment_for_course("C2").unwrap().room_id, "R2");
        assert!(t.assignment_for_course("C4").is_none());
        assert_eq!(t.reason_for("C4"), Some(UnplaceableReason::NoFreeSlot));
        assert_eq!(t.reason_for("C1"), None);

        let f1: Vec<&str> = t
            .assignments_for_faculty("F1")
            .iter()
            .map(|a| a.course_id.as_str())
            .collect();
        assert_eq!(f1, vec!["C1", "C2"]);
        assert_eq!(t.assignments_for_room("R1").len(), 2);
        assert_eq!(t.assignments_at(&mon(1)).len(), 2);
        assert_eq!(t.unplaced_with(UnplaceableReason::NoFreeSlot), vec!["C4"]);
    }

    #[test]
    fn test_no_conflicts() {
        assert!(sample_timetable().find_conflicts().is_empty());
    }

    #[test]
    fn test_detects_conflicts() {
        let mut t = sample_timetable();
        // Same faculty as C1, same room as C3's slot
        t.add_assignment(Assignment::new("C5", "F1", "R3", mon(0)));
        t.add_assignment(Assignment::new("C6", "F3", "R1", mon(1)));

        let conflicts = t.find_conflicts();
        assert_eq!(conflicts.len(), 2);
        assert!(conflicts
            .iter()
            .any(|v| v.violation_type == ViolationType::FacultyDoubleBooked && v.entity_id == "F1"));
        assert!(conflicts
            .iter()
            .any(|v| v.violation_type == ViolationType::RoomDoubleBooked && v.entity_id == "R1"));
    }

    #[test]
    fn test_reason_codes_serialize() {
        let json = serde_json::to_string(&UnplaceableReason::NoCompatibleRoom).unwrap();
        assert_eq!(json, "\"NO_COMPATIBLE_ROOM\"");
        assert_eq!(UnplaceableReason::BudgetExceeded.to_string(), "BUDGET_EXCEEDED");
        let back: UnplaceableReason = serde_json::from_str("\"NO_FACULTY\"").unwrap();
        assert_eq!(back, UnplaceableReason::NoFaculty);
    }
}
