//! Up-front feasibility pre-check.
//!
//! Cheap counting bounds that expose infeasibility before the search runs.
//! Each issue is a necessary-condition failure: if a check fires, at least
//! `excess` courses cannot be placed no matter what the search does. The
//! converse does not hold; passing every check does not guarantee a
//! complete timetable.
//!
//! Issues are reported alongside the timetable; they never abort a run.

use std::collections::BTreeMap;

use crate::models::{Course, Faculty, Room, RoomType, SlotGrid, Violation};

/// A detected infeasibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeasibilityIssue {
    /// A faculty member teaches more courses than they have free slots.
    FacultyOverload {
        faculty_id: String,
        courses: usize,
        free_slots: usize,
    },
    /// More courses require a room type than its rooms offer free slots.
    RoomTypeShortage {
        room_type: RoomType,
        courses: usize,
        free_room_slots: usize,
    },
    /// More courses than free (room, slot) pairs across all rooms.
    RoomSlotShortage {
        courses: usize,
        free_room_slots: usize,
    },
}

impl FeasibilityIssue {
    /// Minimum number of courses this issue leaves unplaced.
    pub fn excess(&self) -> usize {
        match self {
            Self::FacultyOverload {
                courses,
                free_slots,
                ..
            } => courses - free_slots,
            Self::RoomTypeShortage {
                courses,
                free_room_slots,
                ..
            }
            | Self::RoomSlotShortage {
                courses,
                free_room_slots,
            } => courses - free_room_slots,
        }
    }

    /// Converts the issue into a timetable diagnostic.
    pub fn to_violation(&self) -> Violation {
        match self {
            Self::FacultyOverload {
                faculty_id,
                courses,
                free_slots,
            } => Violation::faculty_overload(
                faculty_id.clone(),
                format!(
                    "Faculty '{faculty_id}' teaches {courses} course(s) but has {free_slots} free slot(s)"
                ),
            ),
            Self::RoomTypeShortage {
                room_type,
                courses,
                free_room_slots,
            } => Violation::room_type_shortage(
                format!("{room_type:?}"),
                format!(
                    "{courses} course(s) need a {room_type:?} room but only {free_room_slots} room-slot(s) are free"
                ),
            ),
            Self::RoomSlotShortage {
                courses,
                free_room_slots,
            } => Violation::room_type_shortage(
                "*",
                format!("{courses} course(s) but only {free_room_slots} free room-slot(s) in total"),
            ),
        }
    }
}

/// Runs the counting checks.
///
/// # Checks
/// 1. Per faculty (input order): distinct courses vs. distinct free slots.
/// 2. Per required room type (sorted): demand vs. free room-slots of that type.
/// 3. Overall: courses vs. free room-slots across all rooms.
///
/// Courses without a known faculty member are left out of check 1.
pub fn check_feasibility(
    courses: &[Course],
    faculty: &[Faculty],
    rooms: &[Room],
    grid: &SlotGrid,
) -> Vec<FeasibilityIssue> {
    let mut issues = Vec::new();

    let mut load: BTreeMap<&str, usize> = BTreeMap::new();
    for c in courses {
        if let Some(fid) = c.faculty_ref() {
            *load.entry(fid).or_insert(0) += 1;
        }
    }

    for f in faculty {
        let Some(&count) = load.get(f.id.as_str()) else {
            continue;
        };
        let free = f.availability.free_slots(grid).len();
        if count > free {
            issues.push(FeasibilityIssue::FacultyOverload {
                faculty_id: f.id.clone(),
                courses: count,
                free_slots: free,
            });
        }
    }

    let free_by_room: Vec<usize> = rooms
        .iter()
        .map(|r| r.availability.free_slots(grid).len())
        .collect();

    let mut demand: BTreeMap<&RoomType, usize> = BTreeMap::new();
    for c in courses {
        if let Some(t) = &c.room_type {
            *demand.entry(t).or_insert(0) += 1;
        }
    }
    for (room_type, count) in demand {
        let supply: usize = rooms
            .iter()
            .zip(&free_by_room)
            .filter(|(r, _)| r.room_type == *room_type)
            .map(|(_, free)| *free)
            .sum();
        if count > supply {
            issues.push(FeasibilityIssue::RoomTypeShortage {
                room_type: room_type.clone(),
                courses: count,
                free_room_slots: supply,
            });
        }
    }

    let total_supply: usize = free_by_room.iter().sum();
    if courses.len() > total_supply {
        issues.push(FeasibilityIssue::RoomSlotShortage {
            courses: courses.len(),
            free_room_slots: total_supply,
        });
    }

    issues
}
