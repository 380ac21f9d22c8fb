//! Input validation for timetabling problems.
//!
//! Checks structural integrity of courses, faculty, rooms and the slot grid
//! before any placement is attempted. Detects:
//! - Duplicate IDs
//! - Courses without a faculty reference
//! - Rooms with zero capacity
//! - Malformed slot grids (duplicate days, empty or overlapping periods)
//! - Unavailable slots that refer to periods outside the grid
//!
//! A course that references an unknown faculty ID is NOT a validation
//! error: the record may have been deleted from the store after the course
//! was created, so the scheduler reports it per course as `NO_FACULTY`.

use crate::models::{Course, Faculty, Room, SlotGrid, TimeSlot};
use std::collections::HashSet;
use thiserror::Error;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities of the same kind share an ID.
    DuplicateId,
    /// A course has no assigned faculty.
    MissingFacultyReference,
    /// A room has zero capacity.
    InvalidCapacity,
    /// The slot grid is malformed.
    InvalidGrid,
    /// An unavailable slot names a period the grid does not have.
    SlotOutsideGrid,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input of a scheduling run.
///
/// Checks:
/// 1. Periods are non-empty, in ascending order and do not overlap
/// 2. No day appears twice in the grid
/// 3. No duplicate faculty, room, or course IDs
/// 4. Every course names a faculty member
/// 5. Every room seats at least one student
/// 6. Unavailable slots refer to existing periods
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    courses: &[Course],
    faculty: &[Faculty],
    rooms: &[Room],
    grid: &SlotGrid,
) -> ValidationResult {
    let mut errors = Vec::new();

    validate_grid(grid, &mut errors);

    let mut faculty_ids = HashSet::new();
    for f in faculty {
        if !faculty_ids.insert(f.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate faculty ID: {}", f.id),
            ));
        }
        check_slots(
            grid,
            f.availability.blocked(),
            &format!("Faculty '{}'", f.id),
            &mut errors,
        );
    }

    let mut room_ids = HashSet::new();
    for r in rooms {
        if !room_ids.insert(r.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate room ID: {}", r.id),
            ));
        }
        if r.capacity == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCapacity,
                format!("Room '{}' has zero capacity", r.id),
            ));
        }
        check_slots(
            grid,
            r.availability.blocked(),
            &format!("Room '{}'", r.id),
            &mut errors,
        );
    }

    let mut course_ids = HashSet::new();
    for c in courses {
        if !course_ids.insert(c.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate course ID: {}", c.id),
            ));
        }
        if c.faculty_ref().is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingFacultyReference,
                format!("Course '{}' ({}) has no assigned faculty", c.id, c.code),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_grid(grid: &SlotGrid, errors: &mut Vec<ValidationError>) {
    let mut days = HashSet::new();
    for day in &grid.days {
        if !days.insert(*day) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidGrid,
                format!("Day {day} appears twice in the slot grid"),
            ));
        }
    }

    for (i, p) in grid.periods.iter().enumerate() {
        if p.end_min <= p.start_min {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidGrid,
                format!("Period {i} ({}) is empty", p.label),
            ));
        }
    }

    for pair in grid.periods.windows(2) {
        if pair[1].start_min < pair[0].end_min {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidGrid,
                format!(
                    "Period {} must start after {} ends",
                    pair[1].label, pair[0].label
                ),
            ));
        }
    }
}

fn check_slots<'a>(
    grid: &SlotGrid,
    blocked: impl Iterator<Item = &'a TimeSlot>,
    owner: &str,
    errors: &mut Vec<ValidationError>,
) {
    for slot in blocked {
        if slot.period >= grid.periods.len() {
            errors.push(ValidationError::new(
                ValidationErrorKind::SlotOutsideGrid,
                format!(
                    "{owner} blocks period {} but the grid has {} period(s)",
                    slot.period,
                    grid.periods.len()
                ),
            ));
        }
    }
}
