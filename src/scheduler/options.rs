//! Static option domains.
//!
//! For each course, lists every (slot, room) pair that satisfies the unary
//! constraints: faculty available, room available, room type matches, and
//! room capacity fits (under the hard policy). Conflicts between courses are
//! left to the search.
//!
//! # Ordering
//! Options are slot-major (day, then period ascending). Within a slot,
//! rooms go smallest sufficient capacity first; ties keep input order.
//! Under the soft capacity policy, rooms that are too small follow the
//! fitting ones, largest first.

use std::collections::HashMap;

use super::config::CapacityPolicy;
use super::request::ScheduleRequest;
use crate::models::{Course, Room, TimeSlot, UnplaceableReason, UnplacedCourse};

/// One (slot, room) pair a course may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Candidate {
    pub slot: TimeSlot,
    /// Index into `ScheduleRequest::rooms`.
    pub room: usize,
    /// Whether the room seats the expected enrollment.
    pub fits: bool,
}

/// Static domain of a placeable course.
#[derive(Debug, Clone)]
pub(crate) struct CourseDomain {
    /// Index into `ScheduleRequest::courses`.
    pub course: usize,
    /// Index into `ScheduleRequest::faculty`.
    pub faculty: usize,
    /// Candidates in try order. Never empty.
    pub options: Vec<Candidate>,
}

/// Builds the static domain of every course, in input order.
///
/// Courses that can never be placed come back as `Err` with the reason:
/// - `NoFaculty`: faculty reference not in the request
/// - `NoCompatibleRoom`: no room of the right type and size with a free slot
/// - `NoFreeSlot`: the faculty member is never free, or is never free when
///   a compatible room is
pub(crate) fn build_domains(
    request: &ScheduleRequest,
    policy: CapacityPolicy,
) -> Vec<Result<CourseDomain, UnplacedCourse>> {
    let faculty_index: HashMap<&str, usize> = request
        .faculty
        .iter()
        .enumerate()
        .map(|(i, f)| (f.id.as_str(), i))
        .collect();
    let slots = request.grid.slots();

    request
        .courses
        .iter()
        .enumerate()
        .map(|(idx, course)| -> Result<CourseDomain, UnplacedCourse> {
            let Some(fac_idx) = course
                .faculty_ref()
                .and_then(|id| faculty_index.get(id).copied())
            else {
                return Err(UnplacedCourse::new(
                    &course.id,
                    UnplaceableReason::NoFaculty,
                    format!(
                        "Faculty '{}' is not on record",
                        course.faculty_ref().unwrap_or_default()
                    ),
                ));
            };
            let faculty = &request.faculty[fac_idx];

            let rooms = compatible_rooms(course, &request.rooms, policy, &slots)
                .map_err(|message| {
                    UnplacedCourse::new(&course.id, UnplaceableReason::NoCompatibleRoom, message)
                })?;

            let free_slots: Vec<&TimeSlot> =
                slots.iter().filter(|s| faculty.is_available_at(s)).collect();
            if free_slots.is_empty() {
                return Err(UnplacedCourse::new(
                    &course.id,
                    UnplaceableReason::NoFreeSlot,
                    format!("Faculty '{}' has no free slot", faculty.id),
                ));
            }

            let mut options = Vec::new();
            for slot in free_slots {
                for &room_idx in &rooms {
                    let room = &request.rooms[room_idx];
                    if room.is_available_at(slot) {
                        options.push(Candidate {
                            slot: *slot,
                            room: room_idx,
                            fits: room.fits(course.expected_enrollment),
                        });
                    }
                }
            }

            if options.is_empty() {
                return Err(UnplacedCourse::new(
                    &course.id,
                    UnplaceableReason::NoFreeSlot,
                    format!(
                        "No compatible room is free while faculty '{}' is available",
                        faculty.id
                    ),
                ));
            }

            Ok(CourseDomain {
                course: idx,
                faculty: fac_idx,
                options,
            })
        })
        .collect()
}

/// Room indices a course may use, in try order.
fn compatible_rooms(
    course: &Course,
    rooms: &[Room],
    policy: CapacityPolicy,
    slots: &[TimeSlot],
) -> Result<Vec<usize>, String> {
    let typed: Vec<usize> = rooms
        .iter()
        .enumerate()
        .filter(|(_, r)| r.matches_type(course.room_type.as_ref()))
        .map(|(i, _)| i)
        .collect();
    if typed.is_empty() {
        return Err(match &course.room_type {
            Some(t) => format!("No room of type {t:?}"),
            None => "No rooms on record".to_string(),
        });
    }

    let enrollment = course.expected_enrollment;
    let (mut fitting, mut small): (Vec<usize>, Vec<usize>) =
        typed.into_iter().partition(|&i| rooms[i].fits(enrollment));
    if fitting.is_empty() && policy == CapacityPolicy::Hard {
        return Err(format!(
            "No matching room seats {} student(s)",
            enrollment.unwrap_or_default()
        ));
    }

    fitting.sort_by_key(|&i| rooms[i].capacity);
    let mut ordered = fitting;
    if policy == CapacityPolicy::Soft {
        small.sort_by_key(|&i| std::cmp::Reverse(rooms[i].capacity));
        ordered.extend(small);
    }

    ordered.retain(|&i| slots.iter().any(|s| rooms[i].is_available_at(s)));
    if ordered.is_empty() {
        return Err("Every compatible room is unavailable all week".to_string());
    }
    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Availability, Day, Faculty, Period, RoomType, SlotGrid};

    fn grid() -> SlotGrid {
        SlotGrid::new(
            vec![Day::Monday, Day::Tuesday],
            vec![Period::hours(9, 10), Period::hours(10, 11)],
        )
    }

    fn request(courses: Vec<Course>, rooms: Vec<Room>) -> ScheduleRequest {
        ScheduleRequest::new(courses, vec![Faculty::new("F1", "Dr. Sharma")], rooms)
            .with_grid(grid())
    }

    fn unplaced_reason(r: &Result<CourseDomain, UnplacedCourse>) -> Option<UnplaceableReason> {
        r.as_ref().err().map(|u| u.reason)
    }

    #[test]
    fn test_option_order() {
        let req = request(
            vec![Course::new("C1", "A").with_faculty("F1").with_enrollment(30)],
            vec![
                Room::classroom("big", 90),
                Room::classroom("tiny", 10),
                Room::classroom("mid", 40),
            ],
        );
        let domains = build_domains(&req, CapacityPolicy::Hard);
        let d = domains[0].as_ref().unwrap();

        // 4 slots x 2 fitting rooms; "tiny" excluded
        assert_eq!(d.options.len(), 8);
        assert_eq!(d.options[0].slot, TimeSlot::new(Day::Monday, 0));
        assert_eq!(d.options[0].room, 2); // mid (40) before big (90)
        assert_eq!(d.options[1].room, 0);
        assert_eq!(d.options[2].slot, TimeSlot::new(Day::Monday, 1));
        assert_eq!(d.options[7].slot, TimeSlot::new(Day::Tuesday, 1));
        assert!(d.options.iter().all(|o| o.fits));
    }

    #[test]
    fn test_soft_capacity_appends_small_rooms() {
        let req = request(
            vec![Course::new("C1", "A").with_faculty("F1").with_enrollment(50)],
            vec![
                Room::classroom("r20", 20),
                Room::classroom("r60", 60),
                Room::classroom("r40", 40),
            ],
        );
        let domains = build_domains(&req, CapacityPolicy::Soft);
        let d = domains[0].as_ref().unwrap();
        let first_slot: Vec<(usize, bool)> =
            d.options[..3].iter().map(|o| (o.room, o.fits)).collect();
        assert_eq!(first_slot, vec![(1, true), (2, false), (0, false)]);
    }

    #[test]
    fn test_unknown_faculty() {
        let req = request(
            vec![Course::new("C1", "A").with_faculty("F9")],
            vec![Room::classroom("R1", 30)],
        );
        let domains = build_domains(&req, CapacityPolicy::Hard);
        assert_eq!(unplaced_reason(&domains[0]), Some(UnplaceableReason::NoFaculty));
    }

    #[test]
    fn test_no_compatible_room() {
        let req = request(
            vec![
                Course::new("C1", "A").with_faculty("F1").with_room_type(RoomType::Lab),
                Course::new("C2", "B").with_faculty("F1").with_enrollment(100),
                Course::new("C3", "C").with_faculty("F1"),
            ],
            vec![Room::classroom("R1", 30)],
        );
        let domains = build_domains(&req, CapacityPolicy::Hard);
        assert_eq!(unplaced_reason(&domains[0]), Some(UnplaceableReason::NoCompatibleRoom));
        assert_eq!(unplaced_reason(&domains[1]), Some(UnplaceableReason::NoCompatibleRoom));
        assert!(domains[2].is_ok());
    }

    #[test]
    fn test_empty_room_list() {
        let req = request(vec![Course::new("C1", "A").with_faculty("F1")], vec![]);
        let domains = build_domains(&req, CapacityPolicy::Soft);
        assert_eq!(unplaced_reason(&domains[0]), Some(UnplaceableReason::NoCompatibleRoom));
    }

    #[test]
    fn test_room_blocked_all_week() {
        let g = grid();
        let req = request(
            vec![Course::new("C1", "A").with_faculty("F1")],
            vec![Room::classroom("R1", 30).with_availability(Availability::never(&g))],
        );
        let domains = build_domains(&req, CapacityPolicy::Hard);
        assert_eq!(unplaced_reason(&domains[0]), Some(UnplaceableReason::NoCompatibleRoom));
    }

    #[test]
    fn test_faculty_never_free() {
        let g = grid();
        let mut req = request(
            vec![Course::new("C1", "A").with_faculty("F1")],
            vec![Room::classroom("R1", 30)],
        );
        req.faculty[0].availability = Availability::never(&g);
        let domains = build_domains(&req, CapacityPolicy::Hard);
        assert_eq!(unplaced_reason(&domains[0]), Some(UnplaceableReason::NoFreeSlot));
    }

    #[test]
    fn test_faculty_and_room_never_overlap() {
        let mut req = request(
            vec![Course::new("C1", "A").with_faculty("F1")],
            vec![Room::classroom("R1", 30)
                .with_unavailable(TimeSlot::new(Day::Monday, 1))
                .with_unavailable(TimeSlot::new(Day::Tuesday, 0))
                .with_unavailable(TimeSlot::new(Day::Tuesday, 1))],
        );
        req.faculty[0] = Faculty::new("F1", "Dr. Sharma")
            .with_unavailable(TimeSlot::new(Day::Monday, 0));
        let domains = build_domains(&req, CapacityPolicy::Hard);
        let err = domains[0].as_ref().unwrap_err();
        assert_eq!(err.reason, UnplaceableReason::NoFreeSlot);
        assert!(err.message.contains("No compatible room is free"));
    }
}
