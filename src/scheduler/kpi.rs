//! Timetable quality metrics (KPIs).
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Placement Rate | placed courses / all courses |
//! | Room Utilization | booked slots / grid slots, per room |
//! | Avg Room Utilization | mean over all rooms in the snapshot |
//! | Faculty Load | booked slots per faculty member |
//! | Busiest Day | day with the most bookings (earliest on ties) |

use std::collections::BTreeMap;

use crate::models::{Day, SlotGrid, Timetable};
use crate::store::Snapshot;

/// Timetable performance indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct TimetableKpi {
    /// Fraction of courses placed (0.0..1.0). 1.0 when there are no courses.
    pub placement_rate: f64,
    /// Per-room utilization (room ID → 0.0..1.0), every room in the snapshot.
    pub utilization_by_room: BTreeMap<String, f64>,
    /// Mean room utilization.
    pub avg_room_utilization: f64,
    /// Booked slots per faculty member, every faculty member in the snapshot.
    pub faculty_load: BTreeMap<String, usize>,
    /// Day with the most bookings.
    pub busiest_day: Option<Day>,
}

impl TimetableKpi {
    /// Computes KPIs for a timetable.
    ///
    /// # Arguments
    /// * `timetable` - The scheduler's result.
    /// * `snapshot` - The records it was produced from.
    /// * `grid` - The slot grid it was produced on.
    pub fn calculate(timetable: &Timetable, snapshot: &Snapshot, grid: &SlotGrid) -> Self {
        let total = snapshot.courses.len();
        let placement_rate = if total == 0 {
            1.0
        } else {
            timetable.placed_count() as f64 / total as f64
        };

        let grid_slots = grid.len();
        let utilization_by_room: BTreeMap<String, f64> = snapshot
            .rooms
            .iter()
            .map(|r| {
                let booked = timetable.assignments_for_room(&r.id).len();
                let util = if grid_slots == 0 {
                    0.0
                } else {
                    booked as f64 / grid_slots as f64
                };
                (r.id.clone(), util)
            })
            .collect();

        let avg_room_utilization = if utilization_by_room.is_empty() {
            0.0
        } else {
            utilization_by_room.values().sum::<f64>() / utilization_by_room.len() as f64
        };

        let faculty_load = snapshot
            .faculty
            .iter()
            .map(|f| (f.id.clone(), timetable.assignments_for_faculty(&f.id).len()))
            .collect();

        let mut per_day: BTreeMap<Day, usize> = BTreeMap::new();
        for a in timetable.assignments.values() {
            *per_day.entry(a.slot.day).or_insert(0) += 1;
        }
        let busiest_day = per_day
            .into_iter()
            .max_by(|(da, ca), (db, cb)| ca.cmp(cb).then(db.cmp(da)))
            .map(|(day, _)| day);

        Self {
            placement_rate,
            utilization_by_room,
            avg_room_utilization,
            faculty_load,
            busiest_day,
        }
    }

    /// Whether the timetable meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_placement_rate: f64, max_room_utilization: f64) -> bool {
        self.placement_rate >= min_placement_rate
            && self
                .utilization_by_room
                .values()
                .all(|&u| u <= max_room_utilization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Assignment, Course, Faculty, Period, Room, TimeSlot, UnplaceableReason, UnplacedCourse,
    };

    fn grid() -> SlotGrid {
        SlotGrid::new(
            vec![Day::Monday, Day::Tuesday],
            vec![Period::hours(9, 10), Period::hours(10, 11)],
        )
    }

    fn snapshot() -> Snapshot {
        Snapshot::new(
            vec![
                Course::new("C1", "A").with_faculty("F1"),
                Course::new("C2", "B").with_faculty("F1"),
                Course::new("C3", "C").with_faculty("F2"),
                Course::new("C4", "D").with_faculty("F2"),
            ],
            vec![Faculty::new("F1", "A"), Faculty::new("F2", "B")],
            vec![Room::classroom("R1", 30), Room::classroom("R2", 30)],
        )
    }

    fn timetable() -> Timetable {
        let mut t = Timetable::new();
        t.add_assignment(Assignment::new("C1", "F1", "R1", TimeSlot::new(Day::Tuesday, 0)));
        t.add_assignment(Assignment::new("C2", "F1", "R1", TimeSlot::new(Day::Tuesday, 1)));
        t.add_assignment(Assignment::new("C3", "F2", "R1", TimeSlot::new(Day::Monday, 0)));
        t.add_unplaced(UnplacedCourse::new("C4", UnplaceableReason::NoFreeSlot, ""));
        t
    }

    #[test]
    fn test_kpi_basic() {
        let kpi = TimetableKpi::calculate(&timetable(), &snapshot(), &grid());
        assert!((kpi.placement_rate - 0.75).abs() < 1e-10);
        // R1: 3/4, R2: 0/4
        assert!((kpi.utilization_by_room["R1"] - 0.75).abs() < 1e-10);
        assert!((kpi.utilization_by_room["R2"] - 0.0).abs() < 1e-10);
        assert!((kpi.avg_room_utilization - 0.375).abs() < 1e-10);
        assert_eq!(kpi.faculty_load["F1"], 2);
        assert_eq!(kpi.faculty_load["F2"], 1);
        assert_eq!(kpi.busiest_day, Some(Day::Tuesday));
    }

    #[test]
    fn test_busiest_day_tie_prefers_earlier() {
        let mut t = Timetable::new();
        t.add_assignment(Assignment::new("C1", "F1", "R1", TimeSlot::new(Day::Tuesday, 0)));
        t.add_assignment(Assignment::new("C3", "F2", "R1", TimeSlot::new(Day::Monday, 0)));
        let kpi = TimetableKpi::calculate(&t, &snapshot(), &grid());
        assert_eq!(kpi.busiest_day, Some(Day::Monday));
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = TimetableKpi::calculate(&Timetable::new(), &Snapshot::default(), &grid());
        assert!((kpi.placement_rate - 1.0).abs() < 1e-10);
        assert!((kpi.avg_room_utilization - 0.0).abs() < 1e-10);
        assert!(kpi.utilization_by_room.is_empty());
        assert_eq!(kpi.busiest_day, None);
    }

    #[test]
    fn test_meets_thresholds() {
        let kpi = TimetableKpi::calculate(&timetable(), &snapshot(), &grid());
        assert!(kpi.meets_thresholds(0.75, 0.75));
        assert!(!kpi.meets_thresholds(0.8, 1.0));
        assert!(!kpi.meets_thresholds(0.5, 0.5));
    }
}
