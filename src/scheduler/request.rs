//! Scheduling request.

use crate::models::{Course, Faculty, Room, SlotGrid};
use crate::store::{DomainStore, Snapshot, StoreError};

/// Input container for one scheduling run.
///
/// Owns its records, so a request built from a store is unaffected by
/// later writes to that store.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRequest {
    /// Courses to place, in input order.
    pub courses: Vec<Course>,
    /// Faculty members.
    pub faculty: Vec<Faculty>,
    /// Bookable rooms.
    pub rooms: Vec<Room>,
    /// Weekly slot grid.
    pub grid: SlotGrid,
}

impl ScheduleRequest {
    /// Creates a request on the default weekly grid.
    pub fn new(courses: Vec<Course>, faculty: Vec<Faculty>, rooms: Vec<Room>) -> Self {
        Self {
            courses,
            faculty,
            rooms,
            grid: SlotGrid::weekly_default(),
        }
    }

    /// Creates a request from a snapshot.
    pub fn from_snapshot(snapshot: Snapshot, grid: SlotGrid) -> Self {
        Self {
            courses: snapshot.courses,
            faculty: snapshot.faculty,
            rooms: snapshot.rooms,
            grid,
        }
    }

    /// Reads one snapshot from a store.
    pub fn from_store<S: DomainStore + ?Sized>(
        store: &S,
        grid: SlotGrid,
    ) -> Result<Self, StoreError> {
        Ok(Self::from_snapshot(store.snapshot()?, grid))
    }

    /// Sets the slot grid.
    pub fn with_grid(mut self, grid: SlotGrid) -> Self {
        self.grid = grid;
        self
    }
}
