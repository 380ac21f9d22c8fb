//! Room model.
//!
//! Rooms host course meetings. Each room has a type, a seat capacity,
//! and an optional set of blocked slots.

use serde::{Deserialize, Serialize};

use super::{Availability, TimeSlot};

/// A teaching room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Display name (e.g., "C-101").
    #[serde(default)]
    pub name: String,
    /// Seat capacity.
    pub capacity: u32,
    /// Room classification.
    pub room_type: RoomType,
    /// Building name.
    #[serde(default)]
    pub building: String,
    /// Slots in which the room cannot be booked.
    #[serde(default)]
    pub availability: Availability,
}

/// Room type classification.
///
/// A course requiring a type may only use rooms of that type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoomType {
    /// General lecture room.
    Classroom,
    /// Laboratory.
    Lab,
    /// Domain-specific type (e.g., "Auditorium").
    Custom(String),
}

impl Room {
    /// Creates a new room.
    pub fn new(id: impl Into<String>, capacity: u32, room_type: RoomType) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            capacity,
            room_type,
            building: String::new(),
            availability: Availability::always(),
        }
    }

    /// Creates a classroom.
    pub fn classroom(id: impl Into<String>, capacity: u32) -> Self {
        Self::new(id, capacity, RoomType::Classroom)
    }

    /// Creates a lab.
    pub fn lab(id: impl Into<String>, capacity: u32) -> Self {
        Self::new(id, capacity, RoomType::Lab)
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the building.
    pub fn with_building(mut self, building: impl Into<String>) -> Self {
        self.building = building.into();
        self
    }

    /// Blocks a slot.
    pub fn with_unavailable(mut self, slot: TimeSlot) -> Self {
        self.availability.block(slot);
        self
    }

    /// Replaces the availability set.
    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    /// Whether the room can be booked at the slot.
    #[inline]
    pub fn is_available_at(&self, slot: &TimeSlot) -> bool {
        self.availability.is_available(slot)
    }

    /// Whether the room satisfies a type requirement (`None` = any type).
    pub fn matches_type(&self, required: Option<&RoomType>) -> bool {
        required.map_or(true, |t| *t == self.room_type)
    }

    /// Whether the room seats the enrollment (`None` = unknown, always fits).
    pub fn fits(&self, enrollment: Option<u32>) -> bool {
        enrollment.map_or(true, |n| self.capacity >= n)
    }
}
