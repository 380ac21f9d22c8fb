//! Faculty model.

use serde::{Deserialize, Serialize};

use super::{Availability, TimeSlot};

/// A faculty member who teaches courses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faculty {
    /// Unique faculty identifier.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Department.
    #[serde(default)]
    pub department: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Contact phone.
    #[serde(default)]
    pub phone: String,
    /// Slots in which this faculty member cannot teach.
    #[serde(default)]
    pub availability: Availability,
}

impl Faculty {
    /// Creates a new faculty member, available in every slot.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            department: String::new(),
            email: String::new(),
            phone: String::new(),
            availability: Availability::always(),
        }
    }

    /// Sets the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Sets email and phone.
    pub fn with_contact(mut self, email: impl Into<String>, phone: impl Into<String>) -> Self {
        self.email = email.into();
        self.phone = phone.into();
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

    /// Whether the faculty member can teach at the slot.
    #[inline]
    pub fn is_available_at(&self, slot: &TimeSlot) -> bool {
        self.availability.is_available(slot)
    }
}
