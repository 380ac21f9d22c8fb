//! Course model.
//!
//! A course is the unit the scheduler places: it needs one weekly
//! (slot, room) pair, taught by its assigned faculty member.

use serde::{Deserialize, Serialize};

use super::RoomType;

/// A course section to be scheduled.
///
/// Treated as immutable once a scheduling run starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier.
    pub id: String,
    /// Catalog code (e.g., "CSE101").
    pub code: String,
    /// Human-readable title.
    #[serde(default)]
    pub name: String,
    /// Credit hours.
    #[serde(default)]
    pub credit_hours: u32,
    /// Owning department.
    #[serde(default)]
    pub department: String,
    /// Assigned faculty ID. `None` fails validation.
    pub faculty_id: Option<String>,
    /// Expected enrollment. `None` = capacity is not checked.
    #[serde(default)]
    pub expected_enrollment: Option<u32>,
    /// Required room type. `None` = any room.
    #[serde(default)]
    pub room_type: Option<RoomType>,
}

impl Course {
    /// Creates a new course with the given ID and code.
    pub fn new(id: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: String::new(),
            credit_hours: 0,
            department: String::new(),
            faculty_id: None,
            expected_enrollment: None,
            room_type: None,
        }
    }

    /// Sets the course title.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the credit hours.
    pub fn with_credits(mut self, credit_hours: u32) -> Self {
        self.credit_hours = credit_hours;
        self
    }

    /// Sets the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Assigns a faculty member.
    pub fn with_faculty(mut self, faculty_id: impl Into<String>) -> Self {
        self.faculty_id = Some(faculty_id.into());
        self
    }

    /// Sets the expected enrollment.
    pub fn with_enrollment(mut self, students: u32) -> Self {
        self.expected_enrollment = Some(students);
        self
    }

    /// Requires a room of the given type.
    pub fn with_room_type(mut self, room_type: RoomType) -> Self {
        self.room_type = Some(room_type);
        self
    }

    /// Faculty reference, treating an empty string as missing.
    pub fn faculty_ref(&self) -> Option<&str> {
        self.faculty_id.as_deref().filter(|id| !id.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_builder() {
        let c = Course::new("1", "CSE101")
            .with_name("Introduction to Programming")
            .with_credits(3)
            .with_department("CSE")
            .with_faculty("F1")
            .with_enrollment(40)
            .with_room_type(RoomType::Classroom);

        assert_eq!(c.id, "1");
        assert_eq!(c.code, "CSE101");
        assert_eq!(c.credit_hours, 3);
        assert_eq!(c.faculty_ref(), Some("F1"));
        assert_eq!(c.expected_enrollment, Some(40));
        assert_eq!(c.room_type, Some(RoomType::Classroom));
    }

    #[test]
    fn test_blank_faculty_is_missing() {
        let c = Course::new("1", "CSE101").with_faculty("  ");
        assert_eq!(c.faculty_ref(), None);
        assert_eq!(Course::new("2", "X").faculty_ref(), None);
    }

    #[test]
    fn test_course_deserialize_defaults() {
        let c: Course =
            serde_json::from_str(r#"{"id":"7","code":"ECE101","faculty_id":"F3"}"#).unwrap();
        assert_eq!(c.faculty_ref(), Some("F3"));
        assert!(c.expected_enrollment.is_none());
        assert!(c.room_type.is_none());
    }
}
