//! Student record.
//!
//! Held by the domain store for CRUD; the scheduler does not read it.

use serde::{Deserialize, Serialize};

/// An enrolled student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub semester: u32,
    #[serde(default)]
    pub email: String,
}

impl Student {
    /// Creates a new student.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            department: String::new(),
            semester: 1,
            email: String::new(),
        }
    }

    /// Sets department and semester.
    pub fn with_program(mut self, department: impl Into<String>, semester: u32) -> Self {
        self.department = department.into();
        self.semester = semester;
        self
    }

    /// Sets the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }
}
