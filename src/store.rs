//! Domain store port and in-memory implementation.
//!
//! The scheduler never talks to a database. It asks a [`DomainStore`] for a
//! [`Snapshot`] once at the start of a run and works on that owned copy, so
//! writes made to the store while a run is in flight do not affect it.
//!
//! [`InMemoryStore`] is a complete, unsynchronized record store suitable for
//! tests, demos and embedding. Callers that share one between threads must
//! serialize access themselves.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::models::{Availability, Course, Day, Faculty, Room, Student, TimeSlot};

/// Read port used by the scheduler.
pub trait DomainStore {
    /// Returns an owned, immutable copy of the records a run needs.
    fn snapshot(&self) -> Result<Snapshot, StoreError>;
}

/// Errors raised by a domain store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A record with this ID already exists.
    #[error("{kind} '{id}' already exists")]
    DuplicateId { kind: RecordKind, id: String },

    /// No record with this ID exists.
    #[error("{kind} '{id}' not found")]
    NotFound { kind: RecordKind, id: String },

    /// Serialized store contents could not be parsed.
    #[error("Failed to parse store data: {message}")]
    Parse { message: String },

    /// The backing store could not be reached.
    #[error("Store unavailable: {message}")]
    Unavailable { message: String },
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Parse {
            message: err.to_string(),
        }
    }
}

/// Kind of record held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Student,
    Faculty,
    Course,
    Room,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RecordKind::Student => "Student",
            RecordKind::Faculty => "Faculty",
            RecordKind::Course => "Course",
            RecordKind::Room => "Room",
        })
    }
}

/// The records one scheduling run reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub faculty: Vec<Faculty>,
    #[serde(default)]
    pub rooms: Vec<Room>,
}

impl Snapshot {
    /// Creates a snapshot from record lists.
    pub fn new(courses: Vec<Course>, faculty: Vec<Faculty>, rooms: Vec<Room>) -> Self {
        Self {
            courses,
            faculty,
            rooms,
        }
    }

    /// Parses a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Finds a faculty member by ID.
    pub fn faculty_by_id(&self, id: &str) -> Option<&Faculty> {
        self.faculty.iter().find(|f| f.id == id)
    }

    /// Finds a room by ID.
    pub fn room_by_id(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }
}

/// A snapshot is its own (frozen) store.
impl DomainStore for Snapshot {
    fn snapshot(&self) -> Result<Snapshot, StoreError> {
        Ok(self.clone())
    }
}

trait Record {
    const KIND: RecordKind;
    fn id(&self) -> &str;
}

macro_rules! impl_record {
    ($ty:ty, $kind:expr) => {
        impl Record for $ty {
            const KIND: RecordKind = $kind;
            fn id(&self) -> &str {
                &self.id
            }
        }
    };
}

impl_record!(Student, RecordKind::Student);
impl_record!(Faculty, RecordKind::Faculty);
impl_record!(Course, RecordKind::Course);
impl_record!(Room, RecordKind::Room);

fn insert<T: Record>(records: &mut Vec<T>, record: T) -> Result<(), StoreError> {
    if records.iter().any(|r| r.id() == record.id()) {
        return Err(StoreError::DuplicateId {
            kind: T::KIND,
            id: record.id().to_string(),
        });
    }
    records.push(record);
    Ok(())
}

fn remove<T: Record>(records: &mut Vec<T>, id: &str) -> Result<T, StoreError> {
    match records.iter().position(|r| r.id() == id) {
        Some(idx) => Ok(records.remove(idx)),
        None => Err(StoreError::NotFound {
            kind: T::KIND,
            id: id.to_string(),
        }),
    }
}

fn find_mut<'a, T: Record>(records: &'a mut [T], id: &str) -> Result<&'a mut T, StoreError> {
    records
        .iter_mut()
        .find(|r| r.id() == id)
        .ok_or_else(|| StoreError::NotFound {
            kind: T::KIND,
            id: id.to_string(),
        })
}

/// Next numeric ID: one past the largest numeric ID, or "1".
fn next_numeric_id<T: Record>(records: &[T]) -> String {
    let max = records
        .iter()
        .filter_map(|r| r.id().parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    (max + 1).to_string()
}

/// In-memory record store.
///
/// Records keep insertion order, which is the order the scheduler sees them
/// in. Deleting a faculty member does not cascade to their courses; those
/// courses are reported `NO_FACULTY` by the next run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InMemoryStore {
    #[serde(default)]
    students: Vec<Student>,
    #[serde(default)]
    faculty: Vec<Faculty>,
    #[serde(default)]
    courses: Vec<Course>,
    #[serde(default)]
    rooms: Vec<Room>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with a small two-department campus:
    /// five students, four faculty, six courses and five rooms.
    pub fn with_sample_data() -> Self {
        let students = vec![
            Student::new("1", "Alice Johnson")
                .with_program("CSE", 3)
                .with_email("alice@college.edu"),
            Student::new("2", "Bob Smith").with_program("CSE", 3).with_email("bob@college.edu"),
            Student::new("3", "Carol Davis").with_program("ECE", 2).with_email("carol@college.edu"),
            Student::new("4", "David Wilson")
                .with_program("ECE", 2)
                .with_email("david@college.edu"),
            Student::new("5", "Eva Brown").with_program("CSE", 4).with_email("eva@college.edu"),
        ];
        let faculty = vec![
            Faculty::new("1", "Dr. Sharma")
                .with_department("CSE")
                .with_contact("sharma@college.edu", "9876543210"),
            Faculty::new("2", "Dr. Verma")
                .with_department("CSE")
                .with_contact("verma@college.edu", "9876543211"),
            Faculty::new("3", "Dr. Gupta")
                .with_department("ECE")
                .with_contact("gupta@college.edu", "9876543212"),
            Faculty::new("4", "Dr. Singh")
                .with_department("ECE")
                .with_contact("singh@college.edu", "9876543213"),
        ];
        let courses = vec![
            Course::new("1", "CSE101")
                .with_name("Introduction to Programming")
                .with_credits(3)
                .with_department("CSE")
                .with_faculty("1"),
            Course::new("2", "CSE102")
                .with_name("Data Structures")
                .with_credits(4)
                .with_department("CSE")
                .with_faculty("1"),
            Course::new("3", "CSE201")
                .with_name("Algorithms")
                .with_credits(4)
                .with_department("CSE")
                .with_faculty("2"),
            Course::new("4", "ECE101")
                .with_name("Digital Electronics")
                .with_credits(3)
                .with_department("ECE")
                .with_faculty("3"),
            Course::new("5", "ECE102")
                .with_name("Signals & Systems")
                .with_credits(4)
                .with_department("ECE")
                .with_faculty("4"),
            Course::new("6", "CSE301")
                .with_name("Database Systems")
                .with_credits(4)
                .with_department("CSE")
                .with_faculty("2"),
        ];
        let rooms = vec![
            Room::classroom("1", 60).with_name("C-101").with_building("Main Building"),
            Room::classroom("2", 45).with_name("C-102").with_building("Main Building"),
            Room::lab("3", 30).with_name("Lab-201").with_building("Tech Building"),
            Room::lab("4", 25).with_name("Lab-202").with_building("Tech Building"),
            Room::classroom("5", 50).with_name("C-103").with_building("Main Building"),
        ];

        Self {
            students,
            faculty,
            courses,
            rooms,
        }
    }

    /// Parses a store from JSON.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the store to pretty JSON.
    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn add_student(&mut self, student: Student) -> Result<(), StoreError> {
        insert(&mut self.students, student)
    }

    pub fn add_faculty(&mut self, faculty: Faculty) -> Result<(), StoreError> {
        insert(&mut self.faculty, faculty)
    }

    pub fn add_course(&mut self, course: Course) -> Result<(), StoreError> {
        insert(&mut self.courses, course)
    }

    pub fn add_room(&mut self, room: Room) -> Result<(), StoreError> {
        insert(&mut self.rooms, room)
    }

    pub fn delete_student(&mut self, id: &str) -> Result<Student, StoreError> {
        remove(&mut self.students, id)
    }

    pub fn delete_faculty(&mut self, id: &str) -> Result<Faculty, StoreError> {
        remove(&mut self.faculty, id)
    }

    pub fn delete_course(&mut self, id: &str) -> Result<Course, StoreError> {
        remove(&mut self.courses, id)
    }

    pub fn delete_room(&mut self, id: &str) -> Result<Room, StoreError> {
        remove(&mut self.rooms, id)
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn faculty(&self) -> &[Faculty] {
        &self.faculty
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Blocks one slot for a faculty member.
    pub fn block_faculty_slot(
        &mut self,
        id: &str,
        day: Day,
        period: usize,
    ) -> Result<(), StoreError> {
        find_mut(&mut self.faculty, id)?
            .availability
            .block(TimeSlot::new(day, period));
        Ok(())
    }

    /// Replaces a faculty member's availability.
    pub fn set_faculty_availability(
        &mut self,
        id: &str,
        availability: Availability,
    ) -> Result<(), StoreError> {
        find_mut(&mut self.faculty, id)?.availability = availability;
        Ok(())
    }

    /// Replaces a room's availability.
    pub fn set_room_availability(
        &mut self,
        id: &str,
        availability: Availability,
    ) -> Result<(), StoreError> {
        find_mut(&mut self.rooms, id)?.availability = availability;
        Ok(())
    }

    /// Next free numeric ID for a record kind.
    pub fn next_id(&self, kind: RecordKind) -> String {
        match kind {
            RecordKind::Student => next_numeric_id(&self.students),
            RecordKind::Faculty => next_numeric_id(&self.faculty),
            RecordKind::Course => next_numeric_id(&self.courses),
            RecordKind::Room => next_numeric_id(&self.rooms),
        }
    }
}

impl DomainStore for InMemoryStore {
    fn snapshot(&self) -> Result<Snapshot, StoreError> {
        Ok(Snapshot::new(
            self.courses.clone(),
            self.faculty.clone(),
            self.rooms.clone(),
        ))
    }
}
