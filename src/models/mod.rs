//! Campus timetabling domain models.
//!
//! Provides the record types the scheduler consumes and the timetable it
//! produces.
//!
//! # Domain Mappings
//!
//! | campus-timetable | Constraint model |
//! |------------------|------------------|
//! | Course | Variable |
//! | (TimeSlot, Room) | Value |
//! | Faculty / Room availability | Unary constraints |
//! | No double booking | Binary (all-different) constraints |
//! | Timetable | Partial assignment |

mod calendar;
mod course;
mod faculty;
mod room;
mod student;
mod timetable;

pub use calendar::{Availability, Day, Period, SlotGrid, TimeSlot};
pub use course::Course;
pub use faculty::Faculty;
pub use room::{Room, RoomType};
pub use student::Student;
pub use timetable::{
    Assignment, SearchStats, Timetable, UnplaceableReason, UnplacedCourse, Violation,
    ViolationType,
};
