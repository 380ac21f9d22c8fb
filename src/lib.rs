//! Campus timetable scheduling.
//!
//! Assigns each course a weekly time slot and a room such that no faculty
//! member or room is double-booked, every booking falls inside the
//! availability of its faculty member and room, and every room matches the
//! course's room type and capacity needs. Courses that cannot be placed are
//! reported with a reason code instead of failing the run.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Course`, `Faculty`, `Room`, `Student`,
//!   `TimeSlot`, `SlotGrid`, `Availability`, `Timetable`
//! - **`store`**: `DomainStore` port and the `InMemoryStore` adapter
//! - **`validation`**: Input integrity checks (duplicate IDs, missing
//!   faculty references, capacities, grid shape)
//! - **`feasibility`**: Counting pre-check for overloaded faculty and rooms
//! - **`scheduler`**: `CspScheduler`, its configuration, and `TimetableKpi`
//! - **`error`**: Crate-level error type
//!
//! # Example
//!
//! ```
//! use campus_timetable::models::SlotGrid;
//! use campus_timetable::scheduler::CspScheduler;
//! use campus_timetable::store::InMemoryStore;
//!
//! let store = InMemoryStore::with_sample_data();
//! let timetable = CspScheduler::new()
//!     .schedule_from_store(&store, SlotGrid::weekly_default())
//!     .unwrap();
//! assert!(timetable.is_complete());
//! ```
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"

pub mod error;
pub mod feasibility;
pub mod models;
pub mod scheduler;
pub mod store;
pub mod validation;

pub use error::SchedulerError;
