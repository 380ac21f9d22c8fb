//! Constraint-satisfaction scheduler and timetable KPIs.
//!
//! # Algorithm
//!
//! `CspScheduler` treats every course as a variable whose domain is the set
//! of (slot, room) pairs allowed by the unary constraints. The search picks
//! the most constrained course first (fewest consistent options, ties by
//! input order), gives it the first consistent option, and on a dead end
//! displaces a single blocking course. Each course may be displaced a
//! bounded number of times, so the search always terminates.
//!
//! Two runs over the same input produce the same timetable unless a wall
//! clock limit is configured.
//!
//! # KPI
//!
//! `TimetableKpi` computes placement rate, room utilization, faculty load
//! and the busiest day of a finished timetable.
//!
//! # References
//!
//! - Russell & Norvig (2021), "Artificial Intelligence: A Modern Approach", Ch. 6
//! - Schaerf (1999), "A Survey of Automated Timetabling"

mod config;
mod csp;
mod kpi;
mod options;
mod request;
mod search;

pub use config::{CapacityPolicy, SolverConfig, DEFAULT_MAX_BACKTRACKS, DEFAULT_MAX_ITERATIONS};
pub use csp::CspScheduler;
pub use kpi::TimetableKpi;
pub use request::ScheduleRequest;
