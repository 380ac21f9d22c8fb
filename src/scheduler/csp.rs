//! Constraint-satisfaction timetable scheduler.
//!
//! # Pipeline
//!
//! 1. Validate the request; malformed input fails the whole run.
//! 2. Run the feasibility pre-check and attach its findings as diagnostics.
//! 3. Build static option domains; courses with an empty domain are
//!    reported right away (`NO_FACULTY`, `NO_COMPATIBLE_ROOM`,
//!    `NO_FREE_SLOT`).
//! 4. Search the remaining courses (see [`search`](super::search)).
//! 5. Assemble the timetable: assignments keyed by course ID, unplaced
//!    courses in input order.
//!
//! The scheduler holds no state between runs and performs no I/O; a
//! [`DomainStore`] is read exactly once per run.

use tracing::{info, warn};

use super::config::SolverConfig;
use super::options::{build_domains, CourseDomain};
use super::request::ScheduleRequest;
use super::search;
use crate::error::SchedulerError;
use crate::feasibility::check_feasibility;
use crate::models::{Assignment, SlotGrid, Timetable, UnplacedCourse, Violation};
use crate::store::DomainStore;
use crate::validation::validate_input;

/// Deterministic constraint-satisfaction scheduler.
///
/// # Example
///
/// ```
/// use campus_timetable::models::{Course, Faculty, Room};
/// use campus_timetable::scheduler::{CspScheduler, ScheduleRequest};
///
/// let request = ScheduleRequest::new(
///     vec![
///         Course::new("1", "CSE101").with_faculty("F1"),
///         Course::new("2", "CSE102").with_faculty("F1"),
///     ],
///     vec![Faculty::new("F1", "Dr. Sharma")],
///     vec![Room::classroom("R1", 60)],
/// );
///
/// let timetable = CspScheduler::new().schedule(&request).unwrap();
/// assert!(timetable.is_complete());
/// assert!(timetable.find_conflicts().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CspScheduler {
    config: SolverConfig,
}

impl CspScheduler {
    /// Creates a scheduler with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scheduler with the given configuration.
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Produces a timetable for the request.
    ///
    /// # Errors
    /// `SchedulerError::Validation` if the request is malformed. Courses
    /// that cannot be placed are never an error; they are listed in
    /// [`Timetable::unplaced`].
    pub fn schedule(&self, request: &ScheduleRequest) -> Result<Timetable, SchedulerError> {
        self.config.validate()?;
        validate_input(
            &request.courses,
            &request.faculty,
            &request.rooms,
            &request.grid,
        )?;

        info!(
            courses = request.courses.len(),
            faculty = request.faculty.len(),
            rooms = request.rooms.len(),
            slots = request.grid.len(),
            "scheduling run started"
        );

        let mut timetable = Timetable::new();

        for issue in check_feasibility(
            &request.courses,
            &request.faculty,
            &request.rooms,
            &request.grid,
        ) {
            let violation = issue.to_violation();
            warn!(excess = issue.excess(), "{}", violation.message);
            timetable.add_violation(violation);
        }

        // Unplaced courses are collected by input position so the report
        // keeps input order regardless of when each failure is found.
        let mut domains: Vec<CourseDomain> = Vec::new();
        let mut results: Vec<Option<UnplacedCourse>> = vec![None; request.courses.len()];
        for (idx, built) in build_domains(request, self.config.capacity_policy)
            .into_iter()
            .enumerate()
        {
            match built {
                Ok(domain) => domains.push(domain),
                Err(unplaced) => results[idx] = Some(unplaced),
            }
        }

        let outcome = search::solve(&domains, &self.config);
        timetable.stats = outcome.stats;

        for (domain, placement) in domains.iter().zip(&outcome.placements) {
            let Some(candidate) = placement else {
                continue;
            };
            let course = &request.courses[domain.course];
            let faculty = &request.faculty[domain.faculty];
            let room = &request.rooms[candidate.room];

            if !candidate.fits {
                timetable.add_violation(Violation::capacity_shortfall(
                    &course.id,
                    format!(
                        "Course '{}' expects {} student(s) but room '{}' seats {}",
                        course.id,
                        course.expected_enrollment.unwrap_or_default(),
                        room.id,
                        room.capacity
                    ),
                ));
            }
            timetable.add_assignment(Assignment::new(
                &course.id,
                &faculty.id,
                &room.id,
                candidate.slot,
            ));
        }

        for (var, reason, message) in outcome.failures {
            let course = &request.courses[domains[var].course];
            results[domains[var].course] = Some(UnplacedCourse::new(&course.id, reason, message));
        }

        for unplaced in results.into_iter().flatten() {
            warn!(
                course = %unplaced.course_id,
                reason = %unplaced.reason,
                "{}",
                unplaced.message
            );
            timetable.add_unplaced(unplaced);
        }

        info!(
            placed = timetable.placed_count(),
            unplaced = timetable.unplaced_count(),
            iterations = timetable.stats.iterations,
            backtracks = timetable.stats.backtracks,
            "scheduling run finished"
        );

        Ok(timetable)
    }

    /// Reads one snapshot from `store` and schedules it on `grid`.
    pub fn schedule_from_store<S: DomainStore + ?Sized>(
        &self,
        store: &S,
        grid: SlotGrid,
    ) -> Result<Timetable, SchedulerError> {
        let request = ScheduleRequest::from_store(store, grid)?;
        self.schedule(&request)
    }
}
