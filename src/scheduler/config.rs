//! Solver configuration.
//!
//! Every field has a default, so a JSON file only needs the keys it
//! overrides:
//!
//! ```json
//! { "max_iterations": 20000, "capacity_policy": "soft" }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::SchedulerError;

/// Default search step budget.
pub const DEFAULT_MAX_ITERATIONS: u64 = 100_000;

/// Default number of single-course backtracks a failing course may trigger.
pub const DEFAULT_MAX_BACKTRACKS: u32 = 8;

/// How room capacity is matched against expected enrollment.
///
/// Courses without an expected enrollment are never capacity-checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityPolicy {
    /// Rooms smaller than the enrollment are not candidates.
    #[default]
    Hard,
    /// Rooms that fit are tried first; smaller rooms are a fallback and
    /// produce a `CapacityShortfall` warning.
    Soft,
}

/// Search limits and constraint policies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Hard cap on search steps. Courses still pending when it is reached
    /// are reported `BUDGET_EXCEEDED`.
    pub max_iterations: u64,
    /// How many times one course may undo another course's placement
    /// before it is reported `NO_FREE_SLOT`.
    pub max_backtracks: u32,
    /// Optional wall-clock limit (ms). Results under a time limit can vary
    /// between machines; leave unset when determinism matters.
    pub time_limit_ms: Option<u64>,
    /// Room capacity policy.
    pub capacity_policy: CapacityPolicy,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_backtracks: DEFAULT_MAX_BACKTRACKS,
            time_limit_ms: None,
            capacity_policy: CapacityPolicy::Hard,
        }
    }
}

impl SolverConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the per-course backtrack limit.
    pub fn with_max_backtracks(mut self, max_backtracks: u32) -> Self {
        self.max_backtracks = max_backtracks;
        self
    }

    /// Sets a wall-clock limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit_ms = Some(limit.as_millis().min(u64::MAX as u128) as u64);
        self
    }

    /// Sets the capacity policy.
    pub fn with_capacity_policy(mut self, policy: CapacityPolicy) -> Self {
        self.capacity_policy = policy;
        self
    }

    /// Wall-clock limit as a `Duration`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }

    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, SchedulerError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SchedulerError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Rejects settings that would make every run fail trivially.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.time_limit_ms == Some(0) {
            return Err(SchedulerError::Config(
                "time_limit_ms must be positive when set".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = SolverConfig::default();
        assert_eq!(c.max_iterations, DEFAULT_MAX_ITERATIONS);
        assert_eq!(c.max_backtracks, DEFAULT_MAX_BACKTRACKS);
        assert_eq!(c.time_limit(), None);
        assert_eq!(c.capacity_policy, CapacityPolicy::Hard);
    }

    #[test]
    fn test_builder() {
        let c = SolverConfig::new()
            .with_max_iterations(10)
            .with_max_backtracks(0)
            .with_time_limit(Duration::from_secs(2))
            .with_capacity_policy(CapacityPolicy::Soft);
        assert_eq!(c.max_iterations, 10);
        assert_eq!(c.max_backtracks, 0);
        assert_eq!(c.time_limit_ms, Some(2000));
        assert_eq!(c.capacity_policy, CapacityPolicy::Soft);
    }

    #[test]
    fn test_partial_json() {
        let c = SolverConfig::from_json(r#"{"max_iterations": 500, "capacity_policy": "soft"}"#)
            .unwrap();
        assert_eq!(c.max_iterations, 500);
        assert_eq!(c.max_backtracks, DEFAULT_MAX_BACKTRACKS);
        assert_eq!(c.capacity_policy, CapacityPolicy::Soft);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = SolverConfig::from_json(r#"{"max_iteration": 5}"#).unwrap_err();
        assert!(matches!(err, SchedulerError::Json(_)));
    }

    #[test]
    fn test_zero_time_limit_rejected() {
        let err = SolverConfig::from_json(r#"{"time_limit_ms": 0}"#).unwrap_err();
        assert!(matches!(err, SchedulerError::Config(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SolverConfig::load(Path::new("/nonexistent/solver.json")).unwrap_err();
        assert!(matches!(err, SchedulerError::Io(_)));
    }
}
