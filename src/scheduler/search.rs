//! Bounded backtracking search over static option domains.
//!
//! # Algorithm
//!
//! 1. Among pending courses, pick the one with the fewest options that are
//!    consistent with current placements (most-constrained variable). Ties
//!    go to the earlier course.
//! 2. If it has a consistent option, place it in the first one.
//! 3. Otherwise try a single-course backtrack: find an option whose only
//!    blocker is one placed course that could move elsewhere. Undo the most
//!    recently placed such blocker, place the stuck course in the freed
//!    option, and return the blocker to the pending set. The blocker may
//!    never return to the option it was displaced from.
//! 4. If no backtrack applies, or the course has used up its backtracks,
//!    report it `NO_FREE_SLOT` and carry on with the others.
//!
//! Every step costs one iteration. When the budget runs out, courses still
//! pending are reported `BUDGET_EXCEEDED`.
//!
//! # Termination
//! Each step places a course, drops a course, or spends one of a course's
//! bounded backtracks, so the search ends even without the iteration cap.
//!
//! # Complexity
//! O(p * o) per step, where p = pending courses and o = options per course.
//!
//! # Reference
//! Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach",
//! Ch. 6.3 (Backtracking Search for CSPs)

use std::collections::{BTreeSet, HashMap};
use std::time::Instant;

use tracing::{debug, warn};

use super::config::SolverConfig;
use super::options::{Candidate, CourseDomain};
use crate::models::{SearchStats, TimeSlot, UnplaceableReason};

/// Result of a search, indexed like the input domains.
#[derive(Debug, Clone)]
pub(crate) struct SearchOutcome {
    /// Chosen option per domain, if placed.
    pub placements: Vec<Option<Candidate>>,
    /// Domains that failed, with reason and detail.
    pub failures: Vec<(usize, UnplaceableReason, String)>,
    pub stats: SearchStats,
}

#[derive(Debug, Clone, Default)]
struct VarState {
    /// (option index, placement sequence number).
    placed: Option<(usize, u64)>,
    /// Options this course was displaced from.
    excluded: BTreeSet<usize>,
    /// Backtracks this course has triggered.
    retries: u32,
}

/// Who holds each (faculty, slot) and (room, slot) pair.
#[derive(Debug, Default)]
struct Occupancy {
    faculty: HashMap<(usize, TimeSlot), usize>,
    room: HashMap<(usize, TimeSlot), usize>,
}

impl Occupancy {
    fn occupy(&mut self, var: usize, faculty: usize, c: &Candidate) {
        self.faculty.insert((faculty, c.slot), var);
        self.room.insert((c.room, c.slot), var);
    }

    fn release(&mut self, faculty: usize, c: &Candidate) {
        self.faculty.remove(&(faculty, c.slot));
        self.room.remove(&(c.room, c.slot));
    }

    /// Courses blocking `c` for a course taught by `faculty`.
    fn blockers(&self, faculty: usize, c: &Candidate) -> (Option<usize>, Option<usize>) {
        (
            self.faculty.get(&(faculty, c.slot)).copied(),
            self.room.get(&(c.room, c.slot)).copied(),
        )
    }

    fn is_free(&self, faculty: usize, c: &Candidate) -> bool {
        self.blockers(faculty, c) == (None, None)
    }
}

struct Search<'a> {
    domains: &'a [CourseDomain],
    config: &'a SolverConfig,
    vars: Vec<VarState>,
    occupancy: Occupancy,
    pending: BTreeSet<usize>,
    seq: u64,
    stats: SearchStats,
}

/// Runs the search over placeable course domains.
pub(crate) fn solve(domains: &[CourseDomain], config: &SolverConfig) -> SearchOutcome {
    let mut search = Search {
        domains,
        config,
        vars: vec![VarState::default(); domains.len()],
        occupancy: Occupancy::default(),
        pending: (0..domains.len()).collect(),
        seq: 0,
        stats: SearchStats::default(),
    };
    search.run()
}

impl Search<'_> {
    fn run(&mut self) -> SearchOutcome {
        let started = Instant::now();
        let deadline = self.config.time_limit();
        let mut failures = Vec::new();

        while !self.pending.is_empty() {
            let out_of_time = deadline.is_some_and(|limit| started.elapsed() >= limit);
            if self.stats.iterations >= self.config.max_iterations || out_of_time {
                self.stats.budget_exhausted = true;
                warn!(
                    iterations = self.stats.iterations,
                    pending = self.pending.len(),
                    out_of_time,
                    "search budget exhausted"
                );
                break;
            }
            self.stats.iterations += 1;

            let Some(var) = self.most_constrained() else {
                break;
            };

            if let Some(opt) = self.first_consistent(var) {
                self.place(var, opt);
                self.pending.remove(&var);
                continue;
            }

            if self.vars[var].retries < self.config.max_backtracks {
                if let Some((blocker, option)) = self.find_backtrack(var) {
                    self.backtrack(var, blocker, option);
                    continue;
                }
            }

            let detail = format!(
                "All {} candidate (slot, room) pair(s) conflict with placed courses",
                self.domains[var].options.len()
            );
            debug!(course = self.domains[var].course, "no free slot");
            failures.push((var, UnplaceableReason::NoFreeSlot, detail));
            self.pending.remove(&var);
        }

        for &var in &self.pending {
            failures.push((
                var,
                UnplaceableReason::BudgetExceeded,
                format!(
                    "Search budget exhausted after {} iteration(s)",
                    self.stats.iterations
                ),
            ));
        }
        failures.sort_by_key(|(var, _, _)| *var);

        SearchOutcome {
            placements: self
                .vars
                .iter()
                .zip(self.domains)
                .map(|(v, d)| v.placed.map(|(opt, _)| d.options[opt]))
                .collect(),
            failures,
            stats: self.stats,
        }
    }

    fn is_consistent(&self, var: usize, opt: usize) -> bool {
        let d = &self.domains[var];
        !self.vars[var].excluded.contains(&opt) && self.occupancy.is_free(d.faculty, &d.options[opt])
    }

    fn consistent_count(&self, var: usize) -> usize {
        (0..self.domains[var].options.len())
            .filter(|&opt| self.is_consistent(var, opt))
            .count()
    }

    /// Pending course with the fewest consistent options; ties by index.
    fn most_constrained(&self) -> Option<usize> {
        self.pending
            .iter()
            .map(|&var| (self.consistent_count(var), var))
            .min()
            .map(|(_, var)| var)
    }

    fn first_consistent(&self, var: usize) -> Option<usize> {
        (0..self.domains[var].options.len()).find(|&opt| self.is_consistent(var, opt))
    }

    fn place(&mut self, var: usize, opt: usize) {
        let d = &self.domains[var];
        let c = d.options[opt];
        self.occupancy.occupy(var, d.faculty, &c);
        self.seq += 1;
        self.vars[var].placed = Some((opt, self.seq));
        debug!(course = d.course, slot = %c.slot, room = c.room, "placed");
    }

    fn unplace(&mut self, var: usize) -> Option<usize> {
        let (opt, _) = self.vars[var].placed.take()?;
        let d = &self.domains[var];
        self.occupancy.release(d.faculty, &d.options[opt]);
        Some(opt)
    }

    /// Finds a (blocker, option) pair such that `option` of `var` is held by
    /// `blocker` alone and `blocker` has somewhere else to go once `var`
    /// takes it. Prefers the most recently placed blocker.
    fn find_backtrack(&self, var: usize) -> Option<(usize, usize)> {
        let d = &self.domains[var];
        let mut best: Option<(u64, usize, usize)> = None;

        for (opt, c) in d.options.iter().enumerate() {
            if self.vars[var].excluded.contains(&opt) {
                continue;
            }
            let blocker = match self.occupancy.blockers(d.faculty, c) {
                (Some(a), Some(b)) if a == b => a,
                (Some(a), None) | (None, Some(a)) => a,
                _ => continue,
            };
            let Some((_, seq)) = self.vars[blocker].placed else {
                continue;
            };
            if best.is_some_and(|(best_seq, _, _)| best_seq >= seq) {
                continue;
            }
            if self.can_relocate(blocker, var, c) {
                best = Some((seq, blocker, opt));
            }
        }

        best.map(|(_, blocker, opt)| (blocker, opt))
    }

    /// Whether `blocker` has another option that stays free after `var`
    /// moves into `taken`.
    fn can_relocate(&self, blocker: usize, var: usize, taken: &Candidate) -> bool {
        let bd = &self.domains[blocker];
        let var_faculty = self.domains[var].faculty;
        let Some((current, _)) = self.vars[blocker].placed else {
            return false;
        };

        bd.options.iter().enumerate().any(|(opt, c)| {
            if opt == current || self.vars[blocker].excluded.contains(&opt) {
                return false;
            }
            let clashes_with_taken = c.slot == taken.slot
                && (bd.faculty == var_faculty || c.room == taken.room);
            if clashes_with_taken {
                return false;
            }
            let (f, r) = self.occupancy.blockers(bd.faculty, c);
            f.map_or(true, |v| v == blocker) && r.map_or(true, |v| v == blocker)
        })
    }

    fn backtrack(&mut self, var: usize, blocker: usize, opt: usize) {
        self.vars[var].retries += 1;
        self.stats.backtracks += 1;

        if let Some(old) = self.unplace(blocker) {
            self.vars[blocker].excluded.insert(old);
        }
        self.place(var, opt);
        self.pending.remove(&var);
        self.pending.insert(blocker);

        debug!(
            course = self.domains[var].course,
            displaced = self.domains[blocker].course,
            "backtracked one course"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Day;

    fn slot(p: usize) -> TimeSlot {
        TimeSlot::new(Day::Monday, p)
    }

    fn cand(p: usize, room: usize) -> Candidate {
        Candidate {
            slot: slot(p),
            room,
            fits: true,
        }
    }

    fn domain(course: usize, faculty: usize, options: Vec<Candidate>) -> CourseDomain {
        CourseDomain {
            course,
            faculty,
            options,
        }
    }

    #[test]
    fn test_empty() {
        let out = solve(&[], &SolverConfig::default());
        assert!(out.placements.is_empty());
        assert!(out.failures.is_empty());
        assert_eq!(out.stats.iterations, 0);
    }

    #[test]
    fn test_places_independent_courses() {
        let domains = vec![
            domain(0, 0, vec![cand(0, 0), cand(1, 0)]),
            domain(1, 1, vec![cand(0, 0), cand(1, 0)]),
        ];
        let out = solve(&domains, &SolverConfig::default());
        assert!(out.failures.is_empty());
        // Both want room 0; they end up in different slots
        let a = out.placements[0].unwrap();
        let b = out.placements[1].unwrap();
        assert_ne!(a.slot, b.slot);
    }

    #[test]
    fn test_most_constrained_first() {
        // Course 1 has a single option that course 0 would take first in
        // input order; MCV places course 1 first instead.
        let domains = vec![
            domain(0, 0, vec![cand(0, 0), cand(1, 0)]),
            domain(1, 1, vec![cand(0, 0)]),
        ];
        let out = solve(&domains, &SolverConfig::default().with_max_backtracks(0));
        assert!(out.failures.is_empty());
        assert_eq!(out.placements[1], Some(cand(0, 0)));
        assert_eq!(out.placements[0], Some(cand(1, 0)));
        assert_eq!(out.stats.backtracks, 0);
    }

    #[test]
    fn test_backtrack_frees_option() {
        // One room, three slots (p0, p1, p2). All courses start with two
        // options, so course 0 takes p0 first; that leaves courses 1 and 2
        // both needing p2. Course 2 must push course 0 over to p1.
        let domains = vec![
            domain(0, 0, vec![cand(0, 0), cand(1, 0)]),
            domain(1, 1, vec![cand(0, 0), cand(2, 0)]),
            domain(2, 2, vec![cand(0, 0), cand(2, 0)]),
        ];
        let out = solve(&domains, &SolverConfig::default());
        assert!(out.failures.is_empty());
        assert_eq!(out.stats.backtracks, 1);
        assert_eq!(out.placements[0], Some(cand(1, 0)));
        assert_eq!(out.placements[1], Some(cand(2, 0)));
        assert_eq!(out.placements[2], Some(cand(0, 0)));
    }

    #[test]
    fn test_backtracking_disabled() {
        let domains = vec![
            domain(0, 0, vec![cand(0, 0), cand(1, 0)]),
            domain(1, 1, vec![cand(0, 0), cand(2, 0)]),
            domain(2, 2, vec![cand(0, 0), cand(2, 0)]),
        ];
        let out = solve(&domains, &SolverConfig::default().with_max_backtracks(0));
        assert_eq!(out.stats.backtracks, 0);
        assert_eq!(out.failures.len(), 1);
        assert_eq!(out.failures[0].0, 2);
        assert_eq!(out.failures[0].1, UnplaceableReason::NoFreeSlot);
    }

    #[test]
    fn test_single_shared_slot() {
        // Same faculty, one slot: exactly one placed, no backtrack possible
        let domains = vec![
            domain(0, 0, vec![cand(0, 0), cand(0, 1)]),
            domain(1, 0, vec![cand(0, 0), cand(0, 1)]),
        ];
        let out = solve(&domains, &SolverConfig::default());
        assert_eq!(out.placements.iter().filter(|p| p.is_some()).count(), 1);
        assert_eq!(out.failures.len(), 1);
        assert_eq!(out.failures[0].1, UnplaceableReason::NoFreeSlot);
        assert_eq!(out.stats.backtracks, 0);
    }

    #[test]
    fn test_zero_budget() {
        let domains = vec![domain(0, 0, vec![cand(0, 0)]), domain(1, 1, vec![cand(1, 0)])];
        let out = solve(&domains, &SolverConfig::default().with_max_iterations(0));
        assert!(out.stats.budget_exhausted);
        assert!(out.placements.iter().all(|p| p.is_none()));
        assert_eq!(out.failures.len(), 2);
        assert!(out
            .failures
            .iter()
            .all(|(_, r, _)| *r == UnplaceableReason::BudgetExceeded));
    }

    #[test]
    fn test_partial_budget() {
        let domains = vec![domain(0, 0, vec![cand(0, 0)]), domain(1, 1, vec![cand(1, 0)])];
        let out = solve(&domains, &SolverConfig::default().with_max_iterations(1));
        assert_eq!(out.placements[0], Some(cand(0, 0)));
        assert_eq!(out.failures.len(), 1);
        assert_eq!(out.failures[0].0, 1);
        assert_eq!(out.failures[0].1, UnplaceableReason::BudgetExceeded);
        assert!(out.failures[0].2.contains("after 1 iteration"));
    }

    #[test]
    fn test_deterministic() {
        let grid: Vec<Candidate> = (0..4)
            .flat_map(|p| (0..2).map(move |r| cand(p, r)))
            .collect();
        let domains: Vec<CourseDomain> =
            (0..6).map(|i| domain(i, i % 2, grid.clone())).collect();
        let a = solve(&domains, &SolverConfig::default());
        let b = solve(&domains, &SolverConfig::default());
        assert_eq!(a.placements, b.placements);
        assert_eq!(a.stats, b.stats);
    }
}
