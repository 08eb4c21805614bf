//! Parallel evaluation pool.
//!
//! Fans one generation's population out across rayon workers and
//! collects one score per individual, in population order. Evaluation
//! order never affects the result: the penalty model is pure, so scores
//! commute and a failed evaluation can simply be retried with the same
//! input. An individual whose evaluation keeps failing is assigned the
//! worst possible score (every course unscheduled) instead of aborting
//! the generation.

use rayon::prelude::*;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::fitness::{score, worst_score};
use crate::model::{ExamGrid, Roster, Solution};

/// Attempts per individual before falling back to the worst score.
const EVAL_ATTEMPTS: usize = 2;

/// Scores every individual of `population`, one result per individual
/// in the same order.
///
/// With `parallel` set, evaluation fans out over the global rayon pool
/// and blocks until the whole generation is scored; otherwise it runs
/// sequentially on the caller's thread (useful for deterministic tests
/// and tiny populations).
pub fn evaluate_population(
    population: &[Solution],
    roster: &Roster,
    grid: ExamGrid,
    parallel: bool,
) -> Vec<u64> {
    if parallel {
        population
            .par_iter()
            .map(|sol| evaluate_one(sol, roster, grid))
            .collect()
    } else {
        population
            .iter()
            .map(|sol| evaluate_one(sol, roster, grid))
            .collect()
    }
}

/// Scores one individual, retrying a panicking evaluation before
/// falling back to [`worst_score`].
fn evaluate_one(solution: &Solution, roster: &Roster, grid: ExamGrid) -> u64 {
    for _ in 0..EVAL_ATTEMPTS {
        let result = catch_unwind(AssertUnwindSafe(|| score(solution, roster, grid)));
        if let Ok(fitness) = result {
            return fitness;
        }
    }
    worst_score(roster.len())
}
