//! The search driver: one complete evolutionary run.
//!
//! [`SearchDriver`] owns the generation loop — seed, evaluate, select,
//! recombine, mutate, repeat — and tracks the best assignment ever
//! observed. Elitism already guarantees the best score never regresses
//! across generations, but the driver tracks the global best explicitly
//! rather than trusting the final population.
//!
//! Termination: best score reaches 0, the generation budget is spent,
//! or the best score stagnates for [`SearchConfig::stagnation_limit`]
//! consecutive generations. Cancellation is checked once per generation
//! boundary; a cancelled run returns its best-so-far with the
//! `cancelled` flag set.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::config::SearchConfig;
use super::eval::evaluate_population;
use super::operators::{crossover, mutate, random_solution};
use crate::error::SearchError;
use crate::model::{ExamGrid, Roster, ScheduleStats, Solution};

/// Result of one search run.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best assignment found during the entire run.
    pub best: Solution,

    /// Penalty of `best`. Re-scoring `best` reproduces this value
    /// exactly — the penalty model is deterministic.
    pub best_fitness: u64,

    /// Number of generations executed (0 if the seed population already
    /// hit a zero score).
    pub generations: usize,

    /// Whether the run stopped because the best score stagnated.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best score after seeding and after each generation; monotonically
    /// non-increasing.
    pub fitness_history: Vec<u64>,

    /// Scheduled/unscheduled counts for `best`, derived by re-scanning
    /// every entry against the grid.
    pub stats: ScheduleStats,
}

/// Executes the evolutionary loop for one run.
///
/// # Usage
///
/// ```
/// use examgrid::ga::{SearchConfig, SearchDriver};
/// use examgrid::model::{Course, ExamGrid, Roster};
///
/// let roster = Roster::new(vec![
///     Course::new("A", "Algorithms", vec!["s1".into()]),
///     Course::new("B", "Databases", vec!["s1".into()]),
/// ])?;
/// let grid = ExamGrid::new(3, 2)?;
/// let config = SearchConfig::default().with_seed(42);
///
/// let result = SearchDriver::run(&roster, grid, &config)?;
/// assert_eq!(result.stats.total_courses, 2);
/// # Ok::<(), examgrid::error::SearchError>(())
/// ```
pub struct SearchDriver;

impl SearchDriver {
    /// Runs one search to termination.
    ///
    /// # Errors
    /// [`SearchError::InvalidConfig`] if the configuration fails
    /// validation. Roster and grid are validated at construction, so by
    /// this point the inputs themselves are known-good.
    pub fn run(
        roster: &Roster,
        grid: ExamGrid,
        config: &SearchConfig,
    ) -> Result<SearchResult, SearchError> {
        Self::run_with_cancel(roster, grid, config, None)
    }

    /// Runs one search with an optional cancellation flag.
    ///
    /// When the flag flips to `true`, the run stops at the next
    /// generation boundary and returns the best solution found so far.
    pub fn run_with_cancel(
        roster: &Roster,
        grid: ExamGrid,
        config: &SearchConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchResult, SearchError> {
        Self::run_with_observer(roster, grid, config, cancel, |_, _| {})
    }

    /// Runs one search, invoking `on_generation(generation, best_score)`
    /// after every completed generation. The hook is the engine's only
    /// observability surface; callers log or report progress from it.
    pub fn run_with_observer(
        roster: &Roster,
        grid: ExamGrid,
        config: &SearchConfig,
        cancel: Option<Arc<AtomicBool>>,
        mut on_generation: impl FnMut(usize, u64),
    ) -> Result<SearchResult, SearchError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let pop_size = config.population_size;
        let mut population: Vec<Solution> = (0..pop_size)
            .map(|_| random_solution(roster.len(), grid, &mut rng))
            .collect();
        let mut scores = evaluate_population(&population, roster, grid, config.parallel);

        let best_idx = lowest(&scores);
        let mut best = population[best_idx].clone();
        let mut best_fitness = scores[best_idx];

        let mut fitness_history = Vec::with_capacity(config.max_generations + 1);
        fitness_history.push(best_fitness);

        let mut generations = 0usize;
        let mut stagnation = 0usize;
        let mut stagnated = false;
        let mut cancelled = false;

        while generations < config.max_generations && best_fitness > 0 {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            // Sort the population best-first so the elite slice is the
            // generation's top performers.
            let mut order: Vec<usize> = (0..pop_size).collect();
            order.sort_by_key(|&i| scores[i]);
            let population_sorted: Vec<Solution> =
                order.iter().map(|&i| population[i].clone()).collect();
            let scores_sorted: Vec<u64> = order.iter().map(|&i| scores[i]).collect();
            population = population_sorted;
            scores = scores_sorted;

            let mut next_gen: Vec<Solution> = population[..config.elite_count].to_vec();
            while next_gen.len() < pop_size {
                let p1 = config.selection.select(&scores, &mut rng);
                let p2 = config.selection.select(&scores, &mut rng);

                let mut child = if rng.random_bool(config.crossover_rate) {
                    crossover(&population[p1], &population[p2], &mut rng)
                } else {
                    population[p1].clone()
                };

                if rng.random_bool(config.mutation_rate) {
                    mutate(&mut child, grid, config.mutation_rate, &mut rng);
                }

                next_gen.push(child);
            }

            // Elites carry their scores over; only offspring are re-scored.
            let offspring_scores = evaluate_population(
                &next_gen[config.elite_count..],
                roster,
                grid,
                config.parallel,
            );
            let mut next_scores = scores[..config.elite_count].to_vec();
            next_scores.extend(offspring_scores);

            population = next_gen;
            scores = next_scores;
            generations += 1;

            let gen_best_idx = lowest(&scores);
            if scores[gen_best_idx] < best_fitness {
                best_fitness = scores[gen_best_idx];
                best = population[gen_best_idx].clone();
                stagnation = 0;
            } else {
                stagnation += 1;
            }

            fitness_history.push(best_fitness);
            on_generation(generations, best_fitness);

            if config.stagnation_limit > 0 && stagnation >= config.stagnation_limit {
                stagnated = true;
                break;
            }
        }

        Ok(SearchResult {
            stats: best.stats(grid),
            best,
            best_fitness,
            generations,
            stagnated,
            cancelled,
            fitness_history,
        })
    }
}

/// Index of the lowest score.
fn lowest(scores: &[u64]) -> usize {
    scores
        .iter()
        .enumerate()
        .min_by_key(|(_, &s)| s)
        .map(|(i, _)| i)
        .expect("population is never empty")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::{score, CONSECUTIVE_PENALTY, UNSCHEDULED_PENALTY};
    use crate::model::Course;

    fn roster(specs: &[(&str, &[&str])]) -> Roster {
        Roster::new(
            specs
                .iter()
                .map(|(code, students)| {
                    Course::new(
                        *code,
                        format!("{code} name"),
                        students.iter().map(|s| s.to_string()).collect(),
                    )
                })
                .collect(),
        )
        .unwrap()
    }

    fn test_config() -> SearchConfig {
        SearchConfig::default()
            .with_population_size(40)
            .with_elite_count(4)
            .with_max_generations(120)
            .with_parallel(false)
            .with_seed(42)
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let r = roster(&[("A", &[])]);
        let grid = ExamGrid::new(1, 1).unwrap();
        let config = SearchConfig::default().with_population_size(1);
        assert!(matches!(
            SearchDriver::run(&r, grid, &config),
            Err(SearchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_single_course_empty_students_converges_to_zero() {
        let r = roster(&[("A", &[])]);
        let grid = ExamGrid::new(1, 1).unwrap();
        let result = SearchDriver::run(&r, grid, &test_config()).unwrap();

        assert_eq!(result.best_fitness, 0);
        assert_eq!(result.stats.total_courses, 1);
        assert_eq!(result.stats.scheduled_courses, 1);
        assert_eq!(result.stats.unscheduled_courses, 0);
    }

    #[test]
    fn test_shared_student_two_slot_grid_reaches_adjacency_floor() {
        // Two courses sharing one student on a 1-day/2-slot grid: the
        // best reachable layout uses both slots and pays one adjacency
        // penalty, which beats both the overlap penalty and leaving a
        // course out.
        let r = roster(&[("A", &["s1"]), ("B", &["s1"])]);
        let grid = ExamGrid::new(1, 2).unwrap();
        let result = SearchDriver::run(&r, grid, &test_config()).unwrap();

        assert_eq!(result.best_fitness, CONSECUTIVE_PENALTY);
        assert_eq!(result.stats.unscheduled_courses, 0);
    }

    #[test]
    fn test_disjoint_courses_reach_zero_on_roomy_grid() {
        let r = roster(&[
            ("A", &["s1", "s2"]),
            ("B", &["s3"]),
            ("C", &["s1", "s4"]),
            ("D", &["s2", "s3"]),
        ]);
        let grid = ExamGrid::new(4, 3).unwrap();
        let result = SearchDriver::run(&r, grid, &test_config()).unwrap();

        assert_eq!(result.best_fitness, 0, "a conflict-free layout exists");
        assert_eq!(result.stats.unscheduled_courses, 0);
    }

    #[test]
    fn test_returned_fitness_matches_rescoring_best() {
        let r = roster(&[("A", &["s1", "s2"]), ("B", &["s1"]), ("C", &["s2"])]);
        let grid = ExamGrid::new(2, 2).unwrap();
        let result = SearchDriver::run(&r, grid, &test_config()).unwrap();

        assert_eq!(score(&result.best, &r, grid), result.best_fitness);
    }

    #[test]
    fn test_fitness_history_is_monotone_non_increasing() {
        let r = roster(&[
            ("A", &["s1", "s2"]),
            ("B", &["s2", "s3"]),
            ("C", &["s1", "s3"]),
            ("D", &["s4"]),
            ("E", &["s1", "s4"]),
        ]);
        let grid = ExamGrid::new(2, 2).unwrap();
        let result = SearchDriver::run(&r, grid, &test_config()).unwrap();

        for window in result.fitness_history.windows(2) {
            assert!(
                window[1] <= window[0],
                "best score regressed: {} -> {}",
                window[0],
                window[1]
            );
        }
    }

    #[test]
    fn test_every_course_keeps_an_entry() {
        let r = roster(&[("A", &["s1"]), ("B", &["s1"]), ("C", &["s1"])]);
        let grid = ExamGrid::new(1, 1).unwrap();
        let result = SearchDriver::run(&r, grid, &test_config()).unwrap();

        // The grid cannot host three clashing courses cleanly, but the
        // solution still carries all three entries.
        assert_eq!(result.best.len(), 3);
        assert_eq!(result.stats.total_courses, 3);
    }

    #[test]
    fn test_stagnation_termination() {
        // A single cell and a hopeless clash: the score floor is hit
        // immediately and the run should stop on stagnation, well short
        // of the generation budget.
        let r = roster(&[("A", &["s1"]), ("B", &["s1"])]);
        let grid = ExamGrid::new(1, 1).unwrap();
        let config = test_config()
            .with_max_generations(10_000)
            .with_stagnation_limit(10);
        let result = SearchDriver::run(&r, grid, &config).unwrap();

        assert!(result.stagnated);
        assert!(result.generations < 10_000);
    }

    #[test]
    fn test_cancellation_stops_at_generation_boundary() {
        let r = roster(&[("A", &["s1"]), ("B", &["s1"])]);
        let grid = ExamGrid::new(1, 1).unwrap();
        let config = test_config()
            .with_max_generations(1_000_000)
            .with_stagnation_limit(0);

        let cancel = Arc::new(AtomicBool::new(false));
        let flag = cancel.clone();
        let handle = std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(10));
            flag.store(true, Ordering::Relaxed);
        });

        let result =
            SearchDriver::run_with_cancel(&r, grid, &config, Some(cancel)).unwrap();
        handle.join().unwrap();

        assert!(result.cancelled);
        assert!(result.generations < 1_000_000);
    }

    #[test]
    fn test_observer_sees_every_generation() {
        let r = roster(&[("A", &["s1"]), ("B", &["s1"])]);
        let grid = ExamGrid::new(1, 1).unwrap();
        let config = test_config()
            .with_max_generations(25)
            .with_stagnation_limit(0);

        let mut seen = Vec::new();
        let result = SearchDriver::run_with_observer(&r, grid, &config, None, |gen, fit| {
            seen.push((gen, fit))
        })
        .unwrap();

        assert_eq!(seen.len(), result.generations);
        assert_eq!(seen.first().map(|&(g, _)| g), Some(1));
        // Observed scores mirror the history tail.
        for (i, &(_, fit)) in seen.iter().enumerate() {
            assert_eq!(fit, result.fitness_history[i + 1]);
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let r = roster(&[("A", &["s1", "s2"]), ("B", &["s2"]), ("C", &["s1"])]);
        let grid = ExamGrid::new(3, 2).unwrap();
        let config = test_config();

        let a = SearchDriver::run(&r, grid, &config).unwrap();
        let b = SearchDriver::run(&r, grid, &config).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.best_fitness, b.best_fitness);
        assert_eq!(a.fitness_history, b.fitness_history);
    }

    #[test]
    fn test_worst_case_score_bound() {
        let r = roster(&[("A", &["s1"]), ("B", &["s2"])]);
        let grid = ExamGrid::new(2, 2).unwrap();
        let result = SearchDriver::run(&r, grid, &test_config()).unwrap();
        assert!(result.best_fitness <= 2 * UNSCHEDULED_PENALTY);
    }
}
