//! Search configuration.
//!
//! [`SearchConfig`] holds every parameter of the evolutionary loop. The
//! defaults reproduce the production engine's tuning; all of them are
//! explicit here rather than buried in the driver.

use super::selection::Selection;
use crate::error::SearchError;

/// Parameters controlling one search run.
///
/// # Defaults
///
/// ```
/// use examgrid::ga::SearchConfig;
///
/// let config = SearchConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 200);
/// assert_eq!(config.elite_count, 10);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use examgrid::ga::{SearchConfig, Selection};
///
/// let config = SearchConfig::default()
///     .with_population_size(200)
///     .with_selection(Selection::Tournament(7))
///     .with_mutation_rate(0.3)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Number of candidate solutions evaluated together each generation.
    pub population_size: usize,

    /// Maximum number of generations before termination.
    pub max_generations: usize,

    /// Selection strategy for choosing parents.
    pub selection: Selection,

    /// Number of best individuals copied unchanged into the next
    /// generation. Guarantees the best-known score never regresses.
    pub elite_count: usize,

    /// Probability of recombining two parents instead of cloning one
    /// (0.0–1.0).
    pub crossover_rate: f64,

    /// Probability of mutating an offspring (0.0–1.0). Also used as the
    /// mutation strength: the share of mutations that re-place a course
    /// anywhere in the grid rather than stepping to a neighboring cell.
    pub mutation_rate: f64,

    /// Generations without improvement of the best score before the run
    /// stops. 0 disables stagnation-based termination.
    pub stagnation_limit: usize,

    /// Whether to score individuals in parallel across rayon workers.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` draws a fresh seed.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 200,
            selection: Selection::default(),
            elite_count: 10,
            crossover_rate: 0.9,
            mutation_rate: 0.5,
            stagnation_limit: 40,
            parallel: true,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Sets the number of elites preserved each generation.
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`SearchError::InvalidConfig`] with a description of the first
    /// offending parameter.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.population_size < 2 {
            return Err(SearchError::InvalidConfig(
                "population_size must be at least 2".into(),
            ));
        }
        if self.max_generations == 0 {
            return Err(SearchError::InvalidConfig(
                "max_generations must be at least 1".into(),
            ));
        }
        if self.elite_count >= self.population_size {
            return Err(SearchError::InvalidConfig(
                "elite_count must be smaller than population_size".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(SearchError::InvalidConfig(
                "crossover_rate must be within 0.0..=1.0".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(SearchError::InvalidConfig(
                "mutation_rate must be within 0.0..=1.0".into(),
            ));
        }
        Ok(())
    }
}
