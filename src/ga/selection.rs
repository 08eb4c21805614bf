//! Parent selection over an evaluated population.
//!
//! Selection operates on the score vector produced by the evaluation
//! pool: candidates are addressed by population index and lower scores
//! are better. Both strategies keep selection pressure bounded so a
//! population of size > 1 is never reduced to drawing from a single
//! individual.

use rand::Rng;

/// Selection strategy for choosing parents.
///
/// All strategies assume **minimization** (lower score = better).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Tournament selection: sample `k` individuals uniformly at random,
    /// pick the one with the lowest score.
    ///
    /// Higher `k` means stronger selection pressure. `k` is clamped to
    /// at least 1; with `k = 1` the choice is uniform.
    Tournament(usize),

    /// Rank-based selection with linear weights.
    ///
    /// Individuals are ranked by score and drawn with probability
    /// proportional to `n - rank`, which keeps pressure stable even
    /// when absolute penalties differ by orders of magnitude (a single
    /// unscheduled course dwarfs every comfort penalty).
    Rank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(5)
    }
}

impl Selection {
    /// Selects a population index given the generation's scores.
    ///
    /// # Panics
    /// Panics if `scores` is empty.
    pub fn select<R: Rng>(&self, scores: &[u64], rng: &mut R) -> usize {
        assert!(!scores.is_empty(), "cannot select from empty population");

        match self {
            Selection::Tournament(k) => tournament(scores, *k, rng),
            Selection::Rank => rank(scores, rng),
        }
    }
}

/// Tournament selection: best of `k` uniform samples.
fn tournament<R: Rng>(scores: &[u64], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = scores.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if scores[idx] < scores[best_idx] {
            best_idx = idx;
        }
    }
    best_idx
}

/// Linear rank selection: weight `n - rank` for the rank-th best.
fn rank<R: Rng>(scores: &[u64], rng: &mut R) -> usize {
    let n = scores.len();
    if n == 1 {
        return 0;
    }

    let mut indexed: Vec<usize> = (0..n).collect();
    indexed.sort_by_key(|&i| scores[i]);

    let total = (n * (n + 1) / 2) as f64;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;

    for (rank_pos, &original_idx) in indexed.iter().enumerate() {
        cumulative += (n - rank_pos) as f64;
        if cumulative > threshold {
            return original_idx;
        }
    }

    // floating-point fallback
    *indexed.last().expect("population has n >= 2 elements")
}
