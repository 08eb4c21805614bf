//! Genetic search over timetable assignments.
//!
//! The engine breeds populations of [`Solution`](crate::model::Solution)s
//! against the penalty model in [`crate::fitness`]. One run is driven by
//! [`SearchDriver`]; several independent runs are fanned out by
//! [`crate::multirun`].
//!
//! # Submodules
//!
//! - [`eval`]: parallel evaluation pool (rayon fan-out, retry on failure)
//! - [`operators`]: seeding, crossover, and mutation over assignments
//!
//! # Key Types
//!
//! - [`SearchConfig`]: loop parameters (population, rates, termination)
//! - [`Selection`]: parent selection strategy
//! - [`SearchDriver`] / [`SearchResult`]: the run and its outcome

mod config;
pub mod eval;
pub mod operators;
mod runner;
mod selection;

pub use config::SearchConfig;
pub use runner::{SearchDriver, SearchResult};
pub use selection::Selection;
