//! Exam timetable search engine.
//!
//! Places a roster of courses into a day/slot exam grid by minimizing an
//! additive penalty score with a genetic search:
//!
//! - **Model** ([`model`]): courses, the exam grid, and candidate
//!   assignments (one optional cell per course).
//! - **Penalty model** ([`fitness`]): pure, deterministic scoring —
//!   unscheduled courses, same-cell student overlaps, and per-student
//!   daily load (overload, back-to-back slots, day-boundary pairs).
//! - **Search** ([`ga`]): population seeding, tournament/rank selection,
//!   preference-aware crossover, step-or-jump mutation, elitism, and a
//!   driver with stagnation- and cancellation-aware termination.
//! - **Candidates** ([`multirun`]): several independent runs on scoped
//!   threads, one alternative timetable each.
//! - **Presentation** ([`timetable`]): expansion of the best assignment
//!   into a date-keyed, 1-based-slot timetable ready to serialize.
//!
//! # Quick Start
//!
//! ```
//! use examgrid::ga::SearchConfig;
//! use examgrid::model::Course;
//! use examgrid::timetable::generate;
//!
//! let courses = vec![
//!     Course::new("MATH101", "Calculus", vec!["alice".into(), "bob".into()]),
//!     Course::new("PHYS101", "Mechanics", vec!["bob".into()]),
//!     Course::new("CHEM101", "Chemistry", vec!["alice".into()]),
//! ];
//! let dates = vec!["2025-03-10".to_string(), "2025-03-11".to_string()];
//! let config = SearchConfig::default().with_seed(42);
//!
//! let result = generate(&courses, &dates, 2, &config)?;
//! assert_eq!(result.stats.total_courses, 3);
//! # Ok::<(), examgrid::error::SearchError>(())
//! ```
//!
//! A score of 0 means conflict-free; a positive score is still a valid
//! answer — the best layout the search found, with its conflicts
//! quantified.

pub mod error;
pub mod fitness;
pub mod ga;
pub mod model;
pub mod multirun;
pub mod timetable;

pub use error::SearchError;
pub use ga::{SearchConfig, SearchDriver, SearchResult, Selection};
pub use model::{Course, ExamGrid, Roster, Solution};
pub use timetable::{generate, generate_candidates, GeneratedTimetable};
