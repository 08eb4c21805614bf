//! Domain model for exam timetabling.
//!
//! The model is deliberately small: a [`Roster`] of [`Course`]s sharing
//! students, an [`ExamGrid`] of addressable `(day, slot)` cells, and a
//! [`Solution`] assigning each roster course to at most one cell. All of
//! it is read-only input for the search engine except [`Solution`], which
//! is bred and mutated by the genetic operators.
//!
//! # Types
//!
//! - [`Course`]: code, display name, enrolled students
//! - [`Roster`]: validated, ordered course collection
//! - [`ExamGrid`]: calendar dimensions (`num_days` × `num_slots`)
//! - [`Cell`]: one `(day, slot)` position in the grid
//! - [`Solution`]: per-course placement, `None` = unscheduled
//! - [`ScheduleStats`]: scheduled/unscheduled counts derived from a solution

mod course;
mod grid;
mod solution;

pub use course::{Course, Roster};
pub use grid::{Cell, ExamGrid};
pub use solution::{ScheduleStats, Solution};
