//! Candidate timetable assignments.

use serde::{Deserialize, Serialize};

use super::grid::{Cell, ExamGrid};

/// A complete candidate assignment: one placement per roster course.
///
/// Entries are index-aligned with the [`Roster`](crate::model::Roster)
/// ordering. `None` marks an unscheduled course. An out-of-bounds `Some`
/// cell can arise when a solution is scored against a smaller grid than
/// it was bred for; scoring and statistics treat it exactly like
/// unscheduled.
///
/// Every course always has exactly one entry — the engine never drops a
/// course from a solution, scheduled or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    cells: Vec<Option<Cell>>,
}

impl Solution {
    /// A solution with every course unscheduled.
    pub fn unscheduled(course_count: usize) -> Self {
        Self {
            cells: vec![None; course_count],
        }
    }

    /// Builds a solution from explicit placements.
    pub fn from_cells(cells: Vec<Option<Cell>>) -> Self {
        Self { cells }
    }

    /// Number of entries (equals the roster course count).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the solution covers zero courses.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The placement of the course at roster index `idx`.
    ///
    /// # Panics
    /// Panics if `idx` is out of range.
    pub fn get(&self, idx: usize) -> Option<Cell> {
        self.cells[idx]
    }

    /// Replaces the placement of the course at roster index `idx`.
    ///
    /// # Panics
    /// Panics if `idx` is out of range.
    pub fn set(&mut self, idx: usize, cell: Option<Cell>) {
        self.cells[idx] = cell;
    }

    /// Iterates placements in roster order.
    pub fn iter(&self) -> impl Iterator<Item = Option<Cell>> + '_ {
        self.cells.iter().copied()
    }

    /// Whether the entry at `idx` is placed inside `grid`.
    pub fn is_scheduled(&self, idx: usize, grid: ExamGrid) -> bool {
        matches!(self.cells[idx], Some(c) if grid.contains(c))
    }

    /// Derives scheduling statistics by re-scanning every entry.
    pub fn stats(&self, grid: ExamGrid) -> ScheduleStats {
        let scheduled = self
            .cells
            .iter()
            .filter(|c| matches!(c, Some(c) if grid.contains(*c)))
            .count();
        ScheduleStats {
            total_courses: self.cells.len(),
            scheduled_courses: scheduled,
            unscheduled_courses: self.cells.len() - scheduled,
        }
    }
}

/// Scheduled/unscheduled course counts for one solution.
///
/// Surfaced to callers so a human can judge schedule quality together
/// with the fitness value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleStats {
    /// Courses in the roster.
    pub total_courses: usize,
    /// Courses placed inside the grid.
    pub scheduled_courses: usize,
    /// Courses left unscheduled or placed out of bounds.
    pub unscheduled_courses: usize,
}
