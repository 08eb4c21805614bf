//! The exam calendar grid and its addressable cells.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Dimensions of the exam calendar: `num_days` × `num_slots` cells.
///
/// Fixed for the duration of one search. Days and slots are 0-based
/// indices; the mapping to concrete dates and slot labels belongs to the
/// presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamGrid {
    /// Number of exam days.
    pub num_days: usize,
    /// Number of slots per day.
    pub num_slots: usize,
}

impl ExamGrid {
    /// Creates a grid, rejecting zero-sized dimensions.
    ///
    /// # Errors
    /// [`SearchError::EmptyGrid`] if either dimension is zero.
    pub fn new(num_days: usize, num_slots: usize) -> Result<Self, SearchError> {
        if num_days == 0 || num_slots == 0 {
            return Err(SearchError::EmptyGrid {
                num_days,
                num_slots,
            });
        }
        Ok(Self {
            num_days,
            num_slots,
        })
    }

    /// Total number of addressable cells.
    pub fn cell_count(&self) -> usize {
        self.num_days * self.num_slots
    }

    /// Whether `cell` lies within the grid bounds.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.day < self.num_days && cell.slot < self.num_slots
    }
}

/// One `(day, slot)` position in the exam grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// 0-based day index.
    pub day: usize,
    /// 0-based slot index within the day.
    pub slot: usize,
}

impl Cell {
    /// Creates a cell.
    pub fn new(day: usize, slot: usize) -> Self {
        Self { day, slot }
    }
}
