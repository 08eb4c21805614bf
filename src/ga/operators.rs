//! Genetic operators over timetable assignments.
//!
//! Seeding, crossover, and mutation all preserve the structural
//! invariant that a [`Solution`] carries exactly one entry per roster
//! course, and only ever produce in-bounds cells or the unscheduled
//! sentinel. Grid legality beyond that — overlaps, day load, adjacency —
//! is the penalty model's business, not the operators'.

use rand::Rng;

use crate::model::{Cell, ExamGrid, Solution};

/// Chance that mutation re-places an unscheduled course into the grid.
const RESCHEDULE_PROB: f64 = 0.8;

/// Chance that mutation moves a scheduled course instead of dropping it
/// back to unscheduled.
const KEEP_SCHEDULED_PROB: f64 = 0.95;

/// Crossover bias towards the first parent when both genes are
/// equally (un)scheduled.
const FIRST_PARENT_BIAS: f64 = 0.55;

/// Draws one random in-bounds cell.
fn random_cell<R: Rng>(grid: ExamGrid, rng: &mut R) -> Cell {
    Cell::new(
        rng.random_range(0..grid.num_days),
        rng.random_range(0..grid.num_slots),
    )
}

/// Creates one seed solution with every course placed uniformly at
/// random across the grid.
///
/// Placement is not injective: several courses may share a cell, which
/// is exactly what the overlap penalty discourages when their students
/// intersect. Repeated calls with independently advanced RNG state
/// produce the diverse initial population.
pub fn random_solution<R: Rng>(course_count: usize, grid: ExamGrid, rng: &mut R) -> Solution {
    let cells = (0..course_count)
        .map(|_| Some(random_cell(grid, rng)))
        .collect();
    Solution::from_cells(cells)
}

/// Recombines two parents into one child, gene by gene.
///
/// A scheduled gene always beats an unscheduled one; when both sides
/// agree on scheduledness the gene comes from `parent1` with a slight
/// bias. The child contains every course exactly once by construction.
///
/// # Panics
/// Panics if the parents differ in length.
pub fn crossover<R: Rng>(parent1: &Solution, parent2: &Solution, rng: &mut R) -> Solution {
    assert_eq!(
        parent1.len(),
        parent2.len(),
        "parents must cover the same roster"
    );

    let cells = (0..parent1.len())
        .map(|i| {
            let a = parent1.get(i);
            let b = parent2.get(i);
            match (a, b) {
                (None, Some(_)) => b,
                (Some(_), None) => a,
                _ => {
                    if rng.random_bool(FIRST_PARENT_BIAS) {
                        a
                    } else {
                        b
                    }
                }
            }
        })
        .collect();
    Solution::from_cells(cells)
}

/// Mutates a solution in place at one or two random courses.
///
/// An unscheduled course is re-placed with probability
/// [`RESCHEDULE_PROB`]. A scheduled course is usually moved — globally
/// with probability `strength`, otherwise by a ±1 day/slot step with
/// wraparound — and occasionally dropped to unscheduled, which keeps
/// "leave this course out" reachable by the search.
pub fn mutate<R: Rng>(solution: &mut Solution, grid: ExamGrid, strength: f64, rng: &mut R) {
    if solution.is_empty() {
        return;
    }

    let points = rng.random_range(0..3usize).max(1);
    for _ in 0..points {
        let idx = rng.random_range(0..solution.len());
        match solution.get(idx) {
            None => {
                if rng.random_bool(RESCHEDULE_PROB) {
                    solution.set(idx, Some(random_cell(grid, rng)));
                }
            }
            Some(cell) => {
                if rng.random_bool(KEEP_SCHEDULED_PROB) {
                    let next = if rng.random_bool(strength.clamp(0.0, 1.0)) {
                        random_cell(grid, rng)
                    } else {
                        local_step(cell, grid, rng)
                    };
                    solution.set(idx, Some(next));
                } else {
                    solution.set(idx, None);
                }
            }
        }
    }
}

/// Steps a cell by -1/0/+1 in each dimension, wrapping at the grid edge.
fn local_step<R: Rng>(cell: Cell, grid: ExamGrid, rng: &mut R) -> Cell {
    let day_step = rng.random_range(0..3usize);
    let slot_step = rng.random_range(0..3usize);
    Cell::new(
        (cell.day + grid.num_days + day_step - 1) % grid.num_days,
        (cell.slot + grid.num_slots + slot_step - 1) % grid.num_slots,
    )
}
