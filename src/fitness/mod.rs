//! The penalty (fitness) model for candidate timetables.
//!
//! [`score`] is a pure function from one [`Solution`] plus the read-only
//! roster/grid context to a non-negative integer penalty. Lower is
//! better; zero means no detected violation. The function is fully
//! deterministic, which is what lets the evaluation pool fan a whole
//! population out across rayon workers and retry a failed evaluation
//! with the same input.
//!
//! # Penalty table
//!
//! | Violation | Penalty |
//! |---|---|
//! | Course unscheduled or placed out of grid bounds | 75 000 each |
//! | Student already present in the same `(day, slot)` cell | 15 000 per occurrence |
//! | Student with more than 2 exams on one day | 100 × (count − 2) |
//! | Student with exams in adjacent slots of one day | 50 per adjacent pair |
//! | Student in the last slot of day *d* and the first slot of day *d + 1* | 50 |
//!
//! Penalties accumulate additively in a single pass over the solution
//! plus one pass over the per-student day/slot occupancy it induces.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::model::{ExamGrid, Roster, Solution};

/// Penalty for a course left unscheduled or placed outside the grid.
pub const UNSCHEDULED_PENALTY: u64 = 75_000;

/// Penalty per student found already occupying the target cell.
pub const OVERLAP_PENALTY: u64 = 15_000;

/// Penalty per adjacent-slot exam pair (same day or across midnight).
pub const CONSECUTIVE_PENALTY: u64 = 50;

/// Penalty per exam beyond the second on one student's day.
pub const MULTIPLE_EXAMS_PENALTY: u64 = 100;

/// The worst score a solution of `course_count` courses can be assigned:
/// every course unscheduled. Used by the evaluation pool when an
/// evaluation keeps failing after retry.
pub fn worst_score(course_count: usize) -> u64 {
    course_count as u64 * UNSCHEDULED_PENALTY
}

/// Scores one candidate assignment against the roster and grid.
///
/// Courses that are unscheduled or out of bounds take the flat penalty
/// and are excluded from overlap and day-load accounting. A course with
/// no students contributes nothing beyond its own placement penalty.
pub fn score(solution: &Solution, roster: &Roster, grid: ExamGrid) -> u64 {
    debug_assert_eq!(
        solution.len(),
        roster.len(),
        "solution must carry one entry per roster course"
    );

    let unplaced = solution
        .iter()
        .filter(|c| !matches!(c, Some(c) if grid.contains(*c)))
        .count() as u64;
    let mut penalty = unplaced * UNSCHEDULED_PENALTY;

    // Per-cell occupancy for same-slot overlap, and per-student occupied
    // slots per day. BTreeSet keeps each day's slots sorted for the
    // adjacency scan.
    let mut cell_students: HashMap<(usize, usize), HashSet<&str>> = HashMap::new();
    let mut student_days: HashMap<&str, BTreeMap<usize, BTreeSet<usize>>> = HashMap::new();

    for (idx, course) in roster.iter() {
        let cell = match solution.get(idx) {
            Some(c) if grid.contains(c) => c,
            _ => continue,
        };
        for student in &course.students {
            let occupants = cell_students.entry((cell.day, cell.slot)).or_default();
            if !occupants.insert(student) {
                penalty += OVERLAP_PENALTY;
            }
            student_days
                .entry(student)
                .or_default()
                .entry(cell.day)
                .or_default()
                .insert(cell.slot);
        }
    }

    for day_map in student_days.values() {
        for (&day, slots) in day_map {
            if slots.len() > 2 {
                penalty += MULTIPLE_EXAMS_PENALTY * (slots.len() as u64 - 2);
            }

            let mut prev: Option<usize> = None;
            for &slot in slots {
                if let Some(p) = prev {
                    if slot - p == 1 {
                        penalty += CONSECUTIVE_PENALTY;
                    }
                }
                prev = Some(slot);
            }

            if let Some(next_day) = day_map.get(&(day + 1)) {
                if slots.contains(&(grid.num_slots - 1)) && next_day.contains(&0) {
                    penalty += CONSECUTIVE_PENALTY;
                }
            }
        }
    }

    penalty
}
