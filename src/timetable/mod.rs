//! Presentation surface: from best assignment to renderable timetable.
//!
//! The search works on index-aligned [`Solution`]s; callers want a
//! nested map keyed by date label and slot number, ready to serialize
//! and render. [`generate`] runs one search and expands its best
//! assignment; [`generate_candidates`] fans out several independent
//! runs and returns the alternatives best-first.
//!
//! Slot numbers are 1-based in the output — the engine's 0-based slot
//! indices are an internal detail.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::error::SearchError;
use crate::ga::{SearchConfig, SearchDriver};
use crate::model::{Course, ExamGrid, Roster, Solution};
use crate::multirun::run_candidates;

/// One exam as it appears in a timetable cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledCourse {
    pub code: String,
    pub name: String,
    pub students: Vec<String>,
}

/// Exam count for one slot of one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotUsage {
    /// 1-based slot number.
    pub slot: usize,
    /// Number of exams placed in the slot.
    pub count: usize,
}

/// Per-slot exam counts for one day, in input date order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayUtilization {
    pub day: String,
    pub slots: Vec<SlotUsage>,
}

/// Summary statistics for a generated timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableStats {
    pub total_courses: usize,
    pub scheduled_courses: usize,
    pub unscheduled_courses: usize,
    pub num_days: usize,
    pub num_slots: usize,
    pub slot_utilization: Vec<DayUtilization>,
}

/// A fully expanded timetable with its score and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedTimetable {
    /// Date label → 1-based slot number → exams in that cell. Every
    /// date/slot combination is present, empty cells included, so
    /// renderers never have to special-case missing keys.
    pub timetable: BTreeMap<String, BTreeMap<usize, Vec<ScheduledCourse>>>,
    pub stats: TimetableStats,
    /// Penalty of the underlying assignment; 0 means conflict-free.
    pub fitness: u64,
}

/// Runs one search and expands the best assignment into a timetable.
///
/// `dates` carries one caller-formatted label per exam day; the grid is
/// `dates.len() × slots_per_day`.
///
/// # Errors
/// [`SearchError::EmptyRoster`] / [`SearchError::DuplicateCourseCode`]
/// for bad course input, [`SearchError::EmptyGrid`] when `dates` is
/// empty or `slots_per_day` is 0, [`SearchError::InvalidConfig`] for a
/// bad configuration. A positive final fitness is not an error: the
/// caller gets the best timetable found, conflicts and all.
///
/// # Usage
///
/// ```
/// use examgrid::ga::SearchConfig;
/// use examgrid::model::Course;
/// use examgrid::timetable::generate;
///
/// let courses = vec![
///     Course::new("MATH101", "Calculus", vec!["alice".into()]),
///     Course::new("PHYS101", "Mechanics", vec!["bob".into()]),
/// ];
/// let dates = vec!["2025-03-10".to_string(), "2025-03-11".to_string()];
/// let config = SearchConfig::default().with_seed(7);
///
/// let result = generate(&courses, &dates, 2, &config)?;
/// assert_eq!(result.stats.total_courses, 2);
/// assert_eq!(result.timetable.len(), 2);
/// # Ok::<(), examgrid::error::SearchError>(())
/// ```
pub fn generate(
    courses: &[Course],
    dates: &[String],
    slots_per_day: usize,
    config: &SearchConfig,
) -> Result<GeneratedTimetable, SearchError> {
    let roster = Roster::new(courses.to_vec())?;
    let grid = ExamGrid::new(dates.len(), slots_per_day)?;
    let result = SearchDriver::run(&roster, grid, config)?;
    Ok(expand(&result.best, result.best_fitness, &roster, grid, dates))
}

/// Runs `runs` independent searches and returns every successful
/// timetable, ordered best-first (lowest fitness first).
///
/// Runs that failed are dropped from the output; if every run failed,
/// the first failure is returned as the error. The product default is
/// [`crate::multirun::DEFAULT_RUNS`] candidates per request.
///
/// # Errors
/// Input and configuration errors as for [`generate`], checked before
/// any run starts; otherwise the first per-run failure when no run
/// produced a timetable.
pub fn generate_candidates(
    courses: &[Course],
    dates: &[String],
    slots_per_day: usize,
    config: &SearchConfig,
    runs: usize,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<Vec<GeneratedTimetable>, SearchError> {
    let roster = Roster::new(courses.to_vec())?;
    let grid = ExamGrid::new(dates.len(), slots_per_day)?;

    let outcomes = run_candidates(&roster, grid, config, runs, cancel)?;

    let mut first_failure = None;
    let mut candidates = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match outcome.result {
            Ok(result) => candidates.push(expand(
                &result.best,
                result.best_fitness,
                &roster,
                grid,
                dates,
            )),
            Err(err) => {
                if first_failure.is_none() {
                    first_failure = Some(err);
                }
            }
        }
    }

    if candidates.is_empty() {
        if let Some(err) = first_failure {
            return Err(err);
        }
    }
    candidates.sort_by_key(|c| c.fitness);
    Ok(candidates)
}

/// Expands an assignment into the nested date/slot map plus statistics.
///
/// Unscheduled and out-of-bounds entries are counted in the stats but
/// do not appear in the map.
fn expand(
    solution: &Solution,
    fitness: u64,
    roster: &Roster,
    grid: ExamGrid,
    dates: &[String],
) -> GeneratedTimetable {
    let mut timetable: BTreeMap<String, BTreeMap<usize, Vec<ScheduledCourse>>> =
        BTreeMap::new();
    for date in dates {
        let day = timetable.entry(date.clone()).or_default();
        for slot in 1..=grid.num_slots {
            day.entry(slot).or_default();
        }
    }

    let mut scheduled = 0usize;
    for (idx, cell) in solution.iter().enumerate() {
        let Some(cell) = cell.filter(|c| grid.contains(*c)) else {
            continue;
        };
        let course = roster.course(idx);
        timetable
            .get_mut(&dates[cell.day])
            .and_then(|day| day.get_mut(&(cell.slot + 1)))
            .expect("all date/slot keys are pre-initialized")
            .push(ScheduledCourse {
                code: course.code.clone(),
                name: course.name.clone(),
                students: course.students.clone(),
            });
        scheduled += 1;
    }

    let slot_utilization = dates
        .iter()
        .map(|date| DayUtilization {
            day: date.clone(),
            slots: (1..=grid.num_slots)
                .map(|slot| SlotUsage {
                    slot,
                    count: timetable[date][&slot].len(),
                })
                .collect(),
        })
        .collect();

    GeneratedTimetable {
        timetable,
        stats: TimetableStats {
            total_courses: roster.len(),
            scheduled_courses: scheduled,
            unscheduled_courses: roster.len() - scheduled,
            num_days: grid.num_days,
            num_slots: grid.num_slots,
            slot_utilization,
        },
        fitness,
    }
}
