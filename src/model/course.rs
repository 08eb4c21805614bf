//! Courses and the validated course roster.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::SearchError;

/// One examination course and its enrolled students.
///
/// Student identifiers are opaque strings (roll numbers in the upstream
/// registration data). Enrollment is set-semantic: duplicate identifiers
/// on input are dropped when the course enters a [`Roster`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course code, e.g. `"CS2023"`.
    pub code: String,
    /// Display name for presentation layers.
    pub name: String,
    /// Enrolled student identifiers.
    #[serde(default)]
    pub students: Vec<String>,
}

impl Course {
    /// Creates a course from owned parts.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        students: Vec<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            students,
        }
    }
}

/// Validated, ordered collection of courses.
///
/// The roster fixes the course ordering for the duration of a search:
/// a [`Solution`](crate::model::Solution) stores one placement per course,
/// index-aligned with this ordering. Construction rejects empty input and
/// duplicate course codes, and de-duplicates each course's student list
/// while preserving first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    courses: Vec<Course>,
}

impl Roster {
    /// Builds a roster, validating course codes and normalizing enrollments.
    ///
    /// # Errors
    ///
    /// [`SearchError::EmptyRoster`] if `courses` is empty,
    /// [`SearchError::DuplicateCourseCode`] on the first repeated code.
    pub fn new(courses: Vec<Course>) -> Result<Self, SearchError> {
        if courses.is_empty() {
            return Err(SearchError::EmptyRoster);
        }

        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(courses.len());
        for mut course in courses {
            if !seen.insert(course.code.clone()) {
                return Err(SearchError::DuplicateCourseCode(course.code));
            }
            let mut students_seen = HashSet::new();
            course
                .students
                .retain(|s| students_seen.insert(s.clone()));
            normalized.push(course);
        }

        Ok(Self {
            courses: normalized,
        })
    }

    /// Number of courses in the roster.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// A roster is never empty; provided for clippy-conventional pairing.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// The course at roster index `idx`.
    ///
    /// # Panics
    /// Panics if `idx` is out of range.
    pub fn course(&self, idx: usize) -> &Course {
        &self.courses[idx]
    }

    /// All courses in roster order.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Iterates `(index, course)` pairs in roster order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Course)> {
        self.courses.iter().enumerate()
    }
}
