//! Teacher model.
//!
//! A teacher is the human resource of the timetable: a set of courses they
//! are qualified to teach (skills) and an ordered list of weekly
//! availability windows.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::TimeWindow;

/// A teacher who can be assigned to classes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Course ids this teacher is qualified for.
    #[serde(default)]
    pub skills: BTreeSet<String>,
    /// Weekly availability, in declared order. Overlaps are allowed.
    #[serde(default)]
    pub availability: Vec<TimeWindow>,
}

impl Teacher {
    /// Creates a teacher with no skills and no availability.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            skills: BTreeSet::new(),
            availability: Vec::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a course the teacher is qualified for.
    pub fn with_skill(mut self, course_id: impl Into<String>) -> Self {
        self.skills.insert(course_id.into());
        self
    }

    /// Appends an availability window.
    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.availability.push(window);
        self
    }

    /// Whether this teacher may teach the given course.
    #[inline]
    pub fn can_teach(&self, course_id: &str) -> bool {
        self.skills.contains(course_id)
    }
}
