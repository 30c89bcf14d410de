//! Schedule (solution) model.
//!
//! A [`ScheduleResult`] is the answer to one [`ScheduleRequest`]: the
//! committed classes, a per-course account of how many sessions were
//! placed, and warnings for the shortfalls. Soft failures live here as
//! data; only malformed input is reported as an error.
//!
//! [`ScheduleRequest`]: super::ScheduleRequest

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, ScheduleError};

/// One committed class: a course session bound to a teacher, a room, and
/// an absolute time interval `[start_time, end_time)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledClass {
    /// Scheduled course.
    pub course_id: String,
    /// Assigned teacher.
    pub teacher_id: String,
    /// Assigned room.
    pub room_id: String,
    /// Start (inclusive).
    pub start_time: DateTime<FixedOffset>,
    /// End (exclusive).
    pub end_time: DateTime<FixedOffset>,
    /// Weekday name of the session, e.g. "Monday".
    pub day_label: String,
}

impl ScheduledClass {
    /// Length in whole minutes.
    #[inline]
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    /// Whether the two half-open intervals intersect.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_time.max(other.start_time) < self.end_time.min(other.end_time)
    }

    /// Whether both classes need the same teacher or the same room.
    #[inline]
    pub fn shares_resource(&self, other: &Self) -> bool {
        self.teacher_id == other.teacher_id || self.room_id == other.room_id
    }
}

/// Overall shape of a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    /// Every course received all requested sessions.
    Complete,
    /// At least one course is under-filled or unplaced.
    Partial,
}

/// How one course fared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// All requested sessions placed.
    Full,
    /// Some, but not all, sessions placed.
    Partial,
    /// Qualified teachers exist but no session fit.
    Unplaced,
    /// No teacher holds the course skill; nothing was attempted.
    NoQualifiedTeacher,
}

/// Per-course placement account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseOutcome {
    pub course_id: String,
    pub course_name: String,
    /// Sessions asked for (the request density).
    pub requested: u32,
    /// Sessions committed.
    pub placed: u32,
    pub status: OutcomeStatus,
}

/// A soft shortfall worth surfacing to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleWarning {
    /// No teacher is qualified for the course.
    NoQualifiedTeacher {
        course_id: String,
        course_name: String,
    },
    /// The search space ran out before `requested` sessions were placed.
    Underfilled {
        course_id: String,
        course_name: String,
        requested: u32,
        placed: u32,
    },
}

impl ScheduleWarning {
    /// Course the warning is about.
    pub fn course_id(&self) -> &str {
        match self {
            Self::NoQualifiedTeacher { course_id, .. } | Self::Underfilled { course_id, .. } => {
                course_id
            }
        }
    }
}

impl fmt::Display for ScheduleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoQualifiedTeacher { course_name, .. } => {
                write!(f, "course '{course_name}' has no qualified teacher")
            }
            Self::Underfilled {
                course_name,
                requested,
                placed,
                ..
            } => write!(
                f,
                "course '{course_name}' placed {placed} of {requested} sessions"
            ),
        }
    }
}

/// The answer to one schedule request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub status: ScheduleStatus,
    /// Number of committed classes.
    pub total: usize,
    /// Committed classes, in commit order.
    pub results: Vec<ScheduledClass>,
    /// One entry per requested course, in request order.
    pub outcomes: Vec<CourseOutcome>,
    pub warnings: Vec<ScheduleWarning>,
}

impl ScheduleResult {
    /// Whether every course was fully placed.
    pub fn is_complete(&self) -> bool {
        self.status == ScheduleStatus::Complete
    }

    /// Number of committed classes.
    pub fn class_count(&self) -> usize {
        self.results.len()
    }

    /// Outcome for a course.
    pub fn outcome_for(&self, course_id: &str) -> Option<&CourseOutcome> {
        self.outcomes.iter().find(|o| o.course_id == course_id)
    }

    /// Classes of a course.
    pub fn classes_for_course(&self, course_id: &str) -> Vec<&ScheduledClass> {
        self.results
            .iter()
            .filter(|c| c.course_id == course_id)
            .collect()
    }

    /// Classes taught by a teacher.
    pub fn classes_for_teacher(&self, teacher_id: &str) -> Vec<&ScheduledClass> {
        self.results
            .iter()
            .filter(|c| c.teacher_id == teacher_id)
            .collect()
    }

    /// Classes held in a room.
    pub fn classes_for_room(&self, room_id: &str) -> Vec<&ScheduledClass> {
        self.results
            .iter()
            .filter(|c| c.room_id == room_id)
            .collect()
    }

    /// Encodes the result in its JSON wire form.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(ScheduleError::Encode)
    }
}

/// An invariant broken by a schedule (see the audit in `scheduler`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub violation_type: ViolationType,
    /// Related entity (class course id, teacher id, or room id).
    pub entity_id: String,
    pub message: String,
}

/// Classification of broken invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// `end - start` differs from the course duration.
    DurationMismatch,
    /// Two classes of one teacher overlap.
    TeacherOverlap,
    /// Two classes in one room overlap.
    RoomOverlap,
    /// Class falls outside every availability window of its teacher.
    OutsideAvailability,
    /// Teacher lacks the course skill.
    SkillMismatch,
    /// Course has more classes than the requested density.
    DensityExceeded,
    /// Class references an unknown course, teacher, or room.
    UnknownReference,
}

impl Violation {
    pub fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }
}
