//! Schedule request: everything one allocation pass consumes.

use chrono::{FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{Course, Room, Teacher};
use crate::error::{Result, ScheduleError};

/// Sessions requested per course when the caller does not say.
pub const DEFAULT_DENSITY: u32 = 2;

/// Input for one allocation pass.
///
/// # Time Representation
/// Availability windows are week-relative; `start_date` anchors day 1.
/// Produced timestamps carry the fixed `utc_offset_minutes` of the base.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Base (campus) the timetable is for.
    #[serde(default)]
    pub base_id: String,
    /// Anchor date: the first day of the week the windows refer to.
    pub start_date: NaiveDate,
    /// Teacher roster.
    #[serde(default)]
    pub teachers: Vec<Teacher>,
    /// Courses to place, processed in this order.
    #[serde(default)]
    pub courses: Vec<Course>,
    /// Room pool.
    #[serde(default)]
    pub rooms: Vec<Room>,
    /// Target sessions per course.
    #[serde(default = "default_density")]
    pub density: u32,
    /// Local offset from UTC, in minutes, for produced timestamps.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

fn default_density() -> u32 {
    DEFAULT_DENSITY
}

impl ScheduleRequest {
    /// Creates an empty request anchored at `start_date`.
    pub fn new(base_id: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            base_id: base_id.into(),
            start_date,
            teachers: Vec::new(),
            courses: Vec::new(),
            rooms: Vec::new(),
            density: DEFAULT_DENSITY,
            utc_offset_minutes: 0,
        }
    }

    /// Decodes a request from its JSON wire form.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(ScheduleError::MalformedPayload)
    }

    /// Adds a teacher.
    pub fn with_teacher(mut self, teacher: Teacher) -> Self {
        self.teachers.push(teacher);
        self
    }

    /// Adds a course.
    pub fn with_course(mut self, course: Course) -> Self {
        self.courses.push(course);
        self
    }

    /// Adds a room.
    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    /// Sets the target sessions per course.
    pub fn with_density(mut self, density: u32) -> Self {
        self.density = density;
        self
    }

    /// Sets the UTC offset (minutes) stamped on produced timestamps.
    pub fn with_utc_offset_minutes(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = minutes;
        self
    }

    /// The fixed offset for produced timestamps, if in range (±24h).
    pub fn utc_offset(&self) -> Option<FixedOffset> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
    }

    /// Looks up a course by id.
    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// Looks up a teacher by id.
    pub fn teacher(&self, id: &str) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.id == id)
    }

    /// Teachers qualified for a course, in roster order.
    pub fn qualified_teachers(&self, course_id: &str) -> Vec<&Teacher> {
        self.teachers.iter().filter(|t| t.can_teach(course_id)).collect()
    }
}
