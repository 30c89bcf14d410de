//! Course model.
//!
//! A course is the unit the timetable places repeatedly: every scheduled
//! class is one session of a course and lasts exactly its duration.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// A course to be scheduled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier.
    pub id: String,
    /// Display name (used in warnings).
    #[serde(default)]
    pub name: String,
    /// Session length in minutes. Must be positive.
    #[serde(rename = "duration")]
    pub duration_minutes: i32,
}

impl Course {
    /// Creates a course with the given session length.
    pub fn new(id: impl Into<String>, duration_minutes: i32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            duration_minutes,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Session length as a time delta.
    #[inline]
    pub fn duration(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.duration_minutes))
    }

    /// Name for human-readable output, falling back to the id.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_builder() {
        let c = Course::new("C1", 45).with_name("Junior Robotics");
        assert_eq!(c.id, "C1");
        assert_eq!(c.duration(), TimeDelta::minutes(45));
        assert_eq!(c.label(), "Junior Robotics");
        assert_eq!(Course::new("C2", 30).label(), "C2");
    }

    #[test]
    fn test_course_wire_name() {
        let c: Course = serde_json::from_str(r#"{"id": "C1", "name": "Art", "duration": 60}"#).unwrap();
        assert_eq!(c.duration_minutes, 60);
        let v = serde_json::to_value(&c).unwrap();
        assert_eq!(v["duration"], 60);
    }
}
