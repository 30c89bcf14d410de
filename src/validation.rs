//! Input validation for schedule requests.
//!
//! Checks structural integrity before any allocation work starts and
//! reports every problem found, not just the first. Detects:
//! - Duplicate teacher, course, or room IDs
//! - Availability windows with a bad day index or end not after start
//! - Non-positive course durations
//! - Zero density
//! - Out-of-range UTC offset or anchor date
//!
//! Skills naming courses that are not in the request are tolerated: a
//! teacher may be qualified for courses not being scheduled this week.

use std::collections::HashSet;

use thiserror::Error;
use tracing::debug;

use crate::models::{ScheduleRequest, FIRST_DAY, LAST_DAY};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities of the same kind share an ID.
    DuplicateId,
    /// Day of week outside 1..=7.
    InvalidDayOfWeek,
    /// Window end is not after its start.
    InvalidTimeWindow,
    /// Course duration is zero or negative.
    NonPositiveDuration,
    /// Density is zero.
    InvalidDensity,
    /// UTC offset is not within ±24h.
    InvalidUtcOffset,
    /// The anchor week does not fit the calendar range.
    AnchorOutOfRange,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a schedule request.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_request(request: &ScheduleRequest) -> ValidationResult {
    let mut errors = Vec::new();

    if request.density == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidDensity,
            "density must be at least 1",
        ));
    }

    if request.utc_offset().is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidUtcOffset,
            format!(
                "UTC offset of {} minutes is out of range",
                request.utc_offset_minutes
            ),
        ));
    }

    if request
        .start_date
        .checked_add_days(chrono::Days::new(u64::from((LAST_DAY - FIRST_DAY).unsigned_abs())))
        .is_none()
    {
        errors.push(ValidationError::new(
            ValidationErrorKind::AnchorOutOfRange,
            format!("anchor week starting {} is out of range", request.start_date),
        ));
    }

    let mut course_ids = HashSet::new();
    for course in &request.courses {
        if !course_ids.insert(course.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate course ID: {}", course.id),
            ));
        }
        if course.duration_minutes <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveDuration,
                format!(
                    "course '{}' has non-positive duration {}",
                    course.id, course.duration_minutes
                ),
            ));
        }
    }

    let mut room_ids = HashSet::new();
    for room in &request.rooms {
        if !room_ids.insert(room.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate room ID: {}", room.id),
            ));
        }
    }

    let mut teacher_ids = HashSet::new();
    for teacher in &request.teachers {
        if !teacher_ids.insert(teacher.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate teacher ID: {}", teacher.id),
            ));
        }

        for (idx, window) in teacher.availability.iter().enumerate() {
            if !window.has_valid_day() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidDayOfWeek,
                    format!(
                        "teacher '{}' window #{idx} has day_of_week {} (expected {FIRST_DAY}..={LAST_DAY})",
                        teacher.id, window.day_of_week
                    ),
                ));
            }
            if !window.is_well_formed() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidTimeWindow,
                    format!(
                        "teacher '{}' window #{idx} ends at {} which is not after its start {}",
                        teacher.id, window.end, window.start
                    ),
                ));
            }
        }

        for skill in &teacher.skills {
            if !course_ids.contains(skill.as_str()) {
                debug!(teacher = %teacher.id, course = %skill, "skill names a course outside this request");
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, Room, Teacher, TimeWindow};
    use chrono::NaiveDate;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 24).unwrap()
    }

    fn sample_request() -> ScheduleRequest {
        ScheduleRequest::new("B1", anchor())
            .with_teacher(
                Teacher::new("T1")
                    .with_skill("C1")
                    .with_window(TimeWindow::parse(1, "09:00", "11:00").unwrap()),
            )
            .with_course(Course::new("C1", 60))
            .with_room(Room::new("R1"))
    }

    fn kinds(req: &ScheduleRequest) -> Vec<ValidationErrorKind> {
        validate_request(req)
            .unwrap_err()
            .into_iter()
            .map(|e| e.kind)
            .collect()
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_request(&sample_request()).is_ok());
    }

    #[test]
    fn test_unknown_skill_is_tolerated() {
        let req = sample_request().with_teacher(Teacher::new("T2").with_skill("elsewhere"));
        assert!(validate_request(&req).is_ok());
    }

    #[test]
    fn test_duplicate_ids() {
        let req = sample_request()
            .with_teacher(Teacher::new("T1"))
            .with_course(Course::new("C1", 30))
            .with_room(Room::new("R1"));

        let errors = validate_request(&req).unwrap_err();
        let dupes: Vec<_> = errors
            .iter()
            .filter(|e| e.kind == ValidationErrorKind::DuplicateId)
            .collect();
        assert_eq!(dupes.len(), 3);
        assert!(dupes.iter().any(|e| e.message.contains("teacher")));
        assert!(dupes.iter().any(|e| e.message.contains("course")));
        assert!(dupes.iter().any(|e| e.message.contains("room")));
    }

    #[test]
    fn test_inverted_window() {
        let req = sample_request().with_teacher(
            Teacher::new("T2").with_window(TimeWindow::parse(2, "11:00", "09:00").unwrap()),
        );
        assert_eq!(kinds(&req), vec![ValidationErrorKind::InvalidTimeWindow]);
    }

    #[test]
    fn test_empty_window() {
        let req = sample_request().with_teacher(
            Teacher::new("T2").with_window(TimeWindow::parse(2, "10:00", "10:00").unwrap()),
        );
        assert_eq!(kinds(&req), vec![ValidationErrorKind::InvalidTimeWindow]);
    }

    #[test]
    fn test_bad_day_of_week() {
        let req = sample_request().with_teacher(
            Teacher::new("T2").with_window(TimeWindow::parse(8, "09:00", "10:00").unwrap()),
        );
        assert_eq!(kinds(&req), vec![ValidationErrorKind::InvalidDayOfWeek]);
    }

    #[test]
    fn test_negative_and_large_days_reach_validation() {
        let req = sample_request().with_teacher(
            Teacher::new("T2")
                .with_window(TimeWindow::parse(-1, "09:00", "10:00").unwrap())
                .with_window(TimeWindow::parse(300, "09:00", "10:00").unwrap()),
        );
        assert_eq!(
            kinds(&req),
            vec![
                ValidationErrorKind::InvalidDayOfWeek,
                ValidationErrorKind::InvalidDayOfWeek
            ]
        );
    }

    #[test]
    fn test_non_positive_duration() {
        let req = sample_request()
            .with_course(Course::new("C2", 0))
            .with_course(Course::new("C3", -15));
        assert_eq!(
            kinds(&req),
            vec![
                ValidationErrorKind::NonPositiveDuration,
                ValidationErrorKind::NonPositiveDuration
            ]
        );
    }

    #[test]
    fn test_zero_density() {
        let req = sample_request().with_density(0);
        assert_eq!(kinds(&req), vec![ValidationErrorKind::InvalidDensity]);
    }

    #[test]
    fn test_out_of_range_offset() {
        let req = sample_request().with_utc_offset_minutes(-25 * 60);
        assert_eq!(kinds(&req), vec![ValidationErrorKind::InvalidUtcOffset]);
    }

    #[test]
    fn test_anchor_at_calendar_end() {
        let mut req = sample_request();
        req.start_date = NaiveDate::MAX;
        assert_eq!(kinds(&req), vec![ValidationErrorKind::AnchorOutOfRange]);
    }

    #[test]
    fn test_multiple_errors() {
        let req = sample_request()
            .with_density(0)
            .with_course(Course::new("C2", 0))
            .with_teacher(
                Teacher::new("T2").with_window(TimeWindow::parse(0, "12:00", "08:00").unwrap()),
            );

        let errors = validate_request(&req).unwrap_err();
        assert_eq!(errors.len(), 4);
    }
}
