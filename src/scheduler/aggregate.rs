//! Result aggregation.
//!
//! Turns the committed classes and skipped course ids of an allocation pass
//! into a [`ScheduleResult`]: per-course outcomes, warnings, overall status.

use std::collections::{HashMap, HashSet};

use tracing::info;

use crate::models::{
    Course, CourseOutcome, OutcomeStatus, ScheduleResult, ScheduleStatus, ScheduleWarning,
    ScheduledClass,
};

/// Builds the final result.
///
/// Every course in `courses` gets exactly one [`CourseOutcome`], in order.
/// `skipped` lists the courses that had no qualified teacher.
pub fn aggregate(
    courses: &[Course],
    density: u32,
    committed: Vec<ScheduledClass>,
    skipped: &[String],
) -> ScheduleResult {
    let mut placed: HashMap<&str, u32> = HashMap::new();
    for class in &committed {
        *placed.entry(class.course_id.as_str()).or_insert(0) += 1;
    }
    let skipped: HashSet<&str> = skipped.iter().map(String::as_str).collect();

    let mut outcomes = Vec::with_capacity(courses.len());
    let mut warnings = Vec::new();

    for course in courses {
        let count = placed.get(course.id.as_str()).copied().unwrap_or(0);
        let name = course.label().to_string();

        let status = if skipped.contains(course.id.as_str()) {
            warnings.push(ScheduleWarning::NoQualifiedTeacher {
                course_id: course.id.clone(),
                course_name: name.clone(),
            });
            OutcomeStatus::NoQualifiedTeacher
        } else if count >= density {
            OutcomeStatus::Full
        } else {
            warnings.push(ScheduleWarning::Underfilled {
                course_id: course.id.clone(),
                course_name: name.clone(),
                requested: density,
                placed: count,
            });
            if count == 0 {
                OutcomeStatus::Unplaced
            } else {
                OutcomeStatus::Partial
            }
        };

        outcomes.push(CourseOutcome {
            course_id: course.id.clone(),
            course_name: name,
            requested: density,
            placed: count,
            status,
        });
    }

    let status = if outcomes.iter().all(|o| o.status == OutcomeStatus::Full) {
        ScheduleStatus::Complete
    } else {
        ScheduleStatus::Partial
    };

    info!(
        classes = committed.len(),
        courses = courses.len(),
        warnings = warnings.len(),
        ?status,
        "schedule aggregated"
    );

    ScheduleResult {
        status,
        total: committed.len(),
        results: committed,
        outcomes,
        warnings,
    }
}
