//! Independent invariant audit of a produced schedule.
//!
//! Re-checks every class against the request without touching allocator
//! state: pairwise overlap via the plain scan, containment via a direct
//! projection of each teacher window.
//!
//! # Checks
//!
//! | Violation | Condition |
//! |-----------|-----------|
//! | DurationMismatch | `end - start` ≠ course duration |
//! | TeacherOverlap | two classes of one teacher intersect |
//! | RoomOverlap | two classes in one room intersect |
//! | OutsideAvailability | no teacher window contains the class |
//! | SkillMismatch | teacher lacks the course skill |
//! | DensityExceeded | a course has more than `density` classes |
//! | UnknownReference | course, teacher, or room id not in the request |
//!
//! # Complexity
//! O(n² + n·w) where n=classes, w=windows per teacher.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::models::{ScheduleRequest, ScheduledClass, Teacher, Violation, ViolationType};

/// Lists every broken invariant. Empty means the schedule is sound.
pub fn audit_schedule(request: &ScheduleRequest, classes: &[ScheduledClass]) -> Vec<Violation> {
    let mut violations = Vec::new();
    let offset = request.utc_offset().unwrap_or_else(|| Utc.fix());

    for class in classes {
        check_references(request, class, offset, &mut violations);
    }

    for (i, a) in classes.iter().enumerate() {
        for b in &classes[i + 1..] {
            if !a.overlaps(b) {
                continue;
            }
            if a.teacher_id == b.teacher_id {
                violations.push(Violation::new(
                    ViolationType::TeacherOverlap,
                    &a.teacher_id,
                    format!(
                        "Teacher '{}' double-booked: {} and {} overlap",
                        a.teacher_id, a.course_id, b.course_id
                    ),
                ));
            }
            if a.room_id == b.room_id {
                violations.push(Violation::new(
                    ViolationType::RoomOverlap,
                    &a.room_id,
                    format!(
                        "Room '{}' double-booked: {} and {} overlap",
                        a.room_id, a.course_id, b.course_id
                    ),
                ));
            }
        }
    }

    let mut per_course: HashMap<&str, u32> = HashMap::new();
    for class in classes {
        *per_course.entry(class.course_id.as_str()).or_insert(0) += 1;
    }
    for course in &request.courses {
        let count = per_course.get(course.id.as_str()).copied().unwrap_or(0);
        if count > request.density {
            violations.push(Violation::new(
                ViolationType::DensityExceeded,
                &course.id,
                format!(
                    "Course '{}' has {} classes, density is {}",
                    course.id, count, request.density
                ),
            ));
        }
    }

    violations
}

fn check_references(
    request: &ScheduleRequest,
    class: &ScheduledClass,
    offset: FixedOffset,
    violations: &mut Vec<Violation>,
) {
    let course = request.course(&class.course_id);
    let teacher = request.teacher(&class.teacher_id);
    let room_known = request.rooms.iter().any(|r| r.id == class.room_id);

    if course.is_none() {
        violations.push(unknown("course", &class.course_id));
    }
    if teacher.is_none() {
        violations.push(unknown("teacher", &class.teacher_id));
    }
    if !room_known {
        violations.push(unknown("room", &class.room_id));
    }

    if let Some(course) = course {
        if class.duration_minutes() != i64::from(course.duration_minutes) {
            violations.push(Violation::new(
                ViolationType::DurationMismatch,
                &class.course_id,
                format!(
                    "Class of '{}' lasts {} min, course duration is {} min",
                    class.course_id,
                    class.duration_minutes(),
                    course.duration_minutes
                ),
            ));
        }
    }

    let Some(teacher) = teacher else {
        return;
    };
    if !teacher.can_teach(&class.course_id) {
        violations.push(Violation::new(
            ViolationType::SkillMismatch,
            &teacher.id,
            format!(
                "Teacher '{}' is not qualified for '{}'",
                teacher.id, class.course_id
            ),
        ));
    }
    if !within_availability(teacher, request, offset, class.start_time, class.end_time) {
        violations.push(Violation::new(
            ViolationType::OutsideAvailability,
            &teacher.id,
            format!(
                "Class of '{}' at {} is outside every window of teacher '{}'",
                class.course_id,
                class.start_time.to_rfc3339(),
                teacher.id
            ),
        ));
    }
}

fn within_availability(
    teacher: &Teacher,
    request: &ScheduleRequest,
    offset: FixedOffset,
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
) -> bool {
    teacher.availability.iter().any(|window| {
        let Some((open, close)) = window.project(request.start_date) else {
            return false;
        };
        match (
            open.and_local_timezone(offset).single(),
            close.and_local_timezone(offset).single(),
        ) {
            (Some(open), Some(close)) => open <= start && end <= close,
            _ => false,
        }
    })
}

fn unknown(entity: &str, id: &str) -> Violation {
    Violation::new(
        ViolationType::UnknownReference,
        id,
        format!("Class references unknown {entity} '{id}'"),
    )
}
