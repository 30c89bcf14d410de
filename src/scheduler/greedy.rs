//! Greedy first-fit allocator.
//!
//! # Algorithm
//!
//! 1. For each course, in request order, collect the qualified teachers.
//!    None → the course is skipped and reported.
//! 2. For each of the `density` repetitions of the course, shuffle the
//!    qualified teachers and all rooms afresh.
//! 3. Walk teacher → window → room in that order; the first candidate that
//!    conflicts with nothing committed so far (across all courses) is
//!    committed and the repetition ends.
//! 4. If nothing fits, the remaining repetitions of the course are dropped:
//!    the committed set did not change, so they would fail the same way.
//!
//! Committed classes are never revisited. Course order and the random
//! stream therefore decide which courses fill up first.
//!
//! # Termination
//! Every (teacher, window) pair resolves to one fixed slot, and a teacher
//! cannot hold the same slot twice. A course therefore commits at most
//! [`CourseOrder::slot_bound`] classes before a repetition fails, whatever
//! the requested density.
//!
//! # Complexity
//! O(c · min(d, s) · t · w · r · log n) where c=courses, d=density,
//! s=slot bound, t=teachers, w=windows/teacher, r=rooms, n=committed classes.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace, warn};

use super::conflict::ConflictIndex;
use super::resolver::AnchorWeek;
use crate::models::{Course, Room, ScheduleRequest, ScheduledClass, Teacher};

/// Raw output of an allocation strategy, before aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllocationOutcome {
    /// Committed classes, in commit order.
    pub committed: Vec<ScheduledClass>,
    /// Courses skipped for lack of a qualified teacher.
    pub skipped: Vec<String>,
}

/// Search order of one course: its qualified teachers and the room pool.
#[derive(Debug, Clone)]
pub(crate) struct CourseOrder<'a> {
    pub course: &'a Course,
    pub teachers: Vec<&'a Teacher>,
    pub rooms: Vec<&'a Room>,
}

impl<'a> CourseOrder<'a> {
    /// Order for `course`, or `None` when no teacher is qualified.
    pub(crate) fn of(request: &'a ScheduleRequest, course: &'a Course) -> Option<Self> {
        let teachers = request.qualified_teachers(&course.id);
        if teachers.is_empty() {
            return None;
        }
        Some(Self {
            course,
            teachers,
            rooms: request.rooms.iter().collect(),
        })
    }

    pub(crate) fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.teachers.shuffle(rng);
        self.rooms.shuffle(rng);
    }

    /// Most classes this course can ever hold: the number of qualified
    /// (teacher, window) pairs whose window fits the course.
    pub(crate) fn slot_bound(&self, week: &AnchorWeek) -> usize {
        self.teachers
            .iter()
            .map(|teacher| {
                teacher
                    .availability
                    .iter()
                    .filter(|window| week.slot(window, self.course).is_ok())
                    .count()
            })
            .sum()
    }
}

/// First conflict-free candidate in teacher → window → room order.
pub(crate) fn first_fit(
    week: &AnchorWeek,
    order: &CourseOrder<'_>,
    index: &ConflictIndex,
) -> Option<ScheduledClass> {
    let course = order.course;
    for teacher in &order.teachers {
        for window in &teacher.availability {
            let slot = match week.slot(window, course) {
                Ok(slot) => slot,
                Err(reason) => {
                    trace!(course = %course.id, teacher = %teacher.id, %reason, "window rejected");
                    continue;
                }
            };

            let free_room = order
                .rooms
                .iter()
                .find(|room| index.is_free(&teacher.id, &room.id, slot.start, slot.end));
            if let Some(room) = free_room {
                return Some(slot.class_for(course, teacher, room));
            }
        }
    }
    None
}

/// One greedy pass over every course of the request.
pub(crate) fn first_fit_pass<R: Rng + ?Sized>(
    request: &ScheduleRequest,
    week: &AnchorWeek,
    rng: &mut R,
) -> AllocationOutcome {
    let mut outcome = AllocationOutcome::default();
    let mut index = ConflictIndex::new();

    for course in &request.courses {
        let Some(mut order) = CourseOrder::of(request, course) else {
            warn!(course = %course.id, name = %course.name, "no qualified teacher; course skipped");
            outcome.skipped.push(course.id.clone());
            continue;
        };

        for repetition in 0..request.density {
            order.reshuffle(rng);
            let Some(class) = first_fit(week, &order, &index) else {
                debug!(
                    course = %course.id,
                    repetition,
                    "no conflict-free slot; remaining repetitions dropped"
                );
                break;
            };
            debug!(
                course = %class.course_id,
                teacher = %class.teacher_id,
                room = %class.room_id,
                start = %class.start_time,
                "committed class"
            );
            index.insert(&class);
            outcome.committed.push(class);
        }
    }

    outcome
}

/// Runs the greedy first-fit pass over a (validated) request.
pub fn allocate_first_fit<R: Rng + ?Sized>(
    request: &ScheduleRequest,
    rng: &mut R,
) -> AllocationOutcome {
    first_fit_pass(request, &AnchorWeek::of(request), rng)
}
