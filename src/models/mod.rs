//! Timetable domain models.
//!
//! Request-scoped value types: built from the inbound request, consumed by
//! one allocation pass, discarded once the result is serialized.
//!
//! # Domain Mappings
//!
//! | u-timetable | Resource role | Wire name |
//! |-------------|---------------|-----------|
//! | Teacher | skilled, calendared resource | `teachers[]` |
//! | Room | exclusive resource | `rooms[]` |
//! | Course | work unit repeated `density` times | `courses[]` |
//! | ScheduledClass | course × teacher × room × interval | `results[]` |

mod calendar;
mod course;
mod request;
mod room;
mod schedule;
mod teacher;

pub use calendar::{parse_wall_clock, wall_clock, TimeWindow, FIRST_DAY, LAST_DAY};
pub use course::Course;
pub use request::{ScheduleRequest, DEFAULT_DENSITY};
pub use room::{Room, DEFAULT_ROOM_CAPACITY};
pub use schedule::{
    CourseOutcome, OutcomeStatus, ScheduleResult, ScheduleStatus, ScheduleWarning,
    ScheduledClass, Violation, ViolationType,
};
pub use teacher::Teacher;
