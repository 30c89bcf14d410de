//! Time resolution: weekly window → absolute class interval.
//!
//! # Algorithm
//! 1. date = anchor + (day_of_week − 1) days
//! 2. start = date at `window.start`; end = start + course duration
//! 3. close = date at `window.end`
//! 4. Reject with `SlotTooShort` if end > close.
//!
//! Classes always start at the window opening. A window longer than the
//! course is not subdivided into later start times.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeDelta, Utc};
use thiserror::Error;

use crate::models::{Course, Room, ScheduleRequest, ScheduledClass, Teacher, TimeWindow};

/// Why a window cannot host a candidate class.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The class would run past the window close.
    #[error("class ending {class_end} overruns window closing {window_end}")]
    SlotTooShort {
        class_end: NaiveDateTime,
        window_end: NaiveDateTime,
    },
    /// Date arithmetic left the representable calendar.
    #[error("window does not map to a representable date")]
    DateOutOfRange,
}

/// A resolved candidate interval `[start, end)` in wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSlot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ResolvedSlot {
    /// Weekday name of the slot, e.g. "Monday".
    pub fn day_label(&self) -> String {
        self.start.format("%A").to_string()
    }

    /// Attaches a fixed offset to both ends.
    pub fn localize(
        &self,
        offset: FixedOffset,
    ) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
        let start = self.start.and_local_timezone(offset).single()?;
        let end = self.end.and_local_timezone(offset).single()?;
        Some((start, end))
    }
}

/// Projects `window` onto the week starting at `anchor` and fits a class of
/// `duration_minutes` at its opening.
pub fn resolve(
    window: &TimeWindow,
    anchor: NaiveDate,
    duration_minutes: i32,
) -> Result<ResolvedSlot, ResolveError> {
    let (start, window_end) = window.project(anchor).ok_or(ResolveError::DateOutOfRange)?;
    let end = start
        .checked_add_signed(TimeDelta::minutes(i64::from(duration_minutes)))
        .ok_or(ResolveError::DateOutOfRange)?;

    if end > window_end {
        return Err(ResolveError::SlotTooShort {
            class_end: end,
            window_end,
        });
    }

    Ok(ResolvedSlot { start, end })
}

/// The anchor week of one request: where windows land and which offset
/// stamps the produced timestamps.
#[derive(Debug, Clone, Copy)]
pub struct AnchorWeek {
    pub anchor: NaiveDate,
    pub offset: FixedOffset,
}

impl AnchorWeek {
    /// Anchor week of a request. An out-of-range offset falls back to UTC;
    /// validation rejects such requests before allocation.
    pub fn of(request: &ScheduleRequest) -> Self {
        Self {
            anchor: request.start_date,
            offset: request.utc_offset().unwrap_or_else(|| Utc.fix()),
        }
    }

    /// Resolves a session of `course` at the opening of `window`.
    pub fn slot(&self, window: &TimeWindow, course: &Course) -> Result<LocalSlot, ResolveError> {
        let resolved = resolve(window, self.anchor, course.duration_minutes)?;
        let (start, end) = resolved
            .localize(self.offset)
            .ok_or(ResolveError::DateOutOfRange)?;
        Ok(LocalSlot {
            start,
            end,
            day_label: resolved.day_label(),
        })
    }
}

/// A resolved slot stamped with the request offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalSlot {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub day_label: String,
}

impl LocalSlot {
    /// Binds the slot to a course, teacher, and room.
    pub fn class_for(&self, course: &Course, teacher: &Teacher, room: &Room) -> ScheduledClass {
        ScheduledClass {
            course_id: course.id.clone(),
            teacher_id: teacher.id.clone(),
            room_id: room.id.clone(),
            start_time: self.start,
            end_time: self.end,
            day_label: self.day_label.clone(),
        }
    }
}
