//! Weekly availability windows.
//!
//! A [`TimeWindow`] is week-relative: a day-of-week index plus a wall-clock
//! start and end. It only becomes an absolute interval once projected onto
//! an anchor week (see [`TimeWindow::project`]).
//!
//! # Day Numbering
//! Day 1 is the anchor date itself, day 7 is six days later. The anchor is
//! expected to be the first day of the week the windows were authored
//! against (Monday in the admin tools).
//!
//! # Wall-clock Text
//! Times are accepted as `HH:MM` or `HH:MM:SS`. Both forms appear in
//! practice: the admin form posts minutes, the database round-trip emits
//! seconds.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// First valid day-of-week index.
pub const FIRST_DAY: i32 = 1;
/// Last valid day-of-week index.
pub const LAST_DAY: i32 = 7;

/// A recurring weekly block of availability `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Day of week, 1..=7 relative to the anchor date. Decoded as a plain
    /// integer so out-of-range values reach validation.
    pub day_of_week: i32,
    /// Window opening (inclusive).
    #[serde(rename = "start_time", with = "wall_clock")]
    pub start: NaiveTime,
    /// Window closing (exclusive).
    #[serde(rename = "end_time", with = "wall_clock")]
    pub end: NaiveTime,
}

impl TimeWindow {
    /// Creates a new window.
    pub fn new(day_of_week: i32, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            day_of_week,
            start,
            end,
        }
    }

    /// Creates a window from wall-clock text (`HH:MM` or `HH:MM:SS`).
    pub fn parse(day_of_week: i32, start: &str, end: &str) -> Result<Self, chrono::ParseError> {
        Ok(Self::new(
            day_of_week,
            parse_wall_clock(start)?,
            parse_wall_clock(end)?,
        ))
    }

    /// Whether the day index lies in 1..=7.
    #[inline]
    pub fn has_valid_day(&self) -> bool {
        (FIRST_DAY..=LAST_DAY).contains(&self.day_of_week)
    }

    /// Whether the window is non-empty (end strictly after start).
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.end > self.start
    }

    /// Length of the window in minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Calendar date of this window within the anchor week.
    ///
    /// Returns `None` for an out-of-range day index or if the date is not
    /// representable.
    pub fn date_in_week(&self, anchor: NaiveDate) -> Option<NaiveDate> {
        if !self.has_valid_day() {
            return None;
        }
        let offset = u64::try_from(self.day_of_week - FIRST_DAY).ok()?;
        anchor.checked_add_days(Days::new(offset))
    }

    /// Absolute `[open, close)` of this window within the anchor week.
    pub fn project(&self, anchor: NaiveDate) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let date = self.date_in_week(anchor)?;
        Some((date.and_time(self.start), date.and_time(self.end)))
    }
}

/// Parses wall-clock text in either `HH:MM:SS` or `HH:MM` form.
pub fn parse_wall_clock(text: &str) -> Result<NaiveTime, chrono::ParseError> {
    let text = text.trim();
    NaiveTime::parse_from_str(text, "%H:%M:%S").or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
}

/// Serde adapter for wall-clock times accepting both textual precisions.
pub mod wall_clock {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format("%H:%M:%S"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_wall_clock(&text).map_err(|e| {
            serde::de::Error::custom(format!("invalid wall-clock time '{text}': {e}"))
        })
    }
}
