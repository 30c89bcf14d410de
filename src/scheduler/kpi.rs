//! Schedule quality metrics (KPIs).
//!
//! Computes timetable indicators from a request and the result produced
//! for it.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Requested sessions | courses × density |
//! | Placed sessions | committed classes |
//! | Fill rate | placed / requested |
//! | Busy minutes | Sum of class lengths per teacher and per room |
//! | Teacher utilization | busy / union of projected availability minutes |
//! | Fully scheduled | Courses with outcome Full |

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::models::{OutcomeStatus, ScheduleRequest, ScheduleResult, Teacher};

/// Timetable performance indicators.
///
/// All time values are in minutes.
#[derive(Debug, Clone)]
pub struct ScheduleKpi {
    /// Sessions asked for: courses × density.
    pub requested_sessions: usize,
    /// Sessions actually committed.
    pub placed_sessions: usize,
    /// placed / requested (1.0 when nothing was requested).
    pub fill_rate: f64,
    /// Busy minutes per teacher id.
    pub teacher_minutes: HashMap<String, i64>,
    /// Busy minutes per room id.
    pub room_minutes: HashMap<String, i64>,
    /// Per-teacher utilization (0.0..1.0) of its availability.
    pub utilization_by_teacher: HashMap<String, f64>,
    /// Mean teacher utilization over teachers with any availability.
    pub avg_teacher_utilization: f64,
    /// Courses that received every requested session.
    pub courses_fully_scheduled: usize,
}

impl ScheduleKpi {
    /// Computes KPIs from a request and its result.
    pub fn calculate(request: &ScheduleRequest, result: &ScheduleResult) -> Self {
        let density = usize::try_from(request.density).unwrap_or(usize::MAX);
        let requested_sessions = request.courses.len().saturating_mul(density);
        let placed_sessions = result.results.len();

        let mut teacher_minutes: HashMap<String, i64> = HashMap::new();
        let mut room_minutes: HashMap<String, i64> = HashMap::new();
        for class in &result.results {
            let minutes = class.duration_minutes();
            *teacher_minutes.entry(class.teacher_id.clone()).or_insert(0) += minutes;
            *room_minutes.entry(class.room_id.clone()).or_insert(0) += minutes;
        }

        let mut utilization_by_teacher = HashMap::new();
        for teacher in &request.teachers {
            let available = available_minutes(teacher, request);
            if available == 0 {
                continue;
            }
            let busy = teacher_minutes.get(&teacher.id).copied().unwrap_or(0);
            utilization_by_teacher.insert(teacher.id.clone(), busy as f64 / available as f64);
        }
        let avg_teacher_utilization = if utilization_by_teacher.is_empty() {
            0.0
        } else {
            let sum: f64 = utilization_by_teacher.values().sum();
            sum / utilization_by_teacher.len() as f64
        };

        let fill_rate = if requested_sessions == 0 {
            1.0
        } else {
            placed_sessions as f64 / requested_sessions as f64
        };

        let courses_fully_scheduled = result
            .outcomes
            .iter()
            .filter(|o| o.status == OutcomeStatus::Full)
            .count();

        Self {
            requested_sessions,
            placed_sessions,
            fill_rate,
            teacher_minutes,
            room_minutes,
            utilization_by_teacher,
            avg_teacher_utilization,
            courses_fully_scheduled,
        }
    }

    /// Whether the schedule meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_fill_rate: f64, min_utilization: f64) -> bool {
        self.fill_rate >= min_fill_rate && self.avg_teacher_utilization >= min_utilization
    }
}

/// Minutes covered by the union of a teacher's projected windows.
fn available_minutes(teacher: &Teacher, request: &ScheduleRequest) -> i64 {
    let mut spans: Vec<(NaiveDateTime, NaiveDateTime)> = teacher
        .availability
        .iter()
        .filter(|w| w.is_well_formed())
        .filter_map(|w| w.project(request.start_date))
        .collect();
    spans.sort();

    let mut total = 0;
    let mut current: Option<(NaiveDateTime, NaiveDateTime)> = None;
    for (start, end) in spans {
        current = match current {
            Some((s, e)) if start <= e => Some((s, e.max(end))),
            Some((s, e)) => {
                total += (e - s).num_minutes();
                Some((start, end))
            }
            None => Some((start, end)),
        };
    }
    if let Some((s, e)) = current {
        total += (e - s).num_minutes();
    }
    total
}
