//! Conflict detection between a candidate class and committed classes.
//!
//! Two classes conflict iff their half-open intervals overlap AND they share
//! a teacher or a room.
//!
//! - [`conflicts`]: the plain O(n) scan over all committed classes.
//! - [`ConflictIndex`]: per-teacher and per-room interval lists kept sorted
//!   by start. Each check is a binary search, O(log n).
//!
//! # Index Invariant
//! Intervals stored under one resource never overlap each other, since an
//! interval is only inserted after it passed the check. Sorted by start,
//! they are therefore also sorted by end, which is what makes the binary
//! search valid.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};

use crate::models::ScheduledClass;

/// Whether `candidate` collides with any committed class.
pub fn conflicts(committed: &[ScheduledClass], candidate: &ScheduledClass) -> bool {
    committed
        .iter()
        .any(|c| c.shares_resource(candidate) && c.overlaps(candidate))
}

type Instant = DateTime<FixedOffset>;

/// Sorted, pairwise-disjoint `[start, end)` intervals for one resource.
#[derive(Debug, Clone, Default)]
struct Timeline {
    intervals: Vec<(Instant, Instant)>,
}

impl Timeline {
    fn overlaps(&self, start: Instant, end: Instant) -> bool {
        // First interval that ends after the candidate starts.
        let idx = self.intervals.partition_point(|&(_, e)| e <= start);
        self.intervals
            .get(idx)
            .is_some_and(|&(s, _)| s < end)
    }

    fn insert(&mut self, start: Instant, end: Instant) {
        let idx = self.intervals.partition_point(|&(s, _)| s < start);
        self.intervals.insert(idx, (start, end));
    }

    fn remove(&mut self, start: Instant, end: Instant) -> bool {
        match self.intervals.binary_search(&(start, end)) {
            Ok(idx) => {
                self.intervals.remove(idx);
                true
            }
            Err(_) => false,
        }
    }
}

/// Committed classes indexed by teacher and by room.
#[derive(Debug, Clone, Default)]
pub struct ConflictIndex {
    teachers: HashMap<String, Timeline>,
    rooms: HashMap<String, Timeline>,
    len: usize,
}

impl ConflictIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index from already committed, mutually conflict-free classes.
    pub fn from_classes<'a>(classes: impl IntoIterator<Item = &'a ScheduledClass>) -> Self {
        let mut index = Self::new();
        for class in classes {
            index.insert(class);
        }
        index
    }

    /// Number of indexed classes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no class is indexed.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `candidate` collides with an indexed class.
    pub fn conflicts(&self, candidate: &ScheduledClass) -> bool {
        !self.is_free(
            &candidate.teacher_id,
            &candidate.room_id,
            candidate.start_time,
            candidate.end_time,
        )
    }

    /// Whether both the teacher and the room are idle over `[start, end)`.
    pub fn is_free(
        &self,
        teacher_id: &str,
        room_id: &str,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> bool {
        let busy = |map: &HashMap<String, Timeline>, id: &str| {
            map.get(id).is_some_and(|t| t.overlaps(start, end))
        };
        !busy(&self.teachers, teacher_id) && !busy(&self.rooms, room_id)
    }

    /// Records a committed class. Callers must check [`Self::conflicts`] first.
    pub fn insert(&mut self, class: &ScheduledClass) {
        let (start, end) = (class.start_time, class.end_time);
        self.teachers
            .entry(class.teacher_id.clone())
            .or_default()
            .insert(start, end);
        self.rooms
            .entry(class.room_id.clone())
            .or_default()
            .insert(start, end);
        self.len += 1;
    }

    /// Withdraws a previously inserted class. Returns `false` if absent.
    pub fn remove(&mut self, class: &ScheduledClass) -> bool {
        let (start, end) = (class.start_time, class.end_time);
        let removed_teacher = self
            .teachers
            .get_mut(&class.teacher_id)
            .is_some_and(|t| t.remove(start, end));
        let removed_room = self
            .rooms
            .get_mut(&class.room_id)
            .is_some_and(|t| t.remove(start, end));
        if removed_teacher && removed_room {
            self.len -= 1;
            true
        } else {
            false
        }
    }
}
