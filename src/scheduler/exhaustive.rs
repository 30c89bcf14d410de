//! Bounded exhaustive allocator (branch and bound).
//!
//! Searches for the placement with the most committed classes instead of
//! accepting the first fit. The greedy pass runs first on the same random
//! stream and its result is the initial incumbent, so the search never
//! returns fewer classes than [`allocate_first_fit`](super::allocate_first_fit)
//! would with that stream.
//!
//! # Algorithm
//!
//! Each course with a qualified teacher becomes `min(density, slot bound)`
//! sessions. Depth-first over sessions: at each one, either commit one
//! feasible (teacher, window, room) candidate or skip. Reductions:
//! - Skipping a session also skips the remaining sessions of that course.
//! - Within a course, candidates are taken in strictly increasing
//!   (start, teacher, room) order, so each set of placements is visited once.
//! - Prune when committed + remaining sessions cannot beat the incumbent.
//!
//! The search keeps its own frame stack; a course skip replaces the current
//! frame, so the stack only grows with committed placements. It stops when
//! every session is placed or the node budget is spent, and returns the best
//! set seen.

use rand::Rng;
use tracing::debug;

use super::conflict::ConflictIndex;
use super::greedy::{first_fit_pass, AllocationOutcome, CourseOrder};
use super::resolver::AnchorWeek;
use crate::models::{ScheduleRequest, ScheduledClass};

/// Node budget used when none is configured.
pub const DEFAULT_NODE_BUDGET: u64 = 100_000;

/// One open decision: the session at `depth` and its untried candidates.
struct Frame {
    depth: usize,
    candidates: Vec<ScheduledClass>,
    next: usize,
    /// A candidate of this frame is currently committed.
    placed: bool,
}

struct Search<'s, 'r> {
    week: &'s AnchorWeek,
    orders: &'s [CourseOrder<'r>],
    /// Course order index per session; sessions of a course are contiguous.
    sessions: Vec<usize>,
    /// First session index of the next course, per session index.
    next_course: Vec<usize>,
    index: ConflictIndex,
    current: Vec<ScheduledClass>,
    best: Vec<ScheduledClass>,
    nodes: u64,
    budget: u64,
}

impl<'s, 'r> Search<'s, 'r> {
    fn new(
        week: &'s AnchorWeek,
        orders: &'s [CourseOrder<'r>],
        sessions: Vec<usize>,
        incumbent: Vec<ScheduledClass>,
        budget: u64,
    ) -> Self {
        let n = sessions.len();
        let mut next_course = vec![n; n];
        for i in (0..n).rev() {
            next_course[i] = if i + 1 < n && sessions[i + 1] == sessions[i] {
                next_course[i + 1]
            } else {
                i + 1
            };
        }

        Self {
            week,
            orders,
            sessions,
            next_course,
            index: ConflictIndex::new(),
            current: Vec::new(),
            best: incumbent,
            nodes: 0,
            budget,
        }
    }

    fn done(&self) -> bool {
        self.nodes >= self.budget || self.best.len() == self.sessions.len()
    }

    /// Visits the node at `depth`. Returns a frame when it needs branching.
    fn enter(&mut self, depth: usize) -> Option<Frame> {
        if self.done() {
            return None;
        }
        self.nodes += 1;

        let remaining = self.sessions.len() - depth;
        if self.current.len() + remaining <= self.best.len() {
            return None;
        }
        if depth == self.sessions.len() {
            self.best = self.current.clone();
            return None;
        }

        Some(Frame {
            depth,
            candidates: self.candidates(depth),
            next: 0,
            placed: false,
        })
    }

    fn run(&mut self) {
        let mut stack: Vec<Frame> = Vec::new();
        stack.extend(self.enter(0));

        while let Some(frame) = stack.last_mut() {
            if frame.placed {
                frame.placed = false;
                if let Some(undone) = self.current.pop() {
                    self.index.remove(&undone);
                }
                if self.done() {
                    break;
                }
            }

            if let Some(candidate) = frame.candidates.get(frame.next).cloned() {
                frame.next += 1;
                frame.placed = true;
                let depth = frame.depth + 1;
                self.index.insert(&candidate);
                self.current.push(candidate);
                stack.extend(self.enter(depth));
            } else {
                // Every candidate tried; skip the rest of this course.
                let skip_to = self.next_course[frame.depth];
                stack.pop();
                stack.extend(self.enter(skip_to));
            }
        }
    }

    /// Feasible, de-duplicated candidates for the session at `depth`.
    fn candidates(&self, depth: usize) -> Vec<ScheduledClass> {
        let order = &self.orders[self.sessions[depth]];
        let course = order.course;

        // Previous session of the same course, if any, was committed.
        let floor = (depth > 0 && self.sessions[depth - 1] == self.sessions[depth])
            .then(|| self.current.last())
            .flatten()
            .map(order_key);

        let mut out: Vec<ScheduledClass> = Vec::new();
        for teacher in &order.teachers {
            for window in &teacher.availability {
                let Ok(slot) = self.week.slot(window, course) else {
                    continue;
                };
                for room in &order.rooms {
                    if !self.index.is_free(&teacher.id, &room.id, slot.start, slot.end) {
                        continue;
                    }
                    let candidate = slot.class_for(course, teacher, room);
                    if floor.is_some_and(|f| order_key(&candidate) <= f) {
                        continue;
                    }
                    if out.iter().any(|c| order_key(c) == order_key(&candidate)) {
                        continue;
                    }
                    out.push(candidate);
                }
            }
        }
        out
    }
}

type OrderKey<'c> = (chrono::DateTime<chrono::FixedOffset>, &'c str, &'c str);

fn order_key(class: &ScheduledClass) -> OrderKey<'_> {
    (class.start_time, class.teacher_id.as_str(), class.room_id.as_str())
}

/// Runs the bounded exhaustive search over a (validated) request.
pub fn allocate_exhaustive<R: Rng + ?Sized>(
    request: &ScheduleRequest,
    rng: &mut R,
    node_budget: u64,
) -> AllocationOutcome {
    let week = AnchorWeek::of(request);
    let incumbent = first_fit_pass(request, &week, rng);
    let greedy_count = incumbent.committed.len();

    let density = usize::try_from(request.density).unwrap_or(usize::MAX);
    let mut orders = Vec::new();
    let mut sessions = Vec::new();
    for course in &request.courses {
        let Some(mut order) = CourseOrder::of(request, course) else {
            continue;
        };
        order.reshuffle(rng);
        let count = density.min(order.slot_bound(&week));
        sessions.extend(std::iter::repeat(orders.len()).take(count));
        orders.push(order);
    }
    let session_count = sessions.len();

    let mut search = Search::new(&week, &orders, sessions, incumbent.committed, node_budget);
    search.run();

    if search.nodes >= search.budget {
        debug!(budget = search.budget, "node budget exhausted; returning best placement found");
    }
    debug!(
        nodes = search.nodes,
        sessions = session_count,
        greedy = greedy_count,
        placed = search.best.len(),
        "exhaustive search finished"
    );

    AllocationOutcome {
        committed: search.best,
        skipped: incumbent.skipped,
    }
}
