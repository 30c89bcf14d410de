//! Timetable allocation, audit, and KPI evaluation.
//!
//! # Algorithm
//!
//! The default strategy is a greedy, randomized first-fit: every course is
//! expanded into `density` sessions, and each session commits the first
//! (teacher, window, room) candidate free of conflicts with everything
//! committed so far. It is not optimal, but it is fast and never backtracks.
//! An opt-in bounded branch-and-bound improves on it for small instances.
//!
//! # Layers
//!
//! - `resolver`: weekly window → absolute interval
//! - `conflict`: teacher/room double-booking checks
//! - `greedy` / `exhaustive`: placement strategies
//! - `aggregate`: per-course outcomes and warnings
//! - `audit`: independent invariant check of any schedule
//! - `kpi`: fill rate and utilization
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4
//! - Schaerf (1999), "A Survey of Automated Timetabling"

mod aggregate;
mod allocator;
mod audit;
mod conflict;
mod exhaustive;
mod greedy;
mod kpi;
mod resolver;

pub use aggregate::aggregate;
pub use allocator::{allocate, Allocator};
pub use audit::audit_schedule;
pub use conflict::{conflicts, ConflictIndex};
pub use exhaustive::{allocate_exhaustive, DEFAULT_NODE_BUDGET};
pub use greedy::{allocate_first_fit, AllocationOutcome};
pub use kpi::ScheduleKpi;
pub use resolver::{resolve, AnchorWeek, LocalSlot, ResolveError, ResolvedSlot};
