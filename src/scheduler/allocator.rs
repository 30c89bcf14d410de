//! Allocation entry points.
//!
//! `Allocator` validates the request, runs the configured strategy with an
//! explicit random source, and aggregates the outcome into a
//! [`ScheduleResult`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use super::aggregate::aggregate;
use super::exhaustive::allocate_exhaustive;
use super::greedy::allocate_first_fit;
use crate::config::{AllocatorConfig, Strategy};
use crate::error::{Result, ScheduleError};
use crate::models::{ScheduleRequest, ScheduleResult};
use crate::validation::validate_request;

/// Timetable allocator.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_timetable::models::{Course, Room, ScheduleRequest, Teacher, TimeWindow};
/// use u_timetable::scheduler::Allocator;
///
/// let request = ScheduleRequest::new("base-1", NaiveDate::from_ymd_opt(2025, 11, 24).unwrap())
///     .with_teacher(
///         Teacher::new("t1")
///             .with_skill("c1")
///             .with_window(TimeWindow::parse(1, "09:00", "11:00").unwrap()),
///     )
///     .with_course(Course::new("c1", 60))
///     .with_room(Room::new("r1"))
///     .with_density(1);
///
/// let result = Allocator::new().with_seed(42).allocate(&request).unwrap();
/// assert_eq!(result.total, 1);
/// assert!(result.is_complete());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Allocator {
    config: AllocatorConfig,
}

impl Allocator {
    /// Allocator with the default configuration (greedy, OS-seeded).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AllocatorConfig) -> Self {
        Self { config }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Allocates with a generator seeded from the configured seed, or from
    /// OS entropy when none is set.
    pub fn allocate(&self, request: &ScheduleRequest) -> Result<ScheduleResult> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.allocate_with_rng(request, &mut rng)
    }

    /// Allocates drawing every shuffle from `rng`.
    ///
    /// # Errors
    /// - [`ScheduleError::InvalidConfig`] if the configuration is unusable.
    /// - [`ScheduleError::InvalidRequest`] with every validation failure.
    pub fn allocate_with_rng<R: Rng + ?Sized>(
        &self,
        request: &ScheduleRequest,
        rng: &mut R,
    ) -> Result<ScheduleResult> {
        self.config.validate()?;
        validate_request(request).map_err(ScheduleError::InvalidRequest)?;

        info!(
            base = %request.base_id,
            teachers = request.teachers.len(),
            courses = request.courses.len(),
            rooms = request.rooms.len(),
            density = request.density,
            strategy = ?self.config.strategy,
            "allocation started"
        );

        let outcome = match self.config.strategy {
            Strategy::FirstFit => allocate_first_fit(request, rng),
            Strategy::Exhaustive { node_budget } => allocate_exhaustive(request, rng, node_budget),
        };

        let result = aggregate(
            &request.courses,
            request.density,
            outcome.committed,
            &outcome.skipped,
        );
        info!(
            base = %request.base_id,
            total = result.total,
            status = ?result.status,
            "allocation finished"
        );
        Ok(result)
    }
}

/// Allocates with the default configuration and the given random source.
pub fn allocate<R: Rng + ?Sized>(request: &ScheduleRequest, rng: &mut R) -> Result<ScheduleResult> {
    Allocator::new().allocate_with_rng(request, rng)
}
