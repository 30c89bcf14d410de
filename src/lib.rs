//! Weekly timetable allocation for teaching sites.
//!
//! Places each requested course `density` times into one anchor week,
//! assigning a qualified teacher inside one of their availability windows
//! and a room, so that no teacher or room is double-booked.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Teacher`, `Course`, `Room`, `TimeWindow`,
//!   `ScheduleRequest`, `ScheduledClass`, `ScheduleResult`
//! - **`validation`**: Input integrity checks (duplicate IDs, bad windows,
//!   durations, density, offset)
//! - **`scheduler`**: Allocation strategies, result aggregation, audit, KPIs
//! - **`config`**: Allocator strategy and seed
//! - **`error`**: Request-level errors
//!
//! # Example
//!
//! ```
//! use u_timetable::{Allocator, ScheduleRequest};
//!
//! let json = r#"{
//!     "base_id": "base-1",
//!     "start_date": "2025-11-24",
//!     "teachers": [{
//!         "id": "t1", "name": "Kim", "skills": ["c1"],
//!         "availability": [{"day_of_week": 1, "start_time": "09:00:00", "end_time": "11:00:00"}]
//!     }],
//!     "courses": [{"id": "c1", "name": "Robotics", "duration": 60}],
//!     "rooms": [{"id": "r1", "name": "Lab", "capacity": 12}],
//!     "density": 1
//! }"#;
//!
//! let request = ScheduleRequest::from_json(json).unwrap();
//! let result = Allocator::new().with_seed(7).allocate(&request).unwrap();
//! assert_eq!(result.total, 1);
//! assert_eq!(result.results[0].start_time.to_rfc3339(), "2025-11-24T09:00:00+00:00");
//! ```
//!
//! # Logging
//!
//! Emits `tracing` events; no subscriber is installed by the library.

pub mod config;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use config::{AllocatorConfig, Strategy};
pub use error::{Result, ScheduleError};
pub use models::{ScheduleRequest, ScheduleResult, ScheduledClass};
pub use scheduler::{allocate, audit_schedule, Allocator, ScheduleKpi};
