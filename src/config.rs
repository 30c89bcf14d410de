//! Allocator configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::scheduler::DEFAULT_NODE_BUDGET;

/// Placement strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Strategy {
    /// One greedy pass; committed classes are never revisited.
    #[default]
    FirstFit,
    /// Branch and bound seeded with the greedy result, capped at
    /// `node_budget` search nodes.
    Exhaustive {
        #[serde(default = "default_node_budget")]
        node_budget: u64,
    },
}

fn default_node_budget() -> u64 {
    DEFAULT_NODE_BUDGET
}

impl Strategy {
    /// Exhaustive search with the default node budget.
    pub fn exhaustive() -> Self {
        Self::Exhaustive {
            node_budget: DEFAULT_NODE_BUDGET,
        }
    }
}

/// Settings for an [`Allocator`](crate::scheduler::Allocator).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    pub strategy: Strategy,
    /// Fixed seed for reproducible runs. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl AllocatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Loads and validates a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ScheduleError::InvalidConfig(format!("cannot decode config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the allocator cannot run with.
    pub fn validate(&self) -> Result<()> {
        if let Strategy::Exhaustive { node_budget: 0 } = self.strategy {
            return Err(ScheduleError::InvalidConfig(
                "exhaustive node_budget must be positive".into(),
            ));
        }
        Ok(())
    }
}
