//! Room model.

use serde::{Deserialize, Serialize};

/// Seats assumed when a room carries no capacity.
pub const DEFAULT_ROOM_CAPACITY: i32 = 10;

/// A room classes can be held in.
///
/// Capacity is part of the exchanged contract but does not take part in
/// allocation: a room hosts at most one class at a time regardless of size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Seat count.
    #[serde(default = "default_capacity")]
    pub capacity: i32,
}

fn default_capacity() -> i32 {
    DEFAULT_ROOM_CAPACITY
}

impl Room {
    /// Creates a room with the default capacity.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            capacity: DEFAULT_ROOM_CAPACITY,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the seat count.
    pub fn with_capacity(mut self, capacity: i32) -> Self {
        self.capacity = capacity;
        self
    }
}
