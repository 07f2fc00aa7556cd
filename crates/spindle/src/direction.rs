use serde::Serialize;
use std::collections::VecDeque;
use strum::{Display as StrumDisplay, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, EnumIter, StrumDisplay)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SpinningDirection {
    Left,
    #[default]
    None,
    Right,
}

impl SpinningDirection {
    /// Velocities inside the inclusive dead zone `[-dead_zone, dead_zone]` count as not spinning.
    pub fn classify(velocity: f64, dead_zone: f64) -> Self {
        if velocity >= -dead_zone && velocity <= dead_zone {
            Self::None
        } else if velocity > 0.0 {
            Self::Right
        } else {
            Self::Left
        }
    }

    pub fn is_spinning(&self) -> bool {
        *self != Self::None
    }

    /// +1 for clockwise, -1 for counter-clockwise, 0 at rest.
    pub fn sign(&self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::None => 0.0,
            Self::Right => 1.0,
        }
    }
}

/// Ring of the most recent directions, oldest evicted first.
#[derive(Debug, Clone)]
pub struct DirectionHistory {
    entries: VecDeque<SpinningDirection>,
    capacity: usize,
}

impl DirectionHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, direction: SpinningDirection) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(direction);
    }

    /// Shrinking drops the oldest entries.
    pub fn set_capacity(&mut self, capacity: usize) {
        while self.entries.len() > capacity {
            self.entries.pop_front();
        }
        self.capacity = capacity;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Counts the trailing `None` entries. The flag reports whether a spinning entry precedes them.
    pub fn trailing_rest(&self) -> (usize, bool) {
        let resting = self
            .entries
            .iter()
            .rev()
            .take_while(|d| !d.is_spinning())
            .count();
        (resting, resting < self.entries.len())
    }
}
