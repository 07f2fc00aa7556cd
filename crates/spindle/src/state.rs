use crate::direction::SpinningDirection;
use crate::geometry::wrap_degrees;
use serde::Serialize;

/// The wheel's motion, mutated once per tick.
#[derive(Debug, Clone, Default)]
pub struct SpinState {
    pub angle: f64,
    pub velocity: f64,
    pub direction: SpinningDirection,
}

impl SpinState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rotates by the current velocity and returns the angle from before the move.
    pub fn advance(&mut self) -> f64 {
        let before = self.angle;
        self.angle = wrap_degrees(self.angle - self.velocity);
        before
    }

    pub fn snapshot(&self) -> SpinSnapshot {
        SpinSnapshot {
            angle: self.angle,
            velocity: self.velocity,
            direction: self.direction,
        }
    }
}

/// Read-only copy of the state handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SpinSnapshot {
    pub angle: f64,
    pub velocity: f64,
    pub direction: SpinningDirection,
}
