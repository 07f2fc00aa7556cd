use crate::direction::SpinningDirection;
use crate::geometry::{SLICE_WIDTH, slice_remainder};

/// Decides when a stopper passes the marker.
///
/// The catch window sits just before the boundary in the direction of travel and is one tick's
/// travel wide (`|velocity|`), offset by `margin + |velocity|`, so a wheel moving at constant
/// speed lands in it once per slice however fast it turns. A braking wheel can land in the
/// shrinking window on two consecutive ticks; the detector remembers the boundary it last
/// fired for and stays quiet until the wheel approaches another one.
#[derive(Debug, Clone, Copy)]
pub struct BoundaryDetector {
    margin: f64,
    last_fired: Option<(usize, SpinningDirection)>,
}

impl BoundaryDetector {
    pub fn new(margin: f64) -> Self {
        Self {
            margin,
            last_fired: None,
        }
    }

    pub fn set_margin(&mut self, margin: f64) {
        self.margin = margin;
    }

    /// `angle` is the wheel angle before it moved by `velocity` this tick.
    pub fn detect(&mut self, angle: f64, velocity: f64, direction: SpinningDirection) -> bool {
        if !direction.is_spinning() {
            self.last_fired = None;
            return false;
        }

        let boundary = ((angle / SLICE_WIDTH).floor() as usize, direction);
        let crossing = self.is_crossing(slice_remainder(angle), velocity, direction)
            && self.last_fired != Some(boundary);
        if crossing {
            self.last_fired = Some(boundary);
        }
        crossing
    }

    /// `remainder` is the angle within its slice before the wheel moved by `velocity`.
    pub fn is_crossing(
        &self,
        remainder: f64,
        velocity: f64,
        direction: SpinningDirection,
    ) -> bool {
        let incdec = self.margin + direction.sign() * velocity;
        match direction {
            // angle decreasing
            SpinningDirection::Right => remainder > incdec && remainder - velocity < incdec,
            // angle increasing
            SpinningDirection::Left => {
                let edge = SLICE_WIDTH - incdec;
                remainder < edge && remainder - velocity > edge
            }
            SpinningDirection::None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{FULL_TURN, wrap_degrees};

    fn count_crossings(start: f64, velocity: f64, ticks: usize) -> usize {
        let mut detector = BoundaryDetector::new(3.0);
        let direction = SpinningDirection::classify(velocity, 0.1);
        let mut angle = start;
        let mut crossings = 0;
        for _ in 0..ticks {
            let before = angle;
            angle = wrap_degrees(angle - velocity);
            if detector.detect(before, velocity, direction) {
                crossings += 1;
            }
        }
        crossings
    }

    #[test]
    fn test_right_window() {
        let detector = BoundaryDetector::new(3.0);
        let right = SpinningDirection::Right;

        // window for velocity 2 is (5, 7)
        assert!(detector.is_crossing(6.0, 2.0, right));
        assert!(!detector.is_crossing(5.0, 2.0, right));
        assert!(!detector.is_crossing(7.0, 2.0, right));
        assert!(!detector.is_crossing(30.0, 2.0, right));
    }

    #[test]
    fn test_left_window() {
        let detector = BoundaryDetector::new(3.0);
        let left = SpinningDirection::Left;

        // window for velocity -2 is (38, 40)
        assert!(detector.is_crossing(39.0, -2.0, left));
        assert!(!detector.is_crossing(40.0, -2.0, left));
        assert!(!detector.is_crossing(38.0, -2.0, left));
        assert!(!detector.is_crossing(10.0, -2.0, left));
    }

    #[test]
    fn test_resting_wheel_never_crosses() {
        let detector = BoundaryDetector::new(3.0);
        for remainder in [0.0, 3.0, 22.5, 44.9] {
            assert!(!detector.is_crossing(remainder, 0.0, SpinningDirection::None));
        }
    }

    #[test]
    fn test_one_crossing_per_slice_at_any_speed() {
        // velocities that divide a full turn evenly, so each run covers exactly 8 slices
        for velocity in [0.5, 1.0, 2.5, 4.5, 7.5, 9.0, 15.0, 18.0, 20.0] {
            let ticks = (FULL_TURN / velocity).round() as usize;
            assert_eq!(count_crossings(1.3, velocity, ticks), 8, "velocity {velocity}");
            assert_eq!(count_crossings(1.3, -velocity, ticks), 8, "velocity -{velocity}");
        }
    }

    #[test]
    fn test_braking_wheel_fires_once_per_boundary() {
        let mut detector = BoundaryDetector::new(3.0);
        let right = SpinningDirection::Right;

        // remainder 6.5 is inside (5, 7) at velocity 2
        assert!(detector.detect(96.5, 2.0, right));
        // slowed to 1.5: 94.6 sits inside the new window (4.5, 6) for the same boundary
        assert!(detector.is_crossing(4.5 + 0.1, 1.5, right));
        assert!(!detector.detect(94.6, 1.5, right));
        // the next boundary down still fires
        assert!(detector.detect(50.6, 1.5, right));
    }

    #[test]
    fn test_reversal_and_rest_rearm_detector() {
        let mut detector = BoundaryDetector::new(3.0);
        assert!(detector.detect(96.5, 2.0, SpinningDirection::Right));
        // same slice, opposite boundary
        assert!(detector.detect(129.0, -2.0, SpinningDirection::Left));

        assert!(!detector.detect(129.0, 0.0, SpinningDirection::None));
        assert!(detector.detect(129.0, -2.0, SpinningDirection::Left));
    }
}
