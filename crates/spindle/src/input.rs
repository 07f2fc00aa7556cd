use crate::geometry::Point;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum InputError {
    #[error("Invalid pointer input: ({x}, {y})")]
    InvalidInput { x: f64, y: f64 },
}

/// Turns pointer drags into velocity changes.
///
/// Dragging pulls the rim along with the cursor: down on the right half or up on the left half
/// spins clockwise, the opposite combinations spin counter-clockwise.
#[derive(Debug, Clone)]
pub struct InputSampler {
    increment: f64,
    last_y: f64,
}

impl InputSampler {
    pub fn new(increment: f64, start_y: f64) -> Self {
        Self {
            increment,
            last_y: start_y,
        }
    }

    pub fn set_increment(&mut self, increment: f64) {
        self.increment = increment;
    }

    /// Returns the velocity delta while the pointer is pressed, `None` when released.
    pub fn sample(
        &mut self,
        pointer: Point,
        pressed: bool,
        center: Point,
    ) -> Result<Option<f64>, InputError> {
        for point in [pointer, center] {
            if !point.is_finite() {
                return Err(InputError::InvalidInput {
                    x: point.x,
                    y: point.y,
                });
            }
        }

        let delta = pressed.then(|| {
            let in_left_half = pointer.x <= center.x;
            let downward = self.last_y < pointer.y;
            match (downward, in_left_half) {
                (true, true) | (false, false) => -self.increment,
                (true, false) | (false, true) => self.increment,
            }
        });

        self.last_y = pointer.y;
        Ok(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: Point = Point { x: 400.0, y: 400.0 };

    #[test]
    fn test_drag_table() {
        let cases = vec![
            // (x, y, expected) starting from y = 400
            (100.0, 410.0, -0.1), // down, left half
            (700.0, 410.0, 0.1),  // down, right half
            (100.0, 390.0, 0.1),  // up, left half
            (700.0, 390.0, -0.1), // up, right half
            (400.0, 410.0, -0.1), // center line counts as left half
        ];

        for (x, y, expected) in cases {
            let mut sampler = InputSampler::new(0.1, CENTER.y);
            let delta = sampler.sample(Point::new(x, y), true, CENTER).unwrap();
            assert_eq!(delta, Some(expected), "({x}, {y})");
        }
    }

    #[test]
    fn test_released_pointer_still_tracks_y() {
        let mut sampler = InputSampler::new(0.1, CENTER.y);
        assert_eq!(sampler.sample(Point::new(700.0, 500.0), false, CENTER), Ok(None));

        // y = 450 is above the last seen 500, so this is an upward drag
        let delta = sampler.sample(Point::new(700.0, 450.0), true, CENTER).unwrap();
        assert_eq!(delta, Some(-0.1));
    }

    #[test]
    fn test_non_finite_pointer_is_rejected() {
        let mut sampler = InputSampler::new(0.1, CENTER.y);
        let err = sampler
            .sample(Point::new(f64::NAN, 10.0), true, CENTER)
            .unwrap_err();
        assert!(matches!(err, InputError::InvalidInput { y, .. } if y == 10.0));

        let err = sampler.sample(Point::new(1.0, 1.0), false, Point::new(0.0, f64::INFINITY));
        assert!(err.is_err());

        // a rejected sample does not disturb the remembered y
        let delta = sampler.sample(Point::new(100.0, 410.0), true, CENTER).unwrap();
        assert_eq!(delta, Some(-0.1));
    }
}
