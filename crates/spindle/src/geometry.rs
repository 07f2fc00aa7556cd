pub const FULL_TURN: f64 = 360.0;
pub const SLICE_COUNT: usize = 8;
pub const SLICE_WIDTH: f64 = FULL_TURN / SLICE_COUNT as f64; // one stopper per slice
pub const HALF_SLICE_OFFSET: f64 = SLICE_WIDTH / 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Wraps an angle in degrees into `[0, 360)`.
///
/// `rem_euclid` can round a tiny negative input up to exactly 360.0, which is folded back to 0.
pub fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(FULL_TURN);
    if wrapped >= FULL_TURN { 0.0 } else { wrapped }
}

/// Position of the wheel inside its current slice, in `[0, 45)`.
pub fn slice_remainder(angle: f64) -> f64 {
    let rem = angle.rem_euclid(SLICE_WIDTH);
    if rem >= SLICE_WIDTH { 0.0 } else { rem }
}

/// Index of the slice resting under the fixed stopper marker.
///
/// `floor(((360 - angle + 22.5) mod 360) / 45)`, so angle 0 puts slice 0 centered under the marker
/// and slice indices run counter-clockwise around the wheel.
pub fn slice_index(angle: f64) -> usize {
    let pos = wrap_degrees(FULL_TURN - angle + HALF_SLICE_OFFSET);
    ((pos / SLICE_WIDTH).floor() as usize).min(SLICE_COUNT - 1)
}

/// Clockwise screen angle (degrees from north) of the center of slice `index` when the wheel
/// sits at `angle`. Inverse of [`slice_index`] for drawing.
pub fn slice_center_on_screen(index: usize, angle: f64) -> f64 {
    wrap_degrees(-(index as f64 * SLICE_WIDTH) - angle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_degrees() {
        let cases = vec![
            (0.0, 0.0),
            (360.0, 0.0),
            (-20.0, 340.0),
            (725.0, 5.0),
            (-1e-20, 0.0),
        ];

        for (input, expected) in cases {
            let wrapped = wrap_degrees(input);
            assert!((wrapped - expected).abs() < 1e-9, "{input} -> {wrapped}");
            assert!((0.0..360.0).contains(&wrapped));
        }
    }

    #[test]
    fn test_slice_index_at_rest_angles() {
        assert_eq!(slice_index(0.0), 0);
        // marker position 352.5
        assert_eq!(slice_index(30.0), 7);
        assert_eq!(slice_index(45.0), 7);
        // marker position 360 folds back onto the start of slice 0
        assert_eq!(slice_index(22.5), 0);
        assert_eq!(slice_index(22.6), 7);
        assert_eq!(slice_index(337.5), 1);
        assert_eq!(slice_index(180.0), 4);
        assert_eq!(slice_index(359.999), 0);
    }

    #[test]
    fn test_every_slice_is_reachable() {
        let mut seen = [false; SLICE_COUNT];
        for step in 0..3600 {
            seen[slice_index(step as f64 / 10.0)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_slice_center_lies_under_marker() {
        for index in 0..SLICE_COUNT {
            // rotate the wheel so that slice `index` is centered under the marker
            let angle = wrap_degrees(-(index as f64) * SLICE_WIDTH);
            assert!(slice_center_on_screen(index, angle).abs() < 1e-9);
            assert_eq!(slice_index(angle), index);
        }
    }
}
