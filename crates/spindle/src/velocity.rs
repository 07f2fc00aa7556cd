use crate::config::PhysicsConfig;
use crate::direction::SpinningDirection;
use rand::Rng;
use rand::rngs::StdRng;

/// `(upper bound of |velocity|, braking factor)`, sorted by bound, inclusive.
///
/// Slow wheels lose little speed per tick and coast for a long time, fast wheels brake at
/// nearly the full base rate.
pub const BRAKING_TABLE: [(f64, f64); 15] = [
    (0.4, 0.08),
    (0.5, 0.09),
    (0.6, 0.1),
    (0.7, 0.11),
    (0.8, 0.125),
    (0.9, 0.15),
    (1.0, 0.22),
    (1.1, 0.31),
    (1.2, 0.4),
    (1.3, 0.5),
    (1.4, 0.6),
    (2.0, 0.7),
    (3.0, 0.8),
    (4.0, 0.9),
    (5.0, 0.95),
];
pub const FULL_BRAKING: f64 = 1.0;
/// Slowest velocity of a keyboard or CLI spin.
pub const FLING_MIN_VELOCITY: f64 = 8.0;

pub fn braking_factor(velocity: f64) -> f64 {
    let speed = velocity.abs();
    BRAKING_TABLE
        .iter()
        .find(|(bound, _)| speed <= *bound)
        .map_or(FULL_BRAKING, |(_, factor)| *factor)
}

/// Owns the velocity update rules: dragging, coasting with detents, clamping.
#[derive(Debug, Clone)]
pub struct VelocityController {
    physics: PhysicsConfig,
    rng: StdRng,
}

impl VelocityController {
    pub fn new(physics: PhysicsConfig, rng: StdRng) -> Self {
        Self { physics, rng }
    }

    pub fn set_physics(&mut self, physics: PhysicsConfig) {
        self.physics = physics;
    }

    pub fn drag(&self, velocity: f64, delta: f64) -> f64 {
        velocity + delta
    }

    /// One tick of free spinning.
    ///
    /// `direction` is the direction the tick started with. `detent` is set on the tick after a
    /// stopper passed the marker and catches the wheel with one random bump.
    pub fn coast(&mut self, velocity: f64, direction: SpinningDirection, detent: bool) -> f64 {
        let factor = if direction.is_spinning() {
            braking_factor(velocity)
        } else {
            FULL_BRAKING
        };
        let step = self.physics.brake_decrement * factor;
        let mut next = match direction {
            SpinningDirection::Right => velocity - step,
            _ => velocity + step,
        };

        if detent {
            let bump = self
                .rng
                .random_range(self.physics.detent_min..=self.physics.detent_max);
            next -= direction.sign() * bump;
        }

        let still = self.physics.stillness_threshold;
        match direction {
            SpinningDirection::None => 0.0,
            SpinningDirection::Right if next <= still => 0.0,
            SpinningDirection::Left if next >= -still => 0.0,
            _ => next,
        }
    }

    pub fn clamp(&self, velocity: f64) -> f64 {
        velocity.clamp(-self.physics.max_velocity, self.physics.max_velocity)
    }
}

/// Random clockwise spin between [`FLING_MIN_VELOCITY`] and the configured maximum.
pub fn random_fling(rng: &mut impl Rng, physics: &PhysicsConfig) -> f64 {
    let max = physics.max_velocity.max(FLING_MIN_VELOCITY);
    rng.random_range(FLING_MIN_VELOCITY..=max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn controller() -> VelocityController {
        VelocityController::new(PhysicsConfig::default(), StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_braking_table_is_sorted() {
        assert!(BRAKING_TABLE.windows(2).all(|w| w[0].0 < w[1].0 && w[0].1 < w[1].1));
    }

    #[test]
    fn test_braking_factor_bounds_are_inclusive() {
        let cases = vec![
            (0.0, 0.08),
            (0.4, 0.08),
            (0.41, 0.09),
            (1.0, 0.22),
            (1.35, 0.6),
            (2.0, 0.7),
            (4.5, 0.95),
            (5.0, 0.95),
            (5.01, 1.0),
            (20.0, 1.0),
        ];

        for (velocity, expected) in cases {
            assert_eq!(braking_factor(velocity), expected, "velocity {velocity}");
        }
    }

    #[test]
    fn test_braking_factor_is_mirror_symmetric() {
        for step in 0..=2200 {
            let velocity = step as f64 / 100.0;
            assert_eq!(braking_factor(velocity), braking_factor(-velocity));
        }
    }

    #[test]
    fn test_coast_brakes_toward_zero() {
        let mut controller = controller();
        let right = controller.coast(3.0, SpinningDirection::Right, false);
        assert!((right - (3.0 - 0.02 * 0.8)).abs() < 1e-12);

        let left = controller.coast(-3.0, SpinningDirection::Left, false);
        assert!((left - (-3.0 + 0.02 * 0.8)).abs() < 1e-12);
    }

    #[test]
    fn test_coast_applies_detent_bump() {
        let mut controller = controller();
        let braked = 2.0 - 0.02 * 0.7;
        for _ in 0..50 {
            let right = controller.coast(2.0, SpinningDirection::Right, true);
            assert!(right <= braked - 0.01 + 1e-12 && right >= braked - 0.04 - 1e-12);

            let left = controller.coast(-2.0, SpinningDirection::Left, true);
            assert!(left >= -braked + 0.01 - 1e-12 && left <= -braked + 0.04 + 1e-12);
        }
    }

    #[test]
    fn test_coast_zeroing_rules() {
        let mut controller = controller();
        assert_eq!(controller.coast(0.05, SpinningDirection::None, false), 0.0);
        assert_eq!(controller.coast(-0.05, SpinningDirection::None, false), 0.0);
        // 0.0115 - 0.0016 lands under the stillness threshold
        assert_eq!(controller.coast(0.0115, SpinningDirection::Right, false), 0.0);
        assert_eq!(controller.coast(-0.0115, SpinningDirection::Left, false), 0.0);
        assert!(controller.coast(0.2, SpinningDirection::Right, false) > 0.0);
    }

    #[test]
    fn test_clamp() {
        let controller = controller();
        assert_eq!(controller.clamp(25.0), 20.0);
        assert_eq!(controller.clamp(-25.0), -20.0);
        assert_eq!(controller.clamp(19.5), 19.5);
    }

    #[test]
    fn test_random_fling_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let physics = PhysicsConfig::default();
        for _ in 0..100 {
            let velocity = random_fling(&mut rng, &physics);
            assert!((FLING_MIN_VELOCITY..=20.0).contains(&velocity));
        }

        let slow = PhysicsConfig {
            max_velocity: 2.0,
            ..PhysicsConfig::default()
        };
        assert_eq!(random_fling(&mut rng, &slow), FLING_MIN_VELOCITY);
    }

    #[test]
    fn test_drag_has_no_braking() {
        let controller = controller();
        assert_eq!(controller.drag(1.5, -0.1), 1.4);
    }
}
