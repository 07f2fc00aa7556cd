use crate::boundary::BoundaryDetector;
use crate::config::PhysicsConfig;
use crate::direction::SpinningDirection;
use crate::geometry::{self, Point};
use crate::input::{InputError, InputSampler};
use crate::rest::{RestDetector, RestPhase};
use crate::state::{SpinSnapshot, SpinState};
use crate::velocity::VelocityController;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use strum::{Display as StrumDisplay, EnumIter};

/// Sounds the wheel asks its audio collaborator to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Clip {
    Stopper,
    Settle,
}

/// Fire-and-forget audio output. Implementations swallow their own failures.
pub trait AudioSink {
    fn play(&mut self, clip: Clip);
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TickResult {
    pub new_angle: f64,
    pub play_stopper_sound: bool,
    pub fire_settle_event: bool,
}

impl TickResult {
    pub fn clips(&self) -> impl Iterator<Item = Clip> + use<> {
        let stopper = self.play_stopper_sound.then_some(Clip::Stopper);
        let settle = self.fire_settle_event.then_some(Clip::Settle);
        stopper.into_iter().chain(settle)
    }

    pub fn dispatch(&self, sink: &mut impl AudioSink) {
        self.clips().for_each(|clip| sink.play(clip));
    }
}

/// The spinning wheel: sole owner and writer of its [`SpinState`].
#[derive(Debug, Clone)]
pub struct Wheel {
    physics: PhysicsConfig,
    state: SpinState,
    center: Point,
    input: InputSampler,
    velocity: VelocityController,
    boundary: BoundaryDetector,
    rest: RestDetector,
    /// A stopper passed the marker on the previous tick.
    detent: bool,
}

impl Wheel {
    pub fn new(physics: PhysicsConfig, center: Point) -> Self {
        Self::with_rng(physics, center, StdRng::from_os_rng())
    }

    pub fn seeded(physics: PhysicsConfig, center: Point, seed: u64) -> Self {
        Self::with_rng(physics, center, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(physics: PhysicsConfig, center: Point, rng: StdRng) -> Self {
        log::debug!("Initializing wheel at ({}, {})", center.x, center.y);
        Self {
            physics,
            state: SpinState::new(),
            center,
            input: InputSampler::new(physics.drag_increment, center.y),
            velocity: VelocityController::new(physics, rng),
            boundary: BoundaryDetector::new(physics.boundary_margin),
            rest: RestDetector::new(physics.rest_threshold, physics.history_capacity),
            detent: false,
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    pub fn physics(&self) -> &PhysicsConfig {
        &self.physics
    }

    /// Swaps the tuning while keeping the current motion and the detectors' progress.
    pub fn set_physics(&mut self, physics: PhysicsConfig) {
        if physics == self.physics {
            return;
        }
        self.physics = physics;
        self.input.set_increment(physics.drag_increment);
        self.velocity.set_physics(physics);
        self.boundary.set_margin(physics.boundary_margin);
        self.rest
            .set_limits(physics.rest_threshold, physics.history_capacity);
        self.state.velocity = self.velocity.clamp(self.state.velocity);
    }

    /// Sets the angular velocity directly, e.g. for a keyboard-triggered spin.
    pub fn fling(&mut self, velocity: f64) {
        if velocity.is_finite() {
            self.state.velocity = self.velocity.clamp(velocity);
        }
    }

    /// Advances the wheel by one tick.
    pub fn update(&mut self, pointer: Point, pressed: bool) -> Result<TickResult, InputError> {
        let drag = self.input.sample(pointer, pressed, self.center)?;

        let direction = SpinningDirection::classify(self.state.velocity, self.physics.dead_zone);
        self.state.direction = direction;

        let velocity = match drag {
            Some(delta) => self.velocity.drag(self.state.velocity, delta),
            None => self
                .velocity
                .coast(self.state.velocity, direction, self.detent),
        };
        self.state.velocity = self.velocity.clamp(velocity);

        let before = self.state.advance();
        let play_stopper_sound = self
            .boundary
            .detect(before, self.state.velocity, direction);
        self.detent = play_stopper_sound;
        let fire_settle_event = self.rest.observe(direction);

        log::trace!(
            "tick angle={:.3} velocity={:.4} direction={}",
            self.state.angle,
            self.state.velocity,
            direction
        );
        if fire_settle_event {
            log::debug!(
                "Wheel settled at {:.2} degrees (slice {})",
                self.state.angle,
                self.slice_index()
            );
        }

        Ok(TickResult {
            new_angle: self.state.angle,
            play_stopper_sound,
            fire_settle_event,
        })
    }

    /// Lets go of the wheel until it settles or `max_ticks` pass. Returns the settling tick.
    pub fn coast_until_settled(
        &mut self,
        max_ticks: u64,
        mut on_tick: impl FnMut(u64, &TickResult, &SpinSnapshot),
    ) -> Result<Option<u64>, InputError> {
        let pointer = self.center;
        for tick in 1..=max_ticks {
            let result = self.update(pointer, false)?;
            on_tick(tick, &result, &self.snapshot());
            if result.fire_settle_event {
                return Ok(Some(tick));
            }
        }
        log::warn!("Wheel still moving after {max_ticks} ticks");
        Ok(None)
    }

    pub fn snapshot(&self) -> SpinSnapshot {
        self.state.snapshot()
    }

    pub fn rest_phase(&self) -> RestPhase {
        self.rest.phase()
    }

    /// Slice currently under the stopper marker.
    pub fn slice_index(&self) -> usize {
        geometry::slice_index(self.state.angle)
    }
}
