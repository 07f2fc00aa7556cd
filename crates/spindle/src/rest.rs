use crate::direction::{DirectionHistory, SpinningDirection};
use serde::Serialize;
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, StrumDisplay)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RestPhase {
    /// Nothing has spun since start-up.
    #[default]
    Idle,
    Spinning,
    /// Stopped after a spin, still counting rest ticks.
    Settling,
    /// Settle event emitted; waiting for a fresh spin.
    Fired,
}

/// Emits one settle event per spin-then-rest episode.
#[derive(Debug, Clone)]
pub struct RestDetector {
    history: DirectionHistory,
    threshold: usize,
    phase: RestPhase,
}

impl RestDetector {
    pub fn new(threshold: usize, capacity: usize) -> Self {
        Self {
            history: DirectionHistory::new(capacity),
            threshold,
            phase: RestPhase::Idle,
        }
    }

    /// Retunes the detector without forgetting the ticks already observed.
    pub fn set_limits(&mut self, threshold: usize, capacity: usize) {
        self.threshold = threshold;
        self.history.set_capacity(capacity);
    }

    pub fn phase(&self) -> RestPhase {
        self.phase
    }

    /// Records this tick's direction and reports whether the wheel has just settled.
    pub fn observe(&mut self, direction: SpinningDirection) -> bool {
        self.history.push(direction);

        if direction.is_spinning() {
            self.phase = RestPhase::Spinning;
            return false;
        }

        let (resting, was_spinning) = self.history.trailing_rest();
        if !was_spinning {
            return false;
        }

        if resting > self.threshold {
            self.history.clear();
            self.phase = RestPhase::Fired;
            true
        } else {
            self.phase = RestPhase::Settling;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::SpinningDirection::{Left, Right};

    const REST: SpinningDirection = SpinningDirection::None;

    #[test]
    fn test_fires_on_sixth_rest_tick() {
        let mut detector = RestDetector::new(5, 20);
        for _ in 0..10 {
            assert!(!detector.observe(Right));
        }

        let fired: Vec<bool> = (0..6).map(|_| detector.observe(REST)).collect();
        assert_eq!(fired, vec![false, false, false, false, false, true]);
        assert_eq!(detector.phase(), RestPhase::Fired);
    }

    #[test]
    fn test_does_not_fire_twice_for_one_rest() {
        let mut detector = RestDetector::new(5, 20);
        detector.observe(Left);
        let fired = (0..100).filter(|_| detector.observe(REST)).count();
        assert_eq!(fired, 1);
        assert_eq!(detector.phase(), RestPhase::Fired);
    }

    #[test]
    fn test_idle_wheel_never_fires() {
        let mut detector = RestDetector::new(5, 20);
        assert!((0..50).all(|_| !detector.observe(REST)));
        assert_eq!(detector.phase(), RestPhase::Idle);
    }

    #[test]
    fn test_phase_transitions() {
        let mut detector = RestDetector::new(5, 20);
        detector.observe(Right);
        assert_eq!(detector.phase(), RestPhase::Spinning);
        detector.observe(REST);
        assert_eq!(detector.phase(), RestPhase::Settling);

        // a spin that resumes before the threshold cancels the pending event
        detector.observe(Right);
        assert_eq!(detector.phase(), RestPhase::Spinning);
        assert!((0..5).all(|_| !detector.observe(REST)));
        assert!(detector.observe(REST));

        detector.observe(Left);
        assert_eq!(detector.phase(), RestPhase::Spinning);
        assert!((0..5).all(|_| !detector.observe(REST)));
        assert!(detector.observe(REST));
    }
}
