//! Screen transition state machine
//!
//! Position runs from 1 (fully off) to 0 (fully on). Each frame moves it
//! toward the target at `elapsed / duration`; a zero duration snaps in one
//! frame.

use std::time::Duration;

use crate::config::GuiConfig;

/// Default transition duration in each direction
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(500);

/// Distance from an end that counts as having reached it
const END_TOLERANCE: f32 = 1e-4;

/// Lifecycle state of a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenState {
    /// Fading in
    #[default]
    TransitionOn,
    /// Fully on
    Active,
    /// Fading out, either covered or exiting
    TransitionOff,
    /// Fully covered; not drawn
    Hidden,
}

impl ScreenState {
    /// Whether the screen may take input and covers screens beneath it
    pub const fn is_on(self) -> bool {
        matches!(self, Self::TransitionOn | Self::Active)
    }
}

/// Transition position, state and durations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    position: f32,
    state: ScreenState,
    /// Time to fade in
    pub on_time: Duration,
    /// Time to fade out
    pub off_time: Duration,
}

impl Default for Transition {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSITION, DEFAULT_TRANSITION)
    }
}

impl Transition {
    /// Fully off, about to transition on
    pub fn new(on_time: Duration, off_time: Duration) -> Self {
        Self {
            position: 1.0,
            state: ScreenState::TransitionOn,
            on_time,
            off_time,
        }
    }

    /// Durations from configuration
    pub fn from_config(config: &GuiConfig) -> Self {
        Self::new(config.transition_on(), config.transition_off())
    }

    /// Position in 0..=1, 0 meaning fully on
    pub fn position(&self) -> f32 {
        self.position
    }

    /// `1 - position`, for fades
    pub fn alpha(&self) -> f32 {
        1.0 - self.position
    }

    /// Current state
    pub fn state(&self) -> ScreenState {
        self.state
    }

    /// Advance one frame
    ///
    /// Returns `true` when an exiting screen has finished transitioning off
    /// and should be removed.
    pub fn update(&mut self, elapsed: Duration, is_exiting: bool, covered_by_other_screen: bool) -> bool {
        if is_exiting {
            self.state = ScreenState::TransitionOff;
            return !self.step(elapsed, self.off_time, 1.0);
        }

        self.state = if covered_by_other_screen {
            if self.step(elapsed, self.off_time, 1.0) {
                ScreenState::TransitionOff
            } else {
                ScreenState::Hidden
            }
        } else if self.step(elapsed, self.on_time, -1.0) {
            ScreenState::TransitionOn
        } else {
            ScreenState::Active
        };
        false
    }

    /// Move toward the end of `direction`; `false` once the end is reached
    fn step(&mut self, elapsed: Duration, time: Duration, direction: f32) -> bool {
        let delta = if time.is_zero() {
            1.0
        } else {
            elapsed.as_secs_f32() / time.as_secs_f32()
        };

        self.position += delta * direction;

        if direction < 0.0 && self.position <= END_TOLERANCE {
            self.position = 0.0;
            return false;
        }
        if direction > 0.0 && self.position >= 1.0 - END_TOLERANCE {
            self.position = 1.0;
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TICK: Duration = Duration::from_millis(100);

    #[test]
    fn test_transition_on_reaches_active_at_zero() {
        let mut transition = Transition::default();
        transition.update(TICK, false, false);
        assert_eq!(transition.state(), ScreenState::TransitionOn);
        assert_relative_eq!(transition.position(), 0.8, epsilon = 1e-5);

        for _ in 0..5 {
            transition.update(TICK, false, false);
        }
        assert_eq!(transition.state(), ScreenState::Active);
        assert_eq!(transition.position(), 0.0);
        assert_eq!(transition.alpha(), 1.0);
    }

    #[test]
    fn test_active_after_exactly_on_time() {
        let mut transition = Transition::new(Duration::from_millis(500), Duration::from_millis(500));
        for _ in 0..5 {
            transition.update(TICK, false, false);
        }
        assert_eq!(transition.state(), ScreenState::Active);
        assert_eq!(transition.position(), 0.0);

        let mut frames = Transition::new(Duration::from_secs(1), Duration::from_secs(1));
        for _ in 0..60 {
            frames.update(Duration::from_secs_f32(1.0 / 60.0), false, false);
        }
        assert_eq!(frames.state(), ScreenState::Active);
    }

    #[test]
    fn test_exit_completes_after_exactly_off_time() {
        let mut transition = Transition::new(Duration::ZERO, Duration::from_millis(300));
        transition.update(TICK, false, false);
        assert!(!transition.update(TICK, true, false));
        assert!(!transition.update(TICK, true, false));
        assert!(transition.update(TICK, true, false));
        assert_eq!(transition.position(), 1.0);
    }

    #[test]
    fn test_covered_screen_hides() {
        let mut transition = Transition::new(Duration::ZERO, Duration::from_millis(200));
        transition.update(TICK, false, false);
        assert_eq!(transition.state(), ScreenState::Active);

        transition.update(TICK, false, true);
        assert_eq!(transition.state(), ScreenState::TransitionOff);
        transition.update(TICK, false, true);
        transition.update(TICK, false, true);
        assert_eq!(transition.state(), ScreenState::Hidden);
        assert_eq!(transition.position(), 1.0);
    }

    #[test]
    fn test_exit_reports_completion() {
        let mut transition = Transition::new(Duration::ZERO, Duration::ZERO);
        transition.update(TICK, false, false);
        assert!(transition.update(TICK, true, false));
        assert_eq!(transition.state(), ScreenState::TransitionOff);
    }

    #[test]
    fn test_zero_duration_snaps() {
        let mut transition = Transition::new(Duration::ZERO, Duration::ZERO);
        assert!(!transition.update(Duration::ZERO, false, false));
        assert_eq!(transition.state(), ScreenState::Active);
    }
}
