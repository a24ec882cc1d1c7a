use super::easing::{Dir, Ease};
use super::tween::Tween;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Hidden,
    Entering,
    Visible,
    Exiting,
}

/// Visibility state machine shared by every overlay panel.
///
/// `openness` runs 0 (hidden) to 1 (visible). There is exactly one
/// transition tween per panel; toggling mid-flight reverses it from wherever
/// it currently is instead of starting a second animation.
#[derive(Clone, Debug)]
pub struct Panel {
    phase: Phase,
    openness: Tween,
    enter_secs: f64,
    exit_secs: f64,
    enter_ease: Ease,
    exit_ease: Ease,
}

impl Panel {
    pub fn new(enter_secs: f64, exit_secs: f64) -> Self {
        Self {
            phase: Phase::Hidden,
            openness: Tween::settled(0.0),
            enter_secs,
            exit_secs,
            enter_ease: Ease::Power3(Dir::Out),
            exit_ease: Ease::Power2(Dir::In),
        }
    }

    /// Start settled in `Visible` instead of `Hidden`.
    pub fn visible(mut self) -> Self {
        self.phase = Phase::Visible;
        self.openness = Tween::settled(1.0);
        self
    }

    pub fn eases(mut self, enter: Ease, exit: Ease) -> Self {
        self.enter_ease = enter;
        self.exit_ease = exit;
        self
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Where the panel is heading: true for `Entering` and `Visible`.
    #[inline]
    pub fn is_open(&self) -> bool {
        matches!(self.phase, Phase::Entering | Phase::Visible)
    }

    #[inline]
    pub fn in_flight(&self) -> bool {
        matches!(self.phase, Phase::Entering | Phase::Exiting)
    }

    /// Eased openness for the style writer.
    pub fn openness(&self) -> f32 {
        self.openness.value()
    }

    /// Linear progress of the current transition, 0..=1.
    pub fn transition_progress(&self) -> f64 {
        self.openness.progress()
    }

    pub fn toggle(&mut self) -> Phase {
        let (phase, target, secs, ease) = if self.is_open() {
            (Phase::Exiting, 0.0, self.exit_secs, self.exit_ease)
        } else {
            (Phase::Entering, 1.0, self.enter_secs, self.enter_ease)
        };
        // A reversal mid-flight only has the remaining distance to cover.
        let distance = (target - self.openness.value()).abs().min(1.0) as f64;
        self.openness.retarget(target, secs * distance, ease);
        self.phase = phase;
        self.phase
    }

    pub fn open(&mut self) -> Phase {
        if !self.is_open() {
            self.toggle();
        }
        self.phase
    }

    pub fn close(&mut self) -> Phase {
        if self.is_open() {
            self.toggle();
        }
        self.phase
    }

    /// Advance the transition. Returns the settled phase on the frame a
    /// transition completes.
    pub fn tick(&mut self, dt: f64) -> Option<Phase> {
        if !self.in_flight() {
            return None;
        }
        self.openness.advance(dt);
        if !self.openness.is_finished() {
            return None;
        }
        self.phase = match self.phase {
            Phase::Entering => Phase::Visible,
            _ => Phase::Hidden,
        };
        Some(self.phase)
    }

    /// Unmount: drop any transition and return to hidden.
    pub fn reset(&mut self) {
        self.phase = Phase::Hidden;
        self.openness = Tween::settled(0.0);
    }
}
