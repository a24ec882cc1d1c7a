use super::constants::{
    LOADING_FILL_SECS, LOADING_HOLD_SECS, LOADING_LOGO_RISE, LOADING_LOGO_SECS, LOADING_STEP_MIN,
    LOADING_STEP_SPAN, LOADING_TEXT_SECS,
};
use super::easing::{Dir, Ease};
use super::timeline::{Player, Position, Prop, Sample, Step, Timeline};
use super::tween::Tween;
use rand::Rng;

pub const LIQUID: &str = "liquid";
pub const LOGO: &str = "logo";
pub const PERCENT: &str = "percent";
pub const CONTAINER: &str = "container";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Stage {
    Filling,
    Holding { remaining: f64 },
    Exiting,
    Done,
}

/// Whether the caller's interval should keep firing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerControl {
    Continue,
    Cancel,
}

/// The logo rises into place while progress starts filling.
pub fn entrance_timeline() -> Timeline {
    Timeline::new().then(
        Step::from(LOGO)
            .tween(Prop::Opacity, 0.0, 1.0)
            .tween(Prop::Y, LOADING_LOGO_RISE, 0.0)
            .duration(LOADING_LOGO_SECS)
            .ease(Ease::Power3(Dir::Out)),
    )
}

/// The exit choreography played once loading is complete.
pub fn exit_timeline() -> Timeline {
    let fade_up = |target: &'static str| {
        Step::to(target)
            .tween(Prop::Opacity, 1.0, 0.0)
            .tween(Prop::Y, 0.0, -30.0)
            .duration(0.5)
            .ease(Ease::Power3(Dir::In))
    };
    Timeline::new()
        .then(
            Step::to(LIQUID)
                .tween(Prop::ScaleY, 1.0, 1.2)
                .duration(0.3)
                .ease(Ease::Power2(Dir::Out)),
        )
        .push(fade_up(LOGO), Position::Offset(-0.2))
        .push(fade_up(PERCENT), Position::WithPrevious)
        .push(
            Step::to(CONTAINER)
                .tween(Prop::Opacity, 1.0, 0.0)
                .duration(0.8)
                .ease(Ease::Power3(Dir::InOut)),
            Position::Offset(-0.3),
        )
        .then(Step::set(CONTAINER).tween(Prop::Display, 1.0, 0.0))
}

/// Simulated loading progress that ends in a single completion callback.
///
/// Progress only moves forward and stops at exactly 100. The callback is an
/// `FnOnce` taken out of the sequencer when the exit timeline finishes, so it
/// cannot run twice or before progress reaches 100.
pub struct LoadingSequencer {
    progress: f64,
    stage: Stage,
    fill: Tween,
    counter: Tween,
    entrance: Player,
    exit: Player,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl LoadingSequencer {
    /// A sequencer with the logo entrance already playing.
    pub fn new(on_complete: impl FnOnce() + 'static) -> Self {
        let mut entrance = Player::new(entrance_timeline());
        entrance.play();
        Self {
            progress: 0.0,
            stage: Stage::Filling,
            fill: Tween::settled(0.0),
            counter: Tween::settled(0.0),
            entrance,
            exit: Player::new(exit_timeline()),
            on_complete: Some(Box::new(on_complete)),
        }
    }

    #[inline]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Liquid fill as a 0..=1 vertical scale.
    pub fn fill(&self) -> f32 {
        self.fill.value()
    }

    /// Integer shown next to the `%` sign.
    pub fn displayed_percent(&self) -> u32 {
        self.counter.value().round().clamp(0.0, 100.0) as u32
    }

    pub fn percent_label(&self) -> String {
        self.displayed_percent().to_string()
    }

    /// One period of the progress timer.
    pub fn on_timer<R: Rng + ?Sized>(&mut self, rng: &mut R) -> TimerControl {
        if self.stage != Stage::Filling {
            return TimerControl::Cancel;
        }
        let next = self.progress + LOADING_STEP_MIN + rng.gen::<f64>() * LOADING_STEP_SPAN;
        let control = if next >= 100.0 {
            self.progress = 100.0;
            self.stage = Stage::Holding {
                remaining: LOADING_HOLD_SECS,
            };
            log::info!("[loading] progress complete");
            TimerControl::Cancel
        } else {
            self.progress = next;
            TimerControl::Continue
        };
        self.fill.retarget(
            (self.progress / 100.0) as f32,
            LOADING_FILL_SECS,
            Ease::Power2(Dir::Out),
        );
        self.counter.retarget(
            self.progress.round() as f32,
            LOADING_TEXT_SECS,
            Ease::Power2(Dir::Out),
        );
        control
    }

    /// Frame clock. Returns true on the frame the completion callback ran.
    pub fn advance(&mut self, dt: f64) -> bool {
        let dt = dt.max(0.0);
        self.fill.advance(dt);
        self.counter.advance(dt);
        self.entrance.advance(dt);
        match self.stage {
            Stage::Filling | Stage::Done => false,
            Stage::Holding { remaining } => {
                if dt < remaining {
                    self.stage = Stage::Holding {
                        remaining: remaining - dt,
                    };
                    return false;
                }
                self.stage = Stage::Exiting;
                self.exit.play();
                self.finish_exit(dt - remaining)
            }
            Stage::Exiting => self.finish_exit(dt),
        }
    }

    fn finish_exit(&mut self, dt: f64) -> bool {
        if !self.exit.advance(dt) {
            return false;
        }
        self.stage = Stage::Done;
        match self.on_complete.take() {
            Some(cb) => {
                log::info!("[loading] exit finished");
                cb();
                true
            }
            None => false,
        }
    }

    fn exit_started(&self) -> bool {
        matches!(self.stage, Stage::Exiting | Stage::Done)
    }

    /// Exit styles, only meaningful once the exit has started.
    pub fn exit_samples(&self) -> impl Iterator<Item = Sample> + '_ {
        let started = self.exit_started();
        self.exit.samples().filter(move |_| started)
    }

    /// Whether a frame would move the logo entrance or the exit.
    pub fn is_animating(&self) -> bool {
        self.entrance.is_playing() || self.stage == Stage::Exiting
    }

    /// Styles for the current frame: the entrance until the exit starts,
    /// the exit after. The exit picks the logo up where the entrance left it.
    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        let exiting = self.exit_started();
        self.entrance
            .samples()
            .filter(move |_| !exiting)
            .chain(self.exit_samples())
    }
}
