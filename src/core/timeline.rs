use super::easing::{lerp, Ease};
use smallvec::SmallVec;

/// Animatable style properties understood by the style writer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Prop {
    X,
    Y,
    YPercent,
    Scale,
    ScaleX,
    ScaleY,
    Rotation,
    Opacity,
    /// 1.0 renders the element, 0.0 sets `display: none`.
    Display,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropTween {
    pub prop: Prop,
    pub from: f32,
    pub to: f32,
}

/// Where a step starts relative to what is already on the timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    /// At the current end of the timeline.
    Sequential,
    /// Timeline end plus `dt` (negative overlaps, e.g. `-=0.5`).
    Offset(f64),
    /// Same start as the most recently added step (`<`).
    WithPrevious,
    /// Absolute time in seconds.
    At(f64),
}

/// One declarative animation step over a target group of `units` elements.
#[derive(Clone, Debug)]
pub struct Step {
    pub target: &'static str,
    pub units: usize,
    pub tweens: SmallVec<[PropTween; 3]>,
    pub duration: f64,
    pub ease: Ease,
    pub stagger: f64,
    immediate: bool,
    leads: SmallVec<[bool; 3]>,
    start: f64,
}

impl Step {
    fn with(target: &'static str, immediate: bool, duration: f64) -> Self {
        Self {
            target,
            units: 1,
            tweens: SmallVec::new(),
            duration,
            ease: Ease::default(),
            stagger: 0.0,
            immediate,
            leads: SmallVec::new(),
            start: 0.0,
        }
    }

    /// Entrance-style step: renders its `from` values before it begins.
    pub fn from(target: &'static str) -> Self {
        Self::with(target, true, 0.5)
    }

    /// Step that leaves its properties alone until it begins, unless it is
    /// the first step on the timeline to drive that property.
    pub fn to(target: &'static str) -> Self {
        Self::with(target, false, 0.5)
    }

    /// Zero-duration step flipping from `from` to `to` at its start time.
    pub fn set(target: &'static str) -> Self {
        Self::with(target, false, 0.0)
    }

    pub fn units(mut self, units: usize) -> Self {
        self.units = units;
        self
    }

    pub fn tween(mut self, prop: Prop, from: f32, to: f32) -> Self {
        self.tweens.push(PropTween { prop, from, to });
        self
    }

    pub fn duration(mut self, secs: f64) -> Self {
        self.duration = secs.max(0.0);
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn stagger(mut self, secs: f64) -> Self {
        self.stagger = secs.max(0.0);
        self
    }

    #[inline]
    pub fn start(&self) -> f64 {
        self.start
    }

    #[inline]
    pub fn unit_start(&self, unit: usize) -> f64 {
        self.start + self.stagger * unit as f64
    }

    pub fn end(&self) -> f64 {
        self.unit_start(self.units.saturating_sub(1)) + self.duration
    }

    fn unit_progress(&self, unit: usize, t: f64) -> Option<f64> {
        let begin = self.unit_start(unit);
        if t < begin {
            return None;
        }
        if self.duration <= 0.0 {
            return Some(1.0);
        }
        Some(((t - begin) / self.duration).clamp(0.0, 1.0))
    }
}

/// A resolved property value for one unit of one target at some time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub target: &'static str,
    pub unit: usize,
    pub prop: Prop,
    pub value: f32,
}

/// Ordered list of steps with resolved start times.
///
/// Sampling is a pure function of time, which is what makes scrubbing
/// reversible: seeking back to `t` yields exactly what playing forward to `t`
/// produced.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    steps: Vec<Step>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, mut step: Step, position: Position) -> Self {
        let end = self.duration();
        step.start = match position {
            Position::Sequential => end,
            Position::Offset(dt) => (end + dt).max(0.0),
            Position::WithPrevious => self.steps.last().map(Step::start).unwrap_or(0.0),
            Position::At(t) => t.max(0.0),
        };
        step.leads = step
            .tweens
            .iter()
            .map(|tw| {
                !self
                    .steps
                    .iter()
                    .any(|s| s.target == step.target && s.tweens.iter().any(|o| o.prop == tw.prop))
            })
            .collect();
        self.steps.push(step);
        self
    }

    /// Append at the end of the timeline.
    pub fn then(self, step: Step) -> Self {
        self.push(step, Position::Sequential)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn duration(&self) -> f64 {
        self.steps.iter().map(Step::end).fold(0.0, f64::max)
    }

    /// Resolve every driven property at time `t`, in declaration order so a
    /// later step overrides an earlier one on the same property.
    pub fn sample(&self, t: f64) -> impl Iterator<Item = Sample> + '_ {
        self.steps.iter().flat_map(move |step| {
            (0..step.units).flat_map(move |unit| {
                let progress = step.unit_progress(unit, t);
                let eased = progress.map(|p| step.ease.apply(p));
                step.tweens
                    .iter()
                    .zip(step.leads.iter())
                    .filter_map(move |(tw, &leads)| {
                        let value = match eased {
                            Some(e) => lerp(tw.from, tw.to, e),
                            None if step.immediate || leads => tw.from,
                            None => return None,
                        };
                        Some(Sample {
                            target: step.target,
                            unit,
                            prop: tw.prop,
                            value,
                        })
                    })
            })
        })
    }
}

/// Clock-driven playback of a `Timeline`.
#[derive(Clone, Debug)]
pub struct Player {
    timeline: Timeline,
    time: f64,
    playing: bool,
    completed: bool,
}

impl Player {
    pub fn new(timeline: Timeline) -> Self {
        Self {
            timeline,
            time: 0.0,
            playing: false,
            completed: false,
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Advance the clock while playing. Returns true exactly once over the
    /// player's lifetime: on the call that reaches the end.
    pub fn advance(&mut self, dt: f64) -> bool {
        if !self.playing {
            return false;
        }
        let end = self.timeline.duration();
        self.time = (self.time + dt.max(0.0)).min(end);
        if self.time >= end {
            self.playing = false;
            if !self.completed {
                self.completed = true;
                return true;
            }
        }
        false
    }

    /// Place the playhead without playing and without completion side effects.
    pub fn seek(&mut self, t: f64) {
        self.time = t.clamp(0.0, self.timeline.duration());
    }

    /// Scrub: the playhead is exactly `fraction * duration`, no easing.
    pub fn seek_fraction(&mut self, fraction: f64) {
        self.seek(fraction.clamp(0.0, 1.0) * self.timeline.duration());
    }

    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        self.timeline.sample(self.time)
    }
}
