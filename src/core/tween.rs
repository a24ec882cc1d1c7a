use super::easing::{lerp, Ease};

/// A single animated scalar: `from -> to` over `duration` seconds.
///
/// Retargeting restarts from the current value, so an in-flight tween is
/// overridden rather than queued behind a second one.
#[derive(Clone, Debug)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: f64,
    elapsed: f64,
    ease: Ease,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f64, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            ease,
        }
    }

    /// A tween that is already at rest on `value`.
    pub fn settled(value: f32) -> Self {
        Self::new(value, value, 0.0, Ease::None)
    }

    #[inline]
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        lerp(self.from, self.to, self.ease.apply(self.progress()))
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.to
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Step the clock; returns true on the call that finishes the tween.
    pub fn advance(&mut self, dt: f64) -> bool {
        if self.is_finished() {
            return false;
        }
        self.elapsed += dt.max(0.0);
        self.is_finished()
    }

    pub fn retarget(&mut self, to: f32, duration: f64, ease: Ease) {
        *self = Self::new(self.value(), to, duration, ease);
    }

    /// Jump straight to the end value.
    pub fn finish(&mut self) {
        self.elapsed = self.duration;
    }
}
