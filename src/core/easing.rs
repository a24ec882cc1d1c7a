use std::f64::consts::PI;

/// Easing curves used by the site's timelines.
///
/// Names follow the conventional `family.direction` scheme (`power2.out`,
/// `expo.out`, `back.out(1.7)` ...). `Power0`/`None` is linear and is the
/// only curve allowed for scrubbed timelines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    None,
    Power1(Dir),
    Power2(Dir),
    Power3(Dir),
    Sine(Dir),
    ExpoOut,
    BackOut(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dir {
    In,
    Out,
    InOut,
}

impl Default for Ease {
    // Matches the timeline default of `power1.out`.
    fn default() -> Self {
        Ease::Power1(Dir::Out)
    }
}

#[inline]
fn power(t: f64, exp: i32, dir: Dir) -> f64 {
    match dir {
        Dir::In => t.powi(exp),
        Dir::Out => 1.0 - (1.0 - t).powi(exp),
        Dir::InOut => {
            if t < 0.5 {
                0.5 * (2.0 * t).powi(exp)
            } else {
                1.0 - 0.5 * (2.0 * (1.0 - t)).powi(exp)
            }
        }
    }
}

impl Ease {
    /// Map linear progress `t` (clamped to 0..=1) to eased progress.
    ///
    /// Every curve maps 0 to 0 and 1 to 1; `BackOut` overshoots in between.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::None => t,
            Ease::Power1(d) => power(t, 2, d),
            Ease::Power2(d) => power(t, 3, d),
            Ease::Power3(d) => power(t, 4, d),
            Ease::Sine(Dir::In) => 1.0 - (t * PI / 2.0).cos(),
            Ease::Sine(Dir::Out) => (t * PI / 2.0).sin(),
            Ease::Sine(Dir::InOut) => -0.5 * ((PI * t).cos() - 1.0),
            Ease::ExpoOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
            Ease::BackOut(s) => {
                let u = t - 1.0;
                u * u * ((s + 1.0) * u + s) + 1.0
            }
        }
    }

    /// The site's signature "bouncy" entrance.
    pub const fn back_out() -> Self {
        Ease::BackOut(1.7)
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f64) -> f32 {
    a + (b - a) * t as f32
}
