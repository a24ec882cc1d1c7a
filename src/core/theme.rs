use super::constants::{THEME_FADE_SECS, THEME_PULSE_SECS};
use super::easing::{Dir, Ease};
use super::tween::Tween;
use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self {
            r: channel(0)? as f32,
            g: channel(2)? as f32,
            b: channel(4)? as f32,
        })
    }

    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        Rgb {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    pub fn to_css(self) -> String {
        let c = |v: f32| v.round().clamp(0.0, 255.0) as u8;
        format!("rgb({}, {}, {})", c(self.r), c(self.g), c(self.b))
    }
}

/// A colour palette record from the site content.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Theme {
    pub key: String,
    pub name: String,
    pub primary: String,
    pub accent: String,
    pub background: String,
    pub icon: String,
}

impl Theme {
    pub fn background_rgb(&self) -> Rgb {
        Rgb::from_hex(&self.background).unwrap_or(Rgb::BLACK)
    }
}

/// Current palette plus the transitions a switch plays.
#[derive(Clone, Debug)]
pub struct ThemeSwitcher {
    themes: Vec<Theme>,
    current: usize,
    background_from: Rgb,
    fade: Tween,
    pulse: Tween,
}

impl ThemeSwitcher {
    /// `None` when there are no themes to switch between.
    pub fn new(themes: Vec<Theme>) -> Option<Self> {
        let first = themes.first()?.background_rgb();
        Some(Self {
            themes,
            current: 0,
            background_from: first,
            fade: Tween::settled(1.0),
            pulse: Tween::settled(1.0),
        })
    }

    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    pub fn current(&self) -> &Theme {
        &self.themes[self.current]
    }

    /// Switch palettes. Choosing the active theme or an unknown key does
    /// nothing and returns false.
    pub fn select(&mut self, key: &str) -> bool {
        let Some(idx) = self.themes.iter().position(|t| t.key == key) else {
            return false;
        };
        if idx == self.current {
            return false;
        }
        self.background_from = self.background();
        self.current = idx;
        self.fade = Tween::new(0.0, 1.0, THEME_FADE_SECS, Ease::Power2(Dir::InOut));
        self.pulse = Tween::new(0.8, 1.0, THEME_PULSE_SECS, Ease::back_out());
        true
    }

    pub fn tick(&mut self, dt: f64) {
        self.fade.advance(dt);
        self.pulse.advance(dt);
    }

    pub fn is_animating(&self) -> bool {
        !self.fade.is_finished() || !self.pulse.is_finished()
    }

    /// Body background for this frame.
    pub fn background(&self) -> Rgb {
        self.background_from
            .lerp(self.current().background_rgb(), self.fade.value())
    }

    /// Switcher scale for this frame.
    pub fn pulse_scale(&self) -> f32 {
        self.pulse.value()
    }
}
