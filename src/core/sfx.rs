use super::constants::BUBBLE_CHANCE;
use rand::Rng;

/// A one-shot blip: a sine oscillator (optionally swept) through a short
/// attack/decay gain envelope.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Blip {
    pub start_hz: f32,
    /// Exponential sweep target reached at `secs`.
    pub end_hz: Option<f32>,
    pub peak: f32,
    pub attack_secs: f64,
    /// Envelope decays to near silence and the oscillator stops here.
    pub secs: f64,
}

/// Envelope floor for exponential ramps, which cannot reach zero.
pub const ENVELOPE_FLOOR: f32 = 0.001;

impl Blip {
    pub const CLICK: Blip = Blip {
        start_hz: 800.0,
        end_hz: Some(400.0),
        peak: 0.2,
        attack_secs: 0.01,
        secs: 0.1,
    };

    pub const HOVER: Blip = Blip {
        start_hz: 1200.0,
        end_hz: None,
        peak: 0.1,
        attack_secs: 0.05,
        secs: 0.2,
    };

    pub fn bubble<R: Rng + ?Sized>(rng: &mut R) -> Blip {
        Blip {
            start_hz: 600.0 + rng.gen::<f32>() * 400.0,
            end_hz: None,
            peak: 0.05,
            attack_secs: 0.01,
            secs: 0.3,
        }
    }
}

/// Roll for the periodic bubble sound.
pub fn bubble_due<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.gen::<f64>() < BUBBLE_CHANCE
}
