use super::constants::{SOUNDSCAPE_DEFAULT_VOLUME, SOUNDSCAPE_MAX_VOLUME, SOUNDSCAPE_VOLUME_STEP};
use super::error::SiteResult;
use rand::Rng;
use serde::Deserialize;

/// Selectable synthesized ambiences.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundscapeKind {
    Jazz,
    Lounge,
    Rain,
}

impl SoundscapeKind {
    pub const ALL: [SoundscapeKind; 3] = [Self::Jazz, Self::Lounge, Self::Rain];

    pub fn key(self) -> &'static str {
        match self {
            Self::Jazz => "jazz",
            Self::Lounge => "lounge",
            Self::Rain => "rain",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.key() == key)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Triangle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lfo {
    pub rate_hz: f32,
    pub depth_hz: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lowpass {
    pub cutoff_hz: f32,
    pub q: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Source {
    /// oscillator -> [lowpass] -> gain, optionally frequency-modulated by an LFO
    Osc {
        wave: Wave,
        freq_hz: f32,
        level: f32,
        lfo: Option<Lfo>,
        lowpass: Option<Lowpass>,
    },
    /// looping white-noise buffer -> lowpass -> gain
    Noise {
        seconds: f32,
        lowpass: Lowpass,
        level: f32,
    },
}

impl Source {
    pub fn node_count(&self) -> usize {
        match self {
            Source::Osc { lfo, lowpass, .. } => {
                2 + lfo.map_or(0, |_| 2) + lowpass.map_or(0, |_| 1)
            }
            Source::Noise { .. } => 3,
        }
    }
}

/// Shape of one ambience graph, built by a [`GraphHost`].
#[derive(Clone, Debug, PartialEq)]
pub struct GraphSpec {
    pub kind: SoundscapeKind,
    pub sources: Vec<Source>,
}

const JAZZ_HZ: [f32; 5] = [65.0, 98.0, 147.0, 220.0, 330.0];
const LOUNGE_HZ: [f32; 4] = [110.0, 165.0, 220.0, 275.0];

impl GraphSpec {
    pub fn build<R: Rng + ?Sized>(kind: SoundscapeKind, rng: &mut R) -> Self {
        let sources = match kind {
            SoundscapeKind::Jazz => JAZZ_HZ
                .iter()
                .enumerate()
                .map(|(i, &freq_hz)| Source::Osc {
                    wave: Wave::Sine,
                    freq_hz,
                    level: 0.1 / JAZZ_HZ.len() as f32,
                    lfo: Some(Lfo {
                        rate_hz: 0.1 + rng.gen::<f32>() * 0.3,
                        depth_hz: 2.0,
                    }),
                    lowpass: Some(Lowpass {
                        cutoff_hz: 800.0 + i as f32 * 200.0,
                        q: 0.5,
                    }),
                })
                .collect(),
            SoundscapeKind::Lounge => LOUNGE_HZ
                .iter()
                .map(|&freq_hz| Source::Osc {
                    wave: Wave::Triangle,
                    freq_hz,
                    level: 0.05,
                    lfo: None,
                    lowpass: None,
                })
                .collect(),
            SoundscapeKind::Rain => vec![Source::Noise {
                seconds: 2.0,
                lowpass: Lowpass {
                    cutoff_hz: 3000.0,
                    q: 1.0,
                },
                level: 0.1,
            }],
        };
        Self { kind, sources }
    }

    pub fn node_count(&self) -> usize {
        self.sources.iter().map(Source::node_count).sum()
    }
}

/// Audio backend that can realize and dismantle a [`GraphSpec`].
pub trait GraphHost {
    type Handle;

    fn build(&mut self, spec: &GraphSpec) -> SiteResult<Self::Handle>;

    /// Stop and disconnect every node of `handle`.
    fn teardown(&mut self, handle: Self::Handle);

    fn set_volume(&mut self, volume: f32);
}

/// Selection, playback and volume of the ambient soundscape.
///
/// At most one graph is alive at a time: switching while playing tears the
/// old graph down completely before the next one is built.
pub struct SoundscapeDeck<H: GraphHost> {
    host: H,
    selected: SoundscapeKind,
    active: Option<H::Handle>,
    volume: f32,
}

impl<H: GraphHost> SoundscapeDeck<H> {
    pub fn new(mut host: H) -> Self {
        host.set_volume(SOUNDSCAPE_DEFAULT_VOLUME);
        Self {
            host,
            selected: SoundscapeKind::Jazz,
            active: None,
            volume: SOUNDSCAPE_DEFAULT_VOLUME,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn selected(&self) -> SoundscapeKind {
        self.selected
    }

    pub fn is_playing(&self) -> bool {
        self.active.is_some()
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn play<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SiteResult<()> {
        if self.active.is_some() {
            return Ok(());
        }
        let spec = GraphSpec::build(self.selected, rng);
        let handle = self.host.build(&spec)?;
        log::info!(
            "[audio] soundscape {} playing ({} nodes)",
            self.selected.key(),
            spec.node_count()
        );
        self.active = Some(handle);
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.active.take() {
            self.host.teardown(handle);
            log::info!("[audio] soundscape {} stopped", self.selected.key());
        }
    }

    /// Returns whether the deck is playing afterwards.
    pub fn toggle_play<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SiteResult<bool> {
        if self.is_playing() {
            self.stop();
        } else {
            self.play(rng)?;
        }
        Ok(self.is_playing())
    }

    pub fn select<R: Rng + ?Sized>(&mut self, kind: SoundscapeKind, rng: &mut R) -> SiteResult<()> {
        if kind == self.selected {
            return Ok(());
        }
        let was_playing = self.is_playing();
        self.stop();
        self.selected = kind;
        if was_playing {
            self.play(rng)?;
        }
        Ok(())
    }

    /// Clamp to the slider range and snap to its step.
    pub fn set_volume(&mut self, volume: f32) {
        let snapped = (volume / SOUNDSCAPE_VOLUME_STEP).round() * SOUNDSCAPE_VOLUME_STEP;
        self.volume = snapped.clamp(0.0, SOUNDSCAPE_MAX_VOLUME);
        self.host.set_volume(self.volume);
    }
}

impl<H: GraphHost> Drop for SoundscapeDeck<H> {
    fn drop(&mut self) {
        self.stop();
    }
}
