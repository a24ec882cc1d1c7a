// Host-side tests for site content, the ingredient showcase, themes,
// the soundscape deck and sound effects.

#![allow(dead_code)]
mod common;

use approx::assert_abs_diff_eq;
use common::core::content::SiteContent;
use common::core::error::{SiteError, SiteResult};
use common::core::ingredients::{Showcase, CARDS, DRAWER};
use common::core::panel::Phase;
use common::core::sfx::{bubble_due, Blip};
use common::core::soundscape::{GraphHost, GraphSpec, Source, SoundscapeDeck, SoundscapeKind};
use common::core::theme::{Rgb, ThemeSwitcher};
use common::core::timeline::Prop;
use common::SITE_JSON;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::Cell;
use std::rc::Rc;

const FRAME: f64 = 1.0 / 60.0;

fn content() -> SiteContent {
    SiteContent::from_json(SITE_JSON).expect("bundled content parses")
}

fn settle(showcase: &mut Showcase) {
    for _ in 0..120 {
        showcase.tick(FRAME);
    }
}

/// Audio host that only counts live nodes.
#[derive(Clone, Default)]
struct CountingHost {
    live: Rc<Cell<usize>>,
    peak: Rc<Cell<usize>>,
    builds: Rc<Cell<usize>>,
    volume: Rc<Cell<f32>>,
    fail: Rc<Cell<bool>>,
}

impl GraphHost for CountingHost {
    type Handle = usize;

    fn build(&mut self, spec: &GraphSpec) -> SiteResult<usize> {
        if self.fail.get() {
            return Err(SiteError::Audio("no output".into()));
        }
        let nodes = spec.node_count();
        self.live.set(self.live.get() + nodes);
        self.peak.set(self.peak.get().max(self.live.get()));
        self.builds.set(self.builds.get() + 1);
        Ok(nodes)
    }

    fn teardown(&mut self, handle: usize) {
        self.live.set(self.live.get() - handle);
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume.set(volume);
    }
}

fn largest_graph() -> usize {
    let mut rng = StdRng::seed_from_u64(0);
    SoundscapeKind::ALL
        .into_iter()
        .map(|k| GraphSpec::build(k, &mut rng).node_count())
        .max()
        .unwrap_or(0)
}

#[test]
fn bundled_content_parses() {
    let c = content();
    assert_eq!(c.ingredients.len(), 4);
    assert_eq!(c.themes.len(), 4);
    assert_eq!(c.soundscapes.len(), 3);
    assert_eq!(c.opening_hours.len(), 4);
    assert_eq!(c.socials.len(), 3);
    assert_eq!(c.ingredient(2).map(|i| i.name.as_str()), Some("Premium Rum"));
    assert_eq!(
        c.soundscape(SoundscapeKind::Rain).map(|s| s.name.as_str()),
        Some("Rain Ambience")
    );
    assert!(c.ingredient(99).is_none());
}

#[test]
fn malformed_content_is_a_content_error() {
    let err = SiteContent::from_json("{\"ingredients\": 3}").unwrap_err();
    assert!(matches!(err, SiteError::Content(_)));
    assert!(err.to_string().starts_with("invalid site content"));
}

#[test]
fn selecting_an_ingredient_opens_its_modal() {
    let mut showcase = Showcase::new(content().ingredients);
    assert_eq!(showcase.toggle_drawer(), Phase::Entering);
    settle(&mut showcase);
    assert_eq!(showcase.drawer().phase(), Phase::Visible);

    let picked = showcase.select(2).map(|i| i.name.clone());
    assert_eq!(picked.as_deref(), Some("Premium Rum"));
    assert!(showcase.modal().is_open());
    settle(&mut showcase);
    assert_eq!(showcase.modal().phase(), Phase::Visible);
    let selected = showcase.selected().unwrap();
    assert_eq!(selected.description, "Aged white rum with smooth, tropical notes");
    assert_eq!(selected.benefits.len(), 3);
}

#[test]
fn unknown_ingredient_keeps_the_current_selection() {
    let mut showcase = Showcase::new(content().ingredients);
    showcase.select(2);
    assert!(showcase.select(99).is_none());
    assert_eq!(showcase.selected().map(|i| i.id), Some(2));

    showcase.select(3);
    assert_eq!(showcase.selected().map(|i| i.id), Some(3));
    assert!(showcase.modal().is_open());
}

#[test]
fn closing_the_modal_clears_selection_after_exit() {
    let mut showcase = Showcase::new(content().ingredients);
    showcase.select(2);
    settle(&mut showcase);

    showcase.close_modal();
    assert_eq!(showcase.modal().phase(), Phase::Exiting);
    assert_eq!(showcase.selected().map(|i| i.id), Some(2));
    settle(&mut showcase);
    assert_eq!(showcase.modal().phase(), Phase::Hidden);
    assert!(showcase.selected().is_none());
}

#[test]
fn drawer_entrance_staggers_the_cards() {
    let mut showcase = Showcase::new(content().ingredients);
    showcase.toggle_drawer();
    for _ in 0..24 {
        showcase.tick(FRAME);
    }
    let opacity: Vec<f32> = showcase
        .drawer_samples()
        .into_iter()
        .filter(|s| s.target == CARDS && s.prop == Prop::Opacity)
        .map(|s| s.value)
        .collect();
    assert_eq!(opacity.len(), 4);
    assert!(opacity.windows(2).all(|w| w[0] >= w[1]));
    assert!(opacity[0] > opacity[3]);
}

#[test]
fn closing_drawer_follows_panel_openness() {
    let mut showcase = Showcase::new(content().ingredients);
    showcase.toggle_drawer();
    settle(&mut showcase);
    assert_eq!(showcase.toggle_drawer(), Phase::Exiting);
    showcase.tick(0.1);
    let open = showcase.drawer().openness();
    let drawer_opacity = showcase
        .drawer_samples()
        .into_iter()
        .find(|s| s.target == DRAWER && s.prop == Prop::Opacity)
        .map(|s| s.value);
    assert_eq!(drawer_opacity, Some(open));
    settle(&mut showcase);
    assert!(!showcase.is_animating());
}

fn drawer_opacity(showcase: &Showcase) -> f32 {
    showcase
        .drawer_samples()
        .into_iter()
        .find(|s| s.target == DRAWER && s.prop == Prop::Opacity)
        .map(|s| s.value)
        .unwrap()
}

fn card_opacity(showcase: &Showcase) -> Vec<f32> {
    showcase
        .drawer_samples()
        .into_iter()
        .filter(|s| s.target == CARDS && s.prop == Prop::Opacity)
        .map(|s| s.value)
        .collect()
}

#[test]
fn reopening_a_closing_drawer_reverses_without_a_jump() {
    let mut showcase = Showcase::new(content().ingredients);
    showcase.toggle_drawer();
    for _ in 0..30 {
        showcase.tick(FRAME);
    }
    assert_eq!(showcase.toggle_drawer(), Phase::Exiting);
    showcase.tick(FRAME);

    let before = drawer_opacity(&showcase);
    let cards_before = card_opacity(&showcase);
    assert!(before > 0.9, "drawer already faded to {before}");

    assert_eq!(showcase.toggle_drawer(), Phase::Entering);
    assert_abs_diff_eq!(drawer_opacity(&showcase), before, epsilon = 1e-6);
    assert_eq!(card_opacity(&showcase), cards_before);

    let mut last = before;
    for _ in 0..60 {
        showcase.tick(FRAME);
        let now = drawer_opacity(&showcase);
        assert!(now >= last - 1e-6, "{now} after {last}");
        assert!(now - last < 0.1, "jumped from {last} to {now}");
        last = now;
    }
    assert_eq!(showcase.drawer().phase(), Phase::Visible);
    assert_abs_diff_eq!(last, 1.0, epsilon = 1e-6);
}

#[test]
fn opening_from_hidden_replays_the_card_entrance() {
    let mut showcase = Showcase::new(content().ingredients);
    showcase.toggle_drawer();
    settle(&mut showcase);
    assert!(card_opacity(&showcase).iter().all(|&o| (o - 1.0).abs() < 1e-6));

    showcase.toggle_drawer();
    settle(&mut showcase);
    assert_eq!(showcase.drawer().phase(), Phase::Hidden);

    showcase.toggle_drawer();
    assert!(card_opacity(&showcase).iter().all(|&o| o == 0.0));
}

#[test]
fn hex_colours_parse_and_print() {
    let c = Rgb::from_hex("#0a1929").unwrap();
    assert_eq!((c.r, c.g, c.b), (10.0, 25.0, 41.0));
    assert_eq!(c.to_css(), "rgb(10, 25, 41)");
    assert_eq!(Rgb::from_hex("0a1929"), Some(c));
    assert!(Rgb::from_hex("#xyz").is_none());
    assert!(Rgb::from_hex("#12345").is_none());
}

#[test]
fn theme_switch_fades_the_background() {
    assert!(ThemeSwitcher::new(Vec::new()).is_none());
    let mut themes = ThemeSwitcher::new(content().themes).unwrap();
    assert_eq!(themes.current().key, "mojito");
    assert!(!themes.select("mojito"));
    assert!(!themes.select("neon"));
    assert!(!themes.is_animating());

    assert!(themes.select("ocean"));
    assert_eq!(themes.background(), Rgb::BLACK);
    assert_abs_diff_eq!(themes.pulse_scale(), 0.8);
    for _ in 0..60 {
        themes.tick(FRAME);
    }
    assert!(!themes.is_animating());
    assert_eq!(themes.background().to_css(), "rgb(10, 25, 41)");
    assert_abs_diff_eq!(themes.pulse_scale(), 1.0);
}

#[test]
fn switching_mid_fade_starts_from_the_shown_colour() {
    let mut themes = ThemeSwitcher::new(content().themes).unwrap();
    themes.select("ocean");
    for _ in 0..20 {
        themes.tick(FRAME);
    }
    let shown = themes.background();
    assert!(themes.select("sunset"));
    assert_eq!(themes.background(), shown);
}

#[test]
fn soundscape_keys_round_trip() {
    for kind in SoundscapeKind::ALL {
        assert_eq!(SoundscapeKind::from_key(kind.key()), Some(kind));
    }
    assert_eq!(SoundscapeKind::from_key("techno"), None);
}

#[test]
fn graph_shapes_match_each_ambience() {
    let mut rng = StdRng::seed_from_u64(8);
    let jazz = GraphSpec::build(SoundscapeKind::Jazz, &mut rng);
    assert_eq!(jazz.sources.len(), 5);
    for source in &jazz.sources {
        let Source::Osc { lfo: Some(lfo), lowpass: Some(_), .. } = source else {
            panic!("jazz voices are filtered and modulated");
        };
        assert!((0.1..0.4).contains(&lfo.rate_hz));
    }
    assert_eq!(jazz.node_count(), 25);
    assert_eq!(GraphSpec::build(SoundscapeKind::Lounge, &mut rng).node_count(), 8);
    let rain = GraphSpec::build(SoundscapeKind::Rain, &mut rng);
    assert!(matches!(rain.sources.as_slice(), [Source::Noise { .. }]));
}

#[test]
fn switching_never_overlaps_two_graphs() {
    let host = CountingHost::default();
    let mut rng = StdRng::seed_from_u64(21);
    let mut deck = SoundscapeDeck::new(host.clone());
    let largest = largest_graph();

    deck.play(&mut rng).unwrap();
    let sequence = [
        SoundscapeKind::Rain,
        SoundscapeKind::Lounge,
        SoundscapeKind::Jazz,
        SoundscapeKind::Rain,
        SoundscapeKind::Jazz,
    ];
    for kind in sequence {
        deck.select(kind, &mut rng).unwrap();
        assert!(deck.is_playing());
        assert_eq!(deck.selected(), kind);
        let expected = GraphSpec::build(kind, &mut rng).node_count();
        assert_eq!(host.live.get(), expected);
    }
    assert!(host.peak.get() <= largest);

    deck.stop();
    assert_eq!(host.live.get(), 0);
}

#[test]
fn selecting_while_stopped_builds_nothing() {
    let host = CountingHost::default();
    let mut rng = StdRng::seed_from_u64(1);
    let mut deck = SoundscapeDeck::new(host.clone());
    deck.select(SoundscapeKind::Rain, &mut rng).unwrap();
    deck.select(SoundscapeKind::Rain, &mut rng).unwrap();
    assert_eq!(host.builds.get(), 0);
    assert!(!deck.is_playing());

    assert!(deck.toggle_play(&mut rng).unwrap());
    assert!(deck.toggle_play(&mut rng).is_ok_and(|playing| !playing));
    assert_eq!(host.builds.get(), 1);
    assert_eq!(host.live.get(), 0);
}

#[test]
fn dropping_the_deck_releases_its_graph() {
    let host = CountingHost::default();
    let mut rng = StdRng::seed_from_u64(2);
    {
        let mut deck = SoundscapeDeck::new(host.clone());
        deck.play(&mut rng).unwrap();
        assert!(host.live.get() > 0);
    }
    assert_eq!(host.live.get(), 0);
}

#[test]
fn failed_build_leaves_the_deck_stopped() {
    let host = CountingHost::default();
    host.fail.set(true);
    let mut rng = StdRng::seed_from_u64(3);
    let mut deck = SoundscapeDeck::new(host.clone());
    assert!(matches!(deck.play(&mut rng), Err(SiteError::Audio(_))));
    assert!(!deck.is_playing());
    assert_eq!(host.live.get(), 0);
}

#[test]
fn volume_snaps_to_the_slider() {
    let host = CountingHost::default();
    let mut deck = SoundscapeDeck::new(host.clone());
    assert_abs_diff_eq!(host.volume.get(), 0.2);
    assert_abs_diff_eq!(deck.volume(), 0.2);

    deck.set_volume(0.12);
    assert_abs_diff_eq!(deck.volume(), 0.1, epsilon = 1e-6);
    deck.set_volume(0.93);
    assert_abs_diff_eq!(deck.volume(), 0.5, epsilon = 1e-6);
    deck.set_volume(-1.0);
    assert_eq!(deck.volume(), 0.0);
    assert_eq!(host.volume.get(), deck.volume());
}

#[test]
fn bubbles_are_occasional() {
    let mut rng = StdRng::seed_from_u64(13);
    let due = (0..10_000).filter(|_| bubble_due(&mut rng)).count();
    assert!((800..1200).contains(&due), "{due} bubbles in 10000 rolls");

    for _ in 0..100 {
        let b = Blip::bubble(&mut rng);
        assert!((600.0..1000.0).contains(&b.start_hz));
        assert!(b.secs > b.attack_secs);
    }
    assert!(Blip::CLICK.end_hz.is_some_and(|hz| hz < Blip::CLICK.start_hz));
}
