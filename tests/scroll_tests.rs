// Host-side tests for scroll triggers, bindings and section choreography.

#![allow(dead_code)]
mod common;

use approx::assert_abs_diff_eq;
use common::core::scroll::{
    Anchor, Binding, Edge, Geometry, Scene, ScrollTrigger, TriggerEvent, TriggerMode, TriggerRule,
};
use common::core::sections::{
    about_reveal, contact_reveal, hero_parallax, tile_hover_styles, tile_lift, CONTACT_CARDS,
    GRID_TILES, LEFT_LEAF, RIGHT_LEAF, TITLE_WORDS,
};
use common::core::timeline::{Prop, Sample};
use TriggerEvent::*;

fn section() -> Geometry {
    Geometry {
        element_top: 1000.0,
        element_height: 500.0,
        viewport_height: 800.0,
        max_scroll: 3000.0,
    }
}

fn value(samples: impl Iterator<Item = Sample>, target: &str, unit: usize, prop: Prop) -> Option<f32> {
    samples
        .filter(|s| s.target == target && s.unit == unit && s.prop == prop)
        .last()
        .map(|s| s.value)
}

#[test]
fn centered_rule_spans_the_middle_line() {
    let g = section();
    let rule = TriggerRule::centered();
    assert_eq!(rule.bounds(&g), (600.0, 1100.0));
    assert_abs_diff_eq!(rule.progress(850.0, &g), 0.5);
    assert_eq!(rule.progress(0.0, &g), 0.0);
    assert_eq!(rule.progress(5000.0, &g), 1.0);
}

#[test]
fn pixel_anchor_and_max_edge() {
    let g = section();
    let rule = TriggerRule::new(Edge::meet(Anchor::TOP, Anchor::Px(-80.0)), Edge::Max);
    assert_eq!(rule.bounds(&g), (1080.0, 3000.0));
}

#[test]
fn empty_region_progress_is_a_step() {
    let g = Geometry {
        element_top: 500.0,
        element_height: 0.0,
        viewport_height: 800.0,
        max_scroll: 1000.0,
    };
    let rule = TriggerRule::new(
        Edge::meet(Anchor::TOP, Anchor::TOP),
        Edge::meet(Anchor::BOTTOM, Anchor::TOP),
    );
    assert_eq!(rule.progress(499.0, &g), 0.0);
    assert_eq!(rule.progress(500.0, &g), 1.0);
}

#[test]
fn trigger_reports_each_boundary_crossing() {
    let g = section();
    let mut trigger = ScrollTrigger::new(TriggerRule::centered());
    assert!(trigger.update(0.0, &g).events.is_empty());
    assert_eq!(trigger.update(700.0, &g).events.as_slice(), &[Enter]);
    assert!(trigger.is_active());
    assert!(trigger.update(900.0, &g).events.is_empty());
    assert_eq!(trigger.update(1200.0, &g).events.as_slice(), &[Leave]);
    assert_eq!(trigger.update(900.0, &g).events.as_slice(), &[EnterBack]);
    assert_eq!(trigger.update(100.0, &g).events.as_slice(), &[LeaveBack]);
    assert!(!trigger.is_active());
}

#[test]
fn jumping_over_a_region_reports_both_crossings() {
    let g = section();
    let mut trigger = ScrollTrigger::new(TriggerRule::centered());
    assert_eq!(trigger.update(2000.0, &g).events.as_slice(), &[Enter, Leave]);
    assert_eq!(trigger.update(0.0, &g).events.as_slice(), &[EnterBack, LeaveBack]);
}

#[test]
fn play_binding_runs_once() {
    let g = section();
    let mut binding = Binding::new(
        TriggerRule::centered(),
        about_reveal(3, 4).timeline,
        TriggerMode::Play,
    );
    binding.on_scroll(100.0, &g);
    assert!(!binding.is_animating());

    binding.on_scroll(700.0, &g);
    assert!(binding.is_animating());
    let completions = (0..600).filter(|_| binding.advance(1.0 / 60.0)).count();
    assert_eq!(completions, 1);

    // Leaving and re-entering does not replay.
    binding.on_scroll(0.0, &g);
    binding.on_scroll(700.0, &g);
    assert!(!binding.is_animating());
    assert!(binding.player().is_complete());
}

#[test]
fn page_loaded_past_a_region_still_plays_it() {
    let g = section();
    let mut binding = Binding::new(
        TriggerRule::centered(),
        contact_reveal(2, 3).timeline,
        TriggerMode::Play,
    );
    let update = binding.on_scroll(2500.0, &g);
    assert_eq!(update.events.as_slice(), &[Enter, Leave]);
    assert!(binding.is_animating());
}

#[test]
fn scrubbed_parallax_tracks_scroll_both_ways() {
    let hero = Geometry {
        element_top: 0.0,
        element_height: 800.0,
        viewport_height: 800.0,
        max_scroll: 4000.0,
    };
    let parallax = hero_parallax();
    assert_eq!(parallax.mode, TriggerMode::Scrub);
    let mut binding = Binding::new(parallax.rule, parallax.timeline, parallax.mode);

    binding.on_scroll(400.0, &hero);
    let forward: Vec<Sample> = binding.samples().collect();
    assert_abs_diff_eq!(value(forward.iter().copied(), RIGHT_LEAF, 0, Prop::Y).unwrap(), 100.0);
    assert_abs_diff_eq!(value(forward.iter().copied(), LEFT_LEAF, 0, Prop::Y).unwrap(), -100.0);

    binding.on_scroll(200.0, &hero);
    assert_abs_diff_eq!(value(binding.samples(), RIGHT_LEAF, 0, Prop::Y).unwrap(), 50.0);

    binding.on_scroll(400.0, &hero);
    let back: Vec<Sample> = binding.samples().collect();
    assert_eq!(back, forward);
    assert!(!binding.is_animating());
}

#[test]
fn scrubbed_binding_ignores_the_frame_clock() {
    let parallax = hero_parallax();
    let mut binding = Binding::new(parallax.rule, parallax.timeline, parallax.mode);
    assert!(!binding.advance(10.0));
    assert_eq!(binding.player().time(), 0.0);
}

#[test]
fn entrance_reveals_hide_targets_before_playing() {
    let about = about_reveal(3, 4);
    assert_eq!(about.mode, TriggerMode::Play);
    let samples: Vec<Sample> = about.timeline.sample(0.0).collect();
    for unit in 0..3 {
        assert_eq!(value(samples.iter().copied(), TITLE_WORDS, unit, Prop::Opacity), Some(0.0));
        assert_eq!(value(samples.iter().copied(), TITLE_WORDS, unit, Prop::YPercent), Some(100.0));
    }
    for unit in 0..4 {
        assert_eq!(value(samples.iter().copied(), GRID_TILES, unit, Prop::Opacity), Some(0.0));
    }

    let end = about.timeline.duration();
    let settled: Vec<Sample> = about.timeline.sample(end).collect();
    for unit in 0..3 {
        assert_eq!(value(settled.iter().copied(), TITLE_WORDS, unit, Prop::Opacity), Some(1.0));
    }
}

#[test]
fn contact_cards_follow_the_title() {
    let contact = contact_reveal(2, 3);
    let steps = contact.timeline.steps();
    let title = steps.iter().find(|s| s.target == TITLE_WORDS).unwrap();
    let cards = steps.iter().find(|s| s.target == CONTACT_CARDS).unwrap();
    assert!(cards.start() > title.start());
    assert!(cards.unit_start(1) > cards.unit_start(0));

    // Both footer leaves rise together.
    let left = steps.iter().find(|s| s.target == LEFT_LEAF).unwrap();
    let right = steps.iter().find(|s| s.target == RIGHT_LEAF).unwrap();
    assert_eq!(left.start(), right.start());
}

#[test]
fn tile_hover_styles_span_rest_to_lifted() {
    assert_eq!(tile_hover_styles(0.0), (0.0, 1.0, 1.0));
    let (y, scale, overlay) = tile_hover_styles(1.0);
    assert_abs_diff_eq!(y, -5.0, epsilon = 1e-6);
    assert_abs_diff_eq!(scale, 1.1, epsilon = 1e-6);
    assert_abs_diff_eq!(overlay, 0.3, epsilon = 1e-6);
}

#[test]
fn tile_lift_uses_its_own_translate() {
    assert_eq!(tile_lift(0.0), "0px 0px");
    assert_eq!(tile_lift(-5.0), "0px -5px");
}

#[test]
fn absent_trigger_binds_nothing() {
    let mut scene: Scene<&str> = Scene::default();
    assert!(!scene.bind(None, about_reveal(3, 4).into()));
    assert!(scene.is_empty());

    let mut writes = 0;
    scene.on_scroll(700.0, |_| section(), |_, _| writes += 1);
    scene.advance(1.0 / 60.0, |_, _| writes += 1);
    assert_eq!(writes, 0);

    assert!(scene.bind(Some("#contact"), contact_reveal(2, 3).into()));
    assert_eq!(scene.len(), 1);
}

#[test]
fn finished_reveal_stops_rewriting_its_targets() {
    let g = section();
    let mut scene = Scene::default();
    scene.bind(Some("#about"), about_reveal(3, 4).into());

    let mut writes = 0;
    // The hidden starting frame is written once, before the region.
    scene.on_scroll(100.0, |_| g, |_, _| writes += 1);
    scene.on_scroll(200.0, |_| g, |_, _| writes += 1);
    assert_eq!(writes, 1);

    scene.on_scroll(700.0, |_| g, |_, _| writes += 1);
    let mut frames = 0;
    while scene.bindings().any(Binding::is_animating) {
        scene.advance(1.0 / 60.0, |_, _| writes += 1);
        frames += 1;
        assert!(frames < 600, "reveal never finished");
    }
    assert_eq!(writes, 1 + frames);

    // Later scrolling and frames leave the settled tiles to hover styling.
    for scroll in [800.0, 1200.0, 900.0] {
        scene.on_scroll(scroll, |_| g, |_, _| writes += 1);
        scene.advance(1.0 / 60.0, |_, _| writes += 1);
    }
    assert_eq!(writes, 1 + frames);
}

#[test]
fn scrubbed_scene_writes_only_when_scroll_moves() {
    let hero = Geometry {
        element_top: 0.0,
        element_height: 800.0,
        viewport_height: 800.0,
        max_scroll: 4000.0,
    };
    let mut scene = Scene::default();
    scene.bind(Some("#hero"), hero_parallax().into());

    let mut writes = 0;
    scene.on_scroll(0.0, |_| hero, |_, _| writes += 1);
    scene.on_scroll(0.0, |_| hero, |_, _| writes += 1);
    assert_eq!(writes, 1);

    scene.on_scroll(300.0, |_| hero, |_, _| writes += 1);
    scene.advance(1.0 / 60.0, |_, _| writes += 1);
    assert_eq!(writes, 2);
}
