// Host-side tests for the loading sequencer and its exit choreography.

#![allow(dead_code)]
mod common;

use common::core::constants::{LOADING_LOGO_SECS, LOADING_STEP_MIN, LOADING_STEP_SPAN};
use common::core::loading::{
    entrance_timeline, exit_timeline, LoadingSequencer, Stage, TimerControl, CONTAINER, LOGO,
    PERCENT,
};
use common::core::timeline::{Prop, Sample};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::Cell;
use std::rc::Rc;

const FRAME: f64 = 1.0 / 60.0;

fn counted() -> (LoadingSequencer, Rc<Cell<u32>>) {
    let calls = Rc::new(Cell::new(0));
    let seen = calls.clone();
    let seq = LoadingSequencer::new(move || seen.set(seen.get() + 1));
    (seq, calls)
}

/// Fire the progress timer until it asks to be cancelled; returns the
/// progress observed after each period.
fn run_timer(seq: &mut LoadingSequencer, rng: &mut StdRng) -> Vec<f64> {
    let mut seen = Vec::new();
    loop {
        let control = seq.on_timer(rng);
        seen.push(seq.progress());
        if control == TimerControl::Cancel {
            return seen;
        }
        assert!(seen.len() < 100, "timer never finished");
    }
}

#[test]
fn progress_is_monotonic_and_stops_at_exactly_100() {
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let (mut seq, _) = counted();
        let seen = run_timer(&mut seq, &mut rng);

        let mut prev = 0.0;
        for &p in &seen {
            assert!(p > prev, "seed {seed}: {p} after {prev}");
            assert!(p <= 100.0);
            if p < 100.0 {
                let step = p - prev;
                assert!((LOADING_STEP_MIN..LOADING_STEP_MIN + LOADING_STEP_SPAN).contains(&step));
            }
            prev = p;
        }
        assert_eq!(seq.progress(), 100.0);
        assert!(matches!(seq.stage(), Stage::Holding { .. }));
    }
}

#[test]
fn timer_after_completion_is_cancelled_without_effect() {
    let mut rng = StdRng::seed_from_u64(7);
    let (mut seq, _) = counted();
    run_timer(&mut seq, &mut rng);
    assert_eq!(seq.on_timer(&mut rng), TimerControl::Cancel);
    assert_eq!(seq.progress(), 100.0);
}

#[test]
fn completion_runs_once_after_the_exit() {
    let mut rng = StdRng::seed_from_u64(42);
    let (mut seq, calls) = counted();

    // Frames alone never complete a load that has not reached 100.
    for _ in 0..300 {
        assert!(!seq.advance(FRAME));
    }
    assert_eq!(calls.get(), 0);
    assert_eq!(seq.stage(), Stage::Filling);

    run_timer(&mut seq, &mut rng);
    assert_eq!(calls.get(), 0, "callback must wait for the exit timeline");

    let mut fired = 0;
    for _ in 0..300 {
        if seq.advance(FRAME) {
            fired += 1;
        }
        assert!(calls.get() <= 1);
    }
    assert_eq!(fired, 1);
    assert_eq!(calls.get(), 1);
    assert_eq!(seq.stage(), Stage::Done);
}

#[test]
fn counter_lands_on_100() {
    let mut rng = StdRng::seed_from_u64(3);
    let (mut seq, _) = counted();
    run_timer(&mut seq, &mut rng);
    for _ in 0..40 {
        seq.advance(FRAME);
    }
    assert_eq!(seq.displayed_percent(), 100);
    assert_eq!(seq.percent_label(), "100");
    assert!((seq.fill() - 1.0).abs() < 1e-6);
}

#[test]
fn displayed_percent_never_decreases() {
    let mut rng = StdRng::seed_from_u64(11);
    let (mut seq, _) = counted();
    let mut last = 0;
    while seq.stage() == Stage::Filling {
        seq.on_timer(&mut rng);
        for _ in 0..12 {
            seq.advance(FRAME);
            let shown = seq.displayed_percent();
            assert!(shown >= last, "{shown} after {last}");
            last = shown;
        }
    }
}

#[test]
fn exit_styles_only_appear_once_exiting() {
    let mut rng = StdRng::seed_from_u64(5);
    let (mut seq, _) = counted();
    run_timer(&mut seq, &mut rng);
    assert_eq!(seq.exit_samples().count(), 0);

    for _ in 0..300 {
        seq.advance(FRAME);
    }
    let hidden = seq
        .exit_samples()
        .filter(|s| s.target == CONTAINER && s.prop == Prop::Display)
        .last()
        .map(|s| s.value);
    assert_eq!(hidden, Some(0.0));
}

#[test]
fn exit_fades_logo_and_percentage_together() {
    let tl = exit_timeline();
    let logo = tl.steps().iter().find(|s| s.target == LOGO).unwrap();
    let percent = tl.steps().iter().find(|s| s.target == PERCENT).unwrap();
    assert_eq!(logo.start(), percent.start());
    assert_eq!(logo.end(), percent.end());
    assert_eq!(logo.units, 1);
    assert!(tl.duration() > 1.0);
}

fn logo(samples: impl Iterator<Item = Sample>, prop: Prop) -> Option<f32> {
    samples
        .filter(|s| s.target == LOGO && s.prop == prop)
        .last()
        .map(|s| s.value)
}

#[test]
fn logo_rises_in_on_mount() {
    assert_eq!(entrance_timeline().duration(), LOADING_LOGO_SECS);

    let (mut seq, _) = counted();
    assert!(seq.is_animating());
    assert_eq!(logo(seq.samples(), Prop::Opacity), Some(0.0));
    assert_eq!(logo(seq.samples(), Prop::Y), Some(50.0));
    assert!(seq.samples().all(|s| s.target == LOGO));

    for _ in 0..30 {
        seq.advance(FRAME);
    }
    let half = logo(seq.samples(), Prop::Opacity).unwrap();
    assert!(half > 0.5 && half < 1.0, "power3.out is past half by now: {half}");

    for _ in 0..40 {
        seq.advance(FRAME);
    }
    assert!(!seq.is_animating());
    assert_eq!(logo(seq.samples(), Prop::Opacity), Some(1.0));
    assert_eq!(logo(seq.samples(), Prop::Y), Some(0.0));
}

#[test]
fn exit_takes_over_the_logo_where_the_entrance_left_it() {
    let mut rng = StdRng::seed_from_u64(8);
    let (mut seq, _) = counted();
    for _ in 0..90 {
        seq.advance(FRAME);
    }
    run_timer(&mut seq, &mut rng);

    let mut last = 1.0;
    for _ in 0..300 {
        seq.advance(FRAME);
        if let Some(o) = logo(seq.samples(), Prop::Opacity) {
            assert!(o <= last + 1e-6, "logo brightened to {o} after {last}");
            last = o;
        }
    }
    assert_eq!(seq.stage(), Stage::Done);
    assert_eq!(logo(seq.samples(), Prop::Opacity), Some(0.0));
    assert_eq!(
        seq.samples()
            .filter(|s| s.target == PERCENT && s.prop == Prop::Y)
            .last()
            .map(|s| s.value),
        Some(-30.0)
    );
}
