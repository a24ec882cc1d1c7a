// Host-side tests for the cursor follower and the particle field.

#![allow(dead_code)]
mod common;

use approx::assert_abs_diff_eq;
use common::core::constants::{CURSOR_HOVER_SCALE, PARTICLE_ATTRACT_RADIUS, PARTICLE_COUNT};
use common::core::cursor::{CursorFollower, HoverTracker};
use common::core::easing::Ease;
use common::core::particles::{LoopSpec, ParticleField, Pose};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

const FRAME: f64 = 1.0 / 60.0;
const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

#[test]
fn follower_closes_in_on_the_pointer() {
    let mut cursor = CursorFollower::default();
    let target = Vec2::new(500.0, 300.0);
    cursor.on_move(target);
    let first = cursor.tick(FRAME);
    assert!(first.length() > 0.0 && first.length() < target.length());
    for _ in 1..30 {
        cursor.tick(FRAME);
    }
    let gap = (cursor.rendered() - cursor.raw()).length();
    assert!(gap <= 0.01 * target.length(), "still {gap}px away");
}

#[test]
fn dot_tracks_raw_pointer_and_ring_lags() {
    let mut cursor = CursorFollower::default();
    cursor.on_move(Vec2::new(100.0, 100.0));
    cursor.tick(FRAME);
    assert_eq!(cursor.dot_origin(), Vec2::new(96.0, 96.0));
    assert!(cursor.ring_origin().x < 80.0);
}

#[test]
fn hover_tracker_is_idempotent_per_element() {
    let mut hover = HoverTracker::default();
    assert!(hover.enter(1));
    assert!(!hover.enter(1));
    hover.enter(2);
    hover.leave(1);
    assert!(hover.is_hovering());
    hover.leave(2);
    assert!(!hover.is_hovering());
    assert!(!hover.leave(2));
}

#[test]
fn hover_grows_the_ring_and_leaving_shrinks_it() {
    let mut cursor = CursorFollower::default();
    cursor.on_enter(7);
    cursor.on_enter(7);
    for _ in 0..30 {
        cursor.tick(FRAME);
    }
    assert!(cursor.is_hovering());
    assert_abs_diff_eq!(cursor.scale(), CURSOR_HOVER_SCALE, epsilon = 1e-4);

    cursor.on_leave(7);
    for _ in 0..30 {
        cursor.tick(FRAME);
    }
    assert_abs_diff_eq!(cursor.scale(), 1.0, epsilon = 1e-4);
}

#[test]
fn leaving_the_document_clears_a_stuck_hover() {
    let mut cursor = CursorFollower::default();
    cursor.on_enter(3);
    cursor.on_document_leave();
    assert!(!cursor.is_hovering());
    assert!(!cursor.in_document());
    for _ in 0..30 {
        cursor.tick(FRAME);
    }
    assert_abs_diff_eq!(cursor.scale(), 1.0, epsilon = 1e-4);

    cursor.on_move(Vec2::new(10.0, 10.0));
    assert!(cursor.in_document());
}

#[test]
fn yoyo_loops_alternate_direction() {
    let spec = LoopSpec {
        from: 0.0,
        to: 10.0,
        duration: 1.0,
        delay: 0.5,
        yoyo: true,
        ease: Ease::None,
    };
    assert_eq!(spec.value_at(0.2), 0.0);
    assert_abs_diff_eq!(spec.value_at(0.75), 2.5, epsilon = 1e-5);
    assert_abs_diff_eq!(spec.value_at(1.75), 7.5, epsilon = 1e-5);

    let repeat = LoopSpec { yoyo: false, ..spec };
    assert_abs_diff_eq!(repeat.value_at(1.75), 2.5, epsilon = 1e-5);
}

#[test]
fn field_spawns_within_the_viewport() {
    let mut rng = StdRng::seed_from_u64(1);
    let field = ParticleField::spawn(PARTICLE_COUNT, VIEWPORT, &mut rng);
    assert_eq!(field.len(), 50);
    for p in field.particles() {
        assert!((2.0..8.0).contains(&p.size));
        assert!(p.origin.x >= 0.0 && p.origin.x <= VIEWPORT.x);
        assert!(p.origin.y >= 0.0 && p.origin.y <= VIEWPORT.y);
        assert!(!p.is_attracted());
    }
    for pose in field.poses() {
        assert!((0.2..=1.0).contains(&pose.opacity));
        assert_eq!(pose.scale, 1.0);
    }
}

#[test]
fn seeded_fields_are_reproducible() {
    let a = ParticleField::spawn(20, VIEWPORT, &mut StdRng::seed_from_u64(9));
    let b = ParticleField::spawn(20, VIEWPORT, &mut StdRng::seed_from_u64(9));
    let pa: Vec<Pose> = a.poses().collect();
    let pb: Vec<Pose> = b.poses().collect();
    assert_eq!(pa, pb);
}

#[test]
fn attraction_pulls_nearby_particles_and_releases_them() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut field = ParticleField::spawn(PARTICLE_COUNT, VIEWPORT, &mut rng);
    field.tick(1.0);
    let pointer = field.poses().next().unwrap().pos;

    let pulled = field.attract(pointer, &mut rng);
    assert!(pulled >= 1);
    assert!(field.particles()[0].is_attracted());
    // Particles already on an excursion are not pulled again.
    assert_eq!(field.attract(pointer, &mut rng), 0);

    field.tick(0.5);
    let landed = field.poses().next().unwrap();
    assert!(landed.pos.distance(pointer) <= 50.0 * std::f32::consts::SQRT_2 + 1e-3);
    assert_abs_diff_eq!(landed.scale, 1.5, epsilon = 1e-5);

    field.tick(0.5);
    assert!(!field.particles()[0].is_attracted());
    assert_eq!(field.poses().next().unwrap().scale, 1.0);
}

#[test]
fn distant_pointer_attracts_nothing() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut field = ParticleField::spawn(PARTICLE_COUNT, VIEWPORT, &mut rng);
    let far = Vec2::splat(-10.0 * PARTICLE_ATTRACT_RADIUS - 1000.0);
    assert_eq!(field.attract(far, &mut rng), 0);
    assert!(field.particles().iter().all(|p| !p.is_attracted()));
}
