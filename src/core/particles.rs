use super::constants::{
    PARTICLE_ATTRACT_JITTER, PARTICLE_ATTRACT_RADIUS, PARTICLE_ATTRACT_SCALE,
    PARTICLE_ATTRACT_SECS, PARTICLE_DRIFT_Y,
};
use super::easing::{lerp, Dir, Ease};
use glam::Vec2;
use rand::Rng;

/// An infinitely repeating `from -> to` motion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoopSpec {
    pub from: f32,
    pub to: f32,
    pub duration: f64,
    pub delay: f64,
    /// Alternate direction on every repeat instead of jumping back.
    pub yoyo: bool,
    pub ease: Ease,
}

impl LoopSpec {
    pub fn value_at(&self, t: f64) -> f32 {
        if t < self.delay || self.duration <= 0.0 {
            return self.from;
        }
        let cycles = (t - self.delay) / self.duration;
        let n = cycles.floor();
        let frac = cycles - n;
        let p = if self.yoyo && (n as u64) % 2 == 1 {
            1.0 - frac
        } else {
            frac
        };
        lerp(self.from, self.to, self.ease.apply(p))
    }
}

/// Rendered state of a particle for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub pos: Vec2,
    pub opacity: f32,
    pub rotation: f32,
    pub scale: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Leg {
    Out,
    Back,
}

/// Temporary pull toward the pointer, then a glide back onto the loop.
#[derive(Clone, Copy, Debug)]
struct Excursion {
    from: Vec2,
    to: Vec2,
    elapsed: f64,
    leg: Leg,
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub size: f32,
    pub origin: Vec2,
    pub drift_x: LoopSpec,
    pub drift_y: LoopSpec,
    pub pulse: LoopSpec,
    pub spin: LoopSpec,
    excursion: Option<Excursion>,
}

impl Particle {
    fn spawn<R: Rng + ?Sized>(viewport: Vec2, rng: &mut R) -> Self {
        let drift_secs = rng.gen_range(12.0..20.0);
        let drift_delay = rng.gen_range(0.0..2.0);
        let sine = Ease::Sine(Dir::InOut);
        let drift = |to: f32| LoopSpec {
            from: 0.0,
            to,
            duration: drift_secs,
            delay: drift_delay,
            yoyo: true,
            ease: sine,
        };
        let size = rng.gen_range(2.0..8.0);
        let origin = Vec2::new(rng.gen::<f32>() * viewport.x, rng.gen::<f32>() * viewport.y);
        let base_opacity = rng.gen_range(0.3..1.0);
        let dx = rng.gen_range(-50.0..50.0);
        Self {
            size,
            origin,
            drift_x: drift(dx),
            drift_y: drift(PARTICLE_DRIFT_Y),
            pulse: LoopSpec {
                from: base_opacity,
                to: rng.gen_range(0.2..0.7),
                duration: rng.gen_range(2.0..5.0),
                delay: rng.gen_range(0.0..2.0),
                yoyo: true,
                ease: sine,
            },
            spin: LoopSpec {
                from: 0.0,
                to: 360.0,
                duration: rng.gen_range(10.0..30.0),
                delay: 0.0,
                yoyo: false,
                ease: Ease::None,
            },
            excursion: None,
        }
    }

    fn loop_pos(&self, t: f64) -> Vec2 {
        self.origin + Vec2::new(self.drift_x.value_at(t), self.drift_y.value_at(t))
    }

    pub fn is_attracted(&self) -> bool {
        self.excursion.is_some()
    }

    pub fn pose(&self, t: f64) -> Pose {
        let loop_pos = self.loop_pos(t);
        let (pos, scale) = match self.excursion {
            None => (loop_pos, 1.0),
            Some(ex) => {
                let e = Ease::Power2(Dir::Out)
                    .apply(ex.elapsed / PARTICLE_ATTRACT_SECS);
                match ex.leg {
                    Leg::Out => (
                        ex.from.lerp(ex.to, e as f32),
                        lerp(1.0, PARTICLE_ATTRACT_SCALE, e),
                    ),
                    Leg::Back => (
                        ex.to.lerp(loop_pos, e as f32),
                        lerp(PARTICLE_ATTRACT_SCALE, 1.0, e),
                    ),
                }
            }
        };
        Pose {
            pos,
            opacity: self.pulse.value_at(t),
            rotation: self.spin.value_at(t),
            scale,
        }
    }

    fn step_excursion(&mut self, dt: f64) {
        let Some(ex) = &mut self.excursion else {
            return;
        };
        ex.elapsed += dt;
        if ex.elapsed < PARTICLE_ATTRACT_SECS {
            return;
        }
        if ex.leg == Leg::Out {
            ex.leg = Leg::Back;
            ex.elapsed = 0.0;
        } else {
            self.excursion = None;
        }
    }
}

/// Fixed-size field of decorative particles on independent loops.
#[derive(Clone, Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    clock: f64,
}

impl ParticleField {
    pub fn spawn<R: Rng + ?Sized>(count: usize, viewport: Vec2, rng: &mut R) -> Self {
        let particles = (0..count).map(|_| Particle::spawn(viewport, rng)).collect();
        Self {
            particles,
            clock: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn tick(&mut self, dt: f64) {
        let dt = dt.max(0.0);
        self.clock += dt;
        for p in &mut self.particles {
            p.step_excursion(dt);
        }
    }

    pub fn poses(&self) -> impl Iterator<Item = Pose> + '_ {
        let t = self.clock;
        self.particles.iter().map(move |p| p.pose(t))
    }

    /// Pull every idle particle within the attraction radius toward the
    /// pointer. Returns how many were pulled.
    pub fn attract<R: Rng + ?Sized>(&mut self, pointer: Vec2, rng: &mut R) -> usize {
        let t = self.clock;
        let mut pulled = 0;
        for p in &mut self.particles {
            if p.is_attracted() {
                continue;
            }
            let here = p.pose(t).pos;
            if here.distance(pointer) >= PARTICLE_ATTRACT_RADIUS {
                continue;
            }
            let jitter = Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5)
                * PARTICLE_ATTRACT_JITTER;
            p.excursion = Some(Excursion {
                from: here,
                to: pointer + jitter,
                elapsed: 0.0,
                leg: Leg::Out,
            });
            pulled += 1;
        }
        pulled
    }
}
