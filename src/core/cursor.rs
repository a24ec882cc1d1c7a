use super::constants::{
    CURSOR_DOT_HALF, CURSOR_FOLLOW_SPEED, CURSOR_HOVER_SCALE, CURSOR_HOVER_SECS, CURSOR_RING_HALF,
};
use super::easing::{Dir, Ease};
use super::tween::Tween;
use fnv::FnvHashSet;
use glam::Vec2;

/// Set of interactive elements the pointer is currently over.
///
/// Keyed by a caller-assigned element index so a repeated `enter` on the same
/// element is idempotent and a `leave` only cancels its own `enter`.
#[derive(Clone, Debug, Default)]
pub struct HoverTracker {
    inside: FnvHashSet<u32>,
}

impl HoverTracker {
    pub fn enter(&mut self, id: u32) -> bool {
        self.inside.insert(id)
    }

    pub fn leave(&mut self, id: u32) -> bool {
        self.inside.remove(&id)
    }

    /// Pointer left the document: no element can still be hovered.
    pub fn clear(&mut self) {
        self.inside.clear();
    }

    pub fn is_hovering(&self) -> bool {
        !self.inside.is_empty()
    }
}

/// Lagging visual cursor chasing the raw pointer.
#[derive(Clone, Debug)]
pub struct CursorFollower {
    raw: Vec2,
    rendered: Vec2,
    speed: f32,
    hover: HoverTracker,
    scale: Tween,
    in_document: bool,
}

impl Default for CursorFollower {
    fn default() -> Self {
        Self::new(CURSOR_FOLLOW_SPEED)
    }
}

impl CursorFollower {
    pub fn new(speed: f32) -> Self {
        Self {
            raw: Vec2::ZERO,
            rendered: Vec2::ZERO,
            speed: speed.clamp(0.0, 1.0),
            hover: HoverTracker::default(),
            scale: Tween::settled(1.0),
            in_document: true,
        }
    }

    #[inline]
    pub fn raw(&self) -> Vec2 {
        self.raw
    }

    #[inline]
    pub fn rendered(&self) -> Vec2 {
        self.rendered
    }

    pub fn is_hovering(&self) -> bool {
        self.hover.is_hovering()
    }

    pub fn in_document(&self) -> bool {
        self.in_document
    }

    pub fn on_move(&mut self, pos: Vec2) {
        self.raw = pos;
        self.in_document = true;
    }

    pub fn on_enter(&mut self, id: u32) {
        if self.hover.enter(id) {
            self.sync_scale();
        }
    }

    pub fn on_leave(&mut self, id: u32) {
        if self.hover.leave(id) {
            self.sync_scale();
        }
    }

    /// Pointer exited the viewport. Any hover without a matching leave is
    /// dropped here; the next enter re-arms it.
    pub fn on_document_leave(&mut self) {
        self.in_document = false;
        if self.hover.is_hovering() {
            self.hover.clear();
            self.sync_scale();
        }
    }

    fn sync_scale(&mut self) {
        let target = if self.hover.is_hovering() {
            CURSOR_HOVER_SCALE
        } else {
            1.0
        };
        if self.scale.target() != target {
            self.scale
                .retarget(target, CURSOR_HOVER_SECS, Ease::Power2(Dir::Out));
        }
    }

    /// One animation frame: close `speed` of the remaining distance.
    pub fn tick(&mut self, dt: f64) -> Vec2 {
        self.rendered += (self.raw - self.rendered) * self.speed;
        self.scale.advance(dt);
        self.rendered
    }

    pub fn scale(&self) -> f32 {
        self.scale.value()
    }

    /// Top-left of the 40px ring.
    pub fn ring_origin(&self) -> Vec2 {
        self.rendered - Vec2::splat(CURSOR_RING_HALF)
    }

    /// Top-left of the 8px dot, which tracks the raw pointer without lag.
    pub fn dot_origin(&self) -> Vec2 {
        self.raw - Vec2::splat(CURSOR_DOT_HALF)
    }
}
