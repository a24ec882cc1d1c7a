use super::constants::{PROGRESS_FADE_SECS, PROGRESS_REVEAL_THRESHOLD, SCROLL_TO_TOP_SECS};
use super::easing::{Dir, Ease};
use super::scroll::{
    Anchor, Binding, Edge, Geometry, ScrollTrigger, TriggerEvent, TriggerMode, TriggerRule,
};
use super::timeline::{Position, Prop, Sample, Step, Timeline};
use super::tween::Tween;

pub const BAR: &str = "bar";
pub const RING: &str = "ring";

/// Page sections tracked by the ring, in document order.
pub const SECTIONS: [&str; 6] = ["hero", "cocktails", "about", "art", "menu", "contact"];

/// Ring fill after entering section `index` of `count`.
pub fn section_fill_percent(index: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    (index + 1).min(count) as f64 / count as f64 * 100.0
}

pub fn conic_gradient(percent: f64) -> String {
    format!(
        "conic-gradient(#e7d393 {p:.1}%, rgba(255,255,255,0.2) {p:.1}%)",
        p = percent
    )
}

fn page_timeline() -> Timeline {
    Timeline::new()
        .then(
            Step::to(BAR)
                .tween(Prop::ScaleX, 0.0, 1.0)
                .duration(1.0)
                .ease(Ease::None),
        )
        .push(
            Step::to(RING)
                .tween(Prop::Rotation, 0.0, 360.0)
                .duration(1.0)
                .ease(Ease::None),
            Position::WithPrevious,
        )
}

/// Linear bar, rotating ring and per-section fill of the progress widget.
#[derive(Clone, Debug)]
pub struct ProgressIndicator {
    page: Binding,
    reveal: ScrollTrigger,
    shown: bool,
    opacity: Tween,
    sections: Vec<ScrollTrigger>,
    fill: Tween,
}

impl ProgressIndicator {
    pub fn new(section_count: usize) -> Self {
        Self {
            page: Binding::new(TriggerRule::full(), page_timeline(), TriggerMode::Scrub),
            reveal: ScrollTrigger::new(TriggerRule::new(
                Edge::meet(Anchor::TOP, Anchor::Px(-80.0)),
                Edge::Max,
            )),
            shown: false,
            opacity: Tween::settled(0.0),
            sections: (0..section_count)
                .map(|_| ScrollTrigger::new(TriggerRule::centered()))
                .collect(),
            fill: Tween::settled(0.0),
        }
    }

    /// `page` is the geometry of the document body; `sections[i]` is `None`
    /// when that section is not on the page.
    pub fn on_scroll(&mut self, scroll: f64, page: &Geometry, sections: &[Option<Geometry>]) {
        self.page.on_scroll(scroll, page);

        let reveal = self.reveal.update(scroll, page);
        let show = reveal.progress > PROGRESS_REVEAL_THRESHOLD;
        if show != self.shown {
            self.shown = show;
            self.opacity.retarget(
                if show { 1.0 } else { 0.0 },
                PROGRESS_FADE_SECS,
                Ease::default(),
            );
        }

        let count = self.sections.len();
        for (i, (trigger, geometry)) in self.sections.iter_mut().zip(sections).enumerate() {
            let Some(g) = geometry else {
                continue;
            };
            let update = trigger.update(scroll, g);
            let entered = update
                .events
                .iter()
                .any(|e| matches!(e, TriggerEvent::Enter | TriggerEvent::EnterBack));
            if entered {
                self.fill.retarget(
                    section_fill_percent(i, count) as f32,
                    0.5,
                    Ease::Power2(Dir::Out),
                );
            }
        }
    }

    pub fn tick(&mut self, dt: f64) {
        self.opacity.advance(dt);
        self.fill.advance(dt);
    }

    pub fn is_animating(&self) -> bool {
        !self.opacity.is_finished() || !self.fill.is_finished()
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn opacity(&self) -> f32 {
        self.opacity.value()
    }

    pub fn fill_percent(&self) -> f64 {
        self.fill.value() as f64
    }

    pub fn fill_target(&self) -> f64 {
        self.fill.target() as f64
    }

    pub fn page_samples(&self) -> impl Iterator<Item = Sample> + '_ {
        self.page.samples()
    }
}

/// How "back to top" is carried out, detected once per page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollCapability {
    /// The browser animates `scrollTo` itself (`scroll-behavior` supported).
    NativeSmooth,
    /// Drive the scroll offset from our own tween every frame.
    Animated,
}

/// Tweened scroll back to the top of the page.
#[derive(Clone, Debug)]
pub struct ScrollToTop {
    offset: Tween,
}

impl ScrollToTop {
    pub fn new(from: f64) -> Self {
        Self {
            offset: Tween::new(
                from as f32,
                0.0,
                SCROLL_TO_TOP_SECS,
                Ease::Power3(Dir::InOut),
            ),
        }
    }

    /// Next scroll offset, or `None` once the scroll has arrived.
    pub fn tick(&mut self, dt: f64) -> Option<f64> {
        if self.offset.is_finished() {
            return None;
        }
        self.offset.advance(dt);
        Some(self.offset.value() as f64)
    }
}
