use super::timeline::{Player, Sample, Timeline};
use smallvec::SmallVec;

/// A point along an element or the viewport, measured from its top.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anchor {
    Fraction(f64),
    Px(f64),
}

impl Anchor {
    pub const TOP: Anchor = Anchor::Fraction(0.0);
    pub const CENTER: Anchor = Anchor::Fraction(0.5);
    pub const BOTTOM: Anchor = Anchor::Fraction(1.0);

    #[inline]
    fn resolve(self, extent: f64) -> f64 {
        match self {
            Anchor::Fraction(f) => f * extent,
            Anchor::Px(px) => px,
        }
    }
}

/// One boundary of a trigger region, e.g. `top center` means "when the
/// element's top meets the viewport's center".
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Edge {
    Meet { element: Anchor, viewport: Anchor },
    /// The maximum scroll offset of the document.
    Max,
}

impl Edge {
    pub const fn meet(element: Anchor, viewport: Anchor) -> Self {
        Edge::Meet { element, viewport }
    }

    /// Scroll offset at which this edge is reached.
    pub fn scroll_offset(&self, g: &Geometry) -> f64 {
        match *self {
            Edge::Meet { element, viewport } => {
                g.element_top + element.resolve(g.element_height)
                    - viewport.resolve(g.viewport_height)
            }
            Edge::Max => g.max_scroll,
        }
    }
}

/// Layout snapshot needed to resolve a trigger. `element_top` is measured
/// from the top of the document, not the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Geometry {
    pub element_top: f64,
    pub element_height: f64,
    pub viewport_height: f64,
    pub max_scroll: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerRule {
    pub start: Edge,
    pub end: Edge,
}

impl TriggerRule {
    pub const fn new(start: Edge, end: Edge) -> Self {
        Self { start, end }
    }

    /// `top center` → `bottom center`: the element occupies the middle line.
    pub const fn centered() -> Self {
        Self::new(
            Edge::meet(Anchor::TOP, Anchor::CENTER),
            Edge::meet(Anchor::BOTTOM, Anchor::CENTER),
        )
    }

    /// `top top` → `bottom bottom`: the whole scrollable range of the element.
    pub const fn full() -> Self {
        Self::new(
            Edge::meet(Anchor::TOP, Anchor::TOP),
            Edge::meet(Anchor::BOTTOM, Anchor::BOTTOM),
        )
    }

    pub fn bounds(&self, g: &Geometry) -> (f64, f64) {
        (self.start.scroll_offset(g), self.end.scroll_offset(g))
    }

    /// Fraction of the region scrolled through, clamped to 0..=1.
    pub fn progress(&self, scroll: f64, g: &Geometry) -> f64 {
        let (start, end) = self.bounds(g);
        if end <= start {
            return if scroll >= start { 1.0 } else { 0.0 };
        }
        ((scroll - start) / (end - start)).clamp(0.0, 1.0)
    }

    fn zone(&self, scroll: f64, g: &Geometry) -> Zone {
        let (start, end) = self.bounds(g);
        if scroll < start {
            Zone::Before
        } else if scroll > end {
            Zone::After
        } else {
            Zone::Inside
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Zone {
    Before,
    Inside,
    After,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerEvent {
    /// Start boundary crossed scrolling down.
    Enter,
    /// End boundary crossed scrolling down.
    Leave,
    /// End boundary crossed scrolling up.
    EnterBack,
    /// Start boundary crossed scrolling up.
    LeaveBack,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TriggerUpdate {
    pub progress: f64,
    pub events: SmallVec<[TriggerEvent; 2]>,
}

/// Tracks which side of a region the scroll offset is on and reports the
/// boundaries crossed since the previous update.
#[derive(Clone, Debug)]
pub struct ScrollTrigger {
    rule: TriggerRule,
    zone: Zone,
}

impl ScrollTrigger {
    pub fn new(rule: TriggerRule) -> Self {
        // Every trigger starts "before" its region so a page loaded mid-way
        // still reports the crossings that put it where it is.
        Self {
            rule,
            zone: Zone::Before,
        }
    }

    pub fn rule(&self) -> &TriggerRule {
        &self.rule
    }

    pub fn is_active(&self) -> bool {
        self.zone == Zone::Inside
    }

    pub fn update(&mut self, scroll: f64, g: &Geometry) -> TriggerUpdate {
        use TriggerEvent::*;
        let next = self.rule.zone(scroll, g);
        let mut events = SmallVec::new();
        match (self.zone, next) {
            (Zone::Before, Zone::Inside) => events.push(Enter),
            (Zone::Before, Zone::After) => events.extend([Enter, Leave]),
            (Zone::Inside, Zone::After) => events.push(Leave),
            (Zone::After, Zone::Inside) => events.push(EnterBack),
            (Zone::After, Zone::Before) => events.extend([EnterBack, LeaveBack]),
            (Zone::Inside, Zone::Before) => events.push(LeaveBack),
            _ => {}
        }
        self.zone = next;
        TriggerUpdate {
            progress: self.rule.progress(scroll, g),
            events,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerMode {
    /// Play once, on the first crossing of the start boundary.
    Play,
    /// Playhead equals region progress times duration, reversible.
    Scrub,
}

/// A timeline bound to a scroll region.
#[derive(Clone, Debug)]
pub struct Binding {
    trigger: ScrollTrigger,
    player: Player,
    mode: TriggerMode,
    changed: bool,
}

impl Binding {
    pub fn new(rule: TriggerRule, timeline: Timeline, mode: TriggerMode) -> Self {
        Self {
            trigger: ScrollTrigger::new(rule),
            player: Player::new(timeline),
            mode,
            // The starting frame has never been written.
            changed: true,
        }
    }

    pub fn mode(&self) -> TriggerMode {
        self.mode
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Feed a new scroll offset. Returns the trigger update so callers can
    /// react to crossings as well.
    pub fn on_scroll(&mut self, scroll: f64, g: &Geometry) -> TriggerUpdate {
        let update = self.trigger.update(scroll, g);
        match self.mode {
            TriggerMode::Scrub => {
                let before = self.player.time();
                self.player.seek_fraction(update.progress);
                self.changed |= self.player.time() != before;
            }
            TriggerMode::Play => {
                if update.events.contains(&TriggerEvent::Enter)
                    && !self.player.is_playing()
                    && !self.player.is_complete()
                    && self.player.time() == 0.0
                {
                    log::debug!("[scroll] one-shot timeline started");
                    self.player.play();
                }
            }
        }
        update
    }

    /// Frame clock for one-shot playback; scrubbed bindings ignore it.
    pub fn advance(&mut self, dt: f64) -> bool {
        let playing = self.player.is_playing();
        let done = self.player.advance(dt);
        self.changed |= playing;
        done
    }

    /// Whether the samples moved since the last call. A finished one-shot
    /// reports false from then on, leaving its targets to other writers.
    pub fn take_changed(&mut self) -> bool {
        std::mem::replace(&mut self.changed, false)
    }

    /// Whether the next frame would change any sample.
    pub fn is_animating(&self) -> bool {
        self.player.is_playing()
    }

    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        self.player.samples()
    }
}

/// Bindings of one feature, each paired with the trigger it watches.
///
/// A binding whose trigger is absent is dropped at `bind` time, so a
/// section missing from the page animates nothing and raises no error.
#[derive(Clone, Debug)]
pub struct Scene<T> {
    bound: Vec<(T, Binding)>,
}

impl<T> Default for Scene<T> {
    fn default() -> Self {
        Self { bound: Vec::new() }
    }
}

impl<T> Scene<T> {
    /// Returns whether the binding was kept.
    pub fn bind(&mut self, trigger: Option<T>, binding: Binding) -> bool {
        match trigger {
            Some(t) => {
                self.bound.push((t, binding));
                true
            }
            None => {
                log::debug!("[scroll] trigger element missing, choreography skipped");
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    pub fn bindings(&self) -> impl Iterator<Item = &Binding> {
        self.bound.iter().map(|(_, b)| b)
    }

    /// Re-evaluate every binding at `scroll`. `write` sees only bindings
    /// whose samples changed.
    pub fn on_scroll(
        &mut self,
        scroll: f64,
        mut geometry: impl FnMut(&T) -> Geometry,
        mut write: impl FnMut(&T, &Binding),
    ) {
        for (trigger, binding) in &mut self.bound {
            let g = geometry(trigger);
            binding.on_scroll(scroll, &g);
            if binding.take_changed() {
                write(trigger, binding);
            }
        }
    }

    /// Frame clock for the one-shot bindings.
    pub fn advance(&mut self, dt: f64, mut write: impl FnMut(&T, &Binding)) {
        for (trigger, binding) in &mut self.bound {
            if binding.is_animating() {
                binding.advance(dt);
            }
            if binding.take_changed() {
                write(trigger, binding);
            }
        }
    }
}
