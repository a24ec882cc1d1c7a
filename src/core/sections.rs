use super::easing::{Dir, Ease};
use super::panel::Panel;
use super::scroll::{Anchor, Binding, Edge, TriggerMode, TriggerRule};
use super::timeline::{Position, Prop, Step, Timeline};

pub const LEFT_LEAF: &str = "left-leaf";
pub const RIGHT_LEAF: &str = "right-leaf";
pub const TITLE_WORDS: &str = "title-words";
pub const GRID_TILES: &str = "grid-tiles";
pub const CONTACT_CARDS: &str = "contact-cards";
pub const FOOTER_LINE: &str = "footer-line";

/// A section's scroll choreography, ready to bind.
#[derive(Clone, Debug)]
pub struct Choreography {
    pub rule: TriggerRule,
    pub timeline: Timeline,
    pub mode: TriggerMode,
}

impl From<Choreography> for Binding {
    fn from(c: Choreography) -> Self {
        Binding::new(c.rule, c.timeline, c.mode)
    }
}

fn when_top_hits_center() -> TriggerRule {
    TriggerRule::new(
        Edge::meet(Anchor::TOP, Anchor::CENTER),
        Edge::meet(Anchor::BOTTOM, Anchor::TOP),
    )
}

/// Hero leaves drift apart while the hero scrolls out, scrubbed.
pub fn hero_parallax() -> Choreography {
    let timeline = Timeline::new()
        .push(
            Step::to(RIGHT_LEAF)
                .tween(Prop::Y, 0.0, 200.0)
                .duration(1.0)
                .ease(Ease::None),
            Position::At(0.0),
        )
        .push(
            Step::to(LEFT_LEAF)
                .tween(Prop::Y, 0.0, -200.0)
                .duration(1.0)
                .ease(Ease::None),
            Position::At(0.0),
        );
    Choreography {
        rule: TriggerRule::new(
            Edge::meet(Anchor::TOP, Anchor::TOP),
            Edge::meet(Anchor::BOTTOM, Anchor::TOP),
        ),
        timeline,
        mode: TriggerMode::Scrub,
    }
}

/// About: title words rise in one after another, then the image grid.
pub fn about_reveal(words: usize, tiles: usize) -> Choreography {
    let timeline = Timeline::new()
        .then(
            Step::from(TITLE_WORDS)
                .units(words)
                .tween(Prop::Opacity, 0.0, 1.0)
                .tween(Prop::YPercent, 100.0, 0.0)
                .duration(1.0)
                .ease(Ease::ExpoOut)
                .stagger(0.02),
        )
        .push(
            Step::from(GRID_TILES)
                .units(tiles)
                .tween(Prop::Opacity, 0.0, 1.0)
                .tween(Prop::Y, 30.0, 0.0)
                .duration(1.0)
                .ease(Ease::Power1(Dir::InOut))
                .stagger(0.04),
            Position::Offset(-0.5),
        );
    Choreography {
        rule: when_top_hits_center(),
        timeline,
        mode: TriggerMode::Play,
    }
}

/// Contact: title, cards, footer line, then the footer leaves rise.
pub fn contact_reveal(words: usize, cards: usize) -> Choreography {
    let rise = |leaf: &'static str| {
        Step::to(leaf)
            .tween(Prop::Y, 0.0, -50.0)
            .duration(1.0)
            .ease(Ease::Power1(Dir::InOut))
    };
    let timeline = Timeline::new()
        .then(
            Step::from(TITLE_WORDS)
                .units(words)
                .tween(Prop::Opacity, 0.0, 1.0)
                .tween(Prop::YPercent, 100.0, 0.0)
                .stagger(0.02),
        )
        .push(
            Step::from(CONTACT_CARDS)
                .units(cards)
                .tween(Prop::Opacity, 0.0, 1.0)
                .tween(Prop::Y, 50.0, 0.0)
                .duration(0.8)
                .ease(Ease::Power2(Dir::Out))
                .stagger(0.1),
            Position::Offset(-0.5),
        )
        .push(
            Step::from(FOOTER_LINE)
                .tween(Prop::Opacity, 0.0, 1.0)
                .tween(Prop::Y, 30.0, 0.0)
                .duration(0.6),
            Position::Offset(-0.3),
        )
        .push(rise(RIGHT_LEAF), Position::Offset(-1.0))
        .push(rise(LEFT_LEAF), Position::WithPrevious);
    Choreography {
        rule: when_top_hits_center(),
        timeline,
        mode: TriggerMode::Play,
    }
}

/// Hover lift for one grid tile; openness 1 means fully lifted.
pub fn tile_hover() -> Panel {
    Panel::new(0.4, 0.4).eases(Ease::Power2(Dir::Out), Ease::Power2(Dir::Out))
}

/// Styles for a tile at a given hover openness: (tile y, image scale, overlay opacity).
pub fn tile_hover_styles(openness: f32) -> (f32, f32, f32) {
    (-5.0 * openness, 1.0 + 0.1 * openness, 1.0 - 0.7 * openness)
}

/// CSS `translate` value for a tile lifted by `y` pixels. The individual
/// property composes with the `transform` the about reveal writes.
pub fn tile_lift(y: f32) -> String {
    format!("0px {y}px")
}
