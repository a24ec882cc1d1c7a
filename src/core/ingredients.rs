use super::constants::{DRAWER_ENTER_SECS, DRAWER_EXIT_SECS, MODAL_ENTER_SECS, MODAL_EXIT_SECS};
use super::easing::{Dir, Ease};
use super::panel::{Panel, Phase};
use super::timeline::{Player, Position, Prop, Sample, Step, Timeline};
use serde::Deserialize;

pub const DRAWER: &str = "drawer";
pub const CARDS: &str = "cards";

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Ingredient {
    pub id: u32,
    pub name: String,
    pub image: String,
    pub description: String,
    pub color: String,
    pub benefits: Vec<String>,
    pub icon: String,
}

/// Card entrance: the cards pop in one by one, starting while the drawer
/// is still rising. The drawer itself follows its panel's openness.
pub fn cards_timeline(cards: usize) -> Timeline {
    Timeline::new().push(
        Step::from(CARDS)
            .units(cards)
            .tween(Prop::Opacity, 0.0, 1.0)
            .tween(Prop::Y, 50.0, 0.0)
            .tween(Prop::Scale, 0.8, 1.0)
            .duration(0.4)
            .stagger(0.1)
            .ease(Ease::back_out()),
        Position::At(DRAWER_ENTER_SECS - 0.3),
    )
}

/// Ingredient drawer plus the detail modal for the selected ingredient.
#[derive(Clone, Debug)]
pub struct Showcase {
    ingredients: Vec<Ingredient>,
    drawer: Panel,
    entrance: Player,
    modal: Panel,
    selected: Option<u32>,
}

impl Showcase {
    pub fn new(ingredients: Vec<Ingredient>) -> Self {
        let entrance = Player::new(cards_timeline(ingredients.len()));
        Self {
            ingredients,
            drawer: Panel::new(DRAWER_ENTER_SECS, DRAWER_EXIT_SECS)
                .eases(Ease::Power3(Dir::Out), Ease::Power2(Dir::In)),
            entrance,
            modal: Panel::new(MODAL_ENTER_SECS, MODAL_EXIT_SECS)
                .eases(Ease::back_out(), Ease::Power2(Dir::In)),
            selected: None,
        }
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn drawer(&self) -> &Panel {
        &self.drawer
    }

    pub fn modal(&self) -> &Panel {
        &self.modal
    }

    /// Open or close the drawer. Reopening mid-exit reverses the panel from
    /// where it is and leaves the cards as they are; only an open from
    /// fully hidden replays the card entrance.
    pub fn toggle_drawer(&mut self) -> Phase {
        let from_hidden = self.drawer.phase() == Phase::Hidden;
        let phase = self.drawer.toggle();
        if phase == Phase::Entering && from_hidden {
            self.entrance = Player::new(cards_timeline(self.ingredients.len()));
            self.entrance.play();
        }
        phase
    }

    /// Select the ingredient with `id` and open the modal. Unknown ids are
    /// ignored. A new selection replaces the previous one.
    pub fn select(&mut self, id: u32) -> Option<&Ingredient> {
        let idx = self.ingredients.iter().position(|i| i.id == id)?;
        self.selected = Some(id);
        self.modal.open();
        Some(&self.ingredients[idx])
    }

    /// Start the modal exit; the selection clears once it has played.
    pub fn close_modal(&mut self) {
        self.modal.close();
    }

    pub fn selected(&self) -> Option<&Ingredient> {
        let id = self.selected?;
        self.ingredients.iter().find(|i| i.id == id)
    }

    pub fn tick(&mut self, dt: f64) {
        self.drawer.tick(dt);
        self.entrance.advance(dt);
        if self.modal.tick(dt) == Some(Phase::Hidden) {
            self.selected = None;
        }
    }

    pub fn is_animating(&self) -> bool {
        self.drawer.in_flight() || self.modal.in_flight() || self.entrance.is_playing()
    }

    /// Drawer and card styles. The drawer's opacity and rise come from the
    /// panel, so a reversal continues from the current value.
    pub fn drawer_samples(&self) -> Vec<Sample> {
        let open = self.drawer.openness();
        let drawer = [
            Sample {
                target: DRAWER,
                unit: 0,
                prop: Prop::Opacity,
                value: open,
            },
            Sample {
                target: DRAWER,
                unit: 0,
                prop: Prop::Y,
                value: 100.0 * (1.0 - open),
            },
        ];
        drawer.into_iter().chain(self.entrance.samples()).collect()
    }
}
