use super::Motion;
use crate::constants::*;
use crate::core::ingredients::{self, Ingredient, Showcase};
use crate::core::panel::Phase;
use crate::core::scope::Scope;
use crate::core::SiteResult;
use crate::dom::{self, Listener};
use crate::frame::FrameLoop;
use crate::style::{self, Targets};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

fn text_child(
    document: &web::Document,
    parent: &web::HtmlElement,
    tag: &str,
    class: &str,
    text: &str,
) -> SiteResult<()> {
    let el = dom::create(document, tag)?;
    el.set_class_name(class);
    el.set_text_content(Some(text));
    _ = parent.append_child(&el);
    Ok(())
}

fn render_card(document: &web::Document, item: &Ingredient) -> SiteResult<web::HtmlElement> {
    let card = dom::create(document, "div")?;
    card.set_class_name(&format!("{INGREDIENT_CARD_CLASS} cursor-pointer"));
    _ = card.set_attribute("data-id", &item.id.to_string());
    dom::set_style(&card, "border-color", &item.color);
    text_child(document, &card, "div", "ingredient-icon", &item.icon)?;
    text_child(document, &card, "h4", "ingredient-name", &item.name)?;
    text_child(document, &card, "p", "ingredient-description", &item.description)?;
    Ok(card)
}

struct View {
    drawer: web::HtmlElement,
    modal: Option<web::HtmlElement>,
    modal_card: Option<web::HtmlElement>,
    targets: Targets,
}

impl View {
    fn render_drawer(&self, showcase: &Showcase) {
        if showcase.drawer().phase() == Phase::Hidden {
            super::hide(&self.drawer);
            return;
        }
        if super::is_hidden(&self.drawer) {
            super::show(&self.drawer);
        }
        style::apply(&self.targets, showcase.drawer_samples());
    }

    fn render_modal(&self, showcase: &Showcase) {
        if let Some(modal) = &self.modal {
            if showcase.modal().phase() == Phase::Hidden {
                super::hide(modal);
            } else {
                super::show(modal);
                style::set_opacity(modal, showcase.modal().openness().clamp(0.0, 1.0));
            }
        }
        if let Some(card) = &self.modal_card {
            super::render(card, showcase.modal(), Motion::Grow { from: 0.8 });
        }
    }
}

fn fill_modal(document: &web::Document, item: &Ingredient) {
    let set = |id: &str, text: &str| {
        if let Some(el) = dom::by_id(document, id) {
            el.set_text_content(Some(text));
        }
    };
    set(INGREDIENT_NAME_ID, &item.name);
    set(INGREDIENT_DESCRIPTION_ID, &item.description);
    set(INGREDIENT_ICON_ID, &item.icon);
    if let Some(list) = dom::by_id(document, INGREDIENT_BENEFITS_ID) {
        list.set_text_content(None);
        for benefit in &item.benefits {
            _ = text_child(document, &list, "li", "ingredient-benefit", benefit);
        }
    }
    if let Some(card) = dom::by_id(document, INGREDIENT_MODAL_CARD_ID) {
        dom::set_style(&card, "border-color", &item.color);
    }
}

/// Ingredient drawer with cards and the detail modal.
pub fn mount(
    scope: &mut Scope,
    frames: &FrameLoop,
    document: &web::Document,
    items: Vec<Ingredient>,
) -> anyhow::Result<()> {
    let toggle = dom::require(document, INGREDIENTS_TOGGLE_ID)?;
    let drawer = dom::require(document, INGREDIENTS_DRAWER_ID)?;
    let grid = dom::by_id(document, INGREDIENTS_GRID_ID).unwrap_or_else(|| drawer.clone());

    let mut cards = Vec::with_capacity(items.len());
    for item in &items {
        let card = render_card(document, item)?;
        grid.append_child(&card)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let node = card.clone();
        scope.defer(move || node.remove());
        cards.push((item.id, card));
    }

    let mut targets = Targets::default();
    targets.insert(ingredients::DRAWER, vec![drawer.clone()]);
    targets.insert(ingredients::CARDS, cards.iter().map(|(_, c)| c.clone()).collect());
    let view = Rc::new(View {
        drawer,
        modal: dom::by_id(document, INGREDIENT_MODAL_ID),
        modal_card: dom::by_id(document, INGREDIENT_MODAL_CARD_ID),
        targets,
    });
    let showcase = Rc::new(RefCell::new(Showcase::new(items)));
    view.render_drawer(&showcase.borrow());
    view.render_modal(&showcase.borrow());

    {
        let showcase = showcase.clone();
        scope.hold(dom::on_click(&toggle, move || {
            let phase = showcase.borrow_mut().toggle_drawer();
            log::debug!("[ingredients] drawer {:?}", phase);
        }));
    }

    for (id, card) in &cards {
        let id = *id;
        let showcase = showcase.clone();
        let document = document.clone();
        scope.hold(dom::on_click(card, move || {
            let mut s = showcase.borrow_mut();
            if let Some(item) = s.select(id) {
                log::info!("[ingredients] showing {}", item.name);
                fill_modal(&document, item);
            }
        }));
    }

    if let Some(close) = dom::by_id(document, INGREDIENT_MODAL_CLOSE_ID) {
        let showcase = showcase.clone();
        scope.hold(dom::on_click(&close, move || showcase.borrow_mut().close_modal()));
    }
    // Clicking the backdrop (but not the card) closes too.
    if let Some(modal) = view.modal.clone() {
        let showcase = showcase.clone();
        let backdrop = modal.clone();
        scope.hold(Listener::new(&modal, "click", move |ev| {
            let on_backdrop = ev
                .target()
                .and_then(|t| t.dyn_into::<web::HtmlElement>().ok())
                .is_some_and(|t| t == backdrop);
            if on_backdrop {
                showcase.borrow_mut().close_modal();
            }
        }));
    }

    scope.hold(frames.subscribe(move |dt| {
        let mut s = showcase.borrow_mut();
        if !s.is_animating() {
            return;
        }
        s.tick(dt);
        view.render_drawer(&s);
        view.render_modal(&s);
    }));
    Ok(())
}
