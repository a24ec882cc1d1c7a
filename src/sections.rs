use crate::constants::*;
use crate::core::panel::Panel;
use crate::core::scope::Scope;
use crate::core::sections::{self, Choreography};
use crate::core::split::Granularity;
use crate::dom::{self, Listener};
use crate::frame::FrameLoop;
use crate::reveal;
use crate::scroll::{self, ScrollScene};
use crate::style::{self, Targets};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

fn targets(entries: impl IntoIterator<Item = (&'static str, Vec<web::HtmlElement>)>) -> Targets {
    entries.into_iter().collect()
}

fn one(document: &web::Document, selector: &str) -> Vec<web::HtmlElement> {
    dom::query(document, selector).into_iter().collect()
}

fn trigger(document: &web::Document, selector: &str) -> Option<web::Element> {
    document.query_selector(selector).ok().flatten()
}

/// Page-section motion: hero parallax right away, then the about and
/// contact reveals once fonts are ready and titles can be split.
///
/// Missing sections are skipped; this never fails.
pub fn mount(frames: &FrameLoop, document: &web::Document) -> Scope {
    let mut scope = Scope::new("sections");

    let mut hero = ScrollScene::default();
    hero.bind(
        trigger(document, HERO_SELECTOR),
        sections::hero_parallax(),
        targets([
            (sections::LEFT_LEAF, one(document, HERO_LEFT_LEAF)),
            (sections::RIGHT_LEAF, one(document, HERO_RIGHT_LEAF)),
        ]),
    );
    scroll::mount(&mut scope, frames, document, hero);

    mount_tile_hover(&mut scope, frames, document);

    // Reveals are bound later; they live in a nested scope that dies with
    // this one even if fonts are still loading.
    let late = Rc::new(RefCell::new(Scope::new("sections:reveals")));
    let weak = Rc::downgrade(&late);
    scope.hold(late);
    let frames = frames.clone();
    let document = document.clone();
    spawn_local(async move {
        reveal::fonts_ready(&document).await;
        let Some(late) = weak.upgrade() else {
            log::debug!("[sections] unmounted before fonts were ready");
            return;
        };
        let mut late = late.borrow_mut();
        let scene = reveal_scene(&mut late, &document);
        scroll::mount(&mut late, &frames, &document, scene);
    });
    scope
}

fn split_title(scope: &mut Scope, document: &web::Document, selector: &str) -> Vec<web::HtmlElement> {
    let Some(title) = dom::query(document, selector) else {
        return Vec::new();
    };
    match reveal::split_element(document, scope, &title, Granularity::Word) {
        Ok(words) => words,
        Err(e) => {
            log::warn!("[sections] could not split {}: {}", selector, e);
            Vec::new()
        }
    }
}

fn reveal_scene(scope: &mut Scope, document: &web::Document) -> ScrollScene {
    let mut scene = ScrollScene::default();

    let words = split_title(scope, document, ABOUT_TITLE);
    let tiles = dom::query_all(document, ABOUT_TILES);
    let about: Choreography = sections::about_reveal(words.len(), tiles.len());
    scene.bind(
        trigger(document, ABOUT_SELECTOR),
        about,
        targets([(sections::TITLE_WORDS, words), (sections::GRID_TILES, tiles)]),
    );

    let words = split_title(scope, document, CONTACT_TITLE);
    let cards = dom::query_all(document, CONTACT_CARDS);
    let contact = sections::contact_reveal(words.len(), cards.len());
    scene.bind(
        trigger(document, CONTACT_SELECTOR),
        contact,
        targets([
            (sections::TITLE_WORDS, words),
            (sections::CONTACT_CARDS, cards),
            (sections::FOOTER_LINE, one(document, CONTACT_FOOTER_LINE)),
            (sections::LEFT_LEAF, one(document, CONTACT_LEFT_LEAF)),
            (sections::RIGHT_LEAF, one(document, CONTACT_RIGHT_LEAF)),
        ]),
    );
    scene
}

struct Tile {
    el: web::HtmlElement,
    image: Option<web::HtmlElement>,
    overlay: Option<web::HtmlElement>,
    hover: Panel,
}

impl Tile {
    fn render(&self) {
        let (y, image_scale, overlay_opacity) = sections::tile_hover_styles(self.hover.openness());
        dom::set_style(&self.el, "translate", &sections::tile_lift(y));
        if let Some(img) = &self.image {
            dom::set_style(img, "transform", &format!("scale({image_scale})"));
        }
        if let Some(overlay) = &self.overlay {
            style::set_opacity(overlay, overlay_opacity);
        }
    }
}

fn mount_tile_hover(scope: &mut Scope, frames: &FrameLoop, document: &web::Document) {
    let tiles: Vec<Tile> = dom::query_all(document, ABOUT_TILES)
        .into_iter()
        .map(|el| Tile {
            image: dom::query(&*el, TILE_IMAGE),
            overlay: dom::query(&*el, TILE_OVERLAY),
            el,
            hover: sections::tile_hover(),
        })
        .collect();
    if tiles.is_empty() {
        return;
    }
    let tiles = Rc::new(RefCell::new(tiles));
    let count = tiles.borrow().len();
    for i in 0..count {
        let el = tiles.borrow()[i].el.clone();
        for (kind, open) in [("mouseenter", true), ("mouseleave", false)] {
            let tiles = tiles.clone();
            scope.hold(Listener::new(&el, kind, move |_| {
                let mut tiles = tiles.borrow_mut();
                let hover = &mut tiles[i].hover;
                if open {
                    hover.open();
                } else {
                    hover.close();
                }
            }));
        }
    }
    scope.hold(frames.subscribe(move |dt| {
        for tile in tiles.borrow_mut().iter_mut() {
            if tile.hover.in_flight() {
                tile.hover.tick(dt);
                tile.render();
            }
        }
    }));
}
