use super::Motion;
use crate::audio::{OutputBus, WebGraphHost};
use crate::constants::*;
use crate::core::content::SiteContent;
use crate::core::panel::Panel;
use crate::core::scope::Scope;
use crate::core::soundscape::{SoundscapeDeck, SoundscapeKind};
use crate::dom::{self, Listener};
use crate::frame::FrameLoop;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

struct State {
    expanded: Panel,
    /// Visible while a graph is playing; drives the now-playing indicator.
    playing: Panel,
    deck: Option<SoundscapeDeck<WebGraphHost>>,
    bus: Option<Rc<OutputBus>>,
    rng: StdRng,
    content: Rc<SiteContent>,
}

struct View {
    panel: web::HtmlElement,
    play: Option<web::HtmlElement>,
    name: Option<web::HtmlElement>,
    description: Option<web::HtmlElement>,
    now_playing: Option<web::HtmlElement>,
    choices: Vec<(SoundscapeKind, web::HtmlElement)>,
}

impl View {
    fn show_selection(&self, s: &State) {
        let kind = s.deck.as_ref().map_or(SoundscapeKind::Jazz, |d| d.selected());
        if let Some(info) = s.content.soundscape(kind) {
            if let Some(name) = &self.name {
                name.set_text_content(Some(&format!("{} {}", info.icon, info.name)));
            }
            if let Some(description) = &self.description {
                description.set_text_content(Some(&info.description));
            }
        }
        for (k, el) in &self.choices {
            _ = el.class_list().toggle_with_force("active", *k == kind);
        }
    }

    fn show_playing(&self, playing: bool) {
        if let Some(play) = &self.play {
            play.set_text_content(Some(if playing { "⏸" } else { "▶" }));
            _ = play.set_attribute("aria-pressed", if playing { "true" } else { "false" });
        }
    }
}

/// Collapsible ambient soundscape player.
pub fn mount(
    scope: &mut Scope,
    frames: &FrameLoop,
    document: &web::Document,
    bus: Option<Rc<OutputBus>>,
    content: Rc<SiteContent>,
) -> anyhow::Result<()> {
    let panel = dom::require(document, SOUNDSCAPE_PANEL_ID)?;
    let choices: Vec<(SoundscapeKind, web::HtmlElement)> =
        dom::query_all(document, &format!("[{SOUNDSCAPE_CHOICE_ATTR}]"))
            .into_iter()
            .filter_map(|el| {
                let kind = SoundscapeKind::from_key(&el.get_attribute(SOUNDSCAPE_CHOICE_ATTR)?)?;
                Some((kind, el))
            })
            .collect();

    let deck = match &bus {
        Some(bus) => match WebGraphHost::new(bus.clone()) {
            Ok(host) => Some(SoundscapeDeck::new(host)),
            Err(e) => {
                log::warn!("[soundscape] audio unavailable: {}", e);
                None
            }
        },
        None => None,
    };

    let view = Rc::new(View {
        panel,
        play: dom::by_id(document, SOUNDSCAPE_PLAY_ID),
        name: dom::by_id(document, SOUNDSCAPE_NAME_ID),
        description: dom::by_id(document, SOUNDSCAPE_DESCRIPTION_ID),
        now_playing: dom::by_id(document, SOUNDSCAPE_NOW_PLAYING_ID),
        choices,
    });
    let state = Rc::new(RefCell::new(State {
        expanded: Panel::new(0.3, 0.3),
        playing: Panel::new(0.3, 0.3),
        deck,
        bus,
        rng: StdRng::from_entropy(),
        content,
    }));
    view.show_selection(&state.borrow());
    view.show_playing(false);
    super::render(&view.panel, &state.borrow().expanded, Motion::Rise { dy: 20.0 });

    for (id, open) in [(SOUNDSCAPE_OPEN_ID, true), (SOUNDSCAPE_CLOSE_ID, false)] {
        let Some(button) = dom::by_id(document, id) else {
            continue;
        };
        let state = state.clone();
        scope.hold(dom::on_click(&button, move || {
            let mut s = state.borrow_mut();
            if open {
                s.expanded.open();
            } else {
                s.expanded.close();
            }
        }));
    }

    if let Some(play) = view.play.clone() {
        let state = state.clone();
        let view = view.clone();
        scope.hold(dom::on_click(&play, move || {
            let mut s = state.borrow_mut();
            if let Some(bus) = &s.bus {
                bus.resume();
            }
            let State {
                deck, rng, playing, ..
            } = &mut *s;
            let Some(deck) = deck else {
                log::debug!("[soundscape] no audio, play ignored");
                return;
            };
            match deck.toggle_play(rng) {
                Ok(true) => {
                    playing.open();
                }
                Ok(false) => {
                    playing.close();
                }
                Err(e) => {
                    log::warn!("[soundscape] {}", e);
                    playing.close();
                }
            }
            view.show_playing(playing.is_open());
        }));
    }

    for (kind, el) in view.choices.iter() {
        let kind = *kind;
        let state = state.clone();
        let view_for_click = view.clone();
        scope.hold(dom::on_click(el, move || {
            let mut s = state.borrow_mut();
            let State {
                deck, rng, playing, ..
            } = &mut *s;
            if let Some(deck) = deck {
                if let Err(e) = deck.select(kind, rng) {
                    log::warn!("[soundscape] {}", e);
                    playing.close();
                    view_for_click.show_playing(false);
                }
            }
            drop(s);
            view_for_click.show_selection(&state.borrow());
        }));
    }

    if let Some(slider) = dom::by_id(document, SOUNDSCAPE_VOLUME_ID)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
    {
        let state = state.clone();
        let input = slider.clone();
        scope.hold(Listener::new(&slider, "input", move |_| {
            let Ok(volume) = input.value().parse::<f32>() else {
                return;
            };
            if let Some(deck) = &mut state.borrow_mut().deck {
                deck.set_volume(volume);
                input.set_value(&format!("{:.2}", deck.volume()));
            }
        }));
    }

    if let Some(dot) = &view.now_playing {
        super::hide(dot);
    }

    {
        let state = state.clone();
        scope.hold(frames.subscribe(move |dt| {
            let mut s = state.borrow_mut();
            if s.expanded.in_flight() {
                s.expanded.tick(dt);
                super::render(&view.panel, &s.expanded, Motion::Rise { dy: 20.0 });
            }
            if s.playing.in_flight() {
                s.playing.tick(dt);
                if let Some(dot) = &view.now_playing {
                    super::render(dot, &s.playing, Motion::Grow { from: 0.5 });
                }
            }
        }));
    }

    // Registered last so the graph stops before anything else is released.
    scope.defer(move || {
        let mut s = state.borrow_mut();
        s.playing.reset();
        s.deck.take();
    });
    Ok(())
}
