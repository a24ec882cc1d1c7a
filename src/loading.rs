use crate::constants::{
    LOADING_BAR_ID, LOADING_LIQUID_ID, LOADING_LOGO_ID, LOADING_PERCENT_ID, LOADING_SCREEN_ID,
};
use crate::core::constants::LOADING_TICK_MS;
use crate::core::loading::{self, LoadingSequencer, TimerControl};
use crate::core::scope::Scope;
use crate::dom::{self, Interval};
use crate::frame::FrameLoop;
use crate::style::{self, Targets};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Mount the loading screen. `on_complete` runs exactly once, after the
/// exit animation has hidden the screen.
///
/// Fails when the screen is not in the document; the caller then reveals
/// the page without it.
pub fn mount(
    frames: &FrameLoop,
    document: &web::Document,
    on_complete: impl FnOnce() + 'static,
) -> anyhow::Result<Scope> {
    let container = dom::require(document, LOADING_SCREEN_ID)?;
    let liquid = dom::by_id(document, LOADING_LIQUID_ID);
    let logo = dom::by_id(document, LOADING_LOGO_ID);
    let percent = dom::by_id(document, LOADING_PERCENT_ID);
    let bar = dom::by_id(document, LOADING_BAR_ID);

    let mut scope = Scope::new("loading");
    // Completion runs after the current frame so it may unmount this screen.
    let sequencer = Rc::new(RefCell::new(LoadingSequencer::new(move || {
        spawn_local(async move { on_complete() })
    })));
    if let Some(liquid) = &liquid {
        dom::set_style(liquid, "transform-origin", "bottom");
    }

    let mut targets = Targets::default();
    targets.insert(loading::LIQUID, liquid.iter().cloned().collect());
    targets.insert(loading::LOGO, logo.into_iter().collect());
    targets.insert(loading::PERCENT, percent.iter().cloned().collect());
    targets.insert(loading::CONTAINER, vec![container]);
    // Hide the logo before the first frame so it never flashes in place.
    style::apply(&targets, sequencer.borrow().samples());

    // The timer cancels itself from inside its own tick, so it needs its id.
    let timer_id = Rc::new(Cell::new(None::<i32>));
    let interval = {
        let sequencer = sequencer.clone();
        let timer_id = timer_id.clone();
        let mut rng = StdRng::from_entropy();
        Interval::new(LOADING_TICK_MS, move || {
            if sequencer.borrow_mut().on_timer(&mut rng) == TimerControl::Cancel {
                if let Some(id) = timer_id.take() {
                    dom::clear_interval(id);
                }
            }
        })?
    };
    timer_id.set(Some(interval.id()));
    scope.hold(interval);

    let mut shown_percent = None;
    scope.hold(frames.subscribe(move |dt| {
        let mut seq = sequencer.borrow_mut();
        // Includes the frame a timeline settles on.
        let animating = seq.is_animating();
        seq.advance(dt);
        if let Some(liquid) = &liquid {
            dom::set_style(liquid, "transform", &format!("scaleY({})", seq.fill()));
        }
        if let Some(bar) = &bar {
            dom::set_style(bar, "width", &format!("{}%", seq.fill() * 100.0));
        }
        let label = seq.displayed_percent();
        if shown_percent != Some(label) {
            shown_percent = Some(label);
            if let Some(percent) = &percent {
                percent.set_text_content(Some(&seq.percent_label()));
            }
        }
        if animating || seq.is_animating() {
            style::apply(&targets, seq.samples());
        }
    }));

    log::info!("[loading] started");
    Ok(scope)
}
