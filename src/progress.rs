use crate::constants::{
    PROGRESS_BAR_ID, PROGRESS_FILL_ID, PROGRESS_ID, PROGRESS_RING_ID, SCROLL_TO_TOP_ID,
};
use crate::core::progress::{
    self, conic_gradient, ProgressIndicator, ScrollCapability, ScrollToTop, SECTIONS,
};
use crate::core::scope::Scope;
use crate::dom::{self, Listener};
use crate::frame::FrameLoop;
use crate::style::{self, Targets};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Smooth scrolling is native when the CSS property exists at all.
fn detect_capability(document: &web::Document) -> ScrollCapability {
    let native = document
        .document_element()
        .and_then(|root| root.dyn_into::<web::HtmlElement>().ok())
        .and_then(|root| {
            js_sys::Reflect::has(&root.style(), &JsValue::from_str("scrollBehavior")).ok()
        })
        .unwrap_or(false);
    if native {
        ScrollCapability::NativeSmooth
    } else {
        ScrollCapability::Animated
    }
}

struct State {
    indicator: ProgressIndicator,
    sections: Vec<Option<web::Element>>,
    scroll_to_top: Option<ScrollToTop>,
}

/// Reading-progress bar and ring, section fill and back-to-top button.
pub fn mount(scope: &mut Scope, frames: &FrameLoop, document: &web::Document) -> anyhow::Result<()> {
    let widget = dom::require(document, PROGRESS_ID)?;
    let bar = dom::by_id(document, PROGRESS_BAR_ID);
    let ring = dom::by_id(document, PROGRESS_RING_ID);
    let fill = dom::by_id(document, PROGRESS_FILL_ID);
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;

    let mut targets = Targets::default();
    targets.insert(progress::BAR, bar.into_iter().collect());
    targets.insert(progress::RING, ring.into_iter().collect());
    if let Some(bar) = targets.get(progress::BAR).and_then(|b| b.first()) {
        dom::set_style(bar, "transform-origin", "left center");
    }

    let sections: Vec<Option<web::Element>> = SECTIONS
        .iter()
        .map(|id| document.get_element_by_id(id))
        .collect();
    let found = sections.iter().filter(|s| s.is_some()).count();
    log::info!("[progress] tracking {}/{} sections", found, SECTIONS.len());

    let state = Rc::new(RefCell::new(State {
        indicator: ProgressIndicator::new(SECTIONS.len()),
        sections,
        scroll_to_top: None,
    }));
    style::set_opacity(&widget, 0.0);

    let capability = detect_capability(document);
    log::info!("[progress] scroll-to-top uses {:?}", capability);
    if let Some(button) = dom::by_id(document, SCROLL_TO_TOP_ID) {
        let state = state.clone();
        let window = window.clone();
        scope.hold(dom::on_click(&button, move || match capability {
            ScrollCapability::NativeSmooth => {
                let opts = web::ScrollToOptions::new();
                opts.set_top(0.0);
                opts.set_behavior(web::ScrollBehavior::Smooth);
                window.scroll_to_with_scroll_to_options(&opts);
            }
            ScrollCapability::Animated => {
                state.borrow_mut().scroll_to_top = Some(ScrollToTop::new(dom::scroll_y()));
            }
        }));
    }

    let dirty = Rc::new(Cell::new(true));
    for kind in ["scroll", "resize"] {
        let dirty = dirty.clone();
        scope.hold(Listener::new(&window, kind, move |_| dirty.set(true)));
    }

    let document = document.clone();
    let mut shown_fill = f64::NAN;
    scope.hold(frames.subscribe(move |dt| {
        let mut s = state.borrow_mut();
        if s.scroll_to_top.is_some() {
            match s.scroll_to_top.as_mut().and_then(|top| top.tick(dt)) {
                Some(y) => window.scroll_to_with_x_and_y(0.0, y),
                None => s.scroll_to_top = None,
            }
        }
        if dirty.replace(false) {
            let scroll = dom::scroll_y();
            let page = dom::page_geometry(&document);
            let max = page.max_scroll;
            let geometry: Vec<_> = s
                .sections
                .iter()
                .map(|el| el.as_ref().map(|el| dom::geometry(el, scroll, max)))
                .collect();
            s.indicator.on_scroll(scroll, &page, &geometry);
            style::apply(&targets, s.indicator.page_samples());
        }
        if s.indicator.is_animating() {
            s.indicator.tick(dt);
            style::set_opacity(&widget, s.indicator.opacity());
        }
        let percent = s.indicator.fill_percent();
        if (percent - shown_fill).abs() > 0.05 || shown_fill.is_nan() {
            shown_fill = percent;
            if let Some(fill) = &fill {
                dom::set_style(fill, "background", &conic_gradient(percent));
            }
        }
    }));
    Ok(())
}
