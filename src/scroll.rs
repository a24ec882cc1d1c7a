use crate::core::scope::Scope;
use crate::core::scroll::Scene;
use crate::core::sections::Choreography;
use crate::dom::{self, Listener};
use crate::frame::FrameLoop;
use crate::style::{self, Targets};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use web_sys as web;

/// The element whose position drives a choreography, plus the elements it
/// animates.
pub struct Attached {
    trigger: web::Element,
    targets: Targets,
}

/// Scroll-linked bindings of one feature, evaluated once per frame.
#[derive(Default)]
pub struct ScrollScene {
    scene: Scene<Attached>,
}

impl ScrollScene {
    /// Bind `choreography` to `trigger`. Nothing is bound when the trigger
    /// element is not in the document.
    pub fn bind(&mut self, trigger: Option<web::Element>, choreography: Choreography, targets: Targets) {
        let attached = trigger.map(|trigger| Attached { trigger, targets });
        self.scene.bind(attached, choreography.into());
    }

    pub fn is_empty(&self) -> bool {
        self.scene.is_empty()
    }

    fn on_scroll(&mut self, document: &web::Document) {
        let scroll = dom::scroll_y();
        let max = dom::max_scroll(document);
        self.scene.on_scroll(
            scroll,
            |a| dom::geometry(&a.trigger, scroll, max),
            |a, binding| style::apply(&a.targets, binding.samples()),
        );
    }

    fn advance(&mut self, dt: f64) {
        self.scene
            .advance(dt, |a, binding| style::apply(&a.targets, binding.samples()));
    }
}

/// Wire `scene` to window scroll and resize, and to the frame loop.
/// Every listener and the frame subscription are released with `scope`.
pub fn mount(scope: &mut Scope, frames: &FrameLoop, document: &web::Document, scene: ScrollScene) {
    if scene.is_empty() {
        return;
    }
    let Some(window) = web::window() else {
        return;
    };
    let scene = Rc::new(RefCell::new(scene));
    let dirty = Rc::new(Cell::new(true));
    for kind in ["scroll", "resize"] {
        let dirty = dirty.clone();
        scope.hold(Listener::new(&window, kind, move |_| dirty.set(true)));
    }
    let document = document.clone();
    scope.hold(frames.subscribe(move |dt| {
        let mut scene = scene.borrow_mut();
        if dirty.replace(false) {
            scene.on_scroll(&document);
        }
        scene.advance(dt);
    }));
}
