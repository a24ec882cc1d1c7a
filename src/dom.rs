use crate::core::scroll::Geometry;
use crate::core::{SiteError, SiteResult};
use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Anything `querySelector` can be called on.
pub trait Root {
    fn select(&self, selector: &str) -> Result<Option<web::Element>, JsValue>;
    fn select_all(&self, selector: &str) -> Result<web::NodeList, JsValue>;
}

impl Root for web::Document {
    fn select(&self, selector: &str) -> Result<Option<web::Element>, JsValue> {
        self.query_selector(selector)
    }
    fn select_all(&self, selector: &str) -> Result<web::NodeList, JsValue> {
        self.query_selector_all(selector)
    }
}

impl Root for web::Element {
    fn select(&self, selector: &str) -> Result<Option<web::Element>, JsValue> {
        self.query_selector(selector)
    }
    fn select_all(&self, selector: &str) -> Result<web::NodeList, JsValue> {
        self.query_selector_all(selector)
    }
}

pub fn query(root: &impl Root, selector: &str) -> Option<web::HtmlElement> {
    root.select(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

pub fn query_all(root: &impl Root, selector: &str) -> Vec<web::HtmlElement> {
    let Ok(list) = root.select_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<web::HtmlElement>().ok())
        .collect()
}

pub fn by_id(document: &web::Document, id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

/// Like [`by_id`], for features that cannot work without the element.
pub fn require(document: &web::Document, id: &str) -> SiteResult<web::HtmlElement> {
    by_id(document, id).ok_or_else(|| SiteError::MissingTarget(format!("#{id}")))
}

pub fn create(document: &web::Document, tag: &str) -> SiteResult<web::HtmlElement> {
    document
        .create_element(tag)
        .map_err(|e| SiteError::Dom(format!("create <{tag}>: {e:?}")))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|_| SiteError::Dom(format!("<{tag}> is not an HTMLElement")))
}

pub fn body(document: &web::Document) -> SiteResult<web::HtmlElement> {
    document
        .body()
        .ok_or_else(|| SiteError::MissingTarget("body".into()))
}

#[inline]
pub fn set_style(el: &web::HtmlElement, prop: &str, value: &str) {
    _ = el.style().set_property(prop, value);
}

/// An event listener that is removed when this guard is dropped.
pub struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn new(
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Self {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        _ = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        Self {
            target: target.clone(),
            kind,
            closure,
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

#[inline]
pub fn on_click(el: &web::HtmlElement, mut handler: impl FnMut() + 'static) -> Listener {
    Listener::new(el, "click", move |_| handler())
}

/// Viewport coordinates of a mouse/pointer event, if it is one.
pub fn client_pos(ev: &web::Event) -> Option<Vec2> {
    ev.dyn_ref::<web::MouseEvent>()
        .map(|m| Vec2::new(m.client_x() as f32, m.client_y() as f32))
}

/// A repeating timer cleared when dropped.
pub struct Interval {
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn new(period_ms: i32, tick: impl FnMut() + 'static) -> SiteResult<Self> {
        let window = web::window().ok_or_else(|| SiteError::MissingTarget("window".into()))?;
        let closure = Closure::wrap(Box::new(tick) as Box<dyn FnMut()>);
        let id = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms,
            )
            .map_err(|e| SiteError::Dom(format!("setInterval: {e:?}")))?;
        Ok(Self {
            id,
            _closure: closure,
        })
    }

    /// Browser timer id, for cancelling from inside the tick itself.
    pub fn id(&self) -> i32 {
        self.id
    }
}

pub fn clear_interval(id: i32) {
    if let Some(w) = web::window() {
        w.clear_interval_with_handle(id);
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        clear_interval(self.id);
    }
}

pub fn viewport() -> Vec2 {
    let Some(w) = web::window() else {
        return Vec2::ZERO;
    };
    let dim = |v: Result<JsValue, JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    Vec2::new(dim(w.inner_width()), dim(w.inner_height()))
}

pub fn scroll_y() -> f64 {
    web::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

pub fn max_scroll(document: &web::Document) -> f64 {
    let height = document
        .document_element()
        .map(|el| el.scroll_height() as f64)
        .unwrap_or(0.0);
    (height - viewport().y as f64).max(0.0)
}

/// Document-relative geometry of `el` for scroll triggers.
pub fn geometry(el: &web::Element, scroll: f64, max_scroll: f64) -> Geometry {
    let rect = el.get_bounding_client_rect();
    Geometry {
        element_top: rect.top() + scroll,
        element_height: rect.height(),
        viewport_height: viewport().y as f64,
        max_scroll,
    }
}

/// Geometry of the whole document, for page-level triggers.
pub fn page_geometry(document: &web::Document) -> Geometry {
    let max = max_scroll(document);
    let viewport_height = viewport().y as f64;
    Geometry {
        element_top: 0.0,
        element_height: max + viewport_height,
        viewport_height,
        max_scroll: max,
    }
}
