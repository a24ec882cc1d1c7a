use crate::constants::{
    CURSOR_DOT_CLASS, CURSOR_RING_CLASS, HIDE_NATIVE_CURSOR_CSS, HOVERABLE_SELECTOR,
};
use crate::core::cursor::CursorFollower;
use crate::core::scope::Scope;
use crate::dom::{self, Listener};
use crate::frame::FrameLoop;
use crate::style;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

const RING_CSS: &str = "position:fixed;left:0;top:0;width:40px;height:40px;border:2px solid #e7d393;\
border-radius:50%;pointer-events:none;z-index:9999;mix-blend-mode:difference;";
const DOT_CSS: &str = "position:fixed;left:0;top:0;width:8px;height:8px;background:#e7d393;\
border-radius:50%;pointer-events:none;z-index:10000;";
const HOVER_FILL: &str = "rgba(231, 211, 147, 0.1)";

fn spawn_node(
    document: &web::Document,
    scope: &mut Scope,
    parent: &web::Node,
    class: &str,
    css: &str,
) -> anyhow::Result<web::HtmlElement> {
    let el = dom::create(document, "div")?;
    el.set_class_name(class);
    _ = el.set_attribute("style", css);
    parent
        .append_child(&el)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let node = el.clone();
    scope.defer(move || node.remove());
    Ok(el)
}

/// Smoothed ring plus exact dot replacing the native cursor.
pub fn mount(scope: &mut Scope, frames: &FrameLoop, document: &web::Document) -> anyhow::Result<()> {
    let body = dom::body(document)?;
    let head: web::Node = match document.head() {
        Some(h) => h.into(),
        None => body.clone().into(),
    };
    let hide_native = dom::create(document, "style")?;
    hide_native.set_text_content(Some(HIDE_NATIVE_CURSOR_CSS));
    head.append_child(&hide_native)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    scope.defer(move || hide_native.remove());
    let ring = spawn_node(document, scope, &body, CURSOR_RING_CLASS, RING_CSS)?;
    let dot = spawn_node(document, scope, &body, CURSOR_DOT_CLASS, DOT_CSS)?;

    let follower = Rc::new(RefCell::new(CursorFollower::default()));

    {
        let follower = follower.clone();
        scope.hold(Listener::new(document, "mousemove", move |ev| {
            if let Some(pos) = dom::client_pos(&ev) {
                follower.borrow_mut().on_move(pos);
            }
        }));
    }

    for (id, el) in dom::query_all(document, HOVERABLE_SELECTOR).iter().enumerate() {
        let id = id as u32;
        let enter = follower.clone();
        scope.hold(Listener::new(el, "mouseenter", move |_| {
            enter.borrow_mut().on_enter(id)
        }));
        let leave = follower.clone();
        scope.hold(Listener::new(el, "mouseleave", move |_| {
            leave.borrow_mut().on_leave(id)
        }));
    }

    if let Some(root) = document.document_element() {
        let follower = follower.clone();
        scope.hold(Listener::new(&root, "mouseleave", move |_| {
            follower.borrow_mut().on_document_leave()
        }));
    }
    if let Some(window) = web::window() {
        let follower = follower.clone();
        scope.hold(Listener::new(&window, "blur", move |_| {
            follower.borrow_mut().on_document_leave()
        }));
    }

    let mut was_hovering = false;
    scope.hold(frames.subscribe(move |dt| {
        let mut f = follower.borrow_mut();
        f.tick(dt);
        let ring_at = f.ring_origin();
        let dot_at = f.dot_origin();
        style::place(&ring, ring_at.x, ring_at.y, 0.0, f.scale());
        style::place(&dot, dot_at.x, dot_at.y, 0.0, 1.0);
        let shown = if f.in_document() { 1.0 } else { 0.0 };
        style::set_opacity(&ring, shown);
        style::set_opacity(&dot, shown);
        if f.is_hovering() != was_hovering {
            was_hovering = f.is_hovering();
            let fill = if was_hovering { HOVER_FILL } else { "transparent" };
            dom::set_style(&ring, "background-color", fill);
        }
    }));

    log::info!("[cursor] following pointer");
    Ok(())
}
