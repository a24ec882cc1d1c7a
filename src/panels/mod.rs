use crate::core::panel::{Panel, Phase};
use crate::dom;
use web_sys as web;

pub mod ingredients;
pub mod sound;
pub mod soundscape;
pub mod theme;

#[inline]
pub fn show(el: &web::HtmlElement) {
    _ = el.class_list().remove_1("hidden");
    _ = el.style().remove_property("display");
}

#[inline]
pub fn hide(el: &web::HtmlElement) {
    _ = el.class_list().add_1("hidden");
    dom::set_style(el, "display", "none");
}

#[inline]
pub fn is_hidden(el: &web::HtmlElement) -> bool {
    el.class_list().contains("hidden") || el.style().get_property_value("display").ok().as_deref() == Some("none")
}

/// How an overlay moves while it opens.
#[derive(Clone, Copy, Debug)]
pub enum Motion {
    /// Fades in while rising from `dy` pixels below.
    Rise { dy: f32 },
    /// Fades in while growing from `from` scale.
    Grow { from: f32 },
}

/// Write a panel's current state to its element. Hidden panels are taken
/// out of layout entirely.
pub fn render(el: &web::HtmlElement, panel: &Panel, motion: Motion) {
    if panel.phase() == Phase::Hidden {
        if !is_hidden(el) {
            hide(el);
        }
        return;
    }
    if is_hidden(el) {
        show(el);
    }
    let open = panel.openness();
    let transform = match motion {
        Motion::Rise { dy } => format!("translateY({}px)", dy * (1.0 - open)),
        Motion::Grow { from } => format!("scale({})", from + (1.0 - from) * open),
    };
    dom::set_style(el, "transform", &transform);
    dom::set_style(el, "opacity", &format!("{}", open.clamp(0.0, 1.0)));
}
