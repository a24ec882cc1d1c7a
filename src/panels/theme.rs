use crate::constants::{THEME_CHOICE_ATTR, THEME_SWITCHER_ID};
use crate::core::scope::Scope;
use crate::core::theme::{Theme, ThemeSwitcher};
use crate::dom;
use crate::frame::FrameLoop;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

fn write_palette(document: &web::Document, theme: &Theme) {
    let Some(root) = document
        .document_element()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    else {
        return;
    };
    dom::set_style(&root, "--color-yellow", &theme.primary);
    dom::set_style(&root, "--color-accent", &theme.accent);
}

/// Palette buttons that recolour the page.
pub fn mount(
    scope: &mut Scope,
    frames: &FrameLoop,
    document: &web::Document,
    themes: Vec<Theme>,
) -> anyhow::Result<()> {
    let switcher_el = dom::require(document, THEME_SWITCHER_ID)?;
    let body = dom::body(document)?;
    let switcher = ThemeSwitcher::new(themes)
        .ok_or_else(|| anyhow::anyhow!("no themes in site content"))?;

    let mut buttons = Vec::with_capacity(switcher.themes().len());
    for theme in switcher.themes() {
        let button = dom::create(document, "button")?;
        button.set_class_name("theme-choice cursor-pointer");
        _ = button.set_attribute(THEME_CHOICE_ATTR, &theme.key);
        _ = button.set_attribute("title", &theme.name);
        button.set_text_content(Some(&theme.icon));
        switcher_el
            .append_child(&button)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let node = button.clone();
        scope.defer(move || node.remove());
        buttons.push((theme.key.clone(), button));
    }
    write_palette(document, switcher.current());

    let mark_active = {
        let buttons = buttons.clone();
        move |key: &str| {
            for (k, b) in &buttons {
                _ = b.class_list().toggle_with_force("active", k == key);
            }
        }
    };
    mark_active(&switcher.current().key);

    let switcher = Rc::new(RefCell::new(switcher));
    for (key, button) in &buttons {
        let key = key.clone();
        let switcher = switcher.clone();
        let document = document.clone();
        let mark_active = mark_active.clone();
        scope.hold(dom::on_click(button, move || {
            let mut s = switcher.borrow_mut();
            if !s.select(&key) {
                return;
            }
            log::info!("[theme] {}", s.current().name);
            write_palette(&document, s.current());
            mark_active(&key);
        }));
    }

    scope.hold(frames.subscribe(move |dt| {
        let mut s = switcher.borrow_mut();
        if !s.is_animating() {
            return;
        }
        s.tick(dt);
        dom::set_style(&body, "background-color", &s.background().to_css());
        dom::set_style(&switcher_el, "transform", &format!("scale({})", s.pulse_scale()));
    }));
    Ok(())
}
