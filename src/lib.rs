#![cfg(target_arch = "wasm32")]
use crate::core::content::SiteContent;
use crate::core::scope::Scope;
use crate::frame::FrameLoop;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod boundary;
mod constants;
mod core;
mod cursor;
mod details;
mod dom;
mod frame;
mod loading;
mod panels;
mod particles;
mod progress;
mod reveal;
mod scroll;
mod sections;
mod style;

/// Everything mounted on the page. Dropping it unmounts every feature.
struct Page {
    frames: FrameLoop,
    document: web::Document,
    content: Option<Rc<SiteContent>>,
    loading: Option<Scope>,
    features: Vec<Scope>,
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("mojito-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Unmount every feature, releasing listeners, timers, nodes and audio.
#[wasm_bindgen]
pub fn teardown() {
    if let Some(page) = PAGE.with(|p| p.borrow_mut().take()) {
        log::info!("tearing down {} features", page.features.len());
        drop(page);
    }
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let content = match SiteContent::from_json(core::SITE_JSON) {
        Ok(c) => Some(Rc::new(c)),
        Err(e) => {
            log::error!("[content] {}", e);
            None
        }
    };

    let frames = FrameLoop::new();
    let loading = match loading::mount(&frames, &document, reveal_page) {
        Ok(scope) => Some(scope),
        Err(e) => {
            log::warn!("[loading] skipped: {:#}", e);
            None
        }
    };
    let skip_loading = loading.is_none();

    PAGE.with(|p| {
        *p.borrow_mut() = Some(Page {
            frames,
            document,
            content,
            loading,
            features: Vec::new(),
        })
    });
    if skip_loading {
        reveal_page();
    }
    Ok(())
}

/// Loading finished: drop the loading screen and bring the page to life.
fn reveal_page() {
    PAGE.with(|p| {
        let mut page = p.borrow_mut();
        let Some(page) = page.as_mut() else {
            return;
        };
        page.loading.take();
        if let Some(main) = dom::query(&page.document, constants::MAIN_CONTENT_SELECTOR) {
            panels::show(&main);
        }
        mount_features(page);
    });
}

fn mount_features(page: &mut Page) {
    let frames = page.frames.clone();
    let document = page.document.clone();

    // Primary content: never contained, never expected to fail.
    page.features.push(sections::mount(&frames, &document));

    let bus = match audio::OutputBus::new() {
        Ok(bus) => Some(bus),
        Err(e) => {
            log::warn!("[audio] unavailable, sound features stay silent: {}", e);
            None
        }
    };

    let mut mounted: Vec<Option<Scope>> = vec![
        boundary::contain("cursor", |scope| cursor::mount(scope, &frames, &document)),
        boundary::contain("particles", |scope| {
            particles::mount(scope, &frames, &document)
        }),
        boundary::contain("progress", |scope| progress::mount(scope, &frames, &document)),
        boundary::contain("sound", |scope| {
            panels::sound::mount(scope, &frames, &document, bus.clone())
        }),
    ];

    match page.content.clone() {
        Some(content) => {
            mounted.push(boundary::contain("details", |_| {
                details::render(&document, &content)?;
                Ok(())
            }));
            mounted.push(boundary::contain("soundscape", |scope| {
                panels::soundscape::mount(scope, &frames, &document, bus.clone(), content.clone())
            }));
            mounted.push(boundary::contain("ingredients", |scope| {
                panels::ingredients::mount(scope, &frames, &document, content.ingredients.clone())
            }));
            mounted.push(boundary::contain("theme", |scope| {
                panels::theme::mount(scope, &frames, &document, content.themes.clone())
            }));
        }
        None => log::warn!("[content] missing, content-driven panels skipped"),
    }

    page.features.extend(mounted.into_iter().flatten());
    log::info!(
        "page ready: {} features, {} frame subscribers",
        page.features.len(),
        frames.subscriber_count()
    );
}
