use crate::constants::{SPLIT_LINE_CLASS, SPLIT_UNIT_CLASS};
use crate::core::constants::{FONT_FALLBACK_DELAY_MS, LINE_TOP_TOLERANCE_PX};
use crate::core::scope::Scope;
use crate::core::split::{self, Granularity, Piece};
use crate::core::SiteResult;
use crate::dom;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Resolve once web fonts have loaded, so split text measures its final
/// layout. Falls back to a short delay when the document has no font set.
pub async fn fonts_ready(document: &web::Document) {
    let has_fonts = js_sys::Reflect::has(document, &JsValue::from_str("fonts")).unwrap_or(false);
    if has_fonts {
        match document.fonts().ready() {
            Ok(ready) => {
                if let Err(e) = JsFuture::from(ready).await {
                    log::debug!("[reveal] fonts.ready rejected: {:?}", e);
                }
                return;
            }
            Err(e) => log::debug!("[reveal] fonts.ready unavailable: {:?}", e),
        }
    }
    sleep_ms(FONT_FALLBACK_DELAY_MS).await;
}

async fn sleep_ms(ms: i32) {
    let Some(window) = web::window() else {
        return;
    };
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
    });
    _ = JsFuture::from(promise).await;
}

/// Replace `el`'s text with one span per unit and return the spans in
/// reading order. The unsplit text comes back when `scope` is disposed.
///
/// `Line` measures word spans after layout and regroups them, so the result
/// follows the browser's own wrapping.
pub fn split_element(
    document: &web::Document,
    scope: &mut Scope,
    el: &web::HtmlElement,
    granularity: Granularity,
) -> SiteResult<Vec<web::HtmlElement>> {
    let text = el.text_content().unwrap_or_default();
    let pieces = split::split(&text, granularity);

    {
        let el = el.clone();
        let text = text.clone();
        scope.defer(move || el.set_text_content(Some(&text)));
    }

    let words = render_units(document, el, &pieces)?;
    if granularity != Granularity::Line {
        return Ok(words);
    }
    let tops: Vec<f64> = words.iter().map(|w| w.offset_top() as f64).collect();
    let lines = split::group_lines(&tops, LINE_TOP_TOLERANCE_PX);
    render_lines(document, el, &pieces, &lines)
}

fn unit_span(document: &web::Document, class: &str, text: &str) -> SiteResult<web::HtmlElement> {
    let span = dom::create(document, "span")?;
    span.set_class_name(class);
    dom::set_style(&span, "display", "inline-block");
    span.set_text_content(Some(text));
    Ok(span)
}

fn append(parent: &web::Node, child: &web::Node) -> SiteResult<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|e| crate::core::SiteError::Dom(format!("appendChild: {e:?}")))
}

fn render_units(
    document: &web::Document,
    el: &web::HtmlElement,
    pieces: &[Piece],
) -> SiteResult<Vec<web::HtmlElement>> {
    el.set_text_content(None);
    let mut units = Vec::with_capacity(split::unit_count(pieces));
    for piece in pieces {
        match piece {
            Piece::Unit(s) => {
                let span = unit_span(document, SPLIT_UNIT_CLASS, s)?;
                append(el, &span)?;
                units.push(span);
            }
            Piece::Gap(s) => {
                let gap = document.create_text_node(s);
                append(el, &gap)?;
            }
        }
    }
    Ok(units)
}

fn render_lines(
    document: &web::Document,
    el: &web::HtmlElement,
    pieces: &[Piece],
    lines: &[std::ops::Range<usize>],
) -> SiteResult<Vec<web::HtmlElement>> {
    el.set_text_content(None);
    let mut out: Vec<web::HtmlElement> = Vec::with_capacity(lines.len());
    let mut line_text = String::new();
    let mut word = 0usize;
    let mut line = 0usize;
    for piece in pieces {
        if let Piece::Unit(_) = piece {
            if let Some(range) = lines.get(line) {
                if word >= range.end {
                    out.push(close_line(document, el, &mut line_text)?);
                    line += 1;
                }
            }
            word += 1;
        }
        line_text.push_str(piece.text());
    }
    if !line_text.trim().is_empty() {
        out.push(close_line(document, el, &mut line_text)?);
    }
    Ok(out)
}

fn close_line(
    document: &web::Document,
    el: &web::HtmlElement,
    text: &mut String,
) -> SiteResult<web::HtmlElement> {
    let span = unit_span(document, SPLIT_LINE_CLASS, text.trim_end())?;
    dom::set_style(&span, "display", "block");
    append(el, &span)?;
    text.clear();
    Ok(span)
}
