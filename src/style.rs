use crate::core::timeline::{Prop, Sample};
use crate::dom;
use fnv::FnvHashMap;
use web_sys as web;

/// Elements a timeline animates, keyed by the timeline's target names.
/// Unit `i` of a target is `targets[name][i]`.
pub type Targets = FnvHashMap<&'static str, Vec<web::HtmlElement>>;

/// Accumulated property values for one element in one frame.
#[derive(Clone, Copy, Debug, Default)]
struct Styles {
    x: Option<f32>,
    y: Option<f32>,
    y_percent: Option<f32>,
    scale: Option<f32>,
    scale_x: Option<f32>,
    scale_y: Option<f32>,
    rotation: Option<f32>,
    opacity: Option<f32>,
    display: Option<f32>,
}

impl Styles {
    fn set(&mut self, prop: Prop, value: f32) {
        let slot = match prop {
            Prop::X => &mut self.x,
            Prop::Y => &mut self.y,
            Prop::YPercent => &mut self.y_percent,
            Prop::Scale => &mut self.scale,
            Prop::ScaleX => &mut self.scale_x,
            Prop::ScaleY => &mut self.scale_y,
            Prop::Rotation => &mut self.rotation,
            Prop::Opacity => &mut self.opacity,
            Prop::Display => &mut self.display,
        };
        *slot = Some(value);
    }

    fn has_transform(&self) -> bool {
        self.x.is_some()
            || self.y.is_some()
            || self.y_percent.is_some()
            || self.scale.is_some()
            || self.scale_x.is_some()
            || self.scale_y.is_some()
            || self.rotation.is_some()
    }

    fn transform(&self) -> String {
        let scale = self.scale.unwrap_or(1.0);
        format!(
            "translate({}px, {}px) translateY({}%) rotate({}deg) scale({}, {})",
            self.x.unwrap_or(0.0),
            self.y.unwrap_or(0.0),
            self.y_percent.unwrap_or(0.0),
            self.rotation.unwrap_or(0.0),
            scale * self.scale_x.unwrap_or(1.0),
            scale * self.scale_y.unwrap_or(1.0),
        )
    }

    fn write(&self, el: &web::HtmlElement) {
        if self.has_transform() {
            dom::set_style(el, "transform", &self.transform());
        }
        if let Some(o) = self.opacity {
            dom::set_style(el, "opacity", &format!("{o}"));
        }
        if let Some(d) = self.display {
            if d < 0.5 {
                dom::set_style(el, "display", "none");
            } else {
                _ = el.style().remove_property("display");
            }
        }
    }
}

/// Write one frame of timeline samples. Later samples for the same element
/// and property win. Targets or units with no element are skipped.
pub fn apply(targets: &Targets, samples: impl IntoIterator<Item = Sample>) {
    let mut frame: FnvHashMap<(&'static str, usize), Styles> = FnvHashMap::default();
    for s in samples {
        frame
            .entry((s.target, s.unit))
            .or_default()
            .set(s.prop, s.value);
    }
    for ((target, unit), styles) in frame {
        if let Some(el) = targets.get(target).and_then(|units| units.get(unit)) {
            styles.write(el);
        }
    }
}

/// Position an absolutely placed decoration.
#[inline]
pub fn place(el: &web::HtmlElement, x: f32, y: f32, rotation: f32, scale: f32) {
    dom::set_style(
        el,
        "transform",
        &format!("translate3d({x}px, {y}px, 0) rotate({rotation}deg) scale({scale})"),
    );
}

#[inline]
pub fn set_opacity(el: &web::HtmlElement, opacity: f32) {
    dom::set_style(el, "opacity", &format!("{opacity}"));
}
