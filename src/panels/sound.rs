use crate::audio::{self, OutputBus};
use crate::constants::{SOUND_TARGETS_SELECTOR, SOUND_TOGGLE_ID};
use crate::core::constants::{BUBBLE_PERIOD_MS, SFX_LEVEL, SOUND_TOGGLE_SECS};
use crate::core::easing::{Dir, Ease};
use crate::core::panel::{Panel, Phase};
use crate::core::scope::Scope;
use crate::core::sfx::{self, Blip};
use crate::core::timeline::{Player, Prop, Step, Timeline};
use crate::dom::{self, Interval, Listener};
use crate::frame::FrameLoop;
use crate::style::{self, Targets};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

const BUTTON: &str = "button";

fn spin() -> Timeline {
    Timeline::new()
        .then(
            Step::to(BUTTON)
                .tween(Prop::Scale, 1.0, 1.2)
                .tween(Prop::Rotation, 0.0, 360.0)
                .duration(SOUND_TOGGLE_SECS)
                .ease(Ease::back_out()),
        )
        .then(
            Step::to(BUTTON)
                .tween(Prop::Scale, 1.2, 1.0)
                .duration(0.2)
                .ease(Ease::Power2(Dir::Out)),
        )
}

struct Effects {
    bus: Rc<OutputBus>,
    channel: web::GainNode,
}

impl Effects {
    fn play(&self, blip: &Blip) {
        if let Err(e) = audio::play_blip(&self.bus, &self.channel, blip) {
            log::warn!("[sound] {}", e);
        }
    }

    fn set_level(&self, level: f32) {
        _ = self
            .channel
            .gain()
            .set_value_at_time(level, self.bus.ctx().current_time());
    }
}

struct State {
    enabled: Panel,
    spin: Player,
    effects: Option<Effects>,
    rng: StdRng,
}

impl State {
    fn blip(&self, blip: &Blip) {
        if let (true, Some(fx)) = (self.enabled.is_open(), &self.effects) {
            fx.play(blip);
        }
    }
}

/// Sound on/off control plus interface blips. Without audio the button
/// still toggles but stays silent.
pub fn mount(
    scope: &mut Scope,
    frames: &FrameLoop,
    document: &web::Document,
    bus: Option<Rc<OutputBus>>,
) -> anyhow::Result<()> {
    let button = dom::require(document, SOUND_TOGGLE_ID)?;
    let effects = match bus {
        Some(bus) => match bus.channel(SFX_LEVEL, "Effects") {
            Ok(channel) => Some(Effects { bus, channel }),
            Err(e) => {
                log::warn!("[sound] effects unavailable: {}", e);
                None
            }
        },
        None => None,
    };
    if let Some(fx) = &effects {
        let channel = fx.channel.clone();
        scope.defer(move || {
            _ = channel.disconnect();
        });
    }

    let state = Rc::new(RefCell::new(State {
        enabled: Panel::new(SOUND_TOGGLE_SECS, SOUND_TOGGLE_SECS).visible(),
        spin: Player::new(spin()),
        effects,
        rng: StdRng::from_entropy(),
    }));

    {
        let state = state.clone();
        let button_el = button.clone();
        scope.hold(dom::on_click(&button, move || {
            let mut s = state.borrow_mut();
            if let Some(fx) = &s.effects {
                fx.bus.resume();
            }
            let phase = s.enabled.toggle();
            s.spin = Player::new(spin());
            s.spin.play();
            let on = phase == Phase::Entering;
            if let Some(fx) = &s.effects {
                fx.set_level(if on { SFX_LEVEL } else { 0.0 });
            }
            _ = button_el.class_list().toggle_with_force("muted", !on);
            _ = button_el.set_attribute("title", if on { "Mute sounds" } else { "Enable sounds" });
            log::info!("[sound] {}", if on { "enabled" } else { "muted" });
        }));
    }

    for el in dom::query_all(document, SOUND_TARGETS_SELECTOR) {
        let click = state.clone();
        scope.hold(Listener::new(&el, "click", move |_| {
            let s = click.borrow();
            if let Some(fx) = &s.effects {
                fx.bus.resume();
            }
            s.blip(&Blip::CLICK);
        }));
        let hover = state.clone();
        scope.hold(Listener::new(&el, "mouseenter", move |_| {
            hover.borrow().blip(&Blip::HOVER)
        }));
    }

    {
        let state = state.clone();
        scope.hold(Interval::new(BUBBLE_PERIOD_MS, move || {
            let mut s = state.borrow_mut();
            if !sfx::bubble_due(&mut s.rng) {
                return;
            }
            let bubble = Blip::bubble(&mut s.rng);
            s.blip(&bubble);
        })?);
    }

    let mut targets = Targets::default();
    targets.insert(BUTTON, vec![button]);
    scope.hold(frames.subscribe(move |dt| {
        let mut s = state.borrow_mut();
        s.enabled.tick(dt);
        if s.spin.is_playing() {
            s.spin.advance(dt);
            style::apply(&targets, s.spin.samples());
        }
    }));
    Ok(())
}
