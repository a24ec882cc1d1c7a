use crate::core::sfx::{Blip, ENVELOPE_FLOOR};
use crate::core::soundscape::{GraphHost, GraphSpec, Lowpass, Source, Wave};
use crate::core::{SiteError, SiteResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::rc::Rc;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

#[inline]
fn audio_err(what: &str) -> impl FnOnce(wasm_bindgen::JsValue) -> SiteError + '_ {
    move |e| SiteError::Audio(format!("{what}: {e:?}"))
}

fn create_gain(audio_ctx: &web::AudioContext, value: f32, label: &str) -> SiteResult<web::GainNode> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("[audio] {} GainNode error: {:?}", label, e);
            Err(SiteError::Audio(format!("{label} gain: {e:?}")))
        }
    }
}

/// The page's single output stage: one context, one master gain into the
/// speakers. Every sound-producing panel owns a channel gain feeding it.
pub struct OutputBus {
    ctx: web::AudioContext,
    master: web::GainNode,
}

impl OutputBus {
    pub fn new() -> SiteResult<Rc<Self>> {
        let ctx = web::AudioContext::new().map_err(audio_err("AudioContext"))?;
        let master = create_gain(&ctx, 1.0, "Master")?;
        master
            .connect_with_audio_node(&ctx.destination())
            .map_err(audio_err("master -> destination"))?;
        log::info!("[audio] output bus ready ({} Hz)", ctx.sample_rate());
        Ok(Rc::new(Self { ctx, master }))
    }

    pub fn ctx(&self) -> &web::AudioContext {
        &self.ctx
    }

    /// A new sub-gain into the master, for one panel.
    pub fn channel(&self, level: f32, label: &str) -> SiteResult<web::GainNode> {
        let gain = create_gain(&self.ctx, level, label)?;
        gain.connect_with_audio_node(&self.master)
            .map_err(audio_err("channel -> master"))?;
        Ok(gain)
    }

    /// Browsers start contexts suspended until a user gesture; call this
    /// from one. A rejected resume leaves audio inert.
    pub fn resume(&self) {
        if self.ctx.state() != web::AudioContextState::Suspended {
            return;
        }
        match self.ctx.resume() {
            Ok(promise) => spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    log::warn!("[audio] resume rejected: {:?}", e);
                }
            }),
            Err(e) => log::warn!("[audio] resume failed: {:?}", e),
        }
    }
}

impl Drop for OutputBus {
    fn drop(&mut self) {
        _ = self.master.disconnect();
        _ = self.ctx.close();
    }
}

/// Play one self-stopping blip into `out`.
pub fn play_blip(bus: &OutputBus, out: &web::GainNode, blip: &Blip) -> SiteResult<()> {
    let ctx = bus.ctx();
    let osc = web::OscillatorNode::new(ctx).map_err(audio_err("blip oscillator"))?;
    osc.set_type(web::OscillatorType::Sine);
    let env = create_gain(ctx, 0.0, "blip")?;
    let now = ctx.current_time();
    let end = now + blip.secs;

    _ = osc.frequency().set_value_at_time(blip.start_hz, now);
    if let Some(to) = blip.end_hz {
        _ = osc.frequency().exponential_ramp_to_value_at_time(to, end);
    }
    _ = env.gain().set_value_at_time(0.0, now);
    _ = env
        .gain()
        .linear_ramp_to_value_at_time(blip.peak, now + blip.attack_secs);
    _ = env
        .gain()
        .exponential_ramp_to_value_at_time(ENVELOPE_FLOOR, end);

    _ = osc.connect_with_audio_node(&env);
    _ = env.connect_with_audio_node(out);
    osc.start().map_err(audio_err("blip start"))?;
    osc.stop_with_when(end).map_err(audio_err("blip stop"))?;
    Ok(())
}

/// Nodes of one realized soundscape graph.
#[derive(Default)]
pub struct LiveGraph {
    sources: Vec<web::AudioScheduledSourceNode>,
    nodes: Vec<web::AudioNode>,
}

impl LiveGraph {
    fn keep(&mut self, node: &web::AudioNode) {
        self.nodes.push(node.clone());
    }

    fn start(&mut self, source: &web::AudioScheduledSourceNode) -> SiteResult<()> {
        source.start().map_err(audio_err("source start"))?;
        self.sources.push(source.clone());
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Builds soundscape graphs on the shared output bus.
pub struct WebGraphHost {
    bus: Rc<OutputBus>,
    out: web::GainNode,
    rng: StdRng,
}

impl WebGraphHost {
    pub fn new(bus: Rc<OutputBus>) -> SiteResult<Self> {
        let out = bus.channel(0.0, "Soundscape")?;
        Ok(Self {
            bus,
            out,
            rng: StdRng::from_entropy(),
        })
    }

    fn lowpass(&self, graph: &mut LiveGraph, spec: Lowpass) -> SiteResult<web::BiquadFilterNode> {
        let filter =
            web::BiquadFilterNode::new(self.bus.ctx()).map_err(audio_err("lowpass"))?;
        filter.set_type(web::BiquadFilterType::Lowpass);
        filter.frequency().set_value(spec.cutoff_hz);
        filter.q().set_value(spec.q);
        graph.keep(&filter);
        Ok(filter)
    }

    fn add_source(&mut self, graph: &mut LiveGraph, source: &Source) -> SiteResult<()> {
        let ctx = self.bus.ctx().clone();
        match *source {
            Source::Osc {
                wave,
                freq_hz,
                level,
                lfo,
                lowpass,
            } => {
                let osc = web::OscillatorNode::new(&ctx).map_err(audio_err("oscillator"))?;
                osc.set_type(match wave {
                    Wave::Sine => web::OscillatorType::Sine,
                    Wave::Triangle => web::OscillatorType::Triangle,
                });
                osc.frequency().set_value(freq_hz);
                graph.keep(&osc);
                let gain = create_gain(&ctx, level, "voice")?;
                graph.keep(&gain);

                if let Some(lfo) = lfo {
                    let wobble = web::OscillatorNode::new(&ctx).map_err(audio_err("lfo"))?;
                    wobble.set_type(web::OscillatorType::Sine);
                    wobble.frequency().set_value(lfo.rate_hz);
                    graph.keep(&wobble);
                    let depth = create_gain(&ctx, lfo.depth_hz, "lfo depth")?;
                    graph.keep(&depth);
                    _ = wobble.connect_with_audio_node(&depth);
                    _ = depth.connect_with_audio_param(&osc.frequency());
                    graph.start(&wobble)?;
                }

                match lowpass {
                    Some(spec) => {
                        let filter = self.lowpass(graph, spec)?;
                        _ = osc.connect_with_audio_node(&filter);
                        _ = filter.connect_with_audio_node(&gain);
                    }
                    None => {
                        _ = osc.connect_with_audio_node(&gain);
                    }
                }
                _ = gain.connect_with_audio_node(&self.out);
                graph.start(&osc)
            }
            Source::Noise {
                seconds,
                lowpass,
                level,
            } => {
                let rate = ctx.sample_rate();
                let len = (rate * seconds) as u32;
                let buffer = ctx
                    .create_buffer(1, len, rate)
                    .map_err(audio_err("noise buffer"))?;
                let mut samples: Vec<f32> =
                    (0..len).map(|_| self.rng.gen_range(-1.0f32..1.0)).collect();
                _ = buffer.copy_to_channel(&mut samples, 0);

                let noise =
                    web::AudioBufferSourceNode::new(&ctx).map_err(audio_err("noise source"))?;
                noise.set_buffer(Some(&buffer));
                noise.set_loop(true);
                graph.keep(&noise);
                let filter = self.lowpass(graph, lowpass)?;
                let gain = create_gain(&ctx, level, "noise")?;
                graph.keep(&gain);
                _ = noise.connect_with_audio_node(&filter);
                _ = filter.connect_with_audio_node(&gain);
                _ = gain.connect_with_audio_node(&self.out);
                graph.start(&noise)
            }
        }
    }
}

impl GraphHost for WebGraphHost {
    type Handle = LiveGraph;

    fn build(&mut self, spec: &GraphSpec) -> SiteResult<LiveGraph> {
        let mut graph = LiveGraph::default();
        for source in &spec.sources {
            if let Err(e) = self.add_source(&mut graph, source) {
                // Release what was built so a failed build leaves nothing behind.
                self.teardown(graph);
                return Err(e);
            }
        }
        log::info!(
            "[audio] {} graph up ({} nodes)",
            spec.kind.key(),
            graph.node_count()
        );
        Ok(graph)
    }

    fn teardown(&mut self, graph: LiveGraph) {
        for source in &graph.sources {
            _ = source.stop();
        }
        for node in &graph.nodes {
            _ = node.disconnect();
        }
        log::debug!("[audio] graph down ({} nodes)", graph.node_count());
    }

    fn set_volume(&mut self, volume: f32) {
        _ = self
            .out
            .gain()
            .set_value_at_time(volume, self.bus.ctx().current_time());
    }
}

impl Drop for WebGraphHost {
    fn drop(&mut self) {
        _ = self.out.disconnect();
    }
}
