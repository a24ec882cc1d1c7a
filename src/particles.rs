use crate::constants::{PARTICLE_CLASS, PARTICLE_FIELD_CLASS};
use crate::core::constants::PARTICLE_COUNT;
use crate::core::particles::ParticleField;
use crate::core::scope::Scope;
use crate::dom::{self, Listener};
use crate::frame::FrameLoop;
use crate::style;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

const FIELD_CSS: &str = "position:fixed;inset:0;pointer-events:none;overflow:hidden;z-index:1;";

struct Field {
    sim: ParticleField,
    nodes: Vec<web::HtmlElement>,
    rng: StdRng,
}

/// Ambient drifting particles that swarm toward the pointer.
pub fn mount(scope: &mut Scope, frames: &FrameLoop, document: &web::Document) -> anyhow::Result<()> {
    let body = dom::body(document)?;
    let container = dom::create(document, "div")?;
    container.set_class_name(PARTICLE_FIELD_CLASS);
    _ = container.set_attribute("style", FIELD_CSS);
    body.append_child(&container)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    {
        let container = container.clone();
        scope.defer(move || container.remove());
    }

    let mut rng = StdRng::from_entropy();
    let sim = ParticleField::spawn(PARTICLE_COUNT, dom::viewport(), &mut rng);
    let mut nodes = Vec::with_capacity(sim.len());
    for p in sim.particles() {
        let node = dom::create(document, "div")?;
        node.set_class_name(PARTICLE_CLASS);
        _ = node.set_attribute(
            "style",
            &format!(
                "position:absolute;left:{}px;top:{}px;width:{s}px;height:{s}px;border-radius:50%;\
                 background:radial-gradient(circle,#e7d393,rgba(231,211,147,0));will-change:transform,opacity;",
                -p.size / 2.0,
                -p.size / 2.0,
                s = p.size
            ),
        );
        container
            .append_child(&node)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        nodes.push(node);
    }
    log::info!("[particles] spawned {}", nodes.len());

    let field = Rc::new(RefCell::new(Field { sim, nodes, rng }));

    if let Some(window) = web::window() {
        let field = field.clone();
        scope.hold(Listener::new(&window, "mousemove", move |ev| {
            let Some(pointer) = dom::client_pos(&ev) else {
                return;
            };
            let mut f = field.borrow_mut();
            let Field { sim, rng, .. } = &mut *f;
            sim.attract(pointer, rng);
        }));
    }

    scope.hold(frames.subscribe(move |dt| {
        let mut f = field.borrow_mut();
        f.sim.tick(dt);
        for (node, pose) in f.nodes.iter().zip(f.sim.poses()) {
            style::place(node, pose.pos.x, pose.pos.y, pose.rotation, pose.scale);
            style::set_opacity(node, pose.opacity);
        }
    }));
    Ok(())
}
