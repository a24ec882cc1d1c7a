use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// Longest step handed to subscribers; a backgrounded tab resumes with one
// short frame instead of jumping every animation to its end.
const MAX_FRAME_SECS: f64 = 0.1;

struct Subscriber {
    alive: Cell<bool>,
    tick: RefCell<Box<dyn FnMut(f64)>>,
}

struct Inner {
    subscribers: Vec<Rc<Subscriber>>,
    raf_id: Option<i32>,
    last_instant: Instant,
    tick: Option<Closure<dyn FnMut()>>,
}

/// One requestAnimationFrame loop shared by every animated feature.
///
/// The loop only requests frames while something is subscribed.
#[derive(Clone)]
pub struct FrameLoop {
    inner: Rc<RefCell<Inner>>,
}

/// Keeps a frame callback registered; unsubscribes when dropped.
pub struct FrameSubscription {
    subscriber: Rc<Subscriber>,
    frames: Weak<RefCell<Inner>>,
}

impl FrameLoop {
    pub fn new() -> Self {
        let inner = Rc::new(RefCell::new(Inner {
            subscribers: Vec::new(),
            raf_id: None,
            last_instant: Instant::now(),
            tick: None,
        }));
        let weak = Rc::downgrade(&inner);
        let tick = Closure::wrap(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                frame(&inner);
            }
        }) as Box<dyn FnMut()>);
        inner.borrow_mut().tick = Some(tick);
        Self { inner }
    }

    /// Run `tick(dt_seconds)` every frame until the subscription is dropped.
    pub fn subscribe(&self, tick: impl FnMut(f64) + 'static) -> FrameSubscription {
        let subscriber = Rc::new(Subscriber {
            alive: Cell::new(true),
            tick: RefCell::new(Box::new(tick)),
        });
        {
            let mut state = self.inner.borrow_mut();
            if state.subscribers.is_empty() && state.raf_id.is_none() {
                // Resuming from idle: the first frame must not see the gap.
                state.last_instant = Instant::now();
            }
            state.subscribers.push(subscriber.clone());
        }
        request(&self.inner);
        FrameSubscription {
            subscriber,
            frames: Rc::downgrade(&self.inner),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

impl Drop for FrameSubscription {
    fn drop(&mut self) {
        self.subscriber.alive.set(false);
        if let Some(inner) = self.frames.upgrade() {
            if let Ok(mut inner) = inner.try_borrow_mut() {
                inner.subscribers.retain(|s| s.alive.get());
            }
        }
    }
}

fn request(inner: &Rc<RefCell<Inner>>) {
    let callback = {
        let state = inner.borrow();
        if state.raf_id.is_some() || state.subscribers.is_empty() {
            return;
        }
        match &state.tick {
            Some(tick) => tick.as_ref().unchecked_ref::<js_sys::Function>().clone(),
            None => return,
        }
    };
    let Some(w) = web::window() else {
        return;
    };
    match w.request_animation_frame(&callback) {
        Ok(id) => inner.borrow_mut().raf_id = Some(id),
        Err(e) => log::error!("[frame] requestAnimationFrame failed: {:?}", e),
    }
}

fn frame(inner: &Rc<RefCell<Inner>>) {
    let (dt, snapshot) = {
        let mut state = inner.borrow_mut();
        state.raf_id = None;
        let now = Instant::now();
        let dt = (now - state.last_instant).as_secs_f64().min(MAX_FRAME_SECS);
        state.last_instant = now;
        state.subscribers.retain(|s| s.alive.get());
        (dt, state.subscribers.clone())
    };
    // No borrow is held here, so callbacks may subscribe or unsubscribe.
    for subscriber in &snapshot {
        if !subscriber.alive.get() {
            continue;
        }
        if let Ok(mut tick) = subscriber.tick.try_borrow_mut() {
            tick(dt);
        }
    }
    drop(snapshot);
    inner.borrow_mut().subscribers.retain(|s| s.alive.get());
    request(inner);
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
    }
}
