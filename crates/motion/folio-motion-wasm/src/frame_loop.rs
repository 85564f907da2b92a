//! requestAnimationFrame loop with explicit start/stop.
//!
//! The step callback returns whether another frame is wanted. When it says
//! no, the loop parks until `ensure_running` is called again. After `stop`
//! nothing schedules a frame until `start`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

pub struct FrameLoop {
    callback: FrameCallback,
    handle: Rc<Cell<Option<i32>>>,
    stopped: Rc<Cell<bool>>,
}

fn request_frame(callback: &Closure<dyn FnMut(f64)>) -> Result<i32, JsValue> {
    web_sys::window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .request_animation_frame(callback.as_ref().unchecked_ref())
}

impl FrameLoop {
    pub fn new<F>(mut step: F) -> Self
    where
        F: FnMut(f64) -> bool + 'static,
    {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let stopped = Rc::new(Cell::new(false));

        // The closure holds a handle to itself so it can reschedule; it lives
        // as long as the page.
        let cb = callback.clone();
        let h = handle.clone();
        let halted = stopped.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
            h.set(None);
            if halted.get() || !step(now) {
                return;
            }
            if let Some(f) = cb.borrow().as_ref() {
                match request_frame(f) {
                    Ok(id) => h.set(Some(id)),
                    Err(e) => warn!("requestAnimationFrame failed: {e:?}"),
                }
            }
        }) as Box<dyn FnMut(f64)>));

        Self {
            callback,
            handle,
            stopped,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.handle.get().is_some()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }

    /// Schedule the next frame unless one is already pending or the loop is
    /// stopped.
    pub fn ensure_running(&self) -> Result<(), JsValue> {
        if self.stopped.get() || self.is_scheduled() {
            return Ok(());
        }
        if let Some(f) = self.callback.borrow().as_ref() {
            self.handle.set(Some(request_frame(f)?));
        }
        Ok(())
    }

    /// Clear a previous `stop` and schedule a frame.
    pub fn start(&self) -> Result<(), JsValue> {
        self.stopped.set(false);
        self.ensure_running()
    }

    pub fn stop(&self) {
        self.stopped.set(true);
        if let Some(id) = self.handle.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
    }
}
