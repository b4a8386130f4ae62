use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use crate::dom;
use crate::error::Result;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A `requestAnimationFrame` loop that can be stopped.
pub struct RenderLoop {
    running: Rc<Cell<bool>>,
    pending: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl RenderLoop {
    /// Calls `on_frame` with the frame timestamp (ms) before every repaint until stopped.
    pub fn start<F>(mut on_frame: F) -> Result<Self>
    where
        F: FnMut(f64) + 'static,
    {
        let window = dom::window()?;
        let running = Rc::new(Cell::new(true));
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        let r = running.clone();
        let p = pending.clone();
        let f = callback.clone();
        let w = window.clone();
        let closure = Closure::wrap(Box::new(move |timestamp: f64| {
            p.set(None);
            if !r.get() {
                return;
            }
            on_frame(timestamp);

            // on_frame may have stopped us
            if !r.get() {
                return;
            }
            if let Some(next) = f.borrow().as_ref() {
                match w.request_animation_frame(next.as_ref().unchecked_ref()) {
                    Ok(id) => p.set(Some(id)),
                    Err(e) => {
                        web_sys::console::error_1(&e);
                        r.set(false);
                    }
                }
            }
        }) as Box<dyn FnMut(f64)>);

        let id = window.request_animation_frame(closure.as_ref().unchecked_ref())?;
        pending.set(Some(id));
        *callback.borrow_mut() = Some(closure);

        Ok(Self { running, pending, callback })
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Cancels the pending frame and releases the callback.
    pub fn stop(&self) {
        if !self.is_running() {
            return;
        }
        self.running.set(false);
        if let Some(id) = self.pending.take() {
            if let Ok(window) = dom::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        self.callback.borrow_mut().take();
    }
}
