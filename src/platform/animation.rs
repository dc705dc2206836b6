//! Cancelable `requestAnimationFrame` loop (WASM only)

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Calls `on_frame` once per display refresh until stopped or dropped
pub struct AnimationLoop {
    running: Rc<Cell<bool>>,
    handle: Rc<Cell<Option<i32>>>,
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl AnimationLoop {
    pub fn start<F>(mut on_frame: F) -> Result<Self, JsValue>
    where
        F: FnMut(f64) + 'static,
    {
        let running = Rc::new(Cell::new(true));
        let handle = Rc::new(Cell::new(None));
        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));

        let closure = {
            let running = running.clone();
            let handle = handle.clone();
            let callback = callback.clone();
            Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                handle.set(None);
                if !running.get() {
                    return;
                }
                on_frame(time);
                // on_frame may have stopped the loop
                if !running.get() {
                    return;
                }
                if let Some(cb) = callback.borrow().as_ref() {
                    match schedule(cb) {
                        Ok(id) => handle.set(Some(id)),
                        Err(e) => {
                            log::error!("requestAnimationFrame failed: {:?}", e);
                            running.set(false);
                        }
                    }
                }
            })
        };

        let id = schedule(&closure)?;
        handle.set(Some(id));
        *callback.borrow_mut() = Some(closure);

        Ok(Self {
            running,
            handle,
            callback,
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Cancel the pending frame; no further callbacks run
    pub fn stop(&self) {
        if !self.running.replace(false) {
            return;
        }
        if let Some(id) = self.handle.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        log::info!("Animation loop stopped");
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.stop();
        // Break the closure -> Rc -> closure cycle
        self.callback.borrow_mut().take();
    }
}

fn schedule(callback: &FrameCallback) -> Result<i32, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    window.request_animation_frame(callback.as_ref().unchecked_ref())
}
