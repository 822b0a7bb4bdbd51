//! Browser helpers

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// A running requestAnimationFrame loop. Dropping it cancels the pending
/// frame, so the callback never runs again.
pub struct AnimationLoop {
    handle: Rc<RefCell<Option<i32>>>,
    // Keeps the closure alive while frames are scheduled
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl AnimationLoop {
    /// Call `on_frame(timestamp_ms)` once per animation frame
    pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> Option<Self> {
        let window = web_sys::window()?;
        let handle = Rc::new(RefCell::new(None));
        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));

        let next_handle = handle.clone();
        let next_callback = callback.clone();
        let next_window = window.clone();
        *callback.borrow_mut() = Some(Closure::new(move |time: f64| {
            on_frame(time);
            if let Some(cb) = next_callback.borrow().as_ref() {
                let id = next_window
                    .request_animation_frame(cb.as_ref().unchecked_ref())
                    .ok();
                *next_handle.borrow_mut() = id;
            }
        }));

        let id = callback
            .borrow()
            .as_ref()
            .and_then(|cb| window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
        *handle.borrow_mut() = id;

        Some(Self {
            handle,
            callback,
        })
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        if let (Some(window), Some(id)) = (web_sys::window(), self.handle.borrow_mut().take()) {
            let _ = window.cancel_animation_frame(id);
        }
        // Break the closure's self-reference
        self.callback.borrow_mut().take();
    }
}

/// Register `handler` for `event` on `target` for the lifetime of the page
pub fn listen<E: FromWasmAbi + 'static>(
    target: &web_sys::EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}
