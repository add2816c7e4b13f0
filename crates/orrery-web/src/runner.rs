//! Frame loop and listener wiring.
//!
//! The animation is a recursive `requestAnimationFrame` chain owned by a
//! [`Runner`]. An alive flag is checked before any work and again before
//! re-scheduling, so a teardown that lands between frames never leaves a
//! callback running against a removed canvas.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use orrery_core::Orrery;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::canvas::CanvasSurface;

type FrameClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn window() -> web_sys::Window {
    web_sys::window().expect("no window in this environment")
}

fn request_frame(closure: &Closure<dyn FnMut()>) -> i32 {
    window()
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .expect("requestAnimationFrame unavailable")
}

/// Owns the animation loop, the resize listener, and the canvas.
pub struct Runner {
    alive: Rc<Cell<bool>>,
    pending_frame: Rc<Cell<i32>>,
    frame_closure: FrameClosure,
    resize_closure: Option<Closure<dyn FnMut()>>,
    surface: Rc<RefCell<CanvasSurface>>,
}

impl Runner {
    /// Create the canvas inside the container, size everything to the
    /// container's current extent, and start the frame loop.
    pub fn start(container: &HtmlElement, orrery: Orrery) -> Result<Self, JsValue> {
        let mut surface = CanvasSurface::create(container)?;
        let orrery = Rc::new(RefCell::new(orrery));

        let width = container.client_width() as f64;
        let height = container.client_height() as f64;
        surface.fit(width, height, window().device_pixel_ratio());
        orrery.borrow_mut().resize(width, height);
        let surface = Rc::new(RefCell::new(surface));

        let alive = Rc::new(Cell::new(true));
        let pending_frame = Rc::new(Cell::new(0));
        let frame_closure: FrameClosure = Rc::new(RefCell::new(None));
        {
            let alive = alive.clone();
            let pending = pending_frame.clone();
            let orrery = orrery.clone();
            let surface = surface.clone();
            let reschedule = frame_closure.clone();
            *frame_closure.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                if !alive.get() {
                    return;
                }
                orrery.borrow_mut().render_frame(&mut *surface.borrow_mut());
                // Checked again: the frame body may have triggered teardown.
                if alive.get() {
                    if let Some(closure) = reschedule.borrow().as_ref() {
                        pending.set(request_frame(closure));
                    }
                }
            }) as Box<dyn FnMut()>));
        }
        if let Some(closure) = frame_closure.borrow().as_ref() {
            pending_frame.set(request_frame(closure));
        }

        let resize_closure = {
            let alive = alive.clone();
            let container = container.clone();
            let orrery = orrery.clone();
            let surface = surface.clone();
            Closure::wrap(Box::new(move || {
                if !alive.get() {
                    return;
                }
                let width = container.client_width() as f64;
                let height = container.client_height() as f64;
                surface
                    .borrow_mut()
                    .fit(width, height, window().device_pixel_ratio());
                orrery.borrow_mut().resize(width, height);
            }) as Box<dyn FnMut()>)
        };
        window()
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;

        Ok(Self {
            alive,
            pending_frame,
            frame_closure,
            resize_closure: Some(resize_closure),
            surface,
        })
    }

    /// Stop the loop, detach the resize listener, remove the canvas.
    /// Idempotent; later calls are no-ops.
    pub fn shutdown(&mut self) {
        if !self.alive.replace(false) {
            return;
        }
        let _ = window().cancel_animation_frame(self.pending_frame.get());
        if let Some(closure) = self.resize_closure.take() {
            let _ = window()
                .remove_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        }
        // Break the closure's self-reference so it can drop.
        self.frame_closure.borrow_mut().take();
        self.surface.borrow().remove();
        log::info!("orrery: unmounted");
    }
}

impl Drop for Runner {
    fn drop(&mut self) {
        self.shutdown();
    }
}
