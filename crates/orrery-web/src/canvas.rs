//! Canvas-backed drawing surface.
//!
//! Owns a `<canvas>` appended to the host container and implements the
//! core [`Surface`] trait over its 2d context. The backing store tracks
//! css size times device pixel ratio; a transform corrects for pixel
//! density and moves the model origin to the canvas center, so the
//! renderer draws in centered model pixels.

use std::f64::consts::TAU;

use glam::DVec2;
use orrery_core::Surface;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Logical (css-pixel) size, kept for clearing in model space.
    width: f64,
    height: f64,
}

impl CanvasSurface {
    /// Create the canvas, style it to fill the container, append it, and
    /// grab the 2d context. A missing context is a construction error.
    pub fn create(container: &HtmlElement) -> Result<Self, JsValue> {
        let document = container
            .owner_document()
            .ok_or_else(|| JsValue::from_str("container is not attached to a document"))?;
        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;

        let style = canvas.style();
        style.set_property("display", "block")?;
        style.set_property("width", "100%")?;
        style.set_property("height", "100%")?;
        container.append_child(&canvas)?;

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d canvas context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self {
            canvas,
            ctx,
            width: 0.0,
            height: 0.0,
        })
    }

    /// Resize the backing store to `css size x dpr` and set the transform
    /// that scales for pixel density and centers the model origin.
    pub fn fit(&mut self, width: f64, height: f64, dpr: f64) {
        self.width = width;
        self.height = height;
        self.canvas.set_width((width * dpr) as u32);
        self.canvas.set_height((height * dpr) as u32);
        let _ = self
            .ctx
            .set_transform(dpr, 0.0, 0.0, dpr, width * dpr / 2.0, height * dpr / 2.0);
    }

    /// Detach the canvas from the container.
    pub fn remove(&self) {
        self.canvas.remove();
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx.clear_rect(
            -self.width / 2.0,
            -self.height / 2.0,
            self.width,
            self.height,
        );
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: &str) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(center.x, center.y, radius, 0.0, TAU);
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, center: DVec2, radius: f64, width: f64, color: &str) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(center.x, center.y, radius, 0.0, TAU);
        self.ctx.set_line_width(width);
        self.ctx.set_stroke_style_str(color);
        self.ctx.stroke();
    }

    fn stroke_ellipse_arc(
        &mut self,
        center: DVec2,
        radii: DVec2,
        start_angle: f64,
        end_angle: f64,
        width: f64,
        color: &str,
    ) {
        self.ctx.begin_path();
        let _ = self.ctx.ellipse(
            center.x,
            center.y,
            radii.x,
            radii.y,
            0.0,
            start_angle,
            end_angle,
        );
        self.ctx.set_line_width(width);
        self.ctx.set_stroke_style_str(color);
        self.ctx.stroke();
    }
}
