//! Browser bridge: mounts the orrery into a host container and returns a
//! teardown handle.
//!
//! ```js
//! import init, { mount } from "orrery-web";
//! await init();
//! const handle = mount(document.getElementById("orrery"), {
//!     fill: "#e8e4d8",
//!     orbit: "rgba(255, 255, 255, 0.12)",
//! });
//! // later:
//! handle.dispose();
//! ```

pub mod canvas;
pub mod runner;

pub use canvas::CanvasSurface;
pub use runner::Runner;

use orrery_core::{Catalog, Orrery, OrreryConfig};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

/// Teardown handle returned by [`mount`].
#[wasm_bindgen]
pub struct OrreryHandle {
    runner: Option<Runner>,
}

#[wasm_bindgen]
impl OrreryHandle {
    /// Stop the animation loop, detach the resize listener, and remove
    /// the canvas from the container. Safe to call more than once.
    pub fn dispose(&mut self) {
        if let Some(mut runner) = self.runner.take() {
            runner.shutdown();
        }
    }
}

/// Mount the visualization into `container`.
///
/// `options` is a plain JS object matching [`OrreryConfig`]; unknown keys
/// are ignored, missing keys take defaults, and `undefined`/`null` means
/// all defaults. Configuration errors (bad options JSON, invalid body
/// catalog, missing 2d context) reject construction here rather than
/// misrendering later.
#[wasm_bindgen]
pub fn mount(container: &HtmlElement, options: JsValue) -> Result<OrreryHandle, JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let mut config = parse_options(&options)?;
    let catalog = match config.system.take() {
        Some(manifest) => {
            Catalog::from_manifest(manifest).map_err(|e| JsValue::from_str(&e.to_string()))?
        }
        None => Catalog::solar_system(),
    };

    let runner = Runner::start(container, Orrery::new(catalog, config))?;
    log::info!("orrery: mounted");
    Ok(OrreryHandle {
        runner: Some(runner),
    })
}

/// Round-trip the options object through JSON into the serde config.
fn parse_options(options: &JsValue) -> Result<OrreryConfig, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(OrreryConfig::default());
    }
    let json: String = js_sys::JSON::stringify(options)?.into();
    OrreryConfig::from_json(&json).map_err(|e| JsValue::from_str(&format!("invalid options: {e}")))
}
