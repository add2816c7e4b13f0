//! Schematic solar-system visualization: a parametric orbital model plus
//! a depth-sorted 2D renderer, headless and fully testable on native
//! targets. The browser bridge lives in `orrery-web`.

pub mod catalog;
pub mod config;
pub mod frame;
pub mod orbit;
pub mod render;
pub mod sim;
pub mod surface;

// Re-export key types at crate root for convenience
pub use catalog::{Catalog, CatalogError, CelestialBody, RingSpan, SystemManifest};
pub use config::OrreryConfig;
pub use frame::Orrery;
pub use orbit::{compute_states, BodyState, BODY_RADIUS_FLOOR, CENTRAL_RADIUS_FLOOR};
pub use render::{depth_order, draw_system, ring_hidden_half_angle};
pub use sim::{fit_scale, SimState};
pub use surface::{DisplayList, DrawCmd, Surface};
