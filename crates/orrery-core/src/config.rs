use serde::Deserialize;

use crate::catalog::SystemManifest;

/// Default viewing angle in radians.
pub const DEFAULT_TILT: f64 = 0.4;
/// Default simulated time units added to the clock per frame.
pub const DEFAULT_SPEED: f64 = 0.5;

/// Visual and simulation options.
///
/// Every field has a default; embedders pass only the keys they want to
/// override and unknown keys are ignored. Colors are CSS color strings
/// handed to the drawing surface untouched.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OrreryConfig {
    /// Disc fill color.
    pub fill: String,
    /// Disc outline color.
    pub stroke: String,
    /// Ring stroke color.
    pub ring: String,
    /// Orbit-guide color; `None` disables the guide underlay.
    pub orbit: Option<String>,
    /// Viewing angle in radians: 0 is edge-on (flat rings), PI/2 face-on.
    /// Constant for the lifetime of the instance.
    pub tilt: f64,
    /// Simulated time units the clock advances each frame.
    pub speed: f64,
    /// Custom body catalog; `None` uses the built-in solar system.
    pub system: Option<SystemManifest>,
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            fill: "#d9d9d9".to_string(),
            stroke: "#2b2b2b".to_string(),
            ring: "rgba(205, 205, 210, 0.6)".to_string(),
            orbit: None,
            tilt: DEFAULT_TILT,
            speed: DEFAULT_SPEED,
            system: None,
        }
    }
}

impl OrreryConfig {
    /// Parse options from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
