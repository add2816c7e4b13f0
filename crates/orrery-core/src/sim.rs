/// Per-instance simulation state: the simulated clock and the viewport
/// scale factor.
///
/// Created once at mount. Exactly two operations mutate it: the frame pass
/// advances the clock, the resize path replaces the scale. The render pass
/// only reads.
#[derive(Debug, Clone)]
pub struct SimState {
    time: f64,
    scale: f64,
}

impl SimState {
    pub fn new() -> Self {
        Self {
            time: 0.0,
            scale: 1.0,
        }
    }

    /// Advance the simulated clock by one step. The clock is monotonic;
    /// non-positive steps leave it in place.
    pub fn advance_clock(&mut self, step: f64) {
        self.time += step.max(0.0);
    }

    /// Replace the scale factor after a viewport fit.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Default for SimState {
    fn default() -> Self {
        Self::new()
    }
}

/// Scale factor that fits the outermost orbit inside a viewport: half the
/// smaller dimension divided by the catalog's maximum orbital extent.
/// Degenerate extents (single-body catalogs) keep unit scale.
pub fn fit_scale(width: f64, height: f64, max_extent: f64) -> f64 {
    if max_extent <= 0.0 {
        return 1.0;
    }
    width.min(height) / (2.0 * max_extent)
}
