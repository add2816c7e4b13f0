//! The per-frame pipeline: one `Orrery` owns the catalog, the config,
//! and the simulation state, and runs the fixed-order frame pass.

use crate::catalog::Catalog;
use crate::config::OrreryConfig;
use crate::orbit::compute_states;
use crate::render::draw_system;
use crate::sim::{fit_scale, SimState};
use crate::surface::Surface;

/// A mounted solar-system visualization, minus the host surface.
///
/// The embedder drives it with `resize` on viewport changes and
/// `render_frame` once per display frame; everything else is internal.
pub struct Orrery {
    catalog: Catalog,
    config: OrreryConfig,
    sim: SimState,
}

impl Orrery {
    pub fn new(catalog: Catalog, config: OrreryConfig) -> Self {
        log::info!(
            "orrery: {} bodies, extent {:.1}, tilt {:.2}",
            catalog.len(),
            catalog.max_extent(),
            config.tilt
        );
        Self {
            catalog,
            config,
            sim: SimState::new(),
        }
    }

    /// The built-in solar system with the given options.
    pub fn with_default_system(config: OrreryConfig) -> Self {
        Self::new(Catalog::solar_system(), config)
    }

    /// Refit the scale factor so the outermost orbit fills the viewport.
    pub fn resize(&mut self, width: f64, height: f64) {
        let scale = fit_scale(width, height, self.catalog.max_extent());
        log::debug!("orrery: refit {width}x{height} -> scale {scale:.4}");
        self.sim.set_scale(scale);
    }

    /// One frame: snapshot the body states, clear, draw, advance the
    /// clock. Drawing happens before the clock moves, so the first frame
    /// renders time zero.
    pub fn render_frame(&mut self, surface: &mut dyn Surface) {
        let states = compute_states(
            &self.catalog,
            self.sim.time(),
            self.config.tilt,
            self.sim.scale(),
        );
        surface.clear();
        draw_system(&self.catalog, &states, &self.config, surface);
        self.sim.advance_clock(self.config.speed);
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &OrreryConfig {
        &self.config
    }

    pub fn time(&self) -> f64 {
        self.sim.time()
    }

    pub fn scale(&self) -> f64 {
        self.sim.scale()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CelestialBody;
    use crate::surface::{DisplayList, DrawCmd};

    fn small_orrery() -> Orrery {
        let catalog = Catalog::new(vec![
            CelestialBody::new("star", 10.0),
            CelestialBody::new("planet", 3.0).orbiting(0, 100.0, 200.0),
        ])
        .unwrap();
        Orrery::new(catalog, OrreryConfig::default())
    }

    #[test]
    fn frame_starts_with_a_clear() {
        let mut orrery = small_orrery();
        let mut list = DisplayList::new();
        orrery.render_frame(&mut list);
        assert_eq!(list.commands()[0], DrawCmd::Clear);
        assert!(list.len() > 1);
    }

    #[test]
    fn clock_advances_after_drawing() {
        let mut orrery = small_orrery();
        assert_eq!(orrery.time(), 0.0);
        let mut list = DisplayList::new();
        orrery.render_frame(&mut list);
        orrery.render_frame(&mut list);
        let step = orrery.config().speed;
        assert!((orrery.time() - 2.0 * step).abs() < 1e-12);
    }

    #[test]
    fn first_frame_renders_time_zero() {
        // At t = 0 the planet sits at max x offset from the star.
        let mut orrery = small_orrery();
        orrery.resize(400.0, 400.0);
        let mut list = DisplayList::new();
        orrery.render_frame(&mut list);

        let centers: Vec<_> = list
            .commands()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::FillCircle { center, .. } => Some(*center),
                _ => None,
            })
            .collect();
        assert_eq!(centers.len(), 2);
        let planet = centers.iter().find(|c| c.x.abs() > 1e-9).unwrap();
        // scale = 400 / (2 * 100) = 2; orbit lands at x = 200.
        assert!((planet.x - 200.0).abs() < 1e-9);
        assert!(planet.y.abs() < 1e-9);
    }

    #[test]
    fn resize_doubling_doubles_drawn_radii() {
        let mut orrery = small_orrery();
        orrery.resize(1000.0, 1000.0);
        let mut list = DisplayList::new();
        orrery.render_frame(&mut list);
        let base: Vec<f64> = list
            .drain()
            .into_iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::FillCircle { radius, .. } => Some(radius),
                _ => None,
            })
            .collect();

        let mut doubled_orrery = small_orrery();
        doubled_orrery.resize(2000.0, 2000.0);
        doubled_orrery.render_frame(&mut list);
        let doubled: Vec<f64> = list
            .drain()
            .into_iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::FillCircle { radius, .. } => Some(radius),
                _ => None,
            })
            .collect();

        assert_eq!(base.len(), doubled.len());
        for (a, b) in base.iter().zip(&doubled) {
            assert!((b - 2.0 * a).abs() < 1e-9, "radius {a} did not double");
        }
    }

    #[test]
    fn resize_does_not_touch_the_clock() {
        let mut orrery = small_orrery();
        let mut list = DisplayList::new();
        orrery.render_frame(&mut list);
        let before = orrery.time();
        orrery.resize(800.0, 600.0);
        assert_eq!(orrery.time(), before);
    }
}
