//! Drawing abstraction the renderer targets.
//!
//! The renderer only needs clear, circles, and elliptical arcs, so that is
//! the whole trait. Colors are CSS color strings passed through untouched;
//! the embedding surface consumes them natively.

use glam::DVec2;

/// Minimal drawing surface. Coordinates are model pixels with the origin
/// at the view center; implementors own any device-pixel correction.
pub trait Surface {
    fn clear(&mut self);
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: &str);
    fn stroke_circle(&mut self, center: DVec2, radius: f64, width: f64, color: &str);
    /// Stroke an axis-aligned elliptical arc from `start_angle` to
    /// `end_angle` (radians, counterclockwise, 0 along +x).
    fn stroke_ellipse_arc(
        &mut self,
        center: DVec2,
        radii: DVec2,
        start_angle: f64,
        end_angle: f64,
        width: f64,
        color: &str,
    );
}

/// One recorded drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear,
    FillCircle {
        center: DVec2,
        radius: f64,
        color: String,
    },
    StrokeCircle {
        center: DVec2,
        radius: f64,
        width: f64,
        color: String,
    },
    StrokeEllipseArc {
        center: DVec2,
        radii: DVec2,
        start_angle: f64,
        end_angle: f64,
        width: f64,
        color: String,
    },
}

/// A [`Surface`] that records primitives instead of rasterizing them.
///
/// Used by the renderer tests to assert on draw order, and usable as a
/// replay sink by headless embedders.
#[derive(Debug, Default)]
pub struct DisplayList {
    commands: Vec<DrawCmd>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands in draw order.
    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Take the recorded commands, leaving the list empty.
    pub fn drain(&mut self) -> Vec<DrawCmd> {
        std::mem::take(&mut self.commands)
    }
}

impl Surface for DisplayList {
    fn clear(&mut self) {
        self.commands.push(DrawCmd::Clear);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: &str) {
        self.commands.push(DrawCmd::FillCircle {
            center,
            radius,
            color: color.to_string(),
        });
    }

    fn stroke_circle(&mut self, center: DVec2, radius: f64, width: f64, color: &str) {
        self.commands.push(DrawCmd::StrokeCircle {
            center,
            radius,
            width,
            color: color.to_string(),
        });
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
        self.commands.push(DrawCmd::StrokeEllipseArc {
            center,
            radii,
            start_angle,
            end_angle,
            width,
            color: color.to_string(),
        });
    }
}
