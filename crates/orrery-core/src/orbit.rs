//! Parametric orbital model — pure math, no drawing dependencies.
//!
//! Uses f64 throughout; positions only drop to the surface's coordinate
//! space at draw time. Orbits are circles traversed at constant angular
//! rate: `phase = TAU * time / period`, no eccentricity, no forces.

use std::f64::consts::TAU;

use glam::DVec3;

use crate::catalog::Catalog;

/// Minimum drawn radius for the central body.
pub const CENTRAL_RADIUS_FLOOR: f64 = 2.5;
/// Minimum drawn radius for satellites. Strictly below the central floor
/// so the central body keeps its prominence at any zoom.
pub const BODY_RADIUS_FLOOR: f64 = 1.5;

/// Per-frame state of one body, indexed identically to the catalog.
///
/// `position.z` is synthetic depth: larger means farther from the viewer.
/// A fresh snapshot is computed every frame; nothing carries over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    /// Scaled screen-space position relative to the view center.
    pub position: DVec3,
    /// Floor-clamped disc radius.
    pub screen_radius: f64,
    /// Scaled orbital distance, kept for ring and guide proportions.
    pub orbit_radius: f64,
}

/// Compute every body's state at the given simulated time.
///
/// Pure function of its inputs: identical (catalog, time, tilt, scale)
/// reproduce bit-identical output, so motion can be sampled at any
/// timestamp rather than integrated.
///
/// The in-plane circle is split by the viewing tilt: the cross-axis
/// coordinate contributes `sin(tilt)` to screen y and `cos(tilt)` to
/// depth z. That orthographic tilt is the whole 3D illusion; there is no
/// perspective. Bodies are walked in the catalog's topological order so
/// each parent's position exists before its satellites compose onto it.
pub fn compute_states(catalog: &Catalog, time: f64, tilt: f64, scale: f64) -> Vec<BodyState> {
    let mut states = vec![
        BodyState {
            position: DVec3::ZERO,
            screen_radius: 0.0,
            orbit_radius: 0.0,
        };
        catalog.len()
    ];

    let (sin_tilt, cos_tilt) = tilt.sin_cos();
    for &index in catalog.eval_order() {
        let body = &catalog[index];
        let parent_pos = body
            .parent
            .map_or(DVec3::ZERO, |parent| states[parent].position);

        let phase = TAU * time / body.period;
        let orbit_radius = body.orbit_distance * scale;
        let along = phase.cos();
        let across = phase.sin();
        let offset = DVec3::new(
            orbit_radius * along,
            orbit_radius * across * sin_tilt,
            orbit_radius * across * cos_tilt,
        );

        let floor = if body.parent.is_none() {
            CENTRAL_RADIUS_FLOOR
        } else {
            BODY_RADIUS_FLOOR
        };
        states[index] = BodyState {
            position: parent_pos + offset,
            screen_radius: (body.base_radius * scale).max(floor),
            orbit_radius,
        };
    }
    states
}
