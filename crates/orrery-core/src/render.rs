//! Depth-sorted rendering pass: discs back-to-front, ring arcs with
//! self-occlusion, optional orbit-guide underlay.

use std::cmp::Ordering;
use std::f64::consts::{FRAC_PI_2, TAU};

use glam::DVec2;

use crate::catalog::{Catalog, RingSpan};
use crate::config::OrreryConfig;
use crate::orbit::{BodyState, BODY_RADIUS_FLOOR};
use crate::surface::Surface;

/// Outline width for body discs.
const DISC_STROKE_WIDTH: f64 = 1.0;
/// Hairline width for orbit guides.
const GUIDE_WIDTH: f64 = 0.5;

/// Body indices ordered farthest-first by synthetic depth.
///
/// The sort is stable, so depth ties keep catalog order and the draw
/// order is identical whenever the states are.
pub fn depth_order(states: &[BodyState]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..states.len()).collect();
    order.sort_by(|&a, &b| {
        states[b]
            .position
            .z
            .partial_cmp(&states[a].position.z)
            .unwrap_or(Ordering::Equal)
    });
    order
}

/// Angular half-width of the ring span hidden behind the planet disc.
///
/// Measured at the ring's inner radius, where the path first dips behind
/// the disc. When the near point of the inner edge clears the disc the
/// result is zero (the whole ellipse is drawn); it grows as the view
/// approaches edge-on and caps at a quarter turn when the disc covers the
/// inner edge outright. Always within `[0, PI]`, so the remaining arc
/// span is never negative and never wraps.
pub fn ring_hidden_half_angle(disc_radius: f64, inner_radius: f64, tilt: f64) -> f64 {
    if inner_radius <= 0.0 {
        return FRAC_PI_2;
    }
    let ratio = (disc_radius / inner_radius).clamp(0.0, 1.0);
    let clearance = (1.0 - ratio * ratio).sqrt() / tilt.cos().abs().max(f64::EPSILON);
    clearance.clamp(0.0, 1.0).acos()
}

/// Draw the whole system onto the surface in one pass.
///
/// Orbit guides (when configured) underlay everything; bodies then paint
/// back-to-front so nearer discs cover farther ones. Each body's ring is
/// drawn right after its disc, with the near portion of the arc omitted
/// so the ring reads as passing behind the planet.
pub fn draw_system(
    catalog: &Catalog,
    states: &[BodyState],
    config: &OrreryConfig,
    surface: &mut dyn Surface,
) {
    if let Some(color) = &config.orbit {
        draw_orbit_guides(catalog, states, config.tilt, color, surface);
    }

    for index in depth_order(states) {
        let body = &catalog[index];
        let state = &states[index];
        let center = DVec2::new(state.position.x, state.position.y);

        // Sub-floor satellites stay hidden; the central body always shows.
        if state.screen_radius > BODY_RADIUS_FLOOR || body.parent.is_none() {
            surface.fill_circle(center, state.screen_radius, &config.fill);
            surface.stroke_circle(center, state.screen_radius, DISC_STROKE_WIDTH, &config.stroke);
        }

        if let Some(ring) = &body.ring {
            draw_ring(center, state, body.base_radius, ring, config, surface);
        }
    }
}

fn draw_ring(
    center: DVec2,
    state: &BodyState,
    base_radius: f64,
    ring: &RingSpan,
    config: &OrreryConfig,
    surface: &mut dyn Surface,
) {
    // The ring inherits whatever clamping the disc received, so a
    // floor-clamped tiny planet still gets a proportionate ring.
    let ring_scale = state.screen_radius / base_radius;
    let ring_radius = ring_scale * ring.mean();
    if !ring_radius.is_finite() || ring_radius <= 0.0 {
        return;
    }

    let tilt = config.tilt;
    let flatten = tilt.sin().abs();
    let radii = DVec2::new(ring_radius, ring_radius * flatten);
    // More of the ring's width shows face-on, so the stroke thickens.
    let width = (flatten * ring_radius + 1.0).max(1.0);

    // Omit the near span that passes behind the disc. The far point of
    // the ellipse sits at +y (angle PI/2), the near point at -PI/2; the
    // drawn arc is a full turn minus the hidden span on each side of it.
    let hidden = ring_hidden_half_angle(state.screen_radius, ring_scale * ring.inner, tilt);
    let start = -FRAC_PI_2 + hidden;
    let end = start + (TAU - 2.0 * hidden);
    surface.stroke_ellipse_arc(center, radii, start, end, width, &config.ring);
}

fn draw_orbit_guides(
    catalog: &Catalog,
    states: &[BodyState],
    tilt: f64,
    color: &str,
    surface: &mut dyn Surface,
) {
    let flatten = tilt.sin().abs();
    for (index, body) in catalog.bodies().iter().enumerate() {
        let Some(parent) = body.parent else { continue };
        let orbit_radius = states[index].orbit_radius;
        if orbit_radius <= 0.0 {
            continue;
        }
        let parent_pos = states[parent].position;
        surface.stroke_ellipse_arc(
            DVec2::new(parent_pos.x, parent_pos.y),
            DVec2::new(orbit_radius, orbit_radius * flatten),
            0.0,
            TAU,
            GUIDE_WIDTH,
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, CelestialBody};
    use crate::orbit::compute_states;
    use crate::surface::{DisplayList, DrawCmd};

    fn ringed_catalog() -> Catalog {
        Catalog::new(vec![
            CelestialBody::new("star", 12.0),
            CelestialBody::new("inner", 3.0).orbiting(0, 40.0, 80.0),
            CelestialBody::new("ringed", 6.0)
                .orbiting(0, 90.0, 300.0)
                .with_ring(8.0, 12.0),
        ])
        .unwrap()
    }

    #[test]
    fn depth_order_is_farthest_first() {
        let catalog = ringed_catalog();
        let states = compute_states(&catalog, 17.0, 0.4, 1.0);
        let order = depth_order(&states);
        for pair in order.windows(2) {
            assert!(
                states[pair[0]].position.z >= states[pair[1]].position.z,
                "order {order:?} not descending in z"
            );
        }
    }

    #[test]
    fn depth_order_is_stable_across_recomputation() {
        let catalog = ringed_catalog();
        let states = compute_states(&catalog, 42.0, 0.4, 1.0);
        assert_eq!(depth_order(&states), depth_order(&states));
    }

    #[test]
    fn depth_ties_keep_catalog_order() {
        let flat = vec![
            BodyState {
                position: glam::DVec3::new(5.0, 0.0, 1.0),
                screen_radius: 2.0,
                orbit_radius: 5.0,
            };
            3
        ];
        assert_eq!(depth_order(&flat), vec![0, 1, 2]);
    }

    #[test]
    fn hidden_half_angle_stays_in_bounds() {
        for tilt in [0.0, 0.2, 0.4, 1.0, std::f64::consts::FRAC_PI_2] {
            for (disc, inner) in [(1.0, 10.0), (5.0, 8.0), (7.9, 8.0), (12.0, 8.0)] {
                let hidden = ring_hidden_half_angle(disc, inner, tilt);
                assert!(
                    (0.0..=std::f64::consts::PI).contains(&hidden),
                    "hidden {hidden} for disc {disc} inner {inner} tilt {tilt}"
                );
            }
        }
    }

    #[test]
    fn hidden_angle_grows_toward_edge_on() {
        let face_on = ring_hidden_half_angle(6.0, 8.0, std::f64::consts::FRAC_PI_2);
        let mid = ring_hidden_half_angle(6.0, 8.0, 0.7);
        let edge_on = ring_hidden_half_angle(6.0, 8.0, 0.0);
        assert!(face_on.abs() < 1e-12, "face-on hides {face_on}");
        assert!(mid > face_on);
        assert!(edge_on > mid);
    }

    #[test]
    fn wide_clearance_hides_nothing() {
        // Disc far smaller than the ring at a steep tilt: nothing hidden.
        let hidden = ring_hidden_half_angle(1.0, 100.0, 1.2);
        assert!(hidden.abs() < 1e-12);
    }

    #[test]
    fn ring_arc_span_is_valid() {
        let catalog = ringed_catalog();
        for tilt in [0.0, 0.4, 1.0] {
            let states = compute_states(&catalog, 9.0, tilt, 1.0);
            let config = OrreryConfig {
                tilt,
                ..OrreryConfig::default()
            };
            let mut list = DisplayList::new();
            draw_system(&catalog, &states, &config, &mut list);

            let arcs: Vec<_> = list
                .commands()
                .iter()
                .filter_map(|cmd| match cmd {
                    DrawCmd::StrokeEllipseArc {
                        start_angle,
                        end_angle,
                        ..
                    } => Some(end_angle - start_angle),
                    _ => None,
                })
                .collect();
            assert_eq!(arcs.len(), 1, "tilt {tilt}");
            assert!(arcs[0] >= 0.0 && arcs[0] <= TAU + 1e-12, "span {}", arcs[0]);
        }
    }

    #[test]
    fn ring_flattens_to_a_line_at_zero_tilt() {
        let catalog = ringed_catalog();
        let states = compute_states(&catalog, 0.0, 0.0, 1.0);
        let config = OrreryConfig {
            tilt: 0.0,
            ..OrreryConfig::default()
        };
        let mut list = DisplayList::new();
        draw_system(&catalog, &states, &config, &mut list);

        let ring = list
            .commands()
            .iter()
            .find_map(|cmd| match cmd {
                DrawCmd::StrokeEllipseArc { radii, .. } => Some(*radii),
                _ => None,
            })
            .unwrap();
        assert!(ring.y.abs() < 1e-12, "vertical semi-axis {}", ring.y);
        assert!(ring.x > 0.0);
    }

    #[test]
    fn ring_draws_after_its_disc() {
        let catalog = ringed_catalog();
        let states = compute_states(&catalog, 0.0, 0.4, 1.0);
        let config = OrreryConfig::default();
        let mut list = DisplayList::new();
        draw_system(&catalog, &states, &config, &mut list);

        let disc_fill = list
            .commands()
            .iter()
            .position(|cmd| {
                matches!(cmd, DrawCmd::FillCircle { radius, .. } if (*radius - 6.0).abs() < 1e-9)
            })
            .unwrap();
        let arc = list
            .commands()
            .iter()
            .position(|cmd| matches!(cmd, DrawCmd::StrokeEllipseArc { .. }))
            .unwrap();
        assert!(arc > disc_fill, "ring arc must land on top of its disc");
    }

    #[test]
    fn ring_proportions_follow_the_clamped_disc() {
        // Scale tiny enough that the disc clamps to the floor: the ring
        // must shrink with the clamped radius, not the raw scale.
        let catalog = ringed_catalog();
        let states = compute_states(&catalog, 0.0, 0.4, 1e-6);
        let config = OrreryConfig::default();
        let mut list = DisplayList::new();
        draw_system(&catalog, &states, &config, &mut list);

        let ring = list
            .commands()
            .iter()
            .find_map(|cmd| match cmd {
                DrawCmd::StrokeEllipseArc { radii, .. } => Some(*radii),
                _ => None,
            })
            .unwrap();
        let expected = (BODY_RADIUS_FLOOR / 6.0) * 10.0;
        assert!((ring.x - expected).abs() < 1e-9, "ring rx {}", ring.x);
    }

    #[test]
    fn sub_floor_satellites_are_suppressed() {
        let catalog = ringed_catalog();
        let states = compute_states(&catalog, 0.0, 0.4, 1e-6);
        let config = OrreryConfig::default();
        let mut list = DisplayList::new();
        draw_system(&catalog, &states, &config, &mut list);

        let fills = list
            .commands()
            .iter()
            .filter(|cmd| matches!(cmd, DrawCmd::FillCircle { .. }))
            .count();
        // Only the central body's disc survives the visibility gate.
        assert_eq!(fills, 1);
    }

    #[test]
    fn bodies_paint_back_to_front() {
        let catalog = ringed_catalog();
        let states = compute_states(&catalog, 57.0, 0.4, 1.0);
        let config = OrreryConfig::default();
        let mut list = DisplayList::new();
        draw_system(&catalog, &states, &config, &mut list);

        // Recover each disc's depth by matching fill centers to states.
        let mut depths = Vec::new();
        for cmd in list.commands() {
            if let DrawCmd::FillCircle { center, .. } = cmd {
                let state = states
                    .iter()
                    .find(|s| {
                        (s.position.x - center.x).abs() < 1e-9
                            && (s.position.y - center.y).abs() < 1e-9
                    })
                    .unwrap();
                depths.push(state.position.z);
            }
        }
        assert_eq!(depths.len(), 3);
        for pair in depths.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
    }

    #[test]
    fn orbit_guides_underlay_when_configured() {
        let catalog = ringed_catalog();
        let states = compute_states(&catalog, 3.0, 0.4, 1.0);
        let config = OrreryConfig {
            orbit: Some("rgba(255, 255, 255, 0.15)".to_string()),
            ..OrreryConfig::default()
        };
        let mut list = DisplayList::new();
        draw_system(&catalog, &states, &config, &mut list);

        // Two orbiting bodies: two guide ellipses before any disc fill.
        let first_fill = list
            .commands()
            .iter()
            .position(|cmd| matches!(cmd, DrawCmd::FillCircle { .. }))
            .unwrap();
        let guides = list.commands()[..first_fill]
            .iter()
            .filter(|cmd| matches!(cmd, DrawCmd::StrokeEllipseArc { .. }))
            .count();
        assert_eq!(guides, 2);
    }

    #[test]
    fn no_guides_by_default() {
        let catalog = ringed_catalog();
        let states = compute_states(&catalog, 3.0, 0.4, 1.0);
        let config = OrreryConfig::default();
        let mut list = DisplayList::new();
        draw_system(&catalog, &states, &config, &mut list);

        // The only ellipse arc is the ring itself.
        let arcs = list
            .commands()
            .iter()
            .filter(|cmd| matches!(cmd, DrawCmd::StrokeEllipseArc { .. }))
            .count();
        assert_eq!(arcs, 1);
    }
}
