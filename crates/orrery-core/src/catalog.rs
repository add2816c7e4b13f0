use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ring annulus around a body, in the same unscaled units as `base_radius`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingSpan {
    /// Inner annulus radius.
    pub inner: f64,
    /// Outer annulus radius.
    pub outer: f64,
}

impl RingSpan {
    /// Mean path radius the ring stroke is centered on.
    pub fn mean(&self) -> f64 {
        (self.inner + self.outer) / 2.0
    }
}

/// One body of the system: a disc on a circular parametric orbit.
///
/// All lengths are unscaled model pixels; the viewport fit multiplies them
/// by the current scale factor each frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CelestialBody {
    /// Display name (e.g., "Saturn").
    #[serde(default)]
    pub name: String,
    /// Unscaled disc radius.
    #[serde(rename = "radius")]
    pub base_radius: f64,
    /// Unscaled distance from the parent body's center.
    #[serde(rename = "distance", default)]
    pub orbit_distance: f64,
    /// Simulated time units per full revolution. Must be positive and finite.
    #[serde(default = "default_period")]
    pub period: f64,
    /// Index of the body this one orbits; `None` marks the central body.
    #[serde(default)]
    pub parent: Option<usize>,
    /// Optional ring annulus.
    #[serde(default)]
    pub ring: Option<RingSpan>,
}

fn default_period() -> f64 {
    1.0
}

impl CelestialBody {
    /// Create a central body (no parent, zero orbit distance).
    pub fn new(name: impl Into<String>, base_radius: f64) -> Self {
        Self {
            name: name.into(),
            base_radius,
            orbit_distance: 0.0,
            period: default_period(),
            parent: None,
            ring: None,
        }
    }

    // -- Builder pattern --

    pub fn orbiting(mut self, parent: usize, distance: f64, period: f64) -> Self {
        self.parent = Some(parent);
        self.orbit_distance = distance;
        self.period = period;
        self
    }

    pub fn with_ring(mut self, inner: f64, outer: f64) -> Self {
        self.ring = Some(RingSpan { inner, outer });
        self
    }
}

/// JSON manifest holding a custom body catalog.
/// Parsed from the embedder's options, then validated into a [`Catalog`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemManifest {
    /// Bodies in any order; parent links are indices into this list.
    pub bodies: Vec<CelestialBody>,
}

/// Catalog validation failures. All of these are configuration errors and
/// abort construction before the first frame.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("body {index} has non-positive period {period}")]
    InvalidPeriod { index: usize, period: f64 },
    #[error("body {index} references missing parent {parent}")]
    MissingParent { index: usize, parent: usize },
    #[error("catalog needs exactly one central body, found {count}")]
    RootCount { count: usize },
    #[error("body {index} is caught in an orbit cycle")]
    OrbitCycle { index: usize },
    #[error("system manifest parse error: {0}")]
    Manifest(#[from] serde_json::Error),
}

/// Validated, immutable body catalog.
///
/// Construction checks periods, parent links, and root count, and resolves
/// a topological evaluation order (every parent strictly before its
/// children) so insertion order never matters to the orbit pass.
#[derive(Debug, Clone)]
pub struct Catalog {
    bodies: Vec<CelestialBody>,
    /// Body indices in parent-first evaluation order.
    order: Vec<usize>,
    /// Maximum cumulative orbit distance from the central body.
    extent: f64,
}

impl Catalog {
    pub fn new(bodies: Vec<CelestialBody>) -> Result<Self, CatalogError> {
        let mut roots = 0usize;
        for (index, body) in bodies.iter().enumerate() {
            if !body.period.is_finite() || body.period <= 0.0 {
                return Err(CatalogError::InvalidPeriod {
                    index,
                    period: body.period,
                });
            }
            match body.parent {
                None => roots += 1,
                Some(parent) => {
                    if parent >= bodies.len() {
                        return Err(CatalogError::MissingParent { index, parent });
                    }
                }
            }
        }
        if roots != 1 {
            return Err(CatalogError::RootCount { count: roots });
        }

        // Resolve parent-first order. A pass that places nothing means the
        // remaining bodies only reference each other.
        let mut order = Vec::with_capacity(bodies.len());
        let mut placed = vec![false; bodies.len()];
        while order.len() < bodies.len() {
            let before = order.len();
            for (index, body) in bodies.iter().enumerate() {
                if placed[index] {
                    continue;
                }
                let ready = match body.parent {
                    None => true,
                    Some(parent) => placed[parent],
                };
                if ready {
                    placed[index] = true;
                    order.push(index);
                }
            }
            if order.len() == before {
                let index = placed.iter().position(|&p| !p).unwrap_or(0);
                return Err(CatalogError::OrbitCycle { index });
            }
        }

        // Cumulative reach from the root, walked in the resolved order.
        let mut reach = vec![0.0f64; bodies.len()];
        let mut extent = 0.0f64;
        for &index in &order {
            let body = &bodies[index];
            let base = body.parent.map_or(0.0, |parent| reach[parent]);
            reach[index] = base + body.orbit_distance;
            extent = extent.max(reach[index]);
        }

        Ok(Self {
            bodies,
            order,
            extent,
        })
    }

    /// Validate a parsed manifest into a catalog.
    pub fn from_manifest(manifest: SystemManifest) -> Result<Self, CatalogError> {
        Self::new(manifest.bodies)
    }

    /// Parse a `{ "bodies": [...] }` JSON manifest and validate it.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let manifest: SystemManifest = serde_json::from_str(json)?;
        Self::from_manifest(manifest)
    }

    /// The built-in schematic solar system (values in [`solar_system`]).
    pub fn solar_system() -> Self {
        Self::new(solar_system()).expect("built-in solar system is valid")
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    /// Body indices in parent-first evaluation order.
    pub fn eval_order(&self) -> &[usize] {
        &self.order
    }

    /// Maximum cumulative orbit distance from the central body.
    pub fn max_extent(&self) -> f64 {
        self.extent
    }

    pub fn get(&self, index: usize) -> Option<&CelestialBody> {
        self.bodies.get(index)
    }
}

impl std::ops::Index<usize> for Catalog {
    type Output = CelestialBody;

    fn index(&self, index: usize) -> &CelestialBody {
        &self.bodies[index]
    }
}

// ── Built-in system ──────────────────────────────────────────────────

/// Body index constants for the built-in system.
pub const SUN: usize = 0;
pub const MERCURY: usize = 1;
pub const VENUS: usize = 2;
pub const EARTH: usize = 3;
pub const MOON: usize = 4;
pub const MARS: usize = 5;
pub const JUPITER: usize = 6;
pub const IO: usize = 7;
pub const EUROPA: usize = 8;
pub const GANYMEDE: usize = 9;
pub const SATURN: usize = 10;
pub const TITAN: usize = 11;
pub const URANUS: usize = 12;
pub const NEPTUNE: usize = 13;
pub const BODY_COUNT: usize = 14;

/// Schematic solar-system table. Distances and radii are stylized for
/// readability (real values would be sub-pixel); periods are Earth days
/// for the planets, stretched for the moons so their motion stays legible.
pub fn solar_system() -> Vec<CelestialBody> {
    vec![
        CelestialBody::new("Sun", 16.0),
        CelestialBody::new("Mercury", 2.0).orbiting(SUN, 30.0, 88.0),
        CelestialBody::new("Venus", 3.5).orbiting(SUN, 44.0, 225.0),
        CelestialBody::new("Earth", 4.0).orbiting(SUN, 60.0, 365.0),
        CelestialBody::new("Moon", 1.2).orbiting(EARTH, 7.0, 27.0),
        CelestialBody::new("Mars", 3.0).orbiting(SUN, 78.0, 687.0),
        CelestialBody::new("Jupiter", 9.0).orbiting(SUN, 108.0, 4333.0),
        CelestialBody::new("Io", 1.2).orbiting(JUPITER, 13.0, 22.0),
        CelestialBody::new("Europa", 1.0).orbiting(JUPITER, 16.0, 34.0),
        CelestialBody::new("Ganymede", 1.5).orbiting(JUPITER, 20.0, 52.0),
        CelestialBody::new("Saturn", 8.0)
            .orbiting(SUN, 145.0, 10759.0)
            .with_ring(11.0, 16.0),
        CelestialBody::new("Titan", 1.4).orbiting(SATURN, 14.0, 42.0),
        CelestialBody::new("Uranus", 6.0).orbiting(SUN, 170.0, 30689.0),
        CelestialBody::new("Neptune", 6.0).orbiting(SUN, 190.0, 60190.0),
    ]
}
