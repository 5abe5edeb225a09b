//! # Metaball Blend Engine
//!
//! Computes the "liquid neck" joining two nearby circles and merges the necks
//! of a frame with the base disk into one fillable outline.
//!
//! ## Neck construction
//! For circles `a` and `b` at center distance `d` the engine derives a spread
//! angle `s = angle_threshold * clamp(1 - d / radius_threshold, 0, 1)`. Two
//! anchors sit on each circumference at `±s` from the center-to-center axis.
//! The anchors on the same side of the axis are joined by a quadratic curve
//! whose control point (the waist) is pulled toward the axis as viscosity
//! drops, and the far arcs of both circles close the outline.

use crate::circle::{Circle, Color};
use crate::shape::{append_arc, disk_path, CompositeShape};
use kurbo::{BezPath, Point, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

pub const MIN_RADIUS_THRESHOLD: f64 = 1e-3;
pub const MIN_ANGLE_THRESHOLD: f64 = 1e-3;
pub const MAX_ANGLE_THRESHOLD: f64 = FRAC_PI_2 - 1e-3;
pub const MIN_VISCOSITY: f64 = 0.01;

/// Fraction of the combined radii the waist is pulled inward at zero viscosity
/// and full separation.
const WAIST_PINCH: f64 = 0.5;

const DISTANCE_EPSILON: f64 = 1e-9;

/// Shape parameters of the blend engine.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineParameters {
    /// Maximum center distance at which a neck is still drawn.
    pub radius_threshold: f64,
    /// Maximum half-angle (radians) of the neck anchors around the axis.
    pub angle_threshold: f64,
    /// In `(0, 1]`. Higher values give a straighter, thicker neck.
    pub viscosity: f64,
}

impl Default for EngineParameters {
    fn default() -> Self {
        Self {
            radius_threshold: 80.0,
            angle_threshold: 0.45,
            viscosity: 0.65,
        }
    }
}

impl EngineParameters {
    /// Creates parameters, clamping every value into its valid range.
    pub fn new(radius_threshold: f64, angle_threshold: f64, viscosity: f64) -> Self {
        Self {
            radius_threshold,
            angle_threshold,
            viscosity,
        }
        .clamped()
    }

    /// Returns a copy with out-of-range values pulled to the nearest bound.
    /// NaN falls back to the default.
    pub fn clamped(self) -> Self {
        let defaults = Self::default();
        Self {
            radius_threshold: clamp_or(
                self.radius_threshold,
                MIN_RADIUS_THRESHOLD,
                f64::MAX,
                defaults.radius_threshold,
            ),
            angle_threshold: clamp_or(
                self.angle_threshold,
                MIN_ANGLE_THRESHOLD,
                MAX_ANGLE_THRESHOLD,
                defaults.angle_threshold,
            ),
            viscosity: clamp_or(self.viscosity, MIN_VISCOSITY, 1.0, defaults.viscosity),
        }
    }

    /// Angular half-width of the neck for circles `distance` apart.
    ///
    /// Non-increasing in `distance`; `angle_threshold` when the centers touch and
    /// zero from `radius_threshold` on.
    pub fn spread(&self, distance: f64) -> f64 {
        let closeness = (1.0 - distance / self.radius_threshold).clamp(0.0, 1.0);
        self.angle_threshold * closeness
    }
}

fn clamp_or(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

/// The connective outline computed for one circle pair.
#[derive(Clone, Debug, PartialEq)]
pub struct Connector {
    /// Angular half-width `s` of the neck.
    pub spread: f64,
    /// Anchors on the first circle, `[+s side, -s side]`.
    pub anchors_a: [Point; 2],
    /// Anchors on the second circle, `[+s side, -s side]`.
    pub anchors_b: [Point; 2],
    /// Waist control points, `[+s side, -s side]`.
    pub waists: [Point; 2],
    /// Closed outline: both far arcs joined by the two waist curves.
    pub path: BezPath,
}

/// Computes the neck between `a` and `b`, or `None` when the centers coincide,
/// lie farther apart than `radius_threshold`, or either radius is degenerate.
pub fn connect(params: &EngineParameters, a: &Circle, b: &Circle) -> Option<Connector> {
    let axis = b.center - a.center;
    let distance = axis.hypot();
    if !distance.is_finite() || distance <= DISTANCE_EPSILON || distance > params.radius_threshold
    {
        return None;
    }
    if !(a.radius > 0.0 && b.radius > 0.0) {
        return None;
    }

    let u = axis / distance;
    let v = Vec2::new(-u.y, u.x);
    let heading = u.atan2();
    let spread = params.spread(distance);
    let (sin, cos) = spread.sin_cos();

    let anchor_a = |side: f64| a.center + (u * cos + v * (side * sin)) * a.radius;
    let anchor_b = |side: f64| b.center + (-u * cos + v * (side * sin)) * b.radius;

    // Waist sits where the straight anchor-to-anchor line crosses the radius
    // weighted split of the gap, then sinks toward the axis.
    let combined = a.radius + b.radius;
    let weight = a.radius / combined;
    let near = a.radius * cos;
    let far = distance - b.radius * cos;
    let along = near + (far - near) * weight;
    let edge = 2.0 * a.radius * b.radius * sin / combined;
    let pinch =
        combined * (1.0 - params.viscosity) * WAIST_PINCH * (distance / params.radius_threshold);
    let height = (edge - pinch).max(0.0);
    let waist = |side: f64| a.center + u * along + v * (side * height);

    let anchors_a = [anchor_a(1.0), anchor_a(-1.0)];
    let anchors_b = [anchor_b(1.0), anchor_b(-1.0)];
    let waists = [waist(1.0), waist(-1.0)];

    let far_sweep = 2.0 * PI - 2.0 * spread;
    let mut path = BezPath::new();
    path.move_to(anchors_a[1]);
    path.quad_to(waists[1], anchors_b[1]);
    append_arc(&mut path, b.center, b.radius, heading + PI + spread, far_sweep);
    path.quad_to(waists[0], anchors_a[0]);
    append_arc(&mut path, a.center, a.radius, heading + spread, far_sweep);
    path.close_path();

    Some(Connector {
        spread,
        anchors_a,
        anchors_b,
        waists,
        path,
    })
}

/// Accumulates circle pairs for one frame and renders them as a single shape.
#[derive(Clone, Debug)]
pub struct MetaballEngine {
    params: EngineParameters,
    color: Color,
    pairs: Vec<(Circle, Circle)>,
}

impl Default for MetaballEngine {
    fn default() -> Self {
        Self::new(EngineParameters::default(), Color::default())
    }
}

impl MetaballEngine {
    pub fn new(params: EngineParameters, color: Color) -> Self {
        Self {
            params: params.clamped(),
            color,
            pairs: Vec::new(),
        }
    }

    /// Updates the shape parameters. Out-of-range values are clamped; only
    /// subsequent `push`/`draw` calls observe the change.
    pub fn configure(
        &mut self,
        radius_threshold: f64,
        angle_threshold: f64,
        viscosity: f64,
        color: Color,
    ) {
        self.params = EngineParameters::new(radius_threshold, angle_threshold, viscosity);
        self.color = color;
    }

    pub fn parameters(&self) -> EngineParameters {
        self.params
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Forgets every registered pair.
    pub fn clear(&mut self) {
        self.pairs.clear();
    }

    /// Registers `a`–`b` for the next `draw` and returns its connector, if any.
    pub fn push(&mut self, a: &Circle, b: &Circle) -> Option<Connector> {
        self.pairs.push((*a, *b));
        connect(&self.params, a, b)
    }

    pub fn pairs(&self) -> &[(Circle, Circle)] {
        &self.pairs
    }

    /// Builds the union of `base`'s disk and every registered pair's connector.
    pub fn draw(&self, base: &Circle) -> CompositeShape {
        let mut shape = CompositeShape::empty(self.color);
        shape.path.extend(disk_path(base));
        for (a, b) in &self.pairs {
            if let Some(connector) = connect(&self.params, a, b) {
                shape.path.extend(connector.path);
                shape.connectors += 1;
            }
        }
        shape
    }
}
