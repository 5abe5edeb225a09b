use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Represents a RGBA color in float format (0.0 - 1.0).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    /// The stock liquid red.
    pub const LIQUID_RED: Color = Color {
        r: 0.945,
        g: 0.365,
        b: 0.365,
        a: 1.0,
    };

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Formats the RGB channels as `#rrggbb` (alpha is emitted separately by SVG consumers).
    pub fn to_hex(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b)
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::LIQUID_RED
    }
}

fn channel_to_u8(v: f32) -> u8 {
    if v.is_finite() {
        (v.clamp(0.0, 1.0) * 255.0).round() as u8
    } else {
        0
    }
}

/// A disk participating in metaball blending.
///
/// Circles are plain values: the animation driver rewrites `center` every tick
/// and the blend engine only ever reads them.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
    pub color: Color,
}

impl Circle {
    pub fn new(center: impl Into<Point>, radius: f64, color: Color) -> Self {
        Self {
            center: center.into(),
            radius,
            color,
        }
    }

    /// Height of the circle's bounding box.
    pub fn diameter(&self) -> f64 {
        self.radius * 2.0
    }

    /// Distance between the two centers.
    pub fn distance_to(&self, other: &Circle) -> f64 {
        self.center.distance(other.center)
    }

    /// Point on the circumference at `angle` radians.
    pub fn point_at(&self, angle: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        Point::new(
            self.center.x + self.radius * cos,
            self.center.y + self.radius * sin,
        )
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.center.x + self.radius,
            self.center.y + self.radius,
        )
    }
}
