use crate::circle::{Circle, Color};
use kurbo::{Arc, BezPath, Point, Rect, Shape as _, Vec2};
use std::f64::consts::PI;

/// Flattening tolerance used when circular arcs are emitted as cubic segments.
pub const ARC_TOLERANCE: f64 = 0.1;

/// The renderable union of the base disk and every connector of a frame.
///
/// All subpaths share the same winding direction, so painting `path` with the
/// non-zero fill rule yields their union.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeShape {
    pub path: BezPath,
    pub fill: Color,
    /// Number of connector outlines merged into `path`.
    pub connectors: usize,
}

impl CompositeShape {
    pub fn empty(fill: Color) -> Self {
        Self {
            path: BezPath::new(),
            fill,
            connectors: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.path.elements().is_empty()
    }

    pub fn bounding_box(&self) -> Rect {
        self.path.bounding_box()
    }

    /// SVG path data (`d` attribute) for the outline.
    pub fn to_svg_path(&self) -> String {
        self.path.to_svg()
    }

    /// Standalone SVG document with the outline filled in `fill`.
    pub fn to_svg_document(&self, width: u32, height: u32) -> String {
        format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
                r#"<path d="{d}" fill="{fill}" fill-opacity="{alpha}" fill-rule="nonzero"/>"#,
                "</svg>\n"
            ),
            w = width,
            h = height,
            d = self.to_svg_path(),
            fill = self.fill.to_hex(),
            alpha = self.fill.a.clamp(0.0, 1.0),
        )
    }
}

/// Appends a circular arc as cubic segments. The current point must already sit
/// at the arc's start.
pub(crate) fn append_arc(
    path: &mut BezPath,
    center: Point,
    radius: f64,
    start_angle: f64,
    sweep_angle: f64,
) {
    let arc = Arc {
        center,
        radii: Vec2::new(radius, radius),
        start_angle,
        sweep_angle,
        x_rotation: 0.0,
    };
    path.extend(arc.append_iter(ARC_TOLERANCE));
}

/// Closed outline of a full disk, wound the same way as connector outlines.
pub fn disk_path(circle: &Circle) -> BezPath {
    let mut path = BezPath::new();
    if !(circle.radius > 0.0) || !circle.radius.is_finite() {
        return path;
    }
    path.move_to(circle.point_at(0.0));
    append_arc(&mut path, circle.center, circle.radius, 0.0, 2.0 * PI);
    path.close_path();
    path
}
