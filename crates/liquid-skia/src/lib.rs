//! Skia rendering surface for liquid frames.
//!
//! Paints the composite outline produced by the blend engine, then every cell
//! still attached to the surface, optionally under a drop shadow.

use kurbo::{BezPath, PathEl};
use std::path::Path as FsPath;
use liquid_core::Cell;
use metaball_core::{disk_path, Color as CoreColor, CompositeShape};
use skia_safe::{
    image_filters, surfaces, AlphaType, Canvas, Color, Color4f, ColorSpace, ColorType,
    EncodedImageFormat, ImageInfo, Paint, PaintStyle, Path,
};
use thiserror::Error;
use tracing::debug;

/// Radius of the content marker relative to its cell.
const CONTENT_SCALE: f32 = 0.4;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to create surface")]
    SurfaceFailure,
    #[error("Failed to encode frame as PNG")]
    EncodeFailure,
    #[error("Failed to write frame: {0}")]
    Io(#[from] std::io::Error),
}

/// Drop shadow applied under the liquid when shadows are enabled.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShadowStyle {
    pub offset: (f32, f32),
    pub blur: f32,
    pub color: CoreColor,
}

impl Default for ShadowStyle {
    fn default() -> Self {
        Self {
            offset: (0.0, 2.0),
            blur: 3.0,
            color: CoreColor::new(0.0, 0.0, 0.0, 0.35),
        }
    }
}

pub struct SkiaRenderer;

impl SkiaRenderer {
    /// Draws one frame: the composite first, attached cells on top.
    pub fn draw(
        canvas: &Canvas,
        shape: &CompositeShape,
        cells: &[Cell],
        shadow: Option<ShadowStyle>,
    ) {
        let mut liquid = fill_paint(shape.fill, 1.0);
        if let Some(style) = shadow {
            let c = to_color4f(style.color).to_color();
            let filter = image_filters::drop_shadow(
                (sanitize(style.offset.0), sanitize(style.offset.1)),
                (sanitize(style.blur), sanitize(style.blur)),
                c,
                None,
                None,
                None,
            );
            liquid.set_image_filter(filter);
        }
        canvas.draw_path(&kurbo_to_skia_path(&shape.path), &liquid);

        for cell in cells.iter().filter(|c| c.attached) {
            let disk = fill_paint(cell.circle.color, 1.0);
            canvas.draw_path(&kurbo_to_skia_path(&disk_path(&cell.circle)), &disk);

            if cell.content_alpha > 0.0 {
                let content = fill_paint(CoreColor::WHITE, cell.content_alpha as f32);
                let center = (
                    sanitize(cell.circle.center.x as f32),
                    sanitize(cell.circle.center.y as f32),
                );
                canvas.draw_circle(center, sanitize(cell.circle.radius as f32 * CONTENT_SCALE), &content);
            }
        }
    }
}

/// Rasterizes one frame into PNG bytes on a transparent background.
pub fn render_png(
    shape: &CompositeShape,
    cells: &[Cell],
    width: i32,
    height: i32,
    shadow: Option<ShadowStyle>,
) -> Result<Vec<u8>, RenderError> {
    let info = ImageInfo::new(
        (width.max(1), height.max(1)),
        ColorType::RGBA8888,
        AlphaType::Premul,
        Some(ColorSpace::new_srgb()),
    );
    let mut surface = surfaces::raster(&info, None, None).ok_or(RenderError::SurfaceFailure)?;
    surface.canvas().clear(Color::TRANSPARENT);

    SkiaRenderer::draw(surface.canvas(), shape, cells, shadow);

    let image = surface.image_snapshot();
    let data = image
        .encode(None, EncodedImageFormat::PNG, 100)
        .ok_or(RenderError::EncodeFailure)?;
    debug!(width, height, bytes = data.len(), "frame encoded");
    Ok(data.as_bytes().to_vec())
}

/// Renders one frame with [`render_png`] and writes it to `path`.
pub fn save_png(
    path: impl AsRef<FsPath>,
    shape: &CompositeShape,
    cells: &[Cell],
    width: i32,
    height: i32,
    shadow: Option<ShadowStyle>,
) -> Result<(), RenderError> {
    let bytes = render_png(shape, cells, width, height, shadow)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

fn fill_paint(color: CoreColor, alpha: f32) -> Paint {
    let mut paint = Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(PaintStyle::Fill);
    paint.set_color4f(to_color4f(color), None);
    paint.set_alpha_f(sanitize(color.a * alpha).clamp(0.0, 1.0));
    paint
}

fn kurbo_to_skia_path(bez_path: &BezPath) -> Path {
    let mut path = Path::new();
    for el in bez_path.elements() {
        match el {
            PathEl::MoveTo(p) => {
                path.move_to((sanitize(p.x as f32), sanitize(p.y as f32)));
            }
            PathEl::LineTo(p) => {
                path.line_to((sanitize(p.x as f32), sanitize(p.y as f32)));
            }
            PathEl::QuadTo(p1, p2) => {
                path.quad_to(
                    (sanitize(p1.x as f32), sanitize(p1.y as f32)),
                    (sanitize(p2.x as f32), sanitize(p2.y as f32)),
                );
            }
            PathEl::CurveTo(p1, p2, p3) => {
                path.cubic_to(
                    (sanitize(p1.x as f32), sanitize(p1.y as f32)),
                    (sanitize(p2.x as f32), sanitize(p2.y as f32)),
                    (sanitize(p3.x as f32), sanitize(p3.y as f32)),
                );
            }
            PathEl::ClosePath => {
                path.close();
            }
        }
    }
    path
}

fn to_color4f(c: CoreColor) -> Color4f {
    Color4f::new(sanitize(c.r), sanitize(c.g), sanitize(c.b), sanitize(c.a))
}

fn sanitize(v: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}
