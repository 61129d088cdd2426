//! Shape descriptors and the RGBA canvas they are rasterized onto.
//!
//! All coordinates are integer pixel positions with inclusive bounds, so a
//! rounded rectangle from `(50, 30)` to `(78, 98)` covers exactly columns
//! 50..=78 and rows 30..=98. Drawing is aliased and replaces the covered
//! pixels with the shape color instead of compositing over them.

use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use std::str::FromStr;
use tiny_skia::{
    BlendMode, FillRule, LineCap, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, Transform,
};

// Control point distance for approximating a quarter circle with a cubic.
const KAPPA: f32 = 0.552_284_8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Parse a CSS color such as `#3b82f6`, `rgb(59 130 246)` or `steelblue`.
    pub fn from_css(value: &str) -> Result<Self> {
        let color = css_color::Srgb::from_str(value)
            .map_err(|_| anyhow::anyhow!("Invalid CSS color: {value}"))?;

        Ok(Self::rgba(
            channel(color.red),
            channel(color.green),
            channel(color.blue),
            channel(color.alpha),
        ))
    }
}

fn channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Inclusive pixel box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// A single drawing primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Filled rectangle with rounded corners.
    RoundedRect {
        bounds: Bounds,
        radius: i32,
        color: Color,
    },
    /// Circle outline. The outer edge touches `center ± radius` and the
    /// stroke grows inward by `thickness` pixels.
    Ring {
        center: Point,
        radius: i32,
        thickness: i32,
        color: Color,
    },
    /// Filled circle covering `center ± radius`.
    Disc {
        center: Point,
        radius: i32,
        color: Color,
    },
    /// Straight stroke covering the pixels from `from` to `to` inclusive,
    /// `width` pixels thick and centered on them.
    Line {
        from: Point,
        to: Point,
        width: i32,
        color: Color,
    },
}

impl Shape {
    pub fn color(&self) -> Color {
        match *self {
            Shape::RoundedRect { color, .. }
            | Shape::Ring { color, .. }
            | Shape::Disc { color, .. }
            | Shape::Line { color, .. } => color,
        }
    }

    /// Inclusive bounding box of the shape, ignoring stroke width for lines.
    pub fn bounds(&self) -> Bounds {
        match *self {
            Shape::RoundedRect { bounds, .. } => bounds,
            Shape::Ring { center, radius, .. } | Shape::Disc { center, radius, .. } => Bounds::new(
                center.x - radius,
                center.y - radius,
                center.x + radius,
                center.y + radius,
            ),
            Shape::Line { from, to, .. } => Bounds::new(
                from.x.min(to.x),
                from.y.min(to.y),
                from.x.max(to.x),
                from.y.max(to.y),
            ),
        }
    }

    fn geometry(&self) -> Option<Geometry> {
        match *self {
            Shape::RoundedRect { bounds, radius, .. } => {
                rounded_rect_path(bounds, radius).map(Geometry::Fill)
            }
            Shape::Ring {
                center,
                radius,
                thickness,
                ..
            } => {
                let (cx, cy) = pixel_center(center);
                let outer = radius as f32 + 0.5;
                let thickness = thickness.max(1) as f32;
                if thickness >= outer {
                    // The stroke would swallow the hole.
                    PathBuilder::from_circle(cx, cy, outer).map(Geometry::Fill)
                } else {
                    PathBuilder::from_circle(cx, cy, outer - thickness / 2.0)
                        .map(|path| Geometry::Stroke(path, thickness, LineCap::Butt))
                }
            }
            Shape::Disc { center, radius, .. } => {
                if radius < 0 {
                    return None;
                }
                let (cx, cy) = pixel_center(center);
                PathBuilder::from_circle(cx, cy, radius as f32 + 0.5).map(Geometry::Fill)
            }
            Shape::Line {
                from, to, width, ..
            } => {
                if width <= 0 {
                    return None;
                }
                // Run from the outer pixel edge of each endpoint so the butt
                // caps stop exactly at `from` and `to`.
                let (x0, y0) = pixel_center(from);
                let (x1, y1) = pixel_center(to);
                let (dx, dy) = (x1 - x0, y1 - y0);
                let length = (dx * dx + dy * dy).sqrt();
                let (ux, uy) = if length > 0.0 {
                    (dx / length, dy / length)
                } else {
                    (1.0, 0.0)
                };

                let mut pb = PathBuilder::new();
                pb.move_to(x0 - ux * 0.5, y0 - uy * 0.5);
                pb.line_to(x1 + ux * 0.5, y1 + uy * 0.5);
                pb.finish()
                    .map(|path| Geometry::Stroke(path, width as f32, LineCap::Butt))
            }
        }
    }
}

enum Geometry {
    Fill(Path),
    Stroke(Path, f32, LineCap),
}

fn pixel_center(point: Point) -> (f32, f32) {
    (point.x as f32 + 0.5, point.y as f32 + 0.5)
}

fn rounded_rect_path(bounds: Bounds, radius: i32) -> Option<Path> {
    if bounds.right < bounds.left || bounds.bottom < bounds.top {
        return None;
    }

    let left = bounds.left as f32;
    let top = bounds.top as f32;
    let right = bounds.right as f32 + 1.0;
    let bottom = bounds.bottom as f32 + 1.0;

    let r = (radius.max(0) as f32)
        .min((right - left) / 2.0)
        .min((bottom - top) / 2.0);
    if r <= 0.0 {
        return Rect::from_ltrb(left, top, right, bottom).map(PathBuilder::from_rect);
    }

    let k = r * KAPPA;
    let mut pb = PathBuilder::new();
    pb.move_to(left + r, top);
    pb.line_to(right - r, top);
    pb.cubic_to(right - r + k, top, right, top + r - k, right, top + r);
    pb.line_to(right, bottom - r);
    pb.cubic_to(right, bottom - r + k, right - r + k, bottom, right - r, bottom);
    pb.line_to(left + r, bottom);
    pb.cubic_to(left + r - k, bottom, left, bottom - r + k, left, bottom - r);
    pb.line_to(left, top + r);
    pb.cubic_to(left, top + r - k, left + r - k, top, left + r, top);
    pb.close();
    pb.finish()
}

/// Square RGBA drawing surface, transparent when created.
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    pub fn new(size: u32) -> Result<Self> {
        let pixmap = Pixmap::new(size, size)
            .with_context(|| format!("Can't allocate a {size}x{size} canvas"))?;
        Ok(Self { pixmap })
    }

    /// Rasterize one shape. Shapes that collapse to nothing are skipped.
    pub fn draw(&mut self, shape: &Shape) {
        let Some(geometry) = shape.geometry() else {
            return;
        };

        let color = shape.color();
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = false;
        paint.blend_mode = BlendMode::Source;

        match geometry {
            Geometry::Fill(path) => {
                self.pixmap
                    .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
            }
            Geometry::Stroke(path, width, line_cap) => {
                let stroke = Stroke {
                    width,
                    line_cap,
                    ..Stroke::default()
                };
                self.pixmap
                    .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
            }
        }
    }

    /// Convert the premultiplied canvas into a straight-alpha image.
    pub fn into_image(self) -> RgbaImage {
        let mut image = RgbaImage::new(self.pixmap.width(), self.pixmap.height());
        for (dst, src) in image.pixels_mut().zip(self.pixmap.pixels()) {
            let color = src.demultiply();
            *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
        }
        image
    }
}
