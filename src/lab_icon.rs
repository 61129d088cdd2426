//! The lab icon: a test tube with a medical cross badge on a blue panel.
//!
//! Every coordinate is authored on a 128x128 design grid and scaled to the
//! requested size with truncation, so small sizes lose 1px details instead of
//! failing.

use crate::{
    canvas::{Bounds, Canvas, Color, Point, Shape},
    output::{prepare_output_dir, save_png},
    sizes::{icon_file_name, SizeSet},
};
use anyhow::Result;
use image::RgbaImage;
use std::path::{Path, PathBuf};

const DESIGN_GRID: f64 = 128.0;

const TICK_ROWS: [f64; 3] = [45.0, 55.0, 65.0];

/// Colors used by the icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub tube: Color,
    pub liquid: Color,
    pub badge: Color,
    pub mark: Color,
    pub accent: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self::with_background(Color::rgba(59, 130, 246, 255))
    }
}

impl Palette {
    /// Default palette with a different panel color. Measurement marks
    /// follow the panel color at half opacity.
    pub fn with_background(background: Color) -> Self {
        Self {
            background,
            tube: Color::rgba(255, 255, 255, 242),
            liquid: Color::rgba(96, 165, 250, 153),
            badge: Color::rgba(255, 255, 255, 230),
            mark: background.with_alpha(128),
            accent: Color::rgba(255, 255, 255, 38),
        }
    }
}

/// Shapes of the icon at one size, in drawing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconLayout {
    pub size: u32,
    pub background: Shape,
    pub tube_body: Shape,
    pub cap: Shape,
    pub liquid: Shape,
    pub badge_ring: Shape,
    pub cross: [Shape; 2],
    pub ticks: [Shape; 3],
    pub accents: [Shape; 2],
}

impl IconLayout {
    pub fn new(size: u32, palette: &Palette) -> Self {
        let scale = size as f64 / DESIGN_GRID;
        let px = |value: f64| (value * scale) as i32;
        let full = size as i32;

        let rect = |left: i32, top: i32, right: i32, bottom: i32, radius: i32, color: Color| {
            Shape::RoundedRect {
                bounds: Bounds::new(left, top, right, bottom),
                radius,
                color,
            }
        };

        let tube_radius = px(2.0);
        let cap_top = px(26.0);

        let badge = Point::new(px(88.0), px(20.0));
        let cross_width = px(6.0);
        let cross_height = px(20.0);
        let cross_radius = px(1.5);

        let tick_width = px(1.5).max(1);
        let tick = |row: f64| {
            let y = px(row);
            Shape::Line {
                from: Point::new(px(52.0), y),
                to: Point::new(px(60.0), y),
                width: tick_width,
                color: palette.mark,
            }
        };

        let accent = |x: f64| Shape::Disc {
            center: Point::new(px(x), px(100.0)),
            radius: px(6.0),
            color: palette.accent,
        };

        Self {
            size,
            background: rect(0, 0, full, full, px(26.0), palette.background),
            tube_body: rect(px(50.0), px(30.0), px(78.0), px(98.0), tube_radius, palette.tube),
            cap: rect(
                px(48.0),
                cap_top,
                px(80.0),
                cap_top + px(8.0),
                tube_radius,
                palette.tube,
            ),
            liquid: rect(px(52.0), px(70.0), px(76.0), px(94.0), tube_radius, palette.liquid),
            badge_ring: Shape::Ring {
                center: badge,
                radius: px(13.0),
                thickness: px(2.5).max(1),
                color: palette.badge,
            },
            cross: [
                rect(
                    badge.x - cross_width / 2,
                    badge.y - cross_height / 2,
                    badge.x + cross_width / 2,
                    badge.y + cross_height / 2,
                    cross_radius,
                    palette.badge,
                ),
                rect(
                    badge.x - cross_height / 2,
                    badge.y - cross_width / 2,
                    badge.x + cross_height / 2,
                    badge.y + cross_width / 2,
                    cross_radius,
                    palette.badge,
                ),
            ],
            ticks: TICK_ROWS.map(tick),
            accents: [accent(32.0), accent(96.0)],
        }
    }

    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        [
            &self.background,
            &self.tube_body,
            &self.cap,
            &self.liquid,
            &self.badge_ring,
        ]
        .into_iter()
        .chain(&self.cross)
        .chain(&self.ticks)
        .chain(&self.accents)
    }
}

/// Draw the lab icon at `size x size` pixels.
pub fn render_icon(size: u32, palette: &Palette) -> Result<RgbaImage> {
    let layout = IconLayout::new(size, palette);
    let mut canvas = Canvas::new(size)?;
    for shape in layout.shapes() {
        canvas.draw(shape);
    }
    Ok(canvas.into_image())
}

/// Outcome of drawing a set of icons.
#[derive(Debug, Default)]
pub struct DrawReport {
    pub written: Vec<(u32, PathBuf)>,
    pub failed: Vec<(u32, anyhow::Error)>,
}

impl DrawReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn written_sizes(&self) -> impl Iterator<Item = u32> + '_ {
        self.written.iter().map(|(size, _)| *size)
    }
}

/// Draw and save `icon{size}.png` for every size.
///
/// A size that fails to render or save is reported and skipped; the
/// remaining sizes are still produced. Only a missing output directory that
/// cannot be created aborts the run.
pub fn generate_drawn(out_dir: &Path, sizes: &SizeSet, palette: &Palette) -> Result<DrawReport> {
    prepare_output_dir(out_dir)?;

    let mut report = DrawReport::default();
    for size in sizes.iter() {
        let output_path = out_dir.join(icon_file_name(size));
        println!("Creating {size}x{size} icon...");

        match render_icon(size, palette).and_then(|icon| save_png(&icon, &output_path)) {
            Ok(()) => {
                println!("  ✓ Created {}", output_path.display());
                report.written.push((size, output_path));
            }
            Err(err) => {
                eprintln!("Error creating {size}x{size} icon: {err:?}");
                report.failed.push((size, err));
            }
        }
    }

    if report.is_success() {
        println!("✓ All icons created in {}", out_dir.display());
    } else {
        println!(
            "✗ {} of {} icons failed, see errors above",
            report.failed.len(),
            sizes.len()
        );
    }

    Ok(report)
}
