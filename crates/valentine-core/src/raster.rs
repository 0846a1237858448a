//! Rasterization service.
//!
//! [`Rasterizer`] is the seam the export pipeline paints through. The
//! built-in [`SoftwareRasterizer`] fills the gradient with tiny-skia and draws
//! text from the 8×8 bitmap glyphs of `font8x8`, so output depends on nothing
//! but the surface and the scale.

use async_trait::async_trait;
use font8x8::{UnicodeFonts, BASIC_FONTS, GREEK_FONTS, LATIN_FONTS};
use image::RgbImage;
use tiny_skia::{
    Color, FillRule, GradientStop, LinearGradient, Paint, PathBuilder, Pixmap, Point, Rect,
    SpreadMode, Transform,
};
use tracing::debug;

use crate::card::Face;
use crate::error::{CardError, CardResult};
use crate::render::{advance_ratio, Gradient, OffscreenSurface, Rgb, TextRun};

/// Fixed render scale (device pixels per logical unit)
pub const RENDER_SCALE: f32 = 2.0;

const ITALIC_SLANT: f32 = 0.2;
const SCRIPT_SLANT: f32 = 0.25;
const DISPLAY_WEIGHT: f32 = 1.5;

/// Glyph drawn for characters the bitmap fonts do not cover
const MISSING_GLYPH: [u8; 8] = [0x7E, 0x42, 0x42, 0x42, 0x42, 0x42, 0x7E, 0x00];

/// Turns an off-screen surface into pixels.
///
/// Implementations may fail or return an empty image; the pipeline treats
/// both as the surface being unavailable.
#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn rasterize(&self, surface: &OffscreenSurface, scale: f32) -> CardResult<RgbImage>;
}

/// CPU rasterizer built on tiny-skia
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftwareRasterizer;

#[async_trait]
impl Rasterizer for SoftwareRasterizer {
    async fn rasterize(&self, surface: &OffscreenSurface, scale: f32) -> CardResult<RgbImage> {
        // Painting is CPU-bound; keep it off the cooperative scheduler
        let surface = surface.clone();
        tokio::task::spawn_blocking(move || paint(&surface, scale))
            .await
            .map_err(|e| CardError::RenderUnavailable(format!("Paint task failed: {}", e)))?
    }
}

/// Paint a surface synchronously at `scale`.
pub fn paint(surface: &OffscreenSurface, scale: f32) -> CardResult<RgbImage> {
    let width = (surface.width * scale).round() as u32;
    let height = (surface.height * scale).round() as u32;
    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        CardError::RenderUnavailable(format!("Cannot allocate {}x{} surface", width, height))
    })?;

    fill_background(&mut pixmap, surface, scale)?;
    for run in &surface.runs {
        draw_run(&mut pixmap, run, surface.text_color, scale);
    }

    debug!(width, height, runs = surface.runs.len(), "Painted surface");
    to_rgb(&pixmap)
}

fn fill_background(pixmap: &mut Pixmap, surface: &OffscreenSurface, scale: f32) -> CardResult<()> {
    let Gradient { stops, .. } = surface.background;
    let ((x0, y0), (x1, y1)) = surface.background.endpoints(surface.width, surface.height);

    let stops = stops
        .iter()
        .enumerate()
        .map(|(i, stop)| GradientStop::new(i as f32 / 2.0, color(*stop)))
        .collect();
    let shader = LinearGradient::new(
        Point::from_xy(x0 * scale, y0 * scale),
        Point::from_xy(x1 * scale, y1 * scale),
        stops,
        SpreadMode::Pad,
        Transform::identity(),
    )
    .ok_or_else(|| CardError::RenderUnavailable("Degenerate background gradient".to_string()))?;

    let mut paint = Paint::default();
    paint.shader = shader;
    paint.anti_alias = false;

    let rect = Rect::from_xywh(0.0, 0.0, pixmap.width() as f32, pixmap.height() as f32)
        .ok_or_else(|| CardError::RenderUnavailable("Empty surface".to_string()))?;
    pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    Ok(())
}

fn draw_run(pixmap: &mut Pixmap, run: &TextRun, text_color: Rgb, scale: f32) {
    let cell = run.size * scale / 8.0;
    let advance = run.size * advance_ratio(run.face) * scale;
    let weight = if run.face == Face::Display { DISPLAY_WEIGHT } else { 1.0 };
    let left = run.start_x() * scale;
    let top = run.y * scale;

    let mut builder = PathBuilder::new();
    for (i, ch) in run.text.chars().enumerate() {
        let origin = left + i as f32 * advance;
        for (row, bits) in glyph(ch).iter().enumerate() {
            for col in 0..8 {
                if bits & (1 << col) == 0 {
                    continue;
                }
                let x = origin + col as f32 * cell;
                let y = top + row as f32 * cell;
                if let Some(rect) = Rect::from_xywh(x, y, cell * weight, cell) {
                    builder.push_rect(rect);
                }
            }
        }
    }
    // whitespace-only runs have no geometry
    let Some(path) = builder.finish() else {
        return;
    };

    let slant = match (run.italic, run.face) {
        (_, Face::Script) => SCRIPT_SLANT,
        (true, _) => ITALIC_SLANT,
        (false, _) => 0.0,
    };
    // lean glyph tops to the right around the baseline
    let baseline = top + run.size * scale;
    let transform = Transform::from_row(1.0, 0.0, -slant, 1.0, slant * baseline, 0.0);

    let mut paint = Paint::default();
    paint.set_color(color(text_color));
    paint.anti_alias = false;
    pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);
}

fn glyph(ch: char) -> [u8; 8] {
    let ch = if ch == '\t' { ' ' } else { ch };
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| GREEK_FONTS.get(ch))
        .unwrap_or(MISSING_GLYPH)
}

fn color(rgb: Rgb) -> Color {
    Color::from_rgba8(rgb.0, rgb.1, rgb.2, 255)
}

fn to_rgb(pixmap: &Pixmap) -> CardResult<RgbImage> {
    let mut raw = Vec::with_capacity(pixmap.pixels().len() * 3);
    for pixel in pixmap.pixels() {
        let straight = pixel.demultiply();
        raw.extend_from_slice(&[straight.red(), straight.green(), straight.blue()]);
    }
    RgbImage::from_raw(pixmap.width(), pixmap.height(), raw)
        .ok_or_else(|| CardError::RenderUnavailable("Pixel buffer size mismatch".to_string()))
}
