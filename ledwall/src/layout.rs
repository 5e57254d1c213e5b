//! Layout test image
//!
//! Rasterizes the texture atlas as seen by the mesh: one block of
//! `tile_width x tile_height` pixels per cabinet, each with its own color,
//! a thin outline and its `column,row` label. Loaded as the wall's texture,
//! every cabinet shows its own address. Curvature plays no part here.

use image::{ImageError, ImageFormat, Rgb, RgbImage};
use std::path::Path;

use crate::atlas::{AtlasLayout, Cabinet, PixelRect};
use crate::config::WallConfig;
use crate::error::{Result, WallError};
use crate::font::{self, GLYPH_HEIGHT};
use crate::output::write_atomically;

/// Cell outline color
pub const BORDER_COLOR: Rgb<u8> = Rgb([24, 24, 24]);

/// Outlines are drawn only on tiles at least this many pixels on each side
const MIN_OUTLINE_TILE: u32 = 4;

const GOLDEN_RATIO_CONJUGATE: f64 = 0.618_033_988_749_895;
const SATURATION: f64 = 0.55;
/// Brightness of the two checkerboard phases
const VALUE_EVEN: f64 = 0.95;
const VALUE_ODD: f64 = 0.72;

/// Render the layout image for a configuration
pub fn render_layout(config: &WallConfig) -> Result<RgbImage> {
    config.validate()?;
    Ok(render_atlas(&config.atlas()))
}

/// Render the layout image for an atlas
pub fn render_atlas(atlas: &AtlasLayout) -> RgbImage {
    let (width, height) = atlas.image_size();
    let mut image = RgbImage::new(width, height);

    for cabinet in atlas.cabinets() {
        let rect = atlas.cell_pixel_rect(cabinet);
        let fill = cabinet_color(atlas, cabinet);
        fill_rect(&mut image, rect, fill);
        if rect.width >= MIN_OUTLINE_TILE && rect.height >= MIN_OUTLINE_TILE {
            outline_rect(&mut image, rect, BORDER_COLOR);
        }
        draw_label(&mut image, atlas, cabinet, rect, fill);
    }

    tracing::debug!(
        width,
        height,
        cabinets = atlas.cabinets_wide * atlas.cabinets_high,
        "Rendered layout image"
    );
    image
}

/// Fill color of a cabinet's cell.
///
/// Hues step by the golden ratio over the cabinet number so neighbours never
/// look alike; brightness alternates in a checkerboard.
pub fn cabinet_color(atlas: &AtlasLayout, cabinet: Cabinet) -> Rgb<u8> {
    let n = (atlas.cabinet_number(cabinet) - 1) as f64;
    let hue = (n * GOLDEN_RATIO_CONJUGATE).fract();
    let value = if (cabinet.column + cabinet.row) % 2 == 0 {
        VALUE_EVEN
    } else {
        VALUE_ODD
    };
    hsv_to_rgb(hue, SATURATION, value)
}

/// Black or white, whichever reads better on `fill`
pub fn label_color(fill: Rgb<u8>) -> Rgb<u8> {
    let [r, g, b] = fill.0;
    let luma = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
    if luma > 140.0 {
        Rgb([0, 0, 0])
    } else {
        Rgb([255, 255, 255])
    }
}

/// Write a layout image as PNG
pub fn write_layout_png(image: &RgbImage, path: &Path) -> Result<()> {
    write_atomically(path, |w| {
        image.write_to(w, ImageFormat::Png).map_err(|e| match e {
            ImageError::IoError(source) => WallError::io(path, source),
            other => WallError::Image(other),
        })
    })?;

    tracing::info!(
        "Wrote layout image {:?}: {}x{} px",
        path,
        image.width(),
        image.height()
    );
    Ok(())
}

/// Validate, render and write in one step. Nothing is written when the
/// configuration is invalid.
pub fn export_layout(config: &WallConfig, path: &Path) -> Result<RgbImage> {
    let image = render_layout(config)?;
    write_layout_png(&image, path)?;
    Ok(image)
}

fn fill_rect(image: &mut RgbImage, rect: PixelRect, color: Rgb<u8>) {
    for y in rect.y..rect.bottom() {
        for x in rect.x..rect.right() {
            image.put_pixel(x, y, color);
        }
    }
}

fn outline_rect(image: &mut RgbImage, rect: PixelRect, color: Rgb<u8>) {
    let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);
    for x in rect.x..=right {
        image.put_pixel(x, rect.y, color);
        image.put_pixel(x, bottom, color);
    }
    for y in rect.y..=bottom {
        image.put_pixel(rect.x, y, color);
        image.put_pixel(right, y, color);
    }
}

/// Centered `column,row` label, with the cabinet number below when it fits
fn draw_label(
    image: &mut RgbImage,
    atlas: &AtlasLayout,
    cabinet: Cabinet,
    rect: PixelRect,
    fill: Rgb<u8>,
) {
    let address = format!("{},{}", cabinet.column, cabinet.row);
    let number = format!("#{}", atlas.cabinet_number(cabinet));

    // Leave room for the outline on every side
    let inner_width = rect.width.saturating_sub(2);
    let inner_height = rect.height.saturating_sub(2);

    let scale = (inner_width * 3 / 4 / font::text_width(&address, 1))
        .min(inner_height / 3 / GLYPH_HEIGHT);
    if scale == 0 {
        return;
    }

    let small = (scale / 2).max(1);
    let gap = small * 2;
    let two_lines = font::text_width(&number, small) <= inner_width
        && font::text_height(scale) + gap + font::text_height(small) <= inner_height;

    let block_height = if two_lines {
        font::text_height(scale) + gap + font::text_height(small)
    } else {
        font::text_height(scale)
    };

    let ink = label_color(fill);
    let top = rect.y + (rect.height - block_height) / 2;
    let left = rect.x + (rect.width - font::text_width(&address, scale)) / 2;
    font::draw_text(image, left, top, &address, scale, ink);

    if two_lines {
        let left = rect.x + (rect.width - font::text_width(&number, small)) / 2;
        let top = top + font::text_height(scale) + gap;
        font::draw_text(image, left, top, &number, small, ink);
    }
}

/// `h`, `s`, `v` in [0, 1]
fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgb<u8> {
    let h6 = (h * 6.0).rem_euclid(6.0);
    let sector = h6.floor();
    let f = h6 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match sector as u32 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    let to_u8 = |c: f64| (c * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb([to_u8(r), to_u8(g), to_u8(b)])
}
