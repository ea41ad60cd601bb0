use crate::shapes::{fill_shape, Circle, RoundedRect, Triangle};
use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    imageops, ColorType, DynamicImage, GrayImage, ImageEncoder, Luma, Rgb, RgbImage, RgbaImage,
};
use std::{f64::consts::SQRT_2, io::Write, path::Path};

/// Default file name, written relative to the working directory
pub const DEFAULT_OUTPUT: &str = "app_icon.png";

/// Width and height of the icon in pixels
pub const ICON_SIZE: u32 = 512;

pub const GRADIENT_START: Rgb<u8> = Rgb([0x21, 0x96, 0xF3]);
pub const GRADIENT_END: Rgb<u8> = Rgb([0x00, 0xBC, 0xD4]);

pub const BUBBLE_COLOR: Rgb<u8> = Rgb([0xFF, 0xFF, 0xFF]);
pub const DOT_COLOR: Rgb<u8> = Rgb([0x21, 0x96, 0xF3]);

/// Message bubble body
pub const BUBBLE: RoundedRect = RoundedRect::new(90, 160, 420, 340, 30);

/// Pointer hanging off the bubble's bottom-left corner
pub const POINTER: Triangle = Triangle::new(
    (BUBBLE.left + 30, BUBBLE.bottom),
    (BUBBLE.left, BUBBLE.bottom + 60),
    (BUBBLE.left, BUBBLE.bottom),
);

pub const DOT_RADIUS: i64 = 18;
pub const DOT_CENTERS: [(i64, i64); 3] = [(190, 250), (256, 250), (322, 250)];

/// Corner radius of the icon's outer silhouette
pub const SILHOUETTE_RADIUS: i64 = 80;

/// Normalized distance of `(x, y)` from the top-left corner
///
/// Zero at the origin, approaching one towards the bottom-right corner.
pub fn gradient_ratio(x: u32, y: u32, size: u32) -> f64 {
    let fx = f64::from(x) / f64::from(size);
    let fy = f64::from(y) / f64::from(size);
    (fx * fx + fy * fy).sqrt() / SQRT_2
}

/// Interpolate a single channel, truncating toward zero
pub fn lerp_channel(start: u8, end: u8, ratio: f64) -> u8 {
    let start = f64::from(start);
    let end = f64::from(end);
    (start + (end - start) * ratio) as u8
}

pub fn gradient_color(x: u32, y: u32, size: u32) -> Rgb<u8> {
    let ratio = gradient_ratio(x, y, size);
    Rgb([
        lerp_channel(GRADIENT_START[0], GRADIENT_END[0], ratio),
        lerp_channel(GRADIENT_START[1], GRADIENT_END[1], ratio),
        lerp_channel(GRADIENT_START[2], GRADIENT_END[2], ratio),
    ])
}

/// Fill a fresh square canvas with the diagonal background gradient
pub fn fill_gradient(size: u32) -> RgbImage {
    RgbImage::from_fn(size, size, |x, y| gradient_color(x, y, size))
}

/// Draw the white bubble, its pointer and the three dots on top of `canvas`
pub fn draw_bubble(canvas: &mut RgbImage) -> Result<()> {
    fill_shape(canvas, &BUBBLE, BUBBLE_COLOR).context("Failed to draw message bubble")?;
    fill_shape(canvas, &POINTER, BUBBLE_COLOR).context("Failed to draw bubble pointer")?;

    for (cx, cy) in DOT_CENTERS {
        fill_shape(canvas, &Circle::new(cx, cy, DOT_RADIUS), DOT_COLOR)
            .with_context(|| format!("Failed to draw dot at ({cx}, {cy})"))?;
    }

    Ok(())
}

/// Build the rounded-square opacity mask: 255 inside the silhouette, 0 outside
pub fn build_mask(size: u32) -> Result<GrayImage> {
    let mut mask = GrayImage::new(size, size);
    let extent = i64::from(size);
    let silhouette = RoundedRect::new(0, 0, extent, extent, SILHOUETTE_RADIUS);

    fill_shape(&mut mask, &silhouette, Luma([255])).context("Failed to draw icon silhouette")?;

    Ok(mask)
}

/// Paste `canvas` onto a transparent RGBA image and take its alpha from `mask`
///
/// Color outside the silhouette is kept; only its opacity drops to zero.
pub fn composite(canvas: RgbImage, mask: GrayImage) -> Result<RgbaImage> {
    if canvas.dimensions() != mask.dimensions() {
        anyhow::bail!(
            "Canvas is {:?} but mask is {:?}",
            canvas.dimensions(),
            mask.dimensions()
        );
    }

    let (width, height) = canvas.dimensions();
    let mut output = RgbaImage::new(width, height);
    let opaque = DynamicImage::ImageRgb8(canvas).to_rgba8();
    imageops::replace(&mut output, &opaque, 0, 0);

    for (pixel, alpha) in output.pixels_mut().zip(mask.pixels()) {
        pixel[3] = alpha[0];
    }

    Ok(output)
}

/// Run the whole drawing pipeline in memory
pub fn render_icon() -> Result<RgbaImage> {
    let mut canvas = fill_gradient(ICON_SIZE);
    draw_bubble(&mut canvas)?;
    let mask = build_mask(ICON_SIZE)?;
    composite(canvas, mask)
}

// Raw RGBA8 rows in, smallest deterministic PNG out
fn write_png<W: Write>(image_data: &[u8], w: W, width: u32, height: u32) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image_data, width, height, ColorType::Rgba8)?;
    Ok(())
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_png(image.as_raw(), &mut buf, image.width(), image.height())
        .context("Failed to encode PNG")?;
    Ok(buf)
}

/// Render the icon and write it to `path`
///
/// The file is only touched once the PNG bytes are complete.
pub fn generate_icon(path: &Path) -> Result<()> {
    println!("Generating {}...", path.display());

    let icon = render_icon()?;
    let png = encode_png(&icon)?;

    std::fs::write(path, png)
        .with_context(|| format!("Failed to write icon to {}", path.display()))?;

    println!("✓ Icon generated: {}", path.display());
    Ok(())
}
