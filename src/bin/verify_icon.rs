use anyhow::{Context, Result};
use chat_icon_gen::icon_gen::{DEFAULT_OUTPUT, DOT_CENTERS, DOT_COLOR, ICON_SIZE};
use image::io::Reader as ImageReader;

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());

    let img = ImageReader::open(&path)
        .with_context(|| format!("Failed to open {path}"))?
        .decode()
        .with_context(|| format!("Failed to decode {path}"))?;

    let rgba_img = img.to_rgba8();
    let width = img.width();
    let height = img.height();

    println!("Checking icon: {}", path);
    println!("Image dimensions: {}x{} ({:?})", width, height, img.color());

    if width != ICON_SIZE || height != ICON_SIZE {
        anyhow::bail!("Expected a {ICON_SIZE}x{ICON_SIZE} icon, found {width}x{height}");
    }

    let mut problems = 0;

    // Corners sit outside the rounded silhouette
    let last = ICON_SIZE - 1;
    println!("\nSilhouette corners:");
    for (x, y) in [(0, 0), (last, 0), (0, last), (last, last)] {
        let p = rgba_img.get_pixel(x, y);
        println!("  ({x}, {y}) alpha = {}", p[3]);
        if p[3] != 0 {
            problems += 1;
        }
    }

    println!("\nDots:");
    for (cx, cy) in DOT_CENTERS {
        let p = rgba_img.get_pixel(cx as u32, cy as u32);
        println!("  ({cx}, {cy}) RGBA: [{}, {}, {}, {}]", p[0], p[1], p[2], p[3]);
        if p.0[..3] != DOT_COLOR.0[..] || p[3] != 255 {
            problems += 1;
        }
    }

    // Between the dots and the bubble's bottom edge
    let body = rgba_img.get_pixel(256, 300);
    println!("\nBubble body (256, 300) RGBA: [{}, {}, {}, {}]", body[0], body[1], body[2], body[3]);
    if body.0 != [255, 255, 255, 255] {
        problems += 1;
    }

    if problems > 0 {
        anyhow::bail!("{problems} sample(s) did not match the expected icon");
    }

    println!("\n✓ Icon looks right!");
    Ok(())
}
