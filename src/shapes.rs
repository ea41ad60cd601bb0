//! Filled shape primitives for the icon renderer
//!
//! Shapes are described in integer pixel coordinates and drawn with hard
//! edges: every covered pixel is overwritten with the fill value, nothing is
//! blended. The same primitives draw into the RGB canvas and the Luma mask.

use anyhow::Result;
use image::{ImageBuffer, Pixel};

/// Something that can be filled into an image buffer
pub trait Shape {
    /// Inclusive bounding box as `(left, top, right, bottom)`
    fn bounds(&self) -> (i64, i64, i64, i64);

    /// Whether the pixel at `(x, y)` is covered by the shape
    fn contains(&self, x: i64, y: i64) -> bool;

    /// Reject geometry that cannot be drawn
    fn validate(&self) -> Result<()>;
}

/// Axis-aligned rectangle with circular corners
///
/// Bounds are inclusive on both ends. A pixel in a corner region is covered
/// when it lies within `radius` of that corner's arc center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundedRect {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
    pub radius: i64,
}

impl RoundedRect {
    pub const fn new(left: i64, top: i64, right: i64, bottom: i64, radius: i64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
            radius,
        }
    }
}

impl Shape for RoundedRect {
    fn bounds(&self) -> (i64, i64, i64, i64) {
        (self.left, self.top, self.right, self.bottom)
    }

    fn contains(&self, x: i64, y: i64) -> bool {
        if x < self.left || x > self.right || y < self.top || y > self.bottom {
            return false;
        }

        // Nearest point on the inner rectangle spanned by the arc centers
        let cx = x.max(self.left + self.radius).min(self.right - self.radius);
        let cy = y.max(self.top + self.radius).min(self.bottom - self.radius);
        let dx = x - cx;
        let dy = y - cy;

        dx * dx + dy * dy <= self.radius * self.radius
    }

    fn validate(&self) -> Result<()> {
        if self.right < self.left || self.bottom < self.top {
            anyhow::bail!(
                "Rounded rectangle has inverted bounds: ({}, {})-({}, {})",
                self.left,
                self.top,
                self.right,
                self.bottom
            );
        }
        if self.radius < 0 {
            anyhow::bail!("Rounded rectangle radius must not be negative: {}", self.radius);
        }

        let width = self.right - self.left;
        let height = self.bottom - self.top;
        if self.radius * 2 > width || self.radius * 2 > height {
            anyhow::bail!(
                "Corner radius {} does not fit a {}x{} rectangle",
                self.radius,
                width,
                height
            );
        }

        Ok(())
    }
}

/// Filled triangle, edges included
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub vertices: [(i64, i64); 3],
}

impl Triangle {
    pub const fn new(a: (i64, i64), b: (i64, i64), c: (i64, i64)) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }
}

// Twice the signed area of (p, a, b); the sign tells which side of a->b p is on
fn edge_sign(p: (i64, i64), a: (i64, i64), b: (i64, i64)) -> i64 {
    (p.0 - b.0) * (a.1 - b.1) - (a.0 - b.0) * (p.1 - b.1)
}

impl Shape for Triangle {
    fn bounds(&self) -> (i64, i64, i64, i64) {
        let xs = self.vertices.map(|(x, _)| x);
        let ys = self.vertices.map(|(_, y)| y);
        (
            xs.iter().copied().min().unwrap_or(0),
            ys.iter().copied().min().unwrap_or(0),
            xs.iter().copied().max().unwrap_or(0),
            ys.iter().copied().max().unwrap_or(0),
        )
    }

    fn contains(&self, x: i64, y: i64) -> bool {
        let [a, b, c] = self.vertices;
        let p = (x, y);
        let d1 = edge_sign(p, a, b);
        let d2 = edge_sign(p, b, c);
        let d3 = edge_sign(p, c, a);

        let has_neg = d1 < 0 || d2 < 0 || d3 < 0;
        let has_pos = d1 > 0 || d2 > 0 || d3 > 0;

        !(has_neg && has_pos)
    }

    fn validate(&self) -> Result<()> {
        let [a, b, c] = self.vertices;
        if edge_sign(c, a, b) == 0 {
            anyhow::bail!("Triangle is degenerate: {:?}", self.vertices);
        }
        Ok(())
    }
}

/// Filled circle
///
/// The disc spans the inclusive box `cx - radius ..= cx + radius`, so its
/// edge sits half a pixel beyond `radius`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Circle {
    pub cx: i64,
    pub cy: i64,
    pub radius: i64,
}

impl Circle {
    pub const fn new(cx: i64, cy: i64, radius: i64) -> Self {
        Self { cx, cy, radius }
    }
}

impl Shape for Circle {
    fn bounds(&self) -> (i64, i64, i64, i64) {
        (
            self.cx - self.radius,
            self.cy - self.radius,
            self.cx + self.radius,
            self.cy + self.radius,
        )
    }

    fn contains(&self, x: i64, y: i64) -> bool {
        let dx = 2 * (x - self.cx);
        let dy = 2 * (y - self.cy);
        let diameter = 2 * self.radius + 1;
        dx * dx + dy * dy <= diameter * diameter
    }

    fn validate(&self) -> Result<()> {
        if self.radius < 0 {
            anyhow::bail!("Circle radius must not be negative: {}", self.radius);
        }
        Ok(())
    }
}

/// Validate `shape` and overwrite every covered pixel of `img` with `fill`
///
/// Parts of the shape outside the image are clipped.
pub fn fill_shape<S, P>(
    img: &mut ImageBuffer<P, Vec<P::Subpixel>>,
    shape: &S,
    fill: P,
) -> Result<()>
where
    S: Shape,
    P: Pixel,
{
    shape.validate()?;

    let (left, top, right, bottom) = shape.bounds();
    let max_x = i64::from(img.width()) - 1;
    let max_y = i64::from(img.height()) - 1;

    let x_start = left.max(0);
    let x_end = right.min(max_x);
    let y_start = top.max(0);
    let y_end = bottom.min(max_y);

    for y in y_start..=y_end {
        for x in x_start..=x_end {
            if shape.contains(x, y) {
                img.put_pixel(x as u32, y as u32, fill);
            }
        }
    }

    Ok(())
}
