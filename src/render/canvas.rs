//! Color-id pixel grid and the segment rasterizer that draws into it.

use crate::core::series::Point;

/// A `width × height` grid of color ids, 0 meaning background.
///
/// Pixel coordinates are x to the right, y downward, matching the glyph
/// encoder's block order. Out-of-bounds reads return background and
/// out-of-bounds writes are dropped.
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Canvas {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x]
        } else {
            0
        }
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: u8) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    /// Draw a straight segment by stepping one pixel at a time along the
    /// major axis (whichever of |dx|, |dy| is larger) and interpolating the
    /// minor coordinate. Endpoints that round to the same major coordinate
    /// draw nothing. Minor-axis misses skip single pixels; leaving the
    /// canvas past the far edge on the major axis ends the segment. Both
    /// endpoints must be finite or nothing is drawn.
    pub fn draw_segment(&mut self, a: Point, b: Point, color: u8) {
        let (mut x0, mut y0) = a;
        let (mut x1, mut y1) = b;
        if !(x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite()) {
            return;
        }
        let mut dx = x1 - x0;
        let mut dy = y1 - y0;

        if dx.abs() > dy.abs() {
            if x1 < x0 {
                std::mem::swap(&mut x0, &mut x1);
                std::mem::swap(&mut y0, &mut y1);
                dy = -dy;
            }
            let x0r = round_px(x0);
            let x1r = round_px(x1);
            let steps = x1r - x0r;
            if steps == 0 {
                return;
            }
            // skip straight to the first on-canvas column; the far edge
            // bounds the walk, replacing the per-pixel exit check
            let first = (-x0r).max(0);
            let last = (self.width as i64 - 1 - x0r).min(steps);
            for step in first..=last {
                let t = step as f64 / steps as f64;
                let x = x0r + step;
                let y = round_px(y0 + t * dy);
                if y < 0 || y >= self.height as i64 {
                    continue;
                }
                self.pixels[y as usize * self.width + x as usize] = color;
            }
        } else {
            if y1 < y0 {
                std::mem::swap(&mut x0, &mut x1);
                std::mem::swap(&mut y0, &mut y1);
                dx = -dx;
            }
            let y0r = round_px(y0);
            let y1r = round_px(y1);
            let steps = y1r - y0r;
            if steps == 0 {
                return;
            }
            let first = (-y0r).max(0);
            let last = (self.height as i64 - 1 - y0r).min(steps);
            for step in first..=last {
                let t = step as f64 / steps as f64;
                let y = y0r + step;
                let x = round_px(x0 + t * dx);
                if x < 0 || x >= self.width as i64 {
                    continue;
                }
                self.pixels[y as usize * self.width + x as usize] = color;
            }
        }
    }

    /// Connect consecutive points with segments. Fewer than two points
    /// draw nothing.
    pub fn draw_polyline(&mut self, points: &[Point], color: u8) {
        for pair in points.windows(2) {
            self.draw_segment(pair[0], pair[1], color);
        }
    }
}

// far beyond any canvas, small enough that step deltas cannot overflow
const PX_CLAMP: f64 = (1_i64 << 40) as f64;

#[inline]
fn round_px(v: f64) -> i64 {
    v.round().clamp(-PX_CLAMP, PX_CLAMP) as i64
}
