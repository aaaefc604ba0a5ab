//! Canvas compositing.
//!
//! [`Canvas`] owns the output pixel buffer for exactly one render: it is
//! allocated filled with the background color, painted with one primitive
//! set per dark module, optionally overlaid with a logo, and finally
//! serialized to PNG bytes. Nothing here is shared across renders.

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};

use crate::error::RenderError;
use crate::matrix::ModuleMatrix;
use crate::shape::{plot_module, FillPrimitive};
use crate::style::{Rgb, StyleConfig};

// ============================================================================
// Canvas
// ============================================================================

/// A request-scoped RGBA pixel buffer.
pub struct Canvas {
    data: RgbaImage,
}

impl Canvas {
    /// Allocates a square canvas filled with `background`.
    pub fn new(side: u32, background: Rgb) -> Self {
        Self {
            data: RgbaImage::from_pixel(side, side, background.to_rgba()),
        }
    }

    /// Renders a module matrix onto a fresh canvas.
    ///
    /// The canvas side is `matrix.size() * pixels_per_module`. Cells are
    /// visited row-major; each cell's paint is independent, so the visiting
    /// order does not affect the result.
    pub fn render(matrix: &ModuleMatrix, config: &StyleConfig) -> Self {
        let side = matrix.size() as u32 * config.pixels_per_module;
        let mut canvas = Self::new(side, config.background_color);

        for y in 0..matrix.size() {
            for x in 0..matrix.size() {
                if !matrix.is_dark(x, y) {
                    continue;
                }
                for primitive in
                    plot_module(x, y, config.pixels_per_module, config.style, matrix)
                {
                    canvas.fill(&primitive, config.module_color);
                }
            }
        }

        canvas
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.data.width()
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.data.height()
    }

    /// Borrows the underlying pixel buffer.
    pub fn as_image(&self) -> &RgbaImage {
        &self.data
    }

    /// Fills a primitive with an opaque color, clipped to the canvas.
    pub fn fill(&mut self, primitive: &FillPrimitive, color: Rgb) {
        let pixel = color.to_rgba();
        match *primitive {
            FillPrimitive::Rect { x, y, width, height } => {
                self.fill_rect(x, y, width, height, pixel);
            }
            FillPrimitive::Circle { cx, cy, radius } => {
                self.fill_circle(cx, cy, radius, pixel);
            }
        }
    }

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, pixel: Rgba<u8>) {
        let x_end = (x.saturating_add(width)).min(self.data.width());
        let y_end = (y.saturating_add(height)).min(self.data.height());
        for py in y..y_end {
            for px in x..x_end {
                self.data.put_pixel(px, py, pixel);
            }
        }
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, pixel: Rgba<u8>) {
        let min_x = (cx - radius).floor().max(0.0) as u32;
        let min_y = (cy - radius).floor().max(0.0) as u32;
        let max_x = ((cx + radius).ceil().max(0.0) as u32).min(self.data.width());
        let max_y = ((cy + radius).ceil().max(0.0) as u32).min(self.data.height());
        let r_sq = radius * radius;

        for py in min_y..max_y {
            for px in min_x..max_x {
                // Coverage is decided at the pixel center.
                let dx = px as f64 + 0.5 - cx;
                let dy = py as f64 + 0.5 - cy;
                if dx * dx + dy * dy <= r_sq {
                    self.data.put_pixel(px, py, pixel);
                }
            }
        }
    }

    /// Composites a source image onto the canvas at the given position.
    ///
    /// Uses standard alpha blending (source over destination). Source pixels
    /// falling outside the canvas are skipped.
    pub fn composite_over(&mut self, src: &RgbaImage, x: i32, y: i32) {
        let dest_width = self.data.width() as i32;
        let dest_height = self.data.height() as i32;

        for sy in 0..src.height() {
            for sx in 0..src.width() {
                let dx = x + sx as i32;
                let dy = y + sy as i32;
                if dx < 0 || dy < 0 || dx >= dest_width || dy >= dest_height {
                    continue;
                }

                let src_pixel = src.get_pixel(sx, sy);
                let dst_pixel = self.data.get_pixel(dx as u32, dy as u32);
                let blended = alpha_blend(*src_pixel, *dst_pixel);
                self.data.put_pixel(dx as u32, dy as u32, blended);
            }
        }
    }

    /// Serializes the canvas as PNG bytes, consuming it.
    pub fn into_png(self) -> Result<Vec<u8>, RenderError> {
        let mut bytes = Vec::new();
        self.data
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| RenderError::Internal(format!("PNG encoding failed: {}", e)))?;
        Ok(bytes)
    }
}

/// Alpha blends two RGBA pixels (source over destination).
fn alpha_blend(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;

    let out_a = sa + da * (1.0 - sa);
    if out_a == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend = |s: u8, d: u8| -> u8 {
        let sf = s as f32 / 255.0;
        let df = d as f32 / 255.0;
        let out = (sf * sa + df * da * (1.0 - sa)) / out_a;
        (out * 255.0).round() as u8
    };

    Rgba([
        blend(src[0], dst[0]),
        blend(src[1], dst[1]),
        blend(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::ModuleStyle;

    fn config(style: ModuleStyle, pixels_per_module: u32) -> StyleConfig {
        StyleConfig {
            style,
            pixels_per_module,
            ..StyleConfig::default()
        }
    }

    fn matrix_with_dark(size: usize, dark: &[(usize, usize)]) -> ModuleMatrix {
        let mut modules = vec![false; size * size];
        for &(x, y) in dark {
            modules[y * size + x] = true;
        }
        ModuleMatrix::from_modules(size, modules)
    }

    #[test]
    fn canvas_side_is_modules_times_scale() {
        let matrix = matrix_with_dark(3, &[]);
        let canvas = Canvas::render(&matrix, &config(ModuleStyle::Square, 10));
        assert_eq!(canvas.width(), 30);
        assert_eq!(canvas.height(), 30);
    }

    #[test]
    fn background_fills_the_whole_canvas() {
        let matrix = matrix_with_dark(2, &[]);
        let cfg = StyleConfig {
            background_color: Rgb::new(10, 20, 30),
            ..config(ModuleStyle::Square, 5)
        };
        let canvas = Canvas::render(&matrix, &cfg);
        for pixel in canvas.as_image().pixels() {
            assert_eq!(pixel.0, [10, 20, 30, 255]);
        }
    }

    #[test]
    fn square_module_paints_its_full_cell() {
        let matrix = matrix_with_dark(2, &[(1, 0)]);
        let canvas = Canvas::render(&matrix, &config(ModuleStyle::Square, 10));
        let img = canvas.as_image();
        // Every pixel of cell (1, 0) takes the module color, and the cell
        // below stays background.
        for y in 0..10 {
            for x in 10..20 {
                assert_eq!(img.get_pixel(x, y).0, [0, 0, 0, 255]);
            }
        }
        assert_eq!(img.get_pixel(15, 15).0, [255, 255, 255, 255]);
    }

    #[test]
    fn dot_module_leaves_cell_corners_light() {
        let matrix = matrix_with_dark(1, &[(0, 0)]);
        let canvas = Canvas::render(&matrix, &config(ModuleStyle::Dot, 20));
        let img = canvas.as_image();
        assert_eq!(img.get_pixel(10, 10).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(19, 19).0, [255, 255, 255, 255]);
    }

    #[test]
    fn rounded_pair_covers_the_strip_between_centers() {
        let matrix = matrix_with_dark(2, &[(0, 0), (1, 0)]);
        let canvas = Canvas::render(&matrix, &config(ModuleStyle::Rounded, 20));
        let img = canvas.as_image();
        // Full row-height strip from the left cell's center to the right
        // cell's center is solid module color.
        for y in 0..20 {
            for x in 10..30 {
                assert_eq!(img.get_pixel(x, y).0, [0, 0, 0, 255], "gap at ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn fill_clips_to_canvas_bounds() {
        let mut canvas = Canvas::new(10, Rgb::WHITE);
        canvas.fill(
            &FillPrimitive::Rect { x: 8, y: 8, width: 10, height: 10 },
            Rgb::BLACK,
        );
        assert_eq!(canvas.as_image().get_pixel(9, 9).0, [0, 0, 0, 255]);
    }

    #[test]
    fn composite_over_blends_and_clips() {
        let mut canvas = Canvas::new(10, Rgb::new(255, 0, 0));
        let src = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255]));
        canvas.composite_over(&src, 8, 8);
        assert_eq!(canvas.as_image().get_pixel(9, 9).0, [0, 0, 255, 255]);
        assert_eq!(canvas.as_image().get_pixel(0, 0).0, [255, 0, 0, 255]);

        let translucent = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 255, 128]));
        canvas.composite_over(&translucent, 0, 0);
        let blended = canvas.as_image().get_pixel(0, 0);
        assert!(blended[0] > 0 && blended[2] > 0, "should mix red and blue");
    }

    #[test]
    fn png_bytes_decode_to_canvas_dimensions() {
        let matrix = matrix_with_dark(3, &[(0, 0)]);
        let canvas = Canvas::render(&matrix, &config(ModuleStyle::Square, 7));
        let png = canvas.into_png().unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.width(), 21);
        assert_eq!(decoded.height(), 21);
    }
}
