//! Logo decoding, sizing policy, and overlay compositing.
//!
//! The logo is always the topmost layer: an opaque white backdrop patch is
//! painted over the finished module grid first, then the resized logo is
//! composited onto it. The backdrop guarantees contrast against any
//! background color; scan robustness relies on the higher error-correction
//! tier selected whenever a logo is present.

use image::imageops::FilterType;
use image::RgbaImage;

use crate::canvas::Canvas;
use crate::error::RenderError;
use crate::shape::FillPrimitive;
use crate::style::Rgb;

// ============================================================================
// LogoSizingPolicy
// ============================================================================

/// Logo target size and backdrop padding, relative to the canvas.
///
/// The two presets reproduce the two historical call paths and are kept
/// distinct on purpose; unifying them would silently change output for
/// existing callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoSizingPolicy {
    /// Plain path: logo is one fifth of the canvas width, backdrop padding
    /// is a fixed 10 pixels.
    Classic,
    /// Styled path: logo is one quarter of the canvas width, backdrop
    /// padding is one tenth of the logo size.
    Proportional,
}

impl LogoSizingPolicy {
    /// Edge length of the (square) resized logo for a canvas of `side` px.
    pub fn target_size(self, side: u32) -> u32 {
        let size = match self {
            Self::Classic => side / 5,
            Self::Proportional => side / 4,
        };
        size.max(1)
    }

    /// Backdrop padding around the logo, per side.
    pub fn padding(self, logo_size: u32) -> u32 {
        match self {
            Self::Classic => 10,
            Self::Proportional => logo_size / 10,
        }
    }
}

// ============================================================================
// LogoSource
// ============================================================================

/// A caller-supplied logo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoSource {
    /// Raw bytes of any image container the `image` crate can decode.
    Bytes(Vec<u8>),

    /// Raw SVG markup, rendered at overlay time.
    ///
    /// Only available with the `svg-logo` feature enabled.
    #[cfg(feature = "svg-logo")]
    Svg(String),
}

impl LogoSource {
    /// Creates a source from raw image bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(bytes.into())
    }

    /// Creates a source from raw SVG markup.
    ///
    /// Only available with the `svg-logo` feature enabled.
    #[cfg(feature = "svg-logo")]
    pub fn from_svg(svg: impl Into<String>) -> Self {
        Self::Svg(svg.into())
    }

    /// Decodes the source into an RGBA image of exactly
    /// `target_size x target_size` pixels, distorting aspect if needed.
    ///
    /// Undecodable input is a client error ([`RenderError::InvalidLogo`]).
    pub(crate) fn decode(&self, target_size: u32) -> Result<RgbaImage, RenderError> {
        match self {
            Self::Bytes(bytes) => {
                let img = image::load_from_memory(bytes)
                    .map_err(|e| RenderError::InvalidLogo(e.to_string()))?;
                Ok(img
                    .resize_exact(target_size, target_size, FilterType::Lanczos3)
                    .to_rgba8())
            }
            #[cfg(feature = "svg-logo")]
            Self::Svg(svg) => render_svg_logo(svg, target_size),
        }
    }
}

/// Renders SVG markup to a square RGBA image, stretching to fill.
#[cfg(feature = "svg-logo")]
fn render_svg_logo(svg: &str, size: u32) -> Result<RgbaImage, RenderError> {
    use resvg::tiny_skia::{Pixmap, Transform};
    use resvg::usvg::{Options, Tree};

    let tree = Tree::from_str(svg, &Options::default())
        .map_err(|e| RenderError::InvalidLogo(e.to_string()))?;

    let svg_size = tree.size();
    let scale_x = size as f32 / svg_size.width();
    let scale_y = size as f32 / svg_size.height();

    let mut pixmap = Pixmap::new(size, size)
        .ok_or_else(|| RenderError::Internal("could not allocate SVG pixmap".to_string()))?;
    resvg::render(&tree, Transform::from_scale(scale_x, scale_y), &mut pixmap.as_mut());

    Ok(pixmap_to_rgba_image(&pixmap))
}

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
#[cfg(feature = "svg-logo")]
fn pixmap_to_rgba_image(pixmap: &resvg::tiny_skia::Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for y in 0..pixmap.height() {
        for x in 0..pixmap.width() {
            if let Some(pixel) = pixmap.pixel(x, y) {
                // tiny_skia stores premultiplied alpha.
                let (r, g, b, a) =
                    unpremultiply(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha());
                img.put_pixel(x, y, image::Rgba([r, g, b, a]));
            }
        }
    }
    img
}

/// Unpremultiplies a premultiplied alpha pixel.
#[cfg(feature = "svg-logo")]
fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}

// ============================================================================
// Overlay
// ============================================================================

/// Composites a logo at the canvas center.
///
/// Layering order: the white backdrop patch (logo bounds expanded by the
/// policy padding) is painted first, the logo second, so the logo always
/// sits on top and the backdrop ring stays visible around it.
pub fn overlay_logo(
    canvas: &mut Canvas,
    source: &LogoSource,
    policy: LogoSizingPolicy,
) -> Result<(), RenderError> {
    let side = canvas.width();
    let target_size = policy.target_size(side);
    let logo = source.decode(target_size)?;

    let x = side.saturating_sub(target_size) / 2;
    let y = canvas.height().saturating_sub(target_size) / 2;
    let padding = policy.padding(target_size);

    canvas.fill(
        &FillPrimitive::Rect {
            x: x.saturating_sub(padding),
            y: y.saturating_sub(padding),
            width: target_size + 2 * padding,
            height: target_size + 2 * padding,
        },
        Rgb::WHITE,
    );
    canvas.composite_over(&logo, x as i32, y as i32);

    log::debug!(
        "overlaid {}x{} logo at ({}, {}) with {} px backdrop padding",
        target_size,
        target_size,
        x,
        y,
        padding
    );
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
