//! quadro-renderer: Styled QR code rasterization with logo compositing
//!
//! This crate turns a QR code's boolean module matrix into a styled PNG
//! image: square, rounded, or dot-shaped modules in caller-chosen colors,
//! with an optional logo composited at the center over an opaque white
//! backdrop. Symbol encoding is delegated to the `qrcode` crate and pixel
//! work to the `image` crate; the shape plotting, compositing, logo
//! placement, and input validation in between live here.
//!
//! # Example
//!
//! ```
//! use quadro_renderer::{QrRenderer, StyleSettings};
//!
//! let renderer = QrRenderer::new();
//!
//! // Plain black-on-white PNG.
//! let png = renderer.render_plain("https://example.com").unwrap();
//! assert_eq!(&png[1..4], b"PNG");
//!
//! // Styled render from boundary-layer settings.
//! let settings = StyleSettings::new()
//!     .with_style("rounded")
//!     .with_module_color("1a73e8")
//!     .with_pixels_per_module(12);
//! let styled = renderer.render_styled("https://example.com", &settings, None).unwrap();
//! assert!(!styled.is_empty());
//! ```
//!
//! # Data URIs
//!
//! For callers that embed the image in text (HTML, JSON responses),
//! [`QrRenderer::render_base64`] wraps the PNG in a
//! `data:image/png;base64,` URI:
//!
//! ```
//! use quadro_renderer::QrRenderer;
//!
//! let (text, uri) = QrRenderer::new().render_base64("hello").unwrap();
//! assert_eq!(text, "hello");
//! assert!(uri.starts_with("data:image/png;base64,"));
//! ```
//!
//! # Logos
//!
//! A logo occludes part of the symbol, so its presence automatically
//! promotes the error-correction level from `Q` to `H`. Two sizing presets
//! exist ([`LogoSizingPolicy`]); the plain entry points use `Classic`, the
//! styled one uses `Proportional`. SVG logo sources are available behind
//! the `svg-logo` feature.

mod canvas;
mod error;
mod logo;
mod matrix;
mod renderer;
mod shape;
mod style;

pub use canvas::Canvas;
pub use error::RenderError;
pub use logo::{overlay_logo, LogoSizingPolicy, LogoSource};
pub use matrix::ModuleMatrix;
pub use qrcode::EcLevel;
pub use renderer::QrRenderer;
pub use shape::{plot_module, FillPrimitive};
pub use style::{
    effective_ec_level, ModuleStyle, Rgb, StyleConfig, StyleSettings, DEFAULT_PIXELS_PER_MODULE,
};
