//! Rendering entry points.
//!
//! [`QrRenderer`] is the engine facade. Every call runs the same
//! validate/encode/composite/overlay/serialize pipeline over request-local
//! state only, so a single renderer value can serve concurrent callers
//! without locks.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::canvas::Canvas;
use crate::error::RenderError;
use crate::logo::{overlay_logo, LogoSizingPolicy, LogoSource};
use crate::matrix::ModuleMatrix;
use crate::style::{effective_ec_level, StyleConfig, StyleSettings};

/// Styled QR rendering engine.
///
/// Holds the default [`StyleConfig`] used by the plain entry points;
/// [`render_styled`](Self::render_styled) validates caller-supplied settings
/// instead. The renderer itself is stateless across calls: each render owns
/// a fresh canvas and discards it after producing the PNG bytes.
///
/// # Example
///
/// ```
/// use quadro_renderer::QrRenderer;
///
/// let renderer = QrRenderer::new();
/// let png = renderer.render_plain("https://example.com").unwrap();
/// assert_eq!(&png[1..4], b"PNG");
/// ```
#[derive(Debug, Clone, Default)]
pub struct QrRenderer {
    config: StyleConfig,
}

impl QrRenderer {
    /// Creates a renderer with the default style configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a renderer with a custom default configuration.
    pub fn with_config(config: StyleConfig) -> Self {
        Self { config }
    }

    /// Returns the renderer's default configuration.
    pub fn config(&self) -> &StyleConfig {
        &self.config
    }

    /// Renders `text` with the default style and no logo.
    pub fn render_plain(&self, text: &str) -> Result<Vec<u8>, RenderError> {
        self.render(text, &self.config, None, LogoSizingPolicy::Classic)
    }

    /// Renders `text` with the default style and wraps the PNG in a
    /// `data:image/png;base64,` URI.
    ///
    /// Returns the original text alongside the data URI.
    pub fn render_base64(&self, text: &str) -> Result<(String, String), RenderError> {
        let png = self.render_plain(text)?;
        let uri = format!("data:image/png;base64,{}", STANDARD.encode(&png));
        Ok((text.to_string(), uri))
    }

    /// Renders `text` with the default style, compositing `logo` at the
    /// center when present.
    ///
    /// Uses the [`Classic`](LogoSizingPolicy::Classic) sizing preset.
    pub fn render_with_logo(
        &self,
        text: &str,
        logo: Option<&LogoSource>,
    ) -> Result<Vec<u8>, RenderError> {
        self.render(text, &self.config, logo, LogoSizingPolicy::Classic)
    }

    /// Renders `text` with caller-supplied settings, compositing `logo` at
    /// the center when present.
    ///
    /// Settings are validated before any rendering work begins. Uses the
    /// [`Proportional`](LogoSizingPolicy::Proportional) sizing preset.
    pub fn render_styled(
        &self,
        text: &str,
        settings: &StyleSettings,
        logo: Option<&LogoSource>,
    ) -> Result<Vec<u8>, RenderError> {
        let config = settings.resolve()?;
        self.render(text, &config, logo, LogoSizingPolicy::Proportional)
    }

    /// Shared pipeline behind every entry point.
    ///
    /// A logo promotes the error-correction level to `H` before encoding,
    /// since the overlay will occlude part of the symbol.
    fn render(
        &self,
        text: &str,
        config: &StyleConfig,
        logo: Option<&LogoSource>,
        policy: LogoSizingPolicy,
    ) -> Result<Vec<u8>, RenderError> {
        let ec_level = effective_ec_level(logo.is_some());
        let matrix = ModuleMatrix::encode(text, ec_level)?;

        let mut canvas = Canvas::render(&matrix, config);
        if let Some(source) = logo {
            overlay_logo(&mut canvas, source, policy)?;
        }

        log::debug!(
            "rendered {} modules at {} px/module into a {}x{} canvas",
            matrix.size(),
            config.pixels_per_module,
            canvas.width(),
            canvas.height()
        );
        canvas.into_png()
    }
}

// ============================================================================
// Tests
// ============================================================================
