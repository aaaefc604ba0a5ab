//! Error taxonomy for the rendering engine.
//!
//! Validation failures (`EmptyInput`, `InvalidColor`, `InvalidLogo`) are
//! detected before any rasterization work begins and map to client errors at
//! the boundary. `Encoding` and `Internal` cover collaborator and
//! rasterization failures and map to server errors.

use thiserror::Error;

/// Errors produced while validating inputs or rendering a QR code.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The input text was empty. Raised before the QR encoder is invoked.
    #[error("input text is empty")]
    EmptyInput,

    /// A color string was not six hex digits (with an optional `#` prefix).
    #[error("invalid color {0:?}: expected six hex digits")]
    InvalidColor(String),

    /// The supplied logo bytes did not decode as an image.
    #[error("logo does not decode as an image: {0}")]
    InvalidLogo(String),

    /// The external QR encoder rejected the input.
    #[error("QR encoding failed: {0}")]
    Encoding(#[from] qrcode::types::QrError),

    /// Unexpected failure during rasterization or PNG encoding.
    #[error("render failed: {0}")]
    Internal(String),
}

impl RenderError {
    /// Returns true for errors caused by the caller's input (400-class at an
    /// HTTP boundary) rather than by the engine itself.
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::EmptyInput | Self::InvalidColor(_) | Self::InvalidLogo(_) => true,
            Self::Encoding(_) | Self::Internal(_) => false,
        }
    }
}
