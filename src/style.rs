//! Style configuration and validation.
//!
//! Raw caller inputs (style names, hex color strings) are validated here,
//! at the boundary, so the plotter and compositor only ever see well-formed
//! values. Unrecognized style names resolve to [`ModuleStyle::Square`]
//! (a documented default, not an error), while malformed colors are
//! rejected with [`RenderError::InvalidColor`].

use image::Rgba;
use qrcode::EcLevel;
use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// Default edge length of one module in pixels.
pub const DEFAULT_PIXELS_PER_MODULE: u32 = 20;

// ============================================================================
// Rgb
// ============================================================================

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };
    pub const WHITE: Self = Self { r: 255, g: 255, b: 255 };

    /// Creates a color from its channel values.
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a color from six hex digits, with an optional `#` prefix.
    ///
    /// Anything else (wrong length, non-hex characters) is rejected with
    /// [`RenderError::InvalidColor`]; there is no silent fallback for colors.
    ///
    /// # Example
    ///
    /// ```
    /// use quadro_renderer::Rgb;
    ///
    /// assert_eq!(Rgb::parse_hex("#ff8000").unwrap(), Rgb::new(255, 128, 0));
    /// assert!(Rgb::parse_hex("notacolor").is_err());
    /// ```
    pub fn parse_hex(input: &str) -> Result<Self, RenderError> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(RenderError::InvalidColor(input.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| RenderError::InvalidColor(input.to_string()))
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Returns the color as an opaque RGBA pixel.
    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }
}

// ============================================================================
// ModuleStyle
// ============================================================================

/// Shape used to paint each dark module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModuleStyle {
    /// One filled rectangle covering the full module cell.
    #[default]
    Square,
    /// Inscribed circles, merged into blobs across adjacent dark modules.
    Rounded,
    /// One filled circle inscribed in the module cell.
    Dot,
}

impl ModuleStyle {
    /// Parses a style name, case-insensitively.
    ///
    /// Unrecognized names resolve to [`ModuleStyle::Square`]. This is the
    /// documented default behavior, not an error.
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "square" => Self::Square,
            "rounded" => Self::Rounded,
            "dot" => Self::Dot,
            other => {
                log::debug!("unrecognized module style {:?}, using square", other);
                Self::Square
            }
        }
    }
}

// ============================================================================
// StyleConfig
// ============================================================================

/// Validated rendering configuration, constructed once per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleConfig {
    /// Shape used for dark modules.
    pub style: ModuleStyle,
    /// Fill color for dark modules.
    pub module_color: Rgb,
    /// Canvas background color.
    pub background_color: Rgb,
    /// Edge length of one module in pixels.
    pub pixels_per_module: u32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            style: ModuleStyle::Square,
            module_color: Rgb::BLACK,
            background_color: Rgb::WHITE,
            pixels_per_module: DEFAULT_PIXELS_PER_MODULE,
        }
    }
}

/// Selects the error-correction strength for a render.
///
/// A logo occludes part of the symbol, so its presence trades data capacity
/// for damage tolerance: `H` with a logo, `Q` without.
pub fn effective_ec_level(has_logo: bool) -> EcLevel {
    if has_logo { EcLevel::H } else { EcLevel::Q }
}

// ============================================================================
// StyleSettings
// ============================================================================

/// Raw, serializable style settings as received from a boundary layer.
///
/// All fields are optional; missing fields fall back to the
/// [`StyleConfig::default`] values when resolved. Color and style fields are
/// kept as strings so that validation happens in exactly one place,
/// [`StyleSettings::resolve`].
///
/// # JSON Format
///
/// ```json
/// {
///   "moduleStyle": "rounded",
///   "moduleColor": "1a73e8",
///   "backgroundColor": "ffffff",
///   "pixelsPerModule": 20
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StyleSettings {
    /// Style name; matched case-insensitively against `square`, `rounded`,
    /// `dot`. Unrecognized names fall back to `square`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_style: Option<String>,

    /// Dark-module color as six hex digits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_color: Option<String>,

    /// Background color as six hex digits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    /// Edge length of one module in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixels_per_module: Option<u32>,
}

impl StyleSettings {
    /// Creates empty settings; everything resolves to defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the style name.
    pub fn with_style(mut self, name: impl Into<String>) -> Self {
        self.module_style = Some(name.into());
        self
    }

    /// Sets the dark-module color.
    pub fn with_module_color(mut self, hex: impl Into<String>) -> Self {
        self.module_color = Some(hex.into());
        self
    }

    /// Sets the background color.
    pub fn with_background_color(mut self, hex: impl Into<String>) -> Self {
        self.background_color = Some(hex.into());
        self
    }

    /// Sets the pixels-per-module scale.
    pub fn with_pixels_per_module(mut self, pixels: u32) -> Self {
        self.pixels_per_module = Some(pixels);
        self
    }

    /// Validates the raw settings into a [`StyleConfig`].
    ///
    /// Malformed colors are rejected; a missing or unrecognized style name
    /// resolves to `Square`; a zero scale is clamped to 1.
    pub fn resolve(&self) -> Result<StyleConfig, RenderError> {
        let defaults = StyleConfig::default();

        let module_color = match &self.module_color {
            Some(hex) => Rgb::parse_hex(hex)?,
            None => defaults.module_color,
        };
        let background_color = match &self.background_color {
            Some(hex) => Rgb::parse_hex(hex)?,
            None => defaults.background_color,
        };

        Ok(StyleConfig {
            style: self
                .module_style
                .as_deref()
                .map(ModuleStyle::parse)
                .unwrap_or(defaults.style),
            module_color,
            background_color,
            pixels_per_module: self
                .pixels_per_module
                .unwrap_or(defaults.pixels_per_module)
                .max(1),
        })
    }

    /// Serializes the settings to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes settings from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// Tests
// ============================================================================
