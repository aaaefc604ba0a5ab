//! Module matrix produced by the external QR encoder.
//!
//! The engine never encodes QR symbols itself; it consumes the boolean
//! module grid that the `qrcode` collaborator produces and treats the grid
//! side length as opaque.

use qrcode::{Color, EcLevel, QrCode};

use crate::error::RenderError;

/// A square boolean module grid; `true` marks a dark module.
///
/// Immutable once constructed. Out-of-bounds probes report a light module,
/// so neighbor lookups at the symbol boundary are always safe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    size: usize,
    modules: Vec<bool>,
}

impl ModuleMatrix {
    /// Encodes `text` into a module matrix at the given error-correction
    /// level.
    ///
    /// Empty input is rejected with [`RenderError::EmptyInput`] before the
    /// encoder is invoked.
    pub fn encode(text: &str, ec_level: EcLevel) -> Result<Self, RenderError> {
        if text.is_empty() {
            return Err(RenderError::EmptyInput);
        }
        let code = QrCode::with_error_correction_level(text, ec_level)?;
        Ok(Self::from_code(&code))
    }

    /// Builds a matrix from a precomputed row-major module list.
    ///
    /// # Panics
    ///
    /// Panics if `modules.len() != size * size`.
    pub fn from_modules(size: usize, modules: Vec<bool>) -> Self {
        assert_eq!(
            modules.len(),
            size * size,
            "module list must contain size * size entries"
        );
        Self { size, modules }
    }

    fn from_code(code: &QrCode) -> Self {
        let size = code.width();
        let modules = code
            .to_colors()
            .iter()
            .map(|color| *color == Color::Dark)
            .collect();
        Self { size, modules }
    }

    /// Returns the grid side length in modules.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Reports whether the module at `(x, y)` is dark.
    ///
    /// Coordinates outside the grid are light.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        if x >= self.size || y >= self.size {
            return false;
        }
        self.modules[y * self.size + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_short_text_yields_version_one() {
        // "HELLO" fits QR version 1 at level Q: a 21-module grid.
        let matrix = ModuleMatrix::encode("HELLO", EcLevel::Q).unwrap();
        assert_eq!(matrix.size(), 21);
    }

    #[test]
    fn encode_rejects_empty_text() {
        let err = ModuleMatrix::encode("", EcLevel::Q).unwrap_err();
        assert!(matches!(err, RenderError::EmptyInput));
    }

    #[test]
    fn finder_pattern_corner_is_dark() {
        // Every QR symbol has a dark finder-pattern module at the origin.
        let matrix = ModuleMatrix::encode("HELLO", EcLevel::Q).unwrap();
        assert!(matrix.is_dark(0, 0));
    }

    #[test]
    fn out_of_bounds_probes_are_light() {
        let matrix = ModuleMatrix::from_modules(2, vec![true; 4]);
        assert!(matrix.is_dark(1, 1));
        assert!(!matrix.is_dark(2, 0));
        assert!(!matrix.is_dark(0, 2));
    }
}
