//! Per-module shape plotting.
//!
//! [`plot_module`] is a pure function from one module's grid coordinates to
//! the fill primitives that paint it. The compositor owns the pixels; this
//! module owns the geometry.

use crate::matrix::ModuleMatrix;
use crate::style::ModuleStyle;

/// A fill primitive in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FillPrimitive {
    /// An axis-aligned filled rectangle.
    Rect { x: u32, y: u32, width: u32, height: u32 },
    /// A filled circle.
    Circle { cx: f64, cy: f64, radius: f64 },
}

/// Computes the primitives that paint the dark module at `(x, y)`.
///
/// - `Square`: one rectangle covering the full module cell.
/// - `Dot`: one circle inscribed in the cell.
/// - `Rounded`: the inscribed circle, plus a bridging rectangle toward the
///   right (and, symmetrically, downward) neighbor when that neighbor is
///   also dark. Each bridge runs from this cell's center to the neighbor's
///   center at full cell thickness, merging runs of adjacent modules into
///   continuous blobs while isolated modules stay circular.
///
/// Neighbor probes at the matrix boundary are safe: out-of-bounds modules
/// read as light. Only right/below neighbors are probed, so each adjacent
/// pair produces exactly one bridge.
pub fn plot_module(
    x: usize,
    y: usize,
    pixels_per_module: u32,
    style: ModuleStyle,
    matrix: &ModuleMatrix,
) -> Vec<FillPrimitive> {
    let p = pixels_per_module;
    let px = x as u32 * p;
    let py = y as u32 * p;

    match style {
        ModuleStyle::Square => vec![FillPrimitive::Rect {
            x: px,
            y: py,
            width: p,
            height: p,
        }],
        ModuleStyle::Dot => vec![inscribed_circle(px, py, p)],
        ModuleStyle::Rounded => {
            let mut primitives = vec![inscribed_circle(px, py, p)];
            if matrix.is_dark(x + 1, y) {
                primitives.push(FillPrimitive::Rect {
                    x: px + p / 2,
                    y: py,
                    width: p,
                    height: p,
                });
            }
            if matrix.is_dark(x, y + 1) {
                primitives.push(FillPrimitive::Rect {
                    x: px,
                    y: py + p / 2,
                    width: p,
                    height: p,
                });
            }
            primitives
        }
    }
}

/// The circle inscribed in the cell whose top-left pixel is `(px, py)`.
fn inscribed_circle(px: u32, py: u32, p: u32) -> FillPrimitive {
    let half = p as f64 / 2.0;
    FillPrimitive::Circle {
        cx: px as f64 + half,
        cy: py as f64 + half,
        radius: half,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3x3 matrix with dark modules listed by coordinate.
    fn matrix_with_dark(dark: &[(usize, usize)]) -> ModuleMatrix {
        let mut modules = vec![false; 9];
        for &(x, y) in dark {
            modules[y * 3 + x] = true;
        }
        ModuleMatrix::from_modules(3, modules)
    }

    #[test]
    fn square_covers_the_full_cell() {
        let matrix = matrix_with_dark(&[(1, 1)]);
        let primitives = plot_module(1, 1, 20, ModuleStyle::Square, &matrix);
        assert_eq!(
            primitives,
            vec![FillPrimitive::Rect { x: 20, y: 20, width: 20, height: 20 }]
        );
    }

    #[test]
    fn dot_is_one_inscribed_circle() {
        let matrix = matrix_with_dark(&[(1, 1)]);
        let primitives = plot_module(1, 1, 20, ModuleStyle::Dot, &matrix);
        assert_eq!(
            primitives,
            vec![FillPrimitive::Circle { cx: 30.0, cy: 30.0, radius: 10.0 }]
        );
    }

    #[test]
    fn isolated_rounded_module_equals_dot() {
        let matrix = matrix_with_dark(&[(1, 1)]);
        let rounded = plot_module(1, 1, 20, ModuleStyle::Rounded, &matrix);
        let dot = plot_module(1, 1, 20, ModuleStyle::Dot, &matrix);
        assert_eq!(rounded, dot);
    }

    #[test]
    fn rounded_bridges_toward_right_neighbor() {
        let matrix = matrix_with_dark(&[(0, 0), (1, 0)]);
        let primitives = plot_module(0, 0, 20, ModuleStyle::Rounded, &matrix);
        assert_eq!(primitives.len(), 2);
        // Bridge spans from this cell's center to the neighbor's center at
        // full cell height.
        assert_eq!(
            primitives[1],
            FillPrimitive::Rect { x: 10, y: 0, width: 20, height: 20 }
        );
    }

    #[test]
    fn rounded_bridges_toward_below_neighbor() {
        let matrix = matrix_with_dark(&[(0, 0), (0, 1)]);
        let primitives = plot_module(0, 0, 20, ModuleStyle::Rounded, &matrix);
        assert_eq!(primitives.len(), 2);
        assert_eq!(
            primitives[1],
            FillPrimitive::Rect { x: 0, y: 10, width: 20, height: 20 }
        );
    }

    #[test]
    fn rounded_never_probes_past_the_boundary() {
        // Dark module in the bottom-right corner; both neighbor probes fall
        // outside the grid and must read as light.
        let matrix = matrix_with_dark(&[(2, 2)]);
        let primitives = plot_module(2, 2, 20, ModuleStyle::Rounded, &matrix);
        assert_eq!(primitives.len(), 1);
    }

    #[test]
    fn rounded_ignores_light_neighbors() {
        let matrix = matrix_with_dark(&[(0, 0), (2, 0)]);
        let primitives = plot_module(0, 0, 20, ModuleStyle::Rounded, &matrix);
        assert_eq!(primitives.len(), 1);
    }
}
