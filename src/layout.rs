//! Turning a bare module grid into a [`QrCodeData`].
//!
//! The encoder only knows modules; the writer needs page geometry. [`Layout`]
//! spreads `block_count` modules over a requested symbol size, optionally
//! rounding the module edge to a whole unit, and surrounds the result with a
//! margin.
//!
//! ```rust
//! use qirust_pdf::layout::{matrix_from_fn, Layout, RoundBlockSizeMode};
//!
//! let matrix = matrix_from_fn(21, |x, y| (x + y) % 2 == 0);
//! let data = Layout::new(100.0, 10.0)
//!     .round_block_size(RoundBlockSizeMode::Margin)
//!     .apply(matrix)
//!     .unwrap();
//!
//! assert_eq!(data.block_size, 4.0);
//! assert_eq!(data.outer_width, 120.0);
//! assert_eq!(data.margin_left, 18.0);
//! ```

use crate::data::{Color, QrCodeData};
use crate::error::{Error, Result};

/// How the module edge length is rounded to a whole unit.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum RoundBlockSizeMode {
    /// Round down and give the leftover to the margin.
    #[default]
    Margin,
    /// Round up and grow the symbol to fit.
    Enlarge,
    /// Round down and shrink the symbol to fit.
    Shrink,
    /// Keep fractional module sizes.
    None,
}

/// Symbol size and margin, in the writer's measure unit.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Layout {
    pub size: f64,
    pub margin: f64,
    pub round_block_size: RoundBlockSizeMode,
}

impl Layout {
    pub fn new(size: f64, margin: f64) -> Self {
        Self {
            size,
            margin,
            round_block_size: RoundBlockSizeMode::default(),
        }
    }

    pub fn round_block_size(mut self, mode: RoundBlockSizeMode) -> Self {
        self.round_block_size = mode;
        self
    }

    /// Computes page geometry for `matrix`.
    ///
    /// Colors default to opaque black on opaque white; there is no label, no
    /// logo and result validation is off.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidMatrix`] if rows differ in length,
    /// [`Error::BlockSizeTooSmall`] if rounding leaves zero-sized modules.
    pub fn apply(&self, matrix: Vec<Vec<bool>>) -> Result<QrCodeData> {
        let block_count = matrix.first().map_or(0, Vec::len);
        if let Some((row, values)) = matrix
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != block_count)
        {
            return Err(Error::InvalidMatrix {
                row,
                expected: block_count,
                actual: values.len(),
            });
        }

        let mut size = self.size;
        let mut block_size = if block_count == 0 {
            0.0
        } else {
            size / block_count as f64
        };
        if block_count > 0 {
            match self.round_block_size {
                RoundBlockSizeMode::Margin => block_size = block_size.floor(),
                RoundBlockSizeMode::Enlarge => {
                    block_size = block_size.ceil();
                    size = block_size * block_count as f64;
                }
                RoundBlockSizeMode::Shrink => {
                    block_size = block_size.floor();
                    size = block_size * block_count as f64;
                }
                RoundBlockSizeMode::None => {}
            }
            if block_size <= 0.0 {
                return Err(Error::BlockSizeTooSmall {
                    size: self.size,
                    block_count,
                });
            }
        }

        let inner_width = block_size * block_count as f64;
        let outer_width = size + 2.0 * self.margin;

        Ok(QrCodeData {
            matrix,
            outer_width,
            outer_height: outer_width,
            margin_left: (outer_width - inner_width) / 2.0,
            block_size,
            foreground_color: Color::BLACK,
            background_color: Color::WHITE,
            label: None,
            validate_result: false,
            logo: None,
        })
    }
}

/// Builds a square matrix from a module accessor, `get(x, y)` with `x` the
/// column and `y` the row.
pub fn matrix_from_fn<F>(count: usize, get: F) -> Vec<Vec<bool>>
where
    F: Fn(usize, usize) -> bool,
{
    (0..count)
        .map(|y| (0..count).map(|x| get(x, y)).collect())
        .collect()
}
