//! Error types for PDF rendering.
//!
//! Every variant is fatal to the `render` call that produced it; nothing is
//! retried and no partial document is ever returned.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::canvas::CanvasError;

/// Which of the two symbol colors a color error refers to.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ColorRole {
    Foreground,
    Background,
}

impl fmt::Display for ColorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorRole::Foreground => f.write_str("foreground"),
            ColorRole::Background => f.write_str("background"),
        }
    }
}

/// Rendering error.
#[derive(Debug, Error)]
pub enum Error {
    /// The caller asked for built-in validation of the rendered result.
    #[error("built-in validation reader can not check pdf qr codes: disable result validation")]
    UnsupportedValidation,

    /// A color carries an alpha channel, which PDF fills here cannot express.
    #[error("the {role} color has alpha {alpha}, but the pdf writer doesn't support alpha")]
    UnsupportedColor {
        /// Offending color.
        role: ColorRole,
        /// Its alpha value.
        alpha: u8,
    },

    /// A feature that this output format cannot render.
    #[error("the pdf writer doesn't support {0}")]
    UnsupportedFeature(String),

    /// Logo dimensions could not be read from the image file.
    #[error("could not determine the size of logo {}: {source}", path.display())]
    ImageMetrics {
        /// Logo path.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: image::ImageError,
    },

    /// Failure reported by the document canvas.
    #[error(transparent)]
    Canvas(#[from] CanvasError),

    /// Matrix rows are not all the same length.
    #[error("matrix row {row} has {actual} modules, expected {expected}")]
    InvalidMatrix {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Rounding the block size left zero-sized modules.
    #[error("block size rounds to zero: {size} units for {block_count} modules")]
    BlockSizeTooSmall { size: f64, block_count: usize },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, Error>;
