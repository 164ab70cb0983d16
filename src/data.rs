//! Input values for the PDF writer.
//!
//! Everything here is a plain value snapshot: the caller assembles a
//! [`QrCodeData`] (usually through [`crate::layout::Layout`]) and the writer
//! only ever reads it.

use std::fmt;
use std::path::PathBuf;

/// An RGBA color.
///
/// Alpha follows the "0 means no transparency" convention, so
/// [`Color::OPAQUE_ALPHA`] is the only value the PDF writer accepts.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Alpha value for a fully opaque color.
    pub const OPAQUE_ALPHA: u8 = 0;

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
            a: Self::OPAQUE_ALPHA,
        }
    }

    /// Creates a color with an explicit alpha channel.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn is_opaque(&self) -> bool {
        self.a == Self::OPAQUE_ALPHA
    }
}

/// A logo drawn centered over the symbol.
///
/// A missing dimension is derived from the image file when rendering.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LogoSpec {
    pub path: PathBuf,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl LogoSpec {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            width: None,
            height: None,
        }
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }
}

/// A text label under the symbol. PDF output cannot carry one.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Label {
    pub text: String,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A QR code symbol ready to be drawn: module matrix, geometry and styling.
///
/// All lengths are in the unit selected through [`RenderOptions`].
#[derive(Clone, PartialEq, Debug)]
pub struct QrCodeData {
    /// Modules, row-major; `true` is a dark module. All rows have equal length.
    pub matrix: Vec<Vec<bool>>,
    pub outer_width: f64,
    pub outer_height: f64,
    /// Offset of the first module from the page origin, used on both axes.
    pub margin_left: f64,
    /// Edge length of one module.
    pub block_size: f64,
    pub foreground_color: Color,
    pub background_color: Color,
    pub label: Option<Label>,
    /// Request built-in re-validation of the rendered result.
    pub validate_result: bool,
    pub logo: Option<LogoSpec>,
}

impl QrCodeData {
    /// Iterates `(row, column)` of every dark module, row-major.
    pub fn dark_modules(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.matrix.iter().enumerate().flat_map(|(row, values)| {
            values
                .iter()
                .enumerate()
                .filter(|(_, dark)| **dark)
                .map(move |(column, _)| (row, column))
        })
    }

    pub fn row_count(&self) -> usize {
        self.matrix.len()
    }

    pub fn column_count(&self) -> usize {
        self.matrix.first().map_or(0, Vec::len)
    }
}

/// Unit in which all lengths of a [`QrCodeData`] are interpreted.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum MeasureUnit {
    #[default]
    Mm,
    Pt,
    Cm,
    In,
    /// Any other name; handed to the canvas as is.
    Other(String),
}

impl MeasureUnit {
    pub fn as_str(&self) -> &str {
        match self {
            MeasureUnit::Mm => "mm",
            MeasureUnit::Pt => "pt",
            MeasureUnit::Cm => "cm",
            MeasureUnit::In => "in",
            MeasureUnit::Other(name) => name,
        }
    }

    /// PDF points (1/72 inch) per unit, or `None` for an unknown unit.
    pub fn points_per_unit(&self) -> Option<f64> {
        match self {
            MeasureUnit::Mm => Some(72.0 / 25.4),
            MeasureUnit::Pt => Some(1.0),
            MeasureUnit::Cm => Some(72.0 / 2.54),
            MeasureUnit::In => Some(72.0),
            MeasureUnit::Other(_) => None,
        }
    }
}

impl From<&str> for MeasureUnit {
    fn from(name: &str) -> Self {
        match name {
            "mm" => MeasureUnit::Mm,
            "pt" => MeasureUnit::Pt,
            "cm" => MeasureUnit::Cm,
            "in" => MeasureUnit::In,
            other => MeasureUnit::Other(other.to_string()),
        }
    }
}

impl fmt::Display for MeasureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Writer options.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct RenderOptions {
    pub measure_unit: Option<MeasureUnit>,
}

impl RenderOptions {
    /// Option key for the measure unit in string-keyed option maps.
    pub const MEASURE_UNIT: &'static str = "measure_unit";

    pub fn with_measure_unit(unit: impl Into<MeasureUnit>) -> Self {
        Self {
            measure_unit: Some(unit.into()),
        }
    }

    /// Builds options from `(key, value)` pairs. Unknown keys are ignored.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut options = Self::default();
        for (key, value) in pairs {
            if key == Self::MEASURE_UNIT {
                options.measure_unit = Some(MeasureUnit::from(value));
            }
        }
        options
    }

    /// The configured unit, millimeters when unset.
    pub fn resolved_unit(&self) -> MeasureUnit {
        self.measure_unit.clone().unwrap_or_default()
    }
}
