//! The PDF writer: validates a [`QrCodeData`] and draws it on a [`Canvas`].
//!
//! # Example
//!
//! ```rust
//! use qirust_pdf::data::{MeasureUnit, RenderOptions};
//! use qirust_pdf::layout::{matrix_from_fn, Layout};
//! use qirust_pdf::writer::PdfWriter;
//!
//! let matrix = matrix_from_fn(21, |x, y| x % 3 == y % 2);
//! let data = Layout::new(50.0, 5.0).apply(matrix).unwrap();
//! let pdf = PdfWriter::new()
//!     .render(&data, &RenderOptions::with_measure_unit(MeasureUnit::Mm))
//!     .unwrap();
//!
//! assert!(pdf.starts_with(b"%PDF-"));
//! ```

use image::error::{ImageError, ParameterError, ParameterErrorKind};
use tracing::{debug, trace, warn};

use crate::canvas::{Canvas, PdfCanvas};
use crate::data::{LogoSpec, MeasureUnit, QrCodeData, RenderOptions};
use crate::error::{ColorRole, Error, Result};
use crate::metrics::{FileImageMetrics, ImageMetrics};

/// Where a logo lands on the page, in the page's unit.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct LogoPlacement {
    pub x: f64,
    pub y: f64,
    pub width: u32,
    pub height: u32,
}

/// Renders QR code data into PDF documents.
///
/// `F` produces a fresh canvas for every call to [`PdfWriter::render`];
/// `M` answers logo size queries. [`PdfWriter::new`] uses the bundled
/// [`PdfCanvas`] and reads logo sizes from disk.
pub struct PdfWriter<F = fn() -> PdfCanvas, M = FileImageMetrics> {
    canvas_factory: F,
    metrics: M,
}

impl PdfWriter {
    pub fn new() -> Self {
        Self {
            canvas_factory: PdfCanvas::new,
            metrics: FileImageMetrics,
        }
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl<F, M> PdfWriter<F, M> {
    /// Option key selecting the measure unit.
    pub const WRITER_OPTION_MEASURE_UNIT: &'static str = RenderOptions::MEASURE_UNIT;

    /// Wires a writer to another canvas backend or metrics source.
    pub fn with_parts(canvas_factory: F, metrics: M) -> Self {
        Self {
            canvas_factory,
            metrics,
        }
    }

    pub const fn content_type() -> &'static str {
        "application/pdf"
    }

    pub const fn supported_extensions() -> &'static [&'static str] {
        &["pdf"]
    }

    pub const fn name() -> &'static str {
        "pdf"
    }
}

/// Rejects requests the PDF output cannot honor. Checks run in a fixed order
/// and the first failure is reported.
pub fn validate(data: &QrCodeData) -> Result<()> {
    if data.validate_result {
        return Err(Error::UnsupportedValidation);
    }
    if !data.foreground_color.is_opaque() {
        return Err(Error::UnsupportedColor {
            role: ColorRole::Foreground,
            alpha: data.foreground_color.a,
        });
    }
    if !data.background_color.is_opaque() {
        return Err(Error::UnsupportedColor {
            role: ColorRole::Background,
            alpha: data.background_color.a,
        });
    }
    if data.label.is_some() {
        return Err(Error::UnsupportedFeature("a label".to_string()));
    }
    Ok(())
}

impl<F, M> PdfWriter<F, M>
where
    M: ImageMetrics,
{
    /// Renders `data` and returns the finished document.
    ///
    /// Nothing touches the canvas until [`validate`] has passed. Canvas
    /// failures are returned as [`Error::Canvas`].
    pub fn render<C>(&self, data: &QrCodeData, options: &RenderOptions) -> Result<Vec<u8>>
    where
        F: Fn() -> C,
        C: Canvas,
    {
        validate(data)?;

        let unit = options.resolved_unit();
        if let MeasureUnit::Other(name) = &unit {
            warn!(unit = %name, "unrecognized measure unit, passing it to the canvas");
        }
        debug!(
            rows = data.row_count(),
            columns = data.column_count(),
            %unit,
            "rendering qr code"
        );

        let mut canvas = (self.canvas_factory)();
        canvas.create_page(&unit, data.outer_width, data.outer_height)?;

        let background = data.background_color;
        canvas.set_fill_color(background.r, background.g, background.b)?;
        canvas.fill_rect(0.0, 0.0, data.outer_width, data.outer_height)?;

        let foreground = data.foreground_color;
        canvas.set_fill_color(foreground.r, foreground.g, foreground.b)?;
        let mut modules = 0usize;
        for (row, column) in data.dark_modules() {
            canvas.fill_rect(
                data.margin_left + column as f64 * data.block_size,
                data.margin_left + row as f64 * data.block_size,
                data.block_size,
                data.block_size,
            )?;
            modules += 1;
        }
        trace!(modules, "modules drawn");

        if let Some(logo) = &data.logo {
            let placement = self.place_logo(logo, data.outer_width, data.outer_height)?;
            canvas.draw_image(
                &logo.path,
                placement.x,
                placement.y,
                f64::from(placement.width),
                f64::from(placement.height),
            )?;
        }

        Ok(canvas.serialize()?)
    }

    /// Centers `logo` on a `page_width` by `page_height` page.
    ///
    /// A missing width is taken from the image. A missing height is then
    /// scaled from the image's height by `width / source_width`, so a given
    /// height never feeds back into the width.
    ///
    /// # Errors
    ///
    /// [`Error::ImageMetrics`] if a dimension is missing and the image size
    /// can't be read.
    pub fn place_logo(
        &self,
        logo: &LogoSpec,
        page_width: f64,
        page_height: f64,
    ) -> Result<LogoPlacement> {
        let (width, height) = match (logo.width, logo.height) {
            (Some(width), Some(height)) => (width, height),
            (width, height) => {
                let (source_width, source_height) = self
                    .metrics
                    .intrinsic_size(&logo.path)
                    .map_err(|source| Error::ImageMetrics {
                        path: logo.path.clone(),
                        source,
                    })?;
                if source_width == 0 {
                    return Err(Error::ImageMetrics {
                        path: logo.path.clone(),
                        source: ImageError::Parameter(ParameterError::from_kind(
                            ParameterErrorKind::Generic("image has zero width".to_string()),
                        )),
                    });
                }

                let width = width.unwrap_or(source_width);
                let height = height.unwrap_or_else(|| {
                    let aspect_ratio = f64::from(width) / f64::from(source_width);
                    (f64::from(source_height) * aspect_ratio).round() as u32
                });
                (width, height)
            }
        };

        let placement = LogoPlacement {
            x: page_width / 2.0 - f64::from(width / 2),
            y: page_height / 2.0 - f64::from(height / 2),
            width,
            height,
        };
        debug!(path = %logo.path.display(), ?placement, "logo placed");
        Ok(placement)
    }
}
