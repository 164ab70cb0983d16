use crate::data::{QrCodeData, RenderOptions};
use crate::error::Result;
use crate::writer::PdfWriter;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

/*---- Utilities ----*/

/// Renders QR code data to PDF bytes with the bundled canvas.
///
/// # Example
///
/// ```rust
/// use qirust_pdf::data::RenderOptions;
/// use qirust_pdf::helper::render_pdf;
/// use qirust_pdf::layout::{matrix_from_fn, Layout};
///
/// let data = Layout::new(40.0, 4.0).apply(matrix_from_fn(21, |x, _| x % 2 == 0)).unwrap();
/// let pdf = render_pdf(&data, &RenderOptions::default()).unwrap();
/// assert!(pdf.starts_with(b"%PDF-"));
/// ```
pub fn render_pdf(data: &QrCodeData, options: &RenderOptions) -> Result<Vec<u8>> {
    PdfWriter::new().render(data, options)
}

/// Renders QR code data to a PDF file and returns its path.
///
/// # Arguments
///
/// * `data` - The symbol to render.
/// * `options` - Writer options, e.g. the measure unit.
/// * `directory_path` - Optional. The directory the file is written to. If not provided, the
///   default directory is "generated".
/// * `filename` - Optional. The file name without extension. If not provided, a timestamp-based
///   filename will be used.
///
/// # Errors
///
/// Returns any rendering error, or [`crate::Error::Io`] if the directory or
/// file can't be written. Nothing is written when rendering fails.
///
/// # Example
///
/// ```rust
/// use qirust_pdf::data::RenderOptions;
/// use qirust_pdf::helper::save_pdf;
/// use qirust_pdf::layout::{matrix_from_fn, Layout};
///
/// let data = Layout::new(40.0, 4.0).apply(matrix_from_fn(21, |x, y| x == y)).unwrap();
/// let dir = std::env::temp_dir().join("qirust_pdf_doc");
/// let path = save_pdf(&data, &RenderOptions::default(), dir.to_str(), Some("qr_code")).unwrap();
/// assert!(path.ends_with("qr_code.pdf"));
/// ```
pub fn save_pdf(
    data: &QrCodeData,
    options: &RenderOptions,
    directory_path: Option<&str>,
    filename: Option<&str>,
) -> Result<PathBuf> {
    let bytes = render_pdf(data, options)?;

    let directory_path = Path::new(directory_path.unwrap_or("generated"));
    let filename = match filename {
        Some(name) => name.to_string(),
        None => timestamp_filename(),
    };
    let extension = <PdfWriter>::supported_extensions()[0];
    let file_path = directory_path.join(format!("{}.{}", filename, extension));

    // Check if the directory exists, create it if it doesn't
    if !directory_path.exists() {
        fs::create_dir_all(directory_path)?;
    }

    fs::write(&file_path, &bytes)?;
    debug!(path = %file_path.display(), len = bytes.len(), "pdf saved");
    Ok(file_path)
}

fn timestamp_filename() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|since_the_epoch| since_the_epoch.as_millis())
        .unwrap_or_default();
    format!("qr_{}", millis)
}

// Tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Label;
    use crate::error::Error;
    use crate::layout::{matrix_from_fn, Layout};

    fn sample() -> QrCodeData {
        Layout::new(42.0, 4.0)
            .apply(matrix_from_fn(21, |x, y| (x * y) % 5 == 0))
            .unwrap()
    }

    #[test]
    fn test_save_pdf_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("out");

        let options = RenderOptions::default();
        let path = save_pdf(&sample(), &options, target.to_str(), Some("qr")).unwrap();

        assert_eq!(path, target.join("qr.pdf"));
        let bytes = fs::read(&path).unwrap();
        assert_eq!(bytes, render_pdf(&sample(), &options).unwrap());
    }

    #[test]
    fn test_save_pdf_uses_timestamp_name() {
        let dir = tempfile::tempdir().unwrap();
        let options = RenderOptions::default();
        let path = save_pdf(&sample(), &options, dir.path().to_str(), None).unwrap();

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("qr_"));
        assert!(name.ends_with(".pdf"));
    }

    #[test]
    fn test_failed_render_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out");
        let mut data = sample();
        data.label = Some(Label::new("no labels in pdf"));

        let options = RenderOptions::default();
        let err = save_pdf(&data, &options, target.to_str(), Some("qr")).unwrap_err();

        assert!(matches!(err, Error::UnsupportedFeature(_)));
        assert!(!target.exists());
    }
}
