//! Intrinsic image size lookup for logos.

use std::path::Path;

use image::ImageError;

/// Reports the native pixel dimensions of a raster image.
pub trait ImageMetrics {
    /// Returns `(width, height)` of the image at `path`.
    fn intrinsic_size(&self, path: &Path) -> Result<(u32, u32), ImageError>;
}

/// Reads dimensions from the image file header, without decoding pixels.
#[derive(Copy, Clone, Debug, Default)]
pub struct FileImageMetrics;

impl ImageMetrics for FileImageMetrics {
    fn intrinsic_size(&self, path: &Path) -> Result<(u32, u32), ImageError> {
        image::image_dimensions(path)
    }
}

impl<M: ImageMetrics + ?Sized> ImageMetrics for &M {
    fn intrinsic_size(&self, path: &Path) -> Result<(u32, u32), ImageError> {
        (**self).intrinsic_size(path)
    }
}
