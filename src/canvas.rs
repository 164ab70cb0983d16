//! The document canvas the writer draws on, and its PDF implementation.
//!
//! [`Canvas`] is the only drawing surface [`crate::writer::PdfWriter`] knows
//! about. Coordinates follow the paper convention: origin at the top-left
//! corner of the page, y growing downwards, lengths in the page's
//! [`MeasureUnit`].
//!
//! [`PdfCanvas`] is the bundled backend. It buffers one page and writes the
//! whole document with `pdf-writer` when serialized.

use std::error::Error as StdError;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use miniz_oxide::deflate::compress_to_vec_zlib;
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref};
use thiserror::Error;
use tracing::trace;

use crate::data::MeasureUnit;

/// zlib level for content and image streams.
const COMPRESSION_LEVEL: u8 = 6;

/// Canvas failure. Passed through to the caller of `render` unchanged.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// The backend has no conversion for this unit.
    #[error("unsupported measure unit: {0}")]
    UnsupportedUnit(String),

    /// Drawing or serializing before a page exists.
    #[error("no page has been created")]
    NoPage,

    /// A second page was requested; documents hold a single page.
    #[error("page already created")]
    PageAlreadyCreated,

    /// The image could not be loaded for embedding.
    #[error("failed to load image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Backend-specific failure.
    #[error(transparent)]
    Other(Box<dyn StdError + Send + Sync>),
}

/// Drawing primitives needed to render a QR code document.
pub trait Canvas {
    /// Starts the page, `width` by `height` in `unit`.
    fn create_page(
        &mut self,
        unit: &MeasureUnit,
        width: f64,
        height: f64,
    ) -> Result<(), CanvasError>;

    /// Sets the color used by subsequent [`Canvas::fill_rect`] calls.
    fn set_fill_color(&mut self, r: u8, g: u8, b: u8) -> Result<(), CanvasError>;

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<(), CanvasError>;

    /// Places the raster image at `path`, scaled to `width` by `height`.
    fn draw_image(
        &mut self,
        path: &Path,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), CanvasError>;

    /// Finishes the document and returns its bytes.
    fn serialize(self) -> Result<Vec<u8>, CanvasError>;
}

/// A single-page PDF document.
#[derive(Default)]
pub struct PdfCanvas {
    page: Option<PdfPage>,
}

struct PdfPage {
    /// Points per unit.
    scale: f64,
    width: f64,
    height: f64,
    content: Content,
    images: Vec<EmbeddedImage>,
}

struct EmbeddedImage {
    name: String,
    width: u32,
    height: u32,
    rgb: Vec<u8>,
    alpha: Option<Vec<u8>>,
}

impl EmbeddedImage {
    fn load(path: &Path, name: String) -> Result<Self, CanvasError> {
        let image = image::open(path).map_err(|source| CanvasError::Image {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_image(&image, name))
    }

    fn from_image(image: &DynamicImage, name: String) -> Self {
        let (width, height) = (image.width(), image.height());
        if image.color().has_alpha() {
            let rgba = image.to_rgba8();
            let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
            let mut alpha = Vec::with_capacity(rgba.len() / 4);
            for pixel in rgba.pixels() {
                rgb.extend_from_slice(&pixel.0[..3]);
                alpha.push(pixel.0[3]);
            }
            Self {
                name,
                width,
                height,
                rgb,
                alpha: Some(alpha),
            }
        } else {
            Self {
                name,
                width,
                height,
                rgb: image.to_rgb8().into_raw(),
                alpha: None,
            }
        }
    }
}

impl PdfCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    fn page_mut(&mut self) -> Result<&mut PdfPage, CanvasError> {
        self.page.as_mut().ok_or(CanvasError::NoPage)
    }
}

impl PdfPage {
    fn pt(&self, value: f64) -> f32 {
        (value * self.scale) as f32
    }

    /// Bottom edge of a box in PDF user space, which counts from the bottom.
    fn flip_y(&self, y: f64, height: f64) -> f32 {
        self.pt(self.height - y - height)
    }
}

impl Canvas for PdfCanvas {
    fn create_page(
        &mut self,
        unit: &MeasureUnit,
        width: f64,
        height: f64,
    ) -> Result<(), CanvasError> {
        if self.page.is_some() {
            return Err(CanvasError::PageAlreadyCreated);
        }
        let scale = unit
            .points_per_unit()
            .ok_or_else(|| CanvasError::UnsupportedUnit(unit.to_string()))?;
        trace!(%unit, width, height, "pdf page created");
        self.page = Some(PdfPage {
            scale,
            width,
            height,
            content: Content::new(),
            images: Vec::new(),
        });
        Ok(())
    }

    fn set_fill_color(&mut self, r: u8, g: u8, b: u8) -> Result<(), CanvasError> {
        let page = self.page_mut()?;
        page.content.set_fill_rgb(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        );
        Ok(())
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<(), CanvasError> {
        let page = self.page_mut()?;
        let (px, py) = (page.pt(x), page.flip_y(y, height));
        let (pw, ph) = (page.pt(width), page.pt(height));
        page.content.rect(px, py, pw, ph);
        page.content.fill_nonzero();
        Ok(())
    }

    fn draw_image(
        &mut self,
        path: &Path,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), CanvasError> {
        let page = self.page_mut()?;
        let name = format!("Im{}", page.images.len() + 1);
        let image = EmbeddedImage::load(path, name)?;
        trace!(
            path = %path.display(),
            pixels_wide = image.width,
            pixels_high = image.height,
            "embedding image"
        );

        let transform = [
            page.pt(width),
            0.0,
            0.0,
            page.pt(height),
            page.pt(x),
            page.flip_y(y, height),
        ];
        page.content.save_state();
        page.content.transform(transform);
        page.content.x_object(Name(image.name.as_bytes()));
        page.content.restore_state();
        page.images.push(image);
        Ok(())
    }

    fn serialize(self) -> Result<Vec<u8>, CanvasError> {
        let page = self.page.ok_or(CanvasError::NoPage)?;

        let catalog_id = Ref::new(1);
        let page_tree_id = Ref::new(2);
        let page_id = Ref::new(3);
        let content_id = Ref::new(4);
        let mut next_id = 5;

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(page_tree_id);
        pdf.pages(page_tree_id).kids([page_id]).count(1);

        let mut image_ids = Vec::with_capacity(page.images.len());
        for image in &page.images {
            let image_id = Ref::new(next_id);
            next_id += 1;

            let samples = compress_to_vec_zlib(&image.rgb, COMPRESSION_LEVEL);
            let mut xobject = pdf.image_xobject(image_id, &samples);
            xobject.filter(Filter::FlateDecode);
            xobject.width(image.width as i32);
            xobject.height(image.height as i32);
            xobject.color_space().device_rgb();
            xobject.bits_per_component(8);

            if let Some(alpha) = &image.alpha {
                let mask_id = Ref::new(next_id);
                next_id += 1;
                xobject.s_mask(mask_id);
                xobject.finish();

                let mask_samples = compress_to_vec_zlib(alpha, COMPRESSION_LEVEL);
                let mut mask = pdf.image_xobject(mask_id, &mask_samples);
                mask.filter(Filter::FlateDecode);
                mask.width(image.width as i32);
                mask.height(image.height as i32);
                mask.color_space().device_gray();
                mask.bits_per_component(8);
                mask.finish();
            } else {
                xobject.finish();
            }
            image_ids.push((image.name.as_str(), image_id));
        }

        let mut page_writer = pdf.page(page_id);
        page_writer.media_box(Rect::new(
            0.0,
            0.0,
            page.pt(page.width),
            page.pt(page.height),
        ));
        page_writer.parent(page_tree_id);
        page_writer.contents(content_id);
        {
            let mut resources = page_writer.resources();
            let mut x_objects = resources.x_objects();
            for (name, id) in &image_ids {
                x_objects.pair(Name(name.as_bytes()), *id);
            }
        }
        page_writer.finish();

        let content = compress_to_vec_zlib(&page.content.finish(), COMPRESSION_LEVEL);
        pdf.stream(content_id, &content).filter(Filter::FlateDecode);

        let bytes = pdf.finish();
        trace!(len = bytes.len(), images = image_ids.len(), "pdf serialized");
        Ok(bytes)
    }
}
