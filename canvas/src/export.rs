//! Export: PNG download and single-page PDF layout.
//!
//! The raster and PDF encoders are collaborators behind the [`Snapshot`],
//! [`DocumentWriter`], and [`Downloader`] traits; this module only decides
//! what to ask of them. The browser implementations live in
//! [`crate::browser`].

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use crate::consts::{A4_HEIGHT_MM, A4_WIDTH_MM, PDF_FILENAME, PNG_FILENAME};
use crate::error::AppError;
use crate::geom::Size;

/// Image format tag passed to [`DocumentWriter::add_image`].
pub const PNG_FORMAT: &str = "PNG";

/// Serializes the current surface pixels (page plus overlay).
pub trait Snapshot {
    /// Encode the surface as a `data:image/png` URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ExportFailed`] when the surface cannot be encoded.
    fn png_data_url(&self) -> Result<String, AppError>;

    /// Intrinsic pixel size of the surface.
    fn pixel_size(&self) -> Size;
}

/// Triggers a client-side file download.
pub trait Downloader {
    /// # Errors
    ///
    /// Returns [`AppError::ExportFailed`] when the download cannot be started.
    fn download(&self, filename: &str, data_url: &str) -> Result<(), AppError>;
}

/// Builds a one-page PDF around an embedded image.
pub trait DocumentWriter {
    /// Place an image on the page, in page units (millimetres).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ExportFailed`] when the writer rejects the image.
    fn add_image(&mut self, data: &str, format: &str, x: f64, y: f64, width: f64, height: f64) -> Result<(), AppError>;

    /// Finish the document and hand it to the user as `filename`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ExportFailed`] when saving fails.
    fn save(&mut self, filename: &str) -> Result<(), AppError>;
}

/// PDF page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Landscape iff the page is wider than tall. Uses the unscaled page size
    /// so the export shape does not follow the zoom level.
    #[must_use]
    pub fn for_page(page: Size) -> Self {
        if page.width > page.height { Self::Landscape } else { Self::Portrait }
    }

    /// Single-letter code understood by jsPDF.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Portrait => "p",
            Self::Landscape => "l",
        }
    }

    /// A4 sheet dimensions in millimetres for this orientation.
    #[must_use]
    pub fn a4_size(self) -> Size {
        match self {
            Self::Portrait => Size::new(A4_WIDTH_MM, A4_HEIGHT_MM),
            Self::Landscape => Size::new(A4_HEIGHT_MM, A4_WIDTH_MM),
        }
    }
}

/// Where the surface image goes on the PDF page, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Layout decided before any encoding happens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentExportPlan {
    pub orientation: Orientation,
    pub page: Size,
    pub image: ImagePlacement,
}

impl DocumentExportPlan {
    /// Lay out `surface` on an A4 sheet oriented after `page_size`: pinned to
    /// the top-left corner, scaled to the sheet width, aspect preserved.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ExportPrecondition`] when no page size is known
    /// (no document loaded), and [`AppError::ExportFailed`] for an empty
    /// surface.
    pub fn new(page_size: Option<Size>, surface: Size) -> Result<Self, AppError> {
        let page_size = page_size.ok_or(AppError::ExportPrecondition)?;
        if !(surface.width > 0.0 && surface.height > 0.0) {
            return Err(AppError::ExportFailed { reason: "surface has no pixels".to_owned() });
        }
        let orientation = Orientation::for_page(page_size);
        let page = orientation.a4_size();
        let width = page.width;
        let height = surface.height * width / surface.width;
        Ok(Self { orientation, page, image: ImagePlacement { x: 0.0, y: 0.0, width, height } })
    }
}

/// Download the surface as `camera-layout.png`.
///
/// # Errors
///
/// Propagates snapshot and download failures.
pub fn export_as_image(surface: &impl Snapshot, downloader: &impl Downloader) -> Result<(), AppError> {
    let data_url = surface.png_data_url()?;
    downloader.download(PNG_FILENAME, &data_url)?;
    log::info!("exported {PNG_FILENAME}");
    Ok(())
}

/// Embed the surface in a one-page PDF and save it as `camera-layout.pdf`.
///
/// # Errors
///
/// Propagates snapshot and writer failures.
pub fn export_as_document(
    plan: &DocumentExportPlan,
    surface: &impl Snapshot,
    writer: &mut impl DocumentWriter,
) -> Result<(), AppError> {
    let data_url = surface.png_data_url()?;
    let ImagePlacement { x, y, width, height } = plan.image;
    writer.add_image(&data_url, PNG_FORMAT, x, y, width, height)?;
    writer.save(PDF_FILENAME)?;
    log::info!("exported {PDF_FILENAME} ({:?})", plan.orientation);
    Ok(())
}
