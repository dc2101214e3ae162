//! Document handles and page rendering

use crate::surface::Surface;
use crate::types::*;
use image::RgbaImage;
use std::sync::Arc;

/// The only page this widget ever renders
pub const FIRST_PAGE: usize = 1;

/// Page 1 rasterized at the scale the document was loaded with
#[derive(Debug, Clone)]
pub struct PageRaster {
    pub viewport: Viewport,
    pub pixels: Arc<RgbaImage>,
}

impl PageRaster {
    pub fn new(pixels: RgbaImage) -> Self {
        let (width, height) = pixels.dimensions();
        Self {
            viewport: Viewport { width, height },
            pixels: Arc::new(pixels),
        }
    }
}

/// A decoded PDF.
///
/// Backends decode everything this widget needs up front so the handle is
/// plain data that can cross from the worker to the UI thread.
#[derive(Debug, Clone)]
pub struct DocumentHandle {
    page_count: usize,
    first_page: Option<PageRaster>,
}

impl DocumentHandle {
    pub fn new(page_count: usize, first_page: Option<PageRaster>) -> Self {
        debug_assert!(first_page.is_none() || page_count > 0);
        Self {
            page_count,
            first_page,
        }
    }

    /// Document with no pages at all
    pub fn empty() -> Self {
        Self::new(0, None)
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Viewport of `page_number` (1-based)
    pub fn viewport(&self, page_number: usize) -> std::result::Result<Viewport, RenderError> {
        self.page(page_number).map(|page| page.viewport)
    }

    fn page(&self, page_number: usize) -> std::result::Result<&PageRaster, RenderError> {
        if page_number != FIRST_PAGE {
            return Err(RenderError::NoSuchPage(page_number));
        }
        self.first_page
            .as_ref()
            .ok_or(RenderError::NoSuchPage(page_number))
    }
}

/// A PDF decoding capability
pub trait PdfBackend {
    /// Short name for status and log messages
    fn name(&self) -> &'static str;

    /// Decode `bytes`, rasterizing page 1 at `scale` (1.0 = one user-space
    /// unit per pixel).
    fn load(&self, bytes: &[u8], scale: f32) -> std::result::Result<DocumentHandle, LoadError>;
}

/// Rasterize `page_number` of `document` into `surface`.
///
/// The surface is first resized to the page viewport, which wipes anything
/// drawn earlier, and then the page content is painted.
pub fn render_page(
    document: &DocumentHandle,
    page_number: usize,
    surface: &mut Surface,
) -> std::result::Result<(), RenderError> {
    let page = document.page(page_number)?;
    surface.resize(page.viewport.width, page.viewport.height);
    surface.paint(&page.pixels);
    Ok(())
}
