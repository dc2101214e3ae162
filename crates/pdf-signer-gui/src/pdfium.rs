use pdf_signer::PdfBackend;
use std::sync::Arc;

pub type SharedBackend = Arc<dyn PdfBackend + Send + Sync>;

#[cfg(all(feature = "pdf-viewer", not(target_arch = "wasm32")))]
use pdf_signer::{DocumentHandle, LoadError, PageRaster, Viewport};

#[cfg(all(feature = "pdf-viewer", not(target_arch = "wasm32")))]
use pdfium_render::prelude::*;

/// Directories searched for a vendored Pdfium before the system library.
/// The working directory is the workspace root under `cargo run`; tests run
/// from the crate directory, so the build script's install path is tried too.
#[cfg(all(feature = "pdf-viewer", not(target_arch = "wasm32")))]
fn vendored_library_dirs() -> Vec<std::path::PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.join("vendor/pdfium/lib"));
    }
    dirs.push(std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../vendor/pdfium/lib"));
    dirs
}

/// Initialize Pdfium, trying the vendored library first, then falling back to system
#[cfg(all(feature = "pdf-viewer", not(target_arch = "wasm32")))]
pub fn init_pdfium() -> Result<Pdfium, PdfiumError> {
    for dir in vendored_library_dirs() {
        let lib_path = Pdfium::pdfium_platform_library_name_at_path(&dir);
        if !lib_path.exists() {
            continue;
        }
        if let Ok(binding) = Pdfium::bind_to_library(lib_path) {
            return Ok(Pdfium::new(binding));
        }
    }

    Pdfium::bind_to_system_library().map(Pdfium::new)
}

/// Decodes and rasterizes through the Pdfium library.
///
/// Pdfium documents borrow the library binding, so each load binds, decodes
/// page 1 into an owned raster and lets the binding go again.
#[cfg(all(feature = "pdf-viewer", not(target_arch = "wasm32")))]
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfiumBackend;

#[cfg(all(feature = "pdf-viewer", not(target_arch = "wasm32")))]
impl PdfBackend for PdfiumBackend {
    fn name(&self) -> &'static str {
        "pdfium"
    }

    fn load(&self, bytes: &[u8], scale: f32) -> Result<DocumentHandle, LoadError> {
        let pdfium = init_pdfium().map_err(|e| LoadError::DecodeFailure(e.to_string()))?;
        let document = pdfium
            .load_pdf_from_byte_slice(bytes, None)
            .map_err(|e| LoadError::DecodeFailure(e.to_string()))?;

        let page_count = document.pages().len() as usize;
        if page_count == 0 {
            return Ok(DocumentHandle::empty());
        }

        let page = document
            .pages()
            .get(0)
            .map_err(|e| LoadError::DecodeFailure(e.to_string()))?;

        // Refuse absurd page boxes before Pdfium allocates the bitmap
        Viewport::checked_from_points(page.width().value, page.height().value, scale)?;

        let config = PdfRenderConfig::new().scale_page_by_factor(scale);
        let bitmap = page
            .render_with_config(&config)
            .map_err(|e| LoadError::DecodeFailure(e.to_string()))?;

        let width = bitmap.width() as u32;
        let height = bitmap.height() as u32;
        let pixels = image::RgbaImage::from_raw(width, height, bitmap.as_rgba_bytes().to_vec())
            .ok_or_else(|| {
                LoadError::DecodeFailure(format!("Pdfium returned a short {width}x{height} bitmap"))
            })?;

        log::debug!("Pdfium rendered page 1 at {}x{}", width, height);
        Ok(DocumentHandle::new(page_count, Some(PageRaster::new(pixels))))
    }
}

/// Whether the Pdfium library can be bound in this environment
#[cfg(all(feature = "pdf-viewer", not(target_arch = "wasm32")))]
pub fn pdfium_available() -> bool {
    match init_pdfium() {
        Ok(_) => true,
        Err(e) => {
            log::warn!("Pdfium unavailable, page content will not be drawn: {}", e);
            false
        }
    }
}

#[cfg(not(all(feature = "pdf-viewer", not(target_arch = "wasm32"))))]
pub fn pdfium_available() -> bool {
    false
}

/// Pick the best backend this build and machine support
#[cfg(all(feature = "pdf-viewer", not(target_arch = "wasm32")))]
pub fn preferred_backend(pdfium: bool) -> SharedBackend {
    if pdfium {
        Arc::new(PdfiumBackend)
    } else {
        Arc::new(pdf_signer::StructuralBackend)
    }
}

#[cfg(not(all(feature = "pdf-viewer", not(target_arch = "wasm32"))))]
pub fn preferred_backend(_pdfium: bool) -> SharedBackend {
    Arc::new(pdf_signer::StructuralBackend)
}
