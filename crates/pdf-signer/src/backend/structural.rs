use crate::document::{DocumentHandle, PageRaster, PdfBackend};
use crate::types::*;
use image::RgbaImage;
use lopdf::{Document, Object, ObjectId};

/// Letter, used when a page tree carries no MediaBox at all
const DEFAULT_MEDIA_BOX: [f32; 4] = [0.0, 0.0, 612.0, 792.0];

/// Pure-Rust backend built on `lopdf`.
///
/// It parses the document structure and sizes page 1 from its MediaBox, but
/// does not rasterize content: the page is painted as blank paper. Used when
/// Pdfium is unavailable (wasm32, or the library failed to bind).
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralBackend;

impl PdfBackend for StructuralBackend {
    fn name(&self) -> &'static str {
        "structural"
    }

    fn load(&self, bytes: &[u8], scale: f32) -> std::result::Result<DocumentHandle, LoadError> {
        let doc = Document::load_mem(bytes).map_err(|e| LoadError::DecodeFailure(e.to_string()))?;

        let pages = doc.get_pages();
        let Some(&page_id) = pages.get(&1) else {
            log::debug!("Structural backend: document has no pages");
            return Ok(DocumentHandle::empty());
        };

        let [llx, lly, urx, ury] = media_box(&doc, page_id)?;
        let (mut width_pt, mut height_pt) = (urx - llx, ury - lly);
        if rotation(&doc, page_id) % 180 != 0 {
            std::mem::swap(&mut width_pt, &mut height_pt);
        }

        let viewport = Viewport::checked_from_points(width_pt, height_pt, scale)?;
        log::debug!(
            "Structural backend: {} pages, page 1 is {}x{}",
            pages.len(),
            viewport.width,
            viewport.height
        );

        let paper = RgbaImage::from_pixel(viewport.width, viewport.height, Rgba::WHITE.to_pixel());
        Ok(DocumentHandle::new(pages.len(), Some(PageRaster::new(paper))))
    }
}

/// Look up an inheritable page attribute, walking up the Parent chain
fn inherited<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut current = doc.get_dictionary(page_id).ok();
    // Bounded walk; malformed files can contain Parent cycles
    for _ in 0..32 {
        let dict = current?;
        if let Ok(value) = dict.get(key) {
            return resolve(doc, value);
        }
        current = dict
            .get(b"Parent")
            .and_then(Object::as_reference)
            .and_then(|id| doc.get_dictionary(id))
            .ok();
    }
    None
}

fn resolve<'a>(doc: &'a Document, object: &'a Object) -> Option<&'a Object> {
    match object {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

fn media_box(doc: &Document, page_id: ObjectId) -> std::result::Result<[f32; 4], LoadError> {
    let Some(object) = inherited(doc, page_id, b"MediaBox") else {
        return Ok(DEFAULT_MEDIA_BOX);
    };

    let array = object
        .as_array()
        .map_err(|e| LoadError::DecodeFailure(format!("Invalid MediaBox: {}", e)))?;
    if array.len() != 4 {
        return Err(LoadError::DecodeFailure(format!(
            "MediaBox has {} entries, expected 4",
            array.len()
        )));
    }

    let mut values = [0.0f32; 4];
    for (slot, value) in values.iter_mut().zip(array) {
        *slot = resolve(doc, value)
            .ok_or_else(|| LoadError::DecodeFailure("Dangling MediaBox entry".to_string()))?
            .as_float()
            .map_err(|e| LoadError::DecodeFailure(format!("Invalid MediaBox entry: {}", e)))?;
    }
    Ok(values)
}

fn rotation(doc: &Document, page_id: ObjectId) -> i64 {
    inherited(doc, page_id, b"Rotate")
        .and_then(|value| value.as_i64().ok())
        .map(|degrees| degrees.rem_euclid(360))
        .unwrap_or(0)
}
