//! One composite pass: page content, then every placement on top

use crate::document::{DocumentHandle, FIRST_PAGE, render_page};
use crate::options::SignerOptions;
use crate::placement::{PendingPlacement, PlacementRecord};
use crate::surface::Surface;
use crate::types::*;

/// Render page 1 and draw `annotations` over it in sequence order.
///
/// `pending` is drawn last as a placeholder when
/// [`SignerOptions::show_pending_placeholder`] is set.
pub fn composite(
    document: &DocumentHandle,
    annotations: &[PlacementRecord],
    pending: Option<PendingPlacement>,
    options: &SignerOptions,
) -> std::result::Result<Surface, RenderError> {
    let mut surface = Surface::default();
    composite_into(&mut surface, document, annotations, pending, options)?;
    Ok(surface)
}

/// Same as [`composite`] but reuses an existing surface
pub fn composite_into(
    surface: &mut Surface,
    document: &DocumentHandle,
    annotations: &[PlacementRecord],
    pending: Option<PendingPlacement>,
    options: &SignerOptions,
) -> std::result::Result<(), RenderError> {
    render_page(document, FIRST_PAGE, surface)?;

    for record in annotations {
        draw_record(surface, record, options);
    }

    if options.show_pending_placeholder {
        if let Some(pending) = pending {
            draw_record(surface, &pending.as_placeholder(), options);
        }
    }

    Ok(())
}

fn draw_record(surface: &mut Surface, record: &PlacementRecord, options: &SignerOptions) {
    match record.signature() {
        Some(signature) => {
            let (x, y) = options.signature_size.top_left_centered_at(record.position());
            surface.blit(signature, x, y, options.signature_size);
        }
        None => {
            let size = Size::new(options.placeholder_size, options.placeholder_size);
            let (x, y) = size.top_left_centered_at(record.position());
            surface.fill_rect(x, y, size, options.placeholder_color);
        }
    }
}
