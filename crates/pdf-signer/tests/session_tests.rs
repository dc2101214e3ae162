use image::RgbaImage;
use pdf_signer::*;

fn white_page(width: u32, height: u32) -> DocumentHandle {
    let pixels = RgbaImage::from_pixel(width, height, Rgba::WHITE.to_pixel());
    DocumentHandle::new(1, Some(PageRaster::new(pixels)))
}

fn loaded_session() -> SignerSession {
    let mut session = SignerSession::new(SignerOptions::default());
    let generation = session.begin_load();
    let outcome = session.finish_load(generation, Ok(white_page(400, 300)));
    assert!(matches!(outcome, LoadOutcome::Installed { page_count: 1 }));
    session
}

/// A thick horizontal stroke across most of the pad
fn draw_signature(session: &mut SignerSession) {
    let pad = session.modal_mut().pad_mut();
    pad.set_pen_width(8.0);
    pad.begin_stroke(Point::new(20.0, 100.0));
    pad.extend_stroke(Point::new(480.0, 100.0));
    pad.end_stroke();
}

#[test]
fn test_click_converts_to_surface_coordinates() {
    let controller = PlacementController;
    let pending = controller.on_surface_click(Point::new(130.0, 95.0), Point::new(30.0, 45.0));
    assert_eq!(pending, PendingPlacement { x: 100.0, y: 50.0 });

    // Clicks beyond the page are still accepted
    let pending = controller.on_surface_click(Point::new(5.0, 5.0), Point::new(30.0, 45.0));
    assert_eq!(pending, PendingPlacement { x: -25.0, y: -40.0 });
}

#[test]
fn test_click_then_save_appends_signed_record() {
    let mut session = loaded_session();
    let origin = Point::new(20.0, 40.0);

    session.click(Point::new(120.0, 90.0), origin);
    assert!(session.modal().is_open());
    draw_signature(&mut session);

    let record = session.save().unwrap();
    assert_eq!((record.x(), record.y()), (100.0, 50.0));
    assert!(!session.modal().is_open());

    let annotations = session.annotations();
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0].position(), Point::new(100.0, 50.0));
    let signature = annotations[0].signature().unwrap();
    assert!(signature.width() > 0 && signature.height() > 0);

    // The image occupies the 60x30 box centered at (100, 50)
    let surface = session.composite().unwrap().unwrap();
    assert_ne!(surface.pixel(100, 50), Some(Rgba::WHITE));
    for y in 0..surface.height() {
        for x in 0..surface.width() {
            if surface.pixel(x, y) != Some(Rgba::WHITE) {
                assert!(
                    (70..130).contains(&x) && (35..65).contains(&y),
                    "ink at ({x}, {y}) outside the signature box"
                );
            }
        }
    }
}

#[test]
fn test_cancel_leaves_annotations_unchanged() {
    let mut session = loaded_session();

    session.click(Point::new(200.0, 80.0), Point::new(0.0, 0.0));
    draw_signature(&mut session);
    let discarded = session.cancel();

    assert_eq!(discarded, Some(PendingPlacement { x: 200.0, y: 80.0 }));
    assert!(session.annotations().is_empty());
    assert!(!session.modal().is_open());

    // Nothing was drawn where the cancelled click landed
    let surface = session.composite().unwrap().unwrap();
    assert_eq!(surface.pixel(200, 80), Some(Rgba::WHITE));
}

#[test]
fn test_n_clicks_and_saves_keep_click_order() {
    let mut session = loaded_session();
    let clicks = [(10.0, 20.0), (150.0, 60.0), (300.0, 250.0), (42.0, 7.0)];

    for (x, y) in clicks {
        session.click(Point::new(x, y), Point::new(0.0, 0.0));
        draw_signature(&mut session);
        session.save().unwrap();
    }

    let annotations = session.annotations();
    assert_eq!(annotations.len(), clicks.len());
    for (record, (x, y)) in annotations.iter().zip(clicks) {
        assert_eq!(record.position(), Point::new(x, y));
        assert!(record.is_signed());
    }
}

#[test]
fn test_save_with_empty_pad_is_refused() {
    let mut session = loaded_session();
    session.click(Point::new(50.0, 50.0), Point::new(0.0, 0.0));

    assert!(!session.modal().can_save());
    assert_eq!(session.save().unwrap_err(), CaptureError::EmptySignature);
    assert!(session.modal().is_open());
    assert!(session.annotations().is_empty());
}

#[test]
fn test_save_without_open_modal_is_refused() {
    let mut session = loaded_session();
    assert_eq!(session.save().unwrap_err(), CaptureError::NotOpen);
    assert_eq!(session.cancel(), None);
}

#[test]
fn test_reopening_replaces_pending_and_clears_pad() {
    let mut session = loaded_session();
    session.click(Point::new(10.0, 10.0), Point::new(0.0, 0.0));
    draw_signature(&mut session);

    session.click(Point::new(60.0, 70.0), Point::new(0.0, 0.0));
    assert_eq!(
        session.modal().pending(),
        Some(PendingPlacement { x: 60.0, y: 70.0 })
    );
    assert!(session.modal().pad().is_empty());
}

#[test]
fn test_stale_load_cannot_replace_newer_document() {
    let mut session = SignerSession::new(SignerOptions::default());
    let first = session.begin_load();
    let second = session.begin_load();

    let outcome = session.finish_load(second, Ok(white_page(200, 100)));
    assert!(matches!(outcome, LoadOutcome::Installed { .. }));

    // The slow first load resolves afterwards and is dropped
    let outcome = session.finish_load(first, Ok(white_page(999, 999)));
    assert!(matches!(outcome, LoadOutcome::Stale));
    assert_eq!(
        session.document().unwrap().viewport(1).unwrap(),
        Viewport {
            width: 200,
            height: 100
        }
    );
    assert!(!session.is_loading());
}

#[test]
fn test_failed_load_keeps_previous_document() {
    let mut session = loaded_session();
    let generation = session.begin_load();
    assert!(session.is_loading());

    let outcome = session.finish_load(
        generation,
        Err(LoadError::DecodeFailure("bad xref".to_string()).into()),
    );
    assert!(matches!(
        outcome,
        LoadOutcome::Failed(SignerError::Load(LoadError::DecodeFailure(_)))
    ));
    assert!(!session.is_loading());
    assert_eq!(session.document().unwrap().page_count(), 1);
}

#[test]
fn test_annotations_survive_loading_another_document() {
    let mut session = loaded_session();
    session.click(Point::new(30.0, 30.0), Point::new(0.0, 0.0));
    draw_signature(&mut session);
    session.save().unwrap();

    let generation = session.begin_load();
    session.finish_load(generation, Ok(white_page(100, 100)));

    assert_eq!(session.annotations().len(), 1);
    let surface = session.composite().unwrap().unwrap();
    assert_eq!(surface.dimensions(), (100, 100));
    assert_ne!(surface.pixel(30, 30), Some(Rgba::WHITE));
}

#[test]
fn test_composite_before_load_is_empty() {
    let session = SignerSession::new(SignerOptions::default());
    assert!(session.composite().unwrap().is_none());
}

#[test]
fn test_store_is_append_only_snapshot() {
    let mut store = AnnotationStore::new();
    store.append(PlacementRecord::placeholder(1.0, 2.0));
    let snapshot: Vec<Point> = store.all().iter().map(|r| r.position()).collect();

    store.append(PlacementRecord::placeholder(3.0, 4.0));

    assert_eq!(snapshot, vec![Point::new(1.0, 2.0)]);
    assert_eq!(store.len(), 2);
    assert!(!store.all()[0].is_signed());
}

#[test]
fn test_reset_keeps_in_flight_loads_stale() {
    let mut session = loaded_session();
    session.click(Point::new(30.0, 30.0), Point::new(0.0, 0.0));
    draw_signature(&mut session);
    session.save().unwrap();

    // A second load is still decoding when the document is closed
    let in_flight = session.begin_load();
    session.reset();

    assert!(session.document().is_none());
    assert!(session.annotations().is_empty());
    assert!(!session.modal().is_open());
    assert!(!session.is_loading());
    assert!(session.current_generation() > in_flight);

    // Its result arrives with nothing newer requested
    let outcome = session.finish_load(in_flight, Ok(white_page(999, 999)));
    assert!(matches!(outcome, LoadOutcome::Stale));
    assert!(session.document().is_none());

    // Two new loads after the reset never reuse an earlier generation
    let first = session.begin_load();
    let second = session.begin_load();
    assert!(first > in_flight);
    assert_ne!(second, in_flight);

    let outcome = session.finish_load(in_flight, Ok(white_page(999, 999)));
    assert!(matches!(outcome, LoadOutcome::Stale));
    assert!(session.is_loading());

    let outcome = session.finish_load(second, Ok(white_page(200, 100)));
    assert!(matches!(outcome, LoadOutcome::Installed { page_count: 1 }));
    assert_eq!(session.document().unwrap().viewport(1).unwrap().width, 200);
}
