use image::RgbaImage;
use pdf_signer::*;
use std::sync::Arc;

fn white_page(width: u32, height: u32) -> DocumentHandle {
    let pixels = RgbaImage::from_pixel(width, height, Rgba::WHITE.to_pixel());
    DocumentHandle::new(1, Some(PageRaster::new(pixels)))
}

fn solid(width: u32, height: u32, color: Rgba) -> RasterImage {
    Arc::new(RgbaImage::from_pixel(width, height, color.to_pixel()))
}

#[test]
fn test_signature_fills_footprint_centered_on_record() {
    let document = white_page(300, 200);
    let blue = Rgba([0, 0, 255, 255]);
    let record = PlacementRecord::signed(100.0, 50.0, solid(240, 120, blue));

    let surface = composite(&document, &[record], None, &SignerOptions::default()).unwrap();

    // 60x30 box centered at (100, 50) spans x 70..130, y 35..65
    assert_eq!(surface.pixel(70, 35), Some(blue));
    assert_eq!(surface.pixel(129, 64), Some(blue));
    assert_eq!(surface.pixel(100, 50), Some(blue));
    assert_eq!(surface.pixel(69, 50), Some(Rgba::WHITE));
    assert_eq!(surface.pixel(130, 50), Some(Rgba::WHITE));
    assert_eq!(surface.pixel(100, 34), Some(Rgba::WHITE));
    assert_eq!(surface.pixel(100, 65), Some(Rgba::WHITE));
}

#[test]
fn test_unsigned_record_draws_translucent_placeholder() {
    let document = white_page(100, 100);
    let record = PlacementRecord::placeholder(50.0, 50.0);

    let surface = composite(&document, &[record], None, &SignerOptions::default()).unwrap();

    // 30x30 square centered at (50, 50) spans 35..65
    let Rgba([r, g, b, a]) = surface.pixel(50, 50).unwrap();
    assert_eq!(r, 255);
    assert!((120..=135).contains(&g), "green channel was {g}");
    assert!((120..=135).contains(&b), "blue channel was {b}");
    assert_eq!(a, 255);

    assert_ne!(surface.pixel(35, 35), Some(Rgba::WHITE));
    assert_eq!(surface.pixel(34, 50), Some(Rgba::WHITE));
    assert_eq!(surface.pixel(65, 50), Some(Rgba::WHITE));
}

#[test]
fn test_later_records_paint_over_earlier_ones() {
    let document = white_page(200, 200);
    let red = Rgba([255, 0, 0, 255]);
    let green = Rgba([0, 255, 0, 255]);
    let records = [
        PlacementRecord::signed(100.0, 100.0, solid(60, 30, red)),
        PlacementRecord::signed(100.0, 100.0, solid(60, 30, green)),
    ];

    let surface = composite(&document, &records, None, &SignerOptions::default()).unwrap();
    assert_eq!(surface.pixel(100, 100), Some(green));

    let surface = composite(
        &document,
        &[records[1].clone(), records[0].clone()],
        None,
        &SignerOptions::default(),
    )
    .unwrap();
    assert_eq!(surface.pixel(100, 100), Some(red));
}

#[test]
fn test_page_redraw_wipes_annotations() {
    let document = white_page(120, 80);
    let black = solid(60, 30, Rgba::BLACK);
    let record = PlacementRecord::signed(60.0, 40.0, black);

    let mut surface = Surface::default();
    composite_into(
        &mut surface,
        &document,
        &[record],
        None,
        &SignerOptions::default(),
    )
    .unwrap();
    assert_eq!(surface.pixel(60, 40), Some(Rgba::BLACK));

    render_page(&document, FIRST_PAGE, &mut surface).unwrap();
    assert!(
        surface
            .as_rgba_bytes()
            .chunks_exact(4)
            .all(|px| px == [255, 255, 255, 255])
    );
}

#[test]
fn test_pending_placeholder_only_when_enabled() {
    let document = white_page(100, 100);
    let pending = PendingPlacement { x: 50.0, y: 50.0 };

    let hidden = composite(&document, &[], Some(pending), &SignerOptions::default()).unwrap();
    assert_eq!(hidden.pixel(50, 50), Some(Rgba::WHITE));

    let options = SignerOptions {
        show_pending_placeholder: true,
        ..SignerOptions::default()
    };
    let shown = composite(&document, &[], Some(pending), &options).unwrap();
    assert_ne!(shown.pixel(50, 50), Some(Rgba::WHITE));
}

#[test]
fn test_annotations_outside_page_are_clipped() {
    let document = white_page(50, 50);
    let records = [
        PlacementRecord::signed(0.0, 0.0, solid(60, 30, Rgba::BLACK)),
        PlacementRecord::signed(500.0, -200.0, solid(60, 30, Rgba::BLACK)),
        PlacementRecord::placeholder(-10.0, 49.0),
    ];

    let surface = composite(&document, &records, None, &SignerOptions::default()).unwrap();

    assert_eq!(surface.dimensions(), (50, 50));
    assert_eq!(surface.pixel(0, 0), Some(Rgba::BLACK));
    assert_eq!(surface.pixel(49, 0), Some(Rgba::WHITE));
}

#[test]
fn test_composite_without_pages_fails() {
    let result = composite(
        &DocumentHandle::empty(),
        &[],
        None,
        &SignerOptions::default(),
    );
    assert_eq!(result.unwrap_err(), RenderError::NoSuchPage(1));
}
