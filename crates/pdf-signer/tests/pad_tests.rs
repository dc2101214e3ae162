use pdf_signer::*;

fn pad() -> SignaturePad {
    SignaturePad::new(Size::new(500, 200), 2.0, Rgba::BLACK)
}

#[test]
fn test_empty_pad_exports_nothing() {
    let pad = pad();
    assert!(pad.is_empty());
    assert!(pad.export_trimmed_image().is_none());
}

#[test]
fn test_export_is_trimmed_to_ink() {
    let mut pad = pad();
    pad.begin_stroke(Point::new(100.0, 50.0));
    pad.extend_stroke(Point::new(200.0, 50.0));
    pad.extend_stroke(Point::new(200.0, 90.0));
    pad.end_stroke();

    let image = pad.export_trimmed_image().unwrap();

    // 100x40 polyline plus the pen radius on each side
    assert!((100..=104).contains(&image.width()), "width {}", image.width());
    assert!((40..=44).contains(&image.height()), "height {}", image.height());

    // Trimmed: ink touches every edge
    let inked = |x: u32, y: u32| image.get_pixel(x, y).0[3] > 0;
    assert!((0..image.height()).any(|y| inked(0, y)));
    assert!((0..image.height()).any(|y| inked(image.width() - 1, y)));
    assert!((0..image.width()).any(|x| inked(x, 0)));
    assert!((0..image.width()).any(|x| inked(x, image.height() - 1)));
}

#[test]
fn test_single_tap_leaves_a_dot() {
    let mut pad = SignaturePad::new(Size::new(500, 200), 0.5, Rgba::BLACK);
    pad.begin_stroke(Point::new(500.0, 200.0));
    pad.end_stroke();

    assert!(!pad.is_empty());
    let image = pad.export_trimmed_image().unwrap();
    assert!(image.width() >= 1 && image.height() >= 1);
    assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0, 255]);
}

#[test]
fn test_points_outside_pad_are_clamped() {
    let mut pad = pad();
    pad.begin_stroke(Point::new(-50.0, -50.0));
    pad.extend_stroke(Point::new(900.0, 900.0));
    pad.end_stroke();

    let stroke = &pad.strokes()[0];
    assert_eq!(stroke[0], Point::new(0.0, 0.0));
    assert_eq!(stroke[1], Point::new(500.0, 200.0));
}

#[test]
fn test_extend_without_open_stroke_is_ignored() {
    let mut pad = pad();
    pad.extend_stroke(Point::new(10.0, 10.0));
    assert!(pad.is_empty());

    pad.begin_stroke(Point::new(10.0, 10.0));
    pad.end_stroke();
    pad.extend_stroke(Point::new(20.0, 20.0));
    assert_eq!(pad.strokes()[0].len(), 1);
}

#[test]
fn test_clear_empties_pad() {
    let mut pad = pad();
    pad.begin_stroke(Point::new(10.0, 10.0));
    pad.extend_stroke(Point::new(30.0, 10.0));
    assert!(pad.is_drawing());

    pad.clear();
    assert!(pad.is_empty());
    assert!(!pad.is_drawing());
}

#[test]
fn test_strokes_are_drawn_in_pen_color() {
    let blue = Rgba([0, 0, 200, 255]);
    let mut pad = SignaturePad::new(Size::new(100, 100), 4.0, blue);
    pad.begin_stroke(Point::new(20.0, 50.0));
    pad.extend_stroke(Point::new(80.0, 50.0));
    pad.end_stroke();

    let raster = pad.rasterize();
    assert_eq!(raster.dimensions(), (100, 100));
    assert_eq!(raster.get_pixel(50, 50).0, blue.0);
    assert_eq!(raster.get_pixel(50, 10).0, [0, 0, 0, 0]);
}
