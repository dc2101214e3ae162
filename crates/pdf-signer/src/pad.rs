//! Freehand signature capture

use crate::types::*;
use image::RgbaImage;

/// Stroke model behind the signature drawing area.
///
/// Points are in pad-local pixels. Strokes are kept as polylines and only
/// rasterized when the signature is exported.
#[derive(Debug, Clone)]
pub struct SignaturePad {
    size: Size,
    pen_width: f32,
    pen_color: Rgba,
    strokes: Vec<Vec<Point>>,
    drawing: bool,
}

impl SignaturePad {
    pub fn new(size: Size, pen_width: f32, pen_color: Rgba) -> Self {
        Self {
            size,
            pen_width,
            pen_color,
            strokes: Vec::new(),
            drawing: false,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn pen_width(&self) -> f32 {
        self.pen_width
    }

    pub fn set_pen_width(&mut self, width: f32) {
        self.pen_width = width.max(0.5);
    }

    pub fn pen_color(&self) -> Rgba {
        self.pen_color
    }

    pub fn strokes(&self) -> &[Vec<Point>] {
        &self.strokes
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn begin_stroke(&mut self, point: Point) {
        self.strokes.push(vec![self.clamp(point)]);
        self.drawing = true;
    }

    /// Add a point to the stroke in progress; ignored when no stroke is open
    pub fn extend_stroke(&mut self, point: Point) {
        if !self.drawing {
            return;
        }
        let point = self.clamp(point);
        if let Some(stroke) = self.strokes.last_mut() {
            if stroke.last() != Some(&point) {
                stroke.push(point);
            }
        }
    }

    pub fn end_stroke(&mut self) {
        self.drawing = false;
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
        self.drawing = false;
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Rasterize all strokes at pad size on a transparent background
    pub fn rasterize(&self) -> RgbaImage {
        let mut image = RgbaImage::new(self.size.width, self.size.height);
        let radius = self.pen_width / 2.0;

        for stroke in &self.strokes {
            match stroke.as_slice() {
                [] => {}
                [dot] => stamp(&mut image, *dot, radius, self.pen_color),
                points => {
                    for segment in points.windows(2) {
                        draw_segment(&mut image, segment[0], segment[1], radius, self.pen_color);
                    }
                }
            }
        }
        image
    }

    /// Export the drawing cropped to the bounding box of painted pixels.
    ///
    /// Returns `None` when nothing has been drawn.
    pub fn export_trimmed_image(&self) -> Option<RgbaImage> {
        if self.is_empty() {
            return None;
        }
        let image = self.rasterize();
        let (x, y, width, height) = painted_bounds(&image)?;
        Some(image::imageops::crop_imm(&image, x, y, width, height).to_image())
    }

    fn clamp(&self, point: Point) -> Point {
        Point::new(
            point.x.clamp(0.0, self.size.width as f32),
            point.y.clamp(0.0, self.size.height as f32),
        )
    }
}

/// Smallest rectangle containing every non-transparent pixel
fn painted_bounds(image: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel.0[3] == 0 {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((min_x, min_y, max_x, max_y)) => {
                (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
            }
        });
    }
    bounds.map(|(min_x, min_y, max_x, max_y)| (min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
}

fn draw_segment(image: &mut RgbaImage, from: Point, to: Point, radius: f32, color: Rgba) {
    let delta = to - from;
    let length = (delta.x * delta.x + delta.y * delta.y).sqrt();
    // Half-pixel steps keep the stroke free of gaps
    let steps = (length * 2.0).ceil().max(1.0) as usize;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        stamp(
            image,
            Point::new(from.x + delta.x * t, from.y + delta.y * t),
            radius,
            color,
        );
    }
}

/// Paint a filled disc. Pixels covered by the pen take the pen colour as-is.
fn stamp(image: &mut RgbaImage, center: Point, radius: f32, color: Rgba) {
    let radius = radius.max(0.5);
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    let min_x = (center.x - radius).floor().max(0.0) as u32;
    let min_y = (center.y - radius).floor().max(0.0) as u32;
    let max_x = ((center.x + radius).ceil() as u32).min(width - 1);
    let max_y = ((center.y + radius).ceil() as u32).min(height - 1);
    let radius_sq = radius * radius;

    // The pixel under the pen tip is always inked, even for hairline pens
    let tip_x = (center.x.max(0.0) as u32).min(width - 1);
    let tip_y = (center.y.max(0.0) as u32).min(height - 1);
    image.put_pixel(tip_x, tip_y, color.to_pixel());

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f32 + 0.5 - center.x;
            let dy = y as f32 + 0.5 - center.y;
            if dx * dx + dy * dy <= radius_sq {
                image.put_pixel(x, y, color.to_pixel());
            }
        }
    }
}
