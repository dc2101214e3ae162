use std::sync::Arc;
use thiserror::Error;

/// Failure to turn user-supplied bytes into a document
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to decode PDF: {0}")]
    DecodeFailure(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    #[error("Document has no page {0}")]
    NoSuchPage(usize),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureError {
    #[error("Signature pad is empty")]
    EmptySignature,
    #[error("Signature modal is not open")]
    NotOpen,
}

#[derive(Error, Debug)]
pub enum SignerError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("{0}")]
    Worker(String),
}

pub type Result<T> = std::result::Result<T, SignerError>;

/// Decoded raster shared between the store, snapshots and the compositor
pub type RasterImage = Arc<image::RgbaImage>;

/// A position in pixels. Whether it is viewport- or surface-relative depends
/// on where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Pixel dimensions of a page at a given render scale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Viewport for a page measured in PDF user-space units.
    ///
    /// At scale 1.0 one user-space unit maps to one pixel. Fractional sizes
    /// round up so the whole page fits; degenerate pages still get one pixel.
    pub fn from_points(width_pt: f32, height_pt: f32, scale: f32) -> Self {
        let to_px = |v: f32| ((v * scale).abs().ceil() as u32).max(1);
        Self {
            width: to_px(width_pt),
            height: to_px(height_pt),
        }
    }

    /// Like [`Viewport::from_points`], but refuses pages that cannot be
    /// rasterized: non-finite sizes, sides beyond [`MAX_PAGE_UNITS`] or a
    /// pixel count above [`MAX_PAGE_PIXELS`].
    pub fn checked_from_points(
        width_pt: f32,
        height_pt: f32,
        scale: f32,
    ) -> std::result::Result<Self, LoadError> {
        if !(width_pt.is_finite() && height_pt.is_finite() && scale.is_finite() && scale > 0.0) {
            return Err(LoadError::DecodeFailure(format!(
                "Invalid page size {}x{} at scale {}",
                width_pt, height_pt, scale
            )));
        }
        if width_pt.abs() > MAX_PAGE_UNITS || height_pt.abs() > MAX_PAGE_UNITS {
            return Err(LoadError::DecodeFailure(format!(
                "Page size {}x{} exceeds the {} unit limit",
                width_pt, height_pt, MAX_PAGE_UNITS
            )));
        }

        let viewport = Self::from_points(width_pt, height_pt, scale);
        let pixels = u64::from(viewport.width).checked_mul(u64::from(viewport.height));
        match pixels {
            Some(pixels) if pixels <= MAX_PAGE_PIXELS => Ok(viewport),
            _ => Err(LoadError::DecodeFailure(format!(
                "Page raster {}x{} is too large",
                viewport.width, viewport.height
            ))),
        }
    }
}

/// Largest page side allowed by PDF, in user-space units
pub const MAX_PAGE_UNITS: f32 = 14_400.0;

/// Upper bound on the pixels of one page raster (1 GiB of RGBA)
pub const MAX_PAGE_PIXELS: u64 = 1 << 28;

/// Width and height of a rectangular footprint in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Top-left corner of this footprint when centered on `center`
    pub fn top_left_centered_at(self, center: Point) -> (i64, i64) {
        (
            (center.x - self.width as f32 / 2.0).round() as i64,
            (center.y - self.height as f32 / 2.0).round() as i64,
        )
    }
}

/// Straight RGBA colour, alpha unpremultiplied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const BLACK: Rgba = Rgba([0, 0, 0, 255]);
    pub const WHITE: Rgba = Rgba([255, 255, 255, 255]);
    pub const TRANSPARENT: Rgba = Rgba([0, 0, 0, 0]);

    pub fn to_pixel(self) -> image::Rgba<u8> {
        image::Rgba(self.0)
    }
}
