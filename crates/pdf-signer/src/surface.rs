//! Resizable RGBA drawing surface

use crate::types::{Rgba, Size};
use image::{RgbaImage, imageops};

/// Pixel surface the page and its annotations are painted into.
///
/// Resizing discards the previous contents, so anything drawn before a
/// resize is gone afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pixels: RgbaImage,
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Set the pixel dimensions, clearing the surface to transparent
    pub fn resize(&mut self, width: u32, height: u32) {
        self.pixels = RgbaImage::new(width, height);
    }

    /// Replace every pixel of the surface with `image`, which must match the
    /// surface dimensions.
    pub fn paint(&mut self, image: &RgbaImage) {
        debug_assert_eq!(image.dimensions(), self.pixels.dimensions());
        imageops::replace(&mut self.pixels, image, 0, 0);
    }

    /// Fill the whole surface with one colour
    pub fn fill(&mut self, color: Rgba) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = color.to_pixel();
        }
    }

    /// Alpha-blend `image` scaled to `size` with its top-left at (x, y).
    /// Parts falling outside the surface are clipped.
    pub fn blit(&mut self, image: &RgbaImage, x: i64, y: i64, size: Size) {
        if size.width == 0 || size.height == 0 || image.width() == 0 || image.height() == 0 {
            return;
        }

        if image.dimensions() == (size.width, size.height) {
            imageops::overlay(&mut self.pixels, image, x, y);
        } else {
            let scaled = imageops::resize(
                image,
                size.width,
                size.height,
                imageops::FilterType::Triangle,
            );
            imageops::overlay(&mut self.pixels, &scaled, x, y);
        }
    }

    /// Alpha-blend a solid rectangle with its top-left at (x, y)
    pub fn fill_rect(&mut self, x: i64, y: i64, size: Size, color: Rgba) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        let block = RgbaImage::from_pixel(size.width, size.height, color.to_pixel());
        imageops::overlay(&mut self.pixels, &block, x, y);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x < self.width() && y < self.height() {
            Some(Rgba(self.pixels.get_pixel(x, y).0))
        } else {
            None
        }
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    /// Raw RGBA bytes, row-major
    pub fn as_rgba_bytes(&self) -> &[u8] {
        self.pixels.as_raw()
    }
}
