use crate::types::*;

/// A position on the page, optionally carrying the captured signature.
///
/// Records are immutable once created; attaching a signature to a pending
/// placement produces a new record.
#[derive(Debug, Clone)]
pub struct PlacementRecord {
    x: f32,
    y: f32,
    signature: Option<RasterImage>,
}

impl PlacementRecord {
    /// Record without a signature, drawn as a placeholder
    pub fn placeholder(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            signature: None,
        }
    }

    pub fn signed(x: f32, y: f32, signature: RasterImage) -> Self {
        Self {
            x,
            y,
            signature: Some(signature),
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn signature(&self) -> Option<&RasterImage> {
        self.signature.as_ref()
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }
}

/// A clicked position waiting for the user to draw and save a signature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingPlacement {
    pub x: f32,
    pub y: f32,
}

impl PendingPlacement {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Finalize into a record carrying `signature`
    pub fn sign(self, signature: RasterImage) -> PlacementRecord {
        PlacementRecord::signed(self.x, self.y, signature)
    }

    pub fn as_placeholder(&self) -> PlacementRecord {
        PlacementRecord::placeholder(self.x, self.y)
    }
}

/// Turns pointer clicks on the page surface into pending placements
#[derive(Debug, Clone, Copy, Default)]
pub struct PlacementController;

impl PlacementController {
    /// `client` is the pointer position in viewport coordinates and
    /// `surface_origin` the top-left of the surface's bounding box in the
    /// same coordinates. Clicks outside the page are not rejected.
    pub fn on_surface_click(&self, client: Point, surface_origin: Point) -> PendingPlacement {
        let local = client - surface_origin;
        PendingPlacement {
            x: local.x,
            y: local.y,
        }
    }
}
