use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tunables for rendering, compositing and signature capture
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SignerOptions {
    // Page rendering
    pub render_scale: f32,

    // Compositing
    pub signature_size: Size,
    pub placeholder_size: u32,
    pub placeholder_color: Rgba,

    // Draw the pending click as a placeholder while the modal is open
    pub show_pending_placeholder: bool,

    // Signature pad
    pub pad_size: Size,
    pub pen_width: f32,
    pub pen_color: Rgba,
}

impl Default for SignerOptions {
    fn default() -> Self {
        Self {
            render_scale: 1.0,
            signature_size: Size::new(60, 30),
            placeholder_size: 30,
            placeholder_color: Rgba([255, 0, 0, 128]),
            show_pending_placeholder: false,
            pad_size: Size::new(500, 200),
            pen_width: 2.5,
            pen_color: Rgba::BLACK,
        }
    }
}

impl SignerOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: Self = serde_json::from_slice(&bytes)
            .map_err(|e| SignerError::Config(format!("Failed to parse config: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SignerError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.render_scale.is_finite() && self.render_scale > 0.0) {
            return Err(SignerError::Config(format!(
                "Render scale must be positive, got {}",
                self.render_scale
            )));
        }

        if self.signature_size.width == 0 || self.signature_size.height == 0 {
            return Err(SignerError::Config(
                "Signature size must be non-zero".to_string(),
            ));
        }

        if self.placeholder_size == 0 {
            return Err(SignerError::Config(
                "Placeholder size must be non-zero".to_string(),
            ));
        }

        if self.pad_size.width == 0 || self.pad_size.height == 0 {
            return Err(SignerError::Config("Pad size must be non-zero".to_string()));
        }

        if !(self.pen_width.is_finite() && self.pen_width > 0.0) {
            return Err(SignerError::Config(format!(
                "Pen width must be positive, got {}",
                self.pen_width
            )));
        }

        Ok(())
    }
}
