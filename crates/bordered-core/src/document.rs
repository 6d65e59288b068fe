//! Frame documents: a canvas plus the bordered rects to draw on it.
//!
//! Documents are JSON:
//!
//! ```json
//! {
//!   "width": 256,
//!   "height": 128,
//!   "background": "#FFFFFF",
//!   "rects": [
//!     { "x": 16, "y": 16, "width": 96, "height": 64,
//!       "fill": "#3B82F6", "line": "#1E3A8A", "line_width": 4 }
//!   ]
//! }
//! ```

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::ConfigError;
use crate::style::RectStyle;
use crate::types::{Bounds, Rgba};

/// One rect of a frame document, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectSpec {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(flatten)]
    pub style: RectStyle,
}

impl RectSpec {
    pub fn new(bounds: Bounds, style: RectStyle) -> Self {
        Self {
            x: bounds.x_min(),
            y: bounds.y_min(),
            width: bounds.width(),
            height: bounds.height(),
            style,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_scalars(self.x, self.y, self.width, self.height)
    }
}

/// A rect with every value resolved to what the shader consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedRect {
    pub bounds: Bounds,
    pub fill_color: Rgba,
    pub line_color: Rgba,
    /// Normalized line width, clamped if the document asks for it.
    pub line_width: Vec2,
}

/// A canvas and the rects drawn on it, back to front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameDocument {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub background: Rgba,
    /// Clamp normalized line widths into `[0, 0.5]` before upload.
    #[serde(default)]
    pub clamp_line_width: bool,
    /// Treat every color, hex or component array, as sRGB-encoded and
    /// convert it to linear.
    #[serde(default)]
    pub srgb_colors: bool,
    #[serde(default)]
    pub rects: Vec<RectSpec>,
}

impl FrameDocument {
    /// An empty document with a white background.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: Rgba::WHITE,
            clamp_line_width: false,
            srgb_colors: false,
            rects: Vec::new(),
        }
    }

    pub fn with_background(mut self, background: Rgba) -> Self {
        self.background = background;
        self
    }

    pub fn with_rect(mut self, bounds: Bounds, style: RectStyle) -> Self {
        self.rects.push(RectSpec::new(bounds, style));
        self
    }

    /// Parse and validate a document from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let doc: FrameDocument = serde_json::from_str(json)?;
        doc.validate()?;
        doc.warn_about_line_widths();
        Ok(doc)
    }

    /// Read, parse and validate a document from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let doc = Self::from_json_str(&content)?;
        info!(
            "loaded frame document from {} ({}x{}, {} rects)",
            path.display(),
            doc.width,
            doc.height,
            doc.rects.len()
        );
        Ok(doc)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check canvas dimensions and rect geometry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        for (index, rect) in self.rects.iter().enumerate() {
            if rect.bounds().is_degenerate() {
                return Err(ConfigError::InvalidRect {
                    index,
                    reason: format!(
                        "bounds {}x{} at ({}, {}) have no drawable area",
                        rect.width, rect.height, rect.x, rect.y
                    ),
                });
            }
        }

        Ok(())
    }

    fn warn_about_line_widths(&self) {
        for (index, rect) in self.rects.iter().enumerate() {
            let width = rect.style.normalized_line_width(&rect.bounds());
            if width.covers_entire_rect() {
                warn!(
                    index,
                    x = width.x(),
                    y = width.y(),
                    "line width covers the entire rect, no fill will be visible"
                );
            } else if width.is_unreachable() {
                warn!(
                    index,
                    x = width.x(),
                    y = width.y(),
                    "negative line width, border will never be drawn"
                );
            }
        }
    }

    /// Background color after color space resolution.
    pub fn background_color(&self) -> Rgba {
        self.resolve_color(self.background)
    }

    /// Resolve every rect to shader inputs, in draw order.
    pub fn resolved_rects(&self) -> Vec<ResolvedRect> {
        self.rects
            .iter()
            .map(|rect| {
                let bounds = rect.bounds();
                let resolved = ResolvedRect {
                    bounds,
                    fill_color: self.resolve_color(rect.style.fill_color),
                    line_color: self.resolve_color(rect.style.line_color),
                    line_width: rect
                        .style
                        .line_width_uniform(&bounds, self.clamp_line_width),
                };
                debug!(?resolved, "resolved rect");
                resolved
            })
            .collect()
    }

    fn resolve_color(&self, color: Rgba) -> Rgba {
        if self.srgb_colors {
            Rgba::from_srgb(color)
        } else {
            color
        }
    }
}
