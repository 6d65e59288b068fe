//! Visual style of a bordered rect.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::line_width::LineWidth;
use crate::types::{Bounds, Rgba};

/// Unit in which a [`RectStyle`]'s line width is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineWidthUnit {
    /// Pixels; normalized against the rect's size before upload.
    #[default]
    Pixels,
    /// Already a fraction of the rect's UV space.
    Normalized,
}

/// Fill, border color and border thickness of one rect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectStyle {
    #[serde(rename = "fill", default)]
    pub fill_color: Rgba,
    #[serde(rename = "line", default)]
    pub line_color: Rgba,
    #[serde(default)]
    pub line_width: LineWidth,
    #[serde(default)]
    pub line_width_unit: LineWidthUnit,
}

impl Default for RectStyle {
    fn default() -> Self {
        Self {
            fill_color: Rgba::WHITE,
            line_color: Rgba::WHITE,
            line_width: LineWidth::default(),
            line_width_unit: LineWidthUnit::Pixels,
        }
    }
}

impl RectStyle {
    pub fn new(fill_color: Rgba, line_color: Rgba, line_width: impl Into<LineWidth>) -> Self {
        Self {
            fill_color,
            line_color,
            line_width: line_width.into(),
            line_width_unit: LineWidthUnit::Pixels,
        }
    }

    pub fn with_unit(mut self, unit: LineWidthUnit) -> Self {
        self.line_width_unit = unit;
        self
    }

    /// The line width as UV fractions for a rect drawn at `bounds`.
    pub fn normalized_line_width(&self, bounds: &Bounds) -> LineWidth {
        match self.line_width_unit {
            LineWidthUnit::Pixels => self.line_width.normalized_in(bounds.size),
            LineWidthUnit::Normalized => self.line_width,
        }
    }

    /// Same as [`Self::normalized_line_width`], as the shader's `vec2`.
    pub fn line_width_uniform(&self, bounds: &Bounds, clamp: bool) -> Vec2 {
        let width = self.normalized_line_width(bounds);
        if clamp {
            width.clamped().to_vec2()
        } else {
            width.to_vec2()
        }
    }
}
