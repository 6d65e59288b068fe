//! Border thickness.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::types::RectSize;

/// Thickness of the border band.
///
/// `x` is the thickness of the left and right borders, `y` of the top and
/// bottom borders. Depending on context the values are pixels or fractions
/// of the rect's UV space; see [`LineWidth::normalized_in`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LineWidth {
    /// All borders have the same line width.
    Uniform(f32),
    /// Vertical and horizontal borders have different line widths.
    PerAxis { x: f32, y: f32 },
}

impl Default for LineWidth {
    fn default() -> Self {
        Self::Uniform(0.0)
    }
}

impl From<f32> for LineWidth {
    fn from(width: f32) -> Self {
        Self::Uniform(width)
    }
}

impl From<Vec2> for LineWidth {
    fn from(v: Vec2) -> Self {
        Self::PerAxis { x: v.x, y: v.y }
    }
}

impl LineWidth {
    pub const fn x(&self) -> f32 {
        match *self {
            Self::Uniform(width) => width,
            Self::PerAxis { x, .. } => x,
        }
    }

    pub const fn y(&self) -> f32 {
        match *self {
            Self::Uniform(width) => width,
            Self::PerAxis { y, .. } => y,
        }
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x(), self.y())
    }

    /// Convert pixel widths into fractions of a rect of the given size.
    ///
    /// An axis with zero (or non-finite) extent yields 0 instead of NaN or
    /// infinity.
    pub fn normalized_in(self, size: RectSize) -> Self {
        let divide = |width: f32, extent: f32| {
            let fraction = width / extent;
            if fraction.is_finite() {
                fraction
            } else {
                0.0
            }
        };
        Self::PerAxis {
            x: divide(self.x(), size.width),
            y: divide(self.y(), size.height),
        }
    }

    /// Clamp each axis of a normalized width into `[0, 0.5]`.
    pub fn clamped(self) -> Self {
        Self::PerAxis {
            x: self.x().clamp(0.0, 0.5),
            y: self.y().clamp(0.0, 0.5),
        }
    }

    /// A normalized width that leaves no visible fill.
    pub fn covers_entire_rect(&self) -> bool {
        self.x() >= 0.5 || self.y() >= 0.5
    }

    /// A normalized width for which the border test can never pass.
    pub fn is_unreachable(&self) -> bool {
        self.x() < 0.0 && self.y() < 0.0
    }
}
