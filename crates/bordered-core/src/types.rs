//! Core value types: colors and rectangle geometry.

use std::str::FromStr;

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Convert one linear color channel to sRGB.
pub fn linear_to_srgb(linear: f32) -> f32 {
    if linear <= 0.0031308 {
        linear * 12.92
    } else {
        linear.powf(1.0 / 2.4) * 1.055 - 0.055
    }
}

/// Convert one sRGB color channel to linear.
pub fn srgb_to_linear(srgb: f32) -> f32 {
    if srgb <= 0.04045 {
        srgb / 12.92
    } else {
        ((srgb + 0.055) / 1.055).powf(2.4)
    }
}

/// An RGBA color with `f32` channels, as uploaded to the shader.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ColorValue", into = "[f32; 4]")]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create from a packed `0xRRGGBBAA` value.
    pub fn from_hex_u32(u: u32) -> Self {
        let [r, g, b, a] = u.to_be_bytes();
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create from hex string (e.g., "#3B82F6", "3B82F6" or "#3B82F680").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            6 => Some(Self::from_hex_u32(u32::from_be_bytes([
                channel(0)?,
                channel(2)?,
                channel(4)?,
                0xFF,
            ]))),
            8 => Some(Self::from_hex_u32(u32::from_be_bytes([
                channel(0)?,
                channel(2)?,
                channel(4)?,
                channel(6)?,
            ]))),
            _ => None,
        }
    }

    /// Interpret the channels as sRGB-encoded and convert them to linear.
    /// Alpha is left untouched.
    pub fn from_srgb(srgb: Self) -> Self {
        Self::new(
            srgb_to_linear(srgb.r),
            srgb_to_linear(srgb.g),
            srgb_to_linear(srgb.b),
            srgb.a,
        )
    }

    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Convert to 8-bit RGBA, rounding like a unorm render target.
    pub fn to_rgba8(self) -> [u8; 4] {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b), quantize(self.a)]
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<Rgba> for [f32; 4] {
    fn from(c: Rgba) -> Self {
        c.to_array()
    }
}

impl From<[f32; 4]> for Rgba {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self { r, g, b, a }
    }
}

/// Accepted serialized forms of a color.
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorValue {
    Hex(String),
    Components([f32; 4]),
}

impl FromStr for Rgba {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgba::from_hex(s).ok_or_else(|| ConfigError::InvalidColor {
            value: s.to_string(),
        })
    }
}

impl TryFrom<ColorValue> for Rgba {
    type Error = ConfigError;

    fn try_from(value: ColorValue) -> Result<Self, Self::Error> {
        match value {
            ColorValue::Hex(hex) => hex.parse(),
            ColorValue::Components(components) => Ok(components.into()),
        }
    }
}

/// Width and height of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectSize {
    pub width: f32,
    pub height: f32,
}

impl RectSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// An axis-aligned rectangle in pixel space, origin at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub origin: Vec2,
    pub size: RectSize,
}

impl Bounds {
    pub const fn new(origin: Vec2, size: RectSize) -> Self {
        Self { origin, size }
    }

    pub const fn from_scalars(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: RectSize::new(width, height),
        }
    }

    pub fn x_min(&self) -> f32 {
        self.origin.x
    }

    pub fn y_min(&self) -> f32 {
        self.origin.y
    }

    pub fn x_max(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn y_max(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.x_min() <= point.x
            && point.x <= self.x_max()
            && self.y_min() <= point.y
            && point.y <= self.y_max()
    }

    /// Shrink the bounds by `padding` on every side.
    pub fn with_padding(&self, padding: f32) -> Self {
        Self::from_scalars(
            self.x_min() + padding,
            self.y_min() + padding,
            self.width() - 2.0 * padding,
            self.height() - 2.0 * padding,
        )
    }

    /// True when the rect has no drawable area or non-finite coordinates.
    pub fn is_degenerate(&self) -> bool {
        let finite = self.origin.is_finite()
            && self.size.width.is_finite()
            && self.size.height.is_finite();
        !finite || self.size.width <= 0.0 || self.size.height <= 0.0
    }

    /// Transform that maps the unit square onto these bounds.
    pub fn model_view(&self) -> Mat4 {
        Mat4::from_translation(self.origin.extend(0.0))
            * Mat4::from_scale(Vec3::new(self.size.width, self.size.height, 1.0))
    }
}
