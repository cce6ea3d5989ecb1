//! Color, font and text-layout value types.

use bytemuck::{Pod, Zeroable};

/// An 8-bit RGBA color (straight alpha).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a color from 8-bit RGBA components.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit RGB components.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create a color from a 32-bit RGBA value (0xRRGGBBAA).
    #[inline]
    pub const fn from_u32(rgba: u32) -> Self {
        Self::rgba(
            ((rgba >> 24) & 0xFF) as u8,
            ((rgba >> 16) & 0xFF) as u8,
            ((rgba >> 8) & 0xFF) as u8,
            (rgba & 0xFF) as u8,
        )
    }

    /// Create a color from a hex string (e.g., "#FF0000" or "#FF0000FF").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return None;
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Return the same color with a different alpha.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const GRAY: Self = Self::rgb(128, 128, 128);
}

/// A font request: face name plus point size.
///
/// A size of `0.0` (or an empty face) means "inherit the default"; the widget
/// toolkit resolves inherited values before handing a spec to a renderer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FontSpec {
    pub face: String,
    pub size: f32,
}

impl FontSpec {
    pub fn new(face: impl Into<String>, size: f32) -> Self {
        Self {
            face: face.into(),
            size,
        }
    }

    /// Fill unset fields from `fallback`.
    pub fn resolved(&self, fallback: &FontSpec) -> FontSpec {
        FontSpec {
            face: if self.face.is_empty() {
                fallback.face.clone()
            } else {
                self.face.clone()
            },
            size: if self.size > 0.0 { self.size } else { fallback.size },
        }
    }
}

/// One line produced by [`Renderer::line_break`](crate::Renderer::line_break).
///
/// All offsets are byte offsets into the text passed to `line_break`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineBreak {
    /// Start of the line's visible text.
    pub start: usize,
    /// Length of the line's visible text, trailing spaces excluded.
    pub len: usize,
    /// Where the next line begins, or `None` if this was the last line.
    pub next: Option<usize>,
}

impl LineBreak {
    /// The visible text of this line.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.start + self.len]
    }
}
