// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rich styling support.

mod brush;
mod stylesheet;

pub use brush::Brush;
pub use stylesheet::StyleSheet;

use crate::font::FontId;

/// Alignment of a line within its column.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum Alignment {
    /// Stretch inter-glyph spacing so each soft-wrapped line exactly fills
    /// its column. The last line of a paragraph keeps natural spacing.
    #[default]
    Justified,
    /// Align content to the left edge.
    Left,
    /// Align each line centered within the column.
    Middle,
    /// Align content to the right edge.
    Right,
}

/// Properties that define a style.
#[derive(Clone, PartialEq, Debug)]
pub enum StyleProperty<B: Brush> {
    /// Font face, as issued by the host's font loader.
    FontFamily(FontId),
    /// Font size.
    FontSize(f32),
    /// Horizontal glyph scale factor.
    HorizontalScale(f32),
    /// Extra spacing between glyphs.
    LetterSpacing(f32),
    /// Line height multiplier.
    LineHeight(f32),
    /// Line alignment.
    Alignment(Alignment),
    /// Underline decoration.
    Underline(bool),
    /// Strike-through decoration.
    Strikethrough(bool),
    /// Indent applied to the first line of a paragraph.
    FirstLineIndent(f32),
    /// Brush for rendering text.
    Brush(B),
}

/// Partially-specified style attributes.
///
/// `None` means "inherit": the attribute falls through to the named style
/// and then to the parent's resolved value during the cascade.
#[derive(Clone, PartialEq, Debug)]
pub struct PartialStyle<B: Brush> {
    /// Font face.
    pub font: Option<FontId>,
    /// Font size.
    pub font_size: Option<f32>,
    /// Horizontal glyph scale factor.
    pub horizontal_scale: Option<f32>,
    /// Extra spacing between glyphs.
    pub letter_spacing: Option<f32>,
    /// Line height multiplier.
    pub line_height: Option<f32>,
    /// Line alignment.
    pub alignment: Option<Alignment>,
    /// Underline decoration.
    pub underline: Option<bool>,
    /// Strike-through decoration.
    pub strikethrough: Option<bool>,
    /// First line indent.
    pub first_line_indent: Option<f32>,
    /// Brush for rendering text.
    pub brush: Option<B>,
}

impl<B: Brush> Default for PartialStyle<B> {
    fn default() -> Self {
        Self {
            font: None,
            font_size: None,
            horizontal_scale: None,
            letter_spacing: None,
            line_height: None,
            alignment: None,
            underline: None,
            strikethrough: None,
            first_line_indent: None,
            brush: None,
        }
    }
}

impl<B: Brush> PartialStyle<B> {
    /// Creates a style with every attribute unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the attribute carried by `property`, replacing any prior value.
    pub fn apply(&mut self, property: StyleProperty<B>) {
        match property {
            StyleProperty::FontFamily(value) => self.font = Some(value),
            StyleProperty::FontSize(value) => self.font_size = Some(value),
            StyleProperty::HorizontalScale(value) => self.horizontal_scale = Some(value),
            StyleProperty::LetterSpacing(value) => self.letter_spacing = Some(value),
            StyleProperty::LineHeight(value) => self.line_height = Some(value),
            StyleProperty::Alignment(value) => self.alignment = Some(value),
            StyleProperty::Underline(value) => self.underline = Some(value),
            StyleProperty::Strikethrough(value) => self.strikethrough = Some(value),
            StyleProperty::FirstLineIndent(value) => self.first_line_indent = Some(value),
            StyleProperty::Brush(value) => self.brush = Some(value),
        }
    }

    /// Builds a style from a sequence of properties.
    pub fn from_properties(properties: impl IntoIterator<Item = StyleProperty<B>>) -> Self {
        let mut style = Self::new();
        for property in properties {
            style.apply(property);
        }
        style
    }

    /// Returns `true` if no attribute is set.
    pub fn is_empty(&self) -> bool {
        self.font.is_none()
            && self.font_size.is_none()
            && self.horizontal_scale.is_none()
            && self.letter_spacing.is_none()
            && self.line_height.is_none()
            && self.alignment.is_none()
            && self.underline.is_none()
            && self.strikethrough.is_none()
            && self.first_line_indent.is_none()
            && self.brush.is_none()
    }
}
