// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The style cascade: explicit overrides over named styles over inheritance.

use crate::font::FontId;
use crate::style::{Alignment, Brush, PartialStyle, StyleSheet};

/// Fully-specified style produced by the cascade.
///
/// Every attribute is concrete except `font`, which stays unset until some
/// tier of the cascade names a face; itemization reports that as a
/// configuration error when glyphs are actually required.
#[derive(Clone, PartialEq, Debug)]
pub struct ResolvedStyle<B: Brush> {
    /// Font face, if any tier named one.
    pub font: Option<FontId>,
    /// Font size.
    pub font_size: f32,
    /// Horizontal glyph scale factor.
    pub horizontal_scale: f32,
    /// Extra spacing between glyphs.
    pub letter_spacing: f32,
    /// Line height multiplier.
    pub line_height: f32,
    /// Line alignment.
    pub alignment: Alignment,
    /// Underline decoration.
    pub underline: bool,
    /// Strike-through decoration.
    pub strikethrough: bool,
    /// Indent applied to the first line of a paragraph.
    pub first_line_indent: f32,
    /// Brush for rendering text.
    pub brush: B,
}

impl<B: Brush> Default for ResolvedStyle<B> {
    fn default() -> Self {
        Self::baseline()
    }
}

impl<B: Brush> ResolvedStyle<B> {
    /// The root ancestor style. Resolution against it always terminates
    /// with concrete attributes because it has none unset.
    pub fn baseline() -> Self {
        Self {
            font: None,
            font_size: 10.,
            horizontal_scale: 1.,
            letter_spacing: 0.,
            line_height: 1.2,
            alignment: Alignment::Justified,
            underline: false,
            strikethrough: false,
            first_line_indent: 0.,
            brush: B::default(),
        }
    }
}

/// Resolves a node's style against its parent's resolved style.
///
/// For each attribute the value is the explicit override if set, else the
/// named style's value if set, else the parent's resolved value. Pure
/// function of its inputs; callers cache per layout pass.
pub fn resolve<B: Brush>(
    overrides: &PartialStyle<B>,
    named: Option<&PartialStyle<B>>,
    parent: &ResolvedStyle<B>,
) -> ResolvedStyle<B> {
    ResolvedStyle {
        font: overrides
            .font
            .or_else(|| named.and_then(|n| n.font))
            .or(parent.font),
        font_size: overrides
            .font_size
            .or_else(|| named.and_then(|n| n.font_size))
            .unwrap_or(parent.font_size),
        horizontal_scale: overrides
            .horizontal_scale
            .or_else(|| named.and_then(|n| n.horizontal_scale))
            .unwrap_or(parent.horizontal_scale),
        letter_spacing: overrides
            .letter_spacing
            .or_else(|| named.and_then(|n| n.letter_spacing))
            .unwrap_or(parent.letter_spacing),
        line_height: overrides
            .line_height
            .or_else(|| named.and_then(|n| n.line_height))
            .unwrap_or(parent.line_height),
        alignment: overrides
            .alignment
            .or_else(|| named.and_then(|n| n.alignment))
            .unwrap_or(parent.alignment),
        underline: overrides
            .underline
            .or_else(|| named.and_then(|n| n.underline))
            .unwrap_or(parent.underline),
        strikethrough: overrides
            .strikethrough
            .or_else(|| named.and_then(|n| n.strikethrough))
            .unwrap_or(parent.strikethrough),
        first_line_indent: overrides
            .first_line_indent
            .or_else(|| named.and_then(|n| n.first_line_indent))
            .unwrap_or(parent.first_line_indent),
        brush: overrides
            .brush
            .clone()
            .or_else(|| named.and_then(|n| n.brush.clone()))
            .unwrap_or_else(|| parent.brush.clone()),
    }
}

/// Convenience wrapper that looks up `style_name` in `sheet` before
/// resolving.
pub fn resolve_named<B: Brush>(
    overrides: &PartialStyle<B>,
    style_name: Option<&str>,
    sheet: &StyleSheet<B>,
    parent: &ResolvedStyle<B>,
) -> ResolvedStyle<B> {
    let named = style_name.and_then(|name| sheet.get(name));
    resolve(overrides, named, parent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleProperty;

    type Style = ResolvedStyle<[u8; 4]>;

    #[test]
    fn override_beats_named_beats_parent() {
        let parent = Style {
            font_size: 12.,
            ..ResolvedStyle::baseline()
        };
        let named = PartialStyle::from_properties([StyleProperty::FontSize(14.)]);
        let overrides = PartialStyle::from_properties([StyleProperty::FontSize(18.)]);

        let resolved = resolve(&overrides, Some(&named), &parent);
        assert_eq!(resolved.font_size, 18., "explicit override must win");

        let resolved = resolve(&PartialStyle::new(), Some(&named), &parent);
        assert_eq!(resolved.font_size, 14., "named style must beat inheritance");

        let resolved = resolve(&PartialStyle::new(), None, &parent);
        assert_eq!(resolved.font_size, 12., "unset attributes inherit");
    }

    #[test]
    fn resolution_against_baseline_is_total() {
        let resolved: Style = resolve(&PartialStyle::new(), None, &ResolvedStyle::baseline());
        assert_eq!(resolved.font_size, 10.);
        assert_eq!(resolved.horizontal_scale, 1.);
        assert_eq!(resolved.letter_spacing, 0.);
        assert_eq!(resolved.line_height, 1.2);
        assert_eq!(resolved.alignment, Alignment::Justified);
        assert!(!resolved.underline);
        assert!(!resolved.strikethrough);
        assert_eq!(resolved.first_line_indent, 0.);
    }

    #[test]
    fn missing_named_style_falls_through() {
        let parent = Style {
            font_size: 12.,
            ..ResolvedStyle::baseline()
        };
        let sheet = StyleSheet::new();
        let resolved = resolve_named(&PartialStyle::new(), Some("ghost"), &sheet, &parent);
        assert_eq!(resolved.font_size, 12.);
    }

    #[test]
    fn attributes_cascade_independently() {
        let parent = Style {
            font_size: 12.,
            underline: true,
            ..ResolvedStyle::baseline()
        };
        let named = PartialStyle::from_properties([
            StyleProperty::FontSize(14.),
            StyleProperty::LetterSpacing(2.),
        ]);
        let overrides = PartialStyle::from_properties([StyleProperty::LetterSpacing(3.)]);

        let resolved = resolve(&overrides, Some(&named), &parent);
        assert_eq!(resolved.font_size, 14.);
        assert_eq!(resolved.letter_spacing, 3.);
        assert!(resolved.underline, "untouched attributes inherit");
    }
}
