// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utilities for developing and testing Galley.
//!
//! The glyph metrics here are deliberately simple so test expectations can
//! be computed by hand: every glyph advances half the font size, with a
//! fixed 80/20 ascent/descent split.

use galley::{FontId, GlyphId, GlyphMetrics, GlyphProvider, Story};

/// A deterministic glyph provider for tests.
///
/// Faces are handed out in registration order. Characters can be declared
/// missing to exercise configuration-error paths.
#[derive(Clone, Debug)]
pub struct TestFonts {
    faces: u32,
    missing: Vec<char>,
}

impl Default for TestFonts {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFonts {
    /// Creates a provider with one loaded face.
    pub fn new() -> Self {
        Self {
            faces: 1,
            missing: Vec::new(),
        }
    }

    /// The first loaded face.
    pub fn font(&self) -> FontId {
        FontId::new(0)
    }

    /// Registers another face and returns its id.
    pub fn add_face(&mut self) -> FontId {
        let id = FontId::new(self.faces);
        self.faces += 1;
        id
    }

    /// Declares `ch` missing from every face.
    pub fn without_glyph(mut self, ch: char) -> Self {
        self.missing.push(ch);
        self
    }
}

impl GlyphProvider for TestFonts {
    fn metrics(&self, font: FontId, ch: char, size: f32) -> Option<GlyphMetrics> {
        if font.raw() >= self.faces || self.missing.contains(&ch) {
            return None;
        }
        Some(GlyphMetrics {
            advance: size * 0.5,
            ascent: size * 0.8,
            descent: size * 0.2,
            outline: Some(GlyphId::new(ch as u32)),
        })
    }
}

/// A simple color brush for tests.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ColorBrush {
    /// RGBA color components.
    pub color: [u8; 4],
}

impl ColorBrush {
    /// Creates a brush with the given color.
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            color: [r, g, b, a],
        }
    }
}

impl Default for ColorBrush {
    fn default() -> Self {
        Self {
            color: [0, 0, 0, 255],
        }
    }
}

/// Builds a story holding `text` in a single run under the root, with the
/// root set up to use `font`.
pub fn plain_story(font: FontId, text: &str) -> Story<ColorBrush> {
    let mut story = Story::new();
    story.set_override(story.root(), galley::StyleProperty::FontFamily(font));
    story.add_run(story.root(), text);
    story
}
