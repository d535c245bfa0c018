// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam to the host's font loader.
//!
//! Font files are loaded and memoized by an external collaborator, usually
//! asynchronously. By the time a flow pass runs, every face it references
//! must already be resident: the engine requests metrics synchronously and
//! never awaits or retries mid-pass.

/// Identifier of a loaded font face, issued by the host's font loader.
///
/// The engine only stores and compares these; it never interprets them.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct FontId(u32);

impl FontId {
    /// Creates an identifier from the loader's raw value.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The loader's raw value.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Opaque handle to a glyph outline owned by the font provider.
///
/// The render surface passes this back to the provider to fetch the actual
/// path data; the engine itself never touches outline geometry.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct GlyphId(u32);

impl GlyphId {
    /// Creates a handle from the provider's raw value.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The provider's raw value.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Metrics for one glyph at a specific size.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct GlyphMetrics {
    /// Natural advance width.
    pub advance: f32,
    /// Height above the baseline.
    pub ascent: f32,
    /// Depth below the baseline.
    pub descent: f32,
    /// Outline handle, absent for blank glyphs.
    pub outline: Option<GlyphId>,
}

/// Synchronous source of glyph metrics and outline handles.
pub trait GlyphProvider {
    /// Returns the metrics for `ch` in `font` at `size`, or `None` if the
    /// face is unknown or has no glyph for the character.
    fn metrics(&self, font: FontId, ch: char, size: f32) -> Option<GlyphMetrics>;
}

impl<'a, T: GlyphProvider + ?Sized> GlyphProvider for &'a T {
    fn metrics(&self, font: FontId, ch: char, size: f32) -> Option<GlyphMetrics> {
        (**self).metrics(font, ch, size)
    }
}
