// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ownership of one flowed text: story, styles, columns and their layout.

use crate::flow::{flow, ColumnRect, FlowLayout};
use crate::font::GlyphProvider;
use crate::itemize::{itemize, ItemizeError};
use crate::resolve::ResolvedStyle;
use crate::story::Story;
use crate::style::{Brush, StyleSheet};

/// A story plus everything needed to keep it typeset.
///
/// Edits go through [`story_mut`](Self::story_mut), which marks the tree
/// modified; the next [`layout`](Self::layout) call then re-expands and
/// re-flows the whole story. There is no incremental reflow: any edit
/// rebuilds the full layout, synchronously, on the calling thread. Callers
/// serialize edits, so a newer layout simply runs after the prior one
/// returned.
#[derive(Clone, Debug)]
pub struct Composition<B: Brush> {
    story: Story<B>,
    sheet: StyleSheet<B>,
    columns: Vec<ColumnRect>,
    base: ResolvedStyle<B>,
    layout: Option<FlowLayout<B>>,
}

impl<B: Brush> Default for Composition<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Brush> Composition<B> {
    /// Creates an empty composition with the baseline style and no columns.
    pub fn new() -> Self {
        Self {
            story: Story::new(),
            sheet: StyleSheet::new(),
            columns: Vec::new(),
            base: ResolvedStyle::baseline(),
            layout: None,
        }
    }

    /// The text model.
    pub fn story(&self) -> &Story<B> {
        &self.story
    }

    /// Mutable access to the text model. The story's own edit operations
    /// record what changed.
    pub fn story_mut(&mut self) -> &mut Story<B> {
        &mut self.story
    }

    /// The named style registry.
    pub fn sheet(&self) -> &StyleSheet<B> {
        &self.sheet
    }

    /// Mutable access to the registry. Conservatively drops the cached
    /// layout, since any registered style may be referenced by the story.
    pub fn sheet_mut(&mut self) -> &mut StyleSheet<B> {
        self.layout = None;
        &mut self.sheet
    }

    /// The column geometries, in flow order.
    pub fn columns(&self) -> &[ColumnRect] {
        &self.columns
    }

    /// Replaces the column list and drops the cached layout.
    pub fn set_columns(&mut self, columns: Vec<ColumnRect>) {
        self.columns = columns;
        self.layout = None;
    }

    /// Replaces the baseline style the cascade roots in.
    pub fn set_base(&mut self, base: ResolvedStyle<B>) {
        self.base = base;
        self.layout = None;
    }

    /// The current layout, if one is cached and the story is unedited.
    pub fn current_layout(&self) -> Option<&FlowLayout<B>> {
        if self.story.is_modified() {
            None
        } else {
            self.layout.as_ref()
        }
    }

    /// Returns the up-to-date layout, re-expanding and re-flowing if the
    /// story was edited or the geometry changed since the last pass.
    ///
    /// Configuration errors abort the pass and leave no partial layout
    /// behind.
    pub fn layout(
        &mut self,
        provider: &dyn GlyphProvider,
    ) -> Result<&FlowLayout<B>, ItemizeError> {
        if self.layout.is_none() || self.story.is_modified() {
            self.layout = None;
            let sequence = itemize(&self.story, &self.sheet, provider, &self.base)?;
            self.layout = Some(flow(sequence, &self.columns));
            self.story.clear_modified();
        }
        Ok(self
            .layout
            .as_ref()
            .expect("layout was just rebuilt"))
    }
}
