// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Expansion of a story into a linear sequence of atomic layout items.

use thiserror::Error;

use crate::font::{FontId, GlyphId, GlyphProvider};
use crate::resolve::{resolve_named, ResolvedStyle};
use crate::story::{Child, NodeId, Story};
use crate::style::{Brush, StyleSheet};

/// Kind of an atomic layout item.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ItemKind {
    /// A visible glyph.
    Glyph,
    /// An inter-word space. Its natural width is one third of the font
    /// size; it never opens a line visually.
    Space,
    /// An explicit line break.
    LineBreak,
    /// Zero-size marker emitted after a node's last child.
    EndOfNode,
}

/// Source position of an item within the story.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Source {
    /// The owning node.
    pub node: NodeId,
    /// Child slot within the node. For [`ItemKind::EndOfNode`] this is the
    /// node's child count.
    pub slot: usize,
    /// Character index within the run.
    pub offset: usize,
}

/// One atomic unit of laid-out text.
///
/// Items are rebuilt from the story on every layout pass; `width`, `x` and
/// the line assignment are filled in by the flow engine.
#[derive(Clone, PartialEq, Debug)]
pub struct Item {
    /// What the item is.
    pub kind: ItemKind,
    /// Where it came from.
    pub source: Source,
    /// The character, absent for end-of-node markers.
    pub ch: Option<char>,
    /// Index into the interned style table.
    pub style_index: u16,
    /// Natural advance width, unscaled.
    pub advance: f32,
    /// Height above the baseline.
    pub ascent: f32,
    /// Depth below the baseline.
    pub descent: f32,
    /// Layout width: the justification-adjusted width used for placement.
    pub width: f32,
    /// Column-local x position once placed.
    pub x: f32,
    /// Outline handle for glyphs.
    pub outline: Option<GlyphId>,
}

impl Item {
    /// Natural height of the item.
    pub fn height(&self) -> f32 {
        self.ascent + self.descent
    }
}

/// A linear item sequence plus its interned style table.
#[derive(Clone, Debug)]
pub struct ItemSequence<B: Brush> {
    pub(crate) items: Vec<Item>,
    pub(crate) styles: Vec<ResolvedStyle<B>>,
}

impl<B: Brush> ItemSequence<B> {
    /// The items in document order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The interned style table.
    pub fn styles(&self) -> &[ResolvedStyle<B>] {
        &self.styles
    }

    /// The resolved style of `item`.
    pub fn style_of(&self, item: &Item) -> &ResolvedStyle<B> {
        &self.styles[item.style_index as usize]
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the sequence holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Configuration errors that abort an expansion pass.
///
/// These are structural problems with the document or style setup, not
/// interaction-time failures; nothing partial is produced.
#[derive(Clone, PartialEq, Eq, Error, Debug)]
pub enum ItemizeError {
    /// A node needs glyphs but no tier of the cascade names a font.
    #[error("no font resolves for node {0:?}")]
    UnresolvedFont(NodeId),
    /// The resolved font size cannot produce glyphs.
    #[error("non-positive font size for node {0:?}")]
    InvalidFontSize(NodeId),
    /// The provider has no glyph for a required character.
    #[error("font {font:?} has no glyph for {ch:?}")]
    MissingGlyph {
        /// The face that was asked.
        font: FontId,
        /// The character it could not supply.
        ch: char,
    },
}

/// Flattens the story into items, resolving styles along the way.
///
/// Walks the tree depth-first, resolving each node's style against its
/// parent's before descending, and classifies every character of every run.
/// Glyph metrics come from `provider`; spaces take one third of the font
/// size and explicit breaks are zero-width.
pub fn itemize<B: Brush>(
    story: &Story<B>,
    sheet: &StyleSheet<B>,
    provider: &dyn GlyphProvider,
    base: &ResolvedStyle<B>,
) -> Result<ItemSequence<B>, ItemizeError> {
    let mut expander = Expander {
        story,
        sheet,
        provider,
        items: Vec::new(),
        styles: Vec::new(),
    };
    let root_style = resolve_named(
        story.overrides(story.root()),
        story.style_name(story.root()),
        sheet,
        base,
    );
    expander.node(story.root(), &root_style)?;
    Ok(ItemSequence {
        items: expander.items,
        styles: expander.styles,
    })
}

struct Expander<'a, B: Brush> {
    story: &'a Story<B>,
    sheet: &'a StyleSheet<B>,
    provider: &'a dyn GlyphProvider,
    items: Vec<Item>,
    styles: Vec<ResolvedStyle<B>>,
}

impl<B: Brush> Expander<'_, B> {
    fn node(&mut self, node: NodeId, resolved: &ResolvedStyle<B>) -> Result<(), ItemizeError> {
        let style_index = self.intern(resolved);
        for (slot, child) in self.story.children(node).iter().enumerate() {
            match child {
                Child::Run(run) => {
                    self.run(node, slot, run, resolved, style_index)?;
                }
                Child::Node(id) => {
                    let child_style = resolve_named(
                        self.story.overrides(*id),
                        self.story.style_name(*id),
                        self.sheet,
                        resolved,
                    );
                    self.node(*id, &child_style)?;
                }
            }
        }
        self.items.push(Item {
            kind: ItemKind::EndOfNode,
            source: Source {
                node,
                slot: self.story.children(node).len(),
                offset: 0,
            },
            ch: None,
            style_index,
            advance: 0.,
            ascent: 0.,
            descent: 0.,
            width: 0.,
            x: 0.,
            outline: None,
        });
        Ok(())
    }

    fn run(
        &mut self,
        node: NodeId,
        slot: usize,
        run: &str,
        resolved: &ResolvedStyle<B>,
        style_index: u16,
    ) -> Result<(), ItemizeError> {
        let size = resolved.font_size;
        for (offset, ch) in run.chars().enumerate() {
            let source = Source { node, slot, offset };
            let item = match ch {
                '\r' => continue,
                '\n' => Item {
                    kind: ItemKind::LineBreak,
                    source,
                    ch: Some(ch),
                    style_index,
                    advance: 0.,
                    ascent: size,
                    descent: 0.,
                    width: 0.,
                    x: 0.,
                    outline: None,
                },
                ' ' | '\t' | '\u{00A0}' => Item {
                    kind: ItemKind::Space,
                    source,
                    ch: Some(ch),
                    style_index,
                    advance: size / 3.,
                    ascent: size,
                    descent: 0.,
                    width: 0.,
                    x: 0.,
                    outline: None,
                },
                _ => {
                    let font = resolved.font.ok_or(ItemizeError::UnresolvedFont(node))?;
                    if size <= 0. {
                        return Err(ItemizeError::InvalidFontSize(node));
                    }
                    let metrics = self
                        .provider
                        .metrics(font, ch, size)
                        .ok_or(ItemizeError::MissingGlyph { font, ch })?;
                    Item {
                        kind: ItemKind::Glyph,
                        source,
                        ch: Some(ch),
                        style_index,
                        advance: metrics.advance,
                        ascent: metrics.ascent,
                        descent: metrics.descent,
                        width: 0.,
                        x: 0.,
                        outline: metrics.outline,
                    }
                }
            };
            self.items.push(item);
        }
        Ok(())
    }

    /// Interns a resolved style, reusing an existing slot on equality.
    fn intern(&mut self, style: &ResolvedStyle<B>) -> u16 {
        if let Some(index) = self.styles.iter().position(|existing| existing == style) {
            return index as u16;
        }
        let index = self.styles.len() as u16;
        self.styles.push(style.clone());
        index
    }
}
