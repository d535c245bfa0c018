// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The text model: an ordered tree of runs and styled sub-nodes.

use smallvec::SmallVec;

use crate::style::{Brush, PartialStyle, StyleProperty};

/// Identifier of a node within a [`Story`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(usize);

impl NodeId {
    /// Index of the node in the story's arena.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A child slot of a node: either a literal text run or a nested node.
#[derive(Clone, PartialEq, Debug)]
pub enum Child {
    /// A literal run of text.
    Run(String),
    /// A nested styled node.
    Node(NodeId),
}

/// Modification state of a node.
///
/// `Full` absorbs any partial set; partial sets merge by union.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum Modified {
    /// Untouched since the last layout pass.
    #[default]
    Clean,
    /// The whole node changed (style edits, structural rewrites).
    Full,
    /// Only the child slots at these indices changed.
    Partial(SmallVec<[usize; 4]>),
}

impl Modified {
    /// Merges `other` into this state.
    pub fn merge(&mut self, other: Self) {
        match (&mut *self, other) {
            (Self::Full, _) | (_, Self::Clean) => {}
            (this, Self::Full) => *this = Self::Full,
            (this @ Self::Clean, partial) => *this = partial,
            (Self::Partial(indices), Self::Partial(other)) => {
                for index in other {
                    if let Err(at) = indices.binary_search(&index) {
                        indices.insert(at, index);
                    }
                }
            }
        }
    }

    /// Records a change to the child slot at `index`.
    pub fn mark_child(&mut self, index: usize) {
        self.merge(Self::Partial(SmallVec::from_slice(&[index])));
    }

    /// Returns `true` if nothing changed.
    pub fn is_clean(&self) -> bool {
        *self == Self::Clean
    }
}

#[derive(Clone, Debug)]
struct NodeData<B: Brush> {
    /// Non-owning back-reference; lookup only.
    parent: Option<NodeId>,
    style_name: Option<String>,
    overrides: PartialStyle<B>,
    children: Vec<Child>,
    modified: Modified,
}

/// An ordered tree of text runs and styled sub-nodes.
///
/// Nodes live in an arena indexed by [`NodeId`]; parent links are plain
/// indices, so the tree has single ownership and no reference cycles.
/// Every mutation marks the touched node and its ancestors modified, which
/// is what triggers the next full expand-and-flow pass.
#[derive(Clone, Debug)]
pub struct Story<B: Brush> {
    nodes: Vec<NodeData<B>>,
}

impl<B: Brush> Default for Story<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Brush> Story<B> {
    /// Creates a story holding only an empty root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                parent: None,
                style_name: None,
                overrides: PartialStyle::new(),
                children: Vec::new(),
                modified: Modified::Clean,
            }],
        }
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Appends a nested node under `parent` and returns its id.
    pub fn add_node(&mut self, parent: NodeId, style_name: Option<&str>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            parent: Some(parent),
            style_name: style_name.map(str::to_owned),
            overrides: PartialStyle::new(),
            children: Vec::new(),
            modified: Modified::Clean,
        });
        let slot = self.nodes[parent.0].children.len();
        self.nodes[parent.0].children.push(Child::Node(id));
        self.mark(parent, Modified::Partial(SmallVec::from_slice(&[slot])));
        id
    }

    /// Appends a literal run under `node` and returns its child slot.
    pub fn add_run(&mut self, node: NodeId, text: &str) -> usize {
        let slot = self.nodes[node.0].children.len();
        self.nodes[node.0].children.push(Child::Run(text.to_owned()));
        self.mark(node, Modified::Partial(SmallVec::from_slice(&[slot])));
        slot
    }

    /// Inserts `text` at character `offset` within the run at `slot`.
    ///
    /// The offset is clamped to the run's character count. Does nothing if
    /// the slot holds a nested node.
    pub fn insert_text(&mut self, node: NodeId, slot: usize, offset: usize, text: &str) {
        let Some(Child::Run(run)) = self.nodes[node.0].children.get_mut(slot) else {
            return;
        };
        let at = byte_offset(run, offset);
        run.insert_str(at, text);
        self.mark(node, Modified::Partial(SmallVec::from_slice(&[slot])));
    }

    /// Removes the characters in `range` from the run at `slot`.
    ///
    /// Character positions are clamped to the run's length.
    pub fn remove_range(&mut self, node: NodeId, slot: usize, range: core::ops::Range<usize>) {
        let Some(Child::Run(run)) = self.nodes[node.0].children.get_mut(slot) else {
            return;
        };
        let start = byte_offset(run, range.start);
        let end = byte_offset(run, range.end.max(range.start));
        run.replace_range(start..end, "");
        self.mark(node, Modified::Partial(SmallVec::from_slice(&[slot])));
    }

    /// Replaces the run at `slot` wholesale.
    pub fn replace_run(&mut self, node: NodeId, slot: usize, text: &str) {
        let Some(Child::Run(run)) = self.nodes[node.0].children.get_mut(slot) else {
            return;
        };
        run.clear();
        run.push_str(text);
        self.mark(node, Modified::Partial(SmallVec::from_slice(&[slot])));
    }

    /// Sets or clears the node's named default style.
    pub fn set_style_name(&mut self, node: NodeId, name: Option<&str>) {
        self.nodes[node.0].style_name = name.map(str::to_owned);
        self.mark(node, Modified::Full);
    }

    /// Sets one explicit style override on the node.
    pub fn set_override(&mut self, node: NodeId, property: StyleProperty<B>) {
        self.nodes[node.0].overrides.apply(property);
        self.mark(node, Modified::Full);
    }

    /// Clears every explicit override on the node.
    pub fn clear_overrides(&mut self, node: NodeId) {
        self.nodes[node.0].overrides = PartialStyle::new();
        self.mark(node, Modified::Full);
    }

    /// The node's parent, `None` for the root.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    /// The node's ordered child slots.
    pub fn children(&self, node: NodeId) -> &[Child] {
        &self.nodes[node.0].children
    }

    /// The node's named default style, if any.
    pub fn style_name(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.0].style_name.as_deref()
    }

    /// The node's explicit overrides.
    pub fn overrides(&self, node: NodeId) -> &PartialStyle<B> {
        &self.nodes[node.0].overrides
    }

    /// The node's modification state.
    pub fn modified(&self, node: NodeId) -> &Modified {
        &self.nodes[node.0].modified
    }

    /// Returns `true` if any node changed since the last
    /// [`clear_modified`](Self::clear_modified).
    pub fn is_modified(&self) -> bool {
        self.nodes.iter().any(|node| !node.modified.is_clean())
    }

    /// Resets every node to clean, typically after a layout pass.
    pub fn clear_modified(&mut self) {
        for node in &mut self.nodes {
            node.modified = Modified::Clean;
        }
    }

    /// Concatenates the literal text of the subtree rooted at `node`, in
    /// document order.
    pub fn text_of(&self, node: NodeId) -> String {
        let mut text = String::new();
        self.collect_text(node, &mut text);
        text
    }

    fn collect_text(&self, node: NodeId, into: &mut String) {
        for child in &self.nodes[node.0].children {
            match child {
                Child::Run(run) => into.push_str(run),
                Child::Node(id) => self.collect_text(*id, into),
            }
        }
    }

    /// Marks `node` with `state` and walks the parent chain, recording in
    /// each ancestor which child slot the change came through.
    fn mark(&mut self, node: NodeId, state: Modified) {
        self.nodes[node.0].modified.merge(state);
        let mut current = node;
        while let Some(parent) = self.nodes[current.0].parent {
            let slot = self.nodes[parent.0]
                .children
                .iter()
                .position(|child| matches!(child, Child::Node(id) if *id == current));
            if let Some(slot) = slot {
                self.nodes[parent.0].modified.mark_child(slot);
            }
            current = parent;
        }
    }
}

/// Byte offset of character `offset` in `run`, clamped to the end.
fn byte_offset(run: &str, offset: usize) -> usize {
    run.char_indices()
        .nth(offset)
        .map(|(at, _)| at)
        .unwrap_or(run.len())
}
