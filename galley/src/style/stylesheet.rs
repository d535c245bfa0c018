// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hashbrown::HashMap;

use super::{Brush, PartialStyle};

/// A named style registry, the second tier of the style cascade.
///
/// Nodes refer to entries by name; a name with no entry falls through
/// silently to inherited values. The sheet is an explicitly passed value
/// with no process-global instance, so tests can supply their own.
#[derive(Clone, Debug)]
pub struct StyleSheet<B: Brush> {
    styles: HashMap<String, PartialStyle<B>>,
}

impl<B: Brush> Default for StyleSheet<B> {
    fn default() -> Self {
        Self {
            styles: HashMap::new(),
        }
    }
}

impl<B: Brush> StyleSheet<B> {
    /// Creates an empty sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `style` under `name`, returning any style it replaced.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        style: PartialStyle<B>,
    ) -> Option<PartialStyle<B>> {
        self.styles.insert(name.into(), style)
    }

    /// Looks up the style registered under `name`.
    pub fn get(&self, name: &str) -> Option<&PartialStyle<B>> {
        self.styles.get(name)
    }

    /// Removes the style registered under `name`.
    pub fn remove(&mut self, name: &str) -> Option<PartialStyle<B>> {
        self.styles.remove(name)
    }

    /// Number of registered styles.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Returns `true` if no styles are registered.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}
