// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The mapping from style slots to the fragments extracted for them.

use std::collections::HashMap;

use crate::style::slot::Slot;

/// Extracted whitespace fragments, keyed by slot.
///
/// The map is filled in place: an extraction only overwrites the slots its
/// rule owns and leaves the others untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    fragments: HashMap<Slot, String>,
}

impl StyleMap {
    /// Creates an empty style map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fragment for a slot, returning the previous one.
    pub fn set(&mut self, slot: Slot, fragment: impl Into<String>) -> Option<String> {
        self.fragments.insert(slot, fragment.into())
    }

    /// Writes a batch of fragments produced by one extraction.
    pub fn apply<I>(&mut self, fragments: I)
    where
        I: IntoIterator<Item = (Slot, String)>,
    {
        self.fragments.extend(fragments);
    }

    /// Returns the fragment for a slot, if it was ever extracted.
    pub fn get(&self, slot: Slot) -> Option<&str> {
        self.fragments.get(&slot).map(String::as_str)
    }

    /// Returns the fragment for a slot, or the empty string.
    pub fn fragment(&self, slot: Slot) -> &str {
        self.get(slot).unwrap_or("")
    }

    /// Returns true if every given slot has a fragment.
    pub fn contains_all(&self, slots: &[Slot]) -> bool {
        slots.iter().all(|slot| self.fragments.contains_key(slot))
    }

    /// Returns the number of slots with a fragment.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Returns true if no slot has been extracted yet.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Returns the entries sorted by slot name.
    ///
    /// This is the canonical order of the generated preferences document, so
    /// it must only depend on the names, not on the enum layout.
    pub fn sorted_entries(&self) -> Vec<(Slot, &str)> {
        let mut entries: Vec<(Slot, &str)> = self
            .fragments
            .iter()
            .map(|(&slot, fragment)| (slot, fragment.as_str()))
            .collect();
        entries.sort_by_key(|(slot, _)| slot.name());
        entries
    }
}
