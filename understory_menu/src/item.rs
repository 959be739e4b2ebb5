// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item registry: an arena-style table of interactive items per instance.

use alloc::string::String;
use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::id::MenuId;

/// What an item does when activated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ItemRole {
    /// A plain action.
    #[default]
    Item,
    /// A checkable item.
    Checkbox,
    /// A radio item.
    Radio,
    /// Opens the given submenu instead of selecting.
    SubmenuTrigger(MenuId),
}

bitflags::bitflags! {
    /// Item flags excluding an item from navigation.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ItemFlags: u8 {
        /// Item is disabled: never active, never focused, never selected.
        const DISABLED = 0b0000_0001;
        /// Item is currently not displayed.
        const HIDDEN   = 0b0000_0010;
    }
}

/// Description of an item passed at registration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemDescriptor {
    /// Explicit position in the registry; `None` appends.
    pub index: Option<usize>,
    /// Whether the item is disabled.
    pub disabled: bool,
    /// Role of the item.
    pub role: ItemRole,
    /// Text used for typeahead matching.
    pub label: Option<String>,
}

impl ItemDescriptor {
    /// A plain, enabled item appended at the end.
    pub fn new() -> Self {
        Self::default()
    }

    /// An item that opens `submenu`.
    pub fn submenu(submenu: MenuId) -> Self {
        Self {
            role: ItemRole::SubmenuTrigger(submenu),
            ..Self::default()
        }
    }

    /// Register at an explicit position.
    ///
    /// The position may leave holes, but at most [`MAX_ITEM_GAP`] past the
    /// current end of the registry.
    #[must_use]
    pub fn at(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Set the disabled flag.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the role.
    #[must_use]
    pub fn role(mut self, role: ItemRole) -> Self {
        self.role = role;
        self
    }

    /// Set the typeahead label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A registered item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemEntry {
    /// Role of the item.
    pub role: ItemRole,
    /// Navigation-relevant flags.
    pub flags: ItemFlags,
    /// Typeahead label.
    pub label: Option<String>,
}

impl ItemEntry {
    /// Whether the item may receive the keyboard-active marker.
    pub fn is_candidate(&self) -> bool {
        self.flags.is_empty()
    }
}

/// Render-facing state of one item, derived from the engine's state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemState {
    /// Holds the keyboard-active marker.
    pub highlighted: bool,
    /// Holds the pointer-hover marker.
    pub hovered: bool,
    /// Is a submenu trigger whose submenu is open.
    pub expanded: bool,
    /// Is disabled.
    pub disabled: bool,
    /// Is hidden.
    pub hidden: bool,
}

/// Ordered, possibly sparse registry of one instance's items.
///
/// Largest number of empty positions an explicit registration may skip.
pub const MAX_ITEM_GAP: usize = 256;

/// Insertion order is visual order. Positions are stable: removing an item
/// leaves a hole rather than shifting later items.
#[derive(Clone, Debug, Default)]
pub struct ItemTable {
    slots: Vec<Option<ItemEntry>>,
}

impl ItemTable {
    /// Number of positions, including holes.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no positions are allocated.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Entry at `index`, if one is registered there.
    pub fn get(&self, index: usize) -> Option<&ItemEntry> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Registered entries with their positions, in order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &ItemEntry)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|e| (i, e)))
    }

    /// Whether `index` holds an enabled, visible item.
    pub fn is_candidate(&self, index: usize) -> bool {
        self.get(index).is_some_and(ItemEntry::is_candidate)
    }

    /// Positions of enabled, visible items, in order.
    pub fn candidates(&self) -> SmallVec<[usize; 16]> {
        self.iter()
            .filter(|(_, e)| e.is_candidate())
            .map(|(i, _)| i)
            .collect()
    }

    /// Enabled, visible items that carry a label, in order.
    pub fn labeled_candidates(&self) -> Vec<(usize, &str)> {
        self.iter()
            .filter(|(_, e)| e.is_candidate())
            .filter_map(|(i, e)| e.label.as_deref().map(|l| (i, l)))
            .collect()
    }

    /// Position of the item that opens `submenu`.
    pub fn submenu_trigger(&self, submenu: MenuId) -> Option<usize> {
        self.iter()
            .find(|(_, e)| e.role == ItemRole::SubmenuTrigger(submenu))
            .map(|(i, _)| i)
    }

    /// Insert or replace an entry. `None` appends after the last position.
    ///
    /// Returns `None` for a position more than [`MAX_ITEM_GAP`] past the end.
    pub(crate) fn register(&mut self, index: Option<usize>, entry: ItemEntry) -> Option<usize> {
        let len = self.slots.len();
        let index = index.unwrap_or(len);
        if index >= len {
            if index - len > MAX_ITEM_GAP {
                return None;
            }
            self.slots.resize_with(index + 1, || None);
        }
        self.slots[index] = Some(entry);
        Some(index)
    }

    pub(crate) fn remove(&mut self, index: usize) -> Option<ItemEntry> {
        let removed = self.slots.get_mut(index).and_then(Option::take);
        while matches!(self.slots.last(), Some(None)) {
            self.slots.pop();
        }
        removed
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut ItemEntry> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }
}
