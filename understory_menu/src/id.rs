// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identifiers for menu instances and their items.

/// Identifier for a menu or submenu instance (generational).
///
/// Identifiers of destroyed instances become stale; every operation given a
/// stale identifier is a no-op.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MenuId(pub(crate) u32, pub(crate) u32);

impl MenuId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "MenuId uses 32-bit indices by design."
    )]
    pub(crate) const fn from_slot(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// An item position inside one menu instance's registry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    /// Owning instance.
    pub menu: MenuId,
    /// Position in the owning instance's item registry.
    pub index: usize,
}

impl ItemKey {
    /// Create a key for `index` in `menu`.
    pub const fn new(menu: MenuId, index: usize) -> Self {
        Self { menu, index }
    }
}
