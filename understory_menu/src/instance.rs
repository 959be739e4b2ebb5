// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-instance runtime state.

use smallvec::SmallVec;
use understory_floating::{Anchor, FloatingTracker};
use understory_focus::{Navigation, Typeahead};

use crate::bus::{CloserHandle, HoverHandle};
use crate::config::MenuConfig;
use crate::effect::Reason;
use crate::id::MenuId;
use crate::item::ItemTable;

/// Lifecycle phase of an instance.
///
/// `Opening` and `Closing` are transient: `Opening` lasts until the host's
/// next [`MenuTree::advance`](crate::MenuTree::advance), giving items a turn
/// to register; `Closing` lasts until the exit animation finishes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Not shown.
    #[default]
    Closed,
    /// Shown; items are registering and focus is not yet seeded.
    Opening,
    /// Shown and interactive.
    Open,
    /// Being torn down.
    Closing,
}

impl Phase {
    /// Whether the instance counts as open (`Opening` or `Open`).
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Opening | Self::Open)
    }
}

#[derive(Debug)]
pub(crate) struct MenuInstance {
    pub(crate) generation: u32,
    pub(crate) parent: Option<MenuId>,
    pub(crate) children: SmallVec<[MenuId; 4]>,
    pub(crate) config: MenuConfig,
    pub(crate) phase: Phase,
    pub(crate) items: ItemTable,
    pub(crate) active: Option<usize>,
    pub(crate) keyboard_mode: bool,
    pub(crate) closer: Option<CloserHandle>,
    pub(crate) hover: Option<HoverHandle>,
    pub(crate) tracker: FloatingTracker,
    /// Where focus lands once the instance is open and has candidates.
    pub(crate) seed: Option<Navigation>,
    pub(crate) opened_by: Reason,
    pub(crate) exit_animating: bool,
    pub(crate) typeahead: Typeahead,
}

impl MenuInstance {
    pub(crate) fn new(
        generation: u32,
        parent: Option<MenuId>,
        config: MenuConfig,
        anchor: Anchor,
    ) -> Self {
        let tracker = FloatingTracker::new(anchor, config.floating);
        let typeahead = Typeahead::new(config.typeahead_timeout);
        Self {
            generation,
            parent,
            children: SmallVec::new(),
            config,
            phase: Phase::Closed,
            items: ItemTable::default(),
            active: None,
            keyboard_mode: false,
            closer: None,
            hover: None,
            tracker,
            seed: None,
            opened_by: Reason::Requested,
            exit_animating: false,
            typeahead,
        }
    }

    pub(crate) fn is_controlled(&self) -> bool {
        self.config.controlled.is_some()
    }

    /// Drop everything an open session accumulated.
    pub(crate) fn reset_session(&mut self) {
        self.items.clear();
        self.active = None;
        self.keyboard_mode = false;
        self.typeahead.reset();
    }

    /// Active index, treated as absent when it no longer names a candidate.
    pub(crate) fn valid_active(&self) -> Option<usize> {
        self.active.filter(|&i| self.items.is_candidate(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemEntry, ItemFlags, ItemRole};

    #[test]
    fn only_opening_and_open_count_as_open() {
        assert!(!Phase::Closed.is_open());
        assert!(Phase::Opening.is_open());
        assert!(Phase::Open.is_open());
        assert!(!Phase::Closing.is_open());
    }

    #[test]
    fn stale_active_reads_as_none() {
        let mut m = MenuInstance::new(1, None, MenuConfig::default(), Anchor::default());
        m.items.register(
            None,
            ItemEntry {
                role: ItemRole::Item,
                flags: ItemFlags::empty(),
                label: None,
            },
        );
        m.active = Some(0);
        assert_eq!(m.valid_active(), Some(0));
        m.active = Some(4);
        assert_eq!(m.valid_active(), None);
        m.active = Some(0);
        m.reset_session();
        assert_eq!(m.valid_active(), None);
        assert!(m.items.is_empty());
    }
}
