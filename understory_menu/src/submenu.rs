// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Submenu creation and destruction.

use understory_floating::Anchor;

use crate::config::MenuConfig;
use crate::effect::{Effect, Reason};
use crate::error::MenuError;
use crate::id::MenuId;
use crate::tree::MenuTree;

impl MenuTree {
    /// Create a submenu of `parent`.
    ///
    /// The submenu is anchored to nothing until the host reports the
    /// rectangle of its trigger item through
    /// [`MenuTree::notify_layout`] or [`MenuTree::set_anchor`]. A submenu
    /// configured with `controlled: Some(true)` opens right away when its
    /// parent is open.
    pub fn create_submenu(&mut self, parent: MenuId, config: MenuConfig) -> Result<MenuId, MenuError> {
        if !self.is_alive(parent) {
            return Err(MenuError::UnknownMenu(parent));
        }
        let initially_open = config.controlled == Some(true);
        let id = self.alloc(Some(parent), config, Anchor::default());
        tracing::debug!(?parent, submenu = ?id, "submenu created");
        if initially_open && self.is_open(parent) {
            self.transition_open(id, Reason::Requested, None);
        }
        Ok(id)
    }

    /// Destroy a submenu and its descendants.
    ///
    /// Open instances close first, their timers are canceled and their
    /// markers released; afterwards their identifiers are stale. The root
    /// lives as long as the tree and cannot be destroyed; returns `false`
    /// for it and for stale identifiers.
    pub fn destroy(&mut self, menu: MenuId) -> bool {
        self.begin_turn();
        if menu == self.root() || !self.is_alive(menu) {
            return false;
        }
        if self.is_open(menu) {
            self.effects.push(Effect::OpenChange {
                menu,
                open: false,
                reason: Reason::Destroyed,
            });
            self.transition_close(menu, Reason::Destroyed);
        }
        // Children first, so each `free` unlinks from a live parent.
        for m in self.subtree(menu).into_iter().rev() {
            self.bus.scheduler.cancel_owner(m);
            self.bus.arbiter.release_matching(|k| k.menu == m);
            self.tab_restore.retain(|t| *t != m);
            self.free(m);
        }
        tracing::debug!(?menu, "submenu destroyed");
        true
    }
}
