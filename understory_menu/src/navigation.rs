// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard handling: roving focus, submenu traversal, selection, and
//! dismissal.
//!
//! Every key that moves the active item goes through [`MenuTree::navigate`],
//! whether it arrived at an item, a submenu trigger item, or the root
//! trigger. Candidates are always the enabled, visible items of a single
//! instance; a nested submenu's items never take part in its parent's
//! navigation.

use understory_focus::{MarkerKind, Navigation, RovingPolicy};

use crate::effect::{Effect, FocusTarget, Key, KeyOutcome, Reason};
use crate::id::{ItemKey, MenuId};
use crate::instance::Phase;
use crate::item::ItemRole;
use crate::tree::MenuTree;

impl MenuTree {
    /// Handle a key pressed while focus is inside the panel of `menu`.
    ///
    /// Only `Open` instances react; keys on closed or transient instances
    /// are ignored.
    pub fn key_down(&mut self, menu: MenuId, key: Key, now: u64) -> KeyOutcome {
        self.begin_turn();
        if self.phase(menu) != Phase::Open {
            tracing::trace!(?menu, ?key, "key ignored: not open");
            return KeyOutcome::Ignored;
        }
        match key {
            Key::ArrowDown => self.navigate(menu, Navigation::Next),
            Key::ArrowUp => self.navigate(menu, Navigation::Prev),
            Key::Home => self.navigate(menu, Navigation::First),
            Key::End => self.navigate(menu, Navigation::Last),
            Key::ArrowRight => match self.current_submenu(menu) {
                Some((index, child)) => {
                    self.set_keyboard_active(menu, index, false);
                    self.enter_submenu(child, Reason::Keyboard);
                    KeyOutcome::Handled
                }
                None => KeyOutcome::Ignored,
            },
            Key::ArrowLeft => self.leave_submenu(menu),
            Key::Enter | Key::Space => {
                let Some(index) = self.current_index(menu) else {
                    return KeyOutcome::Handled;
                };
                self.activate(ItemKey::new(menu, index), Reason::Keyboard);
                KeyOutcome::Handled
            }
            Key::Escape => {
                self.cascade(Reason::Escape);
                self.deferred_focus = Some(FocusTarget::Trigger(self.root()));
                KeyOutcome::Handled
            }
            Key::Tab { .. } => self.tab(menu),
            Key::Character(ch) => self.typeahead(menu, ch, now),
        }
    }

    /// Handle a key pressed while focus is on the trigger of `menu`.
    ///
    /// On a closed instance Enter, Space, and ArrowDown open it and seed the
    /// first item; ArrowUp opens it and seeds the last item. On an open
    /// instance the arrows move into the item list and Enter or Space close it.
    pub fn trigger_key_down(&mut self, menu: MenuId, key: Key, _now: u64) -> KeyOutcome {
        self.begin_turn();
        let nav = match key {
            Key::Enter | Key::Space | Key::ArrowDown => Navigation::First,
            Key::ArrowUp => Navigation::Last,
            _ => return KeyOutcome::Ignored,
        };
        match self.phase(menu) {
            Phase::Closed | Phase::Closing => {
                self.open_with(menu, Reason::TriggerKey, Some(nav));
                KeyOutcome::Handled
            }
            Phase::Opening => {
                if let Some(inst) = self.instance_mut(menu) {
                    inst.seed = Some(nav);
                }
                KeyOutcome::Handled
            }
            Phase::Open => match key {
                Key::Enter | Key::Space => {
                    self.close_with(menu, Reason::TriggerKey);
                    KeyOutcome::Handled
                }
                Key::ArrowUp => self.navigate(menu, Navigation::Prev),
                _ => self.navigate(menu, Navigation::Next),
            },
        }
    }

    /// Move the keyboard-active item of `menu`.
    ///
    /// Steps from the active item, or from the hovered item when nothing is
    /// active, wrapping at either end. With no candidates this is a no-op.
    pub fn navigate(&mut self, menu: MenuId, nav: Navigation) -> KeyOutcome {
        let Some(inst) = self.instance(menu) else {
            return KeyOutcome::Ignored;
        };
        let candidates = inst.items.candidates();
        let origin = self.current_index(menu);
        match RovingPolicy::default().next(origin, nav, &candidates) {
            Some(target) => self.set_keyboard_active(menu, target, false),
            None => tracing::trace!(?menu, ?nav, "navigation skipped: no candidates"),
        }
        KeyOutcome::Handled
    }

    /// The current item of `menu` if it opens a live submenu.
    fn current_submenu(&self, menu: MenuId) -> Option<(usize, MenuId)> {
        let index = self.current_index(menu)?;
        match self.instance(menu)?.items.get(index)?.role {
            ItemRole::SubmenuTrigger(child) if self.is_alive(child) => Some((index, child)),
            _ => None,
        }
    }

    /// Open `child` and put keyboard focus on its first item.
    fn enter_submenu(&mut self, child: MenuId, reason: Reason) {
        match self.phase(child) {
            Phase::Open => self.seed_now(child, Navigation::First),
            Phase::Opening => {
                if let Some(inst) = self.instance_mut(child) {
                    inst.seed = Some(Navigation::First);
                }
            }
            Phase::Closed | Phase::Closing => {
                self.open_with(child, reason, Some(Navigation::First));
            }
        }
    }

    fn seed_now(&mut self, menu: MenuId, nav: Navigation) {
        let Some(inst) = self.instance(menu) else {
            return;
        };
        let candidates = inst.items.candidates();
        if let Some(target) = RovingPolicy::default().next(None, nav, &candidates) {
            self.set_keyboard_active(menu, target, false);
        }
    }

    /// Close a submenu and return keyboard focus to its trigger item.
    fn leave_submenu(&mut self, menu: MenuId) -> KeyOutcome {
        let Some(parent) = self.parent(menu) else {
            return KeyOutcome::Ignored;
        };
        let trigger = self
            .instance(parent)
            .and_then(|p| p.items.submenu_trigger(menu));
        self.close_with(menu, Reason::Keyboard);
        if let Some(index) = trigger
            && self.is_open(parent)
        {
            self.set_keyboard_active(parent, index, true);
        }
        KeyOutcome::Handled
    }

    /// Activate an item: open its submenu, or select it.
    ///
    /// Disabled and hidden items do nothing.
    pub(crate) fn activate(&mut self, item: ItemKey, reason: Reason) {
        let Some(entry) = self.instance(item.menu).and_then(|m| m.items.get(item.index)) else {
            return;
        };
        if !entry.is_candidate() {
            tracing::trace!(?item, "activation ignored: not a candidate");
            return;
        }
        let role = entry.role;
        match role {
            ItemRole::SubmenuTrigger(child) => {
                if reason == Reason::Keyboard {
                    self.enter_submenu(child, reason);
                } else {
                    self.open_with(child, Reason::Trigger, None);
                }
            }
            _ => self.select(item, role),
        }
    }

    fn select(&mut self, item: ItemKey, role: ItemRole) {
        self.effects.push(Effect::Select { item, role });
        let close = self
            .config(item.menu)
            .is_some_and(|c| c.close_on_select);
        if close {
            self.cascade(Reason::Select);
            self.deferred_focus = Some(FocusTarget::Trigger(self.root()));
        }
    }

    fn tab(&mut self, menu: MenuId) -> KeyOutcome {
        let tabbable = self
            .config(menu)
            .is_some_and(|c| c.all_items_tabbable);
        if !tabbable {
            return KeyOutcome::Handled;
        }
        if let Some(owner) = self.bus.arbiter.owner(MarkerKind::Highlight)
            && owner.menu == menu
        {
            self.bus.arbiter.release(MarkerKind::Highlight, owner);
        }
        if let Some(inst) = self.instance_mut(menu) {
            inst.keyboard_mode = false;
            inst.active = None;
        }
        self.effects.push(Effect::ContainerTabStop {
            menu,
            tabbable: false,
        });
        if !self.tab_restore.contains(&menu) {
            self.tab_restore.push(menu);
        }
        KeyOutcome::Ignored
    }

    fn typeahead(&mut self, menu: MenuId, ch: char, now: u64) -> KeyOutcome {
        if ch.is_control() {
            return KeyOutcome::Ignored;
        }
        let origin = self.current_index(menu);
        let Some(inst) = self.instance_mut(menu) else {
            return KeyOutcome::Ignored;
        };
        inst.typeahead.push(ch, now);
        let labeled = inst.items.labeled_candidates();
        let found = inst.typeahead.find(origin, &labeled);
        if let Some(index) = found {
            self.set_keyboard_active(menu, index, false);
        }
        KeyOutcome::Handled
    }
}
