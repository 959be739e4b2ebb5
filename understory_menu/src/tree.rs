// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The menu tree: instance arena, open/close lifecycle, and turn handling.

use alloc::vec::Vec;

use kurbo::{Rect, Size};
use smallvec::SmallVec;
use understory_floating::{Anchor, LayoutChange, Placement};
use understory_focus::{MarkerKind, Navigation, RovingPolicy};

use crate::bus::RootBus;
use crate::config::{MenuConfig, OpenMode};
use crate::effect::{Effect, FocusTarget, Reason};
use crate::error::MenuError;
use crate::id::{ItemKey, MenuId};
use crate::instance::{MenuInstance, Phase};
use crate::item::{
    ItemDescriptor, ItemEntry, ItemFlags, ItemRole, ItemState, ItemTable, MAX_ITEM_GAP,
};
use crate::scheduler::{Task, TaskSlot};

/// A top-level menu and its nested submenus.
///
/// The tree owns every instance, the shared [`RootBus`], and a queue of
/// [`Effect`]s. Hosts forward input events to it, call
/// [`MenuTree::advance`] once per frame with the current time, and perform
/// the effects drained by [`MenuTree::take_effects`].
///
/// Every public event method starts a new turn. A cascade guards against
/// re-entry for the rest of the turn it ran in.
pub struct MenuTree {
    slots: Vec<Option<MenuInstance>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
    root: MenuId,
    pub(crate) bus: RootBus,
    pub(crate) effects: Vec<Effect>,
    pub(crate) deferred_focus: Option<FocusTarget>,
    pub(crate) tab_restore: SmallVec<[MenuId; 2]>,
    viewport: Option<Rect>,
}

impl core::fmt::Debug for MenuTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let alive = self.slots.iter().filter(|s| s.is_some()).count();
        let open = self
            .slots
            .iter()
            .flatten()
            .filter(|m| m.phase.is_open())
            .count();
        f.debug_struct("MenuTree")
            .field("root", &self.root)
            .field("instances_alive", &alive)
            .field("instances_open", &open)
            .field("pending_effects", &self.effects.len())
            .field("bus", &self.bus)
            .finish_non_exhaustive()
    }
}

impl MenuTree {
    /// Create a tree whose root instance opens next to `anchor`.
    ///
    /// A root configured with `controlled: Some(true)` starts open.
    pub fn new(config: MenuConfig, anchor: impl Into<Anchor>) -> Self {
        let initially_open = config.controlled == Some(true);
        let mut tree = Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: MenuId::new(0, 1),
            bus: RootBus::default(),
            effects: Vec::new(),
            deferred_focus: None,
            tab_restore: SmallVec::new(),
            viewport: None,
        };
        tree.root = tree.alloc(None, config, anchor.into());
        if initially_open {
            tree.transition_open(tree.root, Reason::Requested, None);
        }
        tree
    }

    /// The root instance.
    pub fn root(&self) -> MenuId {
        self.root
    }

    pub(crate) fn alloc(&mut self, parent: Option<MenuId>, config: MenuConfig, anchor: Anchor) -> MenuId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            (idx, generation)
        } else {
            self.slots.push(None);
            self.generations.push(1);
            (self.slots.len() - 1, 1)
        };
        let id = MenuId::from_slot(idx, generation);
        let hover_mode = config.mode == OpenMode::Hover;
        let mut instance = MenuInstance::new(generation, parent, config, anchor);
        if let Some(viewport) = self.viewport {
            instance
                .tracker
                .notify(LayoutChange::ViewportResized(viewport));
        }
        // Hover-mode instances stay registered until freed.
        instance.hover = hover_mode.then(|| self.bus.register_hover_controller(id));
        self.slots[idx] = Some(instance);
        if let Some(p) = parent
            && let Some(parent) = self.instance_mut(p)
        {
            parent.children.push(id);
        }
        id
    }

    pub(crate) fn free(&mut self, id: MenuId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(p) = self.parent(id)
            && let Some(parent) = self.instance_mut(p)
        {
            parent.children.retain(|c| *c != id);
        }
        if let Some(handle) = self.slots[id.idx()].take().and_then(|m| m.hover) {
            self.bus.unregister_hover_controller(handle);
        }
        self.free_list.push(id.idx());
    }

    pub(crate) fn instance(&self, id: MenuId) -> Option<&MenuInstance> {
        self.slots
            .get(id.idx())?
            .as_ref()
            .filter(|m| m.generation == id.1)
    }

    pub(crate) fn instance_mut(&mut self, id: MenuId) -> Option<&mut MenuInstance> {
        self.slots
            .get_mut(id.idx())?
            .as_mut()
            .filter(|m| m.generation == id.1)
    }

    /// Whether `id` names a live instance.
    pub fn is_alive(&self, id: MenuId) -> bool {
        self.instance(id).is_some()
    }

    /// Parent of a submenu.
    pub fn parent(&self, id: MenuId) -> Option<MenuId> {
        self.instance(id)?.parent
    }

    /// Submenus of `id`, in creation order.
    pub fn children(&self, id: MenuId) -> &[MenuId] {
        self.instance(id).map_or(&[], |m| m.children.as_slice())
    }

    /// Configuration of `id`.
    pub fn config(&self, id: MenuId) -> Option<&MenuConfig> {
        self.instance(id).map(|m| &m.config)
    }

    /// Lifecycle phase of `id`. Stale identifiers read as [`Phase::Closed`].
    pub fn phase(&self, id: MenuId) -> Phase {
        self.instance(id).map_or(Phase::Closed, |m| m.phase)
    }

    /// Whether `id` is open (`Opening` or `Open`).
    pub fn is_open(&self, id: MenuId) -> bool {
        self.phase(id).is_open()
    }

    /// The coordination bus shared by the whole tree.
    pub fn bus(&self) -> &RootBus {
        &self.bus
    }

    /// Mutable access to the bus, for registering external closers.
    pub fn bus_mut(&mut self) -> &mut RootBus {
        &mut self.bus
    }

    /// Drain queued effects, oldest first.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        core::mem::take(&mut self.effects)
    }

    /// Earliest time at which [`MenuTree::advance`] has timer work to do.
    pub fn next_deadline(&self) -> Option<u64> {
        self.bus.scheduler.next_due()
    }

    pub(crate) fn begin_turn(&mut self) {
        self.bus.begin_turn();
    }

    /// Ancestors of `id`, nearest first.
    pub(crate) fn ancestors(&self, id: MenuId) -> SmallVec<[MenuId; 4]> {
        let mut out = SmallVec::new();
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            out.push(p);
            cur = self.parent(p);
        }
        out
    }

    /// `id` and every descendant, depth first, parents before children.
    pub(crate) fn subtree(&self, id: MenuId) -> SmallVec<[MenuId; 8]> {
        let mut out = SmallVec::new();
        let mut stack: SmallVec<[MenuId; 8]> = SmallVec::new();
        stack.push(id);
        while let Some(m) = stack.pop() {
            out.push(m);
            stack.extend(self.children(m).iter().rev().copied());
        }
        out
    }

    // --- open / close -----------------------------------------------------

    /// Open `menu` as if its trigger was pressed.
    ///
    /// A controlled instance only reports the request through
    /// [`Effect::OpenChange`]; see [`MenuTree::set_controlled_open`].
    pub fn open(&mut self, menu: MenuId) {
        self.begin_turn();
        self.open_with(menu, Reason::Trigger, None);
    }

    /// Close `menu` as if its trigger was pressed.
    pub fn close(&mut self, menu: MenuId) {
        self.begin_turn();
        self.close_with(menu, Reason::Trigger);
    }

    /// Open `menu` if closed, close it if open.
    pub fn toggle(&mut self, menu: MenuId) {
        if self.is_open(menu) {
            self.close(menu);
        } else {
            self.open(menu);
        }
    }

    /// Ask `menu` to close on behalf of a collaborator that does not own the
    /// open state, such as a text field driving an autocomplete popup.
    pub fn request_close(&mut self, menu: MenuId) {
        self.begin_turn();
        self.close_with(menu, Reason::Requested);
    }

    /// Apply an externally owned open state to a controlled instance.
    ///
    /// Uncontrolled instances ignore this.
    pub fn set_controlled_open(&mut self, menu: MenuId, open: bool) {
        self.begin_turn();
        let Some(inst) = self.instance(menu) else {
            return;
        };
        if !inst.is_controlled() {
            tracing::trace!(?menu, "set_controlled_open ignored: uncontrolled");
            return;
        }
        match (open, inst.phase.is_open()) {
            (true, false) => {
                if self.parent_allows_open(menu) {
                    let (reason, seed) = (inst.opened_by, inst.seed);
                    self.transition_open(menu, reason, seed);
                }
            }
            (false, true) => self.transition_close(menu, Reason::Requested),
            _ => {}
        }
    }

    /// Close every open instance through the bus, deepest first.
    ///
    /// Does nothing if a cascade already ran this turn.
    pub fn close_all(&mut self) {
        self.begin_turn();
        self.cascade(Reason::Cascade);
    }

    /// Clear the pointer-hover marker everywhere and cancel every hover
    /// intent still waiting to open a submenu.
    pub fn clear_all_hover(&mut self) {
        self.begin_turn();
        self.bus.clear_all_hover();
    }

    fn parent_allows_open(&self, menu: MenuId) -> bool {
        self.parent(menu).is_none_or(|p| self.is_open(p))
    }

    pub(crate) fn open_with(&mut self, menu: MenuId, reason: Reason, seed: Option<Navigation>) {
        let Some(inst) = self.instance(menu) else {
            tracing::trace!(?menu, "open ignored: stale id");
            return;
        };
        if inst.phase.is_open() {
            return;
        }
        if !self.parent_allows_open(menu) {
            tracing::trace!(?menu, "open ignored: parent closed");
            return;
        }
        let controlled = inst.is_controlled();
        self.effects.push(Effect::OpenChange {
            menu,
            open: true,
            reason,
        });
        if controlled {
            if let Some(inst) = self.instance_mut(menu) {
                inst.opened_by = reason;
                inst.seed = seed;
            }
            return;
        }
        self.transition_open(menu, reason, seed);
    }

    pub(crate) fn close_with(&mut self, menu: MenuId, reason: Reason) {
        let Some(inst) = self.instance(menu) else {
            return;
        };
        if !inst.phase.is_open() {
            return;
        }
        let controlled = inst.is_controlled();
        self.effects.push(Effect::OpenChange {
            menu,
            open: false,
            reason,
        });
        if !controlled {
            self.transition_close(menu, reason);
        }
    }

    pub(crate) fn transition_open(&mut self, menu: MenuId, reason: Reason, seed: Option<Navigation>) {
        if let Some(parent) = self.parent(menu) {
            let siblings: SmallVec<[MenuId; 4]> = self
                .children(parent)
                .iter()
                .copied()
                .filter(|&c| c != menu && self.is_open(c))
                .collect();
            for sibling in siblings {
                self.effects.push(Effect::OpenChange {
                    menu: sibling,
                    open: false,
                    reason: Reason::Sibling,
                });
                self.transition_close(sibling, Reason::Sibling);
            }
        }
        let closer = self.bus.register_instance(menu);
        self.bus.scheduler.cancel(menu, TaskSlot::HoverIntent);
        let Some(inst) = self.instance_mut(menu) else {
            self.bus.unregister_closer(closer);
            return;
        };
        inst.reset_session();
        inst.phase = Phase::Opening;
        inst.exit_animating = false;
        inst.opened_by = reason;
        let roving = !inst.config.all_items_tabbable && reason != Reason::HoverIntent;
        inst.seed = seed.or(roving.then_some(Navigation::First));
        inst.closer = Some(closer);
        let placement = inst.tracker.start();
        tracing::debug!(?menu, ?reason, "open");
        if let Some(placement) = placement {
            self.effects.push(Effect::Positioned { menu, placement });
        }
    }

    /// Move an open instance to `Closing`, closing its open descendants first.
    pub(crate) fn transition_close(&mut self, menu: MenuId, reason: Reason) {
        if !self.is_open(menu) {
            return;
        }
        for m in self.subtree(menu) {
            self.bus.scheduler.cancel_owner(m);
        }
        let children: SmallVec<[MenuId; 4]> = self.children(menu).iter().copied().collect();
        for child in children {
            if self.is_open(child) {
                self.effects.push(Effect::OpenChange {
                    menu: child,
                    open: false,
                    reason: Reason::Parent,
                });
                self.transition_close(child, Reason::Parent);
            }
        }
        self.bus.arbiter.release_matching(|k| k.menu == menu);
        if let Some(FocusTarget::Item(k)) = self.deferred_focus
            && k.menu == menu
        {
            self.deferred_focus = None;
        }
        self.tab_restore.retain(|m| *m != menu);

        let cascading = self.bus.is_cascading();
        let Some(inst) = self.instance_mut(menu) else {
            return;
        };
        inst.reset_session();
        inst.seed = None;
        inst.phase = Phase::Closing;
        let closer = inst.closer.take();
        let direction = inst
            .tracker
            .placement()
            .map_or(inst.config.floating.side, |p| p.side);
        inst.tracker.stop();
        let animate = match reason {
            Reason::Destroyed => false,
            Reason::Parent | Reason::Cascade => inst.config.animate_cascade_exit,
            _ if cascading => inst.config.animate_cascade_exit,
            _ => inst.config.animate_exit,
        };
        inst.exit_animating = animate;
        if let Some(h) = closer {
            self.bus.unregister_closer(h);
        }
        tracing::debug!(?menu, ?reason, animate, "close");
        self.effects.push(Effect::Exit {
            menu,
            animate,
            direction,
        });
    }

    /// Run a cascade through the bus. Returns `false` if the guard rejected it.
    ///
    /// Controlled instances receive a close request and keep their place on
    /// the bus until the host applies it.
    pub(crate) fn cascade(&mut self, reason: Reason) -> bool {
        let Some(cascade) = self.bus.begin_cascade() else {
            return false;
        };
        let mut kept: SmallVec<[MenuId; 4]> = SmallVec::new();
        for menu in cascade {
            let Some(inst) = self.instance(menu) else {
                continue;
            };
            if !inst.phase.is_open() {
                continue;
            }
            let controlled = inst.is_controlled();
            self.effects.push(Effect::OpenChange {
                menu,
                open: false,
                reason,
            });
            if controlled {
                kept.push(menu);
            } else {
                self.transition_close(menu, reason);
            }
        }
        for menu in kept.into_iter().rev() {
            if self.is_open(menu) {
                let handle = self.bus.register_instance(menu);
                if let Some(inst) = self.instance_mut(menu) {
                    inst.closer = Some(handle);
                }
            }
        }
        true
    }

    /// Finish an animated exit: `Closing` becomes `Closed`.
    pub fn finish_exit(&mut self, menu: MenuId) {
        if let Some(inst) = self.instance_mut(menu)
            && inst.phase == Phase::Closing
        {
            inst.phase = Phase::Closed;
            inst.exit_animating = false;
        }
    }

    // --- turn boundary ----------------------------------------------------

    /// Settle transient phases, seed focus, flush deferred focus, and fire
    /// every timer due at `now`.
    ///
    /// Instances opened by a timer in this call stay `Opening` until the next
    /// call, so their items get a frame to register.
    pub fn advance(&mut self, now: u64) {
        self.begin_turn();
        self.settle_phases();
        self.apply_seeds();
        if let Some(target) = self.deferred_focus.take()
            && self.focus_target_is_live(target)
        {
            self.effects.push(Effect::Focus(target));
        }
        for menu in core::mem::take(&mut self.tab_restore) {
            if self.is_open(menu) {
                self.effects.push(Effect::ContainerTabStop {
                    menu,
                    tabbable: true,
                });
            }
        }
        for due in self.bus.scheduler.take_due(now) {
            tracing::trace!(owner = ?due.owner, task = ?due.task, now, "task fired");
            match due.task {
                Task::Open => self.open_with(due.owner, Reason::HoverIntent, None),
                Task::Close => self.close_with(due.owner, Reason::HoverIntent),
                Task::CloseSubmenus { keep } => {
                    let doomed: SmallVec<[MenuId; 4]> = self
                        .children(due.owner)
                        .iter()
                        .copied()
                        .filter(|&c| Some(c) != keep && self.is_open(c))
                        .collect();
                    for child in doomed {
                        self.close_with(child, Reason::HoverIntent);
                    }
                }
            }
        }
    }

    fn settle_phases(&mut self) {
        for inst in self.slots.iter_mut().flatten() {
            match inst.phase {
                Phase::Opening => inst.phase = Phase::Open,
                Phase::Closing if !inst.exit_animating => inst.phase = Phase::Closed,
                _ => {}
            }
        }
    }

    fn apply_seeds(&mut self) {
        let mut seeds: SmallVec<[(MenuId, usize); 2]> = SmallVec::new();
        for (idx, slot) in self.slots.iter().enumerate() {
            let Some(inst) = slot else { continue };
            if inst.phase != Phase::Open {
                continue;
            }
            let Some(nav) = inst.seed else { continue };
            let candidates = inst.items.candidates();
            if let Some(target) = RovingPolicy::default().next(None, nav, &candidates) {
                seeds.push((MenuId::from_slot(idx, inst.generation), target));
            }
        }
        for (menu, index) in seeds {
            if let Some(inst) = self.instance_mut(menu) {
                inst.seed = None;
            }
            self.set_keyboard_active(menu, index, true);
        }
    }

    fn focus_target_is_live(&self, target: FocusTarget) -> bool {
        match target {
            FocusTarget::Item(key) => {
                self.is_open(key.menu)
                    && self
                        .instance(key.menu)
                        .is_some_and(|m| m.items.is_candidate(key.index))
            }
            FocusTarget::Trigger(menu) => self.is_alive(menu),
        }
    }

    // --- items ------------------------------------------------------------

    /// Register an item in an open instance.
    ///
    /// Items register after their instance opens; closing drops them all.
    /// Registering at an occupied position replaces that entry. An explicit
    /// position more than [`MAX_ITEM_GAP`] past the end is rejected with
    /// [`MenuError::IndexOutOfRange`].
    pub fn register_item(&mut self, menu: MenuId, item: ItemDescriptor) -> Result<ItemKey, MenuError> {
        let inst = self.instance(menu).ok_or(MenuError::UnknownMenu(menu))?;
        if !inst.phase.is_open() {
            return Err(MenuError::NotOpen(menu));
        }
        if let ItemRole::SubmenuTrigger(child) = item.role
            && self.parent(child) != Some(menu)
        {
            return Err(MenuError::NotASubmenu {
                parent: menu,
                child,
            });
        }
        let flags = if item.disabled {
            ItemFlags::DISABLED
        } else {
            ItemFlags::empty()
        };
        let entry = ItemEntry {
            role: item.role,
            flags,
            label: item.label,
        };
        let requested = item.index;
        let inst = self.instance_mut(menu).ok_or(MenuError::UnknownMenu(menu))?;
        let index = inst.items.register(requested, entry).ok_or(MenuError::IndexOutOfRange {
            menu,
            index: requested.unwrap_or_default(),
        })?;
        let key = ItemKey::new(menu, index);
        self.revalidate(key);
        Ok(key)
    }

    /// Remove an item. Other items keep their positions.
    pub fn unregister_item(&mut self, key: ItemKey) -> bool {
        let removed = self
            .instance_mut(key.menu)
            .and_then(|m| m.items.remove(key.index))
            .is_some();
        if removed {
            self.revalidate(key);
        }
        removed
    }

    /// Enable or disable an item.
    pub fn set_item_disabled(&mut self, key: ItemKey, disabled: bool) -> bool {
        self.set_item_flag(key, ItemFlags::DISABLED, disabled)
    }

    /// Show or hide an item. Hidden items are skipped by navigation.
    pub fn set_item_hidden(&mut self, key: ItemKey, hidden: bool) -> bool {
        self.set_item_flag(key, ItemFlags::HIDDEN, hidden)
    }

    fn set_item_flag(&mut self, key: ItemKey, flag: ItemFlags, on: bool) -> bool {
        let Some(entry) = self
            .instance_mut(key.menu)
            .and_then(|m| m.items.get_mut(key.index))
        else {
            return false;
        };
        entry.flags.set(flag, on);
        self.revalidate(key);
        true
    }

    /// Drop markers and the active index from an item that stopped being a
    /// navigation candidate.
    fn revalidate(&mut self, key: ItemKey) {
        let Some(inst) = self.instance_mut(key.menu) else {
            return;
        };
        if inst.items.is_candidate(key.index) {
            return;
        }
        if inst.active == Some(key.index) {
            inst.active = None;
        }
        self.bus.arbiter.release(MarkerKind::Highlight, key);
        self.bus.arbiter.release(MarkerKind::Hover, key);
    }

    /// The item registry of `menu`.
    pub fn items(&self, menu: MenuId) -> Option<&ItemTable> {
        self.instance(menu).map(|m| &m.items)
    }

    /// Render-facing state of one item.
    pub fn item_state(&self, key: ItemKey) -> ItemState {
        let Some(entry) = self.instance(key.menu).and_then(|m| m.items.get(key.index)) else {
            return ItemState::default();
        };
        ItemState {
            highlighted: self.bus.arbiter.holds(MarkerKind::Highlight, key),
            hovered: self.bus.arbiter.holds(MarkerKind::Hover, key),
            expanded: matches!(entry.role, ItemRole::SubmenuTrigger(c) if self.is_open(c)),
            disabled: entry.flags.contains(ItemFlags::DISABLED),
            hidden: entry.flags.contains(ItemFlags::HIDDEN),
        }
    }

    /// The keyboard-active item of `menu`, if it still names an enabled,
    /// visible item.
    pub fn active_index(&self, menu: MenuId) -> Option<usize> {
        self.instance(menu).and_then(MenuInstance::valid_active)
    }

    /// Whether `menu` is in keyboard mode.
    pub fn is_keyboard_mode(&self, menu: MenuId) -> bool {
        self.instance(menu).is_some_and(|m| m.keyboard_mode)
    }

    /// Index navigation starts from: the active item, else the hovered item.
    pub(crate) fn current_index(&self, menu: MenuId) -> Option<usize> {
        let inst = self.instance(menu)?;
        inst.valid_active().or_else(|| {
            self.bus
                .arbiter
                .owner(MarkerKind::Hover)
                .filter(|k| k.menu == menu && inst.items.is_candidate(k.index))
                .map(|k| k.index)
        })
    }

    /// Give the keyboard-active marker to an item of `menu`.
    ///
    /// Clears every hover marker, and every hover intent still waiting to
    /// open, before moving the keyboard marker.
    pub(crate) fn set_keyboard_active(&mut self, menu: MenuId, index: usize, deferred: bool) {
        let key = ItemKey::new(menu, index);
        self.bus.clear_all_hover();
        self.bus.arbiter.claim_exclusive(MarkerKind::Highlight, key);
        if let Some(inst) = self.instance_mut(menu) {
            inst.active = Some(index);
            inst.keyboard_mode = true;
            inst.seed = None;
        }
        let target = FocusTarget::Item(key);
        if deferred {
            self.deferred_focus = Some(target);
        } else {
            self.deferred_focus = None;
            self.effects.push(Effect::Focus(target));
        }
    }

    // --- placement --------------------------------------------------------

    /// Current placement of an open instance.
    pub fn placement(&self, menu: MenuId) -> Option<&Placement> {
        self.instance(menu)?.tracker.placement()
    }

    /// Set the viewport every instance is placed within.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = Some(viewport);
        let ids: Vec<MenuId> = self.ids().collect();
        for menu in ids {
            self.notify_layout(menu, LayoutChange::ViewportResized(viewport));
        }
    }

    /// Report the measured content size of a panel.
    pub fn set_panel_size(&mut self, menu: MenuId, size: Size) {
        self.notify_layout(menu, LayoutChange::PanelResized(size));
    }

    /// Replace the anchor of `menu`.
    pub fn set_anchor(&mut self, menu: MenuId, anchor: impl Into<Anchor>) {
        let Some(inst) = self.instance_mut(menu) else {
            return;
        };
        if let Some(placement) = inst.tracker.set_anchor(anchor.into()) {
            self.effects.push(Effect::Positioned { menu, placement });
        }
    }

    /// Forward a layout change to the tracker of `menu`.
    ///
    /// Closed instances record the new geometry without placing.
    pub fn notify_layout(&mut self, menu: MenuId, change: LayoutChange) {
        let Some(inst) = self.instance_mut(menu) else {
            return;
        };
        if let Some(placement) = inst.tracker.notify(change) {
            self.effects.push(Effect::Positioned { menu, placement });
        }
    }

    pub(crate) fn ids(&self) -> impl Iterator<Item = MenuId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|m| MenuId::from_slot(idx, m.generation)))
    }

    /// Bounding rectangle of the root anchor.
    pub(crate) fn root_anchor_rect(&self) -> Option<Rect> {
        self.instance(self.root)?.tracker.anchor().bounding_rect()
    }
}
