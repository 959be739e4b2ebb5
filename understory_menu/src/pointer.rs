// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer handling: hover markers, hover intent, and outside dismissal.

use kurbo::Point;
use smallvec::SmallVec;
use understory_focus::MarkerKind;

use crate::config::OpenMode;
use crate::effect::{Effect, FocusTarget, Reason};
use crate::id::{ItemKey, MenuId};
use crate::instance::Phase;
use crate::item::ItemRole;
use crate::scheduler::{Task, TaskSlot};
use crate::tree::MenuTree;

impl MenuTree {
    /// The pointer moved over an item.
    ///
    /// The first move onto an item takes the hover marker (clearing every
    /// other marker), leaves keyboard mode, and focuses the item unless the
    /// instance delegates item focus. Moving onto a hover-mode submenu
    /// trigger schedules its submenu to open and cancels pending opens of its
    /// siblings; any other open submenu of the same menu is closed through
    /// one shared timer.
    pub fn pointer_move_item(&mut self, item: ItemKey, now: u64) {
        self.begin_turn();
        if self.phase(item.menu) != Phase::Open {
            return;
        }
        let Some(inst) = self.instance(item.menu) else {
            return;
        };
        let Some(entry) = inst.items.get(item.index) else {
            return;
        };
        if !entry.is_candidate() {
            return;
        }
        let role = entry.role;
        let delegate = inst.config.delegate_item_focus;
        let shared_delay = inst.config.hover.submenu_close;

        if !self.bus.arbiter.holds(MarkerKind::Hover, item) {
            self.bus.arbiter.claim_exclusive(MarkerKind::Hover, item);
            if let Some(inst) = self.instance_mut(item.menu) {
                inst.keyboard_mode = false;
                inst.active = None;
                inst.seed = None;
            }
            if !delegate {
                self.effects.push(Effect::Focus(FocusTarget::Item(item)));
            }
        }
        self.cancel_pending_closes(item.menu);

        let keep = match role {
            ItemRole::SubmenuTrigger(child) if self.is_alive(child) => Some(child),
            _ => None,
        };
        // A sibling trigger the pointer passed over must not open late.
        let stale: SmallVec<[MenuId; 4]> = self
            .children(item.menu)
            .iter()
            .copied()
            .filter(|&c| {
                Some(c) != keep
                    && self.bus.scheduler.pending(c, TaskSlot::HoverIntent) == Some(Task::Open)
            })
            .collect();
        for child in stale {
            self.bus.scheduler.cancel(child, TaskSlot::HoverIntent);
        }
        if let Some(child) = keep
            && let Some(config) = self.config(child)
            && config.mode == OpenMode::Hover
        {
            let open_delay = config.hover.open;
            match self.bus.scheduler.pending(child, TaskSlot::HoverIntent) {
                Some(Task::Close) => {
                    self.bus.scheduler.cancel(child, TaskSlot::HoverIntent);
                }
                Some(Task::Open) => {}
                _ if !self.is_open(child) => {
                    self.bus
                        .scheduler
                        .schedule(child, TaskSlot::HoverIntent, Task::Open, now, open_delay);
                }
                _ => {}
            }
        }

        let others_open = self
            .children(item.menu)
            .iter()
            .any(|&c| Some(c) != keep && self.is_open(c));
        if others_open {
            let task = Task::CloseSubmenus { keep };
            if self.bus.scheduler.pending(item.menu, TaskSlot::CloseSubmenus) != Some(task) {
                self.bus
                    .scheduler
                    .schedule(item.menu, TaskSlot::CloseSubmenus, task, now, shared_delay);
            }
        } else {
            self.bus.scheduler.cancel(item.menu, TaskSlot::CloseSubmenus);
        }
    }

    /// The pointer left an item.
    ///
    /// Releases the item's hover marker. Leaving a hover-mode submenu
    /// trigger cancels a pending open of its submenu, or schedules the
    /// submenu to close if it is already open.
    pub fn pointer_leave_item(&mut self, item: ItemKey, now: u64) {
        self.begin_turn();
        self.bus.arbiter.release(MarkerKind::Hover, item);
        let Some(ItemRole::SubmenuTrigger(child)) = self
            .instance(item.menu)
            .and_then(|m| m.items.get(item.index))
            .map(|e| e.role)
        else {
            return;
        };
        let Some(config) = self.config(child) else {
            return;
        };
        if config.mode != OpenMode::Hover {
            return;
        }
        let close_delay = config.hover.close;
        if self.bus.scheduler.pending(child, TaskSlot::HoverIntent) == Some(Task::Open) {
            self.bus.scheduler.cancel(child, TaskSlot::HoverIntent);
        } else if self.is_open(child) {
            self.bus
                .scheduler
                .schedule(child, TaskSlot::HoverIntent, Task::Close, now, close_delay);
        }
    }

    /// The pointer entered the panel of `menu`.
    ///
    /// Cancels pending closes of `menu` and its ancestors, including a
    /// shared timer that was about to close it.
    pub fn pointer_enter_content(&mut self, menu: MenuId, _now: u64) {
        self.begin_turn();
        if !self.is_open(menu) {
            return;
        }
        self.cancel_pending_closes(menu);
    }

    /// The pointer left the panel of `menu`.
    ///
    /// A hover-mode submenu schedules its own close; it is canceled if the
    /// pointer reaches the trigger or the panel again in time.
    pub fn pointer_leave_content(&mut self, menu: MenuId, now: u64) {
        self.begin_turn();
        if let Some(owner) = self.bus.arbiter.owner(MarkerKind::Hover)
            && owner.menu == menu
        {
            self.bus.arbiter.release(MarkerKind::Hover, owner);
        }
        if !self.is_open(menu) || self.parent(menu).is_none() {
            return;
        }
        let Some(config) = self.config(menu) else {
            return;
        };
        if config.mode == OpenMode::Hover {
            let close_delay = config.hover.close;
            self.bus
                .scheduler
                .schedule(menu, TaskSlot::HoverIntent, Task::Close, now, close_delay);
        }
    }

    /// A pointer press anywhere in the window.
    ///
    /// A press outside the root anchor and outside every open panel closes
    /// the whole tree.
    pub fn pointer_down(&mut self, point: Point) {
        self.begin_turn();
        if !self.is_open(self.root()) {
            return;
        }
        if self.root_anchor_rect().is_some_and(|r| r.contains(point)) {
            return;
        }
        let inside = self
            .ids()
            .filter(|&m| self.is_open(m))
            .filter_map(|m| self.placement(m))
            .any(|p| p.rect().contains(point));
        if !inside {
            tracing::debug!(?point, "outside press");
            self.cascade(Reason::Outside);
        }
    }

    /// An item was clicked or tapped.
    ///
    /// Opens the item's submenu, or selects it. Disabled items do nothing.
    pub fn press_item(&mut self, item: ItemKey) {
        self.begin_turn();
        if self.phase(item.menu) != Phase::Open {
            return;
        }
        self.activate(item, Reason::Trigger);
    }

    /// Cancel hover-intent closes of `menu` and its ancestors, and any shared
    /// timer of an ancestor that would close the path down to `menu`.
    fn cancel_pending_closes(&mut self, menu: MenuId) {
        let mut path: SmallVec<[MenuId; 4]> = SmallVec::new();
        path.push(menu);
        path.extend(self.ancestors(menu));
        for (i, &m) in path.iter().enumerate() {
            if self.bus.scheduler.pending(m, TaskSlot::HoverIntent) == Some(Task::Close) {
                self.bus.scheduler.cancel(m, TaskSlot::HoverIntent);
            }
            // The shared timer of `m` may target the child we came from.
            if i > 0
                && let Some(Task::CloseSubmenus { keep }) =
                    self.bus.scheduler.pending(m, TaskSlot::CloseSubmenus)
                && keep != Some(path[i - 1])
            {
                self.bus.scheduler.cancel(m, TaskSlot::CloseSubmenus);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::{Point, Rect, Size};
    use understory_focus::MarkerKind;

    use crate::config::MenuConfig;
    use crate::effect::{Effect, FocusTarget, Key};
    use crate::id::{ItemKey, MenuId};
    use crate::instance::Phase;
    use crate::item::ItemDescriptor;
    use crate::scheduler::{Task, TaskSlot};
    use crate::tree::MenuTree;
    use crate::tree::tests::{items, tree};

    /// Root with items [plain, trigger A, trigger B]; both submenus hover mode.
    fn two_submenus() -> (MenuTree, MenuId, MenuId) {
        let mut t = tree();
        let root = t.root();
        let a = t.create_submenu(root, MenuConfig::submenu()).unwrap();
        let b = t.create_submenu(root, MenuConfig::submenu()).unwrap();
        t.open(root);
        items(&mut t, root, 1);
        t.register_item(root, ItemDescriptor::submenu(a)).unwrap();
        t.register_item(root, ItemDescriptor::submenu(b)).unwrap();
        t.advance(0);
        t.take_effects();
        (t, a, b)
    }

    #[test]
    fn hover_takes_marker_and_leaves_keyboard_mode() {
        let (mut t, _, _) = two_submenus();
        let root = t.root();
        assert!(t.is_keyboard_mode(root));
        t.pointer_move_item(ItemKey::new(root, 0), 10);
        assert!(!t.is_keyboard_mode(root));
        assert_eq!(t.active_index(root), None);
        assert_eq!(t.bus().arbiter().owner(MarkerKind::Highlight), None);
        assert!(t.item_state(ItemKey::new(root, 0)).hovered);
        assert_eq!(
            t.take_effects(),
            vec![Effect::Focus(FocusTarget::Item(ItemKey::new(root, 0)))]
        );
        // Moving within the same item is idempotent.
        t.pointer_move_item(ItemKey::new(root, 0), 11);
        assert!(t.take_effects().is_empty());
    }

    #[test]
    fn keyboard_continues_from_hovered_item() {
        let (mut t, _, _) = two_submenus();
        let root = t.root();
        t.pointer_move_item(ItemKey::new(root, 1), 10);
        t.key_down(root, Key::ArrowDown, 20);
        assert_eq!(t.active_index(root), Some(2));
        assert!(t.is_keyboard_mode(root));
        assert_eq!(t.bus().arbiter().owner(MarkerKind::Hover), None);
    }

    #[test]
    fn delegated_focus_skips_focus_effect() {
        let config = MenuConfig {
            delegate_item_focus: true,
            ..MenuConfig::default()
        };
        let mut t = MenuTree::new(config, Point::ZERO);
        let root = t.root();
        t.open(root);
        items(&mut t, root, 2);
        t.advance(0);
        t.take_effects();
        t.pointer_move_item(ItemKey::new(root, 1), 5);
        assert!(t.take_effects().is_empty());
        assert!(t.item_state(ItemKey::new(root, 1)).hovered);
    }

    #[test]
    fn disabled_item_ignores_hover() {
        let (mut t, _, _) = two_submenus();
        let root = t.root();
        t.set_item_disabled(ItemKey::new(root, 0), true);
        t.pointer_move_item(ItemKey::new(root, 0), 10);
        assert_eq!(t.bus().arbiter().owner(MarkerKind::Hover), None);
    }

    #[test]
    fn hover_intent_opens_after_delay() {
        let (mut t, a, _) = two_submenus();
        let root = t.root();
        t.pointer_move_item(ItemKey::new(root, 1), 100);
        t.advance(189);
        assert!(!t.is_open(a));
        t.advance(190);
        assert_eq!(t.phase(a), Phase::Opening);
        items(&mut t, a, 2);
        t.advance(200);
        assert_eq!(t.phase(a), Phase::Open);
        // Hover-opened submenus do not seed keyboard focus.
        assert_eq!(t.active_index(a), None);
    }

    #[test]
    fn fast_traversal_opens_only_the_last_trigger() {
        let (mut t, a, b) = two_submenus();
        let root = t.root();
        t.pointer_move_item(ItemKey::new(root, 1), 0);
        t.pointer_leave_item(ItemKey::new(root, 1), 30);
        t.pointer_move_item(ItemKey::new(root, 2), 30);
        assert_eq!(t.bus().scheduler().pending(a, TaskSlot::HoverIntent), None);
        t.advance(200);
        assert!(!t.is_open(a));
        assert!(t.is_open(b));
    }

    #[test]
    fn passing_over_a_trigger_without_leave_never_opens_it() {
        let (mut t, a, b) = two_submenus();
        let root = t.root();
        t.pointer_move_item(ItemKey::new(root, 1), 0);
        t.pointer_move_item(ItemKey::new(root, 2), 30);
        assert_eq!(t.bus().scheduler().pending(a, TaskSlot::HoverIntent), None);
        let mut a_ever_open = false;
        for now in (0..=200).step_by(5) {
            t.advance(now);
            a_ever_open |= t.phase(a) != Phase::Closed;
        }
        assert!(!a_ever_open);
        assert!(t.is_open(b));
    }

    #[test]
    fn clear_all_hover_cancels_pending_submenu_open() {
        let (mut t, a, _) = two_submenus();
        let root = t.root();
        t.pointer_move_item(ItemKey::new(root, 1), 0);
        assert_eq!(t.bus().scheduler().pending(a, TaskSlot::HoverIntent), Some(Task::Open));
        t.clear_all_hover();
        assert_eq!(t.bus().scheduler().pending(a, TaskSlot::HoverIntent), None);
        assert_eq!(t.bus().arbiter().owner(MarkerKind::Hover), None);
        t.advance(200);
        assert!(!t.is_open(a));
    }

    #[test]
    fn keyboard_cancels_pending_submenu_open() {
        let (mut t, a, _) = two_submenus();
        let root = t.root();
        t.pointer_move_item(ItemKey::new(root, 1), 0);
        t.key_down(root, Key::ArrowDown, 20);
        assert_eq!(t.bus().scheduler().pending(a, TaskSlot::HoverIntent), None);
        t.advance(200);
        assert!(!t.is_open(a));
    }

    #[test]
    fn destroyed_hover_submenu_leaves_nothing_pending() {
        let (mut t, a, _) = two_submenus();
        let root = t.root();
        t.pointer_move_item(ItemKey::new(root, 1), 0);
        assert!(t.destroy(a));
        assert_eq!(t.bus().scheduler().pending(a, TaskSlot::HoverIntent), None);
        t.clear_all_hover();
        t.advance(200);
        assert!(!t.is_alive(a));
    }

    #[test]
    fn moving_between_open_siblings_uses_shared_close() {
        let (mut t, a, b) = two_submenus();
        let root = t.root();
        t.pointer_move_item(ItemKey::new(root, 1), 0);
        t.advance(90);
        t.advance(95);
        assert_eq!(t.phase(a), Phase::Open);

        t.pointer_leave_item(ItemKey::new(root, 1), 110);
        assert_eq!(t.bus().scheduler().pending(a, TaskSlot::HoverIntent), Some(Task::Close));
        t.pointer_move_item(ItemKey::new(root, 2), 120);
        assert_eq!(
            t.bus().scheduler().pending(root, TaskSlot::CloseSubmenus),
            Some(Task::CloseSubmenus { keep: Some(b) })
        );
        t.advance(155);
        assert!(!t.is_open(a));
        assert!(!t.is_open(b));
        t.advance(210);
        assert!(t.is_open(b));
        assert!(!t.is_open(a));
    }

    #[test]
    fn entering_submenu_content_cancels_its_close() {
        let (mut t, a, _) = two_submenus();
        let root = t.root();
        t.pointer_move_item(ItemKey::new(root, 1), 0);
        t.advance(90);
        t.advance(95);
        t.pointer_leave_item(ItemKey::new(root, 1), 100);
        t.pointer_enter_content(a, 120);
        t.advance(500);
        assert!(t.is_open(a));

        t.pointer_leave_content(a, 600);
        t.advance(659);
        assert!(t.is_open(a));
        t.advance(660);
        assert!(!t.is_open(a));
    }

    #[test]
    fn returning_to_trigger_cancels_close() {
        let (mut t, a, _) = two_submenus();
        let root = t.root();
        t.pointer_move_item(ItemKey::new(root, 1), 0);
        t.advance(90);
        t.advance(95);
        t.pointer_leave_item(ItemKey::new(root, 1), 100);
        t.pointer_move_item(ItemKey::new(root, 1), 120);
        t.advance(400);
        assert!(t.is_open(a));
    }

    #[test]
    fn hovering_plain_item_closes_open_submenu() {
        let (mut t, a, _) = two_submenus();
        let root = t.root();
        t.pointer_move_item(ItemKey::new(root, 1), 0);
        t.advance(90);
        t.pointer_leave_item(ItemKey::new(root, 1), 100);
        t.pointer_move_item(ItemKey::new(root, 0), 101);
        t.advance(136);
        assert!(!t.is_open(a));
    }

    #[test]
    fn outside_press_closes_tree() {
        let mut t = tree();
        let root = t.root();
        t.set_panel_size(root, Size::new(100.0, 80.0));
        t.open(root);
        // Inside the anchor and inside the panel keep it open.
        t.pointer_down(Point::new(20.0, 20.0));
        let panel = t.placement(root).unwrap().rect();
        t.pointer_down(panel.center());
        assert!(t.is_open(root));
        t.pointer_down(Point::new(700.0, 500.0));
        assert!(!t.is_open(root));
    }

    #[test]
    fn press_item_selects() {
        let mut t = tree();
        let root = t.root();
        t.open(root);
        let keys = items(&mut t, root, 2);
        t.press_item(keys[1]);
        assert!(t.is_open(root));
        t.advance(0);
        t.take_effects();
        t.press_item(keys[1]);
        assert!(!t.is_open(root));
        assert!(
            t.take_effects()
                .iter()
                .any(|e| matches!(e, Effect::Select { item, .. } if *item == keys[1]))
        );
    }

    #[test]
    fn placement_flips_at_viewport_bottom() {
        let mut t = MenuTree::new(MenuConfig::default(), Rect::new(100.0, 560.0, 180.0, 590.0));
        t.set_viewport(Rect::new(0.0, 0.0, 800.0, 600.0));
        let root = t.root();
        t.set_panel_size(root, Size::new(160.0, 200.0));
        t.open(root);
        let placement = t.placement(root).unwrap();
        assert_eq!(placement.side, understory_floating::Side::Top);
        assert!(placement.rect().y1 <= 560.0);
    }
}
