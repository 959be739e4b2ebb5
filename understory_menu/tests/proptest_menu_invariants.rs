// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based invariant tests for the menu engine.
//!
//! 1. ArrowDown from no active item cycles through enabled items with wraparound.
//! 2. Disabled items are never the keyboard-active target.
//! 3. After any single event, at most one item holds each focus marker, and a
//!    held keyboard marker always names an enabled, visible item of an open menu.
//! 4. Hover and keyboard mode never coexist within one instance.
//! 5. A cascade leaves every instance closed with an empty registry.

use kurbo::{Point, Rect};
use proptest::prelude::*;
use understory_menu::{ItemDescriptor, ItemKey, Key, MenuConfig, MenuId, MenuTree};

// ── Helpers ─────────────────────────────────────────────────────────────

fn tabbable_tree(enabled: &[bool]) -> (MenuTree, MenuId) {
    let mut tree = MenuTree::new(MenuConfig::default().all_items_tabbable(true), Point::ZERO);
    let root = tree.root();
    tree.open(root);
    for &on in enabled {
        tree.register_item(root, ItemDescriptor::new().disabled(!on)).unwrap();
    }
    tree.advance(0);
    (tree, root)
}

#[derive(Clone, Copy, Debug)]
enum Op {
    Hover(usize, usize),
    Leave(usize, usize),
    Key(Key),
    Press(usize, usize),
    Wait(u64),
    EnterSubmenu,
    LeaveSubmenu,
    Reopen,
}

fn key() -> impl Strategy<Value = Key> {
    prop_oneof![
        Just(Key::ArrowDown),
        Just(Key::ArrowUp),
        Just(Key::ArrowLeft),
        Just(Key::ArrowRight),
        Just(Key::Home),
        Just(Key::End),
        Just(Key::Enter),
        Just(Key::Escape),
        Just(Key::Character('a')),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..2_usize, 0..4_usize).prop_map(|(m, i)| Op::Hover(m, i)),
        (0..2_usize, 0..4_usize).prop_map(|(m, i)| Op::Leave(m, i)),
        key().prop_map(Op::Key),
        (0..2_usize, 0..4_usize).prop_map(|(m, i)| Op::Press(m, i)),
        (1..200_u64).prop_map(Op::Wait),
        Just(Op::EnterSubmenu),
        Just(Op::LeaveSubmenu),
        Just(Op::Reopen),
    ]
}

/// Root items: [Alpha, disabled, submenu trigger, Another]; submenu: three items.
struct Scene {
    tree: MenuTree,
    menus: [MenuId; 2],
    now: u64,
}

impl Scene {
    fn new() -> Self {
        let mut tree = MenuTree::new(MenuConfig::default(), Rect::new(0.0, 0.0, 80.0, 20.0));
        tree.set_viewport(Rect::new(0.0, 0.0, 800.0, 600.0));
        let root = tree.root();
        let sub = tree.create_submenu(root, MenuConfig::submenu()).unwrap();
        let mut scene = Self {
            tree,
            menus: [root, sub],
            now: 0,
        };
        scene.tree.open(root);
        scene.register_missing();
        scene
    }

    /// Stand-in for the host mounting items of freshly opened panels.
    fn register_missing(&mut self) {
        let [root, sub] = self.menus;
        if self.tree.is_open(root) && self.tree.items(root).unwrap().is_empty() {
            for d in [
                ItemDescriptor::new().label("Alpha"),
                ItemDescriptor::new().label("Beta").disabled(true),
                ItemDescriptor::submenu(sub).label("More"),
                ItemDescriptor::new().label("Another"),
            ] {
                self.tree.register_item(root, d).unwrap();
            }
        }
        if self.tree.is_open(sub) && self.tree.items(sub).unwrap().is_empty() {
            for label in ["Apple", "Banana", "Cherry"] {
                self.tree
                    .register_item(sub, ItemDescriptor::new().label(label))
                    .unwrap();
            }
        }
    }

    fn apply(&mut self, op: Op) {
        self.now += 1;
        let menus = self.menus;
        let menu = |m: usize| menus[m];
        match op {
            Op::Hover(m, i) => self.tree.pointer_move_item(ItemKey::new(menu(m), i), self.now),
            Op::Leave(m, i) => self.tree.pointer_leave_item(ItemKey::new(menu(m), i), self.now),
            Op::Key(k) => {
                let target = if self.tree.is_open(self.menus[1]) {
                    self.menus[1]
                } else {
                    self.menus[0]
                };
                self.tree.key_down(target, k, self.now);
            }
            Op::Press(m, i) => self.tree.press_item(ItemKey::new(menu(m), i)),
            Op::Wait(ms) => {
                self.now += ms;
                self.tree.advance(self.now);
            }
            Op::EnterSubmenu => self.tree.pointer_enter_content(self.menus[1], self.now),
            Op::LeaveSubmenu => self.tree.pointer_leave_content(self.menus[1], self.now),
            Op::Reopen => {
                self.tree.advance(self.now);
                self.tree.open(self.menus[0]);
            }
        }
        self.register_missing();
        self.tree.take_effects();
    }

    fn all_keys(&self) -> Vec<ItemKey> {
        self.menus
            .iter()
            .flat_map(|&m| {
                self.tree
                    .items(m)
                    .into_iter()
                    .flat_map(move |t| t.iter().map(move |(i, _)| ItemKey::new(m, i)))
            })
            .collect()
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Wraparound from null
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn arrow_down_cycles_with_wraparound(n in 1_usize..20, presses in 1_usize..60) {
        let (mut tree, root) = tabbable_tree(&vec![true; n]);
        prop_assert_eq!(tree.active_index(root), None);
        for k in 0..presses {
            tree.key_down(root, Key::ArrowDown, 0);
            prop_assert_eq!(tree.active_index(root), Some(k % n));
        }
    }

    #[test]
    fn arrow_up_cycles_backwards(n in 1_usize..20, presses in 1_usize..60) {
        let (mut tree, root) = tabbable_tree(&vec![true; n]);
        for k in 0..presses {
            tree.key_down(root, Key::ArrowUp, 0);
            prop_assert_eq!(tree.active_index(root), Some(n - 1 - (k % n)));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Disabled items are never targets
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn disabled_items_are_never_active(
        enabled in proptest::collection::vec(any::<bool>(), 1..16),
        keys in proptest::collection::vec(
            prop_oneof![Just(Key::ArrowDown), Just(Key::ArrowUp), Just(Key::Home), Just(Key::End)],
            1..40,
        ),
    ) {
        let (mut tree, root) = tabbable_tree(&enabled);
        let candidates: Vec<usize> = (0..enabled.len()).filter(|&i| enabled[i]).collect();
        for k in keys {
            tree.key_down(root, k, 0);
            match tree.active_index(root) {
                Some(i) => prop_assert!(enabled[i], "disabled item {} became active", i),
                None => prop_assert!(candidates.is_empty()),
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3 + 4. Marker invariants after every event
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn markers_stay_single_and_consistent(ops in proptest::collection::vec(op(), 1..80)) {
        let mut scene = Scene::new();
        for op in ops {
            scene.apply(op);
            let keys = scene.all_keys();
            let highlighted: Vec<_> = keys.iter().filter(|&&k| scene.tree.item_state(k).highlighted).collect();
            let hovered: Vec<_> = keys.iter().filter(|&&k| scene.tree.item_state(k).hovered).collect();
            prop_assert!(highlighted.len() <= 1, "two keyboard markers after {:?}", op);
            prop_assert!(hovered.len() <= 1, "two hover markers after {:?}", op);

            if let Some(&&k) = highlighted.first() {
                prop_assert!(scene.tree.is_open(k.menu));
                let state = scene.tree.item_state(k);
                prop_assert!(!state.disabled && !state.hidden);
            }
            if let Some(&&k) = hovered.first() {
                prop_assert!(
                    !scene.tree.is_keyboard_mode(k.menu),
                    "hover and keyboard mode coexist in {:?} after {:?}", k.menu, op
                );
            }
            for m in scene.menus {
                if let Some(i) = scene.tree.active_index(m) {
                    prop_assert!(scene.tree.items(m).unwrap().is_candidate(i));
                }
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Cascade leaves a clean slate
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn cascade_closes_everything(ops in proptest::collection::vec(op(), 0..40)) {
        let mut scene = Scene::new();
        for op in ops {
            scene.apply(op);
        }
        scene.tree.close_all();
        for m in scene.menus {
            prop_assert!(!scene.tree.is_open(m));
            prop_assert!(scene.tree.items(m).unwrap().is_empty());
            prop_assert_eq!(scene.tree.active_index(m), None);
        }
        prop_assert_eq!(scene.tree.bus().closer_count(), 0);
        prop_assert!(scene.tree.bus().scheduler().is_idle());
    }
}
