// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end scenarios through the public API, one per observable guarantee.

use kurbo::{Rect, Size};
use understory_floating::Side;
use understory_menu::{
    Effect, FocusTarget, ItemDescriptor, ItemKey, Key, MenuConfig, MenuId, MenuTree, Phase,
};

fn menu_bar() -> (MenuTree, MenuId) {
    let mut tree = MenuTree::new(MenuConfig::default(), Rect::new(10.0, 0.0, 70.0, 24.0));
    tree.set_viewport(Rect::new(0.0, 0.0, 800.0, 600.0));
    let root = tree.root();
    (tree, root)
}

fn exit_order(effects: &[Effect]) -> Vec<MenuId> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Exit { menu, .. } => Some(*menu),
            _ => None,
        })
        .collect()
}

#[test]
fn reopening_starts_from_a_clean_slate() {
    let (mut tree, root) = menu_bar();
    tree.open(root);
    for _ in 0..3 {
        tree.register_item(root, ItemDescriptor::new()).unwrap();
    }
    tree.advance(0);
    tree.key_down(root, Key::End, 10);
    assert_eq!(tree.active_index(root), Some(2));

    tree.close(root);
    assert!(tree.items(root).unwrap().is_empty());
    assert_eq!(tree.active_index(root), None);

    tree.open(root);
    assert_eq!(tree.phase(root), Phase::Opening);
    assert!(tree.items(root).unwrap().is_empty());
    assert_eq!(tree.active_index(root), None);
    assert!(!tree.is_keyboard_mode(root));
}

#[test]
fn cascade_closes_descendants_first_and_only_once() {
    let (mut tree, root) = menu_bar();
    let sub = tree.create_submenu(root, MenuConfig::submenu()).unwrap();
    let leaf = tree.create_submenu(sub, MenuConfig::submenu()).unwrap();
    tree.open(root);
    tree.register_item(root, ItemDescriptor::submenu(sub)).unwrap();
    tree.advance(0);
    tree.key_down(root, Key::ArrowRight, 1);
    tree.register_item(sub, ItemDescriptor::submenu(leaf)).unwrap();
    tree.advance(2);
    tree.key_down(sub, Key::ArrowRight, 3);
    tree.advance(4);
    assert!(tree.is_open(leaf));
    tree.take_effects();

    tree.close_all();
    assert_eq!(exit_order(&tree.take_effects()), vec![leaf, sub, root]);
    tree.close_all();
    assert!(tree.take_effects().is_empty());
}

#[test]
fn hovering_sibling_trigger_leaves_only_it_open() {
    let (mut tree, root) = menu_bar();
    let a = tree.create_submenu(root, MenuConfig::submenu()).unwrap();
    let b = tree.create_submenu(root, MenuConfig::submenu()).unwrap();
    tree.open(root);
    tree.register_item(root, ItemDescriptor::submenu(a)).unwrap();
    tree.register_item(root, ItemDescriptor::submenu(b)).unwrap();
    tree.advance(0);

    tree.pointer_move_item(ItemKey::new(root, 0), 100);
    tree.pointer_leave_item(ItemKey::new(root, 0), 140);
    tree.pointer_move_item(ItemKey::new(root, 1), 140);
    let mut now = 140;
    while let Some(due) = tree.next_deadline() {
        now = due;
        tree.advance(now);
    }
    tree.advance(now + 16);
    assert!(!tree.is_open(a));
    assert!(tree.is_open(b));
    assert!(tree.item_state(ItemKey::new(root, 1)).expanded);
    assert!(!tree.item_state(ItemKey::new(root, 0)).expanded);
}

#[test]
fn panel_flips_above_anchor_at_viewport_bottom() {
    let mut tree = MenuTree::new(MenuConfig::default(), Rect::new(100.0, 560.0, 180.0, 590.0));
    tree.set_viewport(Rect::new(0.0, 0.0, 800.0, 600.0));
    let root = tree.root();
    tree.set_panel_size(root, Size::new(160.0, 200.0));
    tree.open(root);
    assert_eq!(tree.placement(root).map(|p| p.side), Some(Side::Top));
    let positioned = tree
        .take_effects()
        .into_iter()
        .find_map(|e| match e {
            Effect::Positioned { placement, .. } => Some(placement.side),
            _ => None,
        });
    assert_eq!(positioned, Some(Side::Top));
}

#[test]
fn navigation_skips_disabled_middle_item() {
    let mut tree = MenuTree::new(MenuConfig::default().all_items_tabbable(true), Rect::ZERO);
    let root = tree.root();
    tree.open(root);
    tree.register_item(root, ItemDescriptor::new()).unwrap();
    tree.register_item(root, ItemDescriptor::new().disabled(true)).unwrap();
    tree.register_item(root, ItemDescriptor::new()).unwrap();
    tree.advance(0);
    let visited: Vec<_> = (0..3)
        .map(|_| {
            tree.key_down(root, Key::ArrowDown, 0);
            tree.active_index(root)
        })
        .collect();
    assert_eq!(visited, vec![Some(0), Some(2), Some(0)]);
}

#[test]
fn escape_returns_focus_to_trigger() {
    let (mut tree, root) = menu_bar();
    let sub = tree.create_submenu(root, MenuConfig::submenu()).unwrap();
    tree.open(root);
    tree.register_item(root, ItemDescriptor::submenu(sub)).unwrap();
    tree.advance(0);
    tree.key_down(root, Key::ArrowRight, 1);
    tree.register_item(sub, ItemDescriptor::new()).unwrap();
    tree.advance(2);
    tree.take_effects();

    tree.key_down(sub, Key::Escape, 3);
    tree.advance(4);
    let effects = tree.take_effects();
    assert_eq!(exit_order(&effects), vec![sub, root]);
    assert_eq!(
        effects.last(),
        Some(&Effect::Focus(FocusTarget::Trigger(root)))
    );
    assert_eq!(tree.phase(root), Phase::Closed);
}
