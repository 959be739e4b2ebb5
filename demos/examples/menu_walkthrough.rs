// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A menu bar "Edit" menu with a hover-opened "Transform" submenu, driven by
//! a scripted sequence of input events on a fake clock.
//!
//! Every step prints the effects a host would apply. Set `RUST_LOG=debug` (or
//! `trace`) to also see the engine's own transitions and timer activity.
//!
//! Run:
//! - `cargo run -p understory_demos --example menu_walkthrough`

use kurbo::{Point, Rect, Size};
use understory_demos::{FRAME, Host};
use understory_floating::LayoutChange;
use understory_menu::{
    ItemDescriptor, ItemKey, ItemRole, Key, MenuConfig, MenuError, MenuId, MenuTree,
};

fn register_edit_items(tree: &mut MenuTree, edit: MenuId, transform: MenuId) -> Result<(), MenuError> {
    tree.register_item(edit, ItemDescriptor::new().label("Undo"))?;
    tree.register_item(edit, ItemDescriptor::new().label("Redo").disabled(true))?;
    tree.register_item(edit, ItemDescriptor::submenu(transform).label("Transform"))?;
    tree.register_item(
        edit,
        ItemDescriptor::new()
            .label("Word wrap")
            .role(ItemRole::Checkbox),
    )?;
    Ok(())
}

fn main() -> Result<(), MenuError> {
    if let Ok(env_filter) = tracing_subscriber::EnvFilter::try_from_default_env() {
        tracing_subscriber::fmt()
            .compact()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("info")
            .compact()
            .init();
    }

    // The "Edit" button sits in a menu bar at the top of an 800x600 window.
    let trigger = Rect::new(60.0, 0.0, 120.0, 24.0);
    let mut tree = MenuTree::new(MenuConfig::default(), trigger);
    tree.set_viewport(Rect::new(0.0, 0.0, 800.0, 600.0));
    let edit = tree.root();
    let transform = tree.create_submenu(edit, MenuConfig::submenu())?;
    tree.set_panel_size(edit, Size::new(180.0, 120.0));
    tree.set_panel_size(transform, Size::new(160.0, 60.0));
    let mut host = Host::new(tree);

    host.tree.trigger_key_down(edit, Key::ArrowDown, host.now);
    register_edit_items(&mut host.tree, edit, transform)?;
    host.step("Open Edit from the keyboard:");
    host.run_for(FRAME);

    host.tree.key_down(edit, Key::ArrowDown, host.now);
    host.step("ArrowDown skips the disabled Redo:");

    // The submenu anchors to its trigger item, which the host lays out.
    host.tree.notify_layout(
        transform,
        LayoutChange::AnchorResized(Some(Rect::new(60.0, 52.0, 240.0, 76.0))),
    );
    host.tree.key_down(edit, Key::ArrowRight, host.now);
    host.tree.register_item(transform, ItemDescriptor::new().label("Upper case"))?;
    host.tree.register_item(transform, ItemDescriptor::new().label("Lower case"))?;
    host.step("ArrowRight opens Transform:");
    host.run_for(FRAME);

    host.tree.key_down(transform, Key::ArrowLeft, host.now);
    host.step("ArrowLeft returns to the Transform item:");
    host.run_for(FRAME);

    host.tree.pointer_move_item(ItemKey::new(edit, 2), host.now);
    host.step("Pointer rests on Transform:");
    host.run_for(120);
    host.tree.register_item(transform, ItemDescriptor::new().label("Upper case"))?;
    host.run_for(FRAME);

    host.tree.pointer_leave_item(ItemKey::new(edit, 2), host.now);
    host.tree.pointer_enter_content(transform, host.now);
    host.tree.pointer_move_item(ItemKey::new(transform, 0), host.now);
    host.step("Pointer crosses into the submenu:");
    host.run_for(100);

    host.tree.press_item(ItemKey::new(transform, 0));
    host.step("Click Upper case:");
    host.run_for(FRAME);

    println!(
        "Edit open: {}, Transform open: {}",
        host.tree.is_open(edit),
        host.tree.is_open(transform)
    );

    host.tree.open(edit);
    host.run_for(FRAME);
    host.tree.pointer_down(Point::new(700.0, 500.0));
    host.step("Reopen, then click outside:");
    host.run_for(FRAME);
    tracing::info!(now = host.now, "walkthrough finished");
    Ok(())
}
