// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Menu: a headless interaction engine for dropdowns, submenus, and
//! context menus.
//!
//! ## Overview
//!
//! A [`MenuTree`] holds one top-level menu and any number of nested submenus.
//! It owns the open/close lifecycle of every instance, keyboard roving focus,
//! pointer hover intent for submenu disclosure, and the dismissal cascade that
//! collapses the whole hierarchy on selection, Escape, or an outside press.
//!
//! The engine draws nothing and touches no platform focus. Hosts:
//!
//! 1. forward input (`open`, `key_down`, `pointer_move_item`, ...) with
//!    millisecond timestamps from their own clock,
//! 2. call [`MenuTree::advance`] once per frame,
//! 3. drain [`Effect`]s with [`MenuTree::take_effects`] and apply them
//!    (move focus, invoke selection callbacks, start exit animations),
//! 4. render items from [`MenuTree::item_state`] and panels from
//!    [`MenuTree::placement`].
//!
//! ## Building blocks
//!
//! - [`RootBus`]: closers, hover controllers, timers, and the focus markers
//!   shared by every instance of one tree. A cascade closes deepest instances
//!   first and runs at most once per turn.
//! - [`Scheduler`]: cancelable hover-intent tasks keyed by instance.
//! - [`ItemTable`]: explicit item registration with stable positions;
//!   [`ItemState`] is a pure projection for rendering.
//! - Placement comes from `understory_floating` and stepping, arbitration, and
//!   typeahead from `understory_focus`.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_menu::{Effect, FocusTarget, ItemDescriptor, Key, MenuConfig, MenuTree};
//!
//! let mut tree = MenuTree::new(MenuConfig::default(), Rect::new(10.0, 10.0, 90.0, 30.0));
//! tree.set_viewport(Rect::new(0.0, 0.0, 800.0, 600.0));
//! let root = tree.root();
//!
//! // Open, let items register, then settle the frame.
//! tree.open(root);
//! for label in ["Cut", "Copy", "Paste"] {
//!     tree.register_item(root, ItemDescriptor::new().label(label)).unwrap();
//! }
//! tree.advance(0);
//! assert_eq!(tree.active_index(root), Some(0));
//!
//! tree.key_down(root, Key::ArrowUp, 16);
//! assert_eq!(tree.active_index(root), Some(2));
//!
//! // Escape closes the tree and hands focus back to the trigger.
//! tree.key_down(root, Key::Escape, 32);
//! tree.advance(48);
//! assert!(!tree.is_open(root));
//! assert_eq!(
//!     tree.take_effects().last(),
//!     Some(&Effect::Focus(FocusTarget::Trigger(root)))
//! );
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod bus;
mod config;
mod effect;
mod error;
mod id;
mod instance;
mod item;
mod navigation;
mod pointer;
mod scheduler;
mod submenu;
mod tree;

pub use bus::{CloserHandle, HoverHandle, RootBus};
pub use config::{HoverDelays, MenuConfig, OpenMode};
pub use effect::{Effect, FocusTarget, Key, KeyOutcome, Reason};
pub use error::{CloserError, MenuError};
pub use id::{ItemKey, MenuId};
pub use instance::Phase;
pub use item::{
    ItemDescriptor, ItemEntry, ItemFlags, ItemRole, ItemState, ItemTable, MAX_ITEM_GAP,
};
pub use scheduler::{DueTask, Scheduler, Task, TaskSlot};
pub use tree::MenuTree;

pub use understory_focus::Navigation;
