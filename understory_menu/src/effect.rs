// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-facing inputs and outputs.
//!
//! The engine never performs side effects itself. Every state change that a
//! host must reflect (moving focus, playing an exit animation, invoking a
//! selection callback) is queued as an [`Effect`] and drained with
//! [`MenuTree::take_effects`](crate::MenuTree::take_effects).

use understory_floating::{Placement, Side};

use crate::id::{ItemKey, MenuId};
use crate::item::ItemRole;

/// Keys the engine interprets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Move to the next item.
    ArrowDown,
    /// Move to the previous item.
    ArrowUp,
    /// Close the current submenu.
    ArrowLeft,
    /// Open the active item's submenu.
    ArrowRight,
    /// Move to the first item.
    Home,
    /// Move to the last item.
    End,
    /// Activate the active item.
    Enter,
    /// Activate the active item.
    Space,
    /// Dismiss.
    Escape,
    /// Tab or Shift+Tab.
    Tab {
        /// Whether Shift was held.
        shift: bool,
    },
    /// A printable character, used for typeahead.
    Character(char),
}

/// Whether the engine consumed a key.
///
/// Hosts should suppress their default handling for [`KeyOutcome::Handled`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The engine acted on the key.
    Handled,
    /// The engine did not act; default handling should proceed.
    Ignored,
}

/// Why an instance's open state changed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Reason {
    /// The trigger was pressed.
    Trigger,
    /// A key on the closed trigger.
    TriggerKey,
    /// Hover-intent timer.
    HoverIntent,
    /// In-menu keyboard navigation (ArrowLeft/ArrowRight, Enter on a
    /// submenu trigger).
    Keyboard,
    /// Escape.
    Escape,
    /// An item was selected.
    Select,
    /// A pointer press outside every open panel.
    Outside,
    /// A bus-driven cascade.
    Cascade,
    /// Direct API call or collaborator request.
    Requested,
    /// The parent instance closed.
    Parent,
    /// A sibling submenu opened.
    Sibling,
    /// The instance was destroyed.
    Destroyed,
}

/// Where the host should move focus.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    /// An item.
    Item(ItemKey),
    /// The element that opens the instance: the root trigger for a root
    /// instance, the submenu trigger item for a submenu.
    Trigger(MenuId),
}

/// A side effect for the host to perform.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// The open state changed or, for a controlled instance, a change is
    /// requested.
    OpenChange {
        /// Instance.
        menu: MenuId,
        /// New or requested state.
        open: bool,
        /// Cause.
        reason: Reason,
    },
    /// Invoke the selection callback of an item.
    Select {
        /// Selected item.
        item: ItemKey,
        /// Its role.
        role: ItemRole,
    },
    /// Move focus.
    Focus(FocusTarget),
    /// Begin teardown of the panel.
    Exit {
        /// Instance.
        menu: MenuId,
        /// Whether to play the exit animation. When `true` the host calls
        /// [`MenuTree::finish_exit`](crate::MenuTree::finish_exit) once done.
        animate: bool,
        /// Side the panel was placed on; exit animations move towards the anchor.
        direction: Side,
    },
    /// Take the panel container out of, or put it back into, the tab order.
    ContainerTabStop {
        /// Instance.
        menu: MenuId,
        /// Whether the container is tabbable.
        tabbable: bool,
    },
    /// The panel has a new placement.
    Positioned {
        /// Instance.
        menu: MenuId,
        /// Result of the placement pass.
        placement: Placement,
    },
}
