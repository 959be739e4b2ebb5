// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-instance configuration.

use understory_floating::FloatingOptions;

/// How pointer interaction opens an instance.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum OpenMode {
    /// Opened by pressing its trigger.
    #[default]
    Click,
    /// Opened by hovering its trigger, after the hover-intent delay.
    Hover,
}

/// Hover-intent delays in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HoverDelays {
    /// Delay between entering a trigger and opening its submenu.
    pub open: u64,
    /// Delay between leaving a trigger or submenu and closing it.
    pub close: u64,
    /// Delay of the shared timer that closes sibling submenus when the pointer
    /// moves on to another trigger or item.
    pub submenu_close: u64,
}

impl Default for HoverDelays {
    fn default() -> Self {
        Self {
            open: 90,
            close: 60,
            submenu_close: 35,
        }
    }
}

/// Configuration fixed when an instance is created.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuConfig {
    /// Pointer open mode.
    pub mode: OpenMode,
    /// Whether selecting an item closes the whole tree.
    pub close_on_select: bool,
    /// Whether every item is a tab stop.
    ///
    /// When `false` (roving focus), opening seeds the first item as
    /// keyboard-active and Tab is contained. When `true`, opening leaves no
    /// item active and Tab follows the native order.
    pub all_items_tabbable: bool,
    /// Whether items manage their own focus on hover.
    ///
    /// When `false`, hovering an item also moves focus to it.
    pub delegate_item_focus: bool,
    /// Whether a direct close (trigger, Escape, select) plays the exit animation.
    pub animate_exit: bool,
    /// Whether a close driven by a cascade or a closing parent plays the exit animation.
    pub animate_cascade_exit: bool,
    /// `Some(open)` makes the open state externally controlled, starting at `open`.
    pub controlled: Option<bool>,
    /// Placement of the panel.
    pub floating: FloatingOptions,
    /// Hover-intent delays.
    pub hover: HoverDelays,
    /// Idle time in milliseconds after which typeahead starts a new prefix.
    pub typeahead_timeout: u64,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            mode: OpenMode::Click,
            close_on_select: true,
            all_items_tabbable: false,
            delegate_item_focus: false,
            animate_exit: true,
            animate_cascade_exit: false,
            controlled: None,
            floating: FloatingOptions::default(),
            hover: HoverDelays::default(),
            typeahead_timeout: 500,
        }
    }
}

impl MenuConfig {
    /// Defaults for a nested submenu: hover-opened and placed to the right
    /// of its trigger item.
    pub fn submenu() -> Self {
        Self {
            mode: OpenMode::Hover,
            floating: FloatingOptions::submenu(),
            ..Self::default()
        }
    }

    /// Set the pointer open mode.
    #[must_use]
    pub fn mode(mut self, mode: OpenMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set whether selection closes the tree.
    #[must_use]
    pub fn close_on_select(mut self, close: bool) -> Self {
        self.close_on_select = close;
        self
    }

    /// Set whether every item is a tab stop.
    #[must_use]
    pub fn all_items_tabbable(mut self, tabbable: bool) -> Self {
        self.all_items_tabbable = tabbable;
        self
    }

    /// Make the open state externally controlled.
    #[must_use]
    pub fn controlled(mut self, open: bool) -> Self {
        self.controlled = Some(open);
        self
    }

    /// Set the placement options.
    #[must_use]
    pub fn floating(mut self, floating: FloatingOptions) -> Self {
        self.floating = floating;
        self
    }
}
