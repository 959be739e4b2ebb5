// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use alloc::string::String;

use crate::id::MenuId;

/// Errors reported to callers that must observe a rejected request.
///
/// Degraded interaction conditions (navigating a closed menu, a missing anchor
/// rectangle, a re-entrant cascade) are not errors; they are silent no-ops.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MenuError {
    /// The identifier is stale or was never issued by this tree.
    #[error("menu {0:?} does not exist")]
    UnknownMenu(MenuId),
    /// Items can only be registered while the instance is open.
    #[error("menu {0:?} is not open")]
    NotOpen(MenuId),
    /// An explicit item position lies too far past the end of the registry.
    #[error("item position {index} is out of range for menu {menu:?}")]
    IndexOutOfRange {
        /// Menu the item was registered in.
        menu: MenuId,
        /// Requested position.
        index: usize,
    },
    /// A submenu trigger item must point at a direct child of its menu.
    #[error("menu {child:?} is not a submenu of {parent:?}")]
    NotASubmenu {
        /// Menu the trigger item was registered in.
        parent: MenuId,
        /// Menu the trigger claims to open.
        child: MenuId,
    },
}

/// Failure reported by an external closer during a cascade.
///
/// The cascade logs it and continues with the remaining closers.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("closer failed: {message}")]
pub struct CloserError {
    message: String,
}

impl CloserError {
    /// Create an error with a human-readable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message given at construction.
    pub fn message(&self) -> &str {
        &self.message
    }
}
