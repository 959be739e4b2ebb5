// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The coordination point shared by every instance of one menu tree.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use understory_focus::{FocusArbiter, MarkerKind};

use crate::error::CloserError;
use crate::id::{ItemKey, MenuId};
use crate::scheduler::{Scheduler, Task, TaskSlot};

/// Handle returned by [`RootBus::register_closer`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CloserHandle(u64);

/// Handle returned when registering a hover controller.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HoverHandle(u64);

type ExternalCloser = Box<dyn FnOnce() -> Result<(), CloserError>>;

enum CloserEntry {
    Instance(MenuId),
    External(ExternalCloser),
}

impl fmt::Debug for CloserEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance(id) => f.debug_tuple("Instance").field(id).finish(),
            Self::External(_) => f.write_str("External(..)"),
        }
    }
}

/// Closers, hover controllers, timers, and focus markers of one menu tree.
///
/// Nested submenus share their root's bus. A cascade ([`RootBus::begin_cascade`])
/// takes every registered closer at once, so each closer runs at most once per
/// registration, and sets a guard that rejects further cascades until the
/// next turn begins.
#[derive(Debug, Default)]
pub struct RootBus {
    closers: Vec<(CloserHandle, CloserEntry)>,
    hover: Vec<(HoverHandle, MenuId)>,
    next_handle: u64,
    cascading: bool,
    pub(crate) scheduler: Scheduler,
    pub(crate) arbiter: FocusArbiter<ItemKey>,
}

impl RootBus {
    fn handle(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }

    /// Register an external closer that runs during the next cascade.
    ///
    /// A closer that returns `Err` is logged and skipped; the cascade carries
    /// on with the remaining closers.
    pub fn register_closer(
        &mut self,
        closer: impl FnOnce() -> Result<(), CloserError> + 'static,
    ) -> CloserHandle {
        let handle = CloserHandle(self.handle());
        self.closers.push((handle, CloserEntry::External(Box::new(closer))));
        handle
    }

    pub(crate) fn register_instance(&mut self, menu: MenuId) -> CloserHandle {
        let handle = CloserHandle(self.handle());
        self.closers.push((handle, CloserEntry::Instance(menu)));
        handle
    }

    /// Remove a closer. Returns whether it was still registered.
    pub fn unregister_closer(&mut self, handle: CloserHandle) -> bool {
        let before = self.closers.len();
        self.closers.retain(|(h, _)| *h != handle);
        self.closers.len() != before
    }

    /// Number of registered closers.
    pub fn closer_count(&self) -> usize {
        self.closers.len()
    }

    pub(crate) fn register_hover_controller(&mut self, menu: MenuId) -> HoverHandle {
        let handle = HoverHandle(self.handle());
        self.hover.push((handle, menu));
        handle
    }

    pub(crate) fn unregister_hover_controller(&mut self, handle: HoverHandle) -> bool {
        let before = self.hover.len();
        self.hover.retain(|(h, _)| *h != handle);
        self.hover.len() != before
    }

    /// Clear the pointer-hover marker and cancel every pending hover-intent
    /// open of a registered hover controller.
    ///
    /// Returns the item that held the marker.
    pub fn clear_all_hover(&mut self) -> Option<ItemKey> {
        for &(_, menu) in &self.hover {
            if self.scheduler.pending(menu, TaskSlot::HoverIntent) == Some(Task::Open) {
                self.scheduler.cancel(menu, TaskSlot::HoverIntent);
            }
        }
        self.arbiter.clear(MarkerKind::Hover)
    }

    /// Whether a cascade ran during the current turn.
    pub fn is_cascading(&self) -> bool {
        self.cascading
    }

    /// The focus markers.
    pub fn arbiter(&self) -> &FocusArbiter<ItemKey> {
        &self.arbiter
    }

    /// The timer table.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Start a cascade, or return `None` if one already ran this turn.
    pub(crate) fn begin_cascade(&mut self) -> Option<Cascade> {
        if self.cascading {
            tracing::debug!("cascade ignored: already cascading");
            return None;
        }
        self.cascading = true;
        tracing::debug!(closers = self.closers.len(), "cascade");
        Some(Cascade {
            entries: core::mem::take(&mut self.closers),
        })
    }

    /// Mark a turn boundary: the cascade guard drops.
    pub(crate) fn begin_turn(&mut self) {
        self.cascading = false;
    }
}

/// Closers taken by a cascade, drained in reverse registration order.
///
/// External closers run as they are reached; instance closers are yielded so
/// the tree can close them.
pub(crate) struct Cascade {
    entries: Vec<(CloserHandle, CloserEntry)>,
}

impl fmt::Debug for Cascade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cascade")
            .field("remaining", &self.entries.len())
            .finish()
    }
}

impl Iterator for Cascade {
    type Item = MenuId;

    fn next(&mut self) -> Option<MenuId> {
        while let Some((handle, entry)) = self.entries.pop() {
            match entry {
                CloserEntry::Instance(menu) => return Some(menu),
                CloserEntry::External(closer) => {
                    if let Err(err) = closer() {
                        tracing::warn!(?handle, %err, "closer failed during cascade");
                    }
                }
            }
        }
        None
    }
}
