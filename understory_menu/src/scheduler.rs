// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cancelable scheduled tasks keyed by instance, driven by a host clock.
//!
//! The scheduler never reads a clock. Callers pass `now` in milliseconds and
//! collect due tasks with [`Scheduler::take_due`].

use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::id::MenuId;

/// Slot a task occupies for its owning instance.
///
/// Each owner holds at most one task per slot; scheduling into an occupied
/// slot replaces the previous task.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TaskSlot {
    /// Debounced hover-intent open or close of the owning instance.
    HoverIntent,
    /// The shared timer that closes the owner's open submenus.
    CloseSubmenus,
}

/// Work to perform when a task becomes due.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Task {
    /// Open the owning instance.
    Open,
    /// Close the owning instance.
    Close,
    /// Close every open submenu of the owning instance except `keep`.
    CloseSubmenus {
        /// Submenu the pointer moved towards; left open.
        keep: Option<MenuId>,
    },
}

#[derive(Copy, Clone, Debug)]
struct Pending {
    task: Task,
    due: u64,
    seq: u64,
}

/// A task that has become due.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DueTask {
    /// Owning instance.
    pub owner: MenuId,
    /// Slot the task was scheduled in.
    pub slot: TaskSlot,
    /// The work.
    pub task: Task,
}

/// Timer table shared by every instance of one menu tree.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    pending: HashMap<(MenuId, TaskSlot), Pending>,
    seq: u64,
}

impl Scheduler {
    /// Schedule `task` for `owner` at `now + delay`, replacing whatever
    /// occupied the slot.
    pub fn schedule(&mut self, owner: MenuId, slot: TaskSlot, task: Task, now: u64, delay: u64) {
        self.seq += 1;
        let due = now.saturating_add(delay);
        tracing::trace!(?owner, ?slot, ?task, due, "task scheduled");
        self.pending.insert(
            (owner, slot),
            Pending {
                task,
                due,
                seq: self.seq,
            },
        );
    }

    /// Cancel the task in `slot` for `owner`. Returns it if one was pending.
    pub fn cancel(&mut self, owner: MenuId, slot: TaskSlot) -> Option<Task> {
        let removed = self.pending.remove(&(owner, slot)).map(|p| p.task);
        if removed.is_some() {
            tracing::trace!(?owner, ?slot, "task canceled");
        }
        removed
    }

    /// Cancel every task owned by `owner`.
    pub fn cancel_owner(&mut self, owner: MenuId) {
        self.pending.retain(|(o, _), _| *o != owner);
    }

    /// The task pending in `slot` for `owner`.
    pub fn pending(&self, owner: MenuId, slot: TaskSlot) -> Option<Task> {
        self.pending.get(&(owner, slot)).map(|p| p.task)
    }

    /// Whether any task is pending.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest due time of any pending task.
    pub fn next_due(&self) -> Option<u64> {
        self.pending.values().map(|p| p.due).min()
    }

    /// Remove and return every task due at `now`, ordered by due time and then
    /// by scheduling order.
    pub fn take_due(&mut self, now: u64) -> Vec<DueTask> {
        let mut due: Vec<(u64, u64, DueTask)> = Vec::new();
        self.pending.retain(|&(owner, slot), p| {
            if p.due <= now {
                due.push((
                    p.due,
                    p.seq,
                    DueTask {
                        owner,
                        slot,
                        task: p.task,
                    },
                ));
                false
            } else {
                true
            }
        });
        due.sort_unstable_by_key(|&(d, s, _)| (d, s));
        due.into_iter().map(|(_, _, t)| t).collect()
    }
}
