// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Focus: roving focus primitives for composite widgets.
//!
//! Composite widgets such as menus, listboxes, and toolbars keep exactly one
//! child keyboard-active at a time ("roving focus") instead of making every
//! child a separate tab stop. This crate models the pieces of that pattern
//! that do not depend on any particular widget:
//!
//! - **Navigation intents** ([`Navigation`]) such as [`Navigation::Next`] or
//!   [`Navigation::First`].
//! - A **roving policy** ([`RovingPolicy`]) that picks the next candidate index
//!   from an ordered list of eligible candidates, with optional wraparound.
//! - A **focus arbiter** ([`FocusArbiter`]) that owns the document-wide
//!   "keyboard-active" and "pointer-hover" markers and guarantees that each
//!   [`MarkerKind`] has at most one owner at a time.
//! - A **typeahead buffer** ([`Typeahead`]) that turns printable key presses
//!   into prefix matches against candidate labels.
//!
//! ## Minimal example
//!
//! Cycle through three items where the middle one is disabled:
//!
//! ```rust
//! use understory_focus::{Navigation, RovingPolicy, WrapMode};
//!
//! // Eligible candidate indices, in visual order. Index 1 is disabled.
//! let candidates = [0_usize, 2];
//! let policy = RovingPolicy { wrap: WrapMode::Wrap };
//!
//! let first = policy.next(None, Navigation::Next, &candidates);
//! assert_eq!(first, Some(0));
//! let second = policy.next(first, Navigation::Next, &candidates);
//! assert_eq!(second, Some(2));
//! // Wraps back around.
//! assert_eq!(policy.next(second, Navigation::Next, &candidates), Some(0));
//! ```
//!
//! ## Arbitration
//!
//! Markers are claimed through the arbiter rather than toggled at each call
//! site. A claim always clears the previous owner before installing the new
//! one, and reports what it evicted so callers can update their projections:
//!
//! ```rust
//! use understory_focus::{FocusArbiter, MarkerKind};
//!
//! let mut arbiter = FocusArbiter::new();
//! arbiter.claim(MarkerKind::Hover, 7_u32);
//! let evicted = arbiter.claim_exclusive(MarkerKind::Highlight, 9_u32);
//! assert_eq!(evicted.hover, Some(7));
//! assert_eq!(arbiter.owner(MarkerKind::Highlight), Some(9));
//! assert_eq!(arbiter.owner(MarkerKind::Hover), None);
//! ```
//!
//! The core types are generic over the key type `K`, so callers can use any
//! small, copyable handle.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod arbiter;
mod roving;
mod typeahead;

pub use arbiter::{Evicted, FocusArbiter, MarkerKind};
pub use roving::{Navigation, RovingPolicy, WrapMode};
pub use typeahead::Typeahead;
