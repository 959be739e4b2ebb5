// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Floating: collision-aware placement for anchored floating panels.
//!
//! This crate computes where a floating panel (a menu, submenu, popover, or
//! tooltip) should be drawn relative to an anchor, and keeps that answer
//! current while the panel is open.
//!
//! - [`Anchor`]: what the panel is attached to. A live element rectangle, a
//!   literal point (context menus), or a caller-supplied virtual rectangle.
//!   All three are read through [`Anchor::bounding_rect`].
//! - [`FloatingOptions`]: preferred [`Side`] and [`Align`], main/cross axis
//!   offsets, collision padding, and [`PanelSizing`].
//! - [`compute_placement`]: a pure function from anchor rectangle, panel size,
//!   and viewport to a [`Placement`]. It flips to the opposite side on
//!   main-axis overflow and shifts along the cross axis on cross-axis overflow.
//! - [`FloatingTracker`]: owns an anchor and options, and re-runs placement on
//!   every [`LayoutChange`] while tracking is active.
//!
//! ## Minimal example
//!
//! A trigger at the bottom edge of the viewport cannot fit its menu below, so
//! the panel flips above it:
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use understory_floating::{FloatingOptions, Side, compute_placement};
//!
//! let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
//! let anchor = Rect::new(100.0, 560.0, 180.0, 590.0);
//! let options = FloatingOptions {
//!     side: Side::Bottom,
//!     ..FloatingOptions::default()
//! };
//!
//! let placement = compute_placement(anchor, Size::new(160.0, 200.0), viewport, &options);
//! assert_eq!(placement.side, Side::Top);
//! assert!(placement.rect().y1 <= anchor.y0);
//! ```
//!
//! Geometry is expressed with [`kurbo`] types in a single caller-chosen
//! coordinate space (typically logical pixels relative to the viewport).
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod anchor;
mod options;
mod placement;
mod tracker;

pub use anchor::Anchor;
pub use options::{Align, FloatingOptions, PanelSizing, Side, Strategy};
pub use placement::{Placement, compute_placement};
pub use tracker::{FloatingTracker, LayoutChange};
