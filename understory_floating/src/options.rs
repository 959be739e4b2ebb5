// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement options.

use kurbo::Size;

/// Side of the anchor the panel is placed on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Above the anchor.
    Top,
    /// Below the anchor.
    Bottom,
    /// Left of the anchor.
    Left,
    /// Right of the anchor.
    Right,
}

impl Side {
    /// The side on the other end of the same axis.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Whether the main axis of this side is vertical (top/bottom).
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Alignment of the panel along the cross axis of its [`Side`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Align {
    /// Align the panel's leading edge with the anchor's leading edge.
    Start,
    /// Center the panel on the anchor.
    Center,
    /// Align the panel's trailing edge with the anchor's trailing edge.
    End,
}

/// How the host is expected to apply the computed coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Coordinates are relative to the positioned ancestor of the panel.
    #[default]
    Absolute,
    /// Coordinates are relative to the viewport.
    Fixed,
}

/// Panel width policy.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum PanelSizing {
    /// Use the measured panel width, or [`FloatingOptions::default_width`]
    /// when the panel has not been measured yet.
    #[default]
    Intrinsic,
    /// Use exactly this size. A zero height keeps the measured height.
    Fixed(Size),
    /// Match the anchor's current width.
    MatchAnchorWidth,
}

/// Options controlling a placement pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FloatingOptions {
    /// Preferred side.
    pub side: Side,
    /// Preferred cross-axis alignment.
    pub align: Align,
    /// Gap between the anchor and the panel along the main axis.
    pub main_offset: f64,
    /// Extra displacement along the cross axis.
    pub cross_offset: f64,
    /// Minimum distance kept between the panel and the viewport edges.
    pub collision_padding: f64,
    /// Flip to the opposite side on main-axis overflow.
    pub flip: bool,
    /// Slide along the cross axis on cross-axis overflow.
    pub shift: bool,
    /// Width policy.
    pub sizing: PanelSizing,
    /// Width used by [`PanelSizing::Intrinsic`] before the panel is measured.
    pub default_width: f64,
    /// Height limit; taller content scrolls inside the panel.
    pub max_height: Option<f64>,
    /// Positioning strategy reported back to the host.
    pub strategy: Strategy,
}

impl Default for FloatingOptions {
    fn default() -> Self {
        Self {
            side: Side::Bottom,
            align: Align::Start,
            main_offset: 4.0,
            cross_offset: 0.0,
            collision_padding: 8.0,
            flip: true,
            shift: true,
            sizing: PanelSizing::Intrinsic,
            default_width: 200.0,
            max_height: None,
            strategy: Strategy::Absolute,
        }
    }
}

impl FloatingOptions {
    /// Defaults for a nested submenu: opens to the right, top-aligned with
    /// its trigger item, with no gap.
    pub fn submenu() -> Self {
        Self {
            side: Side::Right,
            align: Align::Start,
            main_offset: 0.0,
            ..Self::default()
        }
    }

    /// Set the preferred side and alignment.
    #[must_use]
    pub fn placed(mut self, side: Side, align: Align) -> Self {
        self.side = side;
        self.align = align;
        self
    }

    /// Set the main- and cross-axis offsets.
    #[must_use]
    pub fn offsets(mut self, main: f64, cross: f64) -> Self {
        self.main_offset = main;
        self.cross_offset = cross;
        self
    }

    /// Set the collision padding.
    #[must_use]
    pub fn padding(mut self, padding: f64) -> Self {
        self.collision_padding = padding;
        self
    }

    /// Set the width policy.
    #[must_use]
    pub fn sizing(mut self, sizing: PanelSizing) -> Self {
        self.sizing = sizing;
        self
    }

    /// Set the maximum height.
    #[must_use]
    pub fn max_height(mut self, max_height: f64) -> Self {
        self.max_height = Some(max_height);
        self
    }
}
