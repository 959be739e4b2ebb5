// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The placement pass: offset, flip, shift, and size.

use kurbo::{Point, Rect, Size};

use crate::options::{Align, FloatingOptions, PanelSizing, Side, Strategy};

/// Result of a placement pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Left edge of the panel.
    pub x: f64,
    /// Top edge of the panel.
    pub y: f64,
    /// Resolved panel width.
    pub width: f64,
    /// Resolved panel height, after the optional max-height clamp.
    pub height: f64,
    /// Side actually used after collision handling.
    pub side: Side,
    /// Cross-axis alignment that was applied.
    pub align: Align,
    /// Strategy the coordinates are expressed in.
    pub strategy: Strategy,
    /// Whether content exceeds the resolved height and must scroll internally.
    pub scrollable: bool,
    /// Origin for enter/exit animations, relative to the panel's top-left
    /// corner. It lies on the panel edge nearest the anchor.
    pub transform_origin: Point,
}

impl Placement {
    /// The panel rectangle.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// Compute the placement of a panel of size `panel` next to `anchor`.
///
/// Steps, in order:
/// 1. Resolve the panel size from [`FloatingOptions::sizing`] and clamp the
///    height to [`FloatingOptions::max_height`].
/// 2. If the panel overflows the padded viewport along the main axis and
///    flipping is enabled, use the opposite side when it fits. When neither
///    side fits, use whichever offers more room.
/// 3. Place the panel on the resolved side, apply the main-axis gap, the
///    alignment, and the cross-axis offset.
/// 4. If shifting is enabled, slide the panel along the cross axis to keep it
///    inside the padded viewport. The side never changes during this step.
pub fn compute_placement(
    anchor: Rect,
    panel: Size,
    viewport: Rect,
    options: &FloatingOptions,
) -> Placement {
    let (size, scrollable) = resolve_size(anchor, panel, options);
    let bounds = padded(viewport, options.collision_padding);

    let mut side = options.side;
    if options.flip && !fits_main(side, anchor, size, bounds, options.main_offset) {
        let flipped = side.opposite();
        if fits_main(flipped, anchor, size, bounds, options.main_offset)
            || main_space(flipped, anchor, bounds) > main_space(side, anchor, bounds)
        {
            side = flipped;
        }
    }

    let mut origin = place(side, options.align, anchor, size, options);
    if options.shift {
        if side.is_vertical() {
            origin.x = clamp_lo(origin.x, bounds.x0, bounds.x1 - size.width);
        } else {
            origin.y = clamp_lo(origin.y, bounds.y0, bounds.y1 - size.height);
        }
    }

    let center = anchor.center();
    let transform_origin = match side {
        Side::Bottom => Point::new(clamp_lo(center.x - origin.x, 0.0, size.width), 0.0),
        Side::Top => Point::new(
            clamp_lo(center.x - origin.x, 0.0, size.width),
            size.height,
        ),
        Side::Right => Point::new(0.0, clamp_lo(center.y - origin.y, 0.0, size.height)),
        Side::Left => Point::new(
            size.width,
            clamp_lo(center.y - origin.y, 0.0, size.height),
        ),
    };

    Placement {
        x: origin.x,
        y: origin.y,
        width: size.width,
        height: size.height,
        side,
        align: options.align,
        strategy: options.strategy,
        scrollable,
        transform_origin,
    }
}

fn resolve_size(anchor: Rect, panel: Size, options: &FloatingOptions) -> (Size, bool) {
    let width = match options.sizing {
        PanelSizing::Fixed(size) => size.width,
        PanelSizing::MatchAnchorWidth => anchor.width(),
        PanelSizing::Intrinsic if panel.width > 0.0 => panel.width,
        PanelSizing::Intrinsic => options.default_width,
    };
    let height = match options.sizing {
        PanelSizing::Fixed(size) if size.height > 0.0 => size.height,
        _ => panel.height,
    };
    match options.max_height {
        Some(max) if height > max => (Size::new(width, max), true),
        _ => (Size::new(width, height), false),
    }
}

/// Shrink the viewport by the collision padding, collapsing to its center
/// when the padding exceeds half its extent.
fn padded(viewport: Rect, padding: f64) -> Rect {
    let center = viewport.center();
    let (x0, x1) = if viewport.width() > 2.0 * padding {
        (viewport.x0 + padding, viewport.x1 - padding)
    } else {
        (center.x, center.x)
    };
    let (y0, y1) = if viewport.height() > 2.0 * padding {
        (viewport.y0 + padding, viewport.y1 - padding)
    } else {
        (center.y, center.y)
    };
    Rect::new(x0, y0, x1, y1)
}

/// Room between the anchor and the padded viewport edge on `side`.
fn main_space(side: Side, anchor: Rect, bounds: Rect) -> f64 {
    match side {
        Side::Top => anchor.y0 - bounds.y0,
        Side::Bottom => bounds.y1 - anchor.y1,
        Side::Left => anchor.x0 - bounds.x0,
        Side::Right => bounds.x1 - anchor.x1,
    }
}

fn fits_main(side: Side, anchor: Rect, size: Size, bounds: Rect, gap: f64) -> bool {
    let needed = if side.is_vertical() {
        size.height
    } else {
        size.width
    };
    needed + gap <= main_space(side, anchor, bounds)
}

fn place(side: Side, align: Align, anchor: Rect, size: Size, options: &FloatingOptions) -> Point {
    let gap = options.main_offset;
    if side.is_vertical() {
        let x = cross_start(align, anchor.x0, anchor.x1, size.width) + options.cross_offset;
        let y = match side {
            Side::Top => anchor.y0 - gap - size.height,
            _ => anchor.y1 + gap,
        };
        Point::new(x, y)
    } else {
        let y = cross_start(align, anchor.y0, anchor.y1, size.height) + options.cross_offset;
        let x = match side {
            Side::Left => anchor.x0 - gap - size.width,
            _ => anchor.x1 + gap,
        };
        Point::new(x, y)
    }
}

fn cross_start(align: Align, start: f64, end: f64, extent: f64) -> f64 {
    match align {
        Align::Start => start,
        Align::Center => (start + end) * 0.5 - extent * 0.5,
        Align::End => end - extent,
    }
}

/// Clamp `v` into `[lo, hi]`, preferring `lo` when the range is empty.
fn clamp_lo(v: f64, lo: f64, hi: f64) -> f64 {
    v.min(hi).max(lo)
}
