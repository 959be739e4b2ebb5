// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Auto-updating placement for an open panel.

use kurbo::{Rect, Size};

use crate::anchor::Anchor;
use crate::options::FloatingOptions;
use crate::placement::{Placement, compute_placement};

/// A change that can invalidate the current placement.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LayoutChange {
    /// The anchor element was laid out again. For [`Anchor::Element`] anchors
    /// this also replaces the stored rectangle.
    AnchorResized(Option<Rect>),
    /// Some scroll container moved. Anchor geometry is re-read.
    Scroll,
    /// The viewport changed.
    ViewportResized(Rect),
    /// The panel was measured with a new content size.
    PanelResized(Size),
}

/// Keeps the placement of one floating panel current while it is open.
///
/// The tracker is inert until [`FloatingTracker::start`] is called; while
/// stopped, [`LayoutChange`]s only update the stored geometry and never run a
/// placement pass. Passes that cannot resolve an anchor rectangle or a
/// viewport are skipped and the previous placement is kept; the next tracked
/// change retries.
#[derive(Debug, Default)]
pub struct FloatingTracker {
    anchor: Anchor,
    options: FloatingOptions,
    viewport: Option<Rect>,
    panel: Size,
    tracking: bool,
    last: Option<Placement>,
}

impl FloatingTracker {
    /// Create a stopped tracker.
    pub fn new(anchor: Anchor, options: FloatingOptions) -> Self {
        Self {
            anchor,
            options,
            viewport: None,
            panel: Size::ZERO,
            tracking: false,
            last: None,
        }
    }

    /// Begin tracking and run an initial pass.
    pub fn start(&mut self) -> Option<Placement> {
        self.tracking = true;
        self.update()
    }

    /// Stop tracking and forget the last placement.
    pub fn stop(&mut self) {
        self.tracking = false;
        self.last = None;
    }

    /// Whether layout changes currently trigger placement passes.
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// The anchor this tracker positions against.
    pub fn anchor(&self) -> &Anchor {
        &self.anchor
    }

    /// Replace the anchor and re-run placement if tracking.
    pub fn set_anchor(&mut self, anchor: Anchor) -> Option<Placement> {
        self.anchor = anchor;
        self.update()
    }

    /// The placement options.
    pub fn options(&self) -> &FloatingOptions {
        &self.options
    }

    /// Replace the placement options and re-run placement if tracking.
    pub fn set_options(&mut self, options: FloatingOptions) -> Option<Placement> {
        self.options = options;
        self.update()
    }

    /// Apply a layout change and re-run placement if tracking.
    ///
    /// Returns the new placement when a pass ran and produced one.
    pub fn notify(&mut self, change: LayoutChange) -> Option<Placement> {
        match change {
            LayoutChange::AnchorResized(rect) => {
                self.anchor.set_element_rect(rect);
            }
            LayoutChange::Scroll => {}
            LayoutChange::ViewportResized(viewport) => self.viewport = Some(viewport),
            LayoutChange::PanelResized(size) => self.panel = size,
        }
        self.update()
    }

    /// Run a placement pass now.
    pub fn update(&mut self) -> Option<Placement> {
        if !self.tracking {
            return None;
        }
        let Some(viewport) = self.viewport else {
            tracing::trace!("placement skipped: no viewport");
            return None;
        };
        let Some(anchor) = self.anchor.bounding_rect() else {
            tracing::trace!("placement skipped: anchor has no bounds");
            return None;
        };
        let placement = compute_placement(anchor, self.panel, viewport, &self.options);
        self.last = Some(placement);
        Some(placement)
    }

    /// The most recent successful placement, if tracking.
    pub fn placement(&self) -> Option<&Placement> {
        self.last.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Side;

    fn tracker() -> FloatingTracker {
        let mut t = FloatingTracker::new(
            Anchor::from(Rect::new(10.0, 10.0, 60.0, 30.0)),
            FloatingOptions::default(),
        );
        t.notify(LayoutChange::ViewportResized(Rect::new(0.0, 0.0, 400.0, 300.0)));
        t.notify(LayoutChange::PanelResized(Size::new(120.0, 80.0)));
        t
    }

    #[test]
    fn stopped_tracker_never_places() {
        let mut t = tracker();
        assert!(t.update().is_none());
        assert!(t.placement().is_none());
    }

    #[test]
    fn anchor_resize_repositions_while_tracking() {
        let mut t = tracker();
        let first = t.start().unwrap();
        assert_eq!(first.side, Side::Bottom);

        // Move the anchor to the bottom of the viewport.
        let moved = t
            .notify(LayoutChange::AnchorResized(Some(Rect::new(10.0, 260.0, 60.0, 290.0))))
            .unwrap();
        assert_eq!(moved.side, Side::Top);
        assert_eq!(t.placement(), Some(&moved));
    }

    #[test]
    fn missing_anchor_skips_pass_and_keeps_last() {
        let mut t = tracker();
        let first = t.start().unwrap();
        assert!(t.notify(LayoutChange::AnchorResized(None)).is_none());
        assert_eq!(t.placement(), Some(&first));

        // The next tracked change retries.
        let retried = t.notify(LayoutChange::AnchorResized(Some(Rect::new(
            20.0, 10.0, 70.0, 30.0,
        ))));
        assert_eq!(retried.map(|p| p.x), Some(20.0));
    }

    #[test]
    fn stop_tears_down_placement() {
        let mut t = tracker();
        t.start();
        t.stop();
        assert!(!t.is_tracking());
        assert!(t.placement().is_none());
        assert!(t.notify(LayoutChange::Scroll).is_none());
    }
}
