// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchors: the things a floating panel is attached to.

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Point, Rect, Size};

/// The reference a floating panel is positioned against.
///
/// Every variant is read through [`Anchor::bounding_rect`], so placement code
/// never needs to know which kind of anchor it is dealing with.
pub enum Anchor {
    /// A live element. The host keeps the rectangle current; `None` means the
    /// element is not laid out (for example, it is detached or not yet measured).
    Element(Option<Rect>),
    /// A literal point, treated as a zero-sized rectangle.
    ///
    /// Typical for context menus opened at the pointer position.
    Point(Point),
    /// A caller-supplied provider queried on every placement pass.
    Virtual(Box<dyn Fn() -> Option<Rect>>),
}

impl Anchor {
    /// Create a virtual anchor from a rectangle provider.
    pub fn virtual_rect(provider: impl Fn() -> Option<Rect> + 'static) -> Self {
        Self::Virtual(Box::new(provider))
    }

    /// Current bounding rectangle of the anchor, if it has one.
    pub fn bounding_rect(&self) -> Option<Rect> {
        match self {
            Self::Element(rect) => *rect,
            Self::Point(point) => Some(Rect::from_origin_size(*point, Size::ZERO)),
            Self::Virtual(provider) => provider(),
        }
    }

    /// Update the rectangle of an [`Anchor::Element`].
    ///
    /// Returns `false` (and changes nothing) for point and virtual anchors,
    /// whose geometry is not owned by the host's layout.
    pub fn set_element_rect(&mut self, rect: Option<Rect>) -> bool {
        match self {
            Self::Element(current) => {
                *current = rect;
                true
            }
            Self::Point(_) | Self::Virtual(_) => false,
        }
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Self::Element(None)
    }
}

impl From<Rect> for Anchor {
    fn from(rect: Rect) -> Self {
        Self::Element(Some(rect))
    }
}

impl From<Point> for Anchor {
    fn from(point: Point) -> Self {
        Self::Point(point)
    }
}

impl fmt::Debug for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(rect) => f.debug_tuple("Element").field(rect).finish(),
            Self::Point(point) => f.debug_tuple("Point").field(point).finish(),
            Self::Virtual(_) => f.debug_tuple("Virtual").finish_non_exhaustive(),
        }
    }
}
