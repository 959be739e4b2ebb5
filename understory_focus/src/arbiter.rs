// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-owner arbitration of focus markers.

use core::fmt::Debug;

/// Kinds of markers the arbiter hands out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// The keyboard-active (roving focus) marker.
    Highlight,
    /// The pointer-hover marker.
    Hover,
}

/// Owners removed by a claim or clear.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Evicted<K> {
    /// Previous owner of [`MarkerKind::Highlight`], if it changed hands.
    pub highlight: Option<K>,
    /// Previous owner of [`MarkerKind::Hover`], if it changed hands.
    pub hover: Option<K>,
}

impl<K> Default for Evicted<K> {
    fn default() -> Self {
        Self {
            highlight: None,
            hover: None,
        }
    }
}

/// Owner of the document-wide focus markers.
///
/// Each [`MarkerKind`] has at most one owner. Claiming a marker always clears
/// the current owner first, so there is never an intermediate state with two
/// owners of the same kind.
#[derive(Clone, Debug)]
pub struct FocusArbiter<K> {
    highlight: Option<K>,
    hover: Option<K>,
}

impl<K> Default for FocusArbiter<K> {
    fn default() -> Self {
        Self {
            highlight: None,
            hover: None,
        }
    }
}

impl<K: Copy + Eq + Debug> FocusArbiter<K> {
    /// Create an arbiter with no owners.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, kind: MarkerKind) -> &mut Option<K> {
        match kind {
            MarkerKind::Highlight => &mut self.highlight,
            MarkerKind::Hover => &mut self.hover,
        }
    }

    /// Current owner of `kind`.
    pub fn owner(&self, kind: MarkerKind) -> Option<K> {
        match kind {
            MarkerKind::Highlight => self.highlight,
            MarkerKind::Hover => self.hover,
        }
    }

    /// Whether `key` owns `kind`.
    pub fn holds(&self, kind: MarkerKind, key: K) -> bool {
        self.owner(kind) == Some(key)
    }

    /// Give `kind` to `key`, clearing its previous owner.
    pub fn claim(&mut self, kind: MarkerKind, key: K) -> Evicted<K> {
        let previous = self.slot(kind).replace(key).filter(|&p| p != key);
        if let Some(p) = previous {
            tracing::trace!(?kind, from = ?p, to = ?key, "marker moved");
        }
        let mut evicted = Evicted::default();
        match kind {
            MarkerKind::Highlight => evicted.highlight = previous,
            MarkerKind::Hover => evicted.hover = previous,
        }
        evicted
    }

    /// Clear every marker, then give `kind` to `key`.
    ///
    /// Used when pointer and keyboard interaction are mutually exclusive:
    /// hovering an item drops the keyboard highlight everywhere and vice versa.
    pub fn claim_exclusive(&mut self, kind: MarkerKind, key: K) -> Evicted<K> {
        let mut evicted = self.clear_all();
        self.claim(kind, key);
        match kind {
            MarkerKind::Highlight => evicted.highlight = evicted.highlight.filter(|&p| p != key),
            MarkerKind::Hover => evicted.hover = evicted.hover.filter(|&p| p != key),
        }
        evicted
    }

    /// Release `kind` if `key` currently owns it. Returns whether it did.
    pub fn release(&mut self, kind: MarkerKind, key: K) -> bool {
        let slot = self.slot(kind);
        if *slot == Some(key) {
            *slot = None;
            true
        } else {
            false
        }
    }

    /// Clear `kind` regardless of owner.
    pub fn clear(&mut self, kind: MarkerKind) -> Option<K> {
        self.slot(kind).take()
    }

    /// Clear every marker.
    pub fn clear_all(&mut self) -> Evicted<K> {
        Evicted {
            highlight: self.highlight.take(),
            hover: self.hover.take(),
        }
    }

    /// Clear any marker whose owner matches `pred`.
    pub fn release_matching(&mut self, mut pred: impl FnMut(K) -> bool) -> Evicted<K> {
        Evicted {
            highlight: self.highlight.take_if(|k| pred(*k)),
            hover: self.hover.take_if(|k| pred(*k)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_replaces_previous_owner() {
        let mut a = FocusArbiter::new();
        assert_eq!(a.claim(MarkerKind::Highlight, 1_u32).highlight, None);
        assert_eq!(a.claim(MarkerKind::Highlight, 2).highlight, Some(1));
        assert!(a.holds(MarkerKind::Highlight, 2));
        assert!(!a.holds(MarkerKind::Highlight, 1));
    }

    #[test]
    fn reclaiming_same_owner_evicts_nothing() {
        let mut a = FocusArbiter::new();
        a.claim(MarkerKind::Hover, 4_u32);
        assert_eq!(a.claim(MarkerKind::Hover, 4), Evicted::default());
        assert_eq!(a.claim_exclusive(MarkerKind::Hover, 4), Evicted::default());
    }

    #[test]
    fn kinds_are_independent() {
        let mut a = FocusArbiter::new();
        a.claim(MarkerKind::Highlight, 1_u32);
        a.claim(MarkerKind::Hover, 2);
        assert_eq!(a.owner(MarkerKind::Highlight), Some(1));
        assert_eq!(a.owner(MarkerKind::Hover), Some(2));
    }

    #[test]
    fn exclusive_claim_clears_other_kind() {
        let mut a = FocusArbiter::new();
        a.claim(MarkerKind::Highlight, 1_u32);
        let evicted = a.claim_exclusive(MarkerKind::Hover, 3);
        assert_eq!(evicted.highlight, Some(1));
        assert_eq!(a.owner(MarkerKind::Highlight), None);
        assert_eq!(a.owner(MarkerKind::Hover), Some(3));
    }

    #[test]
    fn release_only_by_owner() {
        let mut a = FocusArbiter::new();
        a.claim(MarkerKind::Hover, 5_u32);
        assert!(!a.release(MarkerKind::Hover, 6));
        assert!(a.release(MarkerKind::Hover, 5));
        assert_eq!(a.owner(MarkerKind::Hover), None);
    }

    #[test]
    fn release_matching_filters_by_predicate() {
        let mut a = FocusArbiter::new();
        a.claim(MarkerKind::Highlight, 10_u32);
        a.claim(MarkerKind::Hover, 21);
        let evicted = a.release_matching(|k| k >= 20);
        assert_eq!(evicted.hover, Some(21));
        assert_eq!(evicted.highlight, None);
        assert_eq!(a.owner(MarkerKind::Highlight), Some(10));
    }
}
