// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear roving-focus stepping over an ordered candidate list.

/// A roving-focus navigation intent.
///
/// These values represent high-level intents; hosts map concrete keys to them
/// (for example ArrowDown to [`Navigation::Next`] and Home to [`Navigation::First`]).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// Move to the following candidate.
    Next,
    /// Move to the preceding candidate.
    Prev,
    /// Jump to the first candidate.
    First,
    /// Jump to the last candidate.
    Last,
}

/// What happens when stepping past either end of the candidate list.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// Stop at the edges; stepping past them yields no candidate.
    Never,
    /// Wrap around to the other end.
    #[default]
    Wrap,
}

/// Chooses the next roving-focus target.
///
/// Candidates are the indices that are currently eligible (enabled and
/// visible), in visual order. Callers filter before calling so that every
/// widget shares one stepping routine regardless of where the key event
/// originated.
#[derive(Copy, Clone, Debug, Default)]
pub struct RovingPolicy {
    /// Wrap behavior at the ends of the list.
    pub wrap: WrapMode,
}

impl RovingPolicy {
    /// Compute the next target index.
    ///
    /// - With no origin, [`Navigation::Next`] selects the first candidate and
    ///   [`Navigation::Prev`] the last.
    /// - With an origin that is itself a candidate, steps by one position,
    ///   wrapping according to [`RovingPolicy::wrap`].
    /// - With an origin that is not a candidate (for example an item that was
    ///   just disabled or hidden), steps to the nearest candidate past it in the
    ///   requested direction.
    ///
    /// Returns `None` when there are no candidates.
    pub fn next(&self, origin: Option<usize>, nav: Navigation, candidates: &[usize]) -> Option<usize> {
        let (&first, &last) = (candidates.first()?, candidates.last()?);
        let wrap = matches!(self.wrap, WrapMode::Wrap);
        match nav {
            Navigation::First => Some(first),
            Navigation::Last => Some(last),
            Navigation::Next => {
                let Some(origin) = origin else {
                    return Some(first);
                };
                match candidates.iter().position(|&c| c == origin) {
                    Some(pos) if pos + 1 < candidates.len() => Some(candidates[pos + 1]),
                    Some(_) => wrap.then_some(first),
                    None => candidates
                        .iter()
                        .copied()
                        .find(|&c| c > origin)
                        .or_else(|| wrap.then_some(first)),
                }
            }
            Navigation::Prev => {
                let Some(origin) = origin else {
                    return Some(last);
                };
                match candidates.iter().position(|&c| c == origin) {
                    Some(pos) if pos > 0 => Some(candidates[pos - 1]),
                    Some(_) => wrap.then_some(last),
                    None => candidates
                        .iter()
                        .rev()
                        .copied()
                        .find(|&c| c < origin)
                        .or_else(|| wrap.then_some(last)),
                }
            }
        }
    }
}
