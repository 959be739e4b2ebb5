// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typeahead: jump to candidates by typing the start of their label.

use alloc::string::String;

/// Accumulates printable key presses into a search prefix.
///
/// The buffer resets after `timeout` milliseconds without input. Timestamps
/// are caller-provided so tests can drive it with a fake clock.
#[derive(Clone, Debug)]
pub struct Typeahead {
    buffer: String,
    last_input: Option<u64>,
    /// Idle time in milliseconds after which the buffer starts over.
    pub timeout: u64,
}

impl Default for Typeahead {
    fn default() -> Self {
        Self::new(500)
    }
}

impl Typeahead {
    /// Create an empty buffer with the given idle timeout.
    pub fn new(timeout: u64) -> Self {
        Self {
            buffer: String::new(),
            last_input: None,
            timeout,
        }
    }

    /// Append `ch` at time `now`, starting over if the buffer went idle.
    pub fn push(&mut self, ch: char, now: u64) -> &str {
        let idle = self
            .last_input
            .is_none_or(|last| now.saturating_sub(last) > self.timeout);
        if idle {
            self.buffer.clear();
        }
        self.buffer.push(ch);
        self.last_input = Some(now);
        &self.buffer
    }

    /// The current prefix.
    pub fn prefix(&self) -> &str {
        &self.buffer
    }

    /// Forget the current prefix.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.last_input = None;
    }

    /// Find the candidate whose label starts with the current prefix.
    ///
    /// `candidates` pairs each eligible index with its label, in visual order.
    /// A single-character prefix searches from the candidate after `origin`,
    /// so repeating the same letter cycles through matches. Longer prefixes
    /// search from `origin` itself, so typing more of the current match keeps
    /// it. Matching ignores case.
    pub fn find(&self, origin: Option<usize>, candidates: &[(usize, &str)]) -> Option<usize> {
        if self.buffer.is_empty() || candidates.is_empty() {
            return None;
        }
        let repeat_single = self.buffer.chars().nth(1).is_none();
        let start = origin
            .and_then(|o| candidates.iter().position(|&(i, _)| i == o))
            .map_or(0, |pos| if repeat_single { pos + 1 } else { pos });
        let n = candidates.len();
        (0..n)
            .map(|step| candidates[(start + step) % n])
            .find(|&(_, label)| starts_with_ignore_case(label, &self.buffer))
            .map(|(index, _)| index)
    }
}

fn starts_with_ignore_case(label: &str, prefix: &str) -> bool {
    let mut label = label.chars().flat_map(char::to_lowercase);
    prefix
        .chars()
        .flat_map(char::to_lowercase)
        .all(|p| label.next() == Some(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEMS: [(usize, &str); 4] = [(0, "Copy"), (1, "Cut"), (3, "Paste"), (4, "cursor")];

    #[test]
    fn single_letter_cycles_matches() {
        let mut t = Typeahead::new(500);
        t.push('c', 0);
        assert_eq!(t.find(None, &ITEMS), Some(0));
        assert_eq!(t.find(Some(0), &ITEMS), Some(1));
        assert_eq!(t.find(Some(1), &ITEMS), Some(4));
        assert_eq!(t.find(Some(4), &ITEMS), Some(0));
    }

    #[test]
    fn longer_prefix_keeps_current_match() {
        let mut t = Typeahead::new(500);
        t.push('c', 0);
        t.push('u', 100);
        assert_eq!(t.prefix(), "cu");
        assert_eq!(t.find(Some(1), &ITEMS), Some(1));
        t.push('r', 200);
        assert_eq!(t.find(Some(1), &ITEMS), Some(4));
    }

    #[test]
    fn idle_timeout_restarts_buffer() {
        let mut t = Typeahead::new(500);
        t.push('c', 0);
        assert_eq!(t.push('p', 700), "p");
        assert_eq!(t.find(None, &ITEMS), Some(3));
    }

    #[test]
    fn no_match_yields_none() {
        let mut t = Typeahead::default();
        t.push('z', 0);
        assert_eq!(t.find(None, &ITEMS), None);
        t.reset();
        assert_eq!(t.find(None, &ITEMS), None);
    }
}
