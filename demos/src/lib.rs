// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared scaffolding for the Understory demos.
//!
//! [`Host`] plays the part of a UI toolkit: it owns a [`MenuTree`], drives it
//! with a fake frame clock, and "performs" effects by printing them. Exit
//! animations finish instantly.

use understory_menu::{Effect, MenuTree};

/// Frame length of the fake clock, in milliseconds.
pub const FRAME: u64 = 16;

/// A scripted host around one menu tree.
#[derive(Debug)]
pub struct Host {
    /// The engine.
    pub tree: MenuTree,
    /// Current time in milliseconds.
    pub now: u64,
}

impl Host {
    /// Wrap `tree` with the clock at zero.
    pub fn new(tree: MenuTree) -> Self {
        Self { tree, now: 0 }
    }

    /// Advance the clock by `ms`, one frame at a time, applying effects.
    pub fn run_for(&mut self, ms: u64) {
        let end = self.now + ms;
        while self.now < end {
            self.now += FRAME;
            self.tree.advance(self.now);
            self.flush();
        }
    }

    /// Print a heading and apply pending effects.
    pub fn step(&mut self, label: &str) {
        println!("{label}");
        self.flush();
    }

    /// Apply pending effects.
    pub fn flush(&mut self) {
        for effect in self.tree.take_effects() {
            match effect {
                Effect::Positioned { menu, placement } => println!(
                    "  [{:>4}ms] {menu:?} placed on {:?} at {:?}",
                    self.now,
                    placement.side,
                    placement.rect()
                ),
                Effect::Exit {
                    menu,
                    animate: true,
                    direction,
                } => {
                    println!("  [{:>4}ms] {menu:?} animates out towards {direction:?}", self.now);
                    self.tree.finish_exit(menu);
                }
                other => println!("  [{:>4}ms] {other:?}", self.now),
            }
        }
    }
}
