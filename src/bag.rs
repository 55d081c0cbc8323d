// Copyright (C) 2020-2026 Andy Kurnia.

use super::alphabet::{Alphabet, Letter};
use rand::prelude::*;

// Draws come off the end.
pub struct Bag(pub Vec<Letter>);

impl Bag {
    // Unshuffled: every letter repeated by its count, in tile order.
    pub fn new(alphabet: &Alphabet) -> Bag {
        let mut bag = Vec::with_capacity(alphabet.num_tiles());
        for tile in alphabet.tiles() {
            for _ in 0..tile.freq {
                bag.push(tile.letter);
            }
        }
        Bag(bag)
    }

    pub fn shuffle(&mut self, mut rng: &mut dyn RngCore) {
        self.0.shuffle(&mut rng);
    }

    #[inline(always)]
    pub fn pop(&mut self) -> Option<Letter> {
        self.0.pop()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    // Up to n letters, fewer when the bag runs out.
    pub fn draw(&mut self, n: usize) -> Vec<Letter> {
        let keep = self.0.len().saturating_sub(n);
        let mut drawn = self.0.split_off(keep);
        drawn.reverse();
        drawn
    }

    pub fn replenish(&mut self, rack: &mut Vec<Letter>, rack_size: usize) {
        let drawn = self.draw(rack_size.saturating_sub(rack.len()));
        rack.extend(drawn);
    }
}

impl Clone for Bag {
    #[inline(always)]
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }

    #[inline(always)]
    fn clone_from(&mut self, source: &Self) {
        self.0.clone_from(&source.0);
    }
}
