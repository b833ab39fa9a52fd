use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};

/// Ordered sequence of cards consumed from the end.
///
/// The deck is never replenished within a hand. Shuffling takes the random
/// source as a parameter so callers decide between a seeded or an entropy
/// backed generator.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    /// Full 52-card deck in canonical (unshuffled) order.
    pub fn new() -> Self {
        Self { cards: full_deck() }
    }

    /// Full deck shuffled with the given random source.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::new();
        deck.shuffle(rng);
        deck
    }

    pub fn new_with_seed(seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    /// Deck whose first draws are exactly `top`, in order, followed by the
    /// remaining cards of a canonical deck. Used to pin deals in scenarios.
    pub fn stacked(top: &[Card]) -> Self {
        let mut cards: Vec<Card> = full_deck()
            .into_iter()
            .filter(|c| !top.contains(c))
            .collect();
        cards.extend(top.iter().rev().copied());
        Self { cards }
    }

    /// Uniform Fisher–Yates permutation of the cards still in the deck.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn burn_card(&mut self) {
        let _ = self.deal_card();
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}
