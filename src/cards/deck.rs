use super::card::Card;
use super::rank::Rank;
use super::suit::Suit;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// A shuffled stack of cards. Built deterministically from a seed so a hand
/// can be replayed bit-for-bit; dealing removes cards from the stack and
/// errors rather than silently truncating when the stack runs dry.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Default for Deck {
    /// An unshuffled deck. Only meaningful as a serde placeholder; a real
    /// hand always constructs a deck with `Deck::new(seed)`.
    fn default() -> Self {
        Self { cards: Self::full() }
    }
}

impl Deck {
    /// A fresh 52-card deck shuffled with the given RNG seed. Same seed,
    /// same shuffle, every time.
    pub fn new(seed: u64) -> Self {
        let mut cards = Self::full();
        let mut rng = SmallRng::seed_from_u64(seed);
        cards.shuffle(&mut rng);
        Self { cards }
    }

    /// An unshuffled 52-card deck, ascending by rank then suit.
    pub fn full() -> Vec<Card> {
        let mut cards = Vec::with_capacity(52);
        for rank in Rank::ALL {
            for suit in Suit::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        cards
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Deals `n` cards off the top of the deck. `n` must be positive and no
    /// greater than what remains; both violations are caller bugs, not
    /// events to warn about and ignore.
    pub fn deal(&mut self, n: usize) -> anyhow::Result<Vec<Card>> {
        anyhow::ensure!(n > 0, "cannot deal zero cards");
        anyhow::ensure!(
            n <= self.cards.len(),
            "cannot deal {n} cards, only {} remain",
            self.cards.len()
        );
        Ok(self.cards.split_off(self.cards.len() - n))
    }

    /// Removes specific cards from the deck, e.g. to keep a hand's known
    /// hole cards from being dealt again to another seat or the board.
    pub fn remove(&mut self, cards: &[Card]) {
        self.cards.retain(|c| !cards.contains(c));
    }

    /// Cards that have neither been dealt nor explicitly removed.
    pub fn missing(dealt: &[Card]) -> Vec<Card> {
        Self::full().into_iter().filter(|c| !dealt.contains(c)).collect()
    }
}
