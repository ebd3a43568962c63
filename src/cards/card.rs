use super::rank::Rank;
use super::suit::Suit;
use std::fmt::{Display, Formatter, Result};

/// A single playing card. Equality and ordering are structural; cards are
/// plain value objects, created when a deck is built and consumed when
/// dealt into a hole or onto the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
    pub fn rank(&self) -> Rank {
        self.rank
    }
    pub fn suit(&self) -> Suit {
        self.suit
    }
    pub fn to_int(&self) -> u8 {
        (self.rank as u8) * 4 + (self.suit as u8)
    }
}

impl From<(Rank, Suit)> for Card {
    fn from((rank, suit): (Rank, Suit)) -> Self {
        Self { rank, suit }
    }
}

/// u8 isomorphism: 0..52, grouped by rank then suit
impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        c.to_int()
    }
}
impl From<u8> for Card {
    fn from(n: u8) -> Self {
        assert!(n < 52, "card index out of range: {n}");
        Self {
            rank: Rank::from(n / 4),
            suit: Suit::from(n % 4),
        }
    }
}

/// u64 isomorphism: one-hot bit position within a 52-bit hand mask
impl From<Card> for u64 {
    fn from(c: Card) -> u64 {
        1u64 << u8::from(c)
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}
