use super::evaluator::Evaluator;
use super::hand::Hand;
use super::kicks::Kickers;
use super::rank::Rank;
use super::ranking::{HandClass, Ranking};

/// A hand's strength: always constructed from a `Hand`, an unordered set of
/// cards. `Ord` on `(Ranking, Kickers)` already gives a total order that
/// respects the Hold'em hand hierarchy (class first, then kickers), so
/// `score(H1) > score(H2) iff H1 beats H2` holds directly from derived `Ord`
/// — `score()` below just projects that same order onto a single integer
/// with disjoint, class-monotone ranges, per the "avoid float fragility"
/// design note.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Strength {
    ranking: Ranking,
    kickers: Kickers,
}

impl Strength {
    pub fn class(&self) -> HandClass {
        HandClass::from(&self.ranking)
    }
    pub fn ranking(&self) -> Ranking {
        self.ranking
    }

    /// Base-15 integer encoding: one digit for the hand class, five digits
    /// for the ordered significant ranks (primary rank(s) of the class
    /// followed by kickers, unused digits zero). Disjoint per class and
    /// monotone within a class, matching §9's "10-digit base-15" note
    /// (we only ever need 5 rank digits, not 10, since a 5-card Hold'em
    /// hand has at most 5 significant ranks).
    pub fn score(&self) -> u64 {
        const BASE: u64 = 15;
        let class = class_index(&self.ranking) as u64;
        let mut digits = [0u64; 5];
        let primaries = primary_ranks(&self.ranking);
        for (i, r) in primaries.iter().enumerate() {
            digits[i] = (*r as u64) + 1;
        }
        let mut slot = primaries.len();
        for r in descending_ranks(u16::from(self.kickers)) {
            if slot >= digits.len() {
                break;
            }
            digits[slot] = (r as u64) + 1;
            slot += 1;
        }
        digits
            .iter()
            .fold(class, |acc, &d| acc * BASE + d)
    }
}

fn class_index(r: &Ranking) -> u8 {
    match r {
        Ranking::HighCard(_) => 0,
        Ranking::OnePair(_) => 1,
        Ranking::TwoPair(..) => 2,
        Ranking::ThreeOAK(_) => 3,
        Ranking::Straight(_) => 4,
        Ranking::Flush(_) => 5,
        Ranking::FullHouse(..) => 6,
        Ranking::FourOAK(_) => 7,
        Ranking::StraightFlush(_) => 8,
    }
}

fn primary_ranks(r: &Ranking) -> Vec<Rank> {
    match *r {
        Ranking::HighCard(a)
        | Ranking::OnePair(a)
        | Ranking::ThreeOAK(a)
        | Ranking::Straight(a)
        | Ranking::Flush(a)
        | Ranking::FourOAK(a)
        | Ranking::StraightFlush(a) => vec![a],
        Ranking::TwoPair(a, b) | Ranking::FullHouse(a, b) => vec![a, b],
    }
}

fn descending_ranks(mask: u16) -> impl Iterator<Item = Rank> {
    (0..13).rev().filter_map(move |i| {
        if mask & (1 << i) != 0 {
            Some(Rank::from(i as u8))
        } else {
            None
        }
    })
}

impl From<Hand> for Strength {
    fn from(hand: Hand) -> Self {
        Self::from(Evaluator::from(hand))
    }
}
impl From<Evaluator> for Strength {
    fn from(e: Evaluator) -> Self {
        let ranking = e.find_ranking();
        let kickers = e.find_kickers(ranking);
        Self { ranking, kickers }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:<16}{}", self.ranking, self.kickers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card::Card;
    use crate::cards::suit::Suit;

    fn strength(cards: Vec<(Rank, Suit)>) -> Strength {
        let hand = Hand::from(cards.into_iter().map(Card::from).collect::<Vec<_>>());
        Strength::from(hand)
    }

    #[test]
    fn score_is_class_monotone() {
        let high = strength(vec![
            (Rank::Ace, Suit::Spade),
            (Rank::King, Suit::Heart),
            (Rank::Queen, Suit::Diamond),
            (Rank::Jack, Suit::Club),
            (Rank::Nine, Suit::Spade),
        ]);
        let pair = strength(vec![
            (Rank::Two, Suit::Spade),
            (Rank::Two, Suit::Heart),
            (Rank::Three, Suit::Diamond),
            (Rank::Four, Suit::Club),
            (Rank::Five, Suit::Spade),
        ]);
        assert!(pair.score() > high.score());
        assert!(pair > high);
    }

    #[test]
    fn score_breaks_ties_within_class() {
        let ace_high = strength(vec![
            (Rank::Ace, Suit::Spade),
            (Rank::King, Suit::Heart),
            (Rank::Queen, Suit::Diamond),
            (Rank::Jack, Suit::Club),
            (Rank::Nine, Suit::Spade),
        ]);
        let king_high = strength(vec![
            (Rank::King, Suit::Spade),
            (Rank::Queen, Suit::Heart),
            (Rank::Jack, Suit::Diamond),
            (Rank::Ten, Suit::Club),
            (Rank::Eight, Suit::Spade),
        ]);
        assert!(ace_high.score() > king_high.score());
    }
}
