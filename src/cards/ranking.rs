use super::rank::Rank;

/// A hand's class and the ranks that determine it, ordered `HighCard` (weak)
/// to `StraightFlush` (strong). `StraightFlush(Ace)` is the royal flush;
/// `HandClass::from` below exposes it under its own name for callers that
/// want the full ten-class hierarchy spelled out.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Ranking {
    HighCard(Rank),
    OnePair(Rank),
    TwoPair(Rank, Rank),
    ThreeOAK(Rank),
    Straight(Rank),
    Flush(Rank),
    FullHouse(Rank, Rank),
    FourOAK(Rank),
    StraightFlush(Rank),
}

impl Ranking {
    pub fn n_kickers(&self) -> usize {
        match self {
            Ranking::HighCard(_) => 4,
            Ranking::OnePair(_) => 3,
            Ranking::ThreeOAK(_) => 2,
            Ranking::FourOAK(_) | Ranking::TwoPair(_, _) => 1,
            _ => 0,
        }
    }

    /// ranks already accounted for by the primary value, to be excluded
    /// when picking kickers
    pub fn mask(&self) -> u16 {
        match *self {
            Ranking::TwoPair(hi, lo) => !(rank_bit(hi) | rank_bit(lo)),
            Ranking::HighCard(hi)
            | Ranking::OnePair(hi)
            | Ranking::FourOAK(hi)
            | Ranking::ThreeOAK(hi) => !rank_bit(hi),
            Ranking::FullHouse(..) | Ranking::StraightFlush(..) | Ranking::Straight(..) | Ranking::Flush(..) => {
                unreachable!("kickerless rankings never ask for a mask")
            }
        }
    }
}

pub(super) fn rank_bit(r: Rank) -> u16 {
    1u16 << (r as u8)
}

/// The ten-class hierarchy named literally, for display/reporting purposes.
/// `Ranking` is the data the engine actually compares; `HandClass` is the
/// label a caller of the public API sees.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum HandClass {
    HighCard,
    Pair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    RoyalFlush,
}

impl From<&Ranking> for HandClass {
    fn from(r: &Ranking) -> Self {
        match r {
            Ranking::HighCard(_) => HandClass::HighCard,
            Ranking::OnePair(_) => HandClass::Pair,
            Ranking::TwoPair(..) => HandClass::TwoPair,
            Ranking::ThreeOAK(_) => HandClass::ThreeOfAKind,
            Ranking::Straight(_) => HandClass::Straight,
            Ranking::Flush(_) => HandClass::Flush,
            Ranking::FullHouse(..) => HandClass::FullHouse,
            Ranking::FourOAK(_) => HandClass::FourOfAKind,
            Ranking::StraightFlush(Rank::Ace) => HandClass::RoyalFlush,
            Ranking::StraightFlush(_) => HandClass::StraightFlush,
        }
    }
}

impl std::fmt::Display for Ranking {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Ranking::FullHouse(r1, r2) => write!(f, "FullHouse {}{}", r1, r2),
            Ranking::TwoPair(r1, r2) => write!(f, "TwoPair {}{}", r1, r2),
            Ranking::HighCard(r) => write!(f, "HighCard {}", r),
            Ranking::OnePair(r) => write!(f, "OnePair {}", r),
            Ranking::ThreeOAK(r) => write!(f, "ThreeOfAKind {}", r),
            Ranking::Straight(r) => write!(f, "Straight {}", r),
            Ranking::FourOAK(r) => write!(f, "FourOfAKind {}", r),
            Ranking::Flush(r) => write!(f, "Flush {}", r),
            Ranking::StraightFlush(r) => write!(f, "StraightFlush {}", r),
        }
    }
}
