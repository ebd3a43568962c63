use super::card::Card;
use std::fmt::{Display, Formatter, Result};

/// A seat's two private cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Hole(Card, Card);

impl Hole {
    pub fn new(a: Card, b: Card) -> Self {
        Self(a, b)
    }
    pub fn cards(&self) -> [Card; 2] {
        [self.0, self.1]
    }
}

impl From<Hole> for Vec<Card> {
    fn from(hole: Hole) -> Self {
        vec![hole.0, hole.1]
    }
}

impl Display for Hole {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{}{}", self.0, self.1)
    }
}
