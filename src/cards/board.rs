use super::card::Card;
use super::street::Street;

/// The shared community cards, revealed incrementally as the hand
/// progresses through streets.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Board(Vec<Card>);

impl Board {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn cards(&self) -> &[Card] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends cards dealt for the next street.
    pub fn extend(&mut self, cards: Vec<Card>) {
        self.0.extend(cards);
    }

    /// Whether the board is fully consistent with a street, i.e. has exactly
    /// as many cards as that street's `board_size`.
    pub fn matches(&self, street: Street) -> bool {
        self.0.len() == street.board_size()
    }
}
