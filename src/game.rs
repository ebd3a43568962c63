use crate::cards::{Board, Deck, Street};
use crate::table::Table;
use std::fmt::{Display, Formatter};

/// Coarse lifecycle stage, distinct from `Street`: `Street` only exists
/// once a hand is underway, while `Stage` also covers table setup and
/// teardown around hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Stage {
    WaitingForPlayers,
    Ready,
    Started,
    Dealing,
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
    HandComplete,
    GameOver,
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl From<Street> for Stage {
    fn from(street: Street) -> Self {
        match street {
            Street::Preflop => Stage::PreFlop,
            Street::Flop => Stage::Flop,
            Street::Turn => Stage::Turn,
            Street::River => Stage::River,
            Street::Showdown => Stage::Showdown,
        }
    }
}

/// The full mutable state of a game in progress: seating, chips, cards, and
/// where in the hand lifecycle play currently is. `Deck` is intentionally
/// excluded from serialization — its remaining order is an implementation
/// detail, not game state an observer should see or restore.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct GameState {
    pub table: Table,
    #[serde(skip)]
    pub deck: Deck,
    pub board: Board,
    pub pot: u64,
    pub current_bet: u64,
    pub min_bet: u64,
    pub last_raise_size: u64,
    pub small_blind: u64,
    pub big_blind: u64,
    pub ante: u64,
    pub hand_number: u64,
    pub current_player_index: Option<usize>,
    pub street: Street,
    pub stage: Stage,
}

impl GameState {
    pub fn new(capacity: usize, small_blind: u64, big_blind: u64, ante: u64, seed: u64) -> Self {
        Self {
            table: Table::new(capacity),
            deck: Deck::new(seed),
            board: Board::empty(),
            pot: 0,
            current_bet: 0,
            min_bet: big_blind,
            last_raise_size: big_blind,
            small_blind,
            big_blind,
            ante,
            hand_number: 0,
            current_player_index: None,
            street: Street::Preflop,
            stage: Stage::WaitingForPlayers,
        }
    }

    pub fn reset_for_street(&mut self, street: Street) {
        self.street = street;
        self.stage = Stage::from(street);
        self.current_bet = 0;
        self.last_raise_size = 0;
        self.table.reset_for_street();
    }
}
