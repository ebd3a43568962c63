use crate::cards::{Card, Hole, Street};
use std::fmt::{Display, Formatter};

/// The kind of action a player may submit. Closed so the engine's match
/// arms over it stay exhaustive as the game evolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ActionType {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    AllIn,
}

impl Display for ActionType {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ActionType::Fold => "fold",
                ActionType::Check => "check",
                ActionType::Call => "call",
                ActionType::Bet => "bet",
                ActionType::Raise => "raise",
                ActionType::AllIn => "all-in",
            }
        )
    }
}

/// A decision returned by a player. `amount` is the raise-by increment for
/// `Raise`, the total wager for `Bet`, and ignored otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlayerAction {
    pub player_id: u64,
    pub action_type: ActionType,
    pub amount: Option<u64>,
}

impl PlayerAction {
    pub fn new(player_id: u64, action_type: ActionType, amount: Option<u64>) -> Self {
        Self { player_id, action_type, amount }
    }
    pub fn fold(player_id: u64) -> Self {
        Self::new(player_id, ActionType::Fold, None)
    }
}

/// The view of the table an acting player is given: enough to decide, and
/// nothing about other players' hole cards. Owned data only, no references
/// into engine state, so a player implementation can stash it freely.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Observation {
    pub seat_index: usize,
    pub player_id: u64,
    pub hole: Option<Hole>,
    pub board: Vec<Card>,
    pub street: Street,
    pub pot: u64,
    pub current_bet: u64,
    pub stack: u64,
    pub call_amount: u64,
    pub min_bet_amount: u64,
    pub min_raise_increment: u64,
    pub valid_actions: Vec<ActionType>,
}

/// The pluggable behavior a seated player implements. This is the one seam
/// in the engine where dynamic dispatch is idiomatic: the set of strategies
/// an embedder plugs in is open-ended, unlike `Action`/`Event`.
pub trait Player {
    fn decide_action(&mut self, observation: &Observation) -> PlayerAction;

    /// Optional notification hook; the default no-op lets simple players
    /// ignore every event they don't care about.
    fn on_event(&mut self, _event: &crate::events::Event) {}
}
