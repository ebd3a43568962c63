use crate::game::GameState;
use crate::player::{ActionType, PlayerAction};
use crate::table::SeatStatus;
use std::fmt::{Display, Formatter};

/// Why an action was rejected. Carried back to the engine, which either
/// logs it and substitutes a fold (default mode) or turns it into an
/// `anyhow::Error` (strict mode) — see `spec.md` §7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    EmptySeat,
    NotActive,
    CannotCheck { owed: u64 },
    NothingToCall,
    BetNotAllowed,
    RaiseNotAllowed,
    MissingAmount,
    InvalidAmount,
    InsufficientStack,
    BelowMinBet { min: u64 },
    RaiseDoesNotIncrease,
    BelowMinRaise { min: u64 },
}

impl Display for ActionError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            ActionError::EmptySeat => write!(f, "seat is not occupied"),
            ActionError::NotActive => write!(f, "player is not active"),
            ActionError::CannotCheck { owed } => write!(f, "cannot check, {owed} owed to call"),
            ActionError::NothingToCall => write!(f, "nothing to call"),
            ActionError::BetNotAllowed => write!(f, "cannot bet, a bet is already live"),
            ActionError::RaiseNotAllowed => write!(f, "cannot raise, no bet to raise"),
            ActionError::MissingAmount => write!(f, "action requires an amount"),
            ActionError::InvalidAmount => write!(f, "amount must be positive and no more than stack"),
            ActionError::InsufficientStack => write!(f, "insufficient stack for amount"),
            ActionError::BelowMinBet { min } => write!(f, "bet below minimum of {min}"),
            ActionError::RaiseDoesNotIncrease => write!(f, "raise does not increase the table bet"),
            ActionError::BelowMinRaise { min } => write!(f, "raise below minimum increment of {min}"),
        }
    }
}
impl std::error::Error for ActionError {}

/// Actions the acting seat may legally submit right now, per `spec.md`
/// §4.3's enumeration.
pub fn valid_actions(game: &GameState, seat_index: usize) -> Vec<ActionType> {
    let Some(seat) = game.table.get(seat_index) else {
        return Vec::new();
    };
    if seat.state.status != SeatStatus::Active {
        return Vec::new();
    }
    let state = &seat.state;
    let mut actions = Vec::with_capacity(5);
    actions.push(ActionType::Fold);
    if state.current_bet == game.current_bet {
        actions.push(ActionType::Check);
    }
    if game.current_bet > state.current_bet && state.stack > 0 {
        actions.push(ActionType::Call);
    }
    if game.current_bet == 0 && state.stack >= game.min_bet && !state.capped {
        actions.push(ActionType::Bet);
    }
    if game.current_bet > 0 && !state.capped && state.stack >= (game.current_bet - state.current_bet) + game.last_raise_size {
        actions.push(ActionType::Raise);
    }
    if state.stack > 0 {
        actions.push(ActionType::AllIn);
    }
    actions
}

/// Applies `action` to `game` on behalf of `seat_index`. On `Err`, no chip
/// totals, stack, or `acted_this_street` flag have been mutated — every
/// branch below validates completely before calling `commit`.
pub fn apply_action(game: &mut GameState, seat_index: usize, action: &PlayerAction) -> Result<(), ActionError> {
    {
        let seat = game.table.get(seat_index).ok_or(ActionError::EmptySeat)?;
        if seat.state.status != SeatStatus::Active {
            return Err(ActionError::NotActive);
        }
    }
    match action.action_type {
        ActionType::Fold => {
            let seat = game.table.get_mut(seat_index).unwrap();
            seat.state.status = SeatStatus::Folded;
            seat.state.acted_this_street = true;
            Ok(())
        }
        ActionType::Check => {
            let current_bet = game.table.get(seat_index).unwrap().state.current_bet;
            if current_bet != game.current_bet {
                return Err(ActionError::CannotCheck { owed: game.current_bet - current_bet });
            }
            game.table.get_mut(seat_index).unwrap().state.acted_this_street = true;
            Ok(())
        }
        ActionType::Call => {
            let (current_bet, stack) = {
                let state = &game.table.get(seat_index).unwrap().state;
                (state.current_bet, state.stack)
            };
            let owed = game.current_bet.saturating_sub(current_bet);
            if owed == 0 || stack == 0 {
                return Err(ActionError::NothingToCall);
            }
            let add = owed.min(stack);
            commit(game, seat_index, add);
            finish_action(game, seat_index);
            Ok(())
        }
        ActionType::Bet => {
            if game.current_bet != 0 {
                return Err(ActionError::BetNotAllowed);
            }
            let amount = action.amount.ok_or(ActionError::MissingAmount)?;
            wager(game, seat_index, amount, false)
        }
        ActionType::Raise => {
            if game.current_bet == 0 {
                return Err(ActionError::RaiseNotAllowed);
            }
            let amount = action.amount.ok_or(ActionError::MissingAmount)?;
            wager(game, seat_index, amount, false)
        }
        ActionType::AllIn => {
            let stack = game.table.get(seat_index).unwrap().state.stack;
            if stack == 0 {
                return Err(ActionError::InsufficientStack);
            }
            wager(game, seat_index, stack, true)
        }
    }
}

/// Shared path for `Bet`, `Raise`, and `AllIn`: all three are "commit
/// `amount` chips and decide whether the table bet and reopen state
/// change," differing only in whether `current_bet` is currently zero.
fn wager(game: &mut GameState, seat_index: usize, amount: u64, is_all_in: bool) -> Result<(), ActionError> {
    let (player_current_bet, stack, capped) = {
        let state = &game.table.get(seat_index).unwrap().state;
        (state.current_bet, state.stack, state.capped)
    };
    if amount == 0 {
        return Err(ActionError::InvalidAmount);
    }
    if amount > stack {
        return Err(ActionError::InsufficientStack);
    }
    let is_shove = is_all_in || amount == stack;

    if game.current_bet == 0 {
        if amount < game.min_bet && !is_shove {
            return Err(ActionError::BelowMinBet { min: game.min_bet });
        }
        commit(game, seat_index, amount);
        game.current_bet = amount;
        game.last_raise_size = amount;
        reopen_others(game, seat_index);
    } else {
        let new_table_bet = player_current_bet + amount;
        if is_all_in && new_table_bet <= game.current_bet {
            // Shoving for less than what's owed is a call, not a raise
            // attempt: it can't reopen betting, so it skips the raise checks
            // entirely and just moves the chips.
            commit(game, seat_index, amount);
            finish_action(game, seat_index);
            return Ok(());
        }
        let raise_size = new_table_bet.saturating_sub(game.current_bet);
        if raise_size == 0 {
            return Err(ActionError::RaiseDoesNotIncrease);
        }
        if capped {
            return Err(ActionError::RaiseNotAllowed);
        }
        if raise_size < game.last_raise_size && !is_shove {
            return Err(ActionError::BelowMinRaise { min: game.last_raise_size });
        }
        commit(game, seat_index, amount);
        game.current_bet = new_table_bet;
        if raise_size >= game.last_raise_size {
            game.last_raise_size = raise_size;
            reopen_others(game, seat_index);
        } else {
            close_raise_rights(game, seat_index, new_table_bet);
        }
    }
    finish_action(game, seat_index);
    Ok(())
}

/// Posts a forced contribution (blind or ante) that bypasses the usual
/// action validation. `counts_as_current_bet` distinguishes blinds, which
/// commit the seat toward the street's table bet, from antes, which don't.
pub(crate) fn post_forced(game: &mut GameState, seat_index: usize, amount: u64, counts_as_current_bet: bool) {
    let seat = game.table.get_mut(seat_index).unwrap();
    let add = amount.min(seat.state.stack);
    seat.state.stack -= add;
    seat.state.total_contributed += add;
    if counts_as_current_bet {
        seat.state.current_bet += add;
    }
    if seat.state.stack == 0 {
        seat.state.status = SeatStatus::AllIn;
    }
    game.pot += add;
}

fn commit(game: &mut GameState, seat_index: usize, amount: u64) {
    let seat = game.table.get_mut(seat_index).unwrap();
    seat.state.stack -= amount;
    seat.state.current_bet += amount;
    seat.state.total_contributed += amount;
    game.pot += amount;
}

/// Marks every other `Active` seat as owing another action. Called whenever
/// an action strictly increases the table bet by at least a full raise
/// increment — never for a short all-in raise, which is the rule that
/// makes non-reopening all-ins work.
fn reopen_others(game: &mut GameState, except: usize) {
    for index in game.table.occupied_indices() {
        if index == except {
            continue;
        }
        if let Some(seat) = game.table.get_mut(index) {
            if seat.state.status == SeatStatus::Active {
                seat.state.acted_this_street = false;
                seat.state.capped = false;
            }
        }
    }
}

/// A non-reopening short all-in still leaves other active seats owing chips
/// to stay in the hand; they must act again, but capped to call-or-fold —
/// the short all-in does not hand them a fresh raise option.
fn close_raise_rights(game: &mut GameState, except: usize, new_table_bet: u64) {
    for index in game.table.occupied_indices() {
        if index == except {
            continue;
        }
        if let Some(seat) = game.table.get_mut(index) {
            if seat.state.status == SeatStatus::Active && seat.state.current_bet < new_table_bet && seat.state.acted_this_street {
                seat.state.acted_this_street = false;
                seat.state.capped = true;
            }
        }
    }
}

fn finish_action(game: &mut GameState, seat_index: usize) {
    let seat = game.table.get_mut(seat_index).unwrap();
    if seat.state.stack == 0 {
        seat.state.status = SeatStatus::AllIn;
    }
    seat.state.acted_this_street = true;
}

/// True once no further action is owed this street: either at most one
/// player remains, every active player is all-in, or every active player
/// has acted and matched the table bet.
pub fn is_betting_round_complete(game: &GameState) -> bool {
    if game.table.players_in_hand() <= 1 {
        return true;
    }
    if game.table.active_count() == 0 {
        return true;
    }
    game.table
        .occupied_indices()
        .into_iter()
        .filter_map(|i| game.table.get(i))
        .filter(|s| s.state.status == SeatStatus::Active)
        .all(|s| s.state.acted_this_street && s.state.current_bet == game.current_bet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{PlayerState, Seat};

    fn three_handed(blinds: (u64, u64)) -> GameState {
        let mut game = GameState::new(3, blinds.0, blinds.1, 0, 1);
        for (id, stack) in [(1, 1000), (2, 1000), (3, 1000)] {
            game.table
                .seat_player(Seat { player_id: id, name: format!("p{id}"), state: PlayerState::new(stack) }, None)
                .unwrap();
        }
        game.table.set_button(0).unwrap();
        game.current_bet = blinds.1;
        game.last_raise_size = blinds.1;
        // post blinds directly for the test fixture
        commit(&mut game, 1, blinds.0);
        commit(&mut game, 2, blinds.1);
        game
    }

    #[test]
    fn minimum_raise_rejection() {
        let mut game = three_handed((10, 20));
        let action = PlayerAction::new(1, ActionType::Raise, Some(10));
        let result = apply_action(&mut game, 0, &action);
        assert_eq!(result, Err(ActionError::RaiseDoesNotIncrease));
        assert_eq!(game.pot, 30, "a rejected raise must not move chips");
    }

    #[test]
    fn short_all_in_does_not_reopen() {
        let mut game = three_handed((10, 20));
        // UTG and SB call to 20
        apply_action(&mut game, 0, &PlayerAction::new(1, ActionType::Call, None)).unwrap();
        apply_action(&mut game, 1, &PlayerAction::new(2, ActionType::Call, None)).unwrap();
        // BB has only 10 behind (already posted 20 of a 30 stack)
        game.table.get_mut(2).unwrap().state.stack = 10;
        apply_action(&mut game, 2, &PlayerAction::new(3, ActionType::AllIn, None)).unwrap();
        assert_eq!(game.current_bet, 30);
        assert_eq!(game.last_raise_size, 20, "short all-in must not update last_raise_size");
        // UTG and SB still owe 10 to stay in, so they're asked to act again,
        // but capped to call-or-fold rather than fully reopened.
        assert!(!game.table.get(0).unwrap().state.acted_this_street, "UTG still owes the shortfall");
        assert!(!game.table.get(1).unwrap().state.acted_this_street, "SB still owes the shortfall");
        assert!(game.table.get(0).unwrap().state.capped, "UTG may only call or fold");
        assert!(game.table.get(1).unwrap().state.capped, "SB may only call or fold");
        assert!(
            !valid_actions(&game, 0).contains(&ActionType::Raise),
            "a capped seat must not be offered Raise"
        );

        // Both call the extra 10 and the round completes.
        apply_action(&mut game, 0, &PlayerAction::new(1, ActionType::Call, None)).unwrap();
        apply_action(&mut game, 1, &PlayerAction::new(2, ActionType::Call, None)).unwrap();
        assert!(is_betting_round_complete(&game));
    }

    #[test]
    fn all_in_short_of_the_call_is_treated_as_a_call() {
        let mut game = three_handed((10, 20));
        apply_action(&mut game, 0, &PlayerAction::new(1, ActionType::Raise, Some(100))).unwrap();
        // SB has posted 10 and has only 40 behind, short of the 100 call.
        game.table.get_mut(1).unwrap().state.stack = 40;
        let result = apply_action(&mut game, 1, &PlayerAction::new(2, ActionType::AllIn, None));
        assert!(result.is_ok(), "a short all-in must be accepted as a call, not rejected: {result:?}");
        assert_eq!(game.current_bet, 100, "a call-equivalent all-in must not change the table bet");
        assert_eq!(game.last_raise_size, 80, "a call-equivalent all-in must not update the raise size");
        assert_eq!(game.table.get(1).unwrap().state.stack, 0);
        assert_eq!(game.table.get(1).unwrap().state.current_bet, 50);
        assert!(game.table.get(0).unwrap().state.acted_this_street, "UTG's raise must not be reopened by a non-raise");
    }

    #[test]
    fn legal_all_in_raise_reopens() {
        let mut game = three_handed((10, 20));
        apply_action(&mut game, 0, &PlayerAction::new(1, ActionType::Call, None)).unwrap();
        apply_action(&mut game, 1, &PlayerAction::new(2, ActionType::Call, None)).unwrap();
        game.table.get_mut(2).unwrap().state.stack = 40;
        apply_action(&mut game, 2, &PlayerAction::new(3, ActionType::AllIn, None)).unwrap();
        assert_eq!(game.current_bet, 40);
        assert_eq!(game.last_raise_size, 20);
        assert!(!game.table.get(0).unwrap().state.acted_this_street, "legal raise must reopen UTG");
        assert!(!game.table.get(1).unwrap().state.acted_this_street, "legal raise must reopen SB");
    }

    #[test]
    fn rejected_action_leaves_state_untouched() {
        let mut game = three_handed((10, 20));
        let snapshot_pot = game.pot;
        let result = apply_action(&mut game, 0, &PlayerAction::new(1, ActionType::Check, None));
        assert!(result.is_err());
        assert_eq!(game.pot, snapshot_pot);
        assert!(!game.table.get(0).unwrap().state.acted_this_street);
    }

    #[test]
    fn fold_reduces_players_in_hand() {
        let mut game = three_handed((10, 20));
        apply_action(&mut game, 0, &PlayerAction::fold(1)).unwrap();
        assert_eq!(game.table.players_in_hand(), 2);
    }

    #[test]
    fn round_complete_once_all_active_match_and_acted() {
        let mut game = three_handed((10, 20));
        assert!(!is_betting_round_complete(&game));
        apply_action(&mut game, 0, &PlayerAction::new(1, ActionType::Call, None)).unwrap();
        apply_action(&mut game, 1, &PlayerAction::new(2, ActionType::Call, None)).unwrap();
        apply_action(&mut game, 2, &PlayerAction::new(3, ActionType::Check, None)).unwrap();
        assert!(is_betting_round_complete(&game));
    }
}
