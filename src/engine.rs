use crate::betting;
use crate::cards::{Hole, Street};
use crate::config::GameConfig;
use crate::events::{Dispatcher, Event, EventKind, SubscriptionToken};
use crate::game::{GameState, Stage};
use crate::player::{Observation, Player, PlayerAction};
use crate::showdown::Showdown;
use crate::table::{PlayerState, Seat, SeatStatus};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Internal transition tags, queued by the dispatcher and drained by
/// `step`/`run`. Never observable to subscribers or players — only the
/// `Event`s each handler emits are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    StartGame,
    StartHand,
    DealHoleCards,
    PostBlinds,
    PlayerAction,
    BettingRoundCompleted,
    DealFlop,
    DealTurn,
    DealRiver,
    Showdown,
    HandEnded,
    GameEnded,
}

/// Drives a table of players through hands. Owns the transition queue and
/// the behavioral trait objects; `GameState` itself stays plain data so it
/// can be read, cloned, and serialized independently of player behavior.
pub struct Engine {
    config: GameConfig,
    state: GameState,
    players: Vec<Option<Box<dyn Player>>>,
    dispatcher: Dispatcher,
    queue: VecDeque<Transition>,
    next_player_id: u64,
}

impl Engine {
    pub fn new(config: GameConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let capacity = config.max_players;
        let state = GameState::new(capacity, config.small_blind, config.big_blind, config.ante, config.seed);
        Ok(Self {
            config,
            state,
            players: (0..capacity).map(|_| None).collect(),
            dispatcher: Dispatcher::new(),
            queue: VecDeque::new(),
            next_player_id: 1,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn subscribe(&mut self, kind: EventKind, handler: Box<dyn FnMut(&Event)>) -> SubscriptionToken {
        self.dispatcher.subscribe(kind, handler)
    }
    pub fn unsubscribe(&mut self, token: SubscriptionToken) {
        self.dispatcher.unsubscribe(token)
    }

    pub fn add_player(&mut self, name: impl Into<String>, stack: u64, behavior: Box<dyn Player>, seat: Option<usize>) -> anyhow::Result<u64> {
        anyhow::ensure!(
            matches!(self.state.stage, Stage::WaitingForPlayers | Stage::Ready),
            "cannot add a player once a game is underway"
        );
        let id = self.next_player_id;
        let seat_record = Seat { player_id: id, name: name.into(), state: PlayerState::new(stack) };
        let index = self.state.table.seat_player(seat_record, seat)?;
        self.next_player_id += 1;
        self.players[index] = Some(behavior);
        self.state.stage = if self.state.table.occupied_count() >= self.config.min_players {
            Stage::Ready
        } else {
            Stage::WaitingForPlayers
        };
        self.emit(Event::new(EventKind::PlayerJoined, self.state.hand_number, self.state.street, self.state.pot, self.state.current_bet).with_player(id));
        Ok(id)
    }

    pub fn remove_player(&mut self, seat_index: usize) -> anyhow::Result<()> {
        anyhow::ensure!(
            matches!(self.state.stage, Stage::WaitingForPlayers | Stage::Ready),
            "cannot remove a player mid-hand"
        );
        let seat = self.state.table.remove_player(seat_index)?;
        self.players[seat_index] = None;
        self.emit(Event::new(EventKind::PlayerLeft, self.state.hand_number, self.state.street, self.state.pot, self.state.current_bet).with_player(seat.player_id));
        Ok(())
    }

    pub fn has_events(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Runs the game to completion (`GameStage::GameOver`).
    pub fn start(&mut self) -> anyhow::Result<()> {
        if self.queue.is_empty() && self.state.stage != Stage::GameOver {
            self.queue.push_back(Transition::StartGame);
        }
        self.run()
    }

    /// Processes one transition tag. Returns `false` if the queue was
    /// already empty.
    pub fn step(&mut self) -> anyhow::Result<bool> {
        let Some(transition) = self.queue.pop_front() else {
            return Ok(false);
        };
        match transition {
            Transition::StartGame => self.handle_start_game()?,
            Transition::StartHand => self.handle_start_hand()?,
            Transition::DealHoleCards => self.handle_deal_hole_cards()?,
            Transition::PostBlinds => self.handle_post_blinds()?,
            Transition::PlayerAction => self.handle_player_action()?,
            Transition::BettingRoundCompleted => self.handle_round_completed()?,
            Transition::DealFlop => self.deal_street(Street::Flop, 3, EventKind::DealFlop)?,
            Transition::DealTurn => self.deal_street(Street::Turn, 1, EventKind::DealTurn)?,
            Transition::DealRiver => self.deal_street(Street::River, 1, EventKind::DealRiver)?,
            Transition::Showdown => self.handle_showdown()?,
            Transition::HandEnded => self.handle_hand_ended()?,
            Transition::GameEnded => self.handle_game_ended()?,
        }
        Ok(true)
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        while self.step()? {}
        Ok(())
    }

    fn emit(&mut self, event: Event) {
        self.dispatcher.dispatch(&event);
        for player in self.players.iter_mut().flatten() {
            let hook = AssertUnwindSafe(|| player.on_event(&event));
            if catch_unwind(hook).is_err() {
                log::error!("player on_event hook panicked while handling {:?}", event.kind);
            }
        }
    }

    fn event(&self, kind: EventKind) -> Event {
        Event::new(kind, self.state.hand_number, self.state.street, self.state.pot, self.state.current_bet)
    }

    // --- transition handlers -------------------------------------------------

    fn handle_start_game(&mut self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.state.table.occupied_count() >= self.config.min_players,
            "not enough seated players to start: have {}, need {}",
            self.state.table.occupied_count(),
            self.config.min_players
        );
        self.state.stage = Stage::Started;
        let event = self.event(EventKind::GameStarted);
        self.emit(event);
        self.queue.push_back(Transition::StartHand);
        Ok(())
    }

    fn handle_start_hand(&mut self) -> anyhow::Result<()> {
        self.state.hand_number += 1;
        self.state.stage = Stage::Dealing;
        self.state.pot = 0;
        self.state.board = crate::cards::Board::empty();
        self.state.deck = crate::cards::Deck::new(self.config.seed.wrapping_add(self.state.hand_number));
        if self.state.table.button().is_none() {
            let button = match self.config.first_button {
                Some(seat) => seat,
                None => self.choose_button(),
            };
            self.state.table.set_button(button)?;
        }
        let event = self.event(EventKind::HandStarted);
        self.emit(event);
        self.queue.push_back(Transition::DealHoleCards);
        Ok(())
    }

    fn choose_button(&self) -> usize {
        let occupied = self.state.table.occupied_indices();
        let mut rng = SmallRng::seed_from_u64(self.config.seed);
        occupied[rng.random_range(0..occupied.len())]
    }

    fn handle_deal_hole_cards(&mut self) -> anyhow::Result<()> {
        for seat in self.state.table.occupied_indices() {
            self.state.table.get_mut(seat).unwrap().state.reset_for_hand(None);
        }
        for seat in self.state.table.occupied_indices() {
            let cards = self.state.deck.deal(2)?;
            self.state.table.get_mut(seat).unwrap().state.hole = Some(Hole::new(cards[0], cards[1]));
        }
        self.state.street = Street::Preflop;
        self.state.stage = Stage::PreFlop;
        let event = self.event(EventKind::DealHoleCards);
        self.emit(event);
        if self.config.ante > 0 {
            for seat in self.state.table.occupied_indices() {
                betting::post_forced(&mut self.state, seat, self.config.ante, false);
            }
        }
        self.queue.push_back(Transition::PostBlinds);
        Ok(())
    }

    fn handle_post_blinds(&mut self) -> anyhow::Result<()> {
        let button = self.state.table.button().ok_or_else(|| anyhow::anyhow!("button not set"))?;
        let heads_up = self.state.table.occupied_count() == 2;
        let small_blind_seat = if heads_up {
            button
        } else {
            self.state.table.next_occupied(button, false).ok_or_else(|| anyhow::anyhow!("no seat for small blind"))?
        };
        let big_blind_seat = self
            .state
            .table
            .next_occupied(small_blind_seat, false)
            .ok_or_else(|| anyhow::anyhow!("no seat for big blind"))?;
        let first_actor = if heads_up {
            small_blind_seat
        } else {
            self.state
                .table
                .next_occupied(big_blind_seat, false)
                .ok_or_else(|| anyhow::anyhow!("no seat to act first"))?
        };

        let small_blind = self.state.small_blind;
        let big_blind = self.state.big_blind;
        betting::post_forced(&mut self.state, small_blind_seat, small_blind, true);
        betting::post_forced(&mut self.state, big_blind_seat, big_blind, true);
        self.state.current_bet = self.state.big_blind;
        self.state.last_raise_size = self.state.big_blind;

        let event = self.event(EventKind::PostBlinds);
        self.emit(event);
        let candidate = self.seek_actor_at_or_after(first_actor);
        self.enqueue_actor_or_complete(candidate);
        Ok(())
    }

    fn handle_player_action(&mut self) -> anyhow::Result<()> {
        let seat_index = self
            .state
            .current_player_index
            .expect("PlayerAction transition queued without a current player");
        let observation = self.build_observation(seat_index);
        let player_id = self.state.table.get(seat_index).unwrap().player_id;
        let mut action = self
            .players
            .get_mut(seat_index)
            .and_then(|p| p.as_mut())
            .expect("PlayerAction transition queued for an unoccupied seat")
            .decide_action(&observation);

        if let Err(err) = betting::apply_action(&mut self.state, seat_index, &action) {
            if self.config.strict {
                anyhow::bail!("player {player_id} submitted an invalid {:?}: {err}", action.action_type);
            }
            log::warn!("player {player_id} submitted an invalid {:?} ({err}); substituting fold", action.action_type);
            action = PlayerAction::fold(player_id);
            betting::apply_action(&mut self.state, seat_index, &action).expect("fold is always legal for an active seat");
        }

        let event = self.event(EventKind::PlayerActionTaken).with_player(player_id).with_action(action);
        self.emit(event);

        let candidate = self.seek_actor_after(seat_index);
        self.enqueue_actor_or_complete(candidate);
        Ok(())
    }

    fn handle_round_completed(&mut self) -> anyhow::Result<()> {
        let event = self.event(EventKind::BettingRoundCompleted);
        self.emit(event);
        if self.state.table.players_in_hand() <= 1 {
            self.queue.push_back(Transition::Showdown);
            return Ok(());
        }
        match self.state.street.next() {
            Some(Street::Flop) => self.queue.push_back(Transition::DealFlop),
            Some(Street::Turn) => self.queue.push_back(Transition::DealTurn),
            Some(Street::River) => self.queue.push_back(Transition::DealRiver),
            Some(Street::Showdown) | None => self.queue.push_back(Transition::Showdown),
            Some(Street::Preflop) => unreachable!("no street advances back to preflop"),
        }
        Ok(())
    }

    fn deal_street(&mut self, street: Street, count: usize, kind: EventKind) -> anyhow::Result<()> {
        self.state.deck.deal(1)?; // burn
        let cards = self.state.deck.deal(count)?;
        self.state.board.extend(cards);
        self.state.reset_for_street(street);
        let event = self.event(kind);
        self.emit(event);
        let button = self.state.table.button().expect("button is set once a hand has begun");
        let candidate = self.seek_actor_after(button);
        self.enqueue_actor_or_complete(candidate);
        Ok(())
    }

    fn handle_showdown(&mut self) -> anyhow::Result<()> {
        let settlements = if self.state.table.players_in_hand() == 1 {
            let winner = self
                .state
                .table
                .occupied_indices()
                .into_iter()
                .find(|&i| self.state.table.get(i).unwrap().state.status != SeatStatus::Folded)
                .expect("exactly one player remains in hand");
            Showdown::award_uncontested(&self.state.table, &self.state.board, winner, self.state.pot)
        } else {
            Showdown::new(&self.state.table, &self.state.board).settle()
        };
        for settlement in &settlements {
            if let Some(seat) = self.state.table.get_mut(settlement.seat_index) {
                seat.state.stack += settlement.reward;
            }
        }
        self.state.pot = 0;
        self.state.stage = Stage::Showdown;
        self.state.street = Street::Showdown;
        let event = self.event(EventKind::Showdown).with_settlements(settlements);
        self.emit(event);
        self.queue.push_back(Transition::HandEnded);
        Ok(())
    }

    fn handle_hand_ended(&mut self) -> anyhow::Result<()> {
        self.state.stage = Stage::HandComplete;
        let event = self.event(EventKind::HandEnded);
        self.emit(event);

        let eliminated: Vec<usize> = self
            .state
            .table
            .occupied_indices()
            .into_iter()
            .filter(|&i| self.state.table.get(i).unwrap().state.stack == 0)
            .collect();
        for seat_index in eliminated {
            let seat = self.state.table.remove_player(seat_index)?;
            self.players[seat_index] = None;
            let event = self.event(EventKind::PlayerEliminated).with_player(seat.player_id);
            self.emit(event);
        }

        if self.state.table.occupied_count() < self.config.min_players || self.state.hand_number >= self.config.max_hands {
            self.state.stage = Stage::GameOver;
            self.queue.push_back(Transition::GameEnded);
        } else {
            self.state.table.move_button()?;
            self.queue.push_back(Transition::StartHand);
        }
        Ok(())
    }

    fn handle_game_ended(&mut self) -> anyhow::Result<()> {
        let event = self.event(EventKind::GameEnded);
        self.emit(event);
        Ok(())
    }

    // --- seat-seeking helpers --------------------------------------------

    fn is_awaiting_action(&self, seat: usize) -> bool {
        self.state
            .table
            .get(seat)
            .map(|s| s.state.status == SeatStatus::Active && !s.state.acted_this_street)
            .unwrap_or(false)
    }

    /// First seat strictly after `seat` (wrapping) still owed an action.
    fn seek_actor_after(&self, seat: usize) -> Option<usize> {
        let n = self.state.table.capacity();
        (1..=n).map(|step| (seat + step) % n).find(|&i| self.is_awaiting_action(i))
    }

    /// `seat` itself if it's owed an action, else the first such seat after it.
    fn seek_actor_at_or_after(&self, seat: usize) -> Option<usize> {
        if self.is_awaiting_action(seat) {
            Some(seat)
        } else {
            self.seek_actor_after(seat)
        }
    }

    fn enqueue_actor_or_complete(&mut self, candidate: Option<usize>) {
        if betting::is_betting_round_complete(&self.state) {
            self.queue.push_back(Transition::BettingRoundCompleted);
            return;
        }
        let seat = candidate.expect("round incomplete implies some seat is still owed an action");
        self.state.current_player_index = Some(seat);
        self.queue.push_back(Transition::PlayerAction);
    }

    fn build_observation(&self, seat_index: usize) -> Observation {
        let seat = self.state.table.get(seat_index).expect("observation requested for an occupied seat");
        let call_amount = self.state.current_bet.saturating_sub(seat.state.current_bet);
        Observation {
            seat_index,
            player_id: seat.player_id,
            hole: seat.state.hole,
            board: self.state.board.cards().to_vec(),
            street: self.state.street,
            pot: self.state.pot,
            current_bet: self.state.current_bet,
            stack: seat.state.stack,
            call_amount,
            min_bet_amount: self.state.min_bet,
            min_raise_increment: self.state.last_raise_size,
            valid_actions: betting::valid_actions(&self.state, seat_index),
        }
    }
}

/// Re-exported so integration tests can assert on rejected-action reasons
/// without reaching into `betting` directly.
pub use crate::betting::ActionError as RejectedActionReason;
