use crate::cards::Street;
use crate::player::PlayerAction;
use crate::showdown::Settlement;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// The kind of observation event emitted to subscribers. Not exhaustive of
/// every internal transition — only what an external observer needs to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum EventKind {
    GameStarted,
    HandStarted,
    DealHoleCards,
    PostBlinds,
    PlayerActionTaken,
    DealFlop,
    DealTurn,
    DealRiver,
    BettingRoundCompleted,
    Showdown,
    HandEnded,
    GameEnded,
    PlayerJoined,
    PlayerLeft,
    PlayerEliminated,
}

/// An immutable snapshot handed to subscribers and player `on_event` hooks.
/// Holds owned data only, so handlers can never alias or outlive engine
/// state.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Event {
    pub kind: EventKind,
    pub hand_number: u64,
    pub street: Street,
    pub player_id: Option<u64>,
    pub action: Option<PlayerAction>,
    pub pot: u64,
    pub current_bet: u64,
    pub settlements: Option<Vec<Settlement>>,
}

impl Event {
    pub fn new(kind: EventKind, hand_number: u64, street: Street, pot: u64, current_bet: u64) -> Self {
        Self {
            kind,
            hand_number,
            street,
            player_id: None,
            action: None,
            pot,
            current_bet,
            settlements: None,
        }
    }
    pub fn with_player(mut self, player_id: u64) -> Self {
        self.player_id = Some(player_id);
        self
    }
    pub fn with_action(mut self, action: PlayerAction) -> Self {
        self.action = Some(action);
        self
    }
    pub fn with_settlements(mut self, settlements: Vec<Settlement>) -> Self {
        self.settlements = Some(settlements);
        self
    }
}

/// Opaque handle returned by `subscribe`, used to `unsubscribe` later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(u64);

struct Subscription {
    token: SubscriptionToken,
    kind: EventKind,
    handler: Box<dyn FnMut(&Event)>,
}

/// Single-threaded, synchronous fan-out of observation events. Transition
/// tags never pass through here — only external, immutable `Event`s. A
/// handler that panics is caught and logged; it never takes down the rest
/// of the dispatch chain or the engine.
#[derive(Default)]
pub struct Dispatcher {
    next_token: u64,
    subscriptions: Vec<Subscription>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, kind: EventKind, handler: Box<dyn FnMut(&Event)>) -> SubscriptionToken {
        let token = SubscriptionToken(self.next_token);
        self.next_token += 1;
        self.subscriptions.push(Subscription { token, kind, handler });
        token
    }

    pub fn unsubscribe(&mut self, token: SubscriptionToken) {
        self.subscriptions.retain(|s| s.token != token);
    }

    /// Runs every handler registered for `event.kind`, in registration
    /// order. All of them complete before the caller (the engine's
    /// transition loop) moves on to the next transition tag.
    pub fn dispatch(&mut self, event: &Event) {
        for subscription in self.subscriptions.iter_mut() {
            if subscription.kind != event.kind {
                continue;
            }
            let handler = AssertUnwindSafe(&mut subscription.handler);
            if catch_unwind(move || {
                let handler = handler;
                (handler.0)(event)
            })
            .is_err()
            {
                log::error!("event handler panicked while handling {:?}", event.kind);
            }
        }
    }
}
