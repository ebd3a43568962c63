pub mod betting;
pub mod cards;
pub mod config;
pub mod engine;
pub mod events;
pub mod game;
pub mod player;
pub mod showdown;
pub mod table;

pub use betting::{valid_actions, ActionError};
pub use config::GameConfig;
pub use engine::Engine;
pub use events::{Dispatcher, Event, EventKind, SubscriptionToken};
pub use game::{GameState, Stage};
pub use player::{ActionType, Observation, Player, PlayerAction};
pub use showdown::{Settlement, Showdown};
pub use table::{PlayerState, Seat, SeatStatus, Table};
