//! Terminal demo: seats a few scripted players and runs hands to the
//! console. Not part of the library; a thin consumer of it.
use clap::Parser;
use colored::Colorize;
use holdem_engine::{ActionType, Engine, Event, EventKind, GameConfig, Observation, Player, PlayerAction};

#[derive(Parser)]
#[command(name = "holdem-demo", about = "Runs a scripted No-Limit Hold'em game to the terminal")]
struct Args {
    #[arg(long, default_value_t = 5)]
    small_blind: u64,
    #[arg(long, default_value_t = 10)]
    big_blind: u64,
    #[arg(long, default_value_t = 4)]
    players: usize,
    #[arg(long, default_value_t = 1000)]
    stack: u64,
    #[arg(long, default_value_t = 10)]
    hands: u64,
    #[arg(long, default_value_t = 1)]
    seed: u64,
}

/// Checks or calls whenever it legally can, folds otherwise. Just enough
/// behavior to carry a game to completion for the demo.
struct PassivePlayer;

impl Player for PassivePlayer {
    fn decide_action(&mut self, observation: &Observation) -> PlayerAction {
        let action_type = if observation.valid_actions.contains(&ActionType::Check) {
            ActionType::Check
        } else if observation.valid_actions.contains(&ActionType::Call) {
            ActionType::Call
        } else {
            ActionType::Fold
        };
        PlayerAction::new(observation.player_id, action_type, None)
    }
}

/// Shoves whenever its hand is live and there's a wager to make, otherwise
/// calls or checks. Exists to exercise all-in cascades in the demo.
struct AggressivePlayer;

impl Player for AggressivePlayer {
    fn decide_action(&mut self, observation: &Observation) -> PlayerAction {
        let action_type = if observation.valid_actions.contains(&ActionType::Bet) || observation.valid_actions.contains(&ActionType::Raise) {
            ActionType::AllIn
        } else if observation.valid_actions.contains(&ActionType::Check) {
            ActionType::Check
        } else if observation.valid_actions.contains(&ActionType::Call) {
            ActionType::Call
        } else {
            ActionType::Fold
        };
        PlayerAction::new(observation.player_id, action_type, None)
    }
}

fn log_event(event: &Event) {
    match event.kind {
        EventKind::HandStarted => println!("{}", format!("-- hand {} --", event.hand_number).bold()),
        EventKind::DealFlop | EventKind::DealTurn | EventKind::DealRiver => {
            println!("{}", format!("{}: pot {}", event.street, event.pot).blue())
        }
        EventKind::PlayerActionTaken => {
            if let (Some(player_id), Some(action)) = (event.player_id, event.action) {
                println!("  player {player_id} {}", action.action_type);
            }
        }
        EventKind::Showdown => {
            if let Some(settlements) = &event.settlements {
                for settlement in settlements {
                    if settlement.reward > 0 {
                        println!("  {}", format!("player {} wins {}", settlement.player_id, settlement.reward).green());
                    }
                }
            }
        }
        EventKind::PlayerEliminated => {
            if let Some(player_id) = event.player_id {
                println!("{}", format!("player {player_id} is eliminated").red());
            }
        }
        EventKind::GameEnded => println!("{}", "-- game over --".bold()),
        _ => {}
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = GameConfig::new(args.small_blind, args.big_blind, 2, args.players, args.hands, args.seed);
    let mut engine = Engine::new(config)?;

    for kind in [
        EventKind::HandStarted,
        EventKind::DealFlop,
        EventKind::DealTurn,
        EventKind::DealRiver,
        EventKind::PlayerActionTaken,
        EventKind::Showdown,
        EventKind::PlayerEliminated,
        EventKind::GameEnded,
    ] {
        engine.subscribe(kind, Box::new(log_event));
    }

    for seat in 0..args.players {
        let behavior: Box<dyn Player> = if seat % 2 == 0 { Box::new(PassivePlayer) } else { Box::new(AggressivePlayer) };
        engine.add_player(format!("player{seat}"), args.stack, behavior, None)?;
    }

    engine.start()?;
    Ok(())
}
