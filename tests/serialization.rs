use holdem_engine::{GameState, PlayerState, Seat};

#[test]
fn game_state_round_trips_through_json() {
    let mut state = GameState::new(3, 10, 20, 0, 5);
    state
        .table
        .seat_player(Seat { player_id: 1, name: "alice".into(), state: PlayerState::new(500) }, None)
        .unwrap();
    state
        .table
        .seat_player(Seat { player_id: 2, name: "bob".into(), state: PlayerState::new(500) }, None)
        .unwrap();
    state.table.set_button(0).unwrap();
    state.pot = 30;
    state.current_bet = 20;
    state.hand_number = 3;

    let json = serde_json::to_value(&state).unwrap();
    assert!(json.get("deck").is_none(), "the deck's remaining order is not observable state");

    let restored: GameState = serde_json::from_value(json).unwrap();

    assert_eq!(restored.pot, state.pot);
    assert_eq!(restored.current_bet, state.current_bet);
    assert_eq!(restored.hand_number, state.hand_number);
    assert_eq!(restored.table.occupied_count(), state.table.occupied_count());
    assert_eq!(restored.table.button(), state.table.button());
    assert_eq!(restored.table.get(0).unwrap().player_id, state.table.get(0).unwrap().player_id);
    assert_eq!(restored.table.get(1).unwrap().state.stack, state.table.get(1).unwrap().state.stack);
}

#[test]
fn restored_state_evaluates_identically_to_the_original() {
    use holdem_engine::betting;

    let mut state = GameState::new(3, 10, 20, 0, 5);
    state
        .table
        .seat_player(Seat { player_id: 1, name: "alice".into(), state: PlayerState::new(500) }, None)
        .unwrap();
    state
        .table
        .seat_player(Seat { player_id: 2, name: "bob".into(), state: PlayerState::new(500) }, None)
        .unwrap();
    state.table.set_button(0).unwrap();
    state.current_bet = 20;
    state.last_raise_size = 20;
    state.table.get_mut(0).unwrap().state.current_bet = 20;
    state.table.get_mut(1).unwrap().state.current_bet = 0;

    let before = betting::valid_actions(&state, 1);

    let json = serde_json::to_string(&state).unwrap();
    let restored: GameState = serde_json::from_str(&json).unwrap();
    let after = betting::valid_actions(&restored, 1);

    assert_eq!(before, after, "serialization round-trip must not change what actions are legal");
}
