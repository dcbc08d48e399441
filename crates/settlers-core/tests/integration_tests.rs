//! Integration tests for the settlers engine.
//!
//! These tests drive complete games through the public API with fixed seeds.

use pretty_assertions::assert_eq;
use settlers_core::*;

fn two_player_game(seed: u64) -> Game {
    Game::with_seed(
        vec!["Player1".to_string(), "Player2".to_string()],
        vec![PlayerColor::Red, PlayerColor::Blue],
        seed,
    )
}

fn click(game: &mut Game, node: NodeId) -> Result<Vec<GameEvent>, GameError> {
    let position = game.board().nodes()[node].position;
    game.request_placement(position.x, position.y)
}

fn first_free_node(game: &Game) -> NodeId {
    game.board()
        .nodes()
        .iter()
        .find(|n| !n.is_occupied())
        .map(|n| n.id)
        .expect("board has a free node")
}

/// Roll until every player has rolled, then settle and build roads
/// until the main phase starts
fn complete_initial_phase(game: &mut Game) {
    while matches!(game.phase(), GamePhase::InitialDice { .. }) {
        game.request_roll().unwrap();
    }

    let mut iterations = 0;
    while game.phase().is_initial() && iterations < 100 {
        let target = match game.phase() {
            GamePhase::InitialPlacement {
                step: PlacementStep::Road { settlement },
                ..
            } => game.board().adjacent_nodes(*settlement)[0],
            _ => first_free_node(game),
        };
        click(game, target).unwrap();
        iterations += 1;
    }

    assert!(!game.phase().is_initial(), "initial phase should finish");
}

#[test]
fn test_initial_phase_gives_each_player_two_settlements_and_roads() {
    let mut game = two_player_game(1);
    complete_initial_phase(&mut game);

    assert_eq!(game.phase(), &GamePhase::Main { current: 0, rolled: false });
    for player in 0..2 {
        assert_eq!(game.board().building_count(player), 2);
        assert_eq!(game.board().roads().iter().filter(|r| r.owner == player).count(), 2);
    }
    assert!(game.players().iter().all(|p| p.resources.is_empty()));
}

#[test]
fn test_second_round_reverses_the_first() {
    let mut game = two_player_game(2);
    while matches!(game.phase(), GamePhase::InitialDice { .. }) {
        game.request_roll().unwrap();
    }
    let first_round = match game.phase() {
        GamePhase::InitialPlacement { order, .. } => order.clone(),
        other => panic!("expected placement, got {:?}", other),
    };

    for _ in 0..first_round.len() {
        let node = first_free_node(&game);
        click(&mut game, node).unwrap();
        let road = game.board().adjacent_nodes(node)[0];
        click(&mut game, road).unwrap();
    }

    let mut reversed = first_round.clone();
    reversed.reverse();
    match game.phase() {
        GamePhase::InitialPlacement { round, order, index, .. } => {
            assert_eq!(*round, 2);
            assert_eq!(order, &reversed);
            assert_eq!(*index, 0);
        }
        other => panic!("expected round 2, got {:?}", other),
    }
}

#[test]
fn test_full_turn_cycle() {
    let mut game = two_player_game(3);
    complete_initial_phase(&mut game);

    let mut produced = 0u32;
    for turn in 0..20 {
        let expected = (turn % 2) as PlayerId;
        assert_eq!(game.current_player(), Some(expected));

        let robber_before = game.board().robber_tile();
        let events = game.request_roll().unwrap();
        let total = match events[0] {
            GameEvent::DiceRolled { total, .. } => total,
            ref other => panic!("expected a roll first, got {:?}", other),
        };

        let credited = events
            .iter()
            .filter(|e| matches!(e, GameEvent::ResourceProduced { .. }))
            .count() as u32;
        if total == 7 {
            assert_eq!(credited, 0);
            assert!(events.iter().any(|e| matches!(e, GameEvent::RobberMoved { .. })));
        } else {
            assert_eq!(game.board().robber_tile(), robber_before);
        }
        produced += credited;

        let node = first_free_node(&game);
        click(&mut game, node).unwrap();
        assert_eq!(game.board().node(node).unwrap().owner(), Some(expected));
    }

    let held: u32 = game.players().iter().map(|p| p.resources.total()).sum();
    assert_eq!(held, produced);
    assert_eq!(game.board().building_count(0), 12);
    assert_eq!(game.board().building_count(1), 12);
}

#[test]
fn test_rejected_requests_leave_state_unchanged() {
    let mut game = two_player_game(4);
    complete_initial_phase(&mut game);

    let before = game.snapshot();
    let free = first_free_node(&game);
    assert!(matches!(click(&mut game, free), Err(GameError::OutOfSequence(_))));
    assert!(matches!(
        game.request_placement(-500.0, -500.0),
        Err(GameError::OutOfSequence(_))
    ));
    assert_eq!(game.snapshot(), before);

    game.request_roll().unwrap();
    let after_roll = game.snapshot();
    assert!(matches!(game.request_roll(), Err(GameError::OutOfSequence(_))));
    let occupied = game
        .board()
        .nodes()
        .iter()
        .find(|n| n.is_occupied())
        .map(|n| n.id)
        .unwrap();
    assert_eq!(
        click(&mut game, occupied),
        Err(GameError::OccupiedTarget { node: occupied })
    );
    assert!(matches!(
        game.request_placement(400.0, 300.0),
        Err(GameError::InvalidTarget { .. })
    ));
    assert_eq!(game.snapshot(), after_roll);
}

#[test]
fn test_rejections_are_logged() {
    let mut game = two_player_game(5);
    game.drain_log();

    let err = game.request_placement(0.0, 0.0).unwrap_err();
    assert_eq!(game.drain_log(), vec![err.to_string()]);
}

#[test]
fn test_same_seed_same_game() {
    fn play(seed: u64) -> Vec<String> {
        let mut game = two_player_game(seed);
        complete_initial_phase(&mut game);
        for _ in 0..10 {
            game.request_roll().unwrap();
            let node = first_free_node(&game);
            click(&mut game, node).unwrap();
        }
        game.drain_log()
    }

    assert_eq!(play(42), play(42));
}

#[test]
fn test_three_players_take_turns_in_registration_order() {
    let mut game = Game::with_seed(
        vec!["A".into(), "B".into(), "C".into()],
        vec![PlayerColor::Red, PlayerColor::Blue, PlayerColor::Orange],
        6,
    );
    complete_initial_phase(&mut game);

    for expected in [0, 1, 2, 0] {
        assert_eq!(game.current_player(), Some(expected));
        game.request_roll().unwrap();
        let node = first_free_node(&game);
        click(&mut game, node).unwrap();
    }
    for player in 0..3 {
        assert!(game.board().building_count(player) >= 2);
    }
}

#[test]
fn test_snapshot_serializes_for_renderers() {
    let mut game = two_player_game(7);
    complete_initial_phase(&mut game);

    let json = serde_json::to_value(game.snapshot()).unwrap();
    assert_eq!(json["board"]["tiles"].as_array().unwrap().len(), 19);
    assert_eq!(json["board"]["nodes"].as_array().unwrap().len(), 54);
    assert_eq!(json["board"]["roads"].as_array().unwrap().len(), 4);
    assert_eq!(json["players"][0]["name"], "Player1");
    assert_eq!(json["current_player"], 0);
}
