//! Text frames: the log panel, resource tallies and the turn banner.

use settlers_core::GameSnapshot;
use std::fmt::Write;

/// Render one frame from the log lines drained this frame and a snapshot
pub fn frame(log: &[String], snapshot: &GameSnapshot) -> String {
    let mut out = String::new();

    for line in log {
        let _ = writeln!(out, "{}", line);
    }

    for player in &snapshot.players {
        let _ = writeln!(out, "{}: {}", player.name, player.resources);
    }

    let turn = snapshot
        .current_player
        .and_then(|id| snapshot.players.get(id as usize))
        .map_or("-", |p| p.name.as_str());
    let _ = writeln!(out, "Turn: {}", turn);

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use settlers_core::{Game, PlayerColor, Resource};

    fn snapshot() -> GameSnapshot {
        let game = Game::with_seed(
            vec!["Ann".into(), "Ben".into()],
            vec![PlayerColor::Red, PlayerColor::Blue],
            3,
        );
        game.snapshot()
    }

    #[test]
    fn test_frame_layout() {
        let mut snapshot = snapshot();
        snapshot.players[1].resources.add(Resource::Ore, 2);

        let text = frame(&["Ann rolled 3 + 4 = 7".to_string()], &snapshot);
        assert_eq!(
            text,
            "Ann rolled 3 + 4 = 7\n\
             Ann: WOOD:0, SHEEP:0, WHEAT:0, BRICK:0, ORE:0\n\
             Ben: WOOD:0, SHEEP:0, WHEAT:0, BRICK:0, ORE:2\n\
             Turn: Ann\n"
        );
    }

    #[test]
    fn test_frame_without_current_player() {
        let mut snapshot = snapshot();
        snapshot.current_player = None;
        assert!(frame(&[], &snapshot).ends_with("Turn: -\n"));
    }
}
