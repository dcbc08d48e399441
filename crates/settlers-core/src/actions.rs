//! Input actions the host can deliver and the events they produce.
//!
//! Every event renders to one human-readable log line through
//! [`GameEvent::describe`].

use crate::board::{NodeId, PlayerId, Resource, TileId, TileType};
use crate::hex::Point;
use crate::player::{HandSummary, Player, ResourceHand};
use serde::{Deserialize, Serialize};

/// Everything the host can ask of the game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameAction {
    /// Roll the dice for the current player
    RequestRoll,
    /// Place a building (or, during initial placement, a road) near a point
    RequestPlacement { x: f64, y: f64 },
}

/// Events that occur as a result of actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Dice were rolled
    DiceRolled {
        player: PlayerId,
        roll: (u8, u8),
        total: u8,
    },

    /// Every player has rolled once; placement begins in this order
    PlacementOrderDecided { order: Vec<PlayerId> },

    /// The second placement round starts, order reversed
    PlacementRoundStarted { round: u8, order: Vec<PlayerId> },

    /// Initial placement is over; regular turns begin
    MainPhaseStarted { first_player: PlayerId },

    /// A settlement was built
    SettlementBuilt {
        player: PlayerId,
        node: NodeId,
        position: Point,
    },

    /// A road was built
    RoadBuilt {
        player: PlayerId,
        from: NodeId,
        to: NodeId,
    },

    /// One unit of a resource was produced for a player
    ResourceProduced {
        player: PlayerId,
        resource: Resource,
        tile: TileId,
    },

    /// A tile with the rolled number holds the robber
    ProductionBlocked { tile: TileId, tile_type: TileType },

    /// The robber was moved
    RobberMoved {
        player: PlayerId,
        from: TileId,
        to: TileId,
        position: Point,
    },

    /// A player's tally after a production roll
    HandReported {
        player: PlayerId,
        resources: ResourceHand,
    },

    /// Turn ended
    TurnEnded {
        player: PlayerId,
        next_player: PlayerId,
    },
}

impl GameEvent {
    /// Render the event as a log line, resolving player names
    pub fn describe(&self, players: &[Player]) -> String {
        let name = |id: PlayerId| {
            players
                .get(id as usize)
                .map_or_else(|| format!("Player#{}", id), |p| p.name.clone())
        };
        let names = |order: &[PlayerId]| order.iter().map(|&id| name(id)).collect::<Vec<_>>().join(", ");

        match self {
            GameEvent::DiceRolled { player, roll, total } => {
                format!("{} rolled {} + {} = {}", name(*player), roll.0, roll.1, total)
            }
            GameEvent::PlacementOrderDecided { order } => {
                format!("Placement order: {}", names(order))
            }
            GameEvent::PlacementRoundStarted { round, order } => {
                format!("Placement round {}: {}", round, names(order))
            }
            GameEvent::MainPhaseStarted { first_player } => {
                format!("Initial placement complete. {} starts", name(*first_player))
            }
            GameEvent::SettlementBuilt {
                player, position, ..
            } => format!(
                "{} built a settlement at ({:.1}, {:.1})",
                name(*player),
                position.x,
                position.y
            ),
            GameEvent::RoadBuilt { player, from, to } => {
                format!("{} built a road between nodes {} and {}", name(*player), from, to)
            }
            GameEvent::ResourceProduced { player, resource, .. } => {
                format!("{} gets 1 {}", name(*player), resource.label())
            }
            GameEvent::ProductionBlocked { tile_type, .. } => {
                format!("The robber blocks production on a {} tile", tile_type.label())
            }
            GameEvent::RobberMoved { position, .. } => {
                format!("Robber moved to ({:.1}, {:.1})", position.x, position.y)
            }
            GameEvent::HandReported { player, resources } => {
                HandSummary::new(&name(*player), resources).to_string()
            }
            GameEvent::TurnEnded { player, next_player } => {
                format!("{} ends the turn. Next: {}", name(*player), name(*next_player))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerColor;

    fn players() -> Vec<Player> {
        vec![
            Player::new(0, "Alice".into(), PlayerColor::Red),
            Player::new(1, "Bob".into(), PlayerColor::Blue),
        ]
    }

    #[test]
    fn test_describe_uses_names() {
        let event = GameEvent::DiceRolled {
            player: 1,
            roll: (3, 4),
            total: 7,
        };
        assert_eq!(event.describe(&players()), "Bob rolled 3 + 4 = 7");

        let event = GameEvent::PlacementOrderDecided { order: vec![1, 0] };
        assert_eq!(event.describe(&players()), "Placement order: Bob, Alice");
    }

    #[test]
    fn test_describe_unknown_player() {
        let event = GameEvent::ResourceProduced {
            player: 9,
            resource: Resource::Ore,
            tile: 0,
        };
        assert_eq!(event.describe(&players()), "Player#9 gets 1 ORE");
    }

    #[test]
    fn test_hand_report_matches_player_summary() {
        let mut players = players();
        players[1].add_resource(Resource::Wheat, 2);
        let event = GameEvent::HandReported {
            player: 1,
            resources: players[1].resources,
        };
        assert_eq!(event.describe(&players), players[1].to_string());
    }

    #[test]
    fn test_action_json_shape() {
        let action: GameAction = serde_json::from_str(r#"{"type":"RequestPlacement","x":1.5,"y":2.0}"#).unwrap();
        assert_eq!(action, GameAction::RequestPlacement { x: 1.5, y: 2.0 });

        let roll: GameAction = serde_json::from_str(r#"{"type":"RequestRoll"}"#).unwrap();
        assert_eq!(roll, GameAction::RequestRoll);
    }
}
