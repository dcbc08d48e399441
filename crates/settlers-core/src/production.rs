//! Resource production for a dice total.

use crate::board::{Board, PlayerId, Resource, TileId};
use serde::{Deserialize, Serialize};

/// One unit of a resource owed to a player by a producing tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credit {
    pub player: PlayerId,
    pub resource: Resource,
    pub tile: TileId,
}

/// Outcome of a production roll
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Production {
    /// One entry per (producing tile, occupied corner), in tile then corner order
    pub credits: Vec<Credit>,
    /// Tiles that carry the rolled number but hold the robber
    pub blocked: Vec<TileId>,
}

impl Production {
    /// Total units credited to `player`
    pub fn total_for(&self, player: PlayerId) -> u32 {
        self.credits.iter().filter(|c| c.player == player).count() as u32
    }
}

/// Work out what a dice total produces.
///
/// A building touching several producing tiles is credited once per tile.
/// Deserts carry no number and so never match. A total of 7 matches no tile.
pub fn produce(board: &Board, roll: u8) -> Production {
    let mut production = Production::default();

    for tile in board.tiles_with_number(roll) {
        if tile.id == board.robber_tile() {
            production.blocked.push(tile.id);
            continue;
        }
        let Some(resource) = tile.resource() else {
            continue;
        };

        for &corner in &tile.corners {
            if let Some(player) = board.node(corner).and_then(|n| n.owner()) {
                production.credits.push(Credit {
                    player,
                    resource,
                    tile: tile.id,
                });
            }
        }
    }

    production
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{TileType, STANDARD_NUMBERS};
    use crate::hex::BoardLayout;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn board(seed: u64) -> Board {
        let mut rng = StdRng::seed_from_u64(seed);
        Board::standard_with_rng(&mut rng, &BoardLayout::default())
    }

    /// A numbered tile the robber is not on
    fn open_tile(board: &Board, number: u8) -> TileId {
        board
            .tiles_with_number(number)
            .into_iter()
            .find(|t| t.id != board.robber_tile())
            .map(|t| t.id)
            .unwrap()
    }

    #[test]
    fn test_single_settlement_gets_one_unit() {
        let mut board = board(1);
        let tile = open_tile(&board, 8);
        let corner = board.tile(tile).unwrap().corners[0];
        board.place_building(corner, 0).unwrap();

        let production = produce(&board, 8);
        let resource = board.tile(tile).unwrap().resource().unwrap();
        let from_tile: Vec<_> = production.credits.iter().filter(|c| c.tile == tile).collect();
        assert_eq!(from_tile.len(), 1);
        assert_eq!(from_tile[0].player, 0);
        assert_eq!(from_tile[0].resource, resource);
        assert!(production.blocked.is_empty());
    }

    #[test]
    fn test_robber_blocks_production() {
        let mut board = board(2);
        let tile = open_tile(&board, 6);
        let corner = board.tile(tile).unwrap().corners[3];
        board.place_building(corner, 1).unwrap();
        board.move_robber_to(tile);

        let production = produce(&board, 6);
        assert!(production.credits.iter().all(|c| c.tile != tile));
        assert_eq!(production.blocked, vec![tile]);
    }

    #[test]
    fn test_every_occupied_corner_is_credited() {
        let mut board = board(3);
        let tile = open_tile(&board, 5);
        let corners = board.tile(tile).unwrap().corners.clone();
        board.place_building(corners[0], 0).unwrap();
        board.place_building(corners[2], 1).unwrap();
        board.place_building(corners[4], 0).unwrap();

        let production = produce(&board, 5);
        let from_tile = production.credits.iter().filter(|c| c.tile == tile).count();
        assert_eq!(from_tile, 3);
        assert!(production.total_for(0) >= 2);
        assert!(production.total_for(1) >= 1);
    }

    #[test]
    fn test_shared_corner_credited_once_per_tile() {
        // Every tile numbered 9 on a fixed assignment, so a three-tile corner
        // earns three units from one roll.
        let assignment: Vec<(TileType, Option<u8>)> = (0..19)
            .map(|i| {
                if i == 18 {
                    (TileType::Desert, None)
                } else {
                    (TileType::Resource(Resource::ALL[i % 5]), Some(9))
                }
            })
            .collect();
        let mut board = Board::from_layout(&BoardLayout::default(), assignment);
        let corner = board.tile(0).unwrap().corners[0];
        assert_eq!(board.node(corner).unwrap().tiles.len(), 3);
        board.place_building(corner, 0).unwrap();

        let production = produce(&board, 9);
        assert_eq!(production.total_for(0), 3);
    }

    #[test]
    fn test_seven_produces_nothing() {
        let mut board = board(4);
        for node in 0..board.nodes().len() {
            board.place_building(node, 0).unwrap();
        }
        assert_eq!(produce(&board, 7), Production::default());
    }

    #[test]
    fn test_no_buildings_no_credits() {
        let board = board(5);
        for &number in STANDARD_NUMBERS.iter() {
            assert!(produce(&board, number).credits.is_empty());
        }
    }
}
