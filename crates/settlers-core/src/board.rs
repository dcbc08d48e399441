//! Game board representation: tiles, shared corner nodes, roads and the robber.
//!
//! This module contains:
//! - Resource and tile types
//! - Board generation from the ring layout, with corners merged by proximity
//! - Query methods (tiles by number, nearest node, adjacency)
//! - Building, road and robber mutations
//! - A read-only snapshot for renderers

use crate::hex::{hex_corners, tile_centers, BoardLayout, Point, TILE_COUNT};
use crate::player::{Player, PlayerColor};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Player identifier (registration index)
pub type PlayerId = u8;

/// Index into [`Board::tiles`]
pub type TileId = usize;

/// Index into [`Board::nodes`], in creation order
pub type NodeId = usize;

/// Production numbers shared out over the non-desert tiles
pub const STANDARD_NUMBERS: [u8; 18] = [2, 3, 3, 4, 4, 5, 5, 6, 6, 8, 8, 9, 9, 10, 10, 11, 11, 12];

/// Producing resource kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    Wood,
    Sheep,
    Wheat,
    Brick,
    Ore,
}

impl Resource {
    /// All resource types, in display order
    pub const ALL: [Resource; 5] = [
        Resource::Wood,
        Resource::Sheep,
        Resource::Wheat,
        Resource::Brick,
        Resource::Ore,
    ];

    /// Upper-case label used in logs and tallies
    pub fn label(&self) -> &'static str {
        match self {
            Resource::Wood => "WOOD",
            Resource::Sheep => "SHEEP",
            Resource::Wheat => "WHEAT",
            Resource::Brick => "BRICK",
            Resource::Ore => "ORE",
        }
    }

    /// How many tiles of this kind the standard board carries.
    /// Brick and ore are the scarce kinds.
    pub fn standard_tile_count(&self) -> usize {
        match self {
            Resource::Brick | Resource::Ore => 3,
            _ => 4,
        }
    }
}

/// Type of hex tile on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    /// Produces a resource when its number is rolled
    Resource(Resource),
    /// No production, never numbered
    Desert,
}

impl TileType {
    /// The standard multiset: one desert plus 3 or 4 of each resource
    pub fn standard_set() -> Vec<TileType> {
        let mut set = vec![TileType::Desert];
        for resource in Resource::ALL {
            set.extend(std::iter::repeat(TileType::Resource(resource)).take(resource.standard_tile_count()));
        }
        set
    }

    /// Get the resource this tile produces, if any
    pub fn resource(&self) -> Option<Resource> {
        match self {
            TileType::Resource(r) => Some(*r),
            TileType::Desert => None,
        }
    }

    /// Fill color for rendering
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            TileType::Resource(Resource::Wood) => (0, 255, 0),
            TileType::Resource(Resource::Sheep) => (255, 255, 255),
            TileType::Resource(Resource::Wheat) => (255, 255, 0),
            TileType::Resource(Resource::Brick) => (255, 0, 0),
            TileType::Resource(Resource::Ore) => (128, 128, 128),
            TileType::Desert => (245, 222, 179),
        }
    }

    /// Short label used in logs
    pub fn label(&self) -> &'static str {
        match self {
            TileType::Resource(r) => r.label(),
            TileType::Desert => "DESERT",
        }
    }
}

/// A single hex tile on the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    /// Center in the host's coordinate space
    pub center: Point,
    pub tile_type: TileType,
    /// Dice number that triggers production (2-12 except 7, None for desert)
    pub dice_number: Option<u8>,
    /// The six corner nodes, in corner-angle order
    pub corners: Vec<NodeId>,
}

impl Tile {
    /// Get the resource this tile produces, if any
    pub fn resource(&self) -> Option<Resource> {
        self.tile_type.resource()
    }

    pub fn is_desert(&self) -> bool {
        matches!(self.tile_type, TileType::Desert)
    }
}

/// A settlement. Buildings are never upgraded or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub owner: PlayerId,
}

/// A corner shared by up to three tiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub position: Point,
    pub building: Option<Building>,
    /// Tiles touching this corner (1 to 3)
    pub tiles: Vec<TileId>,
}

impl Node {
    pub fn is_occupied(&self) -> bool {
        self.building.is_some()
    }

    /// Owner of the building on this node, if any
    pub fn owner(&self) -> Option<PlayerId> {
        self.building.map(|b| b.owner)
    }
}

/// A road between two nodes that share a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Road {
    pub owner: PlayerId,
    pub nodes: [NodeId; 2],
}

/// Violations of board topology invariants
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum TopologyError {
    #[error("Unknown node {0}")]
    UnknownNode(NodeId),

    #[error("Node {0} already has a building")]
    Occupied(NodeId),

    #[error("A road needs two distinct nodes, got {0} twice")]
    SameNode(NodeId),

    #[error("Nodes {0} and {1} share no tile")]
    NotAdjacent(NodeId, NodeId),
}

/// The complete game board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    layout: BoardLayout,
    tiles: Vec<Tile>,
    /// Deduplicated corners in creation order
    nodes: Vec<Node>,
    roads: Vec<Road>,
    /// Current robber location
    robber: TileId,
}

impl Board {
    /// Create the standard board with randomized tiles and numbers
    pub fn standard() -> Self {
        let mut rng = rand::thread_rng();
        Self::standard_with_rng(&mut rng, &BoardLayout::default())
    }

    /// Create the standard board with a provided RNG.
    /// This allows for deterministic board generation when needed.
    pub fn standard_with_rng<R: Rng>(rng: &mut R, layout: &BoardLayout) -> Self {
        let mut tile_types = TileType::standard_set();
        tile_types.shuffle(rng);

        let mut numbers = STANDARD_NUMBERS.to_vec();
        numbers.shuffle(rng);
        let mut numbers = numbers.into_iter();

        let assignment: Vec<(TileType, Option<u8>)> = tile_types
            .into_iter()
            .map(|tile_type| {
                let number = match tile_type {
                    TileType::Desert => None,
                    TileType::Resource(_) => Some(
                        numbers
                            .next()
                            .expect("number tokens exhausted before the last producing tile"),
                    ),
                };
                (tile_type, number)
            })
            .collect();

        assert!(
            numbers.next().is_none(),
            "number tokens left over after every producing tile was numbered"
        );

        Self::from_layout(layout, assignment)
    }

    /// Build the board for an explicit tile assignment, one entry per layout
    /// position. Corners are merged into shared nodes here.
    ///
    /// # Panics
    ///
    /// If the assignment does not cover exactly the layout's tile count, or a
    /// desert carries a number, or a producing tile lacks one.
    pub fn from_layout(layout: &BoardLayout, assignment: Vec<(TileType, Option<u8>)>) -> Self {
        let centers = tile_centers(layout);
        assert_eq!(
            assignment.len(),
            centers.len(),
            "tile assignment must cover all {} layout positions",
            TILE_COUNT
        );

        let tiles: Vec<Tile> = centers
            .into_iter()
            .zip(assignment)
            .enumerate()
            .map(|(id, (center, (tile_type, dice_number)))| {
                assert_eq!(
                    tile_type == TileType::Desert,
                    dice_number.is_none(),
                    "tile {} ({:?}) has an invalid production number {:?}",
                    id,
                    tile_type,
                    dice_number
                );
                Tile {
                    id,
                    center,
                    tile_type,
                    dice_number,
                    corners: Vec::with_capacity(6),
                }
            })
            .collect();

        // Robber starts on the first desert; a desert-less board starts it on the center
        let robber = tiles.iter().position(Tile::is_desert).unwrap_or(0);

        let mut board = Self {
            layout: layout.clone(),
            tiles,
            nodes: Vec::new(),
            roads: Vec::new(),
            robber,
        };

        for tile in 0..board.tiles.len() {
            board.link_corners(tile);
        }

        debug!(
            tiles = board.tiles.len(),
            nodes = board.nodes.len(),
            robber = board.robber,
            "board generated"
        );

        board
    }

    /// Resolve a tile's six corners to shared nodes and register the tile
    /// with each of them. Safe to call again: nothing is registered twice.
    fn link_corners(&mut self, tile: TileId) {
        let corners = hex_corners(self.tiles[tile].center, self.layout.hex_radius);
        let mut ids = Vec::with_capacity(corners.len());

        for corner in corners {
            let node = self.find_or_create_node(corner);
            ids.push(node);
            let touching = &mut self.nodes[node].tiles;
            if !touching.contains(&tile) {
                touching.push(tile);
            }
        }

        self.tiles[tile].corners = ids;
    }

    // ==================== Node Deduplication ====================

    /// First node, in creation order, strictly closer than `threshold`.
    ///
    /// If several nodes qualify the earliest-created one wins. Well-spaced hex
    /// geometry never produces two candidates at the default thresholds.
    pub fn find_node_within(&self, point: Point, threshold: f64) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.position.distance_to(&point) < threshold)
    }

    /// Reuse the node within the merge threshold of `point`, or create one there
    pub fn find_or_create_node(&mut self, point: Point) -> NodeId {
        if let Some(id) = self.find_node_within(point, self.layout.merge_threshold) {
            return id;
        }

        let id = self.nodes.len();
        self.nodes.push(Node {
            id,
            position: point,
            building: None,
            tiles: Vec::new(),
        });
        id
    }

    // ==================== Query Methods ====================

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn roads(&self) -> &[Road] {
        &self.roads
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Get the robber's current tile
    pub fn robber_tile(&self) -> TileId {
        self.robber
    }

    /// All tiles whose production number equals `number`
    pub fn tiles_with_number(&self, number: u8) -> Vec<&Tile> {
        self.tiles
            .iter()
            .filter(|t| t.dice_number == Some(number))
            .collect()
    }

    /// Node closest to `point`, or None if even the closest is farther than
    /// `max_distance`. Ties go to the earliest-created node.
    pub fn nearest_node(&self, point: Point, max_distance: f64) -> Option<NodeId> {
        self.nearest_node_among(0..self.nodes.len(), point, max_distance)
    }

    /// Like [`Board::nearest_node`], restricted to `candidates`.
    /// Ties go to the first candidate yielded.
    pub fn nearest_node_among<I>(&self, candidates: I, point: Point, max_distance: f64) -> Option<NodeId>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut best: Option<(NodeId, f64)> = None;

        for id in candidates {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            let distance = node.position.distance_to(&point);
            if best.map_or(true, |(_, closest)| distance < closest) {
                best = Some((id, distance));
            }
        }

        best.filter(|(_, distance)| *distance <= max_distance)
            .map(|(id, _)| id)
    }

    /// Every other corner of every tile touching `node`, deduplicated
    pub fn adjacent_nodes(&self, node: NodeId) -> Vec<NodeId> {
        let mut adjacent = Vec::new();
        let Some(origin) = self.nodes.get(node) else {
            return adjacent;
        };

        for &tile in &origin.tiles {
            for &corner in &self.tiles[tile].corners {
                if corner != node && !adjacent.contains(&corner) {
                    adjacent.push(corner);
                }
            }
        }
        adjacent
    }

    /// Whether two nodes are corners of a common tile
    pub fn share_tile(&self, a: NodeId, b: NodeId) -> bool {
        match (self.nodes.get(a), self.nodes.get(b)) {
            (Some(a), Some(b)) => a.tiles.iter().any(|t| b.tiles.contains(t)),
            _ => false,
        }
    }

    /// Number of buildings a player owns
    pub fn building_count(&self, player: PlayerId) -> usize {
        self.nodes.iter().filter(|n| n.owner() == Some(player)).count()
    }

    // ==================== Mutation Methods ====================

    /// Place a settlement on an empty node
    pub fn place_building(&mut self, node: NodeId, owner: PlayerId) -> Result<(), TopologyError> {
        let target = self.nodes.get_mut(node).ok_or(TopologyError::UnknownNode(node))?;
        if target.is_occupied() {
            return Err(TopologyError::Occupied(node));
        }
        target.building = Some(Building { owner });
        Ok(())
    }

    /// Place a road between two distinct nodes sharing a tile
    pub fn place_road(&mut self, owner: PlayerId, from: NodeId, to: NodeId) -> Result<(), TopologyError> {
        for id in [from, to] {
            if self.nodes.get(id).is_none() {
                return Err(TopologyError::UnknownNode(id));
            }
        }
        if from == to {
            return Err(TopologyError::SameNode(from));
        }
        if !self.share_tile(from, to) {
            return Err(TopologyError::NotAdjacent(from, to));
        }

        self.roads.push(Road {
            owner,
            nodes: [from, to],
        });
        Ok(())
    }

    /// Move the robber, returning the tile it left. Any tile is accepted,
    /// including the one it already occupies.
    pub fn move_robber_to(&mut self, tile: TileId) -> TileId {
        debug_assert!(tile < self.tiles.len(), "robber moved off the board");
        std::mem::replace(&mut self.robber, tile)
    }

    // ==================== Rendering ====================

    /// Read-only view for renderers, with player colors resolved
    pub fn snapshot(&self, players: &[Player]) -> BoardSnapshot {
        let color_of = |owner: PlayerId| {
            players
                .get(owner as usize)
                .map_or(PlayerColor::for_player(owner), |p| p.color)
                .rgb()
        };

        BoardSnapshot {
            tiles: self
                .tiles
                .iter()
                .map(|tile| TileView {
                    id: tile.id,
                    x: tile.center.x,
                    y: tile.center.y,
                    tile_type: tile.tile_type,
                    dice_number: tile.dice_number,
                    has_robber: tile.id == self.robber,
                    color: tile.tile_type.color(),
                })
                .collect(),
            nodes: self
                .nodes
                .iter()
                .map(|node| NodeView {
                    id: node.id,
                    x: node.position.x,
                    y: node.position.y,
                    owner: node.owner(),
                    color: node.owner().map(color_of),
                })
                .collect(),
            roads: self
                .roads
                .iter()
                .map(|road| RoadView {
                    owner: road.owner,
                    color: color_of(road.owner),
                    from: self.nodes[road.nodes[0]].position,
                    to: self.nodes[road.nodes[1]].position,
                })
                .collect(),
            robber_tile: self.robber,
        }
    }
}

/// Renderer-facing board representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub tiles: Vec<TileView>,
    pub nodes: Vec<NodeView>,
    pub roads: Vec<RoadView>,
    pub robber_tile: TileId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileView {
    pub id: TileId,
    pub x: f64,
    pub y: f64,
    pub tile_type: TileType,
    pub dice_number: Option<u8>,
    pub has_robber: bool,
    pub color: (u8, u8, u8),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeView {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub owner: Option<PlayerId>,
    pub color: Option<(u8, u8, u8)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadView {
    pub owner: PlayerId,
    pub color: (u8, u8, u8),
    pub from: Point,
    pub to: Point,
}
