//! Game state machine.
//!
//! This module contains:
//! - GamePhase enum for tracking game progression
//! - Game struct owning the board, players, log and random source
//! - Roll and placement handling for every phase
//! - GameError, the non-fatal rejection taxonomy

use crate::actions::{GameAction, GameEvent};
use crate::board::{Board, BoardSnapshot, Node, NodeId, PlayerId, TileId, TopologyError};
use crate::hex::{BoardLayout, Point};
use crate::log::GameLog;
use crate::player::{Player, PlayerColor, ResourceHand};
use crate::production::produce;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use thiserror::Error;
use tracing::warn;

/// Two six-sided dice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    pub first: u8,
    pub second: u8,
}

impl DiceRoll {
    pub fn new(first: u8, second: u8) -> Self {
        Self { first, second }
    }

    /// Two independent uniform 1-6 draws
    pub fn roll<R: Rng>(rng: &mut R) -> Self {
        Self {
            first: rng.gen_range(1..=6),
            second: rng.gen_range(1..=6),
        }
    }

    pub fn total(&self) -> u8 {
        self.first + self.second
    }
}

/// Game phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Every player rolls once, in registration order, to decide placement order
    InitialDice {
        /// Totals rolled so far, indexed by player
        rolls: Vec<u8>,
    },

    /// Each player places one settlement and one road per round
    InitialPlacement {
        /// Which round of placement (1 or 2)
        round: u8,
        /// Placement order for this round
        order: Vec<PlayerId>,
        /// Position in `order` of the player placing
        index: usize,
        /// What we're currently placing
        step: PlacementStep,
    },

    /// Regular turns: roll, then build one settlement
    Main {
        /// Index of the player whose turn it is
        current: usize,
        /// Whether the dice were rolled this turn
        rolled: bool,
    },
}

impl GamePhase {
    /// Whether the game is still in its initial phase
    pub fn is_initial(&self) -> bool {
        !matches!(self, GamePhase::Main { .. })
    }
}

/// What we're placing during initial placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementStep {
    Settlement,
    /// Waiting for a road out of the settlement just placed
    Road { settlement: NodeId },
}

/// Errors that can occur when handling a request. None of them is fatal:
/// the request is logged and state is left as it was.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("No valid spot near ({x:.1}, {y:.1})")]
    InvalidTarget { x: f64, y: f64 },

    #[error("Node {node} is already occupied")]
    OccupiedTarget { node: NodeId },

    #[error("Out of sequence: {0}")]
    OutOfSequence(String),

    #[error(transparent)]
    Topology(#[from] TopologyError),
}

impl GameError {
    fn invalid_target(point: Point) -> Self {
        GameError::InvalidTarget {
            x: point.x,
            y: point.y,
        }
    }

    fn out_of_sequence(reason: &str) -> Self {
        GameError::OutOfSequence(reason.to_string())
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    players: Vec<Player>,
    phase: GamePhase,
    log: GameLog,
    /// Every random draw after setup comes from here
    rng: StdRng,
}

impl Game {
    /// Create a new game on a freshly generated board
    pub fn new(names: Vec<String>, colors: Vec<PlayerColor>) -> Self {
        Self::with_rng(names, colors, &BoardLayout::default(), StdRng::from_entropy())
    }

    /// Create a reproducible game: the board and every later draw follow `seed`
    pub fn with_seed(names: Vec<String>, colors: Vec<PlayerColor>, seed: u64) -> Self {
        Self::with_layout(names, colors, &BoardLayout::default(), seed)
    }

    /// Create a reproducible game on a custom layout
    pub fn with_layout(names: Vec<String>, colors: Vec<PlayerColor>, layout: &BoardLayout, seed: u64) -> Self {
        Self::with_rng(names, colors, layout, StdRng::seed_from_u64(seed))
    }

    /// Create a game on a prepared board
    pub fn with_board(names: Vec<String>, colors: Vec<PlayerColor>, board: Board, seed: u64) -> Self {
        Self::from_parts(names, colors, board, StdRng::seed_from_u64(seed))
    }

    fn with_rng(names: Vec<String>, colors: Vec<PlayerColor>, layout: &BoardLayout, mut rng: StdRng) -> Self {
        let board = Board::standard_with_rng(&mut rng, layout);
        Self::from_parts(names, colors, board, rng)
    }

    fn from_parts(names: Vec<String>, colors: Vec<PlayerColor>, board: Board, rng: StdRng) -> Self {
        assert!(names.len() >= 2, "Must have at least 2 players");
        assert!(names.len() <= PlayerId::MAX as usize, "Too many players");
        assert_eq!(names.len(), colors.len(), "Must provide a color for every player");

        let players = names
            .into_iter()
            .zip(colors)
            .enumerate()
            .map(|(i, (name, color))| Player::new(i as PlayerId, name, color))
            .collect();

        Self {
            board,
            players,
            phase: GamePhase::InitialDice { rolls: Vec::new() },
            log: GameLog::new(),
            rng,
        }
    }

    // ==================== Query Methods ====================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn phase(&self) -> &GamePhase {
        &self.phase
    }

    pub fn log(&self) -> &GameLog {
        &self.log
    }

    /// Take every pending log line
    pub fn drain_log(&mut self) -> Vec<String> {
        self.log.drain()
    }

    /// The player expected to act next
    pub fn current_player(&self) -> Option<PlayerId> {
        match &self.phase {
            GamePhase::InitialDice { rolls } => Some(rolls.len() as PlayerId),
            GamePhase::InitialPlacement { order, index, .. } => order.get(*index).copied(),
            GamePhase::Main { current, .. } => Some(*current as PlayerId),
        }
    }

    // ==================== Requests ====================

    /// Apply an input action
    pub fn apply_action(&mut self, action: GameAction) -> Result<Vec<GameEvent>, GameError> {
        match action {
            GameAction::RequestRoll => self.request_roll(),
            GameAction::RequestPlacement { x, y } => self.request_placement(x, y),
        }
    }

    /// Roll the dice for the current player
    pub fn request_roll(&mut self) -> Result<Vec<GameEvent>, GameError> {
        let result = self.roll_with(DiceRoll::roll);
        self.record(result)
    }

    /// Place at the node nearest to (x, y): a settlement, or during initial
    /// placement the road that follows one
    pub fn request_placement(&mut self, x: f64, y: f64) -> Result<Vec<GameEvent>, GameError> {
        let result = self.place_at(Point::new(x, y));
        self.record(result)
    }

    /// Log the outcome of a request
    fn record(&mut self, result: Result<Vec<GameEvent>, GameError>) -> Result<Vec<GameEvent>, GameError> {
        match &result {
            Ok(events) => {
                for event in events {
                    self.log.push(event.describe(&self.players));
                }
            }
            Err(e) => {
                warn!(error = %e, phase = ?self.phase, "request rejected");
                self.log.push(e.to_string());
            }
        }
        result
    }

    // ==================== Rolling ====================

    /// Handle a roll. `draw` is only called once the roll is known to be
    /// legal, so a rejected roll consumes no randomness.
    fn roll_with<F>(&mut self, draw: F) -> Result<Vec<GameEvent>, GameError>
    where
        F: FnOnce(&mut StdRng) -> DiceRoll,
    {
        match &mut self.phase {
            GamePhase::InitialDice { rolls } => {
                let player = rolls.len() as PlayerId;
                let roll = draw(&mut self.rng);
                rolls.push(roll.total());

                let mut events = vec![GameEvent::DiceRolled {
                    player,
                    roll: (roll.first, roll.second),
                    total: roll.total(),
                }];

                if rolls.len() == self.players.len() {
                    // Stable: equal totals keep registration order
                    let mut order: Vec<PlayerId> = (0..rolls.len()).map(|i| i as PlayerId).collect();
                    order.sort_by_key(|&p| Reverse(rolls[p as usize]));

                    events.push(GameEvent::PlacementOrderDecided { order: order.clone() });
                    self.phase = GamePhase::InitialPlacement {
                        round: 1,
                        order,
                        index: 0,
                        step: PlacementStep::Settlement,
                    };
                }
                Ok(events)
            }

            GamePhase::InitialPlacement { step, .. } => Err(GameError::out_of_sequence(match step {
                PlacementStep::Settlement => "place a settlement, the dice are not used now",
                PlacementStep::Road { .. } => "place a road, the dice are not used now",
            })),

            GamePhase::Main { rolled: true, .. } => Err(GameError::out_of_sequence("already rolled this turn")),

            GamePhase::Main { current, rolled } => {
                let player = *current as PlayerId;
                *rolled = true;

                let roll = draw(&mut self.rng);
                let mut events = vec![GameEvent::DiceRolled {
                    player,
                    roll: (roll.first, roll.second),
                    total: roll.total(),
                }];

                if roll.total() == 7 {
                    events.push(self.move_robber(player));
                } else {
                    events.extend(self.distribute(roll.total()));
                }
                Ok(events)
            }
        }
    }

    /// Send the robber to a uniformly random tile, possibly the one it is on
    fn move_robber(&mut self, player: PlayerId) -> GameEvent {
        let to: TileId = self.rng.gen_range(0..self.board.tiles().len());
        let from = self.board.move_robber_to(to);
        GameEvent::RobberMoved {
            player,
            from,
            to,
            position: self.board.tiles()[to].center,
        }
    }

    /// Credit production for a non-seven total, then report every hand
    fn distribute(&mut self, total: u8) -> Vec<GameEvent> {
        let production = produce(&self.board, total);
        let mut events = Vec::new();

        for tile in production.blocked {
            events.push(GameEvent::ProductionBlocked {
                tile,
                tile_type: self.board.tiles()[tile].tile_type,
            });
        }

        for credit in production.credits {
            if let Some(player) = self.players.get_mut(credit.player as usize) {
                player.add_resource(credit.resource, 1);
                events.push(GameEvent::ResourceProduced {
                    player: credit.player,
                    resource: credit.resource,
                    tile: credit.tile,
                });
            }
        }

        events.extend(self.players.iter().map(|p| GameEvent::HandReported {
            player: p.id,
            resources: p.resources,
        }));
        events
    }

    // ==================== Placement ====================

    fn place_at(&mut self, point: Point) -> Result<Vec<GameEvent>, GameError> {
        match self.phase {
            GamePhase::InitialDice { .. } => Err(GameError::out_of_sequence(
                "every player must roll before placing",
            )),

            GamePhase::InitialPlacement {
                ref order,
                index,
                step,
                ..
            } => {
                let player = order[index];
                match step {
                    PlacementStep::Settlement => {
                        let node = self.build_settlement(point, player)?;
                        if let GamePhase::InitialPlacement { step, .. } = &mut self.phase {
                            *step = PlacementStep::Road { settlement: node };
                        }
                        Ok(vec![self.settlement_event(player, node)])
                    }
                    PlacementStep::Road { settlement } => {
                        let to = self.build_road(point, player, settlement)?;
                        let mut events = vec![GameEvent::RoadBuilt {
                            player,
                            from: settlement,
                            to,
                        }];
                        events.extend(self.advance_placement());
                        Ok(events)
                    }
                }
            }

            GamePhase::Main { rolled: false, .. } => {
                Err(GameError::out_of_sequence("roll the dice before building"))
            }

            GamePhase::Main { current, rolled: true } => {
                let player = current as PlayerId;
                let node = self.build_settlement(point, player)?;

                let next = (current + 1) % self.players.len();
                self.phase = GamePhase::Main {
                    current: next,
                    rolled: false,
                };
                Ok(vec![
                    self.settlement_event(player, node),
                    GameEvent::TurnEnded {
                        player,
                        next_player: next as PlayerId,
                    },
                ])
            }
        }
    }

    /// Settle the empty node nearest to `point`
    fn build_settlement(&mut self, point: Point, player: PlayerId) -> Result<NodeId, GameError> {
        let reach = self.board.layout().placement_threshold;
        let node = self
            .board
            .nearest_node(point, reach)
            .ok_or_else(|| GameError::invalid_target(point))?;

        if self.board.node(node).is_some_and(Node::is_occupied) {
            return Err(GameError::OccupiedTarget { node });
        }
        self.board.place_building(node, player)?;
        Ok(node)
    }

    /// Lay a road from `settlement` to the adjacent node nearest to `point`
    fn build_road(&mut self, point: Point, player: PlayerId, settlement: NodeId) -> Result<NodeId, GameError> {
        let reach = self.board.layout().placement_threshold;
        let candidates = self.board.adjacent_nodes(settlement);
        let to = self
            .board
            .nearest_node_among(candidates, point, reach)
            .ok_or_else(|| GameError::invalid_target(point))?;

        self.board.place_road(player, settlement, to)?;
        Ok(to)
    }

    /// Move to the next placer, the reversed second round, or the main phase
    fn advance_placement(&mut self) -> Vec<GameEvent> {
        let GamePhase::InitialPlacement {
            round,
            order,
            index,
            step,
        } = &mut self.phase
        else {
            return Vec::new();
        };

        *index += 1;
        *step = PlacementStep::Settlement;
        if *index < order.len() {
            return Vec::new();
        }

        if *round == 1 {
            order.reverse();
            *round = 2;
            *index = 0;
            vec![GameEvent::PlacementRoundStarted {
                round: 2,
                order: order.clone(),
            }]
        } else {
            self.phase = GamePhase::Main {
                current: 0,
                rolled: false,
            };
            vec![GameEvent::MainPhaseStarted { first_player: 0 }]
        }
    }

    fn settlement_event(&self, player: PlayerId, node: NodeId) -> GameEvent {
        GameEvent::SettlementBuilt {
            player,
            node,
            position: self.board.nodes()[node].position,
        }
    }

    // ==================== Rendering ====================

    /// Read-only view for renderers
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase.clone(),
            current_player: self.current_player(),
            players: self
                .players
                .iter()
                .map(|p| PlayerView {
                    id: p.id,
                    name: p.name.clone(),
                    color: p.color.rgb(),
                    resources: p.resources,
                })
                .collect(),
            board: self.board.snapshot(&self.players),
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub current_player: Option<PlayerId>,
    pub players: Vec<PlayerView>,
    pub board: BoardSnapshot,
}

/// A player's public tally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub color: (u8, u8, u8),
    pub resources: ResourceHand,
}
