//! Settlers - a two-player hex settlement game engine
//!
//! This crate provides the core game logic, including:
//! - Hex geometry for laying out tiles and their corners
//! - Board topology with corners merged into shared nodes
//! - Resource production with the robber
//! - The turn/phase state machine: initial dice, two placement rounds,
//!   then roll-and-build turns
//!
//! # Architecture
//!
//! The engine never renders or reads input itself. A host feeds it
//! [`GameAction`]s and draws from [`GameSnapshot`] and the [`GameLog`].
//! It can be compiled to:
//! - Native Rust for the terminal host
//! - WebAssembly for a browser front end (`wasm` feature)
//!
//! # Modules
//!
//! - [`hex`]: Points, board layout and hex corner geometry
//! - [`board`]: Tiles, nodes, roads and the robber
//! - [`player`]: Player state and resources
//! - [`production`]: What a dice total produces
//! - [`actions`]: Input actions and the events they produce
//! - [`log`]: Human-readable event log
//! - [`game`]: Game state machine

pub mod actions;
pub mod board;
pub mod game;
pub mod hex;
pub mod log;
pub mod player;
pub mod production;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use actions::{GameAction, GameEvent};
pub use board::{
    Board, BoardSnapshot, Building, Node, NodeId, PlayerId, Resource, Road, Tile, TileId, TileType, TopologyError,
};
pub use game::{DiceRoll, Game, GameError, GamePhase, GameSnapshot, PlacementStep, PlayerView};
pub use hex::{BoardLayout, Point};
pub use log::GameLog;
pub use player::{HandSummary, Player, PlayerColor, ResourceHand};
pub use production::{produce, Credit, Production};
