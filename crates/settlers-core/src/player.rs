//! Player state and resource management.
//!
//! This module contains:
//! - PlayerColor for rendering buildings and roads
//! - ResourceHand for managing resource counts
//! - Player struct with name, color and resources

use crate::board::{PlayerId, Resource};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Player color for UI rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerColor {
    Red,
    Blue,
    Orange,
    White,
}

impl PlayerColor {
    /// Get color for a player index
    pub fn for_player(id: PlayerId) -> Self {
        match id % 4 {
            0 => PlayerColor::Red,
            1 => PlayerColor::Blue,
            2 => PlayerColor::Orange,
            _ => PlayerColor::White,
        }
    }

    /// RGB triple for rendering
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            PlayerColor::Red => (255, 0, 0),
            PlayerColor::Blue => (0, 0, 255),
            PlayerColor::Orange => (255, 165, 0),
            PlayerColor::White => (255, 255, 255),
        }
    }

    /// Parse a color name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "red" => Some(PlayerColor::Red),
            "blue" => Some(PlayerColor::Blue),
            "orange" => Some(PlayerColor::Orange),
            "white" => Some(PlayerColor::White),
            _ => None,
        }
    }
}

/// A hand of resources
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceHand {
    pub wood: u32,
    pub sheep: u32,
    pub wheat: u32,
    pub brick: u32,
    pub ore: u32,
}

impl ResourceHand {
    /// Create an empty hand
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hand with specific amounts
    pub fn with_amounts(wood: u32, sheep: u32, wheat: u32, brick: u32, ore: u32) -> Self {
        Self {
            wood,
            sheep,
            wheat,
            brick,
            ore,
        }
    }

    /// Total number of resource cards
    pub fn total(&self) -> u32 {
        self.wood + self.sheep + self.wheat + self.brick + self.ore
    }

    /// Check if hand is empty
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Get count of a specific resource
    pub fn get(&self, resource: Resource) -> u32 {
        match resource {
            Resource::Wood => self.wood,
            Resource::Sheep => self.sheep,
            Resource::Wheat => self.wheat,
            Resource::Brick => self.brick,
            Resource::Ore => self.ore,
        }
    }

    /// Add resources to hand
    pub fn add(&mut self, resource: Resource, amount: u32) {
        match resource {
            Resource::Wood => self.wood += amount,
            Resource::Sheep => self.sheep += amount,
            Resource::Wheat => self.wheat += amount,
            Resource::Brick => self.brick += amount,
            Resource::Ore => self.ore += amount,
        }
    }

    /// Iterate over every producing resource with its count, in display order
    pub fn iter(&self) -> impl Iterator<Item = (Resource, u32)> + '_ {
        Resource::ALL.into_iter().map(move |r| (r, self.get(r)))
    }
}

impl fmt::Display for ResourceHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(resource, count)| format!("{}:{}", resource.label(), count))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

/// A single player's state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Registration index
    pub id: PlayerId,
    /// Display name
    pub name: String,
    /// Color of this player's buildings and roads
    pub color: PlayerColor,
    /// Current resources
    pub resources: ResourceHand,
}

impl Player {
    /// Create a new player
    pub fn new(id: PlayerId, name: String, color: PlayerColor) -> Self {
        Self {
            id,
            name,
            color,
            resources: ResourceHand::new(),
        }
    }

    /// Credit resources produced for this player
    pub fn add_resource(&mut self, resource: Resource, amount: u32) {
        self.resources.add(resource, amount);
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&HandSummary::new(&self.name, &self.resources), f)
    }
}

/// The `Player(<name>) - WOOD:n, ...` tally line, for a live player or a
/// hand recorded earlier
#[derive(Debug, Clone, Copy)]
pub struct HandSummary<'a> {
    name: &'a str,
    resources: &'a ResourceHand,
}

impl<'a> HandSummary<'a> {
    pub fn new(name: &'a str, resources: &'a ResourceHand) -> Self {
        Self { name, resources }
    }
}

impl fmt::Display for HandSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player({}) - {}", self.name, self.resources)
    }
}
