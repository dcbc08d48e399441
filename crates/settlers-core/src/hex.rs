//! Pixel-space hex geometry.
//!
//! This module provides the foundational geometry for the board:
//! - `Point`: a position in the host's 2D coordinate space
//! - `BoardLayout`: the fixed coordinate space, hex radius and distance thresholds
//! - Ring layout of the 19 tile centers and the six corners of each tile
//!
//! Tiles are placed by polar offsets from the middle of the coordinate space
//! rather than on an integer lattice, so shared corners are found by proximity
//! (see [`crate::board::Board::find_or_create_node`]).

use serde::{Deserialize, Serialize};

/// Corner angles in degrees, relative to the tile center (pointy-top hexes)
pub const CORNER_ANGLES: [f64; 6] = [-30.0, 30.0, 90.0, 150.0, 210.0, 270.0];

/// Number of tiles produced by [`tile_centers`]: 1 center + 6 + 12
pub const TILE_COUNT: usize = 19;

/// A position in the host's coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// The point at `radius` from `center` in direction `degrees`
    /// (0° points east, angles grow clockwise because y grows downward)
    pub fn polar(center: Point, radius: f64, degrees: f64) -> Self {
        let rad = degrees.to_radians();
        Self::new(center.x + radius * rad.cos(), center.y + radius * rad.sin())
    }
}

/// Fixed dimensions shared by board generation and hit-testing.
///
/// The defaults describe an 800×600 window with 50-unit hexes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardLayout {
    /// Width of the coordinate space
    pub width: f64,
    /// Height of the coordinate space
    pub height: f64,
    /// Distance from a tile center to each of its corners
    pub hex_radius: f64,
    /// Corners closer than this are merged into one node
    pub merge_threshold: f64,
    /// Maximum distance between a placement request and the node it selects
    pub placement_threshold: f64,
    /// Ring 1 distance from the center, in hex radii
    pub inner_ring_factor: f64,
    /// Ring 2 distance at multiples of 60°, in hex radii
    pub outer_ring_corner_factor: f64,
    /// Ring 2 distance at the interleaved 30° offsets, in hex radii
    pub outer_ring_edge_factor: f64,
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            hex_radius: 50.0,
            merge_threshold: 10.0,
            placement_threshold: 20.0,
            inner_ring_factor: 1.75,
            outer_ring_corner_factor: 3.5,
            outer_ring_edge_factor: 3.0,
        }
    }
}

impl BoardLayout {
    /// Middle of the coordinate space, where the center tile sits
    pub fn center(&self) -> Point {
        // Integer midpoint
        Point::new((self.width / 2.0).floor(), (self.height / 2.0).floor())
    }
}

/// Centers of the 19 tiles in layout order.
///
/// - index 0: the center tile
/// - 1..=6: ring 1, every 60° starting at 0°
/// - 7..=18: ring 2, every 30° starting at 0°, alternating between the
///   corner radius (multiples of 60°) and the edge radius (30° offsets)
pub fn tile_centers(layout: &BoardLayout) -> Vec<Point> {
    let center = layout.center();
    let mut centers = Vec::with_capacity(TILE_COUNT);
    centers.push(center);

    let inner = layout.hex_radius * layout.inner_ring_factor;
    for i in 0..6 {
        centers.push(Point::polar(center, inner, 60.0 * i as f64));
    }

    for i in 0..12 {
        let factor = if i % 2 == 0 {
            layout.outer_ring_corner_factor
        } else {
            layout.outer_ring_edge_factor
        };
        centers.push(Point::polar(center, layout.hex_radius * factor, 30.0 * i as f64));
    }

    centers
}

/// The six corners of a hex, in [`CORNER_ANGLES`] order
pub fn hex_corners(center: Point, radius: f64) -> [Point; 6] {
    CORNER_ANGLES.map(|angle| Point::polar(center, radius, angle))
}
