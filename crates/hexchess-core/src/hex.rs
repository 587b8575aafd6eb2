//! Hex coordinate system using axial coordinates (q, r).
//!
//! This module provides the foundational geometry for the hexagonal chess
//! board:
//! - `HexCoord`: identifies individual hexes and knows whether it lies on the
//!   radius-5 board
//! - `HexVec`: a displacement between hexes, used for movement directions
//! - The fixed direction tables (orthogonal, diagonal, knight) that the move
//!   generator walks
//!
//! We use axial coordinates because they make neighbor calculations elegant
//! and avoid the wasted space of offset coordinates.

use serde::{Deserialize, Serialize};

/// Radius of the hexagonal board, in rings around the center hex.
///
/// A radius-5 hexagon has a side length of 6 and contains
/// 3·5² + 3·5 + 1 = 91 hexes.
pub const BOARD_RADIUS: i32 = 5;

/// Number of hexes on the board.
pub const HEX_COUNT: usize = 91;

/// Shade of a hex cell, as rendered by the presentation layer.
///
/// Three shades are needed so that no two adjacent hexes share one. The
/// pattern also partitions the diagonals: a bishop stays on its shade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HexShade {
    Black,
    Grey,
    White,
}

/// A displacement on the hex grid, in axial components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexVec {
    pub dq: i32,
    pub dr: i32,
}

impl HexVec {
    pub const fn new(dq: i32, dr: i32) -> Self {
        Self { dq, dr }
    }
}

/// The six orthogonal step directions, clockwise starting from East.
///
/// Rooks slide along these; kings step along them.
pub const NEIGHBOR_DIRECTIONS: [HexVec; 6] = [
    HexVec::new(1, 0),   // East
    HexVec::new(1, -1),  // NorthEast
    HexVec::new(0, -1),  // NorthWest
    HexVec::new(-1, 0),  // West
    HexVec::new(-1, 1),  // SouthWest
    HexVec::new(0, 1),   // SouthEast
];

/// The six diagonal step directions (the "two-step skip" set that passes
/// between two orthogonal neighbors), clockwise.
///
/// Bishops slide along these; kings step along them.
pub const DIAGONAL_DIRECTIONS: [HexVec; 6] = [
    HexVec::new(2, -1),
    HexVec::new(1, -2),
    HexVec::new(-1, -1),
    HexVec::new(-2, 1),
    HexVec::new(-1, 2),
    HexVec::new(1, 1),
];

/// The twelve knight jumps: every permutation of (±1, ±2, ∓3) in cube
/// coordinates, i.e. the cells at distance 3 that lie on neither an
/// orthogonal nor a diagonal line.
pub const KNIGHT_OFFSETS: [HexVec; 12] = [
    HexVec::new(1, -3),
    HexVec::new(2, -3),
    HexVec::new(3, -2),
    HexVec::new(3, -1),
    HexVec::new(2, 1),
    HexVec::new(1, 2),
    HexVec::new(-1, 3),
    HexVec::new(-2, 3),
    HexVec::new(-3, 2),
    HexVec::new(-3, 1),
    HexVec::new(-2, -1),
    HexVec::new(-1, -2),
];

/// Axial coordinate for the hex grid.
///
/// In axial coordinates:
/// - `q` increases going east (right)
/// - `r` increases going southeast
/// - The third coordinate `s` (not stored) satisfies: q + r + s = 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct HexCoord {
    /// Column (increases going east)
    pub q: i32,
    /// Row (increases going southeast)
    pub r: i32,
}

impl HexCoord {
    /// Create a new hex coordinate
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// The implicit third coordinate (s = -q - r)
    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Whether this coordinate lies on the radius-5 board.
    ///
    /// Uses the two-branch range test: for r in [0, N] the column is bounded
    /// to [-N, N-r]; for r in [-N, 0) it is bounded to [-(N+r), N].
    pub const fn is_valid(&self) -> bool {
        let n = BOARD_RADIUS;
        if self.r > n || self.r < -n {
            false
        } else if self.r >= 0 {
            self.q >= -n && self.q <= n - self.r
        } else {
            self.q >= -(n + self.r) && self.q <= n
        }
    }

    /// All 91 valid hexes, in a fixed deterministic order (columns west to
    /// east, each column top to bottom).
    pub fn all() -> impl Iterator<Item = HexCoord> {
        let n = BOARD_RADIUS;
        (-n..=n).flat_map(move |q| {
            let lo = (-n).max(-q - n);
            let hi = n.min(-q + n);
            (lo..=hi).map(move |r| HexCoord::new(q, r))
        })
    }

    /// Offset this coordinate by a displacement
    pub const fn offset(&self, v: HexVec) -> HexCoord {
        HexCoord::new(self.q + v.dq, self.r + v.dr)
    }

    /// The six neighboring hexes, clockwise starting from East
    pub fn neighbors(&self) -> [HexCoord; 6] {
        NEIGHBOR_DIRECTIONS.map(|d| self.offset(d))
    }

    /// Distance to another hex (in hex steps)
    pub fn distance_to(&self, other: &HexCoord) -> u32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.s() - other.s()).abs();
        ((dq + dr + ds) / 2) as u32
    }

    /// The shade of this cell under the three-coloring of the board.
    ///
    /// Grey where q - r ≡ 0 (mod 3), white where ≡ 1, black where ≡ 2.
    pub fn shade(&self) -> HexShade {
        match (self.q - self.r).rem_euclid(3) {
            0 => HexShade::Grey,
            1 => HexShade::White,
            _ => HexShade::Black,
        }
    }
}

impl std::ops::Add<HexVec> for HexCoord {
    type Output = HexCoord;

    fn add(self, v: HexVec) -> HexCoord {
        self.offset(v)
    }
}
