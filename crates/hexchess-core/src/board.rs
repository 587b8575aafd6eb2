//! Board representation: piece storage, occupancy queries, and ray casting.
//!
//! This module contains:
//! - Piece types and the two player colors
//! - The `Board` grid of 91 hexes, keyed by axial coordinate
//! - Line-of-sight ray casting for sliding pieces and pawn advances
//! - `MoveRecord`, the reversible move primitive used to simulate moves
//!   during legality filtering

use crate::game::GameError;
use crate::hex::{HexCoord, HexVec};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The two sides of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerColor {
    White,
    Black,
}

impl PlayerColor {
    /// The other side
    pub const fn opponent(&self) -> PlayerColor {
        match self {
            PlayerColor::White => PlayerColor::Black,
            PlayerColor::Black => PlayerColor::White,
        }
    }

    /// The direction this side's pawns advance in.
    ///
    /// White sits on the positive-r half of the board and pushes toward
    /// negative r; Black is mirrored.
    pub const fn pawn_forward(&self) -> HexVec {
        match self {
            PlayerColor::White => HexVec::new(0, -1),
            PlayerColor::Black => HexVec::new(0, 1),
        }
    }

    /// The two forward-diagonal capture directions for this side's pawns,
    /// flanking [`pawn_forward`](Self::pawn_forward).
    pub const fn pawn_captures(&self) -> [HexVec; 2] {
        match self {
            PlayerColor::White => [HexVec::new(1, -2), HexVec::new(-1, -1)],
            PlayerColor::Black => [HexVec::new(-1, 2), HexVec::new(1, 1)],
        }
    }
}

/// The six piece types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

/// A piece on the board.
///
/// A piece's location is the board key it is stored under, so the
/// piece/location pairing cannot drift out of sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: PlayerColor,
    /// Set once the piece has moved; a pawn with `has_moved` loses its
    /// double-step. Never cleared, even if a piece later returns to its
    /// starting hex.
    pub has_moved: bool,
}

impl Piece {
    /// Create a piece that has not moved yet
    pub const fn new(kind: PieceKind, color: PlayerColor) -> Self {
        Self {
            kind,
            color,
            has_moved: false,
        }
    }
}

/// A reversible record of a single move: applying and undoing it are exact
/// inverses, including the captured piece and the mover's prior
/// `has_moved` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: HexCoord,
    pub to: HexCoord,
    pub captured: Option<Piece>,
    pub prev_has_moved: bool,
}

/// The 91-hex game board.
///
/// Only occupied cells are stored; coordinate validity is a property of
/// [`HexCoord`] and is checked at every public entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Board {
    cells: HashMap<HexCoord, Piece>,
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self {
            cells: HashMap::new(),
        }
    }

    /// Get the occupant of a hex, or `None` if it is empty.
    ///
    /// Errors with `InvalidLocation` for coordinates off the board.
    pub fn piece_at(&self, loc: HexCoord) -> Result<Option<&Piece>, GameError> {
        if !loc.is_valid() {
            return Err(GameError::InvalidLocation(loc));
        }
        Ok(self.cells.get(&loc))
    }

    /// Whether a hex is on the board and unoccupied
    pub fn is_empty(&self, loc: HexCoord) -> bool {
        loc.is_valid() && !self.cells.contains_key(&loc)
    }

    /// Put a piece on a hex, overwriting any prior occupant.
    ///
    /// This is the setup path, not the move path: an overwritten occupant is
    /// dropped without being reported as a capture.
    pub fn place(&mut self, loc: HexCoord, piece: Piece) -> Result<(), GameError> {
        if !loc.is_valid() {
            return Err(GameError::InvalidLocation(loc));
        }
        self.cells.insert(loc, piece);
        Ok(())
    }

    /// Move the occupant of `from` to `to`, returning the captured occupant
    /// of `to`, if any. Marks the mover as having moved.
    pub fn move_piece(&mut self, from: HexCoord, to: HexCoord) -> Result<Option<Piece>, GameError> {
        if !from.is_valid() {
            return Err(GameError::InvalidLocation(from));
        }
        if !to.is_valid() {
            return Err(GameError::InvalidLocation(to));
        }
        let mut piece = self
            .cells
            .remove(&from)
            .ok_or(GameError::NoPieceAtSource(from))?;
        piece.has_moved = true;
        Ok(self.cells.insert(to, piece))
    }

    /// Build the reversible record for moving the occupant of `from` to
    /// `to`. Returns `None` if `from` is empty.
    pub fn record_move(&self, from: HexCoord, to: HexCoord) -> Option<MoveRecord> {
        let piece = self.cells.get(&from)?;
        Some(MoveRecord {
            from,
            to,
            captured: self.cells.get(&to).copied(),
            prev_has_moved: piece.has_moved,
        })
    }

    /// Apply a move record built by [`record_move`](Self::record_move)
    pub fn apply(&mut self, record: &MoveRecord) {
        if let Some(mut piece) = self.cells.remove(&record.from) {
            piece.has_moved = true;
            self.cells.insert(record.to, piece);
        }
    }

    /// Undo a previously applied move record, restoring the mover's
    /// `has_moved` flag and the captured piece
    pub fn undo(&mut self, record: &MoveRecord) {
        if let Some(mut piece) = self.cells.remove(&record.to) {
            piece.has_moved = record.prev_has_moved;
            self.cells.insert(record.from, piece);
        }
        if let Some(captured) = record.captured {
            self.cells.insert(record.to, captured);
        }
    }

    /// Visit every valid hex and its occupant (if any), in the deterministic
    /// board order
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(HexCoord, Option<&Piece>),
    {
        for hex in HexCoord::all() {
            f(hex, self.cells.get(&hex));
        }
    }

    /// All pieces of one side with their locations, sorted by coordinate so
    /// the order is stable
    pub fn pieces(&self, color: PlayerColor) -> Vec<(HexCoord, Piece)> {
        let mut pieces: Vec<(HexCoord, Piece)> = self
            .cells
            .iter()
            .filter(|(_, piece)| piece.color == color)
            .map(|(loc, piece)| (*loc, *piece))
            .collect();
        pieces.sort_by_key(|(loc, _)| *loc);
        pieces
    }

    /// Total number of pieces on the board
    pub fn piece_count(&self) -> usize {
        self.cells.len()
    }

    /// Find the hex occupied by a side's king, if it has one
    pub fn king_location(&self, color: PlayerColor) -> Option<HexCoord> {
        self.cells
            .iter()
            .find(|(_, piece)| piece.color == color && piece.kind == PieceKind::King)
            .map(|(loc, _)| *loc)
    }

    /// Cast a ray from `start` stepping by `dir`, for the given mover.
    ///
    /// The walk stops before an invalid hex, stops before (and excludes) a
    /// hex held by the mover's own color, and stops immediately after
    /// including an enemy-held hex (the capture square). `limit` caps the
    /// number of steps; `None` walks until blocked.
    pub fn line(
        &self,
        start: HexCoord,
        dir: HexVec,
        limit: Option<usize>,
        mover: PlayerColor,
    ) -> Vec<HexCoord> {
        let mut ray = Vec::new();
        let mut current = start;

        loop {
            if let Some(limit) = limit {
                if ray.len() >= limit {
                    break;
                }
            }
            current = current.offset(dir);
            if !current.is_valid() {
                break;
            }
            match self.cells.get(&current) {
                Some(piece) if piece.color == mover => break,
                Some(_) => {
                    ray.push(current);
                    break;
                }
                None => ray.push(current),
            }
        }

        ray
    }
}
