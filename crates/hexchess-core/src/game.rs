//! Core game state machine.
//!
//! This module owns the authoritative [`GameState`]: the board, the side to
//! move, the legality-filtered move cache, and the check / checkmate /
//! stalemate status. Callers drive it through [`GameState::attempt_move`] and
//! read it through [`GameState::legal_moves`] and [`GameState::status`].

use crate::board::{Board, Piece, PlayerColor};
use crate::hex::HexCoord;
use crate::layout::Layout;
use crate::moves::{attacks, moves_for};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur when querying or mutating a game.
///
/// All of these are recoverable, caller-facing results; no operation leaves
/// the game partially mutated after returning one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("no board hex at ({}, {})", .0.q, .0.r)]
    InvalidLocation(HexCoord),

    #[error("no piece at ({}, {})", .0.q, .0.r)]
    NoPieceAtSource(HexCoord),

    #[error("piece does not belong to the side to move")]
    WrongTurn,

    #[error("destination is not a legal move for that piece")]
    IllegalMove,

    #[error("game is over")]
    GameOver,
}

/// Where the game stands.
///
/// `Check` means the named side's king is attacked but that side still has a
/// legal reply. `Checkmate` and `Stalemate` are terminal, and both are
/// evaluated only for the side about to move: a side that cannot move on a
/// turn that is not theirs means nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Normal play
    Ongoing,
    /// The named side is in check and must resolve it
    Check(PlayerColor),
    /// The side to move is in check with no legal reply
    Checkmate { winner: PlayerColor },
    /// The side to move has no legal reply but is not in check
    Stalemate,
}

/// Snapshot of turn and check state for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    pub current_player: PlayerColor,
    pub player_in_check: Option<PlayerColor>,
    pub checkmate: bool,
    pub stalemate: bool,
}

/// The complete game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// The game board
    board: Board,
    /// Side to move
    current_player: PlayerColor,
    /// Side whose king is currently attacked, if any
    player_in_check: Option<PlayerColor>,
    /// Current phase of the state machine
    phase: GamePhase,
    /// Legal destinations per occupied hex. Recomputed wholesale after every
    /// applied move; this cache, not live recomputation, is what move
    /// validation consults.
    valid_moves: HashMap<HexCoord, Vec<HexCoord>>,
}

impl GameState {
    /// Create a game from an opening layout.
    ///
    /// Errors with `InvalidLocation` if any placement is off the board.
    /// Later placements on the same hex overwrite earlier ones, matching the
    /// setup semantics of [`Board::place`].
    pub fn new(layout: &Layout) -> Result<Self, GameError> {
        let mut board = Board::new();
        for placement in &layout.placements {
            board.place(placement.at, Piece::new(placement.kind, placement.color))?;
        }

        let mut state = Self {
            board,
            current_player: layout.first_player,
            player_in_check: None,
            phase: GamePhase::Ongoing,
            valid_moves: HashMap::new(),
        };
        state.recompute();
        Ok(state)
    }

    /// Create a game from the standard opening
    pub fn standard() -> Self {
        // The standard layout places every piece on a board hex
        Self::new(&Layout::standard()).expect("standard layout is valid")
    }

    /// Read-only view of the board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move
    pub fn current_player(&self) -> PlayerColor {
        self.current_player
    }

    /// Current phase of the game state machine
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Whether no further moves are accepted
    pub fn is_over(&self) -> bool {
        matches!(
            self.phase,
            GamePhase::Checkmate { .. } | GamePhase::Stalemate
        )
    }

    /// Turn and check status, for the presentation layer
    pub fn status(&self) -> GameStatus {
        GameStatus {
            current_player: self.current_player,
            player_in_check: self.player_in_check,
            checkmate: matches!(self.phase, GamePhase::Checkmate { .. }),
            stalemate: matches!(self.phase, GamePhase::Stalemate),
        }
    }

    /// The piece standing on a hex, if any
    pub fn piece_at(&self, loc: HexCoord) -> Result<Option<Piece>, GameError> {
        Ok(self.board.piece_at(loc)?.copied())
    }

    /// All pieces of one side with their locations
    pub fn pieces(&self, color: PlayerColor) -> Vec<(HexCoord, Piece)> {
        self.board.pieces(color)
    }

    /// Every hex of the board, in deterministic order (91 entries)
    pub fn all_valid_hexes() -> Vec<HexCoord> {
        HexCoord::all().collect()
    }

    /// Legal destinations for the piece on `loc`.
    ///
    /// Empty when the hex is unoccupied or the piece has no legal move;
    /// `InvalidLocation` when the hex is off the board.
    pub fn legal_moves(&self, loc: HexCoord) -> Result<Vec<HexCoord>, GameError> {
        if !loc.is_valid() {
            return Err(GameError::InvalidLocation(loc));
        }
        Ok(self.valid_moves.get(&loc).cloned().unwrap_or_default())
    }

    /// Attempt to move the piece on `from` to `to`.
    ///
    /// On success returns the captured piece (if any), switches the turn,
    /// and recomputes the move cache and game status. On error the state is
    /// untouched.
    pub fn attempt_move(
        &mut self,
        from: HexCoord,
        to: HexCoord,
    ) -> Result<Option<Piece>, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if !from.is_valid() {
            return Err(GameError::InvalidLocation(from));
        }
        if !to.is_valid() {
            return Err(GameError::InvalidLocation(to));
        }

        let piece = *self
            .board
            .piece_at(from)?
            .ok_or(GameError::NoPieceAtSource(from))?;
        if piece.color != self.current_player {
            return Err(GameError::WrongTurn);
        }
        let is_cached_move = self
            .valid_moves
            .get(&from)
            .is_some_and(|moves| moves.contains(&to));
        if !is_cached_move {
            return Err(GameError::IllegalMove);
        }

        // Validation is complete; from here the transition is applied fully.
        // Capture removal is implicit: the occupant of `to` leaves the board
        // map, which is the per-side collection.
        let captured = self.board.move_piece(from, to)?;
        self.current_player = self.current_player.opponent();
        self.recompute();

        Ok(captured)
    }

    /// Recompute the legal move cache for every living piece of both sides,
    /// then re-derive check and terminal status for the side to move.
    fn recompute(&mut self) {
        self.valid_moves.clear();

        for color in [PlayerColor::White, PlayerColor::Black] {
            for (loc, piece) in self.board.pieces(color) {
                let legal = self.filter_self_check(loc, &piece);
                self.valid_moves.insert(loc, legal);
            }
        }

        // A side is in check when any surviving enemy move lands on its king
        self.player_in_check = None;
        for color in [PlayerColor::White, PlayerColor::Black] {
            if let Some(king) = self.board.king_location(color) {
                let attacked = self
                    .board
                    .pieces(color.opponent())
                    .iter()
                    .any(|(loc, _)| {
                        self.valid_moves
                            .get(loc)
                            .is_some_and(|moves| moves.contains(&king))
                    });
                if attacked {
                    self.player_in_check = Some(color);
                }
            }
        }

        let side_to_move = self.current_player;
        let has_legal_move = self
            .board
            .pieces(side_to_move)
            .iter()
            .any(|(loc, _)| {
                self.valid_moves
                    .get(loc)
                    .is_some_and(|moves| !moves.is_empty())
            });

        self.phase = if has_legal_move {
            match self.player_in_check {
                Some(side) => GamePhase::Check(side),
                None => GamePhase::Ongoing,
            }
        } else if self.player_in_check == Some(side_to_move) {
            GamePhase::Checkmate {
                winner: side_to_move.opponent(),
            }
        } else {
            GamePhase::Stalemate
        };
    }

    /// Keep only the pseudo-legal moves of the piece on `loc` that do not
    /// leave its own king attacked, by applying each candidate, scanning the
    /// enemy's replies, and undoing.
    fn filter_self_check(&mut self, loc: HexCoord, piece: &Piece) -> Vec<HexCoord> {
        let pseudo = moves_for(&self.board, loc, piece);
        let mut legal = Vec::with_capacity(pseudo.len());

        for to in pseudo {
            let Some(record) = self.board.record_move(loc, to) else {
                continue;
            };
            self.board.apply(&record);
            // The king may itself be the mover, so locate it after applying
            let safe = match self.board.king_location(piece.color) {
                Some(king) => !attacks(&self.board, king, piece.color.opponent()),
                None => true,
            };
            self.board.undo(&record);
            if safe {
                legal.push(to);
            }
        }

        legal
    }

    /// Convert to a JSON-friendly representation with a cell array instead
    /// of a coordinate-keyed map. This is needed because JSON doesn't
    /// support complex types as keys.
    pub fn to_json_friendly(&self) -> GameStateJson {
        let mut cells: Vec<CellJson> = Vec::with_capacity(self.board.piece_count());
        self.board.for_each(|hex, occupant| {
            if let Some(piece) = occupant {
                cells.push(CellJson {
                    q: hex.q,
                    r: hex.r,
                    kind: piece.kind,
                    color: piece.color,
                    has_moved: piece.has_moved,
                });
            }
        });

        GameStateJson {
            cells,
            current_player: self.current_player,
            player_in_check: self.player_in_check,
            checkmate: matches!(self.phase, GamePhase::Checkmate { .. }),
            stalemate: matches!(self.phase, GamePhase::Stalemate),
        }
    }
}

/// JSON-friendly game snapshot with an array of occupied cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStateJson {
    pub cells: Vec<CellJson>,
    pub current_player: PlayerColor,
    pub player_in_check: Option<PlayerColor>,
    pub checkmate: bool,
    pub stalemate: bool,
}

/// One occupied cell in a [`GameStateJson`] snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellJson {
    pub q: i32,
    pub r: i32,
    pub kind: crate::board::PieceKind,
    pub color: PlayerColor,
    pub has_moved: bool,
}
