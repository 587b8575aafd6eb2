//! Hexchess - rules engine for chess on a hexagonal board
//!
//! This crate provides the core game logic for hexagonal chess, including:
//! - Axial hex coordinate system for the radius-5 board (91 hexes)
//! - Board representation with ray casting for sliding pieces
//! - Per-piece-type move generation and the self-check legality filter
//! - Game state machine with check, checkmate and stalemate detection
//!
//! # Architecture
//!
//! The engine is a pure in-memory library with no I/O: a presentation layer
//! converts clicks into [`HexCoord`]s, asks [`GameState`] for legal moves
//! and status, and submits moves through [`GameState::attempt_move`]. All
//! failures are recoverable [`GameError`] results and never leave the state
//! partially mutated.
//!
//! # Modules
//!
//! - [`hex`]: Coordinate system, board validity and direction tables
//! - [`board`]: Piece storage, occupancy queries and ray casting
//! - [`moves`]: Pseudo-legal move generation per piece type
//! - [`game`]: Legality filtering and the game state machine
//! - [`layout`]: Opening positions as data

pub mod board;
pub mod game;
pub mod hex;
pub mod layout;
pub mod moves;

// Re-export commonly used types
pub use board::{Board, MoveRecord, Piece, PieceKind, PlayerColor};
pub use game::{CellJson, GameError, GamePhase, GameState, GameStateJson, GameStatus};
pub use hex::{HexCoord, HexShade, HexVec, BOARD_RADIUS, HEX_COUNT};
pub use layout::{Layout, Placement};
pub use moves::{attacks, pseudo_legal_moves};
