//! Pseudo-legal move generation, per piece type.
//!
//! Everything here is a pure function of the board and a start hex: moves
//! consistent with a piece's movement pattern and occupancy rules, ignoring
//! whether the mover's own king would be left in check. The legality filter
//! in [`crate::game`] prunes that afterwards.

use crate::board::{Board, Piece, PieceKind, PlayerColor};
use crate::game::GameError;
use crate::hex::{HexCoord, HexVec, DIAGONAL_DIRECTIONS, KNIGHT_OFFSETS, NEIGHBOR_DIRECTIONS};

/// Pseudo-legal destinations for the piece standing on `start`.
///
/// Errors with `InvalidLocation` for an off-board hex and `NoPieceAtSource`
/// for an empty one.
pub fn pseudo_legal_moves(board: &Board, start: HexCoord) -> Result<Vec<HexCoord>, GameError> {
    let piece = *board
        .piece_at(start)?
        .ok_or(GameError::NoPieceAtSource(start))?;
    Ok(moves_for(board, start, &piece))
}

/// Whether any piece of color `by` has a pseudo-legal move landing on
/// `target`.
pub fn attacks(board: &Board, target: HexCoord, by: PlayerColor) -> bool {
    board
        .pieces(by)
        .iter()
        .any(|(loc, piece)| moves_for(board, *loc, piece).contains(&target))
}

/// Pseudo-legal destinations for a known piece at `start`
pub(crate) fn moves_for(board: &Board, start: HexCoord, piece: &Piece) -> Vec<HexCoord> {
    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, start, piece),
        PieceKind::Rook => sliding_moves(board, start, piece.color, &NEIGHBOR_DIRECTIONS),
        PieceKind::Bishop => sliding_moves(board, start, piece.color, &DIAGONAL_DIRECTIONS),
        PieceKind::Queen => {
            let mut moves = sliding_moves(board, start, piece.color, &NEIGHBOR_DIRECTIONS);
            moves.extend(sliding_moves(board, start, piece.color, &DIAGONAL_DIRECTIONS));
            moves
        }
        PieceKind::Knight => stepping_moves(board, start, piece.color, &KNIGHT_OFFSETS),
        PieceKind::King => {
            let mut moves = stepping_moves(board, start, piece.color, &NEIGHBOR_DIRECTIONS);
            moves.extend(stepping_moves(board, start, piece.color, &DIAGONAL_DIRECTIONS));
            moves
        }
    }
}

/// Union of unbounded rays over a direction set
fn sliding_moves(
    board: &Board,
    start: HexCoord,
    mover: PlayerColor,
    directions: &[HexVec],
) -> Vec<HexCoord> {
    let mut moves = Vec::new();
    for &dir in directions {
        moves.extend(board.line(start, dir, None, mover));
    }
    moves
}

/// Single-step offsets, kept when on the board and not self-occupied.
/// Intervening occupancy is ignored, so this also covers knight jumps.
fn stepping_moves(
    board: &Board,
    start: HexCoord,
    mover: PlayerColor,
    offsets: &[HexVec],
) -> Vec<HexCoord> {
    offsets
        .iter()
        .map(|&offset| start.offset(offset))
        .filter(|&target| {
            target.is_valid()
                && board
                    .piece_at(target)
                    .is_ok_and(|occupant| occupant.is_none_or(|p| p.color != mover))
        })
        .collect()
}

/// Pawn moves: a forward advance of one step (two before the pawn has moved)
/// onto empty hexes only, plus the two forward-diagonal hexes when they hold
/// an enemy piece. Pawns never capture straight ahead.
fn pawn_moves(board: &Board, start: HexCoord, piece: &Piece) -> Vec<HexCoord> {
    let limit = if piece.has_moved { 1 } else { 2 };
    let mut moves: Vec<HexCoord> = board
        .line(start, piece.color.pawn_forward(), Some(limit), piece.color)
        .into_iter()
        .filter(|&hex| board.is_empty(hex))
        .collect();

    for dir in piece.color.pawn_captures() {
        let target = start.offset(dir);
        if !target.is_valid() {
            continue;
        }
        if let Ok(Some(occupant)) = board.piece_at(target) {
            if occupant.color != piece.color {
                moves.push(target);
            }
        }
    }

    moves
}
