//! Opening layouts.
//!
//! A [`Layout`] is plain data: the list of piece placements a game starts
//! from, plus the side that moves first. The standard opening lives here,
//! and test scenarios build their own layouts the same way.

use crate::board::{PieceKind, PlayerColor};
use crate::hex::HexCoord;
use serde::{Deserialize, Serialize};

/// One piece of an opening layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub color: PlayerColor,
    pub kind: PieceKind,
    pub at: HexCoord,
}

/// An opening position: placements plus the side to move first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub placements: Vec<Placement>,
    pub first_player: PlayerColor,
}

impl Layout {
    /// Create a layout with White to move first
    pub fn new(placements: Vec<Placement>) -> Self {
        Self {
            placements,
            first_player: PlayerColor::White,
        }
    }

    /// The standard opening: 9 pawns, 2 rooks, 2 knights, 3 bishops, a queen
    /// and a king per side, 36 pieces in all.
    ///
    /// White occupies the positive-r half and pushes toward negative r;
    /// Black's army is the same position rotated through the center. The
    /// pawns form a wedge with its apex on the central file, the bishops
    /// stack on the central file behind them.
    pub fn standard() -> Self {
        use PieceKind::*;

        let white_side: &[(PieceKind, i32, i32)] = &[
            (Pawn, -4, 5),
            (Pawn, -3, 4),
            (Pawn, -2, 3),
            (Pawn, -1, 2),
            (Pawn, 0, 1),
            (Pawn, 1, 1),
            (Pawn, 2, 1),
            (Pawn, 3, 1),
            (Pawn, 4, 1),
            (Rook, -3, 5),
            (Rook, 3, 2),
            (Knight, -2, 5),
            (Knight, 2, 3),
            (Bishop, 0, 5),
            (Bishop, 0, 4),
            (Bishop, 0, 3),
            (Queen, -1, 5),
            (King, 1, 4),
        ];

        let mut placements = Vec::with_capacity(white_side.len() * 2);
        for &(kind, q, r) in white_side {
            placements.push(Placement {
                color: PlayerColor::White,
                kind,
                at: HexCoord::new(q, r),
            });
            // Black mirrors White through the center hex
            placements.push(Placement {
                color: PlayerColor::Black,
                kind,
                at: HexCoord::new(-q, -r),
            });
        }

        Self::new(placements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_standard_layout_has_36_pieces_on_distinct_hexes() {
        let layout = Layout::standard();
        assert_eq!(layout.placements.len(), 36);

        let hexes: HashSet<HexCoord> = layout.placements.iter().map(|p| p.at).collect();
        assert_eq!(hexes.len(), 36);

        for placement in &layout.placements {
            assert!(placement.at.is_valid(), "off-board: {:?}", placement);
        }
    }

    #[test]
    fn test_standard_layout_piece_mix() {
        let layout = Layout::standard();

        for color in [PlayerColor::White, PlayerColor::Black] {
            let count = |kind: PieceKind| {
                layout
                    .placements
                    .iter()
                    .filter(|p| p.color == color && p.kind == kind)
                    .count()
            };
            assert_eq!(count(PieceKind::Pawn), 9);
            assert_eq!(count(PieceKind::Rook), 2);
            assert_eq!(count(PieceKind::Knight), 2);
            assert_eq!(count(PieceKind::Bishop), 3);
            assert_eq!(count(PieceKind::Queen), 1);
            assert_eq!(count(PieceKind::King), 1);
        }
    }

    #[test]
    fn test_standard_layout_is_mirrored_through_the_center() {
        let layout = Layout::standard();
        let black: HashSet<(PieceKind, HexCoord)> = layout
            .placements
            .iter()
            .filter(|p| p.color == PlayerColor::Black)
            .map(|p| (p.kind, p.at))
            .collect();

        for placement in layout
            .placements
            .iter()
            .filter(|p| p.color == PlayerColor::White)
        {
            let mirrored = HexCoord::new(-placement.at.q, -placement.at.r);
            assert!(black.contains(&(placement.kind, mirrored)));
        }
    }

    #[test]
    fn test_bishops_start_on_all_three_shades() {
        let layout = Layout::standard();
        for color in [PlayerColor::White, PlayerColor::Black] {
            let shades: HashSet<_> = layout
                .placements
                .iter()
                .filter(|p| p.color == color && p.kind == PieceKind::Bishop)
                .map(|p| p.at.shade())
                .collect();
            assert_eq!(shades.len(), 3);
        }
    }

    #[test]
    fn test_first_player_defaults_to_white() {
        assert_eq!(Layout::standard().first_player, PlayerColor::White);
    }
}
