//! Integration tests for the hexchess rules engine.
//!
//! These tests drive complete flows through the public API: opening play,
//! captures, check and its resolution, checkmate and stalemate endings.

use hexchess_core::*;
use pretty_assertions::assert_eq;

/// Build a layout from (color, kind, q, r) tuples
fn layout(first_player: PlayerColor, pieces: &[(PlayerColor, PieceKind, i32, i32)]) -> Layout {
    Layout {
        placements: pieces
            .iter()
            .map(|&(color, kind, q, r)| Placement {
                color,
                kind,
                at: HexCoord::new(q, r),
            })
            .collect(),
        first_player,
    }
}

#[test]
fn test_board_enumeration_is_complete_and_deterministic() {
    let hexes = GameState::all_valid_hexes();
    assert_eq!(hexes.len(), HEX_COUNT);
    assert_eq!(hexes, GameState::all_valid_hexes());

    for hex in &hexes {
        assert!(hex.is_valid());
    }
}

#[test]
fn test_standard_opening_flow_with_a_capture() {
    let mut game = GameState::standard();

    let status = game.status();
    assert_eq!(status.current_player, PlayerColor::White);
    assert_eq!(status.player_in_check, None);
    assert!(!status.checkmate);
    assert!(!status.stalemate);

    // Every white pawn can move out of the gate
    for (loc, piece) in game.pieces(PlayerColor::White) {
        if piece.kind == PieceKind::Pawn {
            assert!(
                !game.legal_moves(loc).unwrap().is_empty(),
                "pawn at {:?} is stuck",
                loc
            );
        }
    }

    // 1. White advances the central pawn one step
    let captured = game
        .attempt_move(HexCoord::new(0, 1), HexCoord::new(0, 0))
        .unwrap();
    assert_eq!(captured, None);
    assert_eq!(game.current_player(), PlayerColor::Black);

    // The advanced pawn now faces the black pawn wedge: its forward hex is
    // occupied, leaving only the two diagonal captures
    let pawn = game.piece_at(HexCoord::new(0, 0)).unwrap().unwrap();
    assert!(pawn.has_moved);
    let pawn_moves = game.legal_moves(HexCoord::new(0, 0)).unwrap();
    assert!(!pawn_moves.contains(&HexCoord::new(0, -1)));
    assert!(pawn_moves.contains(&HexCoord::new(1, -2)));
    assert!(pawn_moves.contains(&HexCoord::new(-1, -1)));

    // 2. Black develops a flank pawn
    game.attempt_move(HexCoord::new(1, -2), HexCoord::new(1, -1))
        .unwrap();

    // 3. White's advanced pawn takes the black pawn on its forward diagonal
    let captured = game
        .attempt_move(HexCoord::new(0, 0), HexCoord::new(-1, -1))
        .unwrap();
    assert_eq!(
        captured,
        Some(Piece {
            kind: PieceKind::Pawn,
            color: PlayerColor::Black,
            has_moved: false,
        })
    );
    assert_eq!(game.pieces(PlayerColor::Black).len(), 17);
    assert_eq!(game.pieces(PlayerColor::White).len(), 18);
}

#[test]
fn test_turn_order_is_enforced_throughout() {
    let mut game = GameState::standard();

    game.attempt_move(HexCoord::new(2, 1), HexCoord::new(2, 0))
        .unwrap();

    // White may not move twice in a row
    assert_eq!(
        game.attempt_move(HexCoord::new(3, 1), HexCoord::new(3, 0)),
        Err(GameError::WrongTurn)
    );

    // Black plays, then it is White's turn again
    game.attempt_move(HexCoord::new(-2, -1), HexCoord::new(-2, 0))
        .unwrap();
    game.attempt_move(HexCoord::new(3, 1), HexCoord::new(3, 0))
        .unwrap();
    assert_eq!(game.current_player(), PlayerColor::Black);
}

#[test]
fn test_check_must_be_resolved_and_clears() {
    let mut game = GameState::new(&layout(
        PlayerColor::Black,
        &[
            (PlayerColor::Black, PieceKind::King, 0, 0),
            (PlayerColor::White, PieceKind::Rook, 0, 5),
            (PlayerColor::White, PieceKind::King, 5, -5),
        ],
    ))
    .unwrap();

    assert_eq!(game.status().player_in_check, Some(PlayerColor::Black));
    assert_eq!(game.phase(), GamePhase::Check(PlayerColor::Black));

    // Staying on the attacked file is not offered, stepping off it is
    let king_moves = game.legal_moves(HexCoord::new(0, 0)).unwrap();
    assert!(king_moves.contains(&HexCoord::new(1, -1)));
    assert_eq!(
        game.attempt_move(HexCoord::new(0, 0), HexCoord::new(0, -1)),
        Err(GameError::IllegalMove)
    );

    game.attempt_move(HexCoord::new(0, 0), HexCoord::new(1, -1))
        .unwrap();
    let status = game.status();
    assert_eq!(status.player_in_check, None);
    assert_eq!(status.current_player, PlayerColor::White);
    assert_eq!(game.phase(), GamePhase::Ongoing);
}

#[test]
fn test_errors_leave_the_game_unchanged() {
    let mut game = GameState::standard();
    let snapshot = game.clone();

    let rejected = [
        game.attempt_move(HexCoord::new(0, 0), HexCoord::new(0, -1)),
        game.attempt_move(HexCoord::new(0, -1), HexCoord::new(0, 0)),
        game.attempt_move(HexCoord::new(0, 1), HexCoord::new(5, -5)),
        game.attempt_move(HexCoord::new(7, 0), HexCoord::new(0, 0)),
    ];
    for result in rejected {
        assert!(result.is_err());
    }

    assert_eq!(game, snapshot);
    assert_eq!(game.to_json_friendly(), snapshot.to_json_friendly());
}

#[test]
fn test_checkmate_ends_the_game_for_both_sides() {
    let mut game = GameState::new(&layout(
        PlayerColor::White,
        &[
            (PlayerColor::Black, PieceKind::King, 0, -5),
            (PlayerColor::White, PieceKind::Rook, 1, 4),
            (PlayerColor::White, PieceKind::Rook, -1, 5),
            (PlayerColor::White, PieceKind::Rook, 4, 1),
            (PlayerColor::White, PieceKind::King, 4, 0),
        ],
    ))
    .unwrap();

    game.attempt_move(HexCoord::new(4, 1), HexCoord::new(0, 1))
        .unwrap();

    assert_eq!(
        game.phase(),
        GamePhase::Checkmate {
            winner: PlayerColor::White
        }
    );
    assert!(game.is_over());
    assert!(game.status().checkmate);

    // The mated side has no cached legal moves left
    for (loc, _) in game.pieces(PlayerColor::Black) {
        assert_eq!(game.legal_moves(loc).unwrap(), vec![]);
    }

    // No further input is accepted, whoever asks
    assert_eq!(
        game.attempt_move(HexCoord::new(0, 1), HexCoord::new(1, 1)),
        Err(GameError::GameOver)
    );
    assert_eq!(
        game.attempt_move(HexCoord::new(0, -5), HexCoord::new(1, -5)),
        Err(GameError::GameOver)
    );
}

#[test]
fn test_a_quiet_move_can_deliver_stalemate() {
    // White's pieces already fence in the cornered black king; the waiting
    // king move hands Black a turn with nothing to play
    let mut game = GameState::new(&layout(
        PlayerColor::White,
        &[
            (PlayerColor::Black, PieceKind::King, 0, -5),
            (PlayerColor::White, PieceKind::Queen, 2, -4),
            (PlayerColor::White, PieceKind::Rook, -1, 5),
            (PlayerColor::White, PieceKind::King, 5, 0),
        ],
    ))
    .unwrap();

    assert_eq!(game.phase(), GamePhase::Ongoing);

    game.attempt_move(HexCoord::new(5, 0), HexCoord::new(4, 0))
        .unwrap();

    let status = game.status();
    assert!(status.stalemate);
    assert!(!status.checkmate);
    assert_eq!(status.player_in_check, None);
    assert!(game.is_over());
    assert_eq!(
        game.attempt_move(HexCoord::new(4, 0), HexCoord::new(5, 0)),
        Err(GameError::GameOver)
    );
}

#[test]
fn test_presentation_views_over_a_live_game() {
    let mut game = GameState::standard();

    // pieceAt distinguishes empty, white and black hexes
    assert_eq!(game.piece_at(HexCoord::new(0, 0)).unwrap(), None);
    assert_eq!(
        game.piece_at(HexCoord::new(1, 4)).unwrap().map(|p| p.kind),
        Some(PieceKind::King)
    );
    assert!(game.piece_at(HexCoord::new(6, 6)).is_err());

    game.attempt_move(HexCoord::new(4, 1), HexCoord::new(4, 0))
        .unwrap();

    let snapshot = game.to_json_friendly();
    assert_eq!(snapshot.cells.len(), 36);
    assert_eq!(snapshot.current_player, PlayerColor::Black);
    assert!(snapshot
        .cells
        .iter()
        .any(|c| c.q == 4 && c.r == 0 && c.has_moved));
}
