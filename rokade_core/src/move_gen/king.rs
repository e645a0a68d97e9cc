//! King generation, including castling (spec.md §4.7).
//!
//! Unlike every other piece, the king's legality test is not the shared
//! pin/check filter — it consults the *opposing* side's protected-squares
//! cache directly, since a king can never walk into check regardless of
//! whether the destination square happens to lie on some sliding piece's
//! path.

use crate::board::{Board, CastlingRights, Color, Move, Piece, PieceKind, Square};

use super::{mark_protected, MoveVec};

const KING_DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub(crate) fn generate(board: &mut Board, side: Color, from: Square, moves: &mut MoveVec) {
    let piece = Piece::new(side, PieceKind::King);
    let enemy = side.flip();

    for &(d_row, d_file) in &KING_DIRECTIONS {
        let Some(to) = from.try_offset(d_row, d_file) else {
            continue;
        };

        mark_protected(&mut board.protecting[side.index()], to);

        match board.squares[to.index()] {
            Some(occupant) if occupant.color() == side => continue,
            occupant => {
                if !board.protecting[enemy.index()].contains(to) {
                    let mut mv = Move::new_quiet(piece, from, to);
                    mv.captured = occupant;
                    let _ = moves.try_push(mv);
                }
            }
        }
    }

    generate_castling(board, side, from, moves);
}

fn generate_castling(board: &mut Board, side: Color, from: Square, moves: &mut MoveVec) {
    let home_row = side.home_row();
    if from != Square::new_unchecked(home_row, 4) {
        return;
    }

    if !board.check_paths(side).is_empty() {
        return;
    }

    let enemy = side.flip();

    let (kingside_right, queenside_right) = if side.is_white() {
        (CastlingRights::WHITE_KINGSIDE, CastlingRights::WHITE_QUEENSIDE)
    } else {
        (CastlingRights::BLACK_KINGSIDE, CastlingRights::BLACK_QUEENSIDE)
    };

    if board.castling_rights.contains(kingside_right) {
        let f = Square::new_unchecked(home_row, 5);
        let g = Square::new_unchecked(home_row, 6);
        let h = Square::new_unchecked(home_row, 7);

        let path_empty = board.squares[f.index()].is_none() && board.squares[g.index()].is_none();
        let path_safe = !board.protecting[enemy.index()].contains(f)
            && !board.protecting[enemy.index()].contains(g);

        let rook_present = board.squares[h.index()].map(|p| p.kind()) == Some(PieceKind::Rook);
        if path_empty && path_safe && rook_present {
            let piece = Piece::new(side, PieceKind::King);
            let mut mv = Move::new_quiet(piece, from, g);
            mv.castled_rook_from = Some(h);
            let _ = moves.try_push(mv);
        }
    }

    if board.castling_rights.contains(queenside_right) {
        let d = Square::new_unchecked(home_row, 3);
        let c = Square::new_unchecked(home_row, 2);
        let b = Square::new_unchecked(home_row, 1);
        let a = Square::new_unchecked(home_row, 0);

        let path_empty = board.squares[d.index()].is_none()
            && board.squares[c.index()].is_none()
            && board.squares[b.index()].is_none();
        let path_safe = !board.protecting[enemy.index()].contains(d)
            && !board.protecting[enemy.index()].contains(c);

        let rook_present = board.squares[a.index()].map(|p| p.kind()) == Some(PieceKind::Rook);
        if path_empty && path_safe && rook_present {
            let piece = Piece::new(side, PieceKind::King);
            let mut mv = Move::new_quiet(piece, from, c);
            mv.castled_rook_from = Some(a);
            let _ = moves.try_push(mv);
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::board::{Board, Color, Square};

    #[test]
    fn king_in_open_center_has_eight_moves() {
        let board = Board::new("8/8/8/8/3K4/8/8/7k w - - 0 1").unwrap();
        let king_moves: Vec<_> = board
            .legal_moves(Color::White)
            .iter()
            .filter(|m| m.from == Square::D4)
            .collect();
        assert_eq!(king_moves.len(), 8);
    }

    #[test]
    fn king_cannot_step_into_check() {
        let board = Board::new("4r3/8/8/8/8/8/8/4K2k w - - 0 1").unwrap();
        let king_moves: Vec<_> = board
            .legal_moves(Color::White)
            .iter()
            .filter(|m| m.from == Square::E1 && m.to.file() == 4)
            .collect();
        assert!(king_moves.is_empty());
    }

    #[test]
    fn kingside_castle_available_with_clear_path() {
        let board = Board::new("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let has_castle = board
            .legal_moves(Color::White)
            .iter()
            .any(|m| m.is_castle() && m.to == Square::G1);
        assert!(has_castle);
    }

    #[test]
    fn castling_through_check_is_illegal() {
        // Black rook on f8 attacks f1, which the king must pass through.
        let board = Board::new("5r1k/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let has_castle = board
            .legal_moves(Color::White)
            .iter()
            .any(|m| m.is_castle());
        assert!(!has_castle);
    }

    #[test]
    fn king_off_home_square_cannot_castle_even_with_rights_set() {
        // Castling rights are stale/malformed here (king isn't on e1), which
        // the descriptor parser doesn't cross-validate. The king must not
        // be offered a castling move regardless.
        let board = Board::new("4k3/8/8/8/8/8/4K3/7R w K - 0 1").unwrap();
        let has_castle = board
            .legal_moves(Color::White)
            .iter()
            .any(|m| m.is_castle());
        assert!(!has_castle);
    }
}
