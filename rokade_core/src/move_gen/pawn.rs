//! Pawn generation: forward pushes, diagonal captures, en passant, and
//! promotion (spec.md §4.6).

use crate::board::{Board, Color, Move, Piece, PieceKind, Square};

use super::{mark_protected, passes_legality_filter, MoveVec};

const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

pub(crate) fn generate(board: &mut Board, side: Color, from: Square, moves: &mut MoveVec) {
    let piece = Piece::new(side, PieceKind::Pawn);
    let forward = side.forward_step();

    let one_step = from.offset(forward);
    let one_step_empty = board.squares[one_step.index()].is_none();

    if one_step_empty && passes_legality_filter(board, side, from, one_step, false) {
        add_pawn_moves(moves, piece, from, one_step, None);
    }

    if from.row() == side.pawn_start_row() && one_step_empty {
        let two_step = from.offset(forward * 2);
        if board.squares[two_step.index()].is_none()
            && passes_legality_filter(board, side, from, two_step, false)
        {
            add_pawn_moves(moves, piece, from, two_step, None);
        }
    }

    let row_delta: i8 = if side.is_white() { -1 } else { 1 };

    for &d_file in &[-1i8, 1] {
        let Some(to) = from.try_offset(row_delta, d_file) else {
            continue;
        };

        match board.squares[to.index()] {
            Some(occupant) if occupant.color() != side => {
                if passes_legality_filter(board, side, from, to, false) {
                    add_pawn_moves(moves, piece, from, to, Some(occupant));
                }
            }
            None if board.en_passant_target == Some(to) => {
                let safe = passes_legality_filter(board, side, from, to, true)
                    && safe_en_passant(board, side, from, to);
                if safe {
                    let victim_row = from.row();
                    let victim = Square::new_unchecked(victim_row, to.file());
                    let victim_piece = board.squares[victim.index()];
                    let mut mv = Move::new_quiet(piece, from, to);
                    mv.captured = victim_piece;
                    mv.is_en_passant = true;
                    let _ = moves.try_push(mv);
                }
                mark_protected(&mut board.protecting[side.index()], to);
            }
            None => {
                mark_protected(&mut board.protecting[side.index()], to);
            }
            Some(_) => {
                // Friendly piece diagonally ahead: not a legal capture, and
                // not marked protected either (a pawn never "defends" a
                // square via what would be a capture of its own side).
            }
        }
    }
}

fn add_pawn_moves(moves: &mut MoveVec, piece: Piece, from: Square, to: Square, captured: Option<Piece>) {
    let promotion_row = piece.color().promotion_row();
    if to.row() == promotion_row {
        for &kind in &PROMOTION_KINDS {
            let mut mv = Move::new_quiet(piece, from, to);
            mv.captured = captured;
            mv.promotion = Some(kind);
            let _ = moves.try_push(mv);
        }
    } else {
        let mut mv = Move::new_quiet(piece, from, to);
        mv.captured = captured;
        let _ = moves.try_push(mv);
    }
}

/// The en passant discovered-check safety check (spec.md §4.6.1).
fn safe_en_passant(board: &Board, side: Color, capturing_pawn: Square, ep_target: Square) -> bool {
    let king_square = board.king_square(side);
    if king_square.row() != capturing_pawn.row() {
        return true;
    }

    let victim = Square::new_unchecked(capturing_pawn.row(), ep_target.file());

    let away_file: i8 = if king_square.file() < capturing_pawn.file() {
        1
    } else {
        -1
    };

    let mut cur = capturing_pawn;
    loop {
        let Some(next) = cur.try_offset(0, away_file) else {
            return true;
        };
        cur = next;

        if cur == victim {
            continue;
        }

        match board.squares[cur.index()] {
            None => continue,
            Some(occupant) if occupant.color() == side => return true,
            Some(occupant) => {
                if occupant.kind() == PieceKind::Queen || occupant.kind() == PieceKind::Rook {
                    return scan_toward_king(board, side, capturing_pawn, victim, king_square, -away_file);
                }
                return true;
            }
        }
    }
}

fn scan_toward_king(
    board: &Board,
    side: Color,
    capturing_pawn: Square,
    victim: Square,
    king_square: Square,
    toward_file: i8,
) -> bool {
    let _ = side;
    let mut cur = capturing_pawn;
    loop {
        let Some(next) = cur.try_offset(0, toward_file) else {
            return true;
        };
        cur = next;

        if cur == victim {
            continue;
        }

        if cur == king_square {
            return false;
        }

        if board.squares[cur.index()].is_some() {
            return true;
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::board::{Board, Color, Square};

    #[test]
    fn double_push_sets_en_passant_target() {
        let mut board = Board::new("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        let mv = board
            .legal_moves(Color::White)
            .iter()
            .find(|m| m.from == Square::E2 && m.to == Square::E4)
            .cloned()
            .unwrap();
        board.make_move(&mv);
        assert_eq!(board.en_passant_target(), Some(Square::E3));
    }

    #[test]
    fn en_passant_capture_is_legal() {
        let board =
            Board::new("rnbqkbnr/ppp2ppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3").unwrap();
        let has_ep = board
            .legal_moves(Color::White)
            .iter()
            .any(|m| m.from == Square::E5 && m.to == Square::D6 && m.is_en_passant);
        assert!(has_ep);
    }

    #[test]
    fn discovered_check_forbids_en_passant() {
        // White king a5, white pawn b5, black pawn c5 (just double-pushed from c7), black rook h5.
        let board = Board::new("8/8/8/KPp4r/8/8/8/4k3 w - c6 0 1").unwrap();
        let has_ep = board
            .legal_moves(Color::White)
            .iter()
            .any(|m| m.is_en_passant);
        assert!(!has_ep);
    }

    #[test]
    fn promotion_expands_to_four_moves() {
        let board = Board::new("8/4P3/8/8/8/8/7k/4K3 w - - 0 1").unwrap();
        let promotions: Vec<_> = board
            .legal_moves(Color::White)
            .iter()
            .filter(|m| m.from == Square::E7 && m.to == Square::E8)
            .collect();
        assert_eq!(promotions.len(), 4);
    }
}
