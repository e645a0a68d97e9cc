//! Knight generation (spec.md §4.5).

use crate::board::{Board, Color, Move, Piece, PieceKind, Square};

use super::{compute_disambiguation, mark_protected, passes_legality_filter, MoveVec, KNIGHT_OFFSETS};

pub(crate) fn generate(board: &mut Board, side: Color, from: Square, moves: &mut MoveVec) {
    let piece = Piece::new(side, PieceKind::Knight);

    for &(d_row, d_file) in &KNIGHT_OFFSETS {
        let Some(to) = from.try_offset(d_row, d_file) else {
            continue;
        };

        match board.squares[to.index()] {
            None => {
                if passes_legality_filter(board, side, from, to, false) {
                    let disambiguation =
                        compute_disambiguation(&board.squares, PieceKind::Knight, side, from, to);
                    let mut mv = Move::new_quiet(piece, from, to);
                    mv.disambiguation = disambiguation;
                    let _ = moves.try_push(mv);
                }
                mark_protected(&mut board.protecting[side.index()], to);
            }
            Some(occupant) if occupant.color() == side => {
                mark_protected(&mut board.protecting[side.index()], to);
            }
            Some(occupant) => {
                if passes_legality_filter(board, side, from, to, false) {
                    let disambiguation =
                        compute_disambiguation(&board.squares, PieceKind::Knight, side, from, to);
                    let mut mv = Move::new_quiet(piece, from, to);
                    mv.captured = Some(occupant);
                    mv.disambiguation = disambiguation;
                    let _ = moves.try_push(mv);
                }

                if occupant.is_king() {
                    board.check_paths[occupant.color().index()].push(vec![from, to]);
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::board::{Board, Color, Square};

    #[test]
    fn knight_in_corner_has_two_moves() {
        let board = Board::new("4k3/8/8/8/8/8/8/N3K3 w - - 0 1").unwrap();
        let knight_moves: Vec<_> = board
            .legal_moves(Color::White)
            .iter()
            .filter(|m| m.from == Square::A1)
            .collect();
        assert_eq!(knight_moves.len(), 2);
    }
}
