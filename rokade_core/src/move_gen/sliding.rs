//! Bishop, rook, and queen generation (spec.md §4.4).
//!
//! This is also where the pin-path of an *opposing* piece gets populated as
//! a side effect — see the module doc on `Board::calculate_all_moves` for
//! why that data dependency runs this way round.

use crate::board::{Board, Color, Move, Piece, PieceKind, Square};

use super::{compute_disambiguation, directions_for, mark_protected, passes_legality_filter, MoveVec};

pub(crate) fn generate(
    board: &mut Board,
    side: Color,
    from: Square,
    kind: PieceKind,
    moves: &mut MoveVec,
) {
    let piece = Piece::new(side, kind);

    for &(d_row, d_file) in directions_for(kind) {
        let mut potential_pin_square: Option<Square> = None;
        let mut path_to_king: Vec<Square> = vec![from];
        let mut cur = from;

        loop {
            let Some(next) = cur.try_offset(d_row, d_file) else {
                break;
            };
            cur = next;

            match board.squares[cur.index()] {
                None => {
                    if potential_pin_square.is_none()
                        && passes_legality_filter(board, side, from, cur, false)
                    {
                        push_move(board, moves, piece, kind, side, from, cur, None);
                        mark_protected(&mut board.protecting[side.index()], cur);
                    }
                    path_to_king.push(cur);
                }
                Some(occupant) if occupant.color() == side => {
                    if potential_pin_square.is_none() {
                        mark_protected(&mut board.protecting[side.index()], cur);
                    }
                    break;
                }
                Some(occupant) => {
                    // Enemy piece.
                    if potential_pin_square.is_none() {
                        if passes_legality_filter(board, side, from, cur, false) {
                            push_move(
                                board,
                                moves,
                                piece,
                                kind,
                                side,
                                from,
                                cur,
                                Some(occupant),
                            );
                        }
                        path_to_king.push(cur);

                        if occupant.is_king() {
                            board.check_paths[occupant.color().index()].push(path_to_king.clone());
                            break;
                        } else {
                            potential_pin_square = Some(cur);
                            continue;
                        }
                    } else if occupant.is_king() {
                        let pinned = potential_pin_square.expect("pin in progress");
                        board.pinned_paths[pinned.index()] = Some(path_to_king.clone());
                        break;
                    } else {
                        break;
                    }
                }
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn push_move(
    board: &Board,
    moves: &mut MoveVec,
    piece: Piece,
    kind: PieceKind,
    side: Color,
    from: Square,
    to: Square,
    captured: Option<Piece>,
) {
    let disambiguation = compute_disambiguation(&board.squares, kind, side, from, to);
    let mut mv = Move::new_quiet(piece, from, to);
    mv.captured = captured;
    mv.disambiguation = disambiguation;
    let _ = moves.try_push(mv);
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::board::Board;

    #[test]
    fn rook_on_open_file_sees_full_file() {
        let board = Board::new("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let moves = board.legal_moves(crate::board::Color::White);
        let rook_moves = moves
            .iter()
            .filter(|m| m.from == crate::board::Square::A1)
            .count();
        // a-file (7 squares) plus along the 1st rank (b1..d1, e1 is the king).
        assert_eq!(rook_moves, 7 + 3);
    }

    #[test]
    fn pin_restricts_bishop_to_pin_path() {
        // White king e1, white bishop e3 pinned by black rook e8.
        let board = Board::new("4r1k1/8/8/8/8/4B3/8/4K3 w - - 0 1").unwrap();
        let bishop_moves: Vec<_> = board
            .legal_moves(crate::board::Color::White)
            .iter()
            .filter(|m| m.from == crate::board::Square::E3)
            .collect();
        assert!(bishop_moves.is_empty());
    }
}
