use rokade_core::{Board, Color, PieceKind, Square, TerminalStatus};

use crate::piece_tables::{material_score, piece_square_table};
use crate::score::Score;

const CHECK_BONUS: i64 = 50;
const WIN_SCORE: i64 = 25_000;
const DRAW_NUDGE: i64 = 200;

/// Static position evaluator (spec.md §4.10). White-positive: positive
/// scores favor white, negative scores favor black.
pub struct Evaluator;

impl Evaluator {
    pub fn evaluate(board: &Board) -> Score {
        let endgame = Self::is_endgame(board);

        let mut total: i64 = 0;
        for square in Square::all() {
            let Some(piece) = board.piece_at(square) else {
                continue;
            };

            let sign: i64 = if piece.color().is_white() { 1 } else { -1 };
            let pst_square = if piece.color().is_white() {
                square
            } else {
                Square::new_unchecked(7 - square.row(), square.file())
            };

            let value =
                material_score(piece.kind()) as i64 + piece_square_table(piece.kind(), pst_square, endgame) as i64;
            total += sign * value;
        }

        if !board.check_paths(Color::Black).is_empty() {
            total += CHECK_BONUS;
        }
        if !board.check_paths(Color::White).is_empty() {
            total -= CHECK_BONUS;
        }

        total += Self::terminal_contribution(board);

        Score(total)
    }

    fn terminal_contribution(board: &Board) -> i64 {
        match board.terminal_status() {
            TerminalStatus::InProgress => 0,
            TerminalStatus::WhiteWin => WIN_SCORE,
            TerminalStatus::BlackWin => -WIN_SCORE,
            TerminalStatus::DrawFiftyMoves
            | TerminalStatus::DrawRepetition
            | TerminalStatus::DrawStalemate => {
                if board.side_to_move().is_white() {
                    -DRAW_NUDGE
                } else {
                    DRAW_NUDGE
                }
            }
        }
    }

    fn is_endgame(board: &Board) -> bool {
        Square::all().all(|sq| {
            !matches!(
                board.piece_at(sq).map(|p| p.kind()),
                Some(PieceKind::Queen)
            )
        })
    }

    // TODO - check for friendly pieces in the move list.
    #[allow(dead_code)]
    fn protection_score(_board: &Board) -> i64 {
        0
    }
}

/// Mobility contribution, defined but not folded into [`Evaluator::evaluate`]
/// (spec.md §4.10: "not included in the final score").
#[allow(dead_code)]
pub fn mobility_score(board: &Board) -> i64 {
    let white = board.legal_moves(Color::White).len() as i64;
    let black = board.legal_moves(Color::Black).len() as i64;
    2 * (white - black)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_is_balanced() {
        let board = Board::starting_position();
        assert_eq!(Evaluator::evaluate(&board), Score(0));
    }

    #[test]
    fn missing_white_queen_favors_black() {
        let board =
            Board::new("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        assert!(Evaluator::evaluate(&board).get() < 0);
    }

    #[test]
    fn fools_mate_scores_as_black_win() {
        let mut board = Board::starting_position();
        for uci in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            let mv: rokade_core::UciMove = uci.parse().unwrap();
            let side = board.side_to_move();
            let chosen = board
                .legal_moves(side)
                .iter()
                .find(|m| m.from == mv.from && m.to == mv.to && m.promotion == mv.promotion)
                .cloned()
                .unwrap();
            board.make_move(&chosen);
        }

        assert_eq!(board.terminal_status(), TerminalStatus::BlackWin);
        // White's king is in check at checkmate, so the check bonus also
        // applies on top of the terminal win score.
        assert_eq!(Evaluator::evaluate(&board), Score(-WIN_SCORE - CHECK_BONUS));
    }
}
