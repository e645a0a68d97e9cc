use rokade_core::{Board, Color, Move, TerminalStatus};

use crate::evaluation::Evaluator;
use crate::score::Score;

fn order_moves(moves: &mut [Move], side: Color, pv_move: Option<&Move>) -> Vec<Move> {
    let mut ordered = moves.to_vec();
    if side.is_black() {
        ordered.reverse();
    }

    if let Some(pv_move) = pv_move {
        if let Some(pos) = ordered.iter().position(|m| {
            m.from == pv_move.from && m.to == pv_move.to && m.promotion == pv_move.promotion
        }) {
            let mv = ordered.remove(pos);
            ordered.insert(0, mv);
        }
    }

    ordered
}

/// Fixed-depth negamax with alpha-beta pruning and PV-move ordering
/// (spec.md §4.11). Single-threaded, synchronous, no cancellation.
#[derive(Debug, Default)]
pub struct Searcher {
    last_pv: Vec<Move>,
}

impl Searcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards the stored principal variation, so the next search is
    /// ordered purely by the side-dependent baseline (spec.md §8: search
    /// determinism holds when `lastPV` is cleared).
    pub fn clear_pv(&mut self) {
        self.last_pv.clear();
    }

    pub fn best_move(&mut self, board: &mut Board, side: Color, depth: u32) -> Move {
        assert_eq!(board.side_to_move(), side, "search must run on the side to move");
        assert!(depth >= 1, "search depth must be at least 1");

        let (_, pv) = self.negamax(board, depth, 0, -Score::INF, Score::INF);
        let best = pv
            .first()
            .cloned()
            .expect("a non-terminal position always has at least one legal move");
        self.last_pv = pv;
        best
    }

    fn negamax(
        &self,
        board: &mut Board,
        depth: u32,
        ply: usize,
        mut alpha: Score,
        beta: Score,
    ) -> (Score, Vec<Move>) {
        if depth == 0 || board.terminal_status() != TerminalStatus::InProgress {
            return (self.relative_eval(board), Vec::new());
        }

        let side = board.side_to_move();
        let moves = board.legal_moves(side).to_vec();
        let pv_move = self.last_pv.get(ply);
        let ordered = order_moves(&moves, side, pv_move);

        let mut best_score = -Score::INF;
        let mut best_pv = Vec::new();

        for mv in ordered {
            board.make_move(&mv);
            let (child_score, child_pv) = self.negamax(board, depth - 1, ply + 1, -beta, -alpha);
            let score = -child_score;
            board.undo_move().expect("move was just made");

            if score > best_score {
                best_score = score;
                best_pv = std::iter::once(mv).chain(child_pv).collect();
            }

            if score > alpha {
                alpha = score;
            }

            if alpha >= beta {
                break;
            }
        }

        (best_score, best_pv)
    }

    fn relative_eval(&self, board: &Board) -> Score {
        let eval = Evaluator::evaluate(board);
        if board.side_to_move().is_white() {
            eval
        } else {
            -eval
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_a_free_queen() {
        // White king a1, rook e1; black king a8, queen e8 hanging on an
        // otherwise empty e-file. The only sensible move is Rxe8.
        let mut board = Board::new("k3q3/8/8/8/8/8/8/K3R3 w - - 0 1").unwrap();
        let mut searcher = Searcher::new();

        let mv = searcher.best_move(&mut board, Color::White, 1);
        assert_eq!(mv.from, rokade_core::Square::E1);
        assert_eq!(mv.to, rokade_core::Square::E8);
        assert!(mv.is_capture());
    }

    #[test]
    fn search_is_deterministic_with_cleared_pv() {
        let board = Board::starting_position();

        let mut first = Searcher::new();
        let mv1 = first.best_move(&mut board.clone(), Color::White, 3);

        let mut second = Searcher::new();
        second.clear_pv();
        let mv2 = second.best_move(&mut board.clone(), Color::White, 3);

        assert_eq!(mv1, mv2);
    }
}
