//! The board representation and its operations (spec.md §3, §4.1, §4.8,
//! §4.9).

mod castling;
mod mv;
mod piece;
mod position_state;
mod square;
mod square_set;
mod uci_move;

pub use castling::CastlingRights;
pub use mv::{Disambiguation, Move, San};
pub use piece::{Color, Piece, PieceKind};
pub use position_state::{PositionState, TerminalStatus};
pub use square::{ParseSquareError, Square};
pub use square_set::SquareSet;
pub use uci_move::{ParseUciMoveError, UciMove};

use crate::error::BoardError;
use crate::move_gen::{king, knight, pawn, sliding, MoveVec};

pub const STARTING_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// The board: piece placement plus everything needed to generate legal
/// moves and evaluate the game's status.
///
/// `squares`, `protecting`, `check_paths`, `pinned_paths`, and
/// `castling_rights` are `pub(crate)` rather than hidden behind accessors:
/// `move_gen`'s per-piece generators need to mutate several of these
/// fields independently within a single generation pass, which is only
/// possible through direct field access (see `move_gen/sliding.rs`'s
/// module doc for why the pin/check caches are populated as a side effect
/// of the *opposing* side's generation).
#[derive(Debug, Clone)]
pub struct Board {
    pub(crate) squares: [Option<Piece>; 64],
    king_square: [Square; 2],

    side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_target: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,

    pub(crate) protecting: [SquareSet; 2],
    pub(crate) check_paths: [Vec<Vec<Square>>; 2],
    pub(crate) pinned_paths: [Option<Vec<Square>>; 64],

    move_lists: [MoveVec; 2],
    history: Vec<Move>,
    position_history: Vec<String>,
    terminal_status: TerminalStatus,
}

impl Board {
    /// Parses a position descriptor and generates legal moves for it.
    ///
    /// Runs the three-phase bulk regeneration described in spec.md §4.8:
    /// `C`, then `Enemy(C)`, then `C` again. The first `C` pass exists only
    /// to seed `Enemy(C)`'s pin/check caches; its own move list is
    /// discarded by the final pass once `C`'s own caches have in turn been
    /// seeded by the `Enemy(C)` pass.
    pub fn new(descriptor: &str) -> Result<Self, BoardError> {
        let state = PositionState::parse(descriptor)?;
        let squares = PositionState::parse_placement(&state.placement)?;

        let mut king_square = [Square::E1, Square::E8];
        for sq in Square::all() {
            if let Some(piece) = squares[sq.index()] {
                if piece.kind() == PieceKind::King {
                    king_square[piece.color().index()] = sq;
                }
            }
        }

        let mut board = Board {
            squares,
            king_square,
            side_to_move: state.side_to_move,
            castling_rights: state.castling_rights,
            en_passant_target: state.en_passant_target,
            halfmove_clock: state.halfmove_clock,
            fullmove_number: state.fullmove_number.max(1),
            protecting: [SquareSet::EMPTY; 2],
            check_paths: [Vec::new(), Vec::new()],
            pinned_paths: std::array::from_fn(|_| None),
            move_lists: [MoveVec::new(), MoveVec::new()],
            history: Vec::new(),
            position_history: Vec::new(),
            terminal_status: TerminalStatus::InProgress,
        };

        let side = board.side_to_move;
        let enemy = side.flip();
        board.calculate_all_moves(side);
        board.calculate_all_moves(enemy);
        board.calculate_all_moves(side);

        board.position_history.push(board.repetition_key());
        board.recompute_terminal_status();

        Ok(board)
    }

    pub fn starting_position() -> Self {
        Self::new(STARTING_POSITION).expect("starting position descriptor is well-formed")
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    pub fn terminal_status(&self) -> TerminalStatus {
        self.terminal_status
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    pub fn king_square(&self, side: Color) -> Square {
        self.king_square[side.index()]
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    pub fn legal_moves(&self, side: Color) -> &[Move] {
        &self.move_lists[side.index()]
    }

    pub fn check_paths(&self, side: Color) -> &[Vec<Square>] {
        &self.check_paths[side.index()]
    }

    pub fn pinned_path(&self, square: Square) -> Option<&Vec<Square>> {
        self.pinned_paths[square.index()].as_ref()
    }

    /// Renders the current position as a six-field descriptor string.
    pub fn describe_position(&self) -> String {
        PositionState {
            placement: PositionState::placement_to_string(&self.squares),
            side_to_move: self.side_to_move,
            castling_rights: self.castling_rights,
            en_passant_target: self.en_passant_target,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
        .to_string()
    }

    /// Renders a move's algebraic notation, including check/checkmate
    /// suffixes. Determined by playing the move out on a scratch copy of
    /// the board rather than duplicating check detection here.
    pub fn render_san(&self, mv: &Move) -> San {
        let mut scratch = self.clone();
        scratch.make_move(mv);
        let responder = scratch.side_to_move();
        let is_check = !scratch.check_paths(responder).is_empty();
        let is_checkmate = is_check && scratch.legal_moves(responder).is_empty();
        San::new(mv, is_check, is_checkmate)
    }

    /// Applies `mv` to the board, snapshotting the pre-move state into the
    /// returned (and history-pushed) record so it can later be undone.
    pub fn make_move(&mut self, mv: &Move) -> Move {
        let mut record = mv.clone();
        record.prev_state = Some(self.position_state());

        let side = self.side_to_move;
        let enemy = side.flip();

        self.squares[mv.from.index()] = None;
        let placed = match mv.promotion {
            Some(kind) => Piece::new(side, kind),
            None => mv.mover,
        };
        self.squares[mv.to.index()] = Some(placed);

        if mv.is_en_passant {
            let victim = Square::new_unchecked(mv.from.row(), mv.to.file());
            self.squares[victim.index()] = None;
        }

        if let Some(rook_from) = mv.castled_rook_from {
            let rook = self.squares[rook_from.index()].take();
            let rook_to_file = if rook_from.file() == 7 { 5 } else { 3 };
            let rook_to = Square::new_unchecked(rook_from.row(), rook_to_file);
            self.squares[rook_to.index()] = rook;
        }

        if mv.mover.kind() == PieceKind::King {
            self.king_square[side.index()] = mv.to;
        }

        self.update_castling_rights(mv);

        self.en_passant_target = (mv.mover.kind() == PieceKind::Pawn
            && mv.from.row().abs_diff(mv.to.row()) == 2)
            .then(|| Square::new_unchecked((mv.from.row() + mv.to.row()) / 2, mv.from.file()));

        self.halfmove_clock = if mv.is_capture() || mv.mover.kind() == PieceKind::Pawn {
            0
        } else {
            self.halfmove_clock + 1
        };

        self.side_to_move = enemy;
        if side.is_black() {
            self.fullmove_number += 1;
        }

        self.position_history.push(self.repetition_key());

        self.calculate_all_moves(side);
        self.calculate_all_moves(enemy);
        self.recompute_terminal_status();

        self.history.push(record.clone());
        record
    }

    /// Fallible counterpart to [`Board::make_move`] for callers that only
    /// have a `from`/`to`/promotion triple (e.g. a parsed UCI move) and
    /// haven't already validated it against `legal_moves` themselves.
    ///
    /// Returns [`BoardError::BadPromotion`] if `promotion` is present but
    /// isn't one of {Queen, Rook, Bishop, Knight}, or
    /// [`BoardError::IllegalMove`] if no move in the current side's legal
    /// list matches `from`, `to`, and `promotion`.
    pub fn try_make_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<Move, BoardError> {
        if let Some(kind) = promotion {
            if !matches!(
                kind,
                PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
            ) {
                return Err(BoardError::BadPromotion);
            }
        }

        let side = self.side_to_move;
        let mv = self
            .legal_moves(side)
            .iter()
            .find(|m| m.from == from && m.to == to && m.promotion == promotion)
            .cloned()
            .ok_or(BoardError::IllegalMove)?;

        Ok(self.make_move(&mv))
    }

    /// Undoes the most recently made move. Fails with
    /// [`BoardError::NoHistory`] if no move has been made yet.
    pub fn undo_move(&mut self) -> Result<Move, BoardError> {
        let mv = self.history.pop().ok_or(BoardError::NoHistory)?;
        let prev_state = mv
            .prev_state
            .clone()
            .expect("a move pushed onto history always carries its prev_state");

        let mover_color = mv.mover.color();

        if let Some(rook_from) = mv.castled_rook_from {
            let rook_to_file = if rook_from.file() == 7 { 5 } else { 3 };
            let rook_to = Square::new_unchecked(rook_from.row(), rook_to_file);
            let rook = self.squares[rook_to.index()].take();
            self.squares[rook_from.index()] = rook;
        }

        self.squares[mv.to.index()] = None;
        self.squares[mv.from.index()] = Some(mv.mover);

        if mv.is_en_passant {
            let victim = Square::new_unchecked(mv.from.row(), mv.to.file());
            self.squares[victim.index()] = mv.captured;
        } else if let Some(captured) = mv.captured {
            self.squares[mv.to.index()] = Some(captured);
        }

        if mv.mover.kind() == PieceKind::King {
            self.king_square[mover_color.index()] = mv.from;
        }

        self.side_to_move = prev_state.side_to_move;
        self.castling_rights = prev_state.castling_rights;
        self.en_passant_target = prev_state.en_passant_target;
        self.halfmove_clock = prev_state.halfmove_clock;
        self.fullmove_number = prev_state.fullmove_number;

        self.position_history.pop();

        let side = self.side_to_move;
        let enemy = side.flip();
        self.calculate_all_moves(side);
        self.calculate_all_moves(enemy);
        self.recompute_terminal_status();

        Ok(mv)
    }

    fn position_state(&self) -> PositionState {
        PositionState {
            placement: PositionState::placement_to_string(&self.squares),
            side_to_move: self.side_to_move,
            castling_rights: self.castling_rights,
            en_passant_target: self.en_passant_target,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
    }

    fn update_castling_rights(&mut self, mv: &Move) {
        if mv.mover.kind() == PieceKind::King {
            let lost = match mv.mover.color() {
                Color::White => CastlingRights::WHITE,
                Color::Black => CastlingRights::BLACK,
            };
            self.castling_rights -= lost;
        }

        for square in [mv.from, mv.to] {
            let lost = match square {
                Square::A1 => CastlingRights::WHITE_QUEENSIDE,
                Square::H1 => CastlingRights::WHITE_KINGSIDE,
                Square::A8 => CastlingRights::BLACK_QUEENSIDE,
                Square::H8 => CastlingRights::BLACK_KINGSIDE,
                _ => CastlingRights::empty(),
            };
            self.castling_rights -= lost;
        }
    }

    /// Regenerates `side`'s legal moves (spec.md §4.3–§4.7).
    ///
    /// As a side effect, this clears and repopulates `Enemy(side)`'s
    /// pin/check caches — see the module doc on `move_gen::sliding` for why
    /// that data dependency runs this way round, and this type's doc for
    /// why the relevant fields are `pub(crate)`.
    fn calculate_all_moves(&mut self, side: Color) {
        let enemy = side.flip();

        self.protecting[side.index()] = SquareSet::EMPTY;
        self.check_paths[enemy.index()].clear();
        for sq in Square::all() {
            if let Some(piece) = self.squares[sq.index()] {
                if piece.color() == enemy {
                    self.pinned_paths[sq.index()] = None;
                }
            }
        }

        let mut moves = MoveVec::new();
        for sq in Square::all() {
            let Some(piece) = self.squares[sq.index()] else {
                continue;
            };
            if piece.color() != side {
                continue;
            }

            match piece.kind() {
                PieceKind::Pawn => pawn::generate(self, side, sq, &mut moves),
                PieceKind::Knight => knight::generate(self, side, sq, &mut moves),
                PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                    sliding::generate(self, side, sq, piece.kind(), &mut moves)
                }
                PieceKind::King => king::generate(self, side, sq, &mut moves),
            }
        }

        self.move_lists[side.index()] = moves;
    }

    fn repetition_key(&self) -> String {
        format!(
            "{} {} {} {}",
            PositionState::placement_to_string(&self.squares),
            if self.side_to_move.is_white() { 'w' } else { 'b' },
            self.castling_rights.as_descriptor_str(),
            self.en_passant_target
                .map(|sq| sq.to_string())
                .unwrap_or_else(|| "-".to_owned()),
        )
    }

    fn is_threefold_repetition(&self) -> bool {
        let current = self.position_history.last();
        match current {
            Some(current) => {
                self.position_history
                    .iter()
                    .filter(|key| *key == current)
                    .count()
                    >= 3
            }
            None => false,
        }
    }

    /// Evaluates the game's status (spec.md §4.9): checkmate, stalemate,
    /// fifty-move rule, and threefold repetition.
    fn recompute_terminal_status(&mut self) {
        let side = self.side_to_move;
        let in_check = !self.check_paths(side).is_empty();

        self.terminal_status = if self.legal_moves(side).is_empty() {
            if in_check {
                match side {
                    Color::White => TerminalStatus::BlackWin,
                    Color::Black => TerminalStatus::WhiteWin,
                }
            } else {
                TerminalStatus::DrawStalemate
            }
        } else if self.halfmove_clock >= 100 {
            TerminalStatus::DrawFiftyMoves
        } else if self.is_threefold_repetition() {
            TerminalStatus::DrawRepetition
        } else {
            TerminalStatus::InProgress
        };
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn starting_position_has_twenty_moves() {
        let board = Board::starting_position();
        assert_eq!(board.legal_moves(Color::White).len(), 20);
    }

    #[test]
    fn make_and_undo_round_trips_descriptor() {
        let mut board = Board::starting_position();
        let before = board.describe_position();

        let mv = board
            .legal_moves(Color::White)
            .iter()
            .find(|m| m.from == Square::E2 && m.to == Square::E4)
            .cloned()
            .unwrap();

        board.make_move(&mv);
        assert_ne!(board.describe_position(), before);

        board.undo_move().unwrap();
        assert_eq!(board.describe_position(), before);
    }

    #[test]
    fn undo_with_empty_history_errs() {
        let mut board = Board::starting_position();
        assert_eq!(board.undo_move().unwrap_err(), BoardError::NoHistory);
    }

    #[test]
    fn fools_mate_is_checkmate() {
        let mut board = Board::starting_position();
        for (from, to) in [
            (Square::F2, Square::F3),
            (Square::E7, Square::E5),
            (Square::G2, Square::G4),
            (Square::D8, Square::H4),
        ] {
            let mv = board
                .legal_moves(board.side_to_move())
                .iter()
                .find(|m| m.from == from && m.to == to)
                .cloned()
                .unwrap_or_else(|| panic!("{from}{to} should be legal"));
            board.make_move(&mv);
        }
        assert_eq!(board.terminal_status(), TerminalStatus::BlackWin);
    }

    #[test]
    fn stalemate_is_detected() {
        let board = Board::new("7k/8/6Q1/8/8/8/8/6K1 b - - 0 1").unwrap();
        assert_eq!(board.terminal_status(), TerminalStatus::DrawStalemate);
    }

    #[test]
    fn castling_updates_rook_and_rights() {
        let mut board = Board::new("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let mv = board
            .legal_moves(Color::White)
            .iter()
            .find(|m| m.is_castle())
            .cloned()
            .unwrap();
        board.make_move(&mv);
        assert_eq!(board.piece_at(Square::F1), Some(Piece::rook(Color::White)));
        assert_eq!(board.piece_at(Square::G1), Some(Piece::king(Color::White)));
        assert!(board.castling_rights().is_empty());
    }

    #[test]
    fn try_make_move_rejects_move_not_in_legal_list() {
        let mut board = Board::starting_position();
        let err = board
            .try_make_move(Square::E2, Square::E5, None)
            .unwrap_err();
        assert_eq!(err, BoardError::IllegalMove);
    }

    #[test]
    fn try_make_move_rejects_non_promotion_piece_kind() {
        let mut board = Board::new("8/4P3/8/8/8/8/8/k6K w - - 0 1").unwrap();
        let err = board
            .try_make_move(Square::E7, Square::E8, Some(PieceKind::King))
            .unwrap_err();
        assert_eq!(err, BoardError::BadPromotion);
    }

    #[test]
    fn try_make_move_applies_a_legal_move() {
        let mut board = Board::starting_position();
        let before = board.describe_position();

        let record = board
            .try_make_move(Square::E2, Square::E4, None)
            .unwrap();

        assert_eq!(record.from, Square::E2);
        assert_eq!(record.to, Square::E4);
        assert_ne!(board.describe_position(), before);
    }
}
