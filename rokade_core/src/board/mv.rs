use std::fmt::{Display, Write};

use super::{Piece, PieceKind, PositionState, Square};

/// Whether (and how) a move's algebraic rendering needs to disambiguate
/// its mover from another same-kind, same-colour piece that could also
/// reach the destination (spec.md §4.4, §9 open question 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disambiguation {
    None,
    File,
    Rank,
    /// Neither file nor rank alone is enough — at least three same-kind
    /// pieces can reach the destination, one sharing a file and another
    /// sharing a rank with the mover.
    Square,
}

/// A single move, used both as the value returned by move generation and,
/// once enriched with `prev_state` by `Board::make_move`, as the undo
/// record pushed onto the history stack (spec.md §3's `Move`/`MoveRecord`
/// are the same type here — storing a `PieceId`-style reference would just
/// be this struct's fields restated through an extra layer of indirection).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub mover: Piece,
    pub from: Square,
    pub to: Square,
    pub disambiguation: Disambiguation,
    pub captured: Option<Piece>,
    pub is_en_passant: bool,
    /// Origin square of the rook, when this move is a castle.
    pub castled_rook_from: Option<Square>,
    pub promotion: Option<PieceKind>,
    /// Filled in by `Board::make_move`; `None` on a freshly generated move.
    pub prev_state: Option<PositionState>,
}

impl Move {
    pub fn new_quiet(mover: Piece, from: Square, to: Square) -> Self {
        Self {
            mover,
            from,
            to,
            disambiguation: Disambiguation::None,
            captured: None,
            is_en_passant: false,
            castled_rook_from: None,
            promotion: None,
            prev_state: None,
        }
    }

    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    pub const fn is_castle(&self) -> bool {
        self.castled_rook_from.is_some()
    }
}

#[derive(Debug, Clone, Copy)]
enum SanRepr {
    Regular {
        kind: PieceKind,
        disambiguation: Disambiguation,
        from: Square,
        is_capture: bool,
        to: Square,
        is_en_passant: bool,
        promotion: Option<PieceKind>,
    },
    Castle {
        is_long: bool,
    },
}

impl Display for SanRepr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            SanRepr::Castle { is_long: false } => f.write_str("O-O"),
            SanRepr::Castle { is_long: true } => f.write_str("O-O-O"),
            SanRepr::Regular {
                kind,
                disambiguation,
                from,
                is_capture,
                to,
                is_en_passant,
                promotion,
            } => {
                if kind == PieceKind::Pawn {
                    if is_capture {
                        f.write_char((from.file() + b'a') as char)?;
                    }
                } else {
                    f.write_char(kind.as_uppercase_char())?;
                }

                match disambiguation {
                    Disambiguation::None => {}
                    Disambiguation::File => f.write_char((from.file() + b'a') as char)?,
                    Disambiguation::Rank => {
                        f.write_char((from.rank_number() + b'0') as char)?
                    }
                    Disambiguation::Square => write!(f, "{from}")?,
                }

                if is_capture {
                    f.write_char('x')?;
                }

                write!(f, "{to}")?;

                if let Some(promotion) = promotion {
                    f.write_char('=')?;
                    f.write_char(promotion.as_uppercase_char())?;
                }

                if is_en_passant {
                    f.write_str(" e.p.")?;
                }

                Ok(())
            }
        }
    }
}

/// The rendered algebraic notation of a move, plus check/checkmate
/// suffixes (spec.md §6's move-notation output).
#[derive(Debug, Clone, Copy)]
pub struct San {
    repr: SanRepr,
    is_check: bool,
    is_checkmate: bool,
}

impl San {
    pub(crate) fn new(mv: &Move, is_check: bool, is_checkmate: bool) -> Self {
        let repr = if mv.is_castle() {
            SanRepr::Castle {
                is_long: mv.to.file() == 2,
            }
        } else {
            SanRepr::Regular {
                kind: mv.mover.kind(),
                disambiguation: mv.disambiguation,
                from: mv.from,
                is_capture: mv.is_capture(),
                to: mv.to,
                is_en_passant: mv.is_en_passant,
                promotion: mv.promotion,
            }
        };

        San {
            repr,
            is_check,
            is_checkmate,
        }
    }
}

impl Display for San {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.repr)?;
        if self.is_checkmate {
            f.write_char('#')?;
        } else if self.is_check {
            f.write_char('+')?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::board::Color;

    #[test]
    fn quiet_knight_move() {
        let mv = Move::new_quiet(Piece::new(Color::White, PieceKind::Knight), Square::G1, Square::F3);
        let san = San::new(&mv, false, false);
        assert_eq!(san.to_string(), "Nf3");
    }

    #[test]
    fn pawn_capture_uses_file_letter() {
        let mut mv = Move::new_quiet(Piece::new(Color::White, PieceKind::Pawn), Square::E4, Square::D5);
        mv.captured = Some(Piece::new(Color::Black, PieceKind::Pawn));
        let san = San::new(&mv, false, false);
        assert_eq!(san.to_string(), "exd5");
    }

    #[test]
    fn promotion_renders_equals_suffix() {
        let mut mv = Move::new_quiet(Piece::new(Color::White, PieceKind::Pawn), Square::E7, Square::E8);
        mv.promotion = Some(PieceKind::Queen);
        let san = San::new(&mv, false, false);
        assert_eq!(san.to_string(), "e8=Q");
    }

    #[test]
    fn check_and_mate_suffixes() {
        let mv = Move::new_quiet(Piece::new(Color::White, PieceKind::Queen), Square::H5, Square::F7);
        assert_eq!(San::new(&mv, true, false).to_string(), "Qf7+");
        assert_eq!(San::new(&mv, true, true).to_string(), "Qf7#");
    }

    #[test]
    fn disambiguation_variants_render() {
        let mut mv = Move::new_quiet(Piece::new(Color::White, PieceKind::Rook), Square::A1, Square::A3);
        mv.disambiguation = Disambiguation::File;
        assert_eq!(San::new(&mv, false, false).to_string(), "Raa3");

        mv.disambiguation = Disambiguation::Rank;
        assert_eq!(San::new(&mv, false, false).to_string(), "R1a3");

        mv.disambiguation = Disambiguation::Square;
        assert_eq!(San::new(&mv, false, false).to_string(), "Ra1a3");
    }
}
