use std::fmt::{Display, Write};

use super::{CastlingRights, Color, Piece, Square};
use crate::error::BoardError;

/// The result of evaluating a position (spec.md §4.9). Exactly one of
/// these holds at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalStatus {
    InProgress,
    WhiteWin,
    BlackWin,
    DrawFiftyMoves,
    DrawRepetition,
    DrawStalemate,
}

impl TerminalStatus {
    pub const fn is_terminal(self) -> bool {
        !matches!(self, TerminalStatus::InProgress)
    }
}

/// The reversible game-state record (spec.md §3 / §4.1): side to move,
/// castling rights, en-passant target, halfmove clock, fullmove number,
/// and a placement string in the format of a position descriptor's
/// piece-placement field.
///
/// `Board` snapshots a `PositionState` into every `MoveRecord` and restores
/// it wholesale on undo; this is also how the fullmove-counter asymmetry
/// noted in spec.md §9 falls out naturally (see DESIGN.md open question 2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionState {
    pub placement: String,
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_target: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl PositionState {
    /// Parses the placement field into a 64-entry piece array indexed by
    /// [`Square`].
    pub fn parse_placement(placement: &str) -> Result<[Option<Piece>; 64], BoardError> {
        let ranks: Vec<_> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(BoardError::MalformedDescriptor {
                reason: format!("expected 8 ranks separated by '/', found {}", ranks.len()),
            });
        }

        let mut squares = [None; 64];
        for (row, rank_str) in ranks.into_iter().enumerate() {
            let mut file: u8 = 0;
            for c in rank_str.chars() {
                if file >= 8 {
                    return Err(BoardError::MalformedDescriptor {
                        reason: format!("rank '{rank_str}' overflows 8 files"),
                    });
                }
                if let Some(digit) = c.to_digit(10) {
                    if digit == 0 {
                        return Err(BoardError::MalformedDescriptor {
                            reason: "empty-square run of 0 is invalid".to_owned(),
                        });
                    }
                    file += digit as u8;
                } else {
                    let piece = Piece::try_from_fen_char(c).ok_or_else(|| {
                        BoardError::MalformedDescriptor {
                            reason: format!("invalid piece letter '{c}'"),
                        }
                    })?;
                    let square = Square::new_unchecked(row as u8, file);
                    squares[square.index()] = Some(piece);
                    file += 1;
                }
            }
            if file != 8 {
                return Err(BoardError::MalformedDescriptor {
                    reason: format!("rank '{rank_str}' does not cover all 8 files"),
                });
            }
        }

        Ok(squares)
    }

    pub fn placement_to_string(squares: &[Option<Piece>; 64]) -> String {
        let mut result = String::new();
        for row in 0..8u8 {
            let mut empty_run = 0u8;
            for file in 0..8u8 {
                let square = Square::new_unchecked(row, file);
                match squares[square.index()] {
                    None => empty_run += 1,
                    Some(piece) => {
                        if empty_run > 0 {
                            result.push((b'0' + empty_run) as char);
                            empty_run = 0;
                        }
                        result.push(piece.as_fen_char());
                    }
                }
            }
            if empty_run > 0 {
                result.push((b'0' + empty_run) as char);
            }
            if row != 7 {
                result.push('/');
            }
        }
        result
    }

    /// Parses a six-field position descriptor. Tolerates a missing
    /// halfmove and/or fullmove field, defaulting both to 0, per spec.md
    /// §4.1 / §6.
    pub fn parse(descriptor: &str) -> Result<Self, BoardError> {
        let fields: Vec<&str> = descriptor.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(BoardError::MalformedDescriptor {
                reason: format!(
                    "expected at least 4 fields (placement, side, castling, en passant), found {}",
                    fields.len()
                ),
            });
        }

        let placement = fields[0];
        // Validate the placement is parseable; the returned array isn't
        // needed here, `Board::new` parses it again to build the piece
        // array in one place.
        Self::parse_placement(placement)?;

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(BoardError::MalformedDescriptor {
                    reason: format!("side to move must be 'w' or 'b', found '{other}'"),
                })
            }
        };

        let castling_rights = if fields[2] == "-" {
            CastlingRights::empty()
        } else {
            let mut rights = CastlingRights::empty();
            for c in fields[2].chars() {
                rights |= match c {
                    'K' => CastlingRights::WHITE_KINGSIDE,
                    'Q' => CastlingRights::WHITE_QUEENSIDE,
                    'k' => CastlingRights::BLACK_KINGSIDE,
                    'q' => CastlingRights::BLACK_QUEENSIDE,
                    other => {
                        return Err(BoardError::MalformedDescriptor {
                            reason: format!("invalid castling-rights letter '{other}'"),
                        })
                    }
                };
            }
            rights
        };

        let en_passant_target = if fields[3] == "-" {
            None
        } else {
            Some(fields[3].parse::<Square>().map_err(|_| BoardError::BadSquare)?)
        };

        let halfmove_clock = fields.get(4).map_or(Ok(0), |s| {
            s.parse().map_err(|_| BoardError::MalformedDescriptor {
                reason: format!("invalid halfmove clock '{s}'"),
            })
        })?;

        let fullmove_number = fields.get(5).map_or(Ok(0), |s| {
            s.parse().map_err(|_| BoardError::MalformedDescriptor {
                reason: format!("invalid fullmove number '{s}'"),
            })
        })?;

        Ok(PositionState {
            placement: placement.to_owned(),
            side_to_move,
            castling_rights,
            en_passant_target,
            halfmove_clock,
            fullmove_number,
        })
    }
}

impl Display for PositionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.placement)?;
        f.write_char(' ')?;
        f.write_char(if self.side_to_move.is_white() { 'w' } else { 'b' })?;
        f.write_char(' ')?;
        f.write_str(&self.castling_rights.as_descriptor_str())?;
        f.write_char(' ')?;
        match self.en_passant_target {
            Some(square) => write!(f, "{square}")?,
            None => f.write_char('-')?,
        }
        write!(f, " {} {}", self.halfmove_clock, self.fullmove_number)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    const STARTING: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn roundtrip_idempotence() {
        let state = PositionState::parse(STARTING).unwrap();
        assert_eq!(state.to_string(), STARTING);
    }

    #[test]
    fn tolerates_missing_trailing_fields() {
        let state = PositionState::parse("8/8/8/8/8/8/8/K6k w - -").unwrap();
        assert_eq!(state.halfmove_clock, 0);
        assert_eq!(state.fullmove_number, 0);
    }

    #[test]
    fn rejects_bad_en_passant_square() {
        let err = PositionState::parse(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1",
        )
        .unwrap_err();
        assert_eq!(err, BoardError::BadSquare);
    }

    #[test]
    fn rejects_wrong_rank_count() {
        let err = PositionState::parse("8/8/8 w - -").unwrap_err();
        assert!(matches!(err, BoardError::MalformedDescriptor { .. }));
    }
}
