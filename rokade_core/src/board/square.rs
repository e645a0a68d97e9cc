use std::{
    fmt::{Debug, Display, Write},
    str::FromStr,
};

use paste::paste;
use seq_macro::seq;
use thiserror::Error;

/// A square on the board.
///
/// Internally an integer 0..=63. Index 0 is a8, index 7 is h8, index 56 is
/// a1, index 63 is h1 — squares increase across a rank (file A to H) then
/// down the ranks (8 to 1). This is the opposite convention from the usual
/// "a1 is 0" bitboard layout; it falls out of walking the piece-placement
/// field of a position descriptor in source order (rank 8 first, each rank
/// left to right).
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    pub const WHITE_QUEENSIDE_ROOK: Self = Self::A1;
    pub const WHITE_KINGSIDE_ROOK: Self = Self::H1;
    pub const BLACK_QUEENSIDE_ROOK: Self = Self::A8;
    pub const BLACK_KINGSIDE_ROOK: Self = Self::H8;

    /// Constructs a square from a row (0 = rank 8 .. 7 = rank 1) and file (0
    /// = A .. 7 = H). Returns `None` if either is out of range.
    pub const fn new(row: u8, file: u8) -> Option<Self> {
        if row >= 8 || file >= 8 {
            None
        } else {
            Some(Self(8 * row + file))
        }
    }

    pub const fn new_unchecked(row: u8, file: u8) -> Self {
        Self(row.overflowing_mul(8).0.overflowing_add(file).0 % 64)
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < 64 {
            Some(Self(index as _))
        } else {
            None
        }
    }

    pub const fn from_u8_unchecked(value: u8) -> Self {
        Self(value % 64)
    }

    pub const fn from_index_unchecked(index: usize) -> Self {
        Self((index % 64) as _)
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as _
    }

    /// Row, 0 = rank 8 .. 7 = rank 1.
    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    /// File, 0 = A .. 7 = H.
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// Conventional rank number, 1..=8.
    pub const fn rank_number(self) -> u8 {
        8 - self.row()
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }

    /// Adds a raw index offset, truncating to stay within 0..=63.
    pub const fn offset(self, offset: i8) -> Self {
        Self::from_u8_unchecked((self.0 as i8).wrapping_add(offset) as u8)
    }

    /// Offsets by `(d_row, d_file)`, returning `None` if the result would
    /// leave the board in either axis (used for knight/king wrap guards).
    pub const fn try_offset(self, d_row: i8, d_file: i8) -> Option<Self> {
        let row = self.row() as i8 + d_row;
        let file = self.file() as i8 + d_file;
        if row < 0 || row > 7 || file < 0 || file > 7 {
            None
        } else {
            Self::new(row as u8, file as u8)
        }
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char((self.file() + b'a') as char)?;
        f.write_char((self.rank_number() + b'0') as char)
    }
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("invalid square")]
pub struct ParseSquareError;

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let file = chars.next().ok_or(ParseSquareError)?;
        let rank = chars.next().ok_or(ParseSquareError)?;
        if chars.next().is_some() {
            return Err(ParseSquareError);
        }

        let file = (file as i32) - ('a' as i32);
        let rank_number = (rank as i32) - ('0' as i32);
        if !(0..8).contains(&file) || !(1..=8).contains(&rank_number) {
            return Err(ParseSquareError);
        }

        let row = 8 - rank_number;
        Ok(Square::new_unchecked(row as u8, file as u8))
    }
}

impl Debug for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

/// Square aliases, e.g. `Square::E4`.
#[allow(clippy::eq_op, clippy::char_lit_as_u8)]
impl Square {
    seq!(RANK in 1..=8 {
        seq!(FILE in 'A'..='H' {
            paste! {
                pub const [<FILE RANK>]: Square = Square::new_unchecked(8 - RANK, FILE as u8 - b'A');
            }
        });
    });
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn square_aliases_match_new() {
        assert_eq!(Square::A8, Square::new(0, 0).unwrap());
        assert_eq!(Square::H8, Square::new(0, 7).unwrap());
        assert_eq!(Square::A1, Square::new(7, 0).unwrap());
        assert_eq!(Square::H1, Square::new(7, 7).unwrap());
        assert_eq!(Square::E4, Square::new(4, 4).unwrap());
    }

    #[test]
    fn square_indices() {
        assert_eq!(Square::A8.index(), 0);
        assert_eq!(Square::H8.index(), 7);
        assert_eq!(Square::A1.index(), 56);
        assert_eq!(Square::H1.index(), 63);
    }

    #[test]
    fn square_display_and_parse_roundtrip() {
        for sq in Square::all() {
            let s = sq.to_string();
            assert_eq!(s.parse::<Square>(), Ok(sq));
        }
    }

    #[test]
    fn square_display_values() {
        assert_eq!(Square::E4.to_string(), "e4");
        assert_eq!(Square::A8.to_string(), "a8");
        assert_eq!(Square::H1.to_string(), "h1");
    }

    #[test]
    fn square_parse_rejects_garbage() {
        assert_eq!("".parse::<Square>(), Err(ParseSquareError));
        assert_eq!("z9".parse::<Square>(), Err(ParseSquareError));
        assert_eq!("e4e".parse::<Square>(), Err(ParseSquareError));
    }

    #[test]
    fn square_offset_white_pawn_push() {
        // White's forward direction is -8 in this indexing.
        assert_eq!(Square::E2.offset(-8), Square::E3);
        assert_eq!(Square::E2.offset(-16), Square::E4);
    }

    #[test]
    fn square_try_offset_rejects_wrap() {
        assert_eq!(Square::A4.try_offset(0, -1), None);
        assert_eq!(Square::H4.try_offset(0, 1), None);
        assert_eq!(Square::A1.try_offset(1, 0), None);
        assert_eq!(Square::A8.try_offset(-1, 0), None);
    }
}
