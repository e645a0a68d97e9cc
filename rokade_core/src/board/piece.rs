use std::{
    fmt::{Debug, Display, Write},
    num::NonZeroU8,
    str::FromStr,
};

/// The kind of a piece, independent of colour.
///
/// Assigned integers 1-6 so that 0 stays free, letting `Option<PieceKind>`
/// (and `Option<Piece>` below) niche-optimise down to a single byte.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        Self::Pawn,
        Self::Knight,
        Self::Bishop,
        Self::Rook,
        Self::Queen,
        Self::King,
    ];

    pub const fn with_color(self, color: Color) -> Piece {
        Piece::new(color, self)
    }

    pub const fn as_uppercase_char(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub const fn as_lowercase_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }

    pub const fn from_promotion_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'Q' => Some(PieceKind::Queen),
            'R' => Some(PieceKind::Rook),
            'B' => Some(PieceKind::Bishop),
            'N' => Some(PieceKind::Knight),
            _ => None,
        }
    }
}

/// A player. `Enemy(c)` from the spec is simply [`Color::flip`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    #[default]
    White = 0,
    Black = 8,
}

impl Color {
    pub const fn is_white(self) -> bool {
        matches!(self, Color::White)
    }

    pub const fn is_black(self) -> bool {
        !self.is_white()
    }

    pub const fn flip(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// `-8` for white, `+8` for black: the per-square index delta for one
    /// step "forward" given this square-indexing scheme (0 = a8).
    pub const fn forward_step(self) -> i8 {
        match self {
            Color::White => -8,
            Color::Black => 8,
        }
    }

    /// Row index (0 = rank 8) of this colour's pawn starting rank.
    pub const fn pawn_start_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row index of this colour's promotion rank.
    pub const fn promotion_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Row index of this colour's home rank (where the king/rooks start).
    pub const fn home_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

/// A piece: colour plus kind, packed into a 4-bit value stored in a
/// `NonZeroU8`. Since [`PieceKind`] is never 0, `Option<Piece>` is a single
/// byte with `None` represented by 0.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Piece(NonZeroU8);

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        // Safety: `kind as u8` is never 0.
        unsafe { Self(NonZeroU8::new_unchecked(color as u8 | kind as u8)) }
    }

    pub const fn pawn(color: Color) -> Self {
        Self::new(color, PieceKind::Pawn)
    }

    pub const fn knight(color: Color) -> Self {
        Self::new(color, PieceKind::Knight)
    }

    pub const fn bishop(color: Color) -> Self {
        Self::new(color, PieceKind::Bishop)
    }

    pub const fn rook(color: Color) -> Self {
        Self::new(color, PieceKind::Rook)
    }

    pub const fn queen(color: Color) -> Self {
        Self::new(color, PieceKind::Queen)
    }

    pub const fn king(color: Color) -> Self {
        Self::new(color, PieceKind::King)
    }

    pub const fn color(self) -> Color {
        if self.0.get() & 8 > 0 {
            Color::Black
        } else {
            Color::White
        }
    }

    pub const fn kind(self) -> PieceKind {
        match self.0.get() & 0x07 {
            1 => PieceKind::Pawn,
            2 => PieceKind::Knight,
            3 => PieceKind::Bishop,
            4 => PieceKind::Rook,
            5 => PieceKind::Queen,
            6 => PieceKind::King,
            _ => unreachable!(),
        }
    }

    pub const fn is_pawn(self) -> bool {
        matches!(self.kind(), PieceKind::Pawn)
    }

    pub const fn is_king(self) -> bool {
        matches!(self.kind(), PieceKind::King)
    }

    pub const fn is_slider(self) -> bool {
        self.kind().is_slider()
    }

    pub const fn as_fen_char(self) -> char {
        if self.color().is_white() {
            self.kind().as_uppercase_char()
        } else {
            self.kind().as_lowercase_char()
        }
    }

    pub const fn try_from_fen_char(c: char) -> Option<Self> {
        let kind = match c.to_ascii_uppercase() {
            'P' => PieceKind::Pawn,
            'N' => PieceKind::Knight,
            'B' => PieceKind::Bishop,
            'R' => PieceKind::Rook,
            'Q' => PieceKind::Queen,
            'K' => PieceKind::King,
            _ => return None,
        };
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Self::new(color, kind))
    }
}

impl Debug for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Piece")
            .field("color", &self.color())
            .field("kind", &self.kind())
            .finish()
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char(self.as_fen_char())
    }
}

impl FromStr for Piece {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let c = chars.next().ok_or(())?;
        if chars.next().is_some() {
            return Err(());
        }
        Piece::try_from_fen_char(c).ok_or(())
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn piece_roundtrips_color_and_kind() {
        for &color in &[Color::White, Color::Black] {
            for &kind in &PieceKind::ALL {
                let piece = Piece::new(color, kind);
                assert_eq!(piece.color(), color);
                assert_eq!(piece.kind(), kind);
            }
        }
    }

    #[test]
    fn piece_fen_chars() {
        assert_eq!(Piece::new(Color::White, PieceKind::King).as_fen_char(), 'K');
        assert_eq!(Piece::new(Color::Black, PieceKind::King).as_fen_char(), 'k');
        assert_eq!(
            Piece::try_from_fen_char('q'),
            Some(Piece::new(Color::Black, PieceKind::Queen))
        );
        assert_eq!(Piece::try_from_fen_char('x'), None);
    }

    #[test]
    fn color_forward_step_matches_indexing() {
        assert_eq!(Color::White.forward_step(), -8);
        assert_eq!(Color::Black.forward_step(), 8);
    }
}
