use std::{
    fmt::{Display, Write},
    str::FromStr,
};

use thiserror::Error;

use super::{Piece, PieceKind, Square};

/// A move in UCI's long algebraic notation: start square, end square, and
/// an optional promotion letter (e.g. `e2e4`, `e7e8q`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UciMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl Display for UciMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.from.fmt(f)?;
        self.to.fmt(f)?;
        if let Some(promotion) = self.promotion {
            f.write_char(promotion.as_lowercase_char())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseUciMoveError {
    #[error("expected 4 or 5 characters")]
    IncorrectLength,
    #[error("invalid square '{0}'")]
    InvalidSquare(String),
    #[error("invalid promotion target '{0}'")]
    InvalidPromoTarget(char),
}

impl FromStr for UciMove {
    type Err = ParseUciMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 4 && chars.len() != 5 {
            return Err(ParseUciMoveError::IncorrectLength);
        }

        let from_str: String = chars[0..2].iter().collect();
        let from = from_str
            .parse()
            .map_err(|_| ParseUciMoveError::InvalidSquare(from_str))?;

        let to_str: String = chars[2..4].iter().collect();
        let to = to_str
            .parse()
            .map_err(|_| ParseUciMoveError::InvalidSquare(to_str))?;

        let promotion = match chars.get(4) {
            Some(&c) => Some(
                Piece::try_from_fen_char(c)
                    .map(|p| p.kind())
                    .ok_or(ParseUciMoveError::InvalidPromoTarget(c))?,
            ),
            None => None,
        };

        Ok(Self {
            from,
            to,
            promotion,
        })
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_normal_move() {
        assert_eq!(
            "e2e4".parse(),
            Ok(UciMove {
                from: Square::E2,
                to: Square::E4,
                promotion: None,
            })
        );
    }

    #[test]
    fn parse_promotion() {
        assert_eq!(
            "e7e8q".parse(),
            Ok(UciMove {
                from: Square::E7,
                to: Square::E8,
                promotion: Some(PieceKind::Queen),
            })
        );
    }

    #[test]
    fn parse_invalid_cases() {
        assert_eq!(
            UciMove::from_str(""),
            Err(ParseUciMoveError::IncorrectLength)
        );
        assert_eq!(
            UciMove::from_str("a9e4"),
            Err(ParseUciMoveError::InvalidSquare("a9".to_owned()))
        );
        assert_eq!(
            UciMove::from_str("e7e8x"),
            Err(ParseUciMoveError::InvalidPromoTarget('x'))
        );
    }

    #[test]
    fn display_impl() {
        assert_eq!(UciMove::from_str("e2e4").unwrap().to_string(), "e2e4");
        assert_eq!(UciMove::from_str("e7e8q").unwrap().to_string(), "e7e8q");
    }
}
