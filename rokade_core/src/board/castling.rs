use bitflags::bitflags;

bitflags! {
    /// The four castling-right booleans from spec.md §3 (WK, WQ, BK, BQ),
    /// packed as flags.
    ///
    /// A right being set means only that the relevant king and rook have
    /// not yet moved; it says nothing about whether castling is legal in
    /// the current position (blocking pieces, check, attacked transit
    /// squares are all checked separately during move generation).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CastlingRights: u8 {
        const WHITE_KINGSIDE  = 0b0001;
        const WHITE_QUEENSIDE = 0b0010;
        const BLACK_KINGSIDE  = 0b0100;
        const BLACK_QUEENSIDE = 0b1000;

        const WHITE = Self::WHITE_KINGSIDE.bits() | Self::WHITE_QUEENSIDE.bits();
        const BLACK = Self::BLACK_KINGSIDE.bits() | Self::BLACK_QUEENSIDE.bits();
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::all()
    }
}

impl CastlingRights {
    /// Renders as the castling field of a position descriptor: `-` if
    /// empty, otherwise a subset of "KQkq".
    pub fn as_descriptor_str(self) -> String {
        if self.is_empty() {
            "-".to_owned()
        } else {
            let mut result = String::with_capacity(4);
            if self.contains(Self::WHITE_KINGSIDE) {
                result.push('K');
            }
            if self.contains(Self::WHITE_QUEENSIDE) {
                result.push('Q');
            }
            if self.contains(Self::BLACK_KINGSIDE) {
                result.push('k');
            }
            if self.contains(Self::BLACK_QUEENSIDE) {
                result.push('q');
            }
            result
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_renders_as_dash() {
        assert_eq!(CastlingRights::empty().as_descriptor_str(), "-");
    }

    #[test]
    fn full_renders_kqkq() {
        assert_eq!(CastlingRights::all().as_descriptor_str(), "KQkq");
    }

    #[test]
    fn revoking_white_kingside_drops_only_k() {
        let rights = CastlingRights::all() - CastlingRights::WHITE_KINGSIDE;
        assert_eq!(rights.as_descriptor_str(), "Qkq");
    }
}
