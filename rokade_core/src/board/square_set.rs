use std::fmt::Debug;

use super::Square;

/// A set of squares, backed by a 64-bit mask.
///
/// Used for the per-colour protected-squares cache (spec.md §3). The board
/// itself is represented as a plain 64-entry piece array rather than
/// bitboards (see `board/mod.rs`), but "which squares does this side
/// defend" is naturally a set-membership question, so it gets the compact
/// representation here.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct SquareSet(u64);

impl SquareSet {
    pub const EMPTY: Self = Self(0);

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, square: Square) -> bool {
        self.0 & (1 << square.get()) != 0
    }

    pub fn insert(&mut self, square: Square) {
        self.0 |= 1 << square.get();
    }

    pub fn bits(self) -> impl Iterator<Item = Square> {
        SquareSetIter(self.0)
    }
}

impl Debug for SquareSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SquareSet(\n")?;
        for row in 0..8 {
            f.write_str("    ")?;
            for file in 0..8 {
                let square = Square::new_unchecked(row, file);
                f.write_str(if self.contains(square) { " #" } else { " ." })?;
            }
            f.write_str("\n")?;
        }
        f.write_str(")")
    }
}

struct SquareSetIter(u64);

impl Iterator for SquareSetIter {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            let index = self.0.trailing_zeros();
            self.0 &= self.0 - 1;
            Some(Square::from_index_unchecked(index as usize))
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn insert_and_contains() {
        let mut set = SquareSet::EMPTY;
        assert!(set.is_empty());
        set.insert(Square::E4);
        assert!(set.contains(Square::E4));
        assert!(!set.contains(Square::D4));
    }

    #[test]
    fn bits_iterates_inserted_squares() {
        let mut set = SquareSet::EMPTY;
        set.insert(Square::A1);
        set.insert(Square::H8);
        let collected: Vec<_> = set.bits().collect();
        assert_eq!(collected, vec![Square::H8, Square::A1]);
    }
}
