//! Per-piece-kind legal move generation (spec.md §4.3–§4.7).

pub mod king;
pub mod knight;
pub mod pawn;
pub mod sliding;

use arrayvec::ArrayVec;

use crate::board::{Board, Color, Disambiguation, Piece, PieceKind, Square, SquareSet};

/// See `hardfiskur_core`'s own comment on `MAX_MOVES`: 256 is a generous
/// round number above the largest number of moves reachable in any legal
/// position.
pub const MAX_MOVES: usize = 256;

pub type MoveVec = ArrayVec<crate::board::Move, MAX_MOVES>;

/// Shared legality filter (spec.md §4.3), applied to every candidate
/// non-king move before it is accepted into a side's move list.
///
/// `en_passant_checker` is `Some(checker_square)` only when testing an en
/// passant capture whose destination is not itself on every check-path;
/// the capture is still legal if the sole checker is exactly one rank
/// (8 indices) from the en-passant target, i.e. it's the pawn being
/// captured.
pub(crate) fn passes_legality_filter(
    board: &Board,
    side: Color,
    from: Square,
    to: Square,
    is_en_passant: bool,
) -> bool {
    if let Some(pin_path) = board.pinned_path(from) {
        if !pin_path.contains(&to) {
            return false;
        }
    }

    let check_paths = board.check_paths(side);
    if check_paths.is_empty() {
        return true;
    }

    if check_paths.iter().all(|path| path.contains(&to)) {
        return true;
    }

    if is_en_passant && check_paths.len() == 1 {
        if let (Some(&checker), Some(ep_target)) =
            (check_paths[0].first(), board.en_passant_target())
        {
            return checker.get().abs_diff(ep_target.get()) == 8;
        }
    }

    false
}

/// Directions used by disambiguation scans and sliding-piece generation,
/// expressed as `(row_delta, file_delta)`.
pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

pub(crate) fn directions_for(kind: PieceKind) -> &'static [(i8, i8)] {
    match kind {
        PieceKind::Rook => &ROOK_DIRECTIONS,
        PieceKind::Bishop => &BISHOP_DIRECTIONS,
        PieceKind::Queen => &[
            (-1, 0),
            (1, 0),
            (0, -1),
            (0, 1),
            (-1, -1),
            (-1, 1),
            (1, -1),
            (1, 1),
        ],
        _ => &[],
    }
}

pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Finds other same-colour, same-kind pieces (besides `from`) that also
/// attack `to`, for SAN disambiguation (spec.md §4.4, §9 open question 1).
///
/// This is a reverse scan from the destination, exactly as spec.md
/// describes: for sliders, walk each relevant direction from `to` until a
/// blocker is found; for knights, check the 8 knight-offset squares from
/// `to` directly.
pub(crate) fn find_other_attackers(
    squares: &[Option<Piece>; 64],
    kind: PieceKind,
    color: Color,
    from: Square,
    to: Square,
) -> ArrayVec<Square, 8> {
    let mut found = ArrayVec::new();

    if kind == PieceKind::Knight {
        for &(dr, df) in &KNIGHT_OFFSETS {
            if let Some(sq) = to.try_offset(dr, df) {
                if sq != from {
                    if let Some(p) = squares[sq.index()] {
                        if p.color() == color && p.kind() == kind {
                            let _ = found.try_push(sq);
                        }
                    }
                }
            }
        }
        return found;
    }

    for &(dr, df) in directions_for(kind) {
        let mut cur = to;
        loop {
            let Some(next) = cur.try_offset(dr, df) else {
                break;
            };
            cur = next;
            match squares[cur.index()] {
                None => continue,
                Some(p) => {
                    if cur != from && p.color() == color && p.kind() == kind {
                        let _ = found.try_push(cur);
                    }
                    break;
                }
            }
        }
    }

    found
}

/// Computes the disambiguation a move's SAN render needs, given the set of
/// other same-kind, same-colour pieces (besides the mover) that can also
/// reach the destination.
pub(crate) fn compute_disambiguation(
    squares: &[Option<Piece>; 64],
    kind: PieceKind,
    color: Color,
    from: Square,
    to: Square,
) -> Disambiguation {
    let others = find_other_attackers(squares, kind, color, from, to);
    if others.is_empty() {
        return Disambiguation::None;
    }

    let mut needs_file = false;
    let mut needs_rank = false;
    for &other in &others {
        if other.file() == from.file() {
            needs_rank = true;
        }
        if other.row() == from.row() {
            needs_file = true;
        }
    }

    match (needs_file, needs_rank) {
        (true, true) => Disambiguation::Square,
        (false, true) => Disambiguation::Rank,
        // Covers both "needs_file only" and "neither axis shared" (the
        // latter still needs *some* disambiguator since `others` is
        // non-empty; SAN prefers file when it suffices).
        _ => Disambiguation::File,
    }
}

/// Marks `square` as protected by the side currently being generated for,
/// regardless of whether it's occupied (spec.md §3's glossary entry on
/// protected-squares).
pub(crate) fn mark_protected(protecting: &mut SquareSet, square: Square) {
    protecting.insert(square);
}
