//! Pure board geometry shared by the legality engine and the attack oracle.
//!
//! Both callers must agree exactly on what "the path is clear" means, so the
//! corridor walk lives here and nowhere else. The walk is exclusive of both
//! endpoints: the destination's own occupancy is the caller's concern
//! (friendly-collision and capture rules are checked separately).

use crate::board::Board;
use crate::square::Square;

/// Absolute file and rank differences between two squares.
#[inline]
pub fn delta(a: Square, b: Square) -> (u8, u8) {
    (
        a.file().abs_diff(b.file()),
        a.rank().abs_diff(b.rank()),
    )
}

/// True iff `from` and `to` lie on a common rank, file, or diagonal.
#[inline]
pub fn is_straight_or_diagonal(from: Square, to: Square) -> bool {
    let (dx, dy) = delta(from, to);
    dx == 0 || dy == 0 || dx == dy
}

/// Walk the corridor strictly between `from` and `to`, one square at a time,
/// and report whether it is empty.
///
/// Only defined for straight or diagonal lines; callers must branch on the
/// piece kind first (knight moves never come here).
pub fn path_is_clear(board: &Board, from: Square, to: Square) -> bool {
    debug_assert!(is_straight_or_diagonal(from, to));

    let step_file = (to.file() as i8 - from.file() as i8).signum();
    let step_rank = (to.rank() as i8 - from.rank() as i8).signum();

    let mut cursor = from;
    loop {
        cursor = match cursor.offset(step_file, step_rank) {
            Some(next) => next,
            None => return true,
        };
        if cursor == to {
            return true;
        }
        if board.get(cursor).is_some() {
            return false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::{Piece, PieceColor, PieceKind};

    fn sq(text: &str) -> Square {
        Square::from_algebraic(text).expect("test square should parse")
    }

    #[test]
    fn deltas_are_absolute() {
        assert_eq!(delta(sq("e2"), sq("e4")), (0, 2));
        assert_eq!(delta(sq("e4"), sq("e2")), (0, 2));
        assert_eq!(delta(sq("c1"), sq("h6")), (5, 5));
        assert_eq!(delta(sq("g1"), sq("f3")), (1, 2));
    }

    #[test]
    fn empty_corridors_are_clear_in_all_directions() {
        let board = Board::new();
        assert!(path_is_clear(&board, sq("a1"), sq("a8")));
        assert!(path_is_clear(&board, sq("h5"), sq("a5")));
        assert!(path_is_clear(&board, sq("c1"), sq("h6")));
        assert!(path_is_clear(&board, sq("h8"), sq("a1")));
        // Adjacent squares have no corridor at all.
        assert!(path_is_clear(&board, sq("e4"), sq("e5")));
    }

    #[test]
    fn obstruction_is_seen_but_endpoints_are_not() {
        let mut board = Board::new();
        board.set(sq("e4"), Some(Piece::new(PieceKind::Pawn, PieceColor::White)));

        assert!(!path_is_clear(&board, sq("e2"), sq("e6")));
        assert!(!path_is_clear(&board, sq("e6"), sq("e2")));
        assert!(!path_is_clear(&board, sq("b1"), sq("h7")));

        // Occupied endpoints do not count as obstructions.
        assert!(path_is_clear(&board, sq("e4"), sq("e6")));
        assert!(path_is_clear(&board, sq("e2"), sq("e4")));
    }
}
