//! Flat mailbox board.
//!
//! The board is a dumb associative store from square to occupant: no rule
//! checking happens at this layer and none of its operations can fail. A
//! flat 64-slot array keyed by [`Square::index`] keeps full-state
//! duplication (used for speculative move trial and undo snapshots) a plain
//! memcpy-style `Clone`.

use crate::piece::{Piece, PieceColor};
use crate::square::Square;

/// Sparse piece placement over the 64 squares. At most one piece per square;
/// `None` means empty. `Clone` yields an independent deep copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// An empty board.
    pub fn new() -> Self {
        Board {
            squares: [None; 64],
        }
    }

    /// Occupant of `square`, if any.
    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// Place `piece` on `square` (or clear it with `None`), replacing any
    /// previous occupant.
    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.index()] = piece;
    }

    /// Clear `square`, returning the piece that stood on it.
    #[inline]
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.index()].take()
    }

    /// Iterate all occupied squares.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.map(|piece| (Square::from_index(i), piece)))
    }

    /// Iterate the occupied squares of one side.
    pub fn pieces_of(&self, color: PieceColor) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }
}
