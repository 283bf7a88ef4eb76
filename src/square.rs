//! Board coordinates and algebraic square conversions.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and the internal
//! file/rank representation reused by move parsing, rendering, and FEN
//! components.

use std::fmt;

use crate::chess_errors::ChessErrors;

/// One of the 64 board squares, identified by file (`a`..`h`) and rank
/// (`1`..`8`). A pure value: cheap to copy, structurally comparable, and
/// convertible to a flat `0..=63` index with `a1 == 0` and `h8 == 63`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Build a square from zero-based file and rank indices.
    ///
    /// # Returns
    /// * `Ok(Square)` if both indices are within `0..=7`.
    /// * `Err(ChessErrors::InvalidFileOrRank)` otherwise.
    pub fn from_file_rank(file: u8, rank: u8) -> Result<Square, ChessErrors> {
        if file > 7 || rank > 7 {
            return Err(ChessErrors::InvalidFileOrRank(file, rank));
        }
        Ok(Square { file, rank })
    }

    /// Parse algebraic notation (for example: "e4") into a square.
    pub fn from_algebraic(text: &str) -> Result<Square, ChessErrors> {
        let bytes = text.as_bytes();
        if bytes.len() != 2 {
            return Err(ChessErrors::FormatError(text.to_owned()));
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(ChessErrors::FormatError(text.to_owned()));
        }
        Ok(Square {
            file: file - b'a',
            rank: rank - b'1',
        })
    }

    /// Zero-based file index (`0 == a`).
    #[inline]
    pub fn file(self) -> u8 {
        self.file
    }

    /// Zero-based rank index (`0 == rank 1`).
    #[inline]
    pub fn rank(self) -> u8 {
        self.rank
    }

    /// Flat board index in `0..=63` (`rank * 8 + file`).
    #[inline]
    pub fn index(self) -> usize {
        (self.rank as usize) * 8 + self.file as usize
    }

    /// Inverse of [`Square::index`]. Only defined for `index < 64`.
    #[inline]
    pub fn from_index(index: usize) -> Square {
        debug_assert!(index < 64);
        Square {
            file: (index % 8) as u8,
            rank: (index / 8) as u8,
        }
    }

    /// Shift this square by a file/rank offset, or `None` if the result
    /// would fall off the board.
    pub fn offset(self, d_file: i8, d_rank: i8) -> Option<Square> {
        let file = self.file as i8 + d_file;
        let rank = self.rank as i8 + d_rank;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }

    /// Iterate every board square in index order (`a1`, `b1`, .., `h8`).
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square::from_index)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            char::from(b'a' + self.file),
            char::from(b'1' + self.rank)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_algebraic() -> Result<(), ChessErrors> {
        assert_eq!(Square::from_algebraic("a1")?.index(), 0);
        assert_eq!(Square::from_algebraic("h8")?.index(), 63);
        assert_eq!(Square::from_algebraic("E4")?.to_string(), "e4");
        Ok(())
    }

    #[test]
    fn rejects_malformed_squares() {
        assert!(Square::from_algebraic("i1").is_err());
        assert!(Square::from_algebraic("a9").is_err());
        assert!(Square::from_algebraic("e44").is_err());
        assert!(Square::from_file_rank(8, 0).is_err());
    }

    #[test]
    fn offsets_stay_on_board() -> Result<(), ChessErrors> {
        let e4 = Square::from_algebraic("e4")?;
        assert_eq!(e4.offset(1, 1), Some(Square::from_algebraic("f5")?));
        assert_eq!(Square::from_algebraic("a1")?.offset(-1, 0), None);
        assert_eq!(Square::from_algebraic("h8")?.offset(0, 1), None);
        Ok(())
    }
}
