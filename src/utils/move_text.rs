//! Coordinate move-text parsing.
//!
//! Moves arrive from the shell as four characters, `[a-h][1-8][a-h][1-8]`,
//! case-insensitive, optionally followed by a promotion letter (Q/R/B/N)
//! when a pawn reaches the last rank. Command tokens such as undo and quit
//! are the shell's business and never reach this parser.

use crate::chess_errors::ChessErrors;
use crate::piece::PieceKind;
use crate::square::Square;

/// A syntactically valid move request: source, destination, and the
/// optional promotion letter. Parsing says nothing about legality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl ParsedMove {
    pub fn new(from: Square, to: Square) -> Self {
        ParsedMove {
            from,
            to,
            promotion: None,
        }
    }
}

/// Parse move text into a [`ParsedMove`].
///
/// # Returns
/// * `Ok(ParsedMove)` for `e2e4`-style text with an optional trailing
///   promotion letter.
/// * `Err(ChessErrors::FormatError)` for anything else, before any board
///   inspection happens.
pub fn parse_move_text(text: &str) -> Result<ParsedMove, ChessErrors> {
    let trimmed = text.trim();
    // Only ASCII coordinate text is ever valid, and the guard keeps the
    // byte-index slices below from landing inside a multi-byte character.
    if !trimmed.is_ascii() || (trimmed.len() != 4 && trimmed.len() != 5) {
        return Err(ChessErrors::FormatError(text.to_owned()));
    }

    let from = Square::from_algebraic(&trimmed[0..2])
        .map_err(|_| ChessErrors::FormatError(text.to_owned()))?;
    let to = Square::from_algebraic(&trimmed[2..4])
        .map_err(|_| ChessErrors::FormatError(text.to_owned()))?;

    let promotion = match trimmed.as_bytes().get(4) {
        None => None,
        Some(letter) => Some(match letter.to_ascii_lowercase() {
            b'q' => PieceKind::Queen,
            b'r' => PieceKind::Rook,
            b'b' => PieceKind::Bishop,
            b'n' => PieceKind::Knight,
            _ => return Err(ChessErrors::FormatError(text.to_owned())),
        }),
    };

    Ok(ParsedMove {
        from,
        to,
        promotion,
    })
}
