//! Terminal-oriented Unicode board renderer.
//!
//! Produces a human-readable grid from the board's read-only `get` view.
//! The piece-to-glyph mapping lives here, keyed only on kind and color; the
//! core never concerns itself with presentation.

use crate::board::Board;
use crate::piece::{Piece, PieceColor, PieceKind};
use crate::square::Square;

/// Render the board to a Unicode string for terminal output, rank 8 at the
/// top and coordinate labels on both edges.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for rank in (0..8u8).rev() {
        out.push(char::from(b'1' + rank));
        out.push(' ');

        for file in 0..8u8 {
            let square = Square::from_index(rank as usize * 8 + file as usize);
            match board.get(square) {
                Some(piece) => out.push(piece_to_unicode(piece)),
                None => out.push('·'),
            }
            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'1' + rank));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");
    out
}

fn piece_to_unicode(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (PieceColor::White, PieceKind::Pawn) => '♙',
        (PieceColor::White, PieceKind::Knight) => '♘',
        (PieceColor::White, PieceKind::Bishop) => '♗',
        (PieceColor::White, PieceKind::Rook) => '♖',
        (PieceColor::White, PieceKind::Queen) => '♕',
        (PieceColor::White, PieceKind::King) => '♔',
        (PieceColor::Black, PieceKind::Pawn) => '♟',
        (PieceColor::Black, PieceKind::Knight) => '♞',
        (PieceColor::Black, PieceKind::Bishop) => '♝',
        (PieceColor::Black, PieceKind::Rook) => '♜',
        (PieceColor::Black, PieceKind::Queen) => '♛',
        (PieceColor::Black, PieceKind::King) => '♚',
    }
}
