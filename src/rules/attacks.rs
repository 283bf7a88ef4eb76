//! Check and attack inspection.
//!
//! This module implements the attack relation used both for check detection
//! and for castling safety: whether a given piece could geometrically take a
//! given square, and whether any enemy piece currently attacks a square or a
//! king. It shares the corridor walk in [`crate::geometry`] with the
//! legality engine so the two can never disagree about obstruction.
//!
//! Nothing here mutates the board, and nothing here cares about turn order,
//! friendly collisions on the target, or self-check; those belong to the
//! legality engine.

use crate::board::Board;
use crate::geometry::{delta, path_is_clear};
use crate::piece::{Piece, PieceColor, PieceKind};
use crate::square::Square;

/// Shape-and-obstruction test: could `piece`, standing on `from`, take a
/// piece standing on `to`?
///
/// The pawn case is restricted to its two forward-diagonal capture squares —
/// a pawn never threatens along its line of advance. The king case is the
/// plain one-square ring; castling is not an attacking move.
pub fn piece_can_attack(board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    if from == to {
        return false;
    }
    let (dx, dy) = delta(from, to);

    match piece.kind {
        PieceKind::Bishop => dx == dy && path_is_clear(board, from, to),
        PieceKind::Rook => (dx == 0 || dy == 0) && path_is_clear(board, from, to),
        PieceKind::Queen => (dx == 0 || dy == 0 || dx == dy) && path_is_clear(board, from, to),
        PieceKind::Knight => (dx == 1 && dy == 2) || (dx == 2 && dy == 1),
        PieceKind::King => dx <= 1 && dy <= 1,
        PieceKind::Pawn => {
            let advance = to.rank() as i8 - from.rank() as i8;
            dx == 1 && advance == piece.color.forward()
        }
    }
}

/// True iff any piece of `by` attacks `target`. Used for check detection and
/// for the squares a castling king starts on, crosses, and lands on.
pub fn square_is_attacked(board: &Board, target: Square, by: PieceColor) -> bool {
    board
        .pieces_of(by)
        .any(|(from, piece)| piece_can_attack(board, piece, from, target))
}

/// Locate the king of `color`, if present.
pub fn find_king(board: &Board, color: PieceColor) -> Option<Square> {
    board
        .pieces_of(color)
        .find(|(_, piece)| piece.kind == PieceKind::King)
        .map(|(square, _)| square)
}

/// True iff the king of `color` is currently attacked.
///
/// A board with no king of `color` reads as not-in-check; that state is not
/// reachable through the game API but sparse test positions may hit it.
pub fn is_in_check(board: &Board, color: PieceColor) -> bool {
    match find_king(board, color) {
        Some(king_square) => square_is_attacked(board, king_square, color.opposite()),
        None => false,
    }
}
