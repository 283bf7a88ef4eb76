//! Errors used throughout the rules engine.
//!
//! This module defines the canonical error type returned by game logic and
//! parsing utilities. The enum `ChessErrors` is used as the single error type
//! across the crate to simplify propagation and matching. Each variant
//! carries contextual information where appropriate; the derived `Display`
//! messages are the user-facing rejection text shown by the shell.
//!
//! Every variant is recoverable: a rejected move leaves the board and turn
//! untouched, and the caller may retry with new input or undo. The engine
//! has no fatal error class.

use thiserror::Error;

use crate::piece::PieceKind;
use crate::square::Square;

/// Unified error type for the rules engine.
///
/// The move-rejection variants mirror the legality pipeline: text shape,
/// source occupancy, turn ownership, geometric shape, obstruction, target
/// occupancy, pawn law, castling preconditions, and finally the self-check
/// guard. Parsing variants (`FormatError`, `InvalidFileOrRank`, the FEN
/// variants) cover input handling for the same callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessErrors {
    /// Move or square text did not match the expected coordinate form.
    #[error("could not read {0:?}; enter moves like \"e2e4\" (promotion: \"e7e8q\")")]
    FormatError(String),

    /// Zero-based file or rank indices outside `0..=7`.
    #[error("file/rank indices ({0}, {1}) are off the board")]
    InvalidFileOrRank(u8, u8),

    /// The source square of a move holds no piece.
    #[error("there is no piece on {0}")]
    NoPieceAtSource(Square),

    /// The piece on the source square belongs to the side not on move.
    #[error("the {1} on {0} belongs to your opponent")]
    WrongTurn(Square, PieceKind),

    /// The file/rank offset does not match the piece kind's movement
    /// pattern, regardless of what else is on the board.
    #[error("a {0} cannot move from {1} to {2}")]
    ShapeViolation(PieceKind, Square, Square),

    /// A piece sits on the corridor strictly between source and destination.
    #[error("the path from {0} to {1} is blocked")]
    PathBlocked(Square, Square),

    /// The destination holds a piece of the mover's own color.
    #[error("{0} is already occupied by one of your own pieces")]
    FriendlyCapture(Square),

    /// A pawn move violating the advance/capture law: backward motion, a
    /// double step away from the home rank, an advance onto an occupied
    /// square, or a diagonal step onto an empty one.
    #[error("that pawn move from {0} to {1} breaks the pawn movement rules")]
    PawnRuleViolation(Square, Square),

    /// A two-square king move whose castling preconditions do not hold
    /// (king off its home square, or the rook missing from its corner).
    #[error("castling from {0} is not available")]
    InvalidCastle(Square),

    /// Castling that would move the king out of, through, or into check.
    #[error("castling here would move your king through or into check")]
    CastleIntoCheck,

    /// Any other move that would leave the mover's own king attacked.
    #[error("this move would leave your king in check")]
    SelfCheck,

    /// A move submitted after checkmate has ended the game; undo reopens
    /// play.
    #[error("the game is over; undo a move to keep playing")]
    GameOver,

    /// A single character in a FEN placement field was not a piece letter,
    /// digit, or rank separator.
    #[error("invalid FEN token {0:?}")]
    InvalidFenToken(char),

    /// A FEN string with malformed structure (wrong field or rank shape).
    #[error("invalid FEN string {0:?}")]
    InvalidFenString(String),
}
