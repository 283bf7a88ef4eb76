//! The legality engine.
//!
//! Given a board, a side to move, and a parsed move request, this module
//! decides acceptance or rejection and produces the successor board. The
//! validation pipeline runs in a fixed order, each stage owning one
//! rejection reason:
//!
//! 1. source square occupied (`NoPieceAtSource`),
//! 2. mover's color matches the turn unless the debug override is active
//!    (`WrongTurn`),
//! 3. piece-kind shape over the absolute file/rank deltas
//!    (`ShapeViolation`),
//! 4. empty corridor for every non-knight (`PathBlocked`),
//! 5. destination not held by the mover's own side (`FriendlyCapture`),
//! 6. pawn advance/capture law layered on the generic checks
//!    (`PawnRuleViolation`),
//! 7. castling preconditions for the two-square king move
//!    (`InvalidCastle` / `PathBlocked` / `CastleIntoCheck`),
//! 8. the mover's king not attacked after the move (`SelfCheck`).
//!
//! All application is speculative: the move is played out on a duplicate of
//! the board and the caller commits the duplicate only on success, so a
//! rejected move can never leave the authoritative board mutated.

use crate::board::Board;
use crate::chess_errors::ChessErrors;
use crate::geometry::{delta, path_is_clear};
use crate::piece::{Piece, PieceColor, PieceKind};
use crate::rules::attacks::{is_in_check, square_is_attacked};
use crate::square::Square;
use crate::utils::move_text::ParsedMove;

/// What an accepted move did, for history records and shell reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The piece as it left the source square (pre-promotion).
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    /// Enemy piece removed from the destination, if any.
    pub captured: Option<(Square, Piece)>,
    /// The move was a castle (the paired rook was relocated too).
    pub castled: bool,
    /// A pawn reached the last rank and became a queen.
    pub promoted: bool,
}

/// Validate `mv` against `board` for `side` and, if legal, play it out.
///
/// # Returns
/// * `Ok((successor, outcome))` — the board after the move plus a summary;
///   `board` itself is never touched.
/// * `Err(ChessErrors)` — the pipeline stage that rejected the move.
///
/// `allow_either_color` is the debug override: it skips only the turn check,
/// every other rule still applies.
pub fn validate_and_apply(
    board: &Board,
    side: PieceColor,
    allow_either_color: bool,
    mv: &ParsedMove,
) -> Result<(Board, MoveOutcome), ChessErrors> {
    let ParsedMove { from, to, .. } = *mv;

    let piece = board.get(from).ok_or(ChessErrors::NoPieceAtSource(from))?;

    if piece.color != side && !allow_either_color {
        return Err(ChessErrors::WrongTurn(from, piece.kind));
    }

    let (dx, dy) = delta(from, to);
    check_shape(piece.kind, from, to, dx, dy)?;

    // Knights jump; everything else needs an empty corridor. The shapes
    // accepted above are all straight or diagonal, including the castling
    // two-step, so the shared walk is defined here.
    if piece.kind != PieceKind::Knight && !path_is_clear(board, from, to) {
        return Err(ChessErrors::PathBlocked(from, to));
    }

    if let Some(occupant) = board.get(to) {
        if occupant.color == piece.color {
            return Err(ChessErrors::FriendlyCapture(to));
        }
    }

    if piece.kind == PieceKind::Pawn {
        check_pawn_law(board, piece.color, from, to, dx)?;
    }

    if piece.kind == PieceKind::King && dx == 2 {
        let successor = castle(board, piece, from, to)?;
        let outcome = MoveOutcome {
            piece,
            from,
            to,
            captured: None,
            castled: true,
            promoted: false,
        };
        return Ok((successor, outcome));
    }

    // Speculative application on a duplicate; the original board stays
    // untouched whichever way the self-check test goes.
    let mut successor = board.clone();
    successor.remove(from);
    let captured = successor.remove(to).map(|taken| (to, taken));

    let promoted =
        piece.kind == PieceKind::Pawn && to.rank() == piece.color.opposite().back_rank();
    if promoted {
        // Under-promotion choice is not supported; a pawn on the last rank
        // always becomes a queen.
        successor.set(to, Some(Piece::new(PieceKind::Queen, piece.color)));
    } else {
        successor.set(to, Some(piece));
    }

    if is_in_check(&successor, piece.color) {
        return Err(ChessErrors::SelfCheck);
    }

    let outcome = MoveOutcome {
        piece,
        from,
        to,
        captured,
        castled: false,
        promoted,
    };
    Ok((successor, outcome))
}

/// Geometric shape law per piece kind, over absolute deltas only. Occupancy,
/// direction, and castling preconditions are later stages.
fn check_shape(
    kind: PieceKind,
    from: Square,
    to: Square,
    dx: u8,
    dy: u8,
) -> Result<(), ChessErrors> {
    let ok = match kind {
        PieceKind::Bishop => dx == dy,
        PieceKind::Rook => (dx == 0) != (dy == 0),
        PieceKind::Queen => dx == dy || (dx == 0) != (dy == 0),
        PieceKind::Knight => (dx == 1 && dy == 2) || (dx == 2 && dy == 1),
        // One-square ring, or the castling two-step along the rank; whether
        // the two-step is actually a permitted castle is decided later.
        PieceKind::King => (dx <= 1 && dy <= 1) || (dx == 2 && dy == 0),
        PieceKind::Pawn => matches!((dx, dy), (0, 1) | (0, 2) | (1, 1)),
    };
    if ok {
        Ok(())
    } else {
        Err(ChessErrors::ShapeViolation(kind, from, to))
    }
}

/// Signed pawn law on top of the generic shape/path/collision checks:
/// advances must be forward onto an empty square (two squares only from the
/// home rank), diagonal steps must capture.
fn check_pawn_law(
    board: &Board,
    color: PieceColor,
    from: Square,
    to: Square,
    dx: u8,
) -> Result<(), ChessErrors> {
    let advance = to.rank() as i8 - from.rank() as i8;
    let forward = color.forward();

    let legal = if dx == 0 {
        let reach_ok = advance == forward
            || (advance == 2 * forward && from.rank() == color.pawn_home_rank());
        reach_ok && board.get(to).is_none()
    } else {
        advance == forward && board.get(to).is_some()
    };

    if legal {
        Ok(())
    } else {
        Err(ChessErrors::PawnRuleViolation(from, to))
    }
}

/// Validate and play out a two-square king move as a castle.
///
/// Preconditions, in order: the king stands on its home square and the
/// matching rook on its home corner (`InvalidCastle`); every square strictly
/// between them is empty (`PathBlocked`); the squares the king starts on,
/// crosses, and lands on are unattacked (`CastleIntoCheck`). The rook lands
/// on the square the king crossed.
///
/// "Unmoved" is inferred purely from the pieces still sitting on their home
/// squares; a king or rook that has wandered away and back regains the
/// right.
fn castle(board: &Board, king: Piece, from: Square, to: Square) -> Result<Board, ChessErrors> {
    let back = king.color.back_rank() as usize;
    let home = Square::from_index(4 + 8 * back);
    if from != home {
        return Err(ChessErrors::InvalidCastle(from));
    }

    let kingside = to.file() > from.file();
    let corner_file = if kingside { 7 } else { 0 };
    let rook_from = Square::from_index(corner_file + 8 * back);
    match board.get(rook_from) {
        Some(corner) if corner == Piece::new(PieceKind::Rook, king.color) => {}
        _ => return Err(ChessErrors::InvalidCastle(from)),
    }

    // The whole corridor between king and rook, not just the king's two
    // steps (queenside b-file matters here).
    if !path_is_clear(board, home, rook_from) {
        return Err(ChessErrors::PathBlocked(from, to));
    }

    // Midpoint of the king's two-step; also where the rook lands.
    let transit = Square::from_index((4 + to.file() as usize) / 2 + 8 * back);
    let enemy = king.color.opposite();
    for crossing in [from, transit, to] {
        if square_is_attacked(board, crossing, enemy) {
            return Err(ChessErrors::CastleIntoCheck);
        }
    }

    let mut successor = board.clone();
    successor.remove(home);
    successor.remove(rook_from);
    successor.set(to, Some(king));
    successor.set(transit, Some(Piece::new(PieceKind::Rook, king.color)));

    // Final guard on the provisional board, same as a regular move.
    if is_in_check(&successor, king.color) {
        return Err(ChessErrors::CastleIntoCheck);
    }
    Ok(successor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> Square {
        Square::from_algebraic(text).expect("test square should parse")
    }

    fn mv(text: &str) -> ParsedMove {
        crate::utils::move_text::parse_move_text(text).expect("test move should parse")
    }

    fn put(board: &mut Board, text: &str, kind: PieceKind, color: PieceColor) {
        board.set(sq(text), Some(Piece::new(kind, color)));
    }

    /// Both kings far from the action so sparse positions stay sane.
    fn kings_in_corners() -> Board {
        let mut board = Board::new();
        put(&mut board, "a1", PieceKind::King, PieceColor::White);
        put(&mut board, "a8", PieceKind::King, PieceColor::Black);
        board
    }

    fn try_white(board: &Board, text: &str) -> Result<(Board, MoveOutcome), ChessErrors> {
        validate_and_apply(board, PieceColor::White, false, &mv(text))
    }

    #[test]
    fn empty_source_is_rejected_first() {
        let board = kings_in_corners();
        assert_eq!(
            try_white(&board, "e4e5").unwrap_err(),
            ChessErrors::NoPieceAtSource(sq("e4"))
        );
    }

    #[test]
    fn shape_violations_ignore_occupancy() {
        let mut board = kings_in_corners();
        put(&mut board, "c1", PieceKind::Bishop, PieceColor::White);
        put(&mut board, "h1", PieceKind::Rook, PieceColor::White);
        put(&mut board, "d1", PieceKind::Queen, PieceColor::White);
        put(&mut board, "g1", PieceKind::Knight, PieceColor::White);
        // Blockers everywhere; shape is still checked before obstruction.
        put(&mut board, "c2", PieceKind::Pawn, PieceColor::White);
        put(&mut board, "h2", PieceKind::Pawn, PieceColor::White);

        for (text, kind) in [
            ("c1c3", PieceKind::Bishop),
            ("h1g3", PieceKind::Rook),
            ("d1e3", PieceKind::Queen),
            ("g1g3", PieceKind::Knight),
        ] {
            let request = mv(text);
            assert_eq!(
                try_white(&board, text).unwrap_err(),
                ChessErrors::ShapeViolation(kind, request.from, request.to),
                "{text} should violate the {kind} shape"
            );
        }
    }

    #[test]
    fn sliders_cannot_jump() {
        let mut board = kings_in_corners();
        put(&mut board, "d1", PieceKind::Rook, PieceColor::White);
        put(&mut board, "d4", PieceKind::Pawn, PieceColor::Black);
        assert_eq!(
            try_white(&board, "d1d8").unwrap_err(),
            ChessErrors::PathBlocked(sq("d1"), sq("d8"))
        );
        // Capturing the blocker itself is fine.
        assert!(try_white(&board, "d1d4").is_ok());
    }

    #[test]
    fn friendly_occupancy_blocks_every_kind() {
        let mut board = kings_in_corners();
        put(&mut board, "d1", PieceKind::Queen, PieceColor::White);
        put(&mut board, "d5", PieceKind::Pawn, PieceColor::White);
        put(&mut board, "b1", PieceKind::Knight, PieceColor::White);
        put(&mut board, "c3", PieceKind::Bishop, PieceColor::White);

        assert_eq!(
            try_white(&board, "d1d5").unwrap_err(),
            ChessErrors::FriendlyCapture(sq("d5"))
        );
        assert_eq!(
            try_white(&board, "b1c3").unwrap_err(),
            ChessErrors::FriendlyCapture(sq("c3"))
        );
    }

    #[test]
    fn turn_ownership_with_and_without_override() {
        let mut board = kings_in_corners();
        put(&mut board, "e7", PieceKind::Pawn, PieceColor::Black);

        assert_eq!(
            try_white(&board, "e7e5").unwrap_err(),
            ChessErrors::WrongTurn(sq("e7"), PieceKind::Pawn)
        );
        // Debug override skips only the turn check.
        let (after, outcome) =
            validate_and_apply(&board, PieceColor::White, true, &mv("e7e5")).unwrap();
        assert_eq!(outcome.piece.color, PieceColor::Black);
        assert!(after.get(sq("e5")).is_some());
    }

    #[test]
    fn pawn_advances_and_captures() {
        let mut board = kings_in_corners();
        put(&mut board, "e2", PieceKind::Pawn, PieceColor::White);
        put(&mut board, "d3", PieceKind::Pawn, PieceColor::Black);

        // Single and double advances from the home rank.
        assert!(try_white(&board, "e2e3").is_ok());
        assert!(try_white(&board, "e2e4").is_ok());
        // Diagonal only onto an enemy piece.
        assert!(try_white(&board, "e2d3").is_ok());
        assert_eq!(
            try_white(&board, "e2f3").unwrap_err(),
            ChessErrors::PawnRuleViolation(sq("e2"), sq("f3"))
        );
    }

    #[test]
    fn pawn_rule_violations() {
        let mut board = kings_in_corners();
        put(&mut board, "e4", PieceKind::Pawn, PieceColor::White);
        put(&mut board, "h7", PieceKind::Pawn, PieceColor::White);
        put(&mut board, "c2", PieceKind::Pawn, PieceColor::White);
        put(&mut board, "c3", PieceKind::Knight, PieceColor::Black);
        put(&mut board, "e5", PieceKind::Pawn, PieceColor::Black);

        // Backward, double step off the home rank, blocked advances.
        for text in ["e4e3", "e4e6", "h7h5", "c2c3", "e4e5"] {
            assert!(
                matches!(
                    try_white(&board, text),
                    Err(ChessErrors::PawnRuleViolation(_, _))
                ),
                "{text} should break the pawn law"
            );
        }
        // A double step whose first square is blocked is an obstruction.
        assert_eq!(
            try_white(&board, "c2c4").unwrap_err(),
            ChessErrors::PathBlocked(sq("c2"), sq("c4"))
        );
    }

    #[test]
    fn promotion_always_yields_a_queen() {
        let mut board = kings_in_corners();
        put(&mut board, "g7", PieceKind::Pawn, PieceColor::White);

        for text in ["g7g8", "g7g8q", "g7g8n"] {
            let (after, outcome) = try_white(&board, text).unwrap();
            assert!(outcome.promoted);
            assert_eq!(
                after.get(sq("g8")),
                Some(Piece::new(PieceKind::Queen, PieceColor::White))
            );
        }
    }

    #[test]
    fn self_check_is_rejected_and_the_board_survives() {
        let mut board = Board::new();
        put(&mut board, "e1", PieceKind::King, PieceColor::White);
        put(&mut board, "e2", PieceKind::Rook, PieceColor::White);
        put(&mut board, "e8", PieceKind::Rook, PieceColor::Black);
        put(&mut board, "h8", PieceKind::King, PieceColor::Black);
        let before = board.clone();

        // Moving the rook off the file exposes the king.
        assert_eq!(
            try_white(&board, "e2a2").unwrap_err(),
            ChessErrors::SelfCheck
        );
        // Sliding along the file keeps the shield in place.
        assert!(try_white(&board, "e2e5").is_ok());
        assert_eq!(board, before);
    }

    #[test]
    fn kingside_castle_moves_both_pieces() {
        let mut board = Board::new();
        put(&mut board, "e1", PieceKind::King, PieceColor::White);
        put(&mut board, "h1", PieceKind::Rook, PieceColor::White);
        put(&mut board, "e8", PieceKind::King, PieceColor::Black);

        let (after, outcome) = try_white(&board, "e1g1").unwrap();
        assert!(outcome.castled);
        assert_eq!(
            after.get(sq("g1")),
            Some(Piece::new(PieceKind::King, PieceColor::White))
        );
        assert_eq!(
            after.get(sq("f1")),
            Some(Piece::new(PieceKind::Rook, PieceColor::White))
        );
        assert_eq!(after.get(sq("e1")), None);
        assert_eq!(after.get(sq("h1")), None);
    }

    #[test]
    fn queenside_castle_moves_both_pieces() {
        let mut board = Board::new();
        put(&mut board, "e1", PieceKind::King, PieceColor::White);
        put(&mut board, "a1", PieceKind::Rook, PieceColor::White);
        put(&mut board, "e8", PieceKind::King, PieceColor::Black);

        let (after, _) = try_white(&board, "e1c1").unwrap();
        assert_eq!(
            after.get(sq("c1")),
            Some(Piece::new(PieceKind::King, PieceColor::White))
        );
        assert_eq!(
            after.get(sq("d1")),
            Some(Piece::new(PieceKind::Rook, PieceColor::White))
        );
        assert_eq!(after.get(sq("a1")), None);
    }

    #[test]
    fn castle_rejections() {
        // No rook on the corner.
        let mut board = Board::new();
        put(&mut board, "e1", PieceKind::King, PieceColor::White);
        put(&mut board, "e8", PieceKind::King, PieceColor::Black);
        assert_eq!(
            try_white(&board, "e1g1").unwrap_err(),
            ChessErrors::InvalidCastle(sq("e1"))
        );

        // King not on its home square.
        let mut board = Board::new();
        put(&mut board, "d1", PieceKind::King, PieceColor::White);
        put(&mut board, "h1", PieceKind::Rook, PieceColor::White);
        put(&mut board, "e8", PieceKind::King, PieceColor::Black);
        assert_eq!(
            try_white(&board, "d1f1").unwrap_err(),
            ChessErrors::InvalidCastle(sq("d1"))
        );

        // Occupied corridor, including the queenside b-file square the
        // king never crosses.
        let mut board = Board::new();
        put(&mut board, "e1", PieceKind::King, PieceColor::White);
        put(&mut board, "a1", PieceKind::Rook, PieceColor::White);
        put(&mut board, "b1", PieceKind::Knight, PieceColor::White);
        put(&mut board, "e8", PieceKind::King, PieceColor::Black);
        assert_eq!(
            try_white(&board, "e1c1").unwrap_err(),
            ChessErrors::PathBlocked(sq("e1"), sq("c1"))
        );

        // Transit square covered by an enemy rook.
        let mut board = Board::new();
        put(&mut board, "e1", PieceKind::King, PieceColor::White);
        put(&mut board, "h1", PieceKind::Rook, PieceColor::White);
        put(&mut board, "f8", PieceKind::Rook, PieceColor::Black);
        put(&mut board, "a8", PieceKind::King, PieceColor::Black);
        assert_eq!(
            try_white(&board, "e1g1").unwrap_err(),
            ChessErrors::CastleIntoCheck
        );

        // Landing square covered.
        let mut board = Board::new();
        put(&mut board, "e1", PieceKind::King, PieceColor::White);
        put(&mut board, "h1", PieceKind::Rook, PieceColor::White);
        put(&mut board, "g8", PieceKind::Rook, PieceColor::Black);
        put(&mut board, "a8", PieceKind::King, PieceColor::Black);
        assert_eq!(
            try_white(&board, "e1g1").unwrap_err(),
            ChessErrors::CastleIntoCheck
        );

        // Castling out of an existing check.
        let mut board = Board::new();
        put(&mut board, "e1", PieceKind::King, PieceColor::White);
        put(&mut board, "h1", PieceKind::Rook, PieceColor::White);
        put(&mut board, "e8", PieceKind::Rook, PieceColor::Black);
        put(&mut board, "a8", PieceKind::King, PieceColor::Black);
        assert_eq!(
            try_white(&board, "e1g1").unwrap_err(),
            ChessErrors::CastleIntoCheck
        );
    }
}
