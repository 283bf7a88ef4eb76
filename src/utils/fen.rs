//! FEN position loading.
//!
//! Parses the piece-placement and side-to-move fields of a FEN string into a
//! [`Game`]. The castling-rights, en-passant, and clock fields are accepted
//! but ignored: the engine infers castling availability from pieces still
//! standing on their home squares and tracks no clocks. Used by tests to
//! build sparse positions and by the shell's `--fen` flag.

use crate::board::Board;
use crate::chess_errors::ChessErrors;
use crate::game::Game;
use crate::piece::{Piece, PieceColor, PieceKind};
use crate::square::Square;

/// Placement field of the standard initial position.
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parse a FEN string into a game with empty history.
///
/// # Returns
/// * `Ok(Game)` for a well-formed placement field; the side-to-move field
///   defaults to White when absent.
/// * `Err(ChessErrors::InvalidFenString | InvalidFenToken)` otherwise.
pub fn parse_fen(fen: &str) -> Result<Game, ChessErrors> {
    let mut fields = fen.split_whitespace();
    let placement = fields
        .next()
        .ok_or_else(|| ChessErrors::InvalidFenString(fen.to_owned()))?;

    let mut board = Board::new();
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessErrors::InvalidFenString(fen.to_owned()));
    }

    // FEN lists ranks from 8 down to 1.
    for (row, rank_text) in ranks.iter().enumerate() {
        let rank = 7 - row as u8;
        let mut file: u8 = 0;
        for token in rank_text.chars() {
            if let Some(skip) = token.to_digit(10) {
                file += skip as u8;
                // A rank can never describe more than eight files; bail
                // before a long digit run can wrap the accumulator.
                if file > 8 {
                    return Err(ChessErrors::InvalidFenString(fen.to_owned()));
                }
                continue;
            }
            if file > 7 {
                return Err(ChessErrors::InvalidFenString(fen.to_owned()));
            }
            let piece = piece_from_fen_token(token)?;
            board.set(Square::from_file_rank(file, rank)?, Some(piece));
            file += 1;
        }
        if file != 8 {
            return Err(ChessErrors::InvalidFenString(fen.to_owned()));
        }
    }

    let side_to_move = match fields.next() {
        None | Some("w") => PieceColor::White,
        Some("b") => PieceColor::Black,
        Some(other) => {
            return Err(ChessErrors::InvalidFenString(other.to_owned()));
        }
    };

    Ok(Game::from_position(board, side_to_move))
}

fn piece_from_fen_token(token: char) -> Result<Piece, ChessErrors> {
    let color = if token.is_ascii_uppercase() {
        PieceColor::White
    } else {
        PieceColor::Black
    };
    let kind = match token.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return Err(ChessErrors::InvalidFenToken(token)),
    };
    Ok(Piece::new(kind, color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_fen_matches_set_up_pieces() -> Result<(), ChessErrors> {
        let from_fen = parse_fen(STARTING_POSITION_FEN)?;
        let fresh = Game::new_game();
        assert_eq!(from_fen.board, fresh.board);
        assert_eq!(from_fen.side_to_move, PieceColor::White);
        Ok(())
    }

    #[test]
    fn side_to_move_and_sparse_placement() -> Result<(), ChessErrors> {
        let game = parse_fen("4k3/8/8/8/8/8/8/4K2R b - - 0 1")?;
        assert_eq!(game.side_to_move, PieceColor::Black);
        assert_eq!(game.board.pieces().count(), 3);
        assert_eq!(
            game.board.get(Square::from_algebraic("h1")?),
            Some(Piece::new(PieceKind::Rook, PieceColor::White))
        );
        Ok(())
    }

    #[test]
    fn malformed_fen_is_rejected() {
        assert!(matches!(
            parse_fen("rnbqkbnr/pppppppp/8/8"),
            Err(ChessErrors::InvalidFenString(_))
        ));
        assert!(matches!(
            parse_fen("rnbqkbnr/ppppppp1x/8/8/8/8/PPPPPPPP/RNBQKBNR w"),
            Err(ChessErrors::InvalidFenString(_) | ChessErrors::InvalidFenToken(_))
        ));
        assert!(matches!(
            parse_fen("9/8/8/8/8/8/8/8 w"),
            Err(ChessErrors::InvalidFenString(_))
        ));
    }

    #[test]
    fn long_digit_runs_are_rejected_without_overflow() {
        // A rank made of dozens of digits must fail cleanly instead of
        // wrapping the file accumulator.
        assert!(matches!(
            parse_fen("99999999999999999999999999999999/8/8/8/8/8/8/8 w"),
            Err(ChessErrors::InvalidFenString(_))
        ));
        assert!(matches!(
            parse_fen("54/8/8/8/8/8/8/8 w"),
            Err(ChessErrors::InvalidFenString(_))
        ));
    }
}
