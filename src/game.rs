//! Game orchestration: turn alternation, history, and terminal detection.
//!
//! `Game` owns the authoritative board, the side to move, and the undo
//! stack. Each move is delegated to the legality engine; the pre-move state
//! is snapshotted onto history only when the engine accepts, so a rejected
//! move leaves history length, board, and turn exactly as they were.

use crate::board::Board;
use crate::chess_errors::ChessErrors;
use crate::piece::{Piece, PieceColor, PieceKind};
use crate::rules::attacks::is_in_check;
use crate::rules::legality::{validate_and_apply, MoveOutcome};
use crate::square::Square;
use crate::utils::move_text::{parse_move_text, ParsedMove};

/// One undo record: the full pre-move state plus what the move captured.
///
/// Undo restores the board wholesale from the snapshot, which already
/// contains any captured piece; the `captured` field is kept alongside for
/// reporting.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub board: Board,
    pub side_to_move: PieceColor,
    pub captured: Option<(Square, Piece)>,
}

/// A two-player chess game in progress.
#[derive(Debug, Clone)]
pub struct Game {
    pub board: Board,
    pub side_to_move: PieceColor,
    pub game_over: bool,
    /// Debug override: permit moving either color regardless of the turn.
    pub allow_either_color: bool,
    history: Vec<HistoryEntry>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// An empty board with White to move; call [`Game::set_up_pieces`] or
    /// load a FEN to get a playable position.
    pub fn new() -> Self {
        Game {
            board: Board::new(),
            side_to_move: PieceColor::White,
            game_over: false,
            allow_either_color: false,
            history: Vec::new(),
        }
    }

    /// A fresh game from the standard initial position.
    pub fn new_game() -> Self {
        let mut game = Game::new();
        game.set_up_pieces();
        game
    }

    /// Build a game around an arbitrary position, used by the FEN loader.
    pub fn from_position(board: Board, side_to_move: PieceColor) -> Self {
        Game {
            board,
            side_to_move,
            game_over: false,
            allow_either_color: false,
            history: Vec::new(),
        }
    }

    /// Place the standard 32-piece starting arrangement.
    pub fn set_up_pieces(&mut self) {
        self.board = Board::new();
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file, kind) in back.into_iter().enumerate() {
            self.board.set(
                Square::from_index(file),
                Some(Piece::new(kind, PieceColor::White)),
            );
            self.board.set(
                Square::from_index(file + 56),
                Some(Piece::new(kind, PieceColor::Black)),
            );
            self.board.set(
                Square::from_index(file + 8),
                Some(Piece::new(PieceKind::Pawn, PieceColor::White)),
            );
            self.board.set(
                Square::from_index(file + 48),
                Some(Piece::new(PieceKind::Pawn, PieceColor::Black)),
            );
        }
        self.side_to_move = PieceColor::White;
        self.game_over = false;
        self.history.clear();
    }

    /// Attempt a move given as coordinate text (for example `e2e4`).
    ///
    /// On success the pre-move state is pushed onto history, the board
    /// advances, the turn flips, and `game_over` is raised if the new side
    /// to move is checkmated. Once `game_over` is set, every move is
    /// rejected until an undo reopens play. On rejection nothing changes
    /// and the engine's reason propagates.
    pub fn accept_move(&mut self, text: &str) -> Result<MoveOutcome, ChessErrors> {
        if self.game_over {
            return Err(ChessErrors::GameOver);
        }
        let parsed = parse_move_text(text)?;
        let (successor, outcome) = validate_and_apply(
            &self.board,
            self.side_to_move,
            self.allow_either_color,
            &parsed,
        )?;

        self.history.push(HistoryEntry {
            board: self.board.clone(),
            side_to_move: self.side_to_move,
            captured: outcome.captured,
        });
        self.board = successor;
        self.side_to_move = self.side_to_move.opposite();

        if self.is_checkmate(self.side_to_move) {
            self.game_over = true;
        }
        Ok(outcome)
    }

    /// Retract the most recent accepted move, restoring board and turn from
    /// the popped snapshot.
    ///
    /// # Returns
    /// * `true` if a move was undone.
    /// * `false` if there was nothing to undo (the shell shows a notice).
    pub fn undo_move(&mut self) -> bool {
        match self.history.pop() {
            Some(entry) => {
                self.board = entry.board;
                self.side_to_move = entry.side_to_move;
                self.game_over = false;
                true
            }
            None => false,
        }
    }

    /// Number of accepted moves still retractable.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Capture record of the most recent accepted move, if it took a piece.
    pub fn last_capture(&self) -> Option<(Square, Piece)> {
        self.history.last().and_then(|entry| entry.captured)
    }

    /// Enumerate every legal `(from, to)` pair for `color` by running each
    /// candidate through the full legality pipeline on a scratch board.
    ///
    /// Iteration order over squares is an implementation detail; callers
    /// should rely on set membership and count only. Promotion choice is
    /// not enumerated (the promoting advance itself is).
    pub fn generate_legal_moves(&self, color: PieceColor) -> Vec<(Square, Square)> {
        let mut moves = Vec::new();
        for (from, _) in self.board.pieces_of(color) {
            for to in Square::all() {
                let candidate = ParsedMove::new(from, to);
                if validate_and_apply(&self.board, color, false, &candidate).is_ok() {
                    moves.push((from, to));
                }
            }
        }
        moves
    }

    /// True iff `color` is in check and has no legal reply.
    pub fn is_checkmate(&self, color: PieceColor) -> bool {
        is_in_check(&self.board, color) && self.generate_legal_moves(color).is_empty()
    }

    /// True iff `color`'s king is currently attacked.
    pub fn is_in_check(&self, color: PieceColor) -> bool {
        is_in_check(&self.board, color)
    }
}
