//! Crate root module declarations for the Cedar Chess rules engine.
//!
//! This file exposes the core subsystems (board model, geometry, legality
//! rules, game orchestration) and the thin text utilities (move parsing,
//! FEN loading, rendering) so the binary, tests, and external tooling can
//! import stable module paths.

pub mod board;
pub mod chess_errors;
pub mod game;
pub mod geometry;
pub mod piece;
pub mod square;

pub mod rules {
    pub mod attacks;
    pub mod legality;
}

pub mod utils {
    pub mod fen;
    pub mod move_text;
    pub mod render_board;
}
