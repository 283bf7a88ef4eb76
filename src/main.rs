use std::io::{self, BufRead, Write};

use clap::Parser;

use cedar_chess::game::Game;
use cedar_chess::utils::fen::parse_fen;
use cedar_chess::utils::render_board::render_board;

/// Two-player chess at the terminal, move validation included.
#[derive(Parser)]
#[command(name = "cedar_chess", version, about)]
struct Cli {
    /// Permit moving either color regardless of whose turn it is
    /// (debugging aid; every other rule still applies).
    #[arg(long)]
    debug: bool,

    /// Start from a FEN position instead of the standard setup.
    #[arg(long)]
    fen: Option<String>,
}

const INSTRUCTIONS: &str = "\
Welcome to Cedar Chess!

Instructions:
- Enter moves as source and destination squares, e.g. 'e2e4'.
- To castle, move the king two squares: 'e1g1' or 'e1c1' (if legal).
- A pawn reaching the last rank becomes a queen ('e7e8' or 'e7e8q').
- Enter 'u' or 'undo' to retract the last move.
- Enter 'q' or 'quit' to leave the game.

White begins the game.";

fn main() {
    let cli = Cli::parse();

    let mut game = match &cli.fen {
        Some(fen) => match parse_fen(fen) {
            Ok(game) => game,
            Err(e) => {
                eprintln!("Could not load the position: {e}");
                std::process::exit(1);
            }
        },
        None => Game::new_game(),
    };
    game.allow_either_color = cli.debug;

    println!("{INSTRUCTIONS}");

    let stdin = io::stdin();
    let mut input = String::new();

    while !game.game_over {
        println!("\n{}", render_board(&game.board));
        print!("{} to play: ", game.side_to_move);
        let _ = io::stdout().flush();

        input.clear();
        match stdin.lock().read_line(&mut input) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let command = input.trim().to_lowercase();
        if command.is_empty() {
            continue;
        }

        match command.as_str() {
            "u" | "undo" => {
                if !game.undo_move() {
                    println!("No moves to undo.");
                }
                continue;
            }
            "q" | "quit" => {
                println!("Game has been quit.");
                return;
            }
            _ => {}
        }

        match game.accept_move(&command) {
            Ok(outcome) => {
                if let Some((square, piece)) = outcome.captured {
                    println!("Captured the {} on {square}.", piece.kind);
                }
                if outcome.castled {
                    println!("Castled.");
                }
                if outcome.promoted {
                    println!("Pawn promoted to a queen.");
                }

                if game.game_over {
                    println!("\n{}", render_board(&game.board));
                    println!("Checkmate, {} wins!", game.side_to_move.opposite());
                } else if game.is_in_check(game.side_to_move) {
                    println!("{} is in check.", game.side_to_move);
                }
            }
            Err(e) => println!("Illegal move: {e}. Please try again."),
        }
    }
}
