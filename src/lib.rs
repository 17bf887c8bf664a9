//! A minimax agent for playing the board game 'Connect 4'
//!
//! This agent uses a depth-bounded game tree search with alpha-beta pruning
//! to pick the computer's move. Positions past the search horizon are scored
//! as neutral, so the agent only sees wins and losses within its depth.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_engine::{apply_move, computer_move, new_game, DEFAULT_SEARCH_DEPTH};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut game = new_game();
//! apply_move(&mut game, 0)?;
//!
//! let column = computer_move(&game, DEFAULT_SEARCH_DEPTH);
//! apply_move(&mut game, column)?;
//!
//! assert_eq!(game.history(), "14");
//!# Ok(())
//!# }
//! ```

use static_assertions::*;

pub mod board;

pub mod win;

pub mod search;

pub mod selector;

pub mod game;

pub mod error;

pub mod bench;


pub use board::{Board, Cell, Placement, Player, Position};
pub use error::EngineError;
pub use game::{apply_move, computer_move, new_game, GameState, Outcome};
pub use search::Searcher;
pub use selector::{move_order, select_move};
pub use win::{check_win, WinningLine};

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The number of plies the computer looks ahead, including its own move
pub const DEFAULT_SEARCH_DEPTH: usize = 4;

// a line of four must fit in every direction
const_assert!(WIDTH >= 4);
const_assert!(HEIGHT >= 4);
