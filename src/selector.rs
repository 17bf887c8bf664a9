//! Root move selection for the computer player

use tracing::{debug, info};

use crate::board::Board;
use crate::search::{Searcher, INFINITY};
use crate::WIDTH;

/// Returns a slice ordering the columns from the middle outwards, left
/// before right, as the middle columns are often better moves
pub const fn move_order() -> [usize; WIDTH] {
    let mut move_order = [0; WIDTH];
    let mut i = 0;
    while i < WIDTH {
        move_order[i] = (WIDTH / 2) - (i % 2) * (i / 2 + 1) + (1 - i % 2) * (i / 2);
        i += 1;
    }
    move_order
}

/// Picks the best column for the player to move, looking `search_depth` plies ahead
///
/// Columns are tried from the middle outwards and the first column with the
/// strictly greatest score is kept, so equal scores resolve towards the
/// middle.
///
/// # Panics
/// Debug builds panic if the board is already full.
pub fn select_move(board: &mut Board, search_depth: usize) -> usize {
    let mut searcher = Searcher::new(search_depth, board.player_to_move());
    select_move_with(&mut searcher, board)
}

/// Same as [`select_move`], accumulating the searched nodes in `searcher`
pub fn select_move_with(searcher: &mut Searcher, board: &mut Board) -> usize {
    debug_assert!(!board.is_full(), "no legal moves left to select from");

    let start_nodes = searcher.node_count;
    let mut best_score = -INFINITY;
    let mut best_move = WIDTH / 2;
    for &column in move_order().iter() {
        if let Some(score) = searcher.score_move(board, column) {
            debug!(column, score, "scored root move");
            if score > best_score {
                best_score = score;
                best_move = column;
            }
        }
    }

    info!(
        column = best_move,
        score = best_score,
        depth = searcher.depth(),
        nodes = searcher.node_count - start_nodes,
        "selected move"
    );
    best_move
}

/// Picks the best column from scores indexed by column, using the same tie-break as [`select_move`]
pub fn best_scored_column(scores: &[Option<i32>; WIDTH]) -> Option<usize> {
    let mut best: Option<(usize, i32)> = None;
    for &column in move_order().iter() {
        if let Some(score) = scores[column] {
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((column, score));
            }
        }
    }
    best.map(|(column, _)| column)
}
