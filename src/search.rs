//! Depth-bounded minimax search with alpha-beta pruning

use rayon::prelude::*;

use crate::board::{Board, Placement, Player};
use crate::selector::move_order;
use crate::win::check_win;
use crate::WIDTH;

/// Score of a win on the very first ply, later wins score one less per ply
pub const WIN_SCORE: i32 = 1000;

/// Bound of the search window, wider than any reachable score
pub const INFINITY: i32 = i32::MAX;

/// A minimax agent searching a fixed number of plies ahead
///
/// # Position Scoring
/// Scores are from the point of view of the player to move at the root (the
/// maximizing side). A line where that player completes four tiles after `n`
/// plies scores `WIN_SCORE - n`, a line where the opponent does scores
/// `-WIN_SCORE + n`, so quicker wins and slower losses are preferred. Full
/// boards and positions still open at the search horizon score 0, there is no
/// static evaluation of unfinished positions.
#[derive(Clone, Debug)]
pub struct Searcher {
    depth: usize,
    maximizer: Player,

    /// The number of nodes searched by this `Searcher` so far (for diagnostics only)
    pub node_count: usize,
}

impl Searcher {
    /// Creates a new `Searcher` looking `depth` plies ahead for `maximizer`
    ///
    /// The depth counts the root move itself, so a depth of 1 only looks for
    /// immediate wins.
    pub fn new(depth: usize, maximizer: Player) -> Self {
        Self {
            depth,
            maximizer,
            node_count: 0,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn maximizer(&self) -> Player {
        self.maximizer
    }

    /// Scores the position reached by `last`, with `depth` plies left to search
    ///
    /// `maximizing` tells whether the maximizer is the side to move next,
    /// so the tile in `last` belongs to the other side. The board is
    /// returned exactly as it was given.
    pub fn minimax(
        &mut self,
        board: &mut Board,
        last: &Placement,
        depth: usize,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.node_count += 1;

        // did the previous ply end the game?
        let position = last.position();
        if check_win(board, position.row, position.column, last.player()).is_some() {
            let plies = self.depth.saturating_sub(depth) as i32;
            return if maximizing {
                -WIN_SCORE + plies
            } else {
                WIN_SCORE - plies
            };
        }

        // draw
        if board.is_full() {
            return 0;
        }

        // search horizon, unfinished positions are neutral
        if depth == 0 {
            return 0;
        }

        let player = if maximizing {
            self.maximizer
        } else {
            self.maximizer.other()
        };

        let mut best = if maximizing { -INFINITY } else { INFINITY };
        for &column in move_order().iter() {
            let placement = match board.drop(column, player) {
                Ok(placement) => placement,
                Err(_) => continue,
            };
            let score = self.minimax(board, &placement, depth - 1, alpha, beta, !maximizing);
            board.undo(placement);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            // neither side will let the game reach this branch
            if beta <= alpha {
                break;
            }
        }
        best
    }

    /// Scores playing `column` as the maximizer's root move, `None` if the column is full
    pub fn score_move(&mut self, board: &mut Board, column: usize) -> Option<i32> {
        let placement = board.drop(column, self.maximizer).ok()?;
        let score = self.minimax(
            board,
            &placement,
            self.depth.saturating_sub(1),
            -INFINITY,
            INFINITY,
            false,
        );
        board.undo(placement);
        Some(score)
    }

    /// Scores every root move in parallel, indexed by column
    ///
    /// Each column is searched on its own copy of the board. The node counts
    /// of all workers are added to this `Searcher`.
    pub fn score_columns(&mut self, board: &Board) -> [Option<i32>; WIDTH] {
        let (depth, maximizer) = (self.depth, self.maximizer);
        let results: Vec<(usize, Option<i32>, usize)> = (0..WIDTH)
            .into_par_iter()
            .map(|column| {
                let mut worker = Searcher::new(depth, maximizer);
                let mut board = board.clone();
                let score = worker.score_move(&mut board, column);
                (column, score, worker.node_count)
            })
            .collect();

        let mut scores = [None; WIDTH];
        for (column, score, nodes) in results {
            scores[column] = score;
            self.node_count += nodes;
        }
        scores
    }
}
