//! Timing of the move selector over every opening up to a fixed length

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::info;

use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::game::{apply_move, GameState};
use crate::search::Searcher;
use crate::selector::select_move_with;
use crate::WIDTH;

/// Summary of a benchmark run
#[derive(Clone, Debug)]
pub struct BenchReport {
    /// Distinct unfinished positions searched
    pub positions: usize,
    pub total_nodes: usize,
    pub total_time: Duration,
}

impl BenchReport {
    pub fn mean_time(&self) -> Duration {
        if self.positions == 0 {
            return Duration::default();
        }
        Duration::from_secs_f64(self.total_time.as_secs_f64() / self.positions as f64)
    }

    pub fn mean_nodes(&self) -> f64 {
        if self.positions == 0 {
            return 0.0;
        }
        self.total_nodes as f64 / self.positions as f64
    }

    /// Thousands of positions searched per second
    pub fn kpos_per_sec(&self) -> f64 {
        let secs = self.total_time.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.total_nodes as f64 / (1000.0 * secs)
    }
}

/// Every distinct, unfinished position reached after exactly `plies` moves
pub fn openings(plies: usize) -> Vec<GameState> {
    let mut positions = Vec::new();
    let mut seen = HashSet::new();
    let mut moves = vec![0; plies];

    loop {
        if let Some(state) = replay(&moves) {
            // transpositions reach the same board through different move orders
            if seen.insert(state.board().clone()) {
                positions.push(state);
            }
        }

        // advance the odometer, carrying into earlier moves
        let mut d = plies;
        loop {
            if d == 0 {
                return positions;
            }
            d -= 1;
            moves[d] += 1;
            if moves[d] < WIDTH {
                break;
            }
            moves[d] = 0;
        }
    }
}

fn replay(moves: &[usize]) -> Option<GameState> {
    let mut state = GameState::new();
    for &column in moves {
        apply_move(&mut state, column).ok()?;
    }
    if state.is_over() {
        None
    } else {
        Some(state)
    }
}

/// Times the move selector at `depth` on every opening of `plies` moves
pub fn run(plies: usize, depth: usize, show_progress: bool) -> BenchReport {
    let positions = openings(plies);
    info!(plies, depth, positions = positions.len(), "starting benchmark");

    let progress = if show_progress {
        ProgressBar::new(positions.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Searching openings: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    let results: Vec<(usize, Duration)> = positions
        .par_iter()
        .map(|state| {
            let mut board = state.board().clone();
            let mut searcher = Searcher::new(depth, board.player_to_move());
            let start_time = Instant::now();
            let _ = select_move_with(&mut searcher, &mut board);
            let elapsed = start_time.elapsed();
            progress.inc(1);
            (searcher.node_count, elapsed)
        })
        .collect();
    progress.finish();

    BenchReport {
        positions: results.len(),
        total_nodes: results.iter().map(|(nodes, _)| nodes).sum(),
        total_time: results.iter().map(|(_, time)| *time).sum(),
    }
}
