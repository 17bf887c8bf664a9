//! Turn by turn state of a single match

use tracing::debug;

use crate::board::{parse_moves, Board, Player};
use crate::error::EngineError;
use crate::selector::select_move;
use crate::win::{check_win, WinningLine};
use crate::WIDTH;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    InProgress,
    Won(Player, WinningLine),
    Draw,
}

/// The board, the player to move and the result of a match
///
/// Only [`apply_move`] changes a `GameState`, and nothing changes it once
/// the outcome is decided.
#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    active_player: Player,
    outcome: Outcome,
    history: String,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            active_player: Player::First,
            outcome: Outcome::InProgress,
            history: String::new(),
        }
    }

    /// Replays a string of 1-indexed columns from the start of a match
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self, EngineError> {
        let mut state = Self::new();
        for column in parse_moves(moves.as_ref()) {
            apply_move(&mut state, column?)?;
        }
        Ok(state)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The player to move, or the player who made the last move once the game is over
    pub fn active_player(&self) -> Player {
        self.active_player
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome != Outcome::InProgress
    }

    /// The 1-indexed columns played so far
    pub fn history(&self) -> &str {
        &self.history
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn new_game() -> GameState {
    GameState::new()
}

/// Plays the active player's tile into `column` and moves the game on
///
/// Rejected moves leave the state untouched.
pub fn apply_move(state: &mut GameState, column: usize) -> Result<(), EngineError> {
    if state.is_over() {
        return Err(EngineError::GameOver);
    }
    if column >= WIDTH {
        return Err(EngineError::InvalidColumn { column });
    }

    let player = state.active_player;
    let placement = state.board.drop(column, player)?;
    state.history.push_str(&(column + 1).to_string());

    state.outcome = match check_win(&state.board, placement.row(), placement.column(), player) {
        Some(line) => Outcome::Won(player, line),
        None if state.board.is_full() => Outcome::Draw,
        None => {
            state.active_player = player.other();
            Outcome::InProgress
        }
    };
    debug!(
        ?player,
        column,
        row = placement.row(),
        outcome = ?state.outcome,
        "applied move"
    );
    Ok(())
}

/// Chooses the column for the active player, searching `depth` plies ahead
///
/// # Panics
/// Panics if the game is already over.
pub fn computer_move(state: &GameState, depth: usize) -> usize {
    assert!(
        !state.is_over(),
        "computer_move called on a finished game: {:?}",
        state.outcome
    );
    let mut board = state.board.clone();
    select_move(&mut board, depth)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::board::{Cell, Position};
    use crate::HEIGHT;
    use anyhow::Result;

    // fills the board column pairs at a time without ever lining up four
    const DRAWN_GAME: &str = "121212212121343434434343565656656565777777";

    #[test]
    fn starts_with_first_player() {
        let state = new_game();
        assert_eq!(state.active_player(), Player::First);
        assert_eq!(state.outcome(), Outcome::InProgress);
        assert_eq!(state.board().num_moves(), 0);
    }

    #[test]
    fn players_alternate() -> Result<()> {
        let mut state = new_game();
        apply_move(&mut state, 3)?;
        assert_eq!(state.active_player(), Player::Second);
        apply_move(&mut state, 3)?;
        assert_eq!(state.active_player(), Player::First);
        assert_eq!(state.history(), "44");
        Ok(())
    }

    #[test]
    fn vertical_win() -> Result<()> {
        let mut state = new_game();
        // the opponent plays elsewhere between each of First's tiles
        for &column in [0, 1, 0, 1, 0, 1, 0].iter() {
            apply_move(&mut state, column)?;
        }
        match state.outcome() {
            Outcome::Won(player, line) => {
                assert_eq!(player, Player::First);
                let rows: Vec<usize> = line.positions().iter().map(|p| p.row).collect();
                assert_eq!(rows, vec![5, 4, 3, 2]);
                assert!(line.positions().iter().all(|p| p.column == 0));
            }
            outcome => panic!("expected a win, got {:?}", outcome),
        }
        assert_eq!(state.active_player(), Player::First);
        assert_eq!(apply_move(&mut state, 2), Err(EngineError::GameOver));
        Ok(())
    }

    #[test]
    fn draw() -> Result<()> {
        let mut state = GameState::from_moves(DRAWN_GAME)?;
        assert_eq!(state.outcome(), Outcome::Draw);
        assert!(state.board().is_full());

        for column in 0..WIDTH {
            assert_eq!(apply_move(&mut state, column), Err(EngineError::GameOver));
        }
        assert_eq!(state.history(), DRAWN_GAME);
        Ok(())
    }

    #[test]
    fn rejected_moves_change_nothing() -> Result<()> {
        let mut state = new_game();
        for _ in 0..HEIGHT {
            apply_move(&mut state, 0)?;
        }
        let column_before: Vec<Cell> = (0..HEIGHT).map(|row| state.board().cell(row, 0)).collect();
        let player_before = state.active_player();

        assert_eq!(
            apply_move(&mut state, 0),
            Err(EngineError::ColumnFull { column: 0 })
        );
        assert_eq!(
            apply_move(&mut state, WIDTH),
            Err(EngineError::InvalidColumn { column: WIDTH })
        );

        let column_after: Vec<Cell> = (0..HEIGHT).map(|row| state.board().cell(row, 0)).collect();
        assert_eq!(column_before, column_after);
        assert_eq!(state.active_player(), player_before);
        assert_eq!(state.outcome(), Outcome::InProgress);
        assert_eq!(state.history(), "111111");
        Ok(())
    }

    #[test]
    fn replay_stops_at_the_end_of_the_game() {
        assert_eq!(
            GameState::from_moves("12121212").map(|state| state.history().to_string()),
            Err(EngineError::GameOver)
        );
    }

    #[test]
    fn computer_completes_a_line() -> Result<()> {
        let mut state = GameState::from_moves("717273")?;
        let column = computer_move(&state, 4);
        apply_move(&mut state, column)?;
        match state.outcome() {
            Outcome::Won(Player::First, line) => assert!(line.contains(Position::new(2, 6))),
            outcome => panic!("expected a win for First, got {:?}", outcome),
        }
        Ok(())
    }

    #[test]
    #[should_panic(expected = "finished game")]
    fn computer_move_on_finished_game_panics() {
        if let Ok(state) = GameState::from_moves("1212121") {
            let _ = computer_move(&state, 4);
        }
    }
}
