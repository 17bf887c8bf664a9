/// Errors reported to callers of the board and game controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("Invalid move, column {column} out of range")]
    InvalidColumn { column: usize },

    #[error("Invalid move, column {column} full")]
    ColumnFull { column: usize },

    #[error("Invalid move, the game is over")]
    GameOver,

    #[error("could not parse '{character}' as a valid move")]
    InvalidMoveString { character: char },
}
