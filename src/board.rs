//! A fixed size, gravity packed grid of tiles

use std::fmt;

use crate::{error::EngineError, HEIGHT, WIDTH};

/// One of the two sides of a game
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Player {
    First,
    Second,
}

impl Player {
    /// The opponent of this player
    pub fn other(self) -> Self {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    fn symbol(self) -> char {
        match self {
            Player::First => 'X',
            Player::Second => 'O',
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Cell {
    Empty,
    Occupied(Player),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// A tile on the board, row 0 is the top row
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Proof of a tile placed by [`Board::drop`]
///
/// The only way to clear a tile is to hand its `Placement` back to
/// [`Board::undo`], so a hypothetical move can only be taken back once and
/// only by whoever made it. Dropping the value keeps the tile on the board.
#[derive(PartialEq, Eq, Debug)]
#[must_use = "a placement is needed to undo the move or to check it for a win"]
pub struct Placement {
    position: Position,
    player: Player,
}

impl Placement {
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn row(&self) -> usize {
        self.position.row
    }

    pub fn column(&self) -> usize {
        self.position.column
    }

    pub fn player(&self) -> Player {
        self.player
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Board {
    cells: [[Cell; WIDTH]; HEIGHT], // cells are stored top-to-bottom, left-to-right
    heights: [usize; WIDTH],
    num_moves: usize,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; WIDTH]; HEIGHT],
            heights: [0; WIDTH],
            num_moves: 0,
        }
    }

    /// Replays a string of 1-indexed columns, alternating players from [`Player::First`]
    ///
    /// Wins are not checked, see [`crate::GameState::from_moves`] for a
    /// replay that stops at the end of the game.
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self, EngineError> {
        let mut board = Self::new();

        for column in parse_moves(moves.as_ref()) {
            let player = board.player_to_move();
            let _ = board.drop(column?, player)?;
        }
        Ok(board)
    }

    pub fn cell(&self, row: usize, column: usize) -> Cell {
        self.cells[row][column]
    }

    /// The number of tiles in a column
    pub fn column_height(&self, column: usize) -> usize {
        self.heights[column]
    }

    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    /// The player whose turn it is, assuming players alternate from [`Player::First`]
    pub fn player_to_move(&self) -> Player {
        if self.num_moves % 2 == 0 {
            Player::First
        } else {
            Player::Second
        }
    }

    pub fn playable(&self, column: usize) -> bool {
        column < WIDTH && self.heights[column] < HEIGHT
    }

    /// The row a tile dropped into `column` would land on, `None` if the column is full
    pub fn lowest_empty_row(&self, column: usize) -> Option<usize> {
        HEIGHT.checked_sub(self.heights[column] + 1)
    }

    /// Drops a tile for `player` into `column`
    pub fn drop(&mut self, column: usize, player: Player) -> Result<Placement, EngineError> {
        if column >= WIDTH {
            return Err(EngineError::InvalidColumn { column });
        }
        let row = self
            .lowest_empty_row(column)
            .ok_or(EngineError::ColumnFull { column })?;

        self.cells[row][column] = Cell::Occupied(player);
        self.heights[column] += 1;
        self.num_moves += 1;

        Ok(Placement {
            position: Position::new(row, column),
            player,
        })
    }

    /// Takes back a tile placed by [`Board::drop`]
    pub fn undo(&mut self, placement: Placement) {
        let Position { row, column } = placement.position;
        // only the topmost tile of a column can be taken back
        debug_assert_eq!(HEIGHT - self.heights[column], row);
        debug_assert_eq!(self.cells[row][column], Cell::Occupied(placement.player));

        self.cells[row][column] = Cell::Empty;
        self.heights[column] -= 1;
        self.num_moves -= 1;
    }

    /// True when no column accepts another tile
    pub fn is_full(&self) -> bool {
        self.cells[0].iter().all(|cell| !cell.is_empty())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.iter() {
            let line: String = row
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => '.',
                    Cell::Occupied(player) => player.symbol(),
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Parses 1-indexed column digits into 0-indexed columns
pub(crate) fn parse_moves(moves: &str) -> impl Iterator<Item = Result<usize, EngineError>> + '_ {
    moves.chars().map(|column_char| {
        match column_char.to_digit(10).map(|c| c as usize) {
            Some(column @ 1..=WIDTH) => Ok(column - 1),
            _ => Err(EngineError::InvalidMoveString {
                character: column_char,
            }),
        }
    })
}
