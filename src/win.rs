//! Detection of four tile alignments through the last placed tile

use crate::board::{Board, Cell, Player, Position};
use crate::{HEIGHT, WIDTH};

/// Number of aligned tiles needed to win
pub const LINE_LENGTH: usize = 4;

// horizontal, vertical, diagonal \, diagonal /
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Four adjacent, collinear tiles of the same player
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct WinningLine([Position; LINE_LENGTH]);

impl WinningLine {
    pub fn positions(&self) -> &[Position; LINE_LENGTH] {
        &self.0
    }

    pub fn contains(&self, position: Position) -> bool {
        self.0.contains(&position)
    }
}

/// Checks whether the tile `player` just placed at (`row`, `column`) completes a line
///
/// Directions are tried in the order horizontal, vertical, diagonal `\` then
/// diagonal `/`, the first one holding four tiles wins. The line is reported
/// starting from its far end in the direction of increasing row (or column,
/// for horizontal lines), so a vertical line lists its bottom tile first.
pub fn check_win(board: &Board, row: usize, column: usize, player: Player) -> Option<WinningLine> {
    let owned = Cell::Occupied(player);

    for &(d_row, d_column) in DIRECTIONS.iter() {
        let forward = run_length(board, row, column, d_row, d_column, owned);
        let backward = run_length(board, row, column, -d_row, -d_column, owned);

        if forward + backward + 1 < LINE_LENGTH {
            continue;
        }

        // lay the line out from the far forward end back through the placed tile
        let mut line = [Position::new(row, column); LINE_LENGTH];
        for (step, position) in line.iter_mut().enumerate() {
            let offset = forward as isize - step as isize;
            *position = Position::new(
                (row as isize + offset * d_row) as usize,
                (column as isize + offset * d_column) as usize,
            );
        }
        return Some(WinningLine(line));
    }

    None
}

// counts the tiles owned by the same player next to (row, column) in one direction
fn run_length(
    board: &Board,
    row: usize,
    column: usize,
    d_row: isize,
    d_column: isize,
    owned: Cell,
) -> usize {
    let mut count = 0;
    let (mut r, mut c) = (row as isize, column as isize);
    while count < LINE_LENGTH - 1 {
        r += d_row;
        c += d_column;
        if r < 0
            || r >= HEIGHT as isize
            || c < 0
            || c >= WIDTH as isize
            || board.cell(r as usize, c as usize) != owned
        {
            break;
        }
        count += 1;
    }
    count
}

#[cfg(test)]
mod test {
    use super::*;
    use anyhow::Result;

    fn last_move_wins(moves: &str) -> Result<Option<WinningLine>> {
        let mut board = Board::from_moves(&moves[..moves.len() - 1])?;
        let column = moves[moves.len() - 1..].parse::<usize>()? - 1;
        let player = board.player_to_move();
        let placement = board.drop(column, player)?;
        Ok(check_win(&board, placement.row(), placement.column(), player))
    }

    fn positions(cells: [(usize, usize); 4]) -> [Position; 4] {
        let mut out = [Position::new(0, 0); 4];
        for (i, &(row, column)) in cells.iter().enumerate() {
            out[i] = Position::new(row, column);
        }
        out
    }

    #[test]
    fn vertical() -> Result<()> {
        let line = last_move_wins("1212121").map(|line| line.map(|l| *l.positions()))?;
        assert_eq!(line, Some(positions([(5, 0), (4, 0), (3, 0), (2, 0)])));
        Ok(())
    }

    #[test]
    fn horizontal_filled_in_the_middle() -> Result<()> {
        // X plays 1, 2, 4 then fills the gap at 3
        let line = last_move_wins("1122443").map(|line| line.map(|l| *l.positions()))?;
        assert_eq!(line, Some(positions([(5, 3), (5, 2), (5, 1), (5, 0)])));
        Ok(())
    }

    #[test]
    fn only_four_are_reported() -> Result<()> {
        // X holds 1, 2, 4, 5 and completes a line of five at 3
        let line = last_move_wins("112244553").map(|line| line.map(|l| *l.positions()))?;
        assert_eq!(line, Some(positions([(5, 4), (5, 3), (5, 2), (5, 1)])));
        Ok(())
    }

    #[test]
    fn diagonals() -> Result<()> {
        // X climbs from the bottom left to the upper right
        let rising = last_move_wins("12234334544").map(|line| line.map(|l| *l.positions()))?;
        assert_eq!(rising, Some(positions([(5, 0), (4, 1), (3, 2), (2, 3)])));

        // mirrored, X climbs from the bottom right to the upper left
        let falling = last_move_wins("76654554344").map(|line| line.map(|l| *l.positions()))?;
        assert_eq!(falling, Some(positions([(5, 6), (4, 5), (3, 4), (2, 3)])));
        Ok(())
    }

    #[test]
    fn three_is_not_enough() -> Result<()> {
        assert_eq!(last_move_wins("121212")?, None);
        assert_eq!(last_move_wins("11223")?, None);
        // four in a row split by an opponent tile
        assert_eq!(last_move_wins("1122734")?, None);
        Ok(())
    }

    #[test]
    fn opponent_tiles_do_not_count() -> Result<()> {
        let board = Board::from_moves("1212121")?;
        // the winning column belongs to First, not Second
        assert_eq!(check_win(&board, 2, 0, Player::Second), None);
        Ok(())
    }
}
