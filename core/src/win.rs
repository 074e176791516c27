use crate::board::Board;
use crate::coord::BOARD_SIZE;

/// True when a full row, a full column, or either diagonal is checked.
///
/// Recomputed from scratch on every call; at 5x5 that is 25 cell reads.
pub fn check_win(board: &Board) -> bool {
    let n = BOARD_SIZE;
    let mut rows = [0usize; BOARD_SIZE];
    let mut cols = [0usize; BOARD_SIZE];
    let mut main_diagonal = 0usize;
    let mut anti_diagonal = 0usize;

    for (coord, tile) in board.iter() {
        if !tile.is_checked {
            continue;
        }
        let (row, col) = (coord.row(), coord.col());
        if row == col {
            main_diagonal += 1;
        }
        if row + col == n - 1 {
            anti_diagonal += 1;
        }
        rows[row] += 1;
        cols[col] += 1;
    }

    if main_diagonal == n || anti_diagonal == n {
        return true;
    }
    rows.iter().chain(cols.iter()).any(|count| *count == n)
}
