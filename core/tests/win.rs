use bingo_core::{check_win, Board, Coordinate, SeededContent, FREE_CELL};

fn coord(row: usize, col: usize) -> Coordinate {
    Coordinate::new(row, col).expect("coordinate in range")
}

fn blank_board() -> Board {
    Board::create(&mut SeededContent::new(1)).toggle(FREE_CELL, false)
}

fn board_with(checked: &[(usize, usize)]) -> Board {
    checked
        .iter()
        .fold(blank_board(), |board, (row, col)| board.toggle(coord(*row, *col), true))
}

#[test]
fn blank_board_does_not_win() {
    assert!(!check_win(&blank_board()));
}

#[test]
fn full_row_wins_until_a_cell_is_unchecked() {
    let board = board_with(&[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)]);
    assert!(check_win(&board));
    let board = board.toggle(coord(0, 3), false);
    assert!(!check_win(&board));
}

#[test]
fn every_row_and_column_wins() {
    for line in 0..5 {
        let row: Vec<_> = (0..5).map(|col| (line, col)).collect();
        let col: Vec<_> = (0..5).map(|row| (row, line)).collect();
        assert!(check_win(&board_with(&row)), "row {line}");
        assert!(check_win(&board_with(&col)), "column {line}");
    }
}

#[test]
fn main_diagonal_wins() {
    let board = board_with(&[(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]);
    assert!(check_win(&board));
}

#[test]
fn anti_diagonal_wins() {
    let board = board_with(&[(0, 4), (1, 3), (2, 2), (3, 1), (4, 0)]);
    assert!(check_win(&board));
}

#[test]
fn fewer_than_five_checked_never_wins() {
    let board = board_with(&[(0, 0), (1, 1), (3, 3), (4, 4)]);
    assert!(!check_win(&board));
    let board = board_with(&[(1, 0), (1, 1), (1, 2), (1, 3)]);
    assert!(!check_win(&board));
}

#[test]
fn scattered_checks_without_a_line_do_not_win() {
    let board = board_with(&[
        (0, 0),
        (0, 1),
        (0, 2),
        (0, 3),
        (1, 4),
        (2, 0),
        (3, 1),
        (4, 2),
        (4, 3),
    ]);
    assert!(!check_win(&board));
}

#[test]
fn all_checked_board_wins() {
    let all: Vec<_> = Coordinate::all().map(|c| (c.row(), c.col())).collect();
    assert!(check_win(&board_with(&all)));
}

#[test]
fn swapping_a_checked_tile_into_a_line_completes_it() {
    let board = board_with(&[(0, 0), (0, 1), (0, 2), (0, 3), (3, 3)]);
    assert!(!check_win(&board));
    let board = board.swap(coord(3, 3), coord(0, 4));
    assert!(check_win(&board));
}
