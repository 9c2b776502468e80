use crate::puzzle_sliding::neighbors::cell_coords;
use crate::puzzle_sliding::state::Board;

/// Admissible estimate of the number of moves needed to reach the goal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// Sum of Manhattan distances of tiles to their goal cells.
    #[default]
    Manhattan,
    /// Number of misplaced cells.
    Hamming
}

impl Heuristic {
    /// Returns heuristic value for `board`.
    #[inline] pub fn evaluate(self, board: &Board) -> u32 {
        match self {
            Heuristic::Manhattan => calc_manhattan_heuristic(board),
            Heuristic::Hamming => calc_hamming_heuristic(board)
        }
    }
}

/// Returns Manhattan distance between the cells with given numbers on the board with `n` columns.
#[inline] pub fn cell_distance(n: usize, first_cell: usize, second_cell: usize) -> u32 {
    let (first_r, first_c) = cell_coords(n, first_cell);
    let (second_r, second_c) = cell_coords(n, second_cell);
    (first_r.abs_diff(second_r) + first_c.abs_diff(second_c)) as u32
}

pub fn calc_manhattan_heuristic(board: &Board) -> u32 {
    let n = board.dimension();
    board.iter().enumerate().map(|(i, t)| if t==0 { 0 } else { cell_distance(n, i, t as usize - 1) }).sum()
}

/// The bottom-right cell is never counted, as its goal is the blank.
pub fn calc_hamming_heuristic(board: &Board) -> u32 {
    let last = board.tiles().len() - 1;
    board.iter().take(last).enumerate().filter(|&(i, t)| t as usize != i + 1).count() as u32
}
