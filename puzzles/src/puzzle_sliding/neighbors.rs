use arrayvec::ArrayVec;

pub const LEFT: usize = 0;
pub const UP: usize  = 1;
pub const RIGHT: usize  = 2;
pub const DOWN: usize  = 3;

/// Returns cell number = index of cell with given (`row`, `col`) coordinates in the board with `n` columns.
#[inline(always)] pub fn cell_nr(n: usize, row: usize, col: usize) -> usize { row * n + col }

/// Returns (row, col) coordinates of the cell with given number in the board with `n` columns.
#[inline(always)] pub fn cell_coords(n: usize, cell: usize) -> (usize, usize) { (cell / n, cell % n) }

/// Returns the number of the cell adjacent to `cell` in direction `dir` of the `n` x `n` board,
/// or `None` if `cell` lies on the border in that direction.
pub fn neighbor_in(n: usize, cell: usize, dir: usize) -> Option<usize> {
    let (r, c) = cell_coords(n, cell);
    match dir {
        LEFT => (c != 0).then(|| cell - 1),
        UP => (r != 0).then(|| cell - n),
        RIGHT => (c + 1 != n).then(|| cell + 1),
        DOWN => (r + 1 != n).then(|| cell + n),
        _ => None
    }
}

/// Returns neighbors (cell numbers) of the given `cell` of the `n` x `n` board,
/// in order: left, up, right, down.
pub fn neighbors_of(n: usize, cell: usize) -> ArrayVec<usize, 4> {
    let mut result = ArrayVec::<usize, 4>::new();
    for dir in [LEFT, UP, RIGHT, DOWN] {
        if let Some(neighbor_pos) = neighbor_in(n, cell, dir) {
            result.push(neighbor_pos);
        }
    }
    result
}
