use crate::error::PuzzleError;
use crate::puzzle_sliding::heuristic::{calc_hamming_heuristic, calc_manhattan_heuristic};
use crate::puzzle_sliding::neighbors::{cell_coords, cell_nr, neighbors_of};
use crate::puzzle_sliding::parse::parse_board;
use crate::puzzle_sliding::utils::{Tile, MAX_DIMENSION, MIN_DIMENSION};
use arrayvec::ArrayVec;
use std::fmt;
use std::str::FromStr;

/// Board state of the `n` x `n` sliding puzzle.
///
/// `Board` is immutable: successors and the twin are new, independently owned boards.
/// Two boards are equal iff all their cells hold the same tiles.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Board {
    /// Indexed by cell numbers (row-major), gives tiles that occupy given cell.
    tiles: Box<[Tile]>,

    /// Length of the board side.
    dimension: u8,

    // Index of blank (to speed up operations).
    blank: u16
}

/// Returns an error if boards with given side length are not supported.
pub(crate) fn check_dimension(dimension: usize) -> Result<(), PuzzleError> {
    if (MIN_DIMENSION..=MAX_DIMENSION).contains(&dimension) {
        Ok(())
    } else {
        Err(PuzzleError::InvalidInput(format!(
            "board dimension {} is outside the supported range {}..={}",
            dimension, MIN_DIMENSION, MAX_DIMENSION)))
    }
}

impl Board {
    /// Constructs the board of given `dimension` from `tiles` listed in row-major order.
    ///
    /// Fails with [`PuzzleError::InvalidInput`] unless `tiles` is a permutation of `0..dimension²`.
    pub fn from_tiles(dimension: usize, tiles: Vec<Tile>) -> Result<Self, PuzzleError> {
        check_dimension(dimension)?;
        let cells = dimension * dimension;
        if tiles.len() != cells {
            return Err(PuzzleError::InvalidInput(format!(
                "{}x{} board needs {} tiles, got {}", dimension, dimension, cells, tiles.len())));
        }
        let mut seen = vec![false; cells];
        let mut blank = None;
        for (cell, &tile) in tiles.iter().enumerate() {
            let seen_tile = seen.get_mut(tile as usize).ok_or_else(|| PuzzleError::InvalidInput(
                format!("tile {} in cell {} is outside the range 0..{}", tile, cell, cells)))?;
            if *seen_tile {
                return Err(PuzzleError::InvalidInput(format!("tile {} occurs more than once", tile)));
            }
            *seen_tile = true;
            if tile == 0 { blank = Some(cell); }
        }
        let blank = blank.ok_or_else(|| PuzzleError::InvalidInput("board has no blank".to_owned()))?;
        Ok(Self { tiles: tiles.into_boxed_slice(), dimension: dimension as u8, blank: blank as u16 })
    }

    /// Constructs the board from its rows, `rows[r][c]` is the tile at (`r`, `c`).
    pub fn from_rows<R: AsRef<[Tile]>>(rows: &[R]) -> Result<Self, PuzzleError> {
        let n = rows.len();
        check_dimension(n)?;
        let mut tiles = Vec::with_capacity(n * n);
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n {
                return Err(PuzzleError::InvalidInput(format!(
                    "row {} has {} tiles, but the board has {} rows", r, row.len(), n)));
            }
            tiles.extend_from_slice(row);
        }
        Self::from_tiles(n, tiles)
    }

    /// Constructs goal state of the `dimension` x `dimension` board.
    ///
    /// # Panics
    /// If `dimension` is outside `MIN_DIMENSION..=MAX_DIMENSION`.
    pub fn goal(dimension: usize) -> Self {
        assert!((MIN_DIMENSION..=MAX_DIMENSION).contains(&dimension));
        let cells = dimension * dimension;
        let tiles: Box<[Tile]> = (1..cells as Tile).chain(std::iter::once(0)).collect();
        Self { tiles, dimension: dimension as u8, blank: (cells - 1) as u16 }
    }

    /// Returns board side length.
    #[inline] pub fn dimension(&self) -> usize { self.dimension as usize }

    /// Tile at (`row`, `col`).
    #[inline] pub fn tile_at(&self, row: usize, col: usize) -> Tile {
        self.tiles[cell_nr(self.dimension(), row, col)]
    }

    /// Tiles in row-major order.
    #[inline] pub fn tiles(&self) -> &[Tile] { &self.tiles }

    /// Returns (row, col) of the blank.
    #[inline] pub fn blank(&self) -> (usize, usize) {
        cell_coords(self.dimension(), self.blank as usize)
    }

    /// Checks whether each cell but the last one holds its goal tile.
    pub fn is_goal(&self) -> bool {
        let last = self.tiles.len() - 1;
        self.tiles[..last].iter().enumerate().all(|(cell, &tile)| tile as usize == cell + 1)
    }

    /// Number of cells, except the bottom-right one, that do not hold their goal tiles.
    #[inline] pub fn hamming(&self) -> u32 { calc_hamming_heuristic(self) }

    /// Sum of Manhattan distances between non-blank tiles and their goal cells.
    #[inline] pub fn manhattan(&self) -> u32 { calc_manhattan_heuristic(self) }

    /// Returns copy of `self` with tiles in cells `a` and `b` exchanged.
    fn with_swapped(&self, a: usize, b: usize) -> Self {
        let mut tiles = self.tiles.clone();
        tiles.swap(a, b);
        let blank = self.blank as usize;
        let blank = if blank == a { b } else if blank == b { a } else { blank };
        Self { tiles, dimension: self.dimension, blank: blank as u16 }
    }

    /// Returns boards reachable by sliding one tile into the blank.
    pub fn neighbors(&self) -> ArrayVec<Board, 4> {
        let blank = self.blank as usize;
        neighbors_of(self.dimension(), blank).into_iter()
            .map(|cell| self.with_swapped(blank, cell))
            .collect()
    }

    /// Returns the board obtained by exchanging the first two non-blank tiles (in row-major order).
    ///
    /// Exactly one of `self` and its twin can be solved.
    pub fn twin(&self) -> Self {
        let (a, b) = match self.blank {
            0 => (1, 2),
            1 => (0, 2),
            _ => (0, 1)
        };
        self.with_swapped(a, b)
    }

    /// Checks (by the parity of the permutation) whether the goal can be achieved from `self`.
    pub fn has_solvable_parity(&self) -> bool {
        let inversions: usize = self.tiles.iter().enumerate()
            .filter(|&(_, &tile)| tile != 0)
            .map(|(i, &tile)| self.tiles[i+1..].iter().filter(|&&next| next != 0 && next < tile).count())
            .sum();
        if self.dimension % 2 == 1 {
            inversions % 2 == 0
        } else {
            let (blank_row, _) = self.blank();
            (inversions + blank_row) % 2 == 1
        }
    }

    #[inline] pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, Tile>> {
        self.tiles.iter().copied()
    }
}

impl fmt::Display for Board {
    /// Prints the dimension and then rows of tiles, each tile right-aligned in 2 columns.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.dimension)?;
        for row in self.tiles.chunks(self.dimension()) {
            for tile in row {
                write!(f, "{:2} ", tile)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = PuzzleError;

    #[inline] fn from_str(s: &str) -> Result<Self, Self::Err> { parse_board(s) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn differing_cells(a: &Board, b: &Board) -> Vec<usize> {
        a.tiles().iter().zip(b.tiles()).enumerate()
            .filter(|(_, (x, y))| x != y).map(|(cell, _)| cell).collect()
    }

    #[test]
    fn test_goal_33() {
        let goal = Board::goal(3);
        assert_eq!(goal.dimension(), 3);
        assert_eq!(goal.tiles(), &[1, 2, 3, 4, 5, 6, 7, 8, 0]);
        assert_eq!(goal.blank(), (2, 2));
        assert!(goal.is_goal());
        assert_eq!(goal.hamming(), 0);
        assert_eq!(goal.manhattan(), 0);
        assert_eq!(goal, Board::from_rows(&[[1, 2, 3], [4, 5, 6], [7, 8, 0]]).unwrap());
    }

    #[test]
    fn test_goal_22() {
        let goal = Board::goal(2);
        assert_eq!(goal.tiles(), &[1, 2, 3, 0]);
        assert!(goal.is_goal());
    }

    #[test]
    fn test_from_rows_33() {
        let board = Board::from_rows(&[[8, 1, 3], [4, 0, 2], [7, 6, 5]]).unwrap();
        assert_eq!(board.dimension(), 3);
        assert_eq!(board.tile_at(0, 0), 8);
        assert_eq!(board.tile_at(0, 1), 1);
        assert_eq!(board.tile_at(1, 2), 2);
        assert_eq!(board.tile_at(2, 2), 5);
        assert_eq!(board.blank(), (1, 1));
        assert_eq!(board.iter().collect::<Vec<_>>(), &[8, 1, 3, 4, 0, 2, 7, 6, 5]);
        assert!(!board.is_goal());
        assert_eq!(board.hamming(), 5);
        assert_eq!(board.manhattan(), 10);
    }

    #[test]
    fn test_invalid_boards() {
        assert!(matches!(Board::from_rows(&[[0u16]]), Err(PuzzleError::InvalidInput(_))));
        assert!(matches!(Board::from_rows::<[Tile; 2]>(&[]), Err(PuzzleError::InvalidInput(_))));
        assert!(matches!(Board::from_rows(&[vec![1u16, 2, 3], vec![0]]), Err(PuzzleError::InvalidInput(_))));
        assert!(matches!(Board::from_rows(&[[1, 2], [3, 4]]), Err(PuzzleError::InvalidInput(_))));
        assert!(matches!(Board::from_rows(&[[1, 1], [3, 0]]), Err(PuzzleError::InvalidInput(_))));
        assert!(matches!(Board::from_tiles(3, vec![1, 2, 3, 0]), Err(PuzzleError::InvalidInput(_))));
        assert!(matches!(Board::from_tiles(256, vec![]), Err(PuzzleError::InvalidInput(_))));
    }

    #[test]
    fn test_hamming_skips_last_cell() {
        // tile 5 is misplaced only in the last cell, blank is misplaced in cell 4
        let board = Board::from_rows(&[[1, 2, 3], [4, 0, 6], [7, 8, 5]]).unwrap();
        assert_eq!(board.hamming(), 1);
        assert_eq!(board.manhattan(), 2);
        assert!(!board.is_goal());
    }

    #[test]
    fn test_neighbors_count() {
        let corner = Board::goal(3);
        assert_eq!(corner.neighbors().len(), 2);
        let edge = Board::from_rows(&[[1, 2, 3], [4, 5, 6], [7, 0, 8]]).unwrap();
        assert_eq!(edge.neighbors().len(), 3);
        let center = Board::from_rows(&[[1, 2, 3], [4, 0, 6], [7, 5, 8]]).unwrap();
        assert_eq!(center.neighbors().len(), 4);
        for neighbor in center.neighbors() {
            let cells = differing_cells(&center, &neighbor);
            assert_eq!(cells.len(), 2);
            assert!(cells.contains(&cell_nr(3, 1, 1)));
            assert_eq!(neighbor.tile_at(1, 1), center.tile_at(neighbor.blank().0, neighbor.blank().1));
        }
        // self is left untouched
        assert_eq!(center.tiles(), &[1, 2, 3, 4, 0, 6, 7, 5, 8]);
    }

    #[test]
    fn test_neighbors_of_goal() {
        let goal = Board::goal(3);
        let neighbors = goal.neighbors();
        assert!(neighbors.contains(&Board::from_rows(&[[1, 2, 3], [4, 5, 6], [7, 0, 8]]).unwrap()));
        assert!(neighbors.contains(&Board::from_rows(&[[1, 2, 3], [4, 5, 0], [7, 8, 6]]).unwrap()));
        for neighbor in neighbors {
            assert!(neighbor.neighbors().contains(&goal));
        }
    }

    #[test]
    fn test_twin() {
        let board = Board::from_rows(&[[8, 1, 3], [4, 0, 2], [7, 6, 5]]).unwrap();
        let twin = board.twin();
        assert_eq!(twin.tiles(), &[1, 8, 3, 4, 0, 2, 7, 6, 5]);
        assert_eq!(twin.blank(), board.blank());
        assert_eq!(board.twin(), twin);

        let blank_first = Board::from_rows(&[[0, 1], [2, 3]]).unwrap();
        assert_eq!(blank_first.twin().tiles(), &[0, 2, 1, 3]);
        let blank_second = Board::from_rows(&[[1, 0], [2, 3]]).unwrap();
        assert_eq!(blank_second.twin().tiles(), &[2, 0, 1, 3]);

        for board in [board, blank_first, blank_second] {
            let twin = board.twin();
            let cells = differing_cells(&board, &twin);
            assert_eq!(cells.len(), 2);
            assert!(cells.iter().all(|&cell| board.tiles()[cell] != 0 && twin.tiles()[cell] != 0));
            assert_ne!(board.has_solvable_parity(), twin.has_solvable_parity());
        }
    }

    #[test]
    fn test_solvable_parity() {
        assert!(Board::goal(2).has_solvable_parity());
        assert!(Board::goal(3).has_solvable_parity());
        assert!(Board::goal(4).has_solvable_parity());
        assert!(!Board::from_rows(&[[1, 2, 3], [4, 5, 6], [8, 7, 0]]).unwrap().has_solvable_parity());
        assert!(Board::from_rows(&[[8, 1, 3], [4, 0, 2], [7, 6, 5]]).unwrap().has_solvable_parity());
        assert!(!Board::from_rows(&[[1, 0], [2, 3]]).unwrap().has_solvable_parity());
        assert!(Board::from_rows(&[[2, 0], [1, 3]]).unwrap().has_solvable_parity());
        // 15-puzzle with 14 and 15 exchanged
        assert!(!Board::from_rows(&[[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12], [13, 15, 14, 0]])
            .unwrap().has_solvable_parity());
    }

    #[test]
    fn test_display() {
        let board = Board::from_rows(&[[8, 1, 3], [4, 0, 2], [7, 6, 5]]).unwrap();
        assert_eq!(board.to_string(), "3\n 8  1  3 \n 4  0  2 \n 7  6  5 \n");
        assert_eq!(board.to_string().parse::<Board>().unwrap(), board);
    }
}
