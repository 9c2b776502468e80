use crate::error::PuzzleError;
use crate::puzzle_sliding::state::{check_dimension, Board};
use crate::puzzle_sliding::utils::Tile;

/// Parses `token` (which is `position`-th in the input) as a number of type `T`.
fn parse_number<T: std::str::FromStr>(position: usize, token: &str) -> Result<T, PuzzleError> {
    token.parse().map_err(|_| PuzzleError::BadToken { token: token.to_owned(), position })
}

/// Reads the board from whitespace separated numbers:
/// the dimension `n` followed by `n²` tiles in row-major order, `0` standing for the blank.
///
/// # Example
/// ```
/// use puzzles::puzzle_sliding::parse::parse_board;
///
/// let board = parse_board("3\n 0 1 3\n 4 2 5\n 7 8 6\n").unwrap();
/// assert_eq!(board.dimension(), 3);
/// assert_eq!(board.blank(), (0, 0));
/// assert!(parse_board("2\n 1 2\n 3\n").is_err());
/// ```
pub fn parse_board(text: &str) -> Result<Board, PuzzleError> {
    let mut tokens = text.split_whitespace().enumerate();
    let (position, token) = tokens.next().ok_or(PuzzleError::MissingDimension)?;
    let dimension: usize = parse_number(position, token)?;
    check_dimension(dimension)?;
    let tiles = tokens
        .map(|(position, token)| parse_number::<Tile>(position, token))
        .collect::<Result<Vec<_>, _>>()?;
    let expected = dimension * dimension;
    if tiles.len() != expected {
        return Err(PuzzleError::WrongTileCount { expected, found: tiles.len() });
    }
    Board::from_tiles(dimension, tiles)
}
