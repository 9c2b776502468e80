use thiserror::Error;

/// Errors reported while constructing boards or running a limited search.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    /// Tiles do not describe a valid n x n board.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The text given to the parser does not contain the dimension.
    #[error("board description is empty")]
    MissingDimension,

    /// The text contains something that is not a non-negative integer.
    #[error("cannot parse {token:?} (token {position}) as a number")]
    BadToken { token: String, position: usize },

    /// The number of tiles does not match the dimension.
    #[error("expected {expected} tiles after the dimension, found {found}")]
    WrongTileCount { expected: usize, found: usize },

    /// Statistics collector has cancelled the search.
    #[error("search aborted after expanding {expanded} nodes")]
    SearchAborted { expanded: u64 },
}
