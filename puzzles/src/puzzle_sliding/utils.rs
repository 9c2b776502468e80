/// Tile number. Blank is 0.
pub type Tile = u16;

/// The smallest board side. Twin of a smaller board does not exist.
pub const MIN_DIMENSION: usize = 2;

/// The largest board side, so that each tile number fits in `Tile`.
pub const MAX_DIMENSION: usize = 255;
