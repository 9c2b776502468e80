//! Square sliding puzzle (8-puzzle, 15-puzzle, ...) with the blank numbered 0.

pub mod heuristic;
pub mod neighbors;
pub mod parse;
pub mod state;
pub mod utils;
