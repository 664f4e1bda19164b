mod board;
mod cell;
mod position;

pub use board::{Board, StepReport};
pub use cell::Cell;
pub use position::GridPosition;
