//! Conway's Game of Life on a fixed-size board.
//!
//! The [`simulation`] module holds the engine: cells, the board with its
//! set of live positions, and the generation step. [`persistence`] maps a
//! board to and from a `"1"`/`"0"` text table, and [`app`] drives a
//! board at a chosen cadence.

pub mod app;
pub mod config;
pub mod error;
pub mod persistence;
pub mod simulation;

pub use error::{BoardError, TableError};
pub use simulation::{Board, Cell, GridPosition, StepReport};
