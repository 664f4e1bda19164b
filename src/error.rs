use thiserror::Error;

/// Errors reported by position-addressed and bulk board operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Coordinates fall outside `[0, columns) x [0, rows)`.
    #[error("position ({x}, {y}) is outside the {columns}x{rows} board")]
    OutOfBounds {
        x: i32,
        y: i32,
        columns: u32,
        rows: u32,
    },

    /// A bulk import whose shape disagrees with the board.
    #[error(
        "grid shape {found_columns}x{found_rows} does not match the {expected_columns}x{expected_rows} board"
    )]
    DimensionMismatch {
        expected_columns: u32,
        expected_rows: u32,
        found_columns: usize,
        found_rows: usize,
    },
}

/// Errors produced while reading or writing the text table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A cell token other than "1" or "0". Line and column are 1-based.
    #[error("invalid cell {value:?} at line {line}, column {column}")]
    InvalidCell {
        line: usize,
        column: usize,
        value: String,
    },

    #[error(transparent)]
    Board(#[from] BoardError),
}
