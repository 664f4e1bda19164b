//! Text table load/save.
//!
//! One line per board row, one `1` (alive) or `0` (dead) per cell. Cells
//! are written comma-separated; reading also accepts one character per cell.

use std::fs;
use std::path::Path;

use crate::error::TableError;
use crate::simulation::Board;

const ALIVE: &str = "1";
const DEAD: &str = "0";
const SEPARATOR: &str = ",";

/// Render a grid (`grid[y][x]`) as text, one line per row.
pub fn encode_table<R: AsRef<[bool]>>(grid: &[R]) -> String {
    let mut out = String::new();
    for row in grid {
        let line: Vec<&str> = row
            .as_ref()
            .iter()
            .map(|&alive| if alive { ALIVE } else { DEAD })
            .collect();
        out.push_str(&line.join(SEPARATOR));
        out.push('\n');
    }
    out
}

/// Parse text produced by [`encode_table`] (or the comma-less variant).
///
/// Blank lines and surrounding whitespace are ignored. Rows are not required
/// to have equal length here; the board checks the shape on import.
pub fn decode_table(text: &str) -> Result<Vec<Vec<bool>>, TableError> {
    let mut grid = Vec::new();

    for (line_idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let tokens: Vec<&str> = if line.contains(SEPARATOR) {
            line.split(SEPARATOR).map(str::trim).collect()
        } else {
            line.char_indices()
                .map(|(i, c)| &line[i..i + c.len_utf8()])
                .collect()
        };

        let row = tokens
            .into_iter()
            .enumerate()
            .map(|(col_idx, token)| match token {
                ALIVE => Ok(true),
                DEAD => Ok(false),
                other => Err(TableError::InvalidCell {
                    line: line_idx + 1,
                    column: col_idx + 1,
                    value: other.to_owned(),
                }),
            })
            .collect::<Result<Vec<bool>, TableError>>()?;

        grid.push(row);
    }

    Ok(grid)
}

/// Write the board to `path` as a text table.
pub fn save_board(board: &Board, path: impl AsRef<Path>) -> Result<(), TableError> {
    let path = path.as_ref();
    fs::write(path, encode_table(&board.export_grid()))?;
    log::info!(
        "Saved {} live cells to {}",
        board.alive_count(),
        path.display()
    );
    Ok(())
}

/// Replace the board contents with the table stored at `path`.
///
/// On any error the board is left unchanged.
pub fn load_board(board: &mut Board, path: impl AsRef<Path>) -> Result<(), TableError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let grid = decode_table(&text)?;
    board.import_grid(&grid)?;
    log::info!(
        "Loaded {} live cells from {}",
        board.alive_count(),
        path.display()
    );
    Ok(())
}
