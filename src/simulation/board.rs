use std::collections::{HashMap, HashSet};

use rand::Rng;

use crate::config::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::error::BoardError;
use crate::simulation::cell::Cell;
use crate::simulation::position::GridPosition;

/// Summary of one generation advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepReport {
    /// Generation number reached by this step
    pub generation: u64,
    /// Live cells after the step
    pub alive: usize,
    /// Positions evaluated (live cells and their in-bounds neighbours)
    pub frontier: usize,
    /// Whether any cell changed state
    pub changed: bool,
}

/// Fixed-size board of cells plus the set of currently live positions.
///
/// A position is in the active set iff its cell is alive. Every public
/// method preserves that.
pub struct Board {
    columns: u32,
    rows: u32,
    /// Row-major, `rows * columns` entries
    cells: Vec<Cell>,
    active: HashSet<GridPosition>,
    generation: u64,
}

impl Board {
    /// Create a board with every cell dead
    pub fn new(columns: u32, rows: u32) -> Self {
        let cell_count = columns as usize * rows as usize;
        log::debug!("Creating {}x{} board ({} cells)", columns, rows, cell_count);

        Self {
            columns,
            rows,
            cells: vec![Cell::new(); cell_count],
            active: HashSet::new(),
            generation: 0,
        }
    }

    /// Create a board with default dimensions
    pub fn new_default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// Generations advanced since construction, the last reset or the last import.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn alive_count(&self) -> usize {
        self.active.len()
    }

    pub fn contains(&self, pos: GridPosition) -> bool {
        self.index(pos).is_some()
    }

    pub fn cell(&self, pos: GridPosition) -> Option<&Cell> {
        self.index(pos).map(|idx| &self.cells[idx])
    }

    /// Nothing lives outside the board, so out-of-bounds queries are `false`.
    pub fn is_alive(&self, x: i32, y: i32) -> bool {
        self.cell(GridPosition::new(x, y))
            .map_or(false, Cell::is_alive)
    }

    /// Live positions, in no particular order.
    pub fn active_positions(&self) -> impl Iterator<Item = GridPosition> + '_ {
        self.active.iter().copied()
    }

    /// Every position on the board, row by row.
    pub fn positions(&self) -> impl Iterator<Item = GridPosition> {
        let (columns, rows) = (self.columns as i32, self.rows as i32);
        (0..rows).flat_map(move |y| (0..columns).map(move |x| GridPosition::new(x, y)))
    }

    /// Flip the cell at `(x, y)`, returning its new state.
    pub fn toggle_at(&mut self, x: i32, y: i32) -> Result<bool, BoardError> {
        let pos = GridPosition::new(x, y);
        let idx = self.checked_index(pos)?;
        self.cells[idx].toggle();
        let alive = self.cells[idx].is_alive();
        self.track(pos, alive);
        Ok(alive)
    }

    pub fn populate_at(&mut self, x: i32, y: i32) -> Result<(), BoardError> {
        self.set_at(GridPosition::new(x, y), true)
    }

    pub fn kill_at(&mut self, x: i32, y: i32) -> Result<(), BoardError> {
        self.set_at(GridPosition::new(x, y), false)
    }

    /// Kill every live cell. Costs O(live cells), not O(board).
    pub fn reset(&mut self) {
        for pos in std::mem::take(&mut self.active) {
            if let Some(idx) = self.index(pos) {
                self.cells[idx].die();
            }
        }
        self.generation = 0;
    }

    /// Live cells among the (up to) eight in-bounds neighbours of `pos`.
    /// Edges do not wrap.
    pub fn count_alive_neighbors(&self, pos: GridPosition) -> Result<u8, BoardError> {
        self.checked_index(pos)?;
        Ok(self.live_neighbours(pos))
    }

    /// Advance one generation.
    ///
    /// Only live cells and their neighbours can change, so only those are
    /// evaluated. All neighbour counts are gathered from the current
    /// generation before any cell is touched; the result matches applying
    /// the rule to the whole board at once.
    pub fn step(&mut self) -> StepReport {
        let mut counts: HashMap<GridPosition, u8> = HashMap::with_capacity(self.active.len() * 9);
        for &pos in &self.active {
            for candidate in std::iter::once(pos).chain(pos.neighbours()) {
                if self.contains(candidate) {
                    counts
                        .entry(candidate)
                        .or_insert_with(|| self.live_neighbours(candidate));
                }
            }
        }

        let frontier = counts.len();
        let mut next = HashSet::with_capacity(self.active.len());
        for (pos, alive_neighbours) in counts {
            let Some(idx) = self.index(pos) else {
                continue;
            };
            if self.cells[idx].apply_neighbor_count(alive_neighbours) {
                next.insert(pos);
            }
        }

        let changed = next != self.active;
        self.active = next;
        self.generation += 1;

        let report = StepReport {
            generation: self.generation,
            alive: self.active.len(),
            frontier,
            changed,
        };
        log::debug!(
            "Generation {}: {} alive, {} evaluated{}",
            report.generation,
            report.alive,
            report.frontier,
            if changed { "" } else { " (still)" }
        );
        report
    }

    /// Snapshot as `rows` vectors of `columns` flags; `grid[y][x]` is cell `(x, y)`.
    pub fn export_grid(&self) -> Vec<Vec<bool>> {
        let columns = self.columns as usize;
        (0..self.rows as usize)
            .map(|y| {
                self.cells[y * columns..(y + 1) * columns]
                    .iter()
                    .map(Cell::is_alive)
                    .collect()
            })
            .collect()
    }

    /// Replace the board contents with `grid` (same layout as [`Board::export_grid`]).
    ///
    /// The shape is checked before anything changes; on error the board is untouched.
    pub fn import_grid<R: AsRef<[bool]>>(&mut self, grid: &[R]) -> Result<(), BoardError> {
        let width = |row: &R| row.as_ref().len();
        let mismatch = |found_columns: usize| BoardError::DimensionMismatch {
            expected_columns: self.columns,
            expected_rows: self.rows,
            found_columns,
            found_rows: grid.len(),
        };

        if grid.len() != self.rows as usize {
            let found_columns = grid.first().map_or(0, width);
            return Err(mismatch(found_columns));
        }
        if let Some(row) = grid
            .iter()
            .find(|&row| width(row) != self.columns as usize)
        {
            return Err(mismatch(width(row)));
        }

        self.reset();
        for (y, row) in grid.iter().enumerate() {
            for (x, &alive) in row.as_ref().iter().enumerate() {
                if alive {
                    self.set_at(GridPosition::new(x as i32, y as i32), true)?;
                }
            }
        }

        log::debug!("Imported grid with {} live cells", self.active.len());
        Ok(())
    }

    /// Clear the board, then bring each cell to life with probability `density`
    /// (clamped to `[0, 1]`).
    pub fn randomize<G: Rng>(&mut self, rng: &mut G, density: f64) {
        let density = if density.is_nan() { 0.0 } else { density.clamp(0.0, 1.0) };

        self.reset();
        for idx in 0..self.cells.len() {
            if rng.gen_bool(density) {
                let pos = self.position_of(idx);
                self.cells[idx].populate();
                self.track(pos, true);
            }
        }

        log::debug!(
            "Randomized board at density {:.2}: {} live cells",
            density,
            self.active.len()
        );
    }

    fn set_at(&mut self, pos: GridPosition, alive: bool) -> Result<(), BoardError> {
        let idx = self.checked_index(pos)?;
        self.cells[idx].set_alive(alive);
        self.track(pos, alive);
        Ok(())
    }

    fn track(&mut self, pos: GridPosition, alive: bool) {
        if alive {
            self.active.insert(pos);
        } else {
            self.active.remove(&pos);
        }
    }

    fn live_neighbours(&self, pos: GridPosition) -> u8 {
        pos.neighbours()
            .filter_map(|n| self.cell(n))
            .filter(|cell| cell.is_alive())
            .count() as u8
    }

    fn index(&self, pos: GridPosition) -> Option<usize> {
        let x = u32::try_from(pos.x).ok().filter(|&x| x < self.columns)?;
        let y = u32::try_from(pos.y).ok().filter(|&y| y < self.rows)?;
        Some(y as usize * self.columns as usize + x as usize)
    }

    fn checked_index(&self, pos: GridPosition) -> Result<usize, BoardError> {
        self.index(pos).ok_or(BoardError::OutOfBounds {
            x: pos.x,
            y: pos.y,
            columns: self.columns,
            rows: self.rows,
        })
    }

    fn position_of(&self, idx: usize) -> GridPosition {
        let columns = self.columns as usize;
        GridPosition::new((idx % columns) as i32, (idx / columns) as i32)
    }
}
