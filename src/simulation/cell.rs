/// One grid cell: a single alive/dead flag and the standard transition rule.
///
/// Every state change goes through [`Cell::toggle`]; the other mutators
/// only decide whether to call it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    alive: bool,
}

impl Cell {
    /// A dead cell.
    pub const fn new() -> Self {
        Self { alive: false }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Flip alive <-> dead unconditionally.
    pub fn toggle(&mut self) {
        self.alive = !self.alive;
    }

    pub fn set_alive(&mut self, alive: bool) {
        if self.alive != alive {
            self.toggle();
        }
    }

    /// Bring the cell to life; no-op if already alive.
    pub fn populate(&mut self) {
        self.set_alive(true);
    }

    /// Kill the cell; no-op if already dead.
    pub fn die(&mut self) {
        self.set_alive(false);
    }

    /// Apply the B3/S23 rule for `alive_neighbours` live neighbours and
    /// return the resulting state.
    ///
    /// - 0 or 1: dies (underpopulation)
    /// - 2: unchanged
    /// - 3: lives (birth or survival)
    /// - 4 and up: dies (overcrowding)
    pub fn apply_neighbor_count(&mut self, alive_neighbours: u8) -> bool {
        match alive_neighbours {
            0 | 1 => self.die(),
            2 => {}
            3 => self.populate(),
            _ => self.die(),
        }
        self.alive
    }
}
