/// Relative offsets of the Moore neighbourhood (Chebyshev distance 1).
const NEIGHBOUR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
];

/// A cell coordinate on the board, compared and hashed by value.
///
/// Positions may lie outside any particular board; bounds are checked by
/// the [`Board`](crate::simulation::Board) that receives them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The eight surrounding positions, unfiltered. Coordinates saturate
    /// at the `i32` range instead of overflowing.
    pub fn neighbours(self) -> impl Iterator<Item = GridPosition> {
        NEIGHBOUR_OFFSETS.into_iter().map(move |(dx, dy)| {
            GridPosition::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
        })
    }

    pub fn as_tuple(self) -> (i32, i32) {
        (self.x, self.y)
    }
}

impl From<(i32, i32)> for GridPosition {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}
