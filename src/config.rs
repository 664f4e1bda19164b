/// Board dimensions (40x30 cells)
pub const BOARD_WIDTH: u32 = 40;
pub const BOARD_HEIGHT: u32 = 30;

// ============================================
// Simulation Speed
// ============================================

/// Generations per second when a run starts
pub const DEFAULT_SPEED: u32 = 3;

/// Slowest allowed cadence (one generation per second)
pub const MIN_SPEED: u32 = 1;

/// Fastest allowed cadence
pub const MAX_SPEED: u32 = 30;

/// Increment applied by the reduce/increase speed actions
pub const SPEED_STEP: u32 = 1;

// ============================================
// Seeding and Reporting
// ============================================

/// Probability that a cell starts alive when the board is randomized
pub const DEFAULT_DENSITY: f64 = 0.3;

/// How often the generation-rate meter reports, in seconds
pub const METER_WINDOW_SECS: f64 = 1.0;
