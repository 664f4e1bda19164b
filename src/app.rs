use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::{DEFAULT_SPEED, MAX_SPEED, METER_WINDOW_SECS, MIN_SPEED, SPEED_STEP};
use crate::error::{BoardError, TableError};
use crate::persistence::{load_board, save_board};
use crate::simulation::{Board, StepReport};

/// Commands a front end can issue against the running simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Start the clock if stopped, stop it if running
    TogglePlay,
    /// Kill every cell
    Clear,
    MinSpeed,
    ReduceSpeed,
    IncreaseSpeed,
    MaxSpeed,
    Load(PathBuf),
    Save(PathBuf),
    None,
}

/// Generations per second, always within `[MIN_SPEED, MAX_SPEED]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Speed(u32);

impl Speed {
    pub fn new(generations_per_second: u32) -> Self {
        Self(generations_per_second.clamp(MIN_SPEED, MAX_SPEED))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Time between two generations
    pub fn interval(self) -> Duration {
        Duration::from_secs_f64(1.0 / self.0 as f64)
    }

    pub fn faster(self) -> Self {
        Self::new(self.0.saturating_add(SPEED_STEP))
    }

    pub fn slower(self) -> Self {
        Self::new(self.0.saturating_sub(SPEED_STEP))
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED)
    }
}

/// Outcome of [`App::run`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Generations actually advanced
    pub generations: u64,
    pub alive: usize,
    /// The board stopped changing before the requested count was reached
    pub settled: bool,
}

/// Drives a [`Board`]: play/stop, cadence, editing and file actions.
pub struct App {
    board: Board,
    speed: Speed,
    playing: bool,
    last_step: Option<Instant>,
    meter: RateMeter,
}

impl App {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            speed: Speed::default(),
            playing: false,
            last_step: None,
            meter: RateMeter::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn set_speed(&mut self, speed: Speed) {
        if speed != self.speed {
            log::info!("Speed: {} generations/s", speed.get());
        }
        self.speed = speed;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn handle_action(&mut self, action: Action) -> Result<(), TableError> {
        match action {
            Action::TogglePlay => {
                self.playing = !self.playing;
                log::info!("Simulation {}", if self.playing { "started" } else { "stopped" });
            }
            Action::Clear => {
                self.board.reset();
                log::info!("Board cleared");
            }
            Action::MinSpeed => self.set_speed(Speed::new(MIN_SPEED)),
            Action::MaxSpeed => self.set_speed(Speed::new(MAX_SPEED)),
            Action::ReduceSpeed => self.step_speed(self.speed.slower()),
            Action::IncreaseSpeed => self.step_speed(self.speed.faster()),
            Action::Load(path) => load_board(&mut self.board, path)?,
            Action::Save(path) => save_board(&self.board, path)?,
            Action::None => {}
        }
        Ok(())
    }

    fn step_speed(&mut self, next: Speed) {
        if next == self.speed {
            log::warn!("Speed already at its limit ({})", self.speed.get());
        }
        self.set_speed(next);
    }

    /// Toggle the cell under a click. Editing is only allowed while stopped;
    /// returns `Ok(None)` when the click was ignored.
    pub fn click(&mut self, x: i32, y: i32) -> Result<Option<bool>, BoardError> {
        if self.playing {
            log::debug!("Ignoring click at ({}, {}) while playing", x, y);
            return Ok(None);
        }
        match self.board.toggle_at(x, y) {
            Ok(alive) => Ok(Some(alive)),
            Err(err) => {
                log::warn!("Rejected click: {}", err);
                Err(err)
            }
        }
    }

    /// Advance one generation if playing and a full interval has passed
    /// since the previous one.
    pub fn tick(&mut self, now: Instant) -> Option<StepReport> {
        if !self.playing {
            return None;
        }
        if let Some(last) = self.last_step {
            if now.saturating_duration_since(last) < self.speed.interval() {
                return None;
            }
        }
        Some(self.advance(now))
    }

    /// Play `generations` generations back to back, sleeping one interval
    /// between them when `wait` is set. Stops early once the board no
    /// longer changes.
    pub fn run(&mut self, generations: u64, wait: bool) -> RunSummary {
        log::info!(
            "Running {} generations at {} generations/s",
            generations,
            self.speed.get()
        );
        self.playing = true;

        let mut advanced = 0;
        let mut settled = false;
        while advanced < generations {
            if wait && advanced > 0 {
                std::thread::sleep(self.speed.interval());
            }
            let report = self.advance(Instant::now());
            advanced += 1;
            if !report.changed {
                log::info!("Board settled at generation {}", report.generation);
                settled = true;
                break;
            }
        }
        self.playing = false;

        RunSummary {
            generations: advanced,
            alive: self.board.alive_count(),
            settled,
        }
    }

    fn advance(&mut self, now: Instant) -> StepReport {
        self.last_step = Some(now);
        let report = self.board.step();
        if let Some(rate) = self.meter.tick(now) {
            log::info!(
                "{:.1} generations/s - generation {} - {} alive",
                rate,
                report.generation,
                report.alive
            );
        }
        report
    }
}

/// Generation-rate meter, reports once per window
struct RateMeter {
    window_start: Option<Instant>,
    count: u32,
}

impl RateMeter {
    fn new() -> Self {
        Self {
            window_start: None,
            count: 0,
        }
    }

    /// Count one generation, returns Some(rate) when a window closes
    fn tick(&mut self, now: Instant) -> Option<f64> {
        let start = *self.window_start.get_or_insert(now);
        self.count += 1;
        let elapsed = now.saturating_duration_since(start).as_secs_f64();

        if elapsed >= METER_WINDOW_SECS {
            let rate = self.count as f64 / elapsed;
            self.count = 0;
            self.window_start = Some(now);
            Some(rate)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blinker() -> Board {
        let mut board = Board::new(5, 5);
        for y in 1..=3 {
            board.populate_at(2, y).unwrap();
        }
        board
    }

    #[test]
    fn test_speed_clamped() {
        assert_eq!(Speed::new(0).get(), MIN_SPEED);
        assert_eq!(Speed::new(u32::MAX).get(), MAX_SPEED);
        assert_eq!(Speed::default().get(), DEFAULT_SPEED);
        assert_eq!(Speed::new(MIN_SPEED).slower(), Speed::new(MIN_SPEED));
        assert_eq!(Speed::new(MAX_SPEED).faster(), Speed::new(MAX_SPEED));
        assert_eq!(Speed::new(4).interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_speed_actions() {
        let mut app = App::new(Board::new(3, 3));
        app.handle_action(Action::IncreaseSpeed).unwrap();
        assert_eq!(app.speed().get(), DEFAULT_SPEED + SPEED_STEP);
        app.handle_action(Action::ReduceSpeed).unwrap();
        app.handle_action(Action::ReduceSpeed).unwrap();
        assert_eq!(app.speed().get(), DEFAULT_SPEED - SPEED_STEP);
        app.handle_action(Action::MaxSpeed).unwrap();
        assert_eq!(app.speed().get(), MAX_SPEED);
        app.handle_action(Action::MinSpeed).unwrap();
        assert_eq!(app.speed().get(), MIN_SPEED);
        app.handle_action(Action::None).unwrap();
        assert_eq!(app.speed().get(), MIN_SPEED);
    }

    #[test]
    fn test_click_only_while_stopped() {
        let mut app = App::new(Board::new(4, 4));
        assert_eq!(app.click(1, 1), Ok(Some(true)));
        assert!(app.board().is_alive(1, 1));

        app.handle_action(Action::TogglePlay).unwrap();
        assert!(app.is_playing());
        assert_eq!(app.click(2, 2), Ok(None));
        assert!(!app.board().is_alive(2, 2));

        app.handle_action(Action::TogglePlay).unwrap();
        assert_eq!(app.click(1, 1), Ok(Some(false)));
    }

    #[test]
    fn test_click_outside_board() {
        let mut app = App::new(Board::new(4, 4));
        assert!(matches!(app.click(4, 0), Err(BoardError::OutOfBounds { .. })));
        assert_eq!(app.board().alive_count(), 0);
    }

    #[test]
    fn test_tick_follows_cadence() {
        let mut app = App::new(blinker());
        let t0 = Instant::now();
        assert!(app.tick(t0).is_none(), "stopped app must not advance");

        app.handle_action(Action::TogglePlay).unwrap();
        assert_eq!(app.tick(t0).map(|r| r.generation), Some(1));

        // Default speed is 3/s, so 100ms is too soon
        assert!(app.tick(t0 + Duration::from_millis(100)).is_none());
        assert_eq!(
            app.tick(t0 + Duration::from_millis(400)).map(|r| r.generation),
            Some(2)
        );
        assert_eq!(app.board().generation(), 2);
    }

    #[test]
    fn test_clear_action() {
        let mut app = App::new(blinker());
        app.handle_action(Action::Clear).unwrap();
        assert_eq!(app.board().alive_count(), 0);
    }

    #[test]
    fn test_run_stops_when_settled() {
        let mut board = Board::new(6, 6);
        for &(x, y) in &[(1, 1), (2, 1), (1, 2), (2, 2)] {
            board.populate_at(x, y).unwrap();
        }
        let mut app = App::new(board);
        let summary = app.run(50, false);
        assert!(summary.settled);
        assert_eq!(summary.generations, 1);
        assert_eq!(summary.alive, 4);
        assert!(!app.is_playing());
    }

    #[test]
    fn test_run_oscillator_full_length() {
        let mut app = App::new(blinker());
        let summary = app.run(6, false);
        assert!(!summary.settled);
        assert_eq!(summary.generations, 6);
        assert_eq!(summary.alive, 3);
        // Even generation count puts the blinker back upright
        assert!(app.board().is_alive(2, 1));
        assert!(app.board().is_alive(2, 3));
    }

    #[test]
    fn test_save_and_load_actions() {
        let path = std::env::temp_dir().join(format!("life-board-app-{}.txt", std::process::id()));
        let mut app = App::new(blinker());
        app.handle_action(Action::Save(path.clone())).unwrap();
        app.handle_action(Action::Clear).unwrap();
        app.handle_action(Action::Load(path.clone())).unwrap();
        assert_eq!(app.board().export_grid(), blinker().export_grid());
        std::fs::remove_file(&path).unwrap();

        let missing = app.handle_action(Action::Load(path));
        assert!(matches!(missing, Err(TableError::Io(_))));
        assert_eq!(app.into_board().alive_count(), 3);
    }

    #[test]
    fn test_rate_meter_windows() {
        let mut meter = RateMeter::new();
        let t0 = Instant::now();
        assert!(meter.tick(t0).is_none());
        assert!(meter.tick(t0 + Duration::from_millis(500)).is_none());
        let rate = meter.tick(t0 + Duration::from_secs(2)).unwrap();
        assert!((rate - 1.5).abs() < 1e-9, "got {}", rate);
        assert!(meter.tick(t0 + Duration::from_millis(2500)).is_none());
    }
}
