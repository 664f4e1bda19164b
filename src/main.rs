use std::path::PathBuf;

use anyhow::Context;
use life_board::app::{App, Speed};
use life_board::config::{BOARD_HEIGHT, BOARD_WIDTH, DEFAULT_DENSITY, DEFAULT_SPEED};
use life_board::persistence::{encode_table, load_board, save_board};
use life_board::Board;
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "life-board", about = "Run Conway's Game of Life on a fixed-size board")]
struct Opt {
    #[structopt(long, env, default_value = "info")]
    rust_log: String,

    /// Board width in cells
    #[structopt(long, env = "LIFE_COLUMNS")]
    columns: Option<u32>,

    /// Board height in cells
    #[structopt(long, env = "LIFE_ROWS")]
    rows: Option<u32>,

    /// Generations to advance before exiting
    #[structopt(long, env = "LIFE_GENERATIONS", default_value = "100")]
    generations: u64,

    /// Generations per second
    #[structopt(long, env = "LIFE_SPEED")]
    speed: Option<u32>,

    /// Text table to start from
    #[structopt(long, parse(from_os_str))]
    load: Option<PathBuf>,

    /// Where to write the final board
    #[structopt(long, parse(from_os_str))]
    save: Option<PathBuf>,

    /// Seed the board randomly (ignored with --load)
    #[structopt(long)]
    random: bool,

    /// Share of cells alive after random seeding
    #[structopt(long, env = "LIFE_DENSITY")]
    density: Option<f64>,

    /// Fixed seed for reproducible random boards
    #[structopt(long, env = "LIFE_SEED")]
    seed: Option<u64>,

    /// Advance as fast as possible instead of at the chosen speed
    #[structopt(long)]
    no_wait: bool,

    /// Print the final board to stdout
    #[structopt(long)]
    print: bool,
}

fn main() {
    let opt = Opt::from_args();
    env_logger::Builder::new()
        .parse_filters(&opt.rust_log)
        .init();

    if let Err(err) = run(opt) {
        error!("{:#}", err);
        std::process::exit(1);
    }
}

fn run(opt: Opt) -> anyhow::Result<()> {
    let columns = opt.columns.unwrap_or(BOARD_WIDTH);
    let rows = opt.rows.unwrap_or(BOARD_HEIGHT);
    info!("Board size: {}x{}", columns, rows);

    let mut board = Board::new(columns, rows);
    if let Some(path) = &opt.load {
        load_board(&mut board, path)
            .with_context(|| format!("failed to load board from {}", path.display()))?;
    } else if opt.random {
        let mut rng = match opt.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        board.randomize(&mut rng, opt.density.unwrap_or(DEFAULT_DENSITY));
    }
    info!("Starting with {} live cells", board.alive_count());

    let mut app = App::new(board);
    app.set_speed(Speed::new(opt.speed.unwrap_or(DEFAULT_SPEED)));

    let summary = app.run(opt.generations, !opt.no_wait);
    info!(
        "Finished after {} generations with {} live cells{}",
        summary.generations,
        summary.alive,
        if summary.settled { " (settled)" } else { "" }
    );

    let board = app.into_board();
    if let Some(path) = &opt.save {
        save_board(&board, path)
            .with_context(|| format!("failed to save board to {}", path.display()))?;
    }
    if opt.print {
        print!("{}", encode_table(&board.export_grid()));
    }

    Ok(())
}
