mod config;
mod entity;
mod game;
mod grid;
mod snake;
mod spawner;
mod state;
mod term;

use std::fs::File;
use std::path::PathBuf;
use std::process::exit;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

use config::{Settings, Validate, DEFAULT_CONFIG_FILE};
use spawner::ItemSpawner;
use state::GameState;

pub type Coords = (u16, u16);

#[derive(Copy, Clone, Debug, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Parser)]
#[command(name = "ammo_snake", about = "Grid snake with ammo pickups and a resizable board")]
struct Args {
    /// YAML settings file, defaults are used when it does not exist
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Override the tick interval from the settings file
    #[arg(long)]
    tick_ms: Option<u64>,
    /// Seed for ammo placement
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value = "ammo_snake.log")]
    log_file: PathBuf,
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
    /// Write the effective settings to the config file and exit
    #[arg(long)]
    write_config: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("{}", e);
        exit(1);
    }
}

fn run(args: Args) -> Result<(), String> {
    let mut settings = Settings::read(&args.config)?;
    if let Some(tick_ms) = args.tick_ms {
        settings.tick_interval_ms = tick_ms;
    }
    settings.validate().map_err(|e| format!("Config validation error: {}", e))?;

    if args.write_config {
        settings.save(&args.config)?;
        println!("Settings written to {}", args.config.display());
        return Ok(());
    }

    // The terminal belongs to the game, so logs go to a file.
    let log_file = File::create(&args.log_file)
        .map_err(|e| format!("Failed to create log file {}: {}", args.log_file.display(), e))?;
    WriteLogger::init(args.log_level.into(), Config::default(), log_file)
        .map_err(|e| format!("Failed to initialize logger: {}", e))?;

    info!("Loaded settings from {}: {:?}", args.config.display(), settings);

    let tick_interval = Duration::from_millis(settings.tick_interval_ms);
    let state = GameState::new(settings, ItemSpawner::new(args.seed));
    let mut game = game::SnakeGame::new(state, tick_interval);

    game.run().map_err(|e| format!("Terminal error: {}", e))?;
    info!("Bye");
    Ok(())
}
