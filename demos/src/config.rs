//! Command-line configuration.

use std::time::Duration;

use clap::{Parser, ValueEnum};
use gridwalk_core::{DEFAULT_WALL_PROBABILITY, Topology};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// Watch A*, Dijkstra and depth-first search explore a grid
#[derive(Parser, Debug, Clone)]
#[command(name = "gridwalk")]
#[command(author, version, about, long_about = None)]
pub struct DemoConfig {
    /// Grid width in cells
    #[arg(long, default_value_t = 70, value_parser = clap::value_parser!(i32).range(2..=1000))]
    pub cols: i32,

    /// Grid height in cells
    #[arg(long, default_value_t = 70, value_parser = clap::value_parser!(i32).range(2..=1000))]
    pub rows: i32,

    /// Connect diagonal neighbours as well
    #[arg(long, short)]
    pub diagonals: bool,

    /// Chance that a cell becomes a wall
    #[arg(long, short = 'p', default_value_t = DEFAULT_WALL_PROBABILITY)]
    pub walls: f64,

    /// Pause between search iterations, in milliseconds
    #[arg(long, default_value_t = 1000.0 / 60.0)]
    pub delay_ms: f64,

    /// Seed for wall placement (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Most verbose log level shown in the status bar
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl DemoConfig {
    pub fn topology(&self) -> Topology {
        if self.diagonals { Topology::Eight } else { Topology::Four }
    }

    /// The per-iteration delay. Negative or NaN values mean no delay.
    pub fn delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.delay_ms / 1000.0).unwrap_or(Duration::ZERO)
    }

    /// The wall RNG, seeded from `--seed` when given.
    pub fn rng(&self) -> StdRng {
        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        log::debug!("wall seed {seed}");
        StdRng::seed_from_u64(seed)
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self::parse_from(["gridwalk"])
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}
