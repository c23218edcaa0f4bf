use std::path::PathBuf;

use clap::Parser;
use sortviz_core::config::{DEFAULT_FPS, DEFAULT_ITEMS, MAX_FPS};
use sortviz_core::{Algorithm, RunConfig, UnknownAlgorithm};

use crate::app::run_app;
use crate::error::Result;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "sortviz",
    about = "Animate a comparison sort one exchange per frame",
    version
)]
pub struct Cli {
    /// Algorithm: quick, bubble, selection, insertion, heap, shell or default.
    #[arg(long, default_value = "default", value_parser = parse_algorithm)]
    pub sort: Algorithm,

    /// Number of values to sort.
    #[arg(
        long,
        default_value_t = DEFAULT_ITEMS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub items: u32,

    /// Frames per second.
    #[arg(
        long,
        default_value_t = DEFAULT_FPS,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_FPS))
    )]
    pub fps: u32,

    /// Shuffle seed, for reproducible runs.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run without a terminal, as fast as possible, and print a summary.
    #[arg(long)]
    pub headless: bool,

    /// Leave as soon as the sort finishes instead of waiting for `q`.
    #[arg(long)]
    pub exit_on_finish: bool,

    /// Write every exchange as a JSON line.
    #[arg(long, value_name = "PATH")]
    pub trace: Option<PathBuf>,

    /// Write frame statistics as JSON.
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Write logs to a file instead of stderr.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    #[must_use]
    pub fn run_config(&self) -> RunConfig {
        let config = RunConfig::new(self.sort)
            .with_items(self.items)
            .with_fps(self.fps);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }

    /// Headless runs always end with the sort.
    #[must_use]
    pub fn exits_on_finish(&self) -> bool {
        self.exit_on_finish || self.headless
    }
}

fn parse_algorithm(name: &str) -> std::result::Result<Algorithm, UnknownAlgorithm> {
    name.parse()
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    run_app(&cli)
}
