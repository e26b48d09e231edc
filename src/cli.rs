use std::path::PathBuf;

use clap::Parser;
use rand::{SeedableRng, rng, rngs::StdRng};

use crate::app::{self, Edition};

#[derive(Debug, Parser)]
#[command(version, about = "Guess the number, with difficulty levels, hints and all-time stats")]
pub struct Cli {
    /// Where the all-time statistics are kept
    #[arg(long, value_name = "PATH")]
    pub stats_file: Option<PathBuf>,

    /// Where log lines go (filtered by RUST_LOG, default info)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Start a game right away instead of showing the menu
    #[arg(long, value_enum)]
    pub edition: Option<Edition>,

    /// Seed for reproducible targets
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Cli {
    pub fn stats_path(&self) -> PathBuf {
        self.stats_file
            .clone()
            .unwrap_or_else(app::default_stats_path)
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rng()),
        }
    }
}
