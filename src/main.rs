mod app;
mod cli;
mod logging;

use std::io;

use app::{Menu, StatsFile, StatsStore};
use clap::Parser;
use cli::Cli;

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().or_else(logging::default_log_path);
    logging::init(log_path.as_deref());

    let store = StatsStore::open(StatsFile::new(cli.stats_path()));
    let mut menu = Menu::new(store, cli.rng());

    // Setup terminal
    let mut terminal = ratatui::init();

    // Run the app
    let app_result = menu.run(&mut terminal, cli.edition);

    // Restore terminal settings
    ratatui::restore();

    if let Err(err) = &app_result {
        log::error!("terminal error: {err}");
    }
    app_result
}
