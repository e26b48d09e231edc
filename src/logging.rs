use std::{
    fs::{self, File, OpenOptions},
    io,
    path::{Path, PathBuf},
};

use env_logger::{Builder, Env, Target};

use crate::app;

const LOG_FILE: &str = "guessinggame.log";

pub fn default_log_path() -> Option<PathBuf> {
    app::data_dir().map(|dir| dir.join(LOG_FILE))
}

/// The terminal belongs to the UI, so logs only ever go to a file. If none
/// can be opened the logger is simply not installed.
pub fn init(path: Option<&Path>) {
    let Some(path) = path else {
        return;
    };

    let file = match open(path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("logging disabled, cannot open {}: {err}", path.display());
            return;
        }
    };

    let result = Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init();

    if result.is_ok() {
        log::info!("logging to {}", path.display());
    }
}

fn open(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}
