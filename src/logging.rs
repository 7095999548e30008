use std::fs::OpenOptions;

use env_logger::{Builder, Env, Target};

use crate::storage;

pub const LOG_ENV: &str = "TIMEGATE_LOG";

pub fn init() {
    let mut builder = Builder::from_env(Env::default().filter_or(LOG_ENV, "info"));

    let path = storage::get_log_path();
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            builder.target(Target::Pipe(Box::new(file)));
        }
        Err(e) => {
            eprintln!("Warning: could not open log file {}: {}", path.display(), e);
            builder.filter_level(log::LevelFilter::Off);
        }
    }

    builder.try_init().ok();
}
