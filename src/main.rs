mod app;
mod catalog;
mod cli;
mod clock;
mod constants;
mod domain;
mod error;
mod logging;
mod ranking;
mod schedule;
mod settings;
mod storage;

fn main() {
    cli::run_cli();
}
