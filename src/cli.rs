use std::{io, path::PathBuf};

use chrono::{DateTime, Local};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use itertools::Itertools;
use serde::Serialize;

use crate::{
    app,
    catalog::{self, Catalog},
    domain::{RankedEntry, UrgencyTier},
    logging, schedule,
    settings::Settings,
    storage,
};

#[derive(Parser, Debug)]
#[command(name = "timegate")]
#[command(about = "A directory of things that only work at certain times of day", long_about = None)]
pub struct Cli {
    #[arg(long, global = true, help = "Catalog file to use instead of the configured one")]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(about = "Open the live terminal view (default)")]
    Ui,

    #[command(about = "Print every entry, soonest first")]
    List {
        #[arg(long, help = "Print JSON instead of a table")]
        json: bool,

        #[arg(long, value_enum, help = "Only show entries in this urgency tier")]
        tier: Option<UrgencyTier>,
    },

    #[command(about = "Print the entry that opens next")]
    Next,

    #[command(about = "Validate a catalog file")]
    Check {
        #[arg(help = "Catalog file to validate")]
        path: PathBuf,
    },

    #[command(about = "Write the built-in catalog to an editable file")]
    Init {
        #[arg(long, short, help = "Output path")]
        out: Option<PathBuf>,

        #[arg(long, help = "Overwrite an existing file")]
        force: bool,
    },

    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(value_enum, help = "Shell type")]
        shell: Shell,
    },
}

impl Command {
    // Completions and catalog checks print and exit; they leave no log file behind.
    fn writes_log(&self) -> bool {
        !matches!(self, Command::Check { .. } | Command::Completions { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedExport {
    pub id: String,
    pub name: String,
    pub canonical_time: String,
    pub url: String,
    pub protocol: String,
    pub remaining_seconds: i64,
    pub tier: UrgencyTier,
    pub next_occurrence: Option<DateTime<Local>>,
}

impl RankedExport {
    fn from_ranked(ranked: &RankedEntry, now: &DateTime<Local>) -> Self {
        let entry = &ranked.entry;
        let next_occurrence = schedule::upcoming(now, entry)
            .into_iter()
            .map(|(_, instant)| instant)
            .min();

        Self {
            id: entry.id().to_string(),
            name: entry.name().to_string(),
            canonical_time: entry.canonical_time().to_string(),
            url: entry.url().to_string(),
            protocol: entry.protocol().to_string(),
            remaining_seconds: ranked.remaining_seconds,
            tier: ranked.tier,
            next_occurrence,
        }
    }
}

fn load_catalog(explicit: Option<PathBuf>, settings: &Settings) -> Result<Catalog, String> {
    let path = explicit.or_else(|| settings.catalog.clone());
    storage::resolve_catalog(path.as_deref()).map_err(|e| e.to_string())
}

fn format_row(ranked: &RankedEntry) -> String {
    let entry = &ranked.entry;
    let authors = entry.authors().iter().map(|author| &author.name).join(", ");
    format!(
        "{:<5} {:<24} {:>6}  {:02}h{:02}m  {:<5} {}",
        ranked.tier.label(),
        entry.name(),
        entry.canonical_time(),
        ranked.remaining_seconds.max(0) / 3600,
        (ranked.remaining_seconds.max(0) % 3600) / 60,
        entry.protocol(),
        authors
    )
}

pub fn list(catalog: &Catalog, json: bool, tier: Option<UrgencyTier>) -> Result<(), String> {
    let now = Local::now();
    let ranking: Vec<RankedEntry> = schedule::rank(&now, catalog.entries())
        .into_iter()
        .filter(|ranked| tier.is_none_or(|wanted| ranked.tier == wanted))
        .collect();

    if json {
        let export: Vec<RankedExport> = ranking
            .iter()
            .map(|ranked| RankedExport::from_ranked(ranked, &now))
            .collect();
        let out = serde_json::to_string_pretty(&export).map_err(|e| e.to_string())?;
        println!("{}", out);
        return Ok(());
    }

    println!("timegate ({})", now.format("%H:%M:%S"));
    println!("{}", "-".repeat(60));
    for ranked in &ranking {
        println!("{}", format_row(ranked));
    }
    Ok(())
}

pub fn next(catalog: &Catalog) -> Result<(), String> {
    let now = Local::now();
    let ranking = schedule::rank(&now, catalog.entries());
    let Some(first) = ranking.first() else {
        return Err("The catalog is empty".to_string());
    };

    let entry = &first.entry;
    println!(
        "{} opens at {} (in {:02}h{:02}m) {}",
        entry.name(),
        entry.canonical_time(),
        first.remaining_seconds.max(0) / 3600,
        (first.remaining_seconds.max(0) % 3600) / 60,
        entry.url()
    );
    Ok(())
}

pub fn check(path: PathBuf) -> Result<(), String> {
    let catalog = storage::load_catalog(&path).map_err(|e| e.to_string())?;
    let times: usize = catalog
        .entries()
        .iter()
        .map(|entry| entry.recurrence_times().len())
        .sum();
    println!(
        "{}: {} entries, {} recurrence times, ok",
        path.display(),
        catalog.len(),
        times
    );
    Ok(())
}

pub fn init(out: Option<PathBuf>, force: bool) -> Result<(), String> {
    let path = out.unwrap_or_else(storage::get_catalog_path);
    if path.exists() && !force {
        return Err(format!(
            "{} already exists. Use --force to overwrite it.",
            path.display()
        ));
    }

    let catalog = catalog::builtin().map_err(|e| e.to_string())?;
    storage::save_catalog(&path, &catalog)?;
    println!("Wrote {} entries to {}", catalog.len(), path.display());
    Ok(())
}

pub fn print_completions(shell: Shell) {
    clap_complete::generate(shell, &mut Cli::command(), "timegate", &mut io::stdout());
}

fn run(cli: Cli) -> Result<(), String> {
    let command = cli.command.unwrap_or(Command::Ui);
    if command.writes_log() {
        logging::init();
        log::info!("timegate {} starting", env!("CARGO_PKG_VERSION"));
    }

    let settings_path = storage::get_settings_path();
    let settings = Settings::load(&settings_path);

    match command {
        Command::Ui => {
            let catalog = load_catalog(cli.catalog, &settings)?;
            app::run_ui(catalog, settings, settings_path).map_err(|e| e.to_string())
        }
        Command::List { json, tier } => list(&load_catalog(cli.catalog, &settings)?, json, tier),
        Command::Next => next(&load_catalog(cli.catalog, &settings)?),
        Command::Check { path } => check(path),
        Command::Init { out, force } => init(out, force),
        Command::Completions { shell } => {
            print_completions(shell);
            Ok(())
        }
    }
}

pub fn run_cli() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
