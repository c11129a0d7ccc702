//! Command line entry point for tab-rating
//!
//! Loads the stored ratings, rates every round of one tournament from its
//! tab exports and writes the updated ratings back.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tab_rating::config::AppConfig;
use tab_rating::ingest::TabDirectorySource;
use tab_rating::rating::storage::write_archive;
use tab_rating::rating::{
    EloRatingCalculator, FileRatingStorage, NoOpRatingCalculator, RatingCalculator, RatingStorage,
};
use tab_rating::{Tournament, TournamentReport};
use tracing::{error, info};

/// Tab Rating - individual Elo ratings from four-team tournament results
#[derive(Parser)]
#[command(
    name = "tab-rating",
    version,
    about = "Update individual Elo ratings from a four-team debate tournament",
    long_about = "Tab Rating reads a tournament's speaker tab and per-round team results, \
                 expands every match into individual wins and losses, and updates each \
                 competitor's Elo rating round by round."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Number of rounds override
    #[arg(short, long, value_name = "N", help = "Override number of rated rounds")]
    rounds: Option<usize>,

    /// Data directory override
    #[arg(long, value_name = "DIR", help = "Override tournament data directory")]
    data_dir: Option<PathBuf>,

    /// Ratings file override
    #[arg(long, value_name = "FILE", help = "Override ratings file")]
    ratings: Option<PathBuf>,

    /// Archive directory override
    #[arg(long, value_name = "DIR", help = "Write a timestamped copy of the result here")]
    archive_dir: Option<PathBuf>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate inputs and exit)
    #[arg(
        long,
        help = "Validate configuration and every round's data without changing ratings"
    )]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file or environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(rounds) = args.rounds {
        config.tournament.rounds = rounds;
    }

    if let Some(data_dir) = &args.data_dir {
        config.tournament.data_dir = data_dir.clone();
    }

    if let Some(ratings) = &args.ratings {
        config.tournament.ratings_file = ratings.clone();
    }

    if let Some(archive_dir) = &args.archive_dir {
        config.tournament.archive_dir = Some(archive_dir.clone());
    }

    tab_rating::config::validate_config(&config)?;
    Ok(config)
}

/// Display startup banner with run information
fn display_startup_banner(config: &AppConfig) {
    info!("{} v{}", config.service.name, tab_rating::VERSION);
    info!("   Data: {}", config.tournament.data_dir.display());
    info!("   Rounds: {}", config.tournament.rounds);
    info!("   Ratings: {}", config.tournament.ratings_file.display());
    info!("   Initial rating: {}", config.rating.initial_rating);
}

fn print_report(report: &TournamentReport) {
    for summary in &report.rounds {
        println!(
            "Round {}: {} matches, {} individual pairings, {} competitors rated",
            summary.round, summary.matches, summary.individual_pairings, summary.competitors_rated
        );
    }
    println!(
        "{} competitors in table ({} newly enrolled)",
        report.table.len(),
        report.enrolled
    );
}

fn run(config: &AppConfig, dry_run: bool) -> Result<()> {
    let storage = FileRatingStorage::new(&config.tournament.ratings_file);
    let table = storage.load()?;

    let source = TabDirectorySource::new(
        &config.tournament.data_dir,
        config.tournament.speaker_tab_file.clone(),
        config.tournament.rounds,
        config.tournament.ranks_include_institution,
    );

    let calculator: Box<dyn RatingCalculator> = if dry_run {
        Box::new(NoOpRatingCalculator::new(config.rating.initial_rating))
    } else {
        Box::new(EloRatingCalculator::new(config.rating.clone())?)
    };

    let tournament = Tournament::new(calculator, config.tournament.rounds);
    let report = tournament.run(&source, table)?;
    print_report(&report);

    if dry_run {
        info!("Dry run completed - ratings file left unchanged");
        return Ok(());
    }

    storage.save(&report.table)?;
    if let Some(archive_dir) = &config.tournament.archive_dir {
        let path = write_archive(archive_dir, &report.table)?;
        info!("Archived ratings to {}", path.display());
    }

    Ok(())
}

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration (CLI args can override environment/config file)
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    // Initialize logging early (before any other operations)
    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    display_startup_banner(&config);

    if let Err(e) = run(&config, args.dry_run) {
        error!("Rating run failed: {:#}", e);
        std::process::exit(1);
    }
}
