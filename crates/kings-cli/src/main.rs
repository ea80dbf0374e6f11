use std::path::PathBuf;

use clap::{Parser, Subcommand};

use kings_cli::commands;
use kings_cli::config::LoggingConfig;
use kings_cli::logging::init_logging;
use kings_core::AppInfo;

/// Record kings games and prepare them for submission.
#[derive(Debug, Parser)]
#[command(
    name = "kings",
    author,
    version,
    about = "Kings game recorder and shuffle-trace encoder"
)]
struct Cli {
    /// Log level when RUST_LOG is not set (trace, debug, info, warn, error).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: String,

    /// Write JSON logs to this file instead of stderr.
    #[arg(long, value_name = "FILE", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the canonical deck for a table.
    Deck {
        #[arg(short, long, default_value_t = 4)]
        players: usize,
        /// Print a JSON array instead of one card per line.
        #[arg(long)]
        json: bool,
    },
    /// Attach the shuffle trace (`seed`) to a finished game record.
    Seed {
        game: PathBuf,
        /// Output file; stdout when omitted.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Check that a game record's seed deals its cards.
    Verify { game: PathBuf },
    /// Build a game record from a YAML session log.
    Record {
        session: PathBuf,
        /// Existing game record to continue.
        #[arg(long, value_name = "FILE")]
        game: Option<PathBuf>,
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Reconstruct an offline game from per-player card values.
    Analog {
        notes: PathBuf,
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Seed for the suit assignment, for reproducible output.
        #[arg(long, value_name = "SEED")]
        rng_seed: Option<u64>,
    },
    /// Convert a timestamp-based legacy record to start deltas.
    Upgrade { input: PathBuf, output: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let logging = LoggingConfig {
        tracing_level: cli.log_level,
        file: cli.log_file,
    };
    let _logging_guard = init_logging(&logging)?;
    tracing::debug!(app = AppInfo::name(), version = AppInfo::version(), "starting");

    match cli.command {
        Command::Deck { players, json } => commands::deck::run(players, json),
        Command::Seed { game, output } => commands::seed::run(&game, output.as_deref()),
        Command::Verify { game } => commands::seed::verify(&game),
        Command::Record {
            session,
            game,
            output,
        } => commands::record::run(&session, game.as_deref(), output.as_deref()),
        Command::Analog {
            notes,
            output,
            rng_seed,
        } => commands::analog::run(&notes, output.as_deref(), rng_seed),
        Command::Upgrade { input, output } => commands::upgrade::run(&input, &output),
    }
}
