use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "coinche",
    version,
    about = "Coinche scorekeeper: round scoring and match replay"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a single round file
    Score(ScoreCommand),
    /// Check a round file for inconsistent announcements and flags
    Check(CheckCommand),
    /// Replay a recorded match and print its summary
    Replay(ReplayCommand),
    /// List the announcement catalog
    Catalog(CatalogCommand),
}

#[derive(Args)]
pub struct ScoreCommand {
    pub round: PathBuf,
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

#[derive(Args)]
pub struct CheckCommand {
    pub round: PathBuf,
}

#[derive(Args)]
pub struct ReplayCommand {
    pub match_file: PathBuf,
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

#[derive(Args)]
pub struct CatalogCommand {
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
