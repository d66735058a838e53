use clap::Parser;
use coinche::cli::{self, ReportFormat};
use coinche::error::CoincheError;
use coinche::game::{play_round, BiddingPhase, MatchFlow, MatchOutcome};
use coinche::report::{self, OutputFormat, RoundReport};
use coinche::scoring::{score_breakdown, validation};
use coinche::types::config::CoincheConfig;
use coinche::{config, logging, match_file};
use tracing::debug;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const BLOCKING: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn load_config() -> Result<CoincheConfig, CoincheError> {
    let root = std::env::current_dir()?;
    match config::load_config(&root)? {
        Some(cfg) => Ok(cfg),
        None => {
            debug!(root = %root.display(), "no config layer found, using defaults");
            Ok(CoincheConfig::default())
        }
    }
}

fn output_format(requested: Option<ReportFormat>, cfg: &CoincheConfig) -> OutputFormat {
    match requested {
        Some(ReportFormat::Json) => OutputFormat::Json,
        Some(ReportFormat::Md) => OutputFormat::Md,
        None => cfg
            .report_format()
            .and_then(OutputFormat::from_config)
            .unwrap_or(OutputFormat::Md),
    }
}

fn run() -> Result<i32, CoincheError> {
    let cli = cli::Cli::parse();
    logging::init(cli.verbose, cli.quiet);
    match cli.command {
        cli::Commands::Score(cmd) => {
            let cfg = load_config()?;
            let round = match_file::load_round(&cmd.round)?;
            if cfg.strict() {
                validation::ensure_valid(&round)?;
            }

            let breakdown = score_breakdown(&round);
            let report = RoundReport::new(round, breakdown);
            let rendered = report::render_round(
                &report,
                &cfg.team_labels(),
                output_format(cmd.format, &cfg),
            )?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Check(cmd) => {
            let round = match_file::load_round(&cmd.round)?;
            let violations = validation::validate_round(&round);

            if violations.is_empty() {
                println!("check: no violations");
                return Ok(exit_code::SUCCESS);
            }

            for violation in &violations {
                println!("[BLOCKING] {}: {}", violation.id, violation.message);
            }
            Ok(exit_code::BLOCKING)
        }
        cli::Commands::Replay(cmd) => {
            let cfg = load_config()?;
            let recorded = match_file::load_match(&cmd.match_file)?;

            let mut bidding = BiddingPhase::new(cfg.strict());
            for (index, round) in recorded.rounds.iter().enumerate() {
                bidding = play_round(bidding, round).map_err(|e| CoincheError::InRound {
                    number: index + 1,
                    source: Box::new(e),
                })?;
            }
            let summary = MatchFlow::Bidding(bidding).end_match();

            let labels = cfg.team_labels();
            let rendered =
                report::render_match(&summary, &labels, output_format(cmd.format, &cfg))?;
            println!("{rendered}");

            if matches!(summary.outcome, MatchOutcome::Tie) {
                eprintln!(
                    "warning: match ended in a tie ({} {} - {} {}), no winner recorded",
                    labels.blue, summary.blue_total, labels.red, summary.red_total
                );
                Ok(exit_code::WARNINGS)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Catalog(cmd) => {
            let format = match cmd.format {
                ReportFormat::Json => OutputFormat::Json,
                ReportFormat::Md => OutputFormat::Md,
            };
            println!("{}", report::render_catalog(format)?);
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
