pub mod json;
pub mod md;

use crate::error::CoincheError;
use crate::game::MatchSummary;
use crate::scoring::ScoreBreakdown;
use crate::types::config::TeamLabels;
use crate::types::round::{RoundInput, RoundResult};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Md,
}

impl OutputFormat {
    pub fn from_config(value: &str) -> Option<Self> {
        match value {
            "json" => Some(OutputFormat::Json),
            "md" => Some(OutputFormat::Md),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundReport {
    pub round: RoundInput,
    pub breakdown: ScoreBreakdown,
    pub result: RoundResult,
}

impl RoundReport {
    pub fn new(round: RoundInput, breakdown: ScoreBreakdown) -> Self {
        Self {
            result: breakdown.result(),
            round,
            breakdown,
        }
    }
}

pub fn render_round(
    report: &RoundReport,
    labels: &TeamLabels,
    format: OutputFormat,
) -> Result<String, CoincheError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(CoincheError::Json),
        OutputFormat::Md => Ok(md::round_to_markdown(report, labels)),
    }
}

pub fn render_match(
    summary: &MatchSummary,
    labels: &TeamLabels,
    format: OutputFormat,
) -> Result<String, CoincheError> {
    match format {
        OutputFormat::Json => json::to_json(summary).map_err(CoincheError::Json),
        OutputFormat::Md => Ok(md::match_to_markdown(summary, labels)),
    }
}

pub fn render_catalog(format: OutputFormat) -> Result<String, CoincheError> {
    match format {
        OutputFormat::Json => json::catalog_to_json().map_err(CoincheError::Json),
        OutputFormat::Md => Ok(md::catalog_to_markdown()),
    }
}
