use crate::scoring::validation::Violation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoincheError {
    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("file does not exist: {0}")]
    FileNotFound(String),

    #[error("unsupported file format: {0} (expected .toml or .json)")]
    UnsupportedFormat(String),

    #[error("invalid round: {}", summarize(.0))]
    InvalidRound(Vec<Violation>),

    #[error("round {number}: {source}")]
    InRound {
        number: usize,
        #[source]
        source: Box<CoincheError>,
    },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|violation| format!("{} ({})", violation.message, violation.id))
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, CoincheError>;
