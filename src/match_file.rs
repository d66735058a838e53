use crate::error::{CoincheError, Result};
use crate::types::round::RoundInput;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Toml,
    Json,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(FileFormat::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(FileFormat::Json),
            _ => Err(CoincheError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// A recorded match: rounds in play order.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchFile {
    #[serde(default)]
    pub rounds: Vec<RoundInput>,
}

pub fn load_round(path: &Path) -> Result<RoundInput> {
    load(path)
}

pub fn load_match(path: &Path) -> Result<MatchFile> {
    let file: MatchFile = load(path)?;
    debug!(path = %path.display(), rounds = file.rounds.len(), "match file loaded");
    Ok(file)
}

fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(CoincheError::FileNotFound(path.display().to_string()));
    }
    let format = FileFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    parse(&content, format)
}

pub fn parse<T: DeserializeOwned>(content: &str, format: FileFormat) -> Result<T> {
    match format {
        FileFormat::Toml => Ok(toml::from_str(content)?),
        FileFormat::Json => Ok(serde_json::from_str(content)?),
    }
}
