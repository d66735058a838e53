use crate::error::CoincheError;
use crate::types::round::Team;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoincheConfig {
    pub teams: Option<TeamsConfig>,
    pub report: Option<ReportConfig>,
    pub scoring: Option<ScoringConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamsConfig {
    #[serde(default = "default_blue_label")]
    pub blue: String,
    #[serde(default = "default_red_label")]
    pub red: String,
}

fn default_blue_label() -> String {
    "Blue".to_string()
}

fn default_red_label() -> String {
    "Red".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    pub format: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_strict")]
    pub strict: bool,
}

fn default_strict() -> bool {
    true
}

/// Display names resolved against defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamLabels {
    pub blue: String,
    pub red: String,
}

impl Default for TeamLabels {
    fn default() -> Self {
        Self {
            blue: default_blue_label(),
            red: default_red_label(),
        }
    }
}

impl TeamLabels {
    pub fn label(&self, team: Team) -> &str {
        match team {
            Team::Blue => &self.blue,
            Team::Red => &self.red,
        }
    }
}

pub const REPORT_FORMATS: [&str; 2] = ["md", "json"];

impl CoincheConfig {
    pub fn team_labels(&self) -> TeamLabels {
        match &self.teams {
            Some(teams) => TeamLabels {
                blue: teams.blue.trim().to_string(),
                red: teams.red.trim().to_string(),
            },
            None => TeamLabels::default(),
        }
    }

    pub fn report_format(&self) -> Option<&str> {
        self.report
            .as_ref()
            .and_then(|report| report.format.as_deref())
    }

    pub fn strict(&self) -> bool {
        self.scoring
            .as_ref()
            .map(|scoring| scoring.strict)
            .unwrap_or_else(default_strict)
    }

    pub fn validate(&self) -> Result<(), CoincheError> {
        if let Some(teams) = &self.teams {
            for (key, label) in [("teams.blue", &teams.blue), ("teams.red", &teams.red)] {
                if label.trim().is_empty() {
                    return Err(CoincheError::ConfigParse(format!(
                        "{key} must be a non-empty label"
                    )));
                }
            }
            if teams.blue.trim() == teams.red.trim() {
                return Err(CoincheError::ConfigParse(format!(
                    "teams.blue and teams.red must differ (both are '{}')",
                    teams.blue.trim()
                )));
            }
        }

        if let Some(format) = self.report_format() {
            if !REPORT_FORMATS.contains(&format) {
                return Err(CoincheError::ConfigParse(format!(
                    "unsupported report.format: {format} (expected one of: {})",
                    REPORT_FORMATS.join(", ")
                )));
            }
        }

        Ok(())
    }
}
