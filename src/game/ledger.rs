use crate::types::round::{RoundInput, RoundResult, Team};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchivedRound {
    pub number: usize,
    pub input: RoundInput,
    pub result: RoundResult,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchLedger {
    rounds: Vec<ArchivedRound>,
    blue_total: i64,
    red_total: i64,
}

impl MatchLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn archive(&mut self, input: RoundInput, result: RoundResult) -> &ArchivedRound {
        self.blue_total += i64::from(result.blue_points);
        self.red_total += i64::from(result.red_points);
        let number = self.rounds.len() + 1;
        info!(
            round = number,
            blue_points = result.blue_points,
            red_points = result.red_points,
            blue_total = self.blue_total,
            red_total = self.red_total,
            "round archived"
        );
        self.rounds.push(ArchivedRound {
            number,
            input,
            result,
        });
        &self.rounds[number - 1]
    }

    pub fn rounds(&self) -> &[ArchivedRound] {
        &self.rounds
    }

    pub fn last(&self) -> Option<&ArchivedRound> {
        self.rounds.last()
    }

    pub fn total(&self, team: Team) -> i64 {
        match team {
            Team::Blue => self.blue_total,
            Team::Red => self.red_total,
        }
    }

    pub fn end(self) -> MatchSummary {
        let outcome = MatchOutcome::decide(self.blue_total, self.red_total);
        info!(
            rounds = self.rounds.len(),
            blue_total = self.blue_total,
            red_total = self.red_total,
            ?outcome,
            "match ended"
        );
        MatchSummary {
            blue_total: self.blue_total,
            red_total: self.red_total,
            outcome,
            rounds: self.rounds,
            ended_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "team", rename_all = "lowercase")]
pub enum MatchOutcome {
    Winner(Team),
    /// Equal totals; no side is credited with the win.
    Tie,
}

impl MatchOutcome {
    pub fn decide(blue_total: i64, red_total: i64) -> Self {
        match blue_total.cmp(&red_total) {
            std::cmp::Ordering::Greater => MatchOutcome::Winner(Team::Blue),
            std::cmp::Ordering::Less => MatchOutcome::Winner(Team::Red),
            std::cmp::Ordering::Equal => MatchOutcome::Tie,
        }
    }

    pub fn winner(self) -> Option<Team> {
        match self {
            MatchOutcome::Winner(team) => Some(team),
            MatchOutcome::Tie => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchSummary {
    pub blue_total: i64,
    pub red_total: i64,
    pub outcome: MatchOutcome,
    pub rounds: Vec<ArchivedRound>,
    pub ended_at: DateTime<Utc>,
}
