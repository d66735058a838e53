pub mod catalog;
pub mod validation;

use crate::scoring::catalog::BELOTE_REBELOTE_POINTS;
use crate::types::round::{RoundInput, RoundResult, Team, TeamTally};
use serde::Serialize;
use tracing::debug;

/// Trick points in play for a full deal.
pub const TOTAL_TRICK_POINTS: i32 = 162;
pub const LAST_TRICK_BONUS: i32 = 10;
/// Flat award to the defence on a failed contract.
pub const FAILED_CONTRACT_PENALTY: i32 = 160;
/// Largest score a round can record; a multiple of ten so rounding stays in range.
pub const SCORE_CEILING: i32 = i32::MAX - i32::MAX % 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TeamScore {
    pub effective: i64,
    pub announcements: i64,
    pub raw: i64,
    pub rounded: i32,
}

/// Every intermediate value of a scored round, for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub multiplier: i32,
    pub target: i32,
    pub contract_fulfilled: bool,
    pub blue: TeamScore,
    pub red: TeamScore,
}

impl ScoreBreakdown {
    pub fn team(&self, team: Team) -> &TeamScore {
        match team {
            Team::Blue => &self.blue,
            Team::Red => &self.red,
        }
    }

    pub fn result(&self) -> RoundResult {
        RoundResult {
            blue_points: self.blue.rounded,
            red_points: self.red.rounded,
            contract_fulfilled: self.contract_fulfilled,
        }
    }
}

pub fn score_round(round: &RoundInput) -> RoundResult {
    score_breakdown(round).result()
}

pub fn score_breakdown(round: &RoundInput) -> ScoreBreakdown {
    let declarer = round.declarer;
    let defender = declarer.opponent();

    let declarer_tally = round.tally(declarer);
    let defender_tally = round.tally(defender);

    let declarer_effective = effective_points(declarer_tally);
    let defender_effective = effective_points(defender_tally);
    let declarer_announces = announcement_points(declarer_tally);
    let defender_announces = announcement_points(defender_tally);

    let multiplier = coinche_multiplier(round.coinched, round.surcoinched);
    let target = round.contract.value() * multiplier;
    let stake = i64::from(target);
    let contract_fulfilled = declarer_effective + declarer_announces >= stake;

    let (declarer_raw, defender_raw) = if contract_fulfilled {
        (
            stake + declarer_effective + declarer_announces,
            i64::from(TOTAL_TRICK_POINTS) - declarer_effective + defender_announces,
        )
    } else {
        (
            0,
            stake + i64::from(FAILED_CONTRACT_PENALTY) + defender_announces,
        )
    };

    debug!(
        %declarer,
        contract = %round.contract,
        multiplier,
        target,
        declarer_effective,
        declarer_announces,
        contract_fulfilled,
        "contract evaluated"
    );

    let declarer_score = TeamScore {
        effective: declarer_effective,
        announcements: declarer_announces,
        raw: declarer_raw,
        rounded: round_to_tens(clamp_score(declarer_raw)),
    };
    let defender_score = TeamScore {
        effective: defender_effective,
        announcements: defender_announces,
        raw: defender_raw,
        rounded: round_to_tens(clamp_score(defender_raw)),
    };

    let (blue, red) = match declarer {
        Team::Blue => (declarer_score, defender_score),
        Team::Red => (defender_score, declarer_score),
    };

    ScoreBreakdown {
        multiplier,
        target,
        contract_fulfilled,
        blue,
        red,
    }
}

pub fn announcement_points(tally: &TeamTally) -> i64 {
    let declared: i64 = tally
        .announcements
        .iter()
        .map(|announcement| i64::from(announcement.points()))
        .sum();
    let belote = if tally.belote_rebelote {
        BELOTE_REBELOTE_POINTS
    } else {
        0
    };
    declared + i64::from(belote)
}

pub fn effective_points(tally: &TeamTally) -> i64 {
    let bonus = if tally.last_trick { LAST_TRICK_BONUS } else { 0 };
    i64::from(tally.points) + i64::from(bonus)
}

/// Pins a raw score into the recordable range before rounding.
fn clamp_score(raw: i64) -> i32 {
    raw.clamp(-i64::from(SCORE_CEILING), i64::from(SCORE_CEILING)) as i32
}

pub fn coinche_multiplier(coinched: bool, surcoinched: bool) -> i32 {
    if surcoinched {
        4
    } else if coinched {
        2
    } else {
        1
    }
}

/// Records only tens: a remainder of 6 or more rounds up, anything less is dropped.
pub fn round_to_tens(score: i32) -> i32 {
    let remainder = score.rem_euclid(10);
    if remainder >= 6 {
        score - remainder + 10
    } else {
        score - remainder
    }
}
