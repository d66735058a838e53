use crate::error::{CoincheError, Result};
use crate::scoring::catalog::{Announcement, AnnouncementRule};
use crate::scoring::TOTAL_TRICK_POINTS;
use crate::types::round::{RoundInput, Team, TeamTally};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub id: String,
    pub message: String,
}

impl Violation {
    fn new(id: &str, message: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            message: message.into(),
        }
    }
}

/// Counts every held title for a team, folding the belote flag in as one instance.
pub fn held_titles(tally: &TeamTally) -> BTreeMap<Announcement, usize> {
    let mut held = BTreeMap::new();
    for announcement in &tally.announcements {
        *held.entry(*announcement).or_insert(0) += 1;
    }
    if tally.belote_rebelote {
        *held.entry(Announcement::BeloteRebelote).or_insert(0) += 1;
    }
    held
}

pub fn validate_round(round: &RoundInput) -> Vec<Violation> {
    let mut violations = Vec::new();

    let blue = held_titles(&round.blue);
    let red = held_titles(&round.red);

    for (team, held) in [(Team::Blue, &blue), (Team::Red, &red)] {
        for (announcement, count) in held {
            if *count < 2 {
                continue;
            }
            let id = match announcement.rule() {
                AnnouncementRule::Repeatable => continue,
                AnnouncementRule::ExclusivePair => "announce.pair_repeated",
                AnnouncementRule::MutexSingleton => "announce.singleton_repeated",
            };
            violations.push(Violation::new(
                id,
                format!("{team} holds {announcement} {count} times"),
            ));
        }
    }

    for announcement in blue.keys().filter(|announcement| red.contains_key(*announcement)) {
        let id = match announcement.rule() {
            AnnouncementRule::Repeatable => continue,
            AnnouncementRule::ExclusivePair => "announce.pair_shared",
            AnnouncementRule::MutexSingleton => "announce.singleton_shared",
        };
        violations.push(Violation::new(
            id,
            format!("{announcement} is held by both teams"),
        ));
    }

    if round.blue.last_trick && round.red.last_trick {
        violations.push(Violation::new(
            "last_trick.both",
            "only one team can take the last trick",
        ));
    }

    if round.surcoinched && !round.coinched {
        violations.push(Violation::new(
            "coinche.surcoinche_without_coinche",
            "surcoinche requires the bid to be coinched first",
        ));
    }

    for team in Team::ALL {
        let points = round.tally(team).points;
        if points < 0 {
            violations.push(Violation::new(
                "points.negative",
                format!("{team} trick points cannot be negative (found {points})"),
            ));
        } else if points > TOTAL_TRICK_POINTS {
            violations.push(Violation::new(
                "points.out_of_range",
                format!(
                    "{team} trick points cannot exceed {TOTAL_TRICK_POINTS} (found {points})"
                ),
            ));
        }
    }

    violations
}

pub fn ensure_valid(round: &RoundInput) -> Result<()> {
    let violations = validate_round(round);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(CoincheError::InvalidRound(violations))
    }
}
