use crate::game::{MatchOutcome, MatchSummary};
use crate::report::RoundReport;
use crate::scoring::catalog::{catalog, Announcement, AnnouncementRule};
use crate::types::config::TeamLabels;
use crate::types::round::{RoundInput, Team};

pub fn round_to_markdown(report: &RoundReport, labels: &TeamLabels) -> String {
    let round = &report.round;
    let breakdown = &report.breakdown;
    let mut output = String::new();
    output.push_str("# Round Score\n\n");
    output.push_str(&format!("Bid: {}\n\n", describe_bid(round, labels)));
    output.push_str(&format!(
        "Target: {} (x{})\n\n",
        breakdown.target, breakdown.multiplier
    ));
    output.push_str(&format!(
        "Contract: {}\n\n",
        if breakdown.contract_fulfilled {
            "fulfilled"
        } else {
            "failed"
        }
    ));

    output.push_str("## Teams\n\n");
    for team in Team::ALL {
        let tally = round.tally(team);
        let score = breakdown.team(team);
        let announces = if tally.announcements.is_empty() && !tally.belote_rebelote {
            "none".to_string()
        } else {
            let mut titles = tally
                .announcements
                .iter()
                .map(|announcement| announcement.to_string())
                .collect::<Vec<_>>();
            if tally.belote_rebelote {
                titles.push(Announcement::BeloteRebelote.to_string());
            }
            titles.join(", ")
        };
        output.push_str(&format!(
            "- {}: tricks {}{}, effective {}, announces {} ({}), raw {}, scored {}\n",
            labels.label(team),
            tally.points,
            if tally.last_trick { " + last trick" } else { "" },
            score.effective,
            score.announcements,
            announces,
            score.raw,
            score.rounded
        ));
    }

    output
}

pub fn match_to_markdown(summary: &MatchSummary, labels: &TeamLabels) -> String {
    let mut output = String::new();
    output.push_str("# Match Summary\n\n");
    output.push_str("## Rounds\n\n");
    if summary.rounds.is_empty() {
        output.push_str("- none\n\n");
    } else {
        output.push_str(&format!(
            "| # | bid | contract | {} | {} |\n|---|---|---|---|---|\n",
            labels.blue, labels.red
        ));
        for archived in &summary.rounds {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                archived.number,
                describe_bid(&archived.input, labels),
                if archived.result.contract_fulfilled {
                    "fulfilled"
                } else {
                    "failed"
                },
                archived.result.blue_points,
                archived.result.red_points
            ));
        }
        output.push('\n');
    }

    output.push_str("## Totals\n\n");
    output.push_str(&format!(
        "- {}: {}\n- {}: {}\n\n",
        labels.blue, summary.blue_total, labels.red, summary.red_total
    ));

    output.push_str("## Outcome\n\n");
    match summary.outcome {
        MatchOutcome::Winner(team) => {
            output.push_str(&format!("Winner: {}\n", labels.label(team)));
        }
        MatchOutcome::Tie => output.push_str("Tie: no winner\n"),
    }
    output.push_str(&format!("\nEnded at: {}\n", summary.ended_at.to_rfc3339()));

    output
}

pub fn catalog_to_markdown() -> String {
    let mut output = String::new();
    output.push_str("# Announcements\n\n");
    output.push_str("| title | points | rule |\n|---|---|---|\n");
    for entry in catalog() {
        let rule = match entry.rule {
            AnnouncementRule::Repeatable => "repeatable",
            AnnouncementRule::ExclusivePair => "once, not shared",
            AnnouncementRule::MutexSingleton => "one team per round",
        };
        output.push_str(&format!("| {} | {} | {} |\n", entry.title, entry.points, rule));
    }
    output
}

fn describe_bid(round: &RoundInput, labels: &TeamLabels) -> String {
    let coinche = if round.surcoinched {
        " surcoinched"
    } else if round.coinched {
        " coinched"
    } else {
        ""
    };
    format!(
        "{} {} {}{}",
        labels.label(round.declarer),
        round.contract,
        round.suit,
        coinche
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::MatchLedger;
    use crate::scoring::{score_breakdown, score_round};
    use crate::types::round::{Contract, Suit, TeamTally};

    fn failed_red_round() -> RoundInput {
        RoundInput {
            declarer: Team::Red,
            contract: Contract::Points(100),
            suit: Suit::Spades,
            coinched: true,
            surcoinched: false,
            blue: TeamTally {
                points: 122,
                last_trick: true,
                announcements: vec![Announcement::Tierce],
                ..TeamTally::default()
            },
            red: TeamTally {
                points: 40,
                belote_rebelote: true,
                ..TeamTally::default()
            },
        }
    }

    #[test]
    fn markdown_round_report_uses_team_labels() {
        let round = failed_red_round();
        let report = RoundReport::new(round.clone(), score_breakdown(&round));
        let labels = TeamLabels {
            blue: "Nous".to_string(),
            red: "Eux".to_string(),
        };

        let rendered = round_to_markdown(&report, &labels);
        assert!(rendered.contains("# Round Score"));
        assert!(rendered.contains("Bid: Eux 100 ♠ coinched"));
        assert!(rendered.contains("Target: 200 (x2)"));
        assert!(rendered.contains("Contract: failed"));
        assert!(rendered.contains("- Nous: tricks 122 + last trick"));
        assert!(rendered.contains("announces 20 (Belote-Rebelote)"));
    }

    #[test]
    fn markdown_match_summary_lists_rounds_totals_and_winner() {
        let round = failed_red_round();
        let mut ledger = MatchLedger::new();
        ledger.archive(round.clone(), score_round(&round));
        let summary = ledger.end();

        let rendered = match_to_markdown(&summary, &TeamLabels::default());
        assert!(rendered.contains("## Rounds"));
        assert!(rendered.contains("| 1 | Red 100 ♠ coinched | failed | 380 | 0 |"));
        assert!(rendered.contains("- Blue: 380"));
        assert!(rendered.contains("Winner: Blue"));
    }

    #[test]
    fn markdown_match_summary_reports_tie() {
        let summary = MatchLedger::new().end();
        let rendered = match_to_markdown(&summary, &TeamLabels::default());
        assert!(rendered.contains("- none"));
        assert!(rendered.contains("Tie: no winner"));
    }

    #[test]
    fn markdown_catalog_lists_every_entry() {
        let rendered = catalog_to_markdown();
        // header row plus one row per entry
        assert_eq!(rendered.matches("\n| ").count(), catalog().len() + 1);
        assert!(rendered.contains("| Carré de 9 | 150 | once, not shared |"));
    }
}
