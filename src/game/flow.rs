use crate::error::{CoincheError, Result};
use crate::game::ledger::{MatchLedger, MatchSummary};
use crate::scoring::catalog::{Announcement, AnnouncementRule};
use crate::scoring::validation::held_titles;
use crate::scoring::{score_round, validation};
use crate::types::round::{Contract, RoundInput, Suit, Team, TeamTally};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    pub declarer: Team,
    pub contract: Contract,
    pub suit: Suit,
    pub coinched: bool,
    pub surcoinched: bool,
}

impl Default for Bid {
    fn default() -> Self {
        Self {
            declarer: Team::Blue,
            contract: Contract::default(),
            suit: Suit::default(),
            coinched: false,
            surcoinched: false,
        }
    }
}

/// Where the current round stands. Each transition consumes the phase it leaves.
#[derive(Debug, Clone)]
pub enum MatchFlow {
    Bidding(BiddingPhase),
    Scoring(ScoringPhase),
}

impl MatchFlow {
    pub fn new(strict: bool) -> Self {
        MatchFlow::Bidding(BiddingPhase::new(strict))
    }

    pub fn ledger(&self) -> &MatchLedger {
        match self {
            MatchFlow::Bidding(phase) => &phase.ledger,
            MatchFlow::Scoring(phase) => &phase.ledger,
        }
    }

    /// Ends the match. A round still being scored is discarded.
    pub fn end_match(self) -> MatchSummary {
        match self {
            MatchFlow::Bidding(phase) => phase.ledger.end(),
            MatchFlow::Scoring(phase) => phase.ledger.end(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BiddingPhase {
    ledger: MatchLedger,
    bid: Bid,
    strict: bool,
}

impl BiddingPhase {
    /// Opens bidding on an empty match.
    pub fn new(strict: bool) -> Self {
        Self {
            ledger: MatchLedger::new(),
            bid: Bid::default(),
            strict,
        }
    }

    pub fn bid(&self) -> &Bid {
        &self.bid
    }

    pub fn ledger(&self) -> &MatchLedger {
        &self.ledger
    }

    pub fn declarer(mut self, team: Team) -> Self {
        self.bid.declarer = team;
        self
    }

    pub fn contract(mut self, contract: Contract) -> Self {
        self.bid.contract = contract;
        self
    }

    pub fn suit(mut self, suit: Suit) -> Self {
        self.bid.suit = suit;
        self
    }

    pub fn coinche(mut self) -> Self {
        self.bid.coinched = true;
        self
    }

    /// Surcoinche is only reachable through an accepted coinche.
    pub fn surcoinche(mut self) -> Self {
        self.bid.coinched = true;
        self.bid.surcoinched = true;
        self
    }

    pub fn clear_coinche(mut self) -> Self {
        self.bid.coinched = false;
        self.bid.surcoinched = false;
        self
    }

    pub fn with_bid(mut self, bid: Bid) -> Self {
        self.bid = bid;
        self
    }

    pub fn submit(self) -> ScoringPhase {
        debug!(
            declarer = %self.bid.declarer,
            contract = %self.bid.contract,
            suit = %self.bid.suit,
            coinched = self.bid.coinched,
            surcoinched = self.bid.surcoinched,
            "bid submitted"
        );
        ScoringPhase {
            ledger: self.ledger,
            bid: self.bid,
            blue: TeamTally::default(),
            red: TeamTally::default(),
            strict: self.strict,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoringPhase {
    ledger: MatchLedger,
    bid: Bid,
    blue: TeamTally,
    red: TeamTally,
    strict: bool,
}

impl ScoringPhase {
    pub fn bid(&self) -> &Bid {
        &self.bid
    }

    pub fn tally(&self, team: Team) -> &TeamTally {
        match team {
            Team::Blue => &self.blue,
            Team::Red => &self.red,
        }
    }

    fn tally_mut(&mut self, team: Team) -> &mut TeamTally {
        match team {
            Team::Blue => &mut self.blue,
            Team::Red => &mut self.red,
        }
    }

    pub fn set_points(&mut self, team: Team, points: i32) {
        self.tally_mut(team).points = points;
    }

    /// Taking the last trick for one team releases it from the other.
    pub fn toggle_last_trick(&mut self, team: Team) {
        let taken = !self.tally(team).last_trick;
        self.tally_mut(team).last_trick = taken;
        if taken {
            self.tally_mut(team.opponent()).last_trick = false;
        }
    }

    fn opponent_holds(&self, team: Team, announcement: Announcement) -> bool {
        held_titles(self.tally(team.opponent())).contains_key(&announcement)
    }

    /// Returns false when the other team already holds belote-rebelote.
    pub fn toggle_belote(&mut self, team: Team) -> bool {
        if self.opponent_holds(team, Announcement::BeloteRebelote) {
            return false;
        }
        let tally = self.tally_mut(team);
        if !tally.release(Announcement::BeloteRebelote) {
            tally.belote_rebelote = true;
        }
        true
    }

    /// Adds a repeatable title, or toggles an exclusive one. Returns false when refused.
    pub fn toggle_announcement(&mut self, team: Team, announcement: Announcement) -> bool {
        match announcement.rule() {
            AnnouncementRule::Repeatable => {
                self.tally_mut(team).announcements.push(announcement);
                true
            }
            AnnouncementRule::ExclusivePair | AnnouncementRule::MutexSingleton => {
                if self.opponent_holds(team, announcement) {
                    return false;
                }
                let tally = self.tally_mut(team);
                if !tally.release(announcement) {
                    tally.announcements.push(announcement);
                }
                true
            }
        }
    }

    /// Drops the most recent instance of a title. Returns false if the team did not hold it.
    pub fn remove_announcement(&mut self, team: Team, announcement: Announcement) -> bool {
        let tally = self.tally_mut(team);
        let latest = tally
            .announcements
            .iter()
            .rposition(|held| *held == announcement);
        match latest {
            Some(index) => {
                tally.announcements.remove(index);
                true
            }
            None => tally.release(announcement),
        }
    }

    pub fn round_input(&self) -> RoundInput {
        RoundInput {
            declarer: self.bid.declarer,
            contract: self.bid.contract,
            suit: self.bid.suit,
            coinched: self.bid.coinched,
            surcoinched: self.bid.surcoinched,
            blue: self.blue.clone(),
            red: self.red.clone(),
        }
    }

    /// Scores and archives the round, then opens bidding for the next one.
    /// A strict rejection hands the phase back untouched so the draft can be corrected.
    pub fn submit(self) -> std::result::Result<BiddingPhase, RejectedSubmit> {
        let input = self.round_input();
        if self.strict {
            if let Err(error) = validation::ensure_valid(&input) {
                warn!(
                    archived = self.ledger.rounds().len(),
                    %error,
                    "round submission rejected"
                );
                return Err(RejectedSubmit {
                    phase: Box::new(self),
                    error,
                });
            }
        }
        let result = score_round(&input);
        let mut ledger = self.ledger;
        ledger.archive(input, result);
        Ok(BiddingPhase {
            ledger,
            bid: Bid::default(),
            strict: self.strict,
        })
    }

    pub fn check(&self) -> Vec<validation::Violation> {
        validation::validate_round(&self.round_input())
    }
}

/// A strict submission that failed the validity pass, with the phase that was submitted.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct RejectedSubmit {
    pub phase: Box<ScoringPhase>,
    #[source]
    pub error: CoincheError,
}

impl RejectedSubmit {
    /// Resumes editing the rejected draft; every archived round is still in its ledger.
    pub fn into_phase(self) -> ScoringPhase {
        *self.phase
    }
}

impl From<RejectedSubmit> for CoincheError {
    fn from(rejected: RejectedSubmit) -> Self {
        rejected.error
    }
}

impl From<&RoundInput> for Bid {
    fn from(input: &RoundInput) -> Self {
        Self {
            declarer: input.declarer,
            contract: input.contract,
            suit: input.suit,
            coinched: input.coinched,
            surcoinched: input.surcoinched,
        }
    }
}

/// Drives one recorded round through a bidding phase and its scoring phase.
pub fn play_round(bidding: BiddingPhase, input: &RoundInput) -> Result<BiddingPhase> {
    let mut scoring = bidding.with_bid(Bid::from(input)).submit();
    scoring.blue = input.blue.clone();
    scoring.red = input.red.clone();
    Ok(scoring.submit()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoincheError;

    fn bidding(strict: bool) -> BiddingPhase {
        match MatchFlow::new(strict) {
            MatchFlow::Bidding(phase) => phase,
            MatchFlow::Scoring(_) => panic!("a match starts in bidding"),
        }
    }

    #[test]
    fn new_match_starts_bidding_with_default_bid() {
        let phase = bidding(true);
        assert_eq!(*phase.bid(), Bid::default());
        assert_eq!(phase.bid().contract, Contract::Points(80));
        assert!(phase.ledger().rounds().is_empty());
    }

    #[test]
    fn surcoinche_implies_coinche_and_clear_resets_both() {
        let phase = bidding(true).surcoinche();
        assert!(phase.bid().coinched && phase.bid().surcoinched);
        let phase = phase.clear_coinche();
        assert!(!phase.bid().coinched && !phase.bid().surcoinched);
    }

    #[test]
    fn submitting_scores_archives_and_resets_bid() {
        let mut scoring = bidding(true)
            .declarer(Team::Blue)
            .contract(Contract::Points(80))
            .suit(Suit::Spades)
            .submit();
        scoring.set_points(Team::Blue, 90);
        scoring.set_points(Team::Red, 62);
        scoring.toggle_last_trick(Team::Blue);

        let next = scoring.submit().expect("valid round should archive");
        assert_eq!(*next.bid(), Bid::default());
        let archived = next.ledger().last().expect("round archived");
        assert_eq!(archived.number, 1);
        assert_eq!(archived.result.blue_points, 180);
        assert_eq!(archived.result.red_points, 60);
        assert_eq!(archived.input.suit, Suit::Spades);
        assert_eq!(next.ledger().total(Team::Red), 60);
    }

    #[test]
    fn last_trick_is_mutually_exclusive_by_construction() {
        let mut scoring = bidding(true).submit();
        scoring.toggle_last_trick(Team::Blue);
        scoring.toggle_last_trick(Team::Red);
        assert!(!scoring.tally(Team::Blue).last_trick);
        assert!(scoring.tally(Team::Red).last_trick);
        scoring.toggle_last_trick(Team::Red);
        assert!(!scoring.tally(Team::Red).last_trick);
    }

    #[test]
    fn belote_is_refused_while_other_team_holds_it() {
        let mut scoring = bidding(true).submit();
        assert!(scoring.toggle_belote(Team::Red));
        assert!(!scoring.toggle_announcement(Team::Blue, Announcement::BeloteRebelote));
        assert!(!scoring.tally(Team::Blue).belote_rebelote);
        assert!(scoring.remove_announcement(Team::Red, Announcement::BeloteRebelote));
        assert!(scoring.toggle_belote(Team::Blue));
    }

    #[test]
    fn belote_listed_by_the_other_team_blocks_the_flag() {
        let mut scoring = bidding(true).submit();
        scoring.red.announcements = vec![Announcement::BeloteRebelote];
        assert!(!scoring.toggle_belote(Team::Blue));
        assert!(!scoring.tally(Team::Blue).belote_rebelote);

        assert!(scoring.remove_announcement(Team::Red, Announcement::BeloteRebelote));
        assert!(scoring.toggle_belote(Team::Blue));
        assert!(scoring.tally(Team::Blue).belote_rebelote);
    }

    #[test]
    fn singleton_titles_toggle_off_whichever_way_they_were_held() {
        let mut scoring = bidding(true).submit();
        assert!(scoring.toggle_belote(Team::Blue));
        assert!(scoring.toggle_announcement(Team::Blue, Announcement::BeloteRebelote));
        assert!(!scoring.tally(Team::Blue).belote_rebelote);
        assert!(scoring.tally(Team::Blue).announcements.is_empty());

        assert!(scoring.toggle_announcement(Team::Red, Announcement::BeloteRebelote));
        assert!(!scoring.toggle_announcement(Team::Blue, Announcement::BeloteRebelote));
        assert!(scoring.check().is_empty());
    }

    #[test]
    fn repeatable_titles_stack_and_remove_last_instance() {
        let mut scoring = bidding(true).submit();
        assert!(scoring.toggle_announcement(Team::Blue, Announcement::Tierce));
        assert!(scoring.toggle_announcement(Team::Blue, Announcement::Cent));
        assert!(scoring.toggle_announcement(Team::Blue, Announcement::Tierce));
        assert!(scoring.toggle_announcement(Team::Red, Announcement::Tierce));
        assert_eq!(
            scoring.tally(Team::Blue).announcements,
            vec![Announcement::Tierce, Announcement::Cent, Announcement::Tierce]
        );

        assert!(scoring.remove_announcement(Team::Blue, Announcement::Tierce));
        assert_eq!(
            scoring.tally(Team::Blue).announcements,
            vec![Announcement::Tierce, Announcement::Cent]
        );
        assert!(!scoring.remove_announcement(Team::Blue, Announcement::Cinquante));
    }

    #[test]
    fn exclusive_titles_toggle_and_are_refused_across_teams() {
        let mut scoring = bidding(true).submit();
        assert!(scoring.toggle_announcement(Team::Red, Announcement::CarreValets));
        assert!(!scoring.toggle_announcement(Team::Blue, Announcement::CarreValets));
        assert!(scoring.toggle_announcement(Team::Blue, Announcement::CarreAs));
        assert!(scoring.toggle_announcement(Team::Red, Announcement::CarreValets));
        assert!(scoring.tally(Team::Red).announcements.is_empty());
        assert!(scoring.check().is_empty());
    }

    #[test]
    fn strict_submit_rejects_invalid_draft() {
        let mut scoring = bidding(true).submit();
        scoring.set_points(Team::Blue, -10);
        let rejected = scoring.submit().expect_err("negative points should be rejected");
        assert!(matches!(rejected.error, CoincheError::InvalidRound(_)));
    }

    #[test]
    fn rejected_submit_keeps_archived_rounds_and_draft() {
        let mut scoring = bidding(true).submit();
        scoring.set_points(Team::Blue, 90);
        scoring.set_points(Team::Red, 62);
        scoring.toggle_last_trick(Team::Blue);
        let next = scoring.submit().expect("first round should archive");

        let mut scoring = next.contract(Contract::Points(100)).submit();
        scoring.set_points(Team::Blue, -1);
        scoring.set_points(Team::Red, 163);
        let rejected = scoring.submit().expect_err("invalid draft should be rejected");
        assert!(rejected.to_string().contains("points.negative"));

        let mut scoring = rejected.into_phase();
        assert_eq!(scoring.ledger.rounds().len(), 1);
        assert_eq!(scoring.ledger.total(Team::Blue), 180);
        assert_eq!(scoring.bid().contract, Contract::Points(100));
        assert_eq!(scoring.tally(Team::Red).points, 163);

        scoring.set_points(Team::Blue, 0);
        scoring.set_points(Team::Red, 162);
        let next = scoring.submit().expect("corrected draft should archive");
        assert_eq!(next.ledger().rounds().len(), 2);
        assert_eq!(next.ledger().total(Team::Red), 60 + 260);
    }

    #[test]
    fn play_round_reports_the_underlying_violation() {
        let input = RoundInput {
            declarer: Team::Blue,
            contract: Contract::Points(80),
            suit: Suit::Hearts,
            coinched: false,
            surcoinched: true,
            blue: TeamTally {
                points: 162,
                ..TeamTally::default()
            },
            red: TeamTally::default(),
        };
        let err = play_round(bidding(true), &input).expect_err("round should be rejected");
        assert!(matches!(err, CoincheError::InvalidRound(_)));
    }

    #[test]
    fn lenient_submit_scores_whatever_it_is_given() {
        let mut scoring = bidding(false).submit();
        scoring.set_points(Team::Blue, -10);
        let next = scoring.submit().expect("lenient mode scores anyway");
        assert_eq!(next.ledger().rounds().len(), 1);
    }

    #[test]
    fn play_round_then_end_match_reports_winner() {
        let input = RoundInput {
            declarer: Team::Red,
            contract: Contract::Points(100),
            suit: Suit::Clubs,
            coinched: false,
            surcoinched: false,
            blue: TeamTally {
                points: 122,
                last_trick: true,
                ..TeamTally::default()
            },
            red: TeamTally {
                points: 40,
                ..TeamTally::default()
            },
        };
        let next = play_round(bidding(true), &input).expect("round should play");
        let summary = MatchFlow::Bidding(next).end_match();
        assert_eq!(summary.blue_total, 260);
        assert_eq!(summary.red_total, 0);
        assert_eq!(summary.outcome.winner(), Some(Team::Blue));
    }

    #[test]
    fn ending_mid_scoring_discards_draft() {
        let mut scoring = bidding(true).submit();
        scoring.set_points(Team::Blue, 162);
        let flow = MatchFlow::Scoring(scoring);
        assert!(flow.ledger().rounds().is_empty());
        let summary = flow.end_match();
        assert!(summary.rounds.is_empty());
    }
}
