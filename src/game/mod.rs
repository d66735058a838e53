pub mod flow;
pub mod ledger;

pub use flow::{play_round, Bid, BiddingPhase, MatchFlow, RejectedSubmit, ScoringPhase};
pub use ledger::{ArchivedRound, MatchLedger, MatchOutcome, MatchSummary};
