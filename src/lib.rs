//! Scorekeeping for Coinche: the round-scoring engine, the bidding/scoring
//! workflow of a match, and the reports built on top of them.

pub mod cli;
pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod match_file;
pub mod report;
pub mod scoring;
pub mod types;

pub use error::{CoincheError, Result};
pub use scoring::{score_breakdown, score_round};
pub use types::round::{Contract, RoundInput, RoundResult, Suit, Team, TeamTally};
