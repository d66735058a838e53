use crate::error::CoincheError;
use crate::scoring::catalog::Announcement;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Blue,
    Red,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::Blue, Team::Red];

    pub fn opponent(self) -> Team {
        match self {
            Team::Blue => Team::Red,
            Team::Red => Team::Blue,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Team::Blue => "blue",
            Team::Red => "red",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Team {
    type Err = CoincheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blue" => Ok(Team::Blue),
            "red" => Ok(Team::Red),
            other => Err(CoincheError::Parse(format!("unknown team: {other}"))),
        }
    }
}

/// Trump suit of the bid. Only recorded for history; it never changes the arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    #[default]
    #[serde(alias = "♥")]
    Hearts,
    #[serde(alias = "♠")]
    Spades,
    #[serde(alias = "♣")]
    Clubs,
    #[serde(alias = "♦")]
    Diamonds,
}

impl Suit {
    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Hearts => "♥",
            Suit::Spades => "♠",
            Suit::Clubs => "♣",
            Suit::Diamonds => "♦",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

pub const CAPOT_VALUE: i32 = 250;

/// Declared target of the round: a point threshold on the 80..=160 ladder, or capot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Contract {
    Points(u8),
    Capot,
}

impl Contract {
    pub const LADDER: [u8; 9] = [80, 90, 100, 110, 120, 130, 140, 150, 160];

    pub fn points(value: u8) -> Result<Self, CoincheError> {
        if Self::LADDER.contains(&value) {
            Ok(Contract::Points(value))
        } else {
            Err(CoincheError::Parse(format!(
                "contract must be one of 80..=160 in steps of 10 or capot, found {value}"
            )))
        }
    }

    pub fn value(self) -> i32 {
        match self {
            Contract::Points(value) => i32::from(value),
            Contract::Capot => CAPOT_VALUE,
        }
    }
}

impl Default for Contract {
    fn default() -> Self {
        Contract::Points(80)
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Contract::Points(value) => write!(f, "{value}"),
            Contract::Capot => f.write_str("capot"),
        }
    }
}

impl FromStr for Contract {
    type Err = CoincheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("capot") {
            return Ok(Contract::Capot);
        }
        let value = trimmed
            .parse::<u8>()
            .map_err(|_| CoincheError::Parse(format!("unknown contract: {trimmed}")))?;
        Contract::points(value)
    }
}

impl TryFrom<String> for Contract {
    type Error = CoincheError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Contract> for String {
    fn from(contract: Contract) -> Self {
        contract.to_string()
    }
}

/// What one side brought back from the table: trick points, last trick and declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamTally {
    #[serde(default)]
    pub points: i32,
    #[serde(default)]
    pub last_trick: bool,
    #[serde(default)]
    pub announcements: Vec<Announcement>,
    #[serde(default)]
    pub belote_rebelote: bool,
}

impl TeamTally {
    /// Drops every instance of a title, the belote flag included. Returns whether any was held.
    pub fn release(&mut self, announcement: Announcement) -> bool {
        let before = self.announcements.len();
        self.announcements.retain(|held| *held != announcement);
        let mut released = self.announcements.len() != before;
        if announcement == Announcement::BeloteRebelote && self.belote_rebelote {
            self.belote_rebelote = false;
            released = true;
        }
        released
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundInput {
    pub declarer: Team,
    pub contract: Contract,
    #[serde(default)]
    pub suit: Suit,
    #[serde(default)]
    pub coinched: bool,
    #[serde(default)]
    pub surcoinched: bool,
    #[serde(default)]
    pub blue: TeamTally,
    #[serde(default)]
    pub red: TeamTally,
}

impl RoundInput {
    pub fn tally(&self, team: Team) -> &TeamTally {
        match team {
            Team::Blue => &self.blue,
            Team::Red => &self.red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub blue_points: i32,
    pub red_points: i32,
    pub contract_fulfilled: bool,
}

impl RoundResult {
    pub fn points_for(&self, team: Team) -> i32 {
        match team {
            Team::Blue => self.blue_points,
            Team::Red => self.red_points,
        }
    }
}
