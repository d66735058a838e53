use crate::error::CoincheError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a title may be held within a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementRule {
    /// Any number of instances per team, each scored.
    Repeatable,
    /// Once per team, and never by both teams.
    ExclusivePair,
    /// Once per round across both teams.
    MutexSingleton,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Announcement {
    #[serde(rename = "Belote-Rebelote")]
    BeloteRebelote,
    #[serde(rename = "Carré de Valets")]
    CarreValets,
    #[serde(rename = "Carré de 9")]
    CarreNeufs,
    #[serde(rename = "Carré de 10")]
    CarreDix,
    #[serde(rename = "Carré de Dames")]
    CarreDames,
    #[serde(rename = "Carré de Rois")]
    CarreRois,
    #[serde(rename = "Carré d'As")]
    CarreAs,
    #[serde(rename = "Tierce")]
    Tierce,
    #[serde(rename = "Cinquante")]
    Cinquante,
    #[serde(rename = "Cent")]
    Cent,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CatalogEntry {
    #[serde(skip)]
    pub announcement: Announcement,
    pub title: &'static str,
    pub points: i32,
    pub rule: AnnouncementRule,
}

pub const BELOTE_REBELOTE_POINTS: i32 = 20;

pub static CATALOG: [CatalogEntry; 10] = [
    CatalogEntry {
        announcement: Announcement::BeloteRebelote,
        title: "Belote-Rebelote",
        points: BELOTE_REBELOTE_POINTS,
        rule: AnnouncementRule::MutexSingleton,
    },
    CatalogEntry {
        announcement: Announcement::CarreValets,
        title: "Carré de Valets",
        points: 200,
        rule: AnnouncementRule::ExclusivePair,
    },
    CatalogEntry {
        announcement: Announcement::CarreNeufs,
        title: "Carré de 9",
        points: 150,
        rule: AnnouncementRule::ExclusivePair,
    },
    CatalogEntry {
        announcement: Announcement::CarreDix,
        title: "Carré de 10",
        points: 100,
        rule: AnnouncementRule::ExclusivePair,
    },
    CatalogEntry {
        announcement: Announcement::CarreDames,
        title: "Carré de Dames",
        points: 100,
        rule: AnnouncementRule::ExclusivePair,
    },
    CatalogEntry {
        announcement: Announcement::CarreRois,
        title: "Carré de Rois",
        points: 100,
        rule: AnnouncementRule::ExclusivePair,
    },
    CatalogEntry {
        announcement: Announcement::CarreAs,
        title: "Carré d'As",
        points: 100,
        rule: AnnouncementRule::ExclusivePair,
    },
    CatalogEntry {
        announcement: Announcement::Tierce,
        title: "Tierce",
        points: 20,
        rule: AnnouncementRule::Repeatable,
    },
    CatalogEntry {
        announcement: Announcement::Cinquante,
        title: "Cinquante",
        points: 50,
        rule: AnnouncementRule::Repeatable,
    },
    CatalogEntry {
        announcement: Announcement::Cent,
        title: "Cent",
        points: 100,
        rule: AnnouncementRule::Repeatable,
    },
];

impl Announcement {
    pub fn entry(self) -> &'static CatalogEntry {
        // CATALOG is declared in variant order.
        &CATALOG[self as usize]
    }

    pub fn points(self) -> i32 {
        self.entry().points
    }

    pub fn rule(self) -> AnnouncementRule {
        self.entry().rule
    }

    pub fn title(self) -> &'static str {
        self.entry().title
    }
}

impl fmt::Display for Announcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Announcement {
    type Err = CoincheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        CATALOG
            .iter()
            .find(|entry| entry.title.eq_ignore_ascii_case(wanted))
            .map(|entry| entry.announcement)
            .ok_or_else(|| CoincheError::Parse(format!("unknown announcement: {wanted}")))
    }
}

pub fn catalog() -> &'static [CatalogEntry] {
    &CATALOG
}
