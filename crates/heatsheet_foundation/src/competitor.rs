//! Roster members and team rosters.
//!
//! Rosters are owned by team administration; the assignment engine only reads
//! them.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ids::{CompetitorId, TeamId};

/// A competitor's gender as recorded on the roster.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Gender {
    /// Boys / men.
    Male,
    /// Girls / women.
    Female,
    /// Not recorded, or not recognized.
    #[default]
    Unspecified,
}

impl Gender {
    /// Interprets free roster text ("Boy", "girl", "M", "Female", ...).
    ///
    /// Unrecognized text maps to [`Gender::Unspecified`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "m" | "male" | "boy" | "boys" | "man" | "men" => Self::Male,
            "f" | "female" | "girl" | "girls" | "woman" | "women" => Self::Female,
            _ => Self::Unspecified,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
            Self::Unspecified => write!(f, "unspecified"),
        }
    }
}

/// A roster member.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Competitor {
    /// Roster identity.
    pub id: CompetitorId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Age in years (0 when unknown).
    #[cfg_attr(feature = "serde", serde(default))]
    pub age: u32,
    /// Recorded gender.
    #[cfg_attr(feature = "serde", serde(default))]
    pub gender: Gender,
}

impl Competitor {
    /// Creates a competitor with unknown age and gender.
    #[must_use]
    pub fn new(
        id: impl Into<CompetitorId>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            age: 0,
            gender: Gender::Unspecified,
        }
    }

    /// Sets the age.
    #[must_use]
    pub fn with_age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    /// Sets the gender.
    #[must_use]
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    /// Returns "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Exact, case-insensitive match on both names.
    #[must_use]
    pub fn matches_name(&self, first_name: &str, last_name: &str) -> bool {
        names_match(&self.first_name, first_name) && names_match(&self.last_name, last_name)
    }
}

fn names_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// A team's ordered list of competitors.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Roster {
    /// Owning team.
    pub team: TeamId,
    /// Members in roster order.
    pub competitors: Vec<Competitor>,
}

impl Roster {
    /// Creates an empty roster.
    #[must_use]
    pub fn new(team: impl Into<TeamId>) -> Self {
        Self {
            team: team.into(),
            competitors: Vec::new(),
        }
    }

    /// Appends a competitor.
    #[must_use]
    pub fn with_competitor(mut self, competitor: Competitor) -> Self {
        self.competitors.push(competitor);
        self
    }

    /// Returns the number of competitors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.competitors.len()
    }

    /// Returns true if the roster is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.competitors.is_empty()
    }

    /// Looks up a competitor by identity.
    #[must_use]
    pub fn get(&self, id: &CompetitorId) -> Option<&Competitor> {
        self.competitors.iter().find(|c| &c.id == id)
    }

    /// Finds the first competitor whose first and last names match,
    /// ignoring case.
    #[must_use]
    pub fn find_by_name(&self, first_name: &str, last_name: &str) -> Option<&Competitor> {
        self.competitors
            .iter()
            .find(|c| c.matches_name(first_name, last_name))
    }

    /// Returns an iterator over the competitors in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &Competitor> {
        self.competitors.iter()
    }
}
