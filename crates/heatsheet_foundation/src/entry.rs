//! Competitor entries as they appear inside a lane.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::competitor::Competitor;
use crate::error::{Error, Result};
use crate::ids::{CompetitorId, TeamId};

#[cfg(feature = "serde")]
mod serde_support {
    use super::SeedTime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

    impl Serialize for SeedTime {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for SeedTime {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let text = String::deserialize(deserializer)?;
            text.parse().map_err(de::Error::custom)
        }
    }
}

/// A seed time, or the "no time" sentinel.
///
/// Recorded times are kept in hundredths of a second and print as
/// `m:ss.hh` from one minute up, `ss.hh` below.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeedTime {
    /// No time on record ("NT").
    #[default]
    NoTime,
    /// A recorded time in hundredths of a second.
    Recorded(u32),
}

impl SeedTime {
    /// Returns true for the "NT" sentinel.
    #[must_use]
    pub const fn is_no_time(self) -> bool {
        matches!(self, Self::NoTime)
    }
}

impl fmt::Display for SeedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NoTime => write!(f, "NT"),
            Self::Recorded(hundredths) => {
                let minutes = hundredths / 6000;
                let seconds = (hundredths / 100) % 60;
                let fraction = hundredths % 100;
                if minutes > 0 {
                    write!(f, "{minutes}:{seconds:02}.{fraction:02}")
                } else {
                    write!(f, "{seconds}.{fraction:02}")
                }
            }
        }
    }
}

impl FromStr for SeedTime {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() || text.eq_ignore_ascii_case("nt") {
            return Ok(Self::NoTime);
        }

        let invalid = || Error::validation(format!("invalid seed time: {text:?}"));

        let (minutes, rest) = match text.split_once(':') {
            Some((m, rest)) => (m.parse::<u32>().map_err(|_| invalid())?, rest),
            None => (0, text),
        };
        let (whole, fraction) = match rest.split_once('.') {
            Some((w, f)) => (w, f),
            None => (rest, ""),
        };
        let seconds = whole.parse::<u32>().map_err(|_| invalid())?;
        if minutes > 0 && seconds >= 60 {
            return Err(invalid());
        }
        let hundredths = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u32>().map_err(|_| invalid())? * 10,
            2 => fraction.parse::<u32>().map_err(|_| invalid())?,
            _ => return Err(invalid()),
        };

        minutes
            .checked_mul(6000)
            .and_then(|m| seconds.checked_mul(100).and_then(|s| m.checked_add(s)))
            .and_then(|t| t.checked_add(hundredths))
            .map(Self::Recorded)
            .ok_or_else(invalid)
    }
}

/// A roster member copied into a lane at assignment time.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Entry {
    /// Roster identity of the competitor.
    pub id: CompetitorId,
    /// Given name at the time of entry.
    pub first_name: String,
    /// Family name at the time of entry.
    pub last_name: String,
    /// Team the competitor swims for.
    pub team: TeamId,
    /// Seed time, "NT" by default.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed_time: SeedTime,
}

impl Entry {
    /// Copies a roster member into an entry for `team` with no seed time.
    #[must_use]
    pub fn from_competitor(competitor: &Competitor, team: &TeamId) -> Self {
        Self {
            id: competitor.id.clone(),
            first_name: competitor.first_name.clone(),
            last_name: competitor.last_name.clone(),
            team: team.clone(),
            seed_time: SeedTime::NoTime,
        }
    }

    /// Sets the seed time.
    #[must_use]
    pub fn with_seed_time(mut self, seed_time: SeedTime) -> Self {
        self.seed_time = seed_time;
        self
    }

    /// Returns "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
