//! Meets: the pool configuration that every event of a meet shares.

use chrono::NaiveDate;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ids::{MeetId, TeamId};

/// Lanes used when a meet does not say otherwise.
pub const DEFAULT_LANES: u32 = 8;

#[cfg(feature = "serde")]
const fn default_lanes() -> u32 {
    DEFAULT_LANES
}

/// A competition day.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Meet {
    /// Meet identity.
    pub id: MeetId,
    /// Display name.
    pub name: String,
    /// Date of competition, if scheduled.
    #[cfg_attr(feature = "serde", serde(default))]
    pub date: Option<NaiveDate>,
    /// Number of lanes in the pool.
    #[cfg_attr(feature = "serde", serde(default = "default_lanes"))]
    pub lanes_available: u32,
    /// Home team for dual meets.
    #[cfg_attr(feature = "serde", serde(default, rename = "homeTeamId"))]
    pub home_team: Option<TeamId>,
    /// Away team for dual meets.
    #[cfg_attr(feature = "serde", serde(default, rename = "awayTeamId"))]
    pub away_team: Option<TeamId>,
}

impl Meet {
    /// Creates a meet with the default lane count and no home/away teams.
    #[must_use]
    pub fn new(id: impl Into<MeetId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            date: None,
            lanes_available: DEFAULT_LANES,
            home_team: None,
            away_team: None,
        }
    }

    /// Sets the date.
    #[must_use]
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Sets the lane count.
    #[must_use]
    pub fn with_lanes(mut self, lanes: u32) -> Self {
        self.lanes_available = lanes;
        self
    }

    /// Makes this a dual meet between `home` and `away`.
    #[must_use]
    pub fn with_home_away(mut self, home: impl Into<TeamId>, away: impl Into<TeamId>) -> Self {
        self.home_team = Some(home.into());
        self.away_team = Some(away.into());
        self
    }

    /// Returns true when both a home and an away team are set.
    #[must_use]
    pub fn has_home_away(&self) -> bool {
        self.home_team.is_some() && self.away_team.is_some()
    }

    /// Returns true when `team` is the home team of a dual meet.
    #[must_use]
    pub fn is_home(&self, team: &TeamId) -> bool {
        self.has_home_away() && self.home_team.as_ref() == Some(team)
    }

    /// Checks the meet configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the pool has no lanes.
    pub fn validate(&self) -> Result<()> {
        if self.lanes_available == 0 {
            return Err(Error::validation(format!(
                "meet {} must have at least one lane",
                self.id
            )));
        }
        Ok(())
    }
}
