//! Lane capacity limits and lane scan orders.

use heatsheet_foundation::TeamId;

use crate::heat::Lane;

/// How many lanes a pool has and how many competitors one lane may hold.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LaneLimits {
    /// Lanes numbered `1..=lanes_available`.
    pub lanes_available: u32,
    /// Competitors allowed in one lane (1 for individual events).
    pub per_lane: usize,
}

impl LaneLimits {
    /// Limits for an individual event.
    #[must_use]
    pub const fn individual(lanes_available: u32) -> Self {
        Self {
            lanes_available,
            per_lane: 1,
        }
    }

    /// Limits for a relay event with `lane_size` swimmers per lane.
    #[must_use]
    pub const fn relay(lanes_available: u32, lane_size: usize) -> Self {
        Self {
            lanes_available,
            per_lane: lane_size,
        }
    }

    /// Returns true when a lane may hold more than one competitor.
    #[must_use]
    pub const fn is_relay(&self) -> bool {
        self.per_lane > 1
    }

    /// Returns true when `lane` is a lane of this pool.
    #[must_use]
    pub const fn has_lane(&self, lane: u32) -> bool {
        lane >= 1 && lane <= self.lanes_available
    }

    /// Returns true when `seats` competitors of `team` fit into `lane`.
    ///
    /// An absent lane is empty. A relay lane that already holds swimmers only
    /// takes more swimmers of the same team.
    #[must_use]
    pub fn accepts(&self, lane: Option<&Lane>, team: &TeamId, seats: usize) -> bool {
        let Some(lane) = lane else {
            return seats <= self.per_lane;
        };
        if lane.len() + seats > self.per_lane {
            return false;
        }
        lane.is_empty() || lane.team() == Some(team)
    }
}

/// Order in which lanes are tried during automatic placement.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LanePolicy {
    /// Lowest free lane first.
    Sequential,
    /// Odd lanes first, then even lanes (home team of a dual meet).
    OddFirst,
    /// Even lanes first, then odd lanes (away team of a dual meet).
    EvenFirst,
}

impl LanePolicy {
    /// Returns the lane passes for a pool of `lanes` lanes.
    ///
    /// Each pass is scanned across every heat before the next pass starts,
    /// so preferred-parity lanes in later heats win over the opposite parity
    /// in earlier ones. Together the passes cover every lane exactly once.
    #[must_use]
    pub fn passes(self, lanes: u32) -> Vec<Vec<u32>> {
        let odd: Vec<u32> = (1..=lanes).step_by(2).collect();
        let even: Vec<u32> = (2..=lanes).step_by(2).collect();
        match self {
            Self::Sequential => vec![(1..=lanes).collect()],
            Self::OddFirst => vec![odd, even],
            Self::EvenFirst => vec![even, odd],
        }
    }

    /// Returns every lane of one heat in scan order.
    #[must_use]
    pub fn lane_order(self, lanes: u32) -> Vec<u32> {
        self.passes(lanes).into_iter().flatten().collect()
    }

    /// Returns the lane used to open a fresh heat.
    #[must_use]
    pub const fn opening_lane(self, lanes: u32) -> u32 {
        match self {
            Self::EvenFirst if lanes >= 2 => 2,
            _ => 1,
        }
    }
}
