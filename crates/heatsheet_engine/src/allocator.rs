//! Lane allocation.
//!
//! The allocator places one competitor group (a single entry for individual
//! events, up to a lane's worth of one team's swimmers for relays) into an
//! event's heat table. Placement never mutates its input. On success it
//! returns the new table and the slot used; on failure the caller still holds
//! the untouched original.

use heatsheet_foundation::{Entry, Error, Meet, Result, Slot, TeamId};
use heatsheet_storage::{EventState, HeatTable, LaneLimits, LanePolicy};
use tracing::debug;

use crate::config::EngineConfig;
use crate::conflict::ConflictDetector;

/// Where a group should go.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Exactly this heat and lane.
    Manual(Slot),
    /// The next valid lane under the meet's lane policy.
    Automatic,
}

impl Placement {
    /// Manual when both heat and lane are given, automatic otherwise.
    #[must_use]
    pub fn from_parts(heat: Option<u32>, lane: Option<u32>) -> Self {
        match (heat, lane) {
            (Some(heat), Some(lane)) => Self::Manual(Slot::new(heat, lane)),
            _ => Self::Automatic,
        }
    }
}

/// The heat currently being filled by a run of automatic placements.
///
/// A new cursor opens a fresh heat after the highest heat of the table on
/// first use. When that heat fills up the next one is opened.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HeatCursor {
    heat: Option<u32>,
}

impl HeatCursor {
    /// Creates a cursor with no heat opened yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the heat being filled, if one has been opened.
    #[must_use]
    pub fn heat(&self) -> Option<u32> {
        self.heat
    }
}

/// Places competitor groups into one event.
#[derive(Clone, Debug)]
pub struct LaneAllocator {
    limits: LaneLimits,
    home_team: Option<TeamId>,
    dual_meet: bool,
}

impl LaneAllocator {
    /// Creates an allocator for an event with the given limits.
    #[must_use]
    pub fn new(meet: &Meet, limits: LaneLimits, config: &EngineConfig) -> Self {
        Self {
            limits,
            home_team: meet.home_team.clone(),
            dual_meet: config.dual_meet_parity && meet.has_home_away(),
        }
    }

    /// Creates an allocator for `event`, deriving its limits from the name.
    #[must_use]
    pub fn for_event(meet: &Meet, event: &EventState, config: &EngineConfig) -> Self {
        Self::new(meet, config.limits(meet, &event.name), config)
    }

    /// Returns the lane limits in force.
    #[must_use]
    pub fn limits(&self) -> LaneLimits {
        self.limits
    }

    /// Returns the lane policy for competitors of `team`.
    ///
    /// In a dual meet the home team prefers odd lanes and every other team
    /// prefers even lanes. Otherwise lanes fill in order.
    #[must_use]
    pub fn policy(&self, team: &TeamId) -> LanePolicy {
        if !self.dual_meet {
            LanePolicy::Sequential
        } else if self.home_team.as_ref() == Some(team) {
            LanePolicy::OddFirst
        } else {
            LanePolicy::EvenFirst
        }
    }

    /// Places `group` into `table`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed group or when no heat
    /// number is left to open, `DuplicateEntry` if a member is already
    /// entered, and for manual placements the slot errors of
    /// [`ConflictDetector::check_slot`].
    pub fn place(
        &self,
        table: &HeatTable,
        group: &[Entry],
        placement: Placement,
    ) -> Result<(HeatTable, Slot)> {
        let team = self.check_group(group)?;
        let detector = ConflictDetector::new();

        let slot = match placement {
            Placement::Manual(slot) => {
                detector.check(table, group, Some(slot), self.limits)?;
                slot
            }
            Placement::Automatic => {
                detector.check_duplicates(table, group)?;
                let policy = self.policy(team);
                match table.first_free_lane(policy, self.limits, team, group.len()) {
                    Some(slot) => slot,
                    None => Slot::new(
                        next_heat(table)?,
                        policy.opening_lane(self.limits.lanes_available),
                    ),
                }
            }
        };

        Ok((self.commit(table, group, slot), slot))
    }

    /// Places `group` into the cursor's running heat, opening a new heat when
    /// it is full.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed group or when no heat
    /// number is left to open, or `DuplicateEntry`.
    pub fn place_running(
        &self,
        table: &HeatTable,
        group: &[Entry],
        cursor: &mut HeatCursor,
    ) -> Result<(HeatTable, Slot)> {
        let team = self.check_group(group)?;
        ConflictDetector::new().check_duplicates(table, group)?;

        let policy = self.policy(team);
        let heat = match cursor.heat {
            Some(heat) => heat,
            None => {
                let heat = next_heat(table)?;
                cursor.heat = Some(heat);
                heat
            }
        };
        let slot = match table.first_free_lane_in(heat, policy, self.limits, team, group.len()) {
            Some(slot) => slot,
            None => {
                let next = next_heat(table)?;
                cursor.heat = Some(next);
                debug!(heat = next, "running heat full, opening next");
                Slot::new(next, policy.opening_lane(self.limits.lanes_available))
            }
        };

        Ok((self.commit(table, group, slot), slot))
    }

    fn commit(&self, table: &HeatTable, group: &[Entry], slot: Slot) -> HeatTable {
        let mut next = table.clone();
        for entry in group {
            next.insert(slot, entry.clone());
        }
        next.normalize();
        debug!(%slot, seats = group.len(), per_lane = self.limits.per_lane, "group placed");
        next
    }

    fn check_group<'g>(&self, group: &'g [Entry]) -> Result<&'g TeamId> {
        if self.limits.lanes_available == 0 {
            return Err(Error::validation("meet has no lanes"));
        }
        let Some(first) = group.first() else {
            return Err(Error::validation("nothing to place"));
        };
        if !self.limits.is_relay() && group.len() != 1 {
            return Err(Error::validation(format!(
                "individual events take one competitor per lane, got {}",
                group.len()
            )));
        }
        if group.len() > self.limits.per_lane {
            return Err(Error::validation(format!(
                "a relay lane holds {} swimmers, got {}",
                self.limits.per_lane,
                group.len()
            )));
        }
        if group.iter().any(|entry| entry.team != first.team) {
            return Err(Error::validation("a relay group must come from one team"));
        }
        Ok(&first.team)
    }
}

fn next_heat(table: &HeatTable) -> Result<u32> {
    table
        .append_new_heat()
        .ok_or_else(|| Error::validation(format!("no heat number left after heat {}", u32::MAX)))
}
