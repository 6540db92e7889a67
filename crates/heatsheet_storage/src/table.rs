//! The heat table of one event.
//!
//! A `HeatTable` is a value, not a live store. It is backed by persistent
//! ordered maps, so heats and lanes always iterate in ascending order and a
//! clone costs O(1). Callers that want to leave the original untouched clone
//! first and mutate the copy.

use heatsheet_foundation::{CompetitorId, Entry, Error, Slot, TeamId};

use crate::heat::{Heat, Lane};
use crate::policy::{LaneLimits, LanePolicy};

#[cfg(feature = "serde")]
mod serde_support {
    use super::HeatTable;
    use crate::heat::{Heat, Lane};
    use heatsheet_foundation::{Entry, Error};
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct LaneRecord {
        lane_number: u32,
        swimmers: Vec<Entry>,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct HeatRecord {
        heat_number: u32,
        lanes: Vec<LaneRecord>,
    }

    impl From<HeatTable> for Vec<HeatRecord> {
        fn from(table: HeatTable) -> Self {
            table
                .heats()
                .map(|heat| HeatRecord {
                    heat_number: heat.number(),
                    lanes: heat
                        .lanes()
                        .map(|lane| LaneRecord {
                            lane_number: lane.number(),
                            swimmers: lane.entries().cloned().collect(),
                        })
                        .collect(),
                })
                .collect()
        }
    }

    impl TryFrom<Vec<HeatRecord>> for HeatTable {
        type Error = Error;

        fn try_from(records: Vec<HeatRecord>) -> Result<Self, Error> {
            let mut table = HeatTable::new();
            for record in records {
                if record.heat_number == 0 {
                    return Err(Error::validation("heat numbers start at 1"));
                }
                if table.heats.contains_key(&record.heat_number) {
                    return Err(Error::validation(format!(
                        "heat {} appears twice",
                        record.heat_number
                    )));
                }
                let mut heat = Heat::new(record.heat_number);
                for lane_record in record.lanes {
                    if lane_record.lane_number == 0 {
                        return Err(Error::validation("lane numbers start at 1"));
                    }
                    if heat.lane(lane_record.lane_number).is_some() {
                        return Err(Error::validation(format!(
                            "lane {} appears twice in heat {}",
                            lane_record.lane_number, record.heat_number
                        )));
                    }
                    let mut lane = Lane::new(lane_record.lane_number);
                    for swimmer in lane_record.swimmers {
                        lane.push(swimmer);
                    }
                    heat.insert_lane(lane);
                }
                table.heats.insert(record.heat_number, heat);
            }
            table.normalize();
            Ok(table)
        }
    }
}

/// All heats of one event, keyed by heat number.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        into = "Vec<serde_support::HeatRecord>",
        try_from = "Vec<serde_support::HeatRecord>"
    )
)]
pub struct HeatTable {
    heats: im::OrdMap<u32, Heat>,
}

impl HeatTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the table has no heats.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heats.is_empty()
    }

    /// Returns the number of heats.
    #[must_use]
    pub fn heat_count(&self) -> usize {
        self.heats.len()
    }

    /// Returns the number of entries across all heats.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.heats.values().map(Heat::entry_count).sum()
    }

    /// Returns the heats in ascending heat order.
    pub fn heats(&self) -> impl Iterator<Item = &Heat> {
        self.heats.values()
    }

    /// Returns the heat with the given number.
    #[must_use]
    pub fn heat(&self, number: u32) -> Option<&Heat> {
        self.heats.get(&number)
    }

    /// Returns the lane at `slot`, if it is in use.
    #[must_use]
    pub fn find_lane(&self, slot: Slot) -> Option<&Lane> {
        self.heats.get(&slot.heat).and_then(|heat| heat.lane(slot.lane))
    }

    /// Returns the lane at `slot`, creating the heat and lane if needed.
    ///
    /// A freshly reserved lane is empty until something is inserted into it;
    /// call [`prune`](Self::prune) if the reservation is abandoned.
    pub fn reserve_lane(&mut self, slot: Slot) -> &Lane {
        self.heats
            .entry(slot.heat)
            .or_insert_with(|| Heat::new(slot.heat))
            .lane_mut(slot.lane)
    }

    /// Appends `entry` to the lane at `slot`, reserving the lane first.
    ///
    /// No capacity or duplicate checks happen here; those belong to the
    /// caller.
    pub fn insert(&mut self, slot: Slot, entry: Entry) {
        self.heats
            .entry(slot.heat)
            .or_insert_with(|| Heat::new(slot.heat))
            .lane_mut(slot.lane)
            .push(entry);
    }

    /// Returns the number the next appended heat receives: one past the
    /// highest heat number, or 1 for an empty table.
    ///
    /// `None` when the highest heat is already `u32::MAX`. The heat itself
    /// appears once a lane is reserved in it.
    #[must_use]
    pub fn append_new_heat(&self) -> Option<u32> {
        match self.heats.get_max() {
            Some((last, _)) => last.checked_add(1),
            None => Some(1),
        }
    }

    /// Returns the first lane that takes `seats` competitors of `team`.
    ///
    /// Existing heats are scanned in heat order, one policy pass at a time.
    /// For relays a partially filled lane of the same team is preferred over
    /// an empty one. `None` means every existing heat is full and the caller
    /// should open a new heat.
    #[must_use]
    pub fn first_free_lane(
        &self,
        policy: LanePolicy,
        limits: LaneLimits,
        team: &TeamId,
        seats: usize,
    ) -> Option<Slot> {
        let heats: Vec<u32> = self.heats.keys().copied().collect();
        self.scan(&heats, policy, limits, team, seats)
    }

    /// Like [`first_free_lane`](Self::first_free_lane), restricted to one
    /// heat. The heat need not exist yet.
    #[must_use]
    pub fn first_free_lane_in(
        &self,
        heat: u32,
        policy: LanePolicy,
        limits: LaneLimits,
        team: &TeamId,
        seats: usize,
    ) -> Option<Slot> {
        self.scan(&[heat], policy, limits, team, seats)
    }

    fn scan(
        &self,
        heats: &[u32],
        policy: LanePolicy,
        limits: LaneLimits,
        team: &TeamId,
        seats: usize,
    ) -> Option<Slot> {
        let passes = policy.passes(limits.lanes_available);

        if limits.is_relay() {
            let joinable = passes.iter().find_map(|pass| {
                heats.iter().find_map(|&heat| {
                    pass.iter().map(|&lane| Slot::new(heat, lane)).find(|&slot| {
                        self.find_lane(slot).is_some_and(|lane| {
                            !lane.is_empty() && limits.accepts(Some(lane), team, seats)
                        })
                    })
                })
            });
            if joinable.is_some() {
                return joinable;
            }
        }

        passes.iter().find_map(|pass| {
            heats.iter().find_map(|&heat| {
                pass.iter()
                    .map(|&lane| Slot::new(heat, lane))
                    .find(|&slot| limits.accepts(self.find_lane(slot), team, seats))
            })
        })
    }

    /// Returns where the competitor sits, if entered.
    #[must_use]
    pub fn locate(&self, id: &CompetitorId) -> Option<Slot> {
        self.heats.values().find_map(|heat| {
            heat.lanes()
                .find(|lane| lane.contains(id))
                .map(|lane| Slot::new(heat.number(), lane.number()))
        })
    }

    /// Returns true if the competitor is entered anywhere in the table.
    #[must_use]
    pub fn contains(&self, id: &CompetitorId) -> bool {
        self.locate(id).is_some()
    }

    /// Returns every entry with its slot, in heat sheet order.
    pub fn entries(&self) -> impl Iterator<Item = (Slot, &Entry)> {
        self.heats.values().flat_map(|heat| {
            heat.lanes().flat_map(move |lane| {
                let slot = Slot::new(heat.number(), lane.number());
                lane.entries().map(move |entry| (slot, entry))
            })
        })
    }

    /// Removes the competitor and prunes whatever became empty.
    ///
    /// Returns the slot the competitor was removed from.
    pub fn remove_competitor(&mut self, id: &CompetitorId) -> Option<Slot> {
        let slot = self.locate(id)?;
        if let Some(lane) = self
            .heats
            .get_mut(&slot.heat)
            .and_then(|heat| heat.lane_entry(slot.lane))
        {
            lane.remove(id);
        }
        self.prune();
        Some(slot)
    }

    /// Removes empty lanes, then empty heats.
    pub fn prune(&mut self) {
        let mut empty_heats = Vec::new();
        let numbers: Vec<u32> = self.heats.keys().copied().collect();
        for number in numbers {
            if let Some(heat) = self.heats.get_mut(&number) {
                heat.retain_occupied();
                if heat.is_empty() {
                    empty_heats.push(number);
                }
            }
        }
        for number in empty_heats {
            self.heats.remove(&number);
        }
    }

    /// Brings the table into canonical form before it leaves the engine.
    ///
    /// Ordering is structural (heats and lanes live in ordered maps), so this
    /// only has to drop empty lanes and heats.
    pub fn normalize(&mut self) {
        self.prune();
    }

    /// Lists every invariant violation in the table.
    ///
    /// Checks lane bounds, lane capacity, duplicate competitors, and empty
    /// heats or lanes.
    #[must_use]
    pub fn violations(&self, limits: LaneLimits) -> Vec<Error> {
        let mut errors = Vec::new();
        let mut seen: std::collections::HashMap<&CompetitorId, Slot> =
            std::collections::HashMap::new();

        for heat in self.heats.values() {
            if heat.number() == 0 {
                errors.push(Error::validation("heat numbers start at 1"));
            }
            if heat.is_empty() {
                errors.push(Error::validation(format!(
                    "heat {} has no lanes",
                    heat.number()
                )));
            }
            for lane in heat.lanes() {
                let slot = Slot::new(heat.number(), lane.number());
                if !limits.has_lane(lane.number()) {
                    errors.push(Error::capacity_exceeded(
                        lane.number(),
                        limits.lanes_available,
                    ));
                }
                if lane.is_empty() {
                    errors.push(Error::validation(format!("{slot} is empty")));
                }
                if lane.len() > limits.per_lane {
                    errors.push(Error::slot_occupied(slot));
                }
                for entry in lane.entries() {
                    if let Some(first) = seen.insert(&entry.id, slot) {
                        errors.push(Error::duplicate_entry(entry.id.clone(), first));
                    }
                }
            }
        }
        errors
    }

    /// Checks every table invariant.
    ///
    /// # Errors
    ///
    /// Returns the first violation found by [`violations`](Self::violations).
    pub fn validate(&self, limits: LaneLimits) -> heatsheet_foundation::Result<()> {
        match self.violations(limits).into_iter().next() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
