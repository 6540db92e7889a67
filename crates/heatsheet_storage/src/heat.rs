//! Heats and lanes.
//!
//! Both are persistent values: cloning is O(1) and shares structure with the
//! original. Mutation goes through [`HeatTable`](crate::HeatTable), which keeps
//! the ordering and no-empties invariants.

use heatsheet_foundation::{CompetitorId, Entry, TeamId};

/// One lane of a heat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lane {
    number: u32,
    entries: im::Vector<Entry>,
}

impl Lane {
    pub(crate) fn new(number: u32) -> Self {
        Self {
            number,
            entries: im::Vector::new(),
        }
    }

    /// Returns the lane number.
    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Returns the number of competitors in the lane.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the lane holds nobody.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over the competitors in entry order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Returns true if the competitor sits in this lane.
    #[must_use]
    pub fn contains(&self, id: &CompetitorId) -> bool {
        self.entries.iter().any(|e| &e.id == id)
    }

    /// Returns the team of the first competitor, if any.
    #[must_use]
    pub fn team(&self) -> Option<&TeamId> {
        self.entries.front().map(|e| &e.team)
    }

    pub(crate) fn push(&mut self, entry: Entry) {
        self.entries.push_back(entry);
    }

    pub(crate) fn remove(&mut self, id: &CompetitorId) -> bool {
        match self.entries.iter().position(|e| &e.id == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }
}

/// One heat of an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Heat {
    number: u32,
    lanes: im::OrdMap<u32, Lane>,
}

impl Heat {
    pub(crate) fn new(number: u32) -> Self {
        Self {
            number,
            lanes: im::OrdMap::new(),
        }
    }

    /// Returns the heat number.
    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Returns the lane with the given number.
    #[must_use]
    pub fn lane(&self, number: u32) -> Option<&Lane> {
        self.lanes.get(&number)
    }

    /// Returns the lanes in ascending lane order.
    pub fn lanes(&self) -> impl Iterator<Item = &Lane> {
        self.lanes.values()
    }

    /// Returns the number of lanes in use.
    #[must_use]
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    /// Returns the number of competitors across all lanes.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.lanes.values().map(Lane::len).sum()
    }

    /// Returns true if no lane is in use.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    pub(crate) fn lane_mut(&mut self, number: u32) -> &mut Lane {
        self.lanes.entry(number).or_insert_with(|| Lane::new(number))
    }

    pub(crate) fn lane_entry(&mut self, number: u32) -> Option<&mut Lane> {
        self.lanes.get_mut(&number)
    }

    pub(crate) fn retain_occupied(&mut self) {
        let empty: Vec<u32> = self
            .lanes
            .iter()
            .filter(|(_, lane)| lane.is_empty())
            .map(|(number, _)| *number)
            .collect();
        for number in empty {
            self.lanes.remove(&number);
        }
    }

    pub(crate) fn insert_lane(&mut self, lane: Lane) {
        self.lanes.insert(lane.number, lane);
    }
}
