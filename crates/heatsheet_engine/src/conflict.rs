//! Duplicate and occupied-slot detection.
//!
//! The detector only reads tables. Every placement runs it before touching
//! anything, so a rejected placement leaves the table as it was.

use heatsheet_foundation::{CompetitorId, Entry, Error, Result, Slot};
use heatsheet_storage::{HeatTable, LaneLimits};

/// Checks a proposed placement against an event's heat table.
#[derive(Clone, Debug, Default)]
pub struct ConflictDetector {
    excluded: Option<CompetitorId>,
}

impl ConflictDetector {
    /// Creates a detector that considers every existing entry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignores the existing entry of `id` when looking for duplicates.
    ///
    /// Used by edits, where the competitor's own pre-edit entry is about to
    /// be replaced.
    #[must_use]
    pub fn excluding(mut self, id: CompetitorId) -> Self {
        self.excluded = Some(id);
        self
    }

    /// Fails if any competitor of `group` is already entered, or appears in
    /// the group twice.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateEntry` naming the first offending competitor.
    pub fn check_duplicates(&self, table: &HeatTable, group: &[Entry]) -> Result<()> {
        for (index, entry) in group.iter().enumerate() {
            if self.excluded.as_ref() != Some(&entry.id) {
                if let Some(at) = table.locate(&entry.id) {
                    return Err(Error::duplicate_entry(entry.id.clone(), at));
                }
            }
            if group[..index].iter().any(|earlier| earlier.id == entry.id) {
                return Err(Error::validation(format!(
                    "competitor {} appears twice in one group",
                    entry.id
                )));
            }
        }
        Ok(())
    }

    /// Fails if `seats` more competitors cannot sit at `slot`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for heat or lane 0, `CapacityExceeded` for a
    /// lane outside the pool, and `SlotOccupied` for a full lane.
    pub fn check_slot(
        &self,
        table: &HeatTable,
        slot: Slot,
        limits: LaneLimits,
        seats: usize,
    ) -> Result<()> {
        if slot.heat == 0 || slot.lane == 0 {
            return Err(Error::validation(format!(
                "heat and lane numbers start at 1, got {slot}"
            )));
        }
        if !limits.has_lane(slot.lane) {
            return Err(Error::capacity_exceeded(slot.lane, limits.lanes_available));
        }
        let taken = table.find_lane(slot).map_or(0, |lane| lane.len());
        if taken + seats > limits.per_lane {
            return Err(Error::slot_occupied(slot));
        }
        Ok(())
    }

    /// Runs every check for placing `group`, at `slot` when given.
    ///
    /// # Errors
    ///
    /// Returns the first duplicate or slot error found.
    pub fn check(
        &self,
        table: &HeatTable,
        group: &[Entry],
        slot: Option<Slot>,
        limits: LaneLimits,
    ) -> Result<()> {
        self.check_duplicates(table, group)?;
        match slot {
            Some(slot) => self.check_slot(table, slot, limits, group.len()),
            None => Ok(()),
        }
    }

    /// Lists every lane, capacity, and duplicate violation of a loaded table.
    #[must_use]
    pub fn audit(&self, table: &HeatTable, limits: LaneLimits) -> Vec<Error> {
        table.violations(limits)
    }
}
