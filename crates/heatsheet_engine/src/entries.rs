//! Single-entry operations: add, edit, remove, and listings.
//!
//! Every operation takes an event state and returns a new one. A failed
//! operation returns an error and the caller keeps the state it passed in.

use std::cmp::Ordering;

use heatsheet_foundation::{
    Competitor, CompetitorId, Entry, Error, ErrorContext, ErrorKind, EventId, Meet, Result,
    SeedTime, Slot, TeamId,
};
use heatsheet_storage::{EventState, Schedule};
use tracing::debug;

use crate::allocator::{LaneAllocator, Placement};
use crate::config::EngineConfig;
use crate::conflict::ConflictDetector;
use crate::eligibility;

/// One entry as shown in a meet's entry list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryListing {
    /// Competitor identity
    pub competitor: CompetitorId,
    /// "First Last"
    pub name: String,
    /// Team the competitor swims for
    pub team: TeamId,
    /// Event identity
    pub event: EventId,
    /// Event display name
    pub event_name: String,
    /// Event number within the meet
    pub event_number: u32,
    /// Heat and lane
    pub slot: Slot,
    /// Seed time
    pub seed_time: SeedTime,
}

/// Adds, edits, and removes individual entries of one meet.
#[derive(Clone, Copy, Debug)]
pub struct EntryDesk<'a> {
    meet: &'a Meet,
    config: &'a EngineConfig,
}

impl<'a> EntryDesk<'a> {
    /// Creates a desk for `meet`.
    #[must_use]
    pub fn new(meet: &'a Meet, config: &'a EngineConfig) -> Self {
        Self { meet, config }
    }

    /// Copies a roster member into a new entry for `team`.
    #[must_use]
    pub fn entry_for(&self, competitor: &Competitor, team: &TeamId) -> Entry {
        Entry::from_competitor(competitor, team).with_seed_time(self.config.seed_time)
    }

    /// Enters one competitor.
    ///
    /// # Errors
    ///
    /// Returns the placement errors of [`LaneAllocator::place`].
    pub fn add(
        &self,
        event: &EventState,
        competitor: &Competitor,
        team: &TeamId,
        placement: Placement,
    ) -> Result<(EventState, Slot)> {
        self.add_group(event, std::slice::from_ref(competitor), team, placement)
    }

    /// Enters a relay group into one lane.
    ///
    /// # Errors
    ///
    /// Returns the placement errors of [`LaneAllocator::place`].
    pub fn add_group(
        &self,
        event: &EventState,
        competitors: &[Competitor],
        team: &TeamId,
        placement: Placement,
    ) -> Result<(EventState, Slot)> {
        self.meet.validate()?;
        let group: Vec<Entry> = competitors
            .iter()
            .map(|competitor| self.entry_for(competitor, team))
            .collect();
        let (heats, slot) = LaneAllocator::for_event(self.meet, event, self.config)
            .place(&event.heats, &group, placement)
            .map_err(|err| err.with_context(context(event)))?;

        debug!(event = %event.id, %slot, entries = group.len(), "entry added");
        Ok((event.clone().with_heats(heats), slot))
    }

    /// Replaces the entry of `current` with `competitor`, placed anew.
    ///
    /// The old entry is ignored by the duplicate check, so a competitor can be
    /// moved to another lane of the same event.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` if `current` is not entered, `DuplicateEntry`
    /// if `competitor` is entered elsewhere in the event, or the placement
    /// errors of [`LaneAllocator::place`].
    pub fn edit(
        &self,
        event: &EventState,
        current: &CompetitorId,
        competitor: &Competitor,
        team: &TeamId,
        placement: Placement,
    ) -> Result<(EventState, Slot)> {
        self.meet.validate()?;
        if !event.heats.contains(current) {
            return Err(
                Error::new(ErrorKind::EntryNotFound(current.clone())).with_context(context(event))
            );
        }

        let entry = self.entry_for(competitor, team);
        ConflictDetector::new()
            .excluding(current.clone())
            .check_duplicates(&event.heats, std::slice::from_ref(&entry))
            .map_err(|err| err.with_context(context(event)))?;

        let mut remaining = event.heats.clone();
        remaining.remove_competitor(current);
        let (heats, slot) = LaneAllocator::for_event(self.meet, event, self.config)
            .place(&remaining, std::slice::from_ref(&entry), placement)
            .map_err(|err| err.with_context(context(event)))?;

        debug!(event = %event.id, from = %current, to = %entry.id, %slot, "entry edited");
        Ok((event.clone().with_heats(heats), slot))
    }

    /// Removes a competitor from an event, pruning emptied lanes and heats.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` if the competitor is not entered.
    pub fn remove(&self, event: &EventState, competitor: &CompetitorId) -> Result<EventState> {
        let mut heats = event.heats.clone();
        let slot = heats.remove_competitor(competitor).ok_or_else(|| {
            Error::new(ErrorKind::EntryNotFound(competitor.clone())).with_context(context(event))
        })?;

        debug!(event = %event.id, %competitor, %slot, "entry removed");
        Ok(event.clone().with_heats(heats))
    }

    /// Lists every entry of the schedule, optionally for one team.
    ///
    /// Sorted by event number, then by competitor name ignoring case.
    #[must_use]
    pub fn entries_for_meet(&self, schedule: &Schedule, team: Option<&TeamId>) -> Vec<EntryListing> {
        let mut listings: Vec<EntryListing> = schedule
            .events()
            .flat_map(|event| {
                event.heats.entries().map(move |(slot, entry)| EntryListing {
                    competitor: entry.id.clone(),
                    name: entry.full_name(),
                    team: entry.team.clone(),
                    event: event.id.clone(),
                    event_name: event.name.clone(),
                    event_number: event.event_number,
                    slot,
                    seed_time: entry.seed_time,
                })
            })
            .filter(|listing| team.is_none_or(|team| &listing.team == team))
            .collect();
        listings.sort_by(compare_listings);
        listings
    }

    /// Returns the scheduled events whose age and gender band admits the
    /// competitor.
    #[must_use]
    pub fn eligible_events<'s>(
        &self,
        competitor: &Competitor,
        schedule: &'s Schedule,
    ) -> Vec<&'s EventState> {
        eligibility::eligible_events(competitor, schedule.events())
    }
}

fn context(event: &EventState) -> ErrorContext {
    ErrorContext::new()
        .with_event(event.id.clone())
        .with_event_number(event.event_number)
}

fn compare_listings(a: &EntryListing, b: &EntryListing) -> Ordering {
    a.event_number
        .cmp(&b.event_number)
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
}
