//! Collaborator interfaces for rosters and event storage.
//!
//! The engine never reaches for ambient state. Rosters come from a
//! [`RosterSource`] and event state from an [`EventStore`]; both are handed
//! in by the caller. [`MemoryStore`] implements both in memory.

use std::collections::BTreeMap;

use heatsheet_foundation::{Error, ErrorKind, EventId, MeetId, Result, Roster, TeamId};
use tracing::{debug, warn};

use crate::event::EventState;
use crate::schedule::Schedule;

/// Read-only roster lookup.
pub trait RosterSource {
    /// Returns the roster of `team`, or `None` for an unknown team.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the roster could not be read.
    fn roster(&self, team: &TeamId) -> Result<Option<Roster>>;
}

/// Event state storage with atomic multi-event writes.
pub trait EventStore {
    /// Loads one event.
    ///
    /// # Errors
    ///
    /// Returns `EventNotFound` for an unknown id, or a persistence error.
    fn load_event(&self, id: &EventId) -> Result<EventState>;

    /// Loads the schedule of a meet.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the events could not be read.
    fn events_for_meet(&self, meet: &MeetId) -> Result<Schedule>;

    /// Writes every event of `changes`, or none of them.
    ///
    /// Each event's `version` is the version it was loaded at. The store
    /// bumps it on success.
    ///
    /// # Errors
    ///
    /// Returns `ConcurrentModification` if any stored event moved on since it
    /// was loaded, or a persistence error. Nothing is written in either case.
    fn save_events(&mut self, changes: ChangeSet) -> Result<()>;
}

/// A set of updated event states destined for one atomic save.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeSet {
    events: BTreeMap<EventId, EventState>,
}

impl ChangeSet {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the state of one event.
    pub fn insert(&mut self, event: EventState) {
        self.events.insert(event.id.clone(), event);
    }

    /// Returns the pending state of an event.
    #[must_use]
    pub fn get(&self, id: &EventId) -> Option<&EventState> {
        self.events.get(id)
    }

    /// Returns the number of events in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns the pending events ordered by id.
    pub fn events(&self) -> impl Iterator<Item = &EventState> {
        self.events.values()
    }

    /// Consumes the set, returning the events ordered by id.
    #[must_use]
    pub fn into_events(self) -> Vec<EventState> {
        self.events.into_values().collect()
    }
}

impl FromIterator<EventState> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = EventState>>(iter: I) -> Self {
        let mut set = Self::new();
        for event in iter {
            set.insert(event);
        }
        set
    }
}

/// In-memory roster and event store.
///
/// Cloning is cheap; clones share structure and diverge on write.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    rosters: im::OrdMap<TeamId, Roster>,
    events: im::OrdMap<EventId, EventState>,
    read_only: bool,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a roster.
    #[must_use]
    pub fn with_roster(mut self, roster: Roster) -> Self {
        self.rosters.insert(roster.team.clone(), roster);
        self
    }

    /// Adds an event as stored, keeping its version.
    #[must_use]
    pub fn with_event(mut self, event: EventState) -> Self {
        self.insert_event(event);
        self
    }

    /// Adds every event of a schedule.
    #[must_use]
    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        for event in schedule.into_events() {
            self.insert_event(event);
        }
        self
    }

    /// Stores an event as is, bypassing version checks.
    pub fn insert_event(&mut self, event: EventState) {
        self.events.insert(event.id.clone(), event);
    }

    /// Makes every later save fail with a persistence error.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Returns the stored state of an event.
    #[must_use]
    pub fn event(&self, id: &EventId) -> Option<&EventState> {
        self.events.get(id)
    }

    /// Returns every stored event ordered by id.
    #[must_use]
    pub fn snapshot(&self) -> Vec<EventState> {
        self.events.values().cloned().collect()
    }
}

impl RosterSource for MemoryStore {
    fn roster(&self, team: &TeamId) -> Result<Option<Roster>> {
        Ok(self.rosters.get(team).cloned())
    }
}

impl EventStore for MemoryStore {
    fn load_event(&self, id: &EventId) -> Result<EventState> {
        self.events
            .get(id)
            .cloned()
            .ok_or_else(|| Error::event_not_found(id.clone()))
    }

    fn events_for_meet(&self, meet: &MeetId) -> Result<Schedule> {
        let events = self
            .events
            .values()
            .filter(|event| &event.meet_id == meet)
            .cloned()
            .collect();
        Ok(Schedule::from_events(meet.clone(), events))
    }

    fn save_events(&mut self, changes: ChangeSet) -> Result<()> {
        if self.read_only {
            warn!(events = changes.len(), "save rejected: store is read-only");
            return Err(Error::persistence("store is read-only"));
        }

        for change in changes.events() {
            let found = self.events.get(&change.id).map_or(0, |stored| stored.version);
            if found != change.version {
                warn!(
                    event = %change.id,
                    expected = change.version,
                    found,
                    "save rejected: stale event"
                );
                return Err(Error::new(ErrorKind::ConcurrentModification {
                    event: change.id.clone(),
                    expected: change.version,
                    found,
                }));
            }
        }

        let mut next = self.events.clone();
        for mut event in changes.into_events() {
            event.version += 1;
            debug!(event = %event.id, version = event.version, "event saved");
            next.insert(event.id.clone(), event);
        }
        self.events = next;
        Ok(())
    }
}
