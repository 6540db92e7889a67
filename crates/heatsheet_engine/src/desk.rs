//! Store-backed workflow for one meet.
//!
//! [`MeetDesk`] loads event state from its store, computes the change with
//! [`EntryDesk`] or [`Reconciler`], and saves the result in one atomic write.
//! A stale save surfaces as `ConcurrentModification`; the caller reloads and
//! retries if it wants to.

use heatsheet_foundation::{
    Competitor, CompetitorId, Error, ErrorKind, EventId, Meet, Result, Slot, TeamId,
};
use heatsheet_storage::{ChangeSet, EventState, EventStore, RosterSource, Schedule};
use tracing::{info, warn};

use crate::allocator::Placement;
use crate::config::EngineConfig;
use crate::entries::{EntryDesk, EntryListing};
use crate::reconcile::{Reconciler, Rejection};

/// What an applied import changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Events written.
    pub events: usize,
    /// Entries added across those events.
    pub entries: usize,
}

/// Entry management for one meet on top of a roster source and event store.
#[derive(Debug)]
pub struct MeetDesk<S> {
    store: S,
    meet: Meet,
    config: EngineConfig,
}

impl<S: RosterSource + EventStore> MeetDesk<S> {
    /// Creates a desk for `meet` backed by `store`.
    #[must_use]
    pub fn new(store: S, meet: Meet, config: EngineConfig) -> Self {
        Self {
            store,
            meet,
            config,
        }
    }

    /// Returns the meet.
    #[must_use]
    pub fn meet(&self) -> &Meet {
        &self.meet
    }

    /// Returns the engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the backing store for direct modification.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consumes the desk, returning the store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Loads the meet's schedule.
    ///
    /// # Errors
    ///
    /// Returns the store's error.
    pub fn schedule(&self) -> Result<Schedule> {
        self.store.events_for_meet(&self.meet.id)
    }

    /// Enters one competitor of `team` into an event and saves it.
    ///
    /// # Errors
    ///
    /// Returns lookup errors, placement errors, or the store's error.
    pub fn enter(
        &mut self,
        event: &EventId,
        team: &TeamId,
        competitor: &CompetitorId,
        placement: Placement,
    ) -> Result<Slot> {
        let state = self.load(event)?;
        let competitor = self.competitor(team, competitor)?;
        let (updated, slot) = self.desk().add(&state, &competitor, team, placement)?;
        self.save(updated)?;
        Ok(slot)
    }

    /// Enters a relay group of `team` into one lane and saves it.
    ///
    /// # Errors
    ///
    /// Returns lookup errors, placement errors, or the store's error.
    pub fn enter_relay(
        &mut self,
        event: &EventId,
        team: &TeamId,
        members: &[CompetitorId],
        placement: Placement,
    ) -> Result<Slot> {
        let state = self.load(event)?;
        let competitors = members
            .iter()
            .map(|id| self.competitor(team, id))
            .collect::<Result<Vec<_>>>()?;
        let (updated, slot) = self
            .desk()
            .add_group(&state, &competitors, team, placement)?;
        self.save(updated)?;
        Ok(slot)
    }

    /// Replaces the entry of `current` with `replacement` and saves it.
    ///
    /// # Errors
    ///
    /// Returns lookup errors, the errors of [`EntryDesk::edit`], or the
    /// store's error.
    pub fn edit(
        &mut self,
        event: &EventId,
        current: &CompetitorId,
        team: &TeamId,
        replacement: &CompetitorId,
        placement: Placement,
    ) -> Result<Slot> {
        let state = self.load(event)?;
        let competitor = self.competitor(team, replacement)?;
        let (updated, slot) = self
            .desk()
            .edit(&state, current, &competitor, team, placement)?;
        self.save(updated)?;
        Ok(slot)
    }

    /// Removes a competitor from an event and saves it.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound`, `EventNotFound`, or the store's error.
    pub fn withdraw(&mut self, event: &EventId, competitor: &CompetitorId) -> Result<()> {
        let state = self.load(event)?;
        let updated = self.desk().remove(&state, competitor)?;
        self.save(updated)
    }

    /// Reconciles split import records and saves every updated event at once.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] with every row error, or with the store's
    /// error if the final save fails. Nothing is written in either case.
    pub fn import<I, Rec, T>(&mut self, records: I) -> std::result::Result<ImportSummary, Rejection>
    where
        I: IntoIterator<Item = Rec>,
        Rec: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let schedule = self.schedule()?;
        let changes = Reconciler::new(&self.meet, &self.config, &self.store)
            .reconcile_records(&schedule, records)?;

        let summary = ImportSummary {
            events: changes.len(),
            entries: added_entries(&schedule, &changes),
        };
        self.store.save_events(changes).map_err(|err| {
            warn!(meet = %self.meet.id, error = %err, "import save failed");
            Rejection::from(err)
        })?;

        info!(
            meet = %self.meet.id,
            events = summary.events,
            entries = summary.entries,
            "import committed"
        );
        Ok(summary)
    }

    /// Lists the meet's entries, optionally for one team.
    ///
    /// # Errors
    ///
    /// Returns the store's error.
    pub fn entries(&self, team: Option<&TeamId>) -> Result<Vec<EntryListing>> {
        let schedule = self.schedule()?;
        Ok(self.desk().entries_for_meet(&schedule, team))
    }

    /// Returns the scheduled events a roster member is eligible for.
    ///
    /// # Errors
    ///
    /// Returns lookup errors or the store's error.
    pub fn eligible_events(
        &self,
        team: &TeamId,
        competitor: &CompetitorId,
    ) -> Result<Vec<EventState>> {
        let competitor = self.competitor(team, competitor)?;
        let schedule = self.schedule()?;
        Ok(self
            .desk()
            .eligible_events(&competitor, &schedule)
            .into_iter()
            .cloned()
            .collect())
    }

    fn desk(&self) -> EntryDesk<'_> {
        EntryDesk::new(&self.meet, &self.config)
    }

    fn load(&self, event: &EventId) -> Result<EventState> {
        let state = self.store.load_event(event)?;
        if state.meet_id != self.meet.id {
            return Err(Error::event_not_found(event.clone()));
        }
        Ok(state)
    }

    fn competitor(&self, team: &TeamId, id: &CompetitorId) -> Result<Competitor> {
        let roster = self
            .store
            .roster(team)?
            .ok_or_else(|| Error::new(ErrorKind::TeamNotFound(team.clone())))?;
        roster.get(id).cloned().ok_or_else(|| {
            Error::new(ErrorKind::CompetitorNotFound {
                team: team.clone(),
                name: id.to_string(),
            })
        })
    }

    fn save(&mut self, event: EventState) -> Result<()> {
        let id = event.id.clone();
        self.store
            .save_events(std::iter::once(event).collect::<ChangeSet>())
            .inspect_err(|err| warn!(event = %id, error = %err, "save failed"))
    }
}

fn added_entries(before: &Schedule, after: &ChangeSet) -> usize {
    after
        .events()
        .map(|event| {
            let old = before.get(&event.id).map_or(0, |e| e.heats.entry_count());
            event.heats.entry_count().saturating_sub(old)
        })
        .sum()
}
