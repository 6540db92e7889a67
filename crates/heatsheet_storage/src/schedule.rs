//! A meet's ordered list of events.
//!
//! Event numbers are always dense: the events of a schedule carry
//! `1..=len` in order. Every operation that adds, removes, or moves an event
//! renumbers the whole list.

use heatsheet_foundation::{Error, EventId, MeetId, Result};

use crate::event::EventState;

/// The standard event library, in the order it is scheduled.
pub const STANDARD_EVENT_LIBRARY: &[&str] = &[
    "Girls 6 & Under 25m Freestyle",
    "Boys 6 & Under 25m Freestyle",
    "Girls 7-8 25m Freestyle",
    "Boys 7-8 25m Freestyle",
    "Girls 9-10 50m Freestyle",
    "Boys 9-10 50m Freestyle",
    "Girls 11-12 50m Freestyle",
    "Boys 11-12 50m Freestyle",
    "Girls 13-14 50m Freestyle",
    "Boys 13-14 50m Freestyle",
    "Girls 15-17 50m Freestyle",
    "Boys 15-17 50m Freestyle",
    "Girls 9-10 100m Freestyle",
    "Boys 9-10 100m Freestyle",
    "Girls 11-12 100m Freestyle",
    "Boys 11-12 100m Freestyle",
    "Girls 13-14 100m Freestyle",
    "Boys 13-14 100m Freestyle",
    "Girls 15-17 100m Freestyle",
    "Boys 15-17 100m Freestyle",
    "Girls 11-12 200m Freestyle",
    "Boys 11-12 200m Freestyle",
    "Girls 13-14 200m Freestyle",
    "Boys 13-14 200m Freestyle",
    "Girls 15-17 200m Freestyle",
    "Boys 15-17 200m Freestyle",
    "Girls 6 & Under 25m Backstroke",
    "Boys 6 & Under 25m Backstroke",
    "Girls 7-8 25m Backstroke",
    "Boys 7-8 25m Backstroke",
    "Girls 9-10 50m Backstroke",
    "Boys 9-10 50m Backstroke",
    "Girls 11-12 50m Backstroke",
    "Boys 11-12 50m Backstroke",
    "Girls 13-14 100m Backstroke",
    "Boys 13-14 100m Backstroke",
    "Girls 15-17 100m Backstroke",
    "Boys 15-17 100m Backstroke",
    "Girls 7-8 25m Breaststroke",
    "Boys 7-8 25m Breaststroke",
    "Girls 9-10 50m Breaststroke",
    "Boys 9-10 50m Breaststroke",
    "Girls 11-12 50m Breaststroke",
    "Boys 11-12 50m Breaststroke",
    "Girls 13-14 100m Breaststroke",
    "Boys 13-14 100m Breaststroke",
    "Girls 15-17 100m Breaststroke",
    "Boys 15-17 100m Breaststroke",
    "Girls 7-8 25m Butterfly",
    "Boys 7-8 25m Butterfly",
    "Girls 9-10 50m Butterfly",
    "Boys 9-10 50m Butterfly",
    "Girls 11-12 50m Butterfly",
    "Boys 11-12 50m Butterfly",
    "Girls 13-14 100m Butterfly",
    "Boys 13-14 100m Butterfly",
    "Girls 15-17 100m Butterfly",
    "Boys 15-17 100m Butterfly",
    "Girls 9-10 100m IM",
    "Boys 9-10 100m IM",
    "Girls 11-12 100m IM",
    "Boys 11-12 100m IM",
    "Girls 13-14 200m IM",
    "Boys 13-14 200m IM",
    "Girls 15-17 200m IM",
    "Boys 15-17 200m IM",
];

/// The events of one meet in schedule order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schedule {
    meet_id: MeetId,
    events: Vec<EventState>,
}

impl Schedule {
    /// Creates an empty schedule.
    #[must_use]
    pub fn new(meet_id: impl Into<MeetId>) -> Self {
        Self {
            meet_id: meet_id.into(),
            events: Vec::new(),
        }
    }

    /// Builds a schedule from stored events, ordering them by event number.
    ///
    /// Stored numbers are kept as they are; call
    /// [`renumber`](Self::renumber) to close gaps.
    #[must_use]
    pub fn from_events(meet_id: impl Into<MeetId>, mut events: Vec<EventState>) -> Self {
        events.sort_by_key(|event| event.event_number);
        Self {
            meet_id: meet_id.into(),
            events,
        }
    }

    /// Returns the meet this schedule belongs to.
    #[must_use]
    pub fn meet_id(&self) -> &MeetId {
        &self.meet_id
    }

    /// Returns the number of scheduled events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if nothing is scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns the events in schedule order.
    pub fn events(&self) -> impl Iterator<Item = &EventState> {
        self.events.iter()
    }

    /// Returns the event with the given identity.
    #[must_use]
    pub fn get(&self, id: &EventId) -> Option<&EventState> {
        self.events.iter().find(|event| &event.id == id)
    }

    /// Returns the event carrying `number`.
    #[must_use]
    pub fn by_number(&self, number: u32) -> Option<&EventState> {
        self.events.iter().find(|event| event.event_number == number)
    }

    /// Returns true if an event with this display name is scheduled.
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.events.iter().any(|event| event.name == name)
    }

    /// Appends an event with empty heats at the end of the schedule.
    pub fn append(&mut self, id: impl Into<EventId>, name: impl Into<String>) -> &EventState {
        let number = self.next_number();
        let index = self.events.len();
        self.events
            .push(EventState::new(id, self.meet_id.clone(), number, name));
        &self.events[index]
    }

    /// Appends every library event not already scheduled, in library order.
    ///
    /// `next_id` is called once per added event. Returns how many events were
    /// added.
    pub fn add_standard_library(&mut self, mut next_id: impl FnMut(&str) -> EventId) -> usize {
        let mut added = 0;
        for name in STANDARD_EVENT_LIBRARY {
            if !self.contains_name(name) {
                self.append(next_id(name), *name);
                added += 1;
            }
        }
        added
    }

    /// Removes the given events and renumbers the rest.
    ///
    /// Returns the removed events in their former schedule order. Unknown ids
    /// are ignored.
    pub fn remove(&mut self, ids: &[EventId]) -> Vec<EventState> {
        let (removed, kept) = std::mem::take(&mut self.events)
            .into_iter()
            .partition(|event| ids.contains(&event.id));
        self.events = kept;
        self.renumber();
        removed
    }

    /// Moves an event to `new_number`, shifting the events in between.
    ///
    /// # Errors
    ///
    /// Returns `EventNotFound` for an unknown id, or a validation error if
    /// `new_number` is outside `1..=len`.
    pub fn move_event(&mut self, id: &EventId, new_number: u32) -> Result<()> {
        let len = self.events.len();
        let target = usize::try_from(new_number).unwrap_or(usize::MAX);
        if target == 0 || target > len {
            return Err(Error::validation(format!(
                "event number must be between 1 and {len}, got {new_number}"
            )));
        }
        let from = self
            .events
            .iter()
            .position(|event| &event.id == id)
            .ok_or_else(|| Error::event_not_found(id.clone()))?;
        let event = self.events.remove(from);
        self.events.insert(target - 1, event);
        self.renumber();
        Ok(())
    }

    /// Rewrites event numbers to `1..=len` in current order.
    ///
    /// Returns the ids of events whose number changed.
    pub fn renumber(&mut self) -> Vec<EventId> {
        let mut changed = Vec::new();
        for (number, event) in (1u32..).zip(self.events.iter_mut()) {
            if event.event_number != number {
                event.event_number = number;
                changed.push(event.id.clone());
            }
        }
        changed
    }

    /// Copies this schedule to another meet.
    ///
    /// Names and order are kept; heats are empty and versions start over.
    /// `next_id` supplies the identity of each copied event.
    #[must_use]
    pub fn copy_to(
        &self,
        meet_id: impl Into<MeetId>,
        mut next_id: impl FnMut(&EventState) -> EventId,
    ) -> Self {
        let meet_id = meet_id.into();
        let events = self
            .events
            .iter()
            .map(|event| {
                EventState::new(
                    next_id(event),
                    meet_id.clone(),
                    event.event_number,
                    event.name.clone(),
                )
            })
            .collect();
        Self { meet_id, events }
    }

    /// Consumes the schedule, returning its events.
    #[must_use]
    pub fn into_events(self) -> Vec<EventState> {
        self.events
    }

    fn next_number(&self) -> u32 {
        self.events
            .last()
            .map_or(1, |event| event.event_number.saturating_add(1))
    }
}
