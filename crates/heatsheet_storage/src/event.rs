//! Scheduled events and their stored state.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use heatsheet_foundation::{EventId, MeetId};

use crate::policy::LaneLimits;
use crate::table::HeatTable;

/// Marker word that makes an event a relay.
pub const RELAY_MARKER: &str = "relay";

/// Whether a lane holds one competitor or a team group.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// One competitor per lane.
    Individual,
    /// A group of one team per lane.
    Relay,
}

impl EventKind {
    /// Classifies an event by its display name.
    ///
    /// The event is a relay when `marker` occurs anywhere in the name,
    /// ignoring case.
    #[must_use]
    pub fn classify(name: &str, marker: &str) -> Self {
        if !marker.is_empty() && name.to_lowercase().contains(&marker.to_lowercase()) {
            Self::Relay
        } else {
            Self::Individual
        }
    }

    /// Returns the lane limits for this kind of event.
    #[must_use]
    pub const fn limits(self, lanes_available: u32, relay_lane_size: usize) -> LaneLimits {
        match self {
            Self::Individual => LaneLimits::individual(lanes_available),
            Self::Relay => LaneLimits::relay(lanes_available, relay_lane_size),
        }
    }
}

/// The stored state of one event: identity, schedule position, and heats.
///
/// `version` is bumped by the store on every successful save. A change
/// computed against an older version is rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EventState {
    /// Event identity.
    pub id: EventId,
    /// The meet this event belongs to.
    pub meet_id: MeetId,
    /// Position in the meet schedule, starting at 1.
    pub event_number: u32,
    /// Display name, e.g. "Girls 9-10 50m Freestyle".
    pub name: String,
    /// Heats in ascending order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub heats: HeatTable,
    /// Optimistic concurrency stamp.
    #[cfg_attr(feature = "serde", serde(default))]
    pub version: u64,
}

impl EventState {
    /// Creates an event with no heats at version 0.
    #[must_use]
    pub fn new(
        id: impl Into<EventId>,
        meet_id: impl Into<MeetId>,
        event_number: u32,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            meet_id: meet_id.into(),
            event_number,
            name: name.into(),
            heats: HeatTable::new(),
            version: 0,
        }
    }

    /// Replaces the heats.
    #[must_use]
    pub fn with_heats(mut self, heats: HeatTable) -> Self {
        self.heats = heats;
        self
    }

    /// Classifies this event using the default relay marker.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        EventKind::classify(&self.name, RELAY_MARKER)
    }

    /// Returns true if this event is a relay under the default marker.
    #[must_use]
    pub fn is_relay(&self) -> bool {
        self.kind() == EventKind::Relay
    }
}
