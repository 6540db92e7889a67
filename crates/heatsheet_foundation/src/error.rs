//! Error types for the Heatsheet system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Every engine operation returns these as values; nothing is retried
//! internally.

use std::fmt;

use thiserror::Error;

use crate::ids::{CompetitorId, EventId, TeamId};
use crate::slot::Slot;

/// Result alias used throughout Heatsheet.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Heatsheet operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error, merging with any context already present.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(match self.context.take() {
            Some(existing) => existing.merge(context),
            None => context,
        });
        self
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation(message.into()))
    }

    /// Creates a duplicate entry error.
    #[must_use]
    pub fn duplicate_entry(competitor: CompetitorId, at: Slot) -> Self {
        Self::new(ErrorKind::DuplicateEntry { competitor, at })
    }

    /// Creates a slot occupied error.
    #[must_use]
    pub fn slot_occupied(at: Slot) -> Self {
        Self::new(ErrorKind::SlotOccupied(at))
    }

    /// Creates a capacity exceeded error.
    #[must_use]
    pub fn capacity_exceeded(lane: u32, lanes_available: u32) -> Self {
        Self::new(ErrorKind::CapacityExceeded {
            lane,
            lanes_available,
        })
    }

    /// Creates an event not found error.
    #[must_use]
    pub fn event_not_found(id: EventId) -> Self {
        Self::new(ErrorKind::EventNotFound(id))
    }

    /// Creates a persistence error.
    #[must_use]
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Persistence(message.into()))
    }

    /// Returns the import row this error refers to, if any.
    #[must_use]
    pub fn row(&self) -> Option<usize> {
        self.context.as_ref().and_then(|ctx| ctx.row)
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// A required field is missing or a value could not be parsed.
    #[error("validation error: {0}")]
    Validation(String),

    /// The named team has no roster.
    #[error("team not found: {0}")]
    TeamNotFound(TeamId),

    /// No roster member matched the given name.
    #[error("competitor \"{name}\" not found on team {team}")]
    CompetitorNotFound {
        /// The team whose roster was searched.
        team: TeamId,
        /// The name as given in the request.
        name: String,
    },

    /// No scheduled event carries the given event number.
    #[error("event #{0} not found in this meet")]
    EventNumberNotFound(u32),

    /// No event with the given identity exists in the store.
    #[error("event not found: {0}")]
    EventNotFound(EventId),

    /// The competitor has no entry in the event.
    #[error("competitor {0} is not entered in this event")]
    EntryNotFound(CompetitorId),

    /// The competitor already appears in the event.
    #[error("competitor {competitor} is already entered at {at}")]
    DuplicateEntry {
        /// The duplicated competitor.
        competitor: CompetitorId,
        /// Where the existing entry sits.
        at: Slot,
    },

    /// The requested lane cannot take another competitor.
    #[error("{0} is occupied")]
    SlotOccupied(Slot),

    /// The requested lane lies outside the pool.
    #[error("lane {lane} exceeds the {lanes_available} lanes available")]
    CapacityExceeded {
        /// The requested lane.
        lane: u32,
        /// Lanes configured for the meet.
        lanes_available: u32,
    },

    /// The storage collaborator failed to read or write.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// The stored event changed since it was loaded.
    #[error("event {event} was modified concurrently (expected version {expected}, found {found})")]
    ConcurrentModification {
        /// The event that went stale.
        event: EventId,
        /// The version the change was computed against.
        expected: u64,
        /// The version currently stored.
        found: u64,
    },

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ErrorKind {
    /// Returns true for per-row validation failures.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::TeamNotFound(_)
                | Self::CompetitorNotFound { .. }
                | Self::EventNumberNotFound(_)
        )
    }

    /// Returns true for placement conflicts.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::DuplicateEntry { .. } | Self::SlotOccupied(_))
    }
}

/// Context about where an error occurred.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// 1-based import row.
    pub row: Option<usize>,
    /// Event number within the meet.
    pub event_number: Option<u32>,
    /// Event identity.
    pub event: Option<EventId>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the import row.
    #[must_use]
    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    /// Sets the event number.
    #[must_use]
    pub fn with_event_number(mut self, number: u32) -> Self {
        self.event_number = Some(number);
        self
    }

    /// Sets the event identity.
    #[must_use]
    pub fn with_event(mut self, event: EventId) -> Self {
        self.event = Some(event);
        self
    }

    /// Fields set on `other` win.
    fn merge(self, other: Self) -> Self {
        Self {
            row: other.row.or(self.row),
            event_number: other.event_number.or(self.event_number),
            event: other.event.or(self.event),
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(row) = self.row {
            parts.push(format!("row {row}"));
        }
        if let Some(number) = self.event_number {
            parts.push(format!("event #{number}"));
        }
        if let Some(event) = &self.event {
            parts.push(format!("event {event}"));
        }
        write!(f, "{}", parts.join(", "))
    }
}
