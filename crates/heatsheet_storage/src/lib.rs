//! Heat tables, event state, schedules, and store interfaces for Heatsheet.
//!
//! This crate provides:
//! - [`HeatTable`] - One event's heats and lanes as a persistent value
//! - [`LaneLimits`] and [`LanePolicy`] - Lane capacity and scan order
//! - [`EventState`] - An event as stored, with its version stamp
//! - [`Schedule`] - A meet's events with dense event numbers
//! - [`RosterSource`] and [`EventStore`] - Collaborator interfaces
//! - [`ChangeSet`] and [`MemoryStore`] - Atomic saves and an in-memory store

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod event;
pub mod heat;
pub mod policy;
pub mod schedule;
pub mod store;
pub mod table;

pub use event::{EventKind, EventState, RELAY_MARKER};
pub use heat::{Heat, Lane};
pub use policy::{LaneLimits, LanePolicy};
pub use schedule::{STANDARD_EVENT_LIBRARY, Schedule};
pub use store::{ChangeSet, EventStore, MemoryStore, RosterSource};
pub use table::HeatTable;
