//! Core types, identifiers, and errors for Heatsheet.
//!
//! This crate provides:
//! - Identifiers ([`MeetId`], [`EventId`], [`TeamId`], [`CompetitorId`])
//! - [`Competitor`] and [`Roster`] - read-only team rosters
//! - [`Entry`] and [`SeedTime`] - competitors as placed in a lane
//! - [`Meet`] - lane count and home/away configuration
//! - [`Slot`] - heat/lane coordinates
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod competitor;
pub mod entry;
pub mod error;
pub mod ids;
pub mod meet;
pub mod slot;

pub use competitor::{Competitor, Gender, Roster};
pub use entry::{Entry, SeedTime};
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use ids::{CompetitorId, EventId, MeetId, TeamId};
pub use meet::{DEFAULT_LANES, Meet};
pub use slot::Slot;
