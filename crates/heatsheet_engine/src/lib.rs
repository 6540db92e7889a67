//! Lane assignment engine for Heatsheet.
//!
//! This crate provides:
//! - [`eligibility`] - Age and gender bands parsed from event names
//! - [`ConflictDetector`] - Duplicate and occupied-slot checks
//! - [`LaneAllocator`] - Manual and automatic placement under a lane policy
//! - [`RecordParser`] and [`Reconciler`] - All-or-nothing bulk import
//! - [`EntryDesk`] - Single-entry add, edit, remove, and listings
//! - [`MeetDesk`] - The same operations against a store, saved atomically
//! - [`EngineConfig`] - Relay detection, lane size, and seeding defaults

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod allocator;
pub mod config;
pub mod conflict;
pub mod desk;
pub mod eligibility;
pub mod entries;
pub mod import;
pub mod reconcile;

pub use allocator::{HeatCursor, LaneAllocator, Placement};
pub use config::{DEFAULT_RELAY_LANE_SIZE, EngineConfig};
pub use conflict::ConflictDetector;
pub use desk::{ImportSummary, MeetDesk};
pub use eligibility::{Eligibility, GenderClass, MAX_AGE, classify, eligible_events};
pub use entries::{EntryDesk, EntryListing};
pub use import::{ImportRow, ParsedImport, RecordParser};
pub use reconcile::{Reconciler, Rejection};
