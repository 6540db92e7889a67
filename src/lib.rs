//! Heatsheet - Heat and lane assignment for swim meets
//!
//! This crate re-exports all layers of the Heatsheet system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: heatsheet_engine     - Eligibility, conflicts, allocation, import reconciliation
//! Layer 1: heatsheet_storage    - Heat tables, event state, schedules, stores
//! Layer 0: heatsheet_foundation - Core types (ids, Competitor, Entry, Meet, Error)
//! ```

pub use heatsheet_engine as engine;
pub use heatsheet_foundation as foundation;
pub use heatsheet_storage as storage;
