//! Integration tests for Layer 2: Engine
//!
//! Tests for lane allocation, conflict detection, import reconciliation,
//! eligibility, and the entry desk.

mod properties;
mod scenarios;
