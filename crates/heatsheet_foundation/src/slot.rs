//! Heat/lane coordinates.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A position within an event: one lane of one heat.
///
/// Slots order by heat first, then lane, which is the canonical heat sheet
/// order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Slot {
    /// Heat number (1-based).
    pub heat: u32,
    /// Lane number (1-based).
    pub lane: u32,
}

impl Slot {
    /// Creates a slot.
    #[must_use]
    pub const fn new(heat: u32, lane: u32) -> Self {
        Self { heat, lane }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "heat {}, lane {}", self.heat, self.lane)
    }
}
