//! Configuration for the assignment engine.

use heatsheet_foundation::{DEFAULT_LANES, Meet, MeetId, SeedTime};
use heatsheet_storage::{EventKind, LaneLimits, RELAY_MARKER};

/// Swimmers per relay lane when nothing else is configured.
pub const DEFAULT_RELAY_LANE_SIZE: usize = 4;

/// Configuration for lane assignment.
///
/// Controls relay detection, relay lane size, lane parity, and the seed time
/// given to new entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Lanes given to meets created through [`EngineConfig::meet`].
    pub default_lanes: u32,

    /// Swimmers one relay lane may hold.
    pub relay_lane_size: usize,

    /// Word that marks an event name as a relay (matched ignoring case).
    pub relay_marker: String,

    /// Seed time copied into every new entry.
    pub seed_time: SeedTime,

    /// Whether dual meets split teams across odd and even lanes.
    pub dual_meet_parity: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_lanes: DEFAULT_LANES,
            relay_lane_size: DEFAULT_RELAY_LANE_SIZE,
            relay_marker: RELAY_MARKER.to_string(),
            seed_time: SeedTime::NoTime,
            dual_meet_parity: true,
        }
    }
}

impl EngineConfig {
    /// Creates the standard configuration.
    #[must_use]
    pub fn standard() -> Self {
        Self::default()
    }

    /// Creates a configuration that fills lanes in order even for dual meets.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            dual_meet_parity: false,
            ..Self::default()
        }
    }

    /// Builder method to set the default lane count.
    #[must_use]
    pub fn with_default_lanes(mut self, lanes: u32) -> Self {
        self.default_lanes = lanes;
        self
    }

    /// Builder method to set the relay lane size.
    #[must_use]
    pub fn with_relay_lane_size(mut self, size: usize) -> Self {
        self.relay_lane_size = size;
        self
    }

    /// Builder method to set the relay marker word.
    #[must_use]
    pub fn with_relay_marker(mut self, marker: impl Into<String>) -> Self {
        self.relay_marker = marker.into();
        self
    }

    /// Builder method to set the seed time of new entries.
    #[must_use]
    pub fn with_seed_time(mut self, seed_time: SeedTime) -> Self {
        self.seed_time = seed_time;
        self
    }

    /// Builder method to enable or disable dual meet lane parity.
    #[must_use]
    pub fn with_dual_meet_parity(mut self, enabled: bool) -> Self {
        self.dual_meet_parity = enabled;
        self
    }

    /// Creates a meet with the configured lane count.
    #[must_use]
    pub fn meet(&self, id: impl Into<MeetId>, name: impl Into<String>) -> Meet {
        Meet::new(id, name).with_lanes(self.default_lanes)
    }

    /// Classifies an event name with the configured relay marker.
    #[must_use]
    pub fn event_kind(&self, name: &str) -> EventKind {
        EventKind::classify(name, &self.relay_marker)
    }

    /// Returns the lane limits of an event in `meet`.
    #[must_use]
    pub fn limits(&self, meet: &Meet, event_name: &str) -> LaneLimits {
        self.event_kind(event_name)
            .limits(meet.lanes_available, self.relay_lane_size)
    }
}
