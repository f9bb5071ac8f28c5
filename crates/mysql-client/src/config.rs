//! Connection configuration.

// FixedOffset construction with a zero offset cannot fail.
#![allow(clippy::expect_used)]

use chrono::FixedOffset;
use mysql_protocol::packet::DEFAULT_MAX_ALLOWED_PACKET;

/// Configuration consumed by the connection engine.
///
/// DSN parsing and transport establishment happen outside this crate; this
/// is the already-parsed subset the engine needs.
#[derive(Debug, Clone)]
pub struct Config {
    /// Time zone used to render timestamp literals.
    pub time_zone: FixedOffset,
    /// Largest logical payload the connection will send.
    pub max_allowed_packet: usize,
    /// Whether queries with arguments are rewritten client-side instead of
    /// requiring a server-side prepared statement.
    pub interpolate_params: bool,
}

impl Config {
    /// Create a configuration with the defaults: UTC, 4 MiB packets,
    /// interpolation enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            time_zone: FixedOffset::east_opt(0).expect("zero offset is valid"),
            max_allowed_packet: DEFAULT_MAX_ALLOWED_PACKET,
            interpolate_params: true,
        }
    }

    /// Set the time zone used for timestamp literals.
    #[must_use]
    pub fn with_time_zone(mut self, time_zone: FixedOffset) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// Set the largest logical payload the connection will send.
    #[must_use]
    pub fn with_max_allowed_packet(mut self, max: usize) -> Self {
        self.max_allowed_packet = max;
        self
    }

    /// Enable or disable client-side parameter interpolation.
    #[must_use]
    pub fn with_interpolate_params(mut self, enabled: bool) -> Self {
        self.interpolate_params = enabled;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
