//! Centralized configuration for the bot persistence layer.
//!
//! Goals:
//! - Single place for the flags gating automatic resumption instead of
//!   scattering env lookups.
//! - `BotConfig::from_env()` reads the `BOTSTORE_*` variables; fluent
//!   `with_*` setters allow embedding hosts and tests to override fields.

use std::fmt;

use crate::util::parse_bool_flag;

/// Flags gating whether bots are recreated automatically on world load.
#[derive(Clone, Debug)]
pub struct BotConfig {
    /// Fake player support enabled at all.
    /// Env: BOTSTORE_ENABLED (default true)
    pub enable: bool,

    /// Bots may reside across restarts, i.e. automatic resumption runs
    /// when a world loads.
    /// Env: BOTSTORE_RESIDENT (default true)
    pub resident: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            enable: true,
            resident: true,
        }
    }
}

impl BotConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("BOTSTORE_ENABLED") {
            cfg.enable = parse_bool_flag(&v);
        }
        if let Ok(v) = std::env::var("BOTSTORE_RESIDENT") {
            cfg.resident = parse_bool_flag(&v);
        }

        cfg
    }

    /// Fluent setters (builder-style) to override specific fields.

    pub fn with_enable(mut self, on: bool) -> Self {
        self.enable = on;
        self
    }

    pub fn with_resident(mut self, on: bool) -> Self {
        self.resident = on;
        self
    }

    /// True when a world-load event should trigger resumption.
    #[inline]
    pub fn resume_on_load(&self) -> bool {
        self.enable && self.resident
    }
}

impl fmt::Display for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BotConfig {{ enable: {}, resident: {} }}",
            self.enable, self.resident
        )
    }
}
