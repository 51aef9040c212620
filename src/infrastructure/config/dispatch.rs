//! Dispatch queue configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::application::dispatch::Trigger;

/// When queued posts are sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerPolicy {
    /// Drain immediately after each enqueue.
    #[default]
    Reactive,
    /// Drain every `interval_secs`.
    Periodic,
}

/// Dispatch queue settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchConfig {
    #[serde(default)]
    pub trigger: TriggerPolicy,
    /// Drain interval for the periodic policy (default: 60).
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Pause between consecutive posts within one drain (default: 0).
    #[serde(default)]
    pub post_spacing_ms: u64,
}

const fn default_interval_secs() -> u64 {
    60
}

impl DispatchConfig {
    #[must_use]
    pub fn trigger(&self) -> Trigger {
        match self.trigger {
            TriggerPolicy::Reactive => Trigger::Reactive,
            TriggerPolicy::Periodic => Trigger::Periodic(Duration::from_secs(self.interval_secs)),
        }
    }

    #[must_use]
    pub fn post_spacing(&self) -> Duration {
        Duration::from_millis(self.post_spacing_ms)
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            trigger: TriggerPolicy::default(),
            interval_secs: default_interval_secs(),
            post_spacing_ms: 0,
        }
    }
}
