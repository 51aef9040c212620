//! Post template configuration.

use serde::Deserialize;

use crate::domain::message::{DEFAULT_MARKER, DEFAULT_TEMPLATE};

/// How liquidation posts are worded.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageConfig {
    /// Template with `{marker}`, `{size}`, `{market}`, `{direction}`,
    /// `{price}` and `{flavor}` placeholders.
    #[serde(default = "default_template")]
    pub template: String,
    /// Severity marker, repeated once per tier.
    #[serde(default = "default_marker")]
    pub marker: String,
}

fn default_template() -> String {
    DEFAULT_TEMPLATE.into()
}

fn default_marker() -> String {
    DEFAULT_MARKER.into()
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            template: default_template(),
            marker: default_marker(),
        }
    }
}
