//! Sink selection.

use serde::Deserialize;

use crate::adapter::outbound::sink::twitter::DEFAULT_API_URL;

/// Which feed receives posts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Write posts to the log only.
    #[default]
    Log,
    /// Post to Twitter (X).
    Twitter,
    /// Post to a Telegram chat.
    Telegram,
}

impl SinkKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::Twitter => "twitter",
            Self::Telegram => "telegram",
        }
    }
}

/// Sink settings. Credentials come from the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct SinkConfig {
    #[serde(default)]
    pub kind: SinkKind,
    /// Twitter API base URL.
    #[serde(default = "default_twitter_api_url")]
    pub twitter_api_url: String,
}

fn default_twitter_api_url() -> String {
    DEFAULT_API_URL.into()
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            kind: SinkKind::default(),
            twitter_api_url: default_twitter_api_url(),
        }
    }
}
