//! Telegram channel sink.
//!
//! Posts plain-text messages to a single chat through the Bot API.
//!
//! Requires the `telegram` feature to be enabled.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::RequestError;
use tracing::info;

use crate::error::{ConfigError, Result};
use crate::port::{DeliveryError, MessageSink};

const SINK_NAME: &str = "telegram";

/// Credentials for the Telegram sink.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot API token obtained from BotFather.
    pub bot_token: String,
    /// Target chat ID.
    pub chat_id: i64,
}

impl TelegramConfig {
    /// Read `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID`.
    ///
    /// # Errors
    ///
    /// Returns a config error naming the first missing or invalid variable.
    pub fn from_env() -> Result<Self> {
        let bot_token = std::env::var("TELEGRAM_BOT_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::MissingField {
                field: "TELEGRAM_BOT_TOKEN",
            })?;
        let raw_chat_id = std::env::var("TELEGRAM_CHAT_ID").map_err(|_| {
            ConfigError::MissingField {
                field: "TELEGRAM_CHAT_ID",
            }
        })?;
        let chat_id = raw_chat_id
            .trim()
            .parse()
            .map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
                field: "TELEGRAM_CHAT_ID",
                reason: e.to_string(),
            })?;

        Ok(Self { bot_token, chat_id })
    }
}

/// Sends each message to a Telegram chat.
pub struct TelegramSink {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramSink {
    #[must_use]
    pub fn new(config: TelegramConfig) -> Self {
        info!(chat_id = config.chat_id, "Telegram sink configured");
        Self {
            bot: Bot::new(config.bot_token),
            chat_id: ChatId(config.chat_id),
        }
    }
}

#[async_trait]
impl MessageSink for TelegramSink {
    fn name(&self) -> &'static str {
        SINK_NAME
    }

    async fn post(&self, text: &str) -> std::result::Result<(), DeliveryError> {
        self.bot
            .send_message(self.chat_id, text)
            .await
            .map(|_| ())
            .map_err(|e| match e {
                RequestError::Api(api) => DeliveryError::Rejected {
                    sink: SINK_NAME,
                    reason: api.to_string(),
                },
                other => DeliveryError::Transport {
                    sink: SINK_NAME,
                    reason: other.to_string(),
                },
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mutex to serialize tests that modify environment variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn from_env_missing_token() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var("TELEGRAM_BOT_TOKEN");
        std::env::remove_var("TELEGRAM_CHAT_ID");

        let result = TelegramConfig::from_env();
        assert!(matches!(
            result,
            Err(crate::error::Error::Config(ConfigError::MissingField {
                field: "TELEGRAM_BOT_TOKEN"
            }))
        ));
    }

    #[test]
    fn from_env_invalid_chat_id() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("TELEGRAM_BOT_TOKEN", "test-token");
        std::env::set_var("TELEGRAM_CHAT_ID", "not-a-number");

        let result = TelegramConfig::from_env();
        assert!(matches!(
            result,
            Err(crate::error::Error::Config(ConfigError::InvalidValue {
                field: "TELEGRAM_CHAT_ID",
                ..
            }))
        ));

        std::env::remove_var("TELEGRAM_BOT_TOKEN");
        std::env::remove_var("TELEGRAM_CHAT_ID");
    }

    #[test]
    fn from_env_valid() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("TELEGRAM_BOT_TOKEN", "test-token");
        std::env::set_var("TELEGRAM_CHAT_ID", "-100123");

        let config = TelegramConfig::from_env().unwrap();
        assert_eq!(config.bot_token, "test-token");
        assert_eq!(config.chat_id, -100123);

        std::env::remove_var("TELEGRAM_BOT_TOKEN");
        std::env::remove_var("TELEGRAM_CHAT_ID");
    }
}
