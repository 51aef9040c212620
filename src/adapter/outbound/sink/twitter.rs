//! Twitter (X) API v2 sink.
//!
//! Creates one tweet per message via `POST /2/tweets`, authenticated with an
//! OAuth 2.0 user-context access token.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ConfigError, Result};
use crate::port::{DeliveryError, MessageSink};

/// Public Twitter API base URL.
pub const DEFAULT_API_URL: &str = "https://api.twitter.com";

const SINK_NAME: &str = "twitter";

/// Twitter API client for posting tweets.
#[derive(Debug)]
pub struct TwitterSink {
    /// HTTP client for API requests.
    client: Client,
    /// Fully resolved tweet creation endpoint.
    endpoint: Url,
    /// User-context bearer token.
    access_token: String,
}

impl TwitterSink {
    /// Create a sink posting to `{api_url}/2/tweets`.
    ///
    /// # Errors
    ///
    /// Returns an error if `api_url` is not a valid base URL.
    pub fn new(api_url: &str, access_token: impl Into<String>) -> Result<Self> {
        let endpoint = Url::parse(api_url)?.join("/2/tweets")?;
        Ok(Self {
            client: Client::new(),
            endpoint,
            access_token: access_token.into(),
        })
    }

    /// Create a sink from the `TWITTER_ACCESS_TOKEN` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is unset or `api_url` is invalid.
    pub fn from_env(api_url: &str) -> Result<Self> {
        let token = std::env::var("TWITTER_ACCESS_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::MissingField {
                field: "TWITTER_ACCESS_TOKEN",
            })?;
        Self::new(api_url, token)
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[derive(Serialize)]
struct Request<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct Response {
    data: Option<Created>,
}

#[derive(Deserialize)]
struct Created {
    id: String,
}

#[async_trait]
impl MessageSink for TwitterSink {
    fn name(&self) -> &'static str {
        SINK_NAME
    }

    async fn post(&self, text: &str) -> std::result::Result<(), DeliveryError> {
        let transport = |e: reqwest::Error| DeliveryError::Transport {
            sink: SINK_NAME,
            reason: e.to_string(),
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.access_token)
            .json(&Request { text })
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if !status.is_success() {
            return Err(DeliveryError::Rejected {
                sink: SINK_NAME,
                reason: format!("{status}: {body}"),
            });
        }

        match serde_json::from_str::<Response>(&body) {
            Ok(Response { data: Some(created) }) => {
                tracing::debug!(tweet_id = %created.id, "Tweet created");
                Ok(())
            }
            _ => Err(DeliveryError::Rejected {
                sink: SINK_NAME,
                reason: format!("unexpected response: {body}"),
            }),
        }
    }
}
