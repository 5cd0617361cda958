//! AWTRIX custom-app HTTP client.

use serde::Serialize;
use tracing::debug;

use crate::domain::DisplayPayload;

use super::error::DisplayPushError;

/// Default custom-app endpoint of a clock on the local network.
pub const DEFAULT_URL: &str = "http://awtrix.local/api/custom?name=tramtrix";

/// Request timeout for display pushes, in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// One colored text fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextSegment {
    #[serde(rename = "t")]
    pub text: String,
    #[serde(rename = "c")]
    pub color: String,
}

/// Body of a custom-app update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomApp {
    pub text: Vec<TextSegment>,
    pub repeat: u32,
}

impl CustomApp {
    /// Render one `"<line> "` segment per line, in payload order.
    pub fn from_payload(payload: &DisplayPayload) -> Self {
        let text = payload
            .segments()
            .iter()
            .map(|s| TextSegment {
                text: format!("{} ", s.line),
                color: s.color.to_string(),
            })
            .collect();

        Self { text, repeat: 1 }
    }
}

/// Configuration for the display client.
#[derive(Debug, Clone)]
pub struct AwtrixConfig {
    /// Full custom-app URL
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl AwtrixConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for AwtrixConfig {
    fn default() -> Self {
        Self::new(DEFAULT_URL)
    }
}

/// Client for an AWTRIX pixel clock.
#[derive(Debug, Clone)]
pub struct AwtrixClient {
    http: reqwest::Client,
    url: String,
}

impl AwtrixClient {
    pub fn new(config: AwtrixConfig) -> Result<Self, DisplayPushError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url,
        })
    }

    /// Replace the clock's text with the given line colors.
    pub async fn update_clock(&self, payload: &DisplayPayload) -> Result<(), DisplayPushError> {
        let app = CustomApp::from_payload(payload);
        debug!(segments = app.text.len(), url = %self.url, "pushing to display");

        let response = self.http.post(&self.url).json(&app).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DisplayPushError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(())
    }
}
