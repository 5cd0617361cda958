//! OJP HTTP client.
//!
//! Wraps the two OJP operations the traffic light needs: resolving a stop
//! name once at startup, and fetching tram trips on every poll. Both are
//! XML documents POSTed to the same endpoint.

use chrono::Utc;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, info};

use crate::domain::{LocationRef, TripResultSet};

use super::error::{OjpError, ResolutionError};
use super::parse::{parse_location_response, parse_trip_response};
use super::request::{location_information_request, trip_request};

/// Default OJP 2.0 endpoint (opentransportdata.swiss).
pub const DEFAULT_BASE_URL: &str = "https://api.opentransportdata.swiss/ojp20";

/// Requestor reference sent with every request.
const DEFAULT_REQUESTOR_REF: &str = "tramtrix";

/// Maximum number of body characters kept in error messages.
const ERROR_BODY_LIMIT: usize = 500;

const XML_CONTENT_TYPE: &str = "application/xml";

/// Configuration for the OJP client.
#[derive(Debug, Clone)]
pub struct OjpConfig {
    /// Bearer token for authentication
    pub api_key: String,
    /// Endpoint URL (defaults to the public OJP 2.0 service)
    pub base_url: String,
    /// Sent as `siri:RequestorRef`
    pub requestor_ref: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OjpConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            requestor_ref: DEFAULT_REQUESTOR_REF.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom endpoint URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the requestor reference.
    pub fn with_requestor_ref(mut self, requestor_ref: impl Into<String>) -> Self {
        self.requestor_ref = requestor_ref.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// OJP trip-planning API client.
#[derive(Debug, Clone)]
pub struct OjpClient {
    http: reqwest::Client,
    base_url: String,
    requestor_ref: String,
}

impl OjpClient {
    /// Create a new OJP client with the given configuration.
    pub fn new(config: OjpConfig) -> Result<Self, OjpError> {
        let mut headers = HeaderMap::new();

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| OjpError::InvalidApiKey)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(XML_CONTENT_TYPE));
        headers.insert(ACCEPT, HeaderValue::from_static(XML_CONTENT_TYPE));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            requestor_ref: config.requestor_ref,
        })
    }

    /// POST an XML document and return the response body.
    async fn post_xml(&self, body: String) -> Result<String, OjpError> {
        let response = self.http.post(&self.base_url).body(body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message: String = body.chars().take(ERROR_BODY_LIMIT).collect();
            if status == reqwest::StatusCode::UNAUTHORIZED
                || status == reqwest::StatusCode::FORBIDDEN
            {
                return Err(OjpError::Unauthorized {
                    status: status.as_u16(),
                    message,
                });
            }
            return Err(OjpError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.text().await?)
    }

    /// Resolve a human-readable stop name to its location reference.
    ///
    /// A stop place reference is preferred over a stop point reference.
    /// There is no retry; callers decide what a failure means.
    pub async fn resolve_stop(&self, stop_name: &str) -> Result<LocationRef, ResolutionError> {
        info!(stop = stop_name, "resolving stop reference");

        let request = location_information_request(stop_name, &self.requestor_ref, Utc::now());
        let wrap = |source| ResolutionError::Request {
            stop_name: stop_name.to_string(),
            source,
        };

        let body = self.post_xml(request).await.map_err(wrap)?;

        match parse_location_response(&body).map_err(wrap)? {
            Some(location) => {
                info!(stop = stop_name, location = %location, "resolved stop reference");
                Ok(location)
            }
            None => {
                debug!(stop = stop_name, %body, "location response had no stop reference");
                Err(ResolutionError::NotFound {
                    stop_name: stop_name.to_string(),
                })
            }
        }
    }

    /// Fetch up to ten tram trips between two stops, grouped by line.
    pub async fn fetch_trips(
        &self,
        origin: &LocationRef,
        destination: &LocationRef,
    ) -> Result<TripResultSet, OjpError> {
        debug!(%origin, %destination, "fetching trips");

        let request = trip_request(origin, destination, &self.requestor_ref, Utc::now());
        let body = self.post_xml(request).await?;
        let trips = parse_trip_response(&body)?;

        debug!(lines = trips.len(), "parsed trip response");
        Ok(trips)
    }
}
