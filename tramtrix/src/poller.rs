//! Polling loop: fetch trips, classify each line, push colors.
//!
//! Startup resolves both stops once; any failure there is fatal. After
//! that the loop runs forever on a fixed interval. A failed iteration is
//! logged and the next one starts after the normal sleep, with no backoff.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::awtrix::{AwtrixClient, DisplayPushError};
use crate::config::{AppConfig, ConfigError};
use crate::domain::{DisplayPayload, LineId, LocationRef, Status, TripResultSet};
use crate::ojp::{OjpClient, OjpError, ResolutionError};
use crate::traffic_light::{Thresholds, classify};

/// Source of stop references.
///
/// This abstraction allows startup to be tested without the network.
pub trait StopResolver {
    fn resolve_stop(
        &self,
        stop_name: &str,
    ) -> impl Future<Output = Result<LocationRef, ResolutionError>> + Send;
}

/// Source of per-line departure instants.
pub trait TripSource {
    fn fetch_trips(
        &self,
        origin: &LocationRef,
        destination: &LocationRef,
    ) -> impl Future<Output = Result<TripResultSet, OjpError>> + Send;
}

/// Something that can show line colors.
pub trait DisplaySink {
    fn update(
        &self,
        payload: &DisplayPayload,
    ) -> impl Future<Output = Result<(), DisplayPushError>> + Send;
}

impl StopResolver for OjpClient {
    fn resolve_stop(
        &self,
        stop_name: &str,
    ) -> impl Future<Output = Result<LocationRef, ResolutionError>> + Send {
        OjpClient::resolve_stop(self, stop_name)
    }
}

impl TripSource for OjpClient {
    fn fetch_trips(
        &self,
        origin: &LocationRef,
        destination: &LocationRef,
    ) -> impl Future<Output = Result<TripResultSet, OjpError>> + Send {
        OjpClient::fetch_trips(self, origin, destination)
    }
}

impl DisplaySink for AwtrixClient {
    fn update(
        &self,
        payload: &DisplayPayload,
    ) -> impl Future<Output = Result<(), DisplayPushError>> + Send {
        self.update_clock(payload)
    }
}

/// Errors that stop the process before the loop starts.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to create OJP client: {0}")]
    OjpClient(#[from] OjpError),

    #[error("failed to create display client: {0}")]
    DisplayClient(#[from] DisplayPushError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}

/// A failed poll iteration. The loop logs it and carries on.
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error("failed to fetch trips: {0}")]
    Fetch(#[from] OjpError),
}

/// Resolved origin and destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub origin: LocationRef,
    pub destination: LocationRef,
}

/// Resolve origin, then destination. Stops at the first failure.
pub async fn resolve_route<R: StopResolver>(
    resolver: &R,
    origin_stop: &str,
    destination_stop: &str,
) -> Result<Route, ResolutionError> {
    let origin = resolver.resolve_stop(origin_stop).await?;
    let destination = resolver.resolve_stop(destination_stop).await?;
    Ok(Route {
        origin,
        destination,
    })
}

/// Loop settings, independent of where they were read from.
#[derive(Debug, Clone)]
pub struct PollSettings {
    /// Monitored lines, in display order
    pub lines: Vec<LineId>,
    pub thresholds: Thresholds,
    pub interval: Duration,
}

impl From<&AppConfig> for PollSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            lines: config.lines.clone(),
            thresholds: config.thresholds,
            interval: config.poll_interval,
        }
    }
}

/// Classification of one monitored line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineStatus {
    pub line: LineId,
    pub status: Status,
}

/// Outcome of one successful iteration.
#[derive(Debug, Clone)]
pub struct PollReport {
    pub statuses: Vec<LineStatus>,
    pub payload: DisplayPayload,
    /// Whether the display accepted the update
    pub pushed: bool,
}

/// Classify every monitored line, in order.
///
/// A line absent from `trips` has no instants and comes out RED.
pub fn classify_lines(
    trips: &TripResultSet,
    lines: &[LineId],
    now: DateTime<Utc>,
    thresholds: &Thresholds,
) -> Vec<LineStatus> {
    lines
        .iter()
        .map(|line| {
            let instants = trips.instants(line);
            let status = classify(instants, now, thresholds);

            let next: Vec<String> = instants
                .iter()
                .map(|t| {
                    let mins = t.signed_duration_since(now).num_milliseconds() as f64 / 60_000.0;
                    format!("{mins:.1}m")
                })
                .collect();
            debug!(
                line = %line,
                %status,
                color = status.hex_color(),
                next = ?next,
                "classified line"
            );

            LineStatus {
                line: line.clone(),
                status,
            }
        })
        .collect()
}

/// Colors for the display, one per status, same order.
pub fn to_payload(statuses: &[LineStatus]) -> DisplayPayload {
    let mut payload = DisplayPayload::new();
    for s in statuses {
        payload.push(s.line.clone(), s.status.hex_color());
    }
    payload
}

/// Drives fetch, classify and push on a fixed interval.
pub struct Poller<S, D> {
    source: S,
    display: D,
    route: Route,
    settings: PollSettings,
}

impl<S: TripSource, D: DisplaySink> Poller<S, D> {
    pub fn new(source: S, display: D, route: Route, settings: PollSettings) -> Self {
        Self {
            source,
            display,
            route,
            settings,
        }
    }

    /// Run a single iteration against the given clock reading.
    ///
    /// Fetch failures are returned. Display failures are logged and
    /// reported through [`PollReport::pushed`].
    pub async fn poll_once(&self, now: DateTime<Utc>) -> Result<PollReport, PollError> {
        info!("fetching tram data");
        let trips = self
            .source
            .fetch_trips(&self.route.origin, &self.route.destination)
            .await?;

        let statuses = classify_lines(&trips, &self.settings.lines, now, &self.settings.thresholds);
        let payload = to_payload(&statuses);

        info!(lines = payload.segments().len(), "updating clock");
        let pushed = match self.display.update(&payload).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "display update failed");
                false
            }
        };

        Ok(PollReport {
            statuses,
            payload,
            pushed,
        })
    }

    /// Poll forever. Never returns.
    pub async fn run(&self) {
        info!(
            interval_secs = self.settings.interval.as_secs(),
            origin = %self.route.origin,
            destination = %self.route.destination,
            "starting poll loop"
        );

        loop {
            match self.poll_once(Utc::now()).await {
                Ok(report) => info!(pushed = report.pushed, "poll complete, sleeping"),
                Err(e) => error!(error = %e, "poll failed, retrying after interval"),
            }
            tokio::time::sleep(self.settings.interval).await;
        }
    }
}
