//! OJP (Open Journey Planner) 2.0 client.
//!
//! Talks to the Swiss open-data trip-planning service. Two operations are
//! used:
//! - `OJPLocationInformationRequest` to turn a stop name into a stable
//!   stop reference, once per stop at startup
//! - `OJPTripRequest` to get the next tram trips between two stops, on
//!   every poll
//!
//! Estimated times in responses are ISO 8601 instants; they are normalized
//! to UTC on parse.

mod client;
mod error;
mod parse;
mod request;

pub use client::{DEFAULT_BASE_URL, OjpClient, OjpConfig};
pub use error::{OjpError, ResolutionError};
pub use parse::{parse_estimated_time, parse_location_response, parse_trip_response};
pub use request::{OJP_NS, SIRI_NS, TRIP_RESULT_LIMIT, location_information_request, trip_request};
