//! OJP 2.0 request documents.
//!
//! Requests are small and fixed in shape, so they are rendered from
//! templates rather than through an XML writer. Every caller-supplied value
//! is escaped with `quick_xml::escape::escape`.

use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::escape::escape;

use crate::domain::LocationRef;

/// Default OJP namespace.
pub const OJP_NS: &str = "http://www.vdv.de/ojp";

/// SIRI namespace, bound to the `siri` prefix.
pub const SIRI_NS: &str = "http://www.siri.org.uk/siri";

/// Maximum number of alternative trips requested per poll.
pub const TRIP_RESULT_LIMIT: u32 = 10;

fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Wrap a service request body in the OJP envelope.
fn envelope(requestor_ref: &str, now: DateTime<Utc>, inner: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<OJP xmlns="{OJP_NS}" xmlns:siri="{SIRI_NS}" version="2.0">
    <OJPRequest>
        <siri:ServiceRequest>
            <siri:RequestTimestamp>{ts}</siri:RequestTimestamp>
            <siri:RequestorRef>{requestor}</siri:RequestorRef>
{inner}
        </siri:ServiceRequest>
    </OJPRequest>
</OJP>
"#,
        ts = timestamp(now),
        requestor = escape(requestor_ref),
    )
}

/// Build an `OJPLocationInformationRequest` looking up a single stop by name.
pub fn location_information_request(
    stop_name: &str,
    requestor_ref: &str,
    now: DateTime<Utc>,
) -> String {
    let inner = format!(
        r#"            <OJPLocationInformationRequest>
                <siri:RequestTimestamp>{ts}</siri:RequestTimestamp>
                <siri:MessageIdentifier>LIR-{id}</siri:MessageIdentifier>
                <InitialInput>
                    <Name>{name}</Name>
                </InitialInput>
                <Restrictions>
                    <Type>stop</Type>
                    <NumberOfResults>1</NumberOfResults>
                </Restrictions>
            </OJPLocationInformationRequest>"#,
        ts = timestamp(now),
        id = now.timestamp_millis(),
        name = escape(stop_name),
    );
    envelope(requestor_ref, now, &inner)
}

/// Build an `OJPTripRequest` for tram trips between two stops.
pub fn trip_request(
    origin: &LocationRef,
    destination: &LocationRef,
    requestor_ref: &str,
    now: DateTime<Utc>,
) -> String {
    let inner = format!(
        r#"            <OJPTripRequest>
                <siri:RequestTimestamp>{ts}</siri:RequestTimestamp>
                <siri:MessageIdentifier>TR-{id}</siri:MessageIdentifier>
                <Origin>
                    <PlaceRef>
                        <siri:StopPointRef>{origin}</siri:StopPointRef>
                    </PlaceRef>
                </Origin>
                <Destination>
                    <PlaceRef>
                        <siri:StopPointRef>{destination}</siri:StopPointRef>
                    </PlaceRef>
                </Destination>
                <Params>
                    <ModeAndModeOfOperationFilter>
                        <Exclude>false</Exclude>
                        <PtMode>tram</PtMode>
                    </ModeAndModeOfOperationFilter>
                    <NumberOfResults>{TRIP_RESULT_LIMIT}</NumberOfResults>
                </Params>
            </OJPTripRequest>"#,
        ts = timestamp(now),
        id = now.timestamp_millis(),
        origin = escape(origin.as_str()),
        destination = escape(destination.as_str()),
    );
    envelope(requestor_ref, now, &inner)
}
