//! OJP response parsing.
//!
//! Responses are walked as a read-only DOM. Elements are matched by
//! namespace and local name, never by prefix, since the service is free to
//! pick its own prefixes.

use chrono::{DateTime, Utc};
use roxmltree::{Document, Node};
use tracing::trace;

use crate::domain::{DepartureInstant, LineId, LocationRef, TripResultSet};

use super::error::OjpError;
use super::request::{OJP_NS, SIRI_NS};

fn is_ojp(node: &Node, name: &str) -> bool {
    node.has_tag_name((OJP_NS, name))
}

/// First descendant (in document order) with the given OJP tag.
fn find_ojp<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.descendants().find(|n| is_ojp(n, name))
}

/// Non-blank trimmed text of a node.
fn text_of<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.text().map(str::trim).filter(|t| !t.is_empty())
}

/// Extract the stop reference from a location information response.
///
/// A `StopPlaceRef` anywhere in the document wins over a `StopPointRef`.
/// Stop point references are accepted in either the OJP or the SIRI
/// namespace. Returns `Ok(None)` when neither is present.
pub fn parse_location_response(xml: &str) -> Result<Option<LocationRef>, OjpError> {
    let doc = Document::parse(xml)?;
    let root = doc.root();

    let stop_place = find_ojp(root, "StopPlaceRef").and_then(text_of);
    let stop_point = || {
        root.descendants()
            .find(|n| {
                n.has_tag_name((OJP_NS, "StopPointRef"))
                    || n.has_tag_name((SIRI_NS, "StopPointRef"))
            })
            .and_then(text_of)
    };

    Ok(stop_place
        .or_else(stop_point)
        .and_then(|r| LocationRef::new(r).ok()))
}

/// Parse an OJP timestamp into a UTC instant.
///
/// A trailing `Z` is rewritten to `+00:00` first, so both zone spellings
/// (with or without fractional seconds) go through the same RFC 3339 parser.
///
/// # Examples
///
/// ```
/// use tramtrix::ojp::parse_estimated_time;
///
/// let a = parse_estimated_time("2026-01-06T12:00:00Z").unwrap();
/// let b = parse_estimated_time("2026-01-06T13:00:00+01:00").unwrap();
/// assert_eq!(a, b);
/// assert!(parse_estimated_time("12:00").is_none());
/// ```
pub fn parse_estimated_time(text: &str) -> Option<DepartureInstant> {
    let normalized = text.trim().replace('Z', "+00:00");
    DateTime::parse_from_rfc3339(&normalized)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Line label and estimated time of one leg, if both are present and valid.
fn parse_leg(leg: Node) -> Option<(LineId, DepartureInstant)> {
    let service_name = find_ojp(leg, "PublishedServiceName")?
        .children()
        .find(|n| is_ojp(n, "Text"))
        .and_then(text_of)?;
    let line = LineId::parse(service_name).ok()?;

    let estimated = find_ojp(leg, "EstimatedTime").and_then(text_of)?;
    let instant = parse_estimated_time(estimated)?;

    Some((line, instant))
}

/// Parse a trip response into estimated instants per line.
///
/// Legs without a published service name, or without a parseable
/// estimated time, are skipped. Only malformed XML is an error.
pub fn parse_trip_response(xml: &str) -> Result<TripResultSet, OjpError> {
    let doc = Document::parse(xml)?;
    let mut trips = TripResultSet::new();

    for trip_result in doc.descendants().filter(|n| is_ojp(n, "TripResult")) {
        for leg in trip_result.descendants().filter(|n| is_ojp(n, "Leg")) {
            match parse_leg(leg) {
                Some((line, instant)) => {
                    trips.insert(line, instant);
                }
                None => trace!("skipping leg without service name or estimated time"),
            }
        }
    }

    Ok(trips)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn line(s: &str) -> LineId {
        LineId::parse(s).unwrap()
    }

    fn utc(h: u32, m: u32, s: u32) -> DepartureInstant {
        Utc.with_ymd_and_hms(2026, 1, 6, h, m, s).unwrap()
    }

    fn leg(service: Option<&str>, time: Option<&str>) -> String {
        let service = service
            .map(|s| {
                format!(
                    "<ojp:Service><ojp:PublishedServiceName><ojp:Text>{s}</ojp:Text></ojp:PublishedServiceName></ojp:Service>"
                )
            })
            .unwrap_or_default();
        let time = time
            .map(|t| {
                format!(
                    "<ojp:LegBoard><ojp:ServiceDeparture><ojp:EstimatedTime>{t}</ojp:EstimatedTime></ojp:ServiceDeparture></ojp:LegBoard>"
                )
            })
            .unwrap_or_default();
        format!("<ojp:Leg>{service}{time}</ojp:Leg>")
    }

    fn trip_response(trips: &[Vec<String>]) -> String {
        let results: String = trips
            .iter()
            .map(|legs| {
                format!(
                    "<ojp:TripResult><ojp:Trip>{}</ojp:Trip></ojp:TripResult>",
                    legs.concat()
                )
            })
            .collect();
        format!(
            r#"<OJP xmlns:siri="http://www.siri.org.uk/siri" xmlns:ojp="http://www.vdv.de/ojp">
                <OJPResponse><siri:ServiceDelivery><OJPTripDelivery>{results}</OJPTripDelivery></siri:ServiceDelivery></OJPResponse>
            </OJP>"#
        )
    }

    #[test]
    fn parses_lines_and_times() {
        let xml = trip_response(&[
            vec![leg(Some("9"), Some("2026-01-06T12:00:00Z"))],
            vec![leg(Some("14"), Some("2026-01-06T12:05:00Z"))],
        ]);
        let trips = parse_trip_response(&xml).unwrap();

        assert_eq!(trips.len(), 2);
        let nine: Vec<_> = trips.instants(&line("9")).iter().copied().collect();
        assert_eq!(nine, vec![utc(12, 0, 0)]);
        let fourteen: Vec<_> = trips.instants(&line("14")).iter().copied().collect();
        assert_eq!(fourteen, vec![utc(12, 5, 0)]);
    }

    #[test]
    fn default_namespace_response() {
        let xml = r#"<OJP xmlns="http://www.vdv.de/ojp" xmlns:siri="http://www.siri.org.uk/siri" version="2.0">
            <OJPResponse><siri:ServiceDelivery><OJPTripDelivery>
                <TripResult><Trip><Leg><TimedLeg>
                    <LegBoard><ServiceDeparture>
                        <TimetabledTime>2026-01-06T11:59:00Z</TimetabledTime>
                        <EstimatedTime>2026-01-06T12:01:30Z</EstimatedTime>
                    </ServiceDeparture></LegBoard>
                    <LegAlight><ServiceArrival>
                        <EstimatedTime>2026-01-06T12:09:00Z</EstimatedTime>
                    </ServiceArrival></LegAlight>
                    <Service><PublishedServiceName><Text xml:lang="de">9</Text></PublishedServiceName></Service>
                </TimedLeg></Leg></Trip></TripResult>
            </OJPTripDelivery></siri:ServiceDelivery></OJPResponse>
        </OJP>"#;
        let trips = parse_trip_response(xml).unwrap();

        // The first estimated time in the leg is the boarding one
        let nine: Vec<_> = trips.instants(&line("9")).iter().copied().collect();
        assert_eq!(nine, vec![utc(12, 1, 30)]);
    }

    #[test]
    fn leg_without_estimated_time_is_skipped() {
        let xml = trip_response(&[vec![
            leg(Some("9"), None),
            leg(Some("14"), Some("2026-01-06T12:05:00Z")),
        ]]);
        let trips = parse_trip_response(&xml).unwrap();

        assert!(!trips.contains_line(&line("9")));
        assert_eq!(trips.instants(&line("14")).len(), 1);
    }

    #[test]
    fn leg_without_service_name_is_skipped() {
        let xml = trip_response(&[vec![leg(None, Some("2026-01-06T12:05:00Z"))]]);
        let trips = parse_trip_response(&xml).unwrap();
        assert!(trips.is_empty());
    }

    #[test]
    fn leg_with_malformed_time_is_skipped() {
        let xml = trip_response(&[vec![
            leg(Some("9"), Some("soon")),
            leg(Some("9"), Some("")),
        ]]);
        let trips = parse_trip_response(&xml).unwrap();
        assert!(trips.is_empty());
    }

    #[test]
    fn duplicate_legs_collapse() {
        let xml = trip_response(&[
            vec![leg(Some("9"), Some("2026-01-06T12:00:00Z"))],
            vec![leg(Some("9"), Some("2026-01-06T13:00:00+01:00"))],
        ]);
        let trips = parse_trip_response(&xml).unwrap();
        assert_eq!(trips.instants(&line("9")).len(), 1);
    }

    #[test]
    fn unmonitored_lines_are_recorded() {
        let xml = trip_response(&[vec![
            leg(Some("9"), Some("2026-01-06T12:00:00Z")),
            leg(Some("33"), Some("2026-01-06T12:04:00Z")),
        ]]);
        let trips = parse_trip_response(&xml).unwrap();
        assert!(trips.contains_line(&line("33")));
    }

    #[test]
    fn trip_without_legs_contributes_nothing() {
        let xml = trip_response(&[vec![]]);
        assert!(parse_trip_response(&xml).unwrap().is_empty());
    }

    #[test]
    fn empty_document_is_empty_result() {
        assert!(parse_trip_response("<OJP></OJP>").unwrap().is_empty());
    }

    #[test]
    fn malformed_xml_is_error() {
        let err = parse_trip_response("<OJP><TripResult>").unwrap_err();
        assert!(matches!(err, OjpError::Xml(_)));
        assert!(parse_trip_response("not xml at all").is_err());
    }

    #[test]
    fn estimated_time_variants() {
        assert_eq!(parse_estimated_time("2026-01-06T12:00:00Z"), Some(utc(12, 0, 0)));
        assert_eq!(
            parse_estimated_time("2026-01-06T12:00:00.000Z"),
            Some(utc(12, 0, 0))
        );
        assert_eq!(
            parse_estimated_time("2026-01-06T13:00:00+01:00"),
            Some(utc(12, 0, 0))
        );
        assert_eq!(
            parse_estimated_time(" 2026-01-06T12:00:00Z\n"),
            Some(utc(12, 0, 0))
        );
        assert_eq!(parse_estimated_time("2026-01-06 12:00"), None);
        assert_eq!(parse_estimated_time(""), None);
    }

    fn location_response(place: &str) -> String {
        format!(
            r#"<OJP xmlns:siri="http://www.siri.org.uk/siri" xmlns:ojp="http://www.vdv.de/ojp">
                <OJPResponse><siri:ServiceDelivery><OJPLocationInformationDelivery>
                    <PlaceResult><Place>{place}</Place></PlaceResult>
                </OJPLocationInformationDelivery></siri:ServiceDelivery></OJPResponse>
            </OJP>"#
        )
    }

    #[test]
    fn location_stop_point() {
        let xml = location_response(
            "<StopPoint><ojp:StopPointRef>8591341</ojp:StopPointRef></StopPoint>",
        );
        let r = parse_location_response(&xml).unwrap().unwrap();
        assert_eq!(r.as_str(), "8591341");
    }

    #[test]
    fn location_siri_stop_point() {
        let xml = location_response(
            "<StopPoint><siri:StopPointRef>ch:1:sloid:91341</siri:StopPointRef></StopPoint>",
        );
        let r = parse_location_response(&xml).unwrap().unwrap();
        assert_eq!(r.as_str(), "ch:1:sloid:91341");
    }

    #[test]
    fn location_stop_place() {
        let xml = location_response(
            "<StopPlace><ojp:StopPlaceRef>8591381</ojp:StopPlaceRef></StopPlace>",
        );
        let r = parse_location_response(&xml).unwrap().unwrap();
        assert_eq!(r.as_str(), "8591381");
    }

    #[test]
    fn location_prefers_stop_place() {
        let xml = location_response(
            "<StopPoint><ojp:StopPointRef>111</ojp:StopPointRef></StopPoint>\
             <StopPlace><ojp:StopPlaceRef>222</ojp:StopPlaceRef></StopPlace>",
        );
        let r = parse_location_response(&xml).unwrap().unwrap();
        assert_eq!(r.as_str(), "222");
    }

    #[test]
    fn location_blank_place_falls_back_to_point() {
        let xml = location_response(
            "<StopPlace><ojp:StopPlaceRef>  </ojp:StopPlaceRef></StopPlace>\
             <StopPoint><ojp:StopPointRef>333</ojp:StopPointRef></StopPoint>",
        );
        let r = parse_location_response(&xml).unwrap().unwrap();
        assert_eq!(r.as_str(), "333");
    }

    #[test]
    fn location_not_found() {
        assert_eq!(parse_location_response("<OJP></OJP>").unwrap(), None);
    }

    #[test]
    fn location_malformed() {
        assert!(parse_location_response("<OJP>").is_err());
    }
}
