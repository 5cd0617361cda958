//! Domain types for the tram traffic light.
//!
//! Identifiers validate themselves at construction time; everything else
//! here is derived per poll and never stored.

mod line;
mod location;
mod payload;
mod status;
mod trips;

pub use line::{InvalidLineId, LineId};
pub use location::{InvalidLocationRef, LocationRef};
pub use payload::{DisplayPayload, LineColor};
pub use status::{FALLBACK_HEX_COLOR, Status, UnknownStatus, hex_color_for_label};
pub use trips::{DepartureInstant, TripResultSet};
