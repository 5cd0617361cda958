//! Traffic-light status and its display colors.

use std::fmt;
use std::str::FromStr;

/// Color shown for a label that is not a known status.
pub const FALLBACK_HEX_COLOR: &str = "ffffff";

/// Error returned when parsing an unknown status label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status label: {0:?}")]
pub struct UnknownStatus(String);

/// How soon the next usable tram of a line leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// A departure sits comfortably inside the walking window.
    Green,
    /// A departure is close; hurry.
    Amber,
    /// Nothing catchable: no data, too far off, or too close.
    Red,
}

impl Status {
    /// Upper-case label, as written to logs.
    pub fn label(self) -> &'static str {
        match self {
            Status::Green => "GREEN",
            Status::Amber => "AMBER",
            Status::Red => "RED",
        }
    }

    /// Six-digit hex color (no `#`) rendered on the clock.
    pub fn hex_color(self) -> &'static str {
        match self {
            Status::Green => "03fc14",
            Status::Amber => "fcca03",
            Status::Red => "a83632",
        }
    }
}

/// Map a status label to its hex color.
///
/// Total over all strings: anything other than `GREEN`, `AMBER` or `RED`
/// yields [`FALLBACK_HEX_COLOR`].
///
/// # Examples
///
/// ```
/// use tramtrix::domain::hex_color_for_label;
///
/// assert_eq!(hex_color_for_label("RED"), "a83632");
/// assert_eq!(hex_color_for_label("UNKNOWN"), "ffffff");
/// ```
pub fn hex_color_for_label(label: &str) -> &'static str {
    label
        .parse::<Status>()
        .map(Status::hex_color)
        .unwrap_or(FALLBACK_HEX_COLOR)
}

impl FromStr for Status {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GREEN" => Ok(Status::Green),
            "AMBER" => Ok(Status::Amber),
            "RED" => Ok(Status::Red),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
