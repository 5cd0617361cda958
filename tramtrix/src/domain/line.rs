//! Tram line identifier.

use std::collections::HashSet;
use std::fmt;

/// Error returned when parsing an invalid line identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid line id: {reason}")]
pub struct InvalidLineId {
    reason: &'static str,
}

/// Label of a public-transport line, e.g. `"9"` or `"14"`.
///
/// Configured lines and the `PublishedServiceName` text parsed from trip
/// responses are compared after trimming, so `" 9 "` and `"9"` are the same
/// line. Comparison is otherwise exact (case-sensitive).
///
/// # Examples
///
/// ```
/// use tramtrix::domain::LineId;
///
/// let nine = LineId::parse(" 9 ").unwrap();
/// assert_eq!(nine.as_str(), "9");
/// assert!(LineId::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(String);

impl LineId {
    /// Parse a line identifier, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidLineId> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidLineId {
                reason: "line id cannot be empty",
            });
        }
        Ok(LineId(trimmed.to_string()))
    }

    /// Parse a comma-separated list such as `"9, 14,"`.
    ///
    /// Blank entries are dropped rather than rejected. A line listed more
    /// than once keeps only its first position.
    pub fn parse_list(s: &str) -> Vec<Self> {
        let mut seen = HashSet::new();
        s.split(',')
            .filter_map(|part| Self::parse(part).ok())
            .filter(|line| seen.insert(line.clone()))
            .collect()
    }

    /// Returns the line label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineId({})", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims() {
        assert_eq!(LineId::parse("14").unwrap().as_str(), "14");
        assert_eq!(LineId::parse("\n 14\t").unwrap().as_str(), "14");
    }

    #[test]
    fn reject_blank() {
        assert!(LineId::parse("").is_err());
        assert!(LineId::parse("   ").is_err());
    }

    #[test]
    fn parse_list_drops_blanks() {
        let lines = LineId::parse_list("9, 14,, ,2");
        let labels: Vec<_> = lines.iter().map(LineId::as_str).collect();
        assert_eq!(labels, vec!["9", "14", "2"]);
    }

    #[test]
    fn parse_list_drops_repeats() {
        let lines = LineId::parse_list("9, 14, 9 ,2,14");
        let labels: Vec<_> = lines.iter().map(LineId::as_str).collect();
        assert_eq!(labels, vec!["9", "14", "2"]);
    }

    #[test]
    fn parse_list_empty() {
        assert!(LineId::parse_list("").is_empty());
        assert!(LineId::parse_list(" , ").is_empty());
    }

    #[test]
    fn case_sensitive() {
        assert_ne!(LineId::parse("N1").unwrap(), LineId::parse("n1").unwrap());
    }
}
