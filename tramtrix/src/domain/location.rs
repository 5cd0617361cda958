//! Stop location reference type.

use std::fmt;

/// Error returned when constructing an empty location reference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid location reference: {reason}")]
pub struct InvalidLocationRef {
    reason: &'static str,
}

/// An opaque OJP stop identifier (e.g. `8591190` or `ch:1:sloid:91190`).
///
/// Obtained once per named stop by the stop resolver and then reused for
/// every trip request. The only validation is that it is non-blank.
///
/// # Examples
///
/// ```
/// use tramtrix::domain::LocationRef;
///
/// let heuried = LocationRef::new("8591190").unwrap();
/// assert_eq!(heuried.as_str(), "8591190");
///
/// // Surrounding whitespace from the XML text node is dropped
/// assert_eq!(LocationRef::new(" 8591190\n").unwrap().as_str(), "8591190");
///
/// // Blank strings are rejected
/// assert!(LocationRef::new("  ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct LocationRef(String);

impl LocationRef {
    /// Create a location reference, trimming surrounding whitespace.
    pub fn new(s: impl AsRef<str>) -> Result<Self, InvalidLocationRef> {
        let trimmed = s.as_ref().trim();
        if trimmed.is_empty() {
            return Err(InvalidLocationRef {
                reason: "location reference cannot be empty",
            });
        }
        Ok(LocationRef(trimmed.to_string()))
    }

    /// Returns the reference as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for LocationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocationRef({})", self.0)
    }
}

impl fmt::Display for LocationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
