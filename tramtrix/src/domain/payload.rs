//! Per-line colors handed to the display.

use super::LineId;

/// One colored text segment on the clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineColor {
    pub line: LineId,
    /// Six-digit hex color without `#`.
    pub color: &'static str,
}

/// Colors for every monitored line, in configured order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayPayload {
    segments: Vec<LineColor>,
}

impl DisplayPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the color for a line. A line already present keeps its position
    /// and takes the new color.
    pub fn push(&mut self, line: LineId, color: &'static str) {
        match self.segments.iter_mut().find(|s| s.line == line) {
            Some(existing) => existing.color = color,
            None => self.segments.push(LineColor { line, color }),
        }
    }

    /// Color assigned to a line, if present.
    pub fn color_of(&self, line: &LineId) -> Option<&'static str> {
        self.segments
            .iter()
            .find(|s| &s.line == line)
            .map(|s| s.color)
    }

    pub fn segments(&self) -> &[LineColor] {
        &self.segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let mut payload = DisplayPayload::new();
        payload.push(LineId::parse("14").unwrap(), "03fc14");
        payload.push(LineId::parse("9").unwrap(), "a83632");

        let lines: Vec<_> = payload.segments().iter().map(|s| s.line.as_str()).collect();
        assert_eq!(lines, vec!["14", "9"]);
        assert_eq!(payload.color_of(&LineId::parse("9").unwrap()), Some("a83632"));
        assert_eq!(payload.color_of(&LineId::parse("2").unwrap()), None);
    }

    #[test]
    fn repeated_line_keeps_one_segment() {
        let mut payload = DisplayPayload::new();
        payload.push(LineId::parse("9").unwrap(), "03fc14");
        payload.push(LineId::parse("14").unwrap(), "fcba03");
        payload.push(LineId::parse("9").unwrap(), "a83632");

        let lines: Vec<_> = payload.segments().iter().map(|s| s.line.as_str()).collect();
        assert_eq!(lines, vec!["9", "14"]);
        assert_eq!(payload.color_of(&LineId::parse("9").unwrap()), Some("a83632"));
    }
}
