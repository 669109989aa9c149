use crate::source::Origin;

/// Source location information for error reporting
///
/// Line and column numbers are 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorLocation {
    /// Line number where the error occurred
    line: usize,
    /// Column number where the error occurred
    column: usize,
    /// Length of the highlighted range in characters
    length: usize,
    /// The source line, re-indented so that `column` points into it
    line_source: String,
}

impl ErrorLocation {
    /// Creates an error location that highlights a whole normalized line.
    ///
    /// Normalized lines are trimmed, so the leading indentation is restored
    /// from the origin's column to keep the highlight aligned.
    #[must_use]
    pub fn from_origin(origin: &Origin, text: &str) -> Self {
        let indent = " ".repeat(origin.column.saturating_sub(1));
        let line_source = format!("{indent}{text}");
        let length = text.chars().count().max(1);

        Self {
            line: origin.line,
            column: origin.column.max(1),
            length,
            line_source,
        }
    }

    /// Returns the line number where the error occurred
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Returns the column number where the error occurred
    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Returns the length of the highlighted range in characters
    #[must_use]
    pub const fn length(&self) -> usize {
        self.length
    }

    /// Returns the source line content where the error occurred
    #[must_use]
    pub fn line_source(&self) -> &str {
        &self.line_source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::UnitName;

    #[test]
    fn from_origin_restores_indentation() {
        let origin = Origin::new(UnitName::new("main.z"), 4, 5);
        let location = ErrorLocation::from_origin(&origin, "<bogus>");

        assert_eq!(location.line(), 4);
        assert_eq!(location.column(), 5);
        assert_eq!(location.length(), 7);
        assert_eq!(location.line_source(), "    <bogus>");
    }

    #[test]
    fn from_origin_empty_text_highlights_one_character() {
        let origin = Origin::new(UnitName::new("main.z"), 1, 1);
        let location = ErrorLocation::from_origin(&origin, "");

        assert_eq!(location.length(), 1);
    }
}
