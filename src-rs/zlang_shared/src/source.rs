//! Source units, file sets, and normalized lines
//!
//! A Z program is a set of named source units. Before any stage of the
//! pipeline looks at a unit, its text is normalized into [`SourceLine`]s:
//! each physical line is trimmed, blank lines are dropped, and every
//! surviving line remembers where it came from.

use std::fmt;

use indexmap::IndexMap;

/// The file extension used by Z source units.
pub const UNIT_EXTENSION: &str = ".z";

/// The name of a source unit, such as `main.z`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitName(String);

impl UnitName {
    /// Creates a new unit name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the unit name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UnitName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for UnitName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Where a line came from.
///
/// Line and column numbers are 1-indexed. The column is the position of the
/// first non-blank character of the raw line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Origin {
    /// The unit the line was read from
    pub unit: UnitName,
    /// The line number within the unit
    pub line: usize,
    /// The column of the first non-blank character
    pub column: usize,
}

impl Origin {
    /// Creates a new origin.
    #[must_use]
    pub const fn new(unit: UnitName, line: usize, column: usize) -> Self {
        Self { unit, line, column }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.unit, self.line, self.column)
    }
}

/// A trimmed, non-empty line together with its origin.
///
/// Lines produced by macro expansion keep the origin of their call site and
/// remember the macro they were instantiated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    text: String,
    origin: Origin,
    expanded_from: Option<String>,
}

impl SourceLine {
    /// Creates a new source line.
    ///
    /// The text is expected to already be trimmed.
    #[must_use]
    pub fn new(text: impl Into<String>, origin: Origin) -> Self {
        Self {
            text: text.into(),
            origin,
            expanded_from: None,
        }
    }

    /// Returns the text of the line.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns where the line came from.
    #[must_use]
    pub const fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Returns the name of the macro this line was expanded from, if any.
    #[must_use]
    pub fn expanded_from(&self) -> Option<&str> {
        self.expanded_from.as_deref()
    }

    /// Returns a copy of this line with different text but the same origin.
    #[must_use]
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: self.origin.clone(),
            expanded_from: self.expanded_from.clone(),
        }
    }

    /// Returns a line instantiated from `macro_name` at this call site.
    #[must_use]
    pub fn expanded(&self, text: impl Into<String>, macro_name: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: self.origin.clone(),
            expanded_from: Some(macro_name.into()),
        }
    }
}

/// Splits unit text into trimmed, non-empty lines.
#[must_use]
pub fn normalize(unit: &UnitName, text: &str) -> Vec<SourceLine> {
    text.lines()
        .enumerate()
        .filter_map(|(index, raw)| {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return None;
            }

            let leading = raw.chars().count() - raw.trim_start().chars().count();
            let origin = Origin::new(unit.clone(), index + 1, leading + 1);

            Some(SourceLine::new(trimmed, origin))
        })
        .collect()
}

/// Joins lines back into text, one line per line, with a trailing newline.
#[must_use]
pub fn join_lines(lines: &[SourceLine]) -> String {
    lines.iter().fold(String::new(), |mut text, line| {
        text.push_str(line.text());
        text.push('\n');
        text
    })
}

/// A set of source units keyed by unit name.
///
/// A file set is provided wholesale before a compilation run and is never
/// modified by the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    units: IndexMap<UnitName, String>,
}

impl FileSet {
    /// Creates an empty file set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a unit, returning the previous text if the name was taken.
    pub fn insert(&mut self, name: impl Into<UnitName>, text: impl Into<String>) -> Option<String> {
        self.units.insert(name.into(), text.into())
    }

    /// Returns the text of a unit.
    #[must_use]
    pub fn get(&self, name: &UnitName) -> Option<&str> {
        self.units.get(name).map(String::as_str)
    }

    /// Resolves a requested unit name to the name of a unit in the set.
    ///
    /// The exact name is tried first, then the name without its `.z`
    /// extension, then the name with `.z` appended.
    #[must_use]
    pub fn resolve(&self, requested: &str) -> Option<UnitName> {
        let exact = UnitName::new(requested);
        if self.units.contains_key(&exact) {
            return Some(exact);
        }

        let candidate = requested.strip_suffix(UNIT_EXTENSION).map_or_else(
            || UnitName::new(format!("{requested}{UNIT_EXTENSION}")),
            UnitName::new,
        );

        self.units.contains_key(&candidate).then_some(candidate)
    }

    /// Returns the names of all units, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &UnitName> {
        self.units.keys()
    }

    /// Returns the number of units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns `true` if the set has no units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FileSet
where
    K: Into<UnitName>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let units = iter
            .into_iter()
            .map(|(name, text)| (name.into(), text.into()))
            .collect();

        Self { units }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_drops_blank_lines() {
        let unit = UnitName::new("main.z");
        let lines = normalize(&unit, "  <end^if>\n\n\t<else^set>  \r\n   \n");

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "<end^if>");
        assert_eq!(lines[0].origin(), &Origin::new(unit.clone(), 1, 3));
        assert_eq!(lines[1].text(), "<else^set>");
        assert_eq!(lines[1].origin(), &Origin::new(unit, 3, 2));
    }

    #[test]
    fn join_lines_adds_trailing_newline() {
        let unit = UnitName::new("main.z");
        let lines = normalize(&unit, "a\nb");

        assert_eq!(join_lines(&lines), "a\nb\n");
        assert_eq!(join_lines(&[]), "");
    }

    #[test]
    fn expanded_line_keeps_call_site_and_names_macro() {
        let unit = UnitName::new("main.z");
        let call = &normalize(&unit, "\n  greet(1)")[0];

        let line = call.expanded("<set^x = 1>", "greet");

        assert_eq!(line.origin(), call.origin());
        assert_eq!(line.expanded_from(), Some("greet"));
        assert_eq!(call.expanded_from(), None);
        assert_eq!(line.with_text("<end^if>").expanded_from(), Some("greet"));
    }

    #[test]
    fn resolve_exact_name() {
        let files = FileSet::from_iter([("lib.z", ""), ("lib", "")]);

        assert_eq!(files.resolve("lib.z"), Some(UnitName::new("lib.z")));
        assert_eq!(files.resolve("lib"), Some(UnitName::new("lib")));
    }

    #[test]
    fn resolve_without_extension() {
        let files = FileSet::from_iter([("B", "")]);

        assert_eq!(files.resolve("B.z"), Some(UnitName::new("B")));
    }

    #[test]
    fn resolve_with_extension() {
        let files = FileSet::from_iter([("main.z", "")]);

        assert_eq!(files.resolve("main"), Some(UnitName::new("main.z")));
    }

    #[test]
    fn resolve_missing_unit() {
        let files = FileSet::from_iter([("main.z", "")]);

        assert_eq!(files.resolve("other.z"), None);
    }

    #[test]
    fn insert_replaces_existing_text() {
        let mut files = FileSet::new();

        assert_eq!(files.insert("main.z", "one"), None);
        assert_eq!(files.insert("main.z", "two"), Some("one".to_string()));
        assert_eq!(files.get(&UnitName::new("main.z")), Some("two"));
        assert_eq!(files.len(), 1);
    }
}
