//! Macro definitions and the table that holds them.

use std::fmt;

use indexmap::IndexMap;
use zlang_shared::Origin;

/// A named, parameterized line template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroDefinition {
    name: String,
    parameters: Vec<String>,
    body: Vec<String>,
    origin: Origin,
}

impl MacroDefinition {
    /// Creates a new macro definition.
    ///
    /// `origin` is where the signature line was read from.
    #[must_use]
    pub const fn new(name: String, parameters: Vec<String>, body: Vec<String>, origin: Origin) -> Self {
        Self {
            name,
            parameters,
            body,
            origin,
        }
    }

    /// Returns the macro name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the placeholder tokens, in positional order.
    #[must_use]
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Returns the template lines.
    #[must_use]
    pub fn body(&self) -> &[String] {
        &self.body
    }

    /// Returns where the signature line was read from.
    #[must_use]
    pub const fn origin(&self) -> &Origin {
        &self.origin
    }
}

impl fmt::Display for MacroDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.parameters.join(", "))
    }
}

/// All macros defined during a run, keyed by name.
///
/// Redefining a name replaces the earlier definition but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroTable {
    macros: IndexMap<String, MacroDefinition>,
}

impl MacroTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a definition, returning the one it replaced, if any.
    pub fn insert(&mut self, definition: MacroDefinition) -> Option<MacroDefinition> {
        self.macros.insert(definition.name.clone(), definition)
    }

    /// Returns the definition with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MacroDefinition> {
        self.macros.get(name)
    }

    /// Returns `true` if a macro with the given name is defined.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.macros.contains_key(name)
    }

    /// Returns the definitions in the order their names were first defined.
    pub fn iter(&self) -> impl Iterator<Item = &MacroDefinition> {
        self.macros.values()
    }

    /// Returns the number of macros.
    #[must_use]
    pub fn len(&self) -> usize {
        self.macros.len()
    }

    /// Returns `true` if no macros are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use zlang_shared::UnitName;

    use super::*;

    fn definition(name: &str, body: &str, line: usize) -> MacroDefinition {
        MacroDefinition::new(
            name.to_string(),
            vec!["x".to_string()],
            vec![body.to_string()],
            Origin::new(UnitName::new("main.z"), line, 1),
        )
    }

    #[test]
    fn last_definition_wins() {
        let mut table = MacroTable::new();
        assert!(table.insert(definition("show", "first", 2)).is_none());
        assert!(table.insert(definition("other", "other", 5)).is_none());

        let replaced = table
            .insert(definition("show", "second", 9))
            .expect("first definition should be replaced");

        assert_eq!(replaced.body(), &["first".to_string()]);
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get("show").map(MacroDefinition::body),
            Some(&["second".to_string()][..])
        );
    }

    #[test]
    fn redefinition_keeps_first_position() {
        let mut table = MacroTable::new();
        table.insert(definition("a", "1", 1));
        table.insert(definition("b", "2", 2));
        table.insert(definition("a", "3", 3));

        let names: Vec<_> = table.iter().map(MacroDefinition::name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn display_shows_signature() {
        let definition = MacroDefinition::new(
            "greet".to_string(),
            vec!["name".to_string(), "msg".to_string()],
            vec![],
            Origin::new(UnitName::new("main.z"), 1, 1),
        );

        assert_eq!(definition.to_string(), "greet(name, msg)");
    }
}
