//! Test utilities for the bundler.
//!
//! `TestProvider` implements `UnitProvider` over an in-memory map and counts
//! how many times unit text is read, so tests can observe the per-run cache.

use std::{cell::Cell, collections::HashMap};

use zlang_shared::UnitName;

use crate::UnitProvider;

/// A unit provider backed by a map of unit names to text.
///
/// Unlike `FileSet`, names resolve only as written or with `.z` appended.
pub struct TestProvider {
    units: HashMap<UnitName, String>,
    reads: Cell<usize>,
}

impl TestProvider {
    /// Creates a provider holding the given units.
    pub fn new<'a>(units: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            units: units
                .into_iter()
                .map(|(name, text)| (UnitName::new(name), text.to_string()))
                .collect(),
            reads: Cell::new(0),
        }
    }

    /// Creates a provider with no units.
    pub fn empty() -> Self {
        Self {
            units: HashMap::new(),
            reads: Cell::new(0),
        }
    }

    /// Returns the number of times unit text has been read.
    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl UnitProvider for TestProvider {
    fn resolve(&self, requested: &str) -> Option<UnitName> {
        [requested.to_string(), format!("{requested}.z")]
            .into_iter()
            .map(UnitName::new)
            .find(|name| self.units.contains_key(name))
    }

    fn source(&self, unit: &UnitName) -> Option<&str> {
        let text = self.units.get(unit)?;
        self.reads.set(self.reads.get() + 1);
        Some(text)
    }
}
