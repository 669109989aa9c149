//! Utility types and traits for the import bundler.
//!
//! - `UnitProvider` trait: where the bundler gets unit text from
//! - `Stack` type: the active import path, with cycle detection
//!
//! # Cycle Detection
//!
//! The `Stack` tracks the units currently being bundled, from the entry unit
//! down to the unit whose imports are being resolved. A unit that appears twice
//! on that path is an import cycle. Units are popped when their subtree is
//! done, so a unit imported from two sibling branches is not a cycle.

use zlang_shared::{FileSet, UnitName};

/// Trait for providing the text of source units to the bundler.
///
/// The bundler never touches the filesystem; everything it needs has been
/// loaded into a provider before the run starts.
pub trait UnitProvider {
    /// Resolves a unit name as written in an import directive to the name of
    /// a unit the provider knows.
    ///
    /// Returns `None` if no such unit exists.
    fn resolve(&self, requested: &str) -> Option<UnitName>;

    /// Returns the raw text of a resolved unit.
    fn source(&self, unit: &UnitName) -> Option<&str>;
}

impl UnitProvider for FileSet {
    fn resolve(&self, requested: &str) -> Option<UnitName> {
        Self::resolve(self, requested)
    }

    fn source(&self, unit: &UnitName) -> Option<&str> {
        self.get(unit)
    }
}

/// A generic stack implementation with circular dependency detection.
#[derive(Debug, Clone)]
pub struct Stack<T: PartialEq + Clone> {
    items: Vec<T>,
}

impl<T: PartialEq + Clone> Stack<T> {
    /// Creates a new empty stack.
    pub const fn new() -> Self {
        Self { items: vec![] }
    }

    /// Pushes an item onto the top of the stack.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Removes and returns the top item from the stack.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Returns `true` if nothing is on the stack.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on the stack.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Finds a circular dependency starting from the given item.
    ///
    /// If the item is on the stack, returns every item from its first
    /// occurrence to the top of the stack, followed by the item itself.
    pub fn find_circular_dependency(&self, item: &T) -> Option<Vec<T>> {
        let item_index = self.items.iter().position(|i| i == item)?;

        let mut circular_dependency = self.items[item_index..].to_vec();
        circular_dependency.push(item.clone());

        Some(circular_dependency)
    }
}
