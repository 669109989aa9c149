//! Z Import Bundler
//!
//! This crate flattens a Z project into a single stream of source lines. It
//! starts from an entry unit and replaces every `<import^z="name.z">` line
//! with the bundled contents of the named unit, recursively.
//!
//! # Overview
//!
//! The bundler reads unit text through the [`UnitProvider`] trait, so it never
//! touches the filesystem itself. A [`FileSet`](zlang_shared::FileSet)
//! implements the trait out of the box.
//!
//! Bundling stops at the first error:
//!
//! - **Missing units**: an import (or the entry) names a unit the provider
//!   does not have
//! - **Import cycles**: a unit imports itself, directly or indirectly
//!
//! A unit imported from several places (a diamond) is not a cycle. It is
//! inlined at every import site.
//!
//! # Example
//!
//! ```
//! use zlang_bundler::bundle;
//! use zlang_shared::FileSet;
//!
//! let files = FileSet::from_iter([
//!     ("main.z", "<import^z=\"lib.z\">\n<print^set.index=\"main\">"),
//!     ("lib.z", "<print^set.index=\"lib\">"),
//! ]);
//!
//! let bundle = bundle("main.z", &files).unwrap();
//! assert_eq!(
//!     bundle.to_text(),
//!     "<print^set.index=\"lib\">\n<print^set.index=\"main\">\n"
//! );
//! ```

mod bundle;
mod error;
mod util;

#[cfg(test)]
mod test;

pub use crate::{
    bundle::{Bundle, Bundler, bundle},
    error::{BundleError, ImportCycleError, UnitNotFoundError},
    util::{Stack, UnitProvider},
};
