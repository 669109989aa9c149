//! Shared utilities for the Z compiler
//!
//! Every stage of the pipeline speaks in terms of the types defined here:
//! source units and the lines taken from them, the file set that maps unit
//! names to text, and the unified error representation used for reporting.

pub mod error;
pub mod source;

pub use error::{AsZlangError, Context, ErrorLocation, ZlangError};
pub use source::{FileSet, Origin, SourceLine, UnitName};
