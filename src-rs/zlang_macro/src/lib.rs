//! Macros for the Z language
//!
//! Z lets a program define its own commands as named line templates:
//!
//! ```text
//! <command^crt>
//! greet(name, msg)
//! <print^set.incode="name + msg">
//! <cmd^add>
//!
//! greet("Hello, ", "world")
//! ```
//!
//! This crate has two halves. [`extract_macros`] removes definition blocks
//! from a line stream and collects them in a [`MacroTable`]. [`expand`] then
//! replaces call sites with instantiated bodies, repeating until nothing is
//! left to expand.

mod error;
mod expand;
mod extract;
mod table;

pub use crate::{
    error::MacroExpansionOverflow,
    expand::{ExpansionLimits, expand},
    extract::{extract_macros, extract_macros_from_text},
    table::{MacroDefinition, MacroTable},
};
