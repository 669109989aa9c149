//! Directive matcher for the Z language
//!
//! Z source is line-atomic: every normalized line is exactly one directive.
//! This crate maps a single line to a [`Directive`] and its captured fields,
//! and provides the helpers the macro subsystem uses to read definition
//! signatures and call sites.
//!
//! Matching is driven by the ordered rule table [`RULES`]. The first rule
//! whose parser consumes the whole line wins; a line that no rule accepts is
//! [`Directive::Unrecognized`].

mod directive;
mod macros;
mod rules;
mod token;

pub use directive::{AddonKind, Directive, DirectiveKind};
pub use macros::{parse_call, parse_signature, split_arguments};
pub use rules::{RULES, Rule, match_directive, match_in_addon};
