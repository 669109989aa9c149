//! Line compiler for the Z language
//!
//! This crate turns a fully bundled and expanded stream of Z directives into
//! JavaScript, one line at a time. Addon blocks
//! (`<addon^index/set^js>` ... `<addon^js>` and the HTML equivalent) are
//! passed through verbatim.
//!
//! # Example
//!
//! ```
//! use zlang_compiler::{Config, compile_text};
//! use zlang_shared::UnitName;
//!
//! let code = compile_text(
//!     &UnitName::new("main.z"),
//!     "<set^x = 1 + 2>\n<print^set.incode=\"x\">",
//!     &Config::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(code, "let x = 1 + 2;\nconsole.log(x);\n");
//! ```

mod compile;
mod config;
mod emit;
mod error;

pub use crate::{
    compile::{compile, compile_entry, compile_text, wrap_in_closure},
    config::{
        Config, DEFAULT_MAX_EXPANDED_LINES, DEFAULT_MAX_EXPANSION_PASSES, UnrecognizedPolicy,
    },
    emit::emit,
    error::{CompileError, UnrecognizedDirective},
};
