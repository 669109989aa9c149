//! The Z compiler
//!
//! Z is a small line-oriented scripting notation that compiles to
//! JavaScript. Compiling a project runs three stages over its units:
//!
//! 1. **Bundling** ([`zlang_bundler`]) inlines imports, starting from the
//!    entry unit, into one flat stream of lines
//! 2. **Macro expansion** ([`zlang_macro`]) collects `<command^crt>` blocks
//!    and expands their call sites until nothing is left to expand
//! 3. **Line compilation** ([`zlang_compiler`]) translates each directive
//!    into one line of JavaScript
//!
//! # Example
//!
//! ```
//! use zlang::compile_project;
//! use zlang_shared::FileSet;
//!
//! let files = FileSet::from_iter([
//!     ("main.z", "<import^z=\"lib.z\">\nhello(\"world\")"),
//!     (
//!         "lib.z",
//!         "<command^crt>\nhello(who)\n<print^set.incode=\"who\">\n<cmd^add>",
//!     ),
//! ]);
//!
//! let code = compile_project("main.z", &files).unwrap();
//! assert_eq!(code, "console.log(\"world\");\n");
//! ```

mod context;
mod error;

use zlang_compiler::{Config, compile};
use zlang_shared::{FileSet, UnitName, source};

pub use crate::{
    context::{CompileContext, Compilation},
    error::PipelineError,
};

/// The unit name given to text compiled with [`compile_flat`].
pub const FLAT_UNIT: &str = "<flat>";

/// Compiles a project from its entry unit with the default configuration.
///
/// # Errors
///
/// Returns the first error of any stage.
pub fn compile_project(entry: &str, files: &FileSet) -> Result<String, PipelineError> {
    compile_project_with(entry, files, &Config::default())
}

/// Compiles a project from its entry unit.
///
/// # Errors
///
/// Returns the first error of any stage.
pub fn compile_project_with(
    entry: &str,
    files: &FileSet,
    config: &Config,
) -> Result<String, PipelineError> {
    let compilation = CompileContext::new(files, *config).run(entry)?;
    Ok(compilation.into_code())
}

/// Compiles text that has already been bundled and expanded.
///
/// The text is compiled as is: imports are not followed and no macros are
/// defined. The output is never wrapped in a closure, since there is no entry
/// unit to label it with.
///
/// # Errors
///
/// Returns a compile error for lines without a translation.
pub fn compile_flat(text: &str, config: &Config) -> Result<String, PipelineError> {
    let lines = source::normalize(&UnitName::new(FLAT_UNIT), text);
    Ok(compile(&lines, config)?)
}
