//! The line compiler.
//!
//! Compilation is a single forward pass. The only state carried between lines
//! is whether an addon passthrough block is open, and of which kind. Inside a
//! block every line is emitted as written; outside, every line is matched and
//! translated on its own.

use zlang_parser::{AddonKind, Directive, DirectiveKind, match_in_addon};
use zlang_shared::{SourceLine, UnitName, source};

use crate::{
    config::{Config, UnrecognizedPolicy},
    emit::emit,
    error::{CompileError, UnrecognizedDirective},
};

/// Compiles fully expanded lines into JavaScript.
///
/// The output has one line per emitting directive, joined with `\n`, with a
/// trailing newline when non-empty. Brackets opened by `if`, `for` and `while`
/// are not checked against their closers.
///
/// # Errors
///
/// Under [`UnrecognizedPolicy::Strict`], returns
/// [`CompileError::UnrecognizedDirective`] for the first line with no
/// translation.
pub fn compile(lines: &[SourceLine], config: &Config) -> Result<String, CompileError> {
    let mut output = Vec::with_capacity(lines.len());
    let mut addon: Option<AddonKind> = None;

    for (index, line) in lines.iter().enumerate() {
        let directive = match_in_addon(line.text(), addon);

        if let Directive::AddonEnter(kind) = directive {
            addon = Some(kind);
            continue;
        }

        if let Directive::AddonExit(_) = directive {
            addon = None;
            continue;
        }

        let js = match emit(&directive) {
            Some(js) => js,
            None => unrecognized(line, index + 1, directive.kind(), config)?,
        };
        output.push(js);
    }

    if let Some(kind) = addon {
        tracing::debug!(?kind, "addon block still open at end of input");
    }

    let mut code = output.join("\n");
    if !code.is_empty() {
        code.push('\n');
    }

    Ok(code)
}

/// Compiles the lines of an entry unit, wrapping the output in an immediately
/// invoked function labelled with the entry name when
/// [`Config::wrap_in_closure`] is set.
///
/// # Errors
///
/// See [`compile`].
pub fn compile_entry(
    entry: &UnitName,
    lines: &[SourceLine],
    config: &Config,
) -> Result<String, CompileError> {
    let code = compile(lines, config)?;

    if config.wrap_in_closure {
        Ok(wrap_in_closure(entry, &code))
    } else {
        Ok(code)
    }
}

/// Normalizes raw text and compiles it as an entry unit.
///
/// The text must not contain imports or macros.
///
/// # Errors
///
/// See [`compile`].
pub fn compile_text(unit: &UnitName, text: &str, config: &Config) -> Result<String, CompileError> {
    compile_entry(unit, &source::normalize(unit, text), config)
}

/// Wraps compiled code in `(function() { ... })();`.
#[must_use]
pub fn wrap_in_closure(entry: &UnitName, code: &str) -> String {
    format!("(function() {{ // {entry}\n{code}}})(); // {entry}\n")
}

fn unrecognized(
    line: &SourceLine,
    position: usize,
    kind: DirectiveKind,
    config: &Config,
) -> Result<String, CompileError> {
    match config.policy {
        UnrecognizedPolicy::Strict => {
            Err(UnrecognizedDirective::new(line.clone(), position, kind).into())
        }
        UnrecognizedPolicy::Lenient => {
            tracing::warn!(
                at = %line.origin(),
                %kind,
                line = line.text(),
                "emitting unrecognized line as a comment"
            );
            Ok(format!("// error: {}", line.text()))
        }
    }
}
