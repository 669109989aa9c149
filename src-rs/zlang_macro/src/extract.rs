//! Extraction of macro definition blocks.
//!
//! A definition block looks like this:
//!
//! ```text
//! <command^crt>
//! greet(name, msg)
//! <print^set.incode="name + msg">
//! <cmd^add>
//! ```
//!
//! The line after the opening sentinel is the signature, and every line up to
//! the terminator is the body. Blocks are removed from the stream; everything
//! else is forwarded in order, except comments, which produce no code.
//! Lines inside an addon passthrough block are forwarded as written, comments
//! included, and never open a definition block.

use zlang_parser::{AddonKind, Directive, match_in_addon, parse_signature};
use zlang_shared::{Origin, SourceLine, UnitName, source};

use crate::table::{MacroDefinition, MacroTable};

/// A signature that parsed, waiting for its body.
struct Signature {
    name: String,
    parameters: Vec<String>,
    origin: Origin,
}

enum State {
    Outside,
    /// Just saw `<command^crt>`; the next line is the signature.
    AwaitingSignature { opened_at: Origin },
    /// Inside a block. `signature` is `None` when the signature was malformed
    /// and the block will be dropped.
    InBlock {
        signature: Option<Signature>,
        body: Vec<String>,
    },
}

/// Removes macro definition blocks from `lines` and collects them in a table.
///
/// Returns the table and the residual lines. A block whose signature is
/// malformed is dropped along with its body. A block that is still open at
/// the end of the input is closed there.
#[must_use]
pub fn extract_macros(lines: &[SourceLine]) -> (MacroTable, Vec<SourceLine>) {
    let mut table = MacroTable::new();
    let mut residual = Vec::new();
    let mut state = State::Outside;
    // only ever set while outside a definition block
    let mut addon: Option<AddonKind> = None;

    for line in lines {
        let directive = match_in_addon(line.text(), addon);

        state = match state {
            State::Outside => {
                if directive == Directive::MacroStart {
                    State::AwaitingSignature {
                        opened_at: line.origin().clone(),
                    }
                } else {
                    if let Directive::AddonEnter(kind) = directive {
                        addon = Some(kind);
                    } else if let Directive::AddonExit(_) = directive {
                        addon = None;
                    }

                    if !matches!(directive, Directive::Comment(_)) {
                        residual.push(line.clone());
                    }
                    State::Outside
                }
            }

            State::AwaitingSignature { opened_at } => {
                if directive == Directive::MacroEnd {
                    tracing::warn!(at = %opened_at, "dropping macro block without a signature");
                    State::Outside
                } else {
                    State::InBlock {
                        signature: read_signature(line),
                        body: Vec::new(),
                    }
                }
            }

            State::InBlock {
                signature,
                mut body,
            } => {
                if directive == Directive::MacroEnd {
                    register(&mut table, signature, body);
                    State::Outside
                } else {
                    // a lone `}` right after the signature closes nothing
                    let is_inert_brace = body.is_empty() && line.text() == "}";
                    if !is_inert_brace {
                        body.push(line.text().to_string());
                    }
                    State::InBlock { signature, body }
                }
            }
        };
    }

    match state {
        State::Outside => {}
        State::AwaitingSignature { opened_at } => {
            tracing::warn!(at = %opened_at, "dropping macro block without a signature");
        }
        State::InBlock { signature, body } => {
            if let Some(signature) = &signature {
                tracing::warn!(
                    name = %signature.name,
                    at = %signature.origin,
                    "macro block is not terminated, closing it at end of input"
                );
            }
            register(&mut table, signature, body);
        }
    }

    (table, residual)
}

/// Normalizes raw unit text, then extracts its macros.
#[must_use]
pub fn extract_macros_from_text(unit: &UnitName, text: &str) -> (MacroTable, Vec<SourceLine>) {
    extract_macros(&source::normalize(unit, text))
}

fn read_signature(line: &SourceLine) -> Option<Signature> {
    let Some((name, parameters)) = parse_signature(line.text()) else {
        tracing::warn!(
            at = %line.origin(),
            line = line.text(),
            "malformed macro signature, dropping block"
        );
        return None;
    };

    Some(Signature {
        name: name.to_string(),
        parameters: parameters.into_iter().map(str::to_string).collect(),
        origin: line.origin().clone(),
    })
}

fn register(table: &mut MacroTable, signature: Option<Signature>, body: Vec<String>) {
    let Some(Signature {
        name,
        parameters,
        origin,
    }) = signature
    else {
        return;
    };

    tracing::debug!(name = %name, parameters = parameters.len(), lines = body.len(), "registered macro");

    let definition = MacroDefinition::new(name, parameters, body, origin);
    if let Some(previous) = table.insert(definition) {
        tracing::debug!(
            name = previous.name(),
            previous = %previous.origin(),
            "macro redefined, later definition wins"
        );
    }
}
