//! Fixpoint expansion of macro calls.

use std::cmp::Reverse;

use zlang_parser::{AddonKind, Directive, match_in_addon, parse_call};
use zlang_shared::SourceLine;

use crate::{
    error::MacroExpansionOverflow,
    table::{MacroDefinition, MacroTable},
};

/// Bounds on macro expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionLimits {
    /// The maximum number of passes over the line stream
    pub max_passes: usize,
    /// The maximum number of lines the stream may grow to
    pub max_lines: usize,
}

impl ExpansionLimits {
    /// Creates expansion limits.
    #[must_use]
    pub const fn new(max_passes: usize, max_lines: usize) -> Self {
        Self {
            max_passes,
            max_lines,
        }
    }
}

/// Expands every macro call in `lines` until no calls remain.
///
/// Each pass replaces every call to a known macro with the instantiated body
/// of that macro. Passes repeat until one expands nothing. Lines that are not
/// calls, calls to unknown names, and lines inside addon passthrough blocks
/// are forwarded unchanged.
///
/// # Errors
///
/// Returns [`MacroExpansionOverflow`] if calls to known macros remain after
/// `limits.max_passes` passes, or if an expansion would grow the stream past
/// `limits.max_lines` lines.
pub fn expand(
    lines: &[SourceLine],
    table: &MacroTable,
    limits: ExpansionLimits,
) -> Result<Vec<SourceLine>, MacroExpansionOverflow> {
    let mut lines = lines.to_vec();

    if table.is_empty() {
        return Ok(lines);
    }

    for pass in 1..=limits.max_passes {
        let (expanded_lines, expanded) = expand_pass(&lines, table, pass, limits.max_lines)?;
        if expanded == 0 {
            tracing::debug!(passes = pass - 1, "macro expansion settled");
            return Ok(expanded_lines);
        }

        tracing::debug!(pass, expanded, lines = expanded_lines.len(), "expanded macro calls");
        lines = expanded_lines;
    }

    // the last pass may have expanded the final calls
    let mut addon = None;
    let pending = lines.iter().find_map(|line| {
        let call = find_call(line, table, addon);
        track_addon(&mut addon, line.text());
        call.map(|(definition, _)| (definition.name(), line))
    });

    match pending {
        None => Ok(lines),
        Some((name, call_site)) => Err(MacroExpansionOverflow::new(
            name,
            limits.max_passes,
            call_site.clone(),
        )),
    }
}

/// Runs one pass over the stream, returning the new stream and the number of
/// calls expanded.
fn expand_pass(
    lines: &[SourceLine],
    table: &MacroTable,
    pass: usize,
    max_lines: usize,
) -> Result<(Vec<SourceLine>, usize), MacroExpansionOverflow> {
    let mut output = Vec::with_capacity(lines.len());
    let mut expanded = 0;
    let mut addon = None;

    for (index, line) in lines.iter().enumerate() {
        let Some((definition, arguments)) = find_call(line, table, addon) else {
            track_addon(&mut addon, line.text());
            output.push(line.clone());
            continue;
        };

        let instantiated: Vec<SourceLine> = definition
            .body()
            .iter()
            .filter_map(|template| {
                let text = instantiate(template, definition.parameters(), &arguments);
                let text = text.trim();
                (!text.is_empty()).then(|| line.expanded(text, definition.name()))
            })
            .collect();

        let remaining = lines.len() - index - 1;
        if output.len() + instantiated.len() + remaining > max_lines {
            return Err(MacroExpansionOverflow::too_many_lines(
                definition.name(),
                pass,
                max_lines,
                line.clone(),
            ));
        }

        for instantiated_line in &instantiated {
            track_addon(&mut addon, instantiated_line.text());
        }

        expanded += 1;
        output.extend(instantiated);
    }

    Ok((output, expanded))
}

/// Returns the definition and arguments if `line` calls a known macro.
///
/// Nothing inside an open addon block is a call.
fn find_call<'l, 't>(
    line: &'l SourceLine,
    table: &'t MacroTable,
    addon: Option<AddonKind>,
) -> Option<(&'t MacroDefinition, Vec<&'l str>)> {
    if addon.is_some() {
        return None;
    }

    let (name, arguments) = parse_call(line.text())?;
    let definition = table.get(name)?;
    Some((definition, arguments))
}

/// Follows addon block sentinels through the stream.
fn track_addon(addon: &mut Option<AddonKind>, line: &str) {
    let directive = match_in_addon(line, *addon);
    if let Directive::AddonEnter(kind) = directive {
        *addon = Some(kind);
    } else if let Directive::AddonExit(_) = directive {
        *addon = None;
    }
}

/// Substitutes arguments for parameters in a single template line.
///
/// The template is scanned once, left to right. At each position the longest
/// matching parameter is replaced by its positional argument, and scanning
/// resumes after it, so substituted text is never rescanned. A parameter
/// without an argument is left as written.
fn instantiate(template: &str, parameters: &[String], arguments: &[&str]) -> String {
    let mut order: Vec<usize> = (0..parameters.len()).collect();
    order.sort_by_key(|&index| Reverse(parameters[index].len()));

    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    'scan: while let Some(c) = rest.chars().next() {
        for &index in &order {
            let parameter = parameters[index].as_str();
            if let Some(after) = rest.strip_prefix(parameter) {
                output.push_str(arguments.get(index).copied().unwrap_or(parameter));
                rest = after;
                continue 'scan;
            }
        }

        output.push(c);
        rest = &rest[c.len_utf8()..];
    }

    output
}
