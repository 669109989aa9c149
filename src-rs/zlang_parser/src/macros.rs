//! Parsers for macro signatures and call sites.
//!
//! A signature is the line following `<command^crt>`, shaped like
//! `name(p1, p2)`. A call site is any line shaped like `name(arg1, arg2)`.
//! Neither supports nested parentheses in the parameter list; call arguments
//! are opaque text split by [`split_arguments`].

use nom::{
    Parser as _,
    bytes::complete::is_not,
    character::complete::{char, space0},
    combinator::opt,
};

use crate::token::{Result, identifier};

/// Parses `name(` ... `)` where the closing parenthesis ends the line.
///
/// Returns the name and the unsplit text between the parentheses.
pub fn call(input: &str) -> Result<'_, (&str, &str)> {
    let (rest, (name, _, _)) = (identifier, space0, char('(')).parse(input)?;

    match rest.strip_suffix(')') {
        Some(arguments) => Ok(("", (name, arguments))),
        None => Err(nom::Err::Error(nom::error::Error::new(
            rest,
            nom::error::ErrorKind::Char,
        ))),
    }
}

fn signature(input: &str) -> Result<'_, (&str, Option<&str>)> {
    let (rest, (name, _, _, parameters, _, _, _)) = (
        identifier,
        space0,
        char('('),
        opt(is_not("()")),
        char(')'),
        space0,
        opt(char('{')),
    )
        .parse(input)?;

    Ok((rest, (name, parameters)))
}

/// Parses a macro signature line such as `greet(name, msg)`.
///
/// A trailing `{` is allowed. Parameters are split on commas and trimmed;
/// empty entries are dropped. Returns `None` if the line is not a signature.
#[must_use]
pub fn parse_signature(line: &str) -> Option<(&str, Vec<&str>)> {
    let (rest, (name, parameters)) = signature(line).ok()?;
    if !rest.is_empty() {
        return None;
    }

    let parameters = parameters
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|parameter| !parameter.is_empty())
        .collect();

    Some((name, parameters))
}

/// Parses a call site such as `greet("a,b", c)`.
///
/// Returns the macro name and its arguments, split with
/// [`split_arguments`]. Returns `None` if the line is not call-shaped.
#[must_use]
pub fn parse_call(line: &str) -> Option<(&str, Vec<&str>)> {
    let (_rest, (name, arguments)) = call(line).ok()?;
    Some((name, split_arguments(arguments)))
}

/// Splits call arguments on commas that are outside double quotes.
///
/// A comma separates two arguments only when the number of `"` characters
/// after it, up to the end of the text, is even. Arguments are trimmed but
/// otherwise kept verbatim, quotes included. Blank text has no arguments.
#[must_use]
pub fn split_arguments(text: &str) -> Vec<&str> {
    if text.trim().is_empty() {
        return vec![];
    }

    let total_quotes = text.matches('"').count();
    let mut quotes_seen = 0;
    let mut start = 0;
    let mut arguments = vec![];

    for (index, c) in text.char_indices() {
        match c {
            '"' => quotes_seen += 1,
            ',' if (total_quotes - quotes_seen) % 2 == 0 => {
                arguments.push(text[start..index].trim());
                start = index + c.len_utf8();
            }
            _ => {}
        }
    }

    arguments.push(text[start..].trim());
    arguments
}
