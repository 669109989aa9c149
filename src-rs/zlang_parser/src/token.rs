//! Low-level parsers shared by the directive rules and the macro helpers.

use nom::{
    IResult, Parser as _,
    bytes::complete::{is_not, take_while, take_while1},
    character::complete::char,
    combinator::{recognize, verify},
    error::{Error, ErrorKind},
};

/// A result type for parser operations over a single line.
pub type Result<'a, O> = IResult<&'a str, O>;

fn fail<O>(input: &str, kind: ErrorKind) -> Result<'_, O> {
    Err(nom::Err::Error(Error::new(input, kind)))
}

/// Parses an identifier (letter, `_` or `$`, then letters, digits, `_` or `$`).
pub fn identifier(input: &str) -> Result<'_, &str> {
    recognize((
        take_while1(|c: char| c.is_ascii_alphabetic() || c == '_' || c == '$'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '$'),
    ))
    .parse(input)
}

/// Parses a literal attribute value: one or more characters that are not `"`.
pub fn literal(input: &str) -> Result<'_, &str> {
    is_not("\"").parse(input)
}

/// Parses an expression that runs to the `">` closing the line.
///
/// The expression may itself contain quotes; only the final `">` closes it.
pub fn closing_expression(input: &str) -> Result<'_, &str> {
    match input.strip_suffix("\">") {
        Some(expression) if !expression.is_empty() => Ok(("", expression)),
        _ => fail(input, ErrorKind::Verify),
    }
}

/// Parses the right-hand side of an assignment, which runs to the `>`
/// closing the line. The result is trimmed and must not be empty.
pub fn assigned_expression(input: &str) -> Result<'_, &str> {
    match input.strip_suffix('>').map(str::trim) {
        Some(expression) if !expression.is_empty() => Ok(("", expression)),
        _ => fail(input, ErrorKind::Verify),
    }
}

/// Parses a unit name ending in `.z`.
pub fn unit_name(input: &str) -> Result<'_, &str> {
    verify(literal, |name: &str| {
        name.strip_suffix(".z").is_some_and(|stem| !stem.is_empty())
    })
    .parse(input)
}

/// Parses a `property:value` CSS declaration, splitting at the first colon.
pub fn css_declaration(input: &str) -> Result<'_, (&str, &str)> {
    let (rest, (property, _, value)) = (is_not(":\""), char(':'), literal).parse(input)?;
    Ok((rest, (property, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_accepts_js_names() {
        assert_eq!(identifier("foo_1 rest"), Ok((" rest", "foo_1")));
        assert_eq!(identifier("$el"), Ok(("", "$el")));
        assert_eq!(identifier("_x"), Ok(("", "_x")));
    }

    #[test]
    fn identifier_rejects_leading_digit() {
        assert!(identifier("1abc").is_err());
    }

    #[test]
    fn closing_expression_keeps_inner_quotes() {
        assert_eq!(
            closing_expression("\"a\" + b\">"),
            Ok(("", "\"a\" + b"))
        );
    }

    #[test]
    fn closing_expression_rejects_empty_or_unclosed() {
        assert!(closing_expression("\">").is_err());
        assert!(closing_expression("x > 1").is_err());
    }

    #[test]
    fn assigned_expression_is_trimmed() {
        assert_eq!(assigned_expression("1 + 2 >"), Ok(("", "1 + 2")));
        assert!(assigned_expression("  >").is_err());
        assert!(assigned_expression("1 + 2").is_err());
    }

    #[test]
    fn unit_name_requires_extension_and_stem() {
        assert_eq!(unit_name("lib.z\">"), Ok(("\">", "lib.z")));
        assert!(unit_name(".z\">").is_err());
        assert!(unit_name("lib.js\">").is_err());
    }

    #[test]
    fn css_declaration_splits_at_first_colon() {
        assert_eq!(
            css_declaration("background:url(a:b)"),
            Ok(("", ("background", "url(a:b)")))
        );
        assert!(css_declaration(":red").is_err());
    }
}
