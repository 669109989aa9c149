//! The ordered directive rule table.
//!
//! Rules are tried top to bottom and the first rule whose parser consumes the
//! whole line wins. The order matters wherever two directives share a shape:
//! the error forms come before the print forms since both are `^set` lines
//! that differ only by keyword, and the addon sentinels come first because
//! they match on a line prefix rather than the whole line.

use nom::{
    Parser as _,
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, space0},
    combinator::{rest, value},
};

use crate::{
    directive::{AddonKind, Directive, DirectiveKind},
    macros::call,
    token::{
        Result, assigned_expression, closing_expression, css_declaration, identifier, literal,
        unit_name,
    },
};

/// One entry of the rule table.
#[derive(Clone, Copy)]
pub struct Rule {
    kind: DirectiveKind,
    parse: for<'a> fn(&'a str) -> Result<'a, Directive<'a>>,
}

impl Rule {
    /// Returns the kind of directive this rule recognizes.
    #[must_use]
    pub const fn kind(&self) -> DirectiveKind {
        self.kind
    }

    /// Attempts to match the whole line against this rule.
    #[must_use]
    pub fn apply<'a>(&self, line: &'a str) -> Option<Directive<'a>> {
        match (self.parse)(line) {
            Ok((rest, directive)) if rest.is_empty() => Some(directive),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("kind", &self.kind).finish()
    }
}

const fn rule(kind: DirectiveKind, parse: for<'a> fn(&'a str) -> Result<'a, Directive<'a>>) -> Rule {
    Rule { kind, parse }
}

/// The directive rules, in priority order.
pub const RULES: &[Rule] = &[
    rule(DirectiveKind::AddonEnter, addon_enter),
    rule(DirectiveKind::AddonExit, addon_exit),
    rule(DirectiveKind::MacroStart, macro_start),
    rule(DirectiveKind::MacroEnd, macro_end),
    rule(DirectiveKind::ErrorLiteral, error_literal),
    rule(DirectiveKind::ErrorExpr, error_expr),
    rule(DirectiveKind::PrintLiteral, print_literal),
    rule(DirectiveKind::PrintExpr, print_expr),
    rule(DirectiveKind::Alert, alert),
    rule(DirectiveKind::Prompt, prompt),
    rule(DirectiveKind::Style, style),
    rule(DirectiveKind::Assign, assign),
    rule(DirectiveKind::If, if_open),
    rule(DirectiveKind::ElseIf, else_if),
    rule(DirectiveKind::Else, else_branch),
    rule(DirectiveKind::EndIf, end_if),
    rule(DirectiveKind::For, for_open),
    rule(DirectiveKind::While, while_open),
    rule(DirectiveKind::EndLoop, end_loop),
    rule(DirectiveKind::Import, import),
    rule(DirectiveKind::Comment, comment),
    rule(DirectiveKind::MacroCall, macro_call),
];

/// Matches a normalized line against the rule table.
///
/// Returns [`Directive::Unrecognized`] when no rule accepts the whole line.
#[must_use]
pub fn match_directive(line: &str) -> Directive<'_> {
    RULES
        .iter()
        .find_map(|rule| rule.apply(line))
        .unwrap_or(Directive::Unrecognized)
}

/// Matches a line that may sit inside an addon passthrough block.
///
/// `addon` is the kind of the open block, if any. Inside a block, only the
/// sentinels of that block's kind keep their meaning; every other line,
/// including the other kind's sentinels, is [`Directive::AddonRaw`].
#[must_use]
pub fn match_in_addon(line: &str, addon: Option<AddonKind>) -> Directive<'_> {
    let directive = match_directive(line);

    let Some(active) = addon else {
        return directive;
    };

    let is_own_sentinel = matches!(
        directive,
        Directive::AddonEnter(kind) | Directive::AddonExit(kind) if kind == active
    );

    if is_own_sentinel {
        directive
    } else {
        Directive::AddonRaw(line)
    }
}

fn addon_enter(input: &str) -> Result<'_, Directive<'_>> {
    alt((
        value(AddonKind::Js, (tag(AddonKind::Js.enter_sentinel()), rest)),
        value(AddonKind::Html, (tag(AddonKind::Html.enter_sentinel()), rest)),
    ))
    .map(Directive::AddonEnter)
    .parse(input)
}

fn addon_exit(input: &str) -> Result<'_, Directive<'_>> {
    alt((
        value(AddonKind::Js, (tag(AddonKind::Js.exit_sentinel()), rest)),
        value(AddonKind::Html, (tag(AddonKind::Html.exit_sentinel()), rest)),
    ))
    .map(Directive::AddonExit)
    .parse(input)
}

fn macro_start(input: &str) -> Result<'_, Directive<'_>> {
    value(Directive::MacroStart, tag("<command^crt>")).parse(input)
}

fn macro_end(input: &str) -> Result<'_, Directive<'_>> {
    value(Directive::MacroEnd, tag("<cmd^add>")).parse(input)
}

/// `<keyword^set.index="literal">`
fn set_index<'a>(keyword: &'static str, input: &'a str) -> Result<'a, &'a str> {
    let (rest, (_, _, text, _)) =
        (tag(keyword), tag("^set.index=\""), literal, tag("\">")).parse(input)?;
    Ok((rest, text))
}

/// `<keyword^set.incode="expr">`
fn set_incode<'a>(keyword: &'static str, input: &'a str) -> Result<'a, &'a str> {
    let (rest, (_, _, expression)) =
        (tag(keyword), tag("^set.incode=\""), closing_expression).parse(input)?;
    Ok((rest, expression))
}

fn error_literal(input: &str) -> Result<'_, Directive<'_>> {
    let (rest, text) = set_index("<error", input)?;
    Ok((rest, Directive::ErrorLiteral(text)))
}

fn error_expr(input: &str) -> Result<'_, Directive<'_>> {
    let (rest, expression) = set_incode("<error", input)?;
    Ok((rest, Directive::ErrorExpr(expression)))
}

fn print_literal(input: &str) -> Result<'_, Directive<'_>> {
    let (rest, text) = set_index("<print", input)?;
    Ok((rest, Directive::PrintLiteral(text)))
}

fn print_expr(input: &str) -> Result<'_, Directive<'_>> {
    let (rest, expression) = set_incode("<print", input)?;
    Ok((rest, Directive::PrintExpr(expression)))
}

fn alert(input: &str) -> Result<'_, Directive<'_>> {
    let (rest, (_, text, _)) = (tag("<alert^class=\""), literal, tag("\">")).parse(input)?;
    Ok((rest, Directive::Alert(text)))
}

fn prompt(input: &str) -> Result<'_, Directive<'_>> {
    let (rest, (_, variable, _, _, _, title, _)) = (
        tag("<prompt^set.index=\""),
        identifier,
        tag("\"&"),
        alt((tag("title"), tag("başlık"))),
        tag("=\""),
        literal,
        tag("\">"),
    )
        .parse(input)?;

    Ok((rest, Directive::Prompt { variable, title }))
}

fn style(input: &str) -> Result<'_, Directive<'_>> {
    let (rest, (_, selector, _, (property, value), _)) = (
        tag("<ui.e^selector=\""),
        literal,
        tag("\"&css=\""),
        css_declaration,
        tag("\">"),
    )
        .parse(input)?;

    Ok((
        rest,
        Directive::Style {
            selector,
            property,
            value,
        },
    ))
}

fn assign(input: &str) -> Result<'_, Directive<'_>> {
    let (rest, (_, variable, _, _, _, expression)) = (
        tag("<set^"),
        identifier,
        space0,
        char('='),
        space0,
        assigned_expression,
    )
        .parse(input)?;

    Ok((
        rest,
        Directive::Assign {
            variable,
            expression,
        },
    ))
}

fn if_open(input: &str) -> Result<'_, Directive<'_>> {
    let (rest, expression) = set_incode("<if", input)?;
    Ok((rest, Directive::If(expression)))
}

fn else_if(input: &str) -> Result<'_, Directive<'_>> {
    let (rest, expression) = set_incode("<else^if", input)?;
    Ok((rest, Directive::ElseIf(expression)))
}

fn else_branch(input: &str) -> Result<'_, Directive<'_>> {
    value(Directive::Else, tag("<else^set>")).parse(input)
}

fn end_if(input: &str) -> Result<'_, Directive<'_>> {
    value(Directive::EndIf, tag("<end^if>")).parse(input)
}

fn for_open(input: &str) -> Result<'_, Directive<'_>> {
    let (rest, expression) = set_incode("<for", input)?;
    Ok((rest, Directive::For(expression)))
}

fn while_open(input: &str) -> Result<'_, Directive<'_>> {
    let (rest, expression) = set_incode("<while", input)?;
    Ok((rest, Directive::While(expression)))
}

fn end_loop(input: &str) -> Result<'_, Directive<'_>> {
    value(Directive::EndLoop, tag("<end^loop>")).parse(input)
}

fn import(input: &str) -> Result<'_, Directive<'_>> {
    let (rest, (_, name, _)) = (tag("<import^z=\""), unit_name, tag("\">")).parse(input)?;
    Ok((rest, Directive::Import(name)))
}

fn comment(input: &str) -> Result<'_, Directive<'_>> {
    let (rest, _) = (alt((tag("//"), tag("#"))), rest).parse(input)?;
    Ok((rest, Directive::Comment(input)))
}

fn macro_call(input: &str) -> Result<'_, Directive<'_>> {
    let (rest, (name, arguments)) = call(input)?;
    Ok((rest, Directive::MacroCall { name, arguments }))
}
