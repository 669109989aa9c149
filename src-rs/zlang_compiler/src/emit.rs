//! JavaScript emitters for single directives.

use zlang_parser::Directive;

/// Translates a directive into one line of JavaScript.
///
/// Returns `None` for directives that have no translation of their own:
/// addon sentinels only change compiler state, and imports, macro
/// constructs and unrecognized lines should never reach the compiler.
#[must_use]
pub fn emit(directive: &Directive<'_>) -> Option<String> {
    let line = match *directive {
        Directive::PrintLiteral(text) => format!("console.log(\"{text}\");"),
        Directive::PrintExpr(expression) => format!("console.log({expression});"),
        Directive::ErrorLiteral(text) => format!("console.error(\"{text}\");"),
        Directive::ErrorExpr(expression) => format!("console.error({expression});"),
        Directive::Alert(text) => format!("alert(\"{text}\");"),
        Directive::Prompt { variable, title } => format!("let {variable} = prompt(\"{title}\");"),
        Directive::Style {
            selector,
            property,
            value,
        } => format!(
            "document.querySelector('{selector}').style.{} = '{value}';",
            camel_case(property)
        ),
        Directive::Assign {
            variable,
            expression,
        } => format!("let {variable} = {expression};"),
        Directive::If(expression) => format!("if ({expression}) {{"),
        Directive::ElseIf(expression) => format!("}} else if ({expression}) {{"),
        Directive::Else => "} else {".to_string(),
        Directive::EndIf | Directive::EndLoop => "}".to_string(),
        Directive::For(expression) => format!("for ({expression}) {{"),
        Directive::While(expression) => format!("while ({expression}) {{"),
        Directive::Comment(text) => comment(text),
        Directive::AddonRaw(text) => text.to_string(),
        Directive::AddonEnter(_)
        | Directive::AddonExit(_)
        | Directive::Import(_)
        | Directive::MacroStart
        | Directive::MacroEnd
        | Directive::MacroCall { .. }
        | Directive::Unrecognized => return None,
    };

    Some(line)
}

/// `//` comments are kept as they are; `# text` becomes `// text`.
fn comment(text: &str) -> String {
    text.strip_prefix('#').map_or_else(
        || text.to_string(),
        |rest| format!("// {}", rest.trim_start()),
    )
}

/// Converts a kebab-case CSS property to the camelCase name used by
/// `element.style`, e.g. `background-color` to `backgroundColor`.
///
/// Only a hyphen followed by a lowercase letter is folded.
fn camel_case(property: &str) -> String {
    let mut output = String::with_capacity(property.len());
    let mut chars = property.trim().chars().peekable();

    while let Some(c) = chars.next() {
        match chars.peek() {
            Some(&next) if c == '-' && next.is_ascii_lowercase() => {
                output.push(next.to_ascii_uppercase());
                chars.next();
            }
            _ => output.push(c),
        }
    }

    output
}
