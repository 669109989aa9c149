//! Directive values and their kinds.

use std::fmt;

/// The two kinds of addon passthrough block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddonKind {
    /// `<addon^index/set^js>` ... `<addon^js>`
    Js,
    /// `<addon^index/set^html>` ... `<addon^html>`
    Html,
}

impl AddonKind {
    /// The sentinel that opens a block of this kind.
    #[must_use]
    pub const fn enter_sentinel(self) -> &'static str {
        match self {
            Self::Js => "<addon^index/set^js>",
            Self::Html => "<addon^index/set^html>",
        }
    }

    /// The sentinel that closes a block of this kind.
    #[must_use]
    pub const fn exit_sentinel(self) -> &'static str {
        match self {
            Self::Js => "<addon^js>",
            Self::Html => "<addon^html>",
        }
    }
}

/// A recognized directive and the fields captured from its line.
///
/// Captured fields borrow from the matched line and are never interpreted:
/// expressions are opaque JavaScript snippets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive<'a> {
    /// `<print^set.index="literal">`
    PrintLiteral(&'a str),
    /// `<print^set.incode="expr">`
    PrintExpr(&'a str),
    /// `<error^set.index="literal">`
    ErrorLiteral(&'a str),
    /// `<error^set.incode="expr">`
    ErrorExpr(&'a str),
    /// `<alert^class="literal">`
    Alert(&'a str),
    /// `<prompt^set.index="var"&title="literal">`
    Prompt {
        /// The variable bound to the answer
        variable: &'a str,
        /// The prompt title
        title: &'a str,
    },
    /// `<ui.e^selector="sel"&css="property:value">`
    Style {
        /// The CSS selector of the element
        selector: &'a str,
        /// The CSS property, as written (kebab-case)
        property: &'a str,
        /// The CSS value
        value: &'a str,
    },
    /// `<set^var = expr>`
    Assign {
        /// The variable being bound
        variable: &'a str,
        /// The bound expression, trimmed
        expression: &'a str,
    },
    /// `<if^set.incode="expr">`
    If(&'a str),
    /// `<else^if^set.incode="expr">`
    ElseIf(&'a str),
    /// `<else^set>`
    Else,
    /// `<end^if>`
    EndIf,
    /// `<for^set.incode="expr">`
    For(&'a str),
    /// `<while^set.incode="expr">`
    While(&'a str),
    /// `<end^loop>`
    EndLoop,
    /// A line starting with an addon enter sentinel
    AddonEnter(AddonKind),
    /// A line starting with an addon exit sentinel
    AddonExit(AddonKind),
    /// A line inside an addon passthrough block
    ///
    /// Never produced by [`match_directive`](crate::match_directive), which
    /// has no notion of block state; the line compiler tags passthrough lines
    /// with it.
    AddonRaw(&'a str),
    /// `<import^z="unit.z">`
    Import(&'a str),
    /// `<command^crt>`
    MacroStart,
    /// `<cmd^add>`
    MacroEnd,
    /// `name(arg1, arg2, ...)`
    MacroCall {
        /// The macro name
        name: &'a str,
        /// The unsplit text between the parentheses
        arguments: &'a str,
    },
    /// A `//` or `#` comment; holds the whole line
    Comment(&'a str),
    /// A line that matches no rule
    Unrecognized,
}

impl Directive<'_> {
    /// Returns the tag of this directive.
    #[must_use]
    pub const fn kind(&self) -> DirectiveKind {
        match self {
            Self::PrintLiteral(_) => DirectiveKind::PrintLiteral,
            Self::PrintExpr(_) => DirectiveKind::PrintExpr,
            Self::ErrorLiteral(_) => DirectiveKind::ErrorLiteral,
            Self::ErrorExpr(_) => DirectiveKind::ErrorExpr,
            Self::Alert(_) => DirectiveKind::Alert,
            Self::Prompt { .. } => DirectiveKind::Prompt,
            Self::Style { .. } => DirectiveKind::Style,
            Self::Assign { .. } => DirectiveKind::Assign,
            Self::If(_) => DirectiveKind::If,
            Self::ElseIf(_) => DirectiveKind::ElseIf,
            Self::Else => DirectiveKind::Else,
            Self::EndIf => DirectiveKind::EndIf,
            Self::For(_) => DirectiveKind::For,
            Self::While(_) => DirectiveKind::While,
            Self::EndLoop => DirectiveKind::EndLoop,
            Self::AddonEnter(_) => DirectiveKind::AddonEnter,
            Self::AddonExit(_) => DirectiveKind::AddonExit,
            Self::AddonRaw(_) => DirectiveKind::AddonRaw,
            Self::Import(_) => DirectiveKind::Import,
            Self::MacroStart => DirectiveKind::MacroStart,
            Self::MacroEnd => DirectiveKind::MacroEnd,
            Self::MacroCall { .. } => DirectiveKind::MacroCall,
            Self::Comment(_) => DirectiveKind::Comment,
            Self::Unrecognized => DirectiveKind::Unrecognized,
        }
    }
}

/// The tag of a directive, without its captured fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(missing_docs, reason = "each variant is named after the directive it tags")]
pub enum DirectiveKind {
    PrintLiteral,
    PrintExpr,
    ErrorLiteral,
    ErrorExpr,
    Alert,
    Prompt,
    Style,
    Assign,
    If,
    ElseIf,
    Else,
    EndIf,
    For,
    While,
    EndLoop,
    AddonEnter,
    AddonExit,
    AddonRaw,
    Import,
    MacroStart,
    MacroEnd,
    MacroCall,
    Comment,
    Unrecognized,
}

impl DirectiveKind {
    /// Returns the kebab-case name of the directive kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PrintLiteral => "print-literal",
            Self::PrintExpr => "print-expr",
            Self::ErrorLiteral => "error-literal",
            Self::ErrorExpr => "error-expr",
            Self::Alert => "alert",
            Self::Prompt => "prompt",
            Self::Style => "style",
            Self::Assign => "assign",
            Self::If => "if",
            Self::ElseIf => "else-if",
            Self::Else => "else",
            Self::EndIf => "end-if",
            Self::For => "for",
            Self::While => "while",
            Self::EndLoop => "end-loop",
            Self::AddonEnter => "addon-enter",
            Self::AddonExit => "addon-exit",
            Self::AddonRaw => "addon-raw",
            Self::Import => "import",
            Self::MacroStart => "macro-definition-start",
            Self::MacroEnd => "macro-definition-end",
            Self::MacroCall => "macro-call",
            Self::Comment => "comment",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
