//! Error handling for the line compiler.

use std::fmt;

use zlang_parser::{DirectiveKind, parse_call};
use zlang_shared::{AsZlangError, Context, Origin, SourceLine};

/// Represents errors that can occur while compiling a line stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A line has no JavaScript translation.
    UnrecognizedDirective(UnrecognizedDirective),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedDirective(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for CompileError {}

impl AsZlangError for CompileError {
    fn message(&self) -> String {
        match self {
            Self::UnrecognizedDirective(error) => error.message(),
        }
    }

    fn context(&self) -> Vec<Context> {
        match self {
            Self::UnrecognizedDirective(error) => error.context(),
        }
    }

    fn origin(&self) -> Option<&Origin> {
        match self {
            Self::UnrecognizedDirective(error) => error.origin(),
        }
    }

    fn line_source(&self) -> Option<&str> {
        match self {
            Self::UnrecognizedDirective(error) => error.line_source(),
        }
    }
}

impl From<UnrecognizedDirective> for CompileError {
    fn from(error: UnrecognizedDirective) -> Self {
        Self::UnrecognizedDirective(error)
    }
}

/// A line with no JavaScript translation.
///
/// Besides lines that match no directive at all, this covers directives that
/// should have been consumed by an earlier stage: imports, macro calls, and
/// macro definition sentinels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedDirective {
    line: SourceLine,
    position: usize,
    kind: DirectiveKind,
}

impl UnrecognizedDirective {
    /// Creates a new error.
    ///
    /// `position` is the 1-based position of the line in the compiled stream.
    #[must_use]
    pub const fn new(line: SourceLine, position: usize, kind: DirectiveKind) -> Self {
        Self {
            line,
            position,
            kind,
        }
    }

    /// Returns the offending line.
    #[must_use]
    pub const fn line(&self) -> &SourceLine {
        &self.line
    }

    /// Returns the text of the offending line.
    #[must_use]
    pub fn text(&self) -> &str {
        self.line.text()
    }

    /// Returns the 1-based position of the line in the compiled stream.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns what the line was recognized as.
    #[must_use]
    pub const fn kind(&self) -> DirectiveKind {
        self.kind
    }
}

impl fmt::Display for UnrecognizedDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unrecognized directive `{}` at line {} ({})",
            self.line.text(),
            self.position,
            self.line.origin()
        )
    }
}

impl std::error::Error for UnrecognizedDirective {}

impl AsZlangError for UnrecognizedDirective {
    #[expect(
        clippy::wildcard_enum_match_arm,
        reason = "only directives left over from earlier stages get a specific message"
    )]
    fn message(&self) -> String {
        match self.kind {
            DirectiveKind::Import => "import was not resolved".to_string(),
            DirectiveKind::MacroCall => "call to an undefined macro".to_string(),
            DirectiveKind::MacroStart | DirectiveKind::MacroEnd => {
                "macro sentinel outside a definition block".to_string()
            }
            _ => "unrecognized directive".to_string(),
        }
    }

    #[expect(
        clippy::wildcard_enum_match_arm,
        reason = "only directives left over from earlier stages get a note"
    )]
    fn context(&self) -> Vec<Context> {
        let note = match self.kind {
            DirectiveKind::Import => Some(
                "imports are inlined before compilation; compile the project from its entry unit"
                    .to_string(),
            ),
            DirectiveKind::MacroCall => parse_call(self.line.text()).map(|(name, _)| {
                format!("no macro named `{name}` is defined with `<command^crt>`")
            }),
            DirectiveKind::MacroEnd => {
                Some("`<cmd^add>` closes a block opened by `<command^crt>`".to_string())
            }
            _ => None,
        };

        let expansion = self.line.expanded_from().map(|name| {
            format!("this line was expanded from macro `{name}` called at this location")
        });

        expansion
            .into_iter()
            .chain(note)
            .map(Context::Note)
            .chain(std::iter::once(Context::Help(
                "compile in lenient mode to emit unrecognized lines as comments".to_string(),
            )))
            .collect()
    }

    fn origin(&self) -> Option<&Origin> {
        Some(self.line.origin())
    }

    fn line_source(&self) -> Option<&str> {
        Some(self.line.text())
    }
}
