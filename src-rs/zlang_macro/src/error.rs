use std::fmt;

use zlang_shared::{AsZlangError, Context, Origin, SourceLine};

/// Macro expansion did not reach a fixpoint within its limits.
///
/// This almost always means a macro calls itself, directly or through another
/// macro. A macro that calls itself once per body runs into the pass limit; one
/// that calls itself several times grows the stream until it hits the line
/// limit first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroExpansionOverflow {
    macro_name: String,
    passes: usize,
    line_limit: Option<usize>,
    call_site: SourceLine,
}

impl MacroExpansionOverflow {
    /// Creates an error for expansion that ran out of passes.
    ///
    /// `call_site` is a call that was still unexpanded after `passes` passes.
    #[must_use]
    pub fn new(macro_name: impl Into<String>, passes: usize, call_site: SourceLine) -> Self {
        Self {
            macro_name: macro_name.into(),
            passes,
            line_limit: None,
            call_site,
        }
    }

    /// Creates an error for expansion that outgrew `line_limit` lines.
    ///
    /// `call_site` is the call whose expansion would have crossed the limit,
    /// during pass number `passes`.
    #[must_use]
    pub fn too_many_lines(
        macro_name: impl Into<String>,
        passes: usize,
        line_limit: usize,
        call_site: SourceLine,
    ) -> Self {
        Self {
            macro_name: macro_name.into(),
            passes,
            line_limit: Some(line_limit),
            call_site,
        }
    }

    /// Returns the name of a macro that was still being expanded.
    #[must_use]
    pub fn macro_name(&self) -> &str {
        &self.macro_name
    }

    /// Returns the number of passes that were run.
    #[must_use]
    pub const fn passes(&self) -> usize {
        self.passes
    }

    /// Returns the line limit if expansion stopped because the stream grew
    /// past it.
    #[must_use]
    pub const fn line_limit(&self) -> Option<usize> {
        self.line_limit
    }

    /// Returns the unexpanded call.
    #[must_use]
    pub const fn call_site(&self) -> &SourceLine {
        &self.call_site
    }
}

impl fmt::Display for MacroExpansionOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at {})", self.message(), self.call_site.origin())
    }
}

impl std::error::Error for MacroExpansionOverflow {}

impl AsZlangError for MacroExpansionOverflow {
    fn message(&self) -> String {
        match self.line_limit {
            None => format!(
                "macro '{}' still expanding after {} passes",
                self.macro_name, self.passes
            ),
            Some(limit) => format!(
                "macro '{}' grew the program past {limit} lines in pass {}",
                self.macro_name, self.passes
            ),
        }
    }

    fn context(&self) -> Vec<Context> {
        let note = match self.line_limit {
            None => format!(
                "expansion stops once a pass expands no calls, but `{}` was called in every pass",
                self.macro_name
            ),
            Some(_) => format!(
                "each expansion of `{}` produced more calls than it replaced",
                self.macro_name
            ),
        };

        let mut context = vec![Context::Note(note)];
        if let Some(outer) = self.call_site.expanded_from() {
            context.push(Context::Note(format!("this call was expanded from `{outer}`")));
        }
        context.push(Context::Help(format!(
            "check whether `{}` calls itself, directly or through another macro",
            self.macro_name
        )));

        context
    }

    fn origin(&self) -> Option<&Origin> {
        Some(self.call_site.origin())
    }

    fn line_source(&self) -> Option<&str> {
        Some(self.call_site.text())
    }
}
