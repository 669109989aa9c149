use std::fmt;

use zlang_bundler::BundleError;
use zlang_compiler::CompileError;
use zlang_macro::MacroExpansionOverflow;
use zlang_shared::{AsZlangError, Context, Origin};

/// An error from any stage of the pipeline.
///
/// Every error is fatal to the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Bundling failed.
    Bundle(BundleError),
    /// Macro expansion did not settle.
    MacroExpansion(MacroExpansionOverflow),
    /// A line could not be compiled.
    Compile(CompileError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bundle(error) => error.fmt(f),
            Self::MacroExpansion(error) => error.fmt(f),
            Self::Compile(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Bundle(error) => Some(error),
            Self::MacroExpansion(error) => Some(error),
            Self::Compile(error) => Some(error),
        }
    }
}

impl AsZlangError for PipelineError {
    fn message(&self) -> String {
        match self {
            Self::Bundle(error) => error.message(),
            Self::MacroExpansion(error) => error.message(),
            Self::Compile(error) => error.message(),
        }
    }

    fn context(&self) -> Vec<Context> {
        match self {
            Self::Bundle(error) => error.context(),
            Self::MacroExpansion(error) => error.context(),
            Self::Compile(error) => error.context(),
        }
    }

    fn origin(&self) -> Option<&Origin> {
        match self {
            Self::Bundle(error) => error.origin(),
            Self::MacroExpansion(error) => error.origin(),
            Self::Compile(error) => error.origin(),
        }
    }

    fn line_source(&self) -> Option<&str> {
        match self {
            Self::Bundle(error) => error.line_source(),
            Self::MacroExpansion(error) => error.line_source(),
            Self::Compile(error) => error.line_source(),
        }
    }
}

impl From<BundleError> for PipelineError {
    fn from(error: BundleError) -> Self {
        Self::Bundle(error)
    }
}

impl From<MacroExpansionOverflow> for PipelineError {
    fn from(error: MacroExpansionOverflow) -> Self {
        Self::MacroExpansion(error)
    }
}

impl From<CompileError> for PipelineError {
    fn from(error: CompileError) -> Self {
        Self::Compile(error)
    }
}
