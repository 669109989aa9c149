use crate::{
    error::{Context, ErrorLocation},
    source::Origin,
};

/// Trait for errors that can be reported as a [`ZlangError`](crate::ZlangError).
///
/// Every stage of the pipeline implements this for its own error types so
/// that the CLI can render all of them the same way.
pub trait AsZlangError {
    /// Returns the primary error message.
    ///
    /// The message should be short and lowercase, without trailing
    /// punctuation, e.g. `unit 'lib.z' not found`.
    fn message(&self) -> String;

    /// Returns notes and help text for the error.
    fn context(&self) -> Vec<Context> {
        vec![]
    }

    /// Returns the origin of the line that caused the error, if any.
    fn origin(&self) -> Option<&Origin> {
        None
    }

    /// Returns the text of the line that caused the error, if any.
    fn line_source(&self) -> Option<&str> {
        None
    }

    /// Returns the location to highlight when reporting the error.
    ///
    /// The default implementation combines [`origin`](Self::origin) and
    /// [`line_source`](Self::line_source).
    fn error_location(&self) -> Option<ErrorLocation> {
        let origin = self.origin()?;
        let line_source = self.line_source()?;
        Some(ErrorLocation::from_origin(origin, line_source))
    }
}
