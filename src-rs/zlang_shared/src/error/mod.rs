//! Errors for the Z compiler

mod context;
mod location;
mod traits;

use crate::source::UnitName;

pub use context::Context;
pub use location::ErrorLocation;
pub use traits::AsZlangError;

/// Unified error representation for the Z compiler
///
/// This struct represents errors in a format suitable for display to users.
/// It includes the unit where the error occurred (if any), a human-readable
/// message, optional source location information, and any notes or help text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZlangError {
    /// The unit where the error occurred
    unit: Option<UnitName>,
    /// Human-readable error message
    message: String,
    /// Optional source location information for precise error reporting
    location: Option<ErrorLocation>,
    /// Optional context information
    context: Vec<Context>,
}

impl ZlangError {
    /// Creates a new `ZlangError` from an error that implements `AsZlangError`
    ///
    /// The unit is taken from the error's origin, and the location is filled in
    /// when the error knows the offending line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use zlang_shared::error::{AsZlangError, ZlangError};
    ///
    /// struct SimpleError(String);
    ///
    /// impl AsZlangError for SimpleError {
    ///     fn message(&self) -> String {
    ///         self.0.clone()
    ///     }
    /// }
    ///
    /// let error = ZlangError::from_error(&SimpleError("something went wrong".to_string()));
    /// assert_eq!(error.message(), "something went wrong");
    /// assert!(error.unit().is_none());
    /// ```
    pub fn from_error(error: &impl AsZlangError) -> Self {
        let unit = error.origin().map(|origin| origin.unit.clone());

        Self {
            unit,
            message: error.message(),
            location: error.error_location(),
            context: error.context(),
        }
    }

    /// Returns the unit where the error occurred
    #[must_use]
    pub const fn unit(&self) -> Option<&UnitName> {
        self.unit.as_ref()
    }

    /// Returns the human-readable error message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the optional source location information
    #[must_use]
    pub const fn location(&self) -> Option<&ErrorLocation> {
        self.location.as_ref()
    }

    /// Returns the context information
    #[must_use]
    pub fn context(&self) -> &[Context] {
        &self.context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Origin;

    struct LineError {
        origin: Origin,
        text: String,
    }

    impl AsZlangError for LineError {
        fn message(&self) -> String {
            format!("bad line `{}`", self.text)
        }

        fn context(&self) -> Vec<Context> {
            vec![Context::Help("fix it".to_string())]
        }

        fn origin(&self) -> Option<&Origin> {
            Some(&self.origin)
        }

        fn line_source(&self) -> Option<&str> {
            Some(&self.text)
        }
    }

    #[test]
    fn from_error_uses_origin() {
        let error = LineError {
            origin: Origin::new(UnitName::new("lib.z"), 2, 1),
            text: "<oops>".to_string(),
        };

        let error = ZlangError::from_error(&error);

        assert_eq!(error.unit(), Some(&UnitName::new("lib.z")));
        assert_eq!(error.message(), "bad line `<oops>`");
        assert_eq!(error.context(), &[Context::Help("fix it".to_string())]);

        let location = error.location().expect("location should be present");
        assert_eq!(location.line(), 2);
        assert_eq!(location.line_source(), "<oops>");
    }
}
