//! Error handling for the import bundler.
//!
//! Bundling stops at the first error. Two things can go wrong:
//!
//! - an import (or the entry unit) names a unit the provider does not have
//! - a unit imports itself, directly or through other units
//!
//! Both errors remember the import line that triggered them so that the
//! report can point at it.

use std::fmt;

use zlang_shared::{AsZlangError, Context, Origin, SourceLine, UnitName};

/// Represents errors that can occur while bundling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleError {
    /// A requested unit does not exist.
    UnitNotFound(UnitNotFoundError),
    /// A unit appears twice on the active import path.
    ImportCycle(ImportCycleError),
}

impl fmt::Display for BundleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnitNotFound(error) => error.fmt(f),
            Self::ImportCycle(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for BundleError {}

impl AsZlangError for BundleError {
    fn message(&self) -> String {
        match self {
            Self::UnitNotFound(error) => error.message(),
            Self::ImportCycle(error) => error.message(),
        }
    }

    fn context(&self) -> Vec<Context> {
        match self {
            Self::UnitNotFound(error) => error.context(),
            Self::ImportCycle(error) => error.context(),
        }
    }

    fn origin(&self) -> Option<&Origin> {
        match self {
            Self::UnitNotFound(error) => error.origin(),
            Self::ImportCycle(error) => error.origin(),
        }
    }

    fn line_source(&self) -> Option<&str> {
        match self {
            Self::UnitNotFound(error) => error.line_source(),
            Self::ImportCycle(error) => error.line_source(),
        }
    }
}

impl From<UnitNotFoundError> for BundleError {
    fn from(error: UnitNotFoundError) -> Self {
        Self::UnitNotFound(error)
    }
}

impl From<ImportCycleError> for BundleError {
    fn from(error: ImportCycleError) -> Self {
        Self::ImportCycle(error)
    }
}

/// A unit that was requested but could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitNotFoundError {
    requested: String,
    import_site: Option<SourceLine>,
}

impl UnitNotFoundError {
    /// Creates a new error for the given request.
    ///
    /// `import_site` is the import line that made the request, or `None`
    /// when the missing unit is the entry unit.
    #[must_use]
    pub fn new(requested: impl Into<String>, import_site: Option<SourceLine>) -> Self {
        Self {
            requested: requested.into(),
            import_site,
        }
    }

    /// Returns the unit name as it was requested.
    #[must_use]
    pub fn requested(&self) -> &str {
        &self.requested
    }

    /// Returns the import line that made the request.
    #[must_use]
    pub const fn import_site(&self) -> Option<&SourceLine> {
        self.import_site.as_ref()
    }
}

impl fmt::Display for UnitNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.import_site {
            Some(site) => write!(
                f,
                "unit '{}' not found (imported at {})",
                self.requested,
                site.origin()
            ),
            None => write!(f, "entry unit '{}' not found", self.requested),
        }
    }
}

impl std::error::Error for UnitNotFoundError {}

impl AsZlangError for UnitNotFoundError {
    fn message(&self) -> String {
        match self.import_site {
            Some(_) => format!("unit '{}' not found", self.requested),
            None => format!("entry unit '{}' not found", self.requested),
        }
    }

    fn context(&self) -> Vec<Context> {
        match self.import_site {
            Some(_) => vec![Context::Help(
                "imported units must be part of the project, e.g. `<import^z=\"lib.z\">` for lib.z"
                    .to_string(),
            )],
            None => vec![Context::Note(
                "compilation starts from the entry unit".to_string(),
            )],
        }
    }

    fn origin(&self) -> Option<&Origin> {
        self.import_site.as_ref().map(SourceLine::origin)
    }

    fn line_source(&self) -> Option<&str> {
        self.import_site.as_ref().map(SourceLine::text)
    }
}

/// A unit that imports itself, directly or indirectly.
///
/// The cycle runs from the first occurrence of the repeated unit on the
/// import path to the repeated import, so its first and last entries are the
/// same unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportCycleError {
    cycle: Vec<UnitName>,
    import_site: Option<SourceLine>,
}

impl ImportCycleError {
    /// Creates a new import cycle error.
    #[must_use]
    pub const fn new(cycle: Vec<UnitName>, import_site: Option<SourceLine>) -> Self {
        Self { cycle, import_site }
    }

    /// Returns the units that form the cycle.
    #[must_use]
    pub fn cycle(&self) -> &[UnitName] {
        &self.cycle
    }

    /// Returns the import line that closed the cycle.
    #[must_use]
    pub const fn import_site(&self) -> Option<&SourceLine> {
        self.import_site.as_ref()
    }

    fn cycle_description(&self) -> String {
        self.cycle
            .iter()
            .map(UnitName::as_str)
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

impl fmt::Display for ImportCycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "import cycle: {}", self.cycle_description())
    }
}

impl std::error::Error for ImportCycleError {}

impl AsZlangError for ImportCycleError {
    fn message(&self) -> String {
        match self.cycle.first() {
            Some(unit) => format!("unit '{unit}' imports itself"),
            None => "import cycle detected".to_string(),
        }
    }

    fn context(&self) -> Vec<Context> {
        vec![Context::Note(format!(
            "import cycle: {}",
            self.cycle_description()
        ))]
    }

    fn origin(&self) -> Option<&Origin> {
        self.import_site.as_ref().map(SourceLine::origin)
    }

    fn line_source(&self) -> Option<&str> {
        self.import_site.as_ref().map(SourceLine::text)
    }
}
