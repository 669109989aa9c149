//! Per-run compilation state.

use zlang_bundler::{Bundle, BundleError, Bundler, UnitProvider};
use zlang_compiler::{CompileError, Config, compile_entry};
use zlang_macro::{ExpansionLimits, MacroExpansionOverflow, MacroTable, expand, extract_macros};
use zlang_shared::{FileSet, SourceLine, UnitName, source};

use crate::error::PipelineError;

/// The state of one compilation run.
///
/// A context owns the bundler (with its active import path and its cache of
/// bundled units) and the macro table collected during the run. Build one
/// context per run and drop it afterwards; separate runs, including
/// concurrent ones, use separate contexts.
#[derive(Debug)]
pub struct CompileContext<'p, P: UnitProvider = FileSet> {
    bundler: Bundler<'p, P>,
    macros: MacroTable,
    config: Config,
}

impl<'p, P: UnitProvider> CompileContext<'p, P> {
    /// Creates a context that reads units from `provider`.
    pub fn new(provider: &'p P, config: Config) -> Self {
        Self {
            bundler: Bundler::new(provider),
            macros: MacroTable::new(),
            config,
        }
    }

    /// Returns the configuration of this run.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the macros collected so far.
    pub const fn macros(&self) -> &MacroTable {
        &self.macros
    }

    /// Bundles the entry unit and everything it imports.
    ///
    /// # Errors
    ///
    /// Returns a [`BundleError`] if a unit is missing or imports form a cycle.
    pub fn bundle(&mut self, entry: &str) -> Result<Bundle, BundleError> {
        self.bundler.bundle(entry)
    }

    /// Collects the macros of a bundle and expands every call.
    ///
    /// The collected macros are added to the context's table.
    ///
    /// # Errors
    ///
    /// Returns [`MacroExpansionOverflow`] if expansion does not settle within
    /// [`Config::max_expansion_passes`] passes, or grows the program past
    /// [`Config::max_expanded_lines`] lines.
    pub fn expand(&mut self, bundle: &Bundle) -> Result<Vec<SourceLine>, MacroExpansionOverflow> {
        let (macros, residual) = extract_macros(bundle.lines());
        for definition in macros.iter() {
            self.macros.insert(definition.clone());
        }

        tracing::debug!(macros = self.macros.len(), "collected macros");

        let limits = ExpansionLimits::new(
            self.config.max_expansion_passes,
            self.config.max_expanded_lines,
        );
        expand(&residual, &self.macros, limits)
    }

    /// Compiles fully expanded lines of the given entry unit.
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] for lines without a translation, unless the
    /// lenient policy is configured.
    pub fn compile(&self, entry: &UnitName, lines: &[SourceLine]) -> Result<String, CompileError> {
        compile_entry(entry, lines, &self.config)
    }

    /// Runs the whole pipeline from the given entry unit.
    ///
    /// # Errors
    ///
    /// Returns the first error of any stage. No partial output is produced.
    pub fn run(mut self, entry: &str) -> Result<Compilation, PipelineError> {
        let bundle = self.bundle(entry)?;
        let lines = self.expand(&bundle)?;
        let code = self.compile(bundle.entry(), &lines)?;

        tracing::debug!(
            entry = %bundle.entry(),
            lines = lines.len(),
            bytes = code.len(),
            "compiled project"
        );

        Ok(Compilation {
            bundle,
            macros: self.macros,
            lines,
            code,
        })
    }
}

/// The products of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compilation {
    bundle: Bundle,
    macros: MacroTable,
    lines: Vec<SourceLine>,
    code: String,
}

impl Compilation {
    /// Returns the flattened entry unit, before macro handling.
    #[must_use]
    pub const fn bundle(&self) -> &Bundle {
        &self.bundle
    }

    /// Returns the macros defined by the project.
    #[must_use]
    pub const fn macros(&self) -> &MacroTable {
        &self.macros
    }

    /// Returns the fully expanded lines that were compiled.
    #[must_use]
    pub fn lines(&self) -> &[SourceLine] {
        &self.lines
    }

    /// Returns the expanded lines as text.
    #[must_use]
    pub fn expanded_text(&self) -> String {
        source::join_lines(&self.lines)
    }

    /// Returns the compiled JavaScript.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Consumes the compilation, returning the compiled JavaScript.
    #[must_use]
    pub fn into_code(self) -> String {
        self.code
    }
}
