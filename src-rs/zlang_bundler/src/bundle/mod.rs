//! Recursive inlining of imported units.
//!
//! Bundling is a depth-first walk over the import directives of the entry
//! unit. Every import line is replaced by the bundled lines of the unit it
//! names, and every other line passes through untouched, so the result is one
//! flat stream in source order.

use std::collections::HashMap;

use zlang_parser::{Directive, match_directive};
use zlang_shared::{SourceLine, UnitName, source};

use crate::{
    error::{BundleError, ImportCycleError, UnitNotFoundError},
    util::{Stack, UnitProvider},
};

/// The flattened result of bundling an entry unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    entry: UnitName,
    lines: Vec<SourceLine>,
}

impl Bundle {
    /// Creates a bundle from already flattened lines.
    #[must_use]
    pub const fn new(entry: UnitName, lines: Vec<SourceLine>) -> Self {
        Self { entry, lines }
    }

    /// Returns the entry unit the bundle was built from.
    #[must_use]
    pub const fn entry(&self) -> &UnitName {
        &self.entry
    }

    /// Returns the flattened lines.
    #[must_use]
    pub fn lines(&self) -> &[SourceLine] {
        &self.lines
    }

    /// Consumes the bundle, returning its lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<SourceLine> {
        self.lines
    }

    /// Renders the flattened lines as text, one line per line.
    #[must_use]
    pub fn to_text(&self) -> String {
        source::join_lines(&self.lines)
    }
}

/// Per-run bundling state.
///
/// A bundler holds the active import path and a cache of units that have
/// already been bundled during this run. It is meant to be used for a single
/// run and dropped afterwards; nothing is shared between bundlers.
#[derive(Debug)]
pub struct Bundler<'p, P: UnitProvider> {
    provider: &'p P,
    load_stack: Stack<UnitName>,
    cache: HashMap<UnitName, Vec<SourceLine>>,
}

impl<'p, P: UnitProvider> Bundler<'p, P> {
    /// Creates a bundler that reads units from `provider`.
    pub fn new(provider: &'p P) -> Self {
        Self {
            provider,
            load_stack: Stack::new(),
            cache: HashMap::new(),
        }
    }

    /// Bundles the entry unit and everything it imports.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::UnitNotFound`] if the entry unit or any imported
    /// unit cannot be resolved, and [`BundleError::ImportCycle`] if a unit
    /// imports itself directly or indirectly.
    pub fn bundle(&mut self, entry: &str) -> Result<Bundle, BundleError> {
        let entry_unit = self
            .provider
            .resolve(entry)
            .ok_or_else(|| UnitNotFoundError::new(entry, None))?;

        let lines = self.bundle_unit(entry_unit.clone(), None)?;

        tracing::debug!(
            entry = %entry_unit,
            lines = lines.len(),
            "bundled entry unit"
        );

        Ok(Bundle::new(entry_unit, lines))
    }

    /// Bundles a single unit.
    ///
    /// `import_site` is the import line that requested the unit, or `None`
    /// for the entry unit.
    fn bundle_unit(
        &mut self,
        unit: UnitName,
        import_site: Option<&SourceLine>,
    ) -> Result<Vec<SourceLine>, BundleError> {
        // check for an import cycle
        //
        // this happens before the cache lookup, although a unit on the active
        // path is never cached since it has not finished bundling
        if let Some(cycle) = self.load_stack.find_circular_dependency(&unit) {
            return Err(ImportCycleError::new(cycle, import_site.cloned()).into());
        }

        if let Some(lines) = self.cache.get(&unit) {
            tracing::debug!(unit = %unit, "reusing bundled unit");
            return Ok(lines.clone());
        }

        let provider = self.provider;
        let text = provider
            .source(&unit)
            .ok_or_else(|| UnitNotFoundError::new(unit.as_str(), import_site.cloned()))?;

        tracing::debug!(unit = %unit, depth = self.load_stack.len(), "bundling unit");

        self.load_stack.push(unit.clone());
        let result = self.inline_imports(&unit, text);
        self.load_stack.pop();

        let lines = result?;
        self.cache.insert(unit, lines.clone());

        Ok(lines)
    }

    /// Replaces every import line of a unit with the bundled lines of the
    /// unit it names.
    fn inline_imports(
        &mut self,
        unit: &UnitName,
        text: &str,
    ) -> Result<Vec<SourceLine>, BundleError> {
        let mut lines = Vec::new();

        for line in source::normalize(unit, text) {
            let Directive::Import(requested) = match_directive(line.text()) else {
                lines.push(line);
                continue;
            };

            let imported = self
                .provider
                .resolve(requested)
                .ok_or_else(|| UnitNotFoundError::new(requested, Some(line.clone())))?;

            let imported_lines = self.bundle_unit(imported, Some(&line))?;
            lines.extend(imported_lines);
        }

        Ok(lines)
    }
}

/// Bundles `entry` and everything it imports, using a fresh bundler.
///
/// # Errors
///
/// See [`Bundler::bundle`].
pub fn bundle(entry: &str, provider: &impl UnitProvider) -> Result<Bundle, BundleError> {
    Bundler::new(provider).bundle(entry)
}

#[cfg(test)]
mod tests {
    use zlang_shared::FileSet;

    use super::*;
    use crate::test::TestProvider;

    fn texts(bundle: &Bundle) -> Vec<&str> {
        bundle.lines().iter().map(SourceLine::text).collect()
    }

    #[test]
    fn bundle_without_imports_is_normalized_entry() {
        let provider = TestProvider::new([("main.z", "  <print^set.index=\"hi\">  \n\n<end^if>")]);

        let bundle = bundle("main.z", &provider).expect("bundling should succeed");

        assert_eq!(bundle.entry(), &UnitName::new("main.z"));
        assert_eq!(texts(&bundle), vec!["<print^set.index=\"hi\">", "<end^if>"]);
        assert_eq!(bundle.to_text(), "<print^set.index=\"hi\">\n<end^if>\n");
    }

    #[test]
    fn import_is_replaced_in_place() {
        let provider = TestProvider::new([
            ("main.z", "<set^a = 1>\n<import^z=\"lib.z\">\n<set^c = 3>"),
            ("lib.z", "<set^b = 2>"),
        ]);

        let bundle = bundle("main.z", &provider).expect("bundling should succeed");

        assert_eq!(texts(&bundle), vec!["<set^a = 1>", "<set^b = 2>", "<set^c = 3>"]);
        assert_eq!(bundle.lines()[1].origin().unit, UnitName::new("lib.z"));
        assert_eq!(bundle.lines()[2].origin().line, 3);
    }

    #[test]
    fn nested_imports_are_inlined_depth_first() {
        let provider = TestProvider::new([
            ("main.z", "<import^z=\"a.z\">\n<set^m = 0>"),
            ("a.z", "<set^a1 = 1>\n<import^z=\"b.z\">\n<set^a2 = 2>"),
            ("b.z", "<set^b = 3>"),
        ]);

        let bundle = bundle("main.z", &provider).expect("bundling should succeed");

        assert_eq!(
            texts(&bundle),
            vec!["<set^a1 = 1>", "<set^b = 3>", "<set^a2 = 2>", "<set^m = 0>"]
        );
    }

    #[test]
    fn missing_entry_unit() {
        let provider = TestProvider::empty();

        let error = bundle("main.z", &provider).expect_err("bundling should fail");

        let BundleError::UnitNotFound(error) = error else {
            panic!("expected unit not found, got {error:?}");
        };
        assert_eq!(error.requested(), "main.z");
        assert!(error.import_site().is_none());
    }

    #[test]
    fn missing_imported_unit() {
        let provider = TestProvider::new([("main.z", "<set^a = 1>\n<import^z=\"gone.z\">")]);

        let error = bundle("main.z", &provider).expect_err("bundling should fail");

        let BundleError::UnitNotFound(error) = error else {
            panic!("expected unit not found, got {error:?}");
        };
        assert_eq!(error.requested(), "gone.z");
        let site = error.import_site().expect("import site should be recorded");
        assert_eq!(site.origin().line, 2);
        assert_eq!(site.text(), "<import^z=\"gone.z\">");
    }

    #[test]
    fn mutual_import_is_a_cycle() {
        let files = FileSet::from_iter([
            ("A", "<import^z=\"B.z\">"),
            ("B", "<import^z=\"A.z\">"),
        ]);

        let error = bundle("A", &files).expect_err("bundling should fail");

        let BundleError::ImportCycle(error) = error else {
            panic!("expected import cycle, got {error:?}");
        };
        assert_eq!(
            error.cycle(),
            &[UnitName::new("A"), UnitName::new("B"), UnitName::new("A")]
        );
        let site = error.import_site().expect("import site should be recorded");
        assert_eq!(site.origin().unit, UnitName::new("B"));
    }

    #[test]
    fn self_import_is_a_cycle() {
        let provider = TestProvider::new([("main.z", "<set^a = 1>\n<import^z=\"main.z\">")]);

        let error = bundle("main.z", &provider).expect_err("bundling should fail");

        let BundleError::ImportCycle(error) = error else {
            panic!("expected import cycle, got {error:?}");
        };
        assert_eq!(
            error.cycle(),
            &[UnitName::new("main.z"), UnitName::new("main.z")]
        );
    }

    #[test]
    fn indirect_cycle_reports_only_the_cycle() {
        let provider = TestProvider::new([
            ("main.z", "<import^z=\"a.z\">"),
            ("a.z", "<import^z=\"b.z\">"),
            ("b.z", "<import^z=\"a.z\">"),
        ]);

        let error = bundle("main.z", &provider).expect_err("bundling should fail");

        let BundleError::ImportCycle(error) = error else {
            panic!("expected import cycle, got {error:?}");
        };
        assert_eq!(
            error.cycle(),
            &[UnitName::new("a.z"), UnitName::new("b.z"), UnitName::new("a.z")]
        );
    }

    #[test]
    fn diamond_import_inlines_shared_unit_twice() {
        let files = FileSet::from_iter([
            ("A", "<import^z=\"B.z\">\n<import^z=\"C.z\">"),
            ("B", "<set^b = 1>\n<import^z=\"D.z\">"),
            ("C", "<set^c = 2>\n<import^z=\"D.z\">"),
            ("D", "<print^set.index=\"d\">"),
        ]);

        let bundle = bundle("A", &files).expect("diamond imports are not cycles");

        assert_eq!(
            texts(&bundle),
            vec![
                "<set^b = 1>",
                "<print^set.index=\"d\">",
                "<set^c = 2>",
                "<print^set.index=\"d\">",
            ]
        );
    }

    #[test]
    fn malformed_import_passes_through() {
        let provider = TestProvider::new([("main.z", "<import^z=\"lib\">")]);

        let bundle = bundle("main.z", &provider).expect("bundling should succeed");

        assert_eq!(texts(&bundle), vec!["<import^z=\"lib\">"]);
    }

    #[test]
    fn bundler_reuses_cached_units_across_import_sites() {
        let provider = TestProvider::new([
            ("main.z", "<import^z=\"lib.z\">\n<import^z=\"lib.z\">"),
            ("lib.z", "<set^x = 1>"),
        ]);

        let mut bundler = Bundler::new(&provider);
        let bundle = bundler.bundle("main.z").expect("bundling should succeed");

        assert_eq!(texts(&bundle), vec!["<set^x = 1>", "<set^x = 1>"]);
        assert_eq!(provider.reads(), 2);
    }
}
