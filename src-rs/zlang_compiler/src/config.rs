//! Compiler configuration.

/// The default number of macro expansion passes before giving up.
pub const DEFAULT_MAX_EXPANSION_PASSES: usize = 64;

/// The default number of lines the expanded stream may hold.
pub const DEFAULT_MAX_EXPANDED_LINES: usize = 100_000;

/// What the compiler does with a line it cannot translate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnrecognizedPolicy {
    /// Fail with an unrecognized directive error.
    #[default]
    Strict,
    /// Emit the line as a `// error: ` comment and keep going.
    Lenient,
}

/// Settings for a compilation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// How lines without a translation are handled
    pub policy: UnrecognizedPolicy,
    /// Whether entry compilation wraps the output in an immediately invoked
    /// function
    pub wrap_in_closure: bool,
    /// The maximum number of macro expansion passes
    pub max_expansion_passes: usize,
    /// The maximum number of lines the stream may grow to while expanding
    pub max_expanded_lines: usize,
}

impl Config {
    /// Creates the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            policy: UnrecognizedPolicy::Strict,
            wrap_in_closure: false,
            max_expansion_passes: DEFAULT_MAX_EXPANSION_PASSES,
            max_expanded_lines: DEFAULT_MAX_EXPANDED_LINES,
        }
    }

    /// Sets the unrecognized-line policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: UnrecognizedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets whether entry output is wrapped in a closure.
    #[must_use]
    pub const fn with_wrap_in_closure(mut self, wrap_in_closure: bool) -> Self {
        self.wrap_in_closure = wrap_in_closure;
        self
    }

    /// Sets the maximum number of macro expansion passes.
    #[must_use]
    pub const fn with_max_expansion_passes(mut self, max_expansion_passes: usize) -> Self {
        self.max_expansion_passes = max_expansion_passes;
        self
    }

    /// Sets the maximum number of lines the expanded stream may hold.
    #[must_use]
    pub const fn with_max_expanded_lines(mut self, max_expanded_lines: usize) -> Self {
        self.max_expanded_lines = max_expanded_lines;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
