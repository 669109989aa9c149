/// Extra information attached to an error.
///
/// # Examples
///
/// ```rust
/// use zlang_shared::error::Context;
///
/// let note = Context::Note("the cycle is main.z -> lib.z -> main.z".to_string());
/// let help = Context::Help("remove one of the imports".to_string());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Context {
    /// Additional information about the error, such as the import path that
    /// led to it.
    Note(String),

    /// A suggestion for resolving the error.
    Help(String),
}
