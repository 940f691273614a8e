use thiserror::Error;

/// Validation failures raised by the prompt grammar.
///
/// All of these are local and synchronous: retrying the same input yields the same
/// error, so callers surface them directly instead of retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("Unknown element '{0}'")]
    UnknownElement(String),

    #[error("Malformed segment '{0}': expected a '*key*' prefix")]
    MalformedSegment(String),

    #[error("Please add content for the {0} element first")]
    PendingArgument(String),

    #[error("Argument of the {0} element contains the ' | ' separator")]
    SeparatorInArgument(String),

    #[error("Unknown jump mode '{0}': expected ascending, descending or reset")]
    UnknownJumpMode(String),
}
