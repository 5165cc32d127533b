use crate::document::Mark;

/// Errors returned by the projection engine and its document reader/writer.
///
/// None of these are recovered internally. Whether a failure ends the process
/// is decided by the caller (the CLI exits non-zero).
#[derive(thiserror::Error, Debug)]
pub enum TrimError {
    /// The rule text did not decode into a forest of `{ key, include }` objects.
    /// The decoder message names the offending entry, e.g. include[1]: missing field `key`.
    #[error("malformed rules: {0}")]
    MalformedRules(#[from] serde_yaml::Error),
    /// The rules decode but another configuration field does not.
    #[error("invalid configuration: {0}")]
    InvalidConfig(serde_yaml::Error),
    #[error("rule path `{path}` expects a mapping but found {found} at {mark}")]
    NotAMapping {
        path: String,
        found: &'static str,
        mark: Mark,
    },
    #[error("no content in the input YAML")]
    EmptyDocument,
    #[error("input YAML holds {count} documents; only a single document is supported")]
    UnsupportedMultiDocument { count: usize },
    #[error("invalid YAML at {mark}: {message}")]
    Syntax { message: String, mark: Mark },
    #[error("input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}
