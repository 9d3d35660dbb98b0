use thiserror::Error;

/// The primary error type for configuration-level failures in `stringle`.
///
/// This enum uses `thiserror` to wrap the kinds of errors that abort a run
/// before any file is touched: invalid rule collections, patterns that fail
/// to compile, and problems loading configuration.
///
/// Per-file failures (unreadable, undecodable, or unwritable files) are
/// deliberately not represented here. They are recovered locally into
/// [`FileOutcome::error`](crate::transformer::FileOutcome) and enumerated in
/// the run summary, so a single bad file never aborts the run.
#[derive(Error, Debug)]
pub enum Error {
    /// An error related to file system I/O.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The rule collection contained the same search term more than once.
    /// The terms are sorted and de-duplicated for the message.
    #[error("Duplicate search terms: {}", .0.join(", "))]
    DuplicateSearchTerms(Vec<String>),

    /// A rule with an empty search string was supplied.
    #[error("Empty search term: every rule needs a non-empty search string")]
    EmptySearchTerm,

    /// A search pattern failed to compile as a regular expression.
    #[error("Pattern compilation failed for `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        source: regex::Error,
    },

    /// A general configuration-related error.
    #[error("Config error: {0}")]
    Config(String),

    /// An error that occurred while parsing a YAML rules file.
    #[error("Config parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An error related to JSON serialization of the run summary.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An error from the `ignore` crate, which is used for directory traversal.
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),
}

/// A convenient type alias for `Result<T, stringle::errors::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Config(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Config(s.to_string())
    }
}
