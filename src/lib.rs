//! `stringle` is a library for bulk find-and-replace operations across file trees.
//!
//! It provides the core logic for the `stringle` command-line tool but can also
//! be used as a standalone library. The main components are:
//!
//! - `RuleSet`: A validated, ordered collection of search/replace rules with
//!   their matchers compiled up front, so configuration errors surface before
//!   any file is read.
//! - `FileTransformer`: Applies a rule set to one file, persisting the result
//!   atomically (or not at all, in dry-run mode).
//! - `RunCoordinator`: Drives the transformer over a candidate-file list and
//!   aggregates per-file outcomes into a run summary.
//! - `FileWalker`: Selects the candidate files, pruning excluded directories
//!   from traversal entirely.
//!
//! Configuration errors fail fast with nothing attempted; per-file errors are
//! recorded in the summary and never abort a run.

pub mod cli;
pub mod config;
pub mod coordinator;
pub mod errors;
pub mod matcher;
pub mod report;
pub mod ruleset;
pub mod transformer;
pub mod walker;

// Re-export main types for easier access by library users.
pub use config::RunOptions;
pub use coordinator::{RunCoordinator, RunObserver, RunSummary, SilentObserver};
pub use errors::{Error, Result};
pub use matcher::{MatchOutcome, RuleMatcher};
pub use report::{OutputFormat, SummaryFormatter};
pub use ruleset::{Rule, RuleSet};
pub use transformer::{FileOutcome, FileTransformer};
pub use walker::FileWalker;
