use crate::transformer::{FileOutcome, FileTransformer};
use serde::Serialize;
use std::path::PathBuf;

/// Receives progress events as a run advances.
///
/// The coordinator itself never prints; display concerns (progress bars,
/// verbose per-file logging) are injected through this trait. Both methods
/// default to doing nothing.
pub trait RunObserver {
    /// Called once per file, after its outcome is known.
    fn file_done(&self, _outcome: &FileOutcome) {}

    /// Called once, after the last file.
    fn run_done(&self, _summary: &RunSummary) {}
}

/// An observer that ignores every event.
pub struct SilentObserver;

impl RunObserver for SilentObserver {}

/// One `(path, message)` pair for a file that could not be processed.
#[derive(Debug, Clone, Serialize)]
pub struct FileError {
    pub path: PathBuf,
    pub message: String,
}

/// Aggregate statistics for one run.
///
/// `modified_files` and `errors` preserve the order in which files were
/// processed. Serializes to the JSON surface consumed by `--format json`.
#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    pub files_processed: usize,
    pub files_modified: usize,
    pub total_replacements: usize,
    pub modified_files: Vec<PathBuf>,
    pub errors: Vec<FileError>,
}

impl RunSummary {
    fn record(&mut self, outcome: &FileOutcome) {
        self.files_processed += 1;

        if let Some(message) = &outcome.error {
            self.errors.push(FileError {
                path: outcome.path.clone(),
                message: message.clone(),
            });
        } else if outcome.modified {
            self.files_modified += 1;
            self.total_replacements += outcome.replacements;
            self.modified_files.push(outcome.path.clone());
        }
    }
}

/// Drives a [`FileTransformer`] over a list of candidate files and rolls the
/// per-file outcomes into a [`RunSummary`].
pub struct RunCoordinator<'a> {
    transformer: FileTransformer<'a>,
}

impl<'a> RunCoordinator<'a> {
    pub fn new(transformer: FileTransformer<'a>) -> Self {
        Self { transformer }
    }

    /// Processes `files` in the order given, with no reordering and no
    /// deduplication. A failing file is recorded and the run continues.
    pub fn run(&self, files: &[PathBuf], observer: &dyn RunObserver) -> RunSummary {
        let mut summary = RunSummary::default();

        for path in files {
            let outcome = self.transformer.process(path);
            summary.record(&outcome);
            observer.file_done(&outcome);
        }

        observer.run_done(&summary);
        summary
    }
}
