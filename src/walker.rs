use crate::errors::Result;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Directory names excluded from traversal unless the caller overrides them.
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[
    ".git",
    ".svn",
    ".hg",
    "__pycache__",
    ".pytest_cache",
    "node_modules",
    ".venv",
    "venv",
    "build",
    "dist",
    ".eggs",
    "target",
];

/// Selects the candidate files for a run.
///
/// Excluded directory names prune traversal itself: the walker never
/// descends into them, so a file nested arbitrarily deep under an excluded
/// directory is never visited, regardless of any extension filter.
pub struct FileWalker {
    root: PathBuf,
    ignore_dirs: Vec<String>,
    ignore_files: Vec<String>,
    ignore_extensions: Vec<String>,
    include_extensions: Option<Vec<String>>,
}

impl FileWalker {
    /// Creates a walker over `root` with the default directory exclusions
    /// and no file or extension filters.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ignore_dirs: DEFAULT_IGNORE_DIRS.iter().map(|d| d.to_string()).collect(),
            ignore_files: Vec::new(),
            ignore_extensions: Vec::new(),
            include_extensions: None,
        }
    }

    /// Replaces the set of directory names to skip.
    pub fn ignore_dirs(mut self, dirs: Vec<String>) -> Self {
        self.ignore_dirs = dirs;
        self
    }

    /// Sets file names to skip.
    pub fn ignore_files(mut self, files: Vec<String>) -> Self {
        self.ignore_files = files;
        self
    }

    /// Sets file extensions to skip.
    pub fn ignore_extensions(mut self, extensions: Vec<String>) -> Self {
        self.ignore_extensions = normalize_extensions(extensions);
        self
    }

    /// Restricts the walk to files with one of these extensions.
    pub fn include_extensions(mut self, extensions: Vec<String>) -> Self {
        self.include_extensions = Some(normalize_extensions(extensions));
        self
    }

    /// Walks the tree and returns the ordered candidate-file list.
    pub fn selected_files(&self) -> Result<Vec<PathBuf>> {
        let ignored_dirs = self.ignore_dirs.clone();

        let mut walker = WalkBuilder::new(&self.root);
        // Exclusion policy is entirely ours: no gitignore or hidden-file
        // handling from the ignore crate's defaults.
        walker.standard_filters(false);
        walker.filter_entry(move |entry| {
            if entry.depth() == 0 {
                return true;
            }
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if !is_dir {
                return true;
            }
            match entry.file_name().to_str() {
                Some(name) => !ignored_dirs.iter().any(|d| d == name),
                None => true,
            }
        });

        let mut selected = Vec::new();
        for entry in walker.build() {
            let entry = entry?;
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if is_file && self.wants(entry.path()) {
                selected.push(entry.path().to_path_buf());
            }
        }

        Ok(selected)
    }

    fn wants(&self, path: &Path) -> bool {
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if self.ignore_files.iter().any(|f| f == name) {
                return false;
            }
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        if let Some(ext) = &extension {
            if self.ignore_extensions.iter().any(|e| e == ext) {
                return false;
            }
        }

        if let Some(include) = &self.include_extensions {
            return match &extension {
                Some(ext) => include.iter().any(|e| e == ext),
                None => false,
            };
        }

        true
    }
}

/// Normalizes extensions so `.PY`, `py`, and ` py ` all compare equal.
fn normalize_extensions(extensions: Vec<String>) -> Vec<String> {
    extensions
        .into_iter()
        .map(|e| e.trim().trim_start_matches('.').to_lowercase())
        .collect()
}
