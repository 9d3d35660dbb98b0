use crate::ruleset::RuleSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// The result of processing a single file.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    /// The file that was processed.
    pub path: PathBuf,
    /// Total replacements across all rules for this file.
    pub replacements: usize,
    /// Whether the final content differed from the original. Authoritative
    /// over the count: a rule that replaces a pattern with itself reports
    /// its count but leaves the file unmodified.
    pub modified: bool,
    /// Why the file was skipped, if it was. An outcome with `error` set
    /// contributes nothing to `modified` or `replacements`.
    pub error: Option<String>,
}

impl FileOutcome {
    fn skipped(path: &Path, message: String) -> Self {
        Self {
            path: path.to_path_buf(),
            replacements: 0,
            modified: false,
            error: Some(message),
        }
    }
}

/// Applies a rule set to individual files.
///
/// The transformer trusts that each path it is handed was already selected
/// by the caller's file-selection policy; it performs no filtering of its
/// own.
pub struct FileTransformer<'a> {
    rules: &'a RuleSet,
    dry_run: bool,
}

impl<'a> FileTransformer<'a> {
    pub fn new(rules: &'a RuleSet, dry_run: bool) -> Self {
        Self { rules, dry_run }
    }

    /// Reads `path`, applies every rule in effective order, and persists the
    /// result when it changed (unless this is a dry run).
    ///
    /// Read, decode, and write failures are recovered into the outcome's
    /// `error` field rather than returned, so one bad file never aborts a
    /// run over the rest.
    pub fn process(&self, path: &Path) -> FileOutcome {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => return FileOutcome::skipped(path, format!("read failed: {e}")),
        };
        let original = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => return FileOutcome::skipped(path, format!("not valid UTF-8: {e}")),
        };

        let outcome = self.rules.apply(&original);
        let modified = outcome.content.as_ref() != original.as_str();

        if modified && !self.dry_run {
            if let Err(e) = write_atomic(path, outcome.content.as_ref()) {
                return FileOutcome::skipped(path, format!("write failed: {e}"));
            }
        }

        FileOutcome {
            path: path.to_path_buf(),
            replacements: outcome.count,
            modified,
            error: None,
        }
    }
}

/// Replaces the file's content in one step: write to a sibling temp file,
/// carry over the original's permissions, then persist over the original.
fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let parent = path.parent().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "no parent directory")
    })?;

    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_bytes())?;

    let perms = fs::metadata(path)?.permissions();
    fs::set_permissions(temp_file.path(), perms)?;

    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunOptions;
    use crate::ruleset::Rule;
    use tempfile::TempDir;

    fn rule_set(rules: Vec<Rule>, options: RunOptions) -> RuleSet {
        RuleSet::build(rules, &options).unwrap()
    }

    #[test]
    fn test_simple_replacement() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("test.txt");
        fs::write(&file, "Hello world, world is great!").unwrap();

        let rules = rule_set(vec![Rule::new("world", "universe")], RunOptions::default());
        let outcome = FileTransformer::new(&rules, false).process(&file);

        assert!(outcome.modified);
        assert_eq!(outcome.replacements, 2);
        assert!(outcome.error.is_none());
        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            "Hello universe, universe is great!"
        );
    }

    #[test]
    fn test_no_match_leaves_file_alone() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("test.txt");
        fs::write(&file, "hello world").unwrap();

        let rules = rule_set(
            vec![Rule::new("notfound", "replacement")],
            RunOptions::default(),
        );
        let outcome = FileTransformer::new(&rules, false).process(&file);

        assert!(!outcome.modified);
        assert_eq!(outcome.replacements, 0);
        assert_eq!(fs::read_to_string(&file).unwrap(), "hello world");
    }

    #[test]
    fn test_self_replacement_counts_but_does_not_modify() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("test.txt");
        fs::write(&file, "same same same").unwrap();

        let rules = rule_set(vec![Rule::new("same", "same")], RunOptions::default());
        let outcome = FileTransformer::new(&rules, false).process(&file);

        assert_eq!(outcome.replacements, 3);
        assert!(!outcome.modified);
        assert_eq!(fs::read_to_string(&file).unwrap(), "same same same");
    }

    #[test]
    fn test_dry_run_reports_without_writing() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("test.txt");
        fs::write(&file, "foo bar foo").unwrap();

        let rules = rule_set(vec![Rule::new("foo", "qux")], RunOptions::default());
        let outcome = FileTransformer::new(&rules, true).process(&file);

        assert!(outcome.modified);
        assert_eq!(outcome.replacements, 2);
        assert_eq!(fs::read_to_string(&file).unwrap(), "foo bar foo");
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("does-not-exist.txt");

        let rules = rule_set(vec![Rule::new("a", "b")], RunOptions::default());
        let outcome = FileTransformer::new(&rules, false).process(&missing);

        assert!(outcome.error.is_some());
        assert!(!outcome.modified);
        assert_eq!(outcome.replacements, 0);
    }

    #[test]
    fn test_non_utf8_file_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("binary.dat");
        fs::write(&file, [0xff, 0xfe, 0x00, 0x41]).unwrap();

        let rules = rule_set(vec![Rule::new("a", "b")], RunOptions::default());
        let outcome = FileTransformer::new(&rules, false).process(&file);

        let message = outcome.error.expect("decode failure should be reported");
        assert!(message.contains("UTF-8"));
        assert!(!outcome.modified);
    }

    #[test]
    fn test_rules_apply_in_effective_order() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("test.txt");
        fs::write(&file, "abcd ab a").unwrap();

        let rules = rule_set(
            vec![
                Rule::new("a", "X"),
                Rule::new("ab", "Y"),
                Rule::new("abcd", "Z"),
            ],
            RunOptions::default(),
        );
        let outcome = FileTransformer::new(&rules, false).process(&file);

        assert_eq!(outcome.replacements, 3);
        assert_eq!(fs::read_to_string(&file).unwrap(), "Z Y X");
    }
}
