use crate::errors::{Error, Result};
use crate::ruleset::Rule;
use clap::Parser;
use std::path::PathBuf;

/// Bulk find and replace across a directory tree.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Bulk find and replace in files",
    long_about = "stringle - Bulk, multi-pattern find and replace across a tree of text files.

Rules are applied longest-search-first by default, so a rule for `abcd`
fires before a rule for `a`. In regex mode, replacements may reference
capture groups with $1, ${name} and friends.

QUICK EXAMPLES:
  stringle . 'old:new'                      # Basic replacement
  stringle . 'foo:bar' 'old:new'            # Multiple replacements
  stringle . 'hello:hi' -i -e py,txt        # Case-insensitive, only .py/.txt
  stringle . 'Test\\d+:Result' -r --dry-run  # Regex preview, nothing written
  stringle . -c rules.yaml -f json          # Rules file, JSON summary"
)]
pub struct Args {
    /// Root directory to search in.
    pub directory: PathBuf,

    /// Replacements in the form `search:replace` (split on the first `:`).
    #[arg(required_unless_present = "config")]
    pub replacements: Vec<String>,

    /// Case-insensitive matching.
    #[arg(short = 'i', long = "ignore-case")]
    pub ignore_case: bool,

    /// Treat search patterns as regular expressions.
    #[arg(short = 'r', long = "regex")]
    pub regex: bool,

    /// Apply rules in the order given instead of longest-search-first.
    #[arg(long = "no-sort")]
    pub no_sort: bool,

    /// Only process files with these extensions (comma separated).
    #[arg(short = 'e', long = "ext", value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Directory names to skip, replacing the built-in VCS/build/cache list.
    #[arg(long = "ignore-dir")]
    pub ignore_dirs: Vec<String>,

    /// File names to skip.
    #[arg(long = "ignore-file")]
    pub ignore_files: Vec<String>,

    /// File extensions to skip (comma separated).
    #[arg(long = "ignore-ext", value_delimiter = ',')]
    pub ignore_extensions: Vec<String>,

    /// Preview the changes without modifying any files.
    #[arg(long)]
    pub dry_run: bool,

    /// The output format for the summary (`text` or `json`).
    #[arg(short = 'f', long = "format", default_value = "text")]
    pub format: String,

    /// Read rules from a YAML file instead of positional pairs.
    #[arg(short = 'c', long = "config", env = "STRINGLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write the summary to a file instead of standard output.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// List each modified file in the summary.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Parses command-line arguments and returns the populated `Args` struct.
pub fn parse_args() -> Args {
    Args::parse()
}

/// Parses positional `search:replace` pairs, splitting on the first `:` so
/// the replacement may itself contain colons.
pub fn parse_replacements(args: &[String]) -> Result<Vec<Rule>> {
    args.iter()
        .map(|arg| match arg.split_once(':') {
            Some((search, replace)) => Ok(Rule::new(search, replace)),
            None => Err(Error::Config(format!(
                "Invalid replacement format: {arg}. Expected 'search:replace'"
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_replacements() {
        let rules =
            parse_replacements(&["old:new".to_string(), "foo:bar".to_string()]).unwrap();

        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0], Rule::new("old", "new"));
        assert_eq!(rules[1], Rule::new("foo", "bar"));
    }

    #[test]
    fn test_parse_replacements_splits_on_first_colon() {
        let rules = parse_replacements(&["url:https://example.com".to_string()]).unwrap();
        assert_eq!(rules[0], Rule::new("url", "https://example.com"));
    }

    #[test]
    fn test_parse_replacements_rejects_missing_colon() {
        let err = parse_replacements(&["no-colon-here".to_string()]).unwrap_err();
        assert!(err.to_string().contains("no-colon-here"));
    }

    #[test]
    fn test_empty_replacement_text_is_allowed() {
        // Deleting the search text is a plain `search:` pair
        let rules = parse_replacements(&["gone:".to_string()]).unwrap();
        assert_eq!(rules[0], Rule::new("gone", ""));
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "stringle", ".", "old:new", "-i", "-r", "--dry-run", "-e", "py,txt",
        ])
        .unwrap();

        assert!(args.ignore_case);
        assert!(args.regex);
        assert!(args.dry_run);
        assert_eq!(args.extensions, vec!["py", "txt"]);
        assert_eq!(args.replacements, vec!["old:new"]);
    }
}
