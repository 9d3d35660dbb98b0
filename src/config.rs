use crate::errors::Result;
use crate::ruleset::Rule;
use serde::Deserialize;
use std::env;
use std::fs::File;
use std::path::{Path, PathBuf};

/// The run configuration record consumed by the engine.
///
/// Every field has the conservative default: exact-case literal matching,
/// longest-search-first ordering, and real writes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunOptions {
    /// Match case-sensitively (default `true`).
    pub case_sensitive: bool,
    /// Treat search strings as regular expressions (default `false`).
    pub use_regex: bool,
    /// Apply rules longest-search-first instead of in input order (default `true`).
    pub sort_by_length: bool,
    /// Compute and report results without writing any file (default `false`).
    pub dry_run: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            use_regex: false,
            sort_by_length: true,
            dry_run: false,
        }
    }
}

/// A YAML rules file: a list of search/replace entries.
///
/// ```yaml
/// rules:
///   - search: old_name
///     replace: new_name
///   - search: OldClass
///     replace: NewClass
/// ```
#[derive(Debug, Deserialize)]
pub struct RulesFile {
    pub rules: Vec<Rule>,
}

/// A utility for locating and loading rules files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Finds a rules file by searching a prioritized list of locations.
    ///
    /// The search order is:
    /// 1. The absolute path provided in `config_path`, if it exists.
    /// 2. A path relative to the current directory.
    /// 3. A path relative to the `working_dir`.
    /// 4. Inside the `~/.stringle` directory.
    /// 5. Next to the executable.
    pub fn find_config(config_path: &Path, working_dir: &Path) -> Result<PathBuf> {
        // If the path is absolute and exists, use it
        if config_path.is_absolute() && config_path.exists() {
            return Ok(config_path.to_path_buf());
        }

        // Try relative to current directory
        if config_path.exists() {
            return Ok(config_path.to_path_buf());
        }

        // Try relative to the working directory
        let in_working_dir = working_dir.join(config_path);
        if in_working_dir.exists() {
            return Ok(in_working_dir);
        }

        // Try in the .stringle config directory
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".stringle").join(config_path);
            if home_config.exists() {
                return Ok(home_config);
            }
        }

        // Try in the executable's directory
        if let Ok(exe_path) = env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let exe_config = exe_dir.join(config_path);
                if exe_config.exists() {
                    return Ok(exe_config);
                }
            }
        }

        // If we still haven't found it, provide a helpful error
        let mut tried_locations = vec![
            config_path.display().to_string(),
            in_working_dir.display().to_string(),
        ];

        if let Some(home) = dirs::home_dir() {
            tried_locations.push(home.join(".stringle").join(config_path).display().to_string());
        }

        Err(format!(
            "Rules file '{}' not found. Searched in:\n  - {}",
            config_path.display(),
            tried_locations.join("\n  - ")
        )
        .into())
    }

    /// Loads the rules from a YAML rules file.
    pub fn load_rules(path: &Path) -> Result<Vec<Rule>> {
        let file = File::open(path)?;
        let rules_file: RulesFile = serde_yaml::from_reader(file)?;
        Ok(rules_file.rules)
    }
}
