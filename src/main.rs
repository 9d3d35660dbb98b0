//! The main entry point for the `stringle` command-line application.
//!
//! This file is responsible for parsing command-line arguments, validating
//! the configuration (which must fail before any file is touched), and
//! wiring the walker, coordinator, and report renderer together.

use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::BufWriter;
use std::process;
use stringle::cli::{self, parse_replacements};
use stringle::config::{ConfigLoader, RunOptions};
use stringle::coordinator::{RunCoordinator, RunObserver, SilentObserver};
use stringle::errors::Result;
use stringle::report::{OutputFormat, SummaryFormatter};
use stringle::ruleset::RuleSet;
use stringle::transformer::{FileOutcome, FileTransformer};
use stringle::walker::FileWalker;

/// Drives a progress bar from coordinator events.
struct ProgressObserver {
    bar: ProgressBar,
}

impl ProgressObserver {
    fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("##-"),
        );
        Self { bar }
    }
}

impl RunObserver for ProgressObserver {
    fn file_done(&self, outcome: &FileOutcome) {
        self.bar.inc(1);
        self.bar
            .set_message(format!("Processing: {}", outcome.path.display()));
    }

    fn run_done(&self, _summary: &stringle::coordinator::RunSummary) {
        self.bar.finish_and_clear();
    }
}

fn main() {
    let args = cli::parse_args();
    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(args: cli::Args) -> Result<()> {
    if !args.directory.exists() {
        return Err(format!("Directory not found: {}", args.directory.display()).into());
    }
    if !args.directory.is_dir() {
        return Err(format!("Not a directory: {}", args.directory.display()).into());
    }

    // Load and validate the rules before any file is touched: a bad rule
    // collection or pattern aborts the whole run with no partial effects.
    let rules = if let Some(config) = &args.config {
        let resolved = ConfigLoader::find_config(config, &args.directory)?;
        ConfigLoader::load_rules(&resolved)?
    } else {
        parse_replacements(&args.replacements)?
    };

    let options = RunOptions {
        case_sensitive: !args.ignore_case,
        use_regex: args.regex,
        sort_by_length: !args.no_sort,
        dry_run: args.dry_run,
    };
    let rule_set = RuleSet::build(rules, &options)?;

    let mut walker = FileWalker::new(&args.directory);
    if !args.ignore_dirs.is_empty() {
        walker = walker.ignore_dirs(args.ignore_dirs.clone());
    }
    if !args.ignore_files.is_empty() {
        walker = walker.ignore_files(args.ignore_files.clone());
    }
    if !args.ignore_extensions.is_empty() {
        walker = walker.ignore_extensions(args.ignore_extensions.clone());
    }
    if !args.extensions.is_empty() {
        walker = walker.include_extensions(args.extensions.clone());
    }
    let files = walker.selected_files()?;

    let format = OutputFormat::from(args.format.as_str());
    let transformer = FileTransformer::new(&rule_set, options.dry_run);
    let coordinator = RunCoordinator::new(transformer);

    // The progress bar would interleave with machine-readable output
    let summary = match format {
        OutputFormat::Text => {
            let progress = ProgressObserver::new(files.len());
            coordinator.run(&files, &progress)
        }
        OutputFormat::Json => coordinator.run(&files, &SilentObserver),
    };

    let formatter = SummaryFormatter::new(format, args.verbose, args.dry_run);
    match &args.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            formatter.write_summary(&mut writer, &summary)?;
        }
        None => {
            let stdout = std::io::stdout();
            formatter.write_summary(&mut stdout.lock(), &summary)?;
        }
    }

    Ok(())
}
