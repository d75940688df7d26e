use std::{env, fs, path::Path};

use anyhow::Result;

use super::{
    args::{Arguments, Command, ExtractCommand},
    exit_status::ExitStatus,
    report,
};
use crate::config::{CONFIG_FILE_NAME, Config, default_config_json, load_config};
use crate::extraction::discovery;
use crate::extraction::pipeline::{ExtractOptions, extract_from_files};

/// Main entry point for the keylift CLI.
///
/// Dispatches to the appropriate command handler based on the parsed
/// arguments. Extraction failures are reported and mapped to a non-zero
/// exit status; `Err` is reserved for internal errors (config parsing,
/// bad environment).
pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match args.command {
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::Init) => {
            init()?;
            eprintln!("Created {}", CONFIG_FILE_NAME);
            Ok(ExitStatus::Success)
        }
        None => anyhow::bail!("No command provided. Use --help to see available commands."),
    }
}

/// Merge CLI arguments over file configuration (CLI > config file > defaults).
///
/// Each field falls back independently: patterns given on the command line
/// replace the configured ones wholesale, the scalar fields fall back
/// per-field.
fn merge_options(cmd: &ExtractCommand, config: Config) -> ExtractOptions {
    ExtractOptions {
        patterns: if cmd.patterns.is_empty() {
            config.patterns
        } else {
            cmd.patterns.clone()
        },
        extractor: cmd.extractor.clone().or(config.extractor),
        default_namespace: cmd.default_namespace.clone().or(config.default_namespace),
        concurrency: cmd.concurrency.or(config.concurrency),
    }
}

fn extract(cmd: ExtractCommand) -> Result<ExitStatus> {
    let cwd = env::current_dir()?;
    let config_result = load_config(&cwd)?;
    let verbose = cmd.common.verbose;

    if verbose && !config_result.from_file {
        eprintln!(
            "Note: No {} found, using default configuration",
            CONFIG_FILE_NAME
        );
    }

    let options = merge_options(&cmd, config_result.config);

    let files = match discovery::discover_files(&options.patterns) {
        Ok(files) => files,
        Err(err) => {
            report::print_error(&err);
            return Ok(ExitStatus::Failure);
        }
    };

    if verbose {
        eprintln!(
            "Discovered {} file(s) from {} pattern(s)",
            files.len(),
            options.patterns.len()
        );
    }

    match extract_from_files(&files, &options) {
        Ok(keys) => {
            report::print_keys(&keys);
            Ok(ExitStatus::Success)
        }
        Err(err) => {
            report::print_error(&err);
            Ok(ExitStatus::Failure)
        }
    }
}

fn init() -> Result<()> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        anyhow::bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(config_path, default_config_json()?)?;
    Ok(())
}
