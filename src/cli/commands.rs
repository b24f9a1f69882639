//! Command dispatch

use std::fs;
use std::io;
use std::path::Path;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::FileSystem;
use crate::infrastructure::{InfraError, InfraResult};

pub fn execute(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Config { command }) => config_command(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => translate(cli),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    Ok(Settings::load(cli.config.as_deref())?)
}

#[instrument(skip(cli))]
fn translate(cli: &Cli) -> CliResult<()> {
    let input = cli
        .input
        .as_deref()
        .ok_or_else(|| CliError::Usage("--input <path> is required".into()))?;
    let output_path = cli
        .output
        .as_deref()
        .ok_or_else(|| CliError::Usage("--output <path> is required".into()))?;
    if same_file(input, output_path) {
        return Err(CliError::InvalidArgs(format!(
            "input and output are the same file: {}",
            input.display()
        )));
    }

    let settings = load_settings(cli)?;
    debug!("translate: settings={:?}", settings);
    let container = ServiceContainer::new(settings);

    let report = container
        .translate_service()
        .translate_file(input, output_path)?;

    output::success(&format!(
        "Conversion successful: {} -> {} ({} lines)",
        report.input.display(),
        report.output.display(),
        report.lines
    ));
    Ok(())
}

/// Paths name the same file once both resolve; otherwise compare as written.
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn config_command(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Init { global } => {
            if !global {
                output::info(&Settings::template());
                return Ok(());
            }
            let path = global_config_path().ok_or_else(|| {
                CliError::Usage("cannot determine global config directory".into())
            })?;
            init_config_file(&path)
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::action("global", &"(unavailable)"),
            }
            if let Some(path) = &cli.config {
                output::action("explicit", &path.display());
            }
            Ok(())
        }
    }
}

fn init_config_file(path: &Path) -> CliResult<()> {
    let container = ServiceContainer::new(Settings::default());
    if container.fs.exists(path) {
        return Err(CliError::Usage(format!(
            "config file already exists: {}",
            path.display()
        )));
    }
    write_template(container.fs.as_ref(), path)?;
    output::action("Created", &path.display());
    Ok(())
}

fn write_template(filesystem: &dyn FileSystem, path: &Path) -> InfraResult<()> {
    filesystem
        .ensure_parent(path)
        .and_then(|()| filesystem.write(path, &Settings::template()))
        .map_err(|e| InfraError::io(format!("write config {}", path.display()), e))
}
