//! `appdeploy new`: create a starter project and its `deploy.toml`.

use crate::bundler::utils::fs;
use crate::cli::{Command, RuntimeConfig, binary_type_for};
use crate::error::{CliError, Result};
use crate::metadata::{CONFIG_FILE, ProjectConfig};
use crate::scaffold;
use std::path::Path;

/// Writes the starter tree and a matching `deploy.toml`.
///
/// Refuses a non-empty target directory unless `--force` is given.
pub async fn execute_new(command: &Command, config: &RuntimeConfig) -> Result<()> {
    let Command::New {
        name,
        library,
        dynamic,
        dir,
        force,
    } = command
    else {
        return Err(CliError::InvalidArguments {
            reason: format!("'{}' is not the new command", command.name()),
        }
        .into());
    };

    let target = match dir {
        Some(dir) => config.project_dir().join(dir),
        None => config.project_dir().join(name),
    };

    if !force && has_entries(&target).await? {
        return Err(CliError::TargetNotEmpty { path: target }.into());
    }

    let project = ProjectConfig::new(name, binary_type_for(*library, *dynamic));
    let state = project.build_state(&target);
    let today = chrono::Local::now().date_naive();

    let written = scaffold::generate_starter_files(&target, &state, today, config.output()).await?;

    let config_file = target.join(CONFIG_FILE);
    fs::write_file(&config_file, project.to_toml_string()?).await?;

    config.success_println(&format!(
        "Created {} {} in {}",
        state.binary_type(),
        name,
        target.display()
    ));
    if config.is_verbose() {
        for path in written.iter().chain(std::iter::once(&config_file)) {
            config.indent(&path.display().to_string());
        }
    }

    Ok(())
}

async fn has_entries(dir: &Path) -> Result<bool> {
    match tokio::fs::read_dir(dir).await {
        Ok(mut entries) => Ok(entries.next_entry().await?.is_some()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}
