//! `appdeploy deploy`: package the project's build output.

use crate::bundler::Deployer;
use crate::cli::RuntimeConfig;
use crate::error::Result;
use crate::metadata::{ProjectConfig, config_path};

/// Loads `deploy.toml` and packages the build for the current host.
pub async fn execute_deploy(config: &RuntimeConfig) -> Result<()> {
    let project_dir = std::path::absolute(config.project_dir())?;
    let config_file = config_path(&project_dir, config.config());

    let project = ProjectConfig::load(&config_file)?;
    let state = project.build_state(&project_dir);

    config.output().verbose(&format!(
        "Loaded {} ({}, binary {})",
        config_file.display(),
        state.binary_type(),
        state.binary_name()
    ));

    let deployer = Deployer::new(project.registry(), config.output().clone());
    config
        .output()
        .info(&format!("Packaging {} for {}", state.project_name(), deployer.platform()));

    let artifact = deployer.deploy(&state).await?;
    config.indent(&format!(
        "{} ({}, {} bytes)",
        artifact.path.display(),
        artifact.package_type.short_name(),
        artifact.size
    ));

    Ok(())
}
