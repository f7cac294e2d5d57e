//! Deployment orchestration.
//!
//! The [`Deployer`] looks at the host [`Platform`] and runs exactly one
//! packaging pipeline:
//!
//! - **macOS**: build `<temp>/deploy/<Name>.app`, then wrap `<temp>/deploy`
//!   into `<build>/<Name>.dmg`
//! - **other Unix**: archive the install tree into `<build>/<Name>.tar.gz`
//!
//! # Example
//!
//! ```no_run
//! use appdeploy::bundler::{BuildStateBuilder, Deployer, LibraryRegistry};
//! use appdeploy::cli::{OutputManager, Verbosity};
//!
//! # async fn example() -> appdeploy::bundler::Result<()> {
//! let state = BuildStateBuilder::new("Demo").root_dir("/work/demo").build();
//! let deployer = Deployer::new(LibraryRegistry::builtin(), OutputManager::new(Verbosity::Normal));
//!
//! let artifact = deployer.deploy(&state).await?;
//! println!("{} ({} bytes)", artifact.path.display(), artifact.size);
//! # Ok(())
//! # }
//! ```

use crate::{
    bundler::{
        BuildState, DeployedArtifact, LibraryRegistry, PackageType, Platform, Result,
        error::{Context, ErrorExt},
        platform::{macos, unix},
        utils::{
            fs,
            shell::{CommandRunner, SystemRunner},
        },
    },
    cli::OutputManager,
};
use std::path::PathBuf;

/// Name of the staging directory created under the build's temp directory.
pub const STAGING_DIR: &str = "deploy";

/// Top-level packaging entry point.
///
/// Generic over the [`CommandRunner`] so tests can observe the disk-image
/// command without `hdiutil`.
#[derive(Debug)]
pub struct Deployer<R = SystemRunner> {
    platform: Platform,
    registry: LibraryRegistry,
    runner: R,
    output: OutputManager,
}

impl Deployer<SystemRunner> {
    /// Creates a deployer for the current host that runs real commands.
    ///
    /// Commands are echoed when `output` is verbose.
    pub fn new(registry: LibraryRegistry, output: OutputManager) -> Self {
        let runner = SystemRunner::new(output.clone());
        Self::with_runner(registry, output, runner)
    }
}

impl<R: CommandRunner> Deployer<R> {
    /// Creates a deployer for the current host with a custom command runner.
    pub fn with_runner(registry: LibraryRegistry, output: OutputManager, runner: R) -> Self {
        Self {
            platform: Platform::current(),
            registry,
            runner,
            output,
        }
    }

    /// Overrides the detected host platform.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Platform whose pipeline [`deploy`](Self::deploy) will run.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Library registry used to select frameworks.
    pub fn registry(&self) -> &LibraryRegistry {
        &self.registry
    }

    /// Packages `state` for the deployer's platform.
    ///
    /// The platform alone decides the pipeline; nothing in `state` does.
    /// Any collaborator failure aborts the run and is returned unchanged
    /// apart from added context. Partial output is left in place.
    pub async fn deploy(&self, state: &BuildState) -> Result<DeployedArtifact> {
        self.output.section("Building deployment");
        log::debug!("Deploying {} for {}", state.project_name(), self.platform);

        let package_type = self.platform.package_type();
        let path = match self.platform {
            Platform::MacOs => self.deploy_macos(state).await?,
            Platform::Unix => self.deploy_unix(state).await?,
        };

        let size = tokio::fs::metadata(&path)
            .await
            .fs_context("reading artifact metadata", &path)?
            .len();

        self.output
            .success(&format!("Deployable archive written to {}", path.display()));

        Ok(DeployedArtifact {
            package_type,
            path,
            size,
        })
    }

    async fn deploy_macos(&self, state: &BuildState) -> Result<PathBuf> {
        let staging = staging_dir(state);
        let app_dir = staging.join(format!("{}.app", state.project_name()));
        let dmg_path = artifact_path(state, PackageType::Dmg);

        // Reject unusable names before touching the previous staging tree.
        macos::plist::signature(state.project_name(), "project name")?;
        macos::plist::signature(state.binary_name(), "binary name")?;

        fs::remove_dir_all(&staging).await?;

        macos::app::build_bundle(
            &staging,
            &app_dir,
            state.binary_dir(),
            state,
            &self.registry,
            &self.output,
        )
        .await
        .context("failed to build application bundle")?;

        macos::dmg::package_disk_image(&self.runner, &staging, &dmg_path, state.project_name())
            .await
            .context("failed to create disk image")?;

        Ok(dmg_path)
    }

    async fn deploy_unix(&self, state: &BuildState) -> Result<PathBuf> {
        let base = state.build_dir().join(state.project_name());
        unix::tarball::package_tarball(state.install_dir(), &base)
            .await
            .context("failed to create tarball")
    }
}

/// `<temp>/deploy`, recreated on each macOS deployment.
pub fn staging_dir(state: &BuildState) -> PathBuf {
    state.temp_dir().join(STAGING_DIR)
}

/// `<build>/<Name>.<ext>` for the given artifact kind.
pub fn artifact_path(state: &BuildState, package_type: PackageType) -> PathBuf {
    state
        .build_dir()
        .join(format!("{}.{}", state.project_name(), package_type.extension()))
}
