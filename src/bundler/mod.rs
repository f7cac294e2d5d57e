//! Deployment packaging for native builds.
//!
//! Turns the output of a build into a single distributable file:
//!
//! | Host | Artifact | Contents |
//! |------|----------|----------|
//! | macOS | `<build>/<Name>.dmg` | `<Name>.app` with binary, data files and frameworks |
//! | other Unix | `<build>/<Name>.tar.gz` | the install directory |
//!
//! # Bundle Layout
//!
//! ```text
//! <Name>.app/Contents/
//!     Info.plist
//!     PkgInfo
//!     MacOS/<binary>
//!     Resources/<data-files contents>
//!     Frameworks/<Framework>.framework
//! ```
//!
//! # Frameworks
//!
//! A library listed by the build is embedded only when the
//! [`LibraryRegistry`] knows it as a framework marked for deployment.
//! Anything else is skipped silently.

#![warn(missing_docs)]

mod builder;
pub mod error;
pub mod library;
pub mod platform;
mod settings;
pub mod utils;

// Public re-exports
pub use builder::{Deployer, STAGING_DIR, artifact_path, staging_dir};
pub use error::{Context, Error, ErrorExt, Result};
pub use library::{LibraryDescriptor, LibraryKind, LibraryRegistry};
pub use platform::macos::app::{BundleLayout, build_bundle};
pub use platform::macos::dmg::package_disk_image;
pub use platform::unix::tarball::package_tarball;
pub use platform::{PackageType, Platform};
pub use settings::{BinaryType, BuildState, BuildStateBuilder, DATA_FILES_DIR, SYSTEM_FRAMEWORKS_DIR};
pub use utils::shell::{CommandRunner, ShellCommand, SystemRunner};

/// A packaged artifact produced by [`Deployer::deploy`].
#[derive(Debug, Clone)]
pub struct DeployedArtifact {
    /// The format that was created.
    pub package_type: PackageType,

    /// Location of the artifact file.
    pub path: std::path::PathBuf,

    /// Size of the artifact in bytes.
    pub size: u64,
}
