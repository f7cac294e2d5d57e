//! # appdeploy
//!
//! Packaging and project scaffolding for native desktop applications.
//!
//! ## Features
//!
//! - **Application bundles**: `<Name>.app` with `Info.plist`, `PkgInfo`,
//!   data files and deployable frameworks, wrapped in a `.dmg` on macOS
//! - **Tarballs**: the install tree as `<Name>.tar.gz` on other Unix hosts
//! - **Starter projects**: source, documentation and journal skeletons for
//!   executables and libraries
//!
//! ## Usage
//!
//! ```bash
//! appdeploy new Starfield          # create a starter executable project
//! appdeploy new Widgets --library  # create a static library project
//! appdeploy deploy                 # package the build described by deploy.toml
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;
pub mod scaffold;

// Re-export main types for public API
pub use bundler::{BuildState, BuildStateBuilder, DeployedArtifact, Deployer, PackageType, Platform};
pub use cli::Args;
pub use error::{CliError, ConfigError, DeployError, Result};
pub use metadata::ProjectConfig;
pub use scaffold::generate_starter_files;
