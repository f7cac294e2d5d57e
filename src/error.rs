//! Error types for appdeploy operations.
//!
//! Packaging failures come from [`crate::bundler::Error`]; this module wraps
//! them together with configuration and CLI errors and attaches recovery
//! suggestions for the command line.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for appdeploy operations
pub type Result<T> = std::result::Result<T, DeployError>;

/// Main error type for all appdeploy operations
#[derive(Error, Debug)]
pub enum DeployError {
    /// Packaging errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] crate::bundler::Error),

    /// Project configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML serialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}

/// `deploy.toml` errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No configuration file at the expected location
    #[error("No project configuration found at {path}")]
    NotFound {
        /// Path where the file was expected
        path: PathBuf,
    },

    /// The file exists but could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Configuration file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or does not match the schema
    #[error("Failed to parse {path}: {source}")]
    Parse {
        /// Configuration file
        path: PathBuf,
        /// Parser error
        #[source]
        source: toml::de::Error,
    },

    /// Parsed values are inconsistent
    #[error("Invalid project configuration: {reason}")]
    Invalid {
        /// Reason for the error
        reason: String,
    },
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// `new` target already has content
    #[error("Directory {path} is not empty")]
    TargetNotEmpty {
        /// Target directory
        path: PathBuf,
    },
}

impl DeployError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        use crate::bundler::Error as BundlerError;

        match self {
            DeployError::Config(ConfigError::NotFound { path }) => vec![
                format!("Create {} with a [project] section", path.display()),
                "Run `appdeploy new <Name>` to start a fresh project".to_string(),
                "Point --project-dir at the directory that holds deploy.toml".to_string(),
            ],
            DeployError::Config(ConfigError::Parse { .. }) => vec![
                "Check deploy.toml for typos in section and key names".to_string(),
                "Valid project types are executable, static-library and dynamic-library"
                    .to_string(),
            ],
            DeployError::Cli(CliError::TargetNotEmpty { .. }) => vec![
                "Choose another directory with --dir".to_string(),
                "Pass --force to write into the existing directory".to_string(),
            ],
            DeployError::Bundler(e) => match e.root_cause() {
                BundlerError::FrameworkNotFound { name, path } => vec![
                    format!("Install the {} framework under {}", name, path.display()),
                    "Set [paths] frameworks in deploy.toml to its location".to_string(),
                    format!("Mark {} with deploy = false in a [[library]] entry", name),
                ],
                BundlerError::CommandFailed { command, .. } => vec![
                    format!("Make sure `{}` is installed and on PATH", command),
                ],
                BundlerError::CommandStatus { .. } => vec![
                    "Re-run with --verbose to see the exact command".to_string(),
                    "Check free disk space in the build directory".to_string(),
                ],
                BundlerError::Fs { path, .. } => vec![
                    format!("Check that {} exists and is accessible", path.display()),
                    "Build the project before deploying it".to_string(),
                ],
                _ => vec!["Check the error message above for specific details".to_string()],
            },
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
