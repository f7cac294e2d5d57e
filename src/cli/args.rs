//! Command line argument parsing and validation.

use super::{OutputManager, Verbosity};
use crate::bundler::BinaryType;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Package native builds and start new projects
#[derive(Parser, Debug)]
#[command(
    name = "appdeploy",
    version,
    about = "Package native builds and start new projects",
    long_about = "Package a native build into a distributable artifact.

On macOS the build becomes <Name>.app inside <Name>.dmg; on other Unix hosts
the install directory is archived as <Name>.tar.gz.

Usage:
  appdeploy deploy
  appdeploy --project-dir ~/src/starfield deploy
  appdeploy new Starfield
  appdeploy new Widgets --library"
)]
pub struct Args {
    /// Project directory holding deploy.toml
    #[arg(
        long,
        global = true,
        env = "APPDEPLOY_PROJECT_DIR",
        value_name = "DIR",
        default_value = "."
    )]
    pub project_dir: PathBuf,

    /// Configuration file (default: <project-dir>/deploy.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print every command and copied file
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Package the project's build output
    Deploy,

    /// Create a starter project
    New {
        /// Project name
        #[arg(value_name = "NAME")]
        name: String,

        /// Create a static library project
        #[arg(long, conflicts_with = "dynamic")]
        library: bool,

        /// Create a dynamic library project
        #[arg(long)]
        dynamic: bool,

        /// Target directory (default: <project-dir>/<NAME>)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Write into a non-empty directory
        #[arg(long)]
        force: bool,
    },
}

impl Command {
    /// Name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Command::Deploy => "deploy",
            Command::New { .. } => "new",
        }
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if let Command::New { name, .. } = &self.command {
            if name.trim().is_empty() {
                return Err("Project name is required".to_string());
            }
            if name.contains(['/', '\\']) {
                return Err(format!(
                    "Project name '{}' must not contain path separators",
                    name
                ));
            }
        }
        Ok(())
    }

    /// Verbosity selected by `-v` / `-q`
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.quiet)
    }
}

/// Target kind selected by `new`'s flags
pub fn binary_type_for(library: bool, dynamic: bool) -> BinaryType {
    match (library, dynamic) {
        (_, true) => BinaryType::DynamicLibrary,
        (true, false) => BinaryType::StaticLibrary,
        (false, false) => BinaryType::Executable,
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    output: OutputManager,
    project_dir: PathBuf,
    config: Option<PathBuf>,
}

impl RuntimeConfig {
    /// Create runtime configuration
    pub fn new(verbosity: Verbosity, project_dir: PathBuf, config: Option<PathBuf>) -> Self {
        Self {
            output: OutputManager::new(verbosity),
            project_dir,
            config,
        }
    }

    /// Get a reference to the output manager
    pub fn output(&self) -> &OutputManager {
        &self.output
    }

    /// Project directory
    pub fn project_dir(&self) -> &std::path::Path {
        &self.project_dir
    }

    /// Explicit `--config` path, if given
    pub fn config(&self) -> Option<&std::path::Path> {
        self.config.as_deref()
    }

    /// Print message
    pub fn println(&self, message: &str) {
        self.output.println(message);
    }

    /// Print error message (always shown)
    pub fn error_println(&self, message: &str) {
        self.output.error(message);
    }

    /// Print success message
    pub fn success_println(&self, message: &str) {
        self.output.success(message);
    }

    /// Print indented text
    pub fn indent(&self, message: &str) {
        self.output.indent(message);
    }

    /// Check if verbose output is enabled
    pub fn is_verbose(&self) -> bool {
        self.output.is_verbose()
    }

    /// Check if quiet output is enabled
    pub fn is_quiet(&self) -> bool {
        self.output.is_quiet()
    }
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self::new(args.verbosity(), args.project_dir.clone(), args.config.clone())
    }
}
