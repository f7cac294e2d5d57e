//! External command execution.
//!
//! Packaging steps that need a system tool (such as `hdiutil`) describe the
//! invocation as a [`ShellCommand`] and hand it to a [`CommandRunner`]. The
//! production runner is [`SystemRunner`]; tests substitute their own runner
//! to observe commands without executing them.

use crate::{
    bundler::error::{Error, Result},
    cli::OutputManager,
};
use std::{
    ffi::OsString,
    fmt,
    future::Future,
    path::{Path, PathBuf},
};

/// A program and its arguments, run to completion without a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    program: String,
    args: Vec<OsString>,
}

impl ShellCommand {
    /// Creates a command for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Appends a path argument.
    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.as_os_str())
    }

    /// Program name as given.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments in order.
    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }
}

impl fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Runs external commands on behalf of the packagers.
///
/// Implementations must block the pipeline until the command finishes and
/// must treat a non-zero exit status as an error.
pub trait CommandRunner {
    /// Runs `command` to completion.
    fn run(&self, command: &ShellCommand) -> impl Future<Output = Result<()>> + Send;
}

/// Runs commands as child processes of this one.
///
/// Each command line is echoed through `output` in verbose mode.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    output: OutputManager,
}

impl SystemRunner {
    /// Creates a runner reporting through `output`.
    pub fn new(output: OutputManager) -> Self {
        Self { output }
    }

    fn resolve(program: &str) -> PathBuf {
        match which::which(program) {
            Ok(path) => path,
            Err(e) => {
                log::debug!("{} not found in PATH ({}), trying it as given", program, e);
                PathBuf::from(program)
            }
        }
    }
}

impl CommandRunner for SystemRunner {
    async fn run(&self, command: &ShellCommand) -> Result<()> {
        self.output.verbose(&command.to_string());
        log::debug!("Running: {}", command);

        let output = tokio::process::Command::new(Self::resolve(command.program()))
            .args(command.get_args())
            .output()
            .await
            .map_err(|error| Error::CommandFailed {
                command: command.to_string(),
                error,
            })?;

        if !output.status.success() {
            return Err(Error::CommandStatus {
                command: command.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Verbosity;

    fn system_runner(verbosity: Verbosity) -> SystemRunner {
        SystemRunner::new(OutputManager::new(verbosity))
    }

    #[test]
    fn display_quotes_arguments_with_spaces() {
        let cmd = ShellCommand::new("hdiutil")
            .args(["create", "-volname"])
            .arg("My Game")
            .path_arg(Path::new("/tmp/out.dmg"));
        assert_eq!(
            cmd.to_string(),
            "hdiutil create -volname \"My Game\" /tmp/out.dmg"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn system_runner_reports_non_zero_exit() {
        let runner = system_runner(Verbosity::Quiet);
        let err = runner.run(&ShellCommand::new("false")).await.unwrap_err();
        assert!(matches!(err, Error::CommandStatus { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn system_runner_accepts_success() {
        let runner = system_runner(Verbosity::Quiet);
        runner.run(&ShellCommand::new("true")).await.unwrap();
    }

    #[tokio::test]
    async fn system_runner_reports_missing_program() {
        let runner = system_runner(Verbosity::Quiet);
        let err = runner
            .run(&ShellCommand::new("appdeploy-no-such-program"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::CommandFailed { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn system_runner_echoes_only_through_verbose_output() {
        let verbose = system_runner(Verbosity::Verbose);
        assert!(verbose.output.is_verbose());
        verbose.run(&ShellCommand::new("true")).await.unwrap();

        let quiet = system_runner(Verbosity::Quiet);
        assert!(!quiet.output.is_verbose());
        quiet.run(&ShellCommand::new("true")).await.unwrap();
    }
}
