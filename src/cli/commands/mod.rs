//! Command execution functions.

mod deploy;
mod new;

use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::Result;

pub use deploy::execute_deploy;
pub use new::execute_new;

/// Execute the main command based on parsed arguments
pub async fn execute_command(args: Args) -> Result<i32> {
    if let Err(validation_error) = args.validate() {
        // Validation errors are shown even in quiet mode
        let output = super::OutputManager::new(super::Verbosity::Normal);
        output.error(&format!("Invalid arguments: {}", validation_error));
        return Ok(1);
    }

    let config = RuntimeConfig::from(&args);

    let result = match &args.command {
        Command::Deploy => execute_deploy(&config).await,
        Command::New { .. } => execute_new(&args.command, &config).await,
    };

    match result {
        Ok(()) => Ok(0),
        Err(e) => {
            config.error_println(&format!(
                "Command '{}' failed: {}",
                args.command.name(),
                e
            ));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() && !config.is_quiet() {
                config.println("\n💡 Recovery suggestions:");
                for suggestion in suggestions {
                    config.println(&format!("  • {}", suggestion));
                }
            }

            Ok(1)
        }
    }
}
