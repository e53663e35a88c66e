//! Command dispatch and handlers.

pub mod config;
pub mod sync;

use std::path::Path;
use std::process::ExitCode;

use crate::cli::{Command, ConfigAction};
use crate::context::ServiceContext;
use crate::settings::{settings_path, SettingField};

/// Dispatch a parsed command to its handler using live adapters.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command, settings: Option<&Path>) -> Result<ExitCode, String> {
    let path = settings_path(settings);
    dispatch_with_context(command, ServiceContext::live(), &path)
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch_with_context(
    command: &Command,
    ctx: ServiceContext,
    settings: &Path,
) -> Result<ExitCode, String> {
    match command {
        Command::Sync => Ok(if sync::run(ctx, settings)?.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }),
        Command::Config { action } => {
            match action {
                ConfigAction::Show => config::show(&ctx, settings),
                ConfigAction::SetCommand { value } => {
                    config::set(&ctx, settings, SettingField::Command, value);
                }
                ConfigAction::SetWorkingDir { value } => {
                    config::set(&ctx, settings, SettingField::WorkingDirectory, value);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
