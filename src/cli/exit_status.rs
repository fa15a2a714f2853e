use std::process::ExitCode;

use crate::core::ApiError;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed successfully
/// - `NotFound` (1): A requested export has no supported declaration
/// - `Error` (2): Command failed (configuration, malformed declaration, I/O)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed successfully.
    Success,
    /// A requested export name was not found.
    NotFound,
    /// Command failed due to an error.
    Error,
}

impl ExitStatus {
    /// Exit status for an error surfaced by a command.
    pub fn from_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<ApiError>() {
            Some(ApiError::NotFound { .. }) => Self::NotFound,
            _ => Self::Error,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::NotFound => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
