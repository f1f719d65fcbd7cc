use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed, nothing left to migrate
/// - `Failure` (1): Pending blocks remain (check, or fix in dry-run mode)
/// - `Error` (2): A file could not be read or written, or the config is invalid
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed, nothing left to migrate.
    Success,
    /// Pending blocks remain.
    Failure,
    /// Command failed due to an I/O or configuration error.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
