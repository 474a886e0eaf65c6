//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("no node links to {0}")]
    NotFound(String),

    #[error("no index chunk holds {0}")]
    NoChunk(String),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("failed to render template: {0}")]
    Render(#[from] askama::Error),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::NotFound(_) | CliError::NoChunk(_) => crate::exitcode::DATAERR,
            CliError::Render(_) => crate::exitcode::SOFTWARE,
            CliError::Application(e) => match e {
                ApplicationError::Domain(DomainError::AlreadyInstalled) => {
                    crate::exitcode::SOFTWARE
                }
                ApplicationError::Domain(_) | ApplicationError::Script { .. } => {
                    crate::exitcode::DATAERR
                }
                ApplicationError::Io { source, .. } => match source.kind() {
                    std::io::ErrorKind::NotFound => crate::exitcode::NOINPUT,
                    _ => crate::exitcode::IOERR,
                },
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
            },
        }
    }
}
