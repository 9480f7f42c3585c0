use std::io;
use thiserror::Error;

/// Errors that stop a phase or the whole run
#[derive(Debug, Error)]
pub enum RigupError {
    #[error("Unsupported platform: {os}")]
    UnsupportedPlatform { os: String },

    #[error("Insufficient privilege: {0}")]
    InsufficientPrivilege(String),

    #[error("`{command}` exited with code {code}")]
    CommandFailure {
        command: String,
        code: i32,
        output: String,
    },

    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` timed out after {secs}s")]
    Timeout { command: String, secs: u64 },

    #[error("Interrupted")]
    Interrupted,

    #[error("Failed to switch effective identity: {0}")]
    Privilege(#[source] io::Error),

    #[error("Unknown capability: {0}")]
    UnknownCapability(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl RigupError {
    /// Whether the run must stop regardless of the failure policy
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RigupError::UnsupportedPlatform { .. }
                | RigupError::InsufficientPrivilege(_)
                | RigupError::Interrupted
                | RigupError::Privilege(_)
        )
    }
}
