use std::path::PathBuf;

use thiserror::Error;

use crate::codec::DecodeError;

/// Exit status used for every failure the launcher detects itself
pub const FAILURE_EXIT: u8 = 1;

/// Errors that end a launcher invocation
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("{0}")]
    Format(String),
    #[error("invalid percent-encoding: {0}")]
    Decode(#[from] DecodeError),
    #[error("Composition not specified")]
    MissingComposition,
    #[error("failed to launch {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to open {} (code {code}): {message}", .player.display())]
    ShellOpen {
        player: PathBuf,
        code: isize,
        message: String,
    },
}

impl LaunchError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            LaunchError::ShellOpen { code, .. } => u8::try_from(*code)
                .ok()
                .filter(|c| *c > 0)
                .unwrap_or(FAILURE_EXIT),
            _ => FAILURE_EXIT,
        }
    }
}
