//! Error types for the CLI application.
//!
//! Command handlers return [`CliError`]; the hand loop and transports have
//! their own [`SessionError`] and [`TransportError`] so a failed hand can be
//! logged and skipped without aborting a whole replay.

use std::fmt;

use actline_engine::errors::{DecodeError, GameError};
use thiserror::Error;

/// Custom error type for CLI operations.
///
/// This enum encompasses all error types that can occur during CLI execution,
/// allowing for proper error propagation using the `?` operator.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Engine-related error
    Engine(String),

    /// Operation was interrupted (e.g., by user with Ctrl+C)
    Interrupted(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(msg) => write!(f, "Engine error: {}", msg),
            CliError::Interrupted(msg) => write!(f, "Interrupted: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

// Plain-string failures from io_utils
impl From<String> for CliError {
    fn from(error: String) -> Self {
        CliError::InvalidInput(error)
    }
}

impl From<DecodeError> for CliError {
    fn from(error: DecodeError) -> Self {
        CliError::Engine(error.to_string())
    }
}

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        CliError::Config(error.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        CliError::InvalidInput(error.to_string())
    }
}

/// Failures reported by a [`crate::transport::Transport`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The remote side answered with an `error_msg`
    #[error("Remote error: {0}")]
    Remote(String),
    /// The client sent something the recording never saw
    #[error("Client sent {sent:?} but the recorded history continues as {recorded:?}")]
    Diverged { sent: String, recorded: String },
    #[error("Recording ended before the hand did")]
    Exhausted,
}

/// Reasons a single hand could not be played to the end.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("Cannot decode {history:?}: {source}")]
    Decode {
        history: String,
        #[source]
        source: DecodeError,
    },
    #[error("Invalid hand data: {0}")]
    Game(#[from] GameError),
    #[error("History {history:?} leaves nothing for the client to do")]
    NotClientTurn { history: String },
}
