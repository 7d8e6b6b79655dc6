// Error taxonomy for panmenu
// Cancel and empty picks are NOT errors - they travel as `Selection` values

use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// mpd could not be reached at all
    #[error("connection to mpd lost: {0}")]
    ConnectionLost(String),

    /// mpd answered but refused the command
    #[error("mpd command `{command}` failed: {message}")]
    Backend { command: String, message: String },

    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Stored playlist name is already taken
    #[error("playlist `{0}` already exists")]
    AlreadyExists(String),

    /// A picker label without a leading index
    #[error("malformed track label `{0}`")]
    Format(String),

    /// Bug in panmenu or a picker returning lines it was never offered
    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl Error {
    /// Backend-side failures can be retried from the top-level menu,
    /// everything else means panmenu itself is broken.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::ConnectionLost(_) | Error::Backend { .. } | Error::AlreadyExists(_)
        )
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Error::Invariant(msg.into())
    }
}
