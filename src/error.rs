//! Error types for the configuration store

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong inside the profile store.
///
/// None of these are fatal to the hosting application: load failures
/// degrade to defaults before they ever surface here, and mutation
/// failures leave the in-memory state untouched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot delete the last remaining profile")]
    CannotDeleteLastProfile,

    #[error("no profile at index {0}")]
    ProfileIndexOutOfRange(usize),

    #[error("unknown configuration key `{0}`")]
    UnknownKey(String),

    #[error("wrong value type for key `{key}`, expected {expected}")]
    WrongValueType { key: String, expected: &'static str },

    #[error("config I/O failed at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}
