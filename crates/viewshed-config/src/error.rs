//! Configuration error types.

use std::path::PathBuf;

/// Errors raised while locating, loading or saving `config.ron`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The platform has no per-user config directory and none was given.
    #[error("no config directory available; pass --config")]
    NoConfigDir,

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[source] ron::Error),
}
