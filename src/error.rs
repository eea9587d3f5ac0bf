//! Error types for native resource loading.

use std::path::PathBuf;

use thiserror::Error;

/// Native resource error type.
#[derive(Error, Debug)]
pub enum Error {
    /// No supported platform variant matches the running system.
    ///
    /// This is a build/deployment misconfiguration, never a transient
    /// condition.
    #[error("No supported platform variant matches the running system")]
    UnsupportedPlatform,

    /// A library name was empty.
    #[error("Library name cannot be empty")]
    EmptyLibraryName,

    /// A library name could not be resolved by any strategy.
    ///
    /// Carries the original, un-prefixed input.
    #[error("Library '{0}' has not been found in path")]
    LibraryNotFound(String),

    /// The platform's dynamic loader rejected a resolved path.
    #[error("Failed to load native library '{path}': {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    /// A bundle archive could not be read or extracted.
    #[error("Failed to extract bundle '{path}': {reason}")]
    Extract { path: PathBuf, reason: String },

    /// The address of a released handle was accessed.
    #[error("The native handle is released")]
    HandleReleased,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
