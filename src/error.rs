//! Crate-wide error type.
//!
//! Errors are local: nothing escapes a per-block call beyond what
//! [`crate::config::EngineConfig`] construction and lookups can return.
//! `process`/`finish` are infallible by construction, since every failure
//! mode they could hit was already ruled out when the config was built.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("channel count {got} outside the supported range [{min}, {max}]")]
    InvalidChannelCount { got: usize, min: usize, max: usize },

    #[error("block size {0} must be even")]
    OddBlockSize(usize),

    #[error("unknown parameter id: {0:?}")]
    UnknownParameter(String),

    #[error("could not open debug CSV sink at {path:?}")]
    DebugSinkUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
