use mask_core::{ConfigError, InvalidValueError};
use std::path::PathBuf;
use thiserror::Error;

/// Failure to load or replay a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to read session {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed session: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid mask config: {0}")]
    Config(#[from] ConfigError),

    #[error("initial value rejected: {0}")]
    Initial(#[source] InvalidValueError),

    /// A step could not run, or ran and missed one of its expectations.
    /// `step` is 1-based.
    #[error("step {step} ({op}): {message}")]
    Step {
        step: usize,
        op: &'static str,
        message: String,
    },
}

impl SessionError {
    /// 1-based index of the failing step, if the failure belongs to one.
    pub fn step(&self) -> Option<usize> {
        match self {
            SessionError::Step { step, .. } => Some(*step),
            _ => None,
        }
    }
}
