//! Error types for mask configuration, programmatic writes and edit commits.

use crate::id::FieldId;
use std::fmt;
use thiserror::Error;

/// Which configured separator a [`ConfigError`] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeparatorRole {
    Decimal,
    Thousands,
}

impl fmt::Display for SeparatorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeparatorRole::Decimal => f.write_str("decimal"),
            SeparatorRole::Thousands => f.write_str("thousands"),
        }
    }
}

/// Invalid mask configuration. Raised once, at construction; not retryable.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("decimal places must be non-negative, got {0}")]
    NegativeDecimalPlaces(i64),

    #[error("decimal places must be at most {max}, got {got}")]
    DecimalPlacesTooLarge { got: i64, max: usize },

    #[error("decimal and thousands separators must differ, both are {0:?}")]
    SeparatorCollision(char),

    #[error("{role} separator {ch:?} is a digit")]
    DigitSeparator { role: SeparatorRole, ch: char },

    #[error("{role} separator {ch:?} appears in the {affix} {text:?}")]
    SeparatorInAffix {
        role: SeparatorRole,
        ch: char,
        affix: &'static str,
        text: String,
    },

    #[error("failed to parse mask configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A programmatic write supplied a value that is neither absent nor numeric.
///
/// This is a caller contract violation; the prior value is left untouched.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("value must be a non-negative number, got {value}")]
pub struct InvalidValueError {
    pub value: String,
}

/// An in-progress edit would have produced non-numeric text.
///
/// Hosts receive this inside [`CommitOutcome::Rejected`](crate::CommitOutcome);
/// it is informational, the field state did not change.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("edit rejected: {text:?} is not a number")]
pub struct ParseRejected {
    pub text: String,
}

/// Errors from id-keyed operations on a [`MaskStore`](crate::MaskStore).
#[derive(Clone, Debug, PartialEq, Error)]
pub enum StoreError {
    #[error("no mask bound for {0}")]
    UnknownField(FieldId),

    #[error(transparent)]
    InvalidValue(#[from] InvalidValueError),
}
