//! Session files: a mask configuration, an optional initial value and the
//! host events to replay, each with optional expectations.
//!
//! ```toml
//! name = "typing a price"
//! initial = 12.5
//!
//! [config]
//! prefix = "$"
//! decimal_places = 2
//!
//! [[step]]
//! op = "focus"
//! expect_display = "12.5"
//!
//! [[step]]
//! op = "type"
//! text = "9"
//! expect_outcome = "rejected(precision_exceeded)"
//! ```

use crate::error::SessionError;
use mask_core::{MaskOptions, MaskValue};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Session {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub config: MaskOptions,
    #[serde(default)]
    pub initial: Option<ValueSpec>,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

impl Session {
    pub fn from_toml_str(text: &str) -> Result<Self, SessionError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let text = fs::read_to_string(path).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

/// A value as written in a session file: a TOML number or string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueSpec {
    Number(f64),
    Text(String),
}

impl From<ValueSpec> for MaskValue {
    fn from(spec: ValueSpec) -> Self {
        match spec {
            ValueSpec::Number(n) => MaskValue::Number(n),
            ValueSpec::Text(s) => MaskValue::Text(s),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Op {
    Focus,
    Blur,
    /// Type `text` one character at a time.
    Type,
    /// Ask the edit filter about the single character in `text` at `at`
    /// (default: the caret). Never edits.
    Key,
    Backspace,
    Delete,
    Caret,
    /// Select from `anchor` to `at`.
    Select,
    Paste,
    /// Programmatic write of `value`; a missing value writes an empty one.
    Set,
    Clear,
    Disable,
    Enable,
}

impl Op {
    pub fn name(self) -> &'static str {
        match self {
            Op::Focus => "focus",
            Op::Blur => "blur",
            Op::Type => "type",
            Op::Key => "key",
            Op::Backspace => "backspace",
            Op::Delete => "delete",
            Op::Caret => "caret",
            Op::Select => "select",
            Op::Paste => "paste",
            Op::Set => "set",
            Op::Clear => "clear",
            Op::Disable => "disable",
            Op::Enable => "enable",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    pub op: Op,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub at: Option<usize>,
    #[serde(default)]
    pub anchor: Option<usize>,
    #[serde(default)]
    pub value: Option<ValueSpec>,

    #[serde(default)]
    pub expect_display: Option<String>,
    /// `""` expects an absent raw value.
    #[serde(default)]
    pub expect_raw: Option<String>,
    #[serde(default)]
    pub expect_formatted: Option<String>,
    #[serde(default)]
    pub expect_outcome: Option<String>,
    /// Total change notifications so far.
    #[serde(default)]
    pub expect_changes: Option<usize>,
    /// Total touch notifications so far.
    #[serde(default)]
    pub expect_touched: Option<usize>,
}

impl Step {
    pub fn new(op: Op) -> Self {
        Self {
            op,
            text: None,
            at: None,
            anchor: None,
            value: None,
            expect_display: None,
            expect_raw: None,
            expect_formatted: None,
            expect_outcome: None,
            expect_changes: None,
            expect_touched: None,
        }
    }
}
