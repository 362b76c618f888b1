//! Replaying a [`Session`] against a [`MaskState`].
//!
//! Every step produces one transcript line and one [`StepRecord`]. The
//! transcript is the golden-test format:
//!
//! ```text
//! init raw=12.5 display="$12.50"
//! focus -> ok | display="12.5" caret=4 raw=12.5 changes=0 touched=0
//! type "9" -> rejected(precision_exceeded) | display="12.5" caret=4 raw=12.5 changes=0 touched=0
//! EOF
//! ```

use crate::error::SessionError;
use crate::escape_text;
use crate::session::{Op, Session, Step, ValueSpec};
use mask_core::{
    EditOutcome, KeyDecision, KeyIntent, MaskConfig, MaskOptions, MaskState, MaskValue,
    PasteOutcome, RejectReason,
};
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// What one step did and the field state right after it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StepRecord {
    /// 1-based.
    pub index: usize,
    pub op: Op,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
    pub outcome: String,
    pub display: String,
    pub caret: usize,
    pub raw: Option<String>,
    pub formatted: String,
    pub changes: usize,
    pub touched: usize,
}

impl StepRecord {
    fn transcript_line(&self) -> String {
        let mut line = self.op.name().to_string();
        if let Some(arg) = &self.arg {
            line.push(' ');
            line.push_str(arg);
        }
        line.push_str(&format!(
            " -> {} | display=\"{}\" caret={} raw={} changes={} touched={}",
            self.outcome,
            escape_text(&self.display),
            self.caret,
            raw_label(self.raw.as_deref()),
            self.changes,
            self.touched
        ));
        line
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FinalState {
    pub raw: Option<String>,
    pub formatted: String,
    pub display: String,
    pub caret: usize,
    pub focused: bool,
    pub disabled: bool,
    pub value_revision: u64,
    /// Every value handed to the change notifier, in order.
    pub changes: Vec<Option<f64>>,
    pub touched: usize,
}

/// JSON-serializable account of a replay.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReplaySnapshot {
    pub name: Option<String>,
    pub config: MaskOptions,
    pub steps: Vec<StepRecord>,
    #[serde(rename = "final")]
    pub final_state: FinalState,
}

impl ReplaySnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Replay {
    pub transcript: Vec<String>,
    pub snapshot: ReplaySnapshot,
}

/// Run every step of `session`, stopping at the first step that cannot run
/// or misses an expectation.
pub fn replay(session: &Session) -> Result<Replay, SessionError> {
    let config = MaskConfig::new(session.config.clone())?;
    let initial = session
        .initial
        .clone()
        .map_or(MaskValue::Empty, MaskValue::from);
    let mut state = MaskState::with_value(config, initial).map_err(SessionError::Initial)?;

    let changes = Rc::new(RefCell::new(Vec::new()));
    let touched = Rc::new(Cell::new(0usize));
    {
        let changes = Rc::clone(&changes);
        state.register_change_notifier(move |value| changes.borrow_mut().push(value));
        let touched = Rc::clone(&touched);
        state.register_touch_notifier(move || touched.set(touched.get() + 1));
    }

    let mut transcript = vec![format!(
        "init raw={} display=\"{}\"",
        raw_label(state.raw_value()),
        escape_text(state.display_text())
    )];
    let mut steps = Vec::with_capacity(session.steps.len());

    for (i, step) in session.steps.iter().enumerate() {
        let index = i + 1;
        let fail = |message: String| SessionError::Step {
            step: index,
            op: step.op.name(),
            message,
        };

        let (arg, outcome) = apply(&mut state, step).map_err(fail)?;
        let record = StepRecord {
            index,
            op: step.op,
            arg,
            outcome,
            display: state.display_text().to_string(),
            caret: state.caret(),
            raw: state.raw_value().map(str::to_string),
            formatted: state.formatted_value().to_string(),
            changes: changes.borrow().len(),
            touched: touched.get(),
        };
        let line = record.transcript_line();
        log::debug!(target: "mask.session", "step {index}: {line}");
        transcript.push(line);
        check_expectations(step, &record).map_err(fail)?;
        steps.push(record);
    }
    transcript.push("EOF".to_string());

    let final_state = FinalState {
        raw: state.raw_value().map(str::to_string),
        formatted: state.formatted_value().to_string(),
        display: state.display_text().to_string(),
        caret: state.caret(),
        focused: state.is_focused(),
        disabled: state.is_disabled(),
        value_revision: state.value_revision(),
        changes: changes.borrow().clone(),
        touched: touched.get(),
    };

    Ok(Replay {
        transcript,
        snapshot: ReplaySnapshot {
            name: session.name.clone(),
            config: session.config.clone(),
            steps,
            final_state,
        },
    })
}

/// Apply one step, returning its rendered argument and outcome.
fn apply(state: &mut MaskState, step: &Step) -> Result<(Option<String>, String), String> {
    let ok = || "ok".to_string();
    let applied = match step.op {
        Op::Focus => {
            state.handle_focus_enter();
            (None, ok())
        }
        Op::Blur => {
            state.handle_focus_leave();
            (None, ok())
        }
        Op::Type => {
            let text = required(step.text.as_deref(), "text")?;
            let outcomes: Vec<String> = state.type_str(text).into_iter().map(edit_label).collect();
            (Some(quoted(text)), outcomes.join(","))
        }
        Op::Key => {
            let text = required(step.text.as_deref(), "text")?;
            let mut chars = text.chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                return Err(format!("key takes exactly one character, got {text:?}"));
            };
            let caret = step.at.unwrap_or(state.caret());
            let mut intent = KeyIntent::new(state.display_text(), caret, ch);
            if let Some(sel) = state.selection() {
                intent = intent.with_selection(sel);
            }
            let decision = state.admit(&intent);
            (Some(format!("{}@{caret}", quoted(text))), key_label(decision))
        }
        Op::Backspace => (None, edit_label(state.backspace())),
        Op::Delete => (None, edit_label(state.delete_forward())),
        Op::Caret => {
            let at = required(step.at, "at")?;
            state.set_caret(at);
            (Some(at.to_string()), ok())
        }
        Op::Select => {
            let anchor = required(step.anchor, "anchor")?;
            let at = required(step.at, "at")?;
            state.select(anchor, at);
            (Some(format!("{anchor}..{at}")), ok())
        }
        Op::Paste => {
            let text = required(step.text.as_deref(), "text")?;
            let outcome = match state.handle_paste(text) {
                PasteOutcome::Accepted { .. } => "accepted",
                PasteOutcome::Rejected => "rejected",
            };
            (Some(quoted(text)), outcome.to_string())
        }
        Op::Set => {
            let value = step.value.clone();
            let arg = match &value {
                None => "empty".to_string(),
                Some(ValueSpec::Number(n)) => n.to_string(),
                Some(ValueSpec::Text(s)) => quoted(s),
            };
            let outcome = match state.set_value(value.map_or(MaskValue::Empty, MaskValue::from)) {
                Ok(()) => "ok",
                Err(_) => "invalid",
            };
            (Some(arg), outcome.to_string())
        }
        Op::Clear => {
            state
                .set_value(MaskValue::Empty)
                .map_err(|err| err.to_string())?;
            (None, ok())
        }
        Op::Disable => {
            state.set_disabled(true);
            (None, ok())
        }
        Op::Enable => {
            state.set_disabled(false);
            (None, ok())
        }
    };
    Ok(applied)
}

fn check_expectations(step: &Step, record: &StepRecord) -> Result<(), String> {
    fn mismatch<T: std::fmt::Debug + PartialEq>(what: &str, want: T, got: T) -> Result<(), String> {
        if want == got {
            Ok(())
        } else {
            Err(format!("expected {what} {want:?}, got {got:?}"))
        }
    }

    if let Some(want) = &step.expect_display {
        mismatch("display", want.as_str(), record.display.as_str())?;
    }
    if let Some(want) = &step.expect_raw {
        let want = (!want.is_empty()).then_some(want.as_str());
        mismatch("raw", want, record.raw.as_deref())?;
    }
    if let Some(want) = &step.expect_formatted {
        mismatch("formatted", want.as_str(), record.formatted.as_str())?;
    }
    if let Some(want) = &step.expect_outcome {
        mismatch("outcome", want.as_str(), record.outcome.as_str())?;
    }
    if let Some(want) = step.expect_changes {
        mismatch("changes", want, record.changes)?;
    }
    if let Some(want) = step.expect_touched {
        mismatch("touched", want, record.touched)?;
    }
    Ok(())
}

fn required<T>(param: Option<T>, name: &str) -> Result<T, String> {
    param.ok_or_else(|| format!("missing `{name}`"))
}

fn quoted(text: &str) -> String {
    format!("\"{}\"", escape_text(text))
}

fn raw_label(raw: Option<&str>) -> String {
    raw.map_or_else(|| "-".to_string(), escape_text)
}

fn reason_label(reason: RejectReason) -> &'static str {
    match reason {
        RejectReason::NotNumeric => "not_numeric",
        RejectReason::DuplicateDecimalSeparator => "duplicate_decimal_separator",
        RejectReason::PrecisionExceeded => "precision_exceeded",
    }
}

fn edit_label(outcome: EditOutcome) -> String {
    match outcome {
        EditOutcome::Committed => "committed".to_string(),
        EditOutcome::Rejected(reason) => format!("rejected({})", reason_label(reason)),
        EditOutcome::Vetoed => "vetoed".to_string(),
        EditOutcome::Unchanged => "unchanged".to_string(),
    }
}

fn key_label(decision: KeyDecision) -> String {
    match decision {
        KeyDecision::Accept => "accept".to_string(),
        KeyDecision::Reject(reason) => format!("reject({})", reason_label(reason)),
    }
}
