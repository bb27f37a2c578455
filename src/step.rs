//! Recorded workflow steps.
//!
//! A [`Step`] is created only by a [`Timeline`](crate::Timeline) when an
//! [`Entry`] is appended, and is never modified afterwards.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::details::{DetailValue, Details};
use crate::kind::StepKind;

/// The caller-supplied description of a step, before it is appended.
///
/// # Example
///
/// ```rust
/// use workflow_trace::{Entry, StepKind, Timeline};
///
/// let mut timeline = Timeline::new("Research");
/// timeline.append(
///     Entry::new(StepKind::Result, "research", "Research completed")
///         .with_detail("steps", 3)
///         .with_duration(1.25),
/// );
/// assert_eq!(timeline.steps()[0].duration(), Some(1.25));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub(crate) kind: StepKind,
    pub(crate) agent: String,
    pub(crate) action: String,
    pub(crate) details: Details,
    pub(crate) result: Option<String>,
    pub(crate) duration: Option<f64>,
}

impl Entry {
    /// Describe a step of `kind` emitted by `agent`.
    pub fn new(kind: StepKind, agent: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            kind,
            agent: agent.into(),
            action: action.into(),
            details: Details::new(),
            result: None,
            duration: None,
        }
    }

    /// Replace the step's metadata.
    pub fn with_details(mut self, details: Details) -> Self {
        self.details = details;
        self
    }

    /// Add a single metadata entry.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<DetailValue>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Attach a free-text outcome.
    pub fn with_result(mut self, result: impl Into<String>) -> Self {
        self.result = Some(result.into());
        self
    }

    /// Attach a duration in seconds.
    ///
    /// Negative values are clamped to zero. Infinite and NaN values have no
    /// JSON form, so they leave the step without a duration.
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = measured(seconds);
        self
    }
}

fn measured(seconds: f64) -> Option<f64> {
    seconds.is_finite().then(|| seconds.max(0.0))
}

/// One recorded event in a workflow timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    kind: StepKind,
    agent: String,
    action: String,
    details: Details,
    result: Option<String>,
    duration: Option<f64>,
    timestamp: DateTime<Local>,
    sequence_index: usize,
}

impl Step {
    pub(crate) fn from_entry(entry: Entry, sequence_index: usize, timestamp: DateTime<Local>) -> Self {
        Self {
            kind: entry.kind,
            agent: entry.agent,
            action: entry.action,
            details: entry.details,
            result: entry.result,
            duration: entry.duration,
            timestamp,
            sequence_index,
        }
    }

    pub(crate) fn from_record(record: StepRecord, sequence_index: usize) -> Self {
        Self {
            kind: record.kind,
            agent: record.agent,
            action: record.action,
            details: record.details,
            result: record.result,
            duration: record.duration.and_then(measured),
            timestamp: record.timestamp,
            sequence_index,
        }
    }

    pub fn kind(&self) -> StepKind {
        self.kind
    }

    pub fn agent(&self) -> &str {
        &self.agent
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn details(&self) -> &Details {
        &self.details
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// Duration in seconds, if the caller measured one.
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// When the step was appended.
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// Zero-based position of this step in its timeline.
    pub fn sequence_index(&self) -> usize {
        self.sequence_index
    }

    /// Convert to the plain record used for JSON persistence.
    #[must_use]
    pub fn to_record(&self) -> StepRecord {
        StepRecord {
            sequence_index: self.sequence_index,
            kind: self.kind,
            agent: self.agent.clone(),
            action: self.action.clone(),
            details: self.details.clone(),
            result: self.result.clone(),
            duration: self.duration,
            timestamp: self.timestamp,
        }
    }
}

/// Serialized form of a [`Step`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub sequence_index: usize,
    pub kind: StepKind,
    pub agent: String,
    pub action: String,
    #[serde(default)]
    pub details: Details,
    pub result: Option<String>,
    pub duration: Option<f64>,
    /// ISO-8601 timestamp.
    pub timestamp: DateTime<Local>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_defaults_are_empty() {
        let entry = Entry::new(StepKind::Start, "coordinator", "Initialize workflow");
        assert!(entry.details.is_empty());
        assert_eq!(entry.result, None);
        assert_eq!(entry.duration, None);
    }

    #[test]
    fn negative_duration_is_clamped() {
        let entry = Entry::new(StepKind::Result, "a", "b").with_duration(-2.0);
        assert_eq!(entry.duration, Some(0.0));
    }

    #[test]
    fn non_finite_duration_is_dropped() {
        for seconds in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let entry = Entry::new(StepKind::Result, "research", "done").with_duration(seconds);
            assert_eq!(entry.duration, None);
        }
    }

    #[test]
    fn record_serializes_kind_tag_and_nulls() {
        let step = Step::from_entry(
            Entry::new(StepKind::ToolUse, "research", "web_search").with_detail("query", "rust"),
            4,
            Local::now(),
        );
        let json = serde_json::to_value(step.to_record()).unwrap();
        assert_eq!(json["sequence_index"], 4);
        assert_eq!(json["kind"], "tool_use");
        assert_eq!(json["details"]["query"], "rust");
        assert!(json["result"].is_null());
        assert!(json["duration"].is_null());
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn record_round_trips() {
        let step = Step::from_entry(
            Entry::new(StepKind::Error, "writer", "Report failed")
                .with_result("disk full")
                .with_duration(0.3),
            0,
            Local::now(),
        );
        let json = serde_json::to_string(&step.to_record()).unwrap();
        let record: StepRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(Step::from_record(record, 0), step);
    }
}
