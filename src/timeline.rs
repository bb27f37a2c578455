//! The append-only step log of a single workflow run.

use std::path::Path;

use chrono::{DateTime, Local, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::kind::StepKind;
use crate::persist::{self, Manifest};
use crate::render;
use crate::step::{Entry, Step, StepRecord};
use crate::summary::KindCounts;
use crate::Result;

/// Ordered record of the steps observed during one workflow run.
///
/// A timeline starts empty, receives steps through [`append`](Self::append),
/// and is marked finished once with [`complete`](Self::complete). It only
/// records and measures; it never interprets step content.
///
/// # Example
///
/// ```rust
/// use workflow_trace::{Entry, StepKind, Timeline};
///
/// let mut timeline = Timeline::new("Research: rust async");
/// timeline.log(StepKind::Start, "coordinator", "Initialize workflow");
/// timeline.log(StepKind::AgentCall, "coordinator", "Delegate to Research Agent");
/// timeline.append(
///     Entry::new(StepKind::Result, "research", "Research completed")
///         .with_detail("steps", 3)
///         .with_duration(1.25),
/// );
/// timeline.complete();
///
/// assert_eq!(timeline.len(), 3);
/// assert!(timeline.is_completed());
/// assert!(timeline.render_text().contains("Duration: 1.25s"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    name: String,
    steps: Vec<Step>,
    start_time: Option<DateTime<Local>>,
    end_time: Option<DateTime<Local>>,
    completed: bool,
}

impl Timeline {
    /// Create an empty timeline for the workflow called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
            start_time: None,
            end_time: None,
            completed: false,
        }
    }

    /// Record a step, stamping it with the current time and its position.
    ///
    /// The first append also fixes the timeline's start time. Appending after
    /// [`complete`](Self::complete) is allowed; the step is recorded but the
    /// end time and completion flag are left untouched.
    pub fn append(&mut self, entry: Entry) -> &Step {
        if self.completed {
            tracing::warn!(
                workflow = %self.name,
                action = %entry.action,
                "step appended to a completed workflow"
            );
        }

        let step = Step::from_entry(entry, self.steps.len(), Local::now());
        if self.start_time.is_none() {
            self.start_time = Some(step.timestamp());
        }
        tracing::trace!(
            workflow = %self.name,
            index = step.sequence_index(),
            kind = %step.kind(),
            agent = step.agent(),
            "step recorded"
        );

        self.steps.push(step);
        &self.steps[self.steps.len() - 1]
    }

    /// Record a step that has no details, result or duration.
    pub fn log(
        &mut self,
        kind: StepKind,
        agent: impl Into<String>,
        action: impl Into<String>,
    ) -> &Step {
        self.append(Entry::new(kind, agent, action))
    }

    /// Mark the run as finished.
    ///
    /// Only the first call takes effect; later calls keep the original end time.
    pub fn complete(&mut self) {
        if self.completed {
            return;
        }
        self.completed = true;
        self.end_time = Some(Local::now());
        tracing::debug!(
            workflow = %self.name,
            steps = self.steps.len(),
            duration_seconds = self.duration(),
            "workflow completed"
        );
    }

    /// Elapsed seconds for the run.
    ///
    /// Uses the end time once completed, the current time while still in
    /// progress, and `0.0` when nothing has been recorded. Never negative.
    pub fn duration(&self) -> f64 {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => seconds(end - start),
            (Some(start), None) => seconds(Local::now() - start),
            _ => 0.0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Recorded steps, in append order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Timestamp of the first step, if any.
    pub fn start_time(&self) -> Option<DateTime<Local>> {
        self.start_time
    }

    /// Set once by [`complete`](Self::complete).
    pub fn end_time(&self) -> Option<DateTime<Local>> {
        self.end_time
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Step counts per kind, in the order each kind first appears.
    pub fn kind_counts(&self) -> KindCounts {
        KindCounts::from_steps(&self.steps)
    }

    /// Convert to the structured document used for JSON persistence.
    #[must_use]
    pub fn to_record(&self) -> TimelineRecord {
        TimelineRecord {
            workflow_name: self.name.clone(),
            start_time: self.start_time,
            end_time: self.end_time,
            duration_seconds: self.duration(),
            completed: self.completed,
            steps: self.steps.iter().map(Step::to_record).collect(),
        }
    }

    /// Rebuild a timeline from its structured document.
    ///
    /// Sequence indices are reassigned from the step order and the start time
    /// is taken from the first step, so the rebuilt timeline always satisfies
    /// the append invariants even if the document was edited by hand.
    pub fn from_record(record: TimelineRecord) -> Self {
        let steps: Vec<Step> = record
            .steps
            .into_iter()
            .enumerate()
            .map(|(i, step)| Step::from_record(step, i))
            .collect();
        let start_time = steps.first().map(Step::timestamp);
        let end_time = if record.completed { record.end_time } else { None };

        Self {
            name: record.workflow_name,
            steps,
            start_time,
            end_time,
            completed: record.completed,
        }
    }

    /// Render the fixed-width text diagram.
    pub fn render_text(&self) -> String {
        render::text::render(self)
    }

    /// Render the `graph TD` flowchart description.
    pub fn render_graph(&self) -> String {
        render::graph::render(self)
    }

    /// Render the self-contained HTML report.
    pub fn render_html(&self) -> String {
        render::html::render(self)
    }

    /// Write every rendering to `output_dir`. See [`persist::save`].
    pub fn save(&self, output_dir: impl AsRef<Path>) -> Result<Manifest> {
        persist::save(self, output_dir)
    }
}

fn seconds(delta: TimeDelta) -> f64 {
    delta.to_std().map(|d| d.as_secs_f64()).unwrap_or(0.0)
}

/// Serialized form of a [`Timeline`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineRecord {
    pub workflow_name: String,
    pub start_time: Option<DateTime<Local>>,
    pub end_time: Option<DateTime<Local>>,
    pub duration_seconds: f64,
    pub completed: bool,
    #[serde(default)]
    pub steps: Vec<StepRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn sequence_indices_follow_append_order() {
        let mut timeline = Timeline::new("Indices");
        for i in 0..5 {
            timeline.log(StepKind::ToolUse, "research", format!("call {i}"));
        }
        assert_eq!(timeline.len(), 5);
        for (i, step) in timeline.steps().iter().enumerate() {
            assert_eq!(step.sequence_index(), i);
        }
    }

    #[test]
    fn start_time_is_first_step_timestamp() {
        let mut timeline = Timeline::new("Start");
        assert!(timeline.start_time().is_none());

        timeline.log(StepKind::Start, "coordinator", "Initialize workflow");
        sleep(Duration::from_millis(2));
        timeline.log(StepKind::End, "coordinator", "Done");

        assert_eq!(timeline.start_time(), Some(timeline.steps()[0].timestamp()));
    }

    #[test]
    fn empty_timeline_has_zero_duration() {
        let mut timeline = Timeline::new("Empty");
        assert_eq!(timeline.duration(), 0.0);
        timeline.complete();
        assert_eq!(timeline.duration(), 0.0);
        assert!(timeline.is_completed());
        assert!(timeline.start_time().is_none());
    }

    #[test]
    fn complete_is_idempotent() {
        let mut timeline = Timeline::new("Twice");
        timeline.log(StepKind::Start, "coordinator", "Initialize workflow");
        timeline.complete();
        let first = timeline.end_time();
        let first_duration = timeline.duration();

        sleep(Duration::from_millis(5));
        timeline.complete();

        assert_eq!(timeline.end_time(), first);
        assert_eq!(timeline.duration(), first_duration);
    }

    #[test]
    fn in_progress_duration_grows() {
        let mut timeline = Timeline::new("Live");
        timeline.log(StepKind::Start, "coordinator", "Initialize workflow");
        sleep(Duration::from_millis(5));
        assert!(timeline.duration() >= 0.005);
        assert!(timeline.end_time().is_none());
    }

    #[test]
    fn append_after_complete_is_recorded() {
        let mut timeline = Timeline::new("Late");
        timeline.log(StepKind::Start, "coordinator", "Initialize workflow");
        timeline.complete();
        let end = timeline.end_time();

        let step = timeline.log(StepKind::End, "coordinator", "Workflow complete");
        assert_eq!(step.sequence_index(), 1);
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline.end_time(), end);
        assert!(timeline.is_completed());
    }

    #[test]
    fn record_has_document_shape() {
        let mut timeline = Timeline::new("Doc");
        timeline.log(StepKind::Start, "coordinator", "Initialize workflow");
        timeline.complete();

        let json = serde_json::to_value(timeline.to_record()).unwrap();
        assert_eq!(json["workflow_name"], "Doc");
        assert!(json["start_time"].is_string());
        assert!(json["end_time"].is_string());
        assert!(json["duration_seconds"].is_f64());
        assert_eq!(json["completed"], true);
        assert_eq!(json["steps"][0]["kind"], "start");
    }

    #[test]
    fn empty_record_has_null_times() {
        let json = serde_json::to_value(Timeline::new("Empty").to_record()).unwrap();
        assert!(json["start_time"].is_null());
        assert!(json["end_time"].is_null());
        assert_eq!(json["duration_seconds"], 0.0);
        assert_eq!(json["steps"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn from_record_reassigns_indices() {
        let mut timeline = Timeline::new("Rebuild");
        timeline.log(StepKind::Start, "coordinator", "a");
        timeline.log(StepKind::End, "coordinator", "b");
        timeline.complete();

        let mut record = timeline.to_record();
        record.steps[0].sequence_index = 7;
        record.steps[1].sequence_index = 7;

        let rebuilt = Timeline::from_record(record);
        assert_eq!(rebuilt.steps()[0].sequence_index(), 0);
        assert_eq!(rebuilt.steps()[1].sequence_index(), 1);
        assert_eq!(rebuilt, timeline);
    }

    #[test]
    fn infinite_duration_survives_json_round_trip() {
        let mut timeline = Timeline::new("Infinite");
        timeline.append(
            Entry::new(StepKind::Result, "research", "done").with_duration(f64::INFINITY),
        );
        timeline.complete();

        let json = serde_json::to_string(&timeline.to_record()).unwrap();
        let rebuilt = Timeline::from_record(serde_json::from_str(&json).unwrap());
        assert_eq!(rebuilt.render_text(), timeline.render_text());
        assert_eq!(rebuilt.steps()[0].duration(), None);
    }
}
