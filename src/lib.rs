//! # workflow-trace
//!
//! Timeline tracking and report rendering for multi-agent LLM workflows.
//!
//! An orchestrator creates one [`Timeline`] per workflow run, appends a step
//! for every event it observes (delegations, tool calls, results, errors),
//! completes it, and then renders or persists it.
//!
//! ## Core Concepts
//!
//! - **StepKind**: The closed set of step categories
//! - **Step**: One immutable recorded event, created by appending an [`Entry`]
//! - **Timeline**: The append-only step log of one run, with derived timing
//! - **render**: Text diagram, `graph TD` flowchart and HTML report
//! - **persist**: Writes all renderings plus the JSON document to a directory
//! - **SharedTimeline**: Lock-guarded handle for concurrent appenders
//! - **InstrumentedAgent**: Records delegation, result and error steps around an [`Agent`]
//!
//! ## Example: Tracking a Research Run
//!
//! ```rust
//! use workflow_trace::{Entry, StepKind, Timeline};
//!
//! let mut timeline = Timeline::new("Research: quantum computing");
//! timeline.log(StepKind::Start, "coordinator", "Initialize workflow");
//! timeline.log(StepKind::AgentCall, "coordinator", "Delegate to Research Agent");
//! timeline.append(
//!     Entry::new(StepKind::Result, "research", "Research completed")
//!         .with_detail("steps", 3)
//!         .with_duration(1.25),
//! );
//! timeline.complete();
//!
//! let text = timeline.render_text();
//! assert!(text.contains("3. ✅ [research] Research completed"));
//! assert!(text.contains("  • agent_call: 1"));
//!
//! let graph = timeline.render_graph();
//! assert!(graph.starts_with("graph TD"));
//! ```

pub mod error;
pub mod config;
pub mod kind;
pub mod details;
pub mod step;
pub mod timeline;
pub mod summary;
pub mod render;
pub mod persist;
pub mod shared;
pub mod agent;

pub use error::{Error, Result};
pub use config::PersistConfig;
pub use kind::StepKind;
pub use details::{DetailValue, Details};
pub use step::{Entry, Step, StepRecord};
pub use timeline::{Timeline, TimelineRecord};
pub use summary::KindCounts;
pub use persist::{ArtifactKind, Manifest};
pub use shared::SharedTimeline;
pub use agent::{Agent, FnAgent, InstrumentedAgent};
