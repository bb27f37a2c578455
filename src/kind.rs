//! The closed set of step categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Category of a recorded workflow step.
///
/// Serialized as its lowercase tag (`"agent_call"`, `"tool_use"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// The workflow began.
    Start,
    /// The workflow finished.
    End,
    /// Work was delegated to a sub-agent.
    AgentCall,
    /// A tool was invoked.
    ToolUse,
    /// A result was produced.
    Result,
    /// Something failed.
    Error,
    /// A routing or planning decision was made.
    Decision,
}

impl StepKind {
    /// Every kind, in declaration order.
    pub const ALL: [StepKind; 7] = [
        StepKind::Start,
        StepKind::End,
        StepKind::AgentCall,
        StepKind::ToolUse,
        StepKind::Result,
        StepKind::Error,
        StepKind::Decision,
    ];

    /// The lowercase tag used in persisted documents and summaries.
    pub fn tag(self) -> &'static str {
        match self {
            StepKind::Start => "start",
            StepKind::End => "end",
            StepKind::AgentCall => "agent_call",
            StepKind::ToolUse => "tool_use",
            StepKind::Result => "result",
            StepKind::Error => "error",
            StepKind::Decision => "decision",
        }
    }

    /// The icon shown in front of a step in the text diagram.
    pub fn icon(self) -> &'static str {
        match self {
            StepKind::Start => "🚀",
            StepKind::End => "🏁",
            StepKind::AgentCall => "🤖",
            StepKind::ToolUse => "🔧",
            StepKind::Result => "✅",
            StepKind::Error => "❌",
            StepKind::Decision => "🤔",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for StepKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StepKind::ALL
            .into_iter()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| Error::UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_parse_back_to_their_kind() {
        for kind in StepKind::ALL {
            assert_eq!(kind.tag().parse::<StepKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = "handoff".parse::<StepKind>().unwrap_err();
        assert!(matches!(err, Error::UnknownKind(ref t) if t == "handoff"));
    }

    #[test]
    fn serde_uses_the_tag() {
        let json = serde_json::to_string(&StepKind::AgentCall).unwrap();
        assert_eq!(json, "\"agent_call\"");
        let kind: StepKind = serde_json::from_str("\"tool_use\"").unwrap();
        assert_eq!(kind, StepKind::ToolUse);
    }
}
