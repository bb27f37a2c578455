//! Flowchart description in `graph TD` syntax.

use crate::render::{truncate_chars, GRAPH_LABEL_LIMIT};
use crate::Timeline;

/// Render `timeline` as a top-down flowchart with one node per step, each
/// linked from the step before it.
pub fn render(timeline: &Timeline) -> String {
    let mut lines = vec!["graph TD".to_string()];

    for (i, step) in timeline.steps().iter().enumerate() {
        let label = format!(
            "{}: {}",
            step.agent(),
            truncate_chars(step.action(), GRAPH_LABEL_LIMIT)
        );
        lines.push(format!("    {}[\"{}\"]", node_id(i), escape_label(&label)));

        if i > 0 {
            lines.push(format!("    {} --> {}", node_id(i - 1), node_id(i)));
        }
    }

    lines.join("\n")
}

fn node_id(index: usize) -> String {
    format!("step{index}")
}

/// Quotes end a node label and newlines end a statement.
fn escape_label(label: &str) -> String {
    label.replace('"', "#quot;").replace(['\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StepKind;

    #[test]
    fn empty_timeline_is_header_only() {
        assert_eq!(render(&Timeline::new("Empty")), "graph TD");
    }

    #[test]
    fn nodes_and_edges() {
        let mut timeline = Timeline::new("Flow");
        timeline.log(StepKind::Start, "coordinator", "Initialize workflow");
        timeline.log(StepKind::AgentCall, "coordinator", "Delegate to Research Agent");
        timeline.log(StepKind::Result, "research", "Research completed");

        let expected = [
            "graph TD",
            "    step0[\"coordinator: Initialize workflow\"]",
            "    step1[\"coordinator: Delegate to Research Agent\"]",
            "    step0 --> step1",
            "    step2[\"research: Research completed\"]",
            "    step1 --> step2",
        ]
        .join("\n");
        assert_eq!(render(&timeline), expected);
    }

    #[test]
    fn action_is_cut_to_thirty_chars() {
        let mut timeline = Timeline::new("Cut");
        timeline.log(StepKind::ToolUse, "research", "a".repeat(45));
        let graph = render(&timeline);
        assert!(graph.contains(&format!("step0[\"research: {}\"]", "a".repeat(30))));
    }

    #[test]
    fn quotes_are_escaped() {
        let mut timeline = Timeline::new("Quotes");
        timeline.log(StepKind::ToolUse, "research", "search \"rust\"");
        assert!(render(&timeline).contains("search #quot;rust#quot;"));
    }
}
