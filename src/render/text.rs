//! Fixed-width text diagram.

use crate::render::{truncate_chars, BANNER_WIDTH, ELLIPSIS, TEXT_RESULT_LIMIT};
use crate::Timeline;

/// Render `timeline` as a numbered, icon-annotated step list framed by a
/// header banner and a per-kind summary.
pub fn render(timeline: &Timeline) -> String {
    render_at(timeline, timeline.duration())
}

/// Render with a run duration fixed by the caller.
pub(crate) fn render_at(timeline: &Timeline, duration: f64) -> String {
    let banner = "=".repeat(BANNER_WIDTH);
    let mut lines = vec![
        banner.clone(),
        format!("WORKFLOW: {}", timeline.name()),
        format!("Duration: {duration:.2}s"),
        banner.clone(),
        String::new(),
    ];

    for (i, step) in timeline.steps().iter().enumerate() {
        lines.push(format!(
            "{}. {} [{}] {}",
            i + 1,
            step.kind().icon(),
            step.agent(),
            step.action()
        ));

        for (key, value) in step.details() {
            lines.push(format!("   ├─ {key}: {value}"));
        }

        // A measured duration wins over the result text.
        if let Some(duration) = step.duration() {
            lines.push(format!("   └─ Duration: {duration:.2}s"));
        } else if let Some(result) = step.result() {
            lines.push(format!(
                "   └─ Result: {}{ELLIPSIS}",
                truncate_chars(result, TEXT_RESULT_LIMIT)
            ));
        }

        lines.push(String::new());
    }

    lines.push(banner.clone());
    lines.push("SUMMARY:".to_string());
    for (kind, count) in timeline.kind_counts().iter() {
        lines.push(format!("  • {kind}: {count}"));
    }
    lines.push(banner);

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Entry, StepKind};

    #[test]
    fn empty_timeline_has_header_and_empty_summary() {
        let text = render(&Timeline::new("Empty"));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "=".repeat(70));
        assert_eq!(lines[1], "WORKFLOW: Empty");
        assert_eq!(lines[2], "Duration: 0.00s");
        assert_eq!(lines[5], "=".repeat(70));
        assert_eq!(lines[6], "SUMMARY:");
        assert_eq!(lines[7], "=".repeat(70));
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn step_block_layout() {
        let mut timeline = Timeline::new("Layout");
        timeline.append(
            Entry::new(StepKind::ToolUse, "research", "web_search")
                .with_detail("query", "rust")
                .with_detail("hits", 4)
                .with_result("ok"),
        );
        let text = render(&timeline);
        let expected = "1. 🔧 [research] web_search\n   ├─ query: rust\n   ├─ hits: 4\n   └─ Result: ok...\n\n";
        assert!(text.contains(expected), "{text}");
    }

    #[test]
    fn duration_takes_precedence_over_result() {
        let mut timeline = Timeline::new("Precedence");
        timeline.append(
            Entry::new(StepKind::Result, "research", "Research completed")
                .with_result("lots of findings")
                .with_duration(1.25),
        );
        let text = render(&timeline);
        assert!(text.contains("   └─ Duration: 1.25s"));
        assert!(!text.contains("Result: lots"));
    }

    #[test]
    fn long_result_is_truncated_to_fifty_chars() {
        let long = "x".repeat(80);
        let mut timeline = Timeline::new("Long");
        timeline.append(Entry::new(StepKind::Result, "writer", "Report").with_result(long));
        let text = render(&timeline);
        let expected = format!("   └─ Result: {}...", "x".repeat(50));
        assert!(text.lines().any(|l| l == expected));
    }

    #[test]
    fn summary_counts_in_first_seen_order() {
        let mut timeline = Timeline::new("Summary");
        timeline.log(StepKind::Start, "coordinator", "a");
        timeline.log(StepKind::AgentCall, "coordinator", "b");
        timeline.log(StepKind::AgentCall, "coordinator", "c");
        timeline.log(StepKind::Start, "coordinator", "d");
        let text = render(&timeline);
        let summary: Vec<&str> = text
            .lines()
            .skip_while(|l| *l != "SUMMARY:")
            .skip(1)
            .take_while(|l| l.starts_with("  • "))
            .collect();
        assert_eq!(summary, vec!["  • start: 2", "  • agent_call: 2"]);
    }
}
