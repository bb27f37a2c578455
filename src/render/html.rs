//! Self-contained HTML report.
//!
//! The page uses only inline styles so it can be opened straight from disk.
//! All recorded text is escaped before it is embedded.

use html_escape::encode_text;

use crate::render::{truncate_chars, ELLIPSIS, HTML_RESULT_LIMIT};
use crate::step::Step;
use crate::{StepKind, Timeline};

const STYLE: &str = r#"
        body { font-family: Arial, sans-serif; margin: 20px; background: #f5f5f5; }
        .container { max-width: 1200px; margin: 0 auto; background: white; padding: 20px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
        h1 { color: #333; border-bottom: 3px solid #4CAF50; padding-bottom: 10px; }
        .step { margin: 15px 0; padding: 15px; border-left: 4px solid #4CAF50; background: #f9f9f9; }
        .step.error { border-left-color: #e53935; }
        .step-header { font-weight: bold; color: #333; margin-bottom: 8px; }
        .step-details { margin-left: 20px; color: #666; font-size: 0.9em; }
        .summary { margin-top: 30px; padding: 15px; background: #e8f5e9; border-radius: 4px; }
"#;

/// Render `timeline` as a complete HTML document.
pub fn render(timeline: &Timeline) -> String {
    render_at(timeline, timeline.duration())
}

/// Render with a run duration fixed by the caller.
pub(crate) fn render_at(timeline: &Timeline, duration: f64) -> String {
    let name = encode_text(timeline.name());
    let status = if timeline.is_completed() {
        "Completed"
    } else {
        "In Progress"
    };

    let mut html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Workflow: {name}</title>
    <style>{STYLE}    </style>
</head>
<body>
    <div class="container">
        <h1>Workflow: {name}</h1>
        <p><strong>Duration:</strong> {duration:.2}s</p>
        <p><strong>Status:</strong> {status}</p>

        <h2>Steps</h2>
"#,
    );

    for (i, step) in timeline.steps().iter().enumerate() {
        html.push_str(&render_step(i + 1, step));
    }

    html.push_str(
        r#"
        <div class="summary">
            <h2>Summary</h2>
            <ul>
"#,
    );
    for (kind, count) in timeline.kind_counts().iter() {
        html.push_str(&format!("                <li>{kind}: {count}</li>\n"));
    }
    html.push_str(
        r#"            </ul>
        </div>
    </div>
</body>
</html>
"#,
    );

    html
}

fn render_step(number: usize, step: &Step) -> String {
    let class = match step.kind() {
        StepKind::Error => "step error",
        _ => "step",
    };

    let mut block = format!(
        r#"
        <div class="{class}">
            <h3 class="step-header">Step {number}: {action}</h3>
            <div class="step-details">
                <p><strong>Agent:</strong> {agent}</p>
                <p><strong>Type:</strong> {kind}</p>
"#,
        action = encode_text(step.action()),
        agent = encode_text(step.agent()),
        kind = step.kind(),
    );

    if let Some(duration) = step.duration() {
        block.push_str(&format!(
            "                <p><strong>Duration:</strong> {duration:.2}s</p>\n"
        ));
    }

    if !step.details().is_empty() {
        block.push_str("                <p><strong>Details:</strong></p>\n                <ul>\n");
        for (key, value) in step.details() {
            block.push_str(&format!(
                "                    <li>{}: {}</li>\n",
                encode_text(key),
                encode_text(&value.to_string())
            ));
        }
        block.push_str("                </ul>\n");
    }

    if step.duration().is_none() {
        if let Some(result) = step.result() {
            block.push_str(&format!(
                "                <p><strong>Result:</strong> {}{ELLIPSIS}</p>\n",
                encode_text(truncate_chars(result, HTML_RESULT_LIMIT))
            ));
        }
    }

    block.push_str("            </div>\n        </div>\n");
    block
}
