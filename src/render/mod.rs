//! Pure renderers that turn a [`Timeline`](crate::Timeline) into reports.
//!
//! Renderers only read recorded state. They cannot fail and have no side
//! effects; persistence lives in [`persist`](crate::persist).

pub mod graph;
pub mod html;
pub mod text;

/// Width of the `=` banners in the text diagram.
pub const BANNER_WIDTH: usize = 70;

/// Result text kept by the text diagram.
pub const TEXT_RESULT_LIMIT: usize = 50;

/// Result text kept by the HTML report.
pub const HTML_RESULT_LIMIT: usize = 100;

/// Action text kept in graph node labels.
pub const GRAPH_LABEL_LIMIT: usize = 30;

/// Marker appended to truncated result text.
pub const ELLIPSIS: &str = "...";

/// First `limit` characters of `s`, never splitting a code point.
pub(crate) fn truncate_chars(s: &str, limit: usize) -> &str {
    match s.char_indices().nth(limit) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
