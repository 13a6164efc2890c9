use std::sync::LazyLock;

use regex::Regex;

static DELIMITER_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9 ]+").expect("delimiter pattern is valid"));

/// A window title broken into its normalized segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTitle {
    pub segments: Vec<String>,
    /// The last segment, used as the application label.
    pub label: String,
}

/// Splits a window title on every run of characters that are not an ASCII
/// letter, digit or space, trimming each segment.
///
/// `"ChatAAT — Mozilla Firefox"` gives the segments `["ChatAAT", "Mozilla Firefox"]`
/// and the label `"Mozilla Firefox"`. An empty title gives a single empty segment.
pub fn parse_title(title: &str) -> ParsedTitle {
    let segments: Vec<String> = DELIMITER_RUN
        .split(title.trim())
        .map(|segment| segment.trim().to_owned())
        .collect();
    let label = segments.last().cloned().unwrap_or_default();

    ParsedTitle { segments, label }
}
