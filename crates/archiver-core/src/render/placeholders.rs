//! Token table and the single-pass substitution shared by both renderers.

use chrono::{DateTime, SecondsFormat, Utc};

pub(crate) const DATE: &str = "{{date}}";
pub(crate) const DATETIME: &str = "{{datetime}}";
pub(crate) const TITLE: &str = "{{title}}";
pub(crate) const PATH: &str = "{{path}}";
pub(crate) const LINK: &str = "{{link}}";
pub(crate) const CONTENT: &str = "{{content}}";
pub(crate) const PROJECT: &str = "{{project}}";
pub(crate) const STATUS: &str = "{{status}}";
pub(crate) const DUE: &str = "{{due}}";
pub(crate) const TAGS: &str = "{{tags}}";
pub(crate) const COMPLETED_TASKS: &str = "{{completed_tasks}}";
pub(crate) const COMPLETED_TASKS_COUNT: &str = "{{completed_tasks_count}}";

/// `YYYY-MM-DD` (UTC).
pub fn iso_date(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d").to_string()
}

/// Full ISO-8601 timestamp with milliseconds (`2024-01-01T00:00:00.000Z`).
pub fn iso_datetime(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Replace every recognized token in one left-to-right pass.
///
/// At each `{{`, the first token of `table` (in table order) that matches is
/// replaced; otherwise the `{` is copied and scanning resumes one character
/// later. Replacement text is emitted verbatim and never scanned again.
pub(crate) fn substitute(text: &str, table: &[(&str, String)]) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let candidate = &rest[start..];

        match table.iter().find(|(token, _)| candidate.starts_with(token)) {
            Some((token, value)) => {
                output.push_str(value);
                rest = &candidate[token.len()..];
            }
            None => {
                output.push('{');
                rest = &candidate[1..];
            }
        }
    }

    output.push_str(rest);
    output
}
