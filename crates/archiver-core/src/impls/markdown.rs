//! Markdown support shared by the vault implementations.
//!
//! - split a leading `---` frontmatter block from the body
//! - YAML (serde_yaml) <-> `Frontmatter`
//! - inline `#tags` in the body

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Value};
use std::sync::LazyLock;

use crate::domain::{FieldValue, Frontmatter, NoteMetadata};

const FENCE: &str = "---";

static INLINE_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)(#[\p{L}\p{N}_/-]+)").unwrap());

/// Split `text` into (frontmatter YAML, body).
///
/// The block must start on the first line with `---` and end at the next
/// `---` line. Without a closed block the whole text is body.
pub fn split_frontmatter(text: &str) -> (Option<&str>, &str) {
    let Some(first_end) = text.find('\n') else {
        return (None, text);
    };
    if text[..first_end].trim_end_matches('\r') != FENCE {
        return (None, text);
    }

    let yaml_start = first_end + 1;
    let mut offset = yaml_start;
    loop {
        let line_end = text[offset..].find('\n').map(|index| offset + index);
        let line = &text[offset..line_end.unwrap_or(text.len())];
        if line.trim_end_matches('\r') == FENCE {
            let body_start = line_end.map(|index| index + 1).unwrap_or(text.len());
            return (Some(&text[yaml_start..offset]), &text[body_start..]);
        }
        match line_end {
            Some(index) => offset = index + 1,
            None => return (None, text),
        }
    }
}

/// Parse a YAML frontmatter block. Blank YAML is an empty block.
pub fn parse_frontmatter(yaml: &str) -> Result<Frontmatter, String> {
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::new());
    }

    let value: Value = serde_yaml::from_str(yaml).map_err(|e| e.to_string())?;
    match value {
        Value::Mapping(mapping) => Ok(from_mapping(mapping)),
        Value::Null => Ok(Frontmatter::new()),
        _ => Err("frontmatter is not a key/value mapping".to_string()),
    }
}

/// Render a frontmatter block as YAML (without the `---` fences).
pub fn render_frontmatter(frontmatter: &Frontmatter) -> Result<String, String> {
    if frontmatter.is_empty() {
        return Ok(String::new());
    }
    serde_yaml::to_string(&Value::Mapping(to_mapping(frontmatter))).map_err(|e| e.to_string())
}

/// Replace (or add) the frontmatter block of `text`, keeping the body.
pub fn write_frontmatter(text: &str, frontmatter: &Frontmatter) -> Result<String, String> {
    let (existing, body) = split_frontmatter(text);
    if frontmatter.is_empty() && existing.is_none() {
        return Ok(text.to_string());
    }

    let yaml = render_frontmatter(frontmatter)?;
    Ok(format!("{FENCE}\n{yaml}{FENCE}\n{body}"))
}

/// Inline tags in body order, with their leading `#`.
///
/// Purely numeric tags (`#123`) and lines inside fenced code blocks are
/// ignored.
pub fn inline_tags(body: &str) -> Vec<String> {
    let mut tags = Vec::new();
    let mut in_code = false;

    for line in body.lines() {
        if line.trim_start().starts_with("```") {
            in_code = !in_code;
            continue;
        }
        if in_code {
            continue;
        }
        for captures in INLINE_TAG_RE.captures_iter(line) {
            let tag = &captures[1];
            if tag[1..].chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Metadata snapshot of a note's full text. A malformed frontmatter block
/// reads as "no frontmatter".
pub fn parse_metadata(text: &str) -> NoteMetadata {
    let (yaml, body) = split_frontmatter(text);
    NoteMetadata {
        frontmatter: yaml.and_then(|yaml| parse_frontmatter(yaml).ok()),
        inline_tags: inline_tags(body),
    }
}

fn from_mapping(mapping: Mapping) -> Frontmatter {
    mapping
        .into_iter()
        .filter_map(|(key, value)| {
            let key = match key {
                Value::String(key) => key,
                Value::Number(key) => key.to_string(),
                Value::Bool(key) => key.to_string(),
                _ => return None,
            };
            Some((key, from_yaml(value)))
        })
        .collect()
}

fn from_yaml(value: Value) -> FieldValue {
    match value {
        Value::Null => FieldValue::Null,
        Value::Bool(value) => FieldValue::Bool(value),
        Value::Number(number) => match number.as_i64() {
            Some(value) => FieldValue::Integer(value),
            None => FieldValue::Float(number.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(text) => FieldValue::Text(text),
        Value::Sequence(items) => FieldValue::List(items.into_iter().map(from_yaml).collect()),
        Value::Mapping(mapping) => FieldValue::Map(from_mapping(mapping)),
        Value::Tagged(tagged) => {
            let TaggedValue { tag, value } = *tagged;
            let tag = tag.to_string();
            let is_timestamp =
                tag.trim_start_matches('!') == "timestamp" || tag.ends_with(":timestamp");
            match value {
                Value::String(text) if is_timestamp => match parse_timestamp(&text) {
                    Some(date) => FieldValue::Date(date),
                    None => FieldValue::Text(text),
                },
                value => from_yaml(value),
            }
        }
    }
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| date.and_utc())
}

fn to_mapping(frontmatter: &Frontmatter) -> Mapping {
    frontmatter
        .iter()
        .map(|(key, value)| (Value::String(key.to_string()), to_yaml(value)))
        .collect()
}

fn to_yaml(value: &FieldValue) -> Value {
    match value {
        FieldValue::Null => Value::Null,
        FieldValue::Bool(value) => Value::Bool(*value),
        FieldValue::Integer(value) => Value::Number((*value).into()),
        FieldValue::Float(value) => Value::Number((*value).into()),
        FieldValue::Text(text) => Value::String(text.clone()),
        FieldValue::Date(_) => Value::String(value.coerce_string()),
        FieldValue::List(items) => Value::Sequence(items.iter().map(to_yaml).collect()),
        FieldValue::Map(frontmatter) => Value::Mapping(to_mapping(frontmatter)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn split_without_frontmatter() {
        assert_eq!(split_frontmatter("# Title\nbody"), (None, "# Title\nbody"));
        assert_eq!(split_frontmatter("---"), (None, "---"));
    }

    #[test]
    fn split_with_frontmatter() {
        let text = "---\nproject: apollo\n---\n- [ ] task\n";
        assert_eq!(
            split_frontmatter(text),
            (Some("project: apollo\n"), "- [ ] task\n")
        );
    }

    #[test]
    fn split_handles_crlf_and_missing_trailing_newline() {
        let text = "---\r\nstatus: open\r\n---";
        assert_eq!(split_frontmatter(text), (Some("status: open\r\n"), ""));
    }

    #[test]
    fn unclosed_block_is_body() {
        let text = "---\nproject: apollo\nno close";
        assert_eq!(split_frontmatter(text), (None, text));
    }

    #[test]
    fn parses_scalars_lists_and_timestamps() {
        let yaml = "project: apollo\npriority: 2\nratio: 0.5\ndone: false\ntags: [a, \"#b\"]\nreviewed: !timestamp 2024-03-05T09:30:00Z\nempty:\n";
        let frontmatter = parse_frontmatter(yaml).unwrap();

        assert_eq!(frontmatter.get("project"), Some(&FieldValue::from("apollo")));
        assert_eq!(frontmatter.get("priority"), Some(&FieldValue::Integer(2)));
        assert_eq!(frontmatter.get("ratio"), Some(&FieldValue::Float(0.5)));
        assert_eq!(frontmatter.get("done"), Some(&FieldValue::Bool(false)));
        assert_eq!(frontmatter.tags(), vec!["a", "b"]);
        assert_eq!(frontmatter.get("empty"), Some(&FieldValue::Null));
        assert_eq!(
            frontmatter.get("reviewed"),
            Some(&FieldValue::Date(
                Utc.with_ymd_and_hms(2024, 3, 5, 9, 30, 0).unwrap()
            ))
        );
    }

    #[test]
    fn non_mapping_yaml_is_rejected() {
        assert!(parse_frontmatter("- a\n- b\n").is_err());
        assert!(parse_frontmatter("key: [unclosed\n").is_err());
    }

    #[test]
    fn write_adds_block_to_plain_note() {
        let frontmatter: Frontmatter = [("archived-by", FieldValue::from("archiver"))]
            .into_iter()
            .collect();
        let written = write_frontmatter("body\n", &frontmatter).unwrap();
        assert_eq!(written, "---\narchived-by: archiver\n---\nbody\n");
    }

    #[test]
    fn written_timestamps_read_back_as_text() {
        let frontmatter: Frontmatter =
            [("archive-time", FieldValue::from("2024-01-01T00:00:00.000Z"))]
                .into_iter()
                .collect();
        let written = write_frontmatter("body\n", &frontmatter).unwrap();
        assert!(written.ends_with("---\nbody\n"));

        let metadata = parse_metadata(&written);
        let reread = metadata.frontmatter.unwrap();
        assert_eq!(
            reread.get("archive-time").map(FieldValue::coerce_string).as_deref(),
            Some("2024-01-01T00:00:00.000Z")
        );
    }

    #[test]
    fn write_replaces_block_and_keeps_body() {
        let text = "---\nstatus: open\n---\n# Body\n";
        let mut frontmatter = parse_frontmatter(split_frontmatter(text).0.unwrap()).unwrap();
        frontmatter.insert("status", FieldValue::from("closed"));

        let written = write_frontmatter(text, &frontmatter).unwrap();
        assert_eq!(written, "---\nstatus: closed\n---\n# Body\n");
    }

    #[test]
    fn inline_tags_skip_headings_numbers_and_code() {
        let body = "# Heading\nSee #project/alpha and #todo.\nIssue #123 email a#b\n```\n#not-a-tag\n```\n#last";
        assert_eq!(inline_tags(body), vec!["#project/alpha", "#todo", "#last"]);
    }

    #[test]
    fn metadata_ignores_malformed_frontmatter() {
        let metadata = parse_metadata("---\n: : :\n  - [\n---\nbody #tag\n");
        assert_eq!(metadata.frontmatter, None);
        assert_eq!(metadata.inline_tags, vec!["#tag"]);
    }
}
