//! Frontmatter model and field extraction.
//!
//! # 概要
//! - `FieldValue`: frontmatter の値（YAML スカラー / シーケンス / マッピング）
//! - `Frontmatter`: 順序付きのキー・値ブロック
//! - `NoteMetadata`: MetadataCache が返すスナップショット（frontmatter + inline tags）
//! - `FrontmatterFields`: テンプレートに流し込むフラットなフィールド集合

use chrono::{DateTime, SecondsFormat, Utc};

/// Key of the tag list in a frontmatter block.
pub const TAGS_KEY: &str = "tags";

/// A single frontmatter value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Date(DateTime<Utc>),
    List(Vec<FieldValue>),
    Map(Frontmatter),
}

impl FieldValue {
    /// String coercion used for every templated field.
    ///
    /// - strings pass through
    /// - numbers and booleans are stringified
    /// - dates become an ISO-8601 timestamp
    /// - anything else (lists, maps, null) is empty
    pub fn coerce_string(&self) -> String {
        match self {
            FieldValue::Text(text) => text.clone(),
            FieldValue::Bool(value) => value.to_string(),
            FieldValue::Integer(value) => value.to_string(),
            FieldValue::Float(value) => value.to_string(),
            FieldValue::Date(value) => value.to_rfc3339_opts(SecondsFormat::Millis, true),
            FieldValue::Null | FieldValue::List(_) | FieldValue::Map(_) => String::new(),
        }
    }

    /// Tag coercion.
    ///
    /// - a list maps each element through string coercion and tag normalization
    /// - a single string is split on commas, each piece normalized
    /// - any other type yields no tags
    ///
    /// Empty tags are dropped.
    pub fn coerce_tags(&self) -> Vec<String> {
        let raw: Vec<String> = match self {
            FieldValue::List(items) => items.iter().map(FieldValue::coerce_string).collect(),
            FieldValue::Text(text) => text.split(',').map(str::to_string).collect(),
            _ => Vec::new(),
        };

        raw.iter()
            .map(|tag| normalize_tag(tag))
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Date(value)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        FieldValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// Trim whitespace and strip one leading `#`.
pub fn normalize_tag(tag: &str) -> String {
    let trimmed = tag.trim();
    trimmed.strip_prefix('#').unwrap_or(trimmed).trim().to_string()
}

/// Frontmatter is an ordered key/value block. Keys keep their first position
/// when overwritten.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    entries: Vec<(String, FieldValue)>,
}

impl Frontmatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Insert or overwrite a key. Returns the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        let key = key.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tags declared in this block, normalized.
    pub fn tags(&self) -> Vec<String> {
        self.get(TAGS_KEY)
            .map(FieldValue::coerce_tags)
            .unwrap_or_default()
    }

    /// Add a tag to the `tags` list.
    ///
    /// The tag is normalized first. Returns `false` (and leaves the block
    /// untouched) when the tag is empty or already present. A comma-string
    /// `tags` value is rewritten as a list.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = normalize_tag(tag);
        if tag.is_empty() {
            return false;
        }

        let mut tags = self.tags();
        if tags.iter().any(|existing| *existing == tag) {
            return false;
        }
        tags.push(tag);
        self.insert(TAGS_KEY, FieldValue::from(tags));
        true
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for Frontmatter {
    fn from_iter<I: IntoIterator<Item = (K, FieldValue)>>(iter: I) -> Self {
        let mut frontmatter = Frontmatter::new();
        for (key, value) in iter {
            frontmatter.insert(key, value);
        }
        frontmatter
    }
}

/// Snapshot returned by the metadata cache for one note.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteMetadata {
    pub frontmatter: Option<Frontmatter>,
    /// Inline tag occurrences in body order, as reported (usually with `#`).
    pub inline_tags: Vec<String>,
}

/// Flat field set fed to the renderer. Every field defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontmatterFields {
    pub project: String,
    pub status: String,
    pub due: String,
    /// Deduplicated union of frontmatter and inline tags, joined with `", "`.
    pub tags: String,
}

impl FrontmatterFields {
    /// Build the field set from a metadata snapshot. No snapshot means all
    /// fields are empty.
    pub fn from_metadata(metadata: Option<&NoteMetadata>) -> Self {
        let Some(metadata) = metadata else {
            return Self::default();
        };

        let field = |key: &str| {
            metadata
                .frontmatter
                .as_ref()
                .and_then(|frontmatter| frontmatter.get(key))
                .map(FieldValue::coerce_string)
                .unwrap_or_default()
        };

        let declared = metadata
            .frontmatter
            .as_ref()
            .map(Frontmatter::tags)
            .unwrap_or_default();
        let inline = metadata.inline_tags.iter().map(|tag| normalize_tag(tag));

        let mut tags: Vec<String> = Vec::new();
        for tag in declared.into_iter().chain(inline) {
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        Self {
            project: field("project"),
            status: field("status"),
            due: field("due"),
            tags: tags.join(", "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    #[case(FieldValue::from("alpha"), "alpha")]
    #[case(FieldValue::Integer(42), "42")]
    #[case(FieldValue::Float(1.5), "1.5")]
    #[case(FieldValue::Bool(true), "true")]
    #[case(FieldValue::Null, "")]
    #[case(FieldValue::from(vec!["a", "b"]), "")]
    #[case(FieldValue::Map(Frontmatter::new()), "")]
    fn coerce_string_cases(#[case] value: FieldValue, #[case] expected: &str) {
        assert_eq!(value.coerce_string(), expected);
    }

    #[test]
    fn coerce_string_renders_dates_as_iso_timestamps() {
        let date = Utc.with_ymd_and_hms(2024, 3, 5, 9, 30, 0).unwrap();
        assert_eq!(
            FieldValue::Date(date).coerce_string(),
            "2024-03-05T09:30:00.000Z"
        );
    }

    #[test]
    fn tag_list_is_normalized() {
        let value = FieldValue::from(vec!["Foo", "#bar", " baz "]);
        assert_eq!(value.coerce_tags(), vec!["Foo", "bar", "baz"]);
    }

    #[test]
    fn tag_string_is_split_on_commas() {
        let value = FieldValue::from("a, #b,c");
        assert_eq!(value.coerce_tags(), vec!["a", "b", "c"]);
    }

    #[test]
    fn tag_coercion_drops_empties_and_other_types() {
        let value = FieldValue::List(vec![
            FieldValue::from(" "),
            FieldValue::from("#"),
            FieldValue::Null,
            FieldValue::Integer(7),
        ]);
        assert_eq!(value.coerce_tags(), vec!["7"]);
        assert!(FieldValue::Bool(true).coerce_tags().is_empty());
    }

    #[test]
    fn insert_overwrites_in_place() {
        let mut frontmatter: Frontmatter = [
            ("project", FieldValue::from("apollo")),
            ("status", FieldValue::from("open")),
        ]
        .into_iter()
        .collect();

        let previous = frontmatter.insert("project", FieldValue::from("gemini"));
        assert_eq!(previous, Some(FieldValue::from("apollo")));

        let keys: Vec<&str> = frontmatter.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["project", "status"]);
    }

    #[test]
    fn add_tag_is_a_noop_when_present_or_empty() {
        let mut frontmatter: Frontmatter = [("tags", FieldValue::from("work, #archived"))]
            .into_iter()
            .collect();

        assert!(!frontmatter.add_tag("#archived"));
        assert!(!frontmatter.add_tag("  "));
        assert_eq!(frontmatter.get("tags"), Some(&FieldValue::from("work, #archived")));

        assert!(frontmatter.add_tag("done"));
        assert_eq!(
            frontmatter.get("tags"),
            Some(&FieldValue::from(vec!["work", "archived", "done"]))
        );
    }

    #[test]
    fn fields_are_empty_without_metadata() {
        assert_eq!(FrontmatterFields::from_metadata(None), FrontmatterFields::default());
    }

    #[test]
    fn fields_merge_declared_and_inline_tags() {
        let metadata = NoteMetadata {
            frontmatter: Some(
                [
                    ("project", FieldValue::from("apollo")),
                    ("status", FieldValue::Integer(3)),
                    ("due", FieldValue::List(vec![])),
                    ("tags", FieldValue::from(vec!["work", "#urgent"])),
                ]
                .into_iter()
                .collect(),
            ),
            inline_tags: vec!["#urgent".into(), "#home".into(), "#work".into()],
        };

        let fields = FrontmatterFields::from_metadata(Some(&metadata));
        assert_eq!(fields.project, "apollo");
        assert_eq!(fields.status, "3");
        assert_eq!(fields.due, "");
        assert_eq!(fields.tags, "work, urgent, home");
    }

    #[test]
    fn inline_tags_count_without_frontmatter() {
        let metadata = NoteMetadata {
            frontmatter: None,
            inline_tags: vec!["#a".into(), "#b".into(), "#a".into()],
        };
        let fields = FrontmatterFields::from_metadata(Some(&metadata));
        assert_eq!(fields.tags, "a, b");
        assert_eq!(fields.project, "");
    }
}
