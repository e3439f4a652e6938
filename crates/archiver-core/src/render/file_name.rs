//! Archive file name rendering.

use chrono::{DateTime, Utc};

use super::placeholders::{DATE, DATETIME, TITLE, iso_date, iso_datetime, substitute};
use crate::domain::NoteRef;

/// Characters that cannot appear in a file name.
const FORBIDDEN: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Used when neither the pattern nor the base name leaves anything.
const FALLBACK_NAME: &str = "Untitled";

/// Render a file name (without extension) from `pattern`.
///
/// Only `{{date}}`, `{{datetime}}` and `{{title}}` are recognized here;
/// `{{datetime}}` has `:` and `.` replaced by `-`. The result is sanitized,
/// and falls back to the note's base name when nothing is left (or to
/// `Untitled` when the base name sanitizes to nothing as well).
pub fn render_file_name(pattern: &str, note: &NoteRef, now: DateTime<Utc>) -> String {
    let table = [
        (DATE, iso_date(now)),
        (DATETIME, iso_datetime(now).replace([':', '.'], "-")),
        (TITLE, note.basename().to_string()),
    ];

    let name = sanitize_file_name(&substitute(pattern, &table));
    if !name.is_empty() {
        return name;
    }
    let base = sanitize_file_name(note.basename());
    if base.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        base
    }
}

/// Replace forbidden characters with `-`, collapse whitespace runs to one
/// space and trim.
pub fn sanitize_file_name(value: &str) -> String {
    value
        .replace(FORBIDDEN, "-")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;
    use rstest::rstest;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 15, 30).unwrap()
    }

    #[test]
    fn default_pattern() {
        let note = NoteRef::new("Inbox/Note.md");
        assert_eq!(
            render_file_name("{{date}} - {{title}}", &note, now()),
            "2024-01-01 - Note"
        );
    }

    #[test]
    fn datetime_is_path_safe() {
        let note = NoteRef::new("Note.md");
        assert_eq!(
            render_file_name("{{datetime}}", &note, now()),
            "2024-01-01T09-15-30-000Z"
        );
    }

    #[test]
    fn body_only_placeholders_are_not_recognized() {
        let note = NoteRef::new("Note.md");
        assert_eq!(render_file_name("{{path}}", &note, now()), "{{path}}");
    }

    #[rstest]
    #[case("a<b>c:d\"e/f\\g|h?i*j", "a-b-c-d-e-f-g-h-i-j")]
    #[case("  many   spaces\there  ", "many spaces here")]
    #[case("plain", "plain")]
    fn sanitize_cases(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_file_name(input), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t \n")]
    fn empty_result_falls_back_to_basename(#[case] pattern: &str) {
        let note = NoteRef::new("Projects/Plan.md");
        assert_eq!(render_file_name(pattern, &note, now()), "Plan");
    }

    #[rstest]
    #[case("Notes/ .md")]
    #[case("Inbox/   .md")]
    fn blank_basename_falls_back_to_a_fixed_name(#[case] path: &str) {
        let note = NoteRef::new(path);
        assert_eq!(render_file_name("", &note, now()), "Untitled");
        assert_eq!(render_file_name("{{title}}", &note, now()), "Untitled");
    }

    #[test]
    fn output_never_contains_forbidden_characters() {
        let note = NoteRef::new("What? Why*.md");
        let name = render_file_name("{{title}}: {{datetime}}", &note, now());
        assert!(!name.contains(FORBIDDEN));
        assert_eq!(name, "What- Why-- 2024-01-01T09-15-30-000Z");
    }

    proptest! {
        #[test]
        fn proptest_file_names_are_always_clean(
            pattern in prop_oneof![
                "\\PC{0,40}",
                "[ a-z<>:\"/|?*{}\t]{0,10}\\{\\{(title|date|datetime)\\}\\}[ a-z<>:\"/|?*\t]{0,10}",
            ],
            title in "[^/\\\\]{0,12}",
        ) {
            let note = NoteRef::new(format!("Inbox/{title}.md"));
            let name = render_file_name(&pattern, &note, now());

            prop_assert!(!name.is_empty());
            prop_assert!(!name.contains(FORBIDDEN));
            prop_assert!(!name.contains("  "));
            prop_assert_eq!(name.trim(), name.as_str());
            prop_assert!(!name.chars().any(|c| c.is_whitespace() && c != ' '));
        }
    }
}
