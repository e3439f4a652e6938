//! Archive body rendering.

use chrono::{DateTime, Utc};

use super::context::RenderContext;
use super::placeholders::*;

/// Render a template body against `context` at instant `now`.
///
/// Tokens, in table order: `{{date}}`, `{{datetime}}`, `{{title}}`,
/// `{{path}}`, `{{link}}`, `{{content}}`, `{{project}}`, `{{status}}`,
/// `{{due}}`, `{{tags}}`, `{{completed_tasks}}`, `{{completed_tasks_count}}`.
pub fn render_template(template: &str, context: &RenderContext, now: DateTime<Utc>) -> String {
    let content = if context.include_original_content {
        context.source_content.clone()
    } else {
        String::new()
    };

    let table = [
        (DATE, iso_date(now)),
        (DATETIME, iso_datetime(now)),
        (TITLE, context.note.basename().to_string()),
        (PATH, context.note.path().to_string()),
        (LINK, context.note.link()),
        (CONTENT, content),
        (PROJECT, context.fields.project.clone()),
        (STATUS, context.fields.status.clone()),
        (DUE, context.fields.due.clone()),
        (TAGS, context.fields.tags.clone()),
        (COMPLETED_TASKS, context.completed_tasks.join("\n")),
        (COMPLETED_TASKS_COUNT, context.completed_tasks.len().to_string()),
    ];

    substitute(template, &table)
}
