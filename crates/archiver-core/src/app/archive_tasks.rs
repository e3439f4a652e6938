//! Archive-completed-tasks flow.

use chrono::{DateTime, Utc};
use tracing::info;

use super::archiver::Archiver;
use super::extract::extract_frontmatter_fields;
use crate::domain::path::join;
use crate::domain::{
    AbortReason, ArchiveError, ArchiveOutcome, NoteRef, Settings, extract_completed_tasks,
};
use crate::render::{RenderContext, iso_datetime, render_file_name, render_template};

const COMPLETED_TASKS_SUFFIX: &str = " - completed-tasks.md";

impl Archiver {
    /// Move the completed checklist items of `active` into its
    /// completed-tasks archive note.
    ///
    /// 対象パスは `<archiveFolder>/<file name> - completed-tasks.md` で固定です。
    /// 既に note があればセクションを追記し、note 以外のエントリがあれば中断、
    /// なければテンプレートから新規作成します。最後に source から完了タスクを
    /// 取り除きます。
    pub async fn archive_completed_tasks(
        &self,
        active: Option<&NoteRef>,
        settings: &Settings,
    ) -> Result<ArchiveOutcome, ArchiveError> {
        let Some(source) = active else {
            return Ok(self.abort(AbortReason::NoActiveNote));
        };

        let source_content = self.store.read(source).await?;
        let extraction = extract_completed_tasks(&source_content);
        if extraction.is_empty() {
            return Ok(self.abort(AbortReason::NoCompletedTasks));
        }

        let templates = self.list_templates(&settings.template_folder).await?;
        if templates.is_empty() {
            return Ok(self.abort(AbortReason::NoTemplates));
        }
        let Some(template) = self.choose_template(templates, &settings.template_folder).await else {
            return Ok(ArchiveOutcome::Cancelled);
        };

        let now = self.now();
        let fields = extract_frontmatter_fields(self.metadata.as_ref(), source).await?;
        let context = RenderContext::new(source.clone(), extraction.completed_tasks.join("\n"))
            .include_original_content(settings.include_original_content)
            .with_fields(fields)
            .with_completed_tasks(extraction.completed_tasks.clone());

        let base_name = render_file_name(&settings.archive_file_name_pattern, source, now);
        let target = join(
            &settings.archive_folder,
            &format!("{base_name}{COMPLETED_TASKS_SUFFIX}"),
        );

        if let Some(aborted) = self.prepare_folder(&settings.archive_folder).await? {
            return Ok(aborted);
        }

        let (archive, appended) = match self.store.note_at(&target).await? {
            Some(existing) => {
                let text = self.store.read(&existing).await?;
                let updated = append_section(&text, &extraction.completed_tasks, now);
                self.store.modify(&existing, &updated).await?;
                (existing, true)
            }
            None => {
                if self.store.exists(&target).await? {
                    return Ok(self.abort(AbortReason::PathConflict(target)));
                }
                let body = render_template(&template.content, &context, now);
                (self.store.create(&target, &body).await?, false)
            }
        };
        self.stamp_archive_time(&archive, now).await?;

        self.store
            .modify(source, &extraction.remaining_content)
            .await?;
        info!(
            source = %source,
            archive = %archive,
            count = extraction.count(),
            appended,
            "completed tasks archived"
        );

        Ok(self.finish(ArchiveOutcome::TasksArchived {
            archive: archive.path().to_string(),
            count: extraction.count(),
            appended,
        }))
    }
}

/// Append a timestamped section holding `tasks` to an existing archive note.
fn append_section(existing: &str, tasks: &[String], now: DateTime<Utc>) -> String {
    format!(
        "{}\n\n## Archived {}\n\n{}\n",
        existing.trim_end_matches(['\n', '\r']),
        iso_datetime(now),
        tasks.join("\n")
    )
}
