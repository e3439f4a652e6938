//! Archive-with-template flow.

use tracing::info;

use super::archiver::{ArchiveMode, Archiver};
use super::extract::extract_frontmatter_fields;
use super::path_allocator::next_available_path;
use crate::domain::frontmatter::normalize_tag;
use crate::domain::path::join;
use crate::domain::{AbortReason, ArchiveError, ArchiveOutcome, NoteRef, Settings};
use crate::render::{RenderContext, render_file_name, render_template};

impl Archiver {
    /// Render a chosen template against `active` into a new archive note.
    ///
    /// 1. active note と テンプレートの存在を確認（なければ Aborted）
    /// 2. テンプレートを選択（キャンセルなら Cancelled）
    /// 3. archive folder（`MoveSource` なら processed folder も）を準備
    /// 4. 本文とファイル名をレンダリングし、衝突しないパスに作成
    /// 5. `archive-time` を記録
    /// 6. `MoveSource` なら processed tag を付けて processed folder に移動
    ///
    /// A failure after the archive note is created leaves it in place.
    pub async fn archive_note(
        &self,
        active: Option<&NoteRef>,
        settings: &Settings,
        mode: ArchiveMode,
    ) -> Result<ArchiveOutcome, ArchiveError> {
        let Some(source) = active else {
            return Ok(self.abort(AbortReason::NoActiveNote));
        };

        let templates = self.list_templates(&settings.template_folder).await?;
        if templates.is_empty() {
            return Ok(self.abort(AbortReason::NoTemplates));
        }
        let Some(template) = self.choose_template(templates, &settings.template_folder).await else {
            return Ok(ArchiveOutcome::Cancelled);
        };

        let now = self.now();
        let source_content = self.store.read(source).await?;
        let fields = extract_frontmatter_fields(self.metadata.as_ref(), source).await?;
        let context = RenderContext::new(source.clone(), source_content)
            .include_original_content(settings.include_original_content)
            .with_fields(fields);

        let body = render_template(&template.content, &context, now);
        let file_name = render_file_name(&settings.archive_file_name_pattern, source, now);

        // 書き込み前に両方のフォルダを準備する（衝突なら何も作らずに中断）
        if mode == ArchiveMode::MoveSource
            && let Some(aborted) = self.prepare_folder(&settings.processed_folder).await?
        {
            return Ok(aborted);
        }
        if let Some(aborted) = self.prepare_folder(&settings.archive_folder).await? {
            return Ok(aborted);
        }
        let desired = join(&settings.archive_folder, &format!("{file_name}.md"));
        let archive_path = next_available_path(self.store.as_ref(), &desired).await?;
        let archive = self.store.create(&archive_path, &body).await?;
        self.stamp_archive_time(&archive, now).await?;
        info!(source = %source, archive = %archive, template = %template.note, "archive note created");

        let moved_to = match mode {
            ArchiveMode::CopyOnly => None,
            ArchiveMode::MoveSource => {
                self.tag_processed(source, &settings.processed_tag).await?;

                let desired = join(&settings.processed_folder, source.file_name());
                let target = next_available_path(self.store.as_ref(), &desired).await?;
                let moved = self.store.move_note(source, &target).await?;
                info!(from = %source, to = %moved, "source note moved");
                Some(moved.path().to_string())
            }
        };

        Ok(self.finish(ArchiveOutcome::Archived {
            archive: archive.path().to_string(),
            moved_to,
        }))
    }

    /// Add the processed tag to the source's frontmatter tag list. A blank
    /// tag or one already declared leaves the note untouched.
    async fn tag_processed(&self, source: &NoteRef, tag: &str) -> Result<(), ArchiveError> {
        let tag = normalize_tag(tag);
        if tag.is_empty() {
            return Ok(());
        }
        self.mutator
            .update_frontmatter(
                source,
                Box::new(move |frontmatter| {
                    frontmatter.add_tag(&tag);
                }),
            )
            .await?;
        Ok(())
    }
}
