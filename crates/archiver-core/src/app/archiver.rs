//! Archiver - archival フローの本体
//!
//! # フロー
//! - `archive_note`: テンプレートから archive note を作成（必要なら source を移動）
//! - `archive_completed_tasks`: 完了タスクを archive note に移す
//!
//! 各フローは直線的なパイプラインで、前提条件を満たさない場合は
//! Notifier に報告して `ArchiveOutcome::Aborted` を返します。
//! コラボレータの失敗は `Err` としてそのまま伝播し、ロールバックはしません。

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, warn};

use super::path_allocator::ensure_folder_exists;
use super::templates::{read_templates, template_labels};
use crate::domain::{
    AbortReason, ArchiveError, ArchiveOutcome, FieldValue, NoteRef, StoreError, Template,
};
use crate::ports::{Chooser, Clock, FrontmatterMutator, MetadataCache, NoteStore, Notifier};
use crate::render::iso_datetime;

/// Frontmatter key stamped onto every archive note.
pub const ARCHIVE_TIME_KEY: &str = "archive-time";

const TEMPLATE_PLACEHOLDER: &str = "Choose an archive template";

/// Variant of the archive-with-template flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArchiveMode {
    /// Leave the source note where it is.
    #[default]
    CopyOnly,
    /// Tag the source note and move it into the processed folder.
    MoveSource,
}

/// Archiver は各ポートを保持し、archival フローを実行する
///
/// # 使用例
/// ```ignore
/// let archiver = ArchiverBuilder::new()
///     .vault(vault)
///     .chooser(chooser)
///     .notifier(notifier)
///     .build()?;
/// let outcome = archiver
///     .archive_note(Some(&note), &settings, ArchiveMode::MoveSource)
///     .await?;
/// ```
pub struct Archiver {
    pub(crate) store: Arc<dyn NoteStore>,
    pub(crate) metadata: Arc<dyn MetadataCache>,
    pub(crate) mutator: Arc<dyn FrontmatterMutator>,
    pub(crate) chooser: Arc<dyn Chooser>,
    pub(crate) notifier: Arc<dyn Notifier>,
    pub(crate) clock: Arc<dyn Clock>,
}

impl Archiver {
    /// Templates available under `template_folder`, sorted by path.
    pub async fn list_templates(&self, template_folder: &str) -> Result<Vec<Template>, StoreError> {
        read_templates(self.store.as_ref(), template_folder).await
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Let the user pick a template. `None` on cancel.
    pub(crate) async fn choose_template(
        &self,
        templates: Vec<Template>,
        template_folder: &str,
    ) -> Option<Template> {
        let labels = template_labels(&templates, template_folder);

        let index = self.chooser.choose(TEMPLATE_PLACEHOLDER, &labels).await?;
        let template = templates.into_iter().nth(index);
        if let Some(template) = &template {
            debug!(template = %template.note, "template chosen");
        }
        template
    }

    /// Write the `archive-time` field into the archive note's frontmatter.
    pub(crate) async fn stamp_archive_time(
        &self,
        archive: &NoteRef,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let stamp = iso_datetime(now);
        self.mutator
            .update_frontmatter(
                archive,
                Box::new(move |frontmatter| {
                    frontmatter.insert(ARCHIVE_TIME_KEY, FieldValue::Text(stamp));
                }),
            )
            .await
    }

    /// Make sure `folder` exists. A conflicting entry yields the aborted
    /// outcome the caller should return.
    pub(crate) async fn prepare_folder(
        &self,
        folder: &str,
    ) -> Result<Option<ArchiveOutcome>, StoreError> {
        match ensure_folder_exists(self.store.as_ref(), folder).await {
            Ok(()) => Ok(None),
            Err(ArchiveError::PathConflict { path }) => {
                Ok(Some(self.abort(AbortReason::PathConflict(path))))
            }
            Err(ArchiveError::Store(err)) => Err(err),
        }
    }

    /// Report a precondition failure and stop.
    pub(crate) fn abort(&self, reason: AbortReason) -> ArchiveOutcome {
        warn!(reason = ?reason, "archive aborted");
        self.notifier.notify(&reason.message());
        ArchiveOutcome::Aborted(reason)
    }

    /// Report a finished operation.
    pub(crate) fn finish(&self, outcome: ArchiveOutcome) -> ArchiveOutcome {
        if let Some(message) = outcome.message() {
            self.notifier.notify(&message);
        }
        outcome
    }
}
