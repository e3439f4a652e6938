//! FrontmatterMutator port - frontmatter の read-modify-write

use async_trait::async_trait;

use crate::domain::{Frontmatter, NoteRef, StoreError};

/// Edit applied to a note's frontmatter block. A note without frontmatter
/// is edited as an empty block.
pub type FrontmatterEdit = Box<dyn FnOnce(&mut Frontmatter) + Send>;

/// FrontmatterMutator は note の frontmatter を編集して保存
///
/// # 設計原則
/// - 読み込み・編集・書き込みはその note に対してアトミック
/// - 本文は変更しない
#[async_trait]
pub trait FrontmatterMutator: Send + Sync {
    async fn update_frontmatter(
        &self,
        note: &NoteRef,
        edit: FrontmatterEdit,
    ) -> Result<(), StoreError>;
}
