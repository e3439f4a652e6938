//! MetadataCache port - note ごとの frontmatter と inline tags

use async_trait::async_trait;

use crate::domain::{NoteMetadata, NoteRef, StoreError};

/// MetadataCache はホストが解析済みのメタデータを返す
///
/// スナップショットが無い（未解析・存在しない）場合は `Ok(None)`。
#[async_trait]
pub trait MetadataCache: Send + Sync {
    async fn metadata(&self, note: &NoteRef) -> Result<Option<NoteMetadata>, StoreError>;
}
