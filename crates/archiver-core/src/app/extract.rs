//! Frontmatter field extraction through the metadata cache.

use crate::domain::{FrontmatterFields, NoteRef, StoreError};
use crate::ports::MetadataCache;

/// Flat template fields for `note`. No cached metadata means empty fields.
pub async fn extract_frontmatter_fields(
    cache: &dyn MetadataCache,
    note: &NoteRef,
) -> Result<FrontmatterFields, StoreError> {
    let metadata = cache.metadata(note).await?;
    Ok(FrontmatterFields::from_metadata(metadata.as_ref()))
}
