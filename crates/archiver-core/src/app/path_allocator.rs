//! Path allocation - 衝突しないパスとフォルダの準備
//!
//! 存在チェックと作成はアトミックではありません。ストア側の `create` /
//! `move_note` / `create_folder` は既存エントリを上書きせず `AlreadyExists`
//! を返すので、競合しても既存の note が失われることはありません。

use tracing::debug;

use crate::domain::path::{self, normalize_path};
use crate::domain::{ArchiveError, StoreError};
use crate::ports::NoteStore;

/// First path starting from `desired` that nothing occupies.
///
/// `desired` is returned unchanged when free. Otherwise `" (n).md"` replaces
/// the `.md` suffix, for n = 1, 2, 3, ...
pub async fn next_available_path(
    store: &dyn NoteStore,
    desired: &str,
) -> Result<String, StoreError> {
    let desired = normalize_path(desired);
    if !store.exists(&desired).await? {
        return Ok(desired);
    }

    let base = desired.strip_suffix(".md").unwrap_or(&desired);
    let mut index: usize = 1;
    loop {
        let candidate = format!("{base} ({index}).md");
        if !store.exists(&candidate).await? {
            debug!(desired = %desired, allocated = %candidate, "path collision resolved");
            return Ok(candidate);
        }
        index += 1;
    }
}

/// Create every missing folder along `folder`, root-to-leaf.
///
/// A no-op for the root and for folders that already exist. A segment that
/// exists as a file is a `PathConflict`.
pub async fn ensure_folder_exists(store: &dyn NoteStore, folder: &str) -> Result<(), ArchiveError> {
    let folder = normalize_path(folder);
    if folder == path::ROOT || store.folder_exists(&folder).await? {
        return Ok(());
    }

    for prefix in path::prefixes(&folder) {
        if store.folder_exists(&prefix).await? {
            continue;
        }
        if store.exists(&prefix).await? {
            return Err(ArchiveError::PathConflict { path: prefix });
        }
        store.create_folder(&prefix).await?;
        debug!(folder = %prefix, "created folder");
    }
    Ok(())
}
