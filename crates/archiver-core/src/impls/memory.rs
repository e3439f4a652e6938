//! InMemoryVault - テスト・開発用の vault
//!
//! # 実装詳細
//! - BTreeMap<String, String> でファイル（パス → 内容）を管理
//! - BTreeSet<String> でフォルダを管理
//! - Mutex で排他制御（ロック中に await しない）
//! - create_folder の呼び出し順を記録（テストでの検証用）
//!
//! `.md` で終わらないファイルは note ではないエントリとして扱います。

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::markdown::{parse_frontmatter, parse_metadata, split_frontmatter, write_frontmatter};
use crate::domain::path::{self, normalize_path};
use crate::domain::{NoteMetadata, NoteRef, StoreError};
use crate::ports::{FrontmatterEdit, FrontmatterMutator, MetadataCache, NoteStore};

#[derive(Debug, Default)]
struct VaultState {
    files: BTreeMap<String, String>,
    folders: BTreeSet<String>,
    created_folders: Vec<String>,
}

impl VaultState {
    fn exists(&self, path: &str) -> bool {
        path == path::ROOT || self.files.contains_key(path) || self.folders.contains(path)
    }

    /// Register every ancestor folder of a file without recording it as created.
    fn seed_parents(&mut self, file_path: &str) {
        let parent = path::parent(file_path);
        for prefix in path::prefixes(&parent) {
            self.folders.insert(prefix);
        }
    }
}

/// InMemoryVault は NoteStore + MetadataCache + FrontmatterMutator の
/// メモリ上の実装
///
/// # 使用例
/// ```ignore
/// let vault = InMemoryVault::new()
///     .with_file("Templates/Archive/Basic.md", "# {{title}}")
///     .with_file("Inbox/Note.md", "- [x] done\n");
/// ```
#[derive(Debug, Default)]
pub struct InMemoryVault {
    state: Mutex<VaultState>,
}

impl InMemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file (and its parent folders).
    pub fn with_file(self, file_path: &str, content: &str) -> Self {
        {
            let mut state = self.lock();
            let file_path = normalize_path(file_path);
            state.seed_parents(&file_path);
            state.files.insert(file_path, content.to_string());
        }
        self
    }

    /// Seed a folder (and its parents).
    pub fn with_folder(self, folder: &str) -> Self {
        {
            let mut state = self.lock();
            for prefix in path::prefixes(folder) {
                state.folders.insert(prefix);
            }
        }
        self
    }

    /// Current content of a file.
    pub fn file(&self, file_path: &str) -> Option<String> {
        self.lock().files.get(&normalize_path(file_path)).cloned()
    }

    /// Every file path, sorted.
    pub fn file_paths(&self) -> Vec<String> {
        self.lock().files.keys().cloned().collect()
    }

    /// Folders created through `create_folder`, in call order.
    pub fn created_folders(&self) -> Vec<String> {
        self.lock().created_folders.clone()
    }

    fn lock(&self) -> MutexGuard<'_, VaultState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl NoteStore for InMemoryVault {
    async fn list_markdown_notes(&self) -> Result<Vec<NoteRef>, StoreError> {
        Ok(self
            .lock()
            .files
            .keys()
            .filter(|file_path| file_path.ends_with(".md"))
            .map(NoteRef::new)
            .collect())
    }

    async fn read(&self, note: &NoteRef) -> Result<String, StoreError> {
        self.lock()
            .files
            .get(note.path())
            .cloned()
            .ok_or_else(|| StoreError::NotFound(note.path().to_string()))
    }

    async fn create(&self, file_path: &str, content: &str) -> Result<NoteRef, StoreError> {
        let file_path = normalize_path(file_path);
        let mut state = self.lock();
        if state.exists(&file_path) {
            return Err(StoreError::AlreadyExists(file_path));
        }
        state.files.insert(file_path.clone(), content.to_string());
        Ok(NoteRef::new(file_path))
    }

    async fn modify(&self, note: &NoteRef, content: &str) -> Result<(), StoreError> {
        let mut state = self.lock();
        match state.files.get_mut(note.path()) {
            Some(existing) => {
                *existing = content.to_string();
                Ok(())
            }
            None => Err(StoreError::NotFound(note.path().to_string())),
        }
    }

    async fn move_note(&self, note: &NoteRef, new_path: &str) -> Result<NoteRef, StoreError> {
        let new_path = normalize_path(new_path);
        let mut state = self.lock();
        if state.exists(&new_path) {
            return Err(StoreError::AlreadyExists(new_path));
        }
        let content = state
            .files
            .remove(note.path())
            .ok_or_else(|| StoreError::NotFound(note.path().to_string()))?;
        state.files.insert(new_path.clone(), content);
        Ok(NoteRef::new(new_path))
    }

    async fn exists(&self, file_path: &str) -> Result<bool, StoreError> {
        Ok(self.lock().exists(&normalize_path(file_path)))
    }

    async fn folder_exists(&self, folder: &str) -> Result<bool, StoreError> {
        let folder = normalize_path(folder);
        Ok(folder == path::ROOT || self.lock().folders.contains(&folder))
    }

    async fn create_folder(&self, folder: &str) -> Result<(), StoreError> {
        let folder = normalize_path(folder);
        let mut state = self.lock();
        if state.exists(&folder) {
            return Err(StoreError::AlreadyExists(folder));
        }
        state.folders.insert(folder.clone());
        state.created_folders.push(folder);
        Ok(())
    }

    async fn note_at(&self, file_path: &str) -> Result<Option<NoteRef>, StoreError> {
        let file_path = normalize_path(file_path);
        let state = self.lock();
        Ok((file_path.ends_with(".md") && state.files.contains_key(&file_path))
            .then(|| NoteRef::new(&file_path)))
    }
}

#[async_trait]
impl MetadataCache for InMemoryVault {
    async fn metadata(&self, note: &NoteRef) -> Result<Option<NoteMetadata>, StoreError> {
        Ok(self
            .lock()
            .files
            .get(note.path())
            .map(|text| parse_metadata(text)))
    }
}

#[async_trait]
impl FrontmatterMutator for InMemoryVault {
    async fn update_frontmatter(
        &self,
        note: &NoteRef,
        edit: FrontmatterEdit,
    ) -> Result<(), StoreError> {
        let mut state = self.lock();
        let text = state
            .files
            .get_mut(note.path())
            .ok_or_else(|| StoreError::NotFound(note.path().to_string()))?;

        let updated = edit_text(note, text, edit)?;
        *text = updated;
        Ok(())
    }
}

/// Apply a frontmatter edit to a note's full text. An edit that changes
/// nothing returns the text untouched.
pub(crate) fn edit_text(
    note: &NoteRef,
    text: &str,
    edit: FrontmatterEdit,
) -> Result<String, StoreError> {
    let invalid = |message: String| StoreError::InvalidFrontmatter {
        path: note.path().to_string(),
        message,
    };

    let mut frontmatter = match split_frontmatter(text).0 {
        Some(yaml) => parse_frontmatter(yaml).map_err(invalid)?,
        None => Default::default(),
    };
    let before = frontmatter.clone();
    edit(&mut frontmatter);
    if frontmatter == before {
        return Ok(text.to_string());
    }
    write_frontmatter(text, &frontmatter).map_err(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldValue;

    #[tokio::test]
    async fn create_refuses_existing_paths() {
        let vault = InMemoryVault::new().with_file("A.md", "a");
        let err = vault.create("A.md", "b").await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(path) if path == "A.md"));
        assert_eq!(vault.file("A.md").as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn seeded_parents_exist_but_are_not_recorded() {
        let vault = InMemoryVault::new().with_file("X/Y/a.md", "");
        assert!(vault.folder_exists("X").await.unwrap());
        assert!(vault.folder_exists("X/Y").await.unwrap());
        assert!(vault.created_folders().is_empty());
    }

    #[tokio::test]
    async fn only_markdown_files_are_notes() {
        let vault = InMemoryVault::new()
            .with_file("a.md", "")
            .with_file("image.png", "")
            .with_folder("Folder.md");

        let notes = vault.list_markdown_notes().await.unwrap();
        assert_eq!(notes, vec![NoteRef::new("a.md")]);
        assert!(vault.note_at("image.png").await.unwrap().is_none());
        assert!(vault.note_at("Folder.md").await.unwrap().is_none());
        assert!(vault.exists("Folder.md").await.unwrap());
    }

    #[tokio::test]
    async fn move_note_relocates_content() {
        let vault = InMemoryVault::new().with_file("a.md", "body");
        let moved = vault
            .move_note(&NoteRef::new("a.md"), "Done/a.md")
            .await
            .unwrap();
        assert_eq!(moved.path(), "Done/a.md");
        assert_eq!(vault.file("Done/a.md").as_deref(), Some("body"));
        assert!(vault.file("a.md").is_none());
    }

    #[tokio::test]
    async fn metadata_is_parsed_from_text() {
        let vault = InMemoryVault::new().with_file("a.md", "---\nproject: apollo\n---\n#home\n");
        let metadata = vault.metadata(&NoteRef::new("a.md")).await.unwrap().unwrap();
        assert_eq!(
            metadata.frontmatter.unwrap().get("project"),
            Some(&FieldValue::from("apollo"))
        );
        assert_eq!(metadata.inline_tags, vec!["#home"]);
        assert!(vault.metadata(&NoteRef::new("missing.md")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_frontmatter_keeps_body() {
        let vault = InMemoryVault::new().with_file("a.md", "---\nstatus: open\n---\nbody\n");
        vault
            .update_frontmatter(
                &NoteRef::new("a.md"),
                Box::new(|frontmatter| {
                    frontmatter.insert("status", FieldValue::from("closed"));
                }),
            )
            .await
            .unwrap();
        assert_eq!(
            vault.file("a.md").as_deref(),
            Some("---\nstatus: closed\n---\nbody\n")
        );
    }

    #[tokio::test]
    async fn noop_edit_leaves_text_alone() {
        let original = "---\ntags:   [archived]\n---\nbody\n";
        let vault = InMemoryVault::new().with_file("a.md", original);
        vault
            .update_frontmatter(
                &NoteRef::new("a.md"),
                Box::new(|frontmatter| {
                    frontmatter.add_tag("#archived");
                }),
            )
            .await
            .unwrap();
        assert_eq!(vault.file("a.md").as_deref(), Some(original));
    }

    #[tokio::test]
    async fn update_frontmatter_refuses_malformed_blocks() {
        let original = "---\nkey: [unclosed\n---\nbody\n";
        let vault = InMemoryVault::new().with_file("a.md", original);
        let err = vault
            .update_frontmatter(&NoteRef::new("a.md"), Box::new(|_| {}))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidFrontmatter { .. }));
        assert_eq!(vault.file("a.md").as_deref(), Some(original));
    }
}
