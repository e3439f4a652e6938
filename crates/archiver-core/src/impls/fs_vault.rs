//! FsVault - ディレクトリ上の vault
//!
//! vault 相対パス（`/` 区切り）をルートディレクトリ配下のファイルに対応付けます。
//! ドットで始まるディレクトリ（`.git`, `.archiver` など）は一覧から除外します。

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use super::markdown::parse_metadata;
use super::memory::edit_text;
use crate::domain::path::{self, normalize_path};
use crate::domain::{NoteMetadata, NoteRef, StoreError};
use crate::ports::{FrontmatterEdit, FrontmatterMutator, MetadataCache, NoteStore};

#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a vault path onto the disk. `..` segments are refused so nothing
    /// outside the root is ever touched.
    fn resolve(&self, vault_path: &str) -> Result<PathBuf, StoreError> {
        let normalized = normalize_path(vault_path);
        if normalized == path::ROOT {
            return Ok(self.root.clone());
        }
        if normalized.split('/').any(|segment| segment == "..") {
            return Err(StoreError::OutsideVault(normalized));
        }
        Ok(normalized
            .split('/')
            .fold(self.root.clone(), |acc, segment| acc.join(segment)))
    }

    fn relative(&self, full: &Path) -> Option<String> {
        let relative = full.strip_prefix(&self.root).ok()?;
        let segments: Vec<String> = relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(segments.join("/"))
    }

    async fn is_file(&self, vault_path: &str) -> Result<bool, StoreError> {
        match tokio::fs::metadata(self.resolve(vault_path)?).await {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

fn map_io(err: std::io::Error, vault_path: &str) -> StoreError {
    match err.kind() {
        ErrorKind::NotFound => StoreError::NotFound(vault_path.to_string()),
        ErrorKind::AlreadyExists => StoreError::AlreadyExists(vault_path.to_string()),
        _ => StoreError::Io(err),
    }
}

#[async_trait]
impl NoteStore for FsVault {
    async fn list_markdown_notes(&self) -> Result<Vec<NoteRef>, StoreError> {
        let mut notes = Vec::new();
        let mut pending = vec![self.root.clone()];

        while let Some(dir) = pending.pop() {
            let mut entries = tokio::fs::read_dir(&dir).await?;
            while let Some(entry) = entries.next_entry().await? {
                let name = entry.file_name();
                if name.to_string_lossy().starts_with('.') {
                    continue;
                }
                let file_type = entry.file_type().await?;
                let full = entry.path();
                if file_type.is_dir() {
                    pending.push(full);
                } else if file_type.is_file()
                    && full.extension().is_some_and(|ext| ext == "md")
                    && let Some(relative) = self.relative(&full)
                {
                    notes.push(NoteRef::new(relative));
                }
            }
        }

        notes.sort();
        Ok(notes)
    }

    async fn read(&self, note: &NoteRef) -> Result<String, StoreError> {
        tokio::fs::read_to_string(self.resolve(note.path())?)
            .await
            .map_err(|e| map_io(e, note.path()))
    }

    async fn create(&self, file_path: &str, content: &str) -> Result<NoteRef, StoreError> {
        let file_path = normalize_path(file_path);
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.resolve(&file_path)?)
            .await
            .map_err(|e| map_io(e, &file_path))?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(NoteRef::new(file_path))
    }

    async fn modify(&self, note: &NoteRef, content: &str) -> Result<(), StoreError> {
        if !self.is_file(note.path()).await? {
            return Err(StoreError::NotFound(note.path().to_string()));
        }
        tokio::fs::write(self.resolve(note.path())?, content)
            .await
            .map_err(|e| map_io(e, note.path()))
    }

    async fn move_note(&self, note: &NoteRef, new_path: &str) -> Result<NoteRef, StoreError> {
        let new_path = normalize_path(new_path);
        if self.exists(&new_path).await? {
            return Err(StoreError::AlreadyExists(new_path));
        }
        tokio::fs::rename(self.resolve(note.path())?, self.resolve(&new_path)?)
            .await
            .map_err(|e| map_io(e, note.path()))?;
        Ok(NoteRef::new(new_path))
    }

    async fn exists(&self, file_path: &str) -> Result<bool, StoreError> {
        Ok(tokio::fs::try_exists(self.resolve(file_path)?).await?)
    }

    async fn folder_exists(&self, folder: &str) -> Result<bool, StoreError> {
        match tokio::fs::metadata(self.resolve(folder)?).await {
            Ok(metadata) => Ok(metadata.is_dir()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    async fn create_folder(&self, folder: &str) -> Result<(), StoreError> {
        tokio::fs::create_dir(self.resolve(folder)?)
            .await
            .map_err(|e| map_io(e, &normalize_path(folder)))
    }

    async fn note_at(&self, file_path: &str) -> Result<Option<NoteRef>, StoreError> {
        let file_path = normalize_path(file_path);
        if file_path.ends_with(".md") && self.is_file(&file_path).await? {
            Ok(Some(NoteRef::new(file_path)))
        } else {
            Ok(None)
        }
    }
}

#[async_trait]
impl MetadataCache for FsVault {
    async fn metadata(&self, note: &NoteRef) -> Result<Option<NoteMetadata>, StoreError> {
        match tokio::fs::read_to_string(self.resolve(note.path())?).await {
            Ok(text) => Ok(Some(parse_metadata(&text))),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl FrontmatterMutator for FsVault {
    async fn update_frontmatter(
        &self,
        note: &NoteRef,
        edit: FrontmatterEdit,
    ) -> Result<(), StoreError> {
        let text = self.read(note).await?;
        let updated = edit_text(note, &text, edit)?;
        self.modify(note, &updated).await
    }
}
