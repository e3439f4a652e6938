//! NoteStore port - vault のファイル・フォルダ操作
//!
//! パスはすべて vault 相対の `/` 区切り文字列です。

use async_trait::async_trait;

use crate::domain::{NoteRef, StoreError};

/// NoteStore は note とフォルダの読み書きを提供
///
/// # 実装
/// - `impls::InMemoryVault`（テスト用）
/// - `impls::FsVault`（ディレクトリ上の vault）
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Every Markdown note in the vault.
    async fn list_markdown_notes(&self) -> Result<Vec<NoteRef>, StoreError>;

    async fn read(&self, note: &NoteRef) -> Result<String, StoreError>;

    /// Create a new note. Fails with `AlreadyExists` if the path is taken.
    async fn create(&self, path: &str, content: &str) -> Result<NoteRef, StoreError>;

    async fn modify(&self, note: &NoteRef, content: &str) -> Result<(), StoreError>;

    /// Move a note to `new_path` and return its new identity.
    async fn move_note(&self, note: &NoteRef, new_path: &str) -> Result<NoteRef, StoreError>;

    /// Is there any entry (note, other file or folder) at `path`?
    async fn exists(&self, path: &str) -> Result<bool, StoreError>;

    async fn folder_exists(&self, path: &str) -> Result<bool, StoreError>;

    /// Create a single folder. The parent is expected to exist.
    async fn create_folder(&self, path: &str) -> Result<(), StoreError>;

    /// The note at `path`, if that entry is a Markdown note.
    async fn note_at(&self, path: &str) -> Result<Option<NoteRef>, StoreError>;
}
