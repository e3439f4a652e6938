//! Errors - エラー型と分類
//!
//! - `StoreError`: 外部コラボレータ（note store / metadata cache / mutator）の失敗
//! - `ArchiveError`: archival 操作のエラー
//! - `SettingsError`: 設定の永続化エラー
//!
//! 前提条件の不成立（active note なし等）はエラーではなく
//! `ArchiveOutcome::Aborted` として扱います。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("path escapes the vault: {0}")]
    OutsideVault(String),

    #[error("invalid frontmatter in {path}: {message}")]
    InvalidFrontmatter { path: String, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A path exists but is not the kind of entry the operation needs.
    #[error("path conflict: {path} already exists and is not the expected type")]
    PathConflict { path: String },
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings json error: {0}")]
    Json(#[from] serde_json::Error),
}
