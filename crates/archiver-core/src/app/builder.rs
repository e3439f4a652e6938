//! ArchiverBuilder - ポートのワイヤリング
//!
//! # 設計
//! - Builder パターンでポートを差し込む
//! - build() 時に必須ポートの不足を検出（Fail-fast 設計）
//! - Clock は省略可能（デフォルトは SystemClock）

use std::sync::Arc;

use super::archiver::Archiver;
use crate::ports::{
    Chooser, Clock, FrontmatterMutator, MetadataCache, NoteStore, Notifier, SystemClock,
};

/// BuildError は Archiver 構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Missing port: {0}. Wire it into the ArchiverBuilder before build().")]
    MissingPort(&'static str),
}

/// ArchiverBuilder は Archiver を構築
///
/// # 使用例
/// ```ignore
/// let vault = Arc::new(FsVault::new(root));
/// let archiver = ArchiverBuilder::new()
///     .vault(vault)
///     .chooser(Arc::new(ScriptedChooser::first()))
///     .notifier(Arc::new(RecordingNotifier::new()))
///     .build()?;
/// ```
#[derive(Default)]
pub struct ArchiverBuilder {
    store: Option<Arc<dyn NoteStore>>,
    metadata: Option<Arc<dyn MetadataCache>>,
    mutator: Option<Arc<dyn FrontmatterMutator>>,
    chooser: Option<Arc<dyn Chooser>>,
    notifier: Option<Arc<dyn Notifier>>,
    clock: Option<Arc<dyn Clock>>,
}

impl ArchiverBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use one value for the note store, the metadata cache and the
    /// frontmatter mutator.
    pub fn vault<V>(self, vault: Arc<V>) -> Self
    where
        V: NoteStore + MetadataCache + FrontmatterMutator + 'static,
    {
        self.store(vault.clone())
            .metadata(vault.clone())
            .mutator(vault)
    }

    pub fn store(mut self, store: Arc<dyn NoteStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn metadata(mut self, metadata: Arc<dyn MetadataCache>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn mutator(mut self, mutator: Arc<dyn FrontmatterMutator>) -> Self {
        self.mutator = Some(mutator);
        self
    }

    pub fn chooser(mut self, chooser: Arc<dyn Chooser>) -> Self {
        self.chooser = Some(chooser);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Archiver を構築
    ///
    /// # 検証
    /// - 必須ポート（store, metadata, mutator, chooser, notifier）が揃っているか
    /// - 不足があれば最初に見つかったものを BuildError::MissingPort で返す
    pub fn build(self) -> Result<Archiver, BuildError> {
        Ok(Archiver {
            store: self.store.ok_or(BuildError::MissingPort("note store"))?,
            metadata: self
                .metadata
                .ok_or(BuildError::MissingPort("metadata cache"))?,
            mutator: self
                .mutator
                .ok_or(BuildError::MissingPort("frontmatter mutator"))?,
            chooser: self.chooser.ok_or(BuildError::MissingPort("chooser"))?,
            notifier: self.notifier.ok_or(BuildError::MissingPort("notifier"))?,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::{InMemoryVault, RecordingNotifier, ScriptedChooser};

    #[test]
    fn test_build_success() {
        let archiver = ArchiverBuilder::new()
            .vault(Arc::new(InMemoryVault::new()))
            .chooser(Arc::new(ScriptedChooser::first()))
            .notifier(Arc::new(RecordingNotifier::new()))
            .build();
        assert!(archiver.is_ok());
    }

    #[test]
    fn test_build_missing_chooser() {
        let archiver = ArchiverBuilder::new()
            .vault(Arc::new(InMemoryVault::new()))
            .notifier(Arc::new(RecordingNotifier::new()))
            .build();
        assert!(matches!(archiver, Err(BuildError::MissingPort("chooser"))));
    }

    #[test]
    fn test_build_reports_first_missing_port() {
        let archiver = ArchiverBuilder::new().build();
        assert!(matches!(archiver, Err(BuildError::MissingPort("note store"))));
    }
}
