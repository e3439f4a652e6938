//! JsonSettingsStore - 設定を JSON ファイルに保存

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::{Settings, SettingsError};
use crate::ports::SettingsStore;

#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SettingsStore for JsonSettingsStore {
    async fn load(&self) -> Result<Settings, SettingsError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Settings::default()),
            Err(err) => return Err(err.into()),
        };
        let settings: Settings = serde_json::from_str(&raw)?;
        Ok(settings.normalized())
    }

    async fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let rendered = serde_json::to_string_pretty(settings)?;
        tokio::fs::write(&self.path, rendered).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_from_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSettingsStore::new(dir.path().join("settings.json"));
        assert_eq!(store.load().await.unwrap(), Settings::default());
    }

    #[tokio::test]
    async fn load_from_partial_json_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "archiveFolder": "/Old/Archive/", "processedTag": "" }"#).unwrap();

        let settings = JsonSettingsStore::new(&path).load().await.unwrap();
        assert_eq!(settings.archive_folder, "Old/Archive");
        assert_eq!(settings.processed_tag, "archived");
        assert_eq!(settings.template_folder, "Templates/Archive");
    }

    #[tokio::test]
    async fn load_from_invalid_json_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonSettingsStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));
    }

    #[tokio::test]
    async fn save_creates_parent_directories_and_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSettingsStore::new(dir.path().join(".archiver/settings.json"));

        let mut settings = Settings::default();
        settings.set_archive_folder("Vault Archive");
        settings.set_include_original_content(false);
        store.save(&settings).await.unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"archiveFolder\": \"Vault Archive\""));
        assert_eq!(store.load().await.unwrap(), settings);
    }
}
