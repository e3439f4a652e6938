//! SettingsStore port - 設定の永続化

use async_trait::async_trait;

use crate::domain::{Settings, SettingsError};

/// SettingsStore は Settings を読み書きする
///
/// `load` は保存済みレコードをデフォルトにマージし、正規化済みの値を返す。
/// レコードが無ければデフォルト。
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn load(&self) -> Result<Settings, SettingsError>;

    async fn save(&self, settings: &Settings) -> Result<(), SettingsError>;
}
