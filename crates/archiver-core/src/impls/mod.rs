//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **InMemoryVault**: テスト用の NoteStore / MetadataCache / FrontmatterMutator
//! - **FsVault**: ディレクトリ上の vault
//! - **JsonSettingsStore**: JSON ファイルへの設定の永続化
//! - **ScriptedChooser**: あらかじめ決めた選択を返す Chooser
//! - **RecordingNotifier**: 通知を記録する Notifier

pub mod markdown;
pub mod memory;
pub mod fs_vault;
pub mod json_settings;
pub mod chooser;
pub mod notifier;

// 主要な型を再エクスポート
pub use self::memory::InMemoryVault;
pub use self::fs_vault::FsVault;
pub use self::json_settings::JsonSettingsStore;
pub use self::chooser::{Choice, ScriptedChooser};
pub use self::notifier::RecordingNotifier;
