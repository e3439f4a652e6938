//! archiver-core
//!
//! Template-driven archival of Markdown notes.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（NoteRef, Template, Frontmatter, FrontmatterFields, Settings, errors, outcome）
//! - **render**: プレースホルダ置換（本文テンプレートとファイル名パターン）
//! - **ports**: 抽象化レイヤー（NoteStore, MetadataCache, FrontmatterMutator, Chooser, Notifier, Clock, SettingsStore）
//! - **app**: アプリケーションロジック（path allocation, archival flows, builder）
//! - **impls**: 実装（InMemoryVault, FsVault, JsonSettingsStore など）

pub mod domain;
pub mod render;
pub mod ports;
pub mod app;
pub mod impls;
