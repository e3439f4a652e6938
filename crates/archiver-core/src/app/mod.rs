//! App - アプリケーションロジック
//!
//! # 構成
//! - **path_allocator**: 衝突しないパスの割り当てとフォルダ作成
//! - **templates**: テンプレートフォルダの読み込み
//! - **extract**: MetadataCache からのフィールド抽出
//! - **archiver**: Archiver 本体（archival フロー）
//! - **builder**: ArchiverBuilder（ポートのワイヤリングと起動時検証）

pub mod path_allocator;
pub mod templates;
pub mod extract;
pub mod archiver;
mod archive_note;
mod archive_tasks;
pub mod builder;

// 主要な型を再エクスポート
pub use self::archiver::{ArchiveMode, Archiver};
pub use self::builder::{ArchiverBuilder, BuildError};
pub use self::extract::extract_frontmatter_fields;
pub use self::path_allocator::{ensure_folder_exists, next_available_path};
pub use self::templates::{read_templates, template_labels};
