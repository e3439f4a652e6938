//! Settings - 設定値とデフォルト
//!
//! 永続化されたレコードをデフォルトにマージして読み込みます。
//! パス系の設定は常に正規化済み、パターン / タグ系の設定は空白のみの値を
//! 受け取るとデフォルトに戻ります。

use serde::{Deserialize, Serialize};

use super::frontmatter::normalize_tag;
use super::path::normalize_path;

pub const DEFAULT_TEMPLATE_FOLDER: &str = "Templates/Archive";
pub const DEFAULT_ARCHIVE_FOLDER: &str = "Archive";
pub const DEFAULT_FILE_NAME_PATTERN: &str = "{{date}} - {{title}}";
pub const DEFAULT_PROCESSED_FOLDER: &str = "Archive/Processed";
pub const DEFAULT_PROCESSED_TAG: &str = "archived";

/// Settings は archival のプロセス全体の設定
///
/// キーは camelCase で永続化されます（`templateFolder` など）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub template_folder: String,
    pub archive_folder: String,
    pub archive_file_name_pattern: String,
    pub include_original_content: bool,
    pub processed_folder: String,
    pub processed_tag: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            template_folder: DEFAULT_TEMPLATE_FOLDER.to_string(),
            archive_folder: DEFAULT_ARCHIVE_FOLDER.to_string(),
            archive_file_name_pattern: DEFAULT_FILE_NAME_PATTERN.to_string(),
            include_original_content: true,
            processed_folder: DEFAULT_PROCESSED_FOLDER.to_string(),
            processed_tag: DEFAULT_PROCESSED_TAG.to_string(),
        }
    }
}

impl Settings {
    /// 読み込んだ値を正規化する（ロード直後に呼ぶ）
    pub fn normalized(self) -> Self {
        let mut settings = Settings::default();
        settings.set_template_folder(&self.template_folder);
        settings.set_archive_folder(&self.archive_folder);
        settings.set_archive_file_name_pattern(&self.archive_file_name_pattern);
        settings.set_include_original_content(self.include_original_content);
        settings.set_processed_folder(&self.processed_folder);
        settings.set_processed_tag(&self.processed_tag);
        settings
    }

    pub fn set_template_folder(&mut self, value: &str) {
        self.template_folder = folder_or_default(value, DEFAULT_TEMPLATE_FOLDER);
    }

    pub fn set_archive_folder(&mut self, value: &str) {
        self.archive_folder = folder_or_default(value, DEFAULT_ARCHIVE_FOLDER);
    }

    pub fn set_archive_file_name_pattern(&mut self, value: &str) {
        self.archive_file_name_pattern = text_or_default(value, DEFAULT_FILE_NAME_PATTERN);
    }

    pub fn set_include_original_content(&mut self, value: bool) {
        self.include_original_content = value;
    }

    pub fn set_processed_folder(&mut self, value: &str) {
        self.processed_folder = folder_or_default(value, DEFAULT_PROCESSED_FOLDER);
    }

    pub fn set_processed_tag(&mut self, value: &str) {
        let tag = normalize_tag(value);
        self.processed_tag = if tag.is_empty() {
            DEFAULT_PROCESSED_TAG.to_string()
        } else {
            tag
        };
    }
}

fn folder_or_default(value: &str, default: &str) -> String {
    normalize_path(&text_or_default(value, default))
}

fn text_or_default(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}
