//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! 各 trait はホスト環境（vault, メタデータキャッシュ, UI）への
//! インターフェースを提供し、実装の詳細を隠蔽します。
//!
//! # 設計原則
//! - note store の呼び出しごとに await（協調的なシングルスレッド前提）
//! - ポートの失敗は `StoreError` としてそのまま上位に伝播する
//! - Chooser のキャンセルはエラーではなく `None`

pub mod note_store;
pub mod metadata_cache;
pub mod frontmatter_mutator;
pub mod chooser;
pub mod notifier;
pub mod clock;
pub mod settings_store;

// 主要な trait を再エクスポート
pub use self::note_store::NoteStore;
pub use self::metadata_cache::MetadataCache;
pub use self::frontmatter_mutator::{FrontmatterEdit, FrontmatterMutator};
pub use self::chooser::Chooser;
pub use self::notifier::Notifier;
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::settings_store::SettingsStore;
