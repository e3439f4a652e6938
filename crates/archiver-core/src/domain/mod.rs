//! Domain model (notes, frontmatter, completed tasks, settings, outcomes).

pub mod path;
pub mod note;
pub mod frontmatter;
pub mod tasks;
pub mod settings;
pub mod errors;
pub mod outcome;

pub use self::path::normalize_path;
pub use self::note::{NoteRef, Template};
pub use self::frontmatter::{FieldValue, Frontmatter, FrontmatterFields, NoteMetadata};
pub use self::tasks::{CompletedTaskExtraction, extract_completed_tasks, is_completed_task};
pub use self::settings::Settings;
pub use self::errors::{ArchiveError, SettingsError, StoreError};
pub use self::outcome::{AbortReason, ArchiveOutcome};
