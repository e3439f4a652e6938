//! Outcome of an archival operation.

use std::fmt;

/// Why an operation stopped before doing anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    NoActiveNote,
    NoTemplates,
    NoCompletedTasks,
    /// Target path exists but is the wrong kind of entry.
    PathConflict(String),
}

impl AbortReason {
    /// User-facing message reported through the notifier.
    pub fn message(&self) -> String {
        match self {
            AbortReason::NoActiveNote => "No active note to archive.".to_string(),
            AbortReason::NoTemplates => {
                "No templates found in the configured template folder.".to_string()
            }
            AbortReason::NoCompletedTasks => {
                "No completed tasks found in the active note.".to_string()
            }
            AbortReason::PathConflict(path) => {
                format!("Cannot archive: {path} already exists with a different type.")
            }
        }
    }
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveOutcome {
    /// An archive note was created; `moved_to` is set when the source was relocated.
    Archived {
        archive: String,
        moved_to: Option<String>,
    },

    /// Completed tasks were written to `archive` and removed from the source.
    TasksArchived {
        archive: String,
        count: usize,
        /// `true` when an existing archive note was extended.
        appended: bool,
    },

    Aborted(AbortReason),

    /// The user dismissed the chooser.
    Cancelled,
}

impl ArchiveOutcome {
    /// Message reported for a finished operation (`None` for a silent cancel).
    pub fn message(&self) -> Option<String> {
        match self {
            ArchiveOutcome::Archived {
                archive,
                moved_to: None,
            } => Some(format!("Archived: {archive}")),
            ArchiveOutcome::Archived {
                archive,
                moved_to: Some(moved_to),
            } => Some(format!("Archived: {archive}; moved source to {moved_to}")),
            ArchiveOutcome::TasksArchived { archive, count, .. } => {
                Some(format!("Archived {count} completed task(s) to {archive}"))
            }
            ArchiveOutcome::Aborted(reason) => Some(reason.message()),
            ArchiveOutcome::Cancelled => None,
        }
    }
}
