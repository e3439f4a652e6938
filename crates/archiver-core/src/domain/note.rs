//! Note identity and templates.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::path::normalize_path;

/// NoteRef identifies a note in the store by its vault path.
///
/// The path is always normalized. The base name is the file name without
/// its extension (`Projects/Plan.md` -> `Plan`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteRef {
    path: String,
}

impl NoteRef {
    pub fn new(path: impl AsRef<str>) -> Self {
        Self {
            path: normalize_path(path.as_ref()),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// File name including the extension.
    pub fn file_name(&self) -> &str {
        match self.path.rsplit_once('/') {
            Some((_, name)) => name,
            None => &self.path,
        }
    }

    /// File name without the extension.
    pub fn basename(&self) -> &str {
        let name = self.file_name();
        match name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => name,
        }
    }

    /// Is this a Markdown note (`.md`)?
    pub fn is_markdown(&self) -> bool {
        self.path.ends_with(".md")
    }

    /// Wiki-style cross reference: `[[path|basename]]`.
    pub fn link(&self) -> String {
        format!("[[{}|{}]]", self.path, self.basename())
    }
}

impl fmt::Display for NoteRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Template is a Markdown note in the template folder, loaded fresh for
/// every archival operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub note: NoteRef,
    pub content: String,
}

impl Template {
    pub fn new(note: NoteRef, content: impl Into<String>) -> Self {
        Self {
            note,
            content: content.into(),
        }
    }

    /// Label shown in the chooser.
    pub fn label(&self) -> &str {
        self.note.basename()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basename_strips_folder_and_extension() {
        let note = NoteRef::new("Projects/Q1 Plan.md");
        assert_eq!(note.file_name(), "Q1 Plan.md");
        assert_eq!(note.basename(), "Q1 Plan");
    }

    #[test]
    fn basename_keeps_inner_dots() {
        let note = NoteRef::new("v1.2.notes.md");
        assert_eq!(note.basename(), "v1.2.notes");
    }

    #[test]
    fn path_is_normalized() {
        let note = NoteRef::new("/Inbox//todo.md");
        assert_eq!(note.path(), "Inbox/todo.md");
        assert!(note.is_markdown());
    }

    #[test]
    fn link_combines_path_and_title() {
        let note = NoteRef::new("Inbox/todo.md");
        assert_eq!(note.link(), "[[Inbox/todo.md|todo]]");
    }
}
