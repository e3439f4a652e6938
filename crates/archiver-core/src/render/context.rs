use crate::domain::{FrontmatterFields, NoteRef};

/// RenderContext is assembled once per archival operation and consumed by
/// the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    pub note: NoteRef,
    pub source_content: String,
    /// Inject `source_content` into `{{content}}`.
    pub include_original_content: bool,
    pub fields: FrontmatterFields,
    pub completed_tasks: Vec<String>,
}

impl RenderContext {
    pub fn new(note: NoteRef, source_content: impl Into<String>) -> Self {
        Self {
            note,
            source_content: source_content.into(),
            include_original_content: true,
            fields: FrontmatterFields::default(),
            completed_tasks: Vec::new(),
        }
    }

    pub fn include_original_content(mut self, include: bool) -> Self {
        self.include_original_content = include;
        self
    }

    pub fn with_fields(mut self, fields: FrontmatterFields) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_completed_tasks(mut self, tasks: Vec<String>) -> Self {
        self.completed_tasks = tasks;
        self
    }
}
