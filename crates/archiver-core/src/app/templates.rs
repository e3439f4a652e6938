//! Template discovery.

use crate::domain::path::{self, normalize_path};
use crate::domain::{NoteRef, StoreError, Template};
use crate::ports::NoteStore;

/// Every Markdown note under `template_folder` (recursively), sorted by path,
/// with its content. A root template folder means every note in the vault.
pub async fn read_templates(
    store: &dyn NoteStore,
    template_folder: &str,
) -> Result<Vec<Template>, StoreError> {
    let folder = normalize_path(template_folder);
    let prefix = format!("{folder}/");

    let mut notes: Vec<NoteRef> = store
        .list_markdown_notes()
        .await?
        .into_iter()
        .filter(|note| folder == path::ROOT || note.path().starts_with(&prefix))
        .collect();
    notes.sort();

    let mut templates = Vec::with_capacity(notes.len());
    for note in notes {
        let content = store.read(&note).await?;
        templates.push(Template::new(note, content));
    }
    Ok(templates)
}

/// Chooser labels for `templates`, in the same order.
///
/// A template is labelled by its base name. Templates whose base names
/// collide are labelled by their path relative to `template_folder`, without
/// the `.md` extension (`Nested/Basic`).
pub fn template_labels(templates: &[Template], template_folder: &str) -> Vec<String> {
    let folder = normalize_path(template_folder);
    let prefix = format!("{folder}/");

    templates
        .iter()
        .map(|template| {
            let base = template.label();
            let collides = templates
                .iter()
                .filter(|other| other.label() == base)
                .count()
                > 1;
            if !collides {
                return base.to_string();
            }

            let full = template.note.path();
            let relative = if folder == path::ROOT {
                full
            } else {
                full.strip_prefix(&prefix).unwrap_or(full)
            };
            relative.strip_suffix(".md").unwrap_or(relative).to_string()
        })
        .collect()
}
