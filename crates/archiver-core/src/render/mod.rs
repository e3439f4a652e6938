//! Render module: placeholder substitution for archive bodies and file names.
//!
//! Substitution is literal find/replace over a fixed, ordered token table.
//! There is no template language: unknown `{{...}}` tokens are left alone and
//! inserted values are never re-scanned.

mod context;
mod file_name;
mod placeholders;
mod template;

pub use context::RenderContext;
pub use file_name::{render_file_name, sanitize_file_name};
pub use placeholders::{iso_date, iso_datetime};
pub use template::render_template;
