//! Completed checklist extraction.
//!
//! Lines are split on `\n` only. A `\r` before the newline stays part of the
//! line, so the partition reproduces the original text byte for byte.

use regex::Regex;
use std::sync::LazyLock;

/// `- [x] text` / `* [X] text`, optionally indented.
static COMPLETED_TASK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*] +\[[xX]\] +\S").unwrap());

/// Result of splitting a body into completed task lines and the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletedTaskExtraction {
    /// Completed lines in original order.
    pub completed_tasks: Vec<String>,
    /// Every other line, rejoined with `\n` in original order.
    pub remaining_content: String,
}

impl CompletedTaskExtraction {
    pub fn count(&self) -> usize {
        self.completed_tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completed_tasks.is_empty()
    }
}

/// Does this line match the completed-checklist-item pattern?
pub fn is_completed_task(line: &str) -> bool {
    COMPLETED_TASK_RE.is_match(line)
}

/// Partition `body` into completed task lines and remaining content.
pub fn extract_completed_tasks(body: &str) -> CompletedTaskExtraction {
    let mut completed_tasks = Vec::new();
    let mut remaining = Vec::new();

    for line in body.split('\n') {
        if is_completed_task(line) {
            completed_tasks.push(line.to_string());
        } else {
            remaining.push(line);
        }
    }

    CompletedTaskExtraction {
        completed_tasks,
        remaining_content: remaining.join("\n"),
    }
}
