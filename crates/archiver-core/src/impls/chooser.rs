//! ScriptedChooser - 決められた選択を返す Chooser

use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};

use crate::ports::Chooser;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Index(usize),
    /// First label equal to this string.
    Label(String),
    Cancel,
}

/// ScriptedChooser は常に同じ `Choice` を返す
///
/// 非対話的なホスト（CLI の `--template`）とテストで使います。
/// 提示されたラベル一覧を記録します。
#[derive(Debug)]
pub struct ScriptedChooser {
    choice: Choice,
    offered: Mutex<Vec<Vec<String>>>,
}

impl ScriptedChooser {
    pub fn new(choice: Choice) -> Self {
        Self {
            choice,
            offered: Mutex::new(Vec::new()),
        }
    }

    pub fn first() -> Self {
        Self::new(Choice::Index(0))
    }

    pub fn label(label: impl Into<String>) -> Self {
        Self::new(Choice::Label(label.into()))
    }

    pub fn cancel() -> Self {
        Self::new(Choice::Cancel)
    }

    /// Label lists presented so far, in call order.
    pub fn offered(&self) -> Vec<Vec<String>> {
        self.offered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Chooser for ScriptedChooser {
    async fn choose(&self, _placeholder: &str, labels: &[String]) -> Option<usize> {
        self.offered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(labels.to_vec());

        match &self.choice {
            Choice::Index(index) => (*index < labels.len()).then_some(*index),
            Choice::Label(label) => labels.iter().position(|candidate| candidate == label),
            Choice::Cancel => None,
        }
    }
}
