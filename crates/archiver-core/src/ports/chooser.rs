//! Chooser port - ユーザーに 1 つ選ばせる

use async_trait::async_trait;

/// Chooser はラベル一覧からユーザーの選択を返す
///
/// - 戻り値は選ばれたラベルの index
/// - キャンセルは `None`（エラーではない）
#[async_trait]
pub trait Chooser: Send + Sync {
    async fn choose(&self, placeholder: &str, labels: &[String]) -> Option<usize>;
}
