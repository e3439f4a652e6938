//! Notifier port - ユーザー向けメッセージ

/// Notifier は fire-and-forget の通知チャネル
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}
