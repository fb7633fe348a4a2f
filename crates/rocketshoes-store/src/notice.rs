//! User-facing notices and where they are delivered.

use std::fmt;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// A transient message for the shopper, one per failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// Requested amount exceeds stock.
    InsufficientStock,
    /// Adding a product failed.
    AddFailed,
    /// Removing a product failed.
    RemoveFailed,
    /// Changing a product's amount failed.
    UpdateFailed,
}

impl Notice {
    /// The message shown to the shopper.
    pub fn message(&self) -> &'static str {
        match self {
            Self::InsufficientStock => "Quantidade solicitada fora de estoque",
            Self::AddFailed => "Erro na adição do produto",
            Self::RemoveFailed => "Erro na remoção do produto",
            Self::UpdateFailed => "Erro na alteração de quantidade do produto",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Delivers notices to the shopper.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Writes notices to the log only.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        tracing::info!(notice = ?notice, "{}", notice.message());
    }
}

/// Forwards notices over a channel, e.g. to a UI task showing toasts.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notice>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiving end of its channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notice: Notice) {
        if self.tx.send(notice).is_err() {
            tracing::debug!(notice = ?notice, "notice dropped, receiver closed");
        }
    }
}

/// Keeps every notice in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices received so far, oldest first.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }

    /// Drain the notices received so far.
    pub fn take(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|mut n| std::mem::take(&mut *n))
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            Notice::InsufficientStock.to_string(),
            "Quantidade solicitada fora de estoque"
        );
        assert_eq!(Notice::AddFailed.message(), "Erro na adição do produto");
        assert_eq!(Notice::RemoveFailed.message(), "Erro na remoção do produto");
        assert_eq!(
            Notice::UpdateFailed.message(),
            "Erro na alteração de quantidade do produto"
        );
    }

    #[test]
    fn test_recording_notifier_take() {
        let notifier = RecordingNotifier::new();
        notifier.notify(Notice::AddFailed);
        notifier.notify(Notice::RemoveFailed);

        assert_eq!(notifier.take(), vec![Notice::AddFailed, Notice::RemoveFailed]);
        assert!(notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn test_channel_notifier() {
        let (notifier, mut rx) = ChannelNotifier::new();
        notifier.notify(Notice::InsufficientStock);
        assert_eq!(rx.recv().await, Some(Notice::InsufficientStock));

        drop(rx);
        notifier.notify(Notice::AddFailed);
    }

    #[test]
    fn test_notice_serializes_snake_case() {
        let json = serde_json::to_string(&Notice::InsufficientStock).unwrap();
        assert_eq!(json, r#""insufficient_stock""#);
    }
}
