//! チャネルによる通知キュー
//!
//! 上限なしの mpsc チャネルに積まれた [`EmailMessage`] を、
//! 1 つのバックグラウンドタスクが順に取り出して [`NotificationSender`] で送信する。
//!
//! 送信は 1 通につき 1 回だけ試行し、失敗は `warn` ログを残して破棄する。
//! キュー（送信側）がすべて drop されるとワーカーは残りを送信してから終了する。

use std::sync::Arc;

use taskflow_domain::notification::EmailMessage;
use tokio::{sync::mpsc, task::JoinHandle};

use super::{NotificationQueue, NotificationSender};

/// mpsc チャネルで送信ワーカーへ通知を渡すキュー
#[derive(Debug, Clone)]
pub struct ChannelNotificationQueue {
    tx: mpsc::UnboundedSender<EmailMessage>,
}

impl ChannelNotificationQueue {
    /// 送信ワーカーを起動し、キューとワーカーのハンドルを返す
    ///
    /// Tokio ランタイム内で呼び出すこと。
    pub fn spawn(sender: Arc<dyn NotificationSender>) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<EmailMessage>();

        let worker = tokio::spawn(async move {
            while let Some(email) = rx.recv().await {
                match sender.send_email(&email).await {
                    Ok(()) => tracing::info!(to = %email.to, subject = %email.subject, "通知メールを送信"),
                    Err(e) => tracing::warn!(
                        error = %e,
                        to = %email.to,
                        subject = %email.subject,
                        "通知メールの送信に失敗（破棄）"
                    ),
                }
            }
            tracing::debug!("通知キューが閉じられたため送信ワーカーを終了");
        });

        (Self { tx }, worker)
    }
}

impl NotificationQueue for ChannelNotificationQueue {
    fn enqueue(&self, email: EmailMessage) {
        if let Err(mpsc::error::SendError(email)) = self.tx.send(email) {
            tracing::warn!(to = %email.to, "送信ワーカーが停止しているため通知を破棄");
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use taskflow_domain::account::Email;

    use super::*;
    use crate::mock::RecordingNotificationSender;

    fn welcome(to: &str) -> EmailMessage {
        EmailMessage::welcome(&Email::parse(to).unwrap())
    }

    #[tokio::test]
    async fn test_積んだ通知がワーカーから順に送信される() {
        // Given
        let sender = RecordingNotificationSender::new();
        let (queue, worker) = ChannelNotificationQueue::spawn(Arc::new(sender.clone()));

        // When
        queue.enqueue(welcome("a@example.com"));
        queue.enqueue(welcome("b@example.com"));
        drop(queue);
        worker.await.unwrap();

        // Then
        let sent: Vec<String> = sender.sent().into_iter().map(|m| m.to).collect();
        assert_eq!(sent, vec!["a@example.com", "b@example.com"]);
    }

    #[tokio::test]
    async fn test_送信失敗は破棄して次の通知を処理する() {
        // Given
        let sender = RecordingNotificationSender::failing();
        let (queue, worker) = ChannelNotificationQueue::spawn(Arc::new(sender.clone()));

        // When
        queue.enqueue(welcome("a@example.com"));
        queue.enqueue(welcome("b@example.com"));
        drop(queue);
        worker.await.unwrap();

        // Then: 再送はせず、どちらも 1 回ずつ試行される
        assert_eq!(sender.attempts(), 2);
        assert!(sender.sent().is_empty());
    }

    #[tokio::test]
    async fn test_ワーカー停止後の通知はパニックせず破棄される() {
        // Given
        let sender = RecordingNotificationSender::new();
        let (queue, worker) = ChannelNotificationQueue::spawn(Arc::new(sender.clone()));
        worker.abort();
        let _ = worker.await;

        // When
        queue.enqueue(welcome("a@example.com"));

        // Then
        assert!(sender.sent().is_empty());
    }
}
