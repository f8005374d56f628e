//! # 通知送信
//!
//! メール通知の送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **2 つの実装**: SMTP（Mailpit 開発用 / リレー）、Noop（テスト・無効化用）
//! - **環境変数切替**: `NOTIFICATION_BACKEND` でランタイム選択
//! - **送信の切り離し**: リクエスト処理からは [`NotificationQueue`] へ積むだけにし、
//!   実際の送信はバックグラウンドのワーカーが行う。送信失敗はログに残して破棄する

mod noop;
mod queue;
mod smtp;

use async_trait::async_trait;
pub use noop::NoopNotificationSender;
pub use queue::ChannelNotificationQueue;
pub use smtp::SmtpNotificationSender;
use taskflow_domain::notification::{EmailMessage, NotificationError};

/// メール送信トレイト
///
/// メール送信の具体的な方法を抽象化する。
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// メールを送信する
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError>;
}

/// 通知キュートレイト
///
/// リクエスト処理側が通知を依頼するための窓口。
/// 呼び出し側をブロックせず、失敗も返さない。
pub trait NotificationQueue: Send + Sync {
    /// 送信するメールをキューに積む
    fn enqueue(&self, email: EmailMessage);
}
