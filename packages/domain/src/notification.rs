//! # 通知
//!
//! メール通知に関するドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **fire-and-forget**: 通知送信の失敗はアカウント操作の結果に影響しない
//! - **メッセージ生成と送信の分離**: ここでは本文の組み立てのみを行い、
//!   送信は infra 層の `NotificationSender` が担当する

use thiserror::Error;

use crate::account::Email;

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),
}

/// メールメッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 送信先メールアドレス
    pub to:        String,
    /// 件名
    pub subject:   String,
    /// HTML 本文
    pub html_body: String,
    /// プレーンテキスト本文
    pub text_body: String,
}

impl EmailMessage {
    /// 登録完了時のウェルカムメール
    pub fn welcome(to: &Email) -> Self {
        Self {
            to:        to.as_str().to_string(),
            subject:   "Welcome to TaskFlow".to_string(),
            html_body: format!(
                "<p>Hi {to},</p><p>Your TaskFlow account has been created. \
                 You can now sign in with this email address.</p>"
            ),
            text_body: format!(
                "Hi {to},\n\nYour TaskFlow account has been created. \
                 You can now sign in with this email address.\n"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ウェルカムメールは登録したアドレス宛になる() {
        let email = Email::parse("user@example.com").unwrap();

        let message = EmailMessage::welcome(&email);

        assert_eq!(message.to, "user@example.com");
        assert_eq!(message.subject, "Welcome to TaskFlow");
        assert!(message.text_body.contains("user@example.com"));
        assert!(message.html_body.starts_with("<p>"));
    }
}
