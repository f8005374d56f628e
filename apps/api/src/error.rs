//! # API エラーハンドリング
//!
//! HTTP API のエラー定義と、axum レスポンスへの変換を行う。
//!
//! ## 設計方針
//!
//! - **安定したメッセージ**: レスポンスボディは `{"error": "<message>"}` のみ。
//!   メッセージは [`message`] の定数に限定し、クライアントが機械的に判定できるようにする
//! - **内部情報を出さない**: 依存先（DB、ハッシュ、署名）の失敗は原因をログに残し、
//!   レスポンスには固定メッセージだけを返す
//! - **IntoResponse 実装**: ハンドラ・ミドルウェア・エクストラクタのどこから返しても同じ形式になる
//!
//! ## エラーの分類
//!
//! | バリアント | ステータス | 例 |
//! |-----------|-----------|-----|
//! | [`ApiError::Validation`] | 400 | 入力の欠落・形式不正 |
//! | [`ApiError::Authentication`] | 401 | 認証情報の誤り、トークンの欠落・不正・期限切れ |
//! | [`ApiError::Conflict`] | 400 | メールアドレスの重複 |
//! | [`ApiError::NotFound`] | 404 | トークンのサブジェクトが存在しない |
//! | [`ApiError::Dependency`] | 500 | ハッシュ化・DB・署名の失敗 |

use std::fmt::Display;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use taskflow_shared::ErrorResponse;
use thiserror::Error;

/// クライアントに返すエラーメッセージ
pub mod message {
    pub const INVALID_REGISTER_BODY: &str = "Invalid JSON or missing fields";
    pub const INVALID_EMAIL_FORMAT: &str = "Invalid email format";
    pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";
    pub const EMAIL_ALREADY_REGISTERED: &str = "Email already registered";
    pub const FAILED_TO_HASH_PASSWORD: &str = "Failed to hash password";
    pub const DATABASE_ERROR: &str = "Database error";

    pub const INVALID_LOGIN_BODY: &str = "Invalid JSON";
    pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
    pub const FAILED_TO_VERIFY_CREDENTIALS: &str = "Failed to verify credentials";
    pub const FAILED_TO_GENERATE_TOKEN: &str = "Failed to generate token";

    pub const FAILED_TO_FETCH_USERS: &str = "Failed to fetch users";
    pub const USER_ID_NOT_IN_CONTEXT: &str = "User ID not found in context";
    pub const USER_NOT_FOUND: &str = "User not found";

    pub const MISSING_AUTH_HEADER: &str = "Missing Auth Header";
    pub const INVALID_AUTH_HEADER: &str = "Authorization header must be Bearer <token>";
    pub const INVALID_TOKEN: &str = "Invalid or expired token";
}

/// API 層で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// 入力の欠落・形式不正（400）
    #[error("{0}")]
    Validation(&'static str),

    /// 認証失敗（401）
    #[error("{0}")]
    Authentication(&'static str),

    /// 一意性の競合（400）
    #[error("{0}")]
    Conflict(&'static str),

    /// リソースが存在しない（404）
    #[error("{0}")]
    NotFound(&'static str),

    /// 依存先の失敗（500）
    ///
    /// `cause` はログにのみ出力する。
    #[error("{message}: {cause}")]
    Dependency {
        message: &'static str,
        cause:   String,
    },
}

impl ApiError {
    /// 依存先の失敗を原因付きで生成する
    pub fn dependency(message: &'static str, cause: impl Display) -> Self {
        Self::Dependency {
            message,
            cause: cause.to_string(),
        }
    }

    /// HTTP ステータスコード
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::Authentication(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Dependency { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// クライアントに返すメッセージ
    pub fn message(&self) -> &'static str {
        match self {
            Self::Validation(msg)
            | Self::Authentication(msg)
            | Self::Conflict(msg)
            | Self::NotFound(msg) => msg,
            Self::Dependency { message, .. } => message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Dependency { message, cause } = &self {
            tracing::error!(error = %cause, "{message}");
        }

        (self.status(), Json(ErrorResponse::new(self.message()))).into_response()
    }
}
