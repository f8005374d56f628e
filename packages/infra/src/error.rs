//! # インフラ層エラー定義
//!
//! データベースやパスワードハッシュ処理で発生するエラーを表現する。
//!
//! ## 設計方針
//!
//! - **エラーの変換**: `sqlx::Error` をラップし、一意制約違反はリポジトリ内で
//!   [`InfraErrorKind::Duplicate`] に変換する（呼び出し側がドライバのメッセージを解釈しない）
//! - **ログ可能性**: Debug によりログ出力時に詳細情報を表示
//! - **SpanTrace 自動捕捉**: `From` 実装や convenience constructor で
//!   エラー生成時の呼び出し経路を自動記録する
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// エラー種別（[`InfraErrorKind`]）と [`SpanTrace`]（呼び出し経路）を保持する。
///
/// ## パターンマッチ
///
/// エラー種別に応じた処理には [`kind()`](InfraError::kind) を使用する:
///
/// ```ignore
/// match error.kind() {
///     InfraErrorKind::Duplicate { field, .. } => { /* 重複処理 */ }
///     _ => { /* その他 */ }
/// }
/// ```
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// データベースエラー
    ///
    /// SQL クエリの実行失敗、接続エラーなど。
    #[error("データベースエラー: {0}")]
    Database(#[source] sqlx::Error),

    /// 一意制約違反
    ///
    /// 登録しようとした値が既に存在する場合。
    #[error("既に登録されています: {entity}.{field}")]
    Duplicate {
        /// エンティティ名（例: "Account"）
        entity: String,
        /// 重複したフィールド名（例: "email"）
        field:  String,
    },

    /// パスワードのハッシュ化に失敗
    #[error("パスワードのハッシュ化に失敗: {0}")]
    PasswordHash(String),

    /// 保存済みのパスワードハッシュが構造的に不正
    ///
    /// パスワード不一致とは区別する。データ破損などで発生する。
    #[error("不正なハッシュ形式: {0}")]
    MalformedSecret(String),

    /// 予期しないエラー
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

// ===== InfraError のメソッド =====

impl InfraError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// 一意制約違反かどうか
    pub fn is_duplicate(&self) -> bool {
        matches!(self.kind, InfraErrorKind::Duplicate { .. })
    }

    fn capture(kind: InfraErrorKind) -> Self {
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }

    // ===== Convenience constructors =====

    /// 一意制約違反エラーを生成する
    pub fn duplicate(entity: impl Into<String>, field: impl Into<String>) -> Self {
        Self::capture(InfraErrorKind::Duplicate {
            entity: entity.into(),
            field:  field.into(),
        })
    }

    /// ハッシュ化失敗エラーを生成する
    pub fn password_hash(msg: impl Into<String>) -> Self {
        Self::capture(InfraErrorKind::PasswordHash(msg.into()))
    }

    /// 不正なハッシュ形式エラーを生成する
    pub fn malformed_secret(msg: impl Into<String>) -> Self {
        Self::capture(InfraErrorKind::MalformedSecret(msg.into()))
    }

    /// 予期しないエラーを生成する
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::capture(InfraErrorKind::Unexpected(msg.into()))
    }
}

// ===== トレイト実装 =====

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

// ===== From 実装（SpanTrace 自動キャプチャ） =====

impl From<sqlx::Error> for InfraError {
    fn from(source: sqlx::Error) -> Self {
        Self::capture(InfraErrorKind::Database(source))
    }
}
