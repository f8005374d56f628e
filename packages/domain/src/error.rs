//! # ドメイン層エラー定義
//!
//! 値オブジェクトの生成時に検出される不正な入力を表現する。
//! API 層でこのエラーを受け取り、400 Bad Request に変換する。

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 入力値がビジネスルールに違反している場合に使用する。
    #[error("バリデーションエラー: {0}")]
    Validation(String),
}
