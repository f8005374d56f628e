//! # エラーレスポンス
//!
//! 全エンドポイントで共通のエラーレスポンス構造体を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換は API 層の責務（shared に axum 依存を入れない）
//! - `error` フィールドはクライアントが分岐に使える固定文言とし、内部情報を含めない

use serde::{Deserialize, Serialize};

/// エラーレスポンス
///
/// `{"error": "Invalid email format"}` の形でシリアライズされる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_errorフィールドのみを持つjsonにシリアライズされる() {
        let response = ErrorResponse::new("Email already registered");

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "error": "Email already registered" })
        );
    }
}
