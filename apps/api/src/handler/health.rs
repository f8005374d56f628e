//! # ヘルスチェックハンドラ
//!
//! アプリケーションの稼働状態を確認するためのエンドポイント。
//!
//! ## エンドポイント
//!
//! ```text
//! GET /         → {"message": "TaskFlow API v1"}
//! GET /health   → {"status": "ok", "uptime": "1h2m3s"}
//! ```
//!
//! データベースや外部サービスへの接続は確認せず、プロセスの起動からの経過時間のみを返す。

use std::{sync::Arc, time::Instant};

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use taskflow_shared::HealthResponse;

/// API 名とバージョン
pub const API_BANNER: &str = "TaskFlow API v1";

/// ヘルスチェックの共有状態
pub struct HealthState {
    /// プロセスの起動時刻
    pub started_at: Instant,
}

/// ルートのレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

/// GET /
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: API_BANNER.to_string(),
    })
}

/// GET /health
///
/// 常に 200 OK を返す。`uptime` は秒未満を切り捨てる。
pub async fn health_check(State(state): State<Arc<HealthState>>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.started_at.elapsed()))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode},
        routing::get,
    };
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;

    fn create_test_app(started_at: Instant) -> Router {
        Router::new()
            .route("/", get(root))
            .route("/health", get(health_check))
            .with_state(Arc::new(HealthState { started_at }))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_ルートはapi名を返す() {
        let (status, body) = get_json(create_test_app(Instant::now()), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"message": "TaskFlow API v1"}));
    }

    #[tokio::test]
    async fn test_ヘルスチェックは起動からの経過時間を返す() {
        // Given: 65 秒前に起動したことにする
        let started_at = Instant::now()
            .checked_sub(Duration::from_secs(65))
            .unwrap();

        // When
        let (status, body) = get_json(create_test_app(started_at), "/health").await;

        // Then
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["uptime"], "1m5s");
    }
}
