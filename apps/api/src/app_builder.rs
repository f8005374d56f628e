//! # アプリケーション構築
//!
//! 依存（リポジトリ・ハッシュ・トークン・通知）から State とルーターを組み立てる。
//! `main.rs` はインフラ初期化とサーバー起動に集中し、テストは同じ関数でモック注入したルーターを得る。

use std::{sync::Arc, time::Instant};

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use taskflow_infra::{
    PasswordHasher,
    TokenCodec,
    notification::NotificationQueue,
    repository::AccountRepository,
};
use taskflow_shared::observability::{MakeRequestUuidV7, make_request_span};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    handler::{
        AccountState,
        AuthState,
        HealthState,
        health_check,
        list_users,
        login,
        me,
        register,
        root,
    },
    middleware::{AuthnState, require_auth},
    usecase::{AccountUseCaseImpl, AuthUseCaseImpl},
};

/// ルーター構築に必要な依存
pub struct AppDependencies {
    pub account_repository: Arc<dyn AccountRepository>,
    pub password_hasher:    Arc<dyn PasswordHasher>,
    pub token_codec:        Arc<dyn TokenCodec>,
    pub notification_queue: Arc<dyn NotificationQueue>,
    /// ヘルスチェックの uptime の起点
    pub started_at:         Instant,
}

/// State の初期化とルーター定義を行う
///
/// `/users` と `/me` だけが認証ミドルウェアの内側に入る。
pub fn build_app(deps: AppDependencies) -> Router {
    let health_state = Arc::new(HealthState {
        started_at: deps.started_at,
    });

    let auth_state = Arc::new(AuthState {
        usecase: AuthUseCaseImpl::new(
            deps.account_repository.clone(),
            deps.password_hasher,
            deps.token_codec.clone(),
            deps.notification_queue,
        ),
    });

    let account_state = Arc::new(AccountState {
        usecase: AccountUseCaseImpl::new(deps.account_repository),
    });

    let authn_state = AuthnState {
        token_codec: deps.token_codec,
    };

    Router::new()
        .route("/", get(root))
        .merge(
            Router::new()
                .route("/health", get(health_check))
                .with_state(health_state),
        )
        .merge(
            Router::new()
                .route("/register", post(register))
                .route("/login", post(login))
                .with_state(auth_state),
        )
        .merge(
            Router::new()
                .route("/users", get(list_users))
                .route("/me", get(me))
                .layer(from_fn_with_state(authn_state, require_auth))
                .with_state(account_state),
        )
        // 下に書いたものが外側
        // 1. SetRequestIdLayer（最外）: UUID v7 を生成（クライアント提供値があればそちらを使う）
        // 2. TraceLayer: request_id を含むスパンを張り、ハンドラ内のログに自動注入
        // 3. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}

/// 待ち受けソケットを開く
///
/// `host` は IP アドレスのほか `localhost` などのホスト名も受け付ける。
/// 名前解決の結果を順に試し、最初にバインドできたアドレスを使う。
pub async fn bind_listener(host: &str, port: u16) -> std::io::Result<TcpListener> {
    TcpListener::bind((host, port)).await
}
