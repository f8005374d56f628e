//! # TaskFlow API サーバー
//!
//! アカウント登録・ログイン・アカウント参照を提供する HTTP サーバー。
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境
//! cargo run -p taskflow-api
//!
//! # 本番環境
//! API_PORT=8080 DATABASE_URL=postgres://... JWT_SECRET=... ./taskflow-api
//! ```
//!
//! 環境変数の一覧は [`taskflow_api::config`] を参照。

use std::{sync::Arc, time::Instant};

use anyhow::Context;
use taskflow_api::{
    app_builder::{AppDependencies, bind_listener, build_app},
    config::{AppConfig, NotificationBackend},
};
use taskflow_domain::clock::SystemClock;
use taskflow_infra::{
    Argon2PasswordHasher,
    JwtTokenCodec,
    db,
    notification::{
        ChannelNotificationQueue,
        NoopNotificationSender,
        NotificationSender,
        SmtpNotificationSender,
    },
    repository::PostgresAccountRepository,
};
use taskflow_shared::observability::TracingConfig;

/// API サーバーのエントリーポイント
///
/// 以下の順序で初期化を行う:
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. アプリケーション設定の読み込み
/// 4. データベース接続とマイグレーション
/// 5. 依存の構築とルーターの組み立て
/// 6. HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let started_at = Instant::now();

    // .env ファイルを読み込む（存在する場合）
    // 本番環境では .env ファイルは使用せず、環境変数を直接設定する
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("taskflow-api");
    taskflow_shared::observability::init_tracing(tracing_config);

    // 設定読み込み
    let config = AppConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "TaskFlow API サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // データベース接続プールの作成
    let pool = db::create_pool(&config.database_url)
        .await
        .context("データベースへの接続に失敗しました")?;
    tracing::info!("データベースに接続しました");

    db::run_migrations(&pool)
        .await
        .context("マイグレーションの適用に失敗しました")?;

    // 依存関係の初期化
    let password_hasher = Argon2PasswordHasher::new(config.hashing_cost)
        .context("パスワードハッシュのパラメータが不正です")?;
    let token_codec = JwtTokenCodec::new(&config.jwt_secret, Arc::new(SystemClock));

    let notification_sender: Arc<dyn NotificationSender> = match &config.notification.backend {
        NotificationBackend::Smtp { host, port } => {
            tracing::info!("通知バックエンド: SMTP ({}:{})", host, port);
            Arc::new(SmtpNotificationSender::new(
                host,
                *port,
                config.notification.from_address.clone(),
            ))
        }
        NotificationBackend::Noop => {
            tracing::info!("通知バックエンド: Noop");
            Arc::new(NoopNotificationSender)
        }
    };
    // ワーカーはキューの送信側がすべて drop されるまで動き続ける
    let (notification_queue, _notification_worker) =
        ChannelNotificationQueue::spawn(notification_sender);

    let app = build_app(AppDependencies {
        account_repository: Arc::new(PostgresAccountRepository::new(pool)),
        password_hasher: Arc::new(password_hasher),
        token_codec: Arc::new(token_codec),
        notification_queue: Arc::new(notification_queue),
        started_at,
    });

    // サーバー起動
    let listener = bind_listener(&config.host, config.port)
        .await
        .with_context(|| {
            format!(
                "{}:{} へのバインドに失敗しました",
                config.host, config.port
            )
        })?;
    let addr = listener
        .local_addr()
        .context("バインドしたアドレスを取得できません")?;
    tracing::info!("TaskFlow API サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await.context("サーバーが異常終了しました")?;

    Ok(())
}
