//! # TaskFlow API サーバー
//!
//! メールアドレスとパスワードによるアカウント登録、ログイン（署名付きトークンの発行）、
//! トークンで保護されたアカウント参照を提供する HTTP API。
//!
//! ## エンドポイント
//!
//! | メソッド | パス | 認証 | 概要 |
//! |---------|------|------|------|
//! | GET | `/` | 不要 | API 名とバージョン |
//! | GET | `/health` | 不要 | 稼働状態と uptime |
//! | POST | `/register` | 不要 | アカウント登録 |
//! | POST | `/login` | 不要 | ログイン（トークン発行） |
//! | GET | `/users` | 必要 | 全アカウント一覧 |
//! | GET | `/me` | 必要 | 自アカウント |
//!
//! ## モジュール構成
//!
//! - [`app_builder`] - 依存の注入とルーター構築
//! - [`config`] - アプリケーション設定（環境変数からの読み込み）
//! - [`error`] - API エラー定義と HTTP レスポンスへの変換
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`middleware`] - 認証ミドルウェア
//! - [`usecase`] - 登録・ログイン・アカウント参照のビジネスロジック
//!
//! ## 依存関係
//!
//! - `taskflow_domain`: アカウント・パスワード・通知のドメインモデル
//! - `taskflow_infra`: PostgreSQL、パスワードハッシュ、トークン、メール送信
//! - `taskflow_shared`: エラーレスポンス、ヘルスチェック、トレーシング
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use taskflow_api::app_builder::{AppDependencies, build_app};
//!
//! let app = build_app(deps);
//! axum::serve(listener, app).await?;
//! ```

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod usecase;

#[cfg(test)]
mod test_utils;
