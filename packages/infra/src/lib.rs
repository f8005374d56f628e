//! # TaskFlow インフラ層
//!
//! 外部システムとの接続・通信、および暗号処理を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! このクレートはドメイン層のモデルを永続化・送信・署名する具体的な実装を提供する。
//! 各機能はトレイトで抽象化し、API 層へはトレイトオブジェクトとして注入する。
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//!   ↘          ↗
//!     shared
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理とマイグレーション
//! - [`error`] - インフラ層エラー定義
//! - [`password`] - Argon2id によるパスワードハッシュ化と検証
//! - [`token`] - 署名付きベアラートークンの発行と検証
//! - [`repository`] - アカウントリポジトリ
//! - [`notification`] - メール送信と非同期送信キュー

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod notification;
pub mod password;
pub mod repository;
pub mod token;

pub use error::{InfraError, InfraErrorKind};
pub use password::{Argon2PasswordHasher, HashingCost, PasswordHasher};
pub use token::{JwtTokenCodec, TOKEN_TTL_HOURS, TokenCodec, TokenError, TokenSecret};
