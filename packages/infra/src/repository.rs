//! # リポジトリ実装
//!
//! アカウントの永続化を担当するリポジトリを提供する。
//!
//! ## 設計方針
//!
//! - **依存性逆転**: ユースケース層はトレイトにのみ依存し、実装を注入される
//! - **データベース抽象化**: sqlx を使用し、PostgreSQL 固有の処理をカプセル化
//! - **テスタビリティ**: トレイト経由でモック可能な設計

pub mod account_repository;

pub use account_repository::{AccountRepository, PostgresAccountRepository};
