//! # TaskFlow ドメイン層
//!
//! アカウント管理のドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **外部依存なし**: データベースや HTTP の詳細を知らない純粋なモデル
//! - **値オブジェクト**: 生成時にバリデーションを行い、不正な値を型で排除
//! - **時刻の注入**: [`clock::Clock`] で現在時刻を抽象化し、テストで固定可能にする
//!
//! ## モジュール構成
//!
//! - [`account`] - アカウントエンティティ、アカウント ID、メールアドレス
//! - [`password`] - 平文パスワード、パスワードハッシュ、検証結果
//! - [`notification`] - 通知メールのメッセージ型
//! - [`clock`] - 時刻プロバイダ
//! - [`error`] - ドメイン層エラー

pub mod account;
pub mod clock;
pub mod error;
pub mod notification;
pub mod password;

pub use error::DomainError;
