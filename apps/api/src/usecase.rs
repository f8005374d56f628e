//! # ユースケース層
//!
//! 登録・ログイン・アカウント参照のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリ・ハッシュ・トークン・通知を `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは入力の取り出しとレスポンス整形のみ行い、ロジックはユースケースに集約
//! - **エラーの境界**: 依存先のエラーはここで [`ApiError`](crate::error::ApiError) に変換し、
//!   ハンドラへ生のエラーを渡さない

pub mod account;
pub mod auth;

pub use account::AccountUseCaseImpl;
pub use auth::{AuthUseCaseImpl, LoginInput, LoginOutput, RegisterInput};
