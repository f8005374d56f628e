//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ビジネスロジックはユースケースに委譲
//!
//! ## モジュール構成
//!
//! ```text
//! handler.rs          # 親モジュール（re-export）
//! └── handler/
//!     ├── health.rs   # ルート・ヘルスチェック
//!     ├── auth.rs     # 登録・ログイン
//!     └── account.rs  # アカウント一覧・自アカウント（認証必須）
//! ```

pub mod account;
pub mod auth;
pub mod health;

pub use account::{AccountDto, AccountState, list_users, me};
pub use auth::{AuthState, CredentialsRequest, LoginResponse, LoginUserDto, login, register};
pub use health::{HealthState, RootResponse, health_check, root};
