//! # ミドルウェア
//!
//! 保護ルートの前段で動くミドルウェアを提供する。

mod auth;

pub use auth::{AuthenticatedAccount, AuthnState, authenticate, require_auth};
