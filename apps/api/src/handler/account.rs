//! # アカウント参照ハンドラ
//!
//! 認証ミドルウェアの内側に置く保護ルート。
//!
//! - `GET /users` - 全アカウント一覧
//! - `GET /me` - トークンのサブジェクトに対応するアカウント

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskflow_domain::account::Account;

use crate::{error::ApiError, middleware::AuthenticatedAccount, usecase::AccountUseCaseImpl};

/// アカウント参照ハンドラの共有状態
pub struct AccountState {
    pub usecase: AccountUseCaseImpl,
}

/// アカウントの公開表現
///
/// パスワードハッシュは含めない。
#[derive(Debug, Serialize, Deserialize)]
pub struct AccountDto {
    pub id:         i64,
    pub email:      String,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountDto {
    fn from(account: &Account) -> Self {
        Self {
            id:         account.id().as_i64(),
            email:      account.email().as_str().to_string(),
            created_at: account.created_at(),
        }
    }
}

/// GET /users
///
/// アカウントがなければ空配列を返す。
pub async fn list_users(
    State(state): State<Arc<AccountState>>,
) -> Result<Json<Vec<AccountDto>>, ApiError> {
    let accounts = state.usecase.list_accounts().await?;
    Ok(Json(accounts.iter().map(AccountDto::from).collect()))
}

/// GET /me
pub async fn me(
    State(state): State<Arc<AccountState>>,
    subject: AuthenticatedAccount,
) -> Result<Json<AccountDto>, ApiError> {
    let account = state.usecase.get_account(subject.account_id).await?;
    Ok(Json(AccountDto::from(&account)))
}
