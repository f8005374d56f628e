//! # アカウント参照ユースケース
//!
//! 認証済みリクエストからのアカウント一覧・自アカウントの取得を実装する。

use std::sync::Arc;

use taskflow_domain::account::{Account, AccountId};
use taskflow_infra::repository::AccountRepository;

use crate::error::{ApiError, message};

/// アカウント参照ユースケースの実装
pub struct AccountUseCaseImpl {
    account_repository: Arc<dyn AccountRepository>,
}

impl AccountUseCaseImpl {
    pub fn new(account_repository: Arc<dyn AccountRepository>) -> Self {
        Self { account_repository }
    }

    /// 全アカウントを ID の昇順で取得する
    pub async fn list_accounts(&self) -> Result<Vec<Account>, ApiError> {
        self.account_repository
            .find_all()
            .await
            .map_err(|e| ApiError::dependency(message::FAILED_TO_FETCH_USERS, e))
    }

    /// トークンのサブジェクトに対応するアカウントを取得する
    ///
    /// トークン発行後にアカウントが削除されていれば [`ApiError::NotFound`] を返す。
    #[tracing::instrument(skip_all, fields(%account_id))]
    pub async fn get_account(&self, account_id: AccountId) -> Result<Account, ApiError> {
        self.account_repository
            .find_by_id(account_id)
            .await
            .map_err(|e| ApiError::dependency(message::DATABASE_ERROR, e))?
            .ok_or(ApiError::NotFound(message::USER_NOT_FOUND))
    }
}
