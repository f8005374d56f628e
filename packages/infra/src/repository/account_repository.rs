//! # AccountRepository
//!
//! アカウントの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **一意性の強制**: メールアドレスの一意性は `users.email` の UNIQUE 制約だけが保証する。
//!   制約違反は [`InfraError::duplicate`] に変換し、他の DB エラーと区別する
//! - **実行時クエリ**: `query_as` + `FromRow` で行を受け取り、ドメインモデルへ変換する

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use taskflow_domain::{
    account::{Account, AccountId, Email, NewAccount},
    password::PasswordHash,
};

use crate::error::InfraError;

/// アカウントリポジトリトレイト
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// アカウントを作成する
    ///
    /// ID と作成日時はリポジトリ側で採番する。
    ///
    /// # Errors
    ///
    /// - メールアドレスが登録済みの場合は `Duplicate { entity: "Account", field: "email" }`
    /// - その他のデータベースエラー
    async fn create(&self, account: &NewAccount) -> Result<Account, InfraError>;

    /// メールアドレスでアカウントを検索（大文字小文字を区別する）
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, InfraError>;

    /// ID でアカウントを検索
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, InfraError>;

    /// 全アカウントを ID の昇順で取得
    async fn find_all(&self) -> Result<Vec<Account>, InfraError>;
}

/// `users` テーブルの行
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id:            i64,
    email:         String,
    password_hash: String,
    created_at:    DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = InfraError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email)
            .map_err(|e| InfraError::unexpected(format!("保存済みのメールアドレスが不正: {e}")))?;

        Ok(Account::from_db(
            AccountId::new(row.id),
            email,
            PasswordHash::new(row.password_hash),
            row.created_at,
        ))
    }
}

/// PostgreSQL 実装の AccountRepository
#[derive(Debug, Clone)]
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn create(&self, account: &NewAccount) -> Result<Account, InfraError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(account.email().as_str())
        .bind(account.password_hash().as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                InfraError::duplicate("Account", "email")
            }
            other => InfraError::from(other),
        })?;

        row.try_into()
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, InfraError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Account::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, InfraError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Account::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Account>, InfraError> {
        let rows = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Account::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PostgresAccountRepository>();
    }

    #[test]
    fn test_行からアカウントへ変換できる() {
        let created_at = Utc::now();
        let row = AccountRow {
            id: 3,
            email: "user@example.com".to_string(),
            password_hash: "$argon2id$v=19$...".to_string(),
            created_at,
        };

        let account = Account::try_from(row).unwrap();

        assert_eq!(account.id(), AccountId::new(3));
        assert_eq!(account.email().as_str(), "user@example.com");
        assert_eq!(account.created_at(), created_at);
    }

    #[test]
    fn test_不正なメールアドレスの行は変換エラー() {
        let row = AccountRow {
            id: 3,
            email: "broken".to_string(),
            password_hash: "x".to_string(),
            created_at: Utc::now(),
        };

        assert!(Account::try_from(row).is_err());
    }
}
