//! AccountRepository 統合テスト
//!
//! データベースを使用したテスト。sqlx::test マクロを使用して、
//! テストごとに使い捨てのデータベースを作成しマイグレーションを適用する。
//!
//! PostgreSQL が必要なため通常の `cargo test` では無視される。
//!
//! 実行方法:
//! ```bash
//! DATABASE_URL=postgres://localhost/taskflow \
//!   cargo test -p taskflow-infra --test account_repository_test -- --ignored
//! ```

use pretty_assertions::assert_eq;
use sqlx::PgPool;
use taskflow_domain::{
    account::{AccountId, Email, NewAccount},
    password::PasswordHash,
};
use taskflow_infra::{
    InfraErrorKind,
    repository::{AccountRepository, PostgresAccountRepository},
};

fn new_account(email: &str) -> NewAccount {
    NewAccount::new(
        Email::parse(email).unwrap(),
        PasswordHash::new("$argon2id$v=19$m=65536,t=1,p=1$c2FsdA$aGFzaA"),
    )
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL が必要"]
async fn test_作成したアカウントをidとメールアドレスで取得できる(pool: PgPool) {
    // Arrange
    let sut = PostgresAccountRepository::new(pool);

    // Act
    let created = sut.create(&new_account("user@example.com")).await.unwrap();

    // Assert
    let by_id = sut.find_by_id(created.id()).await.unwrap().unwrap();
    let by_email = sut
        .find_by_email(&Email::parse("user@example.com").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_id, created);
    assert_eq!(by_email, created);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL が必要"]
async fn test_同じメールアドレスの登録はduplicate(pool: PgPool) {
    // Arrange
    let sut = PostgresAccountRepository::new(pool);
    sut.create(&new_account("user@example.com")).await.unwrap();

    // Act
    let result = sut.create(&new_account("user@example.com")).await;

    // Assert
    let err = result.unwrap_err();
    assert!(
        matches!(err.kind(), InfraErrorKind::Duplicate { entity, field } if entity == "Account" && field == "email")
    );
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL が必要"]
async fn test_メールアドレスは大文字小文字を区別する(pool: PgPool) {
    // Arrange
    let sut = PostgresAccountRepository::new(pool);
    sut.create(&new_account("user@example.com")).await.unwrap();

    // Act
    let upper = sut.create(&new_account("USER@example.com")).await;
    let found = sut
        .find_by_email(&Email::parse("User@example.com").unwrap())
        .await
        .unwrap();

    // Assert
    assert!(upper.is_ok());
    assert!(found.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL が必要"]
async fn test_存在しないidはnone(pool: PgPool) {
    let sut = PostgresAccountRepository::new(pool);

    let result = sut.find_by_id(AccountId::new(999)).await.unwrap();

    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL が必要"]
async fn test_一覧はidの昇順(pool: PgPool) {
    // Arrange
    let sut = PostgresAccountRepository::new(pool);
    for email in ["c@example.com", "a@example.com", "b@example.com"] {
        sut.create(&new_account(email)).await.unwrap();
    }

    // Act
    let accounts = sut.find_all().await.unwrap();

    // Assert
    let emails: Vec<&str> = accounts.iter().map(|a| a.email().as_str()).collect();
    assert_eq!(emails, vec!["c@example.com", "a@example.com", "b@example.com"]);
    assert!(accounts.windows(2).all(|w| w[0].id().as_i64() < w[1].id().as_i64()));
}
