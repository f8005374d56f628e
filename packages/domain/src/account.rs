//! # アカウント
//!
//! アカウントエンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`AccountId`] | アカウント ID | リポジトリが採番する不変の識別子、トークンのサブジェクト |
//! | [`Email`] | メールアドレス | ログイン ID。システム全体で一意 |
//! | [`Account`] | アカウント | 永続化済みのアカウント |
//! | [`NewAccount`] | 新規アカウント | 採番前の登録内容 |
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use taskflow_domain::{
//!     account::{Email, NewAccount},
//!     password::PasswordHash,
//! };
//!
//! let email = Email::parse("  user@example.com ")?;
//! assert_eq!(email.as_str(), "user@example.com");
//!
//! let new_account = NewAccount::new(email, PasswordHash::new("$argon2id$v=19$..."));
//! assert_eq!(new_account.email().as_str(), "user@example.com");
//! # Ok(())
//! # }
//! ```

use std::{str::FromStr, sync::LazyLock};

use chrono::{DateTime, Utc};
use derive_more::Display;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{DomainError, password::PasswordHash};

/// ローカル部 `@` ドメイン（ドットを 1 つ以上含む）、TLD は英字 2 文字以上
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("メールアドレスの正規表現が不正です")
});

/// アカウント ID
///
/// データベースの連番主キーをラップする。作成時にリポジトリが採番し、以後変更しない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(transparent)]
#[display("{_0}")]
pub struct AccountId(i64);

impl AccountId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl FromStr for AccountId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .map(Self)
            .map_err(|_| DomainError::Validation(format!("アカウント ID が不正です: {s}")))
    }
}

/// メールアドレス（値オブジェクト）
///
/// 前後の空白を除去した上で形式を検証する。大文字小文字は区別する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// メールアドレスを検証して作成する
    ///
    /// # エラー
    ///
    /// - 空白を除去した結果が空文字列の場合
    /// - `local@domain.tld` の形式でない場合
    pub fn parse(value: impl AsRef<str>) -> Result<Self, DomainError> {
        let value = value.as_ref().trim();

        if value.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスは必須です".to_string(),
            ));
        }

        if !EMAIL_PATTERN.is_match(value) {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        }

        Ok(Self(value.to_string()))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// アカウントエンティティ
///
/// パスワードハッシュは外部へ出さない。API のレスポンスは
/// `id` / `email` / `created_at` のみを射影して組み立てる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id:            AccountId,
    email:         Email,
    password_hash: PasswordHash,
    created_at:    DateTime<Utc>,
}

impl Account {
    /// 永続化済みのデータからアカウントを復元する
    pub fn from_db(
        id: AccountId,
        email: Email,
        password_hash: PasswordHash,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            password_hash,
            created_at,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// 新規アカウント（採番前）
#[derive(Debug, Clone)]
pub struct NewAccount {
    email:         Email,
    password_hash: PasswordHash,
}

impl NewAccount {
    pub fn new(email: Email, password_hash: PasswordHash) -> Self {
        Self {
            email,
            password_hash,
        }
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }
}
