//! # テスト用モック
//!
//! ユースケース・ハンドラ・結合テストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! taskflow-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{
    Arc,
    Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use chrono::Utc;
use taskflow_domain::{
    account::{Account, AccountId, Email, NewAccount},
    notification::{EmailMessage, NotificationError},
};

use crate::{
    error::InfraError,
    notification::{NotificationQueue, NotificationSender},
    repository::AccountRepository,
};

// ===== MockAccountRepository =====

/// インメモリのアカウントリポジトリ
///
/// ID は 1 から連番で採番し、メールアドレスの一意制約を再現する。
/// [`fail_with_database_error`](Self::fail_with_database_error) で
/// 以降のすべての操作をデータベースエラーにできる。
#[derive(Clone, Default)]
pub struct MockAccountRepository {
    accounts: Arc<Mutex<Vec<Account>>>,
    failing:  Arc<AtomicBool>,
}

impl MockAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登録済みのアカウントを追加する
    pub fn add_account(&self, account: Account) {
        self.accounts.lock().unwrap().push(account);
    }

    /// 保存されているアカウントの一覧
    pub fn accounts(&self) -> Vec<Account> {
        self.accounts.lock().unwrap().clone()
    }

    /// 以降の操作をすべてデータベースエラーにする
    pub fn fail_with_database_error(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), InfraError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(InfraError::from(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn create(&self, account: &NewAccount) -> Result<Account, InfraError> {
        self.check_available()?;
        let mut accounts = self.accounts.lock().unwrap();

        if accounts.iter().any(|a| a.email() == account.email()) {
            return Err(InfraError::duplicate("Account", "email"));
        }

        let next_id = accounts.iter().map(|a| a.id().as_i64()).max().unwrap_or(0) + 1;
        let created = Account::from_db(
            AccountId::new(next_id),
            account.email().clone(),
            account.password_hash().clone(),
            Utc::now(),
        );
        accounts.push(created.clone());
        Ok(created)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, InfraError> {
        self.check_available()?;
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.email() == email)
            .cloned())
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, InfraError> {
        self.check_available()?;
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id() == id)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Account>, InfraError> {
        self.check_available()?;
        let mut accounts = self.accounts.lock().unwrap().clone();
        accounts.sort_by_key(|a| a.id().as_i64());
        Ok(accounts)
    }
}

// ===== RecordingNotificationSender =====

/// 送信したメールを記録する NotificationSender
#[derive(Clone, Default)]
pub struct RecordingNotificationSender {
    sent:     Arc<Mutex<Vec<EmailMessage>>>,
    attempts: Arc<AtomicUsize>,
    failing:  bool,
}

impl RecordingNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// 常に送信失敗を返す送信者
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// 送信に成功したメール
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// 送信を試みた回数
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationSender for RecordingNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(NotificationError::SendFailed(
                "テスト用の送信失敗".to_string(),
            ));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

// ===== RecordingNotificationQueue =====

/// 積まれたメールを記録するだけの NotificationQueue
#[derive(Clone, Default)]
pub struct RecordingNotificationQueue {
    queued: Arc<Mutex<Vec<EmailMessage>>>,
}

impl RecordingNotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 積まれたメール
    pub fn queued(&self) -> Vec<EmailMessage> {
        self.queued.lock().unwrap().clone()
    }
}

impl NotificationQueue for RecordingNotificationQueue {
    fn enqueue(&self, email: EmailMessage) {
        self.queued.lock().unwrap().push(email);
    }
}
