//! # 認証ユースケース
//!
//! アカウント登録とログインのビジネスロジックを実装する。
//!
//! ## 登録
//!
//! 1. 入力の欠落・メールアドレス形式・パスワード長を検証する
//! 2. パスワードをハッシュ化する
//! 3. アカウントを永続化する（メールアドレスの重複は [`ApiError::Conflict`]）
//! 4. ウェルカムメールを通知キューに積む。送信結果はレスポンスに影響しない
//!
//! ## ログイン
//!
//! 1. メールアドレスでアカウントを検索する
//! 2. 保存済みハッシュでパスワードを検証する
//! 3. アカウント ID をサブジェクトとするトークンを発行する
//!
//! ## タイミング攻撃対策
//!
//! アカウントが存在しない場合もダミーハッシュで検証を実行し、
//! パスワード不一致の場合と処理時間を揃える。エラーメッセージも同一にする。
//!
//! ## ブロッキング処理
//!
//! Argon2id の計算は CPU バウンドなため `spawn_blocking` で実行し、
//! 非同期ランタイムのワーカースレッドを占有しない。

use std::sync::Arc;

use taskflow_domain::{
    account::{Account, Email, NewAccount},
    notification::EmailMessage,
    password::{PasswordHash, PasswordVerifyResult, PlainPassword},
};
use taskflow_infra::{
    PasswordHasher,
    TokenCodec,
    notification::NotificationQueue,
    repository::AccountRepository,
};

use crate::error::{ApiError, message};

/// 登録の入力
#[derive(Debug)]
pub struct RegisterInput {
    pub email:    String,
    pub password: PlainPassword,
}

/// ログインの入力
#[derive(Debug)]
pub struct LoginInput {
    pub email:    String,
    pub password: PlainPassword,
}

/// ログインの結果
#[derive(Debug)]
pub struct LoginOutput {
    pub token:   String,
    pub account: Account,
}

/// 認証ユースケースの実装
pub struct AuthUseCaseImpl {
    account_repository: Arc<dyn AccountRepository>,
    password_hasher:    Arc<dyn PasswordHasher>,
    token_codec:        Arc<dyn TokenCodec>,
    notification_queue: Arc<dyn NotificationQueue>,
}

impl AuthUseCaseImpl {
    pub fn new(
        account_repository: Arc<dyn AccountRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_codec: Arc<dyn TokenCodec>,
        notification_queue: Arc<dyn NotificationQueue>,
    ) -> Self {
        Self {
            account_repository,
            password_hasher,
            token_codec,
            notification_queue,
        }
    }

    /// アカウントを登録する
    #[tracing::instrument(skip_all)]
    pub async fn register(&self, input: RegisterInput) -> Result<Account, ApiError> {
        if input.email.is_empty() || input.password.is_empty() {
            return Err(ApiError::Validation(message::INVALID_REGISTER_BODY));
        }

        let email = Email::parse(&input.email).map_err(|e| {
            tracing::debug!(error = %e, "メールアドレスの形式が不正");
            ApiError::Validation(message::INVALID_EMAIL_FORMAT)
        })?;

        if !input.password.meets_minimum_length() {
            return Err(ApiError::Validation(message::PASSWORD_TOO_SHORT));
        }

        let password_hash = self.hash_password(input.password).await?;

        let account = self
            .account_repository
            .create(&NewAccount::new(email, password_hash))
            .await
            .map_err(|e| {
                if e.is_duplicate() {
                    ApiError::Conflict(message::EMAIL_ALREADY_REGISTERED)
                } else {
                    ApiError::dependency(message::DATABASE_ERROR, e)
                }
            })?;

        tracing::info!(account_id = %account.id(), "アカウントを登録");

        self.notification_queue
            .enqueue(EmailMessage::welcome(account.email()));

        Ok(account)
    }

    /// メールアドレスとパスワードで認証し、トークンを発行する
    #[tracing::instrument(skip_all)]
    pub async fn login(&self, input: LoginInput) -> Result<LoginOutput, ApiError> {
        if input.email.is_empty() || input.password.is_empty() {
            return Err(ApiError::Validation(message::INVALID_LOGIN_BODY));
        }

        // 形式が不正なメールアドレスは登録されていないため、未登録と同じ扱いにする
        let Ok(email) = Email::parse(&input.email) else {
            self.dummy_verification(input.password).await;
            return Err(ApiError::Authentication(message::INVALID_CREDENTIALS));
        };

        let account = self
            .account_repository
            .find_by_email(&email)
            .await
            .map_err(|e| ApiError::dependency(message::DATABASE_ERROR, e))?;

        let Some(account) = account else {
            tracing::info!("未登録のメールアドレスでのログイン");
            self.dummy_verification(input.password).await;
            return Err(ApiError::Authentication(message::INVALID_CREDENTIALS));
        };

        let verified = self
            .verify_password(input.password, account.password_hash().clone())
            .await?;

        if verified.is_mismatch() {
            tracing::info!(account_id = %account.id(), "パスワード不一致");
            return Err(ApiError::Authentication(message::INVALID_CREDENTIALS));
        }

        let token = self
            .token_codec
            .issue(account.id())
            .map_err(|e| ApiError::dependency(message::FAILED_TO_GENERATE_TOKEN, e))?;

        tracing::info!(account_id = %account.id(), "ログイン成功");

        Ok(LoginOutput { token, account })
    }

    async fn hash_password(&self, password: PlainPassword) -> Result<PasswordHash, ApiError> {
        let hasher = Arc::clone(&self.password_hasher);

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| ApiError::dependency(message::FAILED_TO_HASH_PASSWORD, e))?
            .map_err(|e| ApiError::dependency(message::FAILED_TO_HASH_PASSWORD, e))
    }

    async fn verify_password(
        &self,
        password: PlainPassword,
        hash: PasswordHash,
    ) -> Result<PasswordVerifyResult, ApiError> {
        let hasher = Arc::clone(&self.password_hasher);

        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| ApiError::dependency(message::FAILED_TO_VERIFY_CREDENTIALS, e))?
            .map_err(|e| ApiError::dependency(message::FAILED_TO_VERIFY_CREDENTIALS, e))
    }

    /// ダミーハッシュで検証を実行する（タイミング攻撃対策）
    ///
    /// 固定 sleep ではなく実際に Argon2id 検証を実行することで、
    /// 実際の検証と同じ時間特性になる。
    async fn dummy_verification(&self, password: PlainPassword) {
        // 結果は無視（エラーでも問題ない）
        let _ = self
            .verify_password(password, self.password_hasher.dummy_hash().clone())
            .await;
    }
}
