//! テスト用スタブ
//!
//! ユースケース・ハンドラ・ミドルウェアのテストで共有する。

use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use taskflow_domain::{
    account::{Account, AccountId, Email},
    clock::FixedClock,
    password::{PasswordHash, PasswordVerifyResult, PlainPassword},
};
use taskflow_infra::{
    InfraError,
    JwtTokenCodec,
    PasswordHasher,
    TokenCodec,
    TokenError,
    TokenSecret,
};

pub(crate) const TEST_SECRET: &str = "test-secret-that-is-at-least-32-bytes!";

/// テストで使う固定時刻
pub(crate) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap()
}

/// 固定時刻で動くトークンコーデック
pub(crate) fn token_codec_at(now: DateTime<Utc>) -> Arc<JwtTokenCodec> {
    Arc::new(JwtTokenCodec::new(
        &TokenSecret::new(TEST_SECRET),
        Arc::new(FixedClock::new(now)),
    ))
}

/// `StubPasswordHasher` でハッシュ化済みのアカウント
pub(crate) fn account(id: i64, email: &str, password: &str) -> Account {
    Account::from_db(
        AccountId::new(id),
        Email::parse(email).unwrap(),
        PasswordHash::new(format!("hashed:{password}")),
        fixed_now(),
    )
}

/// 平文に `hashed:` を付けるだけのハッシュ
///
/// `hashed:` で始まらないハッシュはダミーハッシュを除いて不正な形式として扱う。
pub(crate) struct StubPasswordHasher {
    fail_hash:       bool,
    dummy_hash:      PasswordHash,
    verified_hashes: Mutex<Vec<String>>,
}

/// `StubPasswordHasher` のダミーハッシュ
pub(crate) const STUB_DUMMY_HASH: &str = "stub-dummy-hash";

impl StubPasswordHasher {
    fn build(fail_hash: bool) -> Arc<Self> {
        Arc::new(Self {
            fail_hash,
            dummy_hash: PasswordHash::new(STUB_DUMMY_HASH),
            verified_hashes: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn new() -> Arc<Self> {
        Self::build(false)
    }

    pub(crate) fn failing() -> Arc<Self> {
        Self::build(true)
    }

    /// verify が呼ばれた回数
    pub(crate) fn verify_calls(&self) -> usize {
        self.verified_hashes.lock().unwrap().len()
    }

    /// verify に渡されたハッシュ（呼び出し順）
    pub(crate) fn verified_hashes(&self) -> Vec<String> {
        self.verified_hashes.lock().unwrap().clone()
    }
}

impl PasswordHasher for StubPasswordHasher {
    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError> {
        if self.fail_hash {
            return Err(InfraError::password_hash("テスト用のハッシュ失敗"));
        }
        Ok(PasswordHash::new(format!("hashed:{}", password.as_str())))
    }

    fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<PasswordVerifyResult, InfraError> {
        self.verified_hashes
            .lock()
            .unwrap()
            .push(hash.as_str().to_string());
        match hash.as_str().strip_prefix("hashed:") {
            Some(expected) => Ok(PasswordVerifyResult::from(expected == password.as_str())),
            None if *hash == self.dummy_hash => Ok(PasswordVerifyResult::Mismatch),
            None => Err(InfraError::malformed_secret("テスト用の不正なハッシュ")),
        }
    }

    fn dummy_hash(&self) -> &PasswordHash {
        &self.dummy_hash
    }
}

/// 署名に失敗するトークンコーデック
pub(crate) struct FailingTokenCodec;

impl TokenCodec for FailingTokenCodec {
    fn issue(&self, _subject: AccountId) -> Result<String, TokenError> {
        Err(TokenError::Signing("テスト用の署名失敗".to_string()))
    }

    fn verify(&self, _token: &str) -> Result<AccountId, TokenError> {
        Err(TokenError::Malformed)
    }
}
