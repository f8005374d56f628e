//! # パスワードハッシュ
//!
//! Argon2id によるパスワードのハッシュ化と検証を提供する。
//!
//! ## 設計方針
//!
//! - **ソルト付き**: ハッシュ化のたびに新しいソルトを生成するため、同じ平文でも
//!   出力は毎回異なる。ソルトとコストは PHC 文字列に埋め込まれる
//! - **コスト調整可能**: [`HashingCost`] で memory / iterations / parallelism を指定する
//! - **不一致と破損の区別**: パスワード不一致は `Ok(Mismatch)`、
//!   ハッシュ文字列自体が不正な場合のみ [`InfraErrorKind::MalformedSecret`] を返す。
//!   PHC として解釈できても、ハッシュ出力がない・未対応のアルゴリズム・範囲外のコストは不正とみなす
//! - **ダミーハッシュ**: 生成時に設定コストでランダムな値をハッシュ化して保持する。
//!   未登録アカウントのログインでも実際の検証と同じコストがかかる
//! - **同期 API**: CPU バウンドな処理のため、呼び出し側が
//!   `tokio::task::spawn_blocking` で実行する
//!
//! [`InfraErrorKind::MalformedSecret`]: crate::InfraErrorKind::MalformedSecret

use argon2::{
    Algorithm,
    Argon2,
    Params,
    PasswordHasher as _,
    PasswordVerifier as _,
    Version,
    password_hash::{self, PasswordHash as PhcString, SaltString, rand_core::OsRng},
};
use taskflow_domain::password::{PasswordHash, PasswordVerifyResult, PlainPassword};

use crate::InfraError;

/// パスワードのハッシュ化と検証を担当するトレイト
pub trait PasswordHasher: Send + Sync {
    /// 平文パスワードをハッシュ化する
    ///
    /// # Errors
    ///
    /// - ハッシュ計算に失敗した場合
    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError>;

    /// パスワードを検証する
    ///
    /// # Errors
    ///
    /// - 不正なハッシュ形式の場合
    fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<PasswordVerifyResult, InfraError>;

    /// 存在しないアカウントへのログイン時に検証するダミーハッシュ
    ///
    /// 実際に保存されるハッシュと同じコストを持ち、どの平文とも一致しない。
    fn dummy_hash(&self) -> &PasswordHash;
}

/// Argon2id のコストパラメータ
///
/// デフォルトは OWASP 推奨値（RFC 9106）:
/// - Memory: 64 MiB
/// - Iterations: 1
/// - Parallelism: 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingCost {
    pub memory_kib:  u32,
    pub iterations:  u32,
    pub parallelism: u32,
}

impl Default for HashingCost {
    fn default() -> Self {
        Self {
            memory_kib:  65536,
            iterations:  1,
            parallelism: 1,
        }
    }
}

/// Argon2id によるパスワードハッシュの実装
#[derive(Debug, Clone)]
pub struct Argon2PasswordHasher {
    argon2:     Argon2<'static>,
    dummy_hash: PasswordHash,
}

impl Argon2PasswordHasher {
    /// 指定したコストでインスタンスを作成する
    ///
    /// # Errors
    ///
    /// - コストパラメータが Argon2 の許容範囲外の場合
    /// - ダミーハッシュの生成に失敗した場合
    pub fn new(cost: HashingCost) -> Result<Self, InfraError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| InfraError::unexpected(format!("Argon2 パラメータが不正です: {e}")))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        // 平文は誰にも知られないランダム値
        let unknowable = SaltString::generate(&mut OsRng);
        let salt = SaltString::generate(&mut OsRng);
        let dummy_hash = argon2
            .hash_password(unknowable.as_str().as_bytes(), &salt)
            .map_err(|e| InfraError::password_hash(e.to_string()))?
            .to_string();

        Ok(Self {
            argon2,
            dummy_hash: PasswordHash::new(dummy_hash),
        })
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError> {
        let salt = SaltString::generate(&mut OsRng);

        let phc = self
            .argon2
            .hash_password(password.as_str().as_bytes(), &salt)
            .map_err(|e| InfraError::password_hash(e.to_string()))?;

        Ok(PasswordHash::new(phc.to_string()))
    }

    fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<PasswordVerifyResult, InfraError> {
        let parsed = PhcString::new(hash.as_str())
            .map_err(|e| InfraError::malformed_secret(e.to_string()))?;

        // ソルトか出力が欠けていると argon2 は不一致として扱うため、先に弾く
        if parsed.salt.is_none() || parsed.hash.is_none() {
            return Err(InfraError::malformed_secret(
                "ハッシュにソルトまたは出力が含まれていません",
            ));
        }

        // 検証には PHC 文字列に埋め込まれたコストが使われる
        match self
            .argon2
            .verify_password(password.as_str().as_bytes(), &parsed)
        {
            Ok(()) => Ok(PasswordVerifyResult::Match),
            Err(password_hash::Error::Password) => Ok(PasswordVerifyResult::Mismatch),
            Err(e) => Err(InfraError::malformed_secret(e.to_string())),
        }
    }

    fn dummy_hash(&self) -> &PasswordHash {
        &self.dummy_hash
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::InfraErrorKind;

    /// テストを高速化するため最小コストを使う
    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::new(HashingCost {
            memory_kib:  Params::MIN_M_COST,
            iterations:  1,
            parallelism: 1,
        })
        .unwrap()
    }

    #[rstest]
    #[case("mypassword")]
    #[case("123456")]
    #[case("パスワード123")]
    fn test_ハッシュ化したパスワードを検証できる(
        hasher: Argon2PasswordHasher,
        #[case] input: &str,
    ) {
        let password = PlainPassword::new(input);

        let hash = hasher.hash(&password).unwrap();
        let result = hasher.verify(&password, &hash).unwrap();

        assert!(result.is_match());
    }

    #[rstest]
    fn test_異なるパスワードは不一致(hasher: Argon2PasswordHasher) {
        let hash = hasher.hash(&PlainPassword::new("mypassword")).unwrap();

        let result = hasher
            .verify(&PlainPassword::new("mypassword!"), &hash)
            .unwrap();

        assert!(result.is_mismatch());
    }

    #[rstest]
    fn test_同じパスワードでも毎回異なるハッシュになる(hasher: Argon2PasswordHasher) {
        let password = PlainPassword::new("mypassword");

        let first = hasher.hash(&password).unwrap();
        let second = hasher.hash(&password).unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify(&password, &first).unwrap().is_match());
        assert!(hasher.verify(&password, &second).unwrap().is_match());
    }

    #[rstest]
    fn test_ハッシュはargon2idのphc形式で平文を含まない(hasher: Argon2PasswordHasher) {
        let hash = hasher.hash(&PlainPassword::new("mypassword")).unwrap();

        assert!(hash.as_str().starts_with("$argon2id$v=19$"));
        assert!(!hash.as_str().contains("mypassword"));
    }

    #[rstest]
    #[case::phcでない("not-a-valid-hash")]
    #[case::bcrypt("$2b$12$R9h/cIPz0gi.URNNX3kh2OPST9/PgBkqquzi.Ss7KIUgO2t0jWMUW")]
    #[case::ハッシュ出力がない("$argon2id$v=19$m=65536,t=1,p=1$AAAAAAAAAAAAAAAAAAAAAA")]
    #[case::未対応のアルゴリズム(
        "$pbkdf2-sha256$i=1000$AAAAAAAAAAAAAAAAAAAAAA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA"
    )]
    #[case::範囲外のコスト(
        "$argon2id$v=19$m=0,t=0,p=0$AAAAAAAAAAAAAAAAAAAAAA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA"
    )]
    fn test_不正なハッシュ形式はmalformed_secret(
        hasher: Argon2PasswordHasher,
        #[case] stored: &str,
    ) {
        let result = hasher.verify(&PlainPassword::new("mypassword"), &PasswordHash::new(stored));

        let err = result.unwrap_err();
        assert!(matches!(err.kind(), InfraErrorKind::MalformedSecret(_)));
    }

    #[rstest]
    fn test_ダミーハッシュはどのパスワードとも一致しない(hasher: Argon2PasswordHasher) {
        let result = hasher
            .verify(&PlainPassword::new("mypassword"), hasher.dummy_hash())
            .unwrap();

        assert!(result.is_mismatch());
    }

    #[test]
    fn test_ダミーハッシュは設定したコストを持つ() {
        // Given
        let hasher = Argon2PasswordHasher::new(HashingCost {
            memory_kib:  19456,
            iterations:  2,
            parallelism: 1,
        })
        .unwrap();

        // When
        let dummy = hasher.dummy_hash().as_str();

        // Then
        assert!(dummy.starts_with("$argon2id$v=19$m=19456,t=2,p=1$"));
    }

    #[rstest]
    fn test_ダミーハッシュは保存されるハッシュと同じコストを持つ(
        hasher: Argon2PasswordHasher,
    ) {
        let stored = hasher.hash(&PlainPassword::new("mypassword")).unwrap();

        let params = |hash: &str| hash.split('$').nth(3).unwrap().to_string();

        assert_eq!(
            params(hasher.dummy_hash().as_str()),
            params(stored.as_str())
        );
    }

    #[test]
    fn test_範囲外のコストはエラー() {
        let result = Argon2PasswordHasher::new(HashingCost {
            memory_kib:  1,
            iterations:  0,
            parallelism: 0,
        });

        assert!(result.is_err());
    }

    #[test]
    fn test_デフォルトコストはowasp推奨値() {
        let cost = HashingCost::default();

        assert_eq!(cost.memory_kib, 65536);
        assert_eq!(cost.iterations, 1);
        assert_eq!(cost.parallelism, 1);
    }
}
