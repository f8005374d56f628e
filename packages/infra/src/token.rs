//! # ベアラートークン
//!
//! アカウント ID をサブジェクトとする署名付きトークン（JWT, HS256）の発行と検証を行う。
//!
//! ## 設計方針
//!
//! - **ステートレス**: サーバー側にセッションや失効リストを持たない。
//!   署名が正しく期限内であれば、そのサブジェクトの本人確認とみなす
//! - **単一の署名鍵**: 起動時に一度だけ設定し、プロセスの生存期間中は変更しない
//! - **有効期限は自前で判定**: 検証側の [`Clock`] で `now < exp` を判定する。
//!   猶予（leeway）は設けない
//! - **エラーの区別**: 署名不一致 / 期限切れ / 構造不正を [`TokenError`] で区別する。
//!   3 部構成であれば、ヘッダーやペイロードを解釈する前に署名を検証する。
//!   どのパートを改ざんしても [`TokenError::InvalidSignature`] になる
//!
//! ## クレーム
//!
//! | クレーム | 内容 |
//! |---------|------|
//! | `sub` | アカウント ID（10 進文字列） |
//! | `iat` | 発行日時（UNIX 秒） |
//! | `exp` | 有効期限（発行から [`TOKEN_TTL_HOURS`] 時間後、UNIX 秒） |

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{
    Algorithm,
    DecodingKey,
    EncodingKey,
    Header,
    Validation,
    errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use taskflow_domain::{account::AccountId, clock::Clock};
use thiserror::Error;

/// トークンの有効期間（時間）
pub const TOKEN_TTL_HOURS: i64 = 24;

/// トークン処理のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// 署名が一致しない（改ざん、別の鍵で署名されたなど）
    #[error("トークンの署名が不正です")]
    InvalidSignature,

    /// 有効期限切れ
    #[error("トークンの有効期限が切れています")]
    Expired,

    /// トークンの構造やクレームを解釈できない
    #[error("トークンの形式が不正です")]
    Malformed,

    /// 署名の生成に失敗
    #[error("トークンの署名に失敗: {0}")]
    Signing(String),
}

/// トークンの署名鍵
///
/// # セキュリティ
///
/// Debug 出力では値をマスクする。
#[derive(Clone)]
pub struct TokenSecret(String);

impl TokenSecret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// 鍵のバイト長
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("TokenSecret").field(&"[REDACTED]").finish()
    }
}

/// トークンの発行と検証を担当するトレイト
pub trait TokenCodec: Send + Sync {
    /// サブジェクトを埋め込んだトークンを発行する
    ///
    /// # Errors
    ///
    /// - 署名の生成に失敗した場合（[`TokenError::Signing`]）
    fn issue(&self, subject: AccountId) -> Result<String, TokenError>;

    /// トークンを検証し、埋め込まれたサブジェクトを返す
    ///
    /// # Errors
    ///
    /// - 署名が一致しない場合（[`TokenError::InvalidSignature`]）
    /// - 有効期限を過ぎている場合（[`TokenError::Expired`]）
    /// - 3 部構成として解釈できない、またはクレームが不正な場合（[`TokenError::Malformed`]）
    fn verify(&self, token: &str) -> Result<AccountId, TokenError>;
}

/// JWT のクレーム
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// HS256 の JWT による [`TokenCodec`] 実装
pub struct JwtTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation:   Validation,
    clock:        Arc<dyn Clock>,
}

impl JwtTokenCodec {
    pub fn new(secret: &TokenSecret, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // 期限は verify 内で注入された Clock を使って判定する
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            clock,
        }
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, subject: AccountId) -> Result<String, TokenError> {
        let now = self.clock.now();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<AccountId, TokenError> {
        let mut parts = token.split('.');
        let (Some(header), Some(payload), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TokenError::Malformed);
        };

        let signing_input = &token[..header.len() + 1 + payload.len()];
        let signature_valid = jsonwebtoken::crypto::verify(
            signature,
            signing_input.as_bytes(),
            &self.decoding_key,
            Algorithm::HS256,
        )
        .unwrap_or(false);
        if !signature_valid {
            return Err(TokenError::InvalidSignature);
        }

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })?;

        if self.clock.now().timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        data.claims
            .sub
            .parse::<AccountId>()
            .map_err(|_| TokenError::Malformed)
    }
}
