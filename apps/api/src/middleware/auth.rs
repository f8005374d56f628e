//! # 認証ミドルウェア
//!
//! `Authorization: Bearer <token>` ヘッダーのトークンを検証し、
//! 保護ルートへのアクセスを認証済みリクエストに限定する。
//!
//! ## 状態遷移
//!
//! ```text
//! 未認証 → ヘッダーあり? → Bearer 形式? → 署名・期限が有効? → 認証済み
//!            │ No            │ No            │ No
//!            ▼               ▼               ▼
//!           401             401             401
//! ```
//!
//! 認証済みの場合、サブジェクト（[`AuthenticatedAccount`]）をリクエストの
//! extensions に格納してから次のハンドラへ進む。格納した値はそのリクエストの間だけ有効。
//!
//! ## 使い方
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//!
//! let authn_state = AuthnState { token_codec };
//!
//! Router::new()
//!     .route("/me", get(me))
//!     .layer(from_fn_with_state(authn_state, require_auth))
//! ```

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{HeaderMap, Request, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use taskflow_domain::account::AccountId;
use taskflow_infra::TokenCodec;

use crate::error::{ApiError, message};

/// 認証ミドルウェアの状態
#[derive(Clone)]
pub struct AuthnState {
    pub token_codec: Arc<dyn TokenCodec>,
}

/// 認証済みのサブジェクト
///
/// 認証ミドルウェアが extensions に格納し、ハンドラはエクストラクタとして受け取る。
/// ミドルウェアを通っていないルートで使うと 500 を返す。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    pub account_id: AccountId,
}

/// リクエストヘッダーからトークンを取り出して検証する
///
/// # Errors
///
/// - ヘッダーがない: `Missing Auth Header`
/// - `Bearer <token>` の形式でない: `Authorization header must be Bearer <token>`
/// - 署名不一致・期限切れ・構造不正: `Invalid or expired token`
pub fn authenticate(
    token_codec: &dyn TokenCodec,
    headers: &HeaderMap,
) -> Result<AuthenticatedAccount, ApiError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(ApiError::Authentication(message::MISSING_AUTH_HEADER))?;

    let token = header
        .to_str()
        .ok()
        .and_then(bearer_token)
        .ok_or(ApiError::Authentication(message::INVALID_AUTH_HEADER))?;

    let account_id = token_codec.verify(token).map_err(|e| {
        tracing::debug!(reason = %e, "トークンの検証に失敗");
        ApiError::Authentication(message::INVALID_TOKEN)
    })?;

    Ok(AuthenticatedAccount { account_id })
}

/// `Bearer <token>` からトークン部分を取り出す
///
/// スキームは大文字小文字を区別し、区切りは半角スペース 1 つだけ許可する。
fn bearer_token(value: &str) -> Option<&str> {
    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Some(token),
        _ => None,
    }
}

/// 認証ミドルウェア
///
/// トークンが有効な場合のみ次のハンドラへ進み、それ以外は 401 を返して打ち切る。
pub async fn require_auth(
    State(state): State<AuthnState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match authenticate(state.token_codec.as_ref(), request.headers()) {
        Ok(account) => {
            request.extensions_mut().insert(account);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

impl<S> FromRequestParts<S> for AuthenticatedAccount
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedAccount>()
            .copied()
            .ok_or_else(|| {
                ApiError::dependency(
                    message::USER_ID_NOT_IN_CONTEXT,
                    "認証ミドルウェアが適用されていないルートで認証情報を参照した",
                )
            })
    }
}
