//! # 認証ハンドラ
//!
//! アカウント登録とログインのエンドポイントを提供する。
//!
//! ## エンドポイント
//!
//! - `POST /register` - アカウント登録
//! - `POST /login` - ログイン（トークン発行）
//!
//! リクエストボディはどちらも `{"email": string, "password": string}`。
//! JSON として解釈できない、またはフィールドが欠けている場合は 400 を返す。

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use taskflow_domain::password::PlainPassword;

use super::account::AccountDto;
use crate::{
    error::{ApiError, message},
    usecase::{AuthUseCaseImpl, LoginInput, RegisterInput},
};

/// 認証ハンドラの共有状態
pub struct AuthState {
    pub usecase: AuthUseCaseImpl,
}

/// 登録・ログインのリクエスト
#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub email:    String,
    pub password: String,
}

/// ログインレスポンスに含めるアカウント情報
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginUserDto {
    pub id:    i64,
    pub email: String,
}

/// ログインレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user:  LoginUserDto,
}

/// POST /register
///
/// ## レスポンス
///
/// - `201 Created`: 作成したアカウント（`id` / `email` / `created_at`）
/// - `400 Bad Request`: 入力不正、メールアドレス重複
/// - `500 Internal Server Error`: ハッシュ化失敗、データベースエラー
#[tracing::instrument(skip_all)]
pub async fn register(
    State(state): State<Arc<AuthState>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AccountDto>), ApiError> {
    let Json(req) = payload.map_err(|e| {
        tracing::debug!(error = %e.body_text(), "登録リクエストを解釈できない");
        ApiError::Validation(message::INVALID_REGISTER_BODY)
    })?;

    let account = state
        .usecase
        .register(RegisterInput {
            email:    req.email,
            password: PlainPassword::new(req.password),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(AccountDto::from(&account))))
}

/// POST /login
///
/// ## レスポンス
///
/// - `200 OK`: トークンとアカウント情報（`id` / `email`）
/// - `400 Bad Request`: JSON として解釈できない、フィールドが空
/// - `401 Unauthorized`: メールアドレスまたはパスワードが誤り（どちらかは区別しない）
/// - `500 Internal Server Error`: トークン発行失敗など
#[tracing::instrument(skip_all)]
pub async fn login(
    State(state): State<Arc<AuthState>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| {
        tracing::debug!(error = %e.body_text(), "ログインリクエストを解釈できない");
        ApiError::Validation(message::INVALID_LOGIN_BODY)
    })?;

    let output = state
        .usecase
        .login(LoginInput {
            email:    req.email,
            password: PlainPassword::new(req.password),
        })
        .await?;

    Ok(Json(LoginResponse {
        token: output.token,
        user:  LoginUserDto {
            id:    output.account.id().as_i64(),
            email: output.account.email().as_str().to_string(),
        },
    }))
}
