//! # アプリケーション設定
//!
//! 環境変数からアプリケーション設定を読み込む。
//!
//! ## 設計方針
//!
//! [12-Factor App](https://12factor.net/ja/config) の原則に従い、
//! すべての設定を環境変数から読み込む。署名鍵にはデフォルト値を持たせない。
//!
//! 解析は変数名から値を引く関数を受け取る純粋関数（[`AppConfig::from_vars`]）として実装し、
//! テストでプロセスの環境変数を書き換えずに検証できるようにする。
//!
//! ## 環境変数一覧
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|------------|------|
//! | `API_HOST` | No | `0.0.0.0` | バインドアドレス |
//! | `API_PORT` | **Yes** | - | ポート番号 |
//! | `DATABASE_URL` | **Yes** | - | PostgreSQL 接続 URL |
//! | `JWT_SECRET` | **Yes** | - | トークン署名鍵（空は不可、32 バイト未満は警告） |
//! | `PASSWORD_HASH_MEMORY_KIB` | No | `65536` | Argon2id のメモリコスト |
//! | `PASSWORD_HASH_ITERATIONS` | No | `1` | Argon2id の反復回数 |
//! | `PASSWORD_HASH_PARALLELISM` | No | `1` | Argon2id の並列度 |
//! | `NOTIFICATION_BACKEND` | No | `noop` | 通知の送信バックエンド（`noop` / `smtp`） |
//! | `SMTP_HOST` | smtp 時 | - | SMTP ホスト |
//! | `SMTP_PORT` | smtp 時 | - | SMTP ポート |
//! | `NOTIFICATION_FROM_ADDRESS` | No | `noreply@taskflow.local` | 送信元メールアドレス |

use std::{env, str::FromStr};

use taskflow_infra::{HashingCost, TokenSecret};
use thiserror::Error;

/// 推奨する署名鍵の最小バイト長（HS256 の出力長）
pub const RECOMMENDED_SECRET_BYTES: usize = 32;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_FROM_ADDRESS: &str = "noreply@taskflow.local";

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 必須の環境変数が未設定
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    /// 値を解釈できない
    #[error("{name} の値が不正です: {value}")]
    Invalid { name: &'static str, value: String },

    /// 署名鍵が空
    #[error("JWT_SECRET に空文字列は指定できません")]
    EmptySecret,
}

/// 通知の送信バックエンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationBackend {
    /// 送信しない（ログ出力のみ）
    Noop,
    /// SMTP サーバー経由で送信
    Smtp { host: String, port: u16 },
}

/// 通知機能の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationConfig {
    pub backend:      NotificationBackend,
    pub from_address: String,
}

/// アプリケーション全体の設定
///
/// 起動時に一度だけ構築し、各コンポーネントに渡す。
/// `Debug` 出力では署名鍵がマスクされる。
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// バインドアドレス
    pub host:         String,
    /// ポート番号
    pub port:         u16,
    /// データベース接続 URL
    pub database_url: String,
    /// トークン署名鍵
    pub jwt_secret:   TokenSecret,
    /// パスワードハッシュのコスト
    pub hashing_cost: HashingCost,
    /// 通知設定
    pub notification: NotificationConfig,
}

impl AppConfig {
    /// プロセスの環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// 変数名から値を引く関数を使って設定を組み立てる
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));

        let jwt_secret = required("JWT_SECRET")?;
        if jwt_secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        let jwt_secret = TokenSecret::new(jwt_secret);
        if jwt_secret.len() < RECOMMENDED_SECRET_BYTES {
            tracing::warn!(
                bytes = jwt_secret.len(),
                recommended = RECOMMENDED_SECRET_BYTES,
                "JWT_SECRET が推奨長より短い"
            );
        }

        let defaults = HashingCost::default();
        let hashing_cost = HashingCost {
            memory_kib:  parse_or(&lookup, "PASSWORD_HASH_MEMORY_KIB", defaults.memory_kib)?,
            iterations:  parse_or(&lookup, "PASSWORD_HASH_ITERATIONS", defaults.iterations)?,
            parallelism: parse_or(&lookup, "PASSWORD_HASH_PARALLELISM", defaults.parallelism)?,
        };

        Ok(Self {
            host: lookup("API_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse("API_PORT", &required("API_PORT")?)?,
            database_url: required("DATABASE_URL")?,
            jwt_secret,
            hashing_cost,
            notification: NotificationConfig::from_vars(&lookup)?,
        })
    }
}

impl NotificationConfig {
    fn from_vars(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend = match lookup("NOTIFICATION_BACKEND").as_deref() {
            None | Some("noop") => NotificationBackend::Noop,
            Some("smtp") => {
                let host = lookup("SMTP_HOST").ok_or(ConfigError::Missing("SMTP_HOST"))?;
                let port = lookup("SMTP_PORT").ok_or(ConfigError::Missing("SMTP_PORT"))?;
                NotificationBackend::Smtp {
                    host,
                    port: parse("SMTP_PORT", &port)?,
                }
            }
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name:  "NOTIFICATION_BACKEND",
                    value: other.to_string(),
                });
            }
        };

        Ok(Self {
            backend,
            from_address: lookup("NOTIFICATION_FROM_ADDRESS")
                .unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string()),
        })
    }
}

fn parse<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => parse(name, &value),
        None => Ok(default),
    }
}
