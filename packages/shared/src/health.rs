//! # ヘルスチェック共通型
//!
//! ヘルスチェックエンドポイントのレスポンス型と、稼働時間の文字列表現を提供する。

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// ヘルスチェックレスポンス
///
/// ## 使用例
///
/// ```
/// use std::time::Duration;
///
/// use taskflow_shared::HealthResponse;
///
/// let response = HealthResponse::ok(Duration::from_secs(75));
/// assert_eq!(response.status, "ok");
/// assert_eq!(response.uptime, "1m15s");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 稼働状態（常に `"ok"`）
    pub status: String,
    /// プロセス起動からの経過時間（秒単位に切り捨て）
    pub uptime: String,
}

impl HealthResponse {
    /// 稼働中のレスポンスを作成する
    pub fn ok(uptime: Duration) -> Self {
        Self {
            status: "ok".to_string(),
            uptime: format_uptime(uptime),
        }
    }
}

/// 経過時間を `1h2m3s` 形式の文字列にする
///
/// 秒未満は切り捨てる。上位の単位が 0 の場合は省略するが、
/// 上位の単位が出力された後の下位単位は 0 でも出力する（`1h0m0s`）。
pub fn format_uptime(uptime: Duration) -> String {
    let total = uptime.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}
