use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API调用相关错误
///
/// 处理与收银台后端交互时的各种失败场景。
/// 对轮询状态机而言,任何一种失败都只意味着"本轮作废,保留上一份
/// 快照,按节奏重试",错误分类服务于日志诊断而非控制流。
#[derive(Debug, Error, Serialize, Deserialize)]
#[serde(tag = "error", content = "details")]
pub enum ApiError {
    /// 网络请求失败
    ///
    /// 可能原因:
    /// - 网络连接中断
    /// - 收银台服务器不可达
    /// - DNS解析失败
    #[error("网络请求失败: {0}")]
    NetworkFailed(String),

    /// HTTP状态码错误
    ///
    /// 收银台后端返回了非200状态码
    #[error("HTTP错误 {status}: {message}")]
    HttpStatusError { status: u16, message: String },

    /// JSON解析失败
    ///
    /// 后端返回的数据格式不符合预期
    #[error("响应数据解析失败: {0}")]
    JsonParseFailed(String),

    /// 业务处理失败
    ///
    /// 响应包裹中 code 非0,msg 携带后端给出的原因
    #[error("业务处理失败 (code {code}): {msg}")]
    BusinessFailed { code: i64, msg: String },

    /// 响应格式无效
    ///
    /// 结构可解析但内容不完整 (如 code 为0却缺少 data)
    #[error("响应格式无效: {0}")]
    InvalidResponse(String),
}

/// 实现从reqwest::Error到ApiError的转换
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::NetworkFailed("请求超时".to_string())
        } else if err.is_connect() {
            ApiError::NetworkFailed("无法连接到服务器".to_string())
        } else {
            ApiError::NetworkFailed(err.to_string())
        }
    }
}

/// 实现从serde_json::Error到ApiError的转换
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::JsonParseFailed(err.to_string())
    }
}
