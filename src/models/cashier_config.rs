use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 默认API基础地址 (正式环境)
pub const DEFAULT_BASE_URL: &str = "https://pay.dogpay.io/api";

/// 默认请求超时 (秒)
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// 默认轮询间隔 (毫秒)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 4000;

/// 收银台配置错误
///
/// 处理收银台配置加载过程中的失败场景。
/// 每个错误都表达清晰的失败原因,便于诊断和恢复。
#[derive(Debug, Error, Serialize, Deserialize)]
#[serde(tag = "error", content = "details")]
pub enum ConfigError {
    /// 无效的API基础地址
    ///
    /// 地址为空或不是 http/https 协议
    #[error("无效的API基础地址: {0}")]
    InvalidBaseUrl(String),

    /// 无效的数值配置
    ///
    /// 环境变量存在但无法解析为正整数
    #[error("无效的数值配置 {key}: {value}")]
    InvalidNumber { key: String, value: String },

    /// 无效的轮询间隔
    ///
    /// 轮询间隔必须为正数,0会使定时器退化为忙循环
    #[error("无效的轮询间隔: {0}毫秒")]
    InvalidPollInterval(u64),
}

/// 收银台连接配置
///
/// 封装访问收银台后端所需的全部参数。
/// 令牌与语言从配置显式传入,不做任何环境隐式查找,
/// 保证API客户端可独立构造、独立测试。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashierConfig {
    /// API基础地址
    ///
    /// 示例: "https://pay.dogpay.io/api"
    pub base_url: String,

    /// 单次请求超时 (秒)
    pub timeout_secs: u64,

    /// 轮询间隔 (毫秒)
    ///
    /// 默认: 4000
    pub poll_interval_ms: u64,

    /// Bearer令牌 (可选)
    ///
    /// 存在时附加到 Authorization 头
    pub bearer_token: Option<String>,

    /// 语言标识 (可选)
    ///
    /// 存在时附加到 Accept-Language 头,后端据此本地化 msg 文案
    pub lang: Option<String>,
}

impl CashierConfig {
    /// 创建新的收银台配置
    ///
    /// 超时与轮询间隔取默认值,可在构造后覆盖。
    ///
    /// # 示例
    /// ```
    /// use cashier_order::models::CashierConfig;
    ///
    /// let config = CashierConfig::new("https://pay.dogpay.io/api".to_string());
    /// assert_eq!(config.poll_interval_ms, 4000);
    /// ```
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            bearer_token: None,
            lang: None,
        }
    }

    /// 设置Bearer令牌
    pub fn with_bearer_token(mut self, token: String) -> Self {
        self.bearer_token = Some(token);
        self
    }

    /// 设置语言标识
    pub fn with_lang(mut self, lang: String) -> Self {
        self.lang = Some(lang);
        self
    }

    /// 校验配置
    ///
    /// # 错误
    /// - `ConfigError::InvalidBaseUrl`: 地址为空或协议不受支持
    /// - `ConfigError::InvalidPollInterval`: 轮询间隔为0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidPollInterval(self.poll_interval_ms));
        }
        Ok(())
    }
}

impl Default for CashierConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL.to_string())
    }
}
