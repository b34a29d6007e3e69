use std::env;

use crate::models::cashier_config::{DEFAULT_BASE_URL, DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_SECS};
use crate::models::{CashierConfig, ConfigError, QueryOrderParams};

/// 配置服务
///
/// 从环境变量加载收银台配置,职责单一:
/// - 读取连接参数,缺省回退到默认值
/// - 校验后交付完整的 `CashierConfig`
/// - 读取订单查询参数 (托管页URL查询串的环境变量形态)
///
/// `.env` 文件由入口处的 dotenvy 预先注入,本服务只面对环境变量。
pub struct ConfigService;

impl ConfigService {
    /// 从环境变量加载收银台配置
    ///
    /// 读取环境变量:
    /// - CASHIER_API_BASE_URL: API基础地址 (默认: 正式环境)
    /// - CASHIER_API_TIMEOUT_SECS: 单次请求超时秒数 (默认: 15)
    /// - CASHIER_POLL_INTERVAL_MS: 轮询间隔毫秒 (默认: 4000)
    /// - CASHIER_BEARER_TOKEN: Bearer令牌 (可选)
    /// - CASHIER_LANG: 语言标识 (可选)
    ///
    /// # 错误
    /// - `ConfigError::InvalidNumber`: 数值变量存在但无法解析
    /// - `ConfigError::InvalidBaseUrl` / `InvalidPollInterval`: 校验失败
    pub fn load_config() -> Result<CashierConfig, ConfigError> {
        let config = CashierConfig {
            base_url: Self::env_or("CASHIER_API_BASE_URL", DEFAULT_BASE_URL),
            timeout_secs: Self::parse_number("CASHIER_API_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            poll_interval_ms: Self::parse_number(
                "CASHIER_POLL_INTERVAL_MS",
                DEFAULT_POLL_INTERVAL_MS,
            )?,
            bearer_token: Self::env_optional("CASHIER_BEARER_TOKEN"),
            lang: Self::env_optional("CASHIER_LANG"),
        };

        config.validate()?;

        tracing::info!(
            base_url = %config.base_url,
            poll_interval_ms = %config.poll_interval_ms,
            "收银台配置加载完成"
        );

        Ok(config)
    }

    /// 读取订单查询参数
    ///
    /// 读取环境变量:
    /// - CASHIER_ORDER_ID: 订单号
    /// - CASHIER_ACCESS_TOKEN: 查询授权值
    ///
    /// 缺失的变量以空串交付,是否因此保持空闲由轮询器判定,
    /// 本服务不在此处报错。
    pub fn order_params() -> QueryOrderParams {
        QueryOrderParams::new(
            Self::env_or("CASHIER_ORDER_ID", ""),
            Self::env_or("CASHIER_ACCESS_TOKEN", ""),
        )
    }

    /// 读取环境变量,缺省回退默认值
    fn env_or(key: &str, default: &str) -> String {
        env::var(key).unwrap_or_else(|_| default.to_string())
    }

    /// 读取可选环境变量,空串视作缺失
    fn env_optional(key: &str) -> Option<String> {
        env::var(key).ok().filter(|value| !value.is_empty())
    }

    /// 解析数值环境变量
    ///
    /// 缺失回退默认值;存在但不可解析则报错,不做静默吞掉
    fn parse_number(key: &str, default: u64) -> Result<u64, ConfigError> {
        match env::var(key) {
            Err(_) => Ok(default),
            Ok(value) => value.parse().map_err(|_| ConfigError::InvalidNumber {
                key: key.to_string(),
                value,
            }),
        }
    }
}
