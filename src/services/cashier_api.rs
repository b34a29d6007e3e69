use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::models::{ApiError, CashierConfig, OrderSnapshot, QueryOrderParams};

/// 订单查询协作者接口
///
/// 轮询状态机只依赖此接口获取订单状态,不关心底层传输。
/// 失败与"尚未到达终态"可区分: 任何 `Err` 都表示本轮作废,
/// 调用方保留上一份快照并按节奏重试。
#[async_trait]
pub trait OrderQuery: Send + Sync {
    /// 查询订单当前状态
    async fn query_order(&self, params: &QueryOrderParams) -> Result<OrderSnapshot, ApiError>;
}

/// 收银台API统一响应包裹
///
/// 线上接口所有响应都是 { code, msg, data } 三段结构,
/// code为0表示业务成功
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    code: i64,
    msg: String,
    data: Option<T>,
}

/// 收银台API客户端
///
/// 职责:
/// - 携带订单号与授权值调用订单查询接口
/// - 解开响应包裹,区分业务失败与传输失败
/// - 附加鉴权与语言头 (均来自显式配置,不做环境隐式查找)
pub struct CashierApiClient {
    http: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
    lang: Option<String>,
}

impl CashierApiClient {
    /// 创建新的客户端
    ///
    /// # 参数
    /// - `config`: 收银台连接配置 (地址、超时、可选令牌与语言)
    ///
    /// # 错误
    /// - `ApiError::NetworkFailed`: HTTP客户端构建失败
    pub fn new(config: &CashierConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::NetworkFailed(format!("HTTP客户端构建失败: {}", e)))?;

        tracing::info!(
            base_url = %config.base_url,
            timeout_secs = %config.timeout_secs,
            "Cashier API client initialized"
        );

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer_token: config.bearer_token.clone(),
            lang: config.lang.clone(),
        })
    }
}

#[async_trait]
impl OrderQuery for CashierApiClient {
    /// 查询订单当前状态
    ///
    /// POST {base_url}/cashier/order/query,请求体为查询参数的JSON。
    ///
    /// # 错误
    /// - `ApiError::NetworkFailed`: 连接失败或超时
    /// - `ApiError::HttpStatusError`: 非200状态码 (含401,令牌失效)
    /// - `ApiError::JsonParseFailed`: 响应体无法解析
    /// - `ApiError::BusinessFailed`: 包裹中 code 非0
    /// - `ApiError::InvalidResponse`: code 为0但 data 缺失
    async fn query_order(&self, params: &QueryOrderParams) -> Result<OrderSnapshot, ApiError> {
        let url = format!("{}/cashier/order/query", self.base_url);

        tracing::debug!(
            order_id = %params.order_id,
            "Querying cashier order status"
        );

        let mut request = self.http.post(&url).json(params);
        if let Some(token) = &self.bearer_token {
            request = request.header(reqwest::header::AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(lang) = &self.lang {
            request = request.header(reqwest::header::ACCEPT_LANGUAGE, lang);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(
                order_id = %params.order_id,
                status = %status,
                "Cashier API returned HTTP error"
            );
            return Err(ApiError::HttpStatusError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        let envelope: ApiEnvelope<OrderSnapshot> =
            serde_json::from_slice(&body).map_err(|e| {
                tracing::error!(
                    order_id = %params.order_id,
                    error = %e,
                    "Failed to parse cashier response"
                );
                ApiError::JsonParseFailed(e.to_string())
            })?;

        if envelope.code != 0 {
            tracing::warn!(
                order_id = %params.order_id,
                code = %envelope.code,
                msg = %envelope.msg,
                "Cashier API returned business failure"
            );
            return Err(ApiError::BusinessFailed {
                code: envelope.code,
                msg: envelope.msg,
            });
        }

        let snapshot = envelope
            .data
            .ok_or_else(|| ApiError::InvalidResponse("code为0但data缺失".to_string()))?;

        tracing::debug!(
            order_id = %snapshot.order_id,
            raw_status = %snapshot.status,
            "Order snapshot received"
        );

        Ok(snapshot)
    }
}
