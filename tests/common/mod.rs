//! 测试公共模块
//!
//! 提供Mock收银台API与快照构造工具。
//! 每个Mock都服务于契约测试,避免真实网络依赖。

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

use cashier_order::models::{ApiError, OrderSnapshot, QueryOrderParams};
use cashier_order::services::OrderQuery;

/// Mock收银台API
///
/// 按预置脚本逐次返回响应,脚本耗尽后固定返回网络失败,
/// 轮询不会因此停下,调用次数仍可统计。
/// 可选的响应延迟用于模拟慢后端,验证在途请求的取消语义。
pub struct MockCashierApi {
    /// 预置响应脚本 (先进先出)
    script: Mutex<VecDeque<Result<OrderSnapshot, ApiError>>>,
    /// 累计调用次数
    calls: AtomicUsize,
    /// 每次响应前的延迟
    delay: Duration,
}

impl MockCashierApi {
    /// 创建新的Mock API
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
        }
    }

    /// 设置响应延迟 (模拟慢后端)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// 追加一次成功响应,快照携带指定状态码
    pub async fn push_status(&self, status: i64) {
        self.script
            .lock()
            .await
            .push_back(Ok(snapshot_with_status(status)));
    }

    /// 追加一次成功响应,使用完整快照
    pub async fn push_snapshot(&self, snapshot: OrderSnapshot) {
        self.script.lock().await.push_back(Ok(snapshot));
    }

    /// 追加一次失败响应
    pub async fn push_error(&self, error: ApiError) {
        self.script.lock().await.push_back(Err(error));
    }

    /// 累计调用次数
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockCashierApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderQuery for MockCashierApi {
    async fn query_order(&self, _params: &QueryOrderParams) -> Result<OrderSnapshot, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match self.script.lock().await.pop_front() {
            Some(result) => result,
            // 脚本耗尽: 按瞬时网络失败处理
            None => Err(ApiError::NetworkFailed("mock脚本耗尽".to_string())),
        }
    }
}

/// 构造测试用订单快照
pub fn snapshot_with_status(status: i64) -> OrderSnapshot {
    OrderSnapshot {
        order_id: "00001413410001ABa".to_string(),
        status,
        expired_time: Some(1_770_000_000_000),
        address: "0xCF1439F146F9D9C53bb9A65Dfd0AF5A7b8418AFb".to_string(),
        chain_name: "BNB Smart Chain".to_string(),
        chain_id: Some(56),
        token_id: Some(1),
        token_name: "USDT".to_string(),
        contract_address: "0x55d398326f99059fF775485246999027B3197955".to_string(),
        quantity: "100.01".to_string(),
        token_price: Some(serde_json::Value::from("1.0002")),
        partner_name: Some("SkyPay".to_string()),
        remark: None,
        out_order_id: None,
        logo: None,
        lang: Some("zh-CN".to_string()),
        tx_hash: None,
    }
}
