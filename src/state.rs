use crate::models::{ApiError, CashierConfig};
use crate::services::{CashierApiClient, OrderQuery, OrderWatcher, SessionManager};
use std::sync::Arc;
use std::time::Duration;

/// 应用全局状态
///
/// 每个字段代表应用核心能力的单一来源:
/// - api: 收银台后端交互
/// - watcher: 订单状态轮询
/// - session_manager: 轮询会话生命周期管理
pub struct AppState {
    /// 收银台API客户端: 唯一的后端通信渠道
    pub api: Arc<CashierApiClient>,

    /// 订单状态轮询器
    pub watcher: Arc<OrderWatcher>,

    /// 会话管理器: 防止定时器泄露的看守者
    pub session_manager: Arc<SessionManager>,

    /// 收银台配置
    pub config: CashierConfig,
}

impl AppState {
    /// 初始化应用状态
    ///
    /// # 错误处理
    /// API客户端构建失败将导致整个应用无法启动,
    /// 没有后端通道的收银台没有存在意义
    pub fn new(config: CashierConfig) -> Result<Self, ApiError> {
        let api = Arc::new(CashierApiClient::new(&config)?);
        let watcher = Arc::new(OrderWatcher::new(
            Arc::clone(&api) as Arc<dyn OrderQuery>,
            Duration::from_millis(config.poll_interval_ms),
        ));
        let session_manager = Arc::new(SessionManager::new());

        tracing::info!(
            base_url = %config.base_url,
            poll_interval_ms = %config.poll_interval_ms,
            "AppState initialized with order watcher and session manager"
        );

        Ok(Self {
            api,
            watcher,
            session_manager,
            config,
        })
    }
}
