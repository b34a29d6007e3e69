//! 服务层模块
//!
//! 包含所有业务逻辑服务:
//! - `cashier_api`: 收银台API客户端,查询订单状态
//! - `order_watcher`: 订单状态轮询器,固定节奏查询直到终态
//! - `session_manager`: 轮询会话管理器,保证单活跃任务
//! - `config_service`: 配置服务,从环境变量加载连接参数
//!
//! # 设计原则
//!
//! 1. **存在即合理**: 每个服务都有单一职责,互不重叠
//! 2. **优雅即简约**: 方法签名清晰,易于理解和使用
//! 3. **性能即艺术**: 单任务串行轮询,快照整体替换
//! 4. **错误处理**: 所有外部调用都有完整错误处理和日志
//! 5. **日志安全**: 记录关键操作,不记录授权值
//!
//! # 服务架构
//!
//! ```text
//! ┌──────────────────┐
//! │   展示层 (外部)   │
//! └────────┬─────────┘
//!          │ watch通道 (只读)
//!          ▼
//! ┌──────────────────────────────────────┐
//! │          Services Layer              │
//! │  ┌──────────────┐  ┌──────────────┐  │
//! │  │ OrderWatcher │──│SessionManager│  │
//! │  └──────┬───────┘  └──────────────┘  │
//! │         │ OrderQuery trait           │
//! │  ┌──────▼─────────────────────────┐  │
//! │  │       CashierApiClient         │  │
//! │  └────────────────────────────────┘  │
//! └──────────────────────────────────────┘
//!          │
//!          ▼
//!     收银台后端 (POST /cashier/order/query)
//! ```
//!
//! # 使用示例
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use cashier_order::models::{CashierConfig, QueryOrderParams};
//! use cashier_order::services::{CashierApiClient, OrderQuery, OrderWatcher};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // 初始化服务
//! let config = CashierConfig::default();
//! let api: Arc<dyn OrderQuery> = Arc::new(CashierApiClient::new(&config)?);
//! let watcher = OrderWatcher::new(api, Duration::from_millis(config.poll_interval_ms));
//!
//! // 启动轮询,订阅状态更新
//! let handle = watcher.start(QueryOrderParams::new(
//!     "00001413410001ABa".to_string(),
//!     "e_token".to_string(),
//! ));
//! let mut updates = handle.subscribe();
//! while updates.changed().await.is_ok() {
//!     let session = updates.borrow_and_update().clone();
//!     println!("状态: {:?}", session.status);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cashier_api;
pub mod config_service;
pub mod order_watcher;
pub mod session_manager;

// 重导出常用类型,简化外部引用
pub use cashier_api::{CashierApiClient, OrderQuery};
pub use config_service::ConfigService;
pub use order_watcher::{OrderWatcher, WatchHandle};
pub use session_manager::SessionManager;
