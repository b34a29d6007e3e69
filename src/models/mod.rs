//! 数据模型模块
//!
//! 包含所有核心数据结构:
//! - errors: 错误类型定义 (API调用错误)
//! - order: 订单快照与查询参数 (线上接口的透传数据)
//! - order_session: 轮询会话管理 (支付状态派生与生命周期追踪)
//! - events: 展示层事件通知 (状态更新与错误推送)
//! - cashier_config: 收银台连接配置 (地址、超时、轮询节奏)
//!
//! # 设计原则
//!
//! 1. **存在即合理**: 每个字段都有明确目的,无冗余
//! 2. **优雅即简约**: 类型名自文档化,代码自我阐述
//! 3. **性能即艺术**: 快照整体替换,读写无部分状态
//! 4. **错误处理**: 所有校验返回 Result,提供完整上下文
//! 5. **日志安全**: 授权值不记录到日志

pub mod cashier_config;
pub mod errors;
pub mod events;
pub mod order;
pub mod order_session;

// 重导出常用类型,简化外部引用
pub use cashier_config::{CashierConfig, ConfigError};
pub use errors::ApiError;
pub use events::{OrderErrorEvent, OrderStatusEvent};
pub use order::{OrderSnapshot, QueryOrderParams};
pub use order_session::{OrderSession, PaymentStatus, WatchPhase};
