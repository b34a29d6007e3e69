use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::OrderSnapshot;
use crate::utils::time_utils;

/// 支付状态
///
/// 由原始状态码派生的四态粗粒度状态,是轮询控制流唯一依据的状态。
///
/// 状态转换流程:
/// Pending -> Confirming -> Completed
///     |           |
///     +-----------+---> Error (后端标记订单失败)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// 等待支付
    Pending,

    /// 已检测到支付,等待区块确认
    Confirming,

    /// 支付完成
    Completed,

    /// 订单失败
    Error,
}

impl PaymentStatus {
    /// 从原始状态码派生支付状态
    ///
    /// 映射规则 (每次更新都按同一规则重新计算):
    /// - `1` -> Completed
    /// - `2` -> Confirming
    /// - `-1` -> Error
    /// - 其余任意整数 (含 `0` 与未定义取值) -> Pending
    ///
    /// 未识别的状态码宽松归入待支付,避免后端新增取值时误报失败。
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => PaymentStatus::Completed,
            2 => PaymentStatus::Confirming,
            -1 => PaymentStatus::Error,
            _ => PaymentStatus::Pending,
        }
    }

    /// 检查是否为终态
    ///
    /// 终态包括:
    /// - `Completed`: 支付完成
    /// - `Error`: 订单失败
    ///
    /// 一旦进入终态,不应再进行状态轮询。
    pub fn is_final(&self) -> bool {
        matches!(self, PaymentStatus::Completed | PaymentStatus::Error)
    }
}

/// 轮询阶段
///
/// 显式的生命周期状态机: Idle -> Polling -> Stopped。
/// 转换仅由启动、轮询结果落地和取消触发,定时器的创建与销毁
/// 与阶段一一对应,不依赖外部重建。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WatchPhase {
    /// 空闲 (参数缺失时永不启动,这是约定行为而非错误)
    Idle,

    /// 轮询中
    Polling,

    /// 已停止 (到达终态或被取消)
    Stopped,
}

/// 订单轮询会话
///
/// 单个订单的进程内轮询记录: 最近一次成功获取的快照、派生状态
/// 与生命周期阶段。轮询任务独占写入,展示层只读。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSession {
    /// 会话唯一ID (区分同一订单的先后轮询)
    pub session_id: Uuid,

    /// 订单号
    pub order_id: String,

    /// 生命周期阶段
    pub phase: WatchPhase,

    /// 派生支付状态 (首次成功获取前为 Pending)
    pub status: PaymentStatus,

    /// 最近一次成功获取的订单快照
    pub snapshot: Option<OrderSnapshot>,

    /// 创建时间
    pub created_at: DateTime<Utc>,

    /// 最近更新时间
    pub updated_at: DateTime<Utc>,
}

impl OrderSession {
    /// 创建轮询中的会话
    pub fn new(order_id: String) -> Self {
        let now = Utc::now();
        Self {
            session_id: Uuid::new_v4(),
            order_id,
            phase: WatchPhase::Polling,
            status: PaymentStatus::Pending,
            snapshot: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 创建空闲会话
    ///
    /// 订单号或授权值缺失时使用,永不产生网络活动。
    pub fn idle(order_id: String) -> Self {
        let mut session = Self::new(order_id);
        session.phase = WatchPhase::Idle;
        session
    }

    /// 应用新快照
    ///
    /// 整体替换既有快照并按统一规则重新派生状态。
    /// 查询失败时不调用本方法,上一份快照保持原样。
    pub fn apply_snapshot(&mut self, snapshot: OrderSnapshot) {
        self.status = PaymentStatus::from_code(snapshot.status);
        self.snapshot = Some(snapshot);
        self.updated_at = Utc::now();
    }

    /// 标记轮询结束
    pub fn mark_stopped(&mut self) {
        self.phase = WatchPhase::Stopped;
        self.updated_at = Utc::now();
    }

    /// 检查是否已达终态
    pub fn is_final(&self) -> bool {
        self.status.is_final()
    }

    /// 剩余支付时间的倒计时展示
    ///
    /// 格式 "HH:MM:SS";快照缺失或未携带过期时间则返回 "--"。
    pub fn remaining_display(&self, now_ms: i64) -> String {
        let expired_time = self.snapshot.as_ref().and_then(|s| s.expired_time);
        time_utils::remaining_duration(expired_time, now_ms)
    }
}
