use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{OrderSession, OrderSnapshot, PaymentStatus, WatchPhase};

/// 订单状态更新事件
///
/// 从轮询任务推送到展示层的状态快照,每次推送整体替换。
/// 展示层据此渲染四态进度、二维码区域与倒计时,本核心不关心其呈现。
#[derive(Debug, Clone, Serialize)]
pub struct OrderStatusEvent {
    /// 轮询会话ID
    pub session_id: Uuid,

    /// 订单号
    pub order_id: String,

    /// 派生支付状态
    pub status: PaymentStatus,

    /// 轮询阶段
    pub phase: WatchPhase,

    /// 订单快照 (首次成功获取前不存在)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<OrderSnapshot>,

    /// 状态更新时间
    pub updated_at: DateTime<Utc>,
}

impl OrderStatusEvent {
    /// 由轮询会话构造状态事件
    pub fn from_session(session: &OrderSession) -> Self {
        Self {
            session_id: session.session_id,
            order_id: session.order_id.clone(),
            status: session.status,
            phase: session.phase,
            snapshot: session.snapshot.clone(),
            updated_at: session.updated_at,
        }
    }
}

/// 订单错误事件
///
/// 轮询以失败终态收束时推送到展示层
#[derive(Debug, Clone, Serialize)]
pub struct OrderErrorEvent {
    /// 订单号
    pub order_id: String,

    /// 错误类型
    pub error_type: String,

    /// 错误消息
    pub message: String,

    /// 错误发生时间
    pub timestamp: DateTime<Utc>,
}

impl OrderErrorEvent {
    pub fn new(order_id: String, error_type: String, message: String) -> Self {
        Self {
            order_id,
            error_type,
            message,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_from_session_without_snapshot() {
        let session = OrderSession::new("order_1".to_string());
        let event = OrderStatusEvent::from_session(&session);

        assert_eq!(event.order_id, "order_1");
        assert_eq!(event.status, PaymentStatus::Pending);
        assert_eq!(event.phase, WatchPhase::Polling);

        // 快照缺失时不序列化该字段
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("snapshot").is_none());
        assert_eq!(json["status"], "pending");
    }

    #[test]
    fn test_error_event() {
        let event = OrderErrorEvent::new(
            "order_1".to_string(),
            "order_failed".to_string(),
            "订单已失败".to_string(),
        );
        assert_eq!(event.error_type, "order_failed");
        assert!(event.timestamp <= Utc::now());
    }
}
