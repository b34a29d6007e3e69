//! 订单轮询会话管理器
//!
//! 职责: 确保同一时间只有一个活跃的轮询任务
//! 策略: 单例模式 - 新会话启动时自动取消旧会话

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// 会话管理器
///
/// 防止定时器泄露的唯一看守者:
/// - 跟踪当前活跃的轮询任务
/// - 在新任务启动前取消旧任务
pub struct SessionManager {
    /// 当前活跃的会话 (order_id, cancel_token)
    current_watch: Mutex<Option<(String, CancellationToken)>>,
}

impl SessionManager {
    /// 创建新的会话管理器
    pub fn new() -> Self {
        Self {
            current_watch: Mutex::new(None),
        }
    }

    /// 设置新的活跃会话,自动取消旧会话
    ///
    /// # 参数
    /// - `order_id`: 新订单号
    /// - `cancel`: 新轮询任务的取消令牌
    ///
    /// # 副作用
    /// - 如果存在旧会话,将触发其取消令牌终止轮询任务
    pub async fn set_current_watch(&self, order_id: String, cancel: CancellationToken) {
        let mut guard = self.current_watch.lock().await;

        // 取消旧会话
        if let Some((old_order_id, old_cancel)) = guard.take() {
            tracing::info!(
                旧订单号 = %old_order_id,
                新订单号 = %order_id,
                "取消旧会话,启动新会话"
            );
            old_cancel.cancel();
        } else {
            tracing::info!(
                订单号 = %order_id,
                "启动首个会话"
            );
        }

        // 设置新会话
        *guard = Some((order_id, cancel));
    }

    /// 取消当前活跃会话
    ///
    /// 用于应用退出或手动清理场景
    pub async fn cancel_current_watch(&self) {
        let mut guard = self.current_watch.lock().await;

        if let Some((order_id, cancel)) = guard.take() {
            tracing::info!(订单号 = %order_id, "手动取消会话");
            cancel.cancel();
        }
    }

    /// 获取当前活跃会话的订单号 (仅用于调试)
    #[allow(dead_code)]
    pub async fn current_order_id(&self) -> Option<String> {
        self.current_watch
            .lock()
            .await
            .as_ref()
            .map(|(id, _)| id.clone())
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_watch_replacement_cancels_old_token() {
        let manager = SessionManager::new();

        let first = CancellationToken::new();
        manager
            .set_current_watch("order_1".to_string(), first.clone())
            .await;
        assert_eq!(manager.current_order_id().await, Some("order_1".to_string()));
        assert!(!first.is_cancelled());

        // 替换会话: 旧令牌被触发
        let second = CancellationToken::new();
        manager
            .set_current_watch("order_2".to_string(), second.clone())
            .await;
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        assert_eq!(manager.current_order_id().await, Some("order_2".to_string()));
    }

    #[tokio::test]
    async fn test_cancel_current_watch() {
        let manager = SessionManager::new();

        let token = CancellationToken::new();
        manager
            .set_current_watch("order_1".to_string(), token.clone())
            .await;
        assert!(manager.current_order_id().await.is_some());

        manager.cancel_current_watch().await;
        assert!(token.is_cancelled());
        assert!(manager.current_order_id().await.is_none());

        // 再次取消无会话可取,静默通过
        manager.cancel_current_watch().await;
    }
}
